pub mod app_coordinator;
pub mod app_implementation;
pub mod components;
pub mod mappers;
pub mod state;

pub use app_coordinator::{AppCoordinator, SubmitError};
pub use app_implementation::BankUsageApp;
