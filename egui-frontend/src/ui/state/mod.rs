//! # State Management Module
//!
//! Read-model state for the application, one module per concern:
//!
//! - `session_state` - who is signed in and the session epoch
//! - `category_lookup` - id to name/color resolution and picker filtering
//! - `ledger_state` - transactions and summary with the superseded-response guard
//! - `modal_state` - the "Add Transaction" dialog
//! - `app_state` - the composed value published to the UI

pub mod app_state;
pub mod category_lookup;
pub mod ledger_state;
pub mod modal_state;
pub mod session_state;

pub use app_state::*;
pub use category_lookup::*;
pub use ledger_state::*;
pub use modal_state::*;
pub use session_state::*;
