//! # UI Components Module
//!
//! Stateless widgets. Each takes what it draws as arguments and reports what
//! the user clicked as a small action enum; none of them call the backend.
//!
//! ## Module Organization:
//! - `theme` - palette, hex color parsing and global style
//! - `header` - title, avatar, user name and logout
//! - `login_screen` - signed-out landing page
//! - `dashboard` - month navigation and summary cards
//! - `transaction_table` - transactions of the selected month
//! - `add_transaction_modal` - manual entry form

pub mod add_transaction_modal;
pub mod dashboard;
pub mod header;
pub mod login_screen;
pub mod theme;
pub mod transaction_table;

pub use add_transaction_modal::*;
pub use dashboard::*;
pub use header::*;
pub use login_screen::*;
pub use theme::*;
pub use transaction_table::*;
