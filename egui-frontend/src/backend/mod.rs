//! # Backend Module
//!
//! The UI never talks to storage or the auth provider directly. Everything goes
//! through [`BackendClient`], a capability interface over the backend process.
//!
//! - `bridge` - newline-delimited JSON RPC to the backend process
//! - `error` - failure taxonomy for backend calls

pub mod bridge;
pub mod error;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;
use shared::{Category, CreateTransaction, MonthlySummary, Period, Transaction, User};

pub use bridge::{BridgeClient, BridgeTimeouts};
pub use error::{ApiError, ApiResult};

/// Operations the backend exposes to the UI
///
/// Every call is a single request/response; there is no streaming. All data is
/// scoped to the signed-in user by the backend.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Returns None when nobody is signed in
    async fn get_current_user(&self) -> ApiResult<Option<User>>;

    /// Runs the interactive sign-in flow and establishes a session
    async fn login(&self) -> ApiResult<()>;

    /// Ends the current session
    async fn logout(&self) -> ApiResult<()>;

    async fn get_categories(&self) -> ApiResult<Vec<Category>>;

    async fn get_transactions(&self, period: Period) -> ApiResult<Vec<Transaction>>;

    /// Totals for exactly the same transactions `get_transactions` returns for the period
    async fn get_monthly_summary(&self, period: Period) -> ApiResult<MonthlySummary>;

    /// The caller is responsible for refetching transactions and summary afterwards
    async fn add_transaction(&self, transaction: &CreateTransaction) -> ApiResult<()>;
}
