//! # Core Application State
//!
//! The single value the UI renders from. The coordinator owns it and publishes
//! every change; the UI only ever reads snapshots.

use shared::Period;

use super::category_lookup::CategoryLookup;
use super::ledger_state::LedgerState;
use super::modal_state::AddTransactionForm;
use super::session_state::SessionState;

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub session: SessionState,

    /// Selected month
    pub period: Period,

    /// Categories for the signed-in user
    pub categories: CategoryLookup,

    /// Transactions and summary for `period`
    pub ledger: LedgerState,

    /// Open "Add Transaction" dialog, if any
    pub add_transaction: Option<AddTransactionForm>,

    /// Last non-fatal problem worth telling the user about
    pub notice: Option<String>,
}

impl AppState {
    pub fn new(period: Period) -> Self {
        Self {
            session: SessionState::new(),
            period,
            categories: CategoryLookup::default(),
            ledger: LedgerState::default(),
            add_transaction: None,
            notice: None,
        }
    }

    /// Forget everything that belonged to the signed-in user. The period is kept.
    pub fn sign_out(&mut self) {
        self.session.sign_out();
        self.session.loading = false;
        self.categories = CategoryLookup::default();
        self.ledger.clear();
        self.add_transaction = None;
        self.notice = None;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Period::current())
    }
}
