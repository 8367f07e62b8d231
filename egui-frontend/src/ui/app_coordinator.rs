//! # App Coordinator Module
//!
//! Turns user intent into backend calls and backend results into [`AppState`].
//!
//! ## Key Functions:
//! - `load_user_data()` - resolve the session, then categories, then the ledger
//! - `login()` / `logout()` - session transitions
//! - `previous_month()` / `next_month()` / `set_period()` - navigation, each followed by a refresh
//! - `refresh()` - fetch transactions and summary for the selected period
//! - `submit_add_transaction()` - validate the open form, create, refresh, close
//!
//! ## Concurrency:
//! The UI never awaits these methods itself. It spawns them on the tokio runtime
//! and renders whatever state has been published so far. Several calls can be in
//! flight at once; results from a superseded period or session are dropped by
//! [`LedgerState`](crate::ui::state::LedgerState) using the [`RefreshTicket`]
//! taken when the request was issued.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, error, info, warn};
use shared::{CreateTransaction, MonthlySummary, Period, Transaction};
use thiserror::Error;
use tokio::sync::watch;

use crate::backend::{ApiError, ApiResult, BackendClient};
use crate::ui::state::{AddTransactionForm, AppState, CategoryLookup, FormError, RefreshTicket, TransactionDraft};

/// Why a submission from the add-transaction dialog did not go through
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] FormError),

    #[error(transparent)]
    Backend(#[from] ApiError),

    #[error("No transaction form is open")]
    NotOpen,

    #[error("A transaction is already being added")]
    InProgress,
}

#[derive(Clone)]
pub struct AppCoordinator {
    backend: Arc<dyn BackendClient>,
    state: Arc<watch::Sender<AppState>>,
    sequence: Arc<AtomicU64>,
}

impl AppCoordinator {
    pub fn new(backend: Arc<dyn BackendClient>, period: Period) -> Self {
        let (state, _) = watch::channel(AppState::new(period));
        Self {
            backend,
            state: Arc::new(state),
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Copy of the current state for rendering
    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Receiver that wakes on every state change
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    // ---------------------------------------------------------------------
    // Session
    // ---------------------------------------------------------------------

    /// Resolve who is signed in. When someone is, load their categories, clear
    /// the loading flag, and fetch the selected period.
    pub async fn load_user_data(&self) {
        info!("👤 Loading current user");
        self.state.send_modify(|s| s.session.loading = true);

        match self.backend.get_current_user().await {
            Ok(Some(user)) => {
                info!("👤 Signed in as {} ({})", user.full_name(), user.email);
                self.state.send_modify(|s| s.session.sign_in(user));
            }
            Ok(None) => {
                info!("👤 No active session");
                self.state.send_modify(|s| {
                    if s.session.is_authenticated() {
                        s.sign_out();
                    }
                });
            }
            Err(e) => {
                error!("❌ Failed to load current user: {}", e);
                self.state.send_modify(|s| {
                    s.session.loading = false;
                    s.notice = Some("Failed to load your account".to_string());
                });
                return;
            }
        }

        let (authenticated, epoch) = {
            let s = self.state.borrow();
            (s.session.is_authenticated(), s.session.epoch())
        };
        if !authenticated {
            self.state.send_modify(|s| s.session.loading = false);
            return;
        }

        self.load_categories(epoch).await;
        self.state.send_modify(|s| s.session.loading = false);
        self.refresh().await;
    }

    async fn load_categories(&self, epoch: u64) {
        match self.backend.get_categories().await {
            Ok(categories) => {
                info!("🏷️ Loaded {} categories", categories.len());
                self.state.send_modify(|s| {
                    if s.session.epoch() == epoch {
                        s.categories = CategoryLookup::new(categories);
                    }
                });
            }
            Err(e) => {
                error!("❌ Failed to load categories: {}", e);
                self.state.send_modify(|s| s.notice = Some("Failed to load categories".to_string()));
            }
        }
    }

    /// Run the backend sign-in flow. On failure the state is left as it was and
    /// a notice is shown.
    pub async fn login(&self) {
        info!("🔐 Starting login");
        self.state.send_modify(|s| {
            s.session.loading = true;
            s.notice = None;
        });

        if let Err(e) = self.backend.login().await {
            warn!("❌ Login failed: {}", e);
            self.state.send_modify(|s| {
                s.session.loading = false;
                s.notice = Some(e.user_message("Login failed"));
            });
            return;
        }

        self.load_user_data().await;
    }

    /// End the session and drop everything that belonged to it. Nothing is refetched.
    pub async fn logout(&self) {
        info!("🚪 Logging out");
        match self.backend.logout().await {
            Ok(()) => {
                self.state.send_modify(AppState::sign_out);
                info!("🚪 Logged out");
            }
            Err(e) => {
                error!("❌ Logout failed: {}", e);
                self.state.send_modify(|s| s.notice = Some(e.user_message("Failed to sign out")));
            }
        }
    }

    pub fn dismiss_notice(&self) {
        self.state.send_if_modified(|s| s.notice.take().is_some());
    }

    // ---------------------------------------------------------------------
    // Period navigation
    // ---------------------------------------------------------------------

    pub async fn previous_month(&self) {
        self.step_period(Period::previous).await;
    }

    pub async fn next_month(&self) {
        self.step_period(Period::next).await;
    }

    /// Select `period` and refresh. Selecting the current period again is a no-op.
    pub async fn set_period(&self, period: Period) {
        let changed = self.state.send_if_modified(|s| {
            if s.period == period {
                return false;
            }
            s.period = period;
            true
        });

        if changed {
            info!("📅 Switched to {}", period.label());
            self.refresh().await;
        }
    }

    async fn step_period(&self, step: fn(&Period) -> Period) {
        // Stepping happens inside the update so rapid clicks never read the same month twice
        let mut selected = None;
        self.state.send_modify(|s| {
            s.period = step(&s.period);
            selected = Some(s.period);
        });

        if let Some(period) = selected {
            info!("📅 Switched to {}", period.label());
        }
        self.refresh().await;
    }

    // ---------------------------------------------------------------------
    // Ledger
    // ---------------------------------------------------------------------

    /// Fetch transactions and summary for the selected period, concurrently.
    /// Results that arrive after the period or session changed are discarded.
    pub async fn refresh(&self) {
        let (period, epoch, authenticated) = {
            let s = self.state.borrow();
            (s.period, s.session.epoch(), s.session.is_authenticated())
        };
        if !authenticated {
            debug!("⏭️ Skipping refresh, nobody is signed in");
            return;
        }

        let ticket = RefreshTicket {
            sequence: self.sequence.fetch_add(1, Ordering::SeqCst) + 1,
            period,
            epoch,
        };
        info!("📊 Loading transactions and summary for {} (request #{})", period, ticket.sequence);
        self.state.send_modify(|s| s.ledger.begin_refresh());

        let (transactions, summary) = tokio::join!(
            self.backend.get_transactions(period),
            self.backend.get_monthly_summary(period)
        );
        self.apply_refresh(ticket, transactions, summary);
        self.state.send_modify(|s| s.ledger.finish_refresh());
    }

    fn apply_refresh(
        &self,
        ticket: RefreshTicket,
        transactions: ApiResult<Vec<Transaction>>,
        summary: ApiResult<MonthlySummary>,
    ) {
        let period = ticket.period;

        match transactions {
            Ok(transactions) => {
                let count = transactions.len();
                let applied = self.state.send_if_modified(|s| {
                    let (selected, current_epoch) = (s.period, s.session.epoch());
                    s.ledger.apply_transactions(ticket, selected, current_epoch, transactions)
                });
                if applied {
                    info!("📊 Showing {} transactions for {}", count, period);
                } else {
                    debug!("⏭️ Discarding superseded transactions for {} (request #{})", period, ticket.sequence);
                }
            }
            Err(e) => self.report_load_failure("transactions", &ticket, &e),
        }

        match summary {
            Ok(summary) => {
                let applied = self.state.send_if_modified(|s| {
                    let (selected, current_epoch) = (s.period, s.session.epoch());
                    s.ledger.apply_summary(ticket, selected, current_epoch, summary)
                });
                if applied {
                    info!(
                        "📊 Summary for {}: income {:.2}, expenses {:.2}, balance {:.2}",
                        period, summary.income, summary.expenses, summary.balance
                    );
                } else {
                    debug!("⏭️ Discarding superseded summary for {} (request #{})", period, ticket.sequence);
                }
            }
            Err(e) => self.report_load_failure("summary", &ticket, &e),
        }
    }

    /// Log a failed load and, if the request is still current, tell the user.
    /// Whatever was displayed before stays.
    fn report_load_failure(&self, what: &str, ticket: &RefreshTicket, e: &ApiError) {
        error!("❌ Failed to load {} for {}: {}", what, ticket.period, e);
        self.state.send_if_modified(|s| {
            if s.period != ticket.period || s.session.epoch() != ticket.epoch {
                return false;
            }
            s.notice = Some(format!("Failed to load {}", what));
            true
        });
    }

    // ---------------------------------------------------------------------
    // Add transaction
    // ---------------------------------------------------------------------

    pub fn open_add_transaction(&self, today: NaiveDate) {
        self.state.send_if_modified(|s| {
            if !s.session.is_authenticated() || s.add_transaction.is_some() {
                return false;
            }
            s.add_transaction = Some(AddTransactionForm::new(today));
            true
        });
    }

    pub fn close_add_transaction(&self) {
        self.state.send_if_modified(|s| s.add_transaction.take().is_some());
    }

    /// Store edits made in the dialog. Ignored while a submission is in flight.
    pub fn update_draft(&self, draft: TransactionDraft) {
        self.state.send_if_modified(|s| match s.add_transaction.as_mut() {
            Some(form) if !form.submitting && form.draft != draft => {
                form.draft = draft;
                true
            }
            _ => false,
        });
    }

    /// Create a transaction, then refresh whichever period is selected by the time it succeeds
    pub async fn add_transaction(&self, request: CreateTransaction) -> ApiResult<()> {
        info!(
            "💸 Adding {} of {:.2} on {}",
            if request.is_income { "income" } else { "expense" },
            request.amount.abs(),
            request.transaction_date
        );
        self.backend.add_transaction(&request).await?;
        info!("✅ Transaction added");
        self.refresh().await;
        Ok(())
    }

    /// Validate and submit the open dialog.
    ///
    /// Validation errors are shown in the dialog and nothing is sent. A backend
    /// rejection keeps the dialog open with the backend's message. On success the
    /// selected period is refreshed and the dialog closes.
    pub async fn submit_add_transaction(&self) -> Result<(), SubmitError> {
        let mut prepared: Result<CreateTransaction, SubmitError> = Err(SubmitError::NotOpen);
        self.state.send_if_modified(|s| {
            let Some(form) = s.add_transaction.as_mut() else {
                return false;
            };
            if form.submitting {
                prepared = Err(SubmitError::InProgress);
                return false;
            }
            match form.draft.to_request(&s.categories) {
                Ok(request) => {
                    form.submitting = true;
                    form.error = None;
                    prepared = Ok(request);
                }
                Err(e) => {
                    form.error = Some(e.to_string());
                    prepared = Err(e.into());
                }
            }
            true
        });

        let request = match prepared {
            Ok(request) => request,
            Err(e) => {
                warn!("⚠️ Transaction not submitted: {}", e);
                return Err(e);
            }
        };

        match self.add_transaction(request).await {
            Ok(()) => {
                self.state.send_if_modified(|s| s.add_transaction.take().is_some());
                Ok(())
            }
            Err(e) => {
                error!("❌ Failed to add transaction: {}", e);
                let message = e.user_message("Failed to add transaction");
                self.state.send_modify(|s| {
                    if let Some(form) = s.add_transaction.as_mut() {
                        form.submitting = false;
                        form.error = Some(message);
                    }
                });
                Err(e.into())
            }
        }
    }
}
