//! In-memory [`BackendClient`] for coordinator tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use shared::{
    Category, CreateTransaction, MonthlySummary, Period, Transaction, TransactionSource, User,
};
use tokio::sync::{oneshot, Notify};

use super::{ApiError, ApiResult, BackendClient};

/// A held `get_transactions` call: signals `started`, then waits for `release`
struct Gate {
    started: Arc<Notify>,
    release: oneshot::Receiver<()>,
}

#[derive(Default)]
struct Inner {
    signed_in: bool,
    user: Option<User>,
    categories: Vec<Category>,
    transactions: Vec<Transaction>,
    calls: Vec<String>,
    failing: HashSet<&'static str>,
    gates: HashMap<Period, Gate>,
    next_id: u32,
}

/// Fake backend: answers from memory, records every call, and can fail or
/// hold individual operations on demand
#[derive(Default)]
pub struct FakeBackend {
    inner: Mutex<Inner>,
}

impl FakeBackend {
    /// A backend with a signed-out user ready to log in and two categories
    pub fn new() -> Self {
        let fake = Self::default();
        {
            let mut inner = fake.inner.lock().unwrap();
            inner.user = Some(test_user());
            inner.categories = vec![
                category("c1", "Groceries", false),
                category("c2", "Salary", true),
            ];
        }
        fake
    }

    pub fn signed_in(self) -> Self {
        self.inner.lock().unwrap().signed_in = true;
        self
    }

    pub fn with_transaction(self, amount: f64, date: NaiveDate, category_id: Option<&str>) -> Self {
        self.insert(amount, date, category_id.map(str::to_string), TransactionSource::Email);
        self
    }

    pub fn fail(&self, operation: &'static str) {
        self.inner.lock().unwrap().failing.insert(operation);
    }

    pub fn recover(&self, operation: &'static str) {
        self.inner.lock().unwrap().failing.remove(operation);
    }

    /// Hold the next `get_transactions` call for `period` until the returned sender fires.
    /// `started` is notified once the held call has been issued.
    pub fn hold_transactions(&self, period: Period) -> (Arc<Notify>, oneshot::Sender<()>) {
        let (release_tx, release) = oneshot::channel();
        let started = Arc::new(Notify::new());
        self.inner.lock().unwrap().gates.insert(
            period,
            Gate {
                started: started.clone(),
                release,
            },
        );
        (started, release_tx)
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(operation)).count()
    }

    pub fn stored_transactions(&self) -> Vec<Transaction> {
        self.inner.lock().unwrap().transactions.clone()
    }

    fn record(&self, call: String, operation: &'static str) -> ApiResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        if inner.failing.contains(operation) {
            return Err(ApiError::Backend(format!("{} failed", operation)));
        }
        Ok(())
    }

    fn require_session(&self) -> ApiResult<()> {
        if self.inner.lock().unwrap().signed_in {
            Ok(())
        } else {
            Err(ApiError::Backend("No user logged in".to_string()))
        }
    }

    fn insert(
        &self,
        amount: f64,
        date: NaiveDate,
        category_id: Option<String>,
        source: TransactionSource,
    ) -> Transaction {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let transaction = Transaction {
            id: format!("t{}", inner.next_id),
            user_id: "u1".to_string(),
            amount,
            store: None,
            description: None,
            category_id,
            transaction_date: date,
            source,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        inner.transactions.push(transaction.clone());
        transaction
    }

    fn in_period(&self, period: Period) -> Vec<Transaction> {
        self.inner
            .lock()
            .unwrap()
            .transactions
            .iter()
            .filter(|t| period.contains(t.transaction_date))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl BackendClient for FakeBackend {
    async fn get_current_user(&self) -> ApiResult<Option<User>> {
        self.record("get_current_user".to_string(), "get_current_user")?;
        let inner = self.inner.lock().unwrap();
        Ok(if inner.signed_in { inner.user.clone() } else { None })
    }

    async fn login(&self) -> ApiResult<()> {
        self.record("login".to_string(), "login")?;
        self.inner.lock().unwrap().signed_in = true;
        Ok(())
    }

    async fn logout(&self) -> ApiResult<()> {
        self.record("logout".to_string(), "logout")?;
        self.inner.lock().unwrap().signed_in = false;
        Ok(())
    }

    async fn get_categories(&self) -> ApiResult<Vec<Category>> {
        self.record("get_categories".to_string(), "get_categories")?;
        self.require_session()?;
        Ok(self.inner.lock().unwrap().categories.clone())
    }

    async fn get_transactions(&self, period: Period) -> ApiResult<Vec<Transaction>> {
        self.record(format!("get_transactions {}", period), "get_transactions")?;
        self.require_session()?;

        let gate = self.inner.lock().unwrap().gates.remove(&period);
        if let Some(gate) = gate {
            gate.started.notify_one();
            let _ = gate.release.await;
        }

        Ok(self.in_period(period))
    }

    async fn get_monthly_summary(&self, period: Period) -> ApiResult<MonthlySummary> {
        self.record(format!("get_monthly_summary {}", period), "get_monthly_summary")?;
        self.require_session()?;

        let transactions = self.in_period(period);
        let income: f64 = transactions.iter().filter(|t| t.amount >= 0.0).map(|t| t.amount).sum();
        let expenses: f64 = transactions.iter().filter(|t| t.amount < 0.0).map(|t| -t.amount).sum();
        Ok(MonthlySummary {
            income,
            expenses,
            balance: income - expenses,
            transaction_count: transactions.len() as i64,
        })
    }

    async fn add_transaction(&self, transaction: &CreateTransaction) -> ApiResult<()> {
        self.record("add_transaction".to_string(), "add_transaction")?;
        self.require_session()?;
        self.insert(
            transaction.amount,
            transaction.transaction_date,
            transaction.category_id.clone(),
            TransactionSource::Manual,
        );
        Ok(())
    }
}

pub fn test_user() -> User {
    User {
        id: "u1".to_string(),
        external_auth_id: "g-1".to_string(),
        email: "maria@example.com".to_string(),
        first_name: "Maria".to_string(),
        last_name: "Papadopoulou".to_string(),
        photo_url: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn category(id: &str, name: &str, is_income: bool) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: None,
        color: None,
        is_income,
        user_id: "u1".to_string(),
    }
}
