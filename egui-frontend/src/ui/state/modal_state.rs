//! # Modal State Module
//!
//! State of the "Add Transaction" dialog.
//!
//! ## Responsibilities:
//! - Editable draft (amount text, direction, store, description, category, date)
//! - Category options filtered by direction
//! - Validation and conversion into a signed `CreateTransaction`
//! - Submission progress and the last error shown in the dialog

use chrono::NaiveDate;
use shared::{Category, CreateTransaction};
use thiserror::Error;

use super::category_lookup::CategoryLookup;

/// Validation failures. Nothing is sent to the backend when one occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please enter a valid amount")]
    InvalidAmount,

    #[error("The selected category is no longer available")]
    UnknownCategory,

    #[error("The selected category does not match the transaction type")]
    CategoryTypeMismatch,
}

/// What the user has typed so far
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub is_income: bool,
    pub amount: String,
    pub store: String,
    pub description: String,
    pub category_id: Option<String>,
    pub date: NaiveDate,
}

impl TransactionDraft {
    /// Empty expense dated `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            is_income: false,
            amount: String::new(),
            store: String::new(),
            description: String::new(),
            category_id: None,
            date: today,
        }
    }

    /// Switch direction. The selected category belongs to the old direction, so it is dropped.
    pub fn set_income(&mut self, is_income: bool) {
        if self.is_income != is_income {
            self.is_income = is_income;
            self.category_id = None;
        }
    }

    /// Categories the picker may offer for the current direction
    pub fn category_options<'a>(&self, lookup: &'a CategoryLookup) -> Vec<&'a Category> {
        lookup.of_type(self.is_income)
    }

    /// Positive magnitude parsed from the amount field. Accepts "," as decimal separator.
    pub fn parse_amount(&self) -> Result<f64, FormError> {
        let normalized = self.amount.trim().replace(',', ".");
        let value: f64 = normalized.parse().map_err(|_| FormError::InvalidAmount)?;
        if !value.is_finite() || value <= 0.0 {
            return Err(FormError::InvalidAmount);
        }
        Ok(value)
    }

    /// Build the request. The magnitude is negated for expenses.
    pub fn to_request(&self, lookup: &CategoryLookup) -> Result<CreateTransaction, FormError> {
        let magnitude = self.parse_amount()?;

        if let Some(id) = self.category_id.as_deref() {
            let category = lookup.get(Some(id)).ok_or(FormError::UnknownCategory)?;
            if category.is_income != self.is_income {
                return Err(FormError::CategoryTypeMismatch);
            }
        }

        Ok(CreateTransaction {
            amount: if self.is_income { magnitude } else { -magnitude },
            store: non_blank(&self.store),
            description: non_blank(&self.description),
            category_id: self.category_id.clone(),
            transaction_date: self.date,
            is_income: self.is_income,
        })
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// The open dialog
#[derive(Debug, Clone, PartialEq)]
pub struct AddTransactionForm {
    pub draft: TransactionDraft,
    /// A request is in flight; the submit button is disabled
    pub submitting: bool,
    /// Last validation or backend error, shown under the fields
    pub error: Option<String>,
}

impl AddTransactionForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            draft: TransactionDraft::new(today),
            submitting: false,
            error: None,
        }
    }
}
