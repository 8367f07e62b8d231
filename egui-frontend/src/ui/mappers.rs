//! Maps backend models to the strings and flags the widgets draw.
//!
//! Formatting only changes presentation: the sign of an amount decides the
//! direction, the magnitude is always formatted from `abs(amount)`.

use std::fmt::Write;

use chrono::NaiveDate;
use shared::{MonthlySummary, Transaction, TransactionSource};

use crate::config::DisplayConfig;
use crate::ui::state::CategoryLookup;

/// Row label when a transaction has neither store nor description
pub const EMPTY_LABEL: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Income,
    Expense,
}

impl Direction {
    /// Zero counts as income
    pub fn of(amount: f64) -> Self {
        if amount >= 0.0 {
            Direction::Income
        } else {
            Direction::Expense
        }
    }
}

/// Currency and date presentation built from [`DisplayConfig`]
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFormat {
    currency_symbol: String,
    symbol_after_amount: bool,
    decimal_separator: char,
    thousands_separator: char,
    date_format: String,
}

impl From<&DisplayConfig> for DisplayFormat {
    fn from(config: &DisplayConfig) -> Self {
        Self {
            currency_symbol: config.currency_symbol.clone(),
            symbol_after_amount: config.symbol_after_amount,
            decimal_separator: config.decimal_separator,
            thousands_separator: config.thousands_separator,
            date_format: config.date_format.clone(),
        }
    }
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self::from(&DisplayConfig::default())
    }
}

impl DisplayFormat {
    /// Rounded to cents, so -0.004 is treated as zero
    fn split_cents(value: f64) -> (bool, u64, u64) {
        let cents = (value.abs() * 100.0).round() as u64;
        (value < 0.0 && cents > 0, cents / 100, cents % 100)
    }

    fn group_thousands(&self, whole: u64) -> String {
        let digits = whole.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, digit) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(digit);
        }
        grouped
    }

    fn with_symbol(&self, sign: &str, number: &str) -> String {
        if self.symbol_after_amount {
            format!("{}{} {}", sign, number, self.currency_symbol)
        } else {
            format!("{}{}{}", sign, self.currency_symbol, number)
        }
    }

    fn number(&self, whole: u64, fraction: u64) -> String {
        format!("{}{}{:02}", self.group_thousands(whole), self.decimal_separator, fraction)
    }

    /// Signed money value, e.g. "-1.234,50 €"
    pub fn format_money(&self, value: f64) -> String {
        let (negative, whole, fraction) = Self::split_cents(value);
        self.with_symbol(if negative { "-" } else { "" }, &self.number(whole, fraction))
    }

    /// Unsigned magnitude, e.g. "42,50 €" for both 42.5 and -42.5
    pub fn format_magnitude(&self, value: f64) -> String {
        self.format_money(value.abs())
    }

    /// Balance with an explicit "+" when non-negative
    pub fn format_balance(&self, value: f64) -> String {
        let (negative, whole, fraction) = Self::split_cents(value);
        self.with_symbol(if negative { "-" } else { "+" }, &self.number(whole, fraction))
    }

    /// Falls back to ISO format if the configured pattern cannot be rendered
    pub fn format_date(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.date_format)).is_err() {
            return date.format("%Y-%m-%d").to_string();
        }
        out
    }
}

/// One line of the transaction table
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub date: String,
    pub label: String,
    pub category_name: String,
    pub category_color: String,
    pub source: TransactionSource,
    pub direction: Direction,
    pub amount: String,
}

impl TransactionRow {
    pub fn new(transaction: &Transaction, categories: &CategoryLookup, format: &DisplayFormat) -> Self {
        let category_id = transaction.category_id.as_deref();
        Self {
            date: format.format_date(transaction.transaction_date),
            label: row_label(transaction),
            category_name: categories.name_for(category_id).to_string(),
            category_color: categories.color_for(category_id).to_string(),
            source: transaction.source,
            direction: Direction::of(transaction.amount),
            amount: format.format_magnitude(transaction.amount),
        }
    }

    pub fn source_badge(&self) -> &'static str {
        match self.source {
            TransactionSource::Email => "📧",
            TransactionSource::Manual => "✏",
        }
    }

    pub fn source_hint(&self) -> &'static str {
        match self.source {
            TransactionSource::Email => "Imported from a bank e-mail",
            TransactionSource::Manual => "Added manually",
        }
    }
}

fn row_label(transaction: &Transaction) -> String {
    [&transaction.store, &transaction.description]
        .into_iter()
        .flatten()
        .map(|text| text.trim())
        .find(|text| !text.is_empty())
        .unwrap_or(EMPTY_LABEL)
        .to_string()
}

/// Text for the three summary cards
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCards {
    pub income: String,
    pub expenses: String,
    pub balance: String,
    pub balance_direction: Direction,
    pub transaction_count: i64,
}

impl SummaryCards {
    pub fn new(summary: &MonthlySummary, format: &DisplayFormat) -> Self {
        Self {
            income: format.format_magnitude(summary.income),
            expenses: format.format_magnitude(summary.expenses),
            balance: format.format_balance(summary.balance),
            balance_direction: Direction::of(summary.balance),
            transaction_count: summary.transaction_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::category;
    use chrono::{TimeZone, Utc};

    fn transaction(amount: f64, store: Option<&str>, description: Option<&str>) -> Transaction {
        Transaction {
            id: "t1".to_string(),
            user_id: "u1".to_string(),
            amount,
            store: store.map(str::to_string),
            description: description.map(str::to_string),
            category_id: Some("c1".to_string()),
            transaction_date: NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
            source: TransactionSource::Email,
            created_at: Utc.with_ymd_and_hms(2024, 3, 7, 0, 0, 0).unwrap(),
        }
    }

    fn us_format() -> DisplayFormat {
        DisplayFormat::from(&DisplayConfig {
            currency_symbol: "$".to_string(),
            symbol_after_amount: false,
            decimal_separator: '.',
            thousands_separator: ',',
            date_format: "%Y-%m-%d".to_string(),
        })
    }

    #[test]
    fn test_money_uses_configured_separators_and_symbol() {
        let euro = DisplayFormat::default();
        assert_eq!(euro.format_money(1234.5), "1.234,50 €");
        assert_eq!(euro.format_money(-1234567.891), "-1.234.567,89 €");
        assert_eq!(euro.format_money(0.0), "0,00 €");

        let dollar = us_format();
        assert_eq!(dollar.format_money(999.999), "$1,000.00");
        assert_eq!(dollar.format_money(-42.5), "-$42.50");
    }

    #[test]
    fn test_magnitude_ignores_sign() {
        let format = DisplayFormat::default();
        assert_eq!(format.format_magnitude(-42.5), format.format_magnitude(42.5));
        assert_eq!(format.format_magnitude(-42.5), "42,50 €");
    }

    #[test]
    fn test_balance_prefix() {
        let format = DisplayFormat::default();
        assert_eq!(format.format_balance(150.0), "+150,00 €");
        assert_eq!(format.format_balance(0.0), "+0,00 €");
        assert_eq!(format.format_balance(-0.001), "+0,00 €");
        assert_eq!(format.format_balance(-20.25), "-20,25 €");
        assert_eq!(us_format().format_balance(5.0), "+$5.00");
    }

    #[test]
    fn test_direction_follows_sign() {
        assert_eq!(Direction::of(0.0), Direction::Income);
        assert_eq!(Direction::of(10.0), Direction::Income);
        assert_eq!(Direction::of(-0.01), Direction::Expense);
    }

    #[test]
    fn test_row_resolves_category_and_label() {
        let categories = CategoryLookup::new(vec![category("c1", "Groceries", false)]);
        let format = DisplayFormat::default();

        let row = TransactionRow::new(&transaction(-42.5, Some("Market"), Some("Weekly")), &categories, &format);
        assert_eq!(row.label, "Market");
        assert_eq!(row.category_name, "Groceries");
        assert_eq!(row.direction, Direction::Expense);
        assert_eq!(row.amount, "42,50 €");
        assert_eq!(row.date, "07/03/2024");
        assert_eq!(row.source_badge(), "📧");

        let row = TransactionRow::new(&transaction(10.0, Some("  "), Some("Refund")), &categories, &format);
        assert_eq!(row.label, "Refund");

        let row = TransactionRow::new(&transaction(10.0, None, None), &CategoryLookup::default(), &format);
        assert_eq!(row.label, EMPTY_LABEL);
        assert_eq!(row.category_name, "—");
        assert_eq!(row.category_color, "#888");
    }

    #[test]
    fn test_summary_cards() {
        let summary = MonthlySummary {
            income: 1500.0,
            expenses: 1620.4,
            balance: -120.4,
            transaction_count: 12,
        };
        let cards = SummaryCards::new(&summary, &DisplayFormat::default());
        assert_eq!(cards.income, "1.500,00 €");
        assert_eq!(cards.expenses, "1.620,40 €");
        assert_eq!(cards.balance, "-120,40 €");
        assert_eq!(cards.balance_direction, Direction::Expense);
    }
}
