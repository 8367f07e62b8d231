use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Authenticated user as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// Identity at the external auth provider
    #[serde(rename = "google_id")]
    pub external_auth_id: String,
    pub email: String,
    #[serde(rename = "f_name")]
    pub first_name: String,
    #[serde(rename = "l_name")]
    pub last_name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Transaction category owned by a single user.
/// A category is either an income category or an expense category, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    /// Display color as a hex string ("#RRGGBB" or "#RGB")
    #[serde(default)]
    pub color: Option<String>,
    pub is_income: bool,
    pub user_id: String,
}

impl Category {
    /// Label used in category pickers, icon first when present
    pub fn display_label(&self) -> String {
        match &self.icon {
            Some(icon) if !icon.is_empty() => format!("{} {}", icon, self.name),
            _ => self.name.clone(),
        }
    }
}

/// Where a transaction came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionSource {
    /// Parsed from a bank notification email
    Email,
    /// Entered by hand in the UI
    #[default]
    Manual,
}

/// Bank transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    /// Signed amount (positive for income, negative for expense)
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    #[serde(default)]
    pub store: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    pub transaction_date: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_source")]
    pub source: TransactionSource,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.amount >= 0.0
    }
}

/// Income/expense totals for a single month. Computed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MonthlySummary {
    #[serde(deserialize_with = "deserialize_amount")]
    pub income: f64,
    /// Sum of the absolute values of negative amounts
    #[serde(deserialize_with = "deserialize_amount")]
    pub expenses: f64,
    /// income - expenses
    #[serde(deserialize_with = "deserialize_amount")]
    pub balance: f64,
    pub transaction_count: i64,
}

/// Payload for creating a new transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransaction {
    /// Signed amount (negated by the client for expenses)
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// ISO 8601 date (YYYY-MM-DD)
    pub transaction_date: NaiveDate,
    pub is_income: bool,
}

/// Filter passed to `get_transactions`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransactionFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
}

impl From<Period> for TransactionFilter {
    fn from(period: Period) -> Self {
        Self {
            year: Some(period.year()),
            month: Some(period.month()),
        }
    }
}

/// A (year, month) pair scoping the displayed transactions and summary.
/// The month is always within 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct Period {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawPeriod {
    year: i32,
    month: u32,
}

impl TryFrom<RawPeriod> for Period {
    type Error = String;

    fn try_from(raw: RawPeriod) -> Result<Self, Self::Error> {
        Period::new(raw.year, raw.month).ok_or_else(|| format!("Invalid month: {}", raw.month))
    }
}

impl Period {
    /// Returns None when month is outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The period containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The period containing today's local date
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// Human-readable label, e.g. "March 2025"
    pub fn label(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.next().first_day().and_then(|d| d.pred_opt())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Amounts are decimals on the backend and may arrive either as JSON numbers
/// or as decimal strings ("-42.50").
fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(value) => Ok(value),
        Amount::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("Invalid amount '{}': {}", text, e))),
    }
}

/// Older rows carry a null source; those predate email ingestion and are manual
fn deserialize_source<'de, D>(deserializer: D) -> Result<TransactionSource, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TransactionSource>::deserialize(deserializer)?.unwrap_or_default())
}
