use std::{fmt, str::FromStr};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category assigned when the user leaves the field blank.
pub const DEFAULT_CATEGORY: &str = "Others";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub text: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default = "Transaction::default_category")]
    pub category: String,
    #[serde(with = "timestamp")]
    pub date: NaiveDateTime,
}

impl Transaction {
    /// Builds a transaction stamped with `date`. Callers validate the fields first.
    pub fn new(
        text: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        category: Option<String>,
        date: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            amount,
            kind,
            category: normalize_category(category),
            date,
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    pub fn default_category() -> String {
        DEFAULT_CATEGORY.to_string()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.text, self.category, self.amount)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Direction of money flow for a transaction.
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        };
        f.write_str(label)
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(TransactionKind::Income),
            "expense" | "out" => Ok(TransactionKind::Expense),
            other => Err(format!("unknown transaction type `{other}`")),
        }
    }
}

/// Unvalidated user input for a transaction, also used to hand an edited entry back
/// for re-entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub text: String,
    pub amount: Option<f64>,
    pub kind: TransactionKind,
    pub category: Option<String>,
    /// Creation instant carried over from an edited entry.
    pub date: Option<NaiveDateTime>,
    pub id: Option<Uuid>,
}

impl TransactionDraft {
    pub fn new(
        text: impl Into<String>,
        amount: Option<f64>,
        kind: TransactionKind,
        category: Option<String>,
    ) -> Self {
        Self {
            text: text.into(),
            amount,
            kind,
            category,
            date: None,
            id: None,
        }
    }
}

impl From<Transaction> for TransactionDraft {
    fn from(txn: Transaction) -> Self {
        Self {
            text: txn.text,
            amount: Some(txn.amount),
            kind: txn.kind,
            category: Some(txn.category),
            date: Some(txn.date),
            id: Some(txn.id),
        }
    }
}

/// Trims the label and falls back to [`DEFAULT_CATEGORY`] when nothing remains.
pub fn normalize_category(category: Option<String>) -> String {
    category
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(Transaction::default_category)
}

/// Parses stored timestamps. RFC 3339 values (including the `...Z` form written by
/// browsers) are converted to local wall-clock time; naive values are taken as-is.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(instant.with_timezone(&Local).naive_local());
    }
    if let Ok(naive) = trimmed.parse::<NaiveDateTime>() {
        return Some(naive);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use super::{parse_timestamp, TIMESTAMP_FORMAT};

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp `{raw}`")))
    }
}
