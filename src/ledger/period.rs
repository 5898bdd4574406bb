//! Report windows relative to a reference instant.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Selects which transactions count toward the distribution report.
pub enum ReportPeriod {
    Daily,
    Weekly,
    Monthly,
    #[default]
    All,
}

impl ReportPeriod {
    pub const ALL: [ReportPeriod; 4] = [
        ReportPeriod::Daily,
        ReportPeriod::Weekly,
        ReportPeriod::Monthly,
        ReportPeriod::All,
    ];

    /// Like [`FromStr`], but anything unrecognised selects [`ReportPeriod::All`].
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::debug!(period = value, "unknown report period, using all");
            ReportPeriod::All
        })
    }

    /// Returns true when `date` belongs to this period as seen from `reference`.
    pub fn contains(self, date: NaiveDateTime, reference: NaiveDateTime) -> bool {
        match self {
            ReportPeriod::Daily => date.date() == reference.date(),
            ReportPeriod::Weekly => date >= start_of_week(reference) && date <= reference,
            ReportPeriod::Monthly => {
                date.year() == reference.year() && date.month() == reference.month()
            }
            ReportPeriod::All => true,
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReportPeriod::Daily => "daily",
            ReportPeriod::Weekly => "weekly",
            ReportPeriod::Monthly => "monthly",
            ReportPeriod::All => "all",
        };
        f.write_str(label)
    }
}

impl FromStr for ReportPeriod {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" | "today" => Ok(ReportPeriod::Daily),
            "weekly" | "week" => Ok(ReportPeriod::Weekly),
            "monthly" | "month" => Ok(ReportPeriod::Monthly),
            "all" => Ok(ReportPeriod::All),
            other => Err(format!("unknown period `{other}`")),
        }
    }
}

/// Midnight of the Sunday that opens the week containing `reference`.
///
/// The time of day of `reference` is dropped, so the whole Sunday belongs to
/// the week.
pub fn start_of_week(reference: NaiveDateTime) -> NaiveDateTime {
    let offset = reference.weekday().num_days_from_sunday() as i64;
    (reference.date() - Duration::days(offset)).and_time(NaiveTime::MIN)
}

/// Keeps the transactions that fall inside `period`, preserving ledger order.
pub fn filter_by_period<'a>(
    transactions: &'a [Transaction],
    period: ReportPeriod,
    reference: NaiveDateTime,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|txn| period.contains(txn.date, reference))
        .collect()
}
