//! Derived views over a transaction snapshot: totals, category distribution and
//! the rolling daily trend. Everything here is a pure function of its inputs.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::ledger::{Transaction, TransactionKind};

/// Label of the bucket that collects every income entry.
pub const INCOME_LABEL: &str = "Income";
/// Fixed color of the income bucket.
pub const INCOME_COLOR: &str = "#28a745";
/// Colors cycled through by the remaining buckets, indexed by encounter order.
pub const PALETTE: [&str; 7] = [
    "#dc3545", "#ff7f50", "#ffb347", "#ffc107", "#20c997", "#0dcaf0", "#6f42c1",
];
/// Lookback horizon of the trend chart.
pub const DEFAULT_TREND_DAYS: u32 = 30;
/// Longest trend window a snapshot will build, one year plus a leap day.
pub const MAX_TREND_DAYS: u32 = 366;

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
/// One wedge of the distribution chart.
pub struct DistributionSlice {
    pub label: String,
    pub amount: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
/// Income and expense totals for one calendar day.
pub struct TrendPoint {
    pub day: NaiveDate,
    pub label: String,
    pub income: f64,
    pub expense: f64,
}

impl TrendPoint {
    fn empty(day: NaiveDate) -> Self {
        Self {
            day,
            label: day_label(day),
            income: 0.0,
            expense: 0.0,
        }
    }
}

/// Aggregation entry points used by the ledger manager and reports.
pub struct SummaryService;

impl SummaryService {
    /// Sums income and expense amounts; the balance is their difference.
    pub fn compute_totals<'a, I>(transactions: I) -> Totals
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut totals = Totals::default();
        for txn in transactions {
            match txn.kind {
                TransactionKind::Income => totals.income += txn.amount,
                TransactionKind::Expense => totals.expense += txn.amount,
            }
        }
        totals.balance = totals.income - totals.expense;
        totals
    }

    /// Groups income into a single bucket and expenses by category, in the order
    /// buckets are first encountered.
    pub fn compute_distribution<'a, I>(transactions: I) -> Vec<DistributionSlice>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut buckets: Vec<(String, f64)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for txn in transactions {
            let key = distribution_key(txn);
            match index.get(key) {
                Some(&slot) => buckets[slot].1 += txn.amount,
                None => {
                    index.insert(key.to_string(), buckets.len());
                    buckets.push((key.to_string(), txn.amount));
                }
            }
        }

        buckets
            .into_iter()
            .enumerate()
            .map(|(position, (label, amount))| {
                let color = slice_color(&label, position);
                DistributionSlice {
                    label,
                    amount,
                    color,
                }
            })
            .collect()
    }

    /// Produces `window_days` points ending on `reference`'s day, oldest first.
    /// Days without activity report zero totals. The window is capped at
    /// [`MAX_TREND_DAYS`] and never reaches before the earliest representable date.
    pub fn compute_daily_trend<'a, I>(
        transactions: I,
        reference: NaiveDateTime,
        window_days: u32,
    ) -> Vec<TrendPoint>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let window = window_days.min(MAX_TREND_DAYS);
        if window == 0 {
            return Vec::new();
        }
        let end = reference.date();
        let start = end
            .checked_sub_signed(Duration::days(i64::from(window) - 1))
            .unwrap_or(NaiveDate::MIN);
        let mut points: Vec<TrendPoint> = start
            .iter_days()
            .take_while(|day| *day <= end)
            .map(TrendPoint::empty)
            .collect();

        for txn in transactions {
            let day = txn.day();
            if day < start || day > end {
                continue;
            }
            let point = &mut points[(day - start).num_days() as usize];
            match txn.kind {
                TransactionKind::Income => point.income += txn.amount,
                TransactionKind::Expense => point.expense += txn.amount,
            }
        }
        points
    }
}

fn distribution_key(txn: &Transaction) -> &str {
    match txn.kind {
        TransactionKind::Income => INCOME_LABEL,
        TransactionKind::Expense => txn.category.as_str(),
    }
}

fn slice_color(label: &str, position: usize) -> &'static str {
    if label == INCOME_LABEL {
        INCOME_COLOR
    } else {
        PALETTE[position % PALETTE.len()]
    }
}

/// Short `day/month` label, e.g. `7/3` for March 7th.
pub fn day_label(day: NaiveDate) -> String {
    format!("{}/{}", day.day(), day.month())
}
