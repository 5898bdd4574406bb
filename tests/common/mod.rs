#![allow(dead_code)]

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use pocket_ledger::{
    config::Config,
    core::{FixedClock, LedgerManager},
    ledger::{TransactionDraft, TransactionKind},
    storage::{JsonStorage, MemoryStorage},
};

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

/// Wednesday evening used as "now" across the suites.
pub fn reference_now() -> NaiveDateTime {
    at(2025, 3, 12, 18)
}

pub fn memory_manager(now: NaiveDateTime) -> LedgerManager {
    LedgerManager::new(
        Box::new(MemoryStorage::new()),
        Box::new(FixedClock(now)),
        &Config::default(),
    )
}

pub fn json_manager(dir: &Path, now: NaiveDateTime) -> LedgerManager {
    let storage = JsonStorage::new(dir.to_path_buf()).unwrap();
    LedgerManager::new(Box::new(storage), Box::new(FixedClock(now)), &Config::default())
}

pub fn income(text: &str, amount: f64, category: &str) -> TransactionDraft {
    TransactionDraft::new(text, Some(amount), TransactionKind::Income, Some(category.into()))
}

pub fn expense(text: &str, amount: f64, category: &str) -> TransactionDraft {
    TransactionDraft::new(text, Some(amount), TransactionKind::Expense, Some(category.into()))
}
