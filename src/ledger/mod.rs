//! Ledger data model: transactions, the ordered store, and report periods.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod period;
pub mod transaction;

pub use ledger::Ledger;
pub use period::{filter_by_period, start_of_week, ReportPeriod};
pub use transaction::{
    normalize_category, parse_timestamp, Transaction, TransactionDraft, TransactionKind,
    DEFAULT_CATEGORY,
};
