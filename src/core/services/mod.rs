pub mod summary_service;
pub mod transaction_service;

pub use summary_service::{
    DistributionSlice, SummaryService, Totals, TrendPoint, DEFAULT_TREND_DAYS, INCOME_COLOR,
    INCOME_LABEL, MAX_TREND_DAYS, PALETTE,
};
pub use transaction_service::TransactionService;
