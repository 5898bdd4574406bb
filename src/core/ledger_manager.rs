use crate::{
    config::Config,
    core::{
        services::{SummaryService, TransactionService, MAX_TREND_DAYS},
        time::Clock,
    },
    errors::{LedgerError, Result},
    ledger::{filter_by_period, Ledger, ReportPeriod, Transaction, TransactionDraft},
    presentation::{DashboardSnapshot, DisplayMode, Renderer},
    storage::StorageBackend,
};

/// Facade that owns the ledger and coordinates mutation, persistence and
/// recomputation of every derived view.
///
/// Each mutating call is one unit of work: update the ledger, save it, rebuild the
/// snapshot from the full ledger and hand it to the attached renderer.
pub struct LedgerManager {
    ledger: Ledger,
    period: ReportPeriod,
    display_mode: DisplayMode,
    trend_days: u32,
    storage: Box<dyn StorageBackend>,
    clock: Box<dyn Clock>,
    renderer: Option<Box<dyn Renderer>>,
}

impl LedgerManager {
    /// Loads the persisted ledger and display preference.
    pub fn new(storage: Box<dyn StorageBackend>, clock: Box<dyn Clock>, config: &Config) -> Self {
        let ledger = Ledger::from_transactions(storage.load_transactions());
        let display_mode = storage.load_display_mode();
        let trend_days = config.trend_days.clamp(1, MAX_TREND_DAYS);
        if trend_days != config.trend_days {
            tracing::warn!(
                configured = config.trend_days,
                used = trend_days,
                "trend window out of range, clamping"
            );
        }
        tracing::info!(
            transactions = ledger.len(),
            display_mode = %display_mode,
            "ledger loaded"
        );
        Self {
            ledger,
            period: config.default_period,
            display_mode,
            trend_days,
            storage,
            clock,
            renderer: None,
        }
    }

    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.all()
    }

    pub fn period(&self) -> ReportPeriod {
        self.period
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    /// Validates and appends a new entry. Invalid drafts leave the ledger unchanged.
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<DashboardSnapshot> {
        let now = self.clock.now();
        let txn = TransactionService::add(&mut self.ledger, draft, now)?;
        tracing::info!(
            id = %txn.id,
            kind = %txn.kind,
            amount = txn.amount,
            category = %txn.category,
            "transaction added"
        );
        self.persist();
        Ok(self.publish())
    }

    /// Removes the entry at `position` and returns its fields so the caller can
    /// re-submit them through [`LedgerManager::add_transaction`]. The returned draft
    /// keeps the original date.
    pub fn edit_transaction(&mut self, position: usize) -> Result<TransactionDraft> {
        let draft = TransactionService::take_for_edit(&mut self.ledger, position)
            .map_err(Self::log_stale_position)?;
        tracing::info!(position, "transaction taken for edit");
        self.persist();
        self.publish();
        Ok(draft)
    }

    pub fn delete_transaction(&mut self, position: usize) -> Result<Transaction> {
        let removed = TransactionService::remove(&mut self.ledger, position)
            .map_err(Self::log_stale_position)?;
        tracing::info!(position, id = %removed.id, "transaction deleted");
        self.persist();
        self.publish();
        Ok(removed)
    }

    /// Switches the distribution report to `period`.
    pub fn set_period(&mut self, period: ReportPeriod) -> DashboardSnapshot {
        tracing::debug!(%period, "report period changed");
        self.period = period;
        self.publish()
    }

    pub fn toggle_display_mode(&mut self) -> DisplayMode {
        self.display_mode = self.display_mode.toggled();
        if let Err(err) = self.storage.save_display_mode(self.display_mode) {
            tracing::warn!(error = %err, "failed to persist display mode");
        }
        self.publish();
        self.display_mode
    }

    /// Recomputes every derived view from the current ledger.
    pub fn snapshot(&self) -> DashboardSnapshot {
        let now = self.clock.now();
        let transactions = self.ledger.all();
        DashboardSnapshot {
            transactions: transactions.to_vec(),
            totals: SummaryService::compute_totals(transactions),
            period: self.period,
            distribution: SummaryService::compute_distribution(filter_by_period(
                transactions,
                self.period,
                now,
            )),
            trend: SummaryService::compute_daily_trend(transactions, now, self.trend_days),
            display_mode: self.display_mode,
        }
    }

    /// Builds a fresh snapshot and pushes it to the renderer, if any.
    pub fn publish(&mut self) -> DashboardSnapshot {
        let snapshot = self.snapshot();
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.render(&snapshot);
        }
        snapshot
    }

    fn persist(&self) {
        if let Err(err) = self.storage.save_transactions(self.ledger.all()) {
            tracing::warn!(error = %err, "failed to persist transactions");
        }
    }

    fn log_stale_position(err: LedgerError) -> LedgerError {
        if let LedgerError::OutOfRange { position, len } = &err {
            tracing::error!(position, len, "stale ledger position; re-render before retrying");
        }
        err
    }
}
