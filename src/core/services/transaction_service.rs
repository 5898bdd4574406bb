//! Business logic helpers for managing transactions.

use chrono::NaiveDateTime;

use crate::errors::{LedgerError, Result};
use crate::ledger::{Ledger, Transaction, TransactionDraft};

/// Provides validated add/remove helpers for ledger transactions.
pub struct TransactionService;

impl TransactionService {
    /// Turns a draft into a transaction, stamping it with `now` unless the draft
    /// carries its original date.
    pub fn validate(draft: TransactionDraft, now: NaiveDateTime) -> Result<Transaction> {
        let text = draft.text.trim();
        if text.is_empty() {
            return Err(LedgerError::Validation("Please enter a description".into()));
        }
        let amount = match draft.amount {
            Some(value) if value.is_finite() && value > 0.0 => value,
            Some(_) => {
                return Err(LedgerError::Validation(
                    "Amount must be a positive number".into(),
                ))
            }
            None => return Err(LedgerError::Validation("Please enter an amount".into())),
        };
        let mut txn = Transaction::new(
            text,
            amount,
            draft.kind,
            draft.category,
            draft.date.unwrap_or(now),
        );
        if let Some(id) = draft.id {
            txn.id = id;
        }
        Ok(txn)
    }

    /// Validates the draft and appends it. The ledger is untouched on failure.
    pub fn add(
        ledger: &mut Ledger,
        draft: TransactionDraft,
        now: NaiveDateTime,
    ) -> Result<Transaction> {
        let txn = Self::validate(draft, now)?;
        ledger.append(txn.clone());
        Ok(txn)
    }

    /// Removes the entry at `position` and returns its fields for re-entry.
    pub fn take_for_edit(ledger: &mut Ledger, position: usize) -> Result<TransactionDraft> {
        ledger.remove_at(position).map(TransactionDraft::from)
    }

    /// Removes the entry at `position`, returning the removed instance.
    pub fn remove(ledger: &mut Ledger, position: usize) -> Result<Transaction> {
        ledger.remove_at(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{TransactionKind, DEFAULT_CATEGORY};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn draft(text: &str, amount: Option<f64>) -> TransactionDraft {
        TransactionDraft::new(text, amount, TransactionKind::Expense, None)
    }

    #[test]
    fn add_stamps_creation_instant_and_default_category() {
        let mut ledger = Ledger::new();
        let txn = TransactionService::add(&mut ledger, draft("  Bus ticket ", Some(2.5)), now())
            .expect("valid draft");
        assert_eq!(txn.text, "Bus ticket");
        assert_eq!(txn.date, now());
        assert_eq!(txn.category, DEFAULT_CATEGORY);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn rejects_empty_text_and_bad_amounts() {
        let mut ledger = Ledger::new();
        for candidate in [
            draft("", Some(0.0)),
            draft("   ", Some(10.0)),
            draft("Lunch", None),
            draft("Lunch", Some(0.0)),
            draft("Lunch", Some(-4.0)),
            draft("Lunch", Some(f64::NAN)),
            draft("Lunch", Some(f64::INFINITY)),
        ] {
            let err = TransactionService::add(&mut ledger, candidate, now())
                .expect_err("draft must be rejected");
            assert!(matches!(err, LedgerError::Validation(_)), "unexpected error: {err:?}");
        }
        assert!(ledger.is_empty());
    }

    #[test]
    fn edited_draft_keeps_original_date_and_id() {
        let mut ledger = Ledger::new();
        let original =
            TransactionService::add(&mut ledger, draft("Lunch", Some(12.0)), now()).unwrap();

        let mut edit = TransactionService::take_for_edit(&mut ledger, 0).unwrap();
        assert!(ledger.is_empty());
        edit.amount = Some(15.0);

        let later = now() + chrono::Duration::days(3);
        let resubmitted = TransactionService::add(&mut ledger, edit, later).unwrap();
        assert_eq!(resubmitted.date, original.date);
        assert_eq!(resubmitted.id, original.id);
        assert_eq!(resubmitted.amount, 15.0);
    }

    #[test]
    fn remove_reports_out_of_range() {
        let mut ledger = Ledger::new();
        let err = TransactionService::remove(&mut ledger, 0).expect_err("empty ledger");
        assert!(matches!(err, LedgerError::OutOfRange { position: 0, len: 0 }));
    }
}
