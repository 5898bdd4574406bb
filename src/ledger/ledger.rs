use uuid::Uuid;

use crate::errors::{LedgerError, Result};

use super::transaction::Transaction;

/// Ordered collection of transactions addressed by position.
///
/// Positions are only meaningful against the snapshot they were read from:
/// removing an entry shifts every later entry down by one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn append(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn remove_at(&mut self, position: usize) -> Result<Transaction> {
        self.check_position(position)?;
        Ok(self.transactions.remove(position))
    }

    pub fn replace_at(&mut self, position: usize, transaction: Transaction) -> Result<Transaction> {
        self.check_position(position)?;
        Ok(std::mem::replace(&mut self.transactions[position], transaction))
    }

    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, position: usize) -> Option<&Transaction> {
        self.transactions.get(position)
    }

    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.transactions.iter().position(|txn| txn.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    fn check_position(&self, position: usize) -> Result<()> {
        if position >= self.transactions.len() {
            return Err(LedgerError::OutOfRange {
                position,
                len: self.transactions.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionKind;
    use chrono::NaiveDate;

    fn txn(text: &str, amount: f64) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Transaction::new(text, amount, TransactionKind::Expense, None, date)
    }

    fn sample() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.append(txn("a", 1.0));
        ledger.append(txn("b", 2.0));
        ledger.append(txn("c", 3.0));
        ledger
    }

    #[test]
    fn append_keeps_insertion_order() {
        let ledger = sample();
        let texts: Vec<_> = ledger.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["a", "b", "c"]);
    }

    #[test]
    fn remove_at_shifts_later_entries_down() {
        let mut ledger = sample();
        let original = ledger.all().to_vec();

        let removed = ledger.remove_at(1).expect("valid position");
        assert_eq!(removed.text, "b");
        assert_eq!(ledger.len(), original.len() - 1);
        assert_eq!(ledger.all()[0], original[0]);
        assert_eq!(ledger.all()[1], original[2]);
    }

    #[test]
    fn remove_at_rejects_stale_positions() {
        let mut ledger = sample();
        let err = ledger.remove_at(3).expect_err("index past the end");
        assert!(
            matches!(err, LedgerError::OutOfRange { position: 3, len: 3 }),
            "unexpected error: {err:?}"
        );
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn replace_at_swaps_in_place() {
        let mut ledger = sample();
        let previous = ledger.replace_at(2, txn("z", 9.0)).unwrap();
        assert_eq!(previous.text, "c");
        assert_eq!(ledger.get(2).map(|t| t.text.as_str()), Some("z"));
        assert!(ledger.replace_at(7, txn("x", 1.0)).is_err());
    }

    #[test]
    fn position_of_tracks_identifier_after_removal() {
        let mut ledger = sample();
        let id = ledger.all()[2].id;
        ledger.remove_at(0).unwrap();
        assert_eq!(ledger.position_of(id), Some(1));
    }
}
