use std::{cell::RefCell, collections::HashMap, io};

use crate::errors::{LedgerError, Result};

use super::StorageBackend;

/// Volatile slot store, mainly for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RefCell<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates `slot` with a raw blob.
    pub fn with_slot(self, slot: &str, data: impl Into<String>) -> Self {
        self.slots.borrow_mut().insert(slot.to_string(), data.into());
        self
    }

    /// Makes every write fail, simulating a full or locked store.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn slot(&self, slot: &str) -> Option<String> {
        self.slots.borrow().get(slot).cloned()
    }
}

impl StorageBackend for MemoryStorage {
    fn read_slot(&self, slot: &str) -> Result<Option<String>> {
        Ok(self.slot(slot))
    }

    fn write_slot(&self, slot: &str, data: &str) -> Result<()> {
        if self.read_only {
            return Err(LedgerError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("storage slot `{slot}` is read-only"),
            )));
        }
        self.slots
            .borrow_mut()
            .insert(slot.to_string(), data.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ledger::{Transaction, TransactionKind},
        presentation::DisplayMode,
        storage::{DISPLAY_MODE_SLOT, TRANSACTIONS_SLOT},
    };
    use chrono::NaiveDate;

    #[test]
    fn empty_store_loads_defaults() {
        let storage = MemoryStorage::new();
        assert!(storage.load_transactions().is_empty());
        assert_eq!(storage.load_display_mode(), DisplayMode::Light);
    }

    #[test]
    fn corrupt_blob_degrades_to_empty_ledger() {
        let storage = MemoryStorage::new()
            .with_slot(TRANSACTIONS_SLOT, "[{\"text\": ")
            .with_slot(DISPLAY_MODE_SLOT, "\"sepia\"");
        assert!(storage.load_transactions().is_empty());
        assert_eq!(storage.load_display_mode(), DisplayMode::Light);
    }

    #[test]
    fn saved_transactions_load_back() {
        let storage = MemoryStorage::new();
        let date = NaiveDate::from_ymd_opt(2025, 2, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let txn = Transaction::new("Pay", 900.0, TransactionKind::Income, None, date);
        storage.save_transactions(std::slice::from_ref(&txn)).unwrap();
        assert_eq!(storage.load_transactions(), vec![txn]);

        storage.save_display_mode(DisplayMode::Dark).unwrap();
        assert_eq!(storage.slot(DISPLAY_MODE_SLOT).as_deref(), Some("enabled"));
        assert_eq!(storage.load_display_mode(), DisplayMode::Dark);
    }

    #[test]
    fn display_flag_loads_bare_or_quoted() {
        let bare = MemoryStorage::new().with_slot(DISPLAY_MODE_SLOT, "enabled");
        assert_eq!(bare.load_display_mode(), DisplayMode::Dark);
        let quoted = MemoryStorage::new().with_slot(DISPLAY_MODE_SLOT, "\"enabled\"");
        assert_eq!(quoted.load_display_mode(), DisplayMode::Dark);
    }

    #[test]
    fn read_only_store_rejects_writes() {
        let storage = MemoryStorage::new().read_only();
        assert!(storage.save_transactions(&[]).is_err());
        assert!(storage.slot(TRANSACTIONS_SLOT).is_none());
    }
}
