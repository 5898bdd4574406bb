//! Persistence contract: named slots holding serialized blobs.

pub mod json_backend;
pub mod memory;

use crate::{errors::Result, ledger::Transaction, presentation::DisplayMode};

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;

/// Slot holding the serialized transaction list.
pub const TRANSACTIONS_SLOT: &str = "transactions";
/// Slot holding the display-mode flag.
pub const DISPLAY_MODE_SLOT: &str = "dark_mode";

/// Abstraction over key-value persistence backends.
///
/// Loading never fails the caller: a missing or undecodable slot yields the empty
/// default so a corrupt store cannot block startup.
pub trait StorageBackend {
    fn read_slot(&self, slot: &str) -> Result<Option<String>>;
    fn write_slot(&self, slot: &str, data: &str) -> Result<()>;

    fn load_transactions(&self) -> Vec<Transaction> {
        load_or_default(self, TRANSACTIONS_SLOT)
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        let json = serde_json::to_string(transactions)?;
        self.write_slot(TRANSACTIONS_SLOT, &json)
    }

    /// The flag is stored bare (`enabled`), as browsers keep it; a JSON-quoted
    /// value is accepted too.
    fn load_display_mode(&self) -> DisplayMode {
        let Some(raw) = read_fail_open(self, DISPLAY_MODE_SLOT) else {
            return DisplayMode::default();
        };
        raw.parse().unwrap_or_else(|err: String| {
            tracing::warn!(
                slot = DISPLAY_MODE_SLOT,
                error = %err,
                "discarding undecodable storage slot"
            );
            DisplayMode::default()
        })
    }

    fn save_display_mode(&self, mode: DisplayMode) -> Result<()> {
        self.write_slot(DISPLAY_MODE_SLOT, mode.flag())
    }
}

fn load_or_default<S, T>(storage: &S, slot: &str) -> T
where
    S: StorageBackend + ?Sized,
    T: serde::de::DeserializeOwned + Default,
{
    let Some(raw) = read_fail_open(storage, slot) else {
        return T::default();
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(slot, error = %err, "discarding undecodable storage slot");
            T::default()
        }
    }
}

fn read_fail_open<S>(storage: &S, slot: &str) -> Option<String>
where
    S: StorageBackend + ?Sized,
{
    match storage.read_slot(slot) {
        Ok(Some(raw)) => Some(raw),
        Ok(None) => {
            tracing::debug!(slot, "storage slot is empty");
            None
        }
        Err(err) => {
            tracing::warn!(slot, error = %err, "unable to read storage slot");
            None
        }
    }
}
