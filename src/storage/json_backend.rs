use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, write_atomic},
    errors::Result,
};

use super::StorageBackend;

const SLOT_EXTENSION: &str = "json";

/// Filesystem-backed store keeping one JSON file per slot.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: PathBuf) -> Result<Self> {
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_name(slot), SLOT_EXTENSION))
    }
}

impl StorageBackend for JsonStorage {
    fn read_slot(&self, slot: &str) -> Result<Option<String>> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write_slot(&self, slot: &str, data: &str) -> Result<()> {
        let path = self.slot_path(slot);
        write_atomic(&path, data)?;
        tracing::debug!(slot, path = %path.display(), bytes = data.len(), "storage slot written");
        Ok(())
    }
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "slot".into()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn slot_names_are_sanitized() {
        let dir = tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().to_path_buf()).unwrap();
        let path = storage.slot_path("Dark Mode!");
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some("dark_mode_.json")
        );
        assert_eq!(
            storage.slot_path("///").file_name().and_then(|n| n.to_str()),
            Some("slot.json")
        );
    }

    #[test]
    fn write_then_read_slot() {
        let dir = tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().join("nested")).unwrap();
        assert!(storage.read_slot("transactions").unwrap().is_none());

        storage.write_slot("transactions", "[]").unwrap();
        assert_eq!(storage.read_slot("transactions").unwrap().as_deref(), Some("[]"));
        assert!(!crate::core::utils::tmp_path(&storage.slot_path("transactions")).exists());
    }
}
