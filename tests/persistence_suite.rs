mod common;

use std::fs;

use common::{at, expense, income, json_manager, reference_now};
use pocket_ledger::{
    presentation::DisplayMode,
    storage::{JsonStorage, StorageBackend, DISPLAY_MODE_SLOT, TRANSACTIONS_SLOT},
};
use tempfile::tempdir;

#[test]
fn ledger_survives_restart() {
    let temp = tempdir().unwrap();
    {
        let mut manager = json_manager(temp.path(), reference_now());
        manager.add_transaction(income("Salary", 500.0, "Work")).unwrap();
        manager.add_transaction(expense("Lunch", 12.5, "Food")).unwrap();
        manager.toggle_display_mode();
    }

    let reopened = json_manager(temp.path(), reference_now());
    let texts: Vec<_> = reopened.transactions().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, ["Salary", "Lunch"]);
    assert_eq!(reopened.display_mode(), DisplayMode::Dark);
    assert_eq!(reopened.snapshot().totals.balance, 487.5);
}

#[test]
fn corrupt_blob_loads_as_empty_ledger() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(temp.path().to_path_buf()).unwrap();
    fs::write(storage.slot_path(TRANSACTIONS_SLOT), "{not json").unwrap();
    fs::write(storage.slot_path(DISPLAY_MODE_SLOT), "\"sometimes\"").unwrap();

    let manager = json_manager(temp.path(), reference_now());
    assert!(manager.transactions().is_empty());
    assert_eq!(manager.display_mode(), DisplayMode::Light);
}

#[test]
fn missing_slots_load_defaults() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(temp.path().join("nested").join("data")).unwrap();
    assert!(storage.root().is_dir());
    assert!(storage.load_transactions().is_empty());
    assert_eq!(storage.load_display_mode(), DisplayMode::Light);
}

#[test]
fn browser_written_blob_is_accepted() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(temp.path().to_path_buf()).unwrap();
    let blob = r#"[
        {"text":"Salary","amount":500,"type":"income","category":"Salary",
         "date":"2025-03-10T09:00:00"},
        {"text":"Chai","amount":20,"type":"expense","category":"","date":"2025-03-11"},
        {"text":"Taxi","amount":150,"type":"expense","date":"2025-03-11T14:30:00.000Z"}
    ]"#;
    fs::write(storage.slot_path(TRANSACTIONS_SLOT), blob).unwrap();
    fs::write(storage.slot_path(DISPLAY_MODE_SLOT), "enabled").unwrap();

    let loaded = storage.load_transactions();
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded[0].date, at(2025, 3, 10, 9));
    assert_eq!(loaded[1].date, at(2025, 3, 11, 0));
    assert_eq!(loaded[2].category, "Others");
    assert_ne!(loaded[0].id, loaded[1].id);
    assert_eq!(storage.load_display_mode(), DisplayMode::Dark);
}

#[test]
fn saved_blob_uses_portable_field_names() {
    let temp = tempdir().unwrap();
    let mut manager = json_manager(temp.path(), at(2025, 3, 12, 18));
    manager.add_transaction(expense("Lunch", 12.5, "Food")).unwrap();

    let raw = fs::read_to_string(temp.path().join("transactions.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = &value[0];
    assert_eq!(entry["type"], "expense");
    assert_eq!(entry["text"], "Lunch");
    assert_eq!(entry["category"], "Food");
    assert_eq!(entry["amount"], 12.5);
    assert_eq!(entry["date"], "2025-03-12T18:00:00");
    assert!(!temp.path().join("transactions.json.tmp").exists());

    manager.toggle_display_mode();
    let flag = fs::read_to_string(temp.path().join("dark_mode.json")).unwrap();
    assert_eq!(flag, "enabled");
}
