//! Integration tests for PromptVault
//!
//! These tests drive the public API end to end and run the `pv` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use promptvault::transfer;
use promptvault::{
    ALL_CATEGORIES, Catalog, CollectionStore, MemoryClipboard, SaveOutcome, Session, TemplateRecord, VaultError,
};

// =============================================================================
// Collection lifecycle
// =============================================================================

#[test]
fn test_collection_lifecycle() {
    let mut store = CollectionStore::new();
    let record = TemplateRecord::new("1", "A", "X", "", "");

    assert_eq!(store.save(&record), SaveOutcome::Saved);
    assert_eq!(store.len(), 1);

    store.toggle_favorite("1");
    assert_eq!(store.favorites().len(), 1);

    store.record_usage("1");
    store.record_usage("1");
    assert_eq!(store.total_usage(), 2);

    store.delete("1");
    assert_eq!(store.len(), 0);
    assert_eq!(store.favorites().len(), 0);
}

#[test]
fn test_save_every_catalog_template_once() {
    let catalog = Catalog::builtin();
    let mut store = CollectionStore::new();

    for template in catalog.list() {
        assert_eq!(store.save(template), SaveOutcome::Saved);
    }
    for template in catalog.list() {
        assert_eq!(store.save(template), SaveOutcome::AlreadyPresent);
    }

    assert_eq!(store.len(), catalog.len());
    assert_eq!(store.categories(), catalog.categories());
    assert!(store.records().iter().all(|r| r.usage_count == Some(0)));
}

#[test]
fn test_filter_market() {
    let catalog = Catalog::builtin();
    let mut store = CollectionStore::new();
    for template in catalog.list() {
        store.save(template);
    }

    let matched = store.filter("market", ALL_CATEGORIES);
    assert!(!matched.is_empty());
    for record in &matched {
        let haystack = format!("{} {} {}", record.title, record.category, record.description).to_lowercase();
        assert!(haystack.contains("market"));
    }

    let all = store.filter("", ALL_CATEGORIES);
    let ids: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
    let expected: Vec<&str> = catalog.list().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, expected);
}

// =============================================================================
// Export / import
// =============================================================================

#[test]
fn test_export_file_round_trip_appends() {
    let temp = TempDir::new().unwrap();
    let catalog = Catalog::builtin();
    let mut store = CollectionStore::new();
    store.save(catalog.get("1").unwrap());
    store.save(catalog.get("5").unwrap());
    store.toggle_favorite("5");
    store.create_from_text("Summarize [text] in three bullet points").unwrap();

    let path = transfer::export_to_dir(&store, temp.path()).unwrap();
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("prompts_") && name.ends_with(".json"));

    let before = store.records().to_vec();
    let count = transfer::import_from_file(&mut store, &path).unwrap();
    assert_eq!(count, 3);
    assert_eq!(store.len(), 6);
    assert_eq!(&store.records()[3..], &before[..]);
}

#[test]
fn test_import_failures_leave_store_unchanged() {
    let mut store = CollectionStore::new();
    store.save(&TemplateRecord::new("1", "A", "X", "", ""));

    for payload in ["{}", "not json", "\"text\""] {
        assert!(matches!(transfer::import(&mut store, payload), Err(VaultError::Format(_))));
        assert_eq!(store.len(), 1);
    }
}

#[test]
fn test_import_file_with_odd_elements_round_trips() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("odd.json");
    let payload = r#"[{"id":"1","title":null},{"id":"2","lastUsedAt":"2025-01-01T00:00:00.000Z"},{"id":"3","usageCount":-1},"just a string",5]"#;
    std::fs::write(&path, payload).unwrap();

    let mut store = CollectionStore::new();
    assert_eq!(transfer::import_from_file(&mut store, &path).unwrap(), 5);
    assert_eq!(store.len(), 5);
    assert_eq!(store.total_usage(), 0);

    let exported: serde_json::Value = serde_json::from_str(&transfer::export(&store).unwrap()).unwrap();
    let original: serde_json::Value = serde_json::from_str(payload).unwrap();
    for (exported, original) in exported.as_array().unwrap().iter().zip(original.as_array().unwrap()) {
        match original.as_object() {
            Some(fields) => {
                for (key, value) in fields {
                    assert_eq!(&exported[key], value, "field {}", key);
                }
            }
            None => assert_eq!(exported, original),
        }
    }
}

#[test]
fn test_import_missing_file() {
    let temp = TempDir::new().unwrap();
    let mut store = CollectionStore::new();
    assert!(transfer::import_from_file(&mut store, &temp.path().join("missing.json")).is_err());
    assert!(store.is_empty());
}

// =============================================================================
// Session
// =============================================================================

#[test]
fn test_session_copy_tracks_usage_only_for_saved() {
    let mut session = Session::new(Catalog::builtin(), MemoryClipboard::new());

    session.copy_record("2");
    assert_eq!(session.store().total_usage(), 0);

    session.save_from_catalog("2");
    session.copy_record("2");
    session.copy_record("2");
    assert_eq!(session.store().total_usage(), 2);
    assert_eq!(session.clipboard().history().len(), 3);
}

// =============================================================================
// Binary
// =============================================================================

fn pv() -> Command {
    let mut cmd = Command::cargo_bin("pv").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_catalog_query() {
    pv().args(["catalog", "--query", "seo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SEO optimization"))
        .stdout(predicate::str::contains("Code review").not());
}

#[test]
fn test_cli_catalog_category() {
    pv().args(["catalog", "--category", "Creative"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Idea generation"))
        .stdout(predicate::str::contains("Character creation"))
        .stdout(predicate::str::contains("Email campaign").not());
}

#[test]
fn test_cli_categories() {
    pv().arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Marketing"))
        .stdout(predicate::str::contains("Career"));
}

#[test]
fn test_cli_show() {
    pv().args(["show", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skills summary"))
        .stdout(predicate::str::contains("resume"));
}

#[test]
fn test_cli_show_unknown_fails() {
    pv().args(["show", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template not found"));
}

#[test]
fn test_cli_explicit_config() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.yml");
    std::fs::write(&config, "log_level: error\n").unwrap();

    pv().args(["--config", config.to_str().unwrap(), "categories"])
        .assert()
        .success();
}

#[test]
fn test_cli_init_config() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("promptvault").join("config.yml");
    let path = config.to_str().unwrap();

    pv().args(["init-config", path])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote config"));
    let written = std::fs::read_to_string(&config).unwrap();
    assert!(written.contains("default_category: all"));

    pv().args(["init-config", path])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    pv().args(["init-config", path, "--force"]).assert().success();
    pv().args(["--config", path, "categories"]).assert().success();
}
