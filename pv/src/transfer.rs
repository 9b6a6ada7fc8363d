//! Export and import of the collection as JSON
//!
//! The export document is a pretty-printed JSON array of records. Import
//! appends every element of such an array to the collection, without
//! merging and without checking ids.
//!
//! Import does not validate record shape. Any parseable array is accepted
//! and every element is appended as-is: fields that do not fit a
//! [`TemplateRecord`] are carried along raw (see its docs) and exported
//! again unchanged. Such records may have empty ids or titles and still
//! show up in listings. Only unparseable text and non-array payloads are
//! rejected.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use eyre::{Context, Result};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{VaultError, VaultResult};
use crate::record::TemplateRecord;
use crate::store::CollectionStore;

/// Export file name for a given date: `prompts_<YYYY-MM-DD>.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("prompts_{}.json", date.format("%Y-%m-%d"))
}

/// Serialize every record as a pretty-printed JSON array
pub fn export(store: &CollectionStore) -> VaultResult<String> {
    let json = serde_json::to_string_pretty(store.records()).map_err(|e| VaultError::Format(e.to_string()))?;
    debug!(count = store.len(), bytes = json.len(), "export: done");
    Ok(json)
}

/// Parse an export document and append every element
///
/// Returns the number of records appended. On error the collection is left
/// unchanged.
pub fn import(store: &mut CollectionStore, json_text: &str) -> VaultResult<usize> {
    let value: Value = serde_json::from_str(json_text).map_err(|e| VaultError::Format(e.to_string()))?;

    let Value::Array(items) = value else {
        return Err(VaultError::Format("expected a JSON array of records".to_string()));
    };

    let records: Vec<TemplateRecord> = items.into_iter().map(TemplateRecord::from_value).collect();

    let count = store.append(records);
    info!(count, "Imported records");
    Ok(count)
}

/// Write the export document into `dir`, named for today's date
pub fn export_to_dir(store: &CollectionStore, dir: &Path) -> Result<PathBuf> {
    let today = chrono::Local::now().date_naive();
    let path = dir.join(export_file_name(today));

    fs::create_dir_all(dir).context(format!("Failed to create export directory: {}", dir.display()))?;
    let json = export(store)?;
    fs::write(&path, json).context(format!("Failed to write export file: {}", path.display()))?;

    info!(path = %path.display(), count = store.len(), "Exported collection");
    Ok(path)
}

/// Read an export file fully, then append its records
pub fn import_from_file(store: &mut CollectionStore, path: &Path) -> Result<usize> {
    let content = fs::read_to_string(path).context(format!("Failed to read import file: {}", path.display()))?;
    let count = import(store, &content)?;
    Ok(count)
}
