//! Core CollectionStore implementation

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{VaultError, VaultResult};
use crate::filter;
use crate::record::{
    KEY_BODY, KEY_DESCRIPTION, KEY_IS_FAVORITE, KEY_LAST_USED_AT, KEY_TITLE, KEY_USAGE_COUNT, RecordId,
    TemplateRecord, describe, now_ms,
};

/// Category assigned to records authored from free text
pub const CUSTOM_CATEGORY: &str = "custom";

/// Title assigned to records authored from free text
pub const CUSTOM_TITLE: &str = "Custom prompt";

/// Result of saving a record into the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A copy was inserted
    Saved,
    /// A record with the same id was already present; nothing changed
    AlreadyPresent,
}

/// Usage and size totals for a collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionStats {
    /// Number of records
    pub record_count: usize,
    /// Number of favorite records
    pub favorite_count: usize,
    /// Sum of usage counts
    pub total_usage: u64,
}

/// The user's personal, session-local collection
///
/// Records keep insertion order. Every operation either applies fully or
/// leaves the collection untouched. Operations addressing an id that is
/// not present are silent no-ops and return `false`.
#[derive(Debug, Clone, Default)]
pub struct CollectionStore {
    records: Vec<TemplateRecord>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save a copy of `record` with its usage count reset to zero
    pub fn save(&mut self, record: &TemplateRecord) -> SaveOutcome {
        if self.contains(&record.id) {
            debug!(id = %record.id, "CollectionStore::save: already present");
            return SaveOutcome::AlreadyPresent;
        }

        let mut copy = record.clone();
        copy.usage_count = Some(0);
        copy.touch(&[KEY_USAGE_COUNT]);
        self.records.push(copy);
        info!(id = %record.id, "Saved record");
        SaveOutcome::Saved
    }

    /// Author a new record from free text
    pub fn create_from_text(&mut self, text: &str) -> VaultResult<&TemplateRecord> {
        if text.trim().is_empty() {
            return Err(VaultError::EmptyInput { field: "text" });
        }

        let id = self.fresh_id();
        let record = TemplateRecord {
            usage_count: Some(0),
            ..TemplateRecord::new(id, CUSTOM_TITLE, CUSTOM_CATEGORY, describe(text), text)
        };
        info!(id = %record.id, "Created record from text");
        self.records.push(record);

        let index = self.records.len() - 1;
        Ok(&self.records[index])
    }

    /// Flip the favorite flag
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        match self.get_mut(id) {
            Some(record) => {
                record.is_favorite = Some(!record.is_favorite());
                record.touch(&[KEY_IS_FAVORITE]);
                debug!(%id, favorite = record.is_favorite(), "CollectionStore::toggle_favorite");
                true
            }
            None => false,
        }
    }

    /// Count one usage and stamp the time
    pub fn record_usage(&mut self, id: &str) -> bool {
        match self.get_mut(id) {
            Some(record) => {
                record.usage_count = Some(record.usage_count().saturating_add(1));
                record.last_used_at = Some(now_ms());
                record.touch(&[KEY_USAGE_COUNT, KEY_LAST_USED_AT]);
                debug!(%id, usage_count = record.usage_count(), "CollectionStore::record_usage");
                true
            }
            None => false,
        }
    }

    /// Replace title and body, and recompute the description from the body
    ///
    /// Both values are checked before anything changes.
    pub fn edit(&mut self, id: &str, title: &str, body: &str) -> VaultResult<bool> {
        if title.trim().is_empty() {
            return Err(VaultError::EmptyInput { field: "title" });
        }
        if body.trim().is_empty() {
            return Err(VaultError::EmptyInput { field: "body" });
        }

        match self.get_mut(id) {
            Some(record) => {
                record.title = title.to_string();
                record.body = body.to_string();
                record.description = describe(body);
                record.touch(&[KEY_TITLE, KEY_BODY, KEY_DESCRIPTION]);
                info!(%id, "Edited record");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a record
    pub fn delete(&mut self, id: &str) -> bool {
        match self.records.iter().position(|r| r.id == id) {
            Some(index) => {
                self.records.remove(index);
                info!(%id, "Deleted record");
                true
            }
            None => false,
        }
    }

    /// Append records verbatim, with no id check
    pub(crate) fn append(&mut self, records: Vec<TemplateRecord>) -> usize {
        let count = records.len();
        self.records.extend(records);
        count
    }

    /// Records matching a search query and category selection
    pub fn filter(&self, query: &str, category: &str) -> Vec<&TemplateRecord> {
        filter::filter(&self.records, query, category)
    }

    /// Favorite records in collection order
    pub fn favorites(&self) -> Vec<&TemplateRecord> {
        self.records.iter().filter(|r| r.is_favorite()).collect()
    }

    /// Sum of usage counts across all records, capped at `u64::MAX`
    pub fn total_usage(&self) -> u64 {
        self.records
            .iter()
            .map(TemplateRecord::usage_count)
            .fold(0, u64::saturating_add)
    }

    pub fn stats(&self) -> CollectionStats {
        CollectionStats {
            record_count: self.records.len(),
            favorite_count: self.records.iter().filter(|r| r.is_favorite()).count(),
            total_usage: self.total_usage(),
        }
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<String> {
        filter::categories(&self.records)
    }

    pub fn get(&self, id: &str) -> Option<&TemplateRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn records(&self) -> &[TemplateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut TemplateRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    /// Time-ordered id that is not yet used in this collection
    fn fresh_id(&self) -> RecordId {
        loop {
            let id = Uuid::now_v7().to_string();
            if !self.contains(&id) {
                return id;
            }
        }
    }
}
