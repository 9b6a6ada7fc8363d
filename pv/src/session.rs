//! Application session
//!
//! Owns the catalog, the personal collection, the clipboard, and the
//! presentation state the front end needs between events: active tab,
//! search text, selected category, and the record currently being edited.
//! Each public method handles one user action and returns the notice to
//! show, if any.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::clipboard::Clipboard;
use crate::error::VaultError;
use crate::filter::ALL_CATEGORIES;
use crate::record::TemplateRecord;
use crate::store::{CollectionStore, SaveOutcome};
use crate::transfer;

/// Top-level views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Generator,
    Library,
    Favorites,
    Help,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Generator, Tab::Library, Tab::Favorites, Tab::Help];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Generator => "generator",
            Tab::Library => "library",
            Tab::Favorites => "favorites",
            Tab::Help => "help",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown tab: {}", s))
    }
}

/// Search and navigation state, passed into queries as plain values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub tab: Tab,
    pub search: String,
    pub category: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            tab: Tab::default(),
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// Short message shown to the user after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Pending edit of one collection record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: String,
    pub title: String,
    pub body: String,
}

/// One user's working session
pub struct Session<C: Clipboard> {
    catalog: Catalog,
    store: CollectionStore,
    clipboard: C,
    view: ViewState,
    editing: Option<EditDraft>,
}

impl<C: Clipboard> Session<C> {
    /// Start a session with an empty collection
    pub fn new(catalog: Catalog, clipboard: C) -> Self {
        Self {
            catalog,
            store: CollectionStore::new(),
            clipboard,
            view: ViewState::default(),
            editing: None,
        }
    }

    /// Builder: set the initial category selection
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.view.category = category.into();
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn editing(&self) -> Option<&EditDraft> {
        self.editing.as_ref()
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.view.tab = tab;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.view.search = search.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.view.category = category.into();
    }

    /// Catalog templates under the current search and category
    pub fn catalog_view(&self) -> Vec<&TemplateRecord> {
        self.catalog.filter(&self.view.search, &self.view.category)
    }

    /// Collection records under the current search and category
    pub fn library_view(&self) -> Vec<&TemplateRecord> {
        self.store.filter(&self.view.search, &self.view.category)
    }

    pub fn favorites_view(&self) -> Vec<&TemplateRecord> {
        self.store.favorites()
    }

    /// Save a catalog template into the collection
    pub fn save_from_catalog(&mut self, id: &str) -> Option<Notice> {
        let Some(record) = self.catalog.get(id) else {
            debug!(%id, "save_from_catalog: no such template");
            return None;
        };

        Some(match self.store.save(record) {
            SaveOutcome::Saved => Notice::success("Prompt saved to library"),
            SaveOutcome::AlreadyPresent => Notice::info("Prompt is already in the library"),
        })
    }

    /// Author a new collection record from free text
    pub fn create_from_text(&mut self, text: &str) -> Notice {
        match self.store.create_from_text(text) {
            Ok(record) => Notice::success(format!("Prompt created and saved ({})", record.id)),
            Err(e) => Notice::error(e.to_string()),
        }
    }

    /// Copy a template's body to the clipboard
    ///
    /// Collection records take precedence over catalog templates with the
    /// same id. Only collection records count the usage.
    pub fn copy_record(&mut self, id: &str) -> Option<Notice> {
        let body = match self.store.get(id) {
            Some(record) => {
                let body = record.body.clone();
                self.store.record_usage(id);
                body
            }
            None => self.catalog.get(id)?.body.clone(),
        };

        self.write_clipboard(&body);
        Some(Notice::success("Prompt copied to clipboard"))
    }

    /// Copy unsaved free text to the clipboard
    pub fn copy_text(&mut self, text: &str) -> Notice {
        if text.trim().is_empty() {
            return Notice::error(VaultError::EmptyInput { field: "text" }.to_string());
        }
        self.write_clipboard(text);
        Notice::success("Prompt copied to clipboard")
    }

    pub fn toggle_favorite(&mut self, id: &str) -> Option<Notice> {
        self.store
            .toggle_favorite(id)
            .then(|| Notice::success("Favorites updated"))
    }

    /// Open the edit dialog for a collection record
    pub fn begin_edit(&mut self, id: &str) -> bool {
        let Some(record) = self.store.get(id) else {
            return false;
        };
        self.editing = Some(EditDraft {
            id: record.id.clone(),
            title: record.title.clone(),
            body: record.body.clone(),
        });
        debug!(%id, "begin_edit: dialog open");
        true
    }

    pub fn set_draft_title(&mut self, title: impl Into<String>) -> bool {
        match self.editing.as_mut() {
            Some(draft) => {
                draft.title = title.into();
                true
            }
            None => false,
        }
    }

    pub fn set_draft_body(&mut self, body: impl Into<String>) -> bool {
        match self.editing.as_mut() {
            Some(draft) => {
                draft.body = body.into();
                true
            }
            None => false,
        }
    }

    /// Apply the draft to the collection
    ///
    /// On blank input the dialog stays open with the draft intact.
    pub fn commit_edit(&mut self) -> Option<Notice> {
        let draft = self.editing.as_ref()?;
        match self.store.edit(&draft.id, &draft.title, &draft.body) {
            Ok(_) => {
                self.editing = None;
                Some(Notice::success("Prompt updated"))
            }
            Err(e) => Some(Notice::error(e.to_string())),
        }
    }

    /// Close the edit dialog, discarding the draft
    pub fn cancel_edit(&mut self) -> bool {
        self.editing.take().is_some()
    }

    pub fn delete(&mut self, id: &str) -> Option<Notice> {
        if !self.store.delete(id) {
            return None;
        }
        if self.editing.as_ref().is_some_and(|d| d.id == id) {
            self.editing = None;
        }
        Some(Notice::success("Prompt deleted"))
    }

    /// Write the export file into `dir`
    pub fn export_to(&self, dir: &Path) -> (Notice, Option<PathBuf>) {
        match transfer::export_to_dir(&self.store, dir) {
            Ok(path) => (Notice::success(format!("Exported to {}", path.display())), Some(path)),
            Err(e) => (Notice::error(format!("{:#}", e)), None),
        }
    }

    /// Append the records of an export file
    pub fn import_from(&mut self, path: &Path) -> Notice {
        match transfer::import_from_file(&mut self.store, path) {
            Ok(count) => Notice::success(format!("Imported {} prompts", count)),
            Err(e) => Notice::error(format!("{:#}", e)),
        }
    }

    fn write_clipboard(&mut self, text: &str) {
        if let Err(e) = self.clipboard.write_text(text) {
            warn!(error = %e, "Clipboard write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;

    fn session() -> Session<MemoryClipboard> {
        Session::new(Catalog::builtin(), MemoryClipboard::new())
    }

    #[test]
    fn test_tab_parse() {
        assert_eq!("Library".parse::<Tab>(), Ok(Tab::Library));
        assert!("settings".parse::<Tab>().is_err());
    }

    #[test]
    fn test_save_from_catalog_notices() {
        let mut s = session();
        assert_eq!(s.save_from_catalog("1").unwrap().level, NoticeLevel::Success);
        assert_eq!(s.save_from_catalog("1").unwrap().level, NoticeLevel::Info);
        assert!(s.save_from_catalog("missing").is_none());
        assert_eq!(s.store().len(), 1);
    }

    #[test]
    fn test_catalog_stays_unchanged_by_collection_edits() {
        let mut s = session();
        s.save_from_catalog("2");
        s.toggle_favorite("2");
        s.begin_edit("2");
        s.set_draft_title("Renamed");
        s.commit_edit();

        assert_eq!(s.store().get("2").unwrap().title, "Renamed");
        assert_eq!(s.catalog().get("2").unwrap().title, "Code review");
        assert!(!s.catalog().get("2").unwrap().is_favorite());
    }

    #[test]
    fn test_copy_saved_record_counts_usage() {
        let mut s = session();
        s.save_from_catalog("3");
        s.copy_record("3").unwrap();
        s.copy_record("3").unwrap();

        assert_eq!(s.store().get("3").unwrap().usage_count, Some(2));
        assert_eq!(s.clipboard().contents(), Some(s.catalog().get("3").unwrap().body.as_str()));
    }

    #[test]
    fn test_copy_catalog_record_counts_nothing() {
        let mut s = session();
        assert!(s.copy_record("4").is_some());
        assert_eq!(s.store().total_usage(), 0);
        assert!(s.store().is_empty());
        assert!(s.clipboard().contents().is_some());
        assert!(s.copy_record("nope").is_none());
    }

    #[test]
    fn test_copy_text() {
        let mut s = session();
        assert_eq!(s.copy_text("  ").level, NoticeLevel::Error);
        assert!(s.clipboard().contents().is_none());
        assert_eq!(s.copy_text("draft").level, NoticeLevel::Success);
        assert_eq!(s.clipboard().contents(), Some("draft"));
    }

    #[test]
    fn test_create_from_text_notice() {
        let mut s = session();
        assert_eq!(s.create_from_text("").level, NoticeLevel::Error);
        assert_eq!(s.create_from_text("my prompt").level, NoticeLevel::Success);
        assert_eq!(s.store().len(), 1);
    }

    #[test]
    fn test_edit_dialog_lifecycle() {
        let mut s = session();
        s.save_from_catalog("1");

        assert!(!s.set_draft_title("no dialog"));
        assert!(s.commit_edit().is_none());
        assert!(!s.begin_edit("missing"));
        assert!(s.editing().is_none());

        assert!(s.begin_edit("1"));
        assert!(s.set_draft_body("   "));
        assert_eq!(s.commit_edit().unwrap().level, NoticeLevel::Error);
        assert!(s.editing().is_some());

        assert!(s.set_draft_body("new body"));
        assert_eq!(s.commit_edit().unwrap().level, NoticeLevel::Success);
        assert!(s.editing().is_none());
        assert_eq!(s.store().get("1").unwrap().body, "new body");
    }

    #[test]
    fn test_cancel_edit_discards_draft() {
        let mut s = session();
        s.save_from_catalog("1");
        s.begin_edit("1");
        s.set_draft_title("discarded");
        assert!(s.cancel_edit());
        assert!(!s.cancel_edit());
        assert_eq!(s.store().get("1").unwrap().title, "Social media copywriting");
    }

    #[test]
    fn test_delete_closes_dialog_for_that_record() {
        let mut s = session();
        s.save_from_catalog("1");
        s.begin_edit("1");
        assert!(s.delete("1").is_some());
        assert!(s.editing().is_none());
        assert!(s.delete("1").is_none());
    }

    #[test]
    fn test_views_follow_view_state() {
        let mut s = session().with_category("Marketing");
        assert_eq!(s.catalog_view().len(), 3);

        s.set_search("email");
        assert_eq!(s.catalog_view().len(), 1);

        s.set_category(ALL_CATEGORIES);
        s.set_search("");
        assert_eq!(s.catalog_view().len(), 8);

        s.save_from_catalog("5");
        s.save_from_catalog("6");
        s.toggle_favorite("6");
        assert_eq!(s.library_view().len(), 2);
        assert_eq!(s.favorites_view().len(), 1);
    }
}
