//! PromptVault - prompt template catalog with a personal collection
//!
//! A fixed catalog of reusable prompt templates, plus a session-local
//! collection the user saves templates into, authors new prompts in,
//! favorites, edits, and exports to or imports from JSON files.
//!
//! # Architecture
//!
//! ```text
//! Catalog (read-only) --save--> CollectionStore --export--> prompts_<date>.json
//!                                      ^                          |
//!                                      +--------- import ---------+
//! ```
//!
//! The catalog never changes. Favorites and usage counts exist only on
//! collection records, so a template has to be saved before it can be
//! favorited. Nothing is persisted between runs except explicit exports.
//!
//! # Example
//!
//! ```
//! use promptvault::{Catalog, CollectionStore, SaveOutcome, transfer};
//!
//! let catalog = Catalog::builtin();
//! let mut store = CollectionStore::new();
//! let template = catalog.get("1").unwrap();
//!
//! assert_eq!(store.save(template), SaveOutcome::Saved);
//! store.toggle_favorite("1");
//! store.record_usage("1");
//!
//! let json = transfer::export(&store).unwrap();
//! transfer::import(&mut store, &json).unwrap();
//! assert_eq!(store.len(), 2);
//! ```

pub mod catalog;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod filter;
pub mod record;
pub mod repl;
pub mod session;
mod store;
pub mod tips;
pub mod transfer;

pub use catalog::Catalog;
pub use clipboard::{Clipboard, MemoryClipboard, StdoutClipboard};
pub use error::{VaultError, VaultResult};
pub use filter::ALL_CATEGORIES;
pub use record::{RecordId, TemplateRecord};
pub use repl::{Repl, ReplAction};
pub use session::{EditDraft, Notice, NoticeLevel, Session, Tab, ViewState};
pub use store::{CUSTOM_CATEGORY, CUSTOM_TITLE, CollectionStats, CollectionStore, SaveOutcome};
