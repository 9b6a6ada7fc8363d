//! Record filtering
//!
//! The same predicate backs the catalog view and the personal collection.

use tracing::debug;

use crate::record::TemplateRecord;

/// Category sentinel that matches every record
pub const ALL_CATEGORIES: &str = "all";

/// Check whether a record passes a search query and category selection
///
/// The query matches when it is a case-insensitive substring of the title,
/// category, or description; an empty query matches everything. The
/// category must equal `category` exactly unless it is [`ALL_CATEGORIES`].
pub fn matches(record: &TemplateRecord, query: &str, category: &str) -> bool {
    if category != ALL_CATEGORIES && record.category != category {
        return false;
    }
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    [&record.title, &record.category, &record.description]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Filter records in order, returning references into the input
pub fn filter<'a>(
    records: impl IntoIterator<Item = &'a TemplateRecord>,
    query: &str,
    category: &str,
) -> Vec<&'a TemplateRecord> {
    let result: Vec<&TemplateRecord> = records
        .into_iter()
        .filter(|record| matches(record, query, category))
        .collect();
    debug!(%query, %category, count = result.len(), "filter: done");
    result
}

/// Distinct categories in first-seen order
pub fn categories<'a>(records: impl IntoIterator<Item = &'a TemplateRecord>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for record in records {
        if !seen.iter().any(|c| c == &record.category) {
            seen.push(record.category.clone());
        }
    }
    seen
}
