//! TemplateRecord domain type
//!
//! One prompt template. The same shape is used for catalog entries, saved
//! collection entries, and the objects in export files.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

/// Unique identifier for a record
pub type RecordId = String;

/// Number of body characters kept in a derived description
pub const DESCRIPTION_LEN: usize = 50;

/// Marker appended to a derived description
pub const ELLIPSIS: &str = "...";

pub const KEY_ID: &str = "id";
pub const KEY_TITLE: &str = "title";
pub const KEY_CATEGORY: &str = "category";
pub const KEY_DESCRIPTION: &str = "description";
pub const KEY_BODY: &str = "body";
pub const KEY_IS_FAVORITE: &str = "isFavorite";
pub const KEY_USAGE_COUNT: &str = "usageCount";
pub const KEY_LAST_USED_AT: &str = "lastUsedAt";

/// A single prompt template
///
/// Field names serialize in camelCase (`isFavorite`, `usageCount`,
/// `lastUsedAt`). Deserialization never fails on a JSON value:
///
/// - missing fields are left empty
/// - a known field holding `null` or the wrong type is left empty, and its
///   raw value is kept in `extra` under the same key
/// - unknown fields are kept in `extra`
/// - a value that is not an object is kept whole in `raw`
///
/// Whatever was kept is written back out unchanged on serialization, so
/// imported data survives an import/export cycle. Once a field is set
/// through [`TemplateRecord::touch`], the typed value replaces the raw one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateRecord {
    /// Unique ID within a collection
    pub id: RecordId,

    /// Short human-readable name
    pub title: String,

    /// Free-form classification label
    pub category: String,

    /// Short summary shown in listings
    pub description: String,

    /// Full template text
    pub body: String,

    /// Favorite flag (absent means false)
    pub is_favorite: Option<bool>,

    /// Number of copy actions recorded against this record
    pub usage_count: Option<u64>,

    /// Time of the last recorded usage (milliseconds since Unix epoch)
    pub last_used_at: Option<i64>,

    /// Unrecognized or mistyped fields carried through verbatim
    pub extra: Map<String, Value>,

    /// Imported value that was not a JSON object
    pub raw: Option<Value>,
}

impl TemplateRecord {
    /// Create a record with no usage metadata
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let id = id.into();
        debug!(%id, "TemplateRecord::new: called");
        Self {
            id,
            title: title.into(),
            category: category.into(),
            description: description.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    /// Build a record from any JSON value, keeping what does not fit
    pub fn from_value(value: Value) -> Self {
        let map = match value {
            Value::Object(map) => map,
            other => {
                debug!("TemplateRecord::from_value: not an object, kept raw");
                return Self {
                    raw: Some(other),
                    ..Default::default()
                };
            }
        };

        let mut record = Self::default();
        for (key, value) in map {
            let leftover = match key.as_str() {
                KEY_ID => take_string(&mut record.id, value),
                KEY_TITLE => take_string(&mut record.title, value),
                KEY_CATEGORY => take_string(&mut record.category, value),
                KEY_DESCRIPTION => take_string(&mut record.description, value),
                KEY_BODY => take_string(&mut record.body, value),
                KEY_IS_FAVORITE => take_typed(&mut record.is_favorite, value, Value::as_bool),
                KEY_USAGE_COUNT => take_typed(&mut record.usage_count, value, Value::as_u64),
                KEY_LAST_USED_AT => take_typed(&mut record.last_used_at, value, Value::as_i64),
                _ => Some(value),
            };
            if let Some(value) = leftover {
                record.extra.insert(key, value);
            }
        }
        record
    }

    /// Mark fields as set by the application
    ///
    /// Drops any raw values kept for `keys`, and turns a raw non-object
    /// record into an ordinary one.
    pub fn touch(&mut self, keys: &[&str]) {
        self.raw = None;
        for key in keys {
            self.extra.remove(*key);
        }
    }

    /// Whether the record is marked as a favorite
    pub fn is_favorite(&self) -> bool {
        self.is_favorite.unwrap_or(false)
    }

    /// Recorded usage count, treating absent as zero
    pub fn usage_count(&self) -> u64 {
        self.usage_count.unwrap_or(0)
    }
}

fn take_string(slot: &mut String, value: Value) -> Option<Value> {
    match value {
        Value::String(s) => {
            *slot = s;
            None
        }
        other => Some(other),
    }
}

fn take_typed<T>(slot: &mut Option<T>, value: Value, read: impl Fn(&Value) -> Option<T>) -> Option<Value> {
    match read(&value) {
        Some(v) => {
            *slot = Some(v);
            None
        }
        None => Some(value),
    }
}

impl<'de> Deserialize<'de> for TemplateRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

impl Serialize for TemplateRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(raw) = &self.raw {
            return raw.serialize(serializer);
        }

        let mut map = serializer.serialize_map(None)?;
        let strings = [
            (KEY_ID, &self.id),
            (KEY_TITLE, &self.title),
            (KEY_CATEGORY, &self.category),
            (KEY_DESCRIPTION, &self.description),
            (KEY_BODY, &self.body),
        ];
        for (key, value) in strings {
            if !self.extra.contains_key(key) {
                map.serialize_entry(key, value)?;
            }
        }
        if let Some(v) = self.is_favorite.filter(|_| !self.extra.contains_key(KEY_IS_FAVORITE)) {
            map.serialize_entry(KEY_IS_FAVORITE, &v)?;
        }
        if let Some(v) = self.usage_count.filter(|_| !self.extra.contains_key(KEY_USAGE_COUNT)) {
            map.serialize_entry(KEY_USAGE_COUNT, &v)?;
        }
        if let Some(v) = self.last_used_at.filter(|_| !self.extra.contains_key(KEY_LAST_USED_AT)) {
            map.serialize_entry(KEY_LAST_USED_AT, &v)?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Derive a listing description from a template body
///
/// Takes the first [`DESCRIPTION_LEN`] characters (not bytes) and always
/// appends [`ELLIPSIS`].
pub fn describe(body: &str) -> String {
    let mut description: String = body.chars().take(DESCRIPTION_LEN).collect();
    description.push_str(ELLIPSIS);
    description
}

/// Current time in milliseconds since Unix epoch
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
