//! Checklist item domain model.
//!
//! # Responsibility
//! - Define the persisted record for one list entry.
//! - Normalize identifiers that older payloads stored as JSON numbers.
//! - Issue creation-time identifiers from the wall clock.
//!
//! # Invariants
//! - `ItemId` is always compared in its string form.
//! - Ids issued by one process are strictly increasing.
//! - `Item::text` is trimmed and non-empty when created through
//!   [`normalize_text`].
//! - A stored entry is kept whenever it has a string `text` and a usable `id`.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static LAST_ISSUED_MS: AtomicU64 = AtomicU64::new(0);

/// String-normalized item identifier.
///
/// Serialized as a JSON string. Deserialization also accepts JSON numbers,
/// which are converted to their decimal string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Issues a fresh id from the current epoch milliseconds.
    ///
    /// Calls landing in the same millisecond are bumped past the last issued
    /// value, so ids from one process never collide.
    pub fn generate() -> Self {
        let now = epoch_millis();
        let issued = LAST_ISSUED_MS
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
                Some(now.max(last + 1))
            })
            .map_or(now, |last| now.max(last + 1));
        Self(issued.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawItemId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = match RawItemId::deserialize(deserializer)? {
            RawItemId::Text(value) => value,
            RawItemId::Signed(value) => value.to_string(),
            RawItemId::Unsigned(value) => value.to_string(),
            // f64 Display prints `3.0` as `3`.
            RawItemId::Float(value) => value.to_string(),
        };
        Ok(Self(id))
    }
}

/// One list entry as persisted in the item slot.
///
/// Field order mirrors the stored JSON object shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub text: String,
    /// Missing in some stored payloads; treated as not done.
    #[serde(default)]
    pub done: bool,
    pub id: ItemId,
}

impl Item {
    /// Creates a not-done item with a freshly issued id.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(ItemId::generate(), text, false)
    }

    /// Creates an item with a caller-provided id.
    ///
    /// Used by load paths where identity already exists in storage.
    pub fn with_id(id: ItemId, text: impl Into<String>, done: bool) -> Self {
        Self {
            text: text.into(),
            done,
            id,
        }
    }

    /// Decodes one entry of a stored list, tolerating loose field types.
    ///
    /// `done` reads as `true` only when it is the JSON boolean `true`.
    /// Returns `None` when `text` is not a string or `id` is neither a
    /// string nor a number.
    pub fn from_stored(entry: &Value) -> Option<Self> {
        let text = entry.get("text")?.as_str()?;
        let id = ItemId::deserialize(entry.get("id")?).ok()?;
        let done = entry.get("done").and_then(Value::as_bool).unwrap_or(false);
        Some(Self::with_id(id, text, done))
    }
}

/// Trims user input and rejects blank values.
///
/// Returns `None` for empty or whitespace-only input.
pub fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as u64)
}
