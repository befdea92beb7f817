//! Item list persistence over a single storage slot.
//!
//! # Responsibility
//! - Serialize the full item list into one slot and read it back.
//! - Provide add/remove/update/toggle helpers as read-modify-write cycles.
//!
//! # Invariants
//! - Every helper performs exactly one full read and one full write, even
//!   when no entry matches.
//! - Id matching is string equality on `ItemId`.
//! - `load` never fails: absent, `null` or unparsable payloads read as empty.
//! - Entries are decoded one by one; a single bad entry never discards the
//!   rest of the list.

use crate::config::StoreConfig;
use crate::model::item::{Item, ItemId};
use crate::repo::slot_storage::{SlotStorage, StorageError};
use log::{debug, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Storage(StorageError),
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode item list: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Result of one read-modify-write cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// Collection exactly as written to the slot.
    pub items: Vec<Item>,
    /// Number of persisted entries the helper touched.
    pub matched: usize,
}

/// Full-collection item store bound to one slot.
pub struct ItemStore<S: SlotStorage> {
    storage: S,
    slot_key: String,
}

impl<S: SlotStorage> ItemStore<S> {
    /// Creates a store on the default slot.
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, &StoreConfig::default())
    }

    pub fn with_config(storage: S, config: &StoreConfig) -> Self {
        Self {
            storage,
            slot_key: config.slot_key.clone(),
        }
    }

    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }

    /// Reads the persisted list, degrading every failure to an empty list.
    pub fn load(&self) -> Vec<Item> {
        match self.storage.read_slot(&self.slot_key) {
            Ok(payload) => self.decode(payload.as_deref()),
            Err(err) => {
                warn!(
                    "event=store_load module=store status=error slot={} error={}",
                    self.slot_key, err
                );
                Vec::new()
            }
        }
    }

    /// Overwrites the slot with `items`.
    pub fn save_all(&self, items: &[Item]) -> StoreResult<()> {
        let payload = serde_json::to_string(items).map_err(StoreError::Encode)?;
        self.storage.write_slot(&self.slot_key, &payload)?;
        debug!(
            "event=store_save module=store status=ok slot={} count={}",
            self.slot_key,
            items.len()
        );
        Ok(())
    }

    /// Appends `item` to the persisted list.
    pub fn add(&self, item: Item) -> StoreResult<WriteReport> {
        self.rewrite(|items| {
            items.push(item);
            1
        })
    }

    /// Drops every entry whose id equals `id`.
    pub fn remove(&self, id: &ItemId) -> StoreResult<WriteReport> {
        self.rewrite(|items| {
            let before = items.len();
            items.retain(|item| &item.id != id);
            before - items.len()
        })
    }

    /// Replaces the text of every entry whose id equals `id`.
    ///
    /// `text` is stored as given; callers normalize it first.
    pub fn update(&self, id: &ItemId, text: &str) -> StoreResult<WriteReport> {
        self.rewrite(|items| {
            items
                .iter_mut()
                .filter(|item| &item.id == id)
                .map(|item| item.text = text.to_string())
                .count()
        })
    }

    /// Flips `done` on every entry whose id equals `id`.
    pub fn toggle_done(&self, id: &ItemId) -> StoreResult<WriteReport> {
        self.rewrite(|items| {
            items
                .iter_mut()
                .filter(|item| &item.id == id)
                .map(|item| item.done = !item.done)
                .count()
        })
    }

    fn rewrite(&self, transform: impl FnOnce(&mut Vec<Item>) -> usize) -> StoreResult<WriteReport> {
        // Read failures abort the cycle so a transient error cannot wipe the slot.
        let payload = self.storage.read_slot(&self.slot_key)?;
        let mut items = self.decode(payload.as_deref());
        let matched = transform(&mut items);
        self.save_all(&items)?;
        Ok(WriteReport { items, matched })
    }

    fn decode(&self, payload: Option<&str>) -> Vec<Item> {
        let Some(payload) = payload else {
            return Vec::new();
        };
        let entries = match serde_json::from_str::<Option<Vec<Value>>>(payload) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(err) => {
                warn!(
                    "event=store_decode module=store status=error slot={} error={}",
                    self.slot_key, err
                );
                return Vec::new();
            }
        };

        let total = entries.len();
        let items: Vec<Item> = entries.iter().filter_map(Item::from_stored).collect();
        if items.len() < total {
            warn!(
                "event=store_decode module=store status=partial slot={} kept={} dropped={}",
                self.slot_key,
                items.len(),
                total - items.len()
            );
        }
        items
    }
}
