//! Store configuration.
//!
//! # Invariants
//! - The default slot key matches the layout written by earlier releases.

/// Slot that holds the serialized item list unless configured otherwise.
pub const DEFAULT_SLOT_KEY: &str = "todos";

/// Settings for [`crate::ItemStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Name of the local storage slot holding the item list.
    pub slot_key: String,
}

impl StoreConfig {
    pub fn with_slot_key(slot_key: impl Into<String>) -> Self {
        Self {
            slot_key: slot_key.into(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::with_slot_key(DEFAULT_SLOT_KEY)
    }
}
