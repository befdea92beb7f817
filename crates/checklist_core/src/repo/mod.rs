//! Persistence layer for the item list.
//!
//! # Responsibility
//! - Define the local slot storage contract and its backends.
//! - Keep serialization of the item list inside one store type.
//!
//! # Invariants
//! - The item list is always written as a whole; there are no per-item rows.
//! - Store reads degrade to an empty list instead of surfacing decode errors.

pub mod item_store;
pub mod slot_storage;
