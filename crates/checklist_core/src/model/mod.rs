//! Domain model for checklist items.
//!
//! # Responsibility
//! - Define the canonical item record shared by storage and rendering.
//!
//! # Invariants
//! - Every item is identified by a string-normalized `ItemId`.
//! - Deletion is a hard removal from the persisted collection.

pub mod item;
