//! Presentation state for the item list.
//!
//! # Responsibility
//! - Render items into nodes and keep them addressable by id.
//! - Derive node visibility from search text or filter mode.

pub mod render;
pub mod visibility;
