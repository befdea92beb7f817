//! Core logic for the checklist widget.
//! Owns the persisted item list, its rendered projection and the form state.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;
pub mod view;

pub use config::{StoreConfig, DEFAULT_SLOT_KEY};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{normalize_text, Item, ItemId};
pub use repo::item_store::{ItemStore, StoreError, StoreResult, WriteReport};
pub use repo::slot_storage::{
    MemorySlotStorage, SlotStorage, SqliteSlotStorage, StorageError, StorageResult,
};
pub use service::list_controller::{ListController, NoChange, Outcome, UiEvent};
pub use session::edit_session::{EditSession, ViewMode};
pub use view::render::{render_item, ItemAction, ListView, RenderedNode};
pub use view::visibility::{
    apply_filter, apply_search, FilterMode, TitleMatcher, UnknownFilterMode, VisibilityControls,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
