//! Edit session state machine.
//!
//! # Responsibility
//! - Track whether the widget shows the list or the edit form.
//! - Hold the pending edit target and the edit field text.
//!
//! # Invariants
//! - `pending` is `Some` iff the mode is `Editing`.
//! - Leaving `Editing` always clears the pending target and the edit field.

use crate::model::item::ItemId;

/// Which form set is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Create form and list visible, edit form hidden.
    #[default]
    Browsing,
    /// Edit form visible, create form and list hidden.
    Editing,
}

/// Pending edit of one item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    pending: Option<ItemId>,
    edit_field: String,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        if self.pending.is_some() {
            ViewMode::Editing
        } else {
            ViewMode::Browsing
        }
    }

    pub fn is_editing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&ItemId> {
        self.pending.as_ref()
    }

    pub fn edit_field(&self) -> &str {
        &self.edit_field
    }

    /// Enters `Editing` for `id` with the edit field pre-filled.
    ///
    /// Re-entering while already editing retargets the session.
    pub fn begin(&mut self, id: ItemId, current_text: &str) {
        self.pending = Some(id);
        self.edit_field = current_text.to_string();
    }

    /// Replaces the edit field text while editing. Ignored while browsing.
    pub fn set_edit_field(&mut self, text: &str) {
        if self.is_editing() {
            self.edit_field = text.to_string();
        }
    }

    /// Leaves `Editing` without applying anything.
    ///
    /// Returns `false` when the session was not editing.
    pub fn cancel(&mut self) -> bool {
        self.finish().is_some()
    }

    /// Leaves `Editing` and hands back the target with the submitted text.
    ///
    /// Returns `None` when the session was not editing.
    pub fn submit(&mut self, text: &str) -> Option<(ItemId, String)> {
        self.finish().map(|id| (id, text.to_string()))
    }

    fn finish(&mut self) -> Option<ItemId> {
        self.edit_field.clear();
        self.pending.take()
    }

    pub fn create_form_visible(&self) -> bool {
        self.mode() == ViewMode::Browsing
    }

    pub fn list_visible(&self) -> bool {
        self.mode() == ViewMode::Browsing
    }

    pub fn edit_form_visible(&self) -> bool {
        self.mode() == ViewMode::Editing
    }
}
