//! List controller: the single entry point for user events.
//!
//! # Responsibility
//! - Apply create/toggle/update/delete through the item store.
//! - Refresh the rendered list from the collection the store just wrote.
//! - Route per-item control actions and form events through one dispatch.
//!
//! # Invariants
//! - After every completed operation the rendered ids equal the persisted ids.
//! - The rendered list is refreshed only after a successful store write.
//! - Blank text and unknown ids never change store or list.
//! - `handle` never fails; storage failures degrade to no visible change.

use crate::model::item::{normalize_text, Item, ItemId};
use crate::repo::item_store::{ItemStore, StoreResult, WriteReport};
use crate::repo::slot_storage::SlotStorage;
use crate::session::edit_session::EditSession;
use crate::view::render::{ItemAction, ListView, RenderedNode};
use crate::view::visibility::{FilterMode, VisibilityControls};
use log::{debug, error, info};

/// Why an event left store and list untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoChange {
    /// Submitted text was empty after trimming.
    BlankText,
    /// No persisted or rendered item carries the id.
    UnknownItem,
    /// Edit submit/cancel arrived outside an edit session.
    NotEditing,
    /// Filter selector sent a value outside `all|done|todo`.
    UnknownFilter,
    /// The storage backend failed; nothing was refreshed.
    StorageUnavailable,
}

/// Result of handling one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Unchanged(NoChange),
}

/// User input delivered by the form surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Create form submitted with the entry field text.
    SubmitCreate(String),
    /// A control on a rendered item was activated.
    Item(ItemAction, ItemId),
    /// Edit form submitted with the edit field text.
    SubmitEdit(String),
    CancelEdit,
    /// Search field content after a keystroke.
    SearchInput(String),
    ClearSearch,
    /// Raw value of the filter selector.
    FilterSelected(String),
}

/// Keeps the item store, the rendered list and the form state in step.
pub struct ListController<S: SlotStorage> {
    store: ItemStore<S>,
    view: ListView,
    visibility: VisibilityControls,
    session: EditSession,
    entry_field: String,
}

impl<S: SlotStorage> ListController<S> {
    /// Loads every persisted item and renders it without writing back.
    pub fn open(store: ItemStore<S>) -> Self {
        let mut controller = Self {
            store,
            view: ListView::new(),
            visibility: VisibilityControls::default(),
            session: EditSession::new(),
            entry_field: String::new(),
        };
        controller.load_all();
        controller
    }

    /// Re-reads the store and mirrors it into the rendered list.
    ///
    /// Never writes to storage.
    pub fn load_all(&mut self) {
        let items = self.store.load();
        self.view.sync_from(&items);
        info!(
            "event=list_load module=controller status=ok slot={} count={}",
            self.store.slot_key(),
            self.view.len()
        );
    }

    pub fn store(&self) -> &ItemStore<S> {
        &self.store
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    pub fn visible(&self) -> impl Iterator<Item = &RenderedNode> {
        self.view.visible()
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn visibility(&self) -> &VisibilityControls {
        &self.visibility
    }

    /// Current text of the create form's entry field.
    pub fn entry_field(&self) -> &str {
        &self.entry_field
    }

    /// Creates a not-done item from `text`.
    ///
    /// On success the entry field is cleared.
    pub fn create(&mut self, text: &str) -> StoreResult<Outcome> {
        let Some(text) = normalize_text(text) else {
            debug!("event=item_create module=controller status=skipped reason=blank_text");
            return Ok(Outcome::Unchanged(NoChange::BlankText));
        };

        let item = Item::new(text);
        let id = item.id.clone();
        let report = self.store.add(item)?;
        self.refresh(&report);
        self.entry_field.clear();

        info!(
            "event=item_create module=controller status=ok item_id={} count={}",
            id,
            report.items.len()
        );
        Ok(Outcome::Applied)
    }

    /// Flips the done state of `id` in the store, then re-derives the marker.
    pub fn toggle_done(&mut self, id: &ItemId) -> StoreResult<Outcome> {
        let report = self.store.toggle_done(id)?;
        self.refresh(&report);
        Ok(self.finish("item_toggle", id, &report))
    }

    pub fn delete(&mut self, id: &ItemId) -> StoreResult<Outcome> {
        let report = self.store.remove(id)?;
        self.refresh(&report);
        Ok(self.finish("item_delete", id, &report))
    }

    /// Replaces the text of `id`; blank text is rejected before any I/O.
    pub fn update(&mut self, id: &ItemId, text: &str) -> StoreResult<Outcome> {
        let Some(text) = normalize_text(text) else {
            debug!(
                "event=item_update module=controller status=skipped reason=blank_text item_id={}",
                id
            );
            return Ok(Outcome::Unchanged(NoChange::BlankText));
        };

        let report = self.store.update(id, &text)?;
        self.refresh(&report);
        Ok(self.finish("item_update", id, &report))
    }

    /// Opens the edit form for a rendered item, pre-filled with its title.
    pub fn begin_edit(&mut self, id: &ItemId) -> Outcome {
        let Some(node) = self.view.get(id) else {
            return Outcome::Unchanged(NoChange::UnknownItem);
        };
        self.session.begin(id.clone(), &node.title);
        debug!("event=edit_begin module=controller status=ok item_id={}", id);
        Outcome::Applied
    }

    /// Applies the pending edit and returns to browsing.
    ///
    /// The session closes even when `text` is blank or the target vanished.
    /// A storage failure keeps it open with `text` left in the edit field.
    pub fn submit_edit(&mut self, text: &str) -> StoreResult<Outcome> {
        let Some(id) = self.session.pending().cloned() else {
            return Ok(Outcome::Unchanged(NoChange::NotEditing));
        };
        self.session.set_edit_field(text);
        let outcome = self.update(&id, text)?;
        self.session.submit(text);
        Ok(outcome)
    }

    pub fn cancel_edit(&mut self) -> Outcome {
        if self.session.cancel() {
            Outcome::Applied
        } else {
            Outcome::Unchanged(NoChange::NotEditing)
        }
    }

    pub fn search(&mut self, query: &str) -> Outcome {
        self.visibility.search(&mut self.view, query);
        Outcome::Applied
    }

    pub fn clear_search(&mut self) -> Outcome {
        self.visibility.clear_search(&mut self.view);
        Outcome::Applied
    }

    pub fn filter(&mut self, mode: FilterMode) -> Outcome {
        self.visibility.select_filter(&mut self.view, mode);
        Outcome::Applied
    }

    /// Routes a per-item control to its operation.
    pub fn dispatch(&mut self, action: ItemAction, id: &ItemId) -> StoreResult<Outcome> {
        match action {
            ItemAction::ToggleDone => self.toggle_done(id),
            ItemAction::Delete => self.delete(id),
            ItemAction::Edit => Ok(self.begin_edit(id)),
        }
    }

    /// Handles one UI event to completion.
    pub fn handle(&mut self, event: UiEvent) -> Outcome {
        let result = match event {
            UiEvent::SubmitCreate(text) => {
                self.entry_field = text;
                let text = self.entry_field.clone();
                self.create(&text)
            }
            UiEvent::Item(action, id) => self.dispatch(action, &id),
            UiEvent::SubmitEdit(text) => self.submit_edit(&text),
            UiEvent::CancelEdit => Ok(self.cancel_edit()),
            UiEvent::SearchInput(query) => Ok(self.search(&query)),
            UiEvent::ClearSearch => Ok(self.clear_search()),
            UiEvent::FilterSelected(value) => Ok(match value.parse::<FilterMode>() {
                Ok(mode) => self.filter(mode),
                Err(err) => {
                    debug!("event=filter_select module=controller status=skipped error={err}");
                    Outcome::Unchanged(NoChange::UnknownFilter)
                }
            }),
        };

        result.unwrap_or_else(|err| {
            error!(
                "event=ui_event module=controller status=error slot={} error={}",
                self.store.slot_key(),
                err
            );
            Outcome::Unchanged(NoChange::StorageUnavailable)
        })
    }

    fn refresh(&mut self, report: &WriteReport) {
        self.view.sync_from(&report.items);
    }

    fn finish(&self, event: &str, id: &ItemId, report: &WriteReport) -> Outcome {
        if report.matched == 0 {
            debug!(
                "event={event} module=controller status=skipped reason=unknown_item item_id={id}"
            );
            return Outcome::Unchanged(NoChange::UnknownItem);
        }
        info!(
            "event={event} module=controller status=ok item_id={id} matched={}",
            report.matched
        );
        Outcome::Applied
    }
}
