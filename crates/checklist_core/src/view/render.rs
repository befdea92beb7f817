//! Rendered item nodes and the list container.
//!
//! # Responsibility
//! - Build the presentation node for one item with its per-item controls.
//! - Own rendered nodes in an arena addressed through an `id -> index` map.
//! - Reconcile the rendered list against a persisted collection.
//!
//! # Invariants
//! - At most one node exists per `ItemId`.
//! - `index` always maps every node id to its current arena slot.
//! - Rendering never touches storage.

use crate::model::item::{Item, ItemId};
use std::collections::{HashMap, HashSet};

/// Per-item action a control emits when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemAction {
    ToggleDone,
    Edit,
    Delete,
}

/// Control set wired onto every rendered node, in display order.
pub const ITEM_CONTROLS: [ItemAction; 3] =
    [ItemAction::ToggleDone, ItemAction::Edit, ItemAction::Delete];

/// Visible representation of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNode {
    pub id: ItemId,
    pub title: String,
    /// Done marker; present iff the item is done.
    pub done: bool,
    /// Hidden by the last search or filter pass. Hidden nodes stay rendered.
    pub hidden: bool,
}

impl RenderedNode {
    pub fn controls(&self) -> &'static [ItemAction] {
        &ITEM_CONTROLS
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }
}

/// Builds the node for `(text, done, id)`.
pub fn render_item(text: &str, done: bool, id: &ItemId) -> RenderedNode {
    RenderedNode {
        id: id.clone(),
        title: text.to_string(),
        done,
        hidden: false,
    }
}

/// Ordered container of rendered nodes.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    nodes: Vec<RenderedNode>,
    index: HashMap<ItemId, usize>,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `item` and appends it at the end of the list.
    ///
    /// Returns `false` without changes when a node with the same id exists.
    pub fn append(&mut self, item: &Item) -> bool {
        if self.index.contains_key(&item.id) {
            return false;
        }
        self.index.insert(item.id.clone(), self.nodes.len());
        self.nodes.push(render_item(&item.text, item.done, &item.id));
        true
    }

    pub fn remove(&mut self, id: &ItemId) -> Option<RenderedNode> {
        let position = self.index.remove(id)?;
        let node = self.nodes.remove(position);
        self.reindex_from(position);
        Some(node)
    }

    pub fn get(&self, id: &ItemId) -> Option<&RenderedNode> {
        self.index.get(id).map(|&position| &self.nodes[position])
    }

    pub fn get_mut(&mut self, id: &ItemId) -> Option<&mut RenderedNode> {
        let position = *self.index.get(id)?;
        self.nodes.get_mut(position)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.index.contains_key(id)
    }

    pub fn nodes(&self) -> &[RenderedNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut RenderedNode> {
        self.nodes.iter_mut()
    }

    pub fn visible(&self) -> impl Iterator<Item = &RenderedNode> {
        self.nodes.iter().filter(|node| node.is_visible())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Makes the rendered list mirror `items`.
    ///
    /// Nodes whose id is gone are dropped, surviving nodes take the persisted
    /// title and done marker and keep their visibility, and unseen ids are
    /// appended visible. Later duplicates of an id are ignored.
    pub fn sync_from(&mut self, items: &[Item]) {
        let persisted: HashSet<&ItemId> = items.iter().map(|item| &item.id).collect();
        let before = self.nodes.len();
        self.nodes.retain(|node| persisted.contains(&node.id));
        if self.nodes.len() != before {
            self.rebuild_index();
        }

        let mut seen = HashSet::new();
        for item in items {
            if !seen.insert(&item.id) {
                continue;
            }
            match self.get_mut(&item.id) {
                Some(node) => {
                    node.title.clone_from(&item.text);
                    node.done = item.done;
                }
                None => {
                    self.append(item);
                }
            }
        }
    }

    fn reindex_from(&mut self, start: usize) {
        for (position, node) in self.nodes.iter().enumerate().skip(start) {
            self.index.insert(node.id.clone(), position);
        }
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(position, node)| (node.id.clone(), position))
            .collect();
    }
}
