//! Selection manager: an ordered set of selected entities.
//!
//! Insertion order is significant; the last element is the most recently
//! selected entity. Every mutating call publishes exactly one
//! `SelectionChanged` event, including calls that leave the set unchanged
//! (appending a present id, clearing an empty selection).
//!
//! Ids are not validated against the design graph.

use indexmap::IndexSet;

use diagramkit_core::{EditorEvent, EntityId, EventBus};

#[derive(Debug, Clone)]
pub struct Selection {
    members: IndexSet<EntityId>,
    bus: EventBus,
}

impl Selection {
    pub fn new(bus: EventBus) -> Self {
        Self {
            members: IndexSet::new(),
            bus,
        }
    }

    fn changed(&self) {
        self.bus.publish(EditorEvent::SelectionChanged {
            count: self.members.len(),
        });
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityId> {
        self.members.iter()
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.members.iter().copied().collect()
    }

    /// Most recently selected entity.
    pub fn last(&self) -> Option<EntityId> {
        self.members.last().copied()
    }

    /// True when `id` is the one and only member.
    pub fn is_sole(&self, id: EntityId) -> bool {
        self.members.len() == 1 && self.members.contains(&id)
    }

    pub fn append(&mut self, id: EntityId) {
        self.members.insert(id);
        self.changed();
    }

    /// Appends several ids with a single notification.
    pub fn extend(&mut self, ids: impl IntoIterator<Item = EntityId>) {
        self.members.extend(ids);
        self.changed();
    }

    pub fn remove(&mut self, id: EntityId) {
        self.members.shift_remove(&id);
        self.changed();
    }

    /// Adds `id` when absent, removes it when present.
    pub fn toggle(&mut self, id: EntityId) {
        if !self.members.shift_remove(&id) {
            self.members.insert(id);
        }
        self.changed();
    }

    pub fn replace_all(&mut self, ids: impl IntoIterator<Item = EntityId>) {
        self.members = ids.into_iter().collect();
        self.changed();
    }

    pub fn clear(&mut self) {
        self.members.clear();
        self.changed();
    }

    /// Drops members rejected by `keep`. Notifies only when something was
    /// removed; returns the number of removed members.
    pub fn retain(&mut self, mut keep: impl FnMut(&EntityId) -> bool) -> usize {
        let before = self.members.len();
        self.members.retain(|id| keep(id));
        let removed = before - self.members.len();
        if removed > 0 {
            self.changed();
        }
        removed
    }
}
