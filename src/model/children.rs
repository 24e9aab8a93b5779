//! Ordered child list
//!
//! Ordered sequence of child handles for one owner. The list itself only
//! manages ordering; ownership back-references, name lookup and event
//! publication are wired by the [`Model`](crate::model::Model), which is the
//! sole mutator of both pointer directions.
//!
//! Duplicate names are tolerated here: uniqueness is a validation concern,
//! and name lookup returns the first match.

use crate::model::arena::EntityId;

#[derive(Debug, Clone, Default)]
pub struct ChildList {
    ids: Vec<EntityId>,
}

impl ChildList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Children in insertion order (unless explicitly reordered).
    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.ids.contains(&id)
    }

    pub fn position(&self, id: EntityId) -> Option<usize> {
        self.ids.iter().position(|candidate| *candidate == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.ids.iter().copied()
    }

    pub(crate) fn push(&mut self, id: EntityId) {
        self.ids.push(id);
    }

    /// Insert at `index`. The caller has already range-checked the index.
    pub(crate) fn insert(&mut self, index: usize, id: EntityId) {
        self.ids.insert(index, id);
    }

    /// Remove a child; returns whether it was present.
    pub(crate) fn remove(&mut self, id: EntityId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    /// Swap a child with its predecessor. No-op (returns `false`) when the
    /// child is absent or already first.
    pub(crate) fn move_up(&mut self, id: EntityId) -> bool {
        match self.position(id) {
            Some(index) if index > 0 => {
                self.ids.swap(index - 1, index);
                true
            }
            _ => false,
        }
    }

    /// Swap a child with its successor. No-op (returns `false`) when the
    /// child is absent or already last.
    pub(crate) fn move_down(&mut self, id: EntityId) -> bool {
        match self.position(id) {
            Some(index) if index + 1 < self.ids.len() => {
                self.ids.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }

    /// Replace the ordering wholesale. Used by sort; the caller guarantees the
    /// new ordering is a permutation of the current one.
    pub(crate) fn set_order(&mut self, ids: Vec<EntityId>) {
        debug_assert_eq!(ids.len(), self.ids.len());
        self.ids = ids;
    }
}
