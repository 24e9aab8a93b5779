//! Entity arena
//!
//! Slab storage for every entity in a model, addressed by generation-checked
//! handles. Handles stay valid across unrelated insertions and removals; a
//! handle to a released entity resolves to `None` instead of aliasing a
//! recycled slot.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::Entity;

/// Stable handle to an entity inside a [`Model`](crate::model::Model).
///
/// Handles are cheap to copy and safe to hold across mutations: the
/// generation counter detects stale handles after their slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}v{}", self.index, self.generation)
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

/// Free-list slab of entities.
#[derive(Debug, Default)]
pub struct Arena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert an entity built from its freshly assigned handle.
    pub fn insert_with(&mut self, build: impl FnOnce(EntityId) -> Entity) -> EntityId {
        let (index, generation) = match self.free.pop() {
            Some(index) => (index, self.slots[index as usize].generation),
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entity: None,
                });
                ((self.slots.len() - 1) as u32, 0)
            }
        };
        let id = EntityId { index, generation };
        self.slots[index as usize].entity = Some(build(id));
        self.len += 1;
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entity.as_ref()
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entity.as_mut()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Remove an entity, invalidating every outstanding handle to it.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let entity = slot.entity.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Some(entity)
    }
}
