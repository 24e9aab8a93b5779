//! Model root registry
//!
//! A [`Model`] owns the entity arena, the registered library list and the
//! event bus for one compilation session. Every entity reachable from a
//! registered library traces its owner chain back to this model; entities
//! outside any library are "detached" and their events are dropped.
//!
//! All mutation flows through the model: it is the sole writer of both
//! directions of every ownership edge (owner child list and child
//! back-reference), which is what keeps them consistent under arbitrary
//! edits.

pub mod arena;
pub mod children;
mod edit;

use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::entities::{
    ChildSlot, Entity, EntityKind, EntityPayload, QName, RoleEnumeration, XsdBase,
};
use crate::events::{EventBus, ListenerFilter, ListenerToken, ModelEvent, ModelEventListener};
use arena::{Arena, EntityId};

/// Error type for model mutation operations.
///
/// Read-oriented queries never error; they degrade to `None`/empty instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("index {index} out of range for {slot:?} (length {len})")]
    InvalidIndex {
        slot: ChildSlot,
        index: usize,
        len: usize,
    },
    #[error("{kind:?} entities cannot be added to {slot:?}")]
    UnsupportedChild { slot: ChildSlot, kind: EntityKind },
    #[error("entity {entity} has no {slot:?} children")]
    MissingSlot { entity: EntityId, slot: ChildSlot },
    #[error("entity {entity} has no {field} field")]
    UnsupportedField {
        entity: EntityId,
        field: &'static str,
    },
    #[error("expected a {expected} entity, found {found:?} ({entity})")]
    KindMismatch {
        entity: EntityId,
        expected: &'static str,
        found: EntityKind,
    },
    #[error("unknown or stale entity handle {0}")]
    UnknownEntity(EntityId),
    #[error("entity {0} already has an owner")]
    AlreadyOwned(EntityId),
    #[error("entity {0} is still attached; detach it before releasing")]
    EntityAttached(EntityId),
}

/// Root registry for one compilation session.
pub struct Model {
    id: Uuid,
    arena: Arena,
    libraries: Vec<EntityId>,
    bus: EventBus,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(model = %id, "created type model");
        Self {
            id,
            arena: Arena::new(),
            libraries: Vec::new(),
            bus: EventBus::new(),
        }
    }

    /// Instance id of this model. Handles are only meaningful within the
    /// model that issued them.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn entity_count(&self) -> usize {
        self.arena.len()
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn add_listener(
        &self,
        filter: ListenerFilter,
        listener: Arc<dyn ModelEventListener + Send + Sync>,
    ) -> ListenerToken {
        self.bus.add_listener(filter, listener)
    }

    pub fn remove_listener(&self, token: ListenerToken) -> bool {
        self.bus.remove_listener(token)
    }

    // ---- entity lifecycle -------------------------------------------------

    /// Create a detached entity from its payload. Core objects are created
    /// together with their role enumeration so the ownership edge exists by
    /// construction.
    pub fn create(&mut self, payload: EntityPayload) -> EntityId {
        let now = Utc::now();
        let id = self.arena.insert_with(|id| Entity {
            id,
            owner: None,
            created_at: now,
            updated_at: now,
            payload,
        });
        let needs_roles = self
            .arena
            .get(id)
            .and_then(|entity| entity.payload.as_core_object())
            .is_some_and(|core| core.role_enumeration.is_none());
        if needs_roles {
            let roles = self.arena.insert_with(|role_id| Entity {
                id: role_id,
                owner: Some(id),
                created_at: now,
                updated_at: now,
                payload: EntityPayload::RoleEnumeration(RoleEnumeration::new()),
            });
            if let Some(core) = self
                .arena
                .get_mut(id)
                .and_then(|entity| entity.payload.as_core_object_mut())
            {
                core.role_enumeration = Some(roles);
            }
        }
        id
    }

    /// Insert a fresh entity without the kind-specific construction hooks.
    /// Used by the cloner, which replicates owned structure itself.
    pub(crate) fn insert_raw(
        &mut self,
        owner: Option<EntityId>,
        payload: EntityPayload,
    ) -> EntityId {
        let now = Utc::now();
        self.arena.insert_with(|id| Entity {
            id,
            owner,
            created_at: now,
            updated_at: now,
            payload,
        })
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.arena.get(id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.arena.get_mut(id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.arena.contains(id)
    }

    pub(crate) fn entity_ok(&self, id: EntityId) -> Result<&Entity, ModelError> {
        self.arena.get(id).ok_or(ModelError::UnknownEntity(id))
    }

    pub(crate) fn entity_mut_ok(&mut self, id: EntityId) -> Result<&mut Entity, ModelError> {
        self.arena.get_mut(id).ok_or(ModelError::UnknownEntity(id))
    }

    /// Reclaim a detached entity and its owned subtree. Releasing an
    /// attached entity is refused; releasing an already-stale handle is a
    /// no-op.
    pub fn release(&mut self, id: EntityId) -> Result<(), ModelError> {
        if !self.arena.contains(id) {
            return Ok(());
        }
        if self.is_attached(id) {
            return Err(ModelError::EntityAttached(id));
        }
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(entity) = self.arena.remove(next) {
                pending.extend(owned_children(&entity));
            }
        }
        Ok(())
    }

    // ---- library registry -------------------------------------------------

    /// Registered libraries in registration order.
    pub fn libraries(&self) -> &[EntityId] {
        &self.libraries
    }

    /// Register a library with this model. Registering an already-registered
    /// library is a no-op.
    pub fn add_library(&mut self, library: EntityId) -> Result<(), ModelError> {
        let entity = self.entity_ok(library)?;
        if entity.kind() != EntityKind::Library {
            return Err(ModelError::KindMismatch {
                entity: library,
                expected: "Library",
                found: entity.kind(),
            });
        }
        if self.libraries.contains(&library) {
            return Ok(());
        }
        self.libraries.push(library);
        self.emit(ModelEvent::added(
            library,
            EntityKind::Library,
            crate::events::EventTarget::Library,
            crate::events::EventValue::Entity(library),
        ));
        Ok(())
    }

    /// Unregister a library. No-op when it was not registered. The library's
    /// entities stay in the arena and become detached.
    pub fn remove_library(&mut self, library: EntityId) {
        let Some(position) = self.libraries.iter().position(|l| *l == library) else {
            return;
        };
        self.libraries.remove(position);
        // The library is detached at this point, so the event bypasses the
        // attachment check: removal is a model-scoped notification.
        self.emit_always(ModelEvent::removed(
            library,
            EntityKind::Library,
            crate::events::EventTarget::Library,
            crate::events::EventValue::Entity(library),
        ));
    }

    pub fn library_by_name(&self, name: &str) -> Option<EntityId> {
        self.libraries.iter().copied().find(|id| {
            self.entity(*id)
                .and_then(|entity| entity.payload.as_library())
                .is_some_and(|library| library.name == name)
        })
    }

    /// All registered libraries assigned to `namespace`.
    pub fn libraries_for_namespace(&self, namespace: &str) -> Vec<EntityId> {
        self.libraries
            .iter()
            .copied()
            .filter(|id| {
                self.entity(*id)
                    .and_then(|entity| entity.payload.as_library())
                    .is_some_and(|library| library.namespace == namespace)
            })
            .collect()
    }

    /// Member of `library` with the given local name, if any.
    pub fn named_member(&self, library: EntityId, local_name: &str) -> Option<EntityId> {
        self.child_by_name(library, ChildSlot::Members, local_name)
    }

    // ---- ownership & naming ----------------------------------------------

    /// Registered library this entity is reachable from, walking the owner
    /// chain. `None` for detached entities and unregistered libraries.
    pub fn owning_library(&self, id: EntityId) -> Option<EntityId> {
        let mut current = id;
        loop {
            let entity = self.arena.get(current)?;
            if entity.kind() == EntityKind::Library {
                return self.libraries.contains(&current).then_some(current);
            }
            current = entity.owner?;
        }
    }

    pub fn is_attached(&self, id: EntityId) -> bool {
        self.owning_library(id).is_some()
    }

    /// Local name of an entity; derived for facets, stored for the rest.
    /// `None` for kinds without a name of their own (documentation,
    /// extensions, role enumerations).
    pub fn entity_local_name(&self, id: EntityId) -> Option<String> {
        let entity = self.entity(id)?;
        match &entity.payload {
            EntityPayload::Library(library) => Some(library.name.clone()),
            EntityPayload::Folder(folder) => Some(folder.name.clone()),
            EntityPayload::BusinessObject(bo) => Some(bo.name.clone()),
            EntityPayload::CoreObject(co) => Some(co.name.clone()),
            EntityPayload::ChoiceObject(ch) => Some(ch.name.clone()),
            EntityPayload::Operation(op) => Some(op.name.clone()),
            EntityPayload::Enumeration(en) => Some(en.name.clone()),
            EntityPayload::EnumValue(value) => Some(value.literal.clone()),
            EntityPayload::Role(role) => Some(role.name.clone()),
            EntityPayload::Facet(_) => self.facet_identity_name(id),
            EntityPayload::Attribute(attr) => Some(attr.name.clone()),
            EntityPayload::Property(prop) => Some(prop.name.clone()),
            EntityPayload::Indicator(indicator) => Some(indicator.name.clone()),
            EntityPayload::Alias(alias) => Some(alias.name.clone()),
            EntityPayload::Equivalent(equivalent) => Some(equivalent.context.clone()),
            EntityPayload::Example(example) => Some(example.context.clone()),
            EntityPayload::XsdSimpleType(st) => Some(st.name.clone()),
            EntityPayload::XsdComplexType(ct) => Some(ct.name.clone()),
            EntityPayload::XsdElement(element) => Some(element.name.clone()),
            EntityPayload::RoleEnumeration(_)
            | EntityPayload::Extension(_)
            | EntityPayload::Documentation(_) => None,
        }
    }

    /// Canonical identity name of a facet (see [`crate::entities::facet`]).
    pub fn facet_identity_name(&self, facet: EntityId) -> Option<String> {
        let entity = self.entity(facet)?;
        let payload = entity.payload.as_facet()?;
        let owner_name = entity.owner.and_then(|owner| self.entity_local_name(owner));
        Some(crate::entities::facet::identity_name(
            owner_name.as_deref(),
            payload,
        ))
    }

    /// Namespace of an entity: its own override when it carries one (legacy
    /// simple types, libraries), otherwise the owning library's namespace.
    pub fn entity_namespace(&self, id: EntityId) -> String {
        let Some(entity) = self.entity(id) else {
            return String::new();
        };
        match &entity.payload {
            EntityPayload::Library(library) => library.namespace.clone(),
            EntityPayload::XsdSimpleType(st) if st.namespace.is_some() => {
                st.namespace.clone().unwrap_or_default()
            }
            _ => self
                .owning_library(id)
                .and_then(|library| self.entity(library))
                .and_then(|entity| entity.payload.as_library())
                .map(|library| library.namespace.clone())
                .unwrap_or_default(),
        }
    }

    /// Namespace-qualified name, when the entity has a local name.
    pub fn qname_of(&self, id: EntityId) -> Option<QName> {
        let local_name = self.entity_local_name(id)?;
        Some(QName::new(self.entity_namespace(id), local_name))
    }

    // ---- event publication ------------------------------------------------

    /// Publish an event if its source is attached; detached sources drop the
    /// event silently (the mutation still happened, there is just nobody
    /// scoped to hear about it).
    pub(crate) fn emit(&self, event: ModelEvent) {
        if self.is_attached(event.source) {
            self.bus.publish(&event);
        } else {
            tracing::trace!(
                source = %event.source,
                action = ?event.action,
                target = ?event.target,
                "dropped event from detached entity"
            );
        }
    }

    /// Publish regardless of attachment. Reserved for model-scoped events
    /// (library removal) whose source is detached by definition.
    pub(crate) fn emit_always(&self, event: ModelEvent) {
        self.bus.publish(&event);
    }
}

/// Handles of every entity owned by `entity`, across child lists and
/// single-valued ownership fields. Non-owning references (aliases of legacy
/// complex types, type references) are deliberately excluded.
pub(crate) fn owned_children(entity: &Entity) -> Vec<EntityId> {
    let mut out = Vec::new();
    for slot in ChildSlot::ALL {
        if let Some(list) = entity.child_list(slot) {
            out.extend(list.iter());
        }
    }
    if let Some(documentation) = entity.documentation() {
        out.push(documentation);
    }
    if let Some(extension) = entity.extension() {
        out.push(extension);
    }
    if let Some(core) = entity.payload.as_core_object()
        && let Some(roles) = core.role_enumeration
    {
        out.push(roles);
    }
    if let Some(simple) = entity.payload.as_xsd_simple_type()
        && let Some(XsdBase::Inline(inner)) = &simple.base
    {
        out.push(*inner);
    }
    out
}
