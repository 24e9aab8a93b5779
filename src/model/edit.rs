//! Mutation layer
//!
//! Child-list operations and field setters. Every operation keeps both
//! directions of the affected ownership edge consistent and publishes the
//! matching lifecycle event; setters fire `MODIFIED` only when the value
//! actually changes, carrying the exact replaced value.
//!
//! Removal and reorder of absent or boundary children are deliberate silent
//! no-ops: these operations are driven interactively and "nothing to do" is
//! a valid steady state, not a failure.

use chrono::Utc;
use std::cmp::Ordering;

use crate::entities::{
    ChildSlot, Entity, EntityKind, EntityPayload, EntityRef, FacetType, LibraryStatus,
};
use crate::events::{EventAction, EventTarget, EventValue, ModelEvent};
use crate::model::arena::EntityId;
use crate::model::{Model, ModelError};

fn slot_event_target(slot: ChildSlot) -> EventTarget {
    match slot {
        ChildSlot::Members => EventTarget::Member,
        ChildSlot::Folders => EventTarget::Folder,
        ChildSlot::Facets => EventTarget::Facet,
        ChildSlot::Attributes => EventTarget::Attribute,
        ChildSlot::Properties => EventTarget::Property,
        ChildSlot::Indicators => EventTarget::Indicator,
        ChildSlot::Aliases => EventTarget::Alias,
        ChildSlot::Equivalents => EventTarget::Equivalent,
        ChildSlot::Examples => EventTarget::Example,
        ChildSlot::Values => EventTarget::EnumValue,
        ChildSlot::Roles => EventTarget::Role,
    }
}

/// Event value for a name-resolved reference: the resolved handle when
/// present, the qualified name otherwise.
fn ref_value(reference: &EntityRef) -> EventValue {
    if let Some(resolved) = reference.resolved {
        EventValue::Entity(resolved)
    } else if let Some(qname) = &reference.qname {
        EventValue::Text(qname.to_string())
    } else {
        EventValue::None
    }
}

impl Model {
    // ---- ordered child list ------------------------------------------------

    /// Children of `owner` in `slot`, in order. Empty for unknown owners or
    /// unsupported slots.
    pub fn children(&self, owner: EntityId, slot: ChildSlot) -> &[EntityId] {
        self.entity(owner)
            .and_then(|entity| entity.child_list(slot))
            .map(|list| list.ids())
            .unwrap_or(&[])
    }

    /// First child whose semantic name equals `name`. Duplicate names are
    /// possible; the first match wins.
    pub fn child_by_name(&self, owner: EntityId, slot: ChildSlot, name: &str) -> Option<EntityId> {
        self.children(owner, slot)
            .iter()
            .copied()
            .find(|child| self.entity_local_name(*child).as_deref() == Some(name))
    }

    /// Append `child` to `owner`'s `slot` list, assigning the owner
    /// back-reference and firing an ADDED event scoped to the owner.
    pub fn add_child(
        &mut self,
        owner: EntityId,
        slot: ChildSlot,
        child: EntityId,
    ) -> Result<(), ModelError> {
        self.attach_child(owner, slot, None, child)
    }

    /// Insert `child` at `index`; rejects an out-of-range index.
    pub fn insert_child(
        &mut self,
        owner: EntityId,
        slot: ChildSlot,
        index: usize,
        child: EntityId,
    ) -> Result<(), ModelError> {
        self.attach_child(owner, slot, Some(index), child)
    }

    fn attach_child(
        &mut self,
        owner: EntityId,
        slot: ChildSlot,
        index: Option<usize>,
        child: EntityId,
    ) -> Result<(), ModelError> {
        let child_entity = self.entity_ok(child)?;
        let child_kind = child_entity.kind();
        if !slot.accepts(child_kind) {
            return Err(ModelError::UnsupportedChild {
                slot,
                kind: child_kind,
            });
        }
        if child_entity.owner.is_some() {
            return Err(ModelError::AlreadyOwned(child));
        }

        let owner_entity = self.entity_ok(owner)?;
        let owner_kind = owner_entity.kind();
        let len = owner_entity
            .child_list(slot)
            .ok_or(ModelError::MissingSlot {
                entity: owner,
                slot,
            })?
            .len();
        if let Some(index) = index
            && index > len
        {
            return Err(ModelError::InvalidIndex { slot, index, len });
        }

        let now = Utc::now();
        if let Some(entity) = self.entity_mut(child) {
            entity.owner = Some(owner);
            entity.updated_at = now;
        }
        if let Some(entity) = self.entity_mut(owner) {
            if let Some(list) = entity.child_list_mut(slot) {
                match index {
                    Some(index) => list.insert(index, child),
                    None => list.push(child),
                }
            }
            entity.updated_at = now;
        }

        self.emit(ModelEvent::added(
            owner,
            owner_kind,
            slot_event_target(slot),
            EventValue::Entity(child),
        ));
        Ok(())
    }

    /// Detach `child` from `owner`'s `slot` list. No-op when the child is
    /// not present.
    pub fn remove_child(&mut self, owner: EntityId, slot: ChildSlot, child: EntityId) {
        let Some(owner_entity) = self.entity(owner) else {
            return;
        };
        let owner_kind = owner_entity.kind();
        let present = owner_entity
            .child_list(slot)
            .is_some_and(|list| list.contains(child));
        if !present {
            return;
        }

        let now = Utc::now();
        if let Some(entity) = self.entity_mut(owner) {
            if let Some(list) = entity.child_list_mut(slot) {
                list.remove(child);
            }
            entity.updated_at = now;
        }
        if let Some(entity) = self.entity_mut(child) {
            entity.owner = None;
            entity.updated_at = now;
        }

        self.emit(ModelEvent::removed(
            owner,
            owner_kind,
            slot_event_target(slot),
            EventValue::Entity(child),
        ));
    }

    /// Swap `child` with its predecessor. Position-only change: no
    /// structural event is fired. No-op when absent or already first.
    pub fn move_child_up(&mut self, owner: EntityId, slot: ChildSlot, child: EntityId) {
        let now = Utc::now();
        if let Some(entity) = self.entity_mut(owner) {
            let moved = entity
                .child_list_mut(slot)
                .is_some_and(|list| list.move_up(child));
            if moved {
                entity.updated_at = now;
            }
        }
    }

    /// Swap `child` with its successor. No-op when absent or already last.
    pub fn move_child_down(&mut self, owner: EntityId, slot: ChildSlot, child: EntityId) {
        let now = Utc::now();
        if let Some(entity) = self.entity_mut(owner) {
            let moved = entity
                .child_list_mut(slot)
                .is_some_and(|list| list.move_down(child));
            if moved {
                entity.updated_at = now;
            }
        }
    }

    /// Reorder `owner`'s `slot` children in place by the supplied total
    /// order. No add/remove side effects.
    pub fn sort_children<F>(&mut self, owner: EntityId, slot: ChildSlot, mut compare: F)
    where
        F: FnMut(&Entity, &Entity) -> Ordering,
    {
        let Some(list) = self.entity(owner).and_then(|entity| entity.child_list(slot)) else {
            return;
        };
        let mut ids: Vec<EntityId> = list.ids().to_vec();
        ids.sort_by(|a, b| match (self.entity(*a), self.entity(*b)) {
            (Some(left), Some(right)) => compare(left, right),
            _ => Ordering::Equal,
        });
        let now = Utc::now();
        if let Some(entity) = self.entity_mut(owner) {
            if let Some(list) = entity.child_list_mut(slot) {
                list.set_order(ids);
            }
            entity.updated_at = now;
        }
    }

    /// Sort children by semantic name.
    pub fn sort_children_by_name(&mut self, owner: EntityId, slot: ChildSlot) {
        let mut ids: Vec<EntityId> = self.children(owner, slot).to_vec();
        ids.sort_by_key(|id| self.entity_local_name(*id).unwrap_or_default());
        let now = Utc::now();
        if let Some(entity) = self.entity_mut(owner) {
            if let Some(list) = entity.child_list_mut(slot) {
                list.set_order(ids);
            }
            entity.updated_at = now;
        }
    }

    // ---- generic field plumbing -------------------------------------------

    fn set_string_field(
        &mut self,
        id: EntityId,
        target: EventTarget,
        field: &'static str,
        value: String,
        access: fn(&mut EntityPayload) -> Option<&mut String>,
    ) -> Result<(), ModelError> {
        let entity = self.entity_mut_ok(id)?;
        let kind = entity.kind();
        let Some(current) = access(&mut entity.payload) else {
            return Err(ModelError::UnsupportedField { entity: id, field });
        };
        if *current == value {
            return Ok(());
        }
        let old = std::mem::replace(current, value.clone());
        entity.updated_at = Utc::now();
        self.emit(ModelEvent::modified(
            id,
            kind,
            target,
            EventValue::Text(old),
            EventValue::Text(value),
        ));
        Ok(())
    }

    fn set_opt_string_field(
        &mut self,
        id: EntityId,
        target: EventTarget,
        field: &'static str,
        value: Option<String>,
        access: fn(&mut EntityPayload) -> Option<&mut Option<String>>,
    ) -> Result<(), ModelError> {
        let entity = self.entity_mut_ok(id)?;
        let kind = entity.kind();
        let Some(current) = access(&mut entity.payload) else {
            return Err(ModelError::UnsupportedField { entity: id, field });
        };
        if *current == value {
            return Ok(());
        }
        let old = std::mem::replace(current, value.clone());
        entity.updated_at = Utc::now();
        let to_value = |v: Option<String>| v.map(EventValue::Text).unwrap_or(EventValue::None);
        self.emit(ModelEvent::modified(
            id,
            kind,
            target,
            to_value(old),
            to_value(value),
        ));
        Ok(())
    }

    fn set_flag_field(
        &mut self,
        id: EntityId,
        target: EventTarget,
        field: &'static str,
        value: bool,
        access: fn(&mut EntityPayload) -> Option<&mut bool>,
    ) -> Result<(), ModelError> {
        let entity = self.entity_mut_ok(id)?;
        let kind = entity.kind();
        let Some(current) = access(&mut entity.payload) else {
            return Err(ModelError::UnsupportedField { entity: id, field });
        };
        if *current == value {
            return Ok(());
        }
        let old = std::mem::replace(current, value);
        entity.updated_at = Utc::now();
        self.emit(ModelEvent::modified(
            id,
            kind,
            target,
            EventValue::Flag(old),
            EventValue::Flag(value),
        ));
        Ok(())
    }

    // ---- naming -----------------------------------------------------------

    /// Rename a named entity. Facet names are derived and cannot be set.
    pub fn set_name(&mut self, id: EntityId, name: impl Into<String>) -> Result<(), ModelError> {
        self.set_string_field(id, EventTarget::Name, "name", name.into(), |payload| {
            match payload {
                EntityPayload::Library(library) => Some(&mut library.name),
                EntityPayload::Folder(folder) => Some(&mut folder.name),
                EntityPayload::BusinessObject(bo) => Some(&mut bo.name),
                EntityPayload::CoreObject(co) => Some(&mut co.name),
                EntityPayload::ChoiceObject(ch) => Some(&mut ch.name),
                EntityPayload::Operation(op) => Some(&mut op.name),
                EntityPayload::Enumeration(en) => Some(&mut en.name),
                EntityPayload::Role(role) => Some(&mut role.name),
                EntityPayload::Attribute(attr) => Some(&mut attr.name),
                EntityPayload::Property(prop) => Some(&mut prop.name),
                EntityPayload::Indicator(indicator) => Some(&mut indicator.name),
                EntityPayload::Alias(alias) => Some(&mut alias.name),
                EntityPayload::XsdSimpleType(st) => Some(&mut st.name),
                EntityPayload::XsdComplexType(ct) => Some(&mut ct.name),
                EntityPayload::XsdElement(element) => Some(&mut element.name),
                _ => None,
            }
        })
    }

    // ---- library fields ---------------------------------------------------

    pub fn set_library_namespace(
        &mut self,
        library: EntityId,
        namespace: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.set_string_field(
            library,
            EventTarget::Namespace,
            "namespace",
            namespace.into(),
            |payload| payload.as_library_mut().map(|l| &mut l.namespace),
        )
    }

    pub fn set_library_version(
        &mut self,
        library: EntityId,
        version: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.set_string_field(
            library,
            EventTarget::Version,
            "version",
            version.into(),
            |payload| payload.as_library_mut().map(|l| &mut l.version),
        )
    }

    pub fn set_library_version_scheme(
        &mut self,
        library: EntityId,
        scheme: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.set_string_field(
            library,
            EventTarget::VersionScheme,
            "version_scheme",
            scheme.into(),
            |payload| payload.as_library_mut().map(|l| &mut l.version_scheme),
        )
    }

    pub fn set_library_comments(
        &mut self,
        library: EntityId,
        comments: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.set_string_field(
            library,
            EventTarget::Comments,
            "comments",
            comments.into(),
            |payload| payload.as_library_mut().map(|l| &mut l.comments),
        )
    }

    pub fn set_library_status(
        &mut self,
        library: EntityId,
        status: LibraryStatus,
    ) -> Result<(), ModelError> {
        let entity = self.entity_mut_ok(library)?;
        let kind = entity.kind();
        let Some(payload) = entity.payload.as_library_mut() else {
            return Err(ModelError::UnsupportedField {
                entity: library,
                field: "status",
            });
        };
        if payload.status == status {
            return Ok(());
        }
        let old = std::mem::replace(&mut payload.status, status);
        entity.updated_at = Utc::now();
        self.emit(ModelEvent::modified(
            library,
            kind,
            EventTarget::Status,
            EventValue::Text(format!("{old:?}")),
            EventValue::Text(format!("{status:?}")),
        ));
        Ok(())
    }

    /// Add an include directive. Idempotent: an already-present path is a
    /// no-op.
    pub fn add_include(
        &mut self,
        library: EntityId,
        path: impl Into<String>,
    ) -> Result<(), ModelError> {
        let path = path.into();
        let entity = self.entity_mut_ok(library)?;
        let kind = entity.kind();
        let Some(payload) = entity.payload.as_library_mut() else {
            return Err(ModelError::UnsupportedField {
                entity: library,
                field: "includes",
            });
        };
        if payload.includes.contains(&path) {
            return Ok(());
        }
        payload.includes.push(path.clone());
        entity.updated_at = Utc::now();
        self.emit(ModelEvent::added(
            library,
            kind,
            EventTarget::Include,
            EventValue::Text(path),
        ));
        Ok(())
    }

    /// Remove an include directive; absent paths are a no-op.
    pub fn remove_include(&mut self, library: EntityId, path: &str) {
        let Some(entity) = self.entity_mut(library) else {
            return;
        };
        let kind = entity.kind();
        let Some(payload) = entity.payload.as_library_mut() else {
            return;
        };
        let Some(position) = payload.includes.iter().position(|p| p == path) else {
            return;
        };
        let removed = payload.includes.remove(position);
        entity.updated_at = Utc::now();
        self.emit(ModelEvent::removed(
            library,
            kind,
            EventTarget::Include,
            EventValue::Text(removed),
        ));
    }

    /// Add an imported namespace. Idempotent.
    pub fn add_import(
        &mut self,
        library: EntityId,
        namespace: impl Into<String>,
    ) -> Result<(), ModelError> {
        let namespace = namespace.into();
        let entity = self.entity_mut_ok(library)?;
        let kind = entity.kind();
        let Some(payload) = entity.payload.as_library_mut() else {
            return Err(ModelError::UnsupportedField {
                entity: library,
                field: "imports",
            });
        };
        if payload.imports.contains(&namespace) {
            return Ok(());
        }
        payload.imports.push(namespace.clone());
        entity.updated_at = Utc::now();
        self.emit(ModelEvent::added(
            library,
            kind,
            EventTarget::Import,
            EventValue::Text(namespace),
        ));
        Ok(())
    }

    /// Remove an imported namespace; absent namespaces are a no-op.
    pub fn remove_import(&mut self, library: EntityId, namespace: &str) {
        let Some(entity) = self.entity_mut(library) else {
            return;
        };
        let kind = entity.kind();
        let Some(payload) = entity.payload.as_library_mut() else {
            return;
        };
        let Some(position) = payload.imports.iter().position(|ns| ns == namespace) else {
            return;
        };
        let removed = payload.imports.remove(position);
        entity.updated_at = Utc::now();
        self.emit(ModelEvent::removed(
            library,
            kind,
            EventTarget::Import,
            EventValue::Text(removed),
        ));
    }

    // ---- facet fields -----------------------------------------------------

    pub fn set_facet_type(
        &mut self,
        facet: EntityId,
        facet_type: Option<FacetType>,
    ) -> Result<(), ModelError> {
        let entity = self.entity_mut_ok(facet)?;
        let kind = entity.kind();
        let Some(payload) = entity.payload.as_facet_mut() else {
            return Err(ModelError::UnsupportedField {
                entity: facet,
                field: "facet_type",
            });
        };
        if payload.facet_type == facet_type {
            return Ok(());
        }
        let old = std::mem::replace(&mut payload.facet_type, facet_type);
        entity.updated_at = Utc::now();
        let to_value = |v: Option<FacetType>| match v {
            Some(facet_type) => EventValue::Text(format!("{facet_type:?}")),
            None => EventValue::None,
        };
        self.emit(ModelEvent::modified(
            facet,
            kind,
            EventTarget::FacetType,
            to_value(old),
            to_value(facet_type),
        ));
        Ok(())
    }

    pub fn set_facet_context(
        &mut self,
        facet: EntityId,
        context: Option<String>,
    ) -> Result<(), ModelError> {
        self.set_opt_string_field(facet, EventTarget::Context, "context", context, |payload| {
            payload.as_facet_mut().map(|f| &mut f.context)
        })
    }

    pub fn set_facet_label(
        &mut self,
        facet: EntityId,
        label: Option<String>,
    ) -> Result<(), ModelError> {
        self.set_opt_string_field(facet, EventTarget::Label, "label", label, |payload| {
            payload.as_facet_mut().map(|f| &mut f.label)
        })
    }

    // ---- member fields ----------------------------------------------------

    /// Assign the type reference of an attribute or property.
    pub fn set_type_ref(
        &mut self,
        field: EntityId,
        type_ref: EntityRef,
    ) -> Result<(), ModelError> {
        let entity = self.entity_mut_ok(field)?;
        let kind = entity.kind();
        let current = match &mut entity.payload {
            EntityPayload::Attribute(attr) => &mut attr.type_ref,
            EntityPayload::Property(prop) => &mut prop.type_ref,
            _ => {
                return Err(ModelError::UnsupportedField {
                    entity: field,
                    field: "type_ref",
                });
            }
        };
        if *current == type_ref {
            return Ok(());
        }
        let old = std::mem::replace(current, type_ref.clone());
        entity.updated_at = Utc::now();
        self.emit(ModelEvent::modified(
            field,
            kind,
            EventTarget::TypeAssignment,
            ref_value(&old),
            ref_value(&type_ref),
        ));
        Ok(())
    }

    pub fn set_mandatory(&mut self, field: EntityId, mandatory: bool) -> Result<(), ModelError> {
        self.set_flag_field(
            field,
            EventTarget::Mandatory,
            "mandatory",
            mandatory,
            |payload| match payload {
                EntityPayload::Attribute(attr) => Some(&mut attr.mandatory),
                EntityPayload::Property(prop) => Some(&mut prop.mandatory),
                _ => None,
            },
        )
    }

    pub fn set_repeat(&mut self, property: EntityId, repeat: i32) -> Result<(), ModelError> {
        let entity = self.entity_mut_ok(property)?;
        let kind = entity.kind();
        let Some(payload) = entity.payload.as_property_mut() else {
            return Err(ModelError::UnsupportedField {
                entity: property,
                field: "repeat",
            });
        };
        if payload.repeat == repeat {
            return Ok(());
        }
        let old = std::mem::replace(&mut payload.repeat, repeat);
        entity.updated_at = Utc::now();
        self.emit(ModelEvent::modified(
            property,
            kind,
            EventTarget::Repeat,
            EventValue::Int(old as i64),
            EventValue::Int(repeat as i64),
        ));
        Ok(())
    }

    pub fn set_publish_as_element(
        &mut self,
        indicator: EntityId,
        publish_as_element: bool,
    ) -> Result<(), ModelError> {
        self.set_flag_field(
            indicator,
            EventTarget::PublishAsElement,
            "publish_as_element",
            publish_as_element,
            |payload| payload.as_indicator_mut().map(|i| &mut i.publish_as_element),
        )
    }

    // ---- enumeration fields -----------------------------------------------

    pub fn set_open(&mut self, enumeration: EntityId, open: bool) -> Result<(), ModelError> {
        self.set_flag_field(enumeration, EventTarget::OpenFlag, "open", open, |payload| {
            payload.as_enumeration_mut().map(|e| &mut e.open)
        })
    }

    pub fn set_literal(
        &mut self,
        value: EntityId,
        literal: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.set_string_field(
            value,
            EventTarget::Literal,
            "literal",
            literal.into(),
            |payload| payload.as_enum_value_mut().map(|v| &mut v.literal),
        )
    }

    // ---- annotation fields ------------------------------------------------

    pub fn set_description(
        &mut self,
        documentation: EntityId,
        description: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.set_string_field(
            documentation,
            EventTarget::Description,
            "description",
            description.into(),
            |payload| payload.as_documentation_mut().map(|d| &mut d.description),
        )
    }

    pub fn set_equivalent_context(
        &mut self,
        equivalent: EntityId,
        context: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.set_string_field(
            equivalent,
            EventTarget::Context,
            "context",
            context.into(),
            |payload| payload.as_equivalent_mut().map(|e| &mut e.context),
        )
    }

    pub fn set_equivalent_description(
        &mut self,
        equivalent: EntityId,
        description: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.set_string_field(
            equivalent,
            EventTarget::Description,
            "description",
            description.into(),
            |payload| payload.as_equivalent_mut().map(|e| &mut e.description),
        )
    }

    pub fn set_example_context(
        &mut self,
        example: EntityId,
        context: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.set_string_field(
            example,
            EventTarget::Context,
            "context",
            context.into(),
            |payload| payload.as_example_mut().map(|e| &mut e.context),
        )
    }

    pub fn set_example_value(
        &mut self,
        example: EntityId,
        value: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.set_string_field(
            example,
            EventTarget::ExampleValue,
            "value",
            value.into(),
            |payload| payload.as_example_mut().map(|e| &mut e.value),
        )
    }

    // ---- single-valued ownership ------------------------------------------

    /// Assign, replace or clear the owned documentation of `owner`.
    pub fn set_documentation(
        &mut self,
        owner: EntityId,
        documentation: Option<EntityId>,
    ) -> Result<(), ModelError> {
        self.set_single_child(
            owner,
            documentation,
            EntityKind::Documentation,
            EventTarget::Documentation,
            "documentation",
            |entity| entity.documentation_mut(),
        )
    }

    /// Assign, replace or clear the owned extension of `owner`.
    pub fn set_extension(
        &mut self,
        owner: EntityId,
        extension: Option<EntityId>,
    ) -> Result<(), ModelError> {
        self.set_single_child(
            owner,
            extension,
            EntityKind::Extension,
            EventTarget::Extension,
            "extension",
            |entity| entity.extension_mut(),
        )
    }

    fn set_single_child(
        &mut self,
        owner: EntityId,
        child: Option<EntityId>,
        expected_kind: EntityKind,
        target: EventTarget,
        field: &'static str,
        access: fn(&mut Entity) -> Option<&mut Option<EntityId>>,
    ) -> Result<(), ModelError> {
        if let Some(child) = child {
            let entity = self.entity_ok(child)?;
            if entity.kind() != expected_kind {
                return Err(ModelError::KindMismatch {
                    entity: child,
                    expected: expected_kind.label(),
                    found: entity.kind(),
                });
            }
            if entity.owner.is_some() && entity.owner != Some(owner) {
                return Err(ModelError::AlreadyOwned(child));
            }
        }

        let now = Utc::now();
        let entity = self.entity_mut_ok(owner)?;
        let kind = entity.kind();
        let Some(slot) = access(entity) else {
            return Err(ModelError::UnsupportedField {
                entity: owner,
                field,
            });
        };
        let old = *slot;
        if old == child {
            return Ok(());
        }
        *slot = child;
        entity.updated_at = now;

        if let Some(old_child) = old
            && let Some(entity) = self.entity_mut(old_child)
        {
            entity.owner = None;
            entity.updated_at = now;
        }
        if let Some(new_child) = child
            && let Some(entity) = self.entity_mut(new_child)
        {
            entity.owner = Some(owner);
            entity.updated_at = now;
        }

        let action = match (old, child) {
            (None, Some(_)) => EventAction::Added,
            (Some(_), None) => EventAction::Removed,
            _ => EventAction::Modified,
        };
        self.emit(ModelEvent {
            action,
            target,
            source: owner,
            source_kind: kind,
            old: EventValue::entity(old),
            new: EventValue::entity(child),
        });
        Ok(())
    }

    /// Assign the extended-entity reference of an extension.
    pub fn set_extends(
        &mut self,
        extension: EntityId,
        extends: EntityRef,
    ) -> Result<(), ModelError> {
        let entity = self.entity_mut_ok(extension)?;
        let kind = entity.kind();
        let Some(payload) = entity.payload.as_extension_mut() else {
            return Err(ModelError::UnsupportedField {
                entity: extension,
                field: "extends",
            });
        };
        if payload.extends == extends {
            return Ok(());
        }
        let old = std::mem::replace(&mut payload.extends, extends.clone());
        entity.updated_at = Utc::now();
        self.emit(ModelEvent::modified(
            extension,
            kind,
            EventTarget::ExtendsEntity,
            ref_value(&old),
            ref_value(&extends),
        ));
        Ok(())
    }
}
