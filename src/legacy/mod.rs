//! Legacy interop resolver
//!
//! Two services over the imported XML-schema kinds: facet-profile inference
//! for simple types and the alias relation between complex types and the
//! global elements that publish them.
//!
//! Profile inference walks a simple type's restriction chain (named bases
//! through the model's namespace index, inline bases directly) until it
//! reaches an XML-schema built-in, then memoizes the answer on the type.
//! Unresolvable and cyclic chains infer "unconstrained" (`None`), which is
//! memoized all the same so the walk runs at most once per type.

use chrono::Utc;
use std::collections::HashSet;

use crate::entities::{
    EntityKind, XSD_NAMESPACE, XsdBase, XsdFacetProfile,
};
use crate::events::{EventAction, EventTarget, EventValue, ModelEvent};
use crate::model::arena::EntityId;
use crate::model::{Model, ModelError};

/// Facet profile of a legacy simple type, inferred from its restriction
/// chain and memoized on the type. `None` means unconstrained: no base, an
/// unresolvable base, a cycle, or a handle that is not a simple type.
pub fn facet_profile(model: &Model, simple_type: EntityId) -> Option<XsdFacetProfile> {
    let mut visited = HashSet::new();
    profile_rec(model, simple_type, &mut visited)
}

fn profile_rec(
    model: &Model,
    id: EntityId,
    visited: &mut HashSet<EntityId>,
) -> Option<XsdFacetProfile> {
    let simple = model.entity(id)?.payload.as_xsd_simple_type()?;
    if let Some(cached) = simple.profile.get() {
        return *cached;
    }
    // A type declared in the built-in namespace IS a primitive: its own name
    // names the root profile, no base walk needed.
    if model.entity_namespace(id) == XSD_NAMESPACE {
        let inferred = XsdFacetProfile::from_primitive_name(&simple.name);
        let _ = simple.profile.set(inferred);
        return inferred;
    }
    if !visited.insert(id) {
        // Cycle in the restriction chain; do not memoize mid-walk.
        return None;
    }

    let inferred = match &simple.base {
        None => None,
        Some(XsdBase::Inline(inner)) => profile_rec(model, *inner, visited),
        Some(XsdBase::Named(qname)) => {
            let namespace = if qname.namespace.is_empty() {
                model.entity_namespace(id)
            } else {
                qname.namespace.clone()
            };
            if namespace == XSD_NAMESPACE {
                XsdFacetProfile::from_primitive_name(&qname.local_name)
            } else {
                model
                    .libraries_for_namespace(&namespace)
                    .into_iter()
                    .find_map(|library| model.named_member(library, &qname.local_name))
                    .and_then(|base| profile_rec(model, base, visited))
            }
        }
    };

    let _ = simple.profile.set(inferred);
    inferred
}

impl Model {
    /// Assign, replace or clear the identity alias of a legacy complex type:
    /// the global element publishing the type under its own name. Both
    /// directions of the link are maintained here.
    pub fn set_identity_alias(
        &mut self,
        complex: EntityId,
        element: Option<EntityId>,
    ) -> Result<(), ModelError> {
        if let Some(element) = element {
            self.require_kind(element, EntityKind::XsdElement)?;
        }

        let entity = self.entity_mut_ok(complex)?;
        let kind = entity.kind();
        let Some(payload) = entity.payload.as_xsd_complex_type_mut() else {
            return Err(ModelError::UnsupportedField {
                entity: complex,
                field: "identity_alias",
            });
        };
        let old = payload.identity_alias;
        if old == element {
            return Ok(());
        }
        payload.identity_alias = element;
        entity.updated_at = Utc::now();

        if let Some(previous) = old {
            self.clear_alias_backref(previous, complex);
        }
        if let Some(element) = element {
            self.set_alias_backref(element, complex);
        }

        let action = match (old, element) {
            (None, Some(_)) => EventAction::Added,
            (Some(_), None) => EventAction::Removed,
            _ => EventAction::Modified,
        };
        self.emit(ModelEvent {
            action,
            target: EventTarget::IdentityAlias,
            source: complex,
            source_kind: kind,
            old: EventValue::entity(old),
            new: EventValue::entity(element),
        });
        Ok(())
    }

    /// Add a non-identity alias element to a legacy complex type.
    /// Idempotent: an already-listed element is a no-op.
    pub fn add_alias_element(
        &mut self,
        complex: EntityId,
        element: EntityId,
    ) -> Result<(), ModelError> {
        self.require_kind(element, EntityKind::XsdElement)?;

        let entity = self.entity_mut_ok(complex)?;
        let kind = entity.kind();
        let Some(payload) = entity.payload.as_xsd_complex_type_mut() else {
            return Err(ModelError::UnsupportedField {
                entity: complex,
                field: "aliases",
            });
        };
        if payload.aliases.contains(&element) {
            return Ok(());
        }
        payload.aliases.push(element);
        entity.updated_at = Utc::now();

        self.set_alias_backref(element, complex);
        self.emit(ModelEvent::added(
            complex,
            kind,
            EventTarget::AliasTarget,
            EventValue::Entity(element),
        ));
        Ok(())
    }

    /// Remove a non-identity alias element; absent elements are a no-op.
    pub fn remove_alias_element(&mut self, complex: EntityId, element: EntityId) {
        let Some(entity) = self.entity_mut(complex) else {
            return;
        };
        let kind = entity.kind();
        let Some(payload) = entity.payload.as_xsd_complex_type_mut() else {
            return;
        };
        let Some(position) = payload.aliases.iter().position(|e| *e == element) else {
            return;
        };
        payload.aliases.remove(position);
        entity.updated_at = Utc::now();

        self.clear_alias_backref(element, complex);
        self.emit(ModelEvent::removed(
            complex,
            kind,
            EventTarget::AliasTarget,
            EventValue::Entity(element),
        ));
    }

    fn require_kind(&self, id: EntityId, expected: EntityKind) -> Result<(), ModelError> {
        let entity = self.entity_ok(id)?;
        if entity.kind() != expected {
            return Err(ModelError::KindMismatch {
                entity: id,
                expected: expected.label(),
                found: entity.kind(),
            });
        }
        Ok(())
    }

    fn set_alias_backref(&mut self, element: EntityId, complex: EntityId) {
        if let Some(payload) = self
            .entity_mut(element)
            .and_then(|entity| entity.payload.as_xsd_element_mut())
        {
            payload.aliased_type = Some(complex);
        }
    }

    /// Clear an element's back-reference to `complex`, but only when the
    /// complex type no longer references the element from either direction
    /// of the alias relation.
    fn clear_alias_backref(&mut self, element: EntityId, complex: EntityId) {
        let still_referenced = self
            .entity(complex)
            .and_then(|entity| entity.payload.as_xsd_complex_type())
            .is_some_and(|payload| {
                payload.identity_alias == Some(element) || payload.aliases.contains(&element)
            });
        if still_referenced {
            return;
        }
        if let Some(payload) = self
            .entity_mut(element)
            .and_then(|entity| entity.payload.as_xsd_element_mut())
            && payload.aliased_type == Some(complex)
        {
            payload.aliased_type = None;
        }
    }
}
