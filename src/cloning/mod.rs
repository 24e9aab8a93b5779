//! Reference cloner
//!
//! Deep-copies a top-level member together with its owned subtree. The clone
//! is created detached (no owner) and carries fresh handles and timestamps
//! throughout; nothing in the copy points back into the source subtree.
//!
//! Non-owning references are the interesting part. Without a naming context
//! they are copied verbatim. With a naming context (a library), every
//! reference is first reduced to its qualified name and then re-resolved
//! against the context's visible namespaces, so a member cloned into a new
//! library version picks up that version's types instead of dragging the old
//! ones along. Names that do not resolve stay unresolved rather than failing
//! the clone.

use thiserror::Error;

use crate::entities::{
    ChildSlot, EntityKind, EntityPayload, EntityRef, QName, XsdBase,
};
use crate::model::arena::EntityId;
use crate::model::children::ChildList;
use crate::model::Model;

/// Error type for clone operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CloneError {
    #[error("unknown or stale entity handle {0}")]
    UnknownEntity(EntityId),
    #[error("{0:?} entities cannot be cloned directly")]
    NotCloneable(EntityKind),
    #[error("naming context {0} is not a registered library")]
    InvalidContext(EntityId),
}

/// Member kinds a clone may start from. Nested kinds are cloned as part of
/// their owner's subtree, never directly.
const CLONEABLE: [EntityKind; 5] = [
    EntityKind::BusinessObject,
    EntityKind::CoreObject,
    EntityKind::ChoiceObject,
    EntityKind::Operation,
    EntityKind::Enumeration,
];

impl Model {
    /// Deep-copy `source` and its owned subtree into a new detached entity.
    ///
    /// With `naming_context` set, non-owning references in the copy are
    /// re-resolved against that library's visible namespaces (own namespace
    /// first, then imports, in order).
    pub fn clone_entity(
        &mut self,
        source: EntityId,
        naming_context: Option<EntityId>,
    ) -> Result<EntityId, CloneError> {
        let kind = self
            .entity(source)
            .ok_or(CloneError::UnknownEntity(source))?
            .kind();
        if !CLONEABLE.contains(&kind) {
            return Err(CloneError::NotCloneable(kind));
        }
        if let Some(context) = naming_context
            && self.libraries_for_context(context).is_none()
        {
            return Err(CloneError::InvalidContext(context));
        }
        self.clone_rec(source, None, naming_context)
    }

    fn clone_rec(
        &mut self,
        source: EntityId,
        owner: Option<EntityId>,
        context: Option<EntityId>,
    ) -> Result<EntityId, CloneError> {
        let template = self
            .entity(source)
            .ok_or(CloneError::UnknownEntity(source))?
            .clone();

        // Snapshot the owned structure before the payload moves into the
        // arena; each piece is re-cloned below with the copy as owner.
        let mut slot_children: Vec<(ChildSlot, Vec<EntityId>)> = Vec::new();
        for slot in ChildSlot::ALL {
            if let Some(list) = template.child_list(slot) {
                if !list.is_empty() {
                    slot_children.push((slot, list.ids().to_vec()));
                }
            }
        }
        let documentation = template.documentation();
        let extension = template.extension();
        let role_enumeration = template
            .payload
            .as_core_object()
            .and_then(|core| core.role_enumeration);
        let simple_base = template
            .payload
            .as_xsd_simple_type()
            .map(|simple| simple.base.clone());

        // Non-owning references are rewritten against the naming context
        // before insertion; everything else in the payload copies verbatim.
        let type_ref = match &template.payload {
            EntityPayload::Attribute(attr) => Some(self.rewritten_ref(&attr.type_ref, context)),
            EntityPayload::Property(prop) => Some(self.rewritten_ref(&prop.type_ref, context)),
            _ => None,
        };
        let extends = template
            .payload
            .as_extension()
            .map(|extension| self.rewritten_ref(&extension.extends, context));

        let id = self.insert_raw(owner, template.payload);

        if let Some(entity) = self.entity_mut(id) {
            for slot in ChildSlot::ALL {
                if let Some(list) = entity.child_list_mut(slot) {
                    *list = ChildList::new();
                }
            }
            if let Some(slot) = entity.documentation_mut() {
                *slot = None;
            }
            if let Some(slot) = entity.extension_mut() {
                *slot = None;
            }
            match &mut entity.payload {
                EntityPayload::CoreObject(core) => core.role_enumeration = None,
                EntityPayload::XsdSimpleType(simple) => {
                    simple.base = None;
                    simple.reset_profile();
                }
                // Alias links point into the source graph; the interop
                // resolver rebuilds them for the copy when asked to.
                EntityPayload::XsdComplexType(complex) => {
                    complex.identity_alias = None;
                    complex.aliases.clear();
                }
                EntityPayload::XsdElement(element) => element.aliased_type = None,
                EntityPayload::Attribute(attr) => {
                    if let Some(type_ref) = type_ref {
                        attr.type_ref = type_ref;
                    }
                }
                EntityPayload::Property(prop) => {
                    if let Some(type_ref) = type_ref {
                        prop.type_ref = type_ref;
                    }
                }
                EntityPayload::Extension(extension) => {
                    if let Some(extends) = extends {
                        extension.extends = extends;
                    }
                }
                _ => {}
            }
        }

        for (slot, children) in slot_children {
            for child in children {
                let cloned = self.clone_rec(child, Some(id), context)?;
                if let Some(list) = self
                    .entity_mut(id)
                    .and_then(|entity| entity.child_list_mut(slot))
                {
                    list.push(cloned);
                }
            }
        }
        if let Some(doc) = documentation {
            let cloned = self.clone_rec(doc, Some(id), context)?;
            if let Some(slot) = self.entity_mut(id).and_then(|entity| entity.documentation_mut()) {
                *slot = Some(cloned);
            }
        }
        if let Some(ext) = extension {
            let cloned = self.clone_rec(ext, Some(id), context)?;
            if let Some(slot) = self.entity_mut(id).and_then(|entity| entity.extension_mut()) {
                *slot = Some(cloned);
            }
        }
        if let Some(roles) = role_enumeration {
            let cloned = self.clone_rec(roles, Some(id), context)?;
            if let Some(core) = self
                .entity_mut(id)
                .and_then(|entity| entity.payload.as_core_object_mut())
            {
                core.role_enumeration = Some(cloned);
            }
        }
        match simple_base.flatten() {
            Some(XsdBase::Named(qname)) => {
                if let Some(simple) = self
                    .entity_mut(id)
                    .and_then(|entity| entity.payload.as_xsd_simple_type_mut())
                {
                    simple.base = Some(XsdBase::Named(qname));
                }
            }
            Some(XsdBase::Inline(inner)) => {
                let cloned = self.clone_rec(inner, Some(id), context)?;
                if let Some(simple) = self
                    .entity_mut(id)
                    .and_then(|entity| entity.payload.as_xsd_simple_type_mut())
                {
                    simple.base = Some(XsdBase::Inline(cloned));
                }
            }
            None => {}
        }

        Ok(id)
    }

    /// Copy of `reference`, re-resolved against `context` when one is given.
    /// The reference is reduced to its qualified name first so the old
    /// resolution never leaks through; an unresolvable name keeps the qname
    /// and drops the handle.
    fn rewritten_ref(&self, reference: &EntityRef, context: Option<EntityId>) -> EntityRef {
        let Some(context) = context else {
            return reference.clone();
        };
        let qname = reference
            .qname
            .clone()
            .or_else(|| reference.resolved.and_then(|target| self.qname_of(target)));
        let Some(qname) = qname else {
            return EntityRef::default();
        };
        match self.resolve_in_context(context, &qname) {
            Some(resolved) => EntityRef {
                qname: self.qname_of(resolved).or(Some(qname)),
                resolved: Some(resolved),
            },
            None => EntityRef {
                qname: Some(qname),
                resolved: None,
            },
        }
    }

    /// Resolve a local name against a context library: its own namespace
    /// first, then each imported namespace, in declaration order. Within a
    /// namespace, libraries are consulted in registration order.
    ///
    /// Matching is by local name only. The reference's own namespace is not
    /// required to match any visible one: a clone destined for a new library
    /// version must rebind names carried from the old versioned namespace to
    /// the context's types.
    fn resolve_in_context(&self, context: EntityId, qname: &QName) -> Option<EntityId> {
        // The context library's own members win over siblings sharing its
        // namespace.
        if let Some(found) = self.named_member(context, &qname.local_name) {
            return Some(found);
        }
        let visible = self.libraries_for_context(context)?;
        for namespace in visible {
            for library in self.libraries_for_namespace(&namespace) {
                if library == context {
                    continue;
                }
                if let Some(found) = self.named_member(library, &qname.local_name) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Visible namespaces of a registered context library; `None` when the
    /// handle is not a registered library.
    fn libraries_for_context(&self, context: EntityId) -> Option<Vec<String>> {
        if !self.libraries().contains(&context) {
            return None;
        }
        let library = self.entity(context)?.payload.as_library()?;
        Some(library.visible_namespaces().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        Attribute, BusinessObject, Documentation, Enumeration, Facet, FacetType, Library,
    };

    fn library(model: &mut Model, name: &str, namespace: &str) -> EntityId {
        let id = model.create(EntityPayload::Library(Library::new(name, namespace)));
        model.add_library(id).unwrap();
        id
    }

    #[test]
    fn clone_is_detached_with_fresh_handles() {
        let mut model = Model::new();
        let lib = library(&mut model, "Hotels", "http://ex/hotels/v1");
        let hotel = model.create(EntityPayload::BusinessObject(BusinessObject::new("Hotel")));
        model.add_child(lib, ChildSlot::Members, hotel).unwrap();
        let facet = model.create(EntityPayload::Facet(Facet::new(FacetType::Summary)));
        model.add_child(hotel, ChildSlot::Facets, facet).unwrap();
        let attr = model.create(EntityPayload::Attribute(Attribute::new("name")));
        model.add_child(facet, ChildSlot::Attributes, attr).unwrap();

        let copy = model.clone_entity(hotel, None).unwrap();
        assert_ne!(copy, hotel);
        assert_eq!(model.entity(copy).unwrap().owner, None);

        let copied_facets = model.children(copy, ChildSlot::Facets);
        assert_eq!(copied_facets.len(), 1);
        assert_ne!(copied_facets[0], facet);
        let copied_attrs = model.children(copied_facets[0], ChildSlot::Attributes);
        assert_eq!(copied_attrs.len(), 1);
        assert_eq!(
            model.entity_local_name(copied_attrs[0]).as_deref(),
            Some("name")
        );
        // Source subtree untouched.
        assert_eq!(model.entity(facet).unwrap().owner, Some(hotel));
    }

    #[test]
    fn clone_without_context_keeps_references_verbatim() {
        let mut model = Model::new();
        let lib = library(&mut model, "Hotels", "http://ex/hotels/v1");
        let money = model.create(EntityPayload::Enumeration(Enumeration::new("Money", false)));
        model.add_child(lib, ChildSlot::Members, money).unwrap();
        let hotel = model.create(EntityPayload::BusinessObject(BusinessObject::new("Hotel")));
        model.add_child(lib, ChildSlot::Members, hotel).unwrap();
        let facet = model.create(EntityPayload::Facet(Facet::new(FacetType::Detail)));
        model.add_child(hotel, ChildSlot::Facets, facet).unwrap();
        let rate = model.create(EntityPayload::Attribute(Attribute::new("rate")));
        model.add_child(facet, ChildSlot::Attributes, rate).unwrap();
        model.set_type_ref(rate, EntityRef::to(money)).unwrap();

        let copy = model.clone_entity(hotel, None).unwrap();
        let copied_facet = model.children(copy, ChildSlot::Facets)[0];
        let copied_attr = model.children(copied_facet, ChildSlot::Attributes)[0];
        let type_ref = &model
            .entity(copied_attr)
            .unwrap()
            .payload
            .as_attribute()
            .unwrap()
            .type_ref;
        assert_eq!(type_ref.resolved, Some(money));
    }

    #[test]
    fn clone_with_context_re_resolves_references() {
        let mut model = Model::new();
        let v1 = library(&mut model, "HotelsV1", "http://ex/hotels/v1");
        let v2 = library(&mut model, "HotelsV2", "http://ex/hotels/v2");
        let money_v1 = model.create(EntityPayload::Enumeration(Enumeration::new("Money", false)));
        model.add_child(v1, ChildSlot::Members, money_v1).unwrap();
        let money_v2 = model.create(EntityPayload::Enumeration(Enumeration::new("Money", false)));
        model.add_child(v2, ChildSlot::Members, money_v2).unwrap();

        let hotel = model.create(EntityPayload::BusinessObject(BusinessObject::new("Hotel")));
        model.add_child(v1, ChildSlot::Members, hotel).unwrap();
        let facet = model.create(EntityPayload::Facet(Facet::new(FacetType::Detail)));
        model.add_child(hotel, ChildSlot::Facets, facet).unwrap();
        let rate = model.create(EntityPayload::Attribute(Attribute::new("rate")));
        model.add_child(facet, ChildSlot::Attributes, rate).unwrap();
        model.set_type_ref(rate, EntityRef::to(money_v1)).unwrap();

        let copy = model.clone_entity(hotel, Some(v2)).unwrap();
        let copied_facet = model.children(copy, ChildSlot::Facets)[0];
        let copied_attr = model.children(copied_facet, ChildSlot::Attributes)[0];
        let type_ref = &model
            .entity(copied_attr)
            .unwrap()
            .payload
            .as_attribute()
            .unwrap()
            .type_ref;
        assert_eq!(type_ref.resolved, Some(money_v2));
    }

    #[test]
    fn context_library_wins_over_siblings_in_the_same_namespace() {
        let mut model = Model::new();
        let ns = "http://ex/hotels/v1";
        let first = library(&mut model, "HotelsCore", ns);
        let second = library(&mut model, "HotelsExt", ns);
        let money_first = model.create(EntityPayload::Enumeration(Enumeration::new("Money", false)));
        model.add_child(first, ChildSlot::Members, money_first).unwrap();
        let money_second = model.create(EntityPayload::Enumeration(Enumeration::new("Money", false)));
        model.add_child(second, ChildSlot::Members, money_second).unwrap();

        let hotel = model.create(EntityPayload::BusinessObject(BusinessObject::new("Hotel")));
        model.add_child(first, ChildSlot::Members, hotel).unwrap();
        let facet = model.create(EntityPayload::Facet(Facet::new(FacetType::Detail)));
        model.add_child(hotel, ChildSlot::Facets, facet).unwrap();
        let rate = model.create(EntityPayload::Attribute(Attribute::new("rate")));
        model.add_child(facet, ChildSlot::Attributes, rate).unwrap();
        model.set_type_ref(rate, EntityRef::to(money_first)).unwrap();

        let copy = model.clone_entity(hotel, Some(second)).unwrap();
        let copied_facet = model.children(copy, ChildSlot::Facets)[0];
        let copied_attr = model.children(copied_facet, ChildSlot::Attributes)[0];
        let type_ref = &model
            .entity(copied_attr)
            .unwrap()
            .payload
            .as_attribute()
            .unwrap()
            .type_ref;
        assert_eq!(type_ref.resolved, Some(money_second));
    }

    #[test]
    fn unresolvable_reference_keeps_name_and_drops_handle() {
        let mut model = Model::new();
        let v1 = library(&mut model, "HotelsV1", "http://ex/hotels/v1");
        let empty = library(&mut model, "Empty", "http://ex/other/v1");
        let money = model.create(EntityPayload::Enumeration(Enumeration::new("Money", false)));
        model.add_child(v1, ChildSlot::Members, money).unwrap();
        let hotel = model.create(EntityPayload::BusinessObject(BusinessObject::new("Hotel")));
        model.add_child(v1, ChildSlot::Members, hotel).unwrap();
        let facet = model.create(EntityPayload::Facet(Facet::new(FacetType::Detail)));
        model.add_child(hotel, ChildSlot::Facets, facet).unwrap();
        let rate = model.create(EntityPayload::Attribute(Attribute::new("rate")));
        model.add_child(facet, ChildSlot::Attributes, rate).unwrap();
        model.set_type_ref(rate, EntityRef::to(money)).unwrap();

        let copy = model.clone_entity(hotel, Some(empty)).unwrap();
        let copied_facet = model.children(copy, ChildSlot::Facets)[0];
        let copied_attr = model.children(copied_facet, ChildSlot::Attributes)[0];
        let type_ref = &model
            .entity(copied_attr)
            .unwrap()
            .payload
            .as_attribute()
            .unwrap()
            .type_ref;
        assert_eq!(type_ref.resolved, None);
        assert_eq!(
            type_ref.qname.as_ref().map(|q| q.local_name.as_str()),
            Some("Money")
        );
    }

    #[test]
    fn clone_copies_documentation_subtree() {
        let mut model = Model::new();
        let lib = library(&mut model, "Hotels", "http://ex/hotels/v1");
        let en = model.create(EntityPayload::Enumeration(Enumeration::new("RateCode", false)));
        model.add_child(lib, ChildSlot::Members, en).unwrap();
        let doc = model.create(EntityPayload::Documentation(Documentation::new("rate codes")));
        model.set_documentation(en, Some(doc)).unwrap();

        let copy = model.clone_entity(en, None).unwrap();
        let copied_doc = model.entity(copy).unwrap().documentation().unwrap();
        assert_ne!(copied_doc, doc);
        assert_eq!(
            model
                .entity(copied_doc)
                .unwrap()
                .payload
                .as_documentation()
                .unwrap()
                .description,
            "rate codes"
        );
    }

    #[test]
    fn only_member_kinds_clone_directly() {
        let mut model = Model::new();
        let facet = model.create(EntityPayload::Facet(Facet::new(FacetType::Summary)));
        assert_eq!(
            model.clone_entity(facet, None),
            Err(CloneError::NotCloneable(EntityKind::Facet))
        );
    }

    #[test]
    fn unregistered_context_is_rejected() {
        let mut model = Model::new();
        let hotel = model.create(EntityPayload::BusinessObject(BusinessObject::new("Hotel")));
        let loose = model.create(EntityPayload::Library(Library::new("L", "http://ex/l")));
        assert_eq!(
            model.clone_entity(hotel, Some(loose)),
            Err(CloneError::InvalidContext(loose))
        );
    }
}
