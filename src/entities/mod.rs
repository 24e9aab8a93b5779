//! Entity graph
//!
//! The polymorphic hierarchy of named entities that make up a type library:
//! libraries, objects, facets, attributes, properties, indicators, aliases,
//! extensions, equivalents, examples, roles and documentation, plus the
//! legacy XML-schema interop kinds.
//!
//! Entities are polymorphic over an open set of orthogonal capabilities
//! (facet owner, attribute owner, documentation owner, ...) rather than an
//! inheritance chain: a concrete kind implements several capabilities
//! simultaneously and capability support is queried explicitly via
//! [`Entity::supports`] and [`Entity::child_list`].

pub mod facet;
pub mod fields;
pub mod legacy;
pub mod library;
pub mod object;

pub use facet::{Facet, FacetType, allowed_facet_types};
pub use fields::{
    Alias, Attribute, Documentation, Equivalent, Example, Extension, Indicator, Property,
};
pub use legacy::{XSD_NAMESPACE, XsdBase, XsdComplexType, XsdElement, XsdFacetProfile, XsdSimpleType};
pub use library::{Library, LibraryStatus};
pub use object::{
    BusinessObject, ChoiceObject, CoreObject, EnumValue, Enumeration, Folder, Operation, Role,
    RoleEnumeration,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::arena::EntityId;
use crate::model::children::ChildList;

/// Namespace-qualified name of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QName {
    pub namespace: String,
    pub local_name: String,
}

impl QName {
    pub fn new(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local_name: local_name.into(),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.local_name)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.local_name)
        }
    }
}

/// Non-owning, name-resolved reference to another entity.
///
/// A reference may carry only a qualified name (unresolved until linking
/// completes), only a resolved handle, or both. Cloning with a naming
/// context re-resolves the name against the target context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityRef {
    pub qname: Option<QName>,
    pub resolved: Option<EntityId>,
}

impl EntityRef {
    /// Reference by name, to be resolved later.
    pub fn named(qname: QName) -> Self {
        Self {
            qname: Some(qname),
            resolved: None,
        }
    }

    /// Reference to an already-resolved entity.
    pub fn to(id: EntityId) -> Self {
        Self {
            qname: None,
            resolved: Some(id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.qname.is_none() && self.resolved.is_none()
    }
}

/// Concrete entity kind. Used for capability queries, event reporting and
/// the version comparator's same-kind precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Library,
    Folder,
    BusinessObject,
    CoreObject,
    ChoiceObject,
    Operation,
    Enumeration,
    EnumValue,
    RoleEnumeration,
    Role,
    Facet,
    Attribute,
    Property,
    Indicator,
    Alias,
    Extension,
    Documentation,
    Equivalent,
    Example,
    XsdSimpleType,
    XsdComplexType,
    XsdElement,
}

impl EntityKind {
    /// Display label used in validation identities and error messages.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Library => "Library",
            EntityKind::Folder => "Folder",
            EntityKind::BusinessObject => "BusinessObject",
            EntityKind::CoreObject => "CoreObject",
            EntityKind::ChoiceObject => "ChoiceObject",
            EntityKind::Operation => "Operation",
            EntityKind::Enumeration => "Enumeration",
            EntityKind::EnumValue => "EnumValue",
            EntityKind::RoleEnumeration => "RoleEnumeration",
            EntityKind::Role => "Role",
            EntityKind::Facet => "Facet",
            EntityKind::Attribute => "Attribute",
            EntityKind::Property => "Property",
            EntityKind::Indicator => "Indicator",
            EntityKind::Alias => "Alias",
            EntityKind::Extension => "Extension",
            EntityKind::Documentation => "Documentation",
            EntityKind::Equivalent => "Equivalent",
            EntityKind::Example => "Example",
            EntityKind::XsdSimpleType => "XsdSimpleType",
            EntityKind::XsdComplexType => "XsdComplexType",
            EntityKind::XsdElement => "XsdElement",
        }
    }

    /// Whether this kind may appear as a top-level library member.
    pub fn is_member(self) -> bool {
        matches!(
            self,
            EntityKind::BusinessObject
                | EntityKind::CoreObject
                | EntityKind::ChoiceObject
                | EntityKind::Operation
                | EntityKind::Enumeration
                | EntityKind::XsdSimpleType
                | EntityKind::XsdComplexType
                | EntityKind::XsdElement
        )
    }
}

/// Orthogonal capabilities an entity kind may implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    FacetOwner,
    AttributeOwner,
    PropertyOwner,
    IndicatorOwner,
    AliasOwner,
    ExtensionOwner,
    EquivalentOwner,
    ExampleOwner,
    DocumentationOwner,
    ContextReferrer,
    MemberFieldOwner,
}

/// Identifies one ownership relation of an owner entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChildSlot {
    Members,
    Folders,
    Facets,
    Attributes,
    Properties,
    Indicators,
    Aliases,
    Equivalents,
    Examples,
    Values,
    Roles,
}

impl ChildSlot {
    pub const ALL: [ChildSlot; 11] = [
        ChildSlot::Members,
        ChildSlot::Folders,
        ChildSlot::Facets,
        ChildSlot::Attributes,
        ChildSlot::Properties,
        ChildSlot::Indicators,
        ChildSlot::Aliases,
        ChildSlot::Equivalents,
        ChildSlot::Examples,
        ChildSlot::Values,
        ChildSlot::Roles,
    ];

    /// Whether children of `kind` belong in this slot.
    pub fn accepts(self, kind: EntityKind) -> bool {
        match self {
            ChildSlot::Members => kind.is_member(),
            ChildSlot::Folders => kind == EntityKind::Folder,
            ChildSlot::Facets => kind == EntityKind::Facet,
            ChildSlot::Attributes => kind == EntityKind::Attribute,
            ChildSlot::Properties => kind == EntityKind::Property,
            ChildSlot::Indicators => kind == EntityKind::Indicator,
            ChildSlot::Aliases => kind == EntityKind::Alias,
            ChildSlot::Equivalents => kind == EntityKind::Equivalent,
            ChildSlot::Examples => kind == EntityKind::Example,
            ChildSlot::Values => kind == EntityKind::EnumValue,
            ChildSlot::Roles => kind == EntityKind::Role,
        }
    }
}

/// One entity in the model arena: common header plus kind-specific payload.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    /// Owning entity, maintained exclusively by the model's mutation layer.
    /// `None` while the entity is detached.
    pub owner: Option<EntityId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub payload: EntityPayload,
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        self.payload.kind()
    }

    /// Capability query: does this entity implement `capability`?
    pub fn supports(&self, capability: Capability) -> bool {
        let kind = self.kind();
        match capability {
            Capability::FacetOwner => matches!(
                kind,
                EntityKind::BusinessObject
                    | EntityKind::CoreObject
                    | EntityKind::ChoiceObject
                    | EntityKind::Operation
            ),
            Capability::AttributeOwner
            | Capability::PropertyOwner
            | Capability::IndicatorOwner
            | Capability::MemberFieldOwner => kind == EntityKind::Facet,
            Capability::AliasOwner => matches!(
                kind,
                EntityKind::BusinessObject
                    | EntityKind::CoreObject
                    | EntityKind::ChoiceObject
                    | EntityKind::Facet
            ),
            Capability::ExtensionOwner => matches!(
                kind,
                EntityKind::BusinessObject
                    | EntityKind::CoreObject
                    | EntityKind::ChoiceObject
                    | EntityKind::Operation
                    | EntityKind::Enumeration
            ),
            Capability::EquivalentOwner => matches!(
                kind,
                EntityKind::BusinessObject
                    | EntityKind::CoreObject
                    | EntityKind::ChoiceObject
                    | EntityKind::Operation
                    | EntityKind::Attribute
                    | EntityKind::Property
                    | EntityKind::Indicator
                    | EntityKind::EnumValue
            ),
            Capability::ExampleOwner => {
                matches!(kind, EntityKind::Attribute | EntityKind::Property)
            }
            Capability::DocumentationOwner => matches!(
                kind,
                EntityKind::BusinessObject
                    | EntityKind::CoreObject
                    | EntityKind::ChoiceObject
                    | EntityKind::Operation
                    | EntityKind::Enumeration
                    | EntityKind::EnumValue
                    | EntityKind::Facet
                    | EntityKind::Attribute
                    | EntityKind::Property
                    | EntityKind::Indicator
                    | EntityKind::Role
                    | EntityKind::XsdSimpleType
                    | EntityKind::XsdComplexType
                    | EntityKind::XsdElement
            ),
            Capability::ContextReferrer => matches!(
                kind,
                EntityKind::Facet | EntityKind::Equivalent | EntityKind::Example
            ),
        }
    }

    /// Ordered child list for `slot`, if this kind owns one.
    pub fn child_list(&self, slot: ChildSlot) -> Option<&ChildList> {
        self.payload.child_list(slot)
    }

    pub(crate) fn child_list_mut(&mut self, slot: ChildSlot) -> Option<&mut ChildList> {
        self.payload.child_list_mut(slot)
    }

    /// Single-valued owned documentation, if this kind carries one.
    pub fn documentation(&self) -> Option<EntityId> {
        self.payload.documentation_slot().copied().flatten()
    }

    pub(crate) fn documentation_mut(&mut self) -> Option<&mut Option<EntityId>> {
        self.payload.documentation_slot_mut()
    }

    /// Single-valued owned extension, if this kind carries one.
    pub fn extension(&self) -> Option<EntityId> {
        self.payload.extension_slot().copied().flatten()
    }

    pub(crate) fn extension_mut(&mut self) -> Option<&mut Option<EntityId>> {
        self.payload.extension_slot_mut()
    }
}

/// Kind-specific entity state.
#[derive(Debug, Clone)]
pub enum EntityPayload {
    Library(Library),
    Folder(Folder),
    BusinessObject(BusinessObject),
    CoreObject(CoreObject),
    ChoiceObject(ChoiceObject),
    Operation(Operation),
    Enumeration(Enumeration),
    EnumValue(EnumValue),
    RoleEnumeration(RoleEnumeration),
    Role(Role),
    Facet(Facet),
    Attribute(Attribute),
    Property(Property),
    Indicator(Indicator),
    Alias(Alias),
    Extension(Extension),
    Documentation(Documentation),
    Equivalent(Equivalent),
    Example(Example),
    XsdSimpleType(XsdSimpleType),
    XsdComplexType(XsdComplexType),
    XsdElement(XsdElement),
}

macro_rules! payload_accessors {
    ($(($variant:ident, $ty:ty, $as_ref:ident, $as_mut:ident)),+ $(,)?) => {
        impl EntityPayload {
            pub fn kind(&self) -> EntityKind {
                match self {
                    $(EntityPayload::$variant(_) => EntityKind::$variant,)+
                }
            }

            $(
                pub fn $as_ref(&self) -> Option<&$ty> {
                    match self {
                        EntityPayload::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                pub fn $as_mut(&mut self) -> Option<&mut $ty> {
                    match self {
                        EntityPayload::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            )+
        }
    };
}

payload_accessors!(
    (Library, Library, as_library, as_library_mut),
    (Folder, Folder, as_folder, as_folder_mut),
    (BusinessObject, BusinessObject, as_business_object, as_business_object_mut),
    (CoreObject, CoreObject, as_core_object, as_core_object_mut),
    (ChoiceObject, ChoiceObject, as_choice_object, as_choice_object_mut),
    (Operation, Operation, as_operation, as_operation_mut),
    (Enumeration, Enumeration, as_enumeration, as_enumeration_mut),
    (EnumValue, EnumValue, as_enum_value, as_enum_value_mut),
    (RoleEnumeration, RoleEnumeration, as_role_enumeration, as_role_enumeration_mut),
    (Role, Role, as_role, as_role_mut),
    (Facet, Facet, as_facet, as_facet_mut),
    (Attribute, Attribute, as_attribute, as_attribute_mut),
    (Property, Property, as_property, as_property_mut),
    (Indicator, Indicator, as_indicator, as_indicator_mut),
    (Alias, Alias, as_alias, as_alias_mut),
    (Extension, Extension, as_extension, as_extension_mut),
    (Documentation, Documentation, as_documentation, as_documentation_mut),
    (Equivalent, Equivalent, as_equivalent, as_equivalent_mut),
    (Example, Example, as_example, as_example_mut),
    (XsdSimpleType, XsdSimpleType, as_xsd_simple_type, as_xsd_simple_type_mut),
    (XsdComplexType, XsdComplexType, as_xsd_complex_type, as_xsd_complex_type_mut),
    (XsdElement, XsdElement, as_xsd_element, as_xsd_element_mut),
);

impl EntityPayload {
    pub(crate) fn child_list(&self, slot: ChildSlot) -> Option<&ChildList> {
        match (self, slot) {
            (EntityPayload::Library(lib), ChildSlot::Members) => Some(&lib.members),
            (EntityPayload::Library(lib), ChildSlot::Folders) => Some(&lib.folders),
            (EntityPayload::BusinessObject(bo), ChildSlot::Facets) => Some(&bo.facets),
            (EntityPayload::BusinessObject(bo), ChildSlot::Aliases) => Some(&bo.aliases),
            (EntityPayload::BusinessObject(bo), ChildSlot::Equivalents) => Some(&bo.equivalents),
            (EntityPayload::CoreObject(co), ChildSlot::Facets) => Some(&co.facets),
            (EntityPayload::CoreObject(co), ChildSlot::Aliases) => Some(&co.aliases),
            (EntityPayload::CoreObject(co), ChildSlot::Equivalents) => Some(&co.equivalents),
            (EntityPayload::ChoiceObject(ch), ChildSlot::Facets) => Some(&ch.facets),
            (EntityPayload::ChoiceObject(ch), ChildSlot::Aliases) => Some(&ch.aliases),
            (EntityPayload::ChoiceObject(ch), ChildSlot::Equivalents) => Some(&ch.equivalents),
            (EntityPayload::Operation(op), ChildSlot::Facets) => Some(&op.facets),
            (EntityPayload::Operation(op), ChildSlot::Equivalents) => Some(&op.equivalents),
            (EntityPayload::Enumeration(en), ChildSlot::Values) => Some(&en.values),
            (EntityPayload::EnumValue(ev), ChildSlot::Equivalents) => Some(&ev.equivalents),
            (EntityPayload::RoleEnumeration(re), ChildSlot::Roles) => Some(&re.roles),
            (EntityPayload::Facet(facet), ChildSlot::Attributes) => Some(&facet.attributes),
            (EntityPayload::Facet(facet), ChildSlot::Properties) => Some(&facet.properties),
            (EntityPayload::Facet(facet), ChildSlot::Indicators) => Some(&facet.indicators),
            (EntityPayload::Facet(facet), ChildSlot::Aliases) => Some(&facet.aliases),
            (EntityPayload::Attribute(attr), ChildSlot::Equivalents) => Some(&attr.equivalents),
            (EntityPayload::Attribute(attr), ChildSlot::Examples) => Some(&attr.examples),
            (EntityPayload::Property(prop), ChildSlot::Equivalents) => Some(&prop.equivalents),
            (EntityPayload::Property(prop), ChildSlot::Examples) => Some(&prop.examples),
            (EntityPayload::Indicator(ind), ChildSlot::Equivalents) => Some(&ind.equivalents),
            _ => None,
        }
    }

    pub(crate) fn child_list_mut(&mut self, slot: ChildSlot) -> Option<&mut ChildList> {
        match (self, slot) {
            (EntityPayload::Library(lib), ChildSlot::Members) => Some(&mut lib.members),
            (EntityPayload::Library(lib), ChildSlot::Folders) => Some(&mut lib.folders),
            (EntityPayload::BusinessObject(bo), ChildSlot::Facets) => Some(&mut bo.facets),
            (EntityPayload::BusinessObject(bo), ChildSlot::Aliases) => Some(&mut bo.aliases),
            (EntityPayload::BusinessObject(bo), ChildSlot::Equivalents) => {
                Some(&mut bo.equivalents)
            }
            (EntityPayload::CoreObject(co), ChildSlot::Facets) => Some(&mut co.facets),
            (EntityPayload::CoreObject(co), ChildSlot::Aliases) => Some(&mut co.aliases),
            (EntityPayload::CoreObject(co), ChildSlot::Equivalents) => Some(&mut co.equivalents),
            (EntityPayload::ChoiceObject(ch), ChildSlot::Facets) => Some(&mut ch.facets),
            (EntityPayload::ChoiceObject(ch), ChildSlot::Aliases) => Some(&mut ch.aliases),
            (EntityPayload::ChoiceObject(ch), ChildSlot::Equivalents) => {
                Some(&mut ch.equivalents)
            }
            (EntityPayload::Operation(op), ChildSlot::Facets) => Some(&mut op.facets),
            (EntityPayload::Operation(op), ChildSlot::Equivalents) => Some(&mut op.equivalents),
            (EntityPayload::Enumeration(en), ChildSlot::Values) => Some(&mut en.values),
            (EntityPayload::EnumValue(ev), ChildSlot::Equivalents) => Some(&mut ev.equivalents),
            (EntityPayload::RoleEnumeration(re), ChildSlot::Roles) => Some(&mut re.roles),
            (EntityPayload::Facet(facet), ChildSlot::Attributes) => Some(&mut facet.attributes),
            (EntityPayload::Facet(facet), ChildSlot::Properties) => Some(&mut facet.properties),
            (EntityPayload::Facet(facet), ChildSlot::Indicators) => Some(&mut facet.indicators),
            (EntityPayload::Facet(facet), ChildSlot::Aliases) => Some(&mut facet.aliases),
            (EntityPayload::Attribute(attr), ChildSlot::Equivalents) => {
                Some(&mut attr.equivalents)
            }
            (EntityPayload::Attribute(attr), ChildSlot::Examples) => Some(&mut attr.examples),
            (EntityPayload::Property(prop), ChildSlot::Equivalents) => {
                Some(&mut prop.equivalents)
            }
            (EntityPayload::Property(prop), ChildSlot::Examples) => Some(&mut prop.examples),
            (EntityPayload::Indicator(ind), ChildSlot::Equivalents) => Some(&mut ind.equivalents),
            _ => None,
        }
    }

    fn documentation_slot(&self) -> Option<&Option<EntityId>> {
        match self {
            EntityPayload::BusinessObject(bo) => Some(&bo.documentation),
            EntityPayload::CoreObject(co) => Some(&co.documentation),
            EntityPayload::ChoiceObject(ch) => Some(&ch.documentation),
            EntityPayload::Operation(op) => Some(&op.documentation),
            EntityPayload::Enumeration(en) => Some(&en.documentation),
            EntityPayload::EnumValue(ev) => Some(&ev.documentation),
            EntityPayload::Facet(facet) => Some(&facet.documentation),
            EntityPayload::Attribute(attr) => Some(&attr.documentation),
            EntityPayload::Property(prop) => Some(&prop.documentation),
            EntityPayload::Indicator(ind) => Some(&ind.documentation),
            EntityPayload::Role(role) => Some(&role.documentation),
            EntityPayload::XsdSimpleType(st) => Some(&st.documentation),
            EntityPayload::XsdComplexType(ct) => Some(&ct.documentation),
            EntityPayload::XsdElement(el) => Some(&el.documentation),
            _ => None,
        }
    }

    fn documentation_slot_mut(&mut self) -> Option<&mut Option<EntityId>> {
        match self {
            EntityPayload::BusinessObject(bo) => Some(&mut bo.documentation),
            EntityPayload::CoreObject(co) => Some(&mut co.documentation),
            EntityPayload::ChoiceObject(ch) => Some(&mut ch.documentation),
            EntityPayload::Operation(op) => Some(&mut op.documentation),
            EntityPayload::Enumeration(en) => Some(&mut en.documentation),
            EntityPayload::EnumValue(ev) => Some(&mut ev.documentation),
            EntityPayload::Facet(facet) => Some(&mut facet.documentation),
            EntityPayload::Attribute(attr) => Some(&mut attr.documentation),
            EntityPayload::Property(prop) => Some(&mut prop.documentation),
            EntityPayload::Indicator(ind) => Some(&mut ind.documentation),
            EntityPayload::Role(role) => Some(&mut role.documentation),
            EntityPayload::XsdSimpleType(st) => Some(&mut st.documentation),
            EntityPayload::XsdComplexType(ct) => Some(&mut ct.documentation),
            EntityPayload::XsdElement(el) => Some(&mut el.documentation),
            _ => None,
        }
    }

    fn extension_slot(&self) -> Option<&Option<EntityId>> {
        match self {
            EntityPayload::BusinessObject(bo) => Some(&bo.extension),
            EntityPayload::CoreObject(co) => Some(&co.extension),
            EntityPayload::ChoiceObject(ch) => Some(&ch.extension),
            EntityPayload::Operation(op) => Some(&op.extension),
            EntityPayload::Enumeration(en) => Some(&en.extension),
            _ => None,
        }
    }

    fn extension_slot_mut(&mut self) -> Option<&mut Option<EntityId>> {
        match self {
            EntityPayload::BusinessObject(bo) => Some(&mut bo.extension),
            EntityPayload::CoreObject(co) => Some(&mut co.extension),
            EntityPayload::ChoiceObject(ch) => Some(&mut ch.extension),
            EntityPayload::Operation(op) => Some(&mut op.extension),
            EntityPayload::Enumeration(en) => Some(&mut en.extension),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;

    #[test]
    fn capability_queries_distinguish_kinds() {
        let mut model = Model::new();
        let hotel = model.create(EntityPayload::BusinessObject(BusinessObject::new("Hotel")));
        let en = model.create(EntityPayload::Enumeration(Enumeration::new("RateCode", false)));
        let facet = model.create(EntityPayload::Facet(Facet::new(FacetType::Summary)));

        let entity = |id| model.entity(id).unwrap();
        assert!(entity(hotel).supports(Capability::FacetOwner));
        assert!(entity(hotel).supports(Capability::DocumentationOwner));
        assert!(!entity(hotel).supports(Capability::AttributeOwner));

        assert!(!entity(en).supports(Capability::FacetOwner));
        assert!(entity(en).supports(Capability::ExtensionOwner));

        assert!(entity(facet).supports(Capability::AttributeOwner));
        assert!(entity(facet).supports(Capability::ContextReferrer));
        assert!(!entity(facet).supports(Capability::ExtensionOwner));
    }

    #[test]
    fn slots_accept_matching_kinds_only() {
        assert!(ChildSlot::Members.accepts(EntityKind::BusinessObject));
        assert!(ChildSlot::Members.accepts(EntityKind::XsdSimpleType));
        assert!(!ChildSlot::Members.accepts(EntityKind::Facet));
        assert!(ChildSlot::Values.accepts(EntityKind::EnumValue));
        assert!(!ChildSlot::Values.accepts(EntityKind::Role));
    }

    #[test]
    fn advisory_facet_types_follow_owner_kind() {
        assert!(allowed_facet_types(EntityKind::BusinessObject).contains(&FacetType::Id));
        assert!(allowed_facet_types(EntityKind::Operation).contains(&FacetType::Request));
        assert!(allowed_facet_types(EntityKind::Enumeration).is_empty());
    }

    #[test]
    fn qname_display_wraps_namespace() {
        let qname = QName::new("http://ex/hotels/v1", "Hotel");
        assert_eq!(qname.to_string(), "{http://ex/hotels/v1}Hotel");
        assert_eq!(QName::new("", "Hotel").to_string(), "Hotel");
    }
}
