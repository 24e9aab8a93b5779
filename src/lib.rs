//! In-memory model for schema-definition libraries.
//!
//! A [`Model`] owns an arena of entities forming the ownership graph of one
//! or more type libraries: namespaced containers of business objects, core
//! objects, choice objects, operations and enumerations, plus the legacy
//! XML-schema kinds imported from older schemas. All mutation flows through
//! the model, which keeps both directions of every ownership edge consistent
//! and publishes a [`events::ModelEvent`] for each structural change.
//!
//! On top of the container sit the derived services: facet identity naming,
//! deep cloning with reference re-resolution ([`Model::clone_entity`]),
//! cross-library version comparison ([`version::is_later_version`]),
//! facet-profile inference for legacy simple types
//! ([`legacy::facet_profile`]) and validation identities
//! ([`validation::validation_identity`]).

pub mod cloning;
pub mod entities;
pub mod events;
pub mod legacy;
pub mod model;
pub mod validation;
pub mod version;

pub use cloning::CloneError;
pub use entities::{
    Alias, Attribute, BusinessObject, Capability, ChildSlot, ChoiceObject, CoreObject,
    Documentation, Entity, EntityKind, EntityPayload, EntityRef, EnumValue, Enumeration,
    Equivalent, Example, Extension, Facet, FacetType, Folder, Indicator, Library, LibraryStatus,
    Operation, Property, QName, Role, RoleEnumeration, XSD_NAMESPACE, XsdBase, XsdComplexType,
    XsdElement, XsdFacetProfile, XsdSimpleType, allowed_facet_types,
};
pub use events::{
    EventAction, EventTarget, EventValue, ListenerFilter, ListenerToken, ModelEvent,
    ModelEventListener,
};
pub use legacy::facet_profile;
pub use model::arena::EntityId;
pub use model::children::ChildList;
pub use model::{Model, ModelError};
pub use validation::validation_identity;
pub use version::{compare_versions, is_later_library_version, is_later_version};
