//! Field-level entities
//!
//! Attributes, properties and indicators are the member fields owned by
//! facets; aliases, extensions, documentation, equivalents and examples are
//! the annotation entities shared by many owner kinds.

use crate::entities::EntityRef;
use crate::model::arena::EntityId;
use crate::model::children::ChildList;

/// Simple-typed attribute of a facet.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    /// Non-owning reference to the attribute's type.
    pub type_ref: EntityRef,
    pub mandatory: bool,
    pub equivalents: ChildList,
    pub examples: ChildList,
    pub documentation: Option<EntityId>,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_ref: EntityRef::default(),
            mandatory: false,
            equivalents: ChildList::new(),
            examples: ChildList::new(),
            documentation: None,
        }
    }
}

/// Element property of a facet.
#[derive(Debug, Clone)]
pub struct Property {
    pub name: String,
    pub type_ref: EntityRef,
    pub mandatory: bool,
    /// Maximum repeat count; zero means unbounded.
    pub repeat: i32,
    pub equivalents: ChildList,
    pub examples: ChildList,
    pub documentation: Option<EntityId>,
}

impl Property {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_ref: EntityRef::default(),
            mandatory: false,
            repeat: 0,
            equivalents: ChildList::new(),
            examples: ChildList::new(),
            documentation: None,
        }
    }
}

/// Boolean indicator field of a facet.
#[derive(Debug, Clone)]
pub struct Indicator {
    pub name: String,
    /// Publish as an element rather than an attribute.
    pub publish_as_element: bool,
    pub equivalents: ChildList,
    pub documentation: Option<EntityId>,
}

impl Indicator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            publish_as_element: false,
            equivalents: ChildList::new(),
            documentation: None,
        }
    }
}

/// Alternate name published for an owner entity.
#[derive(Debug, Clone)]
pub struct Alias {
    pub name: String,
}

impl Alias {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Single-valued child declaring that the owner extends another entity.
/// The extended entity is a non-owning, name-resolved reference.
#[derive(Debug, Clone, Default)]
pub struct Extension {
    pub extends: EntityRef,
}

impl Extension {
    pub fn new(extends: EntityRef) -> Self {
        Self { extends }
    }
}

/// Free-form documentation block.
#[derive(Debug, Clone, Default)]
pub struct Documentation {
    pub description: String,
    pub deprecations: Vec<String>,
    pub more_info: Vec<String>,
}

impl Documentation {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            deprecations: Vec::new(),
            more_info: Vec::new(),
        }
    }
}

/// Context-qualified equivalent description (mapping to an external
/// vocabulary identified by the context id).
#[derive(Debug, Clone)]
pub struct Equivalent {
    pub context: String,
    pub description: String,
}

impl Equivalent {
    pub fn new(context: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            description: description.into(),
        }
    }
}

/// Context-qualified example value.
#[derive(Debug, Clone)]
pub struct Example {
    pub context: String,
    pub value: String,
}

impl Example {
    pub fn new(context: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            value: value.into(),
        }
    }
}
