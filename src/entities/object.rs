//! Structured object entities
//!
//! Top-level member kinds of a library (business objects, core objects,
//! choice objects, operations, enumerations) together with their nested
//! helpers (enum values, role enumerations, roles, folders).

use crate::model::arena::EntityId;
use crate::model::children::ChildList;

/// Business-object-like type: the richest facet owner (ID, summary, detail,
/// custom and query facets).
#[derive(Debug, Clone)]
pub struct BusinessObject {
    pub name: String,
    pub facets: ChildList,
    pub aliases: ChildList,
    pub equivalents: ChildList,
    pub extension: Option<EntityId>,
    pub documentation: Option<EntityId>,
}

impl BusinessObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            facets: ChildList::new(),
            aliases: ChildList::new(),
            equivalents: ChildList::new(),
            extension: None,
            documentation: None,
        }
    }
}

/// Core object: facet owner that additionally publishes a role enumeration.
#[derive(Debug, Clone)]
pub struct CoreObject {
    pub name: String,
    pub facets: ChildList,
    pub aliases: ChildList,
    pub equivalents: ChildList,
    /// Owned role enumeration; created together with the core object.
    pub role_enumeration: Option<EntityId>,
    pub extension: Option<EntityId>,
    pub documentation: Option<EntityId>,
}

impl CoreObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            facets: ChildList::new(),
            aliases: ChildList::new(),
            equivalents: ChildList::new(),
            role_enumeration: None,
            extension: None,
            documentation: None,
        }
    }
}

/// Choice object: owner of one shared facet plus any number of choice facets.
#[derive(Debug, Clone)]
pub struct ChoiceObject {
    pub name: String,
    pub facets: ChildList,
    pub aliases: ChildList,
    pub equivalents: ChildList,
    pub extension: Option<EntityId>,
    pub documentation: Option<EntityId>,
}

impl ChoiceObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            facets: ChildList::new(),
            aliases: ChildList::new(),
            equivalents: ChildList::new(),
            extension: None,
            documentation: None,
        }
    }
}

/// Message-style member owning request/response/notification facets.
#[derive(Debug, Clone)]
pub struct Operation {
    pub name: String,
    pub facets: ChildList,
    pub equivalents: ChildList,
    pub extension: Option<EntityId>,
    pub documentation: Option<EntityId>,
}

impl Operation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            facets: ChildList::new(),
            equivalents: ChildList::new(),
            extension: None,
            documentation: None,
        }
    }
}

/// Simple enumeration of literal values. Open enumerations admit
/// out-of-band values ("Other_" semantics); closed ones do not.
#[derive(Debug, Clone)]
pub struct Enumeration {
    pub name: String,
    pub open: bool,
    pub values: ChildList,
    pub extension: Option<EntityId>,
    pub documentation: Option<EntityId>,
}

impl Enumeration {
    pub fn new(name: impl Into<String>, open: bool) -> Self {
        Self {
            name: name.into(),
            open,
            values: ChildList::new(),
            extension: None,
            documentation: None,
        }
    }
}

/// One literal of an enumeration.
#[derive(Debug, Clone)]
pub struct EnumValue {
    pub literal: String,
    pub equivalents: ChildList,
    pub documentation: Option<EntityId>,
}

impl EnumValue {
    pub fn new(literal: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
            equivalents: ChildList::new(),
            documentation: None,
        }
    }
}

/// Role list owned by a core object.
#[derive(Debug, Clone, Default)]
pub struct RoleEnumeration {
    pub roles: ChildList,
}

impl RoleEnumeration {
    pub fn new() -> Self {
        Self::default()
    }
}

/// One role of a core object's role enumeration.
#[derive(Debug, Clone)]
pub struct Role {
    pub name: String,
    pub documentation: Option<EntityId>,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documentation: None,
        }
    }
}

/// Organizational sub-folder of a library.
#[derive(Debug, Clone)]
pub struct Folder {
    pub name: String,
}

impl Folder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
