//! Legacy XML-schema interop entities
//!
//! Imported legacy schemas contribute simple types, complex types and global
//! elements as library members. Simple types carry a lazily inferred facet
//! profile (see [`crate::legacy`]); complex types maintain the alias
//! relation to the global elements that publish them.

use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::entities::QName;
use crate::model::arena::EntityId;

/// Namespace of the XML-schema built-in types.
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Restriction base of a legacy simple type.
#[derive(Debug, Clone)]
pub enum XsdBase {
    /// Restriction of a named type, located through the owning model's
    /// namespace index when the profile is inferred.
    Named(QName),
    /// Restriction of an anonymous inline simple type, owned by this type.
    Inline(EntityId),
}

/// Root primitive profile of a legacy simple type, grouping the XML-schema
/// primitives by the constraining facets that apply to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum XsdFacetProfile {
    String,
    Boolean,
    Decimal,
    Integer,
    Float,
    Double,
    Date,
    Time,
    DateTime,
    Duration,
    Binary,
    AnyUri,
    Qname,
}

impl XsdFacetProfile {
    /// Profile of an XML-schema built-in type, by its declared local name.
    /// Unknown names yield `None` ("unconstrained").
    pub fn from_primitive_name(name: &str) -> Option<Self> {
        let profile = match name {
            "string" | "normalizedString" | "token" | "language" | "Name" | "NCName" | "NMTOKEN"
            | "ID" | "IDREF" | "ENTITY" | "anySimpleType" => XsdFacetProfile::String,
            "boolean" => XsdFacetProfile::Boolean,
            "decimal" => XsdFacetProfile::Decimal,
            "integer" | "int" | "long" | "short" | "byte" | "nonNegativeInteger"
            | "nonPositiveInteger" | "positiveInteger" | "negativeInteger" | "unsignedLong"
            | "unsignedInt" | "unsignedShort" | "unsignedByte" => XsdFacetProfile::Integer,
            "float" => XsdFacetProfile::Float,
            "double" => XsdFacetProfile::Double,
            "date" | "gYear" | "gYearMonth" | "gMonth" | "gMonthDay" | "gDay" => {
                XsdFacetProfile::Date
            }
            "time" => XsdFacetProfile::Time,
            "dateTime" => XsdFacetProfile::DateTime,
            "duration" => XsdFacetProfile::Duration,
            "base64Binary" | "hexBinary" => XsdFacetProfile::Binary,
            "anyURI" => XsdFacetProfile::AnyUri,
            "QName" | "NOTATION" => XsdFacetProfile::Qname,
            _ => return None,
        };
        Some(profile)
    }

    /// Constraining facets applicable to types rooted at this primitive.
    /// Generators consult this list when projecting restrictions.
    pub fn applicable_facets(self) -> &'static [&'static str] {
        match self {
            XsdFacetProfile::String => &[
                "length",
                "minLength",
                "maxLength",
                "pattern",
                "enumeration",
                "whiteSpace",
            ],
            XsdFacetProfile::Boolean => &["pattern", "whiteSpace"],
            XsdFacetProfile::Decimal => &[
                "totalDigits",
                "fractionDigits",
                "pattern",
                "enumeration",
                "minInclusive",
                "maxInclusive",
                "minExclusive",
                "maxExclusive",
            ],
            XsdFacetProfile::Integer => &[
                "totalDigits",
                "pattern",
                "enumeration",
                "minInclusive",
                "maxInclusive",
                "minExclusive",
                "maxExclusive",
            ],
            XsdFacetProfile::Float
            | XsdFacetProfile::Double
            | XsdFacetProfile::Date
            | XsdFacetProfile::Time
            | XsdFacetProfile::DateTime
            | XsdFacetProfile::Duration => &[
                "pattern",
                "enumeration",
                "minInclusive",
                "maxInclusive",
                "minExclusive",
                "maxExclusive",
            ],
            XsdFacetProfile::Binary | XsdFacetProfile::AnyUri | XsdFacetProfile::Qname => {
                &["length", "minLength", "maxLength", "pattern", "enumeration"]
            }
        }
    }
}

/// Imported legacy simple type.
#[derive(Debug, Clone)]
pub struct XsdSimpleType {
    pub name: String,
    /// Namespace override; inherited from the owning library when `None`.
    pub namespace: Option<String>,
    pub base: Option<XsdBase>,
    /// Memoized facet profile; computed at most once per type instance.
    pub(crate) profile: OnceCell<Option<XsdFacetProfile>>,
    pub documentation: Option<EntityId>,
}

impl XsdSimpleType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            base: None,
            profile: OnceCell::new(),
            documentation: None,
        }
    }

    pub fn restricting(name: impl Into<String>, base: QName) -> Self {
        Self {
            base: Some(XsdBase::Named(base)),
            ..Self::new(name)
        }
    }

    pub(crate) fn reset_profile(&mut self) {
        self.profile = OnceCell::new();
    }
}

/// Imported legacy complex type with its element alias relation: at most one
/// identity alias (the element sharing the type's exact name) plus an open
/// list of non-identity aliases. Both directions are non-owning.
#[derive(Debug, Clone)]
pub struct XsdComplexType {
    pub name: String,
    pub identity_alias: Option<EntityId>,
    pub aliases: Vec<EntityId>,
    pub documentation: Option<EntityId>,
}

impl XsdComplexType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identity_alias: None,
            aliases: Vec::new(),
            documentation: None,
        }
    }
}

/// Imported legacy global element.
#[derive(Debug, Clone)]
pub struct XsdElement {
    pub name: String,
    /// Back-reference to the complex type this element aliases, kept
    /// consistent with the type's alias list by the interop resolver.
    pub aliased_type: Option<EntityId>,
    pub documentation: Option<EntityId>,
}

impl XsdElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliased_type: None,
            documentation: None,
        }
    }
}
