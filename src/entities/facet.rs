//! Facets and facet identity
//!
//! A facet is a named, typed subsection of a structured entity. Its
//! canonical local name is derived, not stored: for non-contextual facet
//! types it combines the owner's name with the type's identity token; for
//! contextual types (CUSTOM, QUERY) it additionally depends on a supplied
//! context id and/or label. The derived name doubles as the facet's map key
//! within its owner and as the element name projected into generated
//! schemas.

use serde::{Deserialize, Serialize};

use crate::entities::EntityKind;
use crate::model::arena::EntityId;
use crate::model::children::ChildList;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FacetType {
    Id,
    Summary,
    Detail,
    Custom,
    Simple,
    Query,
    Request,
    Response,
    Notification,
    Action,
    Shared,
    Choice,
}

impl FacetType {
    /// Fixed identity token contributed to the derived facet name.
    pub fn identity_token(self) -> &'static str {
        match self {
            FacetType::Id => "ID",
            FacetType::Summary => "Summary",
            FacetType::Detail => "Detail",
            FacetType::Custom => "",
            FacetType::Simple => "Simple",
            FacetType::Query => "Query",
            FacetType::Request => "RQ",
            FacetType::Response => "RS",
            FacetType::Notification => "Notif",
            FacetType::Action => "Action",
            FacetType::Shared => "Shared",
            FacetType::Choice => "Choice",
        }
    }

    /// Contextual types derive their identity from a context id and/or label.
    pub fn is_contextual(self) -> bool {
        matches!(self, FacetType::Custom | FacetType::Query)
    }

    /// Whether facets of this type contribute actual structural fields.
    /// Generators skip non-declaring facets when they are empty.
    pub fn declares_content(self) -> bool {
        matches!(self, FacetType::Id)
    }
}

/// Facet types admitted on a given owner kind. Advisory: the container layer
/// does not enforce this, validation does.
pub fn allowed_facet_types(owner: EntityKind) -> &'static [FacetType] {
    match owner {
        EntityKind::BusinessObject => &[
            FacetType::Id,
            FacetType::Summary,
            FacetType::Detail,
            FacetType::Custom,
            FacetType::Query,
        ],
        EntityKind::CoreObject => &[FacetType::Summary, FacetType::Detail, FacetType::Simple],
        EntityKind::ChoiceObject => &[FacetType::Shared, FacetType::Choice],
        EntityKind::Operation => &[
            FacetType::Request,
            FacetType::Response,
            FacetType::Notification,
            FacetType::Action,
        ],
        _ => &[],
    }
}

#[derive(Debug, Clone)]
pub struct Facet {
    pub facet_type: Option<FacetType>,
    /// Context id qualifier for contextual facet types.
    pub context: Option<String>,
    /// Label qualifier; takes precedence over the context id.
    pub label: Option<String>,
    pub attributes: ChildList,
    pub properties: ChildList,
    pub indicators: ChildList,
    pub aliases: ChildList,
    pub documentation: Option<EntityId>,
}

impl Facet {
    pub fn new(facet_type: FacetType) -> Self {
        Self {
            facet_type: Some(facet_type),
            context: None,
            label: None,
            attributes: ChildList::new(),
            properties: ChildList::new(),
            indicators: ChildList::new(),
            aliases: ChildList::new(),
            documentation: None,
        }
    }

    /// Facet with no type assigned yet; identity falls back to the
    /// "Unnamed_Facet" marker until one is set.
    pub fn untyped() -> Self {
        Self {
            facet_type: None,
            context: None,
            label: None,
            attributes: ChildList::new(),
            properties: ChildList::new(),
            indicators: ChildList::new(),
            aliases: ChildList::new(),
            documentation: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn declares_content(&self) -> bool {
        self.facet_type.is_some_and(FacetType::declares_content)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn prefixed(owner_name: Option<&str>, token: &str) -> String {
    match owner_name.filter(|n| !n.is_empty()) {
        Some(owner) => format!("{owner}_{token}"),
        None => token.to_string(),
    }
}

/// Canonical local name of a facet, derived from its owner's name, its type
/// and its context/label qualifiers.
///
/// Contextual facets (CUSTOM, QUERY) do not carry the owner-name prefix; a
/// CUSTOM facet without label or context resolves to the empty string and is
/// flagged by downstream validation, not here.
pub fn identity_name(owner_name: Option<&str>, facet: &Facet) -> String {
    match facet.facet_type {
        None => prefixed(owner_name, "Unnamed_Facet"),
        Some(FacetType::Query) => {
            let mut name = FacetType::Query.identity_token().to_string();
            if let Some(label) = non_empty(&facet.label) {
                name.push('_');
                name.push_str(label);
            } else if let Some(context) = non_empty(&facet.context) {
                name.push('_');
                name.push_str(context);
            }
            name
        }
        Some(FacetType::Custom) => non_empty(&facet.label)
            .or_else(|| non_empty(&facet.context))
            .unwrap_or_default()
            .to_string(),
        Some(facet_type) => prefixed(owner_name, facet_type.identity_token()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_contextual_identity_prefixes_owner_name() {
        let facet = Facet::new(FacetType::Summary);
        assert_eq!(identity_name(Some("Hotel"), &facet), "Hotel_Summary");

        let facet = Facet::new(FacetType::Request);
        assert_eq!(identity_name(Some("Checkout"), &facet), "Checkout_RQ");
    }

    #[test]
    fn custom_identity_uses_label_then_context() {
        let facet = Facet::new(FacetType::Custom).with_label("Extended");
        assert_eq!(identity_name(Some("Hotel"), &facet), "Extended");

        let facet = Facet::new(FacetType::Custom).with_context("booking");
        assert_eq!(identity_name(Some("Hotel"), &facet), "booking");

        let facet = Facet::new(FacetType::Custom);
        assert_eq!(identity_name(Some("Hotel"), &facet), "");
    }

    #[test]
    fn query_identity_appends_label_or_context() {
        let facet = Facet::new(FacetType::Query);
        assert_eq!(identity_name(Some("Hotel"), &facet), "Query");

        let facet = Facet::new(FacetType::Query).with_label("ByCity");
        assert_eq!(identity_name(Some("Hotel"), &facet), "Query_ByCity");

        let facet = Facet::new(FacetType::Query).with_context("availability");
        assert_eq!(identity_name(Some("Hotel"), &facet), "Query_availability");

        // Label wins when both qualifiers are present.
        let facet = Facet::new(FacetType::Query)
            .with_label("ByCity")
            .with_context("availability");
        assert_eq!(identity_name(Some("Hotel"), &facet), "Query_ByCity");
    }

    #[test]
    fn untyped_facet_identity_falls_back_to_marker() {
        let facet = Facet::untyped();
        assert_eq!(identity_name(Some("Hotel"), &facet), "Hotel_Unnamed_Facet");
        assert_eq!(identity_name(None, &facet), "Unnamed_Facet");
    }

    #[test]
    fn only_id_facets_declare_content() {
        assert!(FacetType::Id.declares_content());
        for facet_type in [
            FacetType::Summary,
            FacetType::Detail,
            FacetType::Custom,
            FacetType::Simple,
            FacetType::Query,
            FacetType::Request,
            FacetType::Response,
            FacetType::Notification,
            FacetType::Action,
            FacetType::Shared,
            FacetType::Choice,
        ] {
            assert!(!facet_type.declares_content(), "{facet_type:?}");
        }
    }
}
