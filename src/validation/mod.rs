//! Validation identity
//!
//! A stable, human-readable path for reporting findings against an entity:
//! the local names along its owner chain from the library down, joined with
//! `/`. Kinds without a name of their own (documentation, extensions, role
//! enumerations) contribute their kind label instead, so every entity gets a
//! usable identity. Detached entities are marked as such rather than
//! producing a bare fragment that looks rooted.

use crate::model::Model;
use crate::model::arena::EntityId;

/// Marker prefixed to identities of entities not reachable from any
/// registered library.
pub const UNATTACHED_MARKER: &str = "<unattached>";

/// Validation identity of an entity: owner-chain path of local names.
/// Unknown handles yield the bare marker.
pub fn validation_identity(model: &Model, id: EntityId) -> String {
    let mut segments: Vec<String> = Vec::new();
    let mut current = Some(id);
    while let Some(entity_id) = current {
        let Some(entity) = model.entity(entity_id) else {
            break;
        };
        let segment = model
            .entity_local_name(entity_id)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| entity.kind().label().to_string());
        segments.push(segment);
        current = entity.owner;
    }
    segments.reverse();

    let path = segments.join("/");
    if model.is_attached(id) {
        path
    } else if path.is_empty() {
        UNATTACHED_MARKER.to_string()
    } else {
        format!("{UNATTACHED_MARKER}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        Attribute, BusinessObject, ChildSlot, EntityPayload, Facet, FacetType, Library,
    };

    #[test]
    fn attached_identity_walks_the_owner_chain() {
        let mut model = Model::new();
        let lib = model.create(EntityPayload::Library(Library::new(
            "Hotels",
            "http://ex/hotels/v1",
        )));
        model.add_library(lib).unwrap();
        let hotel = model.create(EntityPayload::BusinessObject(BusinessObject::new("Hotel")));
        model.add_child(lib, ChildSlot::Members, hotel).unwrap();
        let facet = model.create(EntityPayload::Facet(Facet::new(FacetType::Summary)));
        model.add_child(hotel, ChildSlot::Facets, facet).unwrap();
        let attr = model.create(EntityPayload::Attribute(Attribute::new("chainCode")));
        model.add_child(facet, ChildSlot::Attributes, attr).unwrap();

        assert_eq!(
            validation_identity(&model, attr),
            "Hotels/Hotel/Hotel_Summary/chainCode"
        );
    }

    #[test]
    fn detached_identity_is_marked() {
        let mut model = Model::new();
        let hotel = model.create(EntityPayload::BusinessObject(BusinessObject::new("Hotel")));
        assert_eq!(validation_identity(&model, hotel), "<unattached>/Hotel");

        let facet = model.create(EntityPayload::Facet(Facet::new(FacetType::Detail)));
        model.add_child(hotel, ChildSlot::Facets, facet).unwrap();
        assert_eq!(
            validation_identity(&model, facet),
            "<unattached>/Hotel/Hotel_Detail"
        );
    }

    #[test]
    fn unnamed_kinds_fall_back_to_their_label() {
        let mut model = Model::new();
        let lib = model.create(EntityPayload::Library(Library::new(
            "Hotels",
            "http://ex/hotels/v1",
        )));
        model.add_library(lib).unwrap();
        let hotel = model.create(EntityPayload::BusinessObject(BusinessObject::new("Hotel")));
        model.add_child(lib, ChildSlot::Members, hotel).unwrap();
        let doc = model.create(EntityPayload::Documentation(
            crate::entities::Documentation::new("a hotel"),
        ));
        model.set_documentation(hotel, Some(doc)).unwrap();

        assert_eq!(
            validation_identity(&model, doc),
            "Hotels/Hotel/Documentation"
        );
    }
}
