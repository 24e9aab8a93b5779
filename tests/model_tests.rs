//! End-to-end tests of the model container: ownership wiring, event
//! publication and the library registry, exercised through the public API.

use std::sync::{Arc, Mutex};

use typelib_sdk::{
    Attribute, BusinessObject, ChildSlot, Documentation, EntityKind, EntityPayload, EnumValue,
    Enumeration, EventAction, EventTarget, EventValue, Facet, FacetType, Library, ListenerFilter,
    Model, ModelError, ModelEvent, ModelEventListener,
};

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<ModelEvent>>,
}

impl Recorder {
    fn events(&self) -> Vec<ModelEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ModelEventListener for Recorder {
    fn on_event(&self, event: &ModelEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

fn registered_library(model: &mut Model, name: &str, namespace: &str) -> typelib_sdk::EntityId {
    let id = model.create(EntityPayload::Library(Library::new(name, namespace)));
    model.add_library(id).unwrap();
    id
}

#[test]
fn add_and_remove_child_keep_both_edge_directions_consistent() -> anyhow::Result<()> {
    let mut model = Model::new();
    let lib = registered_library(&mut model, "Hotels", "http://ex/hotels/v1");
    let hotel = model.create(EntityPayload::BusinessObject(BusinessObject::new("Hotel")));

    assert_eq!(model.entity(hotel).unwrap().owner, None);
    model.add_child(lib, ChildSlot::Members, hotel)?;
    assert_eq!(model.entity(hotel).unwrap().owner, Some(lib));
    assert_eq!(model.children(lib, ChildSlot::Members), &[hotel]);

    model.remove_child(lib, ChildSlot::Members, hotel);
    assert_eq!(model.entity(hotel).unwrap().owner, None);
    assert!(model.children(lib, ChildSlot::Members).is_empty());

    // Removing again is a silent no-op.
    model.remove_child(lib, ChildSlot::Members, hotel);
    assert_eq!(model.entity(hotel).unwrap().owner, None);
    Ok(())
}

#[test]
fn insert_child_places_the_child_at_the_requested_index() -> anyhow::Result<()> {
    let mut model = Model::new();
    let lib = registered_library(&mut model, "Hotels", "http://ex/hotels/v1");
    let en = model.create(EntityPayload::Enumeration(Enumeration::new("RateCode", false)));
    model.add_child(lib, ChildSlot::Members, en)?;
    let rack = model.create(EntityPayload::EnumValue(EnumValue::new("RACK")));
    let gov = model.create(EntityPayload::EnumValue(EnumValue::new("GOV")));
    model.add_child(en, ChildSlot::Values, rack)?;
    model.add_child(en, ChildSlot::Values, gov)?;

    let corp = model.create(EntityPayload::EnumValue(EnumValue::new("CORP")));
    model.insert_child(en, ChildSlot::Values, 1, corp)?;

    let values = model.children(en, ChildSlot::Values);
    assert_eq!(values, &[rack, corp, gov]);
    assert_eq!(values.iter().filter(|id| **id == corp).count(), 1);
    assert_eq!(model.entity(corp).unwrap().owner, Some(en));

    // Inserting at the end is equivalent to an append.
    let promo = model.create(EntityPayload::EnumValue(EnumValue::new("PROMO")));
    model.insert_child(en, ChildSlot::Values, 3, promo)?;
    assert_eq!(model.children(en, ChildSlot::Values), &[rack, corp, gov, promo]);
    Ok(())
}

#[test]
fn attach_rejects_wrong_kind_double_ownership_and_bad_index() {
    let mut model = Model::new();
    let lib = registered_library(&mut model, "Hotels", "http://ex/hotels/v1");
    let facet = model.create(EntityPayload::Facet(Facet::new(FacetType::Summary)));
    assert_eq!(
        model.add_child(lib, ChildSlot::Members, facet),
        Err(ModelError::UnsupportedChild {
            slot: ChildSlot::Members,
            kind: EntityKind::Facet,
        })
    );

    let hotel = model.create(EntityPayload::BusinessObject(BusinessObject::new("Hotel")));
    model.add_child(lib, ChildSlot::Members, hotel).unwrap();
    let second = registered_library(&mut model, "Other", "http://ex/other/v1");
    assert_eq!(
        model.add_child(second, ChildSlot::Members, hotel),
        Err(ModelError::AlreadyOwned(hotel))
    );

    let flight = model.create(EntityPayload::BusinessObject(BusinessObject::new("Flight")));
    assert_eq!(
        model.insert_child(lib, ChildSlot::Members, 5, flight),
        Err(ModelError::InvalidIndex {
            slot: ChildSlot::Members,
            index: 5,
            len: 1,
        })
    );
    // A failed attach leaves the child detached.
    assert_eq!(model.entity(flight).unwrap().owner, None);
}

#[test]
fn reorder_operations_respect_boundaries() {
    let mut model = Model::new();
    let lib = registered_library(&mut model, "Hotels", "http://ex/hotels/v1");
    let en = model.create(EntityPayload::Enumeration(Enumeration::new("RateCode", false)));
    model.add_child(lib, ChildSlot::Members, en).unwrap();
    let a = model.create(EntityPayload::EnumValue(EnumValue::new("RACK")));
    let b = model.create(EntityPayload::EnumValue(EnumValue::new("CORP")));
    let c = model.create(EntityPayload::EnumValue(EnumValue::new("GOV")));
    for value in [a, b, c] {
        model.add_child(en, ChildSlot::Values, value).unwrap();
    }

    model.move_child_up(en, ChildSlot::Values, a); // already first
    assert_eq!(model.children(en, ChildSlot::Values), &[a, b, c]);
    model.move_child_down(en, ChildSlot::Values, c); // already last
    assert_eq!(model.children(en, ChildSlot::Values), &[a, b, c]);

    model.move_child_up(en, ChildSlot::Values, c);
    assert_eq!(model.children(en, ChildSlot::Values), &[a, c, b]);

    model.sort_children_by_name(en, ChildSlot::Values);
    assert_eq!(model.children(en, ChildSlot::Values), &[b, c, a]);
}

#[test]
fn child_lookup_by_name_returns_first_match() {
    let mut model = Model::new();
    let lib = registered_library(&mut model, "Hotels", "http://ex/hotels/v1");
    let first = model.create(EntityPayload::BusinessObject(BusinessObject::new("Hotel")));
    let duplicate = model.create(EntityPayload::BusinessObject(BusinessObject::new("Hotel")));
    model.add_child(lib, ChildSlot::Members, first).unwrap();
    model.add_child(lib, ChildSlot::Members, duplicate).unwrap();

    assert_eq!(model.named_member(lib, "Hotel"), Some(first));
    assert_eq!(model.named_member(lib, "Flight"), None);
}

#[test]
fn facet_children_are_addressed_by_derived_identity() {
    let mut model = Model::new();
    let lib = registered_library(&mut model, "Hotels", "http://ex/hotels/v1");
    let hotel = model.create(EntityPayload::BusinessObject(BusinessObject::new("Hotel")));
    model.add_child(lib, ChildSlot::Members, hotel).unwrap();
    let summary = model.create(EntityPayload::Facet(Facet::new(FacetType::Summary)));
    model.add_child(hotel, ChildSlot::Facets, summary).unwrap();

    assert_eq!(
        model.entity_local_name(summary).as_deref(),
        Some("Hotel_Summary")
    );
    assert_eq!(
        model.child_by_name(hotel, ChildSlot::Facets, "Hotel_Summary"),
        Some(summary)
    );

    // Renaming the owner renames the facet with it.
    model.set_name(hotel, "Resort").unwrap();
    assert_eq!(
        model.entity_local_name(summary).as_deref(),
        Some("Resort_Summary")
    );
}

#[test]
fn setter_events_carry_exact_old_and_new_values() {
    let mut model = Model::new();
    let lib = registered_library(&mut model, "Hotels", "http://ex/hotels/v1");
    let hotel = model.create(EntityPayload::BusinessObject(BusinessObject::new("Hotel")));
    model.add_child(lib, ChildSlot::Members, hotel).unwrap();

    let recorder = Arc::new(Recorder::default());
    model.add_listener(ListenerFilter::for_target(EventTarget::Name), recorder.clone());

    model.set_name(hotel, "Resort").unwrap();
    // Same value again: no event.
    model.set_name(hotel, "Resort").unwrap();

    let events = recorder.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, EventAction::Modified);
    assert_eq!(events[0].source, hotel);
    assert_eq!(events[0].old, EventValue::Text("Hotel".to_string()));
    assert_eq!(events[0].new, EventValue::Text("Resort".to_string()));
}

#[test]
fn detached_entities_mutate_silently() {
    let mut model = Model::new();
    let hotel = model.create(EntityPayload::BusinessObject(BusinessObject::new("Hotel")));

    let recorder = Arc::new(Recorder::default());
    model.add_listener(ListenerFilter::any(), recorder.clone());

    model.set_name(hotel, "Resort").unwrap();
    let facet = model.create(EntityPayload::Facet(Facet::new(FacetType::Detail)));
    model.add_child(hotel, ChildSlot::Facets, facet).unwrap();

    assert!(recorder.events().is_empty());
    // The mutations themselves went through.
    assert_eq!(model.entity_local_name(hotel).as_deref(), Some("Resort"));
    assert_eq!(model.children(hotel, ChildSlot::Facets), &[facet]);
}

#[test]
fn library_registration_and_removal_are_reported() {
    let mut model = Model::new();
    let recorder = Arc::new(Recorder::default());
    model.add_listener(ListenerFilter::for_target(EventTarget::Library), recorder.clone());

    let lib = registered_library(&mut model, "Hotels", "http://ex/hotels/v1");
    model.add_library(lib).unwrap(); // idempotent, no second event
    model.remove_library(lib);
    model.remove_library(lib); // no-op

    let actions: Vec<EventAction> = recorder.events().iter().map(|e| e.action).collect();
    assert_eq!(actions, vec![EventAction::Added, EventAction::Removed]);
    assert!(model.libraries().is_empty());
    // Entities survive removal, they are just detached now.
    assert!(model.contains(lib));
    assert!(!model.is_attached(lib));
}

#[test]
fn namespace_index_finds_all_assigned_libraries() {
    let mut model = Model::new();
    let ns = "http://ex/hotels/v1";
    let a = registered_library(&mut model, "HotelsCore", ns);
    let b = registered_library(&mut model, "HotelsExt", ns);
    registered_library(&mut model, "Flights", "http://ex/flights/v1");

    assert_eq!(model.libraries_for_namespace(ns), vec![a, b]);
    assert_eq!(model.library_by_name("HotelsExt"), Some(b));
    assert_eq!(model.library_by_name("Trains"), None);
}

#[test]
fn release_reclaims_detached_subtrees_only() {
    let mut model = Model::new();
    let lib = registered_library(&mut model, "Hotels", "http://ex/hotels/v1");
    let hotel = model.create(EntityPayload::BusinessObject(BusinessObject::new("Hotel")));
    model.add_child(lib, ChildSlot::Members, hotel).unwrap();
    let facet = model.create(EntityPayload::Facet(Facet::new(FacetType::Summary)));
    model.add_child(hotel, ChildSlot::Facets, facet).unwrap();
    let attr = model.create(EntityPayload::Attribute(Attribute::new("name")));
    model.add_child(facet, ChildSlot::Attributes, attr).unwrap();

    assert_eq!(model.release(hotel), Err(ModelError::EntityAttached(hotel)));

    model.remove_child(lib, ChildSlot::Members, hotel);
    model.release(hotel).unwrap();
    assert!(!model.contains(hotel));
    assert!(!model.contains(facet));
    assert!(!model.contains(attr));
    // Releasing a now-stale handle is a no-op.
    model.release(hotel).unwrap();
}

#[test]
fn documentation_reassignment_fires_lifecycle_events() {
    let mut model = Model::new();
    let lib = registered_library(&mut model, "Hotels", "http://ex/hotels/v1");
    let hotel = model.create(EntityPayload::BusinessObject(BusinessObject::new("Hotel")));
    model.add_child(lib, ChildSlot::Members, hotel).unwrap();

    let recorder = Arc::new(Recorder::default());
    model.add_listener(
        ListenerFilter::for_target(EventTarget::Documentation),
        recorder.clone(),
    );

    let first = model.create(EntityPayload::Documentation(Documentation::new("v1")));
    let second = model.create(EntityPayload::Documentation(Documentation::new("v2")));

    model.set_documentation(hotel, Some(first)).unwrap();
    model.set_documentation(hotel, Some(first)).unwrap(); // no-op
    model.set_documentation(hotel, Some(second)).unwrap();
    model.set_documentation(hotel, None).unwrap();

    let actions: Vec<EventAction> = recorder.events().iter().map(|e| e.action).collect();
    assert_eq!(
        actions,
        vec![EventAction::Added, EventAction::Modified, EventAction::Removed]
    );
    // Replaced documentation is detached, not destroyed.
    assert_eq!(model.entity(first).unwrap().owner, None);
    assert_eq!(model.entity(second).unwrap().owner, None);
}

#[test]
fn core_objects_come_with_their_role_enumeration() {
    let mut model = Model::new();
    let core = model.create(EntityPayload::CoreObject(typelib_sdk::CoreObject::new(
        "Airport",
    )));
    let roles = model
        .entity(core)
        .unwrap()
        .payload
        .as_core_object()
        .unwrap()
        .role_enumeration
        .expect("role enumeration created with the core object");
    assert_eq!(model.entity(roles).unwrap().owner, Some(core));
    assert_eq!(model.entity(roles).unwrap().kind(), EntityKind::RoleEnumeration);
}
