//! Model event bus
//!
//! Decouples entity mutation from interested observers (validators, editors,
//! persistence). Every structural edit publishes a [`ModelEvent`] carrying
//! the mutated entity, the affected field and the exact old/new values.
//! Dispatch is synchronous and depth-first on the caller's thread; the
//! listener list is snapshotted before dispatch so re-entrant registration
//! or publication cannot invalidate iteration, and a panicking listener is
//! isolated and reported without aborting delivery to the rest.
//!
//! Publication from a detached entity never reaches the bus: the model's
//! mutation layer resolves the owning library first and silently drops the
//! event when there is none.

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::entities::EntityKind;
use crate::model::arena::EntityId;

/// What happened to the affected field or relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventAction {
    Added,
    Removed,
    Modified,
}

/// Which field or ownership relation of the source entity was affected.
/// The taxonomy is extensible; downstream crates match non-exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum EventTarget {
    Library,
    Member,
    Folder,
    Facet,
    Attribute,
    Property,
    Indicator,
    Alias,
    Equivalent,
    Example,
    EnumValue,
    Role,
    Documentation,
    Extension,
    ExtendsEntity,
    TypeAssignment,
    Name,
    Namespace,
    Version,
    VersionScheme,
    Status,
    Comments,
    Include,
    Import,
    Context,
    Label,
    FacetType,
    Literal,
    Description,
    ExampleValue,
    Mandatory,
    Repeat,
    PublishAsElement,
    OpenFlag,
    IdentityAlias,
    AliasTarget,
}

/// Old/new value carried by an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventValue {
    None,
    Text(String),
    Flag(bool),
    Int(i64),
    Entity(EntityId),
}

impl EventValue {
    pub fn text(value: impl Into<String>) -> Self {
        EventValue::Text(value.into())
    }

    pub fn entity(id: Option<EntityId>) -> Self {
        match id {
            Some(id) => EventValue::Entity(id),
            None => EventValue::None,
        }
    }
}

/// One structural-change notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelEvent {
    pub action: EventAction,
    pub target: EventTarget,
    /// Entity the event is scoped to: the owner for child add/remove, the
    /// mutated entity itself for field modifications.
    pub source: EntityId,
    pub source_kind: EntityKind,
    pub old: EventValue,
    pub new: EventValue,
}

impl ModelEvent {
    pub fn added(
        source: EntityId,
        source_kind: EntityKind,
        target: EventTarget,
        new: EventValue,
    ) -> Self {
        Self {
            action: EventAction::Added,
            target,
            source,
            source_kind,
            old: EventValue::None,
            new,
        }
    }

    pub fn removed(
        source: EntityId,
        source_kind: EntityKind,
        target: EventTarget,
        old: EventValue,
    ) -> Self {
        Self {
            action: EventAction::Removed,
            target,
            source,
            source_kind,
            old,
            new: EventValue::None,
        }
    }

    pub fn modified(
        source: EntityId,
        source_kind: EntityKind,
        target: EventTarget,
        old: EventValue,
        new: EventValue,
    ) -> Self {
        Self {
            action: EventAction::Modified,
            target,
            source,
            source_kind,
            old,
            new,
        }
    }
}

/// Observer of model events. Implementations must not assume any particular
/// dispatch order relative to other listeners.
pub trait ModelEventListener {
    fn on_event(&self, event: &ModelEvent);
}

/// Registration filter. Unset dimensions match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerFilter {
    pub action: Option<EventAction>,
    pub target: Option<EventTarget>,
    pub source_kind: Option<EntityKind>,
}

impl ListenerFilter {
    /// Matches every event.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn for_target(target: EventTarget) -> Self {
        Self {
            target: Some(target),
            ..Self::default()
        }
    }

    pub fn for_source_kind(kind: EntityKind) -> Self {
        Self {
            source_kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn matches(&self, event: &ModelEvent) -> bool {
        self.action.is_none_or(|action| action == event.action)
            && self.target.is_none_or(|target| target == event.target)
            && self
                .source_kind
                .is_none_or(|kind| kind == event.source_kind)
    }
}

/// Handle for removing a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerToken(u64);

struct Registration {
    token: ListenerToken,
    filter: ListenerFilter,
    listener: Arc<dyn ModelEventListener + Send + Sync>,
}

/// Per-model notification channel. No ambient global state: every model
/// constructs its own bus.
#[derive(Default)]
pub struct EventBus {
    registrations: RefCell<Vec<Registration>>,
    next_token: Cell<u64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener_count(&self) -> usize {
        self.registrations.borrow().len()
    }

    pub fn add_listener(
        &self,
        filter: ListenerFilter,
        listener: Arc<dyn ModelEventListener + Send + Sync>,
    ) -> ListenerToken {
        let token = ListenerToken(self.next_token.get());
        self.next_token.set(token.0 + 1);
        self.registrations.borrow_mut().push(Registration {
            token,
            filter,
            listener,
        });
        token
    }

    /// Remove a listener; returns whether it was still registered.
    pub fn remove_listener(&self, token: ListenerToken) -> bool {
        let mut registrations = self.registrations.borrow_mut();
        let before = registrations.len();
        registrations.retain(|registration| registration.token != token);
        registrations.len() != before
    }

    /// Deliver an event to every matching listener. A panicking listener is
    /// reported and skipped; delivery to the remaining listeners continues.
    pub fn publish(&self, event: &ModelEvent) {
        // Snapshot under a short borrow so listeners may re-enter the bus.
        let matching: Vec<Arc<dyn ModelEventListener + Send + Sync>> = self
            .registrations
            .borrow()
            .iter()
            .filter(|registration| registration.filter.matches(event))
            .map(|registration| Arc::clone(&registration.listener))
            .collect();

        for listener in matching {
            if catch_unwind(AssertUnwindSafe(|| listener.on_event(event))).is_err() {
                tracing::error!(
                    source = %event.source,
                    action = ?event.action,
                    target = ?event.target,
                    "model event listener panicked; continuing delivery"
                );
            }
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<ModelEvent>>,
    }

    impl ModelEventListener for Recorder {
        fn on_event(&self, event: &ModelEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    struct Panicker;

    impl ModelEventListener for Panicker {
        fn on_event(&self, _event: &ModelEvent) {
            panic!("listener failure");
        }
    }

    fn sample_event() -> ModelEvent {
        let mut model = crate::model::Model::new();
        let id = model.create(crate::entities::EntityPayload::Folder(
            crate::entities::Folder::new("f"),
        ));
        ModelEvent::modified(
            id,
            EntityKind::Folder,
            EventTarget::Name,
            EventValue::text("a"),
            EventValue::text("b"),
        )
    }

    #[test]
    fn filters_limit_delivery() {
        let bus = EventBus::new();
        let all = Arc::new(Recorder::default());
        let named = Arc::new(Recorder::default());
        bus.add_listener(ListenerFilter::any(), all.clone());
        bus.add_listener(ListenerFilter::for_target(EventTarget::Version), named.clone());

        let event = sample_event();
        bus.publish(&event);

        assert_eq!(all.events.lock().unwrap().len(), 1);
        assert!(named.events.lock().unwrap().is_empty());
    }

    #[test]
    fn removed_listener_no_longer_receives() {
        let bus = EventBus::new();
        let recorder = Arc::new(Recorder::default());
        let token = bus.add_listener(ListenerFilter::any(), recorder.clone());
        assert!(bus.remove_listener(token));
        assert!(!bus.remove_listener(token));

        bus.publish(&sample_event());
        assert!(recorder.events.lock().unwrap().is_empty());
    }

    #[test]
    fn events_serialize_with_the_wire_taxonomy() {
        let event = sample_event();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["action"], "MODIFIED");
        assert_eq!(json["target"], "NAME");
        assert_eq!(json["old"]["text"], "a");
        assert_eq!(json["new"]["text"], "b");
    }

    #[test]
    fn panicking_listener_does_not_abort_delivery() {
        let bus = EventBus::new();
        let recorder = Arc::new(Recorder::default());
        bus.add_listener(ListenerFilter::any(), Arc::new(Panicker));
        bus.add_listener(ListenerFilter::any(), recorder.clone());

        bus.publish(&sample_event());
        assert_eq!(recorder.events.lock().unwrap().len(), 1);
    }
}
