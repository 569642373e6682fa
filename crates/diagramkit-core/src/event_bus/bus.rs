//! Event Bus implementation.
//!
//! Cloning an `EventBus` yields another handle onto the same subscribers and
//! history.

use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use uuid::Uuid;

use super::events::{EditorEvent, EventCategory};

/// Events kept by a bus created with [`EventBus::with_history`].
pub const HISTORY_CAPACITY: usize = 1000;

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Which events a subscriber receives
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    #[default]
    All,
    /// Events of any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    pub fn matches(&self, event: &EditorEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

type EventHandler = Box<dyn Fn(&EditorEvent) + Send + Sync>;

/// Synchronous notification bus between the editing core and its host
#[derive(Clone, Default)]
pub struct EventBus {
    handlers: Arc<RwLock<HashMap<SubscriptionId, (EventFilter, EventHandler)>>>,
    /// Present only on buses that record history.
    history: Option<Arc<RwLock<VecDeque<EditorEvent>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bus that also records the last [`HISTORY_CAPACITY`] events.
    pub fn with_history() -> Self {
        Self {
            history: Some(Arc::new(RwLock::new(VecDeque::new()))),
            ..Self::default()
        }
    }

    /// Publish an event to all matching subscribers
    ///
    /// Handlers run synchronously on the calling thread. Returns the number
    /// of handlers that received the event.
    pub fn publish(&self, event: EditorEvent) -> usize {
        if let Some(history) = &self.history {
            let mut history = history.write();
            history.push_back(event.clone());
            if history.len() > HISTORY_CAPACITY {
                history.pop_front();
            }
        }

        tracing::trace!("Publishing {}", event.description());

        let handlers = self.handlers.read();
        let mut delivered = 0;
        for (filter, handler) in handlers.values() {
            if filter.matches(&event) {
                handler(&event);
                delivered += 1;
            }
        }
        delivered
    }

    /// Subscribe to events with a synchronous handler
    ///
    /// The handler must not subscribe or unsubscribe from inside the call.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(&EditorEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers.write().insert(id, (filter, Box::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.handlers.write().remove(&id).is_some();
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Recorded events, oldest first. Empty without history.
    pub fn history(&self) -> Vec<EditorEvent> {
        self.history
            .as_ref()
            .map(|history| history.read().iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of recorded events of the given category
    pub fn history_count(&self, category: EventCategory) -> usize {
        self.history.as_ref().map_or(0, |history| {
            history
                .read()
                .iter()
                .filter(|e| e.category() == category)
                .count()
        })
    }

    pub fn clear_history(&self) {
        if let Some(history) = &self.history {
            history.write().clear();
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.handlers.read().len())
            .field("records_history", &self.history.is_some())
            .finish()
    }
}
