//! # Event Bus Module
//!
//! Provides the editor event bus for decoupled notification between the
//! editing core and the hosting UI.
//!
//! ## Overview
//!
//! - Publishers emit typed events without knowing subscribers
//! - Subscribers filter by category and receive events synchronously,
//!   on the publishing (UI) thread
//! - Optional bounded history for inspection and tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use diagramkit_core::event_bus::{EditorEvent, EventBus, EventCategory, EventFilter};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Selection]),
//!     |event| println!("{}", event.description()),
//! );
//! bus.publish(EditorEvent::SelectionChanged { count: 1 });
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
