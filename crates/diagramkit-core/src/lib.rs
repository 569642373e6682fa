//! # DiagramKit Core
//!
//! Core types, traits, and utilities for DiagramKit.
//! Provides the identifiers and geometry shared by every layer, the
//! design-graph collaborator contract consumed by the editor, the editor
//! event bus, and the configuration layer.

pub mod config;
pub mod constants;
pub mod design;
pub mod error;
pub mod event_bus;
pub mod geometry;
pub mod id;

pub use config::{
    ConnectorSettings, EditorConfig, HitTestSettings, LabelSettings, ToolSettings, ViewSettings,
};

pub use design::{
    AcceptOutcome, Attributes, ConnectionRule, DesignController, DesignObject, DesignSnapshot,
    EdgeType, Issue, IssueSeverity, MemoryDesign, Metamodel, NodeType, ObjectKind, Transaction,
};

pub use error::{ConfigError, DesignError, Error, Result, ToolError};

pub use event_bus::{
    Diagnostic, EditorEvent, EventBus, EventCategory, EventFilter, SubscriptionId,
    HISTORY_CAPACITY,
};

pub use geometry::{Point, Rect, Vector};
pub use id::{EntityId, ObjectId};
