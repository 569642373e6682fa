//! Event type definitions for the editor event bus.

use serde::{Deserialize, Serialize};

use crate::geometry::Vector;

/// Root event enum for all editor notifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditorEvent {
    /// A transaction was committed, or history moved (undo/redo)
    DesignChanged {
        /// Design version after the change.
        version: u64,
    },
    /// A selection-mutating operation was called
    SelectionChanged {
        /// Number of selected entities after the operation.
        count: usize,
    },
    /// The active tool was switched
    ToolChanged {
        /// Name of the outgoing tool, if any.
        previous: Option<String>,
        /// Name of the incoming tool.
        current: String,
    },
    /// Zoom or pan offset changed
    CanvasViewChanged {
        /// Zoom level after the change.
        zoom: f64,
        /// Pan offset (screen units) after the change.
        offset: Vector,
    },
    /// Integration problem reported by the editing core
    Diagnostic(Diagnostic),
}

impl EditorEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            EditorEvent::DesignChanged { .. } => EventCategory::Design,
            EditorEvent::SelectionChanged { .. } => EventCategory::Selection,
            EditorEvent::ToolChanged { .. } => EventCategory::Tool,
            EditorEvent::CanvasViewChanged { .. } => EventCategory::View,
            EditorEvent::Diagnostic(_) => EventCategory::Diagnostic,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            EditorEvent::DesignChanged { version } => format!("Design changed (v{})", version),
            EditorEvent::SelectionChanged { count } => format!("Selection changed ({})", count),
            EditorEvent::ToolChanged { previous, current } => match previous {
                Some(previous) => format!("Tool changed: {} -> {}", previous, current),
                None => format!("Tool changed: {}", current),
            },
            EditorEvent::CanvasViewChanged { zoom, offset } => format!(
                "View changed: zoom {:.2}, offset ({:.1}, {:.1})",
                zoom, offset.x, offset.y
            ),
            EditorEvent::Diagnostic(d) => format!("[{}] {}", d.source, d.message),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Design-graph changes.
    Design,
    /// Selection changes.
    Selection,
    /// Tool switches.
    Tool,
    /// Zoom and pan changes.
    View,
    /// Integration diagnostics.
    Diagnostic,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Design => write!(f, "Design"),
            EventCategory::Selection => write!(f, "Selection"),
            EventCategory::Tool => write!(f, "Tool"),
            EventCategory::View => write!(f, "View"),
            EventCategory::Diagnostic => write!(f, "Diagnostic"),
        }
    }
}

/// A programming/integration problem surfaced to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Component that reported the problem (tool name, "sync", ...).
    pub source: String,
    /// Human readable message.
    pub message: String,
}

impl Diagnostic {
    pub fn new(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
        }
    }
}
