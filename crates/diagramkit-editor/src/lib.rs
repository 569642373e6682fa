//! # DiagramKit Editor
//!
//! The interactive editing core of a node/edge diagram editor. It turns
//! pointer input into transactions on an external design graph and keeps a
//! renderable scene synchronized with the graph's current state.
//!
//! ## Core Components
//!
//! - **Tools**: selection, place, connect and pan state machines
//! - **Tool Dispatcher**: routes input to the single active tool
//! - **Hit Testing**: resolves a screen point to the top-most interactive
//!   part (handle, label, issue indicator or body)
//! - **Scene Sync**: reconciles a composed [`Diagram`] with the live scene
//!   nodes, updating in place
//! - **Selection**: ordered set of selected entities with change events
//! - **Viewport**: zoom and pan, screen/design coordinate conversion
//!
//! The [`Editor`] facade wires these together for a hosting UI.

pub mod diagram;
pub mod dispatcher;
pub mod editor;
pub mod input;
pub mod pictogram;
pub mod scene;
pub mod selection;
pub mod sync;
pub mod tools;
pub mod viewport;

pub use diagram::{
    compose, route_connector, ConnectorGeometry, Decoration, Diagram, DiagramBlock,
    DiagramConnector,
};
pub use dispatcher::ToolDispatcher;
pub use editor::Editor;
pub use input::{InputEvent, InputKind, Modifiers, PointerButton};
pub use pictogram::{CollisionShape, Pictogram, PictogramCollection};
pub use scene::{
    BlockNode, ConnectorNode, CursorShape, DiagramCanvas, HitPart, HitTarget, HitTester, NodeKind,
    PreviewNode, SceneNodeRef,
};
pub use selection::Selection;
pub use sync::{PassStats, SceneSync, SyncReport};
pub use tools::{
    ConnectState, ConnectTool, EditorIntent, EditorTool, PanState, PanTool, PlaceTool,
    SelectionState, SelectionTool, Tool, ToolContext, ToolInput,
};
pub use viewport::{clamp_zoom, ViewState};

pub use diagramkit_core::{EntityId, ObjectId, Point, Rect, Vector};
