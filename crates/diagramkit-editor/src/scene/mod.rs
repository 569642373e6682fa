//! Scene graph: live nodes, the registry owning them, and hit testing.

mod hit_test;
mod node;
mod registry;

pub use hit_test::{HitPart, HitTarget, HitTester};
pub use node::{BlockNode, ConnectorNode, NodeKind, PreviewNode, SceneNodeRef};
pub use registry::DiagramCanvas;

/// Pointer cursor affordance shown over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    #[default]
    Arrow,
    /// Plain drag without a target.
    Drag,
    /// Dropping here is allowed.
    Allowed,
    /// Dropping here is not allowed.
    Forbidden,
    Grab,
    Grabbing,
    Crosshair,
}
