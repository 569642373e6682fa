//! Connect tool: drags a preview connector from an origin block and creates
//! an edge when released over a compatible target.

use diagramkit_core::{EntityId, ObjectId, Point, ToolError};

use super::{Tool, ToolContext, ToolInput};
use crate::diagram::{ConnectorGeometry, Decoration};
use crate::scene::{ConnectorNode, CursorShape, PreviewNode, SceneNodeRef};

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectState {
    Empty,
    Connect { origin: ObjectId, preview: EntityId },
}

#[derive(Debug, Clone)]
pub struct ConnectTool {
    state: ConnectState,
    /// Overrides the configured default edge type.
    edge_type: Option<String>,
}

impl Default for ConnectTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectTool {
    pub fn new() -> Self {
        Self {
            state: ConnectState::Empty,
            edge_type: None,
        }
    }

    pub fn with_edge_type(edge_type: impl Into<String>) -> Self {
        Self {
            state: ConnectState::Empty,
            edge_type: Some(edge_type.into()),
        }
    }

    pub fn state(&self) -> &ConnectState {
        &self.state
    }

    fn edge_type(&self, ctx: &ToolContext<'_>) -> String {
        self.edge_type
            .clone()
            .unwrap_or_else(|| ctx.canvas.config().tools.default_edge_type.clone())
    }

    /// Persistent block under a screen point.
    fn block_at(ctx: &ToolContext<'_>, screen: Point) -> Option<ObjectId> {
        match ctx.canvas.hit_object(screen)? {
            SceneNodeRef::Block(block) => block.id.object_id(),
            SceneNodeRef::Connector(_) => None,
        }
    }

    fn update_preview(ctx: &mut ToolContext<'_>, origin: ObjectId, preview: EntityId, to: Point) {
        let Some(origin_box) = ctx
            .canvas
            .block(EntityId::Object(origin))
            .map(|b| b.design_bounds())
        else {
            return;
        };
        let geometry = ConnectorGeometry {
            origin_point: origin_box.boundary_toward(to),
            target_point: to,
            midpoints: Vec::new(),
            head: Decoration::Arrow,
            tail: Decoration::None,
        };
        let settings = ctx.canvas.config().connector.clone();
        match ctx.canvas.preview_mut(preview) {
            Some(PreviewNode::Connector(node)) => node.update(Some(&geometry), false, &settings),
            _ => {
                let mut node = ConnectorNode::new(preview, EntityId::Object(origin), preview);
                node.update(Some(&geometry), false, &settings);
                ctx.canvas.set_preview(preview, PreviewNode::Connector(node));
            }
        }
        ctx.canvas.request_redraw();
    }

    fn affordance(&self, ctx: &ToolContext<'_>, origin: ObjectId, screen: Point) -> CursorShape {
        let Some(target) = Self::block_at(ctx, screen) else {
            return CursorShape::Drag;
        };
        if target == origin {
            return CursorShape::Forbidden;
        }
        let Some(design) = ctx.design.as_deref() else {
            return CursorShape::Forbidden;
        };
        if design.can_connect(&self.edge_type(ctx), origin, target, design.snapshot()) {
            CursorShape::Allowed
        } else {
            CursorShape::Forbidden
        }
    }

    fn commit(&self, ctx: &mut ToolContext<'_>, input: &ToolInput) -> Result<ObjectId, ToolError> {
        let ConnectState::Connect { origin, .. } = self.state else {
            return Err(ToolError::invalid_target("no connection in progress"));
        };
        let target = Self::block_at(ctx, input.screen)
            .ok_or_else(|| ToolError::invalid_target("released over empty canvas"))?;
        if target == origin {
            return Err(ToolError::invalid_target("cannot connect a node to itself"));
        }
        let edge_type = self.edge_type(ctx);
        let design = ctx.design()?;
        if !design.can_connect(&edge_type, origin, target, design.snapshot()) {
            return Err(ToolError::invalid_target(format!(
                "{} edge not allowed from {} to {}",
                edge_type, origin, target
            )));
        }
        let edge = ctx.transact(|tx| tx.create_edge(&edge_type, origin, target))?;
        tracing::info!("Connected {} -> {} with {} edge {}", origin, target, edge_type, edge);
        Ok(edge)
    }

    /// Removes the preview and resets the affordance.
    fn cleanup(&mut self, ctx: &mut ToolContext<'_>) {
        if let ConnectState::Connect { preview, .. } =
            std::mem::replace(&mut self.state, ConnectState::Empty)
        {
            ctx.canvas.remove_preview(preview);
        }
        ctx.canvas.set_cursor(CursorShape::Arrow);
    }
}

impl Tool for ConnectTool {
    fn name(&self) -> &str {
        "connect"
    }

    fn input_began(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) -> bool {
        self.cleanup(ctx);
        let Some(origin) = Self::block_at(ctx, input.screen) else {
            return false;
        };
        let preview = EntityId::ephemeral();
        Self::update_preview(ctx, origin, preview, input.design);
        ctx.canvas.set_cursor(CursorShape::Drag);
        self.state = ConnectState::Connect { origin, preview };
        tracing::debug!("connect tool: origin {}", origin);
        true
    }

    fn input_moved(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) -> bool {
        let ConnectState::Connect { origin, preview } = self.state else {
            return false;
        };
        Self::update_preview(ctx, origin, preview, input.design);
        let cursor = self.affordance(ctx, origin, input.screen);
        ctx.canvas.set_cursor(cursor);
        true
    }

    fn input_ended(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) -> bool {
        let active = matches!(self.state, ConnectState::Connect { .. });
        let result = self.commit(ctx, input);
        self.cleanup(ctx);
        if let Err(err) = result {
            ctx.report(self.name(), &err);
        }
        active
    }

    fn input_cancelled(&mut self, ctx: &mut ToolContext<'_>) -> bool {
        let active = matches!(self.state, ConnectState::Connect { .. });
        self.cleanup(ctx);
        active
    }
}
