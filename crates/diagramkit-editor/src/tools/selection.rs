//! Selection tool: select, marquee-select, move objects and drag connector
//! handles.

use indexmap::IndexSet;

use diagramkit_core::{EntityId, Point, Rect, ToolError, Vector};

use super::{EditorIntent, Tool, ToolContext, ToolInput};
use crate::scene::{CursorShape, HitPart, HitTarget, NodeKind};

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionState {
    Empty,
    ObjectHit { target: HitTarget },
    /// Marquee drag from an empty spot.
    ObjectSelect { origin: Point, additive: bool },
    ObjectMove { total: Vector },
    HandleHit {
        connector: EntityId,
        index: usize,
        original: Point,
    },
    HandleMove {
        connector: EntityId,
        index: usize,
        original: Point,
    },
}

#[derive(Debug, Clone)]
pub struct SelectionTool {
    state: SelectionState,
}

impl Default for SelectionTool {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionTool {
    pub fn new() -> Self {
        Self {
            state: SelectionState::Empty,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Shift toggles membership; a plain press replaces the selection,
    /// or asks for the context menu when the entity is already the sole
    /// selection.
    fn press_object(&mut self, ctx: &mut ToolContext<'_>, target: HitTarget, input: &ToolInput) {
        let entity = target.entity;
        if input.modifiers.shift {
            ctx.selection.toggle(entity);
        } else if ctx.selection.is_sole(entity) {
            ctx.intent(EditorIntent::ContextMenu {
                entity,
                at: input.screen,
            });
        } else {
            ctx.selection.replace_all([entity]);
        }
        self.state = SelectionState::ObjectHit { target };
    }

    fn press_decoration(&mut self, ctx: &mut ToolContext<'_>, target: HitTarget) {
        let entity = target.entity;
        ctx.selection.replace_all([entity]);
        let intent = match target.part {
            HitPart::PrimaryLabel => EditorIntent::OpenNameEditor { entity },
            HitPart::SecondaryLabel => EditorIntent::OpenFormulaEditor { entity },
            _ => EditorIntent::OpenIssueInspector { entity },
        };
        ctx.intent(intent);
        self.state = SelectionState::Empty;
    }

    /// Moves every selected node visually and schedules the connectors
    /// depending on moved blocks for rerouting.
    fn move_selection(&self, ctx: &mut ToolContext<'_>, delta: Vector) {
        let settings = ctx.canvas.config().connector.clone();
        let mut dependent: IndexSet<EntityId> = IndexSet::new();

        for id in ctx.selection.ids() {
            if let Some(block) = ctx.canvas.block_mut(id) {
                block.translate(delta);
                match (ctx.design.as_deref(), id.object_id()) {
                    (Some(design), Some(object)) => {
                        dependent.extend(design.dependent_edges(object).into_iter().map(EntityId::from));
                    }
                    _ => dependent.extend(
                        ctx.canvas
                            .connectors()
                            .filter(|c| c.origin == id || c.target == id)
                            .map(|c| c.id),
                    ),
                }
            } else if let Some(connector) = ctx.canvas.connector_mut(id) {
                connector.translate_midpoints(delta, &settings);
            }
        }

        for id in dependent {
            ctx.canvas.mark_connector_dirty(id);
        }
    }

    fn commit_move(ctx: &mut ToolContext<'_>, total: Vector) -> Result<(), ToolError> {
        let ids: Vec<_> = ctx.selection.iter().filter_map(|id| id.object_id()).collect();
        if ids.is_empty() || total.is_zero() {
            return Ok(());
        }
        ctx.transact(|tx| {
            for id in ids {
                tx.mutate(id)?.translate(total);
            }
            Ok(())
        })
    }

    fn commit_handle(
        ctx: &mut ToolContext<'_>,
        connector: EntityId,
        index: usize,
    ) -> Result<(), ToolError> {
        let object = connector
            .object_id()
            .ok_or_else(|| ToolError::invalid_target("handle of a preview connector"))?;
        let position = ctx
            .canvas
            .connector(connector)
            .and_then(|c| c.handles.get(index).copied())
            .ok_or_else(|| ToolError::invalid_target("handle no longer exists"))?;
        ctx.transact(|tx| {
            let edge = tx.mutate(object)?;
            if let Some(midpoint) = edge.midpoints.get_mut(index) {
                *midpoint = position;
            }
            Ok(())
        })
    }

    fn finish_marquee(ctx: &mut ToolContext<'_>, origin: Point, end: Point, additive: bool) {
        ctx.canvas.set_marquee(None);
        let screen = Rect::from_corners(ctx.canvas.from_design(origin), ctx.canvas.from_design(end));
        let min = ctx.canvas.config().tools.marquee_min_size;
        if screen.width < min && screen.height < min {
            return;
        }
        let ids = ctx.canvas.blocks_in_rect(Rect::from_corners(origin, end));
        if additive {
            ctx.selection.extend(ids);
        } else {
            ctx.selection.replace_all(ids);
        }
    }

    /// Undoes visual changes of an interrupted drag.
    fn revert(&mut self, ctx: &mut ToolContext<'_>) {
        match std::mem::replace(&mut self.state, SelectionState::Empty) {
            SelectionState::ObjectMove { total } if !total.is_zero() => {
                self.move_selection(ctx, -total);
            }
            SelectionState::HandleMove {
                connector,
                index,
                original,
            } => {
                let settings = ctx.canvas.config().connector.clone();
                if let Some(node) = ctx.canvas.connector_mut(connector) {
                    node.move_handle(index, original, &settings);
                }
            }
            SelectionState::ObjectSelect { .. } => ctx.canvas.set_marquee(None),
            _ => {}
        }
    }
}

impl Tool for SelectionTool {
    fn name(&self) -> &str {
        "selection"
    }

    fn input_began(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) -> bool {
        match ctx.canvas.hit_target(input.screen) {
            None => {
                if !input.modifiers.shift {
                    ctx.selection.clear();
                }
                self.state = SelectionState::ObjectSelect {
                    origin: input.design,
                    additive: input.modifiers.shift,
                };
            }
            Some(target) => match target.part {
                HitPart::Body => self.press_object(ctx, target, input),
                HitPart::Handle(index) => {
                    let original = ctx
                        .canvas
                        .connector(target.entity)
                        .and_then(|c| c.handles.get(index).copied())
                        .unwrap_or(input.design);
                    self.state = SelectionState::HandleHit {
                        connector: target.entity,
                        index,
                        original,
                    };
                }
                HitPart::PrimaryLabel | HitPart::SecondaryLabel | HitPart::ErrorIndicator => {
                    self.press_decoration(ctx, target)
                }
            },
        }
        tracing::trace!("selection tool: {:?}", self.state);
        true
    }

    fn input_moved(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) -> bool {
        match self.state.clone() {
            SelectionState::ObjectHit { .. } => {
                ctx.canvas.set_cursor(CursorShape::Grabbing);
                self.move_selection(ctx, input.delta);
                self.state = SelectionState::ObjectMove { total: input.delta };
                true
            }
            SelectionState::ObjectMove { total } => {
                self.move_selection(ctx, input.delta);
                self.state = SelectionState::ObjectMove {
                    total: total + input.delta,
                };
                true
            }
            SelectionState::ObjectSelect { origin, .. } => {
                ctx.canvas
                    .set_marquee(Some(Rect::from_corners(origin, input.design)));
                true
            }
            SelectionState::HandleHit {
                connector,
                index,
                original,
            }
            | SelectionState::HandleMove {
                connector,
                index,
                original,
            } => {
                let settings = ctx.canvas.config().connector.clone();
                if let Some(node) = ctx.canvas.connector_mut(connector) {
                    node.move_handle(index, input.design, &settings);
                }
                self.state = SelectionState::HandleMove {
                    connector,
                    index,
                    original,
                };
                true
            }
            SelectionState::Empty => false,
        }
    }

    fn input_ended(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) -> bool {
        let state = std::mem::replace(&mut self.state, SelectionState::Empty);
        ctx.canvas.set_cursor(CursorShape::Arrow);
        match state {
            SelectionState::ObjectMove { total } => {
                if let Err(err) = Self::commit_move(ctx, total) {
                    ctx.report(self.name(), &err);
                    self.state = SelectionState::ObjectMove { total };
                    self.revert(ctx);
                }
                true
            }
            SelectionState::HandleMove {
                connector,
                index,
                original,
            } => {
                if let Err(err) = Self::commit_handle(ctx, connector, index) {
                    ctx.report(self.name(), &err);
                    self.state = SelectionState::HandleMove {
                        connector,
                        index,
                        original,
                    };
                    self.revert(ctx);
                }
                true
            }
            SelectionState::ObjectSelect { origin, additive } => {
                Self::finish_marquee(ctx, origin, input.design, additive);
                true
            }
            SelectionState::ObjectHit { .. } | SelectionState::HandleHit { .. } => true,
            SelectionState::Empty => false,
        }
    }

    fn input_hover(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) -> bool {
        let cursor = match ctx.canvas.hit_target(input.screen) {
            Some(HitTarget {
                part: HitPart::Handle(_),
                ..
            }) => CursorShape::Grab,
            Some(HitTarget {
                kind: NodeKind::Block,
                part: HitPart::Body,
                ..
            }) => CursorShape::Grab,
            _ => CursorShape::Arrow,
        };
        ctx.canvas.set_cursor(cursor);
        false
    }

    fn input_cancelled(&mut self, ctx: &mut ToolContext<'_>) -> bool {
        let active = self.state != SelectionState::Empty;
        self.revert(ctx);
        ctx.canvas.set_cursor(CursorShape::Arrow);
        active
    }
}
