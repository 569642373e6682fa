//! Pan tool: drags the view with the primary button.

use diagramkit_core::{Point, Vector};

use super::{Tool, ToolContext, ToolInput};
use crate::input::PointerButton;
use crate::scene::CursorShape;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanState {
    Idle,
    Panning { start_offset: Vector, start: Point },
}

#[derive(Debug, Clone)]
pub struct PanTool {
    state: PanState,
}

impl Default for PanTool {
    fn default() -> Self {
        Self::new()
    }
}

impl PanTool {
    pub fn new() -> Self {
        Self {
            state: PanState::Idle,
        }
    }

    pub fn state(&self) -> PanState {
        self.state
    }

    fn stop(&mut self, ctx: &mut ToolContext<'_>) -> bool {
        let was_panning = matches!(self.state, PanState::Panning { .. });
        self.state = PanState::Idle;
        ctx.canvas.set_cursor(CursorShape::Grab);
        was_panning
    }
}

impl Tool for PanTool {
    fn name(&self) -> &str {
        "pan"
    }

    fn input_began(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) -> bool {
        if input.button != Some(PointerButton::Primary) {
            return false;
        }
        self.state = PanState::Panning {
            start_offset: ctx.canvas.view().offset(),
            start: input.screen,
        };
        ctx.canvas.set_cursor(CursorShape::Grabbing);
        true
    }

    fn input_moved(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) -> bool {
        let PanState::Panning {
            start_offset,
            start,
        } = self.state
        else {
            return false;
        };
        // The offset is in screen units, so the raw pointer travel applies
        // unscaled.
        ctx.canvas.set_offset(start_offset + (input.screen - start));
        true
    }

    fn input_ended(&mut self, ctx: &mut ToolContext<'_>, _input: &ToolInput) -> bool {
        self.stop(ctx)
    }

    fn input_cancelled(&mut self, ctx: &mut ToolContext<'_>) -> bool {
        self.stop(ctx)
    }

    fn tool_selected(&mut self, ctx: &mut ToolContext<'_>) {
        ctx.canvas.set_cursor(CursorShape::Grab);
    }

    fn tool_released(&mut self, ctx: &mut ToolContext<'_>) {
        self.state = PanState::Idle;
        ctx.canvas.set_cursor(CursorShape::Arrow);
    }
}
