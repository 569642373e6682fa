//! Tool dispatcher: owns the active tool and routes input to it.

use diagramkit_core::{EditorEvent, Point, Vector};

use crate::input::{InputEvent, InputKind};
use crate::tools::{EditorTool, Tool, ToolContext, ToolInput};

#[derive(Debug, Default)]
pub struct ToolDispatcher {
    active: Option<EditorTool>,
    previous: Option<String>,
    last_pointer: Option<Point>,
}

impl ToolDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&EditorTool> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut EditorTool> {
        self.active.as_mut()
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_ref().map(EditorTool::name)
    }

    /// Name of the tool active before the current one.
    pub fn previous_name(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Releases the outgoing tool, activates `tool` and announces the
    /// switch.
    pub fn switch_tool(&mut self, tool: EditorTool, ctx: &mut ToolContext<'_>) {
        let previous = self.active.take().map(|mut outgoing| {
            outgoing.tool_released(ctx);
            outgoing.name().to_string()
        });
        let current = tool.name().to_string();
        let mut incoming = tool;
        incoming.tool_selected(ctx);
        self.active = Some(incoming);
        self.previous = previous.clone();

        tracing::info!(
            "Switched tool: {} -> {}",
            previous.as_deref().unwrap_or("none"),
            current
        );
        ctx.bus.publish(EditorEvent::ToolChanged { previous, current });
    }

    /// Routes one input event. Returns whether it was consumed.
    pub fn route(&mut self, event: &InputEvent, ctx: &mut ToolContext<'_>) -> bool {
        match event.kind {
            InputKind::PanGesture(delta) => {
                ctx.canvas.pan_by(delta);
                return true;
            }
            InputKind::MagnifyGesture(factor) => {
                let zoom = ctx.canvas.zoom() * factor;
                ctx.canvas.set_zoom(zoom, Some(event.position));
                return true;
            }
            _ => {}
        }

        let Some(tool) = self.active.as_mut() else {
            return false;
        };

        let delta = match (event.kind, self.last_pointer) {
            (InputKind::Motion { .. }, Some(last)) => {
                ctx.canvas.view().delta_to_design(event.position - last)
            }
            _ => Vector::ZERO,
        };
        let input = ToolInput {
            screen: event.position,
            design: ctx.canvas.to_design(event.position),
            delta,
            button: event.button(),
            modifiers: event.modifiers,
        };

        match event.kind {
            InputKind::Press(_) => {
                self.last_pointer = Some(event.position);
                tool.input_began(ctx, &input)
            }
            InputKind::Release(_) => {
                self.last_pointer = None;
                tool.input_ended(ctx, &input)
            }
            InputKind::Motion { primary_held } => {
                self.last_pointer = Some(event.position);
                if primary_held {
                    tool.input_moved(ctx, &input)
                } else {
                    tool.input_hover(ctx, &input)
                }
            }
            InputKind::Cancel => {
                self.last_pointer = None;
                tool.input_cancelled(ctx)
            }
            InputKind::PanGesture(_) | InputKind::MagnifyGesture(_) => false,
        }
    }
}
