//! Tool state machines.
//!
//! Every tool implements [`Tool`]. The dispatcher owns exactly one
//! [`EditorTool`], the closed set of tools the editor knows about, and feeds
//! it routed input. Handlers return whether they consumed the event.
//!
//! Tools never let errors escape a handler. Internally they work with
//! `Result<_, ToolError>`; at the handler boundary user errors are dropped
//! silently and integration errors go to the diagnostic channel.

mod connect;
mod pan;
mod place;
mod selection;

pub use connect::{ConnectState, ConnectTool};
pub use pan::{PanState, PanTool};
pub use place::PlaceTool;
pub use selection::{SelectionState, SelectionTool};

use diagramkit_core::{
    DesignController, DesignError, Diagnostic, EditorEvent, EntityId, EventBus, Point, ToolError,
    Transaction, Vector,
};

use crate::input::{Modifiers, PointerButton};
use crate::pictogram::PictogramCollection;
use crate::scene::DiagramCanvas;
use crate::selection::Selection;

/// Requests the host should act on.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorIntent {
    ContextMenu { entity: EntityId, at: Point },
    OpenNameEditor { entity: EntityId },
    OpenFormulaEditor { entity: EntityId },
    OpenIssueInspector { entity: EntityId },
    SwitchToDefaultTool,
}

/// Input as seen by a tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolInput {
    pub screen: Point,
    pub design: Point,
    /// Design-space motion since the previous routed event.
    pub delta: Vector,
    pub button: Option<PointerButton>,
    pub modifiers: Modifiers,
}

/// Collaborators a tool works with while handling one event.
pub struct ToolContext<'a> {
    pub canvas: &'a mut DiagramCanvas,
    pub selection: &'a mut Selection,
    pub design: Option<&'a mut (dyn DesignController + 'static)>,
    pub pictograms: &'a PictogramCollection,
    pub bus: &'a EventBus,
    pub intents: &'a mut Vec<EditorIntent>,
    /// Set when the scene must be resynced even without a new design version.
    pub sync_requested: bool,
}

impl ToolContext<'_> {
    /// The bound design controller.
    pub fn design(&mut self) -> Result<&mut (dyn DesignController + 'static), ToolError> {
        self.design
            .as_deref_mut()
            .ok_or_else(|| ToolError::not_ready("no design controller bound"))
    }

    /// Runs `build` in a fresh transaction and commits it.
    ///
    /// A failing `build` discards the transaction; fatal validation issues
    /// turn into [`DesignError::Rejected`]. Either way the design is left
    /// as it was.
    pub fn transact<T>(
        &mut self,
        build: impl FnOnce(&mut Transaction) -> Result<T, DesignError>,
    ) -> Result<T, ToolError> {
        let design = self.design()?;
        let mut tx = design.new_transaction();
        let value = match build(&mut tx) {
            Ok(value) => value,
            Err(err) => {
                design.discard(tx);
                return Err(err.into());
            }
        };
        let outcome = design.accept(tx)?;
        if !outcome.committed {
            self.sync_requested = true;
            return Err(DesignError::Rejected {
                count: outcome.fatal_count(),
            }
            .into());
        }
        Ok(value)
    }

    /// Logs a tool error; integration errors are also published as
    /// diagnostics.
    pub fn report(&self, tool: &str, error: &ToolError) {
        if error.is_user_error() {
            tracing::debug!("{} tool: abandoned ({})", tool, error);
        } else {
            tracing::warn!("{} tool: {}", tool, error);
            self.bus
                .publish(EditorEvent::Diagnostic(Diagnostic::new(tool, error.to_string())));
        }
    }

    pub fn intent(&mut self, intent: EditorIntent) {
        self.intents.push(intent);
    }
}

/// Capability interface shared by all tools.
pub trait Tool {
    fn name(&self) -> &str;

    fn input_began(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) -> bool;

    fn input_moved(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) -> bool;

    fn input_ended(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) -> bool;

    fn input_hover(&mut self, _ctx: &mut ToolContext<'_>, _input: &ToolInput) -> bool {
        false
    }

    /// Returns the tool to its initial state without committing anything.
    fn input_cancelled(&mut self, ctx: &mut ToolContext<'_>) -> bool;

    fn tool_selected(&mut self, _ctx: &mut ToolContext<'_>) {}

    /// Must leave no previews or other transient visuals behind.
    fn tool_released(&mut self, ctx: &mut ToolContext<'_>) {
        self.input_cancelled(ctx);
    }
}

/// The tools of the editor.
#[derive(Debug, Clone)]
pub enum EditorTool {
    Selection(SelectionTool),
    Place(PlaceTool),
    Connect(ConnectTool),
    Pan(PanTool),
}

impl EditorTool {
    /// Builds a tool by name with default settings.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "selection" => Some(Self::Selection(SelectionTool::new())),
            "place" => Some(Self::Place(PlaceTool::new(None))),
            "connect" => Some(Self::Connect(ConnectTool::new())),
            "pan" => Some(Self::Pan(PanTool::new())),
            _ => None,
        }
    }

    fn inner(&mut self) -> &mut dyn Tool {
        match self {
            Self::Selection(tool) => tool,
            Self::Place(tool) => tool,
            Self::Connect(tool) => tool,
            Self::Pan(tool) => tool,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Selection(tool) => tool.name(),
            Self::Place(tool) => tool.name(),
            Self::Connect(tool) => tool.name(),
            Self::Pan(tool) => tool.name(),
        }
    }
}

impl Tool for EditorTool {
    fn name(&self) -> &str {
        EditorTool::name(self)
    }

    fn input_began(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) -> bool {
        self.inner().input_began(ctx, input)
    }

    fn input_moved(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) -> bool {
        self.inner().input_moved(ctx, input)
    }

    fn input_ended(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) -> bool {
        self.inner().input_ended(ctx, input)
    }

    fn input_hover(&mut self, ctx: &mut ToolContext<'_>, input: &ToolInput) -> bool {
        self.inner().input_hover(ctx, input)
    }

    fn input_cancelled(&mut self, ctx: &mut ToolContext<'_>) -> bool {
        self.inner().input_cancelled(ctx)
    }

    fn tool_selected(&mut self, ctx: &mut ToolContext<'_>) {
        self.inner().tool_selected(ctx)
    }

    fn tool_released(&mut self, ctx: &mut ToolContext<'_>) {
        self.inner().tool_released(ctx)
    }
}

impl From<SelectionTool> for EditorTool {
    fn from(tool: SelectionTool) -> Self {
        Self::Selection(tool)
    }
}

impl From<PlaceTool> for EditorTool {
    fn from(tool: PlaceTool) -> Self {
        Self::Place(tool)
    }
}

impl From<ConnectTool> for EditorTool {
    fn from(tool: ConnectTool) -> Self {
        Self::Connect(tool)
    }
}

impl From<PanTool> for EditorTool {
    fn from(tool: PanTool) -> Self {
        Self::Pan(tool)
    }
}
