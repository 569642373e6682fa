//! Editor facade.
//!
//! Owns the canvas, the selection and the tool dispatcher, holds the bound
//! design controller and keeps the scene in sync with it. This is the
//! surface a hosting UI talks to: it feeds input events in, issues
//! commands (tool switches, undo/redo, view changes) and drains intents.

use diagramkit_core::constants::DEFAULT_TOOL;
use diagramkit_core::{
    DesignController, DesignError, EditorConfig, EditorEvent, EntityId, EventBus, ObjectId, Point,
    ToolError, Transaction, Vector,
};

use crate::diagram::compose;
use crate::dispatcher::ToolDispatcher;
use crate::input::InputEvent;
use crate::pictogram::PictogramCollection;
use crate::scene::DiagramCanvas;
use crate::selection::Selection;
use crate::sync::{SceneSync, SyncReport};
use crate::tools::{EditorIntent, EditorTool, PlaceTool, ToolContext};

pub struct Editor {
    bus: EventBus,
    canvas: DiagramCanvas,
    selection: Selection,
    dispatcher: ToolDispatcher,
    design: Option<Box<dyn DesignController>>,
    pictograms: PictogramCollection,
    sync: SceneSync,
    intents: Vec<EditorIntent>,
    synced_version: Option<u64>,
}

impl Editor {
    /// Creates an editor without a design, with the selection tool active.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_bus(config, EventBus::new())
    }

    pub fn with_bus(config: EditorConfig, bus: EventBus) -> Self {
        let mut editor = Self {
            canvas: DiagramCanvas::new(config, bus.clone()),
            selection: Selection::new(bus.clone()),
            dispatcher: ToolDispatcher::new(),
            design: None,
            pictograms: PictogramCollection::stock_flow(),
            sync: SceneSync::new(),
            intents: Vec::new(),
            synced_version: None,
            bus,
        };
        editor.switch_tool(Self::default_tool());
        editor
    }

    /// Creates an editor bound to `design` and syncs the scene.
    pub fn with_design(config: EditorConfig, design: Box<dyn DesignController>) -> Self {
        let mut editor = Self::new(config);
        editor.set_design(design);
        editor
    }

    /// Binds a design controller, replacing the previous one.
    pub fn set_design(&mut self, design: Box<dyn DesignController>) {
        tracing::info!("Bound design at version {}", design.version());
        self.design = Some(design);
        self.synced_version = None;
        self.sync_design();
    }

    pub fn set_pictograms(&mut self, pictograms: PictogramCollection) {
        self.pictograms = pictograms;
        self.synced_version = None;
        self.sync_design();
    }

    fn default_tool() -> EditorTool {
        EditorTool::from_name(DEFAULT_TOOL)
            .unwrap_or_else(|| EditorTool::Selection(Default::default()))
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn config(&self) -> &EditorConfig {
        self.canvas.config()
    }

    pub fn canvas(&self) -> &DiagramCanvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut DiagramCanvas {
        &mut self.canvas
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn design(&self) -> Option<&dyn DesignController> {
        self.design.as_deref()
    }

    pub fn pictograms(&self) -> &PictogramCollection {
        &self.pictograms
    }

    pub fn active_tool(&self) -> Option<&EditorTool> {
        self.dispatcher.active()
    }

    pub fn active_tool_name(&self) -> Option<&str> {
        self.dispatcher.active_name()
    }

    pub fn previous_tool_name(&self) -> Option<&str> {
        self.dispatcher.previous_name()
    }

    /// Drains the queued intents.
    pub fn take_intents(&mut self) -> Vec<EditorIntent> {
        std::mem::take(&mut self.intents)
    }

    // ── Input ───────────────────────────────────────────────────────

    /// Routes one input event to the active tool, then applies its side
    /// effects to the scene. Returns whether the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let Self {
            canvas,
            selection,
            design,
            pictograms,
            bus,
            intents,
            dispatcher,
            ..
        } = self;
        let mut ctx = ToolContext {
            canvas,
            selection,
            design: design.as_deref_mut(),
            pictograms,
            bus,
            intents,
            sync_requested: false,
        };
        let consumed = dispatcher.route(event, &mut ctx);
        let sync_requested = ctx.sync_requested;

        self.settle(sync_requested);
        consumed
    }

    /// Handles internal intents, resyncs when the design moved and
    /// refreshes selection flags.
    fn settle(&mut self, sync_requested: bool) {
        let before = self.intents.len();
        self.intents
            .retain(|intent| *intent != EditorIntent::SwitchToDefaultTool);
        if self.intents.len() != before {
            self.switch_tool(Self::default_tool());
        }

        let current = self.design.as_deref().map(|d| d.version());
        if sync_requested || current != self.synced_version {
            self.sync_design();
        }
        self.canvas.apply_selection(self.selection.iter());
    }

    // ── Tools ───────────────────────────────────────────────────────

    /// Releases the active tool and activates `tool`.
    pub fn switch_tool(&mut self, tool: EditorTool) {
        let Self {
            canvas,
            selection,
            design,
            pictograms,
            bus,
            intents,
            dispatcher,
            ..
        } = self;
        let mut ctx = ToolContext {
            canvas,
            selection,
            design: design.as_deref_mut(),
            pictograms,
            bus,
            intents,
            sync_requested: false,
        };
        dispatcher.switch_tool(tool, &mut ctx);
        self.canvas.request_redraw();
    }

    /// Switches to a tool by name. Returns false for unknown names.
    pub fn switch_tool_named(&mut self, name: &str) -> bool {
        match EditorTool::from_name(name) {
            Some(tool) => {
                self.switch_tool(tool);
                true
            }
            None => {
                tracing::warn!("Unknown tool '{}'", name);
                false
            }
        }
    }

    /// Sets the palette item of the place tool, activating the place tool
    /// when it is not active and an item is given.
    pub fn set_palette_item(&mut self, item: Option<String>) {
        if !matches!(self.dispatcher.active(), Some(EditorTool::Place(_))) {
            if item.is_some() {
                self.switch_tool(PlaceTool::new(item).into());
            }
            return;
        }

        let Self {
            canvas,
            selection,
            design,
            pictograms,
            bus,
            intents,
            dispatcher,
            ..
        } = self;
        let mut ctx = ToolContext {
            canvas,
            selection,
            design: design.as_deref_mut(),
            pictograms,
            bus,
            intents,
            sync_requested: false,
        };
        if let Some(EditorTool::Place(tool)) = dispatcher.active_mut() {
            tool.change_palette_item(&mut ctx, item);
        }
    }

    // ── Design commands ─────────────────────────────────────────────

    pub fn can_undo(&self) -> bool {
        self.design.as_deref().is_some_and(|d| d.can_undo())
    }

    pub fn can_redo(&self) -> bool {
        self.design.as_deref().is_some_and(|d| d.can_redo())
    }

    /// Returns false when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let undone = self.design.as_deref_mut().is_some_and(|d| d.undo());
        if undone {
            self.sync_design();
        }
        undone
    }

    /// Returns false when there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let redone = self.design.as_deref_mut().is_some_and(|d| d.redo());
        if redone {
            self.sync_design();
        }
        redone
    }

    /// Removes the selected objects and their dependent edges in one
    /// transaction. Returns every removed id.
    pub fn delete_selection(&mut self) -> Result<Vec<ObjectId>, ToolError> {
        let ids: Vec<ObjectId> = self.selection.iter().filter_map(|id| id.object_id()).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let removed = self.transact(|tx| {
            let mut removed = Vec::new();
            for id in ids {
                if tx.contains(id) {
                    removed.extend(tx.remove_cascading(id)?);
                }
            }
            Ok(removed)
        })?;
        tracing::info!("Deleted {} object(s)", removed.len());
        self.selection.clear();
        self.settle(false);
        Ok(removed)
    }

    /// Commits a new name for a node or edge, as entered in the name editor.
    pub fn rename(&mut self, entity: EntityId, name: &str) -> Result<(), ToolError> {
        let id = entity
            .object_id()
            .ok_or_else(|| ToolError::invalid_target("preview entities have no name"))?;
        let name = name.trim();
        self.transact(|tx| {
            tx.mutate(id)?.name = (!name.is_empty()).then(|| name.to_string());
            Ok(())
        })?;
        self.settle(false);
        Ok(())
    }

    /// Commits a new formula for a node, as entered in the formula editor.
    pub fn set_formula(&mut self, entity: EntityId, formula: &str) -> Result<(), ToolError> {
        let id = entity
            .object_id()
            .ok_or_else(|| ToolError::invalid_target("preview entities have no formula"))?;
        let formula = formula.trim();
        self.transact(|tx| {
            let object = tx.mutate(id)?;
            if !object.is_node() {
                return Err(DesignError::WrongKind {
                    id,
                    expected: "a node",
                });
            }
            object.formula = (!formula.is_empty()).then(|| formula.to_string());
            Ok(())
        })?;
        self.settle(false);
        Ok(())
    }

    fn transact<T>(
        &mut self,
        build: impl FnOnce(&mut Transaction) -> Result<T, DesignError>,
    ) -> Result<T, ToolError> {
        let Self {
            canvas,
            selection,
            design,
            pictograms,
            bus,
            intents,
            ..
        } = self;
        let mut ctx = ToolContext {
            canvas,
            selection,
            design: design.as_deref_mut(),
            pictograms,
            bus,
            intents,
            sync_requested: false,
        };
        let result = ctx.transact(build);
        if ctx.sync_requested {
            self.synced_version = None;
        }
        result
    }

    /// Marks a block as having its label edited; sync keeps the flag.
    pub fn set_label_editing(&mut self, entity: EntityId, editing: bool) -> bool {
        match self.canvas.block_mut(entity) {
            Some(block) => {
                block.editing_label = editing;
                self.canvas.request_redraw();
                true
            }
            None => false,
        }
    }

    // ── Scene ───────────────────────────────────────────────────────

    /// Recomposes the diagram from the bound design and reconciles the
    /// scene with it. Selected ids that no longer exist are pruned.
    pub fn sync_design(&mut self) -> SyncReport {
        let Some(design) = self.design.as_deref() else {
            return SyncReport::default();
        };
        let version = design.version();
        let diagram = compose(design.snapshot(), design.metamodel(), &self.pictograms);
        let report = self.sync.reconcile(&diagram, &mut self.canvas);

        let canvas = &self.canvas;
        let pruned = self.selection.retain(|id| canvas.node(*id).is_some());
        if pruned > 0 {
            tracing::debug!("Pruned {} vanished id(s) from the selection", pruned);
        }
        self.canvas.apply_selection(self.selection.iter());

        if self.synced_version != Some(version) {
            self.synced_version = Some(version);
            self.bus.publish(EditorEvent::DesignChanged { version });
        }
        report
    }

    /// Reroutes dirty connectors. Call once per rendered frame.
    pub fn frame_tick(&mut self) -> usize {
        self.canvas.frame_tick()
    }

    // ── View ────────────────────────────────────────────────────────

    pub fn set_viewport_size(&mut self, size: Vector) {
        self.canvas.set_viewport_size(size);
    }

    pub fn zoom_in(&mut self, anchor: Point) {
        self.canvas.zoom_in(anchor);
    }

    pub fn zoom_out(&mut self, anchor: Point) {
        self.canvas.zoom_out(anchor);
    }

    pub fn reset_view(&mut self) {
        self.canvas.reset_view();
    }

    pub fn zoom_to_fit(&mut self) -> bool {
        self.canvas.zoom_to_fit()
    }

    pub fn default_popup_position(&self, entity: EntityId) -> Option<Point> {
        self.canvas.default_popup_position(entity)
    }

    pub fn prompt_position(&self, entity: EntityId) -> Option<Point> {
        self.canvas.prompt_position(entity)
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("tool", &self.dispatcher.active_name())
            .field("nodes", &self.canvas.len())
            .field("selected", &self.selection.len())
            .field("version", &self.synced_version)
            .finish()
    }
}
