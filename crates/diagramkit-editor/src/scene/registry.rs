//! The diagram canvas: registry of live scene nodes plus view state.

use indexmap::{IndexMap, IndexSet};

use diagramkit_core::{
    EditorConfig, EditorEvent, EntityId, EventBus, Point, Rect, Vector,
};

use super::node::{BlockNode, ConnectorNode, NodeKind, PreviewNode, SceneNodeRef};
use super::CursorShape;
use crate::diagram::route_connector;
use crate::viewport::ViewState;

/// Default viewport size until the host reports one.
const DEFAULT_VIEWPORT: Vector = Vector { x: 1200.0, y: 800.0 };

/// Owns every live scene node, keyed by entity id and node kind.
///
/// Tracked nodes are created and destroyed only by the sync engine. Tools
/// put transient previews into a separate layer that is neither hit-tested
/// nor reconciled.
#[derive(Debug)]
pub struct DiagramCanvas {
    config: EditorConfig,
    bus: EventBus,
    blocks: IndexMap<EntityId, BlockNode>,
    connectors: IndexMap<EntityId, ConnectorNode>,
    previews: IndexMap<EntityId, PreviewNode>,
    dirty_connectors: IndexSet<EntityId>,
    view: ViewState,
    viewport_size: Vector,
    cursor: CursorShape,
    marquee: Option<Rect>,
    next_order: u64,
    needs_redraw: bool,
}

impl DiagramCanvas {
    pub fn new(config: EditorConfig, bus: EventBus) -> Self {
        let view = ViewState::new(config.view.initial_zoom, Vector::ZERO);
        Self {
            config,
            bus,
            blocks: IndexMap::new(),
            connectors: IndexMap::new(),
            previews: IndexMap::new(),
            dirty_connectors: IndexSet::new(),
            view,
            viewport_size: DEFAULT_VIEWPORT,
            cursor: CursorShape::default(),
            marquee: None,
            next_order: 0,
            needs_redraw: false,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ── Tracked nodes ───────────────────────────────────────────────

    pub fn block(&self, id: EntityId) -> Option<&BlockNode> {
        self.blocks.get(&id)
    }

    pub fn block_mut(&mut self, id: EntityId) -> Option<&mut BlockNode> {
        self.blocks.get_mut(&id)
    }

    pub fn connector(&self, id: EntityId) -> Option<&ConnectorNode> {
        self.connectors.get(&id)
    }

    pub fn connector_mut(&mut self, id: EntityId) -> Option<&mut ConnectorNode> {
        self.connectors.get_mut(&id)
    }

    pub fn blocks(&self) -> impl Iterator<Item = &BlockNode> {
        self.blocks.values()
    }

    pub fn connectors(&self) -> impl Iterator<Item = &ConnectorNode> {
        self.connectors.values()
    }

    /// Looks up a node by id, blocks first.
    pub fn node(&self, id: EntityId) -> Option<SceneNodeRef<'_>> {
        self.blocks
            .get(&id)
            .map(SceneNodeRef::Block)
            .or_else(|| self.connectors.get(&id).map(SceneNodeRef::Connector))
    }

    pub fn contains(&self, kind: NodeKind, id: EntityId) -> bool {
        match kind {
            NodeKind::Block => self.blocks.contains_key(&id),
            NodeKind::Connector => self.connectors.contains_key(&id),
        }
    }

    /// Live ids of one kind, in insertion order.
    pub fn live_ids(&self, kind: NodeKind) -> Vec<EntityId> {
        match kind {
            NodeKind::Block => self.blocks.keys().copied().collect(),
            NodeKind::Connector => self.connectors.keys().copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len() + self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.connectors.is_empty()
    }

    /// All tracked nodes, topmost first: higher z-index wins, later
    /// insertion breaks ties.
    pub fn nodes_top_down(&self) -> Vec<SceneNodeRef<'_>> {
        let mut nodes: Vec<(i32, u64, SceneNodeRef<'_>)> = self
            .blocks
            .values()
            .map(|b| (b.z_index, b.order, SceneNodeRef::Block(b)))
            .chain(
                self.connectors
                    .values()
                    .map(|c| (c.z_index, c.order, SceneNodeRef::Connector(c))),
            )
            .collect();
        nodes.sort_by(|a, b| (b.0, b.1).cmp(&(a.0, a.1)));
        nodes.into_iter().map(|(_, _, node)| node).collect()
    }

    fn allocate_order(&mut self) -> u64 {
        let order = self.next_order;
        self.next_order += 1;
        order
    }

    pub(crate) fn insert_block(&mut self, mut node: BlockNode) {
        node.order = self.allocate_order();
        self.blocks.insert(node.id, node);
        self.needs_redraw = true;
    }

    pub(crate) fn insert_connector(&mut self, mut node: ConnectorNode) {
        node.order = self.allocate_order();
        self.connectors.insert(node.id, node);
        self.needs_redraw = true;
    }

    pub(crate) fn remove_node(&mut self, kind: NodeKind, id: EntityId) -> bool {
        let removed = match kind {
            NodeKind::Block => self.blocks.shift_remove(&id).is_some(),
            NodeKind::Connector => {
                self.dirty_connectors.shift_remove(&id);
                self.connectors.shift_remove(&id).is_some()
            }
        };
        self.needs_redraw |= removed;
        removed
    }

    /// Mirrors a selection into the nodes' `selected` flags.
    pub fn apply_selection<'a>(&mut self, selected: impl IntoIterator<Item = &'a EntityId>) {
        let selected: IndexSet<EntityId> = selected.into_iter().copied().collect();
        for block in self.blocks.values_mut() {
            block.selected = selected.contains(&block.id);
        }
        for connector in self.connectors.values_mut() {
            connector.selected = selected.contains(&connector.id);
        }
        self.needs_redraw = true;
    }

    /// Block ids whose pictogram bounds intersect a design-space rectangle.
    pub fn blocks_in_rect(&self, rect: Rect) -> Vec<EntityId> {
        self.blocks
            .values()
            .filter(|b| b.design_bounds().intersects(&rect))
            .map(|b| b.id)
            .collect()
    }

    /// Design-space bounds of all tracked nodes.
    pub fn scene_bounds(&self) -> Option<Rect> {
        self.blocks
            .values()
            .map(BlockNode::design_bounds)
            .chain(self.connectors.values().filter_map(ConnectorNode::bounds))
            .reduce(|a, b| a.union(&b))
    }

    // ── Connector rerouting ─────────────────────────────────────────

    /// Schedules a connector for rerouting on the next frame tick.
    ///
    /// Returns false when it was already scheduled.
    pub fn mark_connector_dirty(&mut self, id: EntityId) -> bool {
        self.needs_redraw = true;
        self.dirty_connectors.insert(id)
    }

    pub fn dirty_connectors(&self) -> impl Iterator<Item = &EntityId> {
        self.dirty_connectors.iter()
    }

    /// Reroutes dirty connectors from the live block positions and clears
    /// the redraw flag. Returns the number of rerouted connectors.
    pub fn frame_tick(&mut self) -> usize {
        let dirty: Vec<EntityId> = self.dirty_connectors.drain(..).collect();
        let mut rerouted = 0;
        for id in dirty {
            let Some(connector) = self.connectors.get(&id) else {
                continue;
            };
            let (Some(origin), Some(target)) = (
                self.blocks.get(&connector.origin),
                self.blocks.get(&connector.target),
            ) else {
                continue;
            };
            let midpoints = connector
                .geometry
                .as_ref()
                .map(|g| g.midpoints.clone())
                .unwrap_or_default();
            let mut geometry = route_connector(
                origin.position,
                origin.bounds,
                target.position,
                target.bounds,
                &midpoints,
            );
            if let Some(previous) = connector.geometry.as_ref() {
                geometry.head = previous.head;
                geometry.tail = previous.tail;
            }
            let settings = self.config.connector.clone();
            if let Some(connector) = self.connectors.get_mut(&id) {
                let has_issues = connector.has_issues;
                connector.update(Some(&geometry), has_issues, &settings);
                rerouted += 1;
            }
        }
        if rerouted > 0 {
            tracing::trace!("Rerouted {} connector(s)", rerouted);
        }
        self.needs_redraw = false;
        rerouted
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    // ── Previews ────────────────────────────────────────────────────

    pub fn set_preview(&mut self, id: EntityId, node: PreviewNode) {
        self.previews.insert(id, node);
        self.needs_redraw = true;
    }

    pub fn preview(&self, id: EntityId) -> Option<&PreviewNode> {
        self.previews.get(&id)
    }

    pub fn preview_mut(&mut self, id: EntityId) -> Option<&mut PreviewNode> {
        self.previews.get_mut(&id)
    }

    pub fn remove_preview(&mut self, id: EntityId) -> bool {
        let removed = self.previews.shift_remove(&id).is_some();
        self.needs_redraw |= removed;
        removed
    }

    pub fn preview_count(&self) -> usize {
        self.previews.len()
    }

    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: CursorShape) {
        self.cursor = cursor;
    }

    /// Rubber-band rectangle in design space.
    pub fn marquee(&self) -> Option<Rect> {
        self.marquee
    }

    pub fn set_marquee(&mut self, marquee: Option<Rect>) {
        self.marquee = marquee;
        self.needs_redraw = true;
    }

    // ── View ────────────────────────────────────────────────────────

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn zoom(&self) -> f64 {
        self.view.zoom()
    }

    pub fn to_design(&self, screen: Point) -> Point {
        self.view.to_design(screen)
    }

    pub fn from_design(&self, design: Point) -> Point {
        self.view.from_design(design)
    }

    pub fn viewport_size(&self) -> Vector {
        self.viewport_size
    }

    pub fn set_viewport_size(&mut self, size: Vector) {
        self.viewport_size = size;
    }

    fn view_changed(&mut self) {
        self.needs_redraw = true;
        self.bus.publish(EditorEvent::CanvasViewChanged {
            zoom: self.view.zoom(),
            offset: self.view.offset(),
        });
    }

    /// Sets the zoom level, clamped to the allowed range, keeping `anchor`
    /// (screen) fixed when given.
    pub fn set_zoom(&mut self, level: f64, anchor: Option<Point>) {
        self.view.set_zoom(level, anchor);
        self.view_changed();
    }

    pub fn set_offset(&mut self, offset: Vector) {
        self.view.set_offset(offset);
        self.view_changed();
    }

    pub fn pan_by(&mut self, delta: Vector) {
        self.view.pan_by(delta);
        self.view_changed();
    }

    pub fn zoom_in(&mut self, anchor: Point) {
        self.set_zoom(self.zoom() * self.config.view.zoom_step, Some(anchor));
    }

    pub fn zoom_out(&mut self, anchor: Point) {
        self.set_zoom(self.zoom() / self.config.view.zoom_step, Some(anchor));
    }

    pub fn reset_view(&mut self) {
        self.view.reset();
        self.view_changed();
    }

    /// Fits all tracked nodes into the viewport. Returns false for an
    /// empty scene.
    pub fn zoom_to_fit(&mut self) -> bool {
        let Some(bounds) = self.scene_bounds() else {
            return false;
        };
        self.view.fit_to_view(bounds, self.viewport_size);
        self.view_changed();
        true
    }

    /// Offset of the background pattern for the current view.
    pub fn background_offset(&self) -> Vector {
        self.view.background_offset(self.config.view.background_tile)
    }

    // ── Editor anchors ──────────────────────────────────────────────

    /// Screen point below a block's primary label where popups open; the
    /// wire middle for connectors.
    pub fn default_popup_position(&self, id: EntityId) -> Option<Point> {
        if let Some(block) = self.blocks.get(&id) {
            let rect = block.label_rect;
            let local = Point::new(rect.center().x, rect.max().y + self.config.labels.popup_gap);
            return Some(self.from_design(block.to_design(local)));
        }
        let middle = self.connectors.get(&id)?.wire_middle()?;
        Some(self.from_design(middle))
    }

    /// Screen point at a block's primary label where inline prompts open;
    /// the wire middle for connectors.
    pub fn prompt_position(&self, id: EntityId) -> Option<Point> {
        if let Some(block) = self.blocks.get(&id) {
            return Some(self.from_design(block.to_design(block.label_rect.center())));
        }
        let middle = self.connectors.get(&id)?.wire_middle()?;
        Some(self.from_design(middle))
    }
}
