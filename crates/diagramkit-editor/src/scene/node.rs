//! Scene nodes: the live renderable state of blocks and connectors.

use lyon::math::point;
use lyon::path::iterator::*;
use lyon::path::Path;
use smallvec::SmallVec;

use diagramkit_core::{
    ConnectorSettings, EditorConfig, EntityId, LabelSettings, Point, Rect, Vector,
};

use crate::diagram::{ConnectorGeometry, Decoration, DiagramBlock};
use crate::pictogram::Pictogram;

/// Size of a block drawn without a pictogram.
const PLACEHOLDER_SIZE: f64 = 16.0;
/// Side of the color swatch square.
const SWATCH_SIZE: f64 = 8.0;

/// Kind of scene node; registry keys are unique per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Block,
    Connector,
}

/// Live block.
///
/// Label, indicator and swatch geometry is in local space, relative to
/// `position`.
#[derive(Debug, Clone)]
pub struct BlockNode {
    pub id: EntityId,
    /// Design-space position; moves live while dragged.
    pub position: Point,
    pub pictogram: Option<Pictogram>,
    /// Local bounds of the pictogram, or of the placeholder square.
    pub bounds: Rect,
    pub label: String,
    pub label_rect: Rect,
    pub secondary_label: Option<String>,
    pub secondary_rect: Option<Rect>,
    pub value: Option<f64>,
    pub value_indicator: Option<Point>,
    pub color: Option<String>,
    pub swatch: Option<Rect>,
    pub has_issues: bool,
    pub issue_indicator: Option<Point>,
    /// Selection outline around `bounds`, drawn while `selected`.
    pub outline: Rect,
    pub selected: bool,
    /// Set by the host while an inline name editor is open.
    pub editing_label: bool,
    pub z_index: i32,
    pub(crate) order: u64,
}

impl BlockNode {
    pub fn new(block: &DiagramBlock, config: &EditorConfig) -> Self {
        let mut node = Self {
            id: block.id,
            position: block.position,
            pictogram: None,
            bounds: Rect::default(),
            label: String::new(),
            label_rect: Rect::default(),
            secondary_label: None,
            secondary_rect: None,
            value: None,
            value_indicator: None,
            color: None,
            swatch: None,
            has_issues: false,
            issue_indicator: None,
            outline: Rect::default(),
            selected: false,
            editing_label: false,
            z_index: block.z_index,
            order: 0,
        };
        node.update(block, config);
        node
    }

    /// Recomputes everything derived from the diagram block.
    ///
    /// Leaves `selected` and `editing_label` alone.
    pub fn update(&mut self, block: &DiagramBlock, config: &EditorConfig) {
        let labels = &config.labels;
        self.position = block.position;
        self.pictogram = block.pictogram.clone();
        self.bounds = self
            .pictogram
            .as_ref()
            .map(|p| p.bounds)
            .unwrap_or_else(|| Rect::centered(Point::ZERO, PLACEHOLDER_SIZE, PLACEHOLDER_SIZE));
        self.outline = self.bounds.inflate(config.connector.outline_inflation);
        self.z_index = block.z_index;

        let center_x = self.bounds.center().x;
        self.label = block.label.clone();
        let primary_width = label_width(&self.label, labels);
        self.label_rect = Rect::new(
            center_x - primary_width / 2.0,
            self.bounds.max().y + labels.primary_gap,
            primary_width,
            labels.line_height,
        );

        self.secondary_label = block.secondary_label.clone();
        self.secondary_rect = self.secondary_label.as_deref().map(|text| {
            let width = label_width(text, labels);
            Rect::new(
                center_x - width / 2.0,
                self.label_rect.max().y + labels.secondary_gap,
                width,
                labels.line_height,
            )
        });

        self.value = block.value;
        self.value_indicator = block
            .value
            .map(|_| Point::new(center_x, self.bounds.y - labels.value_indicator_gap));

        self.color = block.color.clone();
        self.swatch = self.color.as_ref().map(|_| {
            Rect::new(
                self.bounds.x - SWATCH_SIZE - labels.value_indicator_gap,
                self.bounds.y,
                SWATCH_SIZE,
                SWATCH_SIZE,
            )
        });

        self.has_issues = block.has_issues;
        self.issue_indicator = block
            .has_issues
            .then(|| Point::new(self.bounds.max().x, self.bounds.y));
    }

    pub fn to_local(&self, design: Point) -> Point {
        Point::new(design.x - self.position.x, design.y - self.position.y)
    }

    pub fn to_design(&self, local: Point) -> Point {
        local + self.position.to_vector()
    }

    /// Exact body test against the collision shape; blocks without a
    /// pictogram use their placeholder square.
    pub fn body_contains(&self, design: Point) -> bool {
        let local = self.to_local(design);
        match &self.pictogram {
            Some(pictogram) => pictogram.contains(local),
            None => self.bounds.contains(local),
        }
    }

    /// Design-space bounds of the pictogram.
    pub fn design_bounds(&self) -> Rect {
        self.bounds.translated(self.position.to_vector())
    }

    pub fn translate(&mut self, delta: Vector) {
        self.position += delta;
    }
}

fn label_width(text: &str, labels: &LabelSettings) -> f64 {
    text.chars().count().max(1) as f64 * labels.char_width
}

/// Live connector.
#[derive(Debug, Clone)]
pub struct ConnectorNode {
    pub id: EntityId,
    pub origin: EntityId,
    pub target: EntityId,
    pub geometry: Option<ConnectorGeometry>,
    /// Wire with rounded corners at the midpoints.
    pub body: Option<Path>,
    /// Tessellated wire in design space.
    pub wire: Vec<Point>,
    pub head: Option<Path>,
    pub tail: Option<Path>,
    /// Filled decorations.
    pub fill: Option<Path>,
    /// Selection outline around the wire.
    pub outline: Option<Path>,
    /// Midpoint handles, design space.
    pub handles: SmallVec<[Point; 4]>,
    pub has_issues: bool,
    pub issue_indicator: Option<Point>,
    pub selected: bool,
    pub z_index: i32,
    pub(crate) order: u64,
}

impl ConnectorNode {
    pub fn new(id: EntityId, origin: EntityId, target: EntityId) -> Self {
        Self {
            id,
            origin,
            target,
            geometry: None,
            body: None,
            wire: Vec::new(),
            head: None,
            tail: None,
            fill: None,
            outline: None,
            handles: SmallVec::new(),
            has_issues: false,
            issue_indicator: None,
            selected: false,
            z_index: 0,
            order: 0,
        }
    }

    /// Recomputes the curves from new geometry; `None` clears them.
    pub fn update(
        &mut self,
        geometry: Option<&ConnectorGeometry>,
        has_issues: bool,
        settings: &ConnectorSettings,
    ) {
        self.has_issues = has_issues;
        let Some(geometry) = geometry else {
            self.clear_curves();
            return;
        };

        let points = geometry.points();
        let body = wire_path(&points, settings.corner_radius);
        self.wire = flatten(&body, settings.flatten_tolerance);
        self.body = Some(body);

        self.head = match geometry.head {
            Decoration::Arrow => arrowhead(&self.wire, true, settings),
            Decoration::None => None,
        };
        self.tail = match geometry.tail {
            Decoration::Arrow => arrowhead(&self.wire, false, settings),
            Decoration::None => None,
        };
        self.fill = join_paths(self.head.iter().chain(self.tail.iter()));
        self.outline = Some(outline_path(&self.wire, settings.outline_inflation));
        self.handles = geometry.midpoints.iter().copied().collect();
        self.issue_indicator = has_issues.then(|| self.wire_middle()).flatten();
        self.geometry = Some(geometry.clone());
    }

    fn clear_curves(&mut self) {
        self.geometry = None;
        self.body = None;
        self.wire.clear();
        self.head = None;
        self.tail = None;
        self.fill = None;
        self.outline = None;
        self.handles.clear();
        self.issue_indicator = None;
    }

    /// Point halfway along the wire.
    pub fn wire_middle(&self) -> Option<Point> {
        let total: f64 = self.wire.windows(2).map(|w| w[0].distance_to(&w[1])).sum();
        let mut remaining = total / 2.0;
        for w in self.wire.windows(2) {
            let length = w[0].distance_to(&w[1]);
            if length >= remaining && length > 0.0 {
                return Some(w[0] + (w[1] - w[0]) * (remaining / length));
            }
            remaining -= length;
        }
        self.wire.first().copied()
    }

    /// Shortest distance from a design point to the wire.
    pub fn distance_to_wire(&self, p: Point) -> Option<f64> {
        self.wire
            .windows(2)
            .map(|w| distance_to_segment(p, w[0], w[1]))
            .min_by(|a, b| a.total_cmp(b))
    }

    pub fn bounds(&self) -> Option<Rect> {
        Rect::bounding(self.wire.iter().copied())
    }

    /// Moves every midpoint handle by `delta`, keeping the endpoints.
    pub fn translate_midpoints(&mut self, delta: Vector, settings: &ConnectorSettings) {
        let Some(mut geometry) = self.geometry.clone() else {
            return;
        };
        if geometry.midpoints.is_empty() {
            return;
        }
        for midpoint in &mut geometry.midpoints {
            *midpoint += delta;
        }
        self.update(Some(&geometry), self.has_issues, settings);
    }

    /// Moves a single midpoint handle.
    pub fn move_handle(&mut self, index: usize, to: Point, settings: &ConnectorSettings) -> bool {
        let Some(mut geometry) = self.geometry.clone() else {
            return false;
        };
        let Some(midpoint) = geometry.midpoints.get_mut(index) else {
            return false;
        };
        *midpoint = to;
        self.update(Some(&geometry), self.has_issues, settings);
        true
    }
}

fn wire_path(points: &[Point], corner_radius: f64) -> Path {
    let mut builder = Path::builder();
    let Some(first) = points.first() else {
        return builder.build();
    };
    builder.begin(point(first.x as f32, first.y as f32));
    for i in 1..points.len() {
        let current = points[i];
        if i + 1 < points.len() && corner_radius > 0.0 {
            let previous = points[i - 1];
            let next = points[i + 1];
            let r_in = corner_radius.min(previous.distance_to(&current) / 2.0);
            let r_out = corner_radius.min(current.distance_to(&next) / 2.0);
            let enter = current + (previous - current).normalized() * r_in;
            let leave = current + (next - current).normalized() * r_out;
            builder.line_to(point(enter.x as f32, enter.y as f32));
            builder.quadratic_bezier_to(
                point(current.x as f32, current.y as f32),
                point(leave.x as f32, leave.y as f32),
            );
        } else {
            builder.line_to(point(current.x as f32, current.y as f32));
        }
    }
    builder.end(false);
    builder.build()
}

fn flatten(path: &Path, tolerance: f64) -> Vec<Point> {
    let mut points = Vec::new();
    for event in path.iter().flattened(tolerance as f32) {
        match event {
            lyon::path::Event::Begin { at } => {
                points.push(Point::new(at.x as f64, at.y as f64));
            }
            lyon::path::Event::Line { to, .. } => {
                points.push(Point::new(to.x as f64, to.y as f64));
            }
            _ => {}
        }
    }
    points
}

/// Triangle at the wire's end (`at_end`) or start.
fn arrowhead(wire: &[Point], at_end: bool, settings: &ConnectorSettings) -> Option<Path> {
    if wire.len() < 2 {
        return None;
    }
    let (tip, before) = if at_end {
        (wire[wire.len() - 1], wire[wire.len() - 2])
    } else {
        (wire[0], wire[1])
    };
    let direction = (tip - before).normalized();
    if direction.is_zero() {
        return None;
    }
    let base = tip - direction * settings.arrowhead_length;
    let side = direction.perpendicular() * (settings.arrowhead_width / 2.0);
    let corners = [tip, base + side, base - side];

    let mut builder = Path::builder();
    builder.begin(point(corners[0].x as f32, corners[0].y as f32));
    for c in &corners[1..] {
        builder.line_to(point(c.x as f32, c.y as f32));
    }
    builder.close();
    Some(builder.build())
}

fn join_paths<'a>(paths: impl Iterator<Item = &'a Path>) -> Option<Path> {
    let mut builder = Path::builder();
    let mut any = false;
    for path in paths {
        for event in path.iter() {
            builder.path_event(event);
        }
        any = true;
    }
    any.then(|| builder.build())
}

/// One inflated quad per wire segment.
fn outline_path(wire: &[Point], inflation: f64) -> Path {
    let mut builder = Path::builder();
    for w in wire.windows(2) {
        let direction = (w[1] - w[0]).normalized();
        if direction.is_zero() {
            continue;
        }
        let along = direction * inflation;
        let side = direction.perpendicular() * inflation;
        let a = w[0] - along;
        let b = w[1] + along;
        let quad = [a + side, b + side, b - side, a - side];
        builder.begin(point(quad[0].x as f32, quad[0].y as f32));
        for q in &quad[1..] {
            builder.line_to(point(q.x as f32, q.y as f32));
        }
        builder.close();
    }
    builder.build()
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let length_sq = ab.x * ab.x + ab.y * ab.y;
    if length_sq == 0.0 {
        return p.distance_to(&a);
    }
    let ap = p - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / length_sq).clamp(0.0, 1.0);
    p.distance_to(&(a + ab * t))
}

/// Borrowed view of a live scene node.
#[derive(Debug, Clone, Copy)]
pub enum SceneNodeRef<'a> {
    Block(&'a BlockNode),
    Connector(&'a ConnectorNode),
}

impl SceneNodeRef<'_> {
    pub fn id(&self) -> EntityId {
        match self {
            SceneNodeRef::Block(b) => b.id,
            SceneNodeRef::Connector(c) => c.id,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            SceneNodeRef::Block(_) => NodeKind::Block,
            SceneNodeRef::Connector(_) => NodeKind::Connector,
        }
    }
}

/// Transient node outside the registry's tracked set.
#[derive(Debug, Clone)]
pub enum PreviewNode {
    /// Place-tool shadow.
    Shadow(BlockNode),
    /// Connector being drawn by the connect tool.
    Connector(ConnectorNode),
}
