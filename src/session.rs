//! Scripted editing session driven through the [`Editor`] facade.
//!
//! Feeds the same pointer input a hosting UI would produce and checks the
//! resulting design after every step.

use std::path::Path;

use anyhow::{ensure, Context};
use tracing::{debug, info, warn};

use diagramkit_core::{
    DesignController, EditorConfig, EditorEvent, EntityId, EventBus, EventCategory, EventFilter,
    MemoryDesign, ObjectId, Point, Vector,
};
use diagramkit_editor::{Editor, InputEvent};

/// Final state of a scripted session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub version: u64,
    pub nodes: usize,
    pub edges: usize,
    pub selected: usize,
    pub zoom: f64,
}

/// Load the editor configuration from `path`, or use defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<EditorConfig> {
    match path {
        Some(path) => EditorConfig::load_from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => Ok(EditorConfig::default()),
    }
}

/// Build a small stock/flow model: place three nodes, connect them, drag
/// the stock, step through undo/redo and edit attributes.
pub fn run_scripted_session(config: EditorConfig) -> anyhow::Result<SessionSummary> {
    let bus = EventBus::new();
    bus.subscribe(EventFilter::All, |event| debug!("{}", event.description()));
    bus.subscribe(
        EventFilter::Categories(vec![EventCategory::Diagnostic]),
        |event| {
            if let EditorEvent::Diagnostic(diagnostic) = event {
                warn!("[{}] {}", diagnostic.source, diagnostic.message);
            }
        },
    );

    let mut editor = Editor::with_bus(config, bus);
    editor.set_design(Box::new(MemoryDesign::stock_flow()));
    editor.set_viewport_size(Vector::new(800.0, 600.0));

    let cloud = place(&mut editor, "Cloud", Point::new(-80.0, 80.0))?;
    let flow = place(&mut editor, "Flow", Point::new(20.0, 80.0))?;
    let stock = place(&mut editor, "Stock", Point::new(120.0, 80.0))?;
    info!("Placed cloud, flow and stock");

    ensure!(editor.switch_tool_named("connect"), "connect tool unavailable");
    connect(&mut editor, Point::new(-80.0, 80.0), Point::new(20.0, 80.0))?;
    connect(&mut editor, Point::new(20.0, 80.0), Point::new(120.0, 80.0))?;
    ensure!(edge_count(&editor) == 2, "expected two connectors");
    info!("Connected {:?} -> {:?} -> {:?}", cloud, flow, stock);

    ensure!(editor.switch_tool_named("selection"), "selection tool unavailable");
    let from = Point::new(120.0, 80.0);
    let to = Point::new(160.0, 100.0);
    editor.handle_input(&InputEvent::press(from));
    editor.handle_input(&InputEvent::drag(Point::new(140.0, 90.0)));
    editor.handle_input(&InputEvent::drag(to));
    editor.handle_input(&InputEvent::release(to));
    ensure!(position_of(&editor, stock)? == to, "stock did not follow the drag");
    info!("Dragged stock to ({}, {})", to.x, to.y);

    ensure!(editor.undo(), "nothing to undo after drag");
    ensure!(position_of(&editor, stock)? == from, "undo did not restore the stock");
    ensure!(editor.redo(), "nothing to redo after undo");
    ensure!(position_of(&editor, stock)? == to, "redo did not reapply the drag");
    info!("Undo/redo of the drag verified");

    editor
        .rename(EntityId::Object(stock), "population")
        .context("rename failed")?;
    editor
        .set_formula(EntityId::Object(flow), "population * 0.02")
        .context("set formula failed")?;
    editor
        .set_formula(EntityId::Object(stock), "100")
        .context("set formula failed")?;

    editor.zoom_to_fit();

    let design = editor.design().context("design detached during session")?;
    let snapshot = design.snapshot();
    let summary = SessionSummary {
        version: design.version(),
        nodes: snapshot.nodes().count(),
        edges: snapshot.edges().count(),
        selected: editor.selection().len(),
        zoom: editor.canvas().view().zoom(),
    };
    info!("Session summary: {:?}", summary);
    Ok(summary)
}

fn place(editor: &mut Editor, type_name: &str, at: Point) -> anyhow::Result<ObjectId> {
    let before = node_ids(editor);
    editor.set_palette_item(Some(type_name.to_string()));
    editor.handle_input(&InputEvent::hover(at));
    editor.handle_input(&InputEvent::press(at));
    editor.handle_input(&InputEvent::release(at));

    node_ids(editor)
        .into_iter()
        .find(|id| !before.contains(id))
        .with_context(|| format!("placing {} at ({}, {}) created no node", type_name, at.x, at.y))
}

fn connect(editor: &mut Editor, from: Point, to: Point) -> anyhow::Result<()> {
    let before = edge_count(editor);
    editor.handle_input(&InputEvent::press(from));
    editor.handle_input(&InputEvent::drag(to));
    editor.handle_input(&InputEvent::release(to));
    ensure!(
        edge_count(editor) == before + 1,
        "no connector created from ({}, {}) to ({}, {})",
        from.x,
        from.y,
        to.x,
        to.y
    );
    Ok(())
}

fn node_ids(editor: &Editor) -> Vec<ObjectId> {
    editor
        .design()
        .map(|design| design.snapshot().nodes().map(|node| node.id).collect())
        .unwrap_or_default()
}

fn edge_count(editor: &Editor) -> usize {
    editor
        .design()
        .map(|design| design.snapshot().edges().count())
        .unwrap_or(0)
}

fn position_of(editor: &Editor, id: ObjectId) -> anyhow::Result<Point> {
    editor
        .design()
        .and_then(|design| design.snapshot().get(id))
        .and_then(|object| object.position)
        .with_context(|| format!("{:?} has no position", id))
}
