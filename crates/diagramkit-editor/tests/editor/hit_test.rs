use diagramkit_core::{EditorConfig, EntityId, EventBus, HitTestSettings, ObjectId, Point, Rect};
use diagramkit_editor::{
    route_connector, Diagram, DiagramBlock, DiagramCanvas, DiagramConnector, HitPart, HitTester,
    NodeKind, SceneSync,
};

fn id(raw: u64) -> EntityId {
    EntityId::Object(ObjectId(raw))
}

fn placeholder() -> Rect {
    Rect::centered(Point::ZERO, 16.0, 16.0)
}

fn canvas_with(diagram: &Diagram) -> DiagramCanvas {
    let mut canvas = DiagramCanvas::new(EditorConfig::default(), EventBus::new());
    SceneSync::new().reconcile(diagram, &mut canvas);
    canvas
}

fn labelled_block() -> Diagram {
    let mut block = DiagramBlock::new(id(1), Point::ZERO);
    block.label = "abc".to_string();
    block.secondary_label = Some("Stock".to_string());
    block.has_issues = true;
    Diagram {
        blocks: vec![block],
        connectors: Vec::new(),
    }
}

fn bent_connector() -> Diagram {
    let geometry = route_connector(
        Point::new(0.0, 0.0),
        placeholder(),
        Point::new(100.0, 0.0),
        placeholder(),
        &[Point::new(50.0, 50.0)],
    );
    Diagram {
        blocks: vec![
            DiagramBlock::new(id(1), Point::new(0.0, 0.0)),
            DiagramBlock::new(id(2), Point::new(100.0, 0.0)),
        ],
        connectors: vec![DiagramConnector {
            id: id(10),
            origin: id(1),
            target: id(2),
            geometry: Some(geometry),
            has_issues: false,
            z_index: 0,
        }],
    }
}

#[test]
fn test_block_part_priority() {
    let canvas = canvas_with(&labelled_block());
    let part = |x: f64, y: f64| canvas.hit_target(Point::new(x, y)).map(|t| t.part);

    // Indicator sits on the body's top-right corner and wins over it.
    assert_eq!(part(8.0, -8.0), Some(HitPart::ErrorIndicator));
    assert_eq!(part(0.0, 20.0), Some(HitPart::PrimaryLabel));
    assert_eq!(part(0.0, 38.0), Some(HitPart::SecondaryLabel));
    assert_eq!(part(0.0, 0.0), Some(HitPart::Body));
    assert_eq!(part(100.0, 100.0), None);
}

#[test]
fn test_later_insertion_wins_ties() {
    let diagram = Diagram {
        blocks: vec![
            DiagramBlock::new(id(1), Point::new(0.0, 0.0)),
            DiagramBlock::new(id(2), Point::new(10.0, 0.0)),
        ],
        connectors: Vec::new(),
    };
    let canvas = canvas_with(&diagram);
    let hit = canvas.hit_target(Point::new(5.0, 0.0)).unwrap();
    assert_eq!(hit.entity, id(2));
    assert_eq!(hit.kind, NodeKind::Block);
}

#[test]
fn test_z_index_overrides_insertion_order() {
    let mut diagram = Diagram {
        blocks: vec![
            DiagramBlock::new(id(1), Point::new(0.0, 0.0)),
            DiagramBlock::new(id(2), Point::new(10.0, 0.0)),
        ],
        connectors: Vec::new(),
    };
    diagram.blocks[0].z_index = 5;
    let canvas = canvas_with(&diagram);
    assert_eq!(canvas.hit_target(Point::new(5.0, 0.0)).unwrap().entity, id(1));

    let top = canvas.hit_object(Point::new(5.0, 0.0)).unwrap();
    assert_eq!(top.id(), id(1));
}

#[test]
fn test_connector_handle_and_wire() {
    let canvas = canvas_with(&bent_connector());

    let handle = canvas.hit_target(Point::new(50.0, 50.0)).unwrap();
    assert_eq!(handle.entity, id(10));
    assert_eq!(handle.kind, NodeKind::Connector);
    assert_eq!(handle.part, HitPart::Handle(0));

    let wire = canvas.hit_target(Point::new(25.0, 25.0)).unwrap();
    assert_eq!((wire.entity, wire.part), (id(10), HitPart::Body));

    // Within the body tolerance of the straight segment.
    assert_eq!(
        canvas.hit_target(Point::new(25.0, 30.0)).map(|t| t.part),
        Some(HitPart::Body)
    );
    assert_eq!(canvas.hit_target(Point::new(25.0, 35.0)), None);
}

#[test]
fn test_blocks_above_connectors() {
    let canvas = canvas_with(&bent_connector());
    // The connector starts on the block's boundary; the block is on top.
    let hit = canvas.hit_target(Point::new(7.0, 7.0)).unwrap();
    assert_eq!(hit.entity, id(1));
}

#[test]
fn test_hit_test_respects_zoom() {
    let mut canvas = canvas_with(&bent_connector());
    canvas.set_zoom(2.0, None);
    let hit = canvas.hit_target(Point::new(100.0, 100.0)).unwrap();
    assert_eq!(hit.part, HitPart::Handle(0));
    assert_eq!(canvas.hit_target(Point::new(50.0, 50.0)).map(|t| t.part), Some(HitPart::Body));
}

#[test]
fn test_custom_settings() {
    let canvas = canvas_with(&bent_connector());
    let point = Point::new(50.0, 62.0);
    assert_ne!(
        canvas.hit_target(point).map(|t| t.part),
        Some(HitPart::Handle(0))
    );

    let settings = HitTestSettings {
        handle_radius: 20.0,
        ..HitTestSettings::default()
    };
    let tester = HitTester::with_settings(&canvas, &settings);
    assert_eq!(tester.hit_target(point).map(|t| t.part), Some(HitPart::Handle(0)));
}
