use std::collections::{BTreeSet, HashSet};

use proptest::prelude::*;

use diagramkit_core::{EditorConfig, EntityId, EventBus, ObjectId, Point, Rect};
use diagramkit_editor::{
    route_connector, Diagram, DiagramBlock, DiagramCanvas, DiagramConnector, NodeKind, SceneSync,
};

fn id(raw: u64) -> EntityId {
    EntityId::Object(ObjectId(raw))
}

fn position(raw: u64) -> Point {
    Point::new(raw as f64 * 50.0, (raw % 3) as f64 * 40.0)
}

/// Blocks for every id in `blocks`; connector `100 + i` for each edge whose
/// endpoints both exist.
fn diagram(blocks: &BTreeSet<u64>, edges: &[(u64, u64)]) -> Diagram {
    let bounds = Rect::centered(Point::ZERO, 16.0, 16.0);
    let mut diagram = Diagram::new();
    for &raw in blocks {
        let mut block = DiagramBlock::new(id(raw), position(raw));
        block.label = format!("n{}", raw);
        diagram.blocks.push(block);
    }
    for (i, &(origin, target)) in edges.iter().enumerate() {
        if !(blocks.contains(&origin) && blocks.contains(&target)) {
            continue;
        }
        let geometry = route_connector(position(origin), bounds, position(target), bounds, &[]);
        diagram.connectors.push(DiagramConnector {
            id: id(100 + i as u64),
            origin: id(origin),
            target: id(target),
            geometry: Some(geometry),
            has_issues: false,
            z_index: 0,
        });
    }
    diagram
}

fn live(canvas: &DiagramCanvas, kind: NodeKind) -> HashSet<EntityId> {
    canvas.live_ids(kind).into_iter().collect()
}

fn canvas() -> DiagramCanvas {
    DiagramCanvas::new(EditorConfig::default(), EventBus::new())
}

proptest! {
    #[test]
    fn prop_live_ids_match_diagram(
        first in prop::collection::btree_set(0u64..20, 0..10),
        second in prop::collection::btree_set(0u64..20, 0..10),
        edges in prop::collection::vec((0u64..20, 0u64..20), 0..8),
    ) {
        let sync = SceneSync::new();
        let mut canvas = canvas();
        sync.reconcile(&diagram(&first, &edges), &mut canvas);

        let target = diagram(&second, &edges);
        sync.reconcile(&target, &mut canvas);

        let blocks: HashSet<EntityId> = target.block_ids().collect();
        let connectors: HashSet<EntityId> = target.connector_ids().collect();
        prop_assert_eq!(live(&canvas, NodeKind::Block), blocks);
        prop_assert_eq!(live(&canvas, NodeKind::Connector), connectors);
    }

    #[test]
    fn prop_reconcile_is_idempotent(
        blocks in prop::collection::btree_set(0u64..20, 0..10),
        edges in prop::collection::vec((0u64..20, 0u64..20), 0..8),
    ) {
        let sync = SceneSync::new();
        let mut canvas = canvas();
        let target = diagram(&blocks, &edges);
        sync.reconcile(&target, &mut canvas);

        let again = sync.reconcile(&target, &mut canvas);
        prop_assert!(again.is_stable());
        prop_assert_eq!(again.blocks.updated, target.blocks.len());
        prop_assert_eq!(again.connectors.updated, target.connectors.len());
    }
}

#[test]
fn test_identity_survives_unrelated_changes() {
    let sync = SceneSync::new();
    let mut canvas = canvas();
    let first: BTreeSet<u64> = [1, 2, 3].into_iter().collect();
    sync.reconcile(&diagram(&first, &[(1, 2)]), &mut canvas);

    canvas.block_mut(id(1)).unwrap().editing_label = true;
    canvas.apply_selection([id(1), id(100)].iter());

    let second: BTreeSet<u64> = [1, 2, 4].into_iter().collect();
    let report = sync.reconcile(&diagram(&second, &[(1, 2)]), &mut canvas);
    assert_eq!(report.blocks.created, 1);
    assert_eq!(report.blocks.removed, 1);
    assert_eq!(report.connectors.updated, 1);

    let block = canvas.block(id(1)).unwrap();
    assert!(block.editing_label);
    assert!(block.selected);
    assert!(canvas.connector(id(100)).unwrap().selected);
    assert!(canvas.block(id(3)).is_none());
}

#[test]
fn test_connector_without_geometry_is_not_created() {
    let sync = SceneSync::new();
    let mut canvas = canvas();
    let blocks: BTreeSet<u64> = [1, 2].into_iter().collect();
    let mut target = diagram(&blocks, &[]);
    target.connectors.push(DiagramConnector {
        id: id(50),
        origin: id(1),
        target: id(9),
        geometry: None,
        has_issues: false,
        z_index: 0,
    });

    let report = sync.reconcile(&target, &mut canvas);
    assert_eq!(report.connectors.skipped, 1);
    assert_eq!(report.connectors.created, 0);
    assert!(canvas.connector(id(50)).is_none());
}
