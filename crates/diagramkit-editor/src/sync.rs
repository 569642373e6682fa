//! Scene sync engine.
//!
//! Reconciles a [`Diagram`] against the canvas' live nodes, one pass per
//! node kind:
//!
//! 1. collect the live ids of that kind;
//! 2. update existing nodes in place, create missing ones;
//! 3. destroy nodes whose id was not in the diagram.
//!
//! Updating in place keeps node identity and per-node transient state (the
//! `selected` and `editing_label` flags) across design changes.

use indexmap::IndexSet;

use diagramkit_core::EntityId;

use crate::diagram::Diagram;
use crate::scene::{BlockNode, ConnectorNode, DiagramCanvas, NodeKind};

/// Counters of one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    pub created: usize,
    pub updated: usize,
    pub removed: usize,
    /// Connectors without geometry left untouched.
    pub skipped: usize,
}

impl PassStats {
    pub fn churn(&self) -> usize {
        self.created + self.removed
    }
}

/// Outcome of [`SceneSync::reconcile`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub blocks: PassStats,
    pub connectors: PassStats,
}

impl SyncReport {
    /// True when no node was created or removed.
    pub fn is_stable(&self) -> bool {
        self.blocks.churn() == 0 && self.connectors.churn() == 0
    }
}

/// The scene sync engine.
#[derive(Debug, Default)]
pub struct SceneSync;

impl SceneSync {
    pub fn new() -> Self {
        Self
    }

    pub fn reconcile(&self, diagram: &Diagram, canvas: &mut DiagramCanvas) -> SyncReport {
        let report = SyncReport {
            blocks: self.sync_blocks(diagram, canvas),
            connectors: self.sync_connectors(diagram, canvas),
        };
        tracing::debug!(
            "Reconciled scene: blocks +{} ~{} -{}, connectors +{} ~{} -{} (skipped {})",
            report.blocks.created,
            report.blocks.updated,
            report.blocks.removed,
            report.connectors.created,
            report.connectors.updated,
            report.connectors.removed,
            report.connectors.skipped,
        );
        report
    }

    fn sync_blocks(&self, diagram: &Diagram, canvas: &mut DiagramCanvas) -> PassStats {
        let mut stats = PassStats::default();
        let mut remaining: IndexSet<EntityId> =
            canvas.live_ids(NodeKind::Block).into_iter().collect();
        let config = canvas.config().clone();

        for block in &diagram.blocks {
            if remaining.shift_remove(&block.id) {
                if let Some(node) = canvas.block_mut(block.id) {
                    node.update(block, &config);
                    stats.updated += 1;
                }
            } else if !canvas.contains(NodeKind::Block, block.id) {
                canvas.insert_block(BlockNode::new(block, &config));
                stats.created += 1;
            }
        }

        for id in remaining {
            if canvas.remove_node(NodeKind::Block, id) {
                stats.removed += 1;
            }
        }
        stats
    }

    fn sync_connectors(&self, diagram: &Diagram, canvas: &mut DiagramCanvas) -> PassStats {
        let mut stats = PassStats::default();
        let mut remaining: IndexSet<EntityId> =
            canvas.live_ids(NodeKind::Connector).into_iter().collect();
        let settings = canvas.config().connector.clone();

        for connector in &diagram.connectors {
            let live = remaining.shift_remove(&connector.id);
            let Some(geometry) = connector.geometry.as_ref() else {
                // Stale until geometry becomes available.
                stats.skipped += 1;
                continue;
            };
            if live {
                if let Some(node) = canvas.connector_mut(connector.id) {
                    node.origin = connector.origin;
                    node.target = connector.target;
                    node.z_index = connector.z_index;
                    node.update(Some(geometry), connector.has_issues, &settings);
                    stats.updated += 1;
                }
            } else if !canvas.contains(NodeKind::Connector, connector.id) {
                let mut node = ConnectorNode::new(connector.id, connector.origin, connector.target);
                node.z_index = connector.z_index;
                node.update(Some(geometry), connector.has_issues, &settings);
                canvas.insert_connector(node);
                stats.created += 1;
            }
        }

        for id in remaining {
            if canvas.remove_node(NodeKind::Connector, id) {
                stats.removed += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{ConnectorGeometry, Decoration, DiagramBlock, DiagramConnector};
    use diagramkit_core::{EditorConfig, EventBus, ObjectId, Point};

    fn id(raw: u64) -> EntityId {
        EntityId::Object(ObjectId(raw))
    }

    fn connector(raw: u64, geometry: bool) -> DiagramConnector {
        DiagramConnector {
            id: id(raw),
            origin: id(1),
            target: id(2),
            geometry: geometry.then(|| ConnectorGeometry {
                origin_point: Point::new(0.0, 0.0),
                target_point: Point::new(50.0, 0.0),
                midpoints: Vec::new(),
                head: Decoration::Arrow,
                tail: Decoration::None,
            }),
            has_issues: false,
            z_index: 0,
        }
    }

    fn diagram() -> Diagram {
        Diagram {
            blocks: vec![
                DiagramBlock::new(id(1), Point::new(0.0, 0.0)),
                DiagramBlock::new(id(2), Point::new(50.0, 0.0)),
            ],
            connectors: vec![connector(3, true)],
        }
    }

    #[test]
    fn test_update_keeps_transient_state() {
        let mut canvas = DiagramCanvas::new(EditorConfig::default(), EventBus::new());
        let sync = SceneSync::new();
        sync.reconcile(&diagram(), &mut canvas);
        canvas.block_mut(id(1)).unwrap().editing_label = true;
        canvas.block_mut(id(1)).unwrap().selected = true;

        let mut moved = diagram();
        moved.blocks[0].position = Point::new(10.0, 10.0);
        moved.blocks[0].label = "renamed".into();
        let report = sync.reconcile(&moved, &mut canvas);

        assert!(report.is_stable());
        assert_eq!(report.blocks.updated, 2);
        let node = canvas.block(id(1)).unwrap();
        assert_eq!(node.position, Point::new(10.0, 10.0));
        assert_eq!(node.label, "renamed");
        assert!(node.editing_label);
        assert!(node.selected);
    }

    #[test]
    fn test_connector_without_geometry_left_stale() {
        let mut canvas = DiagramCanvas::new(EditorConfig::default(), EventBus::new());
        let sync = SceneSync::new();
        sync.reconcile(&diagram(), &mut canvas);
        let wire_before = canvas.connector(id(3)).unwrap().wire.clone();

        let mut without = diagram();
        without.connectors = vec![connector(3, false), connector(4, false)];
        let report = sync.reconcile(&without, &mut canvas);

        assert_eq!(report.connectors.skipped, 2);
        assert_eq!(report.connectors.removed, 0);
        assert_eq!(canvas.connector(id(3)).unwrap().wire, wire_before);
        assert!(canvas.connector(id(4)).is_none());

        without.connectors = vec![connector(4, true)];
        let report = sync.reconcile(&without, &mut canvas);
        assert_eq!(report.connectors.created, 1);
        assert_eq!(report.connectors.removed, 1);
    }

    #[test]
    fn test_block_without_pictogram_is_placeholder() {
        let mut canvas = DiagramCanvas::new(EditorConfig::default(), EventBus::new());
        SceneSync::new().reconcile(&diagram(), &mut canvas);
        let node = canvas.block(id(1)).unwrap();
        assert!(node.pictogram.is_none());
        assert!(!node.bounds.is_empty());
    }
}
