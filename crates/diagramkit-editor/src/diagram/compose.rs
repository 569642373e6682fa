use std::collections::HashMap;

use diagramkit_core::{DesignSnapshot, EntityId, Metamodel, ObjectId, Point, Rect};

use super::{ConnectorGeometry, Decoration, Diagram, DiagramBlock, DiagramConnector};
use crate::pictogram::PictogramCollection;

/// Size used to clip connectors at blocks without a pictogram.
const PLACEHOLDER_SIZE: f64 = 16.0;

/// Routes a connector between two placed blocks.
///
/// `origin_bounds`/`target_bounds` are the blocks' pictogram bounds in local
/// space. Endpoints are clipped to those boxes, aiming at the neighbouring
/// waypoint.
pub fn route_connector(
    origin: Point,
    origin_bounds: Rect,
    target: Point,
    target_bounds: Rect,
    midpoints: &[Point],
) -> ConnectorGeometry {
    let origin_box = origin_bounds.translated(origin.to_vector());
    let target_box = target_bounds.translated(target.to_vector());
    let first_waypoint = midpoints.first().copied().unwrap_or(target_box.center());
    let last_waypoint = midpoints.last().copied().unwrap_or(origin_box.center());

    ConnectorGeometry {
        origin_point: origin_box.boundary_toward(first_waypoint),
        target_point: target_box.boundary_toward(last_waypoint),
        midpoints: midpoints.to_vec(),
        head: Decoration::Arrow,
        tail: Decoration::None,
    }
}

/// Derives the diagram of a design snapshot.
pub fn compose(
    snapshot: &DesignSnapshot,
    metamodel: &Metamodel,
    pictograms: &PictogramCollection,
) -> Diagram {
    let mut diagram = Diagram::new();
    let mut placed: HashMap<ObjectId, (Point, Rect)> = HashMap::new();

    for node in snapshot.nodes() {
        let node_type = metamodel.node_type(&node.type_name);
        let pictogram = node_type
            .and_then(|t| pictograms.resolve(&t.pictogram))
            .cloned();
        let position = node.position.unwrap_or(Point::ZERO);
        let bounds = pictogram
            .as_ref()
            .map(|p| p.bounds)
            .unwrap_or_else(|| Rect::centered(Point::ZERO, PLACEHOLDER_SIZE, PLACEHOLDER_SIZE));
        placed.insert(node.id, (position, bounds));

        let mut block = DiagramBlock::new(EntityId::Object(node.id), position);
        block.pictogram = pictogram;
        block.label = node.name.clone().unwrap_or_default();
        block.secondary_label = Some(node.type_name.clone());
        block.value = node_type
            .filter(|t| t.has_value)
            .and_then(|_| node.numeric_value());
        block.color = node.color().map(str::to_string);
        block.has_issues = snapshot.has_issues(node.id);
        diagram.blocks.push(block);
    }

    for edge in snapshot.edges() {
        let Some((origin, target)) = edge.endpoints() else {
            continue;
        };
        let geometry = match (placed.get(&origin), placed.get(&target)) {
            (Some(&(op, ob)), Some(&(tp, tb))) => {
                Some(route_connector(op, ob, tp, tb, &edge.midpoints))
            }
            _ => None,
        };
        diagram.connectors.push(DiagramConnector {
            id: EntityId::Object(edge.id),
            origin: EntityId::Object(origin),
            target: EntityId::Object(target),
            geometry,
            has_issues: snapshot.has_issues(edge.id),
            z_index: 0,
        });
    }

    tracing::debug!(
        "Composed diagram v{}: {} blocks, {} connectors",
        snapshot.version,
        diagram.blocks.len(),
        diagram.connectors.len()
    );
    diagram
}
