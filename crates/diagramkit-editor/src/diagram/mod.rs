//! Diagram snapshots: renderable blocks and connectors derived from the
//! design graph.
//!
//! A [`Diagram`] is immutable input to the scene sync engine. It is produced
//! by [`compose`] each time the design changes and never mutated by the
//! editor.

mod compose;

pub use compose::{compose, route_connector};

use diagramkit_core::{EntityId, Point};

use crate::pictogram::Pictogram;

/// End decoration of a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decoration {
    #[default]
    None,
    Arrow,
}

/// Routed geometry of a connector, in design space.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorGeometry {
    pub origin_point: Point,
    pub target_point: Point,
    pub midpoints: Vec<Point>,
    pub head: Decoration,
    pub tail: Decoration,
}

impl ConnectorGeometry {
    /// Polyline through origin, midpoints and target.
    pub fn points(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.midpoints.len() + 2);
        points.push(self.origin_point);
        points.extend(self.midpoints.iter().copied());
        points.push(self.target_point);
        points
    }
}

/// A renderable node.
#[derive(Debug, Clone)]
pub struct DiagramBlock {
    pub id: EntityId,
    /// Design-space position of the pictogram origin.
    pub position: Point,
    pub pictogram: Option<Pictogram>,
    pub label: String,
    pub secondary_label: Option<String>,
    pub value: Option<f64>,
    pub color: Option<String>,
    pub has_issues: bool,
    pub z_index: i32,
}

impl DiagramBlock {
    pub fn new(id: EntityId, position: Point) -> Self {
        Self {
            id,
            position,
            pictogram: None,
            label: String::new(),
            secondary_label: None,
            value: None,
            color: None,
            has_issues: false,
            z_index: 1,
        }
    }
}

/// A renderable edge.
#[derive(Debug, Clone)]
pub struct DiagramConnector {
    pub id: EntityId,
    pub origin: EntityId,
    pub target: EntityId,
    /// Missing until both endpoints can be placed.
    pub geometry: Option<ConnectorGeometry>,
    pub has_issues: bool,
    pub z_index: i32,
}

/// Blocks and connectors of one design version.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    pub blocks: Vec<DiagramBlock>,
    pub connectors: Vec<DiagramConnector>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.blocks.iter().map(|b| b.id)
    }

    pub fn connector_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.connectors.iter().map(|c| c.id)
    }

    pub fn block(&self, id: EntityId) -> Option<&DiagramBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn connector(&self, id: EntityId) -> Option<&DiagramConnector> {
        self.connectors.iter().find(|c| c.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.connectors.is_empty()
    }
}
