//! Hit testing: resolves a screen point to the topmost interactive target.
//!
//! Nodes are visited topmost first (z-index, then insertion order). Within
//! one node the sub-targets are tried in a fixed priority:
//!
//! ```text
//! handle > error indicator > primary label > secondary label > body
//! ```
//!
//! The first node producing any match wins.

use diagramkit_core::{EntityId, HitTestSettings, Point};

use super::node::{BlockNode, ConnectorNode, NodeKind, SceneNodeRef};
use super::registry::DiagramCanvas;

/// Part of a node that was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    PrimaryLabel,
    SecondaryLabel,
    ErrorIndicator,
    /// Connector midpoint handle with its index.
    Handle(usize),
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTarget {
    pub entity: EntityId,
    pub kind: NodeKind,
    pub part: HitPart,
}

/// Pure queries over the canvas' tracked nodes.
pub struct HitTester<'a> {
    canvas: &'a DiagramCanvas,
    settings: &'a HitTestSettings,
}

impl<'a> HitTester<'a> {
    pub fn new(canvas: &'a DiagramCanvas) -> Self {
        Self {
            canvas,
            settings: &canvas.config().hit_test,
        }
    }

    pub fn with_settings(canvas: &'a DiagramCanvas, settings: &'a HitTestSettings) -> Self {
        Self { canvas, settings }
    }

    /// Highest-priority target under a screen point.
    pub fn hit_target(&self, screen: Point) -> Option<HitTarget> {
        let design = self.canvas.to_design(screen);
        self.canvas.nodes_top_down().into_iter().find_map(|node| {
            let part = match node {
                SceneNodeRef::Block(block) => self.block_part(block, design),
                SceneNodeRef::Connector(connector) => self.connector_part(connector, design),
            }?;
            Some(HitTarget {
                entity: node.id(),
                kind: node.kind(),
                part,
            })
        })
    }

    /// Topmost node whose body contains a screen point, ignoring handles,
    /// labels and indicators.
    pub fn hit_object(&self, screen: Point) -> Option<SceneNodeRef<'a>> {
        let design = self.canvas.to_design(screen);
        self.canvas
            .nodes_top_down()
            .into_iter()
            .find(|node| match node {
                SceneNodeRef::Block(block) => block.body_contains(design),
                SceneNodeRef::Connector(connector) => self.wire_hit(connector, design),
            })
    }

    fn block_part(&self, block: &BlockNode, design: Point) -> Option<HitPart> {
        let local = block.to_local(design);
        if block
            .issue_indicator
            .is_some_and(|c| c.distance_to(&local) <= self.settings.indicator_radius)
        {
            return Some(HitPart::ErrorIndicator);
        }
        if block.label_rect.contains(local) {
            return Some(HitPart::PrimaryLabel);
        }
        if block.secondary_rect.is_some_and(|r| r.contains(local)) {
            return Some(HitPart::SecondaryLabel);
        }
        block.body_contains(design).then_some(HitPart::Body)
    }

    fn connector_part(&self, connector: &ConnectorNode, design: Point) -> Option<HitPart> {
        if let Some(index) = connector
            .handles
            .iter()
            .position(|h| h.distance_to(&design) <= self.settings.handle_radius)
        {
            return Some(HitPart::Handle(index));
        }
        if connector
            .issue_indicator
            .is_some_and(|c| c.distance_to(&design) <= self.settings.indicator_radius)
        {
            return Some(HitPart::ErrorIndicator);
        }
        self.wire_hit(connector, design).then_some(HitPart::Body)
    }

    fn wire_hit(&self, connector: &ConnectorNode, design: Point) -> bool {
        connector
            .distance_to_wire(design)
            .is_some_and(|d| d <= self.settings.body_tolerance)
    }
}

impl DiagramCanvas {
    /// [`HitTester::hit_target`] with the canvas' own settings.
    pub fn hit_target(&self, screen: Point) -> Option<HitTarget> {
        HitTester::new(self).hit_target(screen)
    }

    /// [`HitTester::hit_object`] with the canvas' own settings.
    pub fn hit_object(&self, screen: Point) -> Option<SceneNodeRef<'_>> {
        HitTester::new(self).hit_object(screen)
    }
}
