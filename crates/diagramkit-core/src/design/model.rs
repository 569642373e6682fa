//! Design objects and immutable design snapshots.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::issues::Issue;
use crate::geometry::{Point, Vector};
use crate::id::ObjectId;

/// Free-form attribute storage of a design object.
pub type Attributes = BTreeMap<String, serde_json::Value>;

/// Structural kind of a design object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// A node, drawn as a block.
    Node,
    /// An edge between two nodes, drawn as a connector.
    Edge {
        origin: ObjectId,
        target: ObjectId,
    },
}

/// A single object of the design graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignObject {
    pub id: ObjectId,
    pub type_name: String,
    pub kind: ObjectKind,
    pub name: Option<String>,
    /// Node position in design space.
    pub position: Option<Point>,
    /// Explicit routing points of an edge.
    pub midpoints: Vec<Point>,
    pub formula: Option<String>,
    pub attributes: Attributes,
}

impl DesignObject {
    pub fn node(id: ObjectId, type_name: impl Into<String>) -> Self {
        Self {
            id,
            type_name: type_name.into(),
            kind: ObjectKind::Node,
            name: None,
            position: None,
            midpoints: Vec::new(),
            formula: None,
            attributes: Attributes::new(),
        }
    }

    pub fn edge(id: ObjectId, type_name: impl Into<String>, origin: ObjectId, target: ObjectId) -> Self {
        Self {
            id,
            type_name: type_name.into(),
            kind: ObjectKind::Edge { origin, target },
            name: None,
            position: None,
            midpoints: Vec::new(),
            formula: None,
            attributes: Attributes::new(),
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self.kind, ObjectKind::Node)
    }

    pub fn is_edge(&self) -> bool {
        matches!(self.kind, ObjectKind::Edge { .. })
    }

    /// Origin and target of an edge.
    pub fn endpoints(&self) -> Option<(ObjectId, ObjectId)> {
        match self.kind {
            ObjectKind::Edge { origin, target } => Some((origin, target)),
            ObjectKind::Node => None,
        }
    }

    /// True when the object is an edge touching `node`.
    pub fn touches(&self, node: ObjectId) -> bool {
        self.endpoints()
            .is_some_and(|(origin, target)| origin == node || target == node)
    }

    pub fn attribute(&self, key: &str) -> Option<&serde_json::Value> {
        self.attributes.get(key)
    }

    /// Numeric value shown by the value indicator.
    pub fn numeric_value(&self) -> Option<f64> {
        self.attributes.get("value").and_then(|v| v.as_f64())
    }

    /// Color name shown by the color swatch.
    pub fn color(&self) -> Option<&str> {
        self.attributes.get("color").and_then(|v| v.as_str())
    }

    /// Moves a node, or shifts all midpoints of an edge.
    pub fn translate(&mut self, delta: Vector) {
        if let Some(position) = self.position.as_mut() {
            *position += delta;
        }
        for midpoint in &mut self.midpoints {
            *midpoint += delta;
        }
    }
}

/// Immutable view of the design graph at one version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignSnapshot {
    pub version: u64,
    pub objects: BTreeMap<ObjectId, DesignObject>,
    /// Non-fatal issues found when this version was accepted.
    pub issues: BTreeMap<ObjectId, Vec<Issue>>,
}

impl DesignSnapshot {
    pub fn get(&self, id: ObjectId) -> Option<&DesignObject> {
        self.objects.get(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &DesignObject> {
        self.objects.values().filter(|o| o.is_node())
    }

    pub fn edges(&self) -> impl Iterator<Item = &DesignObject> {
        self.objects.values().filter(|o| o.is_edge())
    }

    /// Number of objects of the given type.
    pub fn count_of_type(&self, type_name: &str) -> usize {
        self.objects
            .values()
            .filter(|o| o.type_name == type_name)
            .count()
    }

    /// Edges whose origin or target is `id`.
    pub fn dependent_edges(&self, id: ObjectId) -> Vec<ObjectId> {
        self.edges().filter(|e| e.touches(id)).map(|e| e.id).collect()
    }

    pub fn has_issues(&self, id: ObjectId) -> bool {
        self.issues.get(&id).is_some_and(|list| !list.is_empty())
    }

    /// Finds a node by name.
    pub fn node_named(&self, name: &str) -> Option<&DesignObject> {
        self.nodes().find(|o| o.name.as_deref() == Some(name))
    }
}
