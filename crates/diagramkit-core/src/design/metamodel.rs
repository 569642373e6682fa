//! Type system of the design graph: node types, edge types and the rules
//! deciding which nodes an edge type may connect.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeType {
    pub name: String,
    /// Name of the pictogram drawn for nodes of this type
    pub pictogram: String,
    /// Nodes carry a numeric value shown by the value indicator
    #[serde(default)]
    pub has_value: bool,
    /// Nodes carry a formula edited through the formula editor
    #[serde(default)]
    pub has_formula: bool,
}

impl NodeType {
    pub fn new(name: &str, pictogram: &str) -> Self {
        Self {
            name: name.to_string(),
            pictogram: pictogram.to_string(),
            has_value: false,
            has_formula: false,
        }
    }

    pub fn with_value(mut self) -> Self {
        self.has_value = true;
        self
    }

    pub fn with_formula(mut self) -> Self {
        self.has_formula = true;
        self
    }
}

/// Allowed (origin type, target type) pair of an edge type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRule {
    pub origin: String,
    pub target: String,
}

/// An edge type with its connection rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeType {
    pub name: String,
    pub rules: Vec<ConnectionRule>,
}

impl EdgeType {
    pub fn new(name: &str, rules: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_string(),
            rules: rules
                .iter()
                .map(|(origin, target)| ConnectionRule {
                    origin: origin.to_string(),
                    target: target.to_string(),
                })
                .collect(),
        }
    }

    pub fn allows(&self, origin_type: &str, target_type: &str) -> bool {
        self.rules
            .iter()
            .any(|r| r.origin == origin_type && r.target == target_type)
    }
}

/// The metamodel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metamodel {
    pub node_types: BTreeMap<String, NodeType>,
    pub edge_types: BTreeMap<String, EdgeType>,
}

impl Metamodel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node_type(&mut self, node_type: NodeType) {
        self.node_types.insert(node_type.name.clone(), node_type);
    }

    pub fn add_edge_type(&mut self, edge_type: EdgeType) {
        self.edge_types.insert(edge_type.name.clone(), edge_type);
    }

    pub fn node_type(&self, name: &str) -> Option<&NodeType> {
        self.node_types.get(name)
    }

    pub fn edge_type(&self, name: &str) -> Option<&EdgeType> {
        self.edge_types.get(name)
    }

    /// Parse a metamodel from JSON.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Stock-and-flow metamodel used by the demo and tests.
    pub fn stock_flow() -> Self {
        let mut metamodel = Self::new();
        metamodel.add_node_type(NodeType::new("Stock", "stock").with_value().with_formula());
        metamodel.add_node_type(NodeType::new("Flow", "flow").with_value().with_formula());
        metamodel.add_node_type(NodeType::new("Auxiliary", "auxiliary").with_value().with_formula());
        metamodel.add_node_type(NodeType::new("Cloud", "cloud"));
        metamodel.add_node_type(NodeType::new("Note", "note"));

        metamodel.add_edge_type(EdgeType::new(
            "Flow",
            &[
                ("Stock", "Flow"),
                ("Flow", "Stock"),
                ("Cloud", "Flow"),
                ("Flow", "Cloud"),
            ],
        ));
        metamodel.add_edge_type(EdgeType::new(
            "Parameter",
            &[
                ("Stock", "Flow"),
                ("Stock", "Auxiliary"),
                ("Flow", "Auxiliary"),
                ("Flow", "Flow"),
                ("Auxiliary", "Auxiliary"),
                ("Auxiliary", "Flow"),
            ],
        ));
        metamodel
    }
}
