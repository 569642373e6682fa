//! Identifiers correlating design-graph objects with scene nodes.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a persistent design-graph object (node or edge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl ObjectId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Key of a scene node.
///
/// Either refers to a persistent design object, or marks an ephemeral entity
/// that exists only as a preview (place shadow, connector being drawn) and is
/// never written to the design graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityId {
    /// A persistent design-graph object.
    Object(ObjectId),
    /// A preview-only entity.
    Ephemeral(Uuid),
}

impl EntityId {
    /// Allocates a fresh ephemeral identifier.
    pub fn ephemeral() -> Self {
        Self::Ephemeral(Uuid::new_v4())
    }

    /// Returns the design object id, if this entity is persistent.
    pub fn object_id(&self) -> Option<ObjectId> {
        match self {
            Self::Object(id) => Some(*id),
            Self::Ephemeral(_) => None,
        }
    }

    pub fn is_ephemeral(&self) -> bool {
        matches!(self, Self::Ephemeral(_))
    }
}

impl From<ObjectId> for EntityId {
    fn from(id: ObjectId) -> Self {
        Self::Object(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(id) => write!(f, "{}", id),
            Self::Ephemeral(uuid) => write!(f, "~{}", &uuid.to_string()[..8]),
        }
    }
}
