//! Transactions: isolated working copies of the design that are committed
//! atomically through [`DesignController::accept`](super::DesignController::accept).

use std::collections::BTreeMap;
use std::sync::Arc;

use super::metamodel::Metamodel;
use super::model::{Attributes, DesignObject, DesignSnapshot};
use crate::error::DesignError;
use crate::geometry::Point;
use crate::id::ObjectId;

/// A set of pending design mutations.
///
/// Nothing is visible in the design until the transaction is accepted; a
/// discarded or rejected transaction leaves the design untouched.
#[derive(Debug, Clone)]
pub struct Transaction {
    base_version: u64,
    metamodel: Arc<Metamodel>,
    frame: BTreeMap<ObjectId, DesignObject>,
    next_id: u64,
    modified: bool,
}

impl Transaction {
    pub(crate) fn new(base: &DesignSnapshot, metamodel: Arc<Metamodel>, next_id: u64) -> Self {
        Self {
            base_version: base.version,
            metamodel,
            frame: base.objects.clone(),
            next_id,
            modified: false,
        }
    }

    /// Version of the design this transaction was derived from.
    pub fn base_version(&self) -> u64 {
        self.base_version
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub(crate) fn next_id(&self) -> u64 {
        self.next_id
    }

    pub(crate) fn into_objects(self) -> BTreeMap<ObjectId, DesignObject> {
        self.frame
    }

    pub fn get(&self, id: ObjectId) -> Option<&DesignObject> {
        self.frame.get(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.frame.contains_key(&id)
    }

    pub fn objects(&self) -> impl Iterator<Item = &DesignObject> {
        self.frame.values()
    }

    pub fn count_of_type(&self, type_name: &str) -> usize {
        self.frame
            .values()
            .filter(|o| o.type_name == type_name)
            .count()
    }

    fn allocate_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Creates a node of a known node type.
    pub fn create_node(
        &mut self,
        type_name: &str,
        name: Option<String>,
        attributes: Attributes,
    ) -> Result<ObjectId, DesignError> {
        if self.metamodel.node_type(type_name).is_none() {
            return Err(DesignError::UnknownType {
                type_name: type_name.to_string(),
            });
        }
        let id = self.allocate_id();
        let mut node = DesignObject::node(id, type_name);
        node.name = name;
        node.attributes = attributes;
        self.frame.insert(id, node);
        self.modified = true;
        Ok(id)
    }

    /// Creates a node and places it at `position`.
    pub fn create_node_at(
        &mut self,
        type_name: &str,
        name: Option<String>,
        position: Point,
    ) -> Result<ObjectId, DesignError> {
        let id = self.create_node(type_name, name, Attributes::new())?;
        self.mutate(id)?.position = Some(position);
        Ok(id)
    }

    /// Creates an edge between two existing nodes.
    ///
    /// Connection rules are not enforced here; rule violations surface as
    /// fatal issues at accept time.
    pub fn create_edge(
        &mut self,
        type_name: &str,
        origin: ObjectId,
        target: ObjectId,
    ) -> Result<ObjectId, DesignError> {
        if self.metamodel.edge_type(type_name).is_none() {
            return Err(DesignError::UnknownType {
                type_name: type_name.to_string(),
            });
        }
        for endpoint in [origin, target] {
            let object = self
                .frame
                .get(&endpoint)
                .ok_or(DesignError::UnknownObject { id: endpoint })?;
            if !object.is_node() {
                return Err(DesignError::WrongKind {
                    id: endpoint,
                    expected: "a node",
                });
            }
        }
        let id = self.allocate_id();
        self.frame
            .insert(id, DesignObject::edge(id, type_name, origin, target));
        self.modified = true;
        Ok(id)
    }

    /// Mutable access to an object of the working copy.
    pub fn mutate(&mut self, id: ObjectId) -> Result<&mut DesignObject, DesignError> {
        let object = self
            .frame
            .get_mut(&id)
            .ok_or(DesignError::UnknownObject { id })?;
        self.modified = true;
        Ok(object)
    }

    /// Removes an object together with every edge depending on it.
    ///
    /// Returns all removed ids, the requested one first.
    pub fn remove_cascading(&mut self, id: ObjectId) -> Result<Vec<ObjectId>, DesignError> {
        if !self.frame.contains_key(&id) {
            return Err(DesignError::UnknownObject { id });
        }
        let mut removed = vec![id];
        removed.extend(
            self.frame
                .values()
                .filter(|o| o.touches(id))
                .map(|o| o.id),
        );
        for r in &removed {
            self.frame.remove(r);
        }
        self.modified = true;
        Ok(removed)
    }
}
