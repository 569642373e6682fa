//! Design-graph collaborator
//!
//! The editor never owns the design graph. It reads immutable snapshots and
//! mutates the graph only through transactions handed to a
//! [`DesignController`]. [`MemoryDesign`] is the in-memory implementation
//! used by the demo binary and the tests.

mod issues;
mod memory;
mod metamodel;
mod model;
mod transaction;

pub use issues::{AcceptOutcome, Issue, IssueSeverity};
pub use memory::MemoryDesign;
pub use metamodel::{ConnectionRule, EdgeType, Metamodel, NodeType};
pub use model::{Attributes, DesignObject, DesignSnapshot, ObjectKind};
pub use transaction::Transaction;

use crate::error::DesignError;
use crate::id::ObjectId;

/// Transaction API of a design graph.
pub trait DesignController {
    fn metamodel(&self) -> &Metamodel;

    /// Current committed state.
    fn snapshot(&self) -> &DesignSnapshot;

    fn version(&self) -> u64 {
        self.snapshot().version
    }

    /// Opens a transaction on the current state.
    fn new_transaction(&self) -> Transaction;

    /// Validates and commits a transaction.
    ///
    /// Fatal validation issues leave the design unchanged and are reported
    /// through the outcome with `committed == false`. Errors are reserved for
    /// transactions that cannot be applied at all.
    fn accept(&mut self, transaction: Transaction) -> Result<AcceptOutcome, DesignError>;

    /// Drops a transaction without applying it.
    fn discard(&mut self, transaction: Transaction);

    /// Whether an edge of `edge_type` may connect `origin` to `target` in
    /// the given frame.
    fn can_connect(
        &self,
        edge_type: &str,
        origin: ObjectId,
        target: ObjectId,
        frame: &DesignSnapshot,
    ) -> bool;

    /// Edges whose origin or target is `id`.
    fn dependent_edges(&self, id: ObjectId) -> Vec<ObjectId> {
        self.snapshot().dependent_edges(id)
    }

    fn can_undo(&self) -> bool;
    fn can_redo(&self) -> bool;

    /// Returns false when there was nothing to undo.
    fn undo(&mut self) -> bool;

    /// Returns false when there was nothing to redo.
    fn redo(&mut self) -> bool;
}
