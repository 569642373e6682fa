//! In-memory design graph.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::issues::{AcceptOutcome, Issue};
use super::metamodel::Metamodel;
use super::model::{DesignObject, DesignSnapshot};
use super::transaction::Transaction;
use super::DesignController;
use crate::error::DesignError;
use crate::id::ObjectId;

/// Maximum number of versions kept for undo.
const MAX_HISTORY: usize = 256;

/// Design graph held entirely in memory, with whole-version undo history.
#[derive(Debug, Clone)]
pub struct MemoryDesign {
    metamodel: Arc<Metamodel>,
    current: DesignSnapshot,
    undo_stack: Vec<DesignSnapshot>,
    redo_stack: Vec<DesignSnapshot>,
    last_version: u64,
    next_id: u64,
}

impl MemoryDesign {
    pub fn new(metamodel: Metamodel) -> Self {
        Self {
            metamodel: Arc::new(metamodel),
            current: DesignSnapshot::default(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            last_version: 0,
            next_id: 1,
        }
    }

    /// Empty design using the stock-and-flow metamodel.
    pub fn stock_flow() -> Self {
        Self::new(Metamodel::stock_flow())
    }

    fn next_version(&mut self) -> u64 {
        self.last_version += 1;
        self.last_version
    }

    /// Checks a working copy and returns all issues found.
    pub fn validate(&self, objects: &BTreeMap<ObjectId, DesignObject>) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut names: HashMap<&str, Vec<ObjectId>> = HashMap::new();

        for object in objects.values() {
            match object.endpoints() {
                Some((origin, target)) => {
                    let origin_obj = objects.get(&origin).filter(|o| o.is_node());
                    let target_obj = objects.get(&target).filter(|o| o.is_node());
                    let (Some(origin_obj), Some(target_obj)) = (origin_obj, target_obj) else {
                        issues.push(Issue::fatal(
                            Some(object.id),
                            format!("Edge {} has a missing endpoint", object.id),
                        ));
                        continue;
                    };
                    let allowed = self
                        .metamodel
                        .edge_type(&object.type_name)
                        .is_some_and(|t| t.allows(&origin_obj.type_name, &target_obj.type_name));
                    if !allowed {
                        issues.push(Issue::fatal(
                            Some(object.id),
                            format!(
                                "{} edge cannot connect {} to {}",
                                object.type_name, origin_obj.type_name, target_obj.type_name
                            ),
                        ));
                    }
                }
                None => {
                    let Some(node_type) = self.metamodel.node_type(&object.type_name) else {
                        issues.push(Issue::fatal(
                            Some(object.id),
                            format!("Unknown node type {}", object.type_name),
                        ));
                        continue;
                    };
                    match object.name.as_deref().map(str::trim) {
                        None | Some("") => {
                            issues.push(Issue::warning(object.id, "Node has no name"));
                        }
                        Some(name) => names.entry(name).or_default().push(object.id),
                    }
                    if node_type.has_formula
                        && object.formula.as_deref().is_none_or(|f| f.trim().is_empty())
                    {
                        issues.push(Issue::warning(object.id, "Formula is missing"));
                    }
                }
            }
        }

        for (name, ids) in names.into_iter().filter(|(_, ids)| ids.len() > 1) {
            for id in ids {
                issues.push(Issue::warning(id, format!("Duplicate name '{}'", name)));
            }
        }

        issues
    }
}

impl DesignController for MemoryDesign {
    fn metamodel(&self) -> &Metamodel {
        &self.metamodel
    }

    fn snapshot(&self) -> &DesignSnapshot {
        &self.current
    }

    fn new_transaction(&self) -> Transaction {
        Transaction::new(&self.current, Arc::clone(&self.metamodel), self.next_id)
    }

    fn accept(&mut self, transaction: Transaction) -> Result<AcceptOutcome, DesignError> {
        if transaction.base_version() != self.current.version {
            return Err(DesignError::StaleTransaction {
                base: transaction.base_version(),
                current: self.current.version,
            });
        }
        self.next_id = self.next_id.max(transaction.next_id());

        if !transaction.is_modified() {
            return Ok(AcceptOutcome {
                committed: true,
                version: self.current.version,
                issues: Vec::new(),
            });
        }

        let objects = transaction.into_objects();
        let issues = self.validate(&objects);
        let fatal = issues.iter().filter(|i| i.is_fatal()).count();
        if fatal > 0 {
            tracing::warn!("Transaction rejected with {} fatal issue(s)", fatal);
            return Ok(AcceptOutcome {
                committed: false,
                version: self.current.version,
                issues,
            });
        }

        let mut attached: BTreeMap<ObjectId, Vec<Issue>> = BTreeMap::new();
        for issue in &issues {
            if let Some(id) = issue.object {
                attached.entry(id).or_default().push(issue.clone());
            }
        }

        let version = self.next_version();
        let previous = std::mem::replace(
            &mut self.current,
            DesignSnapshot {
                version,
                objects,
                issues: attached,
            },
        );
        self.undo_stack.push(previous);
        if self.undo_stack.len() > MAX_HISTORY {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();

        tracing::info!(
            "Committed design version {} ({} objects, {} warning(s))",
            version,
            self.current.len(),
            issues.len()
        );
        Ok(AcceptOutcome {
            committed: true,
            version,
            issues,
        })
    }

    fn discard(&mut self, transaction: Transaction) {
        self.next_id = self.next_id.max(transaction.next_id());
        tracing::debug!(
            "Discarded transaction based on version {}",
            transaction.base_version()
        );
    }

    fn can_connect(
        &self,
        edge_type: &str,
        origin: ObjectId,
        target: ObjectId,
        frame: &DesignSnapshot,
    ) -> bool {
        if origin == target {
            return false;
        }
        let (Some(origin_obj), Some(target_obj)) = (frame.get(origin), frame.get(target)) else {
            return false;
        };
        if !origin_obj.is_node() || !target_obj.is_node() {
            return false;
        }
        let allowed = self
            .metamodel
            .edge_type(edge_type)
            .is_some_and(|t| t.allows(&origin_obj.type_name, &target_obj.type_name));
        let duplicate = frame
            .edges()
            .any(|e| e.type_name == edge_type && e.endpoints() == Some((origin, target)));
        allowed && !duplicate
    }

    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn undo(&mut self) -> bool {
        let Some(mut previous) = self.undo_stack.pop() else {
            return false;
        };
        previous.version = self.next_version();
        let undone = std::mem::replace(&mut self.current, previous);
        self.redo_stack.push(undone);
        tracing::info!("Undo to design version {}", self.current.version);
        true
    }

    fn redo(&mut self) -> bool {
        let Some(mut next) = self.redo_stack.pop() else {
            return false;
        };
        next.version = self.next_version();
        let redone = std::mem::replace(&mut self.current, next);
        self.undo_stack.push(redone);
        tracing::info!("Redo to design version {}", self.current.version);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::Attributes;

    fn named(tx: &mut Transaction, type_name: &str, name: &str) -> ObjectId {
        tx.create_node(type_name, Some(name.to_string()), Attributes::new())
            .unwrap()
    }

    #[test]
    fn test_accept_assigns_increasing_versions() {
        let mut design = MemoryDesign::stock_flow();
        let mut tx = design.new_transaction();
        named(&mut tx, "Cloud", "source");
        let outcome = design.accept(tx).unwrap();
        assert!(outcome.committed);
        assert_eq!(outcome.version, 1);

        let mut tx = design.new_transaction();
        named(&mut tx, "Cloud", "sink");
        assert_eq!(design.accept(tx).unwrap().version, 2);
        assert_eq!(design.snapshot().len(), 2);
    }

    #[test]
    fn test_rule_violation_is_fatal_and_leaves_state() {
        let mut design = MemoryDesign::stock_flow();
        let mut tx = design.new_transaction();
        let a = named(&mut tx, "Stock", "a");
        let b = named(&mut tx, "Stock", "b");
        tx.create_edge("Flow", a, b).unwrap();
        let outcome = design.accept(tx).unwrap();
        assert!(!outcome.committed);
        assert_eq!(outcome.fatal_count(), 1);
        assert!(design.snapshot().is_empty());
        assert_eq!(design.version(), 0);
    }

    #[test]
    fn test_stale_transaction_rejected() {
        let mut design = MemoryDesign::stock_flow();
        let stale = design.new_transaction();
        let mut tx = design.new_transaction();
        named(&mut tx, "Cloud", "c");
        design.accept(tx).unwrap();
        assert!(matches!(
            design.accept(stale),
            Err(DesignError::StaleTransaction { base: 0, current: 1 })
        ));
    }

    #[test]
    fn test_warnings_are_attached() {
        let mut design = MemoryDesign::stock_flow();
        let mut tx = design.new_transaction();
        let a = named(&mut tx, "Cloud", "same");
        let b = named(&mut tx, "Cloud", "same");
        let c = tx.create_node("Cloud", None, Attributes::new()).unwrap();
        let outcome = design.accept(tx).unwrap();
        assert!(outcome.committed);
        assert!(!outcome.has_fatal());
        let snapshot = design.snapshot();
        assert!(snapshot.has_issues(a) && snapshot.has_issues(b) && snapshot.has_issues(c));
    }

    #[test]
    fn test_can_connect() {
        let mut design = MemoryDesign::stock_flow();
        let mut tx = design.new_transaction();
        let stock = named(&mut tx, "Stock", "s");
        let flow = named(&mut tx, "Flow", "f");
        let other = named(&mut tx, "Stock", "t");
        design.accept(tx).unwrap();
        let frame = design.snapshot().clone();
        assert!(design.can_connect("Flow", stock, flow, &frame));
        assert!(!design.can_connect("Flow", stock, stock, &frame));
        assert!(!design.can_connect("Flow", stock, other, &frame));
        assert!(!design.can_connect("Nope", stock, flow, &frame));
    }

    #[test]
    fn test_undo_redo() {
        let mut design = MemoryDesign::stock_flow();
        assert!(!design.undo());
        let mut tx = design.new_transaction();
        named(&mut tx, "Cloud", "c");
        design.accept(tx).unwrap();

        assert!(design.undo());
        assert!(design.snapshot().is_empty());
        assert_eq!(design.version(), 2);
        assert!(design.redo());
        assert_eq!(design.snapshot().len(), 1);
        assert_eq!(design.version(), 3);
        assert!(!design.redo());
    }

    #[test]
    fn test_ids_not_reused_after_discard() {
        let mut design = MemoryDesign::stock_flow();
        let mut tx = design.new_transaction();
        let first = named(&mut tx, "Cloud", "a");
        design.discard(tx);
        let mut tx = design.new_transaction();
        let second = named(&mut tx, "Cloud", "b");
        assert_ne!(first, second);
    }
}
