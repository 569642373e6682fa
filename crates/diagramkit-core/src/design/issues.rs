//! Validation issues reported when a transaction is accepted.

use serde::{Deserialize, Serialize};

use crate::id::ObjectId;

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IssueSeverity {
    /// Shown on the object, does not block the commit
    Warning,
    /// Blocks the commit
    Fatal,
}

/// A validation issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Object the issue is attached to, if any
    pub object: Option<ObjectId>,
    pub severity: IssueSeverity,
    pub message: String,
}

impl Issue {
    pub fn warning(object: ObjectId, message: impl Into<String>) -> Self {
        Self {
            object: Some(object),
            severity: IssueSeverity::Warning,
            message: message.into(),
        }
    }

    pub fn fatal(object: Option<ObjectId>, message: impl Into<String>) -> Self {
        Self {
            object,
            severity: IssueSeverity::Fatal,
            message: message.into(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == IssueSeverity::Fatal
    }
}

/// Result of accepting a transaction
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AcceptOutcome {
    /// Whether the transaction was applied
    pub committed: bool,
    /// Design version after the call
    pub version: u64,
    pub issues: Vec<Issue>,
}

impl AcceptOutcome {
    pub fn has_fatal(&self) -> bool {
        self.issues.iter().any(Issue::is_fatal)
    }

    pub fn fatal_count(&self) -> usize {
        self.issues.iter().filter(|i| i.is_fatal()).count()
    }
}
