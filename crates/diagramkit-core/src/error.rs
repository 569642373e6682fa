//! Error handling for DiagramKit
//!
//! Provides error types for all layers of the editor:
//! - Design errors (transaction boundary, unknown types and objects)
//! - Tool errors (typed precondition failures inside tool handlers)
//! - Configuration errors (loading and validating settings)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::id::ObjectId;

/// Design-graph error type
///
/// Represents failures crossing the transaction boundary of the design
/// collaborator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignError {
    /// Type name not known to the metamodel
    #[error("Unknown type: {type_name}")]
    UnknownType {
        /// The type name that was requested.
        type_name: String,
    },

    /// Object id not present in the design
    #[error("Unknown object {id}")]
    UnknownObject {
        /// The missing object id.
        id: ObjectId,
    },

    /// Object has the wrong structural kind for the operation
    #[error("Object {id} is not {expected}")]
    WrongKind {
        /// The offending object id.
        id: ObjectId,
        /// The expected kind ("a node" / "an edge").
        expected: &'static str,
    },

    /// Transaction was created against an older design version
    #[error("Stale transaction: based on version {base}, design is at {current}")]
    StaleTransaction {
        /// The version the transaction was created from.
        base: u64,
        /// The current design version.
        current: u64,
    },

    /// Transaction failed validation
    #[error("Transaction rejected with {count} fatal issue(s)")]
    Rejected {
        /// Number of fatal issues found.
        count: usize,
    },

    /// Undo requested with empty history
    #[error("Nothing to undo")]
    NothingToUndo,

    /// Redo requested with empty redo history
    #[error("Nothing to redo")]
    NothingToRedo,
}

/// Tool error type
///
/// The typed precondition results used inside tool handlers. Handlers never
/// let these escape: they are logged and turned into "not consumed".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    /// A required collaborator is not bound
    #[error("Tool not ready: {reason}")]
    NotReady {
        /// What is missing.
        reason: String,
    },

    /// The user aimed the action at something it cannot apply to
    #[error("Invalid target: {reason}")]
    InvalidTarget {
        /// Why the target is invalid.
        reason: String,
    },

    /// Place tool has no palette item
    #[error("No palette item selected")]
    NoPaletteItem,

    /// Design collaborator failure
    #[error(transparent)]
    Design(#[from] DesignError),
}

impl ToolError {
    pub fn not_ready(reason: impl Into<String>) -> Self {
        ToolError::NotReady {
            reason: reason.into(),
        }
    }

    pub fn invalid_target(reason: impl Into<String>) -> Self {
        ToolError::InvalidTarget {
            reason: reason.into(),
        }
    }

    /// User-level errors are abandoned silently; everything else is reported
    /// to the diagnostic channel.
    pub fn is_user_error(&self) -> bool {
        matches!(self, ToolError::InvalidTarget { .. })
    }
}

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for the expected schema.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A configuration value is out of its valid range.
    #[error("Value out of range for '{key}': {value}")]
    ValueOutOfRange {
        /// The offending key.
        key: String,
        /// The rejected value.
        value: String,
    },
}

/// Main error type for DiagramKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Design error
    #[error(transparent)]
    Design(#[from] DesignError),

    /// Tool error
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a user/input error (abandoned silently)
    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::Tool(e) if e.is_user_error())
    }

    /// Check if this is a programming/integration error
    pub fn is_integration_error(&self) -> bool {
        match self {
            Error::Tool(ToolError::NotReady { .. }) => true,
            Error::Tool(ToolError::Design(e)) | Error::Design(e) => matches!(
                e,
                DesignError::UnknownType { .. }
                    | DesignError::UnknownObject { .. }
                    | DesignError::WrongKind { .. }
            ),
            _ => false,
        }
    }

    /// Check if this is a validation failure reported at accept time
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::Design(DesignError::Rejected { .. })
                | Error::Tool(ToolError::Design(DesignError::Rejected { .. }))
        )
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
