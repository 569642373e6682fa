//! # DiagramKit
//!
//! Interactive editing core for node/edge diagram editors.
//!
//! ## Architecture
//!
//! DiagramKit is organized as a workspace with multiple crates:
//!
//! 1. **diagramkit-core** - Identifiers, geometry, errors, events,
//!    configuration and the design-graph contract
//! 2. **diagramkit-editor** - Tools, hit testing, selection, scene sync and
//!    the `Editor` facade
//! 3. **diagramkit** - This crate: re-exports, logging setup and a scripted
//!    demo session
//!
//! ## Features
//!
//! - **Tools**: selection (click, marquee, drag, handle drag), place, connect, pan
//! - **Hit Testing**: handles, labels, issue indicators and bodies by z-order
//! - **Scene Sync**: minimal-churn reconciliation that keeps node identity
//! - **Transactions**: every edit is a single validated, undoable commit

pub mod session;

pub use diagramkit_editor as editor;

pub use diagramkit_core::{
    DesignController, DesignError, EditorConfig, EditorEvent, EntityId, Error, EventBus,
    EventCategory, EventFilter, MemoryDesign, Metamodel, ObjectId, Point, Rect, Result, ToolError,
    Vector,
};

pub use diagramkit_editor::{
    CursorShape, Editor, EditorIntent, EditorTool, InputEvent, Modifiers, PictogramCollection,
    Selection, SyncReport,
};

pub use session::{load_config, run_scripted_session, SessionSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
