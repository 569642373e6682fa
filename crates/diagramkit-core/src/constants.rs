//! Shared constants for the editing core.

/// Smallest allowed zoom level.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest allowed zoom level.
pub const MAX_ZOOM: f64 = 5.0;

/// Default radius of interactive handles, in design units.
pub const DEFAULT_HANDLE_RADIUS: f64 = 6.0;

/// Default radius of the issue indicator, in design units.
pub const DEFAULT_INDICATOR_RADIUS: f64 = 8.0;

/// Default tile size of the canvas background pattern, in screen units.
pub const DEFAULT_BACKGROUND_TILE: f64 = 32.0;

/// Fraction of the viewport kept free around content on zoom-to-fit.
pub const VIEW_PADDING: f64 = 0.05;

/// Name of the tool the editor falls back to.
pub const DEFAULT_TOOL: &str = "selection";
