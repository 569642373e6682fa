//! Configuration for the editing core
//!
//! Provides the editor settings and their TOML file handling.
//!
//! Configuration is organized into logical sections:
//! - Hit testing (handle and indicator radii, body tolerance)
//! - View (initial zoom, zoom step, background tile)
//! - Connector geometry (tessellation, arrowheads, outline)
//! - Labels (gaps and text metrics used for label placement)
//! - Tools (place-tool behavior, default edge type, marquee threshold)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{
    DEFAULT_BACKGROUND_TILE, DEFAULT_HANDLE_RADIUS, DEFAULT_INDICATOR_RADIUS, MAX_ZOOM, MIN_ZOOM,
};
use crate::error::ConfigError;

/// Hit-testing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitTestSettings {
    /// Radius of connector midpoint handles
    pub handle_radius: f64,
    /// Radius of the issue indicator
    pub indicator_radius: f64,
    /// Extra distance accepted around connector wires
    pub body_tolerance: f64,
}

impl Default for HitTestSettings {
    fn default() -> Self {
        Self {
            handle_radius: DEFAULT_HANDLE_RADIUS,
            indicator_radius: DEFAULT_INDICATOR_RADIUS,
            body_tolerance: 4.0,
        }
    }
}

/// View settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Zoom level of a fresh canvas
    pub initial_zoom: f64,
    /// Multiplier used by zoom in / zoom out commands
    pub zoom_step: f64,
    /// Tile size of the background pattern (screen units)
    pub background_tile: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            initial_zoom: 1.0,
            zoom_step: 1.2,
            background_tile: DEFAULT_BACKGROUND_TILE,
        }
    }
}

/// Connector geometry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorSettings {
    /// Maximum deviation when flattening curves into the wire polyline
    pub flatten_tolerance: f64,
    /// Length of arrowheads along the wire
    pub arrowhead_length: f64,
    /// Width of arrowheads across the wire
    pub arrowhead_width: f64,
    /// Half-width of the selection outline around the wire
    pub outline_inflation: f64,
    /// Radius used to round the wire at midpoints
    pub corner_radius: f64,
}

impl Default for ConnectorSettings {
    fn default() -> Self {
        Self {
            flatten_tolerance: 0.25,
            arrowhead_length: 12.0,
            arrowhead_width: 8.0,
            outline_inflation: 5.0,
            corner_radius: 8.0,
        }
    }
}

/// Label placement settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSettings {
    /// Gap between the pictogram bottom and the primary label
    pub primary_gap: f64,
    /// Gap between the primary and the secondary label
    pub secondary_gap: f64,
    /// Height of one label line
    pub line_height: f64,
    /// Average character advance used to size label rectangles
    pub char_width: f64,
    /// Gap between the pictogram top and the value indicator
    pub value_indicator_gap: f64,
    /// Gap between the primary label and an anchored popup
    pub popup_gap: f64,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            primary_gap: 4.0,
            secondary_gap: 2.0,
            line_height: 16.0,
            char_width: 7.0,
            value_indicator_gap: 4.0,
            popup_gap: 8.0,
        }
    }
}

/// Tool behavior settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Switch back to the default tool after placing a node
    pub return_to_default_after_place: bool,
    /// Edge type created by the connect tool
    pub default_edge_type: String,
    /// Marquee drags smaller than this (screen units) select nothing
    pub marquee_min_size: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            return_to_default_after_place: true,
            default_edge_type: "Flow".to_string(),
            marquee_min_size: 2.0,
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub hit_test: HitTestSettings,
    pub view: ViewSettings,
    pub connector: ConnectorSettings,
    pub labels: LabelSettings,
    pub tools: ToolSettings,
}

impl EditorConfig {
    /// Parse a configuration from TOML text. Missing keys use defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("Loaded editor configuration from {}", path.display());
        Ok(config)
    }

    /// Write the configuration as TOML.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(key: &str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::ValueOutOfRange {
                    key: key.to_string(),
                    value: value.to_string(),
                })
            }
        }

        positive("hit_test.handle_radius", self.hit_test.handle_radius)?;
        positive("hit_test.indicator_radius", self.hit_test.indicator_radius)?;
        positive("view.background_tile", self.view.background_tile)?;
        positive("connector.flatten_tolerance", self.connector.flatten_tolerance)?;
        positive("labels.line_height", self.labels.line_height)?;

        if !(self.view.zoom_step.is_finite() && self.view.zoom_step > 1.0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "view.zoom_step".to_string(),
                value: self.view.zoom_step.to_string(),
            });
        }

        let zoom = self.view.initial_zoom;
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
            return Err(ConfigError::ValueOutOfRange {
                key: "view.initial_zoom".to_string(),
                value: zoom.to_string(),
            });
        }

        Ok(())
    }
}
