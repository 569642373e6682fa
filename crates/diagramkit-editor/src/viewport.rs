//! View state and coordinate conversion.
//!
//! Screen coordinates are pointer positions on the canvas widget. Design
//! coordinates are the positions stored in the design graph. The mapping is
//!
//! ```text
//! design = (screen - offset) / zoom
//! screen = design * zoom + offset
//! ```
//!
//! with `offset` in screen units and `zoom` bounded to `[MIN_ZOOM, MAX_ZOOM]`.

use std::fmt;

use diagramkit_core::constants::{MAX_ZOOM, MIN_ZOOM, VIEW_PADDING};
use diagramkit_core::{Point, Rect, Vector};

/// Clamps any zoom input into the allowed range.
///
/// NaN and non-positive values map to the minimum, positive infinity to the
/// maximum.
pub fn clamp_zoom(level: f64) -> f64 {
    if level.is_nan() {
        return MIN_ZOOM;
    }
    level.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Zoom level and pan offset of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    zoom: f64,
    offset: Vector,
}

impl ViewState {
    pub fn new(zoom: f64, offset: Vector) -> Self {
        Self {
            zoom: clamp_zoom(zoom),
            offset,
        }
    }

    /// Current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Pan offset in screen units.
    pub fn offset(&self) -> Vector {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Vector) {
        self.offset = offset;
    }

    pub fn pan_by(&mut self, delta: Vector) {
        self.offset += delta;
    }

    /// Sets the zoom level, clamped to the allowed range.
    ///
    /// When `anchor` is given, the screen point keeps showing the same design
    /// point after zooming.
    pub fn set_zoom(&mut self, level: f64, anchor: Option<Point>) {
        let new_zoom = clamp_zoom(level);
        if let Some(anchor) = anchor {
            let fixed = self.to_design(anchor);
            self.offset = anchor.to_vector() - fixed.to_vector() * new_zoom;
        }
        self.zoom = new_zoom;
    }

    /// Multiplies the zoom by `factor` around a screen point.
    pub fn zoom_at(&mut self, factor: f64, anchor: Point) {
        self.set_zoom(self.zoom * factor, Some(anchor));
    }

    /// Zoom 1.0 and no offset.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.offset = Vector::ZERO;
    }

    /// Converts a screen point into design space.
    pub fn to_design(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.zoom,
            (screen.y - self.offset.y) / self.zoom,
        )
    }

    /// Converts a design point into screen space.
    pub fn from_design(&self, design: Point) -> Point {
        Point::new(
            design.x * self.zoom + self.offset.x,
            design.y * self.zoom + self.offset.y,
        )
    }

    /// Converts a screen-space delta into a design-space delta.
    pub fn delta_to_design(&self, delta: Vector) -> Vector {
        delta * (1.0 / self.zoom)
    }

    /// Fits `bounds` (design space) into a viewport of `viewport_size`
    /// screen units, keeping a padding fraction on every side.
    ///
    /// Degenerate bounds leave the view unchanged.
    pub fn fit_to_bounds(&mut self, bounds: Rect, viewport_size: Vector, padding: f64) {
        if bounds.width <= 0.0 && bounds.height <= 0.0 {
            return;
        }
        if viewport_size.x <= 0.0 || viewport_size.y <= 0.0 {
            return;
        }

        let padding_factor = (1.0 - padding * 2.0).max(0.1);
        let zoom_x = if bounds.width > 0.0 {
            viewport_size.x * padding_factor / bounds.width
        } else {
            f64::INFINITY
        };
        let zoom_y = if bounds.height > 0.0 {
            viewport_size.y * padding_factor / bounds.height
        } else {
            f64::INFINITY
        };
        let zoom = clamp_zoom(zoom_x.min(zoom_y));

        let center = bounds.center();
        self.zoom = zoom;
        self.offset = Vector::new(
            viewport_size.x / 2.0 - center.x * zoom,
            viewport_size.y / 2.0 - center.y * zoom,
        );
    }

    /// [`fit_to_bounds`](Self::fit_to_bounds) with the default padding.
    pub fn fit_to_view(&mut self, bounds: Rect, viewport_size: Vector) {
        self.fit_to_bounds(bounds, viewport_size, VIEW_PADDING);
    }

    /// Offset of the repeating background pattern so it follows panning.
    pub fn background_offset(&self, tile: f64) -> Vector {
        if tile <= 0.0 {
            return Vector::ZERO;
        }
        let step = tile * self.zoom;
        Vector::new(self.offset.x.rem_euclid(step), self.offset.y.rem_euclid(step))
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset: Vector::ZERO,
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Offset: ({:.1}, {:.1})",
            self.zoom, self.offset.x, self.offset.y
        )
    }
}
