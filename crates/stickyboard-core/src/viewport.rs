//! Viewport (pan/zoom) of a board.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Default lower zoom bound for front ends.
pub const MIN_ZOOM: f64 = 0.1;
/// Default upper zoom bound for front ends.
pub const MAX_ZOOM: f64 = 10.0;

/// Pan and zoom of the visible area.
///
/// The reducer stores whatever it is given; clamping is the caller's job
/// (see [`Viewport::clamp_zoom`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Scale factor, 1.0 = 100%.
    pub zoom: f64,
    /// Translation offset in screen units.
    pub pan: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp a requested zoom into `[min, max]`. Non-finite or non-positive
    /// requests fall back to `min`.
    pub fn clamp_zoom(zoom: f64, min: f64, max: f64) -> f64 {
        if !zoom.is_finite() || zoom <= 0.0 {
            return min;
        }
        zoom.clamp(min, max)
    }

    /// World to screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.zoom)
    }

    /// Screen to world transform.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.pan)
    }

    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Zoom and pan so that `bounds` fills `viewport` with `padding` on each side.
    ///
    /// Returns the default viewport for empty bounds.
    pub fn fit_to_bounds(bounds: Rect, viewport: Size, padding: f64) -> Self {
        if bounds.is_zero_area() {
            return Self::default();
        }

        let padded = Size::new(
            (viewport.width - padding * 2.0).max(1.0),
            (viewport.height - padding * 2.0).max(1.0),
        );
        let zoom = (padded.width / bounds.width())
            .min(padded.height / bounds.height())
            .clamp(MIN_ZOOM, MAX_ZOOM);

        let center = bounds.center();
        Self {
            zoom,
            pan: Vec2::new(
                viewport.width / 2.0 - center.x * zoom,
                viewport.height / 2.0 - center.y * zoom,
            ),
        }
    }
}
