//! Mapping between screen coordinates and canvas coordinates.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// The canvas's current screen transform.
///
/// Maps canvas coordinates to screen (device) coordinates, the way a browser
/// reports an SVG element's screen CTM. The host supplies a fresh transform
/// with every pointer sample, since scrolling or resizing can change it
/// between samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenTransform(Affine);

impl Default for ScreenTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ScreenTransform {
    /// Canvas and screen coordinates coincide.
    pub const IDENTITY: Self = Self(Affine::IDENTITY);

    /// A canvas placed at `offset` on screen and scaled uniformly by `scale`.
    pub fn from_offset_scale(offset: Vec2, scale: f64) -> Self {
        Self(Affine::translate(offset) * Affine::scale(scale))
    }

    /// Whether screen points can be mapped back into the canvas.
    pub fn is_invertible(&self) -> bool {
        let det = self.0.determinant();
        det.is_finite() && det.abs() > f64::EPSILON
    }

    /// Convert a screen point to canvas coordinates.
    ///
    /// Returns `None` when the transform collapses the canvas (zero scale).
    pub fn screen_to_canvas(&self, screen_point: Point) -> Option<Point> {
        if !self.is_invertible() {
            return None;
        }
        Some(self.0.inverse() * screen_point)
    }

    /// Convert a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, canvas_point: Point) -> Point {
        self.0 * canvas_point
    }
}
