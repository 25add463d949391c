//! Circle shape.

use super::{Fill, ShapeId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A circle defined by its center and radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Radius. May be negative; stored as given.
    pub radius: f64,
    pub fill: Fill,
}

impl Circle {
    pub const DEFAULT_CENTER: Point = Point::new(100.0, 100.0);
    pub const DEFAULT_RADIUS: f64 = 50.0;
    pub const DEFAULT_FILL: &'static str = "lightgreen";

    /// Create a new circle with a fresh identity.
    pub fn new(center: Point, radius: f64, fill: Fill) -> Self {
        Self {
            id: ShapeId::new(),
            center,
            radius,
            fill,
        }
    }

    /// The circle an "add circle" action creates.
    pub fn default_at_origin() -> Self {
        Self::new(
            Self::DEFAULT_CENTER,
            Self::DEFAULT_RADIUS,
            Fill::named(Self::DEFAULT_FILL),
        )
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn bounds(&self) -> Rect {
        let r = self.radius.abs();
        Rect::new(
            self.center.x - r,
            self.center.y - r,
            self.center.x + r,
            self.center.y + r,
        )
    }

    pub fn hit_test(&self, point: Point) -> bool {
        let r = self.radius.abs();
        (point - self.center).hypot2() <= r * r
    }
}
