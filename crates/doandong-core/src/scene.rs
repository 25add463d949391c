//! Declarative scene graph handed to renderers.

use crate::shapes::{Fill, ShapeId};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Geometry of one scene node, exactly as stored on the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Rect {
        origin: Point,
        width: f64,
        height: f64,
    },
    Circle {
        center: Point,
        radius: f64,
    },
}

/// Outline drawn around a highlighted node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// CSS colour.
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: ShapeId,
    pub primitive: Primitive,
    pub fill: Fill,
    /// Present only on the selected node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Stroke>,
}

/// Everything a renderer needs to draw the canvas, back to front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub size: Size,
    /// CSS colour.
    pub background: String,
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    /// The node drawn with a selection highlight, if any.
    pub fn highlighted(&self) -> Option<&SceneNode> {
        self.nodes.iter().find(|node| node.highlight.is_some())
    }
}
