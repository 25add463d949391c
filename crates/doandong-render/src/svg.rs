//! SVG output.

use crate::renderer::{RenderResult, Renderer, RendererError};
use doandong_core::scene::{Primitive, Scene, SceneNode};
use kurbo::{Point, Rect, Size};
use std::fmt::Write;

/// Renders a scene as a standalone `<svg>` document.
///
/// Negative sizes are drawn by magnitude. A rectangle with a negative width
/// or height is normalised to the area it covers, and a circle uses the
/// absolute radius. This matches hit testing, so a shape can be clicked
/// wherever it is visible. Stored shapes and the scene keep the signed values
/// exactly as they were set; only the emitted SVG is normalised.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    /// CSS cursor shown over shapes.
    pub shape_cursor: &'static str,
    /// Emit `data-shape-id` attributes so a host can map DOM hits back to shapes.
    pub include_ids: bool,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            shape_cursor: "move",
            include_ids: true,
        }
    }
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render straight to a string.
    pub fn render_to_string(&self, scene: &Scene) -> RenderResult<String> {
        let Size { width, height } = scene.size;
        check_finite("canvas", &[width, height])?;

        let mut out = String::new();
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height,
        )?;
        writeln!(
            out,
            r#"  <rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            width,
            height,
            escape(&scene.background),
        )?;
        for node in &scene.nodes {
            self.write_node(&mut out, node)?;
        }
        out.push_str("</svg>\n");

        log::trace!("Rendered {} nodes to SVG", scene.nodes.len());
        Ok(out)
    }

    fn write_node(&self, out: &mut String, node: &SceneNode) -> RenderResult<()> {
        match &node.primitive {
            Primitive::Rect {
                origin,
                width,
                height,
            } => {
                check_finite(&node.id.to_string(), &[origin.x, origin.y, *width, *height])?;
                let rect = Rect::from_origin_size(*origin, (*width, *height)).abs();
                write!(
                    out,
                    r#"  <rect x="{}" y="{}" width="{}" height="{}""#,
                    rect.x0,
                    rect.y0,
                    rect.width(),
                    rect.height(),
                )?;
            }
            Primitive::Circle { center, radius } => {
                check_finite(&node.id.to_string(), &[center.x, center.y, *radius])?;
                let Point { x, y } = *center;
                write!(
                    out,
                    r#"  <circle cx="{}" cy="{}" r="{}""#,
                    x,
                    y,
                    radius.abs(),
                )?;
            }
        }

        if self.include_ids {
            write!(out, r#" data-shape-id="{}""#, node.id)?;
        }
        write!(out, r#" fill="{}""#, escape(node.fill.as_str()))?;
        if let Some(stroke) = &node.highlight {
            write!(
                out,
                r#" stroke="{}" stroke-width="{}""#,
                escape(&stroke.color),
                stroke.width,
            )?;
        }
        writeln!(out, r#" cursor="{}"/>"#, escape(self.shape_cursor))?;
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    type Output = String;

    fn render(&mut self, scene: &Scene) -> RenderResult<String> {
        self.render_to_string(scene)
    }
}

fn check_finite(label: &str, values: &[f64]) -> RenderResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(RendererError::NonFinite(label.to_string()))
    }
}

/// Escape a value for use inside a double-quoted XML attribute.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
