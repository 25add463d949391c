//! Doandong Render Library
//!
//! Renderer abstraction over the core scene graph.
//! The default implementation writes a standalone SVG document.

mod renderer;
mod svg;

pub use renderer::{RenderResult, Renderer, RendererError};
pub use svg::SvgRenderer;
