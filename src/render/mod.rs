mod frame;
mod null_renderer;
mod primitives;
mod svg_renderer;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, PathPrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};
pub use svg_renderer::SvgRenderer;

pub(crate) use svg_renderer::escape_xml;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// A widget render is one pass: `begin_pass` once, then `render` once per
/// canvas in page order. Backends receive fully materialized, deterministic
/// frames so drawing code stays isolated from chart and animation logic.
pub trait Renderer {
    fn begin_pass(&mut self) {}

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
