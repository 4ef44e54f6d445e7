use tracing::trace;

use crate::error::ChartResult;
use crate::render::{
    Color, PathPrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::DonutChartWidget;
use super::donut_scene::{CanvasContent, DonutCanvas, LegendItem};

/// Rims are drawn in the slice color darkened by this many d3 steps.
const RIM_DARKEN: f64 = 0.7;
/// SVG `dy=".71em"` hanging-baseline shift used by legend text.
const HANGING_EM: f64 = 0.71;

impl<R: Renderer> DonutChartWidget<R> {
    /// One frame per canvas, in page order.
    #[must_use]
    pub fn frames(&self) -> Vec<RenderFrame> {
        self.canvases
            .iter()
            .map(|(id, content)| match content {
                CanvasContent::Donut(canvas) => self.donut_frame(id, canvas),
                CanvasContent::Legend(items) => self.legend_frame(id, items),
            })
            .collect()
    }

    #[must_use]
    pub fn frame(&self, canvas_id: &str) -> Option<RenderFrame> {
        match self.canvases.get(canvas_id)? {
            CanvasContent::Donut(canvas) => Some(self.donut_frame(canvas_id, canvas)),
            CanvasContent::Legend(items) => Some(self.legend_frame(canvas_id, items)),
        }
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frames = self.frames();
        trace!(canvases = frames.len(), "render donut chart frames");
        self.renderer.begin_pass();
        for frame in &frames {
            self.renderer.render(frame)?;
        }
        Ok(())
    }

    fn donut_frame(&self, canvas_id: &str, canvas: &DonutCanvas) -> RenderFrame {
        let shape = self.config.shape;
        let mut frame = RenderFrame::new(canvas_id, self.config.canvas);
        let live: Vec<_> = canvas
            .slices
            .iter()
            .map(|slice| slice.current)
            .collect();

        for (slice, angles) in canvas.slices.iter().zip(&live) {
            frame.paths.push(PathPrimitive::new(
                shape.inner_path(*angles),
                slice.color.darker(RIM_DARKEN),
            ));
        }
        for (slice, angles) in canvas.slices.iter().zip(&live) {
            let top = shape.top_path(*angles);
            if top.is_empty() {
                continue;
            }
            frame
                .paths
                .push(PathPrimitive::new(top, slice.color).with_stroke(slice.color));
        }
        for (slice, angles) in canvas.slices.iter().zip(&live) {
            frame.paths.push(PathPrimitive::new(
                shape.outer_path(*angles),
                slice.color.darker(RIM_DARKEN),
            ));
        }
        for (slice, angles) in canvas.slices.iter().zip(&live) {
            let Some(label) = &slice.label else {
                continue;
            };
            let (x, y) = shape.label_position(*angles);
            frame.texts.push(TextPrimitive::new(
                label.clone(),
                x,
                y,
                self.config.percent_font_px,
                Color::BLACK,
                TextHAlign::Center,
            ));
        }
        if let Some(profile) = canvas.profile_label.as_deref().filter(|text| !text.is_empty()) {
            frame.texts.push(TextPrimitive::new(
                profile,
                shape.center_x,
                self.config.profile_label_y,
                self.config.profile_label_font_px,
                Color::BLACK,
                TextHAlign::Center,
            ));
        }
        frame
    }

    fn legend_frame(&self, canvas_id: &str, items: &[LegendItem]) -> RenderFrame {
        let grid = self.config.legend;
        let font = self.config.legend_font_px;
        let mut frame = RenderFrame::new(canvas_id, self.config.legend_canvas);
        for (index, item) in items.iter().enumerate() {
            let entry = grid.entry(index);
            frame.rects.push(RectPrimitive::new(
                entry.swatch_x,
                entry.swatch_y,
                grid.swatch_size,
                grid.swatch_size,
                item.color,
            ));
            if item.module_id.is_empty() {
                continue;
            }
            frame.texts.push(TextPrimitive::new(
                item.module_id.clone(),
                entry.text_x,
                entry.text_y + HANGING_EM * font,
                font,
                Color::BLACK,
                TextHAlign::Left,
            ));
        }
        frame
    }
}
