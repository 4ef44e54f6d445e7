use tracing::trace;

use crate::core::{LinearScale, Viewport, format_date_label, format_integer_tick};
use crate::error::ChartResult;
use crate::render::{
    Color, LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::BarChartWidget;
use super::bar_scene::BarScene;

pub const BAR_CANVAS_ID: &str = "barchart";

const AXIS_TICK_SIZE: f64 = 6.0;
const AXIS_LABEL_GAP: f64 = 3.0;
const X_LABEL_GAP: f64 = 6.0;
/// SVG `dy=".71em"` hanging-baseline shift.
const HANGING_EM: f64 = 0.71;
/// SVG `dy=".32em"` central-baseline shift used by axis labels.
const CENTRAL_EM: f64 = 0.32;

impl<R: Renderer> BarChartWidget<R> {
    /// Materializes the canvas at the current clock.
    ///
    /// Returns `None` while nothing is drawn.
    #[must_use]
    pub fn frame(&self) -> Option<RenderFrame> {
        let scene = self.scene.as_ref()?;
        let viewport = Viewport::new(
            scene.container_width.round().max(0.0) as u32,
            self.config.canvas_height().ceil() as u32,
        );
        let mut frame = RenderFrame::new(BAR_CANVAS_ID, viewport);
        self.push_bars(scene, &mut frame);
        self.push_x_labels(scene, &mut frame);
        self.push_y_axis(scene, &mut frame);
        self.push_legend(scene, &mut frame);
        Some(frame)
    }

    /// Hands the current frame, if any, to the renderer as one pass.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.frame();
        self.renderer.begin_pass();
        if let Some(frame) = frame {
            trace!(
                rects = frame.rects.len(),
                texts = frame.texts.len(),
                "render bar chart frame"
            );
            self.renderer.render(&frame)?;
        }
        Ok(())
    }

    fn push_bars(&self, scene: &BarScene, frame: &mut RenderFrame) {
        for id in scene.bar_ids() {
            let bounds = self.absolute_bar_rect(scene, id);
            let fill = scene.layers[id.layer].color;
            frame.rects.push(RectPrimitive::new(
                bounds.x,
                bounds.y,
                bounds.width.max(0.0),
                bounds.height.max(0.0),
                fill,
            ));
        }
    }

    fn push_x_labels(&self, scene: &BarScene, frame: &mut RenderFrame) {
        let margins = self.config.margins;
        let font = self.config.font_size_px;
        let y = margins.top + self.config.plot_height + X_LABEL_GAP + HANGING_EM * font;
        let center = scene.geometry.stacked_bar_width() / 2.0;
        for (sample, date) in scene.dates.iter().enumerate() {
            let x = margins.left
                + self.config.padding_left
                + scene.geometry.slot_x(sample)
                + center;
            let label = format_date_label(date, self.config.date_label_format.as_deref());
            frame.texts.push(TextPrimitive::new(
                label,
                x,
                y,
                font,
                Color::BLACK,
                TextHAlign::Center,
            ));
        }
    }

    fn push_y_axis(&self, scene: &BarScene, frame: &mut RenderFrame) {
        let margins = self.config.margins;
        let height = self.config.plot_height;
        let font = self.config.font_size_px;
        let axis_x = margins.left + self.config.padding_left;

        frame.lines.push(LinePrimitive::new(
            axis_x,
            margins.top,
            axis_x,
            margins.top + height,
            1.0,
            Color::BLACK,
        ));

        let live_max = scene.axis.value_at(self.clock_ms);
        let domain_max = if live_max > 0.0 { live_max } else { 1.0 };
        let Ok(scale) = LinearScale::new(0.0, domain_max, height, 0.0) else {
            return;
        };
        for tick in scale.ticks(self.config.y_tick_count) {
            let y = margins.top + scale.map_round(tick);
            frame.lines.push(LinePrimitive::new(
                axis_x - AXIS_TICK_SIZE,
                y,
                axis_x,
                y,
                1.0,
                Color::BLACK,
            ));
            if let Some(label) = format_integer_tick(tick) {
                frame.texts.push(TextPrimitive::new(
                    label,
                    axis_x - AXIS_TICK_SIZE - AXIS_LABEL_GAP,
                    y + CENTRAL_EM * font,
                    font,
                    Color::BLACK,
                    TextHAlign::Right,
                ));
            }
        }
    }

    fn push_legend(&self, scene: &BarScene, frame: &mut RenderFrame) {
        let margins = self.config.margins;
        let grid = self.config.legend;
        let base_y = margins.top + self.config.plot_height;
        let font = self.config.font_size_px;
        for (index, layer) in scene.layers.iter().enumerate() {
            let entry = grid.entry(index);
            frame.rects.push(RectPrimitive::new(
                margins.left + entry.swatch_x,
                base_y + entry.swatch_y,
                grid.swatch_size,
                grid.swatch_size,
                layer.color,
            ));
            if layer.profile.is_empty() {
                continue;
            }
            frame.texts.push(TextPrimitive::new(
                layer.profile.clone(),
                margins.left + entry.text_x,
                base_y + entry.text_y + HANGING_EM * font,
                font,
                Color::BLACK,
                TextHAlign::Left,
            ));
        }
    }
}
