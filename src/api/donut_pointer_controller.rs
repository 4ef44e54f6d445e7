use crate::core::SliceFace;
use crate::extensions::WidgetEvent;
use crate::interaction::{TooltipOffset, tooltip_markup};
use crate::render::Renderer;

use super::DonutChartWidget;
use super::donut_scene::SliceId;

/// Donut tooltips sit 30px below the top of the hovered face.
pub const DONUT_TOOLTIP_OFFSET: TooltipOffset = TooltipOffset::new(30.0, 0.0);

impl<R: Renderer> DonutChartWidget<R> {
    /// Hit-tests one canvas, front rims before top faces.
    pub fn pointer_move(&mut self, canvas_id: &str, x: f64, y: f64) -> Option<SliceId> {
        let hit = self.hit_test(canvas_id, x, y);
        let changed = self.pointer.on_pointer_move(x, y, hit.clone());
        if changed {
            match &hit {
                Some(id) => self.show_tooltip(id),
                None => self.hide_tooltip(),
            }
        }
        hit
    }

    pub fn pointer_leave(&mut self) {
        self.pointer.on_pointer_leave();
        self.hide_tooltip();
    }

    /// Tooltip body for a slice, e.g. `12 connections blog`.
    #[must_use]
    pub fn tooltip_html(&self, canvas_id: &str, index: usize) -> Option<String> {
        let datum = &self.donut(canvas_id)?.slices.get(index)?.datum;
        let label = format!(
            "{} {} {}",
            datum.count, self.indicator.plural, datum.module_id
        );
        Some(tooltip_markup(&label))
    }

    fn hit_test(&self, canvas_id: &str, x: f64, y: f64) -> Option<SliceId> {
        let canvas = self.donut(canvas_id)?;
        let shape = self.config.shape;
        let faces: Vec<_> = canvas
            .slices
            .iter()
            .map(|slice| shape.hit_test(slice.current, x, y))
            .collect();
        let index = faces
            .iter()
            .position(|face| *face == Some(SliceFace::Outer))
            .or_else(|| faces.iter().position(|face| *face == Some(SliceFace::Top)))?;
        Some(SliceId {
            canvas_id: canvas_id.to_owned(),
            index,
        })
    }

    fn show_tooltip(&mut self, id: &SliceId) {
        let Some(html) = self.tooltip_html(&id.canvas_id, id.index) else {
            return;
        };
        let Some(angles) = self.slice_angles(&id.canvas_id, id.index) else {
            return;
        };
        let (min_x, min_y, max_x, _) = self.config.shape.top_bounds(angles);
        let anchor = ((min_x + max_x) / 2.0, min_y);
        self.tooltip.show(html, anchor, DONUT_TOOLTIP_OFFSET);
        self.emit(WidgetEvent::TooltipShown);
    }

    fn hide_tooltip(&mut self) {
        if self.tooltip.is_visible() {
            self.tooltip.hide();
            self.emit(WidgetEvent::TooltipHidden);
        }
    }
}
