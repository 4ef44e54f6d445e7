use crate::extensions::WidgetEvent;
use crate::interaction::{TooltipOffset, tooltip_markup};
use crate::render::Renderer;

use super::BarChartWidget;
use super::bar_scene::BarId;

/// Bar tooltips sit 10px above the bar top.
pub const BAR_TOOLTIP_OFFSET: TooltipOffset = TooltipOffset::new(-10.0, 0.0);

impl<R: Renderer> BarChartWidget<R> {
    /// Hit-tests live bars, topmost layer first, and updates the tooltip.
    ///
    /// Returns the bar under the pointer, if any.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<BarId> {
        let hit = self.hit_test(x, y);
        let changed = self.pointer.on_pointer_move(x, y, hit);
        if !changed {
            return hit;
        }
        match hit {
            Some(id) => self.show_tooltip(id),
            None => self.hide_tooltip(),
        }
        hit
    }

    pub fn pointer_leave(&mut self) {
        self.pointer.on_pointer_leave();
        self.hide_tooltip();
    }

    /// Tooltip body for a bar, e.g. `3 connections Teachers`.
    #[must_use]
    pub fn tooltip_html(&self, layer: usize, sample: usize) -> Option<String> {
        let scene = self.scene.as_ref()?;
        let (value, profile) = scene.layers.get(layer)?.labels.get(sample)?;
        let label = if *value > 1.0 {
            format!("{value} {} {profile}s", self.indicator.plural)
        } else {
            format!("{value} {} {profile}", self.indicator.singular)
        };
        Some(tooltip_markup(&label))
    }

    fn hit_test(&self, x: f64, y: f64) -> Option<BarId> {
        let scene = self.scene.as_ref()?;
        scene
            .bar_ids()
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .find(|id| {
                let bounds = self.absolute_bar_rect(scene, *id);
                bounds.height > 0.0
                    && x >= bounds.x
                    && x <= bounds.x + bounds.width
                    && y >= bounds.y
                    && y <= bounds.y + bounds.height
            })
    }

    fn show_tooltip(&mut self, id: BarId) {
        let Some(html) = self.tooltip_html(id.layer, id.sample) else {
            return;
        };
        let Some(scene) = self.scene.as_ref() else {
            return;
        };
        let bounds = self.absolute_bar_rect(scene, id);
        let anchor = (bounds.x + bounds.width / 2.0, bounds.y);
        self.tooltip.show(html, anchor, BAR_TOOLTIP_OFFSET);
        self.emit(WidgetEvent::TooltipShown);
    }

    fn hide_tooltip(&mut self) {
        if self.tooltip.is_visible() {
            self.tooltip.hide();
            self.emit(WidgetEvent::TooltipHidden);
        }
    }
}
