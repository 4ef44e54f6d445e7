use tracing::{debug, trace, warn};

use crate::core::{BarChartGeometry, StackedSeries, stack_layers};
use crate::error::ChartResult;
use crate::extensions::WidgetEvent;
use crate::render::Renderer;

use super::BarChartWidget;
use super::bar_scene::BarScene;

impl<R: Renderer> BarChartWidget<R> {
    /// Replaces the bound series.
    ///
    /// The canvas is cleared and `grouped` is forced back to `false` right
    /// away; drawing waits for the debounce window to pass.
    pub fn set_val(&mut self, val: Option<StackedSeries>, now_ms: f64) {
        self.advance_clock(now_ms);
        self.clear_canvas();

        if self.grouped.set(false).is_some() {
            debug!("grouped reset by new data");
            self.emit(WidgetEvent::GroupedReset);
        }

        let val = val.filter(|series| !series.is_empty());
        let has_data = val.is_some();
        self.val.replace(val);

        if !has_data {
            if self.scheduler.cancel().is_some() {
                self.emit(WidgetEvent::RenderCancelled);
            }
            debug!("bar chart data cleared");
            self.emit(WidgetEvent::DataCleared);
            return;
        }

        debug!(
            layers = self.val.get().as_ref().map_or(0, StackedSeries::layer_count),
            "bar chart data replaced"
        );
        self.emit(WidgetEvent::DataReplaced);
        self.schedule_render(now_ms);
    }

    /// Viewport width watch: a new width redraws the current series.
    pub fn set_container_width(&mut self, width: f64, now_ms: f64) {
        self.advance_clock(now_ms);
        if !width.is_finite() || width == self.container_width {
            return;
        }
        trace!(width, "container width changed");
        self.container_width = width;
        self.clear_canvas();
        if self.val.get().is_some() {
            self.schedule_render(now_ms);
        }
    }

    /// Advances the clock and runs a due render.
    ///
    /// Returns `true` when a render fired and produced a scene.
    pub fn tick(&mut self, now_ms: f64) -> ChartResult<bool> {
        self.advance_clock(now_ms);
        trace!(now_ms = self.clock_ms, "bar chart tick");
        if self.scheduler.poll(self.clock_ms).is_none() {
            return Ok(false);
        }
        self.run_render()
    }

    fn schedule_render(&mut self, now_ms: f64) {
        let scheduled = self.scheduler.schedule(now_ms);
        if scheduled.cancelled.is_some() {
            self.emit(WidgetEvent::RenderCancelled);
        }
        debug!(due_ms = scheduled.due_ms, "bar chart render scheduled");
        self.emit(WidgetEvent::RenderScheduled {
            due_ms: scheduled.due_ms,
        });
    }

    fn run_render(&mut self) -> ChartResult<bool> {
        let Some(series) = self.val.get().clone() else {
            return Ok(false);
        };

        let width =
            self.container_width - self.config.margins.left - self.config.margins.right;
        if width <= 0.0 {
            warn!(
                container_width = self.container_width,
                "bar chart has no horizontal room, skipping render"
            );
            return Ok(false);
        }

        let layout = stack_layers(&series);
        let geometry = BarChartGeometry::new(
            &layout,
            width,
            self.config.plot_height,
            self.config.bar_fill_ratio,
        )?;
        let scene = BarScene::build(
            &series,
            &layout,
            geometry,
            self.container_width,
            self.clock_ms,
            self.config.entrance_ms,
            self.config.stagger_ms,
        );
        debug!(
            layers = layout.layer_count(),
            samples = layout.sample_count(),
            max_total = layout.max_total(),
            max_value = layout.max_value(),
            "bar chart render fired"
        );
        self.scene = Some(scene);

        if *self.grouped.get() {
            self.start_mode_transition(true, self.clock_ms);
        }

        self.emit(WidgetEvent::Rendered { canvases: 1 });
        Ok(true)
    }

    pub(super) fn clear_canvas(&mut self) {
        self.scene = None;
        if self.pointer.on_pointer_leave() || self.tooltip.is_visible() {
            self.tooltip.hide();
            self.emit(WidgetEvent::TooltipHidden);
        }
    }
}
