use tracing::{debug, trace};

use crate::core::{Timeline, TweenTiming};
use crate::extensions::WidgetEvent;
use crate::render::Renderer;

use super::BarChartWidget;

impl<R: Renderer> BarChartWidget<R> {
    /// `grouped` watch: switches between side-by-side and stacked bars.
    ///
    /// Setting the current value again is a no-op.
    pub fn set_grouped(&mut self, grouped: bool, now_ms: f64) {
        self.advance_clock(now_ms);
        if self.grouped.set(grouped).is_none() {
            return;
        }
        debug!(grouped, "bar chart mode changed");
        self.emit(WidgetEvent::ModeChanged { grouped });
        if self.scene.is_some() {
            self.start_mode_transition(grouped, self.clock_ms);
        }
    }

    /// Retargets every bar from its live geometry.
    ///
    /// Grouping moves bars sideways first and then rescales their heights to
    /// `mz`; stacking restacks heights first and then widens the bars.
    pub(super) fn start_mode_transition(&mut self, grouped: bool, now_ms: f64) {
        let phase_ms = self.config.mode_transition_ms;
        let stagger_ms = self.config.stagger_ms;
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        let geometry = scene.geometry;

        for (layer_index, layer) in scene.layers.iter_mut().enumerate() {
            for bar in &mut layer.bars {
                let live = bar.timeline.value_at(now_ms);
                let (first, second) = if grouped {
                    let target = geometry.grouped_rect(layer_index, bar.value);
                    let sideways = live.with_horizontal(target);
                    (sideways, sideways.with_vertical(target))
                } else {
                    let target = geometry.stacked_rect(bar.value);
                    let restacked = live.with_vertical(target);
                    (restacked, restacked.with_horizontal(target))
                };
                bar.timeline = Timeline::starting(live, now_ms)
                    .then(
                        first,
                        TweenTiming::new(bar.value.x as f64 * stagger_ms, phase_ms),
                    )
                    .then(second, TweenTiming::new(0.0, phase_ms));
            }
        }

        let axis_target = if grouped {
            geometry.max_value()
        } else {
            geometry.max_total()
        };
        let axis_live = scene.axis.value_at(now_ms);
        scene.axis =
            Timeline::starting(axis_live, now_ms).then(axis_target, TweenTiming::new(0.0, phase_ms));
        trace!(grouped, axis_target, "bar mode transition started");
    }
}
