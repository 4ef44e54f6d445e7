use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace, warn};

use crate::core::{PieDatum, SliceAngles, join_by_key, pie_layout, reconcile_detail};
use crate::extensions::WidgetEvent;
use crate::render::Renderer;

use super::DonutChartWidget;
use super::donut_scene::{CanvasContent, DonutCanvas, LEGEND_CANVAS_ID, donut_canvas_id};

impl<R: Renderer> DonutChartWidget<R> {
    /// `grouped` watch: toggles between aggregate and per-profile donuts.
    pub fn set_grouped(&mut self, grouped: bool, now_ms: f64) {
        self.advance_clock(now_ms);
        if self.grouped.set(grouped).is_none() {
            return;
        }
        debug!(grouped, "donut chart mode changed");
        self.emit(WidgetEvent::ModeChanged { grouped });
        if self.val.get().is_none() {
            return;
        }
        if grouped {
            self.apply_detail_view(self.clock_ms);
        } else {
            self.apply_global_view(self.clock_ms);
        }
    }

    /// Morphs `piechart0` into the first profile and adds the others.
    ///
    /// Slices are matched by `module_id`; aggregate categories missing from
    /// the profile collapse in place.
    pub(super) fn apply_detail_view(&mut self, now_ms: f64) {
        let Some(model) = self.val.get().clone() else {
            return;
        };
        let Some(first_detail) = model.detail_data.first() else {
            warn!("donut chart has no detail series, keeping aggregate view");
            return;
        };
        let duration_ms = self.config.transition_ms;

        let reconciled = reconcile_detail(&model.global_data, first_detail);
        let targets: IndexMap<String, (PieDatum, SliceAngles)> = reconciled
            .iter()
            .zip(pie_layout(&reconciled))
            .map(|(datum, placed)| (datum.module_id.clone(), (datum.clone(), placed.angles)))
            .collect();
        let main_id = donut_canvas_id(0);
        let main_label = model
            .profile_id(0)
            .map(|profile| self.translator.translate(profile));

        if let Some(canvas) = self
            .canvases
            .get_mut(&main_id)
            .and_then(CanvasContent::as_donut_mut)
        {
            let join = join_by_key(&canvas.keys(), targets.keys().cloned());
            trace!(
                update = join.update.len(),
                exit = join.exit.len(),
                "donut detail join"
            );
            if !join.enter.is_empty() {
                warn!(
                    entering = join.enter.len(),
                    "detail categories without an aggregate slice are not drawn"
                );
            }
            let exiting: IndexSet<&String> = join.exit.iter().collect();
            let mut cursor = 0.0;
            for slice in &mut canvas.slices {
                let target = if exiting.contains(&slice.datum.module_id) {
                    None
                } else {
                    targets.get(&slice.datum.module_id)
                };
                match target {
                    Some((datum, angles)) => {
                        cursor = angles.end;
                        slice.retarget(datum.clone(), *angles, now_ms, duration_ms);
                    }
                    None => {
                        let datum = slice.datum.clone();
                        slice.retarget(datum, SliceAngles::collapsed(cursor), now_ms, duration_ms);
                    }
                }
            }
            canvas.profile_label = main_label;
        }

        for (series_index, series) in model.detail_data.iter().enumerate().skip(1) {
            let id = donut_canvas_id(series_index);
            let mut canvas = DonutCanvas::draw(series);
            canvas.profile_label = model
                .profile_id(series_index)
                .map(|profile| self.translator.translate(profile));
            self.canvases.shift_remove(&id);
            let legend_position = self
                .canvases
                .get_index_of(LEGEND_CANVAS_ID)
                .unwrap_or(self.canvases.len());
            self.canvases
                .shift_insert(legend_position, id.clone(), CanvasContent::Donut(canvas));
            self.emit(WidgetEvent::CanvasInserted { id });
        }

        self.detail_view = true;
        debug!(
            profiles = model.detail_data.len(),
            "donut detail view applied"
        );
    }

    /// Morphs `piechart0` back to the aggregate and drops profile donuts.
    pub(super) fn apply_global_view(&mut self, now_ms: f64) {
        let Some(model) = self.val.get().clone() else {
            return;
        };
        let duration_ms = self.config.transition_ms;
        let main_id = donut_canvas_id(0);
        let layout = pie_layout(&model.global_data);

        if let Some(canvas) = self
            .canvases
            .get_mut(&main_id)
            .and_then(CanvasContent::as_donut_mut)
        {
            for (slice, (datum, placed)) in canvas
                .slices
                .iter_mut()
                .zip(model.global_data.iter().zip(&layout))
            {
                slice.retarget(datum.clone(), placed.angles, now_ms, duration_ms);
            }
            canvas.profile_label = None;
        }

        let removed: Vec<String> = self
            .canvases
            .keys()
            .filter(|id| id.as_str() != main_id && id.as_str() != LEGEND_CANVAS_ID)
            .cloned()
            .collect();
        for id in removed {
            self.canvases.shift_remove(&id);
            self.emit(WidgetEvent::CanvasRemoved { id });
        }

        if self.pointer.hovered().is_some_and(|hit| hit.canvas_id != main_id) {
            self.pointer.on_pointer_leave();
            if self.tooltip.is_visible() {
                self.tooltip.hide();
                self.emit(WidgetEvent::TooltipHidden);
            }
        }

        self.detail_view = false;
        debug!("donut aggregate view restored");
    }
}
