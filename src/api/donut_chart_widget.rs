use indexmap::IndexMap;
use tracing::debug;

use crate::core::{DonutViewModel, Indicator, SliceAngles};
use crate::error::ChartResult;
use crate::extensions::{ObserverRegistry, WidgetContext, WidgetEvent, WidgetKind, WidgetObserver};
use crate::interaction::{PointerState, TooltipState};
use crate::render::Renderer;

use super::donut_scene::{CanvasContent, DonutCanvas, LEGEND_CANVAS_ID, SliceId, donut_canvas_id};
use super::{Binding, DonutChartConfig, IdentityTranslator, Translator, WatchId};

/// Pseudo-3D donut chart with an aggregate view and per-profile breakdowns.
///
/// Canvas `piechart0` always shows the aggregate. Switching `grouped` on
/// morphs it into the first profile and adds one donut per further
/// profile; switching it off morphs back and removes them.
pub struct DonutChartWidget<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: DonutChartConfig,
    pub(super) indicator: Indicator,
    pub(super) translator: Box<dyn Translator>,
    pub(super) val: Binding<Option<DonutViewModel>>,
    pub(super) grouped: Binding<bool>,
    pub(super) clock_ms: f64,
    pub(super) canvases: IndexMap<String, CanvasContent>,
    pub(super) detail_view: bool,
    pub(super) tooltip: TooltipState,
    pub(super) pointer: PointerState<SliceId>,
    pub(super) observers: ObserverRegistry,
}

impl<R: Renderer> DonutChartWidget<R> {
    pub fn new(renderer: R, config: DonutChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            renderer,
            config,
            indicator: Indicator::default(),
            translator: Box::new(IdentityTranslator),
            val: Binding::new(None),
            grouped: Binding::new(false),
            clock_ms: 0.0,
            canvases: IndexMap::new(),
            detail_view: false,
            tooltip: TooltipState::default(),
            pointer: PointerState::default(),
            observers: ObserverRegistry::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &DonutChartConfig {
        &self.config
    }

    pub fn set_indicator(&mut self, indicator: Indicator) {
        self.indicator = indicator;
    }

    #[must_use]
    pub fn indicator(&self) -> &Indicator {
        &self.indicator
    }

    pub fn set_translator(&mut self, translator: Box<dyn Translator>) {
        self.translator = translator;
    }

    #[must_use]
    pub fn val(&self) -> Option<&DonutViewModel> {
        self.val.get().as_ref()
    }

    #[must_use]
    pub fn grouped(&self) -> bool {
        *self.grouped.get()
    }

    pub fn watch_grouped(&mut self, watcher: impl FnMut(&bool, &bool) + 'static) -> WatchId {
        self.grouped.watch(watcher)
    }

    pub fn unwatch_grouped(&mut self, id: WatchId) -> bool {
        self.grouped.unwatch(id)
    }

    /// Canvas ids in page order; the legend comes last.
    #[must_use]
    pub fn canvas_ids(&self) -> Vec<&str> {
        self.canvases.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn slice_count(&self, canvas_id: &str) -> usize {
        self.donut(canvas_id)
            .map_or(0, |canvas| canvas.slices.len())
    }

    /// Angles of a slice as displayed at the current clock.
    #[must_use]
    pub fn slice_angles(&self, canvas_id: &str, index: usize) -> Option<SliceAngles> {
        self.donut(canvas_id)?
            .slices
            .get(index)
            .map(|slice| slice.current)
    }

    /// Angles the slice is heading to.
    #[must_use]
    pub fn slice_target(&self, canvas_id: &str, index: usize) -> Option<SliceAngles> {
        self.donut(canvas_id)?
            .slices
            .get(index)
            .map(|slice| slice.timeline.target())
    }

    /// Percent text shown on a slice, if its span is wide enough.
    #[must_use]
    pub fn slice_label(&self, canvas_id: &str, index: usize) -> Option<&str> {
        self.donut(canvas_id)?
            .slices
            .get(index)?
            .label
            .as_deref()
    }

    #[must_use]
    pub fn profile_label(&self, canvas_id: &str) -> Option<&str> {
        self.donut(canvas_id)?.profile_label.as_deref()
    }

    #[must_use]
    pub fn is_detail_view(&self) -> bool {
        self.detail_view
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.canvases
            .values()
            .filter_map(CanvasContent::as_donut)
            .any(|canvas| canvas.is_animating(self.clock_ms))
    }

    #[must_use]
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Advances the animation clock.
    pub fn tick(&mut self, now_ms: f64) {
        self.advance_clock(now_ms);
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    pub fn register_observer(&mut self, observer: Box<dyn WidgetObserver>) -> ChartResult<()> {
        self.observers.register(observer)
    }

    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        self.observers.unregister(observer_id)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Replaces the bound view model and redraws the aggregate donut.
    ///
    /// When `grouped` is already on, the detail view is applied at once.
    pub fn set_val(&mut self, val: Option<DonutViewModel>, now_ms: f64) {
        self.advance_clock(now_ms);
        self.canvases.clear();
        self.detail_view = false;
        self.pointer.on_pointer_leave();
        if self.tooltip.is_visible() {
            self.tooltip.hide();
            self.emit(WidgetEvent::TooltipHidden);
        }

        let Some(model) = val else {
            self.val.replace(None);
            debug!("donut chart data cleared");
            self.emit(WidgetEvent::DataCleared);
            return;
        };

        self.canvases.insert(
            donut_canvas_id(0),
            CanvasContent::Donut(DonutCanvas::draw(&model.global_data)),
        );
        self.canvases.insert(
            LEGEND_CANVAS_ID.to_owned(),
            CanvasContent::legend(&model.global_data),
        );
        debug!(
            categories = model.global_data.len(),
            profiles = model.detail_data.len(),
            "donut chart data replaced"
        );
        self.val.replace(Some(model));
        self.emit(WidgetEvent::DataReplaced);

        if *self.grouped.get() {
            self.apply_detail_view(self.clock_ms);
        }
    }

    pub(super) fn donut(&self, canvas_id: &str) -> Option<&DonutCanvas> {
        self.canvases.get(canvas_id)?.as_donut()
    }

    pub(super) fn advance_clock(&mut self, now_ms: f64) {
        if now_ms.is_finite() && now_ms > self.clock_ms {
            self.clock_ms = now_ms;
            for canvas in self
                .canvases
                .values_mut()
                .filter_map(CanvasContent::as_donut_mut)
            {
                canvas.sync(now_ms);
            }
        }
    }

    pub(super) fn emit(&mut self, event: WidgetEvent) {
        let context = WidgetContext {
            kind: WidgetKind::DonutChart,
            now_ms: self.clock_ms,
            grouped: *self.grouped.get(),
            has_data: self.val.get().is_some(),
            canvas_count: self.canvases.len(),
        };
        self.observers.emit(&event, context);
    }
}
