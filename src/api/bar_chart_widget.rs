use crate::core::{BarRect, Indicator, StackedSeries};
use crate::error::ChartResult;
use crate::extensions::{ObserverRegistry, WidgetContext, WidgetEvent, WidgetKind, WidgetObserver};
use crate::interaction::{PointerState, TooltipState};
use crate::render::Renderer;

use super::bar_scene::{BarId, BarScene};
use super::{BarChartConfig, Binding, DebouncedTask, WatchId};

/// Stacked/grouped bar chart of per-category time samples.
///
/// Data changes and container resizes are debounced: the widget clears its
/// canvas immediately and rebuilds the scene once `tick` reaches the due
/// time. The `grouped` binding animates bars between stacked and
/// side-by-side layouts.
pub struct BarChartWidget<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: BarChartConfig,
    pub(super) indicator: Indicator,
    pub(super) val: Binding<Option<StackedSeries>>,
    pub(super) grouped: Binding<bool>,
    pub(super) container_width: f64,
    pub(super) scheduler: DebouncedTask,
    pub(super) clock_ms: f64,
    pub(super) scene: Option<BarScene>,
    pub(super) tooltip: TooltipState,
    pub(super) pointer: PointerState<BarId>,
    pub(super) observers: ObserverRegistry,
}

impl<R: Renderer> BarChartWidget<R> {
    pub fn new(renderer: R, config: BarChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let scheduler = DebouncedTask::new(config.debounce_ms);
        Ok(Self {
            renderer,
            config,
            indicator: Indicator::default(),
            val: Binding::new(None),
            grouped: Binding::new(false),
            container_width: 0.0,
            scheduler,
            clock_ms: 0.0,
            scene: None,
            tooltip: TooltipState::default(),
            pointer: PointerState::default(),
            observers: ObserverRegistry::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &BarChartConfig {
        &self.config
    }

    pub fn set_indicator(&mut self, indicator: Indicator) {
        self.indicator = indicator;
    }

    #[must_use]
    pub fn indicator(&self) -> &Indicator {
        &self.indicator
    }

    #[must_use]
    pub fn val(&self) -> Option<&StackedSeries> {
        self.val.get().as_ref()
    }

    #[must_use]
    pub fn grouped(&self) -> bool {
        *self.grouped.get()
    }

    /// Subscribes to `grouped` changes, including resets caused by new data.
    pub fn watch_grouped(&mut self, watcher: impl FnMut(&bool, &bool) + 'static) -> WatchId {
        self.grouped.watch(watcher)
    }

    pub fn unwatch_grouped(&mut self, id: WatchId) -> bool {
        self.grouped.unwatch(id)
    }

    #[must_use]
    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    #[must_use]
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    #[must_use]
    pub fn has_scene(&self) -> bool {
        self.scene.is_some()
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.scene.as_ref().map_or(0, |scene| scene.layers.len())
    }

    #[must_use]
    pub fn bar_count(&self) -> usize {
        self.scene.as_ref().map_or(0, BarScene::bar_count)
    }

    #[must_use]
    pub fn bars_in_layer(&self, layer: usize) -> usize {
        self.scene
            .as_ref()
            .and_then(|scene| scene.layers.get(layer))
            .map_or(0, |entry| entry.bars.len())
    }

    /// Live rectangle of a bar, relative to its sample slot.
    #[must_use]
    pub fn bar_rect(&self, layer: usize, sample: usize) -> Option<BarRect> {
        self.scene
            .as_ref()?
            .bar(BarId { layer, sample })
            .map(|bar| bar.timeline.value_at(self.clock_ms))
    }

    /// Live rectangle of a bar in canvas coordinates.
    #[must_use]
    pub fn bar_bounds(&self, layer: usize, sample: usize) -> Option<BarRect> {
        let scene = self.scene.as_ref()?;
        let id = BarId { layer, sample };
        scene.bar(id)?;
        Some(self.absolute_bar_rect(scene, id))
    }

    /// Current upper bound of the y axis domain.
    #[must_use]
    pub fn axis_max(&self) -> Option<f64> {
        self.scene
            .as_ref()
            .map(|scene| scene.axis.value_at(self.clock_ms))
    }

    #[must_use]
    pub fn is_render_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    #[must_use]
    pub fn render_due_ms(&self) -> Option<f64> {
        self.scheduler.due_ms()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.scene
            .as_ref()
            .is_some_and(|scene| scene.is_animating(self.clock_ms))
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

    pub(super) fn absolute_bar_rect(&self, scene: &BarScene, id: BarId) -> BarRect {
        let live = scene
            .bar(id)
            .map_or_else(BarRect::default, |bar| bar.timeline.value_at(self.clock_ms));
        let origin_x = self.config.margins.left
            + self.config.padding_left
            + scene.geometry.slot_x(id.sample);
        BarRect::new(
            origin_x + live.x,
            self.config.margins.top + live.y,
            live.width,
            live.height,
        )
    }

    pub(super) fn advance_clock(&mut self, now_ms: f64) {
        if now_ms.is_finite() && now_ms > self.clock_ms {
            self.clock_ms = now_ms;
        }
    }

    pub(super) fn emit(&mut self, event: WidgetEvent) {
        let context = WidgetContext {
            kind: WidgetKind::BarChart,
            now_ms: self.clock_ms,
            grouped: *self.grouped.get(),
            has_data: self.val.get().is_some(),
            canvas_count: usize::from(self.scene.is_some()),
        };
        self.observers.emit(&event, context);
    }
}
