use tracing::warn;

use crate::core::{
    BarChartGeometry, BarRect, StackLayout, StackedSeries, StackedValue, Timeline, TweenTiming,
};
use crate::render::Color;

/// Address of one bar: its layer and its sample slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BarId {
    pub layer: usize,
    pub sample: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct BarNode {
    pub(super) value: StackedValue,
    pub(super) timeline: Timeline<BarRect>,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct BarLayer {
    pub(super) color: Color,
    pub(super) profile: String,
    pub(super) bars: Vec<BarNode>,
    /// Per-sample `(y, profile)` pairs for tooltips.
    pub(super) labels: Vec<(f64, String)>,
}

/// Retained output of one debounced render.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct BarScene {
    pub(super) geometry: BarChartGeometry,
    pub(super) layers: Vec<BarLayer>,
    /// Upstream date string of each sample slot.
    pub(super) dates: Vec<String>,
    pub(super) axis: Timeline<f64>,
    pub(super) container_width: f64,
}

impl BarScene {
    /// Bars start collapsed on the axis and grow in, staggered by sample.
    pub(super) fn build(
        series: &StackedSeries,
        layout: &StackLayout,
        geometry: BarChartGeometry,
        container_width: f64,
        now_ms: f64,
        entrance_ms: f64,
        stagger_ms: f64,
    ) -> Self {
        let collapsed = geometry.collapsed_rect();
        let layers = layout
            .layers()
            .iter()
            .zip(series.layers())
            .map(|(stacked, samples)| {
                let bars = stacked
                    .iter()
                    .map(|value| BarNode {
                        value: *value,
                        timeline: Timeline::starting(collapsed, now_ms).then(
                            geometry.stacked_rect(*value),
                            TweenTiming::new(value.x as f64 * stagger_ms, entrance_ms),
                        ),
                    })
                    .collect();
                let (color, profile) = samples
                    .first()
                    .map(|sample| (layer_color(&sample.color), sample.profile.clone()))
                    .unwrap_or((Color::NEUTRAL, String::new()));
                BarLayer {
                    color,
                    profile,
                    bars,
                    labels: samples
                        .iter()
                        .map(|sample| (sample.y, sample.profile.clone()))
                        .collect(),
                }
            })
            .collect();

        let dates = series
            .layers()
            .first()
            .map(|layer| layer.iter().map(|sample| sample.date.clone()).collect())
            .unwrap_or_default();

        Self {
            geometry,
            layers,
            dates,
            axis: Timeline::still(geometry.max_total()),
            container_width,
        }
    }

    pub(super) fn bar(&self, id: BarId) -> Option<&BarNode> {
        self.layers.get(id.layer)?.bars.get(id.sample)
    }

    pub(super) fn bar_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.bars.len()).sum()
    }

    pub(super) fn is_animating(&self, now_ms: f64) -> bool {
        !self.axis.is_settled(now_ms)
            || self
                .layers
                .iter()
                .flat_map(|layer| &layer.bars)
                .any(|bar| !bar.timeline.is_settled(now_ms))
    }

    pub(super) fn bar_ids(&self) -> impl Iterator<Item = BarId> + '_ {
        self.layers.iter().enumerate().flat_map(|(layer, entry)| {
            (0..entry.bars.len()).map(move |sample| BarId { layer, sample })
        })
    }
}

fn layer_color(raw: &str) -> Color {
    match Color::parse_hex(raw) {
        Ok(color) => color,
        Err(err) => {
            warn!(color = raw, %err, "unparsable layer color, using neutral fill");
            Color::NEUTRAL
        }
    }
}
