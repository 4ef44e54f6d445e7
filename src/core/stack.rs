use ordered_float::OrderedFloat;

use crate::core::StackedSeries;

/// One sample placed in the cumulative stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackedValue {
    /// Sample index inside its layer.
    pub x: usize,
    /// Baseline: sum of the layers below at the same index.
    pub y0: f64,
    /// Own magnitude.
    pub y: f64,
}

impl StackedValue {
    #[must_use]
    pub fn top(self) -> f64 {
        self.y0 + self.y
    }
}

/// Zero-offset stack of every layer, plus the maxima used for scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct StackLayout {
    layers: Vec<Vec<StackedValue>>,
    sample_count: usize,
    max_total: f64,
    max_value: f64,
}

impl StackLayout {
    #[must_use]
    pub fn layers(&self) -> &[Vec<StackedValue>] {
        &self.layers
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Largest cumulative total (`y0 + y`) over all samples.
    #[must_use]
    pub fn max_total(&self) -> f64 {
        self.max_total
    }

    /// Largest single-layer value over all samples.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }
}

/// Stacks layers in order with a zero baseline.
///
/// Layers are not required to have equal lengths: each index stacks on top
/// of whatever the preceding layers contribute at that index.
#[must_use]
pub fn stack_layers(series: &StackedSeries) -> StackLayout {
    let widest = series.layers().iter().map(Vec::len).max().unwrap_or(0);
    let mut baseline = vec![0.0_f64; widest];
    let mut layers = Vec::with_capacity(series.layer_count());

    for layer in series.layers() {
        let stacked: Vec<StackedValue> = layer
            .iter()
            .enumerate()
            .map(|(x, sample)| {
                let value = StackedValue {
                    x,
                    y0: baseline[x],
                    y: sample.y,
                };
                baseline[x] += sample.y;
                value
            })
            .collect();
        layers.push(stacked);
    }

    let max_total = layers
        .iter()
        .flatten()
        .map(|value| OrderedFloat(value.top()))
        .max()
        .map_or(0.0, |max| max.0);
    let max_value = layers
        .iter()
        .flatten()
        .map(|value| OrderedFloat(value.y))
        .max()
        .map_or(0.0, |max| max.0);

    StackLayout {
        layers,
        sample_count: series.sample_count(),
        max_total,
        max_value,
    }
}
