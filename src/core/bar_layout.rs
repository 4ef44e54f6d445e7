use crate::core::{Interpolate, StackLayout, StackedValue};
use crate::error::{ChartError, ChartResult};

/// Bar rectangle relative to its sample slot (x) and the plot top (y).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BarRect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn with_horizontal(self, other: Self) -> Self {
        Self {
            x: other.x,
            width: other.width,
            ..self
        }
    }

    #[must_use]
    pub fn with_vertical(self, other: Self) -> Self {
        Self {
            y: other.y,
            height: other.height,
            ..self
        }
    }
}

impl Interpolate for BarRect {
    fn interpolate(self, target: Self, t: f64) -> Self {
        Self {
            x: self.x.interpolate(target.x, t),
            y: self.y.interpolate(target.y, t),
            width: self.width.interpolate(target.width, t),
            height: self.height.interpolate(target.height, t),
        }
    }
}

/// Pixel geometry of a stacked/grouped bar chart for one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarChartGeometry {
    width: f64,
    height: f64,
    sample_count: usize,
    layer_count: usize,
    max_total: f64,
    max_value: f64,
    bar_fill_ratio: f64,
}

impl BarChartGeometry {
    /// `width`/`height` describe the plot area, margins excluded.
    pub fn new(
        layout: &StackLayout,
        width: f64,
        height: f64,
        bar_fill_ratio: f64,
    ) -> ChartResult<Self> {
        if !width.is_finite() || width <= 0.0 || !height.is_finite() || height <= 0.0 {
            return Err(ChartError::InvalidData(
                "bar plot area must be finite and > 0".to_owned(),
            ));
        }
        if layout.sample_count() == 0 || layout.layer_count() == 0 {
            return Err(ChartError::InvalidData(
                "bar chart needs at least one layer with one sample".to_owned(),
            ));
        }
        Ok(Self {
            width,
            height,
            sample_count: layout.sample_count(),
            layer_count: layout.layer_count(),
            max_total: layout.max_total(),
            max_value: layout.max_value(),
            bar_fill_ratio,
        })
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn max_total(&self) -> f64 {
        self.max_total
    }

    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Horizontal extent of one sample slot.
    #[must_use]
    pub fn slot_width(&self) -> f64 {
        self.width / self.sample_count as f64
    }

    /// Left edge of a sample slot: `x(i) = i * width / sampleCount`.
    #[must_use]
    pub fn slot_x(&self, sample: usize) -> f64 {
        sample as f64 * self.slot_width()
    }

    #[must_use]
    pub fn stacked_bar_width(&self) -> f64 {
        self.bar_fill_ratio * self.slot_width()
    }

    #[must_use]
    pub fn grouped_bar_width(&self) -> f64 {
        self.stacked_bar_width() / self.layer_count as f64
    }

    /// Pixel y of the stack baseline (`y0`).
    #[must_use]
    pub fn y0(&self, value: StackedValue) -> f64 {
        self.height - ratio(value.y0, self.max_total) * self.height
    }

    /// Pixel y of the stack top (`y0 + y`).
    #[must_use]
    pub fn y1(&self, value: StackedValue) -> f64 {
        self.height - ratio(value.top(), self.max_total) * self.height
    }

    /// Bar height when every layer shares the baseline.
    #[must_use]
    pub fn y2(&self, value: StackedValue) -> f64 {
        ratio(value.y, self.max_value) * self.height
    }

    #[must_use]
    pub fn stacked_rect(&self, value: StackedValue) -> BarRect {
        let top = self.y1(value);
        BarRect::new(
            0.0,
            top,
            self.stacked_bar_width(),
            (self.y0(value) - top).max(0.0),
        )
    }

    #[must_use]
    pub fn grouped_rect(&self, layer: usize, value: StackedValue) -> BarRect {
        let height = self.y2(value).max(0.0);
        BarRect::new(
            layer as f64 * self.grouped_bar_width(),
            self.height - height,
            self.grouped_bar_width(),
            height,
        )
    }

    /// Collapsed bar sitting on the x axis, used as entrance origin.
    #[must_use]
    pub fn collapsed_rect(&self) -> BarRect {
        BarRect::new(0.0, self.height, self.stacked_bar_width(), 0.0)
    }
}

fn ratio(value: f64, max: f64) -> f64 {
    if max > 0.0 { value / max } else { 0.0 }
}
