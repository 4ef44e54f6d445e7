use std::fmt::Write as _;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::core::{DonutShape, LegendGrid, Margins, Viewport};
use crate::error::{ChartError, ChartResult};

/// Bootstrap configuration of a [`BarChartWidget`](super::BarChartWidget).
///
/// Every field has a serde default so hosts only persist what they change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartConfig {
    #[serde(default = "default_bar_margins")]
    pub margins: Margins,
    /// Height of the plot area, margins excluded.
    #[serde(default = "default_bar_plot_height")]
    pub plot_height: f64,
    /// Horizontal shift of bars and y axis inside the plot area.
    #[serde(default = "default_bar_padding_left")]
    pub padding_left: f64,
    /// Extra canvas height reserved below the plot for the legend.
    #[serde(default = "default_bar_legend_extra_height")]
    pub legend_extra_height: f64,
    #[serde(default = "default_bar_debounce_ms")]
    pub debounce_ms: f64,
    #[serde(default = "default_bar_entrance_ms")]
    pub entrance_ms: f64,
    /// Per-sample delay applied to entrance and mode transitions.
    #[serde(default = "default_bar_stagger_ms")]
    pub stagger_ms: f64,
    /// Duration of each phase of a grouped/stacked transition.
    #[serde(default = "default_bar_mode_transition_ms")]
    pub mode_transition_ms: f64,
    /// Share of a sample slot covered by a stacked bar.
    #[serde(default = "default_bar_fill_ratio")]
    pub bar_fill_ratio: f64,
    #[serde(default = "default_bar_y_tick_count")]
    pub y_tick_count: usize,
    /// Legend placement; `origin_y` is relative to the bottom of the plot.
    #[serde(default = "default_bar_legend")]
    pub legend: LegendGrid,
    /// Optional strftime pattern applied to the leading `YYYY-MM-DD` of each
    /// sample date. `None` shows dates exactly as received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_label_format: Option<String>,
    #[serde(default = "default_font_size_px")]
    pub font_size_px: f64,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            margins: default_bar_margins(),
            plot_height: default_bar_plot_height(),
            padding_left: default_bar_padding_left(),
            legend_extra_height: default_bar_legend_extra_height(),
            debounce_ms: default_bar_debounce_ms(),
            entrance_ms: default_bar_entrance_ms(),
            stagger_ms: default_bar_stagger_ms(),
            mode_transition_ms: default_bar_mode_transition_ms(),
            bar_fill_ratio: default_bar_fill_ratio(),
            y_tick_count: default_bar_y_tick_count(),
            legend: default_bar_legend(),
            date_label_format: None,
            font_size_px: default_font_size_px(),
        }
    }
}

impl BarChartConfig {
    #[must_use]
    pub fn with_debounce_ms(mut self, debounce_ms: f64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    #[must_use]
    pub fn with_date_label_format(mut self, format: impl Into<String>) -> Self {
        self.date_label_format = Some(format.into());
        self
    }

    /// Total canvas height: plot, margins and legend band.
    #[must_use]
    pub fn canvas_height(&self) -> f64 {
        self.plot_height + self.margins.vertical() + self.legend_extra_height
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.margins.is_valid() {
            return Err(invalid("margins must be finite and >= 0"));
        }
        ensure_positive("plot_height", self.plot_height)?;
        ensure_non_negative("padding_left", self.padding_left)?;
        ensure_non_negative("legend_extra_height", self.legend_extra_height)?;
        ensure_non_negative("debounce_ms", self.debounce_ms)?;
        ensure_non_negative("entrance_ms", self.entrance_ms)?;
        ensure_non_negative("stagger_ms", self.stagger_ms)?;
        ensure_non_negative("mode_transition_ms", self.mode_transition_ms)?;
        if !self.bar_fill_ratio.is_finite()
            || self.bar_fill_ratio <= 0.0
            || self.bar_fill_ratio > 1.0
        {
            return Err(invalid("bar_fill_ratio must be in (0, 1]"));
        }
        if self.y_tick_count == 0 {
            return Err(invalid("y_tick_count must be > 0"));
        }
        validate_legend(&self.legend)?;
        if let Some(format) = &self.date_label_format {
            validate_date_format(format)?;
        }
        ensure_positive("font_size_px", self.font_size_px)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }
}

/// Bootstrap configuration of a [`DonutChartWidget`](super::DonutChartWidget).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DonutChartConfig {
    #[serde(default = "default_donut_canvas")]
    pub canvas: Viewport,
    #[serde(default = "default_donut_shape")]
    pub shape: DonutShape,
    #[serde(default = "default_donut_transition_ms")]
    pub transition_ms: f64,
    #[serde(default = "default_donut_legend_canvas")]
    pub legend_canvas: Viewport,
    #[serde(default = "default_donut_legend")]
    pub legend: LegendGrid,
    #[serde(default = "default_donut_profile_label_y")]
    pub profile_label_y: f64,
    #[serde(default = "default_donut_profile_label_font_px")]
    pub profile_label_font_px: f64,
    #[serde(default = "default_font_size_px")]
    pub percent_font_px: f64,
    #[serde(default = "default_font_size_px")]
    pub legend_font_px: f64,
}

impl Default for DonutChartConfig {
    fn default() -> Self {
        Self {
            canvas: default_donut_canvas(),
            shape: default_donut_shape(),
            transition_ms: default_donut_transition_ms(),
            legend_canvas: default_donut_legend_canvas(),
            legend: default_donut_legend(),
            profile_label_y: default_donut_profile_label_y(),
            profile_label_font_px: default_donut_profile_label_font_px(),
            percent_font_px: default_font_size_px(),
            legend_font_px: default_font_size_px(),
        }
    }
}

impl DonutChartConfig {
    #[must_use]
    pub fn with_transition_ms(mut self, transition_ms: f64) -> Self {
        self.transition_ms = transition_ms;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        for viewport in [self.canvas, self.legend_canvas] {
            if !viewport.is_valid() {
                return Err(ChartError::InvalidViewport {
                    width: viewport.width,
                    height: viewport.height,
                });
            }
        }
        let shape = self.shape;
        if !shape.center_x.is_finite() || !shape.center_y.is_finite() {
            return Err(invalid("donut center must be finite"));
        }
        ensure_positive("shape.radius_x", shape.radius_x)?;
        ensure_positive("shape.radius_y", shape.radius_y)?;
        ensure_non_negative("shape.height", shape.height)?;
        if !shape.inner_ratio.is_finite() || !(0.0..1.0).contains(&shape.inner_ratio) {
            return Err(invalid("shape.inner_ratio must be in [0, 1)"));
        }
        ensure_non_negative("transition_ms", self.transition_ms)?;
        validate_legend(&self.legend)?;
        if !self.profile_label_y.is_finite() {
            return Err(invalid("profile_label_y must be finite"));
        }
        ensure_positive("profile_label_font_px", self.profile_label_font_px)?;
        ensure_positive("percent_font_px", self.percent_font_px)?;
        ensure_positive("legend_font_px", self.legend_font_px)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }
}

fn invalid(message: &str) -> ChartError {
    ChartError::InvalidConfig(message.to_owned())
}

fn ensure_positive(field: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ChartError::InvalidConfig(format!(
            "{field} must be finite and > 0"
        )));
    }
    Ok(())
}

fn ensure_non_negative(field: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ChartError::InvalidConfig(format!(
            "{field} must be finite and >= 0"
        )));
    }
    Ok(())
}

fn validate_legend(legend: &LegendGrid) -> ChartResult<()> {
    if legend.rows_per_column == 0 {
        return Err(invalid("legend.rows_per_column must be > 0"));
    }
    let finite = [
        legend.origin_x,
        legend.origin_y,
        legend.column_width,
        legend.row_height,
        legend.text_offset_x,
        legend.text_offset_y,
    ]
    .iter()
    .all(|value| value.is_finite());
    if !finite {
        return Err(invalid("legend offsets must be finite"));
    }
    ensure_positive("legend.swatch_size", legend.swatch_size)
}

fn validate_date_format(format: &str) -> ChartResult<()> {
    if format.is_empty() {
        return Err(invalid("date_label_format must not be empty"));
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ChartError::InvalidConfig(format!(
            "date_label_format `{format}` is not a valid strftime pattern"
        )));
    }
    let mut rendered = String::new();
    if write!(rendered, "{}", NaiveDate::default().format(format)).is_err() {
        return Err(ChartError::InvalidConfig(format!(
            "date_label_format `{format}` needs fields a calendar date does not have"
        )));
    }
    Ok(())
}

fn default_bar_margins() -> Margins {
    Margins::new(20.0, 10.0, 20.0, 60.0)
}

fn default_bar_plot_height() -> f64 {
    250.0 - 0.5 - 20.0 - 20.0
}

fn default_bar_padding_left() -> f64 {
    30.0
}

fn default_bar_legend_extra_height() -> f64 {
    100.0
}

fn default_bar_debounce_ms() -> f64 {
    200.0
}

fn default_bar_entrance_ms() -> f64 {
    250.0
}

fn default_bar_stagger_ms() -> f64 {
    10.0
}

fn default_bar_mode_transition_ms() -> f64 {
    500.0
}

fn default_bar_fill_ratio() -> f64 {
    0.9
}

fn default_bar_y_tick_count() -> usize {
    10
}

fn default_bar_legend() -> LegendGrid {
    LegendGrid {
        origin_x: 0.0,
        origin_y: 36.0,
        rows_per_column: 2,
        column_width: 155.0,
        row_height: 30.0,
        swatch_size: 20.0,
        text_offset_x: 30.0,
        text_offset_y: 6.0,
    }
}

fn default_font_size_px() -> f64 {
    11.0
}

fn default_donut_canvas() -> Viewport {
    Viewport::new(285, 270)
}

fn default_donut_shape() -> DonutShape {
    DonutShape {
        center_x: 150.0,
        center_y: 130.0,
        radius_x: 130.0,
        radius_y: 100.0,
        height: 30.0,
        inner_ratio: 0.0,
    }
}

fn default_donut_transition_ms() -> f64 {
    750.0
}

fn default_donut_legend_canvas() -> Viewport {
    Viewport::new(285, 200)
}

fn default_donut_legend() -> LegendGrid {
    LegendGrid {
        origin_x: 30.0,
        origin_y: 0.0,
        rows_per_column: 4,
        column_width: 155.0,
        row_height: 30.0,
        swatch_size: 20.0,
        text_offset_x: 30.0,
        text_offset_y: 6.0,
    }
}

fn default_donut_profile_label_y() -> f64 {
    20.0
}

fn default_donut_profile_label_font_px() -> f64 {
    16.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let bar = BarChartConfig::from_json("{}").expect("bar config");
        assert_eq!(bar, BarChartConfig::default());
        assert!((bar.plot_height - 209.5).abs() <= 1e-9);
        assert!((bar.canvas_height() - 349.5).abs() <= 1e-9);

        let donut = DonutChartConfig::from_json("{}").expect("donut config");
        assert_eq!(donut, DonutChartConfig::default());
    }

    #[test]
    fn rejects_broken_date_format() {
        let config = BarChartConfig::default().with_date_label_format("%Q %");
        let err = config.validate().expect_err("invalid pattern");
        assert!(matches!(err, ChartError::InvalidConfig(_)));
    }

    #[test]
    fn dates_are_unformatted_by_default() {
        assert_eq!(BarChartConfig::default().date_label_format, None);
        let config = BarChartConfig::from_json(r#"{"date_label_format": "%m/%Y"}"#)
            .expect("format override");
        assert_eq!(config.date_label_format.as_deref(), Some("%m/%Y"));
    }

    #[test]
    fn rejects_out_of_range_fill_ratio() {
        let config = BarChartConfig {
            bar_fill_ratio: 1.5,
            ..BarChartConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_degenerate_donut_canvas() {
        let config = DonutChartConfig {
            canvas: Viewport::new(0, 270),
            ..DonutChartConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ChartError::InvalidViewport { width: 0, .. })
        ));
    }

    #[test]
    fn round_trips_overrides_through_json() {
        let config = DonutChartConfig::default().with_transition_ms(100.0);
        let json = config.to_json_pretty().expect("serialize");
        let restored = DonutChartConfig::from_json(&json).expect("parse");
        assert!((restored.transition_ms - 100.0).abs() <= 1e-9);
    }
}
