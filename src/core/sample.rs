use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ChartResult;

/// One measurement of one category at one date.
///
/// `date` is kept exactly as the upstream source wrote it, e.g.
/// `2015-01-01 00:00.00.000`, and is shown verbatim unless a label format
/// is configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub date: String,
    pub y: f64,
    pub profile: String,
    pub color: String,
}

impl Sample {
    #[must_use]
    pub fn new(
        date: impl Into<String>,
        y: f64,
        profile: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            y,
            profile: profile.into(),
            color: color.into(),
        }
    }
}

/// Calendar date at the start of an upstream date string, if it has one.
#[must_use]
pub fn leading_calendar_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_and_remainder(raw.trim_start(), "%Y-%m-%d")
        .ok()
        .map(|(date, _)| date)
}

/// X-axis label for an upstream date string.
///
/// Without a format the raw string is returned. With one, the leading
/// `YYYY-MM-DD` is reformatted; strings without such a prefix stay raw.
/// A pattern chrono cannot render also leaves the string raw.
#[must_use]
pub fn format_date_label(raw: &str, format: Option<&str>) -> String {
    let (Some(format), Some(date)) = (format, leading_calendar_date(raw)) else {
        return raw.to_owned();
    };
    let mut label = String::new();
    match write!(label, "{}", date.format(format)) {
        Ok(()) => label,
        Err(_) => raw.to_owned(),
    }
}

/// Layers of samples, one layer per category, aligned by sample index.
///
/// Deserializes from the upstream JSON shape: an array of arrays of samples.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StackedSeries {
    layers: Vec<Vec<Sample>>,
}

impl StackedSeries {
    #[must_use]
    pub fn new(layers: Vec<Vec<Sample>>) -> Self {
        Self { layers }
    }

    pub fn from_json(json: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn layers(&self) -> &[Vec<Sample>] {
        &self.layers
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Number of samples per layer, taken from the first layer.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.layers.first().map_or(0, Vec::len)
    }

    /// `true` when there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sample_count() == 0
    }

    /// Color and name of each layer, read from its first sample.
    pub fn legend_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.layers
            .iter()
            .filter_map(|layer| layer.first())
            .map(|sample| (sample.color.as_str(), sample.profile.as_str()))
    }
}
