use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

/// Slices narrower than this (radians) carry no percent label.
pub const PERCENT_LABEL_MIN_SPAN: f64 = 0.2;

/// One category of a donut series, as delivered by the statistics backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieDatum {
    pub value: f64,
    pub color: String,
    pub module_id: String,
    pub count: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profil_id: Option<String>,
}

impl PieDatum {
    #[must_use]
    pub fn new(
        module_id: impl Into<String>,
        value: f64,
        count: f64,
        color: impl Into<String>,
    ) -> Self {
        Self {
            value,
            color: color.into(),
            module_id: module_id.into(),
            count,
            profil_id: None,
        }
    }

    #[must_use]
    pub fn with_profile(mut self, profil_id: impl Into<String>) -> Self {
        self.profil_id = Some(profil_id.into());
        self
    }
}

/// Angular extent of a slice, clockwise from the positive x axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SliceAngles {
    pub start: f64,
    pub end: f64,
}

impl SliceAngles {
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Zero-width slice located at `angle`.
    #[must_use]
    pub const fn collapsed(angle: f64) -> Self {
        Self::new(angle, angle)
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn mid(self) -> f64 {
        0.5 * (self.start + self.end)
    }

    #[must_use]
    pub fn contains(self, angle: f64) -> bool {
        angle >= self.start && angle <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSlice {
    /// Position of the datum in the input sequence.
    pub index: usize,
    pub value: f64,
    pub angles: SliceAngles,
}

/// Assigns angles to data in input order, proportional to each value.
///
/// Negative values count as zero. When the total is zero every slice is
/// empty and sits at angle zero.
#[must_use]
pub fn pie_layout(data: &[PieDatum]) -> Vec<PieSlice> {
    let values: Vec<f64> = data
        .iter()
        .map(|datum| {
            if datum.value.is_finite() {
                datum.value.max(0.0)
            } else {
                0.0
            }
        })
        .collect();
    let total: f64 = values.iter().sum();
    let scale = if total > 0.0 { TAU / total } else { 0.0 };

    let mut angle = 0.0;
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let start = angle;
            angle += value * scale;
            PieSlice {
                index,
                value,
                angles: SliceAngles::new(start, angle),
            }
        })
        .collect()
}

/// Rounded share of the full circle, e.g. `"12.5%"`.
#[must_use]
pub fn percent_label(angles: SliceAngles) -> Option<String> {
    let span = angles.span();
    if span <= PERCENT_LABEL_MIN_SPAN {
        return None;
    }
    let percent = (1000.0 * span / TAU).round() / 10.0;
    Some(format!("{percent}%"))
}
