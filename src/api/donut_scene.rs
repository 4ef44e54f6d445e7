use tracing::warn;

use crate::core::{
    PieDatum, SliceAngles, Timeline, TweenTiming, percent_label, pie_layout,
};
use crate::render::Color;

pub const LEGEND_CANVAS_ID: &str = "svglegend";

/// Canvas id of the donut showing aggregate or detail series `index`.
#[must_use]
pub fn donut_canvas_id(index: usize) -> String {
    format!("piechart{index}")
}

/// Address of one slice: its canvas and its position in that canvas.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SliceId {
    pub canvas_id: String,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct DonutSlice {
    pub(super) datum: PieDatum,
    pub(super) color: Color,
    /// Angles on screen at the widget clock; frames and hit tests read this.
    pub(super) current: SliceAngles,
    pub(super) timeline: Timeline<SliceAngles>,
    /// Percent text, fixed from the target angles when a tween starts.
    pub(super) label: Option<String>,
}

impl DonutSlice {
    fn still(datum: PieDatum, angles: SliceAngles) -> Self {
        let color = slice_color(&datum.color);
        Self {
            datum,
            color,
            current: angles,
            timeline: Timeline::still(angles),
            label: percent_label(angles),
        }
    }

    /// Restarts the tween from `current`, the angles last put on screen.
    pub(super) fn retarget(
        &mut self,
        datum: PieDatum,
        target: SliceAngles,
        now_ms: f64,
        duration_ms: f64,
    ) {
        self.timeline = Timeline::starting(self.current, now_ms)
            .then(target, TweenTiming::new(0.0, duration_ms));
        self.label = percent_label(target);
        self.datum = datum;
    }

    fn sync(&mut self, now_ms: f64) {
        self.current = self.timeline.value_at(now_ms);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct DonutCanvas {
    pub(super) slices: Vec<DonutSlice>,
    pub(super) profile_label: Option<String>,
}

impl DonutCanvas {
    pub(super) fn draw(data: &[PieDatum]) -> Self {
        let slices = pie_layout(data)
            .into_iter()
            .zip(data)
            .map(|(slice, datum)| DonutSlice::still(datum.clone(), slice.angles))
            .collect();
        Self {
            slices,
            profile_label: None,
        }
    }

    /// Moves every slice's `current` angles to the clock.
    pub(super) fn sync(&mut self, now_ms: f64) {
        for slice in &mut self.slices {
            slice.sync(now_ms);
        }
    }

    pub(super) fn keys(&self) -> Vec<String> {
        self.slices
            .iter()
            .map(|slice| slice.datum.module_id.clone())
            .collect()
    }

    pub(super) fn is_animating(&self, now_ms: f64) -> bool {
        self.slices
            .iter()
            .any(|slice| !slice.timeline.is_settled(now_ms))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct LegendItem {
    pub(super) color: Color,
    pub(super) module_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum CanvasContent {
    Donut(DonutCanvas),
    Legend(Vec<LegendItem>),
}

impl CanvasContent {
    pub(super) fn legend(data: &[PieDatum]) -> Self {
        Self::Legend(
            data.iter()
                .map(|datum| LegendItem {
                    color: slice_color(&datum.color),
                    module_id: datum.module_id.clone(),
                })
                .collect(),
        )
    }

    pub(super) fn as_donut(&self) -> Option<&DonutCanvas> {
        match self {
            Self::Donut(canvas) => Some(canvas),
            Self::Legend(_) => None,
        }
    }

    pub(super) fn as_donut_mut(&mut self) -> Option<&mut DonutCanvas> {
        match self {
            Self::Donut(canvas) => Some(canvas),
            Self::Legend(_) => None,
        }
    }
}

fn slice_color(raw: &str) -> Color {
    match Color::parse_hex(raw) {
        Ok(color) => color,
        Err(err) => {
            warn!(color = raw, %err, "unparsable slice color, using neutral fill");
            Color::NEUTRAL
        }
    }
}
