use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::SliceAngles;

/// Values that can be blended between two states.
pub trait Interpolate: Copy {
    /// Value at `t` in `[0, 1]` between `self` (at 0) and `target` (at 1).
    fn interpolate(self, target: Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(self, target: Self, t: f64) -> Self {
        self + (target - self) * t
    }
}

impl Interpolate for SliceAngles {
    fn interpolate(self, target: Self, t: f64) -> Self {
        Self::new(
            self.start.interpolate(target.start, t),
            self.end.interpolate(target.end, t),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Ease {
    Linear,
    /// Symmetric cubic ease, the default of declarative chart transitions.
    #[default]
    CubicInOut,
}

impl Ease {
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                if t <= 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 - 2.0 * t;
                    1.0 - 0.5 * u * u * u
                }
            }
        }
    }
}

/// Timing of one animation phase, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TweenTiming {
    pub delay_ms: f64,
    pub duration_ms: f64,
    pub ease: Ease,
}

impl TweenTiming {
    #[must_use]
    pub const fn new(delay_ms: f64, duration_ms: f64) -> Self {
        Self {
            delay_ms,
            duration_ms,
            ease: Ease::CubicInOut,
        }
    }

    #[must_use]
    pub const fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// A single interpolation from `from` to `to` scheduled on the host clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T: Interpolate> {
    from: T,
    to: T,
    start_ms: f64,
    timing: TweenTiming,
}

impl<T: Interpolate> Tween<T> {
    #[must_use]
    pub fn new(from: T, to: T, start_ms: f64, timing: TweenTiming) -> Self {
        Self {
            from,
            to,
            start_ms,
            timing,
        }
    }

    #[must_use]
    pub fn from_value(&self) -> T {
        self.from
    }

    #[must_use]
    pub fn to_value(&self) -> T {
        self.to
    }

    /// Time at which the value starts moving.
    #[must_use]
    pub fn begin_ms(&self) -> f64 {
        self.start_ms + self.timing.delay_ms
    }

    #[must_use]
    pub fn end_ms(&self) -> f64 {
        self.begin_ms() + self.timing.duration_ms
    }

    /// Eased progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        let begin = self.begin_ms();
        if now_ms < begin {
            return 0.0;
        }
        if self.timing.duration_ms <= 0.0 || now_ms >= self.end_ms() {
            return 1.0;
        }
        self.timing
            .ease
            .apply((now_ms - begin) / self.timing.duration_ms)
    }

    #[must_use]
    pub fn value_at(&self, now_ms: f64) -> T {
        self.from.interpolate(self.to, self.progress(now_ms))
    }

    #[must_use]
    pub fn is_finished(&self, now_ms: f64) -> bool {
        now_ms >= self.end_ms()
    }
}

/// Chained phases: each phase starts where and when the previous one ends.
///
/// A timeline with no phases holds a constant value.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline<T: Interpolate> {
    rest: T,
    start_ms: f64,
    phases: SmallVec<[Tween<T>; 2]>,
}

impl<T: Interpolate> Timeline<T> {
    /// Constant timeline holding `value`.
    #[must_use]
    pub fn still(value: T) -> Self {
        Self {
            rest: value,
            start_ms: 0.0,
            phases: SmallVec::new(),
        }
    }

    /// Empty timeline whose first phase will start at `start_ms`.
    #[must_use]
    pub fn starting(value: T, start_ms: f64) -> Self {
        Self {
            rest: value,
            start_ms,
            phases: SmallVec::new(),
        }
    }

    /// Appends a phase moving from the current final value to `target`.
    #[must_use]
    pub fn then(mut self, target: T, timing: TweenTiming) -> Self {
        let (from, start_ms) = match self.phases.last() {
            Some(last) => (last.to_value(), last.end_ms()),
            None => (self.rest, self.start_ms),
        };
        self.phases.push(Tween::new(from, target, start_ms, timing));
        self
    }

    #[must_use]
    pub fn value_at(&self, now_ms: f64) -> T {
        let Some(first) = self.phases.first() else {
            return self.rest;
        };
        if now_ms < first.begin_ms() {
            return first.from_value();
        }
        for phase in &self.phases {
            if !phase.is_finished(now_ms) {
                return phase.value_at(now_ms);
            }
        }
        self.target()
    }

    /// Value once every phase has completed.
    #[must_use]
    pub fn target(&self) -> T {
        self.phases.last().map_or(self.rest, Tween::to_value)
    }

    #[must_use]
    pub fn end_ms(&self) -> f64 {
        self.phases.last().map_or(self.start_ms, Tween::end_ms)
    }

    #[must_use]
    pub fn is_settled(&self, now_ms: f64) -> bool {
        self.phases.is_empty() || now_ms >= self.end_ms()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn cubic_in_out_is_symmetric() {
        assert_eq!(Ease::CubicInOut.apply(0.0), 0.0);
        assert_eq!(Ease::CubicInOut.apply(0.5), 0.5);
        assert_eq!(Ease::CubicInOut.apply(1.0), 1.0);
        assert_abs_diff_eq!(
            Ease::CubicInOut.apply(0.25) + Ease::CubicInOut.apply(0.75),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn tween_waits_for_delay() {
        let tween = Tween::new(0.0, 10.0, 100.0, TweenTiming::new(50.0, 100.0).with_ease(Ease::Linear));
        assert_eq!(tween.value_at(120.0), 0.0);
        assert_eq!(tween.value_at(200.0), 5.0);
        assert_eq!(tween.value_at(400.0), 10.0);
        assert!(tween.is_finished(250.0));
    }

    #[test]
    fn timeline_chains_phases() {
        let linear = TweenTiming::new(0.0, 100.0).with_ease(Ease::Linear);
        let timeline = Timeline::starting(0.0, 0.0)
            .then(10.0, linear)
            .then(30.0, linear);

        assert_eq!(timeline.value_at(50.0), 5.0);
        assert_eq!(timeline.value_at(150.0), 20.0);
        assert_eq!(timeline.value_at(1_000.0), 30.0);
        assert_eq!(timeline.end_ms(), 200.0);
        assert!(!timeline.is_settled(199.0));
        assert!(timeline.is_settled(200.0));
    }

    #[test]
    fn angles_interpolate_component_wise() {
        let from = SliceAngles::new(0.0, 1.0);
        let to = SliceAngles::new(1.0, 3.0);
        assert_eq!(from.interpolate(to, 0.5), SliceAngles::new(0.5, 2.0));
    }
}
