//! Pseudo-3D donut geometry.
//!
//! A slice is drawn as three faces: the flat elliptical top, the front rim
//! (visible for angles in `[0, π]`, i.e. the lower half on screen) and the
//! inner rim of the hole (visible for angles in `[π, 2π]`). All coordinates
//! are canvas coordinates; the shape carries its own center.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use serde::{Deserialize, Serialize};

use crate::core::{PathData, SliceAngles};

/// Rims are drawn half a pixel off the top face to hide anti-aliasing seams.
const RIM_NUDGE: f64 = 0.5;
const LABEL_RADIUS_RATIO: f64 = 0.6;

/// Which face of a slice a point falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceFace {
    Top,
    Outer,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DonutShape {
    pub center_x: f64,
    pub center_y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    /// Extrusion depth of the rims.
    pub height: f64,
    /// Hole radius as a fraction of the outer radius.
    pub inner_ratio: f64,
}

impl DonutShape {
    #[must_use]
    pub fn top_path(&self, angles: SliceAngles) -> PathData {
        if angles.span() == 0.0 {
            return PathData::new();
        }
        let (rx, ry, ir) = (self.radius_x, self.radius_y, self.inner_ratio);
        let large_arc = angles.span() > PI;
        let (sx, sy) = (rx * angles.start.cos(), ry * angles.start.sin());
        let (ex, ey) = (rx * angles.end.cos(), ry * angles.end.sin());

        PathData::new()
            .move_to(self.x(sx), self.y(sy))
            .arc_to(rx, ry, large_arc, true, self.x(ex), self.y(ey))
            .line_to(self.x(ir * ex), self.y(ir * ey))
            .arc_to(
                ir * rx,
                ir * ry,
                large_arc,
                false,
                self.x(ir * sx),
                self.y(ir * sy),
            )
            .close()
    }

    /// Front rim, clipped to angles up to π.
    #[must_use]
    pub fn outer_path(&self, angles: SliceAngles) -> PathData {
        let (rx, ry, h) = (
            self.radius_x - RIM_NUDGE,
            self.radius_y - RIM_NUDGE,
            self.height,
        );
        let start = angles.start.min(PI);
        let end = angles.end.min(PI);
        let (sx, sy) = (rx * start.cos(), ry * start.sin());
        let (ex, ey) = (rx * end.cos(), ry * end.sin());

        PathData::new()
            .move_to(self.x(sx), self.y(h + sy))
            .arc_to(rx, ry, false, true, self.x(ex), self.y(h + ey))
            .line_to(self.x(ex), self.y(ey))
            .arc_to(rx, ry, false, false, self.x(sx), self.y(sy))
            .close()
    }

    /// Inner rim of the hole, clipped to angles from π.
    #[must_use]
    pub fn inner_path(&self, angles: SliceAngles) -> PathData {
        let ir = self.inner_ratio;
        let (rx, ry, h) = (
            ir * (self.radius_x + RIM_NUDGE),
            ir * (self.radius_y + RIM_NUDGE),
            self.height,
        );
        let start = angles.start.max(PI);
        let end = angles.end.max(PI);
        let (sx, sy) = (rx * start.cos(), ry * start.sin());
        let (ex, ey) = (rx * end.cos(), ry * end.sin());

        PathData::new()
            .move_to(self.x(sx), self.y(sy))
            .arc_to(rx, ry, false, true, self.x(ex), self.y(ey))
            .line_to(self.x(ex), self.y(h + ey))
            .arc_to(rx, ry, false, false, self.x(sx), self.y(h + sy))
            .close()
    }

    /// Percent label anchor: 60% of the radii along the mid angle.
    #[must_use]
    pub fn label_position(&self, angles: SliceAngles) -> (f64, f64) {
        let mid = angles.mid();
        (
            self.x(LABEL_RADIUS_RATIO * self.radius_x * mid.cos()),
            self.y(LABEL_RADIUS_RATIO * self.radius_y * mid.sin()),
        )
    }

    /// Front rim first since it is painted over the top face.
    #[must_use]
    pub fn hit_test(&self, angles: SliceAngles, x: f64, y: f64) -> Option<SliceFace> {
        if angles.span() <= 0.0 {
            return None;
        }
        let (dx, dy) = (x - self.center_x, y - self.center_y);
        if self.hits_outer(angles, dx, dy) {
            return Some(SliceFace::Outer);
        }
        if self.hits_top(angles, dx, dy) {
            return Some(SliceFace::Top);
        }
        None
    }

    /// Bounding box of the top face as `(min_x, min_y, max_x, max_y)`.
    #[must_use]
    pub fn top_bounds(&self, angles: SliceAngles) -> (f64, f64, f64, f64) {
        let (rx, ry, ir) = (self.radius_x, self.radius_y, self.inner_ratio);
        let mut points = vec![
            (rx * angles.start.cos(), ry * angles.start.sin()),
            (rx * angles.end.cos(), ry * angles.end.sin()),
            (ir * rx * angles.start.cos(), ir * ry * angles.start.sin()),
            (ir * rx * angles.end.cos(), ir * ry * angles.end.sin()),
        ];
        let mut extreme = 0.0;
        while extreme <= TAU {
            if angles.contains(extreme) {
                points.push((rx * extreme.cos(), ry * extreme.sin()));
            }
            extreme += FRAC_PI_2;
        }

        let mut bounds = (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for (px, py) in points {
            bounds.0 = bounds.0.min(self.x(px));
            bounds.1 = bounds.1.min(self.y(py));
            bounds.2 = bounds.2.max(self.x(px));
            bounds.3 = bounds.3.max(self.y(py));
        }
        bounds
    }

    fn hits_top(&self, angles: SliceAngles, dx: f64, dy: f64) -> bool {
        let (nx, ny) = (dx / self.radius_x, dy / self.radius_y);
        let distance = (nx * nx + ny * ny).sqrt();
        if distance > 1.0 || distance < self.inner_ratio {
            return false;
        }
        angles.contains(ny.atan2(nx).rem_euclid(TAU))
    }

    fn hits_outer(&self, angles: SliceAngles, dx: f64, dy: f64) -> bool {
        let start = angles.start.min(PI);
        let end = angles.end.min(PI);
        let (rx, ry) = (self.radius_x - RIM_NUDGE, self.radius_y - RIM_NUDGE);
        if end <= start || dx.abs() > rx {
            return false;
        }
        let theta = (dx / rx).acos();
        if theta < start || theta > end {
            return false;
        }
        let rim_top = ry * theta.sin();
        dy >= rim_top && dy <= rim_top + self.height
    }

    fn x(&self, local: f64) -> f64 {
        self.center_x + local
    }

    fn y(&self, local: f64) -> f64 {
        self.center_y + local
    }
}
