use std::fmt::Write as _;

use smallvec::SmallVec;

/// One drawing command of a [`PathData`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    /// SVG elliptical arc with no axis rotation.
    Arc {
        radius_x: f64,
        radius_y: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    },
    Close,
}

/// Compact outline made of move, line, elliptical arc and close commands.
///
/// Donut faces need at most two arcs and two lines, so the common case stays
/// inline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathData {
    segments: SmallVec<[PathSegment; 6]>,
}

impl PathData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.segments.push(PathSegment::MoveTo { x, y });
        self
    }

    #[must_use]
    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.segments.push(PathSegment::LineTo { x, y });
        self
    }

    #[must_use]
    pub fn arc_to(
        mut self,
        radius_x: f64,
        radius_y: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) -> Self {
        self.segments.push(PathSegment::Arc {
            radius_x,
            radius_y,
            large_arc,
            sweep,
            x,
            y,
        });
        self
    }

    #[must_use]
    pub fn close(mut self) -> Self {
        self.segments.push(PathSegment::Close);
        self
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.segments.iter().all(|segment| match *segment {
            PathSegment::MoveTo { x, y } | PathSegment::LineTo { x, y } => {
                x.is_finite() && y.is_finite()
            }
            PathSegment::Arc {
                radius_x,
                radius_y,
                x,
                y,
                ..
            } => radius_x.is_finite() && radius_y.is_finite() && x.is_finite() && y.is_finite(),
            PathSegment::Close => true,
        })
    }

    /// SVG `d` attribute. An empty path serializes as `M 0 0`.
    #[must_use]
    pub fn to_svg(&self) -> String {
        if self.segments.is_empty() {
            return "M 0 0".to_owned();
        }

        let mut out = String::new();
        for segment in &self.segments {
            if !out.is_empty() {
                out.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = match *segment {
                PathSegment::MoveTo { x, y } => write!(out, "M {x} {y}"),
                PathSegment::LineTo { x, y } => write!(out, "L {x} {y}"),
                PathSegment::Arc {
                    radius_x,
                    radius_y,
                    large_arc,
                    sweep,
                    x,
                    y,
                } => write!(
                    out,
                    "A {radius_x} {radius_y} 0 {} {} {x} {y}",
                    u8::from(large_arc),
                    u8::from(sweep)
                ),
                PathSegment::Close => write!(out, "z"),
            };
        }
        out
    }
}
