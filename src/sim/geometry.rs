//! Oval and bounding-box geometry for placement and hit testing
//!
//! Balloons are axis-aligned ovals. Placement works on their bounding
//! boxes rather than true oval intersection: ovals may visually overlap a
//! little more than the ratio suggests, which reads fine on a packed board.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{HOVER_AMPLITUDE, HOVER_ID_PHASE};

/// Axis-aligned bounding rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Build from a center point and full extents
    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        let half = Vec2::new(width / 2.0, height / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Area shared with another rect (zero when disjoint)
    pub fn intersection_area(&self, other: &Rect) -> f32 {
        let w = (self.max.x.min(other.max.x) - self.min.x.max(other.min.x)).max(0.0);
        let h = (self.max.y.min(other.max.y) - self.min.y.max(other.min.y)).max(0.0);
        w * h
    }
}

/// Overlap ratio of two rects: shared area over the smaller rect's area
///
/// Returns zero for degenerate rects so a zero-area box never rejects
/// anything.
pub fn overlap_ratio(a: &Rect, b: &Rect) -> f32 {
    let smaller = a.area().min(b.area());
    if smaller <= 0.0 {
        return 0.0;
    }
    a.intersection_area(b) / smaller
}

/// Inclusive point-in-oval test for an axis-aligned oval
///
/// Boundary points (dx²/a² + dy²/b² == 1) count as hits.
pub fn oval_contains(center: Vec2, width: f32, height: f32, point: Vec2) -> bool {
    let a = width / 2.0;
    let b = height / 2.0;
    if a <= 0.0 || b <= 0.0 {
        return false;
    }
    let d = (point - center) / Vec2::new(a, b);
    d.length_squared() <= 1.0
}

/// Horizontal hover sway of a balloon at the given phase in [0, 1)
///
/// The renderer offsets each balloon by this amount and hands the same
/// phase back to `handle_tap`, so hits always agree with what is on
/// screen.
pub fn hover_offset_x(id: u32, phase: f32) -> f32 {
    let angle = phase * std::f32::consts::TAU + id as f32 * HOVER_ID_PHASE;
    angle.sin() * HOVER_AMPLITUDE
}
