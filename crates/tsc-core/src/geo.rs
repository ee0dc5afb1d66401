//! Planar geometry for road polylines.
//!
//! Road-net coordinates are metres in a local Cartesian frame with `+y`
//! pointing North and `+x` pointing East.

use std::f64::consts::TAU;

/// A point on a road polyline.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clockwise angle from North of the vector `self → other`, in
    /// `[0, 2π)` radians.
    ///
    /// North is `0`, East `π/2`, South `π`, West `3π/2`.  A zero-length
    /// vector yields `0`.
    pub fn bearing_to(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        normalize_angle(dx.atan2(dy))
    }
}

/// Wrap an angle in radians into `[0, 2π)`.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if a >= TAU { 0.0 } else { a }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
