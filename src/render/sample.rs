//! Screen-space samples and attribute interpolation.
//!
//! # Perspective-correct attributes
//!
//! Screen-space linear interpolation is only correct for quantities that are
//! linear in screen space. Under perspective, `1/z` is, and so is any
//! attribute divided by `z`. A [`ProjectedSample`] therefore carries:
//!
//! - `zinv = 1 / z`, the value the depth test compares
//! - `pos3d = p / z`, the camera-space position pre-divided by its own depth
//!
//! Both interpolate linearly along edges and across spans; the shader undoes
//! the division at the pixel.
//!
//! # One interpolation routine
//!
//! Edges, spans and wireframe lines all go through [`interpolate`], generic
//! over any [`Interpolate`] attribute bundle, so every stage steps with the
//! same `delta / (N - 1)` scheme.

use crate::math::vec3::Vec3;

/// Attributes that can be blended between two endpoints.
pub trait Interpolate: Copy {
    /// Value at parameter `t`: `self` at 0, `other` at 1.
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Vec3 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec3::lerp(self, *other, t)
    }
}

/// Integer screen position. Interpolated coordinates round to nearest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[inline]
fn lerp_i32(a: i32, b: i32, t: f32) -> i32 {
    (a as f32 + (b - a) as f32 * t).round() as i32
}

impl Interpolate for ScreenPoint {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            x: lerp_i32(self.x, other.x, t),
            y: lerp_i32(self.y, other.y, t),
        }
    }
}

/// A vertex or pixel after projection.
///
/// Created per vertex per frame and consumed by the same Draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedSample {
    /// Screen column, origin at the left edge.
    pub x: i32,
    /// Screen row, origin at the top edge, growing downward.
    pub y: i32,
    /// Inverse camera-space depth. Larger is nearer; 0 is infinitely far.
    pub zinv: f32,
    /// Camera-space position divided by camera-space z.
    pub pos3d: Vec3,
}

impl ProjectedSample {
    pub fn new(x: i32, y: i32, zinv: f32, pos3d: Vec3) -> Self {
        Self { x, y, zinv, pos3d }
    }

    #[inline]
    pub fn screen(&self) -> ScreenPoint {
        ScreenPoint::new(self.x, self.y)
    }
}

impl Interpolate for ProjectedSample {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            x: lerp_i32(self.x, other.x, t),
            y: lerp_i32(self.y, other.y, t),
            zinv: self.zinv + (other.zinv - self.zinv) * t,
            pos3d: self.pos3d.lerp(other.pos3d, t),
        }
    }
}

/// Yields `n` evenly spaced values from `a` to `b`, both endpoints included.
///
/// The i-th value sits at `t = i / (n - 1)`. The denominator is held at 1 or
/// more, so `n == 1` yields just `a` and `n == 0` yields nothing.
pub fn interpolate<T: Interpolate>(a: T, b: T, n: usize) -> impl Iterator<Item = T> {
    let denominator = n.saturating_sub(1).max(1) as f32;
    (0..n).map(move |i| a.lerp(&b, i as f32 / denominator))
}

/// Number of samples a line from `a` to `b` covers: one per pixel along the
/// major axis, both endpoints included.
#[inline]
pub fn line_length(a: ScreenPoint, b: ScreenPoint) -> usize {
    let dx = (b.x as i64 - a.x as i64).unsigned_abs();
    let dy = (b.y as i64 - a.y as i64).unsigned_abs();
    dx.max(dy) as usize + 1
}
