//! 3x3 rotation matrix stored as three basis columns.
//!
//! # Convention
//! - Columns are the camera basis expressed in world space: `right`, `down`,
//!   `forward`.
//! - A world-space direction is brought into the basis with a **row vector on
//!   the left**: `v * M = (v . right, v . down, v . forward)`.
//! - `M * v` goes the other way and rebuilds a world direction from basis
//!   coordinates.

use std::ops::Mul;

use super::vec3::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    cols: [Vec3; 3],
}

impl Mat3 {
    pub const IDENTITY: Self = Self {
        cols: [Vec3::RIGHT, Vec3::DOWN, Vec3::FORWARD],
    };

    pub const fn from_cols(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self { cols: [c0, c1, c2] }
    }

    /// Rotation around the world Y axis.
    ///
    /// Positive yaw turns the forward column toward -X.
    pub fn from_yaw(yaw: f32) -> Self {
        let (s, c) = yaw.sin_cos();
        Self::from_cols(
            Vec3::new(c, 0.0, s),
            Vec3::DOWN,
            Vec3::new(-s, 0.0, c),
        )
    }

    #[inline]
    pub fn col(&self, index: usize) -> Vec3 {
        self.cols[index]
    }
}

/// Row vector times matrix: projects `v` onto each column.
impl Mul<Mat3> for Vec3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, m: Mat3) -> Self::Output {
        Vec3::new(self.dot(m.cols[0]), self.dot(m.cols[1]), self.dot(m.cols[2]))
    }
}

/// Matrix times column vector: linear combination of the columns.
impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, v: Vec3) -> Self::Output {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z
    }
}
