//! 4x4 transformation matrix using column-major convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//!
//! Only the view-cuboid culling pass needs homogeneous coordinates; the
//! rasterizer itself works with the 3x3 camera rotation and an explicit
//! perspective divide.

use std::ops::Mul;

use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]` with column-major convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Mat4 {
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    /// Maps the camera's view frustum onto an axis-aligned cuboid.
    ///
    /// After the divide by `w` (which carries camera-space `z`):
    /// - `x' = focal * x / z`, `y' = focal * y / z` are screen offsets from the
    ///   image center in pixels, so the visible box is half the screen extent.
    /// - `z' = far * (z - near) / (z * (far - near))` is 0 on the near plane
    ///   and 1 on the far plane.
    pub fn perspective_cuboid(focal_length: f32, near: f32, far: f32) -> Self {
        let depth_scale = far / (far - near);
        Mat4::new([
            [focal_length, 0.0, 0.0, 0.0],
            [0.0, focal_length, 0.0, 0.0],
            [0.0, 0.0, depth_scale, -near * depth_scale],
            [0.0, 0.0, 1.0, 0.0],
        ])
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let row = |r: usize| {
            self.data[r][0] * v.x + self.data[r][1] * v.y + self.data[r][2] * v.z + self.data[r][3] * v.w
        };
        Vec4::new(row(0), row(1), row(2), row(3))
    }
}
