//! Pinhole camera
//!
//! # Coordinate System
//!
//! - X: positive right
//! - Y: positive **down** (matches screen rows)
//! - Z: positive forward (into screen)
//!
//! # Orientation
//!
//! Orientation is a single yaw angle around the Y axis, turned into a 3x3
//! rotation whose columns are the camera's right, down and forward vectors.
//! A world point enters camera space as `(p - position) * rotation`.

use crate::config;
use crate::math::mat3::Mat3;
use crate::math::vec3::Vec3;

/// Camera with a position, yaw orientation and focal length.
///
/// The rotation matrix is cached and rebuilt whenever yaw changes, so the
/// per-vertex transform during Draw is a subtraction and three dot products.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    yaw: f32,
    rotation: Mat3,
    focal_length: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(config::CAMERA_POSITION, config::FOCAL_LENGTH)
    }
}

impl Camera {
    /// Creates a camera at `position` looking along +Z.
    pub fn new(position: Vec3, focal_length: f32) -> Self {
        Self {
            position,
            yaw: 0.0,
            rotation: Mat3::IDENTITY,
            focal_length,
        }
    }

    // =========================================================================
    // Orientation
    // =========================================================================

    /// Turns the camera around the Y axis.
    pub fn rotate_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw.rem_euclid(std::f32::consts::TAU);
        self.rotation = Mat3::from_yaw(self.yaw);
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Moves the camera along its forward direction.
    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.forward() * distance;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn rotation(&self) -> Mat3 {
        self.rotation
    }

    pub fn focal_length(&self) -> f32 {
        self.focal_length
    }

    pub fn right(&self) -> Vec3 {
        self.rotation.col(0)
    }

    pub fn down(&self) -> Vec3 {
        self.rotation.col(1)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation.col(2)
    }

    /// Brings a world-space point into camera space.
    #[inline]
    pub fn to_camera_space(&self, world: Vec3) -> Vec3 {
        (world - self.position) * self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn camera_starts_looking_forward() {
        let camera = Camera::default();
        assert_eq!(camera.forward(), Vec3::FORWARD);
        assert_eq!(camera.down(), Vec3::DOWN);
    }

    #[test]
    fn move_forward_follows_yaw() {
        let mut camera = Camera::new(Vec3::ZERO, 250.0);
        camera.rotate_yaw(FRAC_PI_2);
        camera.move_forward(1.0);

        assert_relative_eq!(camera.position().x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(camera.position().z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn point_ahead_lands_on_positive_z() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, -2.0), 250.0);
        let p = camera.to_camera_space(Vec3::new(0.5, 0.25, 1.0));

        assert_relative_eq!(p.x, 0.5);
        assert_relative_eq!(p.y, 0.25);
        assert_relative_eq!(p.z, 3.0);
    }

    #[test]
    fn yaw_wraps_into_one_turn() {
        let mut camera = Camera::default();
        camera.rotate_yaw(-0.1);
        assert!(camera.yaw() > 0.0 && camera.yaw() < std::f32::consts::TAU);
    }

    #[test]
    fn right_is_perpendicular_to_forward() {
        let mut camera = Camera::default();
        camera.set_yaw(1.234);
        assert_relative_eq!(camera.right().dot(camera.forward()), 0.0, epsilon = 1e-6);
    }
}
