//! Lighting types for the renderer.

use std::f32::consts::PI;

use crate::config;
use crate::math::vec3::Vec3;

/// A point light radiating equally in all directions, plus a constant
/// ambient term standing in for indirect illumination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    /// Emitted power per color channel.
    pub power: Vec3,
    /// Indirect light power per area, added to every surface.
    pub ambient: Vec3,
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(config::LIGHT_POSITION, config::LIGHT_POWER, config::AMBIENT_LIGHT)
    }
}

impl PointLight {
    pub fn new(position: Vec3, power: Vec3, ambient: Vec3) -> Self {
        Self {
            position,
            power,
            ambient,
        }
    }

    /// Direct irradiance arriving at `point` on a surface with `normal`.
    ///
    /// `D = P * max(r . n, 0) / (4 * pi * |r|^2)` where `r` points from the
    /// surface to the light. Surfaces facing away receive nothing.
    pub fn direct_irradiance(&self, point: Vec3, normal: Vec3) -> Vec3 {
        let to_light = self.position - point;
        let distance_squared = to_light.magnitude_squared();
        if distance_squared <= f32::EPSILON {
            return Vec3::ZERO;
        }
        let cos_theta = to_light.normalize().dot(normal).max(0.0);
        self.power * (cos_theta / (4.0 * PI * distance_squared))
    }
}
