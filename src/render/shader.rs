//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer decides *which* pixels a triangle covers and runs the depth
//! test; a [`PixelShader`] decides *what color* a surviving sample gets.
//! Shaders are shared across worker threads, so they must be `Sync`.

use super::sample::ProjectedSample;
use crate::colors::pack_rgb;
use crate::light::PointLight;
use crate::math::vec3::Vec3;

/// Trait for per-pixel shading computations.
///
/// Called once for each sample that passes the depth test.
pub trait PixelShader: Sync {
    /// Compute the packed ARGB color for a sample.
    fn shade(&self, sample: &ProjectedSample) -> u32;
}

/// Flat shader - returns a constant color for all pixels.
///
/// Used for wireframe edges.
pub struct FlatShader {
    color: u32,
}

impl FlatShader {
    pub fn new(color: u32) -> Self {
        Self { color }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _sample: &ProjectedSample) -> u32 {
        self.color
    }
}

/// Per-pixel diffuse shading from a single point light plus ambient.
///
/// ```text
/// p     = pos3d * pos3d.z
/// D     = P * max(normalize(light - p) . n, 0) / (4 * pi * |light - p|^2)
/// color = clamp(reflectance * (D + ambient) * surface, 0, 1)
/// ```
///
/// The surface position is rebuilt from the interpolated, depth-divided
/// position by scaling it back with its own z term.
pub struct PointLightShader<'a> {
    light: &'a PointLight,
    normal: Vec3,
    color: Vec3,
    reflectance: Vec3,
}

impl<'a> PointLightShader<'a> {
    pub fn new(light: &'a PointLight, normal: Vec3, color: Vec3, reflectance: Vec3) -> Self {
        Self {
            light,
            normal,
            color,
            reflectance,
        }
    }

    /// Unclamped linear RGB for a sample.
    #[inline]
    pub fn radiance(&self, sample: &ProjectedSample) -> Vec3 {
        let position = sample.pos3d * sample.pos3d.z;
        let direct = self.light.direct_irradiance(position, self.normal);
        self.reflectance * (direct + self.light.ambient) * self.color
    }
}

impl PixelShader for PointLightShader<'_> {
    #[inline]
    fn shade(&self, sample: &ProjectedSample) -> u32 {
        pack_rgb(self.radiance(sample).clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    fn sample_at(p: Vec3) -> ProjectedSample {
        // pos3d.z is 1 after the perspective pre-divide
        ProjectedSample::new(0, 0, 1.0, Vec3::new(p.x, p.y, 1.0))
    }

    #[test]
    fn ambient_only_when_facing_away() {
        let light = PointLight::new(Vec3::new(0.0, -1.0, 1.0), Vec3::splat(10.0), Vec3::splat(0.5));
        let shader = PointLightShader::new(&light, Vec3::new(0.0, 1.0, 0.0), Vec3::ONE, Vec3::ONE);
        let c = shader.radiance(&sample_at(Vec3::ZERO));
        assert_relative_eq!(c.x, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn direct_term_matches_inverse_square_law() {
        let light = PointLight::new(Vec3::new(0.0, -1.0, 1.0), Vec3::splat(4.0 * PI), Vec3::ZERO);
        let shader = PointLightShader::new(&light, Vec3::new(0.0, -1.0, 0.0), Vec3::ONE, Vec3::ONE);
        // Surface point (0, 0, 1), light one unit straight up
        let c = shader.radiance(&sample_at(Vec3::ZERO));
        assert_relative_eq!(c.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn output_is_clamped() {
        let light = PointLight::new(Vec3::new(0.0, -0.1, 1.0), Vec3::splat(1000.0), Vec3::ZERO);
        let shader = PointLightShader::new(&light, Vec3::new(0.0, -1.0, 0.0), Vec3::ONE, Vec3::ONE);
        assert_eq!(shader.shade(&sample_at(Vec3::ZERO)), 0xFFFF_FFFF);
    }

    #[test]
    fn surface_color_modulates_channels() {
        let light = PointLight::new(Vec3::new(5.0, 5.0, 5.0), Vec3::ZERO, Vec3::ONE);
        let shader = PointLightShader::new(&light, Vec3::FORWARD, Vec3::new(1.0, 0.0, 0.0), Vec3::ONE);
        assert_eq!(shader.shade(&sample_at(Vec3::ZERO)), 0xFFFF_0000);
    }

    #[test]
    fn flat_shader_ignores_sample() {
        let shader = FlatShader::new(0xFF12_3456);
        assert_eq!(shader.shade(&sample_at(Vec3::ONE)), 0xFF12_3456);
    }
}
