//! Compile-time scene and renderer constants.
//!
//! Everything the frame loop needs that is not part of the scene geometry
//! lives here. [`RenderConfig::default`] bundles the constants so tests and
//! benchmarks can shrink the screen without touching the pipeline.

use crate::math::vec3::Vec3;

pub const SCREEN_WIDTH: u32 = 500;
pub const SCREEN_HEIGHT: u32 = 500;
pub const FOCAL_LENGTH: f32 = 250.0;

pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, -2.0);

pub const LIGHT_POSITION: Vec3 = Vec3::new(0.0, -0.5, 0.5);
pub const LIGHT_POWER: Vec3 = Vec3::splat(14.0);
pub const AMBIENT_LIGHT: Vec3 = Vec3::splat(0.5);
pub const REFLECTANCE: Vec3 = Vec3::ONE;

/// A triangle whose normal is this aligned with the camera forward faces away.
pub const BACKFACE_NORMAL_THRESHOLD: f32 = 0.8;
/// Vertices whose view direction is less aligned than this are off to the side.
pub const BACKFACE_VIEW_THRESHOLD: f32 = 0.6;

pub const NEAR_CLIP: f32 = 0.1;
pub const FAR_CLIP: f32 = 20.0;

/// Per-frame input steps.
pub const CAMERA_STEP: f32 = 0.1;
pub const YAW_STEP: f32 = 0.1;
pub const LIGHT_STEP: f32 = 0.1;

pub const SCREENSHOT_PATH: &str = "screenshot.bmp";

/// Frame-wide renderer parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub focal_length: f32,
    pub near: f32,
    pub far: f32,
    pub backface_normal_threshold: f32,
    pub backface_view_threshold: f32,
    /// Rasterize triangles on the rayon pool instead of in scene order.
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            focal_length: FOCAL_LENGTH,
            near: NEAR_CLIP,
            far: FAR_CLIP,
            backface_normal_threshold: BACKFACE_NORMAL_THRESHOLD,
            backface_view_threshold: BACKFACE_VIEW_THRESHOLD,
            parallel: false,
        }
    }
}

impl RenderConfig {
    /// Same constants on a different screen size.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}
