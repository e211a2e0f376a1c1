//! Per-frame triangle culling.
//!
//! Two independent policies write each triangle's `culled` flag:
//!
//! - **Backface**: the normal points along the view direction
//!   (`forward . n > normal_threshold`), or every vertex sits far off to the
//!   side of the view axis (`forward . normalize(v - eye) < view_threshold`
//!   for all three).
//! - **View cuboid**: every vertex falls outside the box that
//!   [`Mat4::perspective_cuboid`] maps the visible frustum onto.
//!
//! Flags are rebuilt from scratch on every [`VisibilityStage::apply`]: all
//! triangles are reset to visible, then each enabled policy marks its
//! triangles. Turning a policy off also clears the flags right away.

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::scene::{Scene, Triangle};

/// Culling toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityStage {
    backface: bool,
    cuboid: bool,
}

impl VisibilityStage {
    pub fn new(backface: bool, cuboid: bool) -> Self {
        Self { backface, cuboid }
    }

    pub fn backface(&self) -> bool {
        self.backface
    }

    pub fn cuboid(&self) -> bool {
        self.cuboid
    }

    pub fn any_enabled(&self) -> bool {
        self.backface || self.cuboid
    }

    /// Enables or disables backface culling. Disabling clears every flag.
    pub fn set_backface(&mut self, enabled: bool, scene: &mut Scene) {
        self.backface = enabled;
        if !enabled {
            reset(scene);
        }
    }

    /// Enables or disables view-cuboid culling. Disabling clears every flag.
    pub fn set_cuboid(&mut self, enabled: bool, scene: &mut Scene) {
        self.cuboid = enabled;
        if !enabled {
            reset(scene);
        }
    }

    /// Recomputes every triangle's `culled` flag for the current camera.
    /// Returns the number of culled triangles.
    pub fn apply(&self, scene: &mut Scene, camera: &Camera, config: &RenderConfig) -> usize {
        reset(scene);
        if !self.any_enabled() {
            return 0;
        }

        let cuboid = ViewCuboid::new(config);
        let mut culled = 0;
        for triangle in scene.triangles_mut() {
            let hidden = (self.backface
                && is_backfacing(
                    triangle,
                    camera,
                    config.backface_normal_threshold,
                    config.backface_view_threshold,
                ))
                || (self.cuboid && !cuboid.contains_any(triangle, camera));
            triangle.culled = hidden;
            if hidden {
                culled += 1;
            }
        }
        culled
    }
}

fn reset(scene: &mut Scene) {
    for triangle in scene.triangles_mut() {
        triangle.culled = false;
    }
}

/// Backface heuristic for one triangle.
pub fn is_backfacing(triangle: &Triangle, camera: &Camera, normal_threshold: f32, view_threshold: f32) -> bool {
    let forward = camera.forward();
    if forward.dot(triangle.normal) > normal_threshold {
        return true;
    }

    let eye = camera.position();
    triangle
        .vertices()
        .iter()
        .all(|&v| (v - eye).normalize().dot(forward) < view_threshold)
}

/// The axis-aligned box the visible frustum maps onto.
#[derive(Debug, Clone, Copy)]
pub struct ViewCuboid {
    transform: Mat4,
    min: Vec3,
    max: Vec3,
}

impl ViewCuboid {
    pub fn new(config: &RenderConfig) -> Self {
        let half_width = config.width as f32 / 2.0;
        let half_height = config.height as f32 / 2.0;
        Self {
            transform: Mat4::perspective_cuboid(config.focal_length, config.near, config.far),
            min: Vec3::new(-half_width, -half_height, 0.0),
            max: Vec3::new(half_width, half_height, 1.0),
        }
    }

    /// Whether a camera-space point lands inside the box.
    pub fn contains(&self, camera_space: Vec3) -> bool {
        match (self.transform * Vec4::from_vec3(camera_space, 1.0)).perspective_divide() {
            Some(p) => {
                (self.min.x..=self.max.x).contains(&p.x)
                    && (self.min.y..=self.max.y).contains(&p.y)
                    && (self.min.z..=self.max.z).contains(&p.z)
            }
            None => false,
        }
    }

    /// Whether at least one vertex of the triangle is inside.
    pub fn contains_any(&self, triangle: &Triangle, camera: &Camera) -> bool {
        triangle
            .vertices()
            .iter()
            .any(|&v| self.contains(camera.to_camera_space(v)))
    }
}
