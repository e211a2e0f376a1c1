//! Brute-force ray casting.
//!
//! One primary ray per pixel leaves the camera position along
//! `right * (x - w/2) + down * (y - h/2) + forward * f` and is tested against
//! every triangle. The closest hit paints the pixel with the triangle's flat
//! color; a miss leaves it black.
//!
//! # Ray-Triangle Intersection
//!
//! A point on the triangle is `v0 + u * e1 + v * e2`, a point on the ray is
//! `s + t * d`. Equating them gives a 3x3 linear system
//!
//! ```text
//! [-d  e1  e2] * (t, u, v) = s - v0
//! ```
//!
//! solved here with Cramer's rule. The hit is inside the triangle when
//! `u >= 0`, `v >= 0`, `u + v <= 1`, and in front of the ray when `t >= 0`.

use rayon::prelude::*;

use crate::camera::Camera;
use crate::colors;
use crate::config::RenderConfig;
use crate::math::vec3::Vec3;
use crate::render::FrameBuffer;
use crate::scene::{Scene, Triangle};

/// Below this the ray is treated as parallel to the triangle plane.
const PARALLEL_EPSILON: f32 = 1e-9;

/// The nearest surface a ray hits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub position: Vec3,
    pub distance: f32,
    pub triangle_index: usize,
}

/// Solves for `(t, u, v)` of a ray against one triangle.
///
/// Returns `None` for rays parallel to the triangle plane.
#[inline]
fn solve(start: Vec3, dir: Vec3, triangle: &Triangle) -> Option<(f32, f32, f32)> {
    let e1 = triangle.v1 - triangle.v0;
    let e2 = triangle.v2 - triangle.v0;
    let b = start - triangle.v0;
    let neg_dir = -dir;

    // det([a, b, c]) = a . (b x c)
    let det = neg_dir.dot(e1.cross(e2));
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = b.dot(e1.cross(e2)) / det;
    let u = neg_dir.dot(b.cross(e2)) / det;
    let v = neg_dir.dot(e1.cross(b)) / det;
    Some((t, u, v))
}

/// Finds the closest triangle hit by the ray `start + t * dir`, `t >= 0`.
///
/// Ties keep the triangle that comes first in the list.
pub fn closest_intersection(start: Vec3, dir: Vec3, triangles: &[Triangle]) -> Option<Intersection> {
    let mut closest: Option<Intersection> = None;

    for (index, triangle) in triangles.iter().enumerate() {
        let Some((t, u, v)) = solve(start, dir, triangle) else {
            continue;
        };
        if !(u >= 0.0 && v >= 0.0 && u + v <= 1.0 && t >= 0.0) {
            continue;
        }

        let position = start + dir * t;
        let distance = start.distance(position);
        if closest.map_or(true, |c| distance < c.distance) {
            closest = Some(Intersection {
                position,
                distance,
                triangle_index: index,
            });
        }
    }

    closest
}

/// Direction of the primary ray through pixel (x, y).
#[inline]
pub fn primary_ray(camera: &Camera, x: u32, y: u32, width: u32, height: u32) -> Vec3 {
    let offset = Vec3::new(
        x as f32 - width as f32 / 2.0,
        y as f32 - height as f32 / 2.0,
        camera.focal_length(),
    );
    camera.rotation() * offset
}

/// Casts one ray per pixel into `target`. Returns the number of pixels hit.
///
/// Every pixel is overwritten, so the buffer does not need clearing first.
pub fn render(scene: &Scene, camera: &Camera, config: &RenderConfig, target: &FrameBuffer) -> usize {
    let trace_row = |y: u32| {
        let mut hits = 0;
        for x in 0..config.width {
            let dir = primary_ray(camera, x, y, config.width, config.height);
            match closest_intersection(camera.position(), dir, scene.triangles()) {
                Some(hit) => {
                    let color = colors::pack_rgb(scene.triangles()[hit.triangle_index].color);
                    target.put(x as i32, y as i32, 1.0 / hit.distance, color);
                    hits += 1;
                }
                None => target.put(x as i32, y as i32, 0.0, colors::BLACK),
            }
        }
        hits
    };

    if config.parallel {
        (0..config.height).into_par_iter().map(trace_row).sum()
    } else {
        (0..config.height).map(trace_row).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene;
    use approx::assert_relative_eq;

    fn wall(z: f32, color: Vec3) -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(0.0, 1.0, z),
            color,
        )
    }

    #[test]
    fn ray_hits_triangle_in_front() {
        let hit = closest_intersection(Vec3::ZERO, Vec3::FORWARD, &[wall(2.0, scene::RED)]).unwrap();
        assert_relative_eq!(hit.distance, 2.0, epsilon = 1e-6);
        assert_relative_eq!(hit.position.z, 2.0, epsilon = 1e-6);
        assert_eq!(hit.triangle_index, 0);
    }

    #[test]
    fn ray_ignores_triangles_behind_it() {
        assert!(closest_intersection(Vec3::ZERO, Vec3::FORWARD, &[wall(-2.0, scene::RED)]).is_none());
    }

    #[test]
    fn ray_outside_triangle_misses() {
        let start = Vec3::new(5.0, 0.0, 0.0);
        assert!(closest_intersection(start, Vec3::FORWARD, &[wall(2.0, scene::RED)]).is_none());
    }

    #[test]
    fn parallel_ray_misses() {
        assert!(closest_intersection(Vec3::ZERO, Vec3::RIGHT, &[wall(2.0, scene::RED)]).is_none());
    }

    #[test]
    fn closest_of_several_wins() {
        let triangles = [wall(5.0, scene::BLUE), wall(3.0, scene::RED), wall(4.0, scene::GREEN)];
        let hit = closest_intersection(Vec3::ZERO, Vec3::FORWARD, &triangles).unwrap();
        assert_eq!(hit.triangle_index, 1);
    }

    #[test]
    fn primary_ray_through_center_is_forward() {
        let camera = Camera::default();
        let dir = primary_ray(&camera, 250, 250, 500, 500);
        assert_relative_eq!(dir.normalize().z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn render_paints_hits_and_clears_misses() {
        let config = RenderConfig {
            focal_length: 16.0,
            ..RenderConfig::with_size(32, 32)
        };
        let fb = FrameBuffer::new(32, 32);
        fb.put(0, 0, 1.0, colors::WHITE);
        let scene = Scene::new(vec![wall(0.0, scene::RED)]);

        let camera = Camera::new(crate::config::CAMERA_POSITION, 16.0);
        let hits = render(&scene, &camera, &config, &fb);
        assert!(hits > 0);
        assert_eq!(fb.color(16, 16), Some(colors::pack_rgb(scene::RED)));
        assert_eq!(fb.color(0, 0), Some(colors::BLACK));
        assert_relative_eq!(fb.depth(16, 16).unwrap(), 0.5, epsilon = 1e-4);
    }
}
