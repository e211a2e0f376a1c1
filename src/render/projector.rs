//! Vertex projection.
//!
//! Maps a world-space vertex through the camera into a [`ProjectedSample`]:
//!
//! ```text
//! p     = (world - camera.position) * camera.rotation     camera space
//! zinv  = 1 / p.z
//! pos3d = p * zinv
//! x     = round(f * p.x * zinv) + width / 2
//! y     = round(f * p.y * zinv) + height / 2              y grows downward
//! ```
//!
//! Points with `p.z <= 0` sit on or behind the camera plane where the divide
//! is undefined. They are reported as not visible, and the caller drops the
//! whole triangle for the frame. So are points so close to the plane that
//! their screen coordinate leaves [`MAX_SCREEN_COORD`].

use super::sample::ProjectedSample;
use crate::camera::Camera;
use crate::math::vec3::Vec3;

/// Largest screen coordinate magnitude a projected vertex may have.
///
/// Up to 2^24 every integer is exact in f32, and row and line lengths
/// computed from two such coordinates still fit an `i32`.
pub const MAX_SCREEN_COORD: f32 = 16_777_216.0;

/// Offsets `offset` pixels from the middle of an axis of length `size`.
#[inline]
fn screen_coord(offset: f32, size: u32) -> Option<i32> {
    let coord = offset.round() + (size / 2) as f32;
    if coord.is_finite() && coord.abs() <= MAX_SCREEN_COORD {
        Some(coord as i32)
    } else {
        None
    }
}

/// Projects one vertex. Pure: the same inputs give a bit-identical sample.
///
/// Returns `None` when the vertex is not strictly in front of the camera, or
/// lands too far off screen to address.
#[inline]
pub fn project_vertex(world: Vec3, camera: &Camera, width: u32, height: u32) -> Option<ProjectedSample> {
    let p = camera.to_camera_space(world);
    // Also rejects NaN depth.
    if !(p.z > 0.0) {
        return None;
    }

    let zinv = 1.0 / p.z;
    let focal_length = camera.focal_length();
    let x = screen_coord(focal_length * p.x * zinv, width)?;
    let y = screen_coord(focal_length * p.y * zinv, height)?;

    Some(ProjectedSample::new(x, y, zinv, p * zinv))
}

/// Projects all three vertices of a triangle, or none of them.
#[inline]
pub fn project_triangle(
    vertices: [Vec3; 3],
    camera: &Camera,
    width: u32,
    height: u32,
) -> Option<[ProjectedSample; 3]> {
    Some([
        project_vertex(vertices[0], camera, width, height)?,
        project_vertex(vertices[1], camera, width, height)?,
        project_vertex(vertices[2], camera, width, height)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, -2.0), 250.0)
    }

    #[test]
    fn point_on_axis_lands_at_screen_center() {
        let s = project_vertex(Vec3::new(0.0, 0.0, 1.0), &camera(), 500, 500).unwrap();
        assert_eq!((s.x, s.y), (250, 250));
        assert_relative_eq!(s.zinv, 1.0 / 3.0);
    }

    #[test]
    fn projection_scales_by_focal_length_over_depth() {
        // camera-space (1, -0.5, 2) -> 250 * 0.5 = 125, 250 * -0.25 = -62.5
        let s = project_vertex(Vec3::new(1.0, -0.5, 0.0), &camera(), 500, 500).unwrap();
        assert_eq!(s.x, 375);
        assert_eq!(s.y, 250 - 63);
        assert_relative_eq!(s.pos3d.x, 0.5);
        assert_relative_eq!(s.pos3d.y, -0.25);
        assert_relative_eq!(s.pos3d.z, 1.0);
    }

    #[test]
    fn vertices_behind_or_on_camera_plane_are_rejected() {
        assert!(project_vertex(Vec3::new(0.0, 0.0, -2.0), &camera(), 500, 500).is_none());
        assert!(project_vertex(Vec3::new(0.3, 0.1, -3.0), &camera(), 500, 500).is_none());
    }

    #[test]
    fn vertices_grazing_the_camera_plane_are_rejected() {
        let cam = Camera::new(Vec3::ZERO, 250.0);
        assert!(project_vertex(Vec3::new(1.0, 0.0, 1e-8), &cam, 500, 500).is_none());
        assert!(project_vertex(Vec3::new(0.0, -1.0, 1e-8), &cam, 500, 500).is_none());
        // On the optical axis the coordinate stays small, so it still projects.
        let s = project_vertex(Vec3::new(0.0, 0.0, 1e-8), &cam, 500, 500).unwrap();
        assert_eq!((s.x, s.y), (250, 250));
    }

    #[test]
    fn projection_is_idempotent() {
        let cam = camera();
        let v = Vec3::new(0.37, -0.81, 0.52);
        let a = project_vertex(v, &cam, 500, 500).unwrap();
        let b = project_vertex(v, &cam, 500, 500).unwrap();
        assert_eq!(a.x, b.x);
        assert_eq!(a.y, b.y);
        assert_eq!(a.zinv.to_bits(), b.zinv.to_bits());
        assert_eq!(a.pos3d.x.to_bits(), b.pos3d.x.to_bits());
        assert_eq!(a.pos3d.y.to_bits(), b.pos3d.y.to_bits());
        assert_eq!(a.pos3d.z.to_bits(), b.pos3d.z.to_bits());
    }

    #[test]
    fn triangle_with_one_vertex_behind_is_dropped() {
        let vertices = [
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(0.0, 1.0, -5.0),
        ];
        assert!(project_triangle(vertices, &camera(), 500, 500).is_none());
    }

    #[test]
    fn yaw_moves_points_across_the_screen() {
        let mut cam = camera();
        cam.rotate_yaw(0.2);
        let s = project_vertex(Vec3::new(0.0, 0.0, 1.0), &cam, 500, 500).unwrap();
        assert!(s.x != 250);
        assert_eq!(s.y, 250);
    }
}
