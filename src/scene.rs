//! Scene geometry.
//!
//! A [`Scene`] is an ordered list of flat-colored [`Triangle`]s loaded once at
//! startup. Positions, normals and colors never change afterwards; the only
//! per-frame state is each triangle's `culled` flag, which the visibility
//! stage rewrites.

use std::path::Path;

use log::{info, warn};

use crate::error::{Error, Result};
use crate::math::vec3::Vec3;

/// A world-space triangle with a face normal and a flat color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    pub normal: Vec3,
    pub color: Vec3,
    /// Set by the visibility stage; Draw skips culled triangles.
    pub culled: bool,
}

impl Triangle {
    /// Builds a triangle and derives its normal from the winding.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, color: Vec3) -> Self {
        let mut triangle = Self {
            v0,
            v1,
            v2,
            normal: Vec3::ZERO,
            color,
            culled: false,
        };
        triangle.compute_normal();
        triangle
    }

    /// Builds a triangle with an explicit normal.
    pub fn with_normal(v0: Vec3, v1: Vec3, v2: Vec3, normal: Vec3, color: Vec3) -> Self {
        Self {
            v0,
            v1,
            v2,
            normal,
            color,
            culled: false,
        }
    }

    /// `normal = normalize((v2 - v0) x (v1 - v0))`
    pub fn compute_normal(&mut self) {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        self.normal = e2.cross(e1).normalize();
    }

    #[inline]
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }
}

/// The immutable triangle list plus per-triangle visibility flags.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    triangles: Vec<Triangle>,
}

impl Scene {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Mutable access is limited to the visibility flags.
    pub(crate) fn triangles_mut(&mut self) -> &mut [Triangle] {
        &mut self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Number of triangles currently marked culled.
    pub fn culled_count(&self) -> usize {
        self.triangles.iter().filter(|t| t.culled).count()
    }

    /// Loads a triangulated Wavefront OBJ file.
    ///
    /// Faces keep their file order. Each mesh takes the diffuse color of its
    /// material when one is present, otherwise `default_color`.
    pub fn from_obj<P: AsRef<Path>>(path: P, default_color: Vec3) -> Result<Self> {
        let path = path.as_ref();
        let (models, materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )?;
        let materials = materials.unwrap_or_else(|e| {
            warn!("ignoring materials for {}: {e}", path.display());
            Vec::new()
        });

        let mut triangles = Vec::new();
        for model in &models {
            let mesh = &model.mesh;
            let color = mesh
                .material_id
                .and_then(|id| materials.get(id))
                .and_then(|m| m.diffuse)
                .map(|[r, g, b]| Vec3::new(r, g, b))
                .unwrap_or(default_color);

            let position = |index: u32| {
                let i = index as usize * 3;
                Vec3::new(
                    mesh.positions[i],
                    mesh.positions[i + 1],
                    mesh.positions[i + 2],
                )
            };

            let chunks = mesh.indices.chunks_exact(3);
            if !chunks.remainder().is_empty() {
                warn!(
                    "mesh '{}' has {} dangling indices, skipping them",
                    model.name,
                    chunks.remainder().len()
                );
            }
            for face in chunks {
                let triangle =
                    Triangle::new(position(face[0]), position(face[1]), position(face[2]), color);
                if triangle.normal == Vec3::ZERO {
                    warn!("degenerate face in mesh '{}'", model.name);
                }
                triangles.push(triangle);
            }
        }

        if triangles.is_empty() {
            return Err(Error::EmptyScene(path.display().to_string()));
        }
        info!("loaded {} triangles from {}", triangles.len(), path.display());
        Ok(Self::new(triangles))
    }
}

// =============================================================================
// Cornell Box
// =============================================================================

pub const RED: Vec3 = Vec3::new(0.75, 0.15, 0.15);
pub const YELLOW: Vec3 = Vec3::new(0.75, 0.75, 0.15);
pub const GREEN: Vec3 = Vec3::new(0.15, 0.75, 0.15);
pub const CYAN: Vec3 = Vec3::new(0.15, 0.75, 0.75);
pub const BLUE: Vec3 = Vec3::new(0.15, 0.15, 0.75);
pub const PURPLE: Vec3 = Vec3::new(0.75, 0.15, 0.75);
pub const WHITE: Vec3 = Vec3::new(0.75, 0.75, 0.75);

/// Side length of the box in its authoring units.
const BOX_SIZE: f32 = 555.0;

/// Corner indices into a block's 8 corners, `A..H` = `0..8`, for the 10
/// triangles of an axis-aligned block without its bottom face.
const BLOCK_FACES: [[usize; 3]; 10] = [
    // Front
    [4, 1, 0],
    [4, 5, 1],
    // Right
    [5, 3, 1],
    [5, 7, 3],
    // Back
    [7, 2, 3],
    [7, 6, 2],
    // Left
    [6, 4, 2],
    [4, 0, 2],
    // Top
    [6, 5, 4],
    [6, 7, 5],
];

fn block(corners: [[f32; 3]; 8], color: Vec3, out: &mut Vec<Triangle>) {
    let c = corners.map(|[x, y, z]| Vec3::new(x, y, z));
    out.extend(
        BLOCK_FACES
            .iter()
            .map(|&[a, b, d]| Triangle::new(c[a], c[b], c[d], color)),
    );
}

/// Builds the classic Cornell Box: a room with a short and a tall block.
///
/// The model is authored in a 555-unit cube and rescaled to `[-1, 1]^3`, with
/// x and y flipped so +y points down and the floor sits at `y = 1`.
pub fn cornell_box() -> Scene {
    let l = BOX_SIZE;
    let mut triangles = Vec::with_capacity(30);

    // Room
    let a = Vec3::new(l, 0.0, 0.0);
    let b = Vec3::new(0.0, 0.0, 0.0);
    let c = Vec3::new(l, 0.0, l);
    let d = Vec3::new(0.0, 0.0, l);
    let e = Vec3::new(l, l, 0.0);
    let f = Vec3::new(0.0, l, 0.0);
    let g = Vec3::new(l, l, l);
    let h = Vec3::new(0.0, l, l);

    // Floor
    triangles.push(Triangle::new(c, b, a, GREEN));
    triangles.push(Triangle::new(c, d, b, GREEN));
    // Left wall
    triangles.push(Triangle::new(a, e, c, PURPLE));
    triangles.push(Triangle::new(c, e, g, PURPLE));
    // Right wall
    triangles.push(Triangle::new(f, b, d, YELLOW));
    triangles.push(Triangle::new(h, f, d, YELLOW));
    // Ceiling
    triangles.push(Triangle::new(e, f, g, CYAN));
    triangles.push(Triangle::new(f, h, g, CYAN));
    // Back wall
    triangles.push(Triangle::new(g, d, c, WHITE));
    triangles.push(Triangle::new(g, h, d, WHITE));

    block(
        [
            [290.0, 0.0, 114.0],
            [130.0, 0.0, 65.0],
            [240.0, 0.0, 272.0],
            [82.0, 0.0, 225.0],
            [290.0, 165.0, 114.0],
            [130.0, 165.0, 65.0],
            [240.0, 165.0, 272.0],
            [82.0, 165.0, 225.0],
        ],
        RED,
        &mut triangles,
    );
    block(
        [
            [423.0, 0.0, 247.0],
            [265.0, 0.0, 296.0],
            [472.0, 0.0, 406.0],
            [314.0, 0.0, 456.0],
            [423.0, 330.0, 247.0],
            [265.0, 330.0, 296.0],
            [472.0, 330.0, 406.0],
            [314.0, 330.0, 456.0],
        ],
        BLUE,
        &mut triangles,
    );

    let rescale = |v: Vec3| {
        let v = v * (2.0 / l) - Vec3::ONE;
        Vec3::new(-v.x, -v.y, v.z)
    };
    for triangle in &mut triangles {
        triangle.v0 = rescale(triangle.v0);
        triangle.v1 = rescale(triangle.v1);
        triangle.v2 = rescale(triangle.v2);
        triangle.compute_normal();
    }

    Scene::new(triangles)
}
