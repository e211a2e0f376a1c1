//! The per-frame render context.
//!
//! A [`Renderer`] owns the frame buffer and the settings that decide how
//! triangles are turned into pixels. [`Renderer::draw`] is one frame:
//!
//! 1. Clear color and depth.
//! 2. For each triangle not marked culled: project its vertices, skip it if
//!    any vertex is behind the camera or nearer than the near plane.
//! 3. Build the per-row boundaries and fill them through the depth test
//!    (or, in wireframe mode, draw the three edges).
//!
//! With `parallel` set, step 2 and 3 run on the rayon pool, one task per
//! triangle, all sharing the same frame buffer.

use rayon::prelude::*;

use super::framebuffer::FrameBuffer;
use super::projector::project_triangle;
use super::sample::ProjectedSample;
use super::scanline::PolygonRows;
use super::shader::{FlatShader, PointLightShader};
use super::span::{draw_line, draw_rows, SpanStrategy};
use crate::camera::Camera;
use crate::colors;
use crate::config::{RenderConfig, REFLECTANCE};
use crate::light::PointLight;
use crate::scene::{Scene, Triangle};

/// How triangles are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Lit, depth-tested solid triangles.
    #[default]
    Filled,
    /// Triangle edges in the triangle's flat color.
    Wireframe,
}

impl RenderMode {
    pub fn toggled(self) -> Self {
        match self {
            RenderMode::Filled => RenderMode::Wireframe,
            RenderMode::Wireframe => RenderMode::Filled,
        }
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Filled => write!(f, "Filled"),
            RenderMode::Wireframe => write!(f, "Wireframe"),
        }
    }
}

/// Counters for one Draw call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Triangles that reached the row filler.
    pub drawn: usize,
    /// Triangles dropped for being behind the camera or inside the near plane.
    pub skipped: usize,
    /// Triangles marked culled by the visibility stage.
    pub culled: usize,
    /// Pixels that passed the depth test.
    pub pixels: usize,
}

impl FrameStats {
    fn merge(self, other: Self) -> Self {
        Self {
            drawn: self.drawn + other.drawn,
            skipped: self.skipped + other.skipped,
            culled: self.culled + other.culled,
            pixels: self.pixels + other.pixels,
        }
    }
}

pub struct Renderer {
    config: RenderConfig,
    framebuffer: FrameBuffer,
    strategy: SpanStrategy,
    mode: RenderMode,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            framebuffer: FrameBuffer::new(config.width, config.height),
            config,
            strategy: SpanStrategy::default(),
            mode: RenderMode::default(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.framebuffer
    }

    pub fn span_strategy(&self) -> SpanStrategy {
        self.strategy
    }

    pub fn set_span_strategy(&mut self, strategy: SpanStrategy) {
        self.strategy = strategy;
    }

    pub fn render_mode(&self) -> RenderMode {
        self.mode
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.mode = mode;
    }

    pub fn parallel(&self) -> bool {
        self.config.parallel
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.config.parallel = parallel;
    }

    /// Renders one frame of `scene` into the frame buffer.
    pub fn draw(&mut self, scene: &Scene, camera: &Camera, light: &PointLight) -> FrameStats {
        self.framebuffer.clear();

        let this = &*self;
        let triangles = scene.triangles();
        if self.config.parallel {
            triangles
                .par_iter()
                .map_init(PolygonRows::default, |rows, triangle| {
                    this.draw_triangle(triangle, camera, light, rows)
                })
                .reduce(FrameStats::default, FrameStats::merge)
        } else {
            let mut rows = PolygonRows::default();
            triangles
                .iter()
                .map(|triangle| this.draw_triangle(triangle, camera, light, &mut rows))
                .fold(FrameStats::default(), FrameStats::merge)
        }
    }

    fn draw_triangle(
        &self,
        triangle: &Triangle,
        camera: &Camera,
        light: &PointLight,
        rows: &mut PolygonRows,
    ) -> FrameStats {
        if triangle.culled {
            return FrameStats {
                culled: 1,
                ..FrameStats::default()
            };
        }

        let skipped = FrameStats {
            skipped: 1,
            ..FrameStats::default()
        };
        let Some(vertices) = project_triangle(
            triangle.vertices(),
            camera,
            self.config.width,
            self.config.height,
        ) else {
            return skipped;
        };
        if vertices.iter().any(|v| v.zinv * self.config.near > 1.0) {
            return skipped;
        }

        let pixels = match self.mode {
            RenderMode::Filled => {
                rows.compute_into(&vertices);
                let shader = PointLightShader::new(light, triangle.normal, triangle.color, REFLECTANCE);
                draw_rows(rows, &self.strategy, &shader, &self.framebuffer)
            }
            RenderMode::Wireframe => self.draw_edges(&vertices, colors::pack_rgb(triangle.color)),
        };

        FrameStats {
            drawn: 1,
            pixels,
            ..FrameStats::default()
        }
    }

    fn draw_edges(&self, vertices: &[ProjectedSample; 3], color: u32) -> usize {
        let shader = FlatShader::new(color);
        (0..3)
            .map(|i| {
                draw_line(
                    &vertices[i],
                    &vertices[(i + 1) % 3],
                    &self.strategy,
                    &shader,
                    &self.framebuffer,
                )
            })
            .sum()
    }
}
