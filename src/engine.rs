//! Core rendering engine.
//!
//! The [`Engine`] owns everything a frame needs: the scene, camera, light,
//! culling toggles and the render context. The frame loop drives it with
//! [`Engine::update`] (held keys, once per frame), [`Engine::apply`]
//! (one-shot commands) and [`Engine::render`].

use std::path::Path;
use std::time::Instant;

use log::{debug, info};

use crate::camera::Camera;
use crate::config::{self, RenderConfig};
use crate::error::Result;
use crate::light::PointLight;
use crate::raytracer;
use crate::render::{FrameBuffer, FrameStats, Renderer, VisibilityStage};
use crate::scene::Scene;

/// Which pipeline produces the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pipeline {
    #[default]
    Rasterizer,
    RayTracer,
}

impl Pipeline {
    pub fn toggled(self) -> Self {
        match self {
            Pipeline::Rasterizer => Pipeline::RayTracer,
            Pipeline::RayTracer => Pipeline::Rasterizer,
        }
    }
}

impl std::fmt::Display for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pipeline::Rasterizer => write!(f, "Rasterizer"),
            Pipeline::RayTracer => write!(f, "Ray tracer"),
        }
    }
}

/// Keys held during the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub light_forward: bool,
    pub light_backward: bool,
    pub light_left: bool,
    pub light_right: bool,
}

/// One-shot toggles, typically bound to key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleBackfaceCulling,
    ToggleCuboidCulling,
    TogglePipeline,
    ToggleSpanStrategy,
    ToggleRenderMode,
    ToggleParallel,
}

pub struct Engine {
    scene: Scene,
    camera: Camera,
    light: PointLight,
    visibility: VisibilityStage,
    renderer: Renderer,
    pipeline: Pipeline,
}

impl Engine {
    pub fn new(scene: Scene, config: RenderConfig) -> Self {
        Self {
            scene,
            camera: Camera::new(config::CAMERA_POSITION, config.focal_length),
            light: PointLight::default(),
            visibility: VisibilityStage::default(),
            renderer: Renderer::new(config),
            pipeline: Pipeline::default(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn light(&self) -> &PointLight {
        &self.light
    }

    pub fn visibility(&self) -> VisibilityStage {
        self.visibility
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn pipeline(&self) -> Pipeline {
        self.pipeline
    }

    pub fn set_pipeline(&mut self, pipeline: Pipeline) {
        self.pipeline = pipeline;
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        self.renderer.framebuffer()
    }

    /// Applies one frame of held-key movement.
    pub fn update(&mut self, input: &InputState) {
        if input.forward {
            self.camera.move_forward(config::CAMERA_STEP);
        } else if input.backward {
            self.camera.move_forward(-config::CAMERA_STEP);
        }

        if input.turn_left {
            self.camera.rotate_yaw(config::YAW_STEP);
        } else if input.turn_right {
            self.camera.rotate_yaw(-config::YAW_STEP);
        }

        if input.light_forward {
            self.light.position.z += config::LIGHT_STEP;
        } else if input.light_backward {
            self.light.position.z -= config::LIGHT_STEP;
        }

        if input.light_left {
            self.light.position.x -= config::LIGHT_STEP;
        } else if input.light_right {
            self.light.position.x += config::LIGHT_STEP;
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::ToggleBackfaceCulling => {
                let enabled = !self.visibility.backface();
                self.visibility.set_backface(enabled, &mut self.scene);
                info!("Backface culling: {}", on_off(enabled));
            }
            Command::ToggleCuboidCulling => {
                let enabled = !self.visibility.cuboid();
                self.visibility.set_cuboid(enabled, &mut self.scene);
                info!("View cuboid culling: {}", on_off(enabled));
            }
            Command::TogglePipeline => {
                self.pipeline = self.pipeline.toggled();
                info!("Pipeline: {}", self.pipeline);
            }
            Command::ToggleSpanStrategy => {
                let strategy = self.renderer.span_strategy().toggled();
                self.renderer.set_span_strategy(strategy);
                info!("Span filler: {strategy}");
            }
            Command::ToggleRenderMode => {
                let mode = self.renderer.render_mode().toggled();
                self.renderer.set_render_mode(mode);
                info!("Render mode: {mode}");
            }
            Command::ToggleParallel => {
                let parallel = !self.renderer.parallel();
                self.renderer.set_parallel(parallel);
                info!("Parallel draw: {}", on_off(parallel));
            }
        }
    }

    /// Renders the current frame with the active pipeline.
    pub fn render(&mut self) -> FrameStats {
        let start = Instant::now();

        let stats = match self.pipeline {
            Pipeline::Rasterizer => {
                let config = *self.renderer.config();
                let culled = self.visibility.apply(&mut self.scene, &self.camera, &config);
                if self.visibility.any_enabled() {
                    debug!("Culled {culled} of {} triangles", self.scene.len());
                }
                self.renderer.draw(&self.scene, &self.camera, &self.light)
            }
            Pipeline::RayTracer => {
                let config = *self.renderer.config();
                let hits = raytracer::render(&self.scene, &self.camera, &config, self.renderer.framebuffer());
                FrameStats {
                    drawn: self.scene.len(),
                    pixels: hits,
                    ..FrameStats::default()
                }
            }
        };

        debug!("Render time: {} ms.", start.elapsed().as_millis());
        stats
    }

    /// Writes the current frame to an image file.
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.renderer.framebuffer().save(path)?;
        info!("Saved snapshot to {}", path.display());
        Ok(())
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}
