//! A CPU software renderer for the Cornell Box.
//!
//! Two pipelines draw the same triangle scene: a scanline rasterizer with a
//! per-pixel inverse-depth test and point-light shading, and a brute-force
//! ray tracer. SDL2 is used only for the window, input and display.
//!
//! # Quick Start
//!
//! ```ignore
//! use cornell_raster::prelude::*;
//!
//! let mut engine = Engine::new(cornell_box(), RenderConfig::default());
//! engine.render();
//! engine.save_snapshot("screenshot.bmp")?;
//! ```

pub mod camera;
pub mod colors;
pub mod config;
pub mod engine;
pub mod error;
pub mod light;
pub mod math;
pub mod raytracer;
pub mod render;
pub mod scene;
pub mod window;

pub use engine::{Command, Engine, InputState, Pipeline};
pub use error::{Error, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    // Engine
    pub use crate::engine::{Command, Engine, InputState, Pipeline};

    // Scene
    pub use crate::camera::Camera;
    pub use crate::light::PointLight;
    pub use crate::scene::{cornell_box, Scene, Triangle};

    // Config
    pub use crate::config::RenderConfig;

    // Math
    pub use crate::math::mat3::Mat3;
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Rendering
    pub use crate::render::{FrameBuffer, FrameStats, RenderMode, Renderer, SpanStrategy, VisibilityStage};

    // Window & Input
    pub use crate::window::{FrameTimer, Window, WindowEvent};
}
