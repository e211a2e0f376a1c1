//! Crate error type.
//!
//! Only the outer surfaces can fail: window setup, scene loading and the exit
//! snapshot. The rasterization core drops degenerate input instead of
//! reporting it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Window error: {0}")]
    Window(String),
    #[error("Failed to load scene: {0}")]
    SceneLoad(#[from] tobj::LoadError),
    #[error("Scene has no triangles: {0}")]
    EmptyScene(String),
    #[error("Failed to write snapshot: {0}")]
    Snapshot(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
