//! Small fixed-size linear algebra used by the pipeline.

pub mod mat3;
pub mod mat4;
pub mod vec3;
pub mod vec4;
