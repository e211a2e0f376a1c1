//! The rasterization pipeline.
//!
//! Draw runs these stages for every visible triangle:
//!
//! ```text
//! projector -> scanline -> span -> framebuffer (depth test) -> shader
//! ```
//!
//! [`visibility`] runs before Draw and marks triangles the pipeline skips.

pub mod framebuffer;
pub mod projector;
pub mod renderer;
pub mod sample;
pub mod scanline;
pub mod shader;
pub mod span;
pub mod visibility;

pub use framebuffer::FrameBuffer;
pub use projector::{project_triangle, project_vertex};
pub use renderer::{FrameStats, RenderMode, Renderer};
pub use sample::{interpolate, Interpolate, ProjectedSample, ScreenPoint};
pub use scanline::PolygonRows;
pub use shader::{FlatShader, PixelShader, PointLightShader};
pub use span::{draw_line, draw_rows, BresenhamWalker, DdaWalker, LineWalker, SpanStrategy};
pub use visibility::{VisibilityStage, ViewCuboid};
