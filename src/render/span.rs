//! Line sampling and depth-tested row filling.
//!
//! Every filled row and every wireframe edge is a line between two
//! [`ProjectedSample`]s. A [`LineWalker`] turns such a line into the sequence
//! of pixel samples it covers; [`draw_line`] pushes each one through the
//! depth test and, if it survives, the pixel shader.
//!
//! Two walkers produce the same samples:
//!
//! - [`DdaWalker`]: `N = max(|dx|, |dy|) + 1` samples at uniform steps of
//!   `delta / (N - 1)`, coordinates rounded to nearest.
//! - [`BresenhamWalker`]: integer error accumulation for the coordinates,
//!   attributes blended at `t = step / steps`.
//!
//! Both round half-pixel ties away from zero, so toggling between them does
//! not move wireframe pixels.

use super::framebuffer::FrameBuffer;
use super::sample::{interpolate, line_length, ProjectedSample};
use super::scanline::PolygonRows;
use super::shader::PixelShader;

/// Turns a line between two samples into per-pixel samples.
pub trait LineWalker {
    /// Calls `visit` for every sample from `a` to `b`, both included.
    fn walk(&self, a: &ProjectedSample, b: &ProjectedSample, visit: &mut dyn FnMut(ProjectedSample));
}

/// Uniform-step (DDA) line walker.
pub struct DdaWalker;

impl LineWalker for DdaWalker {
    #[inline]
    fn walk(&self, a: &ProjectedSample, b: &ProjectedSample, visit: &mut dyn FnMut(ProjectedSample)) {
        let n = line_length(a.screen(), b.screen());
        for sample in interpolate(*a, *b, n) {
            visit(sample);
        }
    }
}

/// Integer incremental-error (Bresenham) line walker.
pub struct BresenhamWalker;

impl LineWalker for BresenhamWalker {
    /// The major axis moves one pixel per step. The minor axis keeps the
    /// floor of its ideal coordinate plus an error term in units of
    /// `1 / steps`, and plots the nearer of the two neighbouring pixels.
    /// Half-pixel ties round away from zero, as `f32::round` does.
    fn walk(&self, a: &ProjectedSample, b: &ProjectedSample, visit: &mut dyn FnMut(ProjectedSample)) {
        let (x0, y0) = (a.x as i64, a.y as i64);
        let (x1, y1) = (b.x as i64, b.y as i64);
        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs());
        if steps == 0 {
            visit(*a);
            return;
        }

        let x_major = dx.abs() >= dy.abs();
        let (major_start, major_incr_direction, mut minor, minor_delta) = if x_major {
            (x0, dx.signum(), y0, dy)
        } else {
            (y0, dy.signum(), x0, dx)
        };
        // Always in 0..steps.
        let mut err = 0;

        for step in 0..=steps {
            let rounded = if 2 * err > steps || (2 * err == steps && minor >= 0) {
                minor + 1
            } else {
                minor
            };
            let major = major_start + major_incr_direction * step;
            let (x, y) = if x_major { (major, rounded) } else { (rounded, major) };

            let t = step as f32 / steps as f32;
            visit(ProjectedSample::new(
                x as i32,
                y as i32,
                a.zinv + (b.zinv - a.zinv) * t,
                a.pos3d.lerp(b.pos3d, t),
            ));

            err += minor_delta;
            if err >= steps {
                err -= steps;
                minor += 1;
            } else if err < 0 {
                err += steps;
                minor -= 1;
            }
        }
    }
}

/// Available span filling strategies.
///
/// Can be changed at runtime via `Renderer::set_span_strategy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpanStrategy {
    /// Uniform floating-point steps.
    #[default]
    Dda,
    /// Integer error accumulation.
    Bresenham,
}

impl SpanStrategy {
    pub fn toggled(self) -> Self {
        match self {
            SpanStrategy::Dda => SpanStrategy::Bresenham,
            SpanStrategy::Bresenham => SpanStrategy::Dda,
        }
    }
}

impl std::fmt::Display for SpanStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpanStrategy::Dda => write!(f, "DDA"),
            SpanStrategy::Bresenham => write!(f, "Bresenham"),
        }
    }
}

impl LineWalker for SpanStrategy {
    #[inline]
    fn walk(&self, a: &ProjectedSample, b: &ProjectedSample, visit: &mut dyn FnMut(ProjectedSample)) {
        match self {
            SpanStrategy::Dda => DdaWalker.walk(a, b, visit),
            SpanStrategy::Bresenham => BresenhamWalker.walk(a, b, visit),
        }
    }
}

/// Draws one line through the depth test. Returns the number of pixels
/// written.
pub fn draw_line(
    a: &ProjectedSample,
    b: &ProjectedSample,
    walker: &impl LineWalker,
    shader: &impl PixelShader,
    target: &FrameBuffer,
) -> usize {
    let mut written = 0;
    walker.walk(a, b, &mut |sample| {
        if target.depth_test_and_set(sample.x, sample.y, sample.zinv, || shader.shade(&sample)) {
            written += 1;
        }
    });
    written
}

/// Fills every row of a triangle from its left to its right boundary.
/// Returns the number of pixels written.
pub fn draw_rows(
    rows: &PolygonRows,
    walker: &impl LineWalker,
    shader: &impl PixelShader,
    target: &FrameBuffer,
) -> usize {
    let height = target.height() as i64;
    rows.iter()
        .filter(|(left, _)| (0..height).contains(&(left.y as i64)))
        .map(|(left, right)| draw_line(left, right, walker, shader, target))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use crate::math::vec3::Vec3;
    use crate::render::shader::FlatShader;
    use approx::assert_relative_eq;

    fn px(x: i32, y: i32, zinv: f32) -> ProjectedSample {
        ProjectedSample::new(x, y, zinv, Vec3::new(0.0, 0.0, 1.0))
    }

    fn collect(walker: &impl LineWalker, a: ProjectedSample, b: ProjectedSample) -> Vec<ProjectedSample> {
        let mut out = Vec::new();
        walker.walk(&a, &b, &mut |s| out.push(s));
        out
    }

    #[test]
    fn single_pixel_span_is_the_start_point() {
        let a = px(4, 4, 0.5);
        for walker in [SpanStrategy::Dda, SpanStrategy::Bresenham] {
            assert_eq!(collect(&walker, a, px(4, 4, 0.9)), vec![a]);
        }
    }

    #[test]
    fn walkers_agree_on_horizontal_spans() {
        let a = px(-3, 7, 0.2);
        let b = px(17, 7, 0.6);
        let dda = collect(&DdaWalker, a, b);
        let bres = collect(&BresenhamWalker, a, b);
        assert_eq!(dda.len(), 21);
        assert_eq!(dda.len(), bres.len());
        for (d, r) in dda.iter().zip(&bres) {
            assert_eq!((d.x, d.y), (r.x, r.y));
            assert_relative_eq!(d.zinv, r.zinv, epsilon = 1e-6);
        }
    }

    #[test]
    fn walkers_agree_on_diagonal_lines() {
        let lines = [
            ((0, 0), (2, 1)),
            ((0, 0), (2, -1)),
            ((0, -3), (2, -2)),
            ((0, 0), (1, 2)),
            ((5, 5), (-3, 2)),
            ((1, 2), (4, -9)),
            ((-7, 3), (6, 8)),
            ((-2, -2), (6, 6)),
        ];
        for ((x0, y0), (x1, y1)) in lines {
            let a = px(x0, y0, 0.25);
            let b = px(x1, y1, 0.75);
            let dda = collect(&DdaWalker, a, b);
            let bres = collect(&BresenhamWalker, a, b);
            assert_eq!(dda, bres, "line ({x0},{y0}) -> ({x1},{y1})");
        }
    }

    #[test]
    fn half_pixel_ties_round_away_from_zero() {
        let points = |a, b| -> Vec<(i32, i32)> {
            collect(&BresenhamWalker, a, b).iter().map(|s| (s.x, s.y)).collect()
        };
        assert_eq!(points(px(0, 0, 1.0), px(2, 1, 1.0)), vec![(0, 0), (1, 1), (2, 1)]);
        assert_eq!(points(px(0, 0, 1.0), px(2, -1, 1.0)), vec![(0, 0), (1, -1), (2, -1)]);
        assert_eq!(points(px(0, -3, 1.0), px(2, -2, 1.0)), vec![(0, -3), (1, -3), (2, -2)]);
    }

    #[test]
    fn bresenham_reaches_the_end_of_steep_lines() {
        let out = collect(&BresenhamWalker, px(0, 0, 1.0), px(-3, 11, 0.5));
        assert_eq!(out.len(), 12);
        let last = out.last().unwrap();
        assert_eq!((last.x, last.y), (-3, 11));
        assert_relative_eq!(last.zinv, 0.5);
    }

    #[test]
    fn span_attributes_follow_linear_formula() {
        let a = px(0, 0, 0.0);
        let b = px(8, 0, 1.0);
        for (i, s) in collect(&DdaWalker, a, b).iter().enumerate() {
            assert_eq!(s.x, i as i32);
            assert_relative_eq!(s.zinv, i as f32 / 8.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn draw_line_skips_offscreen_pixels() {
        let fb = FrameBuffer::new(10, 10);
        let written = draw_line(
            &px(-5, 2, 0.5),
            &px(4, 2, 0.5),
            &SpanStrategy::Dda,
            &FlatShader::new(colors::WHITE),
            &fb,
        );
        assert_eq!(written, 5);
        assert_eq!(fb.color(0, 2), Some(colors::WHITE));
        assert_eq!(fb.color(5, 2), Some(colors::BLACK));
    }

    #[test]
    fn draw_rows_fills_triangle_interior() {
        let fb = FrameBuffer::new(64, 64);
        let rows = PolygonRows::compute(&[px(10, 10, 0.5), px(50, 10, 0.5), px(30, 40, 0.5)]);
        let written = draw_rows(&rows, &SpanStrategy::Dda, &FlatShader::new(colors::WHITE), &fb);
        assert!(written > 0);
        assert_eq!(fb.color(30, 20), Some(colors::WHITE));
        assert_eq!(fb.color(10, 10), Some(colors::WHITE));
        assert_eq!(fb.color(50, 10), Some(colors::WHITE));
        assert_eq!(fb.color(10, 30), Some(colors::BLACK));
        assert_eq!(fb.color(30, 41), Some(colors::BLACK));
    }
}
