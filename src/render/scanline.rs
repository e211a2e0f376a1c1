//! Triangle-to-scanline decomposition.
//!
//! # Algorithm Overview
//!
//! For a triangle covering rows `min_y..=max_y`, compute for every row the
//! leftmost and rightmost boundary sample:
//!
//! 1. **Allocate** one `(left, right)` pair per row, with `left.x` set to the
//!    largest `i32` and `right.x` to the smallest, so any real sample wins.
//! 2. **Walk each directed edge** `(i, (i + 1) % 3)` with [`interpolate`],
//!    taking `|dy| + 1` samples (one per row the edge touches). A horizontal
//!    edge still yields a single sample at its start vertex.
//! 3. **Keep extremes**: a sample replaces `left[row]` if its x is strictly
//!    smaller and `right[row]` if strictly larger.
//!
//! ```text
//!          v0
//!          /\          row 0:  left = v0, right = v0
//!     e2  /  \  e0     row 1:  left from e2, right from e0
//!        /    \        ...
//!      v2------v1      row n:  left = v2, right = v1
//!          e1
//! ```
//!
//! # Tie-breaking
//!
//! Comparisons are strict, so when two edges produce the same x on a row
//! the edge visited first keeps the slot. Edges are always visited in vertex
//! order, and vertices are never sorted, so the result is deterministic for
//! either winding.
//!
//! Every row is reached by at least two edges of a triangle, so after the
//! walk each row holds real samples with `left.x <= right.x`.

use super::sample::{interpolate, ProjectedSample};
use crate::math::vec3::Vec3;

/// Per-row boundary samples of one triangle.
#[derive(Debug, Clone, Default)]
pub struct PolygonRows {
    min_y: i32,
    left: Vec<ProjectedSample>,
    right: Vec<ProjectedSample>,
}

impl PolygonRows {
    /// Computes the row boundaries of a projected triangle.
    pub fn compute(vertices: &[ProjectedSample; 3]) -> Self {
        let mut rows = Self::default();
        rows.compute_into(vertices);
        rows
    }

    /// Like [`PolygonRows::compute`], reusing this value's allocations.
    pub fn compute_into(&mut self, vertices: &[ProjectedSample; 3]) {
        let min_y = vertices.iter().map(|v| v.y).min().unwrap_or(0);
        let max_y = vertices.iter().map(|v| v.y).max().unwrap_or(0);
        let row_count = (max_y as i64 - min_y as i64 + 1) as usize;

        self.min_y = min_y;
        let left_sentinel = ProjectedSample::new(i32::MAX, 0, 0.0, Vec3::ZERO);
        let right_sentinel = ProjectedSample::new(i32::MIN, 0, 0.0, Vec3::ZERO);
        self.left.clear();
        self.left.resize(row_count, left_sentinel);
        self.right.clear();
        self.right.resize(row_count, right_sentinel);

        for i in 0..3 {
            let a = vertices[i];
            let b = vertices[(i + 1) % 3];
            let edge_rows = (b.y as i64 - a.y as i64).unsigned_abs() as usize + 1;

            for sample in interpolate(a, b, edge_rows) {
                let row = (sample.y as i64 - min_y as i64) as usize;
                if let Some(left) = self.left.get_mut(row) {
                    if sample.x < left.x {
                        *left = sample;
                    }
                }
                if let Some(right) = self.right.get_mut(row) {
                    if sample.x > right.x {
                        *right = sample;
                    }
                }
            }
        }
    }

    /// First screen row covered.
    pub fn min_y(&self) -> i32 {
        self.min_y
    }

    /// Number of rows, `max_y - min_y + 1`.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Boundary pair for the `index`-th row from the top.
    pub fn row(&self, index: usize) -> Option<(&ProjectedSample, &ProjectedSample)> {
        Some((self.left.get(index)?, self.right.get(index)?))
    }

    /// Iterates `(left, right)` pairs from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = (&ProjectedSample, &ProjectedSample)> {
        self.left.iter().zip(self.right.iter())
    }
}
