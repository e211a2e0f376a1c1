//! Color and depth storage for one frame.
//!
//! # Depth Buffer
//!
//! Each pixel stores the inverse camera-space depth (`1/z`) of the nearest
//! surface written so far. `1/z` interpolates linearly in screen space, and
//! larger values are nearer. The cleared value `0.0` means "infinitely far",
//! so the first real sample always wins.
//!
//! # Concurrency
//!
//! Triangles may be rasterized in parallel, and all of them write into the
//! same buffer. Depth and color for a pixel are packed into one `AtomicU64`:
//!
//! ```text
//!  63            32 31             0
//! +----------------+----------------+
//! |  zinv (f32)    |  color (ARGB)  |
//! +----------------+----------------+
//! ```
//!
//! A write is a compare-and-swap that only lands while the new `zinv` is
//! strictly greater than the stored one, so a pixel never goes from a nearer
//! surface to a farther one and depth and color never tear. Two samples at
//! exactly equal depth race: whichever commits first keeps the pixel.
//! Sequential drawing is fully deterministic.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use image::{ImageFormat, Rgb, RgbImage};

use crate::colors;
use crate::error::Result;

#[inline]
fn pack(zinv: f32, color: u32) -> u64 {
    ((zinv.to_bits() as u64) << 32) | color as u64
}

#[inline]
fn depth_of(cell: u64) -> f32 {
    f32::from_bits((cell >> 32) as u32)
}

#[inline]
fn color_of(cell: u64) -> u32 {
    cell as u32
}

/// A width x height grid of packed (inverse depth, color) cells.
pub struct FrameBuffer {
    cells: Vec<AtomicU64>,
    width: u32,
    height: u32,
    clear_color: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        let clear_color = colors::BLACK;
        Self {
            cells: (0..size).map(|_| AtomicU64::new(pack(0.0, clear_color))).collect(),
            width,
            height,
            clear_color,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resets every pixel to black and infinitely far.
    pub fn clear(&mut self) {
        let cleared = pack(0.0, self.clear_color);
        for cell in &mut self.cells {
            *cell.get_mut() = cleared;
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Depth-tested write.
    ///
    /// The sample survives only if `zinv` is strictly greater than the stored
    /// inverse depth. `shade` runs once, after the sample has passed the test,
    /// and its color is committed together with the new depth. Out-of-bounds
    /// coordinates are ignored.
    ///
    /// Returns whether the sample was written.
    #[inline]
    pub fn depth_test_and_set(&self, x: i32, y: i32, zinv: f32, shade: impl FnOnce() -> u32) -> bool {
        let Some(index) = self.index(x, y) else {
            return false;
        };
        let cell = &self.cells[index];

        let mut current = cell.load(Ordering::Relaxed);
        if !(zinv > depth_of(current)) {
            return false;
        }
        let packed = pack(zinv, shade());

        loop {
            match cell.compare_exchange_weak(current, packed, Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => return true,
                Err(actual) => {
                    // Someone else got there first; retry only while we are
                    // still nearer.
                    if !(zinv > depth_of(actual)) {
                        return false;
                    }
                    current = actual;
                }
            }
        }
    }

    /// Unconditional write of both depth and color.
    #[inline]
    pub fn put(&self, x: i32, y: i32, zinv: f32, color: u32) {
        if let Some(index) = self.index(x, y) {
            self.cells[index].store(pack(zinv, color), Ordering::Relaxed);
        }
    }

    /// Inverse depth at (x, y), or None if out of bounds.
    pub fn depth(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y)
            .map(|i| depth_of(self.cells[i].load(Ordering::Relaxed)))
    }

    /// Color at (x, y), or None if out of bounds.
    pub fn color(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y)
            .map(|i| color_of(self.cells[i].load(Ordering::Relaxed)))
    }

    /// Copies the color plane into `out`, row-major ARGB.
    pub fn copy_colors_into(&self, out: &mut Vec<u32>) {
        out.clear();
        out.extend(
            self.cells
                .iter()
                .map(|cell| color_of(cell.load(Ordering::Relaxed))),
        );
    }

    /// Writes the color plane as an image. The format follows the extension,
    /// falling back to BMP.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let image = RgbImage::from_fn(self.width, self.height, |x, y| {
            let color = self.color(x as i32, y as i32).unwrap_or(self.clear_color);
            Rgb(colors::to_rgb8(color))
        });
        let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Bmp);
        image.save_with_format(path, format)?;
        Ok(())
    }
}
