//! ARGB8888 color packing.
//!
//! The framebuffer stores one `u32` per pixel laid out as `0xAARRGGBB`, which
//! is what SDL's `PixelFormatEnum::ARGB8888` streaming texture expects.

use crate::math::vec3::Vec3;

pub const BLACK: u32 = 0xFF00_0000;
pub const WHITE: u32 = 0xFFFF_FFFF;

/// Pack normalized RGBA components into a `u32`.
///
/// Components are clamped to `[0, 1]` and rounded to the nearest 8-bit step.
#[inline]
pub fn pack_color(r: f32, g: f32, b: f32, a: f32) -> u32 {
    let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
    (to_byte(a) << 24) | (to_byte(r) << 16) | (to_byte(g) << 8) | to_byte(b)
}

/// Pack an opaque RGB triple.
#[inline]
pub fn pack_rgb(color: Vec3) -> u32 {
    pack_color(color.x, color.y, color.z, 1.0)
}

/// Unpack a `u32` into normalized RGB components, dropping alpha.
#[inline]
pub fn unpack_color(color: u32) -> (f32, f32, f32) {
    let channel = |shift: u32| ((color >> shift) & 0xFF) as f32 / 255.0;
    (channel(16), channel(8), channel(0))
}

/// Split a packed color into 8-bit `[r, g, b]`.
#[inline]
pub fn to_rgb8(color: u32) -> [u8; 3] {
    [(color >> 16) as u8, (color >> 8) as u8, color as u8]
}
