//! Synthetic test textures
//!
//! The post-process shader can sample an extra texture alongside the VST
//! image. When the texture is not generated on the GPU it is filled here,
//! on the CPU, as a tightly packed RGBA8 buffer.

use crate::error::{TextureError, TextureResult};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Spacing between grid lines in pixels
pub const GRID_SPACING: u32 = 32;

/// Largest accepted width or height
pub const MAX_TEXTURE_SIZE: u32 = 8192;

/// Bytes per RGBA8 pixel
const BYTES_PER_PIXEL: usize = 4;

/// Kind of synthetic texture to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TextureType {
    /// Per-pixel grayscale noise, re-rolled every frame
    #[default]
    Noise,
    /// White grid lines on a dark background
    Grid,
    /// Red along x, green along y
    Gradient,
}

/// CPU-side RGBA8 test texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestTexture {
    pub kind: TextureType,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TestTexture {
    /// Generate a texture of the given kind.
    ///
    /// `frame` seeds the noise pattern; the other kinds ignore it.
    pub fn generate(kind: TextureType, width: u32, height: u32, frame: i64) -> TextureResult<Self> {
        if width == 0 || height == 0 {
            return Err(TextureError::EmptyDimensions { width, height });
        }
        if width > MAX_TEXTURE_SIZE || height > MAX_TEXTURE_SIZE {
            return Err(TextureError::TooLarge {
                width,
                height,
                max: MAX_TEXTURE_SIZE,
            });
        }

        let mut pixels = vec![0u8; width as usize * height as usize * BYTES_PER_PIXEL];
        for (i, texel) in pixels.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
            let x = (i % width as usize) as u32;
            let y = (i / width as usize) as u32;
            let rgba = match kind {
                TextureType::Noise => {
                    let v = noise(x, y, frame);
                    [v, v, v, 255]
                }
                TextureType::Grid => grid(x, y),
                TextureType::Gradient => gradient(x, y, width, height),
            };
            texel.copy_from_slice(&rgba);
        }

        tracing::trace!(?kind, width, height, frame, "Generated test texture on CPU");

        Ok(Self {
            kind,
            width,
            height,
            pixels,
        })
    }

    /// RGBA value at `(x, y)`, if inside the texture
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + BYTES_PER_PIXEL]);
        Some(rgba)
    }

    /// Row stride in bytes
    #[must_use]
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }
}

/// Integer hash noise; stable for a given `(x, y, frame)`.
fn noise(x: u32, y: u32, frame: i64) -> u8 {
    let mut h = (x as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (y as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
        ^ (frame as u64).wrapping_mul(0x1656_67B1_9E37_79F9);
    h ^= h >> 33;
    h = h.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    h ^= h >> 33;
    (h >> 56) as u8
}

fn grid(x: u32, y: u32) -> [u8; 4] {
    if x % GRID_SPACING == 0 || y % GRID_SPACING == 0 {
        [255, 255, 255, 255]
    } else {
        [32, 32, 32, 255]
    }
}

fn gradient(x: u32, y: u32, width: u32, height: u32) -> [u8; 4] {
    let r = x * 255 / (width - 1).max(1);
    let g = y * 255 / (height - 1).max(1);
    [r as u8, g as u8, 0, 255]
}
