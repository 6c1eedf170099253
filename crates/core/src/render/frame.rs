//! Pixel buffer the renderer writes into, and the render-resolution cap.

use super::RenderError;

/// Opaque ARGB colour, `0xAARRGGBB`.
pub type Argb = u32;

pub const fn argb(r: u8, g: u8, b: u8) -> Argb {
    0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

pub const fn halve(color: Argb) -> Argb {
    let r = ((color >> 16) & 0xFF) / 2;
    let g = ((color >> 8) & 0xFF) / 2;
    let b = (color & 0xFF) / 2;
    0xFF00_0000 | r << 16 | g << 8 | b
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<Argb>,
}

impl Frame {
    pub fn new(width: usize, height: usize) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyFrame { width, height });
        }
        let len = width
            .checked_mul(height)
            .ok_or(RenderError::Allocation { pixels: usize::MAX })?;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| RenderError::Allocation { pixels: len })?;
        pixels.resize(len, 0);
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Argb] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Argb {
        self.pixels[y * self.width + x]
    }

    pub(super) fn fill(&mut self, color: Argb) {
        self.pixels.fill(color);
    }

    pub(super) fn put(&mut self, x: usize, y: usize, color: Argb) {
        self.pixels[y * self.width + x] = color;
    }

    /// Byte order expected by RGBA8 texture uploads.
    pub fn write_rgba8(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.pixels.len() * 4);
        for &color in &self.pixels {
            let [a, r, g, b] = color.to_be_bytes();
            out.extend_from_slice(&[r, g, b, a]);
        }
    }
}

/// Internal render resolution ceiling; the host scales the frame up to the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderCap {
    pub max_width: usize,
    pub max_height: usize,
}

impl RenderCap {
    pub const DEFAULT: Self = Self { max_width: 1024, max_height: 768 };

    pub fn fit(self, window_width: usize, window_height: usize) -> (usize, usize) {
        (
            window_width.min(self.max_width).max(1),
            window_height.min(self.max_height).max(1),
        )
    }
}

impl Default for RenderCap {
    fn default() -> Self {
        Self::DEFAULT
    }
}
