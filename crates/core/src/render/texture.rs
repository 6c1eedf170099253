//! Wall texture set: four 64x64 ARGB textures indexed by wall tag.

use super::RenderError;
use super::frame::{Argb, argb};

pub const TEXTURE_SIZE: usize = 64;
pub const TEXTURE_COUNT: usize = 4;
const TEXELS_PER_TEXTURE: usize = TEXTURE_SIZE * TEXTURE_SIZE;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureSet {
    texels: Vec<Argb>,
}

impl TextureSet {
    /// Solid red, green, and blue for wall tags 1 to 3; slot 0 stays black.
    pub fn flat_colors() -> Self {
        let mut texels = vec![0; TEXTURE_COUNT * TEXELS_PER_TEXTURE];
        let colors = [argb(180, 80, 80), argb(80, 180, 80), argb(80, 80, 180)];
        for (slot, color) in colors.into_iter().enumerate() {
            let start = (slot + 1) * TEXELS_PER_TEXTURE;
            texels[start..start + TEXELS_PER_TEXTURE].fill(color);
        }
        Self { texels }
    }

    /// Accepts any texel source laid out as four consecutive row-major 64x64 textures.
    pub fn from_texels(texels: Vec<Argb>) -> Result<Self, RenderError> {
        let expected = TEXTURE_COUNT * TEXELS_PER_TEXTURE;
        if texels.len() != expected {
            return Err(RenderError::TextureShape { expected, actual: texels.len() });
        }
        Ok(Self { texels })
    }

    /// Tags outside `1..=3` fall back to texture 1.
    pub fn slot_for_tag(tag: i32) -> usize {
        if (1..=3).contains(&tag) { tag as usize } else { 1 }
    }

    pub fn texel(&self, slot: usize, x: usize, y: usize) -> Argb {
        debug_assert!(slot < TEXTURE_COUNT && x < TEXTURE_SIZE && y < TEXTURE_SIZE);
        self.texels[slot * TEXELS_PER_TEXTURE + y * TEXTURE_SIZE + x]
    }
}

impl Default for TextureSet {
    fn default() -> Self {
        Self::flat_colors()
    }
}
