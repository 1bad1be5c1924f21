//! Pre-rendered digit glyphs, one template GIF per hex symbol.

use std::path::Path;

use crate::error::HashquineError;
use crate::gif::{read_gif, u16_le};
use crate::HEX_DIGITS;

/// Pixel data for every symbol of the alphabet, all sharing one glyph size.
#[derive(Debug, Clone)]
pub struct GlyphSet {
    width: u16,
    height: u16,
    pixels: Vec<Vec<u8>>,
}

impl GlyphSet {
    /// Build a glyph set from raw image data segments. The toy alphabets used
    /// in tests come through here.
    pub fn new(width: u16, height: u16, pixels: Vec<Vec<u8>>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Load `char_0.gif` .. `char_f.gif` from a template directory. All
    /// sixteen glyphs must report the same dimensions in their image
    /// descriptors.
    pub fn load(dir: &Path) -> Result<Self, HashquineError> {
        let mut width = 0u16;
        let mut height = 0u16;
        let mut pixels = Vec::with_capacity(HEX_DIGITS.len());

        for &digit in HEX_DIGITS.iter() {
            let path = dir.join(format!("char_{}.gif", digit as char));
            let segments = read_gif(&path)?;
            let w = u16_le(&segments.image_descriptor, 5);
            let h = u16_le(&segments.image_descriptor, 7);
            if pixels.is_empty() {
                width = w;
                height = h;
            } else if (w, h) != (width, height) {
                return Err(HashquineError::Asset(format!(
                    "glyph '{}' is {}x{}, expected {}x{}",
                    path.display(),
                    w,
                    h,
                    width,
                    height
                )));
            }
            pixels.push(segments.image_data);
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Number of symbols in the alphabet (16 for hex, smaller in toy tests).
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Image data segment for one symbol.
    pub fn pixels(&self, symbol: usize) -> &[u8] {
        &self.pixels[symbol]
    }

    /// Find the symbol whose image data matches `data` exactly.
    pub fn match_pixels(&self, data: &[u8]) -> Option<usize> {
        self.pixels.iter().position(|p| p == data)
    }
}
