//! Decoded sprite sheet raster

use image::RgbaImage;
use std::path::Path;

use crate::error::{CompileError, Result};

/// The full RGBA raster of a sprite sheet.
///
/// Pixels are row-major, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetContext {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl SheetContext {
    /// Wrap an already-decoded RGBA buffer.
    ///
    /// Fails if the buffer length does not match the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(CompileError::Protocol(format!(
                "sheet raster has {} bytes, expected {} for {}x{} RGBA",
                pixels.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self { width, height, pixels })
    }

    /// Decode a PNG file into RGBA.
    pub fn load_png(path: &Path) -> Result<Self> {
        let image = image::open(path)?;
        Ok(Self::from(image.to_rgba8()))
    }

    /// Decode PNG bytes into RGBA.
    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)?;
        Ok(Self::from(image.to_rgba8()))
    }

    /// The RGBA quadruple at `(x, y)`.
    ///
    /// Callers are expected to have bounds-checked the coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]]
    }

    /// Whether a rectangle lies entirely inside the sheet.
    pub fn contains(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        x as u64 + w as u64 <= self.width as u64 && y as u64 + h as u64 <= self.height as u64
    }
}

impl From<RgbaImage> for SheetContext {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self { width, height, pixels: image.into_raw() }
    }
}

/// Read a file, attaching its path to any I/O error.
pub(crate) fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| CompileError::io(path, e))
}
