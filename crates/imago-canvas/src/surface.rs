//! Offscreen Placeholder Surface
//!
//! The fixed 32x32 surface a decoded blur-hash preview is painted into.
//! The host scales it up to cover the image box; 32x32 is plenty for a
//! blurred preview.

use crate::{ImageData, ImageDataError};

/// Placeholder surface edge length in pixels.
pub const SURFACE_SIZE: u32 = 32;

/// A fixed-size offscreen surface holding the decoded placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSurface {
    pixels: ImageData,
    painted: bool,
}

impl Default for PlaceholderSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaceholderSurface {
    /// Create an unpainted surface.
    pub fn new() -> Self {
        Self {
            pixels: ImageData::new(SURFACE_SIZE, SURFACE_SIZE),
            painted: false,
        }
    }

    /// Paint a decoded RGBA buffer onto the surface.
    ///
    /// The buffer must be exactly `SURFACE_SIZE * SURFACE_SIZE * 4` bytes.
    pub fn put_pixels(&mut self, rgba: &[u8]) -> Result<(), ImageDataError> {
        let expected = ImageData::byte_len(SURFACE_SIZE, SURFACE_SIZE);
        if rgba.len() != expected {
            return Err(ImageDataError::InvalidDataLength { expected, actual: rgba.len() });
        }
        self.pixels.data_mut().copy_from_slice(rgba);
        self.painted = true;
        Ok(())
    }

    /// True once a preview has been painted.
    pub fn is_painted(&self) -> bool {
        self.painted
    }

    /// The surface contents.
    pub fn image_data(&self) -> &ImageData {
        &self.pixels
    }

    /// Reset to the unpainted state.
    pub fn clear(&mut self) {
        self.pixels.fill([0; 4]);
        self.painted = false;
    }
}
