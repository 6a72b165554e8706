//! Pixel Buffers
//!
//! Raw RGBA8 pixel data, 4 bytes per pixel in row-major order.

use thiserror::Error;

/// Pixel buffer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageDataError {
    #[error("invalid pixel data length: expected {expected}, got {actual}")]
    InvalidDataLength { expected: usize, actual: usize },
}

/// An RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl ImageData {
    /// Create a transparent-black buffer of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0; Self::byte_len(width, height)],
            width,
            height,
        }
    }

    /// Wrap an existing RGBA byte vector. The length must be exactly
    /// `width * height * 4`.
    pub fn from_data(data: Vec<u8>, width: u32, height: u32) -> Result<Self, ImageDataError> {
        let expected = Self::byte_len(width, height);
        if data.len() != expected {
            return Err(ImageDataError::InvalidDataLength { expected, actual: data.len() });
        }
        Ok(Self { data, width, height })
    }

    /// Expected byte length for a buffer of the given dimensions.
    pub fn byte_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * 4
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw bytes, row-major RGBA.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Pixel at (x, y) as `[r, g, b, a]`; `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let idx = self.index(x, y)?;
        let px = &self.data[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Overwrite the pixel at (x, y); out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if let Some(idx) = self.index(x, y) {
            self.data[idx..idx + 4].copy_from_slice(&rgba);
        }
    }

    /// Fill the whole buffer with one color.
    pub fn fill(&mut self, rgba: [u8; 4]) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(((y * self.width + x) * 4) as usize)
    }
}
