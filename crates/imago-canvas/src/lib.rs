//! Placeholder Drawing Surface
//!
//! RGBA pixel buffers and the fixed-size offscreen surface a decoded
//! blur-hash preview is painted into.

mod image_data;
mod surface;

pub use image_data::{ImageData, ImageDataError};
pub use surface::{PlaceholderSurface, SURFACE_SIZE};
