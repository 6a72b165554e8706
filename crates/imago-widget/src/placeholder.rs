//! Placeholder Decode Seam
//!
//! The blur-hash decode routine is an external collaborator: a pure
//! function from a hash string to a fixed-size RGBA buffer. Hosts plug a
//! real decoder in behind [`BlurhashDecoder`]; decode failures are not
//! masked by the widget.

use imago_canvas::ImageDataError;
use thiserror::Error;

/// A malformed or undecodable blur-hash string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("blur-hash decode failed: {0}")]
pub struct DecodeError(pub String);

/// External blur-hash decode capability.
///
/// `decode` must return exactly `width * height * 4` RGBA bytes.
pub trait BlurhashDecoder {
    fn decode(&self, hash: &str, width: u32, height: u32) -> Result<Vec<u8>, DecodeError>;
}

impl<F> BlurhashDecoder for F
where
    F: Fn(&str, u32, u32) -> Result<Vec<u8>, DecodeError>,
{
    fn decode(&self, hash: &str, width: u32, height: u32) -> Result<Vec<u8>, DecodeError> {
        self(hash, width, height)
    }
}

/// Placeholder paint failure: either the external decode failed, or the
/// decoder returned a buffer of the wrong size.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Surface(#[from] ImageDataError),
}
