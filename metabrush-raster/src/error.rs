use std::fmt;
use std::io;

/// Errors raised while rasterizing or writing image files.
#[derive(Debug)]
pub enum RasterError {
    /// `rasterize` was called with a non-positive resolution.
    InvalidResolution,
    /// An output file could not be written.
    Io(io::Error),
    /// The PNG encoder rejected the image.
    Png(png::EncodingError),
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidResolution => write!(f, "resolution must be positive"),
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Png(e) => write!(f, "png encoding error: {e}"),
        }
    }
}

impl std::error::Error for RasterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidResolution => None,
            Self::Io(e) => Some(e),
            Self::Png(e) => Some(e),
        }
    }
}

impl From<io::Error> for RasterError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<png::EncodingError> for RasterError {
    fn from(e: png::EncodingError) -> Self {
        Self::Png(e)
    }
}
