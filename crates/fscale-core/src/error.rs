//! Error types for fscale-core operations.
//!
//! The [`Error`] enum covers everything that can go wrong while building or
//! describing a frame: bad dimensions, a stride that cannot hold a row, a
//! buffer too short for its rows, and unparsable format or resolution names.
//!
//! # Usage
//!
//! ```rust
//! use fscale_core::{Error, Result};
//!
//! fn check_width(width: u32) -> Result<()> {
//!     if width == 0 {
//!         return Err(Error::invalid_dimensions(width, 1, "width must be > 0"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Used By
//!
//! - [`crate::frame::Frame`] - Construction, allocation and raw file I/O
//! - [`crate::format::PixelFormat`] - Name parsing
//! - `fscale-ops` - Wrapped as `ScaleError::Frame`

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing or describing frames.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid frame dimensions.
    ///
    /// Returned when width or height is zero, when a 4:2:2 frame has an odd
    /// width, or when the buffer size calculation would overflow.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Stride is too small for the given width and pixel size.
    #[error("stride {stride} is less than minimum {min_stride} for width {width}")]
    InvalidStride {
        /// Provided stride
        stride: usize,
        /// Minimum required stride
        min_stride: usize,
        /// Frame width
        width: u32,
    },

    /// Pixel buffer cannot hold every row at the given stride.
    #[error("buffer too small: expected at least {expected} bytes, got {got}")]
    BufferTooSmall {
        /// Minimum number of bytes
        expected: usize,
        /// Actual buffer length
        got: usize,
    },

    /// Pixel format name could not be parsed.
    #[error("unknown pixel format: {0}")]
    UnknownFormat(String),

    /// Resolution string could not be parsed.
    #[error("invalid resolution '{0}', expected WxH")]
    ParseResolution(String),

    /// I/O error while reading or writing raw frames.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::BufferTooSmall`] error.
    #[inline]
    pub fn buffer_too_small(expected: usize, got: usize) -> Self {
        Self::BufferTooSmall { expected, got }
    }

    /// Returns `true` if this error describes bad geometry (dimensions,
    /// stride, buffer length or an allocation that size cannot get) rather
    /// than a parse or I/O failure.
    #[inline]
    pub fn is_geometry_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. } | Self::InvalidStride { .. } | Self::BufferTooSmall { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions_message() {
        let err = Error::invalid_dimensions(0, 1080, "width must be > 0");
        let msg = err.to_string();
        assert!(msg.contains("0x1080"));
        assert!(msg.contains("width must be > 0"));
        assert!(err.is_geometry_error());
    }

    #[test]
    fn test_buffer_too_small() {
        let err = Error::buffer_too_small(4096, 100);
        assert!(err.to_string().contains("4096"));
        assert!(err.is_geometry_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such frame");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_geometry_error());
    }
}
