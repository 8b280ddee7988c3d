//! Error types for scaling operations.

use fscale_core::{PixelFormat, Resolution};
use thiserror::Error;

/// Error type for scaling operations.
#[derive(Error, Debug)]
pub enum ScaleError {
    /// Source pixel format has no interpolation kernel.
    #[error("unsupported pixel format: {0}")]
    UnsupportedFormat(PixelFormat),

    /// Target resolution is degenerate, above the ceiling, or misaligned.
    #[error("invalid target resolution {target}: {reason}")]
    InvalidResolution {
        /// Requested target
        target: Resolution,
        /// Why it was rejected
        reason: String,
    },

    /// Invalid stage parameter or configuration value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Frame construction or allocation failed.
    #[error("frame error: {0}")]
    Frame(#[from] fscale_core::Error),

    /// I/O error while loading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed.
    #[error("config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ScaleError {
    pub(crate) fn invalid_resolution(target: Resolution, reason: impl Into<String>) -> Self {
        Self::InvalidResolution {
            target,
            reason: reason.into(),
        }
    }

    /// Returns `true` for per-frame errors a pipeline handles by dropping
    /// the frame and carrying on with the next one.
    ///
    /// Frame errors count only when they describe geometry, which includes
    /// an output buffer too large to allocate.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::UnsupportedFormat(_) | Self::InvalidResolution { .. } => true,
            Self::Frame(e) => e.is_geometry_error(),
            Self::InvalidParameter(_) | Self::Io(_) | Self::Yaml(_) => false,
        }
    }
}

/// Result type for scaling operations.
pub type ScaleResult<T> = Result<T, ScaleError>;
