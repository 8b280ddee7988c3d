//! CLI command implementations

pub mod formats;
pub mod resize;

use anyhow::{Context, Result};
use fscale_core::{Frame, PixelFormat, Resolution};
use std::path::Path;

/// Load a raw frame from path
pub fn load_frame(
    path: &Path,
    format: PixelFormat,
    resolution: Resolution,
    stride: Option<usize>,
) -> Result<Frame> {
    match Frame::read_raw(path, format, resolution, stride) {
        Err(e @ fscale_core::Error::Io(_)) => {
            Err(e).with_context(|| format!("Failed to read: {}", path.display()))
        }
        other => other.with_context(|| {
            format!(
                "{} does not hold a {} {} frame",
                path.display(),
                resolution,
                format
            )
        }),
    }
}

/// Save frame pixels to path, without row padding
pub fn save_frame(path: &Path, frame: &Frame) -> Result<()> {
    frame
        .write_packed(path)
        .with_context(|| format!("Failed to write: {}", path.display()))
}
