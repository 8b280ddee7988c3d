//! Benchmarks for fscale.
//!
//! The benchmarks live in `benches/`; this library only holds the shared
//! frame fixtures.

use fscale_core::{Frame, PixelFormat, Resolution, Result};

/// A frame filled with a smooth diagonal pattern.
pub fn pattern_frame(format: PixelFormat, width: u32, height: u32) -> Result<Frame> {
    let row_bytes = format.row_bytes(width);
    let data: Vec<u8> = (0..height as usize)
        .flat_map(|y| (0..row_bytes).map(move |x| ((x / 3 + y) & 0xFF) as u8))
        .collect();
    Frame::from_packed(format, Resolution::new(width, height), data)
}
