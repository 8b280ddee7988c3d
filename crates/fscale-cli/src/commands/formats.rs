//! Formats command
//!
//! Lists every pixel format with its layout and scaling kernel.

use anyhow::Result;
use fscale_core::PixelFormat;
use fscale_ops::classify;

pub fn run() -> Result<()> {
    println!("{:<10} {:<6} {:>4}  KERNEL", "FORMAT", "ORDER", "BPP");
    for format in PixelFormat::ALL {
        let kernel = classify(format).map_or("unsupported", |family| family.name());
        println!(
            "{:<10} {:<6} {:>4}  {}",
            format.name(),
            format.byte_order(),
            format.bytes_per_pixel(),
            kernel
        );
    }
    Ok(())
}
