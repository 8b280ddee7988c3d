//! # fscale-ops
//!
//! Bilinear scaling of raw video frames.
//!
//! Works on single-plane 8-bit frames in packed RGB/YUV layouts (3 or 4
//! bytes per pixel) and interleaved 4:2:2 YUV (YUYV, YVYU, UYVY, VYUY).
//!
//! # Modules
//!
//! - [`classify`] - Maps pixel formats to kernel families
//! - [`ratio`] - Float and 8.8 fixed-point interpolation arithmetic
//! - [`schedule`] - Splits output rows into bands, one task per band
//! - [`resize`] - Resize entry point and target resolution rules
//! - [`stage`] - Configurable pipeline stage with runtime parameters
//!
//! # Example
//!
//! ```rust
//! use fscale_core::{Frame, PixelFormat, Resolution};
//! use fscale_ops::{resize, ScaleMode};
//!
//! let src = Frame::new_empty(PixelFormat::Rgb24, Resolution::new(640, 480)).unwrap();
//! let out = resize(&src, Resolution::new(320, 240), ScaleMode::Precise, 4).unwrap();
//! assert_eq!(out.frame().resolution(), Resolution::new(320, 240));
//! ```
//!
//! ## Pipeline Stage
//!
//! ```rust
//! use fscale_core::{Frame, PixelFormat, Resolution};
//! use fscale_ops::{ScaleConfig, ScaleStage};
//!
//! let mut stage = ScaleStage::new(ScaleConfig::default()).unwrap();
//! stage.handle_event("resolution", "400x300").unwrap();
//!
//! let src = Frame::new_empty(PixelFormat::Uyvy422, Resolution::new(800, 600)).unwrap();
//! let out = stage.process(&src).expect("frame is forwarded");
//! assert_eq!(out.width(), 400);
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - render row bands on the rayon thread pool

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod kernel;
pub mod classify;
pub mod ratio;
pub mod resize;
pub mod schedule;
pub mod stage;

pub use classify::{classify, KernelFamily, SUPPORTED_FORMATS};
pub use error::{ScaleError, ScaleResult};
pub use resize::{resize, Resized, ScaleMode, ScaleRequest, DEFAULT_MAX_DIMENSION};
pub use stage::{ScaleConfig, ScaleStage, StageParam};
