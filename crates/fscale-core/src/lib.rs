//! # fscale-core
//!
//! Core frame types for the fscale scaling stage.
//!
//! This crate provides the types every other fscale crate builds on:
//!
//! - [`Frame`] - Raw video frame: one strided byte plane plus metadata
//! - [`PixelFormat`] - Packed and 4:2:2 interleaved 8-bit layouts
//! - [`Resolution`] - Width/height pair with `WxH` parsing
//! - [`FrameMeta`] - Frame rate, color tags and free-form attributes
//!
//! ## Crate Structure
//!
//! ```text
//! fscale-core (this crate)
//!    ^
//!    |
//!    +-- fscale-ops (classifier, kernels, scheduler, stage)
//!    +-- fscale-cli (raw frame resizing tool)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use fscale_core::{Frame, PixelFormat, Resolution};
//!
//! let frame = Frame::new_empty(PixelFormat::Uyvy422, Resolution::new(1920, 1080)).unwrap();
//! assert_eq!(frame.stride(), 1920 * 2);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod format;
pub mod frame;
pub mod meta;
pub mod resolution;

pub use error::{Error, Result};
pub use format::PixelFormat;
pub use frame::Frame;
pub use meta::{ColorRange, ColorSpace, ColorTags, FrameMeta, FrameRate};
pub use resolution::Resolution;
