//! Pixel formats carried by raw video frames.
//!
//! Every format here is an 8-bit-per-sample, single-plane, interleaved
//! layout. A format fixes the channel count, the byte order inside a pixel
//! and, for 4:2:2 layouts, the byte order inside a macropixel.
//!
//! # Layout Families
//!
//! ```text
//! packed-3   RGB24   [R G B][R G B]...
//! packed-4   BGRA32  [B G R A][B G R A]...
//! 4:2:2      YUYV    [Y0 U Y1 V][Y0 U Y1 V]...   (luma first)
//! 4:2:2      UYVY    [U Y0 V Y1][U Y0 V Y1]...   (chroma first)
//! ```
//!
//! A 4:2:2 macropixel carries two luma samples and one shared chroma pair,
//! so 4:2:2 frames always have an even width.
//!
//! # Usage
//!
//! ```rust
//! use fscale_core::PixelFormat;
//!
//! let fmt: PixelFormat = "uyvy422".parse().unwrap();
//! assert_eq!(fmt.bytes_per_pixel(), 2);
//! assert_eq!(fmt.byte_order(), "UYVY");
//! assert!(fmt.is_subsampled());
//! ```

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw 8-bit pixel layout of a single-plane frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    /// Packed R, G, B.
    Rgb24,
    /// Packed B, G, R.
    Bgr24,
    /// Packed Y, U, V (4:4:4 stored as packed triples).
    Yuv444,
    /// Packed R, G, B, A.
    Rgba32,
    /// Packed A, R, G, B.
    Argb32,
    /// Packed B, G, R, A.
    Bgra32,
    /// Packed A, B, G, R.
    Abgr32,
    /// Packed Y, U, V, A.
    Yuva4444,
    /// 4:2:2 macropixel Y0, U, Y1, V.
    Yuyv422,
    /// 4:2:2 macropixel Y0, V, Y1, U.
    Yvyu422,
    /// 4:2:2 macropixel U, Y0, V, Y1.
    Uyvy422,
    /// 4:2:2 macropixel V, Y0, U, Y1.
    Vyuy422,
    /// Single 8-bit luma channel.
    Gray8,
    /// Single 16-bit luma channel (native endian).
    Gray16,
    /// Packed 16-bit R, G, B (native endian).
    Rgb48,
}

impl PixelFormat {
    /// Every format known to the frame model.
    pub const ALL: [PixelFormat; 15] = [
        Self::Rgb24,
        Self::Bgr24,
        Self::Yuv444,
        Self::Rgba32,
        Self::Argb32,
        Self::Bgra32,
        Self::Abgr32,
        Self::Yuva4444,
        Self::Yuyv422,
        Self::Yvyu422,
        Self::Uyvy422,
        Self::Vyuy422,
        Self::Gray8,
        Self::Gray16,
        Self::Rgb48,
    ];

    /// Lowercase name used for parsing, configs and the CLI.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Rgb24 => "rgb24",
            Self::Bgr24 => "bgr24",
            Self::Yuv444 => "yuv444",
            Self::Rgba32 => "rgba32",
            Self::Argb32 => "argb32",
            Self::Bgra32 => "bgra32",
            Self::Abgr32 => "abgr32",
            Self::Yuva4444 => "yuva4444",
            Self::Yuyv422 => "yuyv422",
            Self::Yvyu422 => "yvyu422",
            Self::Uyvy422 => "uyvy422",
            Self::Vyuy422 => "vyuy422",
            Self::Gray8 => "gray8",
            Self::Gray16 => "gray16",
            Self::Rgb48 => "rgb48",
        }
    }

    /// Average number of bytes per pixel in the interleaved plane.
    ///
    /// For 4:2:2 layouts this is 2: a 4-byte macropixel spans two pixels.
    pub const fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Gray16 => 2,
            Self::Yuyv422 | Self::Yvyu422 | Self::Uyvy422 | Self::Vyuy422 => 2,
            Self::Rgb24 | Self::Bgr24 | Self::Yuv444 => 3,
            Self::Rgba32 | Self::Argb32 | Self::Bgra32 | Self::Abgr32 | Self::Yuva4444 => 4,
            Self::Rgb48 => 6,
        }
    }

    /// Sample order inside one pixel, or one macropixel for 4:2:2.
    pub const fn byte_order(&self) -> &'static str {
        match self {
            Self::Rgb24 => "RGB",
            Self::Bgr24 => "BGR",
            Self::Yuv444 => "YUV",
            Self::Rgba32 => "RGBA",
            Self::Argb32 => "ARGB",
            Self::Bgra32 => "BGRA",
            Self::Abgr32 => "ABGR",
            Self::Yuva4444 => "YUVA",
            Self::Yuyv422 => "YUYV",
            Self::Yvyu422 => "YVYU",
            Self::Uyvy422 => "UYVY",
            Self::Vyuy422 => "VYUY",
            Self::Gray8 | Self::Gray16 => "Y",
            Self::Rgb48 => "RRGGBB",
        }
    }

    /// Whether chroma is stored at half horizontal resolution (4:2:2).
    pub const fn is_subsampled(&self) -> bool {
        matches!(
            self,
            Self::Yuyv422 | Self::Yvyu422 | Self::Uyvy422 | Self::Vyuy422
        )
    }

    /// Whether the first byte of a 4:2:2 macropixel is a chroma sample.
    ///
    /// Always `false` for non-subsampled formats.
    pub const fn is_chroma_first(&self) -> bool {
        matches!(self, Self::Uyvy422 | Self::Vyuy422)
    }

    /// Horizontal pixel alignment required by the layout.
    #[inline]
    pub const fn width_alignment(&self) -> u32 {
        if self.is_subsampled() { 2 } else { 1 }
    }

    /// Minimum stride in bytes for a row of `width` pixels.
    #[inline]
    pub fn row_bytes(&self, width: u32) -> usize {
        width as usize * self.bytes_per_pixel()
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PixelFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|fmt| fmt.name() == lower)
            .or_else(|| match lower.as_str() {
                // Common short aliases
                "rgb" => Some(Self::Rgb24),
                "bgr" => Some(Self::Bgr24),
                "rgba" => Some(Self::Rgba32),
                "bgra" => Some(Self::Bgra32),
                "yuyv" | "yuy2" => Some(Self::Yuyv422),
                "uyvy" => Some(Self::Uyvy422),
                _ => None,
            })
            .ok_or_else(|| Error::UnknownFormat(s.to_string()))
    }
}
