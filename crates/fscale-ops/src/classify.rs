//! Pixel format classification.
//!
//! Maps a [`PixelFormat`] to the interpolation kernel that can scale it.
//! The mapping is total over the format enumeration: every format either
//! has exactly one [`KernelFamily`] or is unsupported.
//!
//! | family        | formats                                         | bytes/px |
//! |---------------|-------------------------------------------------|----------|
//! | `Packed3`     | rgb24, bgr24, yuv444                            | 3        |
//! | `Packed4`     | rgba32, argb32, bgra32, abgr32, yuva4444        | 4        |
//! | `LumaFirst`   | yuyv422, yvyu422                                | 2        |
//! | `ChromaFirst` | uyvy422, vyuy422                                | 2        |
//!
//! Packed kernels never look at what a channel means, so RGB and BGR share
//! a family. Likewise the two luma-first 4:2:2 layouts only differ in
//! whether U or V comes first, which the kernel does not care about.

use fscale_core::PixelFormat;

/// Interpolation kernel family for a pixel format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelFamily {
    /// Three interleaved 8-bit channels per pixel.
    Packed3,
    /// Four interleaved 8-bit channels per pixel.
    Packed4,
    /// 4:2:2 macropixel starting with a luma byte (`Y0 C0 Y1 C1`).
    LumaFirst,
    /// 4:2:2 macropixel starting with a chroma byte (`C0 Y0 C1 Y1`).
    ChromaFirst,
}

/// Byte offsets of luma and chroma inside each 2-byte pixel slot of a
/// 4:2:2 row.
///
/// A chroma-first row is a luma-first row shifted by one byte, so both
/// layouts go through the same kernel with these offsets swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromaLayout {
    /// Offset of the luma byte within a pixel slot.
    pub luma: usize,
    /// Offset of the chroma byte within a pixel slot.
    pub chroma: usize,
}

impl KernelFamily {
    /// Bytes per pixel in the source and destination planes.
    pub const fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Packed3 => 3,
            Self::Packed4 => 4,
            Self::LumaFirst | Self::ChromaFirst => 2,
        }
    }

    /// Returns `true` for 4:2:2 families.
    pub const fn is_subsampled(&self) -> bool {
        matches!(self, Self::LumaFirst | Self::ChromaFirst)
    }

    /// Luma/chroma byte offsets for 4:2:2 families.
    pub const fn chroma_layout(&self) -> Option<ChromaLayout> {
        match self {
            Self::LumaFirst => Some(ChromaLayout { luma: 0, chroma: 1 }),
            Self::ChromaFirst => Some(ChromaLayout { luma: 1, chroma: 0 }),
            Self::Packed3 | Self::Packed4 => None,
        }
    }

    /// Short label for logs and the CLI.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Packed3 => "packed-3",
            Self::Packed4 => "packed-4",
            Self::LumaFirst => "4:2:2 luma-first",
            Self::ChromaFirst => "4:2:2 chroma-first",
        }
    }
}

impl std::fmt::Display for KernelFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Formats accepted by the scaler.
pub const SUPPORTED_FORMATS: [PixelFormat; 12] = [
    PixelFormat::Rgb24,
    PixelFormat::Bgr24,
    PixelFormat::Yuv444,
    PixelFormat::Rgba32,
    PixelFormat::Argb32,
    PixelFormat::Bgra32,
    PixelFormat::Abgr32,
    PixelFormat::Yuva4444,
    PixelFormat::Yuyv422,
    PixelFormat::Yvyu422,
    PixelFormat::Uyvy422,
    PixelFormat::Vyuy422,
];

/// Selects the kernel family for a format, or `None` if it cannot be scaled.
///
/// # Example
///
/// ```rust
/// use fscale_core::PixelFormat;
/// use fscale_ops::classify::{classify, KernelFamily};
///
/// assert_eq!(classify(PixelFormat::Bgra32), Some(KernelFamily::Packed4));
/// assert_eq!(classify(PixelFormat::Vyuy422), Some(KernelFamily::ChromaFirst));
/// assert_eq!(classify(PixelFormat::Gray8), None);
/// ```
pub const fn classify(format: PixelFormat) -> Option<KernelFamily> {
    match format {
        PixelFormat::Rgb24 | PixelFormat::Bgr24 | PixelFormat::Yuv444 => {
            Some(KernelFamily::Packed3)
        }
        PixelFormat::Rgba32
        | PixelFormat::Argb32
        | PixelFormat::Bgra32
        | PixelFormat::Abgr32
        | PixelFormat::Yuva4444 => Some(KernelFamily::Packed4),
        PixelFormat::Yuyv422 | PixelFormat::Yvyu422 => Some(KernelFamily::LumaFirst),
        PixelFormat::Uyvy422 | PixelFormat::Vyuy422 => Some(KernelFamily::ChromaFirst),
        PixelFormat::Gray8 | PixelFormat::Gray16 | PixelFormat::Rgb48 => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_formats_classify() {
        for fmt in SUPPORTED_FORMATS {
            let family = classify(fmt).expect("supported format must classify");
            assert_eq!(family.bytes_per_pixel(), fmt.bytes_per_pixel());
            assert_eq!(family.is_subsampled(), fmt.is_subsampled());
        }
    }

    #[test]
    fn test_unsupported_formats() {
        for fmt in PixelFormat::ALL {
            if !SUPPORTED_FORMATS.contains(&fmt) {
                assert_eq!(classify(fmt), None, "{} should be unsupported", fmt);
            }
        }
    }

    #[test]
    fn test_chroma_first_matches_format() {
        for fmt in SUPPORTED_FORMATS.iter().filter(|f| f.is_subsampled()) {
            let family = classify(*fmt).unwrap();
            assert_eq!(family == KernelFamily::ChromaFirst, fmt.is_chroma_first());
        }
    }

    #[test]
    fn test_chroma_layout_offsets() {
        let luma_first = KernelFamily::LumaFirst.chroma_layout().unwrap();
        let chroma_first = KernelFamily::ChromaFirst.chroma_layout().unwrap();
        assert_eq!((luma_first.luma, luma_first.chroma), (0, 1));
        assert_eq!((chroma_first.luma, chroma_first.chroma), (1, 0));
        assert!(KernelFamily::Packed3.chroma_layout().is_none());
    }
}
