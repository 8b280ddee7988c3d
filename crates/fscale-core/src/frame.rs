//! Raw video frame container.
//!
//! A [`Frame`] is a single interleaved plane of 8-bit samples described by a
//! [`PixelFormat`], a width/height, a row stride and caller-owned
//! [`FrameMeta`].
//!
//! # Memory Layout
//!
//! Rows are stored top-to-bottom. Each row occupies `stride` bytes, of which
//! the first `width * bytes_per_pixel` are pixel data and the rest is
//! padding:
//!
//! ```text
//! [px px px px .. px | pad]  <- row 0 (stride bytes)
//! [px px px px .. px | pad]  <- row 1
//! ...
//! [px px px px .. px]        <- last row (padding optional)
//! ```
//!
//! # Memory Management
//!
//! The buffer lives in an [`Arc<Vec<u8>>`]: cloning a frame is cheap and
//! shares the pixels, and [`Frame::data_mut`] copies on write when the
//! buffer is shared.
//!
//! # Usage
//!
//! ```rust
//! use fscale_core::{Frame, PixelFormat, Resolution};
//!
//! // 2x2 RGB frame with 2 bytes of padding per row
//! let data = vec![
//!     1, 2, 3, 4, 5, 6, 0, 0,
//!     7, 8, 9, 10, 11, 12, 0, 0,
//! ];
//! let frame = Frame::from_data(PixelFormat::Rgb24, Resolution::new(2, 2), 8, data).unwrap();
//! assert_eq!(frame.row(1), &[7, 8, 9, 10, 11, 12]);
//! assert_eq!(frame.to_packed().len(), 12);
//! ```

use crate::{Error, FrameMeta, PixelFormat, Resolution, Result};
use std::path::Path;
use std::sync::Arc;

/// Single-plane raw video frame.
#[derive(Clone)]
pub struct Frame {
    /// Pixel bytes (Arc for cheap cloning)
    data: Arc<Vec<u8>>,
    /// Pixel layout
    format: PixelFormat,
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Bytes per row (may include padding)
    stride: usize,
    /// Caller-owned metadata
    meta: FrameMeta,
}

/// Checks dimensions against the format and returns the packed row size.
fn validate_geometry(format: PixelFormat, res: Resolution) -> Result<usize> {
    if res.has_zero() {
        return Err(Error::invalid_dimensions(
            res.width,
            res.height,
            "width and height must be > 0",
        ));
    }
    if res.width % format.width_alignment() != 0 {
        return Err(Error::invalid_dimensions(
            res.width,
            res.height,
            format!("{} requires an even width", format),
        ));
    }
    (res.width as usize)
        .checked_mul(format.bytes_per_pixel())
        .ok_or_else(|| Error::invalid_dimensions(res.width, res.height, "row size overflows"))
}

/// Minimum buffer length for `height` rows of `row_bytes` at `stride`.
fn required_len(res: Resolution, stride: usize, row_bytes: usize) -> Result<usize> {
    stride
        .checked_mul(res.height as usize - 1)
        .and_then(|v| v.checked_add(row_bytes))
        .ok_or_else(|| Error::invalid_dimensions(res.width, res.height, "buffer size overflows"))
}

impl Frame {
    /// Allocates a zero-filled, tightly packed frame.
    ///
    /// This is the allocation entry point used by operations that produce
    /// new frames.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for zero dimensions, an odd
    /// width on a 4:2:2 format, a size that overflows `usize`, or a buffer
    /// the allocator refuses.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fscale_core::{Frame, PixelFormat, Resolution};
    ///
    /// let frame = Frame::new_empty(PixelFormat::Bgra32, Resolution::new(64, 32)).unwrap();
    /// assert_eq!(frame.stride(), 256);
    /// assert!(frame.data().iter().all(|&b| b == 0));
    /// ```
    pub fn new_empty(format: PixelFormat, resolution: Resolution) -> Result<Self> {
        let row_bytes = validate_geometry(format, resolution)?;
        let len = row_bytes
            .checked_mul(resolution.height as usize)
            .ok_or_else(|| {
                Error::invalid_dimensions(resolution.width, resolution.height, "buffer size overflows")
            })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|e| {
            Error::invalid_dimensions(
                resolution.width,
                resolution.height,
                format!("cannot allocate {} bytes: {}", len, e),
            )
        })?;
        data.resize(len, 0);
        Ok(Self {
            data: Arc::new(data),
            format,
            width: resolution.width,
            height: resolution.height,
            stride: row_bytes,
            meta: FrameMeta::default(),
        })
    }

    /// Wraps existing pixel bytes.
    ///
    /// `data` must hold at least `stride * (height - 1) + width * bpp` bytes;
    /// the last row does not need trailing padding.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] - zero or misaligned dimensions
    /// - [`Error::InvalidStride`] - stride shorter than a packed row
    /// - [`Error::BufferTooSmall`] - not enough bytes for all rows
    pub fn from_data(
        format: PixelFormat,
        resolution: Resolution,
        stride: usize,
        data: Vec<u8>,
    ) -> Result<Self> {
        let row_bytes = validate_geometry(format, resolution)?;
        if stride < row_bytes {
            return Err(Error::InvalidStride {
                stride,
                min_stride: row_bytes,
                width: resolution.width,
            });
        }
        let expected = required_len(resolution, stride, row_bytes)?;
        if data.len() < expected {
            return Err(Error::buffer_too_small(expected, data.len()));
        }
        Ok(Self {
            data: Arc::new(data),
            format,
            width: resolution.width,
            height: resolution.height,
            stride,
            meta: FrameMeta::default(),
        })
    }

    /// Wraps tightly packed pixel bytes (`stride == width * bpp`).
    pub fn from_packed(format: PixelFormat, resolution: Resolution, data: Vec<u8>) -> Result<Self> {
        Self::from_data(format, resolution, format.row_bytes(resolution.width), data)
    }

    /// Reads a raw frame file.
    ///
    /// The file holds rows at `stride` bytes apart, or tightly packed when
    /// `stride` is `None`. Trailing bytes past the last row are kept but
    /// never read.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be read, otherwise the same errors
    /// as [`Frame::from_data`].
    pub fn read_raw(
        path: impl AsRef<Path>,
        format: PixelFormat,
        resolution: Resolution,
        stride: Option<usize>,
    ) -> Result<Self> {
        let data = std::fs::read(path)?;
        let stride = stride.unwrap_or_else(|| format.row_bytes(resolution.width));
        Self::from_data(format, resolution, stride, data)
    }

    /// Writes the pixels to a file, tightly packed.
    pub fn write_packed(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_packed())?;
        Ok(())
    }

    /// Replaces the metadata, builder style.
    pub fn with_meta(mut self, meta: FrameMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Returns the frame width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the frame height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the frame dimensions.
    #[inline]
    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    /// Returns the pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the stride (bytes per row, including padding).
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the number of pixel bytes in one row (no padding).
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.format.row_bytes(self.width)
    }

    /// Returns the whole buffer, padding included.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a mutable reference to the whole buffer.
    ///
    /// If the buffer is shared with a clone, it is copied first.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Returns the pixel bytes of row `y` (no padding).
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        assert!(y < self.height, "row {} out of bounds for height {}", y, self.height);
        let start = y as usize * self.stride;
        &self.data[start..start + self.row_bytes()]
    }

    /// Iterates over the rows, top to bottom, without padding.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.height).map(move |y| self.row(y))
    }

    /// Copies the pixels into a tightly packed buffer.
    pub fn to_packed(&self) -> Vec<u8> {
        if self.stride == self.row_bytes() {
            return self.data[..self.row_bytes() * self.height as usize].to_vec();
        }
        let mut out = Vec::with_capacity(self.row_bytes() * self.height as usize);
        for row in self.rows() {
            out.extend_from_slice(row);
        }
        out
    }

    /// Returns the metadata.
    #[inline]
    pub fn meta(&self) -> &FrameMeta {
        &self.meta
    }

    /// Copies metadata from another frame, leaving pixels untouched.
    pub fn copy_meta_from(&mut self, other: &Frame) {
        self.meta = other.meta.clone();
    }

    /// Returns `true` if both frames point at the same pixel buffer.
    #[inline]
    pub fn shares_buffer(&self, other: &Frame) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("format", &self.format)
            .field("resolution", &self.resolution())
            .field("stride", &self.stride)
            .field("meta", &self.meta)
            .finish()
    }
}
