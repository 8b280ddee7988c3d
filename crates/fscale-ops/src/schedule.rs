//! Row-band scheduling.
//!
//! A resize renders every destination row independently, so the output is
//! split into contiguous bands of rows and each band becomes one task. The
//! last destination row is excluded from the bands: it reads only the last
//! source row and is rendered after all bands have joined.
//!
//! ```text
//! dst rows   0 ............................ h-2 | h-1
//!            [ band 0 ][ band 1 ] .. [ band n ] | final row
//! ```
//!
//! Bands own disjoint `chunks_mut` slices of the output buffer and share the
//! source frame read-only. No row depends on another, so the output does not
//! depend on the number of bands.
//!
//! When the `parallel` feature is enabled, bands run on the rayon pool.

use fscale_core::Frame;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::classify::KernelFamily;
use crate::kernel::{scale_row, RowGeometry, SourceRows};
use crate::ratio::Ratio;

/// Half-open range `[start, end)` of destination rows rendered by one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    /// First row.
    pub start: u32,
    /// One past the last row.
    pub end: u32,
}

impl RowBand {
    /// Number of rows in the band.
    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns `true` if the band has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `row` belongs to this band.
    #[inline]
    pub fn contains(&self, row: u32) -> bool {
        (self.start..self.end).contains(&row)
    }
}

/// Splits rows `[0, dst_height - 1)` into at most `workers` contiguous bands.
///
/// Every band has `ceil(interior / workers)` rows except possibly the last,
/// so fewer bands than workers come back when the rows run out. A height
/// of 1 has no interior rows and yields no bands. A worker count of 0 is
/// treated as 1.
///
/// # Example
///
/// ```rust
/// use fscale_ops::schedule::{partition_rows, RowBand};
///
/// let bands = partition_rows(11, 3);
/// assert_eq!(bands, vec![
///     RowBand { start: 0, end: 4 },
///     RowBand { start: 4, end: 8 },
///     RowBand { start: 8, end: 10 },
/// ]);
/// ```
pub fn partition_rows(dst_height: u32, workers: usize) -> Vec<RowBand> {
    let interior = dst_height.saturating_sub(1);
    if interior == 0 {
        return Vec::new();
    }
    let workers = workers.clamp(1, interior as usize) as u32;
    let band_rows = interior.div_ceil(workers);
    (0..interior)
        .step_by(band_rows as usize)
        .map(|start| RowBand {
            start,
            end: (start + band_rows).min(interior),
        })
        .collect()
}

/// Renders all of `dst` from `src` using the kernel for `family`.
///
/// `dst` must be a freshly allocated frame of the same format with at least
/// one row; its geometry defines the target.
pub(crate) fn run<R: Ratio>(src: &Frame, family: KernelFamily, dst: &mut Frame, workers: usize) {
    let src_last = src.height() - 1;
    let dst_height = dst.height();
    let stride = dst.stride();
    let geo = RowGeometry::<R>::new(src.width(), dst.width());
    let step_y = R::step(src.height(), dst_height);

    let bands = partition_rows(dst_height, workers);
    debug!(
        family = %family,
        bands = bands.len(),
        workers,
        rows = dst_height,
        "Rendering row bands"
    );

    let render = |line: u32, out: &mut [u8]| {
        let (whole, y) = R::locate(step_y, line);
        let top = (whole as u32).min(src_last);
        let bottom = (top + 1).min(src_last);
        let rows = SourceRows {
            top: src.row(top),
            bottom: src.row(bottom),
            y,
        };
        scale_row(family, out, &rows, &geo);
    };

    let (body, last_row) = dst
        .data_mut()
        .split_at_mut(stride * (dst_height as usize - 1));

    if let Some(first) = bands.first() {
        let band_bytes = first.len() as usize * stride;
        for_each_band(body, &bands, band_bytes, |band, chunk| {
            for (line, out) in (band.start..band.end).zip(chunk.chunks_mut(stride)) {
                render(line, out);
            }
        });
    }

    // Final row: last source row on both taps, no vertical blend
    let edge = src.row(src_last);
    let rows = SourceRows {
        top: edge,
        bottom: edge,
        y: R::ZERO,
    };
    scale_row(family, last_row, &rows, &geo);
}

/// Runs `render` once per band on its slice of `body`.
#[cfg(feature = "parallel")]
fn for_each_band<F>(body: &mut [u8], bands: &[RowBand], band_bytes: usize, render: F)
where
    F: Fn(&RowBand, &mut [u8]) + Sync + Send,
{
    if bands.len() > 1 {
        body.par_chunks_mut(band_bytes)
            .zip(bands.par_iter())
            .for_each(|(chunk, band)| render(band, chunk));
    } else {
        sequential_bands(body, bands, band_bytes, render);
    }
}

/// Runs `render` once per band on its slice of `body` (single-threaded).
#[cfg(not(feature = "parallel"))]
fn for_each_band<F>(body: &mut [u8], bands: &[RowBand], band_bytes: usize, render: F)
where
    F: Fn(&RowBand, &mut [u8]),
{
    sequential_bands(body, bands, band_bytes, render);
}

fn sequential_bands<F>(body: &mut [u8], bands: &[RowBand], band_bytes: usize, render: F)
where
    F: Fn(&RowBand, &mut [u8]),
{
    for (chunk, band) in body.chunks_mut(band_bytes).zip(bands) {
        render(band, chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratio::{FixedRatio, FloatRatio};
    use fscale_core::{PixelFormat, Resolution};

    fn covered_rows(bands: &[RowBand]) -> Vec<u32> {
        bands.iter().flat_map(|b| b.start..b.end).collect()
    }

    #[test]
    fn test_partition_covers_interior_exactly() {
        for height in 1..40u32 {
            for workers in 0..12usize {
                let bands = partition_rows(height, workers);
                let rows = covered_rows(&bands);
                let expected: Vec<u32> = (0..height - 1).collect();
                assert_eq!(rows, expected, "height {} workers {}", height, workers);
                assert!(bands.len() <= workers.max(1));
                assert!(bands.iter().all(|b| !b.is_empty()));
            }
        }
    }

    #[test]
    fn test_partition_single_row_has_no_bands() {
        assert!(partition_rows(1, 8).is_empty());
        assert!(partition_rows(0, 8).is_empty());
    }

    #[test]
    fn test_partition_more_workers_than_rows() {
        let bands = partition_rows(4, 16);
        assert_eq!(bands.len(), 3);
        assert!(bands.iter().all(|b| b.len() == 1));
    }

    #[test]
    fn test_partition_band_sizes() {
        // 10 interior rows over 4 workers: ceil(10/4) = 3
        let bands = partition_rows(11, 4);
        let sizes: Vec<u32> = bands.iter().map(RowBand::len).collect();
        assert_eq!(sizes, vec![3, 3, 3, 1]);
        assert!(bands[1].contains(5));
        assert!(!bands[1].contains(6));
    }

    fn gradient(format: PixelFormat, width: u32, height: u32) -> Frame {
        let bpp = format.bytes_per_pixel();
        let row = width as usize * bpp;
        let data: Vec<u8> = (0..height as usize * row)
            .map(|i| ((i % row) * 3 + (i / row) * 17) as u8)
            .collect();
        Frame::from_packed(format, Resolution::new(width, height), data).unwrap()
    }

    fn render<R: Ratio>(src: &Frame, target: Resolution, workers: usize) -> Vec<u8> {
        let family = crate::classify::classify(src.format()).unwrap();
        let mut dst = Frame::new_empty(src.format(), target).unwrap();
        run::<R>(src, family, &mut dst, workers);
        dst.to_packed()
    }

    #[test]
    fn test_run_independent_of_workers() {
        let src = gradient(PixelFormat::Rgb24, 13, 9);
        let target = Resolution::new(21, 17);
        let single = render::<FloatRatio>(&src, target, 1);
        for workers in [2, 3, 5, 16, 64] {
            assert_eq!(render::<FloatRatio>(&src, target, workers), single);
        }
        let single = render::<FixedRatio>(&src, target, 1);
        assert_eq!(render::<FixedRatio>(&src, target, 4), single);
    }

    #[test]
    fn test_run_last_row_is_source_last_row() {
        // Same width, so the last destination row equals the last source row
        let src = gradient(PixelFormat::Bgra32, 6, 5);
        let out = render::<FloatRatio>(&src, Resolution::new(6, 9), 3);
        let row_bytes = 6 * 4;
        assert_eq!(&out[8 * row_bytes..], src.row(4));
        assert_eq!(&out[..row_bytes], src.row(0));
    }

    #[test]
    fn test_run_single_row_target() {
        let src = gradient(PixelFormat::Rgb24, 4, 6);
        let out = render::<FloatRatio>(&src, Resolution::new(4, 1), 4);
        assert_eq!(out, src.row(5));
    }
}
