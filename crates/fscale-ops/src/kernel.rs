//! Bilinear row kernels.
//!
//! Each kernel produces one destination row from two adjacent source rows
//! ("top" and "bottom") and a vertical blend ratio. Row selection and the
//! split into bands live in [`crate::schedule`]; this module only walks
//! columns.
//!
//! # Packed Kernel
//!
//! For every destination column except the last:
//!
//! ```text
//! left  = floor(pixel * step_x)        right = left + 1
//! x     = pixel * step_x - left
//! out_c = tl_c (1-x)(1-y) + tr_c x(1-y) + bl_c (1-x)y + br_c xy
//! ```
//!
//! The last destination column reads only the last source column.
//!
//! # 4:2:2 Kernel
//!
//! Output is written one macropixel (two columns) at a time. Luma follows
//! the packed kernel on every other byte. Chroma lives at half horizontal
//! density: the sample for column `p` comes from the macropixel containing
//! `floor(p * step_x)` and its neighbour two columns to the right, blended
//! by the position inside that two-pixel span. Even output columns carry
//! the first chroma sample of their macropixel (U in YUYV/UYVY), odd
//! columns the second.
//!
//! The final macropixel replicates the source edge: its second luma sample
//! is the last source luma and both chroma samples come from the last
//! source macropixel.

use crate::classify::{ChromaLayout, KernelFamily};
use crate::ratio::Ratio;

/// Two source rows and the vertical weight between them.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SourceRows<'a, R: Ratio> {
    /// Pixel bytes of the upper row (no padding).
    pub top: &'a [u8],
    /// Pixel bytes of the lower row (no padding).
    pub bottom: &'a [u8],
    /// Weight of `bottom`.
    pub y: R,
}

impl<R: Ratio> SourceRows<'_, R> {
    /// Four-tap blend of byte offsets `left` and `right` in both rows.
    #[inline]
    fn blend(&self, left: usize, right: usize, x: R) -> u8 {
        R::blend(
            [self.top[left], self.top[right], self.bottom[left], self.bottom[right]],
            x,
            self.y,
        )
    }

    /// Vertical-only blend of one byte offset.
    #[inline]
    fn edge(&self, at: usize) -> u8 {
        self.blend(at, at, R::ZERO)
    }
}

/// Horizontal mapping shared by every row of one resize.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RowGeometry<R: Ratio> {
    pub src_width: usize,
    pub dst_width: usize,
    pub step_x: R::Step,
}

impl<R: Ratio> RowGeometry<R> {
    pub fn new(src_width: u32, dst_width: u32) -> Self {
        Self {
            src_width: src_width as usize,
            dst_width: dst_width as usize,
            step_x: R::step(src_width, dst_width),
        }
    }

    /// Left and right source columns plus weight for a destination column.
    #[inline]
    fn neighbours(&self, pixel: usize) -> (usize, usize, R) {
        let last = self.src_width - 1;
        let (whole, x) = R::locate(self.step_x, pixel as u32);
        // Rounding can land exactly on the last column; never read past it
        let left = whole.min(last);
        (left, (left + 1).min(last), x)
    }
}

/// Scales one row with the kernel for `family`.
///
/// `out` must hold at least `dst_width * family.bytes_per_pixel()` bytes.
#[inline]
pub(crate) fn scale_row<R: Ratio>(
    family: KernelFamily,
    out: &mut [u8],
    rows: &SourceRows<'_, R>,
    geo: &RowGeometry<R>,
) {
    match family {
        KernelFamily::Packed3 => packed_row::<R, 3>(out, rows, geo),
        KernelFamily::Packed4 => packed_row::<R, 4>(out, rows, geo),
        KernelFamily::LumaFirst | KernelFamily::ChromaFirst => {
            if let Some(layout) = family.chroma_layout() {
                subsampled_row(out, rows, geo, layout);
            }
        }
    }
}

/// Packed N-channel row.
pub(crate) fn packed_row<R: Ratio, const N: usize>(
    out: &mut [u8],
    rows: &SourceRows<'_, R>,
    geo: &RowGeometry<R>,
) {
    let dst_width = geo.dst_width;
    let out = &mut out[..dst_width * N];
    let (body, last_px) = out.split_at_mut((dst_width - 1) * N);

    for (pixel, px) in body.chunks_exact_mut(N).enumerate() {
        let (left, right, x) = geo.neighbours(pixel);
        for (c, value) in px.iter_mut().enumerate() {
            *value = rows.blend(left * N + c, right * N + c, x);
        }
    }

    let last = geo.src_width - 1;
    for (c, value) in last_px.iter_mut().enumerate() {
        *value = rows.edge(last * N + c);
    }
}

/// Interpolated luma for destination column `pixel`.
#[inline]
fn luma<R: Ratio>(
    rows: &SourceRows<'_, R>,
    geo: &RowGeometry<R>,
    layout: ChromaLayout,
    pixel: usize,
) -> u8 {
    let (left, right, x) = geo.neighbours(pixel);
    rows.blend(2 * left + layout.luma, 2 * right + layout.luma, x)
}

/// Interpolated chroma for destination column `pixel`.
///
/// `adjust` picks the first (0) or second (1) chroma sample of the source
/// macropixel.
#[inline]
fn chroma<R: Ratio>(
    rows: &SourceRows<'_, R>,
    geo: &RowGeometry<R>,
    layout: ChromaLayout,
    pixel: usize,
    adjust: usize,
) -> u8 {
    let src_width = geo.src_width;
    let (whole, frac) = R::locate(geo.step_x, pixel as u32);
    let whole = whole.min(src_width - 1);
    let base = whole & !1;
    let left = base + adjust;
    let right = if base + 2 < src_width { left + 2 } else { left };
    let x = R::pair_fraction(whole, frac);
    rows.blend(2 * left + layout.chroma, 2 * right + layout.chroma, x)
}

/// 4:2:2 row, two destination columns per iteration.
pub(crate) fn subsampled_row<R: Ratio>(
    out: &mut [u8],
    rows: &SourceRows<'_, R>,
    geo: &RowGeometry<R>,
    layout: ChromaLayout,
) {
    let dst_width = geo.dst_width;
    let out = &mut out[..dst_width * 2];
    let (body, last_mp) = out.split_at_mut((dst_width - 2) * 2);

    for (pair, mp) in body.chunks_exact_mut(4).enumerate() {
        let pixel = pair * 2;
        mp[layout.luma] = luma(rows, geo, layout, pixel);
        mp[layout.chroma] = chroma(rows, geo, layout, pixel, 0);
        mp[2 + layout.luma] = luma(rows, geo, layout, pixel + 1);
        mp[2 + layout.chroma] = chroma(rows, geo, layout, pixel + 1, 1);
    }

    let last = geo.src_width - 1;
    let last_base = geo.src_width - 2;
    last_mp[layout.luma] = luma(rows, geo, layout, dst_width - 2);
    last_mp[layout.chroma] = rows.edge(2 * last_base + layout.chroma);
    last_mp[2 + layout.luma] = rows.edge(2 * last + layout.luma);
    last_mp[2 + layout.chroma] = rows.edge(2 * (last_base + 1) + layout.chroma);
}
