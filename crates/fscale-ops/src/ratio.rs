//! Interpolation ratio arithmetic.
//!
//! The bilinear kernels are written once and parameterized by a [`Ratio`]
//! type that decides how source positions and blend weights are computed:
//!
//! - [`FloatRatio`] - `f64` positions and weights in `[0, 1)`. Used by
//!   [`ScaleMode::Precise`](crate::ScaleMode::Precise).
//! - [`FixedRatio`] - 8.8 fixed point: weights are integers in `[0, 256)`,
//!   the four-tap sum is divided by 65536. Used by
//!   [`ScaleMode::Fast`](crate::ScaleMode::Fast).
//!
//! # Coordinate Mapping
//!
//! Both use edge-to-edge mapping: destination index `0` lands on source
//! index `0` and destination index `dst - 1` lands on source index
//! `src - 1`, so the step is `(src - 1) / (dst - 1)`. A destination length
//! of 1 has no second sample to span to and gets a step of zero.
//!
//! # Precision
//!
//! The fixed-point path keeps the step as the exact fraction
//! `256 * (src - 1) / (dst - 1)` and divides once per index, so every
//! position is the floor of the exact position in 1/256 units. The error is
//! below 1/256 of a source pixel at any index and does not accumulate
//! across a row. Weights are quantized to the same grid, so on a gradient of
//! at most one code value per source pixel the two paths differ by at most
//! one code value.

/// Source position and blend weight arithmetic for the bilinear kernels.
pub trait Ratio: Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Distance between consecutive destination samples in source pixels.
    type Step: Copy + Send + Sync + std::fmt::Debug;

    /// Weight that selects the first of two samples only.
    const ZERO: Self;

    /// Edge-to-edge step for mapping `dst_len` samples onto `src_len`.
    fn step(src_len: u32, dst_len: u32) -> Self::Step;

    /// Maps a destination index to `(whole source index, fraction)`.
    fn locate(step: Self::Step, index: u32) -> (usize, Self);

    /// Fraction across a two-pixel chroma span that starts at the even
    /// pixel at or before `whole`.
    fn pair_fraction(whole: usize, frac: Self) -> Self;

    /// Bilinear blend of `[top_left, top_right, bottom_left, bottom_right]`,
    /// rounded to the nearest code value.
    fn blend(samples: [u8; 4], x: Self, y: Self) -> u8;
}

/// Floating-point ratio in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FloatRatio(pub f64);

impl Ratio for FloatRatio {
    type Step = f64;

    const ZERO: Self = FloatRatio(0.0);

    #[inline]
    fn step(src_len: u32, dst_len: u32) -> f64 {
        if dst_len <= 1 {
            return 0.0;
        }
        f64::from(src_len.saturating_sub(1)) / f64::from(dst_len - 1)
    }

    #[inline]
    fn locate(step: f64, index: u32) -> (usize, Self) {
        let pos = f64::from(index) * step;
        let whole = pos.floor();
        (whole as usize, FloatRatio(pos - whole))
    }

    #[inline]
    fn pair_fraction(whole: usize, frac: Self) -> Self {
        FloatRatio(((whole & 1) as f64 + frac.0) / 2.0)
    }

    #[inline]
    fn blend(samples: [u8; 4], x: Self, y: Self) -> u8 {
        let (x, y) = (x.0, y.0);
        let (x2, y2) = (1.0 - x, 1.0 - y);
        let v = f64::from(samples[0]) * x2 * y2
            + f64::from(samples[1]) * x * y2
            + f64::from(samples[2]) * x2 * y
            + f64::from(samples[3]) * x * y;
        // Float-to-int casts saturate, so rounding noise above 255 is safe
        v.round() as u8
    }
}

/// Edge-to-edge step of the fixed-point path: `256 * (src - 1) / (dst - 1)`
/// kept as quotient and remainder, so positions are never built from a
/// rounded step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedStep {
    quot: u64,
    rem: u64,
    den: u64,
}

impl FixedStep {
    /// Step that keeps every index on source position zero.
    pub const ZERO: Self = FixedStep { quot: 0, rem: 0, den: 1 };

    fn new(num: u64, den: u64) -> Self {
        FixedStep {
            quot: num / den,
            rem: num % den,
            den,
        }
    }

    /// Position of destination `index` in 1/256 source pixels, rounded down.
    #[inline]
    pub fn position(self, index: u32) -> u64 {
        // rem < den < 2^32, so index * rem fits in u64
        let index = u64::from(index);
        index * self.quot + index * self.rem / self.den
    }
}

/// Fixed-point ratio in 1/256 units, `[0, 256)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FixedRatio(pub u32);

impl FixedRatio {
    /// Number of fractional steps per pixel.
    pub const ONE: u32 = 256;
    const SHIFT: u32 = 8;
    const MASK: u64 = 0xFF;
}

impl Ratio for FixedRatio {
    type Step = FixedStep;

    const ZERO: Self = FixedRatio(0);

    #[inline]
    fn step(src_len: u32, dst_len: u32) -> FixedStep {
        if dst_len <= 1 {
            return FixedStep::ZERO;
        }
        FixedStep::new(
            u64::from(Self::ONE) * u64::from(src_len.saturating_sub(1)),
            u64::from(dst_len - 1),
        )
    }

    #[inline]
    fn locate(step: FixedStep, index: u32) -> (usize, Self) {
        let pos = step.position(index);
        ((pos >> Self::SHIFT) as usize, FixedRatio((pos & Self::MASK) as u32))
    }

    #[inline]
    fn pair_fraction(whole: usize, frac: Self) -> Self {
        FixedRatio((((whole & 1) as u32) * Self::ONE + frac.0) / 2)
    }

    #[inline]
    fn blend(samples: [u8; 4], x: Self, y: Self) -> u8 {
        let (x, y) = (x.0, y.0);
        let (x2, y2) = (Self::ONE - x, Self::ONE - y);
        let sum = u32::from(samples[0]) * x2 * y2
            + u32::from(samples[1]) * x * y2
            + u32::from(samples[2]) * x2 * y
            + u32::from(samples[3]) * x * y;
        // 255 * 65536 + 32768 still shifts down to 255
        ((sum + (1 << 15)) >> 16) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_float_step_edge_to_edge() {
        assert_relative_eq!(FloatRatio::step(4, 8), 3.0 / 7.0);
        assert_relative_eq!(FloatRatio::step(1920, 1280), 1919.0 / 1279.0);
        // Last destination index lands on the last source index
        let step = FloatRatio::step(100, 37);
        let pos = 36.0 * step;
        assert_relative_eq!(pos, 99.0, epsilon = 1e-9);
    }

    #[test]
    fn test_single_pixel_destination_has_zero_step() {
        assert_eq!(FloatRatio::step(640, 1), 0.0);
        assert_eq!(FixedRatio::step(640, 1), FixedStep::ZERO);
        assert_eq!(FixedRatio::locate(FixedStep::ZERO, 9), (0, FixedRatio::ZERO));
    }

    #[test]
    fn test_float_locate() {
        let (whole, frac) = FloatRatio::locate(0.75, 3);
        assert_eq!(whole, 2);
        assert_relative_eq!(frac.0, 0.25);
    }

    #[test]
    fn test_fixed_step_and_locate() {
        let step = FixedRatio::step(4, 8);
        // 5 * 768 / 7 = 548 = 2 * 256 + 36
        assert_eq!(step.position(5), 548);
        let (whole, frac) = FixedRatio::locate(step, 5);
        assert_eq!(whole, 2);
        assert_eq!(frac, FixedRatio(36));
    }

    #[test]
    fn test_fixed_last_index_lands_on_last_source() {
        for (src, dst) in [(1920u32, 3840u32), (256, 4096), (4, 8), (1080, 2161)] {
            let step = FixedRatio::step(src, dst);
            assert_eq!(
                FixedRatio::locate(step, dst - 1),
                ((src - 1) as usize, FixedRatio::ZERO),
                "{} -> {}",
                src,
                dst
            );
        }
    }

    #[test]
    fn test_fixed_position_tracks_float_on_large_upscale() {
        for (src, dst) in [(256u32, 4096u32), (1920, 3840), (720, 100_000)] {
            let fixed = FixedRatio::step(src, dst);
            let float = FloatRatio::step(src, dst);
            for index in (0..dst).step_by(7) {
                let (whole, frac) = FixedRatio::locate(fixed, index);
                let approx = whole as f64 + f64::from(frac.0) / 256.0;
                let exact = f64::from(index) * float;
                let err = exact - approx;
                assert!(
                    (-1e-6..1.0 / 256.0 + 1e-6).contains(&err),
                    "{} -> {} index {}: {}",
                    src,
                    dst,
                    index,
                    err
                );
            }
        }
    }

    #[test]
    fn test_pair_fraction() {
        // Odd whole index sits in the second half of the chroma span
        assert_relative_eq!(FloatRatio::pair_fraction(3, FloatRatio(0.5)).0, 0.75);
        assert_relative_eq!(FloatRatio::pair_fraction(4, FloatRatio(0.5)).0, 0.25);
        assert_eq!(FixedRatio::pair_fraction(3, FixedRatio(128)), FixedRatio(192));
        assert_eq!(FixedRatio::pair_fraction(4, FixedRatio(128)), FixedRatio(64));
    }

    #[test]
    fn test_blend_corners() {
        let s = [10, 20, 30, 40];
        assert_eq!(FloatRatio::blend(s, FloatRatio::ZERO, FloatRatio::ZERO), 10);
        assert_eq!(FixedRatio::blend(s, FixedRatio::ZERO, FixedRatio::ZERO), 10);
        assert_eq!(FloatRatio::blend(s, FloatRatio(0.5), FloatRatio(0.5)), 25);
        assert_eq!(FixedRatio::blend(s, FixedRatio(128), FixedRatio(128)), 25);
    }

    #[test]
    fn test_blend_stays_in_range() {
        let s = [255; 4];
        for w in [0u32, 1, 127, 128, 255] {
            assert_eq!(FixedRatio::blend(s, FixedRatio(w), FixedRatio(255 - w)), 255);
            let f = w as f64 / 256.0;
            assert_eq!(FloatRatio::blend(s, FloatRatio(f), FloatRatio(1.0 - f)), 255);
        }
    }

    #[test]
    fn test_blend_rounds_to_nearest() {
        // 0 * 0.75 + 255 * 0.25 = 63.75
        assert_eq!(FloatRatio::blend([0, 255, 0, 255], FloatRatio(0.25), FloatRatio::ZERO), 64);
        assert_eq!(FixedRatio::blend([0, 255, 0, 255], FixedRatio(64), FixedRatio::ZERO), 64);
    }
}
