//! Frame resize entry point.
//!
//! Scales a [`Frame`] to a target [`Resolution`] with bilinear
//! interpolation, in one of two precisions:
//!
//! - [`ScaleMode::Precise`] - `f64` positions and weights
//! - [`ScaleMode::Fast`] - 8.8 fixed point, within one code value of
//!   precise on smooth content
//!
//! # Decision Order
//!
//! Everything that can fail is checked before the output is allocated:
//!
//! 1. Resolve the target: a `0` side is derived from the source aspect
//!    ratio, both sides `0`, a side above the ceiling, or an odd width for
//!    a 4:2:2 format are rejected.
//! 2. A target equal to the source returns [`Resized::Unchanged`] holding
//!    the source frame (same buffer, no copy).
//! 3. Formats without a kernel are rejected with
//!    [`ScaleError::UnsupportedFormat`].
//! 4. The output is allocated, rendered band by band and gets a copy of the
//!    source metadata.
//!
//! # Example
//!
//! ```rust
//! use fscale_core::{Frame, PixelFormat, Resolution};
//! use fscale_ops::{resize, ScaleMode};
//!
//! let src = Frame::new_empty(PixelFormat::Uyvy422, Resolution::new(1920, 1080)).unwrap();
//! let out = resize(&src, Resolution::new(1280, 0), ScaleMode::Fast, 4).unwrap();
//! assert!(out.is_scaled());
//! assert_eq!(out.frame().resolution(), Resolution::new(1280, 720));
//! ```

use fscale_core::{Frame, PixelFormat, Resolution};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::classify::classify;
use crate::ratio::{FixedRatio, FloatRatio};
use crate::schedule;
use crate::{ScaleError, ScaleResult};

/// Largest accepted target width or height unless configured otherwise.
pub const DEFAULT_MAX_DIMENSION: u32 = 100_000;

/// Interpolation precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// Floating-point weights, rounded to nearest.
    #[default]
    Precise,
    /// 8.8 fixed-point weights.
    Fast,
}

impl ScaleMode {
    /// Maps a boolean "fast" switch to a mode.
    #[inline]
    pub const fn from_fast_flag(fast: bool) -> Self {
        if fast { Self::Fast } else { Self::Precise }
    }

    /// Returns `true` for [`ScaleMode::Fast`].
    #[inline]
    pub const fn is_fast(&self) -> bool {
        matches!(self, Self::Fast)
    }

    /// Lowercase name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Precise => "precise",
            Self::Fast => "fast",
        }
    }
}

impl std::fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ScaleMode {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "precise" | "float" => Ok(Self::Precise),
            "fast" | "fixed" => Ok(Self::Fast),
            _ => Err(ScaleError::InvalidParameter(format!(
                "unknown scale mode '{}' (expected precise or fast)",
                s
            ))),
        }
    }
}

/// Outcome of a resize.
#[derive(Debug, Clone)]
pub enum Resized {
    /// A newly allocated frame at the target resolution.
    Scaled(Frame),
    /// The target equals the source; holds the source frame unchanged.
    Unchanged(Frame),
}

impl Resized {
    /// Returns the resulting frame.
    pub fn frame(&self) -> &Frame {
        match self {
            Self::Scaled(f) | Self::Unchanged(f) => f,
        }
    }

    /// Consumes the outcome, returning the frame.
    pub fn into_frame(self) -> Frame {
        match self {
            Self::Scaled(f) | Self::Unchanged(f) => f,
        }
    }

    /// Returns `true` if a new frame was produced.
    pub fn is_scaled(&self) -> bool {
        matches!(self, Self::Scaled(_))
    }
}

/// Resolves a requested target against the source geometry.
///
/// A `0` width or height is derived from the source aspect ratio with
/// floor division, never below 1. A derived width for a 4:2:2 format is
/// rounded down to even (never below 2).
///
/// # Errors
///
/// [`ScaleError::InvalidResolution`] when both sides are 0, a side (given
/// or derived) exceeds `max_dimension`, or an explicit width breaks the
/// format's width alignment.
///
/// # Example
///
/// ```rust
/// use fscale_core::{PixelFormat, Resolution};
/// use fscale_ops::resize::{resolve_target, DEFAULT_MAX_DIMENSION};
///
/// let src = Resolution::new(1920, 1080);
/// let target = resolve_target(src, Resolution::new(0, 480), PixelFormat::Yuyv422, DEFAULT_MAX_DIMENSION);
/// assert_eq!(target.unwrap(), Resolution::new(852, 480));
/// ```
pub fn resolve_target(
    source: Resolution,
    target: Resolution,
    format: PixelFormat,
    max_dimension: u32,
) -> ScaleResult<Resolution> {
    if target.width == 0 && target.height == 0 {
        return Err(ScaleError::invalid_resolution(
            target,
            "width and height cannot both be 0",
        ));
    }
    if target.width > max_dimension || target.height > max_dimension {
        return Err(ScaleError::invalid_resolution(
            target,
            format!("dimensions above {} are not accepted", max_dimension),
        ));
    }

    let align = format.width_alignment();
    let width = if target.width == 0 {
        let derived = derive_side(source.width, target.height, source.height);
        let derived = (derived / u64::from(align) * u64::from(align)).max(u64::from(align));
        check_derived(target, derived, max_dimension)?
    } else if target.width % align != 0 {
        return Err(ScaleError::invalid_resolution(
            target,
            format!("{} requires an even width", format),
        ));
    } else {
        target.width
    };

    let height = if target.height == 0 {
        let derived = derive_side(source.height, target.width, source.width);
        check_derived(target, derived, max_dimension)?
    } else {
        target.height
    };

    Ok(Resolution::new(width, height))
}

/// `floor(side * other_target / other_source)`, at least 1.
#[inline]
fn derive_side(side: u32, other_target: u32, other_source: u32) -> u64 {
    (u64::from(side) * u64::from(other_target) / u64::from(other_source.max(1))).max(1)
}

fn check_derived(target: Resolution, derived: u64, max_dimension: u32) -> ScaleResult<u32> {
    if derived > u64::from(max_dimension) {
        return Err(ScaleError::invalid_resolution(
            target,
            format!(
                "derived dimension {} is above {}",
                derived, max_dimension
            ),
        ));
    }
    // Bounded by max_dimension above
    Ok(derived as u32)
}

/// One resize, configured builder style.
///
/// ```rust
/// use fscale_core::{Frame, PixelFormat, Resolution};
/// use fscale_ops::{ScaleMode, ScaleRequest};
///
/// let src = Frame::new_empty(PixelFormat::Rgb24, Resolution::new(64, 48)).unwrap();
/// let out = ScaleRequest::new(&src, Resolution::new(32, 24))
///     .mode(ScaleMode::Fast)
///     .workers(2)
///     .execute()
///     .unwrap();
/// assert_eq!(out.frame().width(), 32);
/// ```
#[derive(Debug, Clone)]
pub struct ScaleRequest<'a> {
    source: &'a Frame,
    target: Resolution,
    mode: ScaleMode,
    workers: usize,
    max_dimension: u32,
}

impl<'a> ScaleRequest<'a> {
    /// Creates a precise, single-worker request.
    pub fn new(source: &'a Frame, target: Resolution) -> Self {
        Self {
            source,
            target,
            mode: ScaleMode::default(),
            workers: 1,
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }

    /// Sets the interpolation precision.
    pub fn mode(mut self, mode: ScaleMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the number of row bands. 0 is treated as 1.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Sets the largest accepted target width or height.
    pub fn max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    /// Target after aspect derivation and validation.
    pub fn resolved_target(&self) -> ScaleResult<Resolution> {
        resolve_target(
            self.source.resolution(),
            self.target,
            self.source.format(),
            self.max_dimension,
        )
    }

    /// Runs the resize.
    ///
    /// # Errors
    ///
    /// - [`ScaleError::InvalidResolution`] - see [`resolve_target`]
    /// - [`ScaleError::UnsupportedFormat`] - no kernel for the source format
    /// - [`ScaleError::Frame`] - the output frame could not be allocated
    pub fn execute(self) -> ScaleResult<Resized> {
        let source = self.source;
        trace!(
            src = %source.resolution(),
            target = %self.target,
            pixel_format = %source.format(),
            mode = %self.mode,
            workers = self.workers,
            "resize"
        );

        let target = self.resolved_target()?;
        if target == source.resolution() {
            debug!(resolution = %target, "Target equals source, passing frame through");
            return Ok(Resized::Unchanged(source.clone()));
        }

        let format = source.format();
        let family = classify(format).ok_or(ScaleError::UnsupportedFormat(format))?;

        let mut dst = Frame::new_empty(format, target)?;
        match self.mode {
            ScaleMode::Precise => {
                schedule::run::<FloatRatio>(source, family, &mut dst, self.workers)
            }
            ScaleMode::Fast => schedule::run::<FixedRatio>(source, family, &mut dst, self.workers),
        }
        dst.copy_meta_from(source);

        debug!(
            from = %source.resolution(),
            to = %target,
            family = %family,
            mode = %self.mode,
            "Scaled frame"
        );
        Ok(Resized::Scaled(dst))
    }
}

/// Scales `frame` to `target`.
///
/// Shorthand for [`ScaleRequest`] with the default dimension ceiling.
pub fn resize(
    frame: &Frame,
    target: Resolution,
    mode: ScaleMode,
    workers: usize,
) -> ScaleResult<Resized> {
    ScaleRequest::new(frame, target)
        .mode(mode)
        .workers(workers)
        .execute()
}
