//! Frame metadata.
//!
//! [`FrameMeta`] holds everything about a frame that is not pixel data:
//! frame rate, color tags, presentation timestamp and free-form string
//! attributes. Operations that derive a new frame from an existing one
//! (scaling, for example) copy the metadata verbatim.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Frame rate as a rational number of frames per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRate {
    /// Numerator
    pub num: u32,
    /// Denominator
    pub den: u32,
}

impl FrameRate {
    /// Creates a frame rate `num / den`.
    #[inline]
    pub const fn new(num: u32, den: u32) -> Self {
        Self { num, den }
    }

    /// Frames per second as a float. Returns 0 for a zero denominator.
    pub fn fps(&self) -> f64 {
        if self.den == 0 {
            0.0
        } else {
            self.num as f64 / self.den as f64
        }
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// Color matrix / primaries tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    /// Not specified by the producer.
    #[default]
    Unspecified,
    /// ITU-R BT.601
    Bt601,
    /// ITU-R BT.709
    Bt709,
    /// ITU-R BT.2020
    Bt2020,
    /// sRGB
    Srgb,
}

/// Quantization range tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRange {
    /// Not specified by the producer.
    #[default]
    Unspecified,
    /// Studio swing (16-235 luma).
    Limited,
    /// Full swing (0-255).
    Full,
}

/// Color attributes attached to a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ColorTags {
    /// Color space
    pub space: ColorSpace,
    /// Quantization range
    pub range: ColorRange,
}

/// Caller-owned frame metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameMeta {
    /// Nominal frame rate, if known.
    pub frame_rate: Option<FrameRate>,
    /// Color tags.
    pub color: ColorTags,
    /// Presentation timestamp, if known.
    pub timestamp: Option<Duration>,
    /// Free-form string attributes.
    pub attributes: BTreeMap<String, String>,
}

impl FrameMeta {
    /// Sets a string attribute, returning the previous value.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.attributes.insert(key.into(), value.into())
    }

    /// Returns a string attribute.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}
