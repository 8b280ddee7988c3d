//! Frame resolution.
//!
//! [`Resolution`] is a plain width/height pair. It displays and parses as
//! `WxH` and serializes the same way, so configs can say
//! `resolution: 1280x720`.
//!
//! A zero dimension is representable on purpose: scale targets use
//! `0` to mean "derive this side from the source aspect ratio". Frames
//! themselves never have a zero dimension.
//!
//! ```rust
//! use fscale_core::Resolution;
//!
//! let res: Resolution = "1920x1080".parse().unwrap();
//! assert_eq!(res, Resolution::new(1920, 1080));
//! assert_eq!(res.to_string(), "1920x1080");
//! assert_eq!(res.pixel_count(), 1920 * 1080);
//! ```

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Resolution {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Resolution {
    /// Creates a resolution.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either dimension is zero.
    #[inline]
    pub const fn has_zero(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub const fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Largest of the two dimensions.
    #[inline]
    pub const fn long_side(&self) -> u32 {
        if self.width >= self.height { self.width } else { self.height }
    }
}

impl From<(u32, u32)> for Resolution {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || Error::ParseResolution(s.to_string());
        let (w, h) = s
            .trim()
            .split_once(|c: char| c == 'x' || c == 'X')
            .ok_or_else(parse_err)?;
        let width = w.trim().parse::<u32>().map_err(|_| parse_err())?;
        let height = h.trim().parse::<u32>().map_err(|_| parse_err())?;
        Ok(Self::new(width, height))
    }
}

impl TryFrom<String> for Resolution {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Resolution> for String {
    fn from(res: Resolution) -> Self {
        res.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("800x600".parse::<Resolution>().unwrap(), Resolution::new(800, 600));
        assert_eq!(" 0X720 ".parse::<Resolution>().unwrap(), Resolution::new(0, 720));
    }

    #[test]
    fn test_parse_errors() {
        assert!("800".parse::<Resolution>().is_err());
        assert!("axb".parse::<Resolution>().is_err());
        assert!("-1x5".parse::<Resolution>().is_err());
    }

    #[test]
    fn test_has_zero() {
        assert!(Resolution::new(0, 10).has_zero());
        assert!(Resolution::new(10, 0).has_zero());
        assert!(!Resolution::new(1, 1).has_zero());
    }

    #[test]
    fn test_long_side() {
        assert_eq!(Resolution::new(1920, 1080).long_side(), 1920);
        assert_eq!(Resolution::new(720, 1280).long_side(), 1280);
    }

    #[test]
    fn test_serde_as_string() {
        let yaml = serde_yaml::to_string(&Resolution::new(1280, 720)).unwrap();
        assert_eq!(yaml.trim(), "1280x720");
        let res: Resolution = serde_yaml::from_str("640x0").unwrap();
        assert_eq!(res, Resolution::new(640, 0));
        assert!(serde_yaml::from_str::<Resolution>("wide").is_err());
    }
}
