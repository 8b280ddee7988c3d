//! Scaling as a pipeline stage.
//!
//! [`ScaleStage`] wraps [`resize`](crate::resize()) with a persistent
//! [`ScaleConfig`]. The stage takes a frame and either forwards a frame or
//! drops it: per-frame failures are logged and the frame is discarded, so
//! one bad frame never stalls the pipeline.
//!
//! # Parameters
//!
//! | name         | type         | default   |
//! |--------------|--------------|-----------|
//! | `resolution` | `WxH`        | `800x600` |
//! | `fast`       | bool         | `true`    |
//! | `threads`    | integer >= 1 | `1`       |
//!
//! The same names are accepted as runtime events through
//! [`ScaleStage::handle_event`]. A `0` side in `resolution` is derived from
//! each frame's aspect ratio; the derived value is never written back.
//!
//! # Configuration File
//!
//! ```yaml
//! resolution: 1280x720
//! fast: false
//! threads: 4
//! max_dimension: 100000
//! ```

use std::path::Path;

use fscale_core::{Frame, PixelFormat, Resolution};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::classify::SUPPORTED_FORMATS;
use crate::resize::{DEFAULT_MAX_DIMENSION, Resized, ScaleMode, ScaleRequest};
use crate::{ScaleError, ScaleResult};

/// Persistent stage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaleConfig {
    /// Target resolution; one side may be 0.
    pub resolution: Resolution,
    /// Use the fixed-point path.
    pub fast: bool,
    /// Number of row bands per frame.
    pub threads: usize,
    /// Largest accepted target width or height.
    pub max_dimension: u32,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::new(800, 600),
            fast: true,
            threads: 1,
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

impl ScaleConfig {
    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> ScaleResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Loads configuration from a YAML string. Missing keys keep their
    /// defaults.
    pub fn from_yaml_str(yaml: &str) -> ScaleResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to YAML.
    pub fn to_yaml_string(&self) -> ScaleResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Checks values that do not depend on a source frame.
    pub fn validate(&self) -> ScaleResult<()> {
        if self.threads == 0 {
            return Err(ScaleError::InvalidParameter("threads must be at least 1".into()));
        }
        if self.max_dimension == 0 {
            return Err(ScaleError::InvalidParameter(
                "max_dimension must be at least 1".into(),
            ));
        }
        let res = self.resolution;
        if res.width == 0 && res.height == 0 {
            return Err(ScaleError::invalid_resolution(
                res,
                "width and height cannot both be 0",
            ));
        }
        if res.long_side() > self.max_dimension {
            return Err(ScaleError::invalid_resolution(
                res,
                format!("dimensions above {} are not accepted", self.max_dimension),
            ));
        }
        Ok(())
    }

    /// Interpolation precision selected by `fast`.
    #[inline]
    pub fn mode(&self) -> ScaleMode {
        ScaleMode::from_fast_flag(self.fast)
    }
}

/// A single named parameter change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageParam {
    /// Target resolution.
    Resolution(Resolution),
    /// Fixed-point switch.
    Fast(bool),
    /// Band count.
    Threads(usize),
}

impl StageParam {
    /// Parses a `name = value` pair.
    ///
    /// Returns `Ok(None)` for names the stage does not know.
    ///
    /// ```rust
    /// use fscale_ops::StageParam;
    ///
    /// let p = StageParam::parse("fast", "off").unwrap();
    /// assert_eq!(p, Some(StageParam::Fast(false)));
    /// assert_eq!(StageParam::parse("gain", "2").unwrap(), None);
    /// ```
    pub fn parse(name: &str, value: &str) -> ScaleResult<Option<Self>> {
        let value = value.trim();
        let param = match name {
            "resolution" => Self::Resolution(value.parse().map_err(|e| {
                ScaleError::InvalidParameter(format!("resolution: {}", e))
            })?),
            "fast" => Self::Fast(parse_bool(value).ok_or_else(|| {
                ScaleError::InvalidParameter(format!("fast: expected a boolean, got '{}'", value))
            })?),
            "threads" => Self::Threads(value.parse().map_err(|_| {
                ScaleError::InvalidParameter(format!("threads: expected an integer, got '{}'", value))
            })?),
            _ => return Ok(None),
        };
        Ok(Some(param))
    }

    /// Parameter name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Resolution(_) => "resolution",
            Self::Fast(_) => "fast",
            Self::Threads(_) => "threads",
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Bilinear scaling stage.
#[derive(Debug, Clone, Default)]
pub struct ScaleStage {
    config: ScaleConfig,
}

impl ScaleStage {
    /// Creates a stage from a validated configuration.
    pub fn new(config: ScaleConfig) -> ScaleResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Current configuration.
    pub fn config(&self) -> &ScaleConfig {
        &self.config
    }

    /// Formats this stage accepts.
    pub fn supported_formats(&self) -> &'static [PixelFormat] {
        &SUPPORTED_FORMATS
    }

    /// Applies one parameter change.
    ///
    /// The configuration is left untouched if the new value is invalid.
    pub fn apply(&mut self, param: StageParam) -> ScaleResult<()> {
        let mut next = self.config.clone();
        match param {
            StageParam::Resolution(res) => next.resolution = res,
            StageParam::Fast(fast) => next.fast = fast,
            StageParam::Threads(threads) => next.threads = threads,
        }
        next.validate()?;
        debug!(name = param.name(), value = ?param, "Stage parameter updated");
        self.config = next;
        Ok(())
    }

    /// Handles a named runtime event.
    ///
    /// Returns `Ok(false)` if the name is not a stage parameter.
    pub fn handle_event(&mut self, name: &str, value: &str) -> ScaleResult<bool> {
        match StageParam::parse(name, value)? {
            Some(param) => {
                self.apply(param)?;
                Ok(true)
            }
            None => {
                debug!(event = name, "Ignoring unknown event");
                Ok(false)
            }
        }
    }

    /// Scales one frame with the current configuration.
    pub fn try_process(&self, frame: &Frame) -> ScaleResult<Resized> {
        ScaleRequest::new(frame, self.config.resolution)
            .mode(self.config.mode())
            .workers(self.config.threads)
            .max_dimension(self.config.max_dimension)
            .execute()
    }

    /// Scales one frame, or drops it on error.
    ///
    /// A no-op resize forwards the input frame itself.
    pub fn process(&self, frame: &Frame) -> Option<Frame> {
        match self.try_process(frame) {
            Ok(resized) => Some(resized.into_frame()),
            Err(e) if e.is_recoverable() => {
                warn!(
                    error = %e,
                    pixel_format = %frame.format(),
                    resolution = %frame.resolution(),
                    "Dropping frame"
                );
                None
            }
            Err(e) => {
                error!(error = %e, "Dropping frame");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config = ScaleConfig::default();
        assert_eq!(config.resolution, Resolution::new(800, 600));
        assert!(config.fast);
        assert_eq!(config.threads, 1);
        assert_eq!(config.mode(), ScaleMode::Fast);
    }

    #[test]
    fn test_config_from_yaml_partial() {
        let config = ScaleConfig::from_yaml_str("resolution: '0x720'\nthreads: 4\n").unwrap();
        assert_eq!(config.resolution, Resolution::new(0, 720));
        assert_eq!(config.threads, 4);
        assert!(config.fast);
    }

    #[test]
    fn test_config_rejects_unknown_key() {
        assert!(ScaleConfig::from_yaml_str("scale: 2\n").is_err());
    }

    #[test]
    fn test_config_rejects_invalid_values() {
        assert!(ScaleConfig::from_yaml_str("threads: 0\n").is_err());
        assert!(ScaleConfig::from_yaml_str("resolution: 0x0\n").is_err());
        assert!(ScaleConfig::from_yaml_str("resolution: 640x480\nmax_dimension: 600\n").is_err());
        assert!(ScaleConfig::from_yaml_str("resolution: big\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "resolution: 320x240").unwrap();
        writeln!(file, "fast: false").unwrap();
        let config = ScaleConfig::from_file(file.path()).unwrap();
        assert_eq!(config.resolution, Resolution::new(320, 240));
        assert_eq!(config.mode(), ScaleMode::Precise);
    }

    #[test]
    fn test_config_yaml_roundtrip() {
        let config = ScaleConfig {
            resolution: Resolution::new(1280, 0),
            fast: false,
            threads: 3,
            max_dimension: 4096,
        };
        let yaml = config.to_yaml_string().unwrap();
        assert_eq!(ScaleConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_param_parse() {
        assert_eq!(
            StageParam::parse("resolution", "1920x1080").unwrap(),
            Some(StageParam::Resolution(Resolution::new(1920, 1080)))
        );
        assert_eq!(StageParam::parse("threads", " 8 ").unwrap(), Some(StageParam::Threads(8)));
        assert!(StageParam::parse("threads", "many").is_err());
        assert!(StageParam::parse("fast", "maybe").is_err());
    }

    #[test]
    fn test_handle_event_updates_config() {
        let mut stage = ScaleStage::default();
        assert!(stage.handle_event("resolution", "640x360").unwrap());
        assert!(stage.handle_event("fast", "false").unwrap());
        assert!(!stage.handle_event("volume", "11").unwrap());
        assert_eq!(stage.config().resolution, Resolution::new(640, 360));
        assert_eq!(stage.config().mode(), ScaleMode::Precise);
    }

    #[test]
    fn test_invalid_event_keeps_config() {
        let mut stage = ScaleStage::default();
        assert!(stage.handle_event("threads", "0").is_err());
        assert!(stage.handle_event("resolution", "0x0").is_err());
        assert_eq!(stage.config(), &ScaleConfig::default());
    }

    #[test]
    fn test_process_scales_and_forwards() {
        let stage = ScaleStage::new(ScaleConfig {
            resolution: Resolution::new(8, 0),
            ..Default::default()
        })
        .unwrap();
        let src = Frame::new_empty(PixelFormat::Yuyv422, Resolution::new(16, 8)).unwrap();
        let out = stage.process(&src).unwrap();
        assert_eq!(out.resolution(), Resolution::new(8, 4));

        let same = Frame::new_empty(PixelFormat::Yuyv422, Resolution::new(8, 4)).unwrap();
        assert!(stage.process(&same).unwrap().shares_buffer(&same));
    }

    #[test]
    fn test_process_drops_unsupported() {
        let stage = ScaleStage::default();
        let src = Frame::new_empty(PixelFormat::Gray16, Resolution::new(16, 16)).unwrap();
        assert!(stage.process(&src).is_none());
        assert!(matches!(
            stage.try_process(&src),
            Err(ScaleError::UnsupportedFormat(PixelFormat::Gray16))
        ));
    }

    #[test]
    fn test_supported_formats() {
        let stage = ScaleStage::default();
        assert_eq!(stage.supported_formats().len(), 12);
        assert!(!stage.supported_formats().contains(&PixelFormat::Rgb48));
    }
}
