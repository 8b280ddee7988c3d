//! Resize command
//!
//! Scales one raw frame file. Settings come from an optional stage config
//! file, then command-line flags on top.

use crate::ResizeArgs;
use anyhow::{Context, Result, bail};
use fscale_core::{PixelFormat, Resolution};
use fscale_ops::{ScaleConfig, ScaleStage};
use tracing::{debug, info};

pub fn run(args: ResizeArgs, verbose: u8, threads: usize) -> Result<()> {
    let format: PixelFormat = args
        .format
        .parse()
        .with_context(|| format!("Invalid --format '{}'", args.format))?;
    let size: Resolution = args
        .size
        .parse()
        .with_context(|| format!("Invalid --size '{}'", args.size))?;

    let config = build_config(&args, threads)?;
    debug!(?config, "Resize configuration");
    let stage = ScaleStage::new(config).context("Invalid scale configuration")?;

    let frame = super::load_frame(&args.input, format, size, args.stride)?;

    if verbose > 0 {
        println!(
            "Resizing {} {} -> {} ({})",
            format,
            size,
            stage.config().resolution,
            stage.config().mode()
        );
    }

    let resized = stage
        .try_process(&frame)
        .with_context(|| format!("Failed to resize {}", args.input.display()))?;
    if !resized.is_scaled() {
        info!("Target matches input, writing frame unchanged");
    }

    super::save_frame(&args.output, resized.frame())?;

    if verbose > 0 {
        println!("Done: {}", resized.frame().resolution());
    }

    Ok(())
}

/// Merges the config file (if any) with command-line flags.
fn build_config(args: &ResizeArgs, threads: usize) -> Result<ScaleConfig> {
    let mut config = match &args.config {
        Some(path) => ScaleConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        // Without a config file the precise path is the default
        None => ScaleConfig {
            fast: false,
            ..Default::default()
        },
    };

    match (&args.target, &args.config) {
        (Some(target), _) => {
            config.resolution = target
                .parse()
                .with_context(|| format!("Invalid --target '{}'", target))?;
        }
        (None, None) => bail!("Specify --target or --config"),
        (None, Some(_)) => {}
    }

    if args.fast {
        config.fast = true;
    }
    if threads > 0 {
        config.threads = threads;
    } else if args.config.is_none() {
        config.threads = rayon::current_num_threads();
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn args(input: PathBuf, output: PathBuf) -> ResizeArgs {
        ResizeArgs {
            input,
            output,
            format: "uyvy422".into(),
            size: "8x4".into(),
            stride: None,
            target: Some("4x2".into()),
            fast: false,
            config: None,
        }
    }

    #[test]
    fn test_resize_raw_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.uyvy");
        let output = dir.path().join("out.uyvy");
        std::fs::write(&input, vec![128u8; 8 * 4 * 2]).unwrap();

        run(args(input, output.clone()), 0, 2).unwrap();
        let out = std::fs::read(&output).unwrap();
        assert_eq!(out, vec![128u8; 4 * 2 * 2]);
    }

    #[test]
    fn test_resize_padded_stride() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.rgb");
        let output = dir.path().join("out.rgb");
        // 2x2 rgb24 with 2 bytes of padding per row
        std::fs::write(&input, [10u8, 10, 10, 10, 10, 10, 0, 0, 10, 10, 10, 10, 10, 10]).unwrap();

        let mut a = args(input, output.clone());
        a.format = "rgb24".into();
        a.size = "2x2".into();
        a.stride = Some(8);
        a.target = Some("3x1".into());
        run(a, 0, 1).unwrap();
        assert_eq!(std::fs::read(&output).unwrap(), vec![10u8; 9]);
    }

    #[test]
    fn test_resize_short_input_fails() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.uyvy");
        std::fs::write(&input, vec![0u8; 10]).unwrap();
        let err = run(args(input, dir.path().join("out")), 0, 1).unwrap_err();
        assert!(err.to_string().contains("does not hold"));
    }

    #[test]
    fn test_config_file_and_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stage.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "resolution: 640x360\nfast: false\nthreads: 3").unwrap();

        let mut a = args(PathBuf::from("in"), PathBuf::from("out"));
        a.target = None;
        a.config = Some(path.clone());
        let config = build_config(&a, 0).unwrap();
        assert_eq!(config.resolution, Resolution::new(640, 360));
        assert_eq!(config.threads, 3);
        assert!(!config.fast);

        a.target = Some("320x0".into());
        a.fast = true;
        let config = build_config(&a, 6).unwrap();
        assert_eq!(config.resolution, Resolution::new(320, 0));
        assert_eq!(config.threads, 6);
        assert!(config.fast);
    }

    #[test]
    fn test_missing_target_fails() {
        let mut a = args(PathBuf::from("in"), PathBuf::from("out"));
        a.target = None;
        assert!(build_config(&a, 1).is_err());
    }
}
