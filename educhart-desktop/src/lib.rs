//! # EduChart Desktop
//!
//! Native desktop host for EduChart using eframe + egui.
//!
//! A side panel holds the editing form; the central panel shows a live
//! raster preview of the chart, redrawn whenever the session changes.
//! Exports run on a background thread and write `EduChart-<millis>.png`
//! into the configured directory.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p educhart-desktop -- --export-dir ~/Pictures
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `DesktopConfig` - Window size, export directory and preview density
//! - `EduChartApp` - Main application implementing `eframe::App`
//! - `ChartForm` - The editing form, reporting user intent as `FormAction`s

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod app;
mod form;

pub use app::{EduChartApp, Notice};
pub use form::{ChartForm, FormAction};

use std::path::PathBuf;

use clap::Parser;

/// Window title and application id.
pub const APP_TITLE: &str = "EduChart THCS";

/// Command-line arguments for educhart-desktop.
#[derive(Debug, Clone, Parser)]
#[command(name = "educhart-desktop")]
#[command(about = "EduChart bar chart designer")]
#[command(version)]
pub struct CliArgs {
    /// Window width in pixels
    #[arg(long, default_value = "1400")]
    pub width: u32,

    /// Window height in pixels
    #[arg(long, default_value = "860")]
    pub height: u32,

    /// Directory exported PNG files are written to
    #[arg(long, env = "EDUCHART_EXPORT_DIR", default_value = ".")]
    pub export_dir: PathBuf,

    /// Pixel density of the live preview relative to the chart canvas
    #[arg(long, default_value = "0.5")]
    pub preview_scale: f32,
}

/// Desktop application configuration.
#[derive(Debug, Clone)]
pub struct DesktopConfig {
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
    /// Directory exports are written to.
    pub export_dir: PathBuf,
    /// Preview raster density.
    pub preview_scale: f32,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopConfig {
    /// Create a new desktop configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: 1400,
            height: 860,
            title: APP_TITLE.to_string(),
            export_dir: PathBuf::from("."),
            preview_scale: 0.5,
        }
    }
}

impl From<CliArgs> for DesktopConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            width: args.width,
            height: args.height,
            title: APP_TITLE.to_string(),
            export_dir: args.export_dir,
            preview_scale: args.preview_scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DesktopConfig::new();
        assert_eq!((config.width, config.height), (1400, 860));
        assert_eq!(config.title, "EduChart THCS");
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert!((config.preview_scale - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_config_from_args() {
        let args = CliArgs::try_parse_from([
            "educhart-desktop",
            "--width",
            "1024",
            "--export-dir",
            "/tmp/charts",
            "--preview-scale",
            "0.25",
        ])
        .expect("parse");
        let config = DesktopConfig::from(args);
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 860);
        assert_eq!(config.export_dir, PathBuf::from("/tmp/charts"));
        assert!((config.preview_scale - 0.25).abs() < f32::EPSILON);
    }
}
