//! # Saorsa Carousel Demo
//!
//! Headless host for the carousel engine.
//!
//! This crate plays the part of the rendering host: it builds an item set,
//! drives the engine one frame at a time, replays a scripted list of
//! commands and writes the resulting poses to stdout.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p carousel-demo -- --items 8 --preset elastic --script "10:next,60:select=5"
//! ```
//!
//! ## With auto-rotation and JSON output:
//!
//! ```bash
//! cargo run -p carousel-demo -- --rotate --rotation-speed 0.02 --format json --every 10
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `DemoConfig` - Container, item and output settings plus the carousel configuration source
//! - `DemoApp` - Frame loop that feeds scripted commands to `CarouselEngine`

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod app;
mod script;

pub use app::{DemoApp, RunSummary};
pub use script::{parse_script, ScriptError, ScriptStep};

use std::path::PathBuf;

use carousel_core::{CarouselConfig, Orientation, Preset};
use clap::{Parser, ValueEnum};

/// How frames are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line.
    Json,
    /// Aligned text columns.
    Table,
}

/// Command-line arguments for carousel-demo.
#[derive(Debug, Clone, Parser)]
#[command(name = "carousel-demo")]
#[command(about = "Drive the Saorsa carousel engine headlessly and print item poses")]
#[command(version)]
#[allow(clippy::struct_excessive_bools)]
pub struct CliArgs {
    /// Number of items on the ring
    #[arg(long, default_value = "8")]
    pub items: usize,

    /// Item width in pixels
    #[arg(long, default_value = "120")]
    pub item_width: f64,

    /// Item height in pixels
    #[arg(long, default_value = "90")]
    pub item_height: f64,

    /// Container width in pixels
    #[arg(long, default_value = "800")]
    pub width: f64,

    /// Container height in pixels
    #[arg(long, default_value = "600")]
    pub height: f64,

    /// Number of frames to run
    #[arg(long, default_value = "120")]
    pub frames: u64,

    /// Emit every n-th frame
    #[arg(long, default_value = "1")]
    pub every: u64,

    /// Carousel configuration file (JSON)
    #[arg(long, env = "CAROUSEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Motion preset (linear, elastic, bouncy), applied over the config file
    #[arg(long, env = "CAROUSEL_PRESET")]
    pub preset: Option<Preset>,

    /// Auto-rotation speed in slots per frame
    #[arg(long)]
    pub rotation_speed: Option<f64>,

    /// Start with auto-rotation enabled
    #[arg(long)]
    pub rotate: bool,

    /// Lay the ring out vertically
    #[arg(long)]
    pub vertical: bool,

    /// Reverse the rotation whenever an item is being selected
    #[arg(long)]
    pub reverse_on_select: bool,

    /// Scripted commands, e.g. "10:next,40:reverse,60:select=3"
    #[arg(long, default_value = "")]
    pub script: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Demo run configuration.
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct DemoConfig {
    /// Number of items on the ring.
    pub items: usize,
    /// Item width in pixels.
    pub item_width: f64,
    /// Item height in pixels.
    pub item_height: f64,
    /// Container width in pixels.
    pub width: f64,
    /// Container height in pixels.
    pub height: f64,
    /// Number of frames to run.
    pub frames: u64,
    /// Emit every n-th frame (0 is treated as 1).
    pub every: u64,
    /// Optional configuration file.
    pub config_path: Option<PathBuf>,
    /// Optional preset applied over the file.
    pub preset: Option<Preset>,
    /// Optional rotation speed override.
    pub rotation_speed: Option<f64>,
    /// Enable auto-rotation before the first frame.
    pub rotate: bool,
    /// Use vertical orientation.
    pub vertical: bool,
    /// Reverse rotation on every Selecting notification.
    pub reverse_on_select: bool,
    /// Raw command script.
    pub script: String,
    /// Output format.
    pub format: OutputFormat,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoConfig {
    /// Create a new demo configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: 8,
            item_width: 120.0,
            item_height: 90.0,
            width: 800.0,
            height: 600.0,
            frames: 120,
            every: 1,
            config_path: None,
            preset: None,
            rotation_speed: None,
            rotate: false,
            vertical: false,
            reverse_on_select: false,
            script: String::new(),
            format: OutputFormat::Table,
        }
    }

    /// Resolve the carousel configuration: file, then preset, then flags.
    ///
    /// Without a file or preset the linear preset is used so the demo
    /// animates out of the box.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn carousel_config(&self) -> anyhow::Result<CarouselConfig> {
        let mut config = match &self.config_path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|e| {
                    anyhow::anyhow!("Failed to read config {}: {e}", path.display())
                })?;
                CarouselConfig::from_json(&json)?
            }
            None => CarouselConfig::preset(self.preset.unwrap_or(Preset::Linear)),
        };
        if let (Some(preset), Some(_)) = (self.preset, &self.config_path) {
            config = config.with_preset(preset);
        }
        if let Some(speed) = self.rotation_speed {
            config.rotation_speed = speed;
        }
        if self.vertical {
            config.orientation = Orientation::Vertical;
        }
        config.validate()?;
        Ok(config)
    }
}

impl From<CliArgs> for DemoConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            items: args.items,
            item_width: args.item_width,
            item_height: args.item_height,
            width: args.width,
            height: args.height,
            frames: args.frames,
            every: args.every,
            config_path: args.config,
            preset: args.preset,
            rotation_speed: args.rotation_speed,
            rotate: args.rotate,
            vertical: args.vertical,
            reverse_on_select: args.reverse_on_select,
            script: args.script,
            format: args.format,
        }
    }
}
