use anyhow::{Context, Result};
use ascii_ramp::{LuminanceModel, RampPreset, RenderMode, RenderSettings};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::path::{Path, PathBuf};

/// Turn images into ASCII art, as text or as rendered glyph images.
#[derive(Parser, Debug)]
#[command(name = "ascii-ramp", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log level: off, error, warn, info, debug, trace. RUST_LOG takes precedence.
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LevelFilter,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the ASCII art as text (stdout unless --output is given).
    Text {
        #[command(flatten)]
        common: CommonArgs,

        /// Text file to write.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render the ASCII art into an image file.
    Image {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        font: FontArgs,

        /// Render mode: greyscale, greyscale-inverted, colour, colour-inverted-background.
        #[arg(short, long)]
        mode: Option<RenderMode>,

        /// Image file to write; the format follows the extension.
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Render every mode, luminance model and preset ramp as JPEG files.
    Batch {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        font: FontArgs,

        /// Directory receiving the images.
        #[arg(long, default_value = "output")]
        out_dir: PathBuf,

        /// Also render the inverted-background modes.
        #[arg(long, default_value_t = false)]
        include_inverted: bool,
    },
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Source image (PNG, JPEG, BMP, GIF, ...).
    pub input: PathBuf,

    /// TOML settings file; flags override its values.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Scale factor in (0, 1] applied to the source before sampling.
    #[arg(short, long)]
    pub scale: Option<f32>,

    /// Preset ramp: standard, alt, simple, custom.
    #[arg(long)]
    pub ramp: Option<RampPreset>,

    /// Literal ramp, darkest character first.
    #[arg(long, conflicts_with = "ramp")]
    pub ramp_chars: Option<String>,

    /// Luminance model: relative, perceived-1, perceived-2.
    #[arg(short, long)]
    pub luminance: Option<LuminanceModel>,
}

/// Options for raster output.
#[derive(Args, Debug, Clone)]
pub struct FontArgs {
    /// Font size in pixels.
    #[arg(short = 'f', long)]
    pub font_size: Option<u32>,

    /// Monospaced TrueType/OpenType font; the built-in bitmap face is used otherwise.
    #[arg(long)]
    pub font: Option<PathBuf>,
}

impl CommonArgs {
    /// Settings from the config file (or defaults) with flag overrides applied.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or parsed.
    pub fn settings(&self) -> Result<RenderSettings> {
        let mut settings = match &self.config {
            Some(path) => load_settings(path)?,
            None => RenderSettings::default(),
        };
        if let Some(scale) = self.scale {
            settings.scale = scale;
        }
        if let Some(ramp) = self.ramp {
            settings.ramp = ramp;
            settings.ramp_chars = None;
        }
        if let Some(chars) = &self.ramp_chars {
            settings.ramp_chars = Some(chars.clone());
        }
        if let Some(luminance) = self.luminance {
            settings.luminance = luminance;
        }
        Ok(settings)
    }
}

/// Read a TOML settings file.
///
/// # Errors
/// Returns an error if the file cannot be read or holds unknown keys or values.
pub fn load_settings(path: &Path) -> Result<RenderSettings> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}
