use crate::error::{AsciiError, Result};
use crate::face::MAX_FONT_SIZE;
use crate::luminance::LuminanceModel;
use crate::ramp::{Ramp, RampPreset};
use crate::render::RenderMode;
use serde::Deserialize;

/// Settings for one conversion
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    /// Source scale factor, clamped into (0, 1] when applied
    pub scale: f32,
    /// Font size in pixels for raster output
    pub font_size: u32,

    /// Preset ramp, ignored when `ramp_chars` is set
    pub ramp: RampPreset,
    /// Literal ramp, darkest character first
    pub ramp_chars: Option<String>,

    pub luminance: LuminanceModel,
    pub mode: RenderMode,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            scale: 1.0,
            font_size: 3,

            ramp: RampPreset::Simple,
            ramp_chars: None,

            luminance: LuminanceModel::Relative,
            mode: RenderMode::Greyscale,
        }
    }
}

impl RenderSettings {
    /// Validates the settings
    ///
    /// # Errors
    /// Returns [`AsciiError::Config`] for a non-finite scale or an
    /// out-of-range font size and [`AsciiError::EmptyRamp`] for an empty
    /// literal ramp.
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() {
            return Err(AsciiError::Config(format!(
                "scale must be a finite number, got {}",
                self.scale
            )));
        }
        if self.font_size == 0 || self.font_size > MAX_FONT_SIZE {
            return Err(AsciiError::Config(format!(
                "font_size must be between 1 and {MAX_FONT_SIZE}, got {}",
                self.font_size
            )));
        }
        self.resolved_ramp()?;
        Ok(())
    }

    /// The ramp these settings select
    ///
    /// # Errors
    /// Returns [`AsciiError::EmptyRamp`] if `ramp_chars` is an empty string.
    pub fn resolved_ramp(&self) -> Result<Ramp> {
        match &self.ramp_chars {
            Some(chars) => Ramp::new(chars),
            None => Ok(Ramp::preset(self.ramp)),
        }
    }
}
