//! Character ramps
//!
//! A ramp orders characters from the darkest mapping (index 0) to the
//! brightest (last index). Presets follow Paul Bourke's ASCII art ramps.

use crate::error::{AsciiError, Result};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Full 65 character ramp
pub const STANDARD: &str =
    r#"$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\|()1{}[]?-_+~i!lI;:,"^`"#;

pub const ALT: &str = "@8LF#]{}[*+=-;:,. ";

/// Ten level ramp, the default
pub const SIMPLE: &str = "@%#*+=-:. ";

pub const CUSTOM: &str = "@8&#*+=<->:. ";

/// Named ramp presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RampPreset {
    Standard,
    Alt,
    #[default]
    Simple,
    Custom,
}

impl RampPreset {
    pub const ALL: [RampPreset; 4] = [
        RampPreset::Simple,
        RampPreset::Standard,
        RampPreset::Alt,
        RampPreset::Custom,
    ];

    pub fn chars(self) -> &'static str {
        match self {
            RampPreset::Standard => STANDARD,
            RampPreset::Alt => ALT,
            RampPreset::Simple => SIMPLE,
            RampPreset::Custom => CUSTOM,
        }
    }

    /// Three letter tag used in output file names
    pub fn tag(self) -> &'static str {
        match self {
            RampPreset::Standard => "std",
            RampPreset::Alt => "alt",
            RampPreset::Simple => "smp",
            RampPreset::Custom => "cst",
        }
    }
}

impl FromStr for RampPreset {
    type Err = AsciiError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" | "std" => Ok(RampPreset::Standard),
            "alt" => Ok(RampPreset::Alt),
            "simple" | "smp" => Ok(RampPreset::Simple),
            "custom" | "cst" => Ok(RampPreset::Custom),
            _ => Err(AsciiError::Config(format!(
                "unknown ramp preset '{s}' (expected standard, alt, simple or custom)"
            ))),
        }
    }
}

/// Non-empty ordered list of characters, darkest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ramp {
    chars: Vec<char>,
}

impl Ramp {
    /// # Errors
    /// Returns [`AsciiError::EmptyRamp`] if `chars` is empty.
    pub fn new(chars: &str) -> Result<Self> {
        let chars: Vec<char> = chars.chars().collect();
        if chars.is_empty() {
            return Err(AsciiError::EmptyRamp);
        }
        Ok(Self { chars })
    }

    pub fn preset(preset: RampPreset) -> Self {
        Self {
            chars: preset.chars().chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false, a ramp holds at least one character
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Ramp index for a luminance value
    ///
    /// The luminance is clamped to `[0, 1]`, rescaled onto `[0, len - 1]` and
    /// rounded to the nearest index.
    pub fn index_for(&self, luminance: f64) -> usize {
        let high = (self.chars.len() - 1) as f64;
        let lum = if luminance.is_nan() {
            0.0
        } else {
            luminance.clamp(0.0, 1.0)
        };
        let converted = rescale(lum, 0.0, 1.0, 0.0, high).round();
        (converted.max(0.0) as usize).min(self.chars.len() - 1)
    }

    /// Character for a luminance value
    pub fn glyph_for(&self, luminance: f64) -> char {
        self.chars[self.index_for(luminance)]
    }
}

impl Default for Ramp {
    fn default() -> Self {
        Self::preset(RampPreset::Simple)
    }
}

impl From<RampPreset> for Ramp {
    fn from(preset: RampPreset) -> Self {
        Self::preset(preset)
    }
}

impl TryFrom<&str> for Ramp {
    type Error = AsciiError;

    fn try_from(chars: &str) -> Result<Self> {
        Self::new(chars)
    }
}

impl fmt::Display for Ramp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Linear map of `value` from `[in_low, in_high]` onto `[out_low, out_high]`
pub fn rescale(value: f64, in_low: f64, in_high: f64, out_low: f64, out_high: f64) -> f64 {
    (value - in_low) / (in_high - in_low) * (out_high - out_low) + out_low
}
