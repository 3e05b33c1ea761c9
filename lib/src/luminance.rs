use crate::error::AsciiError;
use crate::pixels::Rgb;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Formula used to reduce a color to a single brightness value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LuminanceModel {
    /// Relative luminance: `0.2126*R + 0.7152*G + 0.0722*B`
    #[default]
    Relative,
    /// Broadcast luma: `0.299*R + 0.587*G + 0.114*B`
    #[serde(rename = "perceived-1", alias = "perceived1")]
    Perceived1,
    /// HSP brightness: `sqrt(0.299*R² + 0.587*G² + 0.114*B²)`
    #[serde(rename = "perceived-2", alias = "perceived2")]
    Perceived2,
}

impl LuminanceModel {
    pub const ALL: [LuminanceModel; 3] = [
        LuminanceModel::Relative,
        LuminanceModel::Perceived1,
        LuminanceModel::Perceived2,
    ];

    /// Luminance of `rgb`, channels normalized by 255 first
    ///
    /// Not clamped; for valid colors the result lies in `[0.0, 1.0]`.
    pub fn luminance(self, rgb: Rgb) -> f64 {
        let [r, g, b] = rgb.normalized();
        match self {
            LuminanceModel::Relative => 0.2126 * r + 0.7152 * g + 0.0722 * b,
            LuminanceModel::Perceived1 => 0.299 * r + 0.587 * g + 0.114 * b,
            LuminanceModel::Perceived2 => {
                (0.299 * r.powi(2) + 0.587 * g.powi(2) + 0.114 * b.powi(2)).sqrt()
            }
        }
    }

    /// Short name used in output file names
    pub fn name(self) -> &'static str {
        match self {
            LuminanceModel::Relative => "relative",
            LuminanceModel::Perceived1 => "perceived_1",
            LuminanceModel::Perceived2 => "perceived_2",
        }
    }
}

impl fmt::Display for LuminanceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LuminanceModel {
    type Err = AsciiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "relative" => Ok(LuminanceModel::Relative),
            "perceived-1" | "perceived1" => Ok(LuminanceModel::Perceived1),
            "perceived-2" | "perceived2" => Ok(LuminanceModel::Perceived2),
            _ => Err(AsciiError::Config(format!(
                "unknown luminance model '{s}' (expected relative, perceived-1 or perceived-2)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_black_and_white_extremes() {
        for model in LuminanceModel::ALL {
            assert_relative_eq!(model.luminance(Rgb::BLACK), 0.0);
            assert_relative_eq!(model.luminance(Rgb::WHITE), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_relative_weights() {
        let green = Rgb::from_u8(0, 255, 0);
        assert_relative_eq!(LuminanceModel::Relative.luminance(green), 0.7152);
        let red = Rgb::from_u8(255, 0, 0);
        assert_relative_eq!(LuminanceModel::Perceived1.luminance(red), 0.299);
    }

    #[test]
    fn test_perceived2_is_root_of_weighted_squares() {
        let c = Rgb::from_u8(255, 0, 0);
        assert_relative_eq!(
            LuminanceModel::Perceived2.luminance(c),
            0.299_f64.sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_monotonic_in_each_channel() {
        let bases = [Rgb::BLACK, Rgb::from_u8(10, 200, 90), Rgb::from_u8(255, 0, 128)];
        for model in LuminanceModel::ALL {
            for base in bases {
                for channel in 0..3 {
                    let mut previous = f64::NEG_INFINITY;
                    for v in 0..=255u8 {
                        let c = match channel {
                            0 => Rgb::from_u8(v, base.g(), base.b()),
                            1 => Rgb::from_u8(base.r(), v, base.b()),
                            _ => Rgb::from_u8(base.r(), base.g(), v),
                        };
                        let lum = model.luminance(c);
                        assert!(lum >= previous, "{model} decreased on channel {channel}");
                        previous = lum;
                    }
                }
            }
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("relative".parse::<LuminanceModel>().unwrap(), LuminanceModel::Relative);
        assert_eq!("PERCEIVED_1".parse::<LuminanceModel>().unwrap(), LuminanceModel::Perceived1);
        assert_eq!("perceived2".parse::<LuminanceModel>().unwrap(), LuminanceModel::Perceived2);
        assert!("bright".parse::<LuminanceModel>().is_err());
    }
}
