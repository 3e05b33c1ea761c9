use thiserror::Error;

/// Errors produced while loading, converting or rendering an image
#[derive(Error, Debug)]
pub enum AsciiError {
    /// A color channel was outside `0..=255`
    #[error("{channel} channel must be between 0 and 255, got {value}")]
    InvalidChannel {
        /// Channel name (`red`, `green` or `blue`)
        channel: &'static str,
        /// Rejected value
        value: i32,
    },

    /// A ramp was built from an empty string
    #[error("ascii ramp must contain at least one character")]
    EmptyRamp,

    /// Rows of a grid did not all have the same length
    #[error("grid row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The image codec could not read the source
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Font data could not be parsed
    #[error("failed to load font: {0}")]
    Font(String),

    #[error("font size must be between 1 and {max}, got {size}")]
    InvalidFontSize { size: u32, max: u32 },

    /// Raster rendering needs at least one character
    #[error("cannot render an empty ascii grid")]
    EmptyGrid,

    /// Colour modes need a pixel for every character
    #[error(
        "pixel grid is {pixel_width}x{pixel_height} but ascii grid is {ascii_width}x{ascii_height}"
    )]
    DimensionMismatch {
        pixel_width: usize,
        pixel_height: usize,
        ascii_width: usize,
        ascii_height: usize,
    },

    /// Invalid settings or an unknown option name
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AsciiError>;
