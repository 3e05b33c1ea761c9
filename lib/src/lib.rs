//! ASCII Ramp - image to ASCII art converter
//!
//! Pixels are sampled once per image, reduced to a luminance under a chosen
//! model and mapped onto a ramp of characters. The resulting grid can be
//! written as text or drawn back into an image with a monospaced face.
//!
//! # Example
//! ```no_run
//! use ascii_ramp::{BitmapFace, Converter, LuminanceModel, Ramp, RenderMode};
//!
//! let converter = Converter::open("photo.jpg", 0.25).unwrap();
//! let ramp = Ramp::default();
//!
//! for line in ascii_ramp::render_text(&converter.ascii_grid(&ramp, LuminanceModel::Relative)) {
//!     println!("{line}");
//! }
//!
//! let face = BitmapFace::new(9).unwrap();
//! let image = converter
//!     .ascii_image(&ramp, &face, RenderMode::Colour, LuminanceModel::Perceived2)
//!     .unwrap();
//! image.save("ascii_art.png").unwrap();
//! ```

pub mod ascii;
pub mod batch;
pub mod config;
pub mod error;
pub mod face;
pub mod loader;
pub mod luminance;
pub mod pixels;
pub mod processor;
pub mod ramp;
pub mod render;

// Re-export main types for convenience
pub use ascii::{AsciiGrid, build_ascii_grid, render_text, write_text};
pub use batch::{RenderJob, render_batch};
pub use config::RenderSettings;
pub use error::{AsciiError, Result};
pub use face::{BitmapFace, GlyphFace, OutlineFace};
pub use luminance::LuminanceModel;
pub use pixels::{PixelGrid, PixelSource, Rgb};
pub use processor::{Converter, build_pixel_grid};
pub use ramp::{Ramp, RampPreset};
pub use render::{RenderMode, render_image};
