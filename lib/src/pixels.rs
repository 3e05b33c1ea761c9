//! Pixel sampling
//!
//! Turns a raster into a row-major grid of validated RGB triples. Alpha is
//! discarded; the grid is what every later stage reads colors from.

use crate::error::{AsciiError, Result};
use image::{DynamicImage, GenericImageView, RgbImage, RgbaImage};

/// A single pixel color with every channel in `0..=255`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::from_u8(0, 0, 0);
    pub const WHITE: Rgb = Rgb::from_u8(255, 255, 255);

    /// Build a color from integer channels
    ///
    /// # Errors
    /// Returns [`AsciiError::InvalidChannel`] if any channel is outside `0..=255`.
    /// Values are never clamped.
    pub fn new(r: i32, g: i32, b: i32) -> Result<Self> {
        Ok(Self {
            r: channel("red", r)?,
            g: channel("green", g)?,
            b: channel("blue", b)?,
        })
    }

    pub const fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn r(&self) -> u8 {
        self.r
    }

    pub fn g(&self) -> u8 {
        self.g
    }

    pub fn b(&self) -> u8 {
        self.b
    }

    /// Channels scaled to `[0.0, 1.0]`
    pub fn normalized(&self) -> [f64; 3] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        ]
    }
}

fn channel(name: &'static str, value: i32) -> Result<u8> {
    u8::try_from(value).map_err(|_| AsciiError::InvalidChannel {
        channel: name,
        value,
    })
}

impl From<image::Rgb<u8>> for Rgb {
    fn from(px: image::Rgb<u8>) -> Self {
        Self::from_u8(px[0], px[1], px[2])
    }
}

impl From<image::Rgba<u8>> for Rgb {
    fn from(px: image::Rgba<u8>) -> Self {
        Self::from_u8(px[0], px[1], px[2])
    }
}

impl From<Rgb> for image::Rgb<u8> {
    fn from(c: Rgb) -> Self {
        image::Rgb([c.r, c.g, c.b])
    }
}

/// Read access to a raster: its size and the color at a coordinate
pub trait PixelSource {
    /// `(width, height)` in pixels
    fn dimensions(&self) -> (u32, u32);

    /// Color at `(x, y)`; callers stay within [`PixelSource::dimensions`]
    fn rgb_at(&self, x: u32, y: u32) -> Rgb;
}

impl PixelSource for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbaImage::dimensions(self)
    }

    fn rgb_at(&self, x: u32, y: u32) -> Rgb {
        (*self.get_pixel(x, y)).into()
    }
}

impl PixelSource for RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbImage::dimensions(self)
    }

    fn rgb_at(&self, x: u32, y: u32) -> Rgb {
        (*self.get_pixel(x, y)).into()
    }
}

impl PixelSource for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }

    fn rgb_at(&self, x: u32, y: u32) -> Rgb {
        self.get_pixel(x, y).into()
    }
}

/// Row-major grid of pixel colors, `height` rows of `width` cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    rows: Vec<Vec<Rgb>>,
}

impl PixelGrid {
    /// Build a grid from explicit rows
    ///
    /// # Errors
    /// Returns [`AsciiError::RaggedGrid`] if the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<Rgb>>) -> Result<Self> {
        let expected = rows.first().map_or(0, Vec::len);
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(AsciiError::RaggedGrid {
                row,
                expected,
                found,
            });
        }
        Ok(Self { rows })
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<Rgb>] {
        &self.rows
    }

    /// Color at `[row][col]`, `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Rgb> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }
}

/// Scan every pixel of `source` into a [`PixelGrid`]
///
/// # Arguments
/// * `source` - Raster to read, once per pixel
///
/// # Returns
/// A grid whose entry `[y][x]` holds the color read at `(x, y)`. The same
/// source always yields the same grid.
pub fn sample_pixels<S: PixelSource + ?Sized>(source: &S) -> PixelGrid {
    let (width, height) = source.dimensions();
    let rows = (0..height)
        .map(|y| (0..width).map(|x| source.rgb_at(x, y)).collect())
        .collect();
    log::debug!("sampled {width}x{height} pixel grid");
    PixelGrid { rows }
}
