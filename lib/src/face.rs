//! Sized monospaced faces used by the raster renderer
//!
//! [`BitmapFace`] needs no font file: it scales the 8×8 ASCII patterns of
//! `font8x8` to the requested size. [`OutlineFace`] rasterizes a TrueType/OpenType font
//! with anti-aliasing.

use crate::error::{AsciiError, Result};
use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::RgbImage;
use imageproc::drawing::draw_text_mut;
use std::path::Path;

/// Largest accepted font size in pixels
pub const MAX_FONT_SIZE: u32 = 512;

/// Font metrics and glyph drawing for the raster renderer
pub trait GlyphFace {
    /// Vertical distance between consecutive rows, in pixels
    fn line_height(&self) -> u32;

    /// Horizontal advance of `text`, in pixels
    fn measure(&self, text: &str) -> u32;

    /// Draw `ch` with its cell's top-left corner at `(x, y)`
    ///
    /// Parts falling outside `canvas` are clipped.
    fn draw_glyph(&self, canvas: &mut RgbImage, ch: char, x: i32, y: i32, color: image::Rgb<u8>);
}

fn check_font_size(size: u32) -> Result<()> {
    if size == 0 || size > MAX_FONT_SIZE {
        return Err(AsciiError::InvalidFontSize {
            size,
            max: MAX_FONT_SIZE,
        });
    }
    Ok(())
}

/// Built-in pixel face
///
/// Each glyph is an 8×8 pattern stretched over a cell `advance` wide and
/// `size` tall. The advance is 0.6 of the size, the usual ratio of
/// monospaced fonts, so the renderer's padding logic applies as it would to
/// a real font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFace {
    size: u32,
    advance: u32,
}

impl BitmapFace {
    /// # Errors
    /// Returns [`AsciiError::InvalidFontSize`] if `size` is 0 or above
    /// [`MAX_FONT_SIZE`].
    pub fn new(size: u32) -> Result<Self> {
        check_font_size(size)?;
        let advance = (size * 3).div_ceil(5).max(1);
        Ok(Self { size, advance })
    }

    pub fn advance(&self) -> u32 {
        self.advance
    }
}

impl GlyphFace for BitmapFace {
    fn line_height(&self) -> u32 {
        self.size
    }

    fn measure(&self, text: &str) -> u32 {
        self.advance * text.chars().count() as u32
    }

    fn draw_glyph(&self, canvas: &mut RgbImage, ch: char, x: i32, y: i32, color: image::Rgb<u8>) {
        let (width, height) = canvas.dimensions();
        for cy in 0..self.size {
            let py = y + cy as i32;
            if py < 0 || py >= height as i32 {
                continue;
            }
            let gy = cy * 8 / self.size;
            for cx in 0..self.advance {
                let px = x + cx as i32;
                if px < 0 || px >= width as i32 {
                    continue;
                }
                let gx = cx * 8 / self.advance;
                if should_draw_pixel(ch, gx, gy) {
                    canvas.put_pixel(px as u32, py as u32, color);
                }
            }
        }
    }
}

/// Whether cell `(x, y)` of the 8×8 pattern for `ch` is set
///
/// Patterns come from the `font8x8` basic table, one byte per row with bit 0
/// as the leftmost column. Characters outside U+0000..U+007F are drawn as a
/// filled block.
fn should_draw_pixel(ch: char, x: u32, y: u32) -> bool {
    match BASIC_FONTS.get(ch) {
        Some(rows) => rows[y as usize & 7] & (1 << (x & 7)) != 0,
        None => true,
    }
}

/// Anti-aliased outline font at a fixed pixel size
#[derive(Clone)]
pub struct OutlineFace {
    font: FontArc,
    scale: PxScale,
}

impl OutlineFace {
    /// Parse font data and size it to `size` pixels
    ///
    /// Fonts whose digits and capitals advance differently are accepted, but
    /// logged as not monospaced since glyph columns will drift.
    ///
    /// # Errors
    /// Returns [`AsciiError::Font`] for unreadable font data and
    /// [`AsciiError::InvalidFontSize`] for an out of range size.
    pub fn from_bytes(data: Vec<u8>, size: u32) -> Result<Self> {
        check_font_size(size)?;
        let font = FontArc::try_from_vec(data).map_err(|e| AsciiError::Font(e.to_string()))?;
        let face = Self {
            font,
            scale: PxScale::from(size as f32),
        };
        let narrow = face.measure("1");
        let wide = face.measure("M");
        if narrow != wide {
            log::warn!("font is not monospaced ('1' advances {narrow}px, 'M' advances {wide}px)");
        }
        Ok(face)
    }

    /// # Errors
    /// Returns [`AsciiError::Io`] if the file cannot be read, otherwise as
    /// [`OutlineFace::from_bytes`].
    pub fn from_file(path: impl AsRef<Path>, size: u32) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        log::debug!("loaded font {} ({} bytes)", path.as_ref().display(), data.len());
        Self::from_bytes(data, size)
    }
}

impl GlyphFace for OutlineFace {
    fn line_height(&self) -> u32 {
        let scaled = self.font.as_scaled(self.scale);
        ((scaled.height() + scaled.line_gap()).ceil() as u32).max(1)
    }

    fn measure(&self, text: &str) -> u32 {
        let scaled = self.font.as_scaled(self.scale);
        let width: f32 = text
            .chars()
            .map(|c| scaled.h_advance(scaled.glyph_id(c)))
            .sum();
        width.round() as u32
    }

    fn draw_glyph(&self, canvas: &mut RgbImage, ch: char, x: i32, y: i32, color: image::Rgb<u8>) {
        let mut buf = [0u8; 4];
        draw_text_mut(canvas, color, x, y, self.scale, &self.font, ch.encode_utf8(&mut buf));
    }
}
