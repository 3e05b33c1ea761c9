use crate::ascii::AsciiGrid;
use crate::error::{AsciiError, Result};
use crate::face::GlyphFace;
use crate::pixels::{PixelGrid, Rgb};
use image::RgbImage;
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Background and glyph color policy for raster output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// Black glyphs on white
    #[default]
    Greyscale,
    /// White glyphs on black
    GreyscaleInverted,
    /// Glyphs in their source pixel's color on white
    Colour,
    /// Glyphs in their source pixel's color on black
    ColourInvertedBackground,
}

impl RenderMode {
    pub const ALL: [RenderMode; 4] = [
        RenderMode::Greyscale,
        RenderMode::GreyscaleInverted,
        RenderMode::Colour,
        RenderMode::ColourInvertedBackground,
    ];

    pub fn background(self) -> Rgb {
        match self {
            RenderMode::GreyscaleInverted | RenderMode::ColourInvertedBackground => Rgb::BLACK,
            RenderMode::Greyscale | RenderMode::Colour => Rgb::WHITE,
        }
    }

    /// Glyph color when it is not taken from the source pixel
    pub fn default_foreground(self) -> Rgb {
        match self {
            RenderMode::GreyscaleInverted => Rgb::WHITE,
            RenderMode::Greyscale | RenderMode::Colour | RenderMode::ColourInvertedBackground => {
                Rgb::BLACK
            }
        }
    }

    /// Whether glyphs take their color from the pixel grid
    pub fn is_colour(self) -> bool {
        matches!(
            self,
            RenderMode::Colour | RenderMode::ColourInvertedBackground
        )
    }

    pub fn is_inverted(self) -> bool {
        matches!(
            self,
            RenderMode::GreyscaleInverted | RenderMode::ColourInvertedBackground
        )
    }

    /// Short name used in output file names
    pub fn name(self) -> &'static str {
        match self {
            RenderMode::Greyscale => "greyscale",
            RenderMode::GreyscaleInverted => "greyscale_inverted",
            RenderMode::Colour => "colour",
            RenderMode::ColourInvertedBackground => "colour_inverted_background",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RenderMode {
    type Err = AsciiError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "greyscale" | "grayscale" => Ok(RenderMode::Greyscale),
            "greyscale-inverted" | "grayscale-inverted" => Ok(RenderMode::GreyscaleInverted),
            "colour" | "color" => Ok(RenderMode::Colour),
            "colour-inverted-background" | "color-inverted-background" => {
                Ok(RenderMode::ColourInvertedBackground)
            }
            _ => Err(AsciiError::Config(format!(
                "unknown render mode '{s}' (expected greyscale, greyscale-inverted, \
                 colour or colour-inverted-background)"
            ))),
        }
    }
}

/// Canvas geometry derived from face metrics and grid shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasLayout {
    /// Advance of a single character
    pub advance: u32,
    /// Extra horizontal space after each character so cells come out square
    pub pad: u32,
    pub line_height: u32,
    pub width: u32,
    pub height: u32,
}

impl CanvasLayout {
    /// Measure the canvas for `grid`
    ///
    /// # Arguments
    /// * `grid` - Characters to lay out
    /// * `face` - Sized face providing the advance and line height
    ///
    /// # Returns
    /// The layout, its width taken from the first row (measured text width
    /// plus one pad per character) and its height one line per row
    pub fn measure<F: GlyphFace + ?Sized>(grid: &AsciiGrid, face: &F) -> Self {
        let advance = face.measure("1");
        let line_height = face.line_height();
        let pad = line_height.saturating_sub(advance);
        let first: String = grid.rows().first().map(|r| r.iter().collect()).unwrap_or_default();
        let width = face.measure(&first) + pad * first.chars().count() as u32;
        let height = line_height * grid.height() as u32;
        Self {
            advance,
            pad,
            line_height,
            width,
            height,
        }
    }
}

/// Draw `ascii` onto a new canvas
///
/// # Arguments
/// * `ascii` - Characters to draw
/// * `pixels` - Source colors, read only by colour modes at the same `[row][col]`
/// * `face` - Sized face used for every glyph
/// * `mode` - Background and foreground selection
///
/// # Returns
/// A canvas sized by [`CanvasLayout::measure`], background filled for `mode`,
/// glyphs drawn left to right and top to bottom with each row starting at
/// column 0
///
/// # Errors
/// Returns [`AsciiError::EmptyGrid`] if there is nothing to draw and
/// [`AsciiError::DimensionMismatch`] if a colour mode gets a pixel grid of a
/// different shape.
pub fn render_image<F: GlyphFace + ?Sized>(
    ascii: &AsciiGrid,
    pixels: &PixelGrid,
    face: &F,
    mode: RenderMode,
) -> Result<RgbImage> {
    if ascii.is_empty() {
        return Err(AsciiError::EmptyGrid);
    }
    if mode.is_colour()
        && (pixels.width() != ascii.width() || pixels.height() != ascii.height())
    {
        return Err(AsciiError::DimensionMismatch {
            pixel_width: pixels.width(),
            pixel_height: pixels.height(),
            ascii_width: ascii.width(),
            ascii_height: ascii.height(),
        });
    }

    let layout = CanvasLayout::measure(ascii, face);
    let (width, height) = (layout.width.max(1), layout.height.max(1));
    log::debug!(
        "rendering {}x{} grid to {width}x{height} canvas ({mode}, pad {})",
        ascii.width(),
        ascii.height(),
        layout.pad
    );

    let mut canvas = RgbImage::new(width, height);
    draw_filled_rect_mut(
        &mut canvas,
        Rect::at(0, 0).of_size(width, height),
        mode.background().into(),
    );

    let fg = mode.default_foreground();
    let step = (layout.advance + layout.pad) as i32;
    let mut y = 0i32;
    for (row_idx, row) in ascii.rows().iter().enumerate() {
        let mut x = 0i32;
        for (col, &ch) in row.iter().enumerate() {
            let color = if mode.is_colour() {
                pixels.get(row_idx, col).unwrap_or(fg)
            } else {
                fg
            };
            face.draw_glyph(&mut canvas, ch, x, y, color.into());
            x += step;
        }
        y += layout.line_height as i32;
    }

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::BitmapFace;

    fn grid(rows: &[&str]) -> AsciiGrid {
        AsciiGrid::from_rows(rows.iter().map(|r| r.chars().collect()).collect()).unwrap()
    }

    fn pixels(width: usize, height: usize, color: Rgb) -> PixelGrid {
        PixelGrid::from_rows(vec![vec![color; width]; height]).unwrap()
    }

    #[test]
    fn test_mode_colors() {
        assert_eq!(RenderMode::Greyscale.background(), Rgb::WHITE);
        assert_eq!(RenderMode::Greyscale.default_foreground(), Rgb::BLACK);
        assert_eq!(RenderMode::GreyscaleInverted.background(), Rgb::BLACK);
        assert_eq!(RenderMode::GreyscaleInverted.default_foreground(), Rgb::WHITE);
        assert_eq!(RenderMode::Colour.background(), Rgb::WHITE);
        assert_eq!(RenderMode::ColourInvertedBackground.background(), Rgb::BLACK);
        assert!(RenderMode::Colour.is_colour());
        assert!(!RenderMode::GreyscaleInverted.is_colour());
    }

    #[test]
    fn test_layout_pads_to_line_height() {
        let face = BitmapFace::new(10).unwrap();
        let layout = CanvasLayout::measure(&grid(&["abc", "def"]), &face);
        assert_eq!(layout.advance, 6);
        assert_eq!(layout.pad, 4);
        assert_eq!(layout.width, 3 * 6 + 3 * 4);
        assert_eq!(layout.height, 20);
    }

    #[test]
    fn test_greyscale_inverted_background_and_glyphs() {
        let face = BitmapFace::new(10).unwrap();
        let ascii = grid(&["@#", "#@"]);
        let px = pixels(2, 2, Rgb::BLACK);
        let img = render_image(&ascii, &px, &face, RenderMode::GreyscaleInverted).unwrap();

        assert_eq!(img.dimensions(), (20, 20));
        // padding column after the first glyph is never drawn on
        assert_eq!(img.get_pixel(7, 0).0, [0, 0, 0]);
        assert!(img.pixels().all(|p| p.0 == [0, 0, 0] || p.0 == [255, 255, 255]));
        assert!(img.pixels().any(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn test_greyscale_draws_black_on_white() {
        let face = BitmapFace::new(8).unwrap();
        let px = pixels(1, 1, Rgb::WHITE);
        let img = render_image(&grid(&["#"]), &px, &face, RenderMode::Greyscale).unwrap();
        assert_eq!(img.get_pixel(img.width() - 1, 0).0, [255, 255, 255]);
        assert!(img.pixels().any(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn test_colour_mode_uses_pixel_colors() {
        let face = BitmapFace::new(8).unwrap();
        let red = Rgb::from_u8(200, 10, 10);
        let blue = Rgb::from_u8(10, 10, 200);
        let px = PixelGrid::from_rows(vec![vec![red, blue]]).unwrap();
        let img = render_image(&grid(&["##"]), &px, &face, RenderMode::ColourInvertedBackground)
            .unwrap();

        // advance + pad equals the line height
        let step = 8u32;
        let left: Vec<_> = (0..step).flat_map(|x| (0..8).map(move |y| (x, y))).collect();
        assert!(left.iter().any(|&(x, y)| img.get_pixel(x, y).0 == [200, 10, 10]));
        assert!(left.iter().all(|&(x, y)| img.get_pixel(x, y).0 != [10, 10, 200]));
        assert!(img.pixels().any(|p| p.0 == [10, 10, 200]));
        assert!(img.pixels().any(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn test_colour_mode_rejects_mismatched_pixels() {
        let face = BitmapFace::new(8).unwrap();
        let px = pixels(1, 1, Rgb::BLACK);
        let result = render_image(&grid(&["ab"]), &px, &face, RenderMode::Colour);
        assert!(matches!(result, Err(AsciiError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_greyscale_ignores_pixel_shape() {
        let face = BitmapFace::new(8).unwrap();
        let empty = PixelGrid::from_rows(Vec::new()).unwrap();
        assert!(render_image(&grid(&["ab"]), &empty, &face, RenderMode::Greyscale).is_ok());
    }

    #[test]
    fn test_empty_grid_rejected() {
        let face = BitmapFace::new(8).unwrap();
        let empty = AsciiGrid::from_rows(Vec::new()).unwrap();
        let result = render_image(&empty, &pixels(0, 0, Rgb::BLACK), &face, RenderMode::Greyscale);
        assert!(matches!(result, Err(AsciiError::EmptyGrid)));
    }

    #[test]
    fn test_parse_modes() {
        assert_eq!("colour".parse::<RenderMode>().unwrap(), RenderMode::Colour);
        assert_eq!(
            "GREYSCALE_INVERTED".parse::<RenderMode>().unwrap(),
            RenderMode::GreyscaleInverted
        );
        assert!("sepia".parse::<RenderMode>().is_err());
    }
}
