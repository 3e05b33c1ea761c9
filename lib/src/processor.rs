use crate::ascii::{AsciiGrid, build_ascii_grid, write_text};
use crate::error::Result;
use crate::face::GlyphFace;
use crate::loader::{load_from_memory, load_image, scale_image};
use crate::luminance::LuminanceModel;
use crate::pixels::{PixelGrid, PixelSource, sample_pixels};
use crate::ramp::Ramp;
use crate::render::{RenderMode, render_image};
use image::{DynamicImage, RgbImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Instant;

/// Converts one source image to ASCII art
///
/// The source is scanned into a [`PixelGrid`] the first time pixels are
/// needed; every later conversion reuses that grid, whatever ramp, model or
/// mode it asks for. The grid is never modified once built, so a converter
/// can be shared between threads (see [`crate::batch::render_batch`]).
pub struct Converter<S = DynamicImage> {
    source: S,
    pixels: OnceLock<PixelGrid>,
}

impl Converter<DynamicImage> {
    /// Bind a decoded image, resized by `scale` (see [`crate::loader::clamp_scale`])
    ///
    /// The image keeps its decoded pixel format and is not copied when no
    /// resize is needed.
    pub fn new(image: DynamicImage, scale: f32) -> Self {
        Self::from_source(scale_image(image, scale))
    }

    /// Decode `path` and bind it
    ///
    /// # Errors
    /// Returns [`crate::AsciiError::Decode`] if the image cannot be read.
    pub fn open(path: impl AsRef<Path>, scale: f32) -> Result<Self> {
        Ok(Self::new(load_image(path)?, scale))
    }

    /// Decode an in-memory image and bind it
    ///
    /// # Errors
    /// Returns [`crate::AsciiError::Decode`] if the bytes are not an image.
    pub fn from_memory(bytes: &[u8], scale: f32) -> Result<Self> {
        Ok(Self::new(load_from_memory(bytes)?, scale))
    }
}

impl<S: PixelSource> Converter<S> {
    /// Bind an already prepared raster without resizing it
    pub fn from_source(source: S) -> Self {
        Self {
            source,
            pixels: OnceLock::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Working raster size `(width, height)`
    pub fn dimensions(&self) -> (u32, u32) {
        self.source.dimensions()
    }

    /// The cached pixel grid, scanning the source on first use only
    pub fn pixel_grid(&self) -> &PixelGrid {
        self.pixels.get_or_init(|| {
            let start = Instant::now();
            let grid = sample_pixels(&self.source);
            log::debug!("pixel scan took {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);
            grid
        })
    }

    pub fn ascii_grid(&self, ramp: &Ramp, model: LuminanceModel) -> AsciiGrid {
        build_ascii_grid(self.pixel_grid(), ramp, model)
    }

    /// Render the image as glyphs drawn with `face`
    ///
    /// # Errors
    /// See [`render_image`].
    pub fn ascii_image<F: GlyphFace + ?Sized>(
        &self,
        ramp: &Ramp,
        face: &F,
        mode: RenderMode,
        model: LuminanceModel,
    ) -> Result<RgbImage> {
        let ascii = self.ascii_grid(ramp, model);
        render_image(&ascii, self.pixel_grid(), face, mode)
    }

    /// Write the text art to `path`, replacing any existing file
    ///
    /// # Errors
    /// Returns [`crate::AsciiError::Io`] if the file cannot be written.
    pub fn write_ascii_file(
        &self,
        path: impl AsRef<Path>,
        ramp: &Ramp,
        model: LuminanceModel,
    ) -> Result<()> {
        let file = File::create(path.as_ref())?;
        write_text(&self.ascii_grid(ramp, model), BufWriter::new(file))?;
        log::debug!("wrote ascii text to {}", path.as_ref().display());
        Ok(())
    }
}

/// Scale `image` and scan it into a pixel grid in one step
///
/// # Arguments
/// * `image` - Decoded source image
/// * `scale` - Requested factor, see [`crate::loader::clamp_scale`]
///
/// # Returns
/// A grid with one cell per pixel of the scaled image
pub fn build_pixel_grid(image: DynamicImage, scale: f32) -> PixelGrid {
    sample_pixels(&scale_image(image, scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixels::Rgb;
    use image::{Rgba, RgbaImage};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        inner: RgbaImage,
        reads: AtomicUsize,
    }

    impl PixelSource for CountingSource {
        fn dimensions(&self) -> (u32, u32) {
            self.inner.dimensions()
        }

        fn rgb_at(&self, x: u32, y: u32) -> Rgb {
            self.reads.fetch_add(1, Ordering::Relaxed);
            self.inner.rgb_at(x, y)
        }
    }

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, _| {
            let v = (x * 255 / width.max(2).saturating_sub(1)).min(255) as u8;
            Rgba([v, v, v, 255])
        })
    }

    #[test]
    fn test_pixel_grid_scanned_once() {
        let converter = Converter::from_source(CountingSource {
            inner: gradient(6, 4),
            reads: AtomicUsize::new(0),
        });

        let first = converter.pixel_grid().clone();
        assert_eq!(converter.source().reads.load(Ordering::Relaxed), 24);

        let _ = converter.ascii_grid(&Ramp::default(), LuminanceModel::Perceived1);
        let _ = converter.ascii_grid(&Ramp::new("ab").unwrap(), LuminanceModel::Relative);
        assert_eq!(converter.pixel_grid(), &first);
        assert_eq!(converter.source().reads.load(Ordering::Relaxed), 24);
    }

    #[test]
    fn test_new_applies_scale() {
        let image = DynamicImage::ImageRgba8(gradient(100, 200));
        let converter = Converter::new(image, 0.5);
        assert_eq!(converter.dimensions(), (50, 100));
        assert_eq!(converter.pixel_grid().width(), 50);
        assert_eq!(converter.pixel_grid().height(), 100);
    }

    #[test]
    fn test_new_keeps_decoded_format() {
        let source = RgbImage::from_pixel(9, 5, image::Rgb([10, 200, 30]));
        let converter = Converter::new(DynamicImage::ImageRgb8(source), 1.0);
        assert!(matches!(converter.source(), DynamicImage::ImageRgb8(_)));
        assert_eq!(converter.dimensions(), (9, 5));
        assert_eq!(converter.pixel_grid().get(4, 8), Some(Rgb::from_u8(10, 200, 30)));
    }

    #[test]
    fn test_build_pixel_grid_full_scale() {
        let image = DynamicImage::ImageRgba8(gradient(7, 3));
        let grid = build_pixel_grid(image, 1.0);
        assert_eq!((grid.width(), grid.height()), (7, 3));
        assert_eq!(grid.get(0, 0), Some(Rgb::BLACK));
        assert_eq!(grid.get(2, 6), Some(Rgb::WHITE));
    }
}
