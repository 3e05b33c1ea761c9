use crate::error::Result;
use image::{DynamicImage, imageops};
use std::path::Path;

/// Smallest scale applied to a non-positive request
pub const MIN_SCALE: f32 = 0.1;

/// Clamp a requested scale factor
///
/// Values above 1 become 1 (no upscaling), zero and negative values become
/// [`MIN_SCALE`], anything in `(0, 1]` passes through. NaN and infinities
/// are treated as 1.
pub fn clamp_scale(scale: f32) -> f32 {
    if !scale.is_finite() || scale > 1.0 {
        1.0
    } else if scale <= 0.0 {
        MIN_SCALE
    } else {
        scale
    }
}

/// Output size for `(width, height)` at an already clamped `scale`
///
/// Each axis is floored independently and kept at least 1 pixel.
pub fn scaled_dimensions(width: u32, height: u32, scale: f32) -> (u32, u32) {
    let w = (width as f32 * scale).floor() as u32;
    let h = (height as f32 * scale).floor() as u32;
    (w.max(1), h.max(1))
}

/// Resize `image` by `scale`
///
/// # Arguments
/// * `image` - Decoded raster, returned untouched when the clamped scale is 1
/// * `scale` - Requested factor, see [`clamp_scale`]
///
/// # Returns
/// The resized raster in the source's own pixel format, resampled with
/// Lanczos3 to keep small outputs clean
pub fn scale_image(image: DynamicImage, scale: f32) -> DynamicImage {
    let scale = clamp_scale(scale);
    if scale == 1.0 {
        return image;
    }

    let (width, height) = (image.width(), image.height());
    let (target_width, target_height) = scaled_dimensions(width, height, scale);
    log::debug!("scaling {width}x{height} by {scale} to {target_width}x{target_height}");
    image.resize_exact(target_width, target_height, imageops::FilterType::Lanczos3)
}

/// Decode an image file
///
/// # Errors
/// Returns [`crate::AsciiError::Decode`] if the file cannot be opened or
/// decoded.
pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let image = image::open(path.as_ref())?;
    log::debug!(
        "decoded {} ({}x{})",
        path.as_ref().display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Decode an image held in memory, format guessed from its content
///
/// # Errors
/// Returns [`crate::AsciiError::Decode`] if the bytes are not a supported
/// image.
pub fn load_from_memory(bytes: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AsciiError;

    #[test]
    fn test_clamp_scale() {
        assert_eq!(clamp_scale(2.5), 1.0);
        assert_eq!(clamp_scale(1.0), 1.0);
        assert_eq!(clamp_scale(0.6), 0.6);
        assert_eq!(clamp_scale(-3.0), MIN_SCALE);
        assert_eq!(clamp_scale(0.0), MIN_SCALE);
        assert_eq!(clamp_scale(f32::NAN), 1.0);
    }

    fn scaled(width: u32, height: u32, scale: f32) -> (u32, u32) {
        let img = scale_image(DynamicImage::new_rgba8(width, height), scale);
        (img.width(), img.height())
    }

    #[test]
    fn test_scale_one_keeps_dimensions() {
        assert_eq!(scaled(37, 21, 1.0), (37, 21));
        assert_eq!(scaled(37, 21, 4.0), (37, 21));
    }

    #[test]
    fn test_scale_keeps_pixel_format() {
        let img = scale_image(DynamicImage::new_rgb8(40, 20), 1.0);
        assert!(matches!(img, DynamicImage::ImageRgb8(_)));
        let img = scale_image(DynamicImage::new_rgb8(40, 20), 0.5);
        assert!(matches!(img, DynamicImage::ImageRgb8(_)));
        assert_eq!((img.width(), img.height()), (20, 10));
    }

    #[test]
    fn test_scale_half() {
        assert_eq!(scaled(100, 200, 0.5), (50, 100));
    }

    #[test]
    fn test_scale_floors_each_axis() {
        assert_eq!(scaled(127, 85, 0.3), (38, 25));
    }

    #[test]
    fn test_negative_scale_uses_floor() {
        assert_eq!(scaled(100, 50, -1.0), (10, 5));
    }

    #[test]
    fn test_tiny_image_never_collapses() {
        assert_eq!(scaled(3, 3, 0.1), (1, 1));
    }

    #[test]
    fn test_decode_failure() {
        assert!(matches!(
            load_from_memory(b"definitely not an image"),
            Err(AsciiError::Decode(_))
        ));
        assert!(matches!(
            load_image("/nonexistent/picture.png"),
            Err(AsciiError::Decode(_))
        ));
    }
}
