/// Basic example: convert a synthetic image to ASCII art
///
/// Builds a small test image, prints it as text and renders it once per mode
use ascii_ramp::{BitmapFace, Converter, LuminanceModel, Ramp, RampPreset, RenderMode, render_text};
use image::{Rgba, RgbaImage};

fn main() -> ascii_ramp::Result<()> {
    println!("ASCII Ramp - Basic Example");
    println!("==========================\n");

    // Horizontal grey gradient with a red disc in the middle
    let width = 64;
    let height = 32;
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let img = RgbaImage::from_fn(width, height, |x, y| {
        let dx = x as f32 - center_x;
        let dy = (y as f32 - center_y) * 2.0;
        if (dx * dx + dy * dy).sqrt() < 20.0 {
            Rgba([220, 40, 40, 255])
        } else {
            let grey = (x * 255 / (width - 1)) as u8;
            Rgba([grey, grey, grey, 255])
        }
    });

    println!("Created test image: {}x{}", width, height);

    let converter = Converter::from_source(img);
    let ramp = Ramp::preset(RampPreset::Simple);

    for line in render_text(&converter.ascii_grid(&ramp, LuminanceModel::Relative)) {
        println!("{line}");
    }
    println!();

    let face = BitmapFace::new(9)?;
    for mode in RenderMode::ALL {
        let output = converter.ascii_image(&ramp, &face, mode, LuminanceModel::Perceived2)?;
        let path = format!("basic_{mode}.png");
        output.save(&path)?;
        println!("✓ Saved {mode} render to: {path}");
    }

    println!("\nASCII conversion complete!");
    Ok(())
}
