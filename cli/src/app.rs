use crate::args::{Cli, Command, CommonArgs, FontArgs};
use anyhow::{Context, Result, bail};
use ascii_ramp::{
    BitmapFace, Converter, GlyphFace, LuminanceModel, OutlineFace, RampPreset, RenderJob,
    RenderMode, RenderSettings, render_batch, write_text,
};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

type Face = Box<dyn GlyphFace + Sync>;

/// Run the parsed command line
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Text { common, output } => run_text(&common, output.as_deref()),
        Command::Image {
            common,
            font,
            mode,
            output,
        } => run_image(&common, &font, mode, &output),
        Command::Batch {
            common,
            font,
            out_dir,
            include_inverted,
        } => run_batch(&common, &font, &out_dir, include_inverted),
    }
}

/// Resolve settings and load the source image
fn prepare(common: &CommonArgs) -> Result<(RenderSettings, Converter)> {
    let settings = common.settings()?;
    settings.validate()?;

    let start = Instant::now();
    let converter = Converter::open(&common.input, settings.scale)
        .with_context(|| format!("failed to load {}", common.input.display()))?;
    let (width, height) = converter.dimensions();
    log::info!(
        "loaded {} as {width}x{height} in {:.2}ms",
        common.input.display(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok((settings, converter))
}

fn load_face(font: &FontArgs, settings: &RenderSettings) -> Result<Face> {
    let size = font.font_size.unwrap_or(settings.font_size);
    let face: Face = match &font.font {
        Some(path) => Box::new(
            OutlineFace::from_file(path, size)
                .with_context(|| format!("failed to load font {}", path.display()))?,
        ),
        None => Box::new(BitmapFace::new(size)?),
    };
    Ok(face)
}

fn run_text(common: &CommonArgs, output: Option<&Path>) -> Result<()> {
    let (settings, converter) = prepare(common)?;
    let ramp = settings.resolved_ramp()?;

    match output {
        Some(path) => {
            converter
                .write_ascii_file(path, &ramp, settings.luminance)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => {
            let grid = converter.ascii_grid(&ramp, settings.luminance);
            write_text(&grid, std::io::stdout().lock())?;
        }
    }
    Ok(())
}

fn run_image(
    common: &CommonArgs,
    font: &FontArgs,
    mode: Option<RenderMode>,
    output: &Path,
) -> Result<()> {
    let (settings, converter) = prepare(common)?;
    let ramp = settings.resolved_ramp()?;
    let face = load_face(font, &settings)?;
    let mode = mode.unwrap_or(settings.mode);

    let start = Instant::now();
    let image = converter.ascii_image(&ramp, face.as_ref(), mode, settings.luminance)?;
    log::info!(
        "rendered {}x{} image in {:.2}ms",
        image.width(),
        image.height(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    image
        .save(output)
        .with_context(|| format!("failed to save {}", output.display()))?;
    log::info!("wrote {}", output.display());
    Ok(())
}

fn batch_modes(include_inverted: bool) -> Vec<RenderMode> {
    RenderMode::ALL
        .into_iter()
        .filter(|mode| include_inverted || !mode.is_inverted())
        .collect()
}

fn run_batch(
    common: &CommonArgs,
    font: &FontArgs,
    out_dir: &Path,
    include_inverted: bool,
) -> Result<()> {
    let (settings, converter) = prepare(common)?;
    let face = load_face(font, &settings)?;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("cannot create {}", out_dir.display()))?;

    let jobs = RenderJob::matrix(
        &batch_modes(include_inverted),
        &LuminanceModel::ALL,
        &RampPreset::ALL,
    );
    log::info!("rendering {} images into {}", jobs.len(), out_dir.display());

    let start = Instant::now();
    let failures = AtomicUsize::new(0);
    render_batch(&converter, &jobs, face.as_ref(), |job, result| {
        let path = out_dir.join(format!("{}.jpg", job.file_stem()));
        let saved = result.map_err(anyhow::Error::from).and_then(|image| {
            image
                .save(&path)
                .with_context(|| format!("failed to save {}", path.display()))
        });
        match saved {
            Ok(()) => log::info!("wrote {}", path.display()),
            Err(e) => {
                log::error!("{}: {e:#}", job.file_stem());
                failures.fetch_add(1, Ordering::Relaxed);
            }
        }
    });
    log::info!("batch finished in {:.2}s", start.elapsed().as_secs_f64());

    let failures = failures.into_inner();
    if failures > 0 {
        bail!("{failures} of {} renders failed", jobs.len());
    }
    Ok(())
}
