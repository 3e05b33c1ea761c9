//! Parallel rendering of independent jobs over one cached pixel grid

use crate::error::Result;
use crate::face::GlyphFace;
use crate::luminance::LuminanceModel;
use crate::pixels::PixelSource;
use crate::processor::Converter;
use crate::ramp::{Ramp, RampPreset};
use crate::render::RenderMode;
use image::RgbImage;
use rayon::prelude::*;

/// One (ramp, mode, luminance) combination to render
#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob {
    /// Short ramp name used by [`RenderJob::file_stem`]
    pub ramp_tag: String,
    pub ramp: Ramp,
    pub mode: RenderMode,
    pub luminance: LuminanceModel,
}

impl RenderJob {
    pub fn new(
        ramp_tag: impl Into<String>,
        ramp: Ramp,
        mode: RenderMode,
        luminance: LuminanceModel,
    ) -> Self {
        Self {
            ramp_tag: ramp_tag.into(),
            ramp,
            mode,
            luminance,
        }
    }

    /// Every combination of the given modes, models and presets
    ///
    /// Ordered by mode, then model, then preset.
    pub fn matrix(
        modes: &[RenderMode],
        models: &[LuminanceModel],
        presets: &[RampPreset],
    ) -> Vec<Self> {
        modes
            .iter()
            .flat_map(|&mode| {
                models.iter().flat_map(move |&luminance| {
                    presets.iter().map(move |&preset| {
                        Self::new(preset.tag(), Ramp::preset(preset), mode, luminance)
                    })
                })
            })
            .collect()
    }

    /// `{mode}-{ramp}-{luminance}-result`
    pub fn file_stem(&self) -> String {
        format!("{}-{}-{}-result", self.mode, self.ramp_tag, self.luminance)
    }
}

/// Render every job, in parallel, over `converter`'s cached pixel grid
///
/// # Arguments
/// * `converter` - Shared source; its pixel grid is built once before the workers start
/// * `jobs` - Combinations to render, in any order
/// * `face` - Sized face shared by every job
/// * `sink` - Called by the worker that rendered a job, as soon as it is done
///
/// Each image is handed to `sink` and dropped before the worker picks up
/// another job, so at most one image per worker thread is alive at a time.
/// One failing job does not stop the others.
pub fn render_batch<S, F, K>(converter: &Converter<S>, jobs: &[RenderJob], face: &F, sink: K)
where
    S: PixelSource + Sync,
    F: GlyphFace + Sync + ?Sized,
    K: Fn(&RenderJob, Result<RgbImage>) + Sync,
{
    // build the shared grid up front so workers only read it
    converter.pixel_grid();

    jobs.par_iter().for_each(|job| {
        log::trace!("rendering {}", job.file_stem());
        sink(job, converter.ascii_image(&job.ramp, face, job.mode, job.luminance));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::BitmapFace;
    use image::{Rgba, RgbaImage};
    use std::sync::Mutex;

    #[test]
    fn test_matrix_covers_every_combination() {
        let jobs = RenderJob::matrix(&RenderMode::ALL, &LuminanceModel::ALL, &RampPreset::ALL);
        assert_eq!(jobs.len(), 4 * 3 * 4);
        assert_eq!(jobs[0].mode, RenderMode::Greyscale);
        assert_eq!(jobs[0].luminance, LuminanceModel::Relative);
        assert_eq!(jobs[0].ramp_tag, "smp");
    }

    #[test]
    fn test_file_stem() {
        let job = RenderJob::new(
            "std",
            Ramp::preset(RampPreset::Standard),
            RenderMode::Colour,
            LuminanceModel::Perceived2,
        );
        assert_eq!(job.file_stem(), "colour-std-perceived_2-result");
    }

    #[test]
    fn test_batch_sink_sees_every_job() {
        let source =
            RgbaImage::from_fn(5, 3, |x, y| Rgba([(x * 50) as u8, (y * 100) as u8, 90, 255]));
        let converter = Converter::from_source(source);
        let face = BitmapFace::new(6).unwrap();
        let jobs = RenderJob::matrix(
            &[RenderMode::Greyscale, RenderMode::Colour],
            &LuminanceModel::ALL,
            &[RampPreset::Simple, RampPreset::Alt],
        );

        let rendered = Mutex::new(Vec::new());
        render_batch(&converter, &jobs, &face, |job, result| {
            rendered.lock().unwrap().push((job.file_stem(), result.unwrap()));
        });

        let mut rendered = rendered.into_inner().unwrap();
        assert_eq!(rendered.len(), jobs.len());
        rendered.sort_by(|a, b| a.0.cmp(&b.0));
        for job in &jobs {
            let index = rendered
                .binary_search_by(|(stem, _)| stem.cmp(&job.file_stem()))
                .unwrap();
            let expected = converter
                .ascii_image(&job.ramp, &face, job.mode, job.luminance)
                .unwrap();
            assert_eq!(rendered[index].1, expected);
        }
    }
}
