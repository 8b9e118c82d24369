//! Palette extraction: sample, cluster, convert back to colors.

use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cluster::build_model;
use crate::color::{Pixel, Point, from_point, to_point};
use crate::config::{ExtractConfig, ModelKind};
use crate::sample::sample_pixels;
use crate::{PaletteError, PaletteResult};

/// Extract an ordered palette from `pixels`.
///
/// Steps performed:
/// 1. Draw `min(sample_size, pixels.len())` pixels without replacement, from
///    an RNG seeded with `config.seed`.
/// 2. Map the sample into the configured color space.
/// 3. Fit the configured model with `k = palette_size`, continuing the same
///    RNG stream.
/// 4. Convert each cluster representative back to sRGB, rounding and
///    clamping to `0..=255`.
///
/// Colors come back in cluster-index order. The same pixels and config always
/// produce the same palette.
///
/// When the sample holds fewer pixels than `palette_size`, the k-means family
/// returns one color per sampled pixel and `GaussianMixture` fails with
/// [`PaletteError::ModelFit`].
pub fn extract(pixels: &[Pixel], config: &ExtractConfig) -> PaletteResult<Vec<Pixel>> {
    config.validate()?;
    if pixels.is_empty() {
        return Err(PaletteError::InvalidInput(
            "image has no pixels to sample".to_string(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let sample = sample_pixels(pixels, config.sample_size, &mut rng);
    debug!(
        "sampled {} of {} pixels (seed {}, model {})",
        sample.len(),
        pixels.len(),
        config.seed,
        config.model
    );

    let points: Vec<Point> = sample
        .iter()
        .map(|&p| to_point(p, config.color_space))
        .collect();

    let model = build_model(config.model);
    let fit = model.fit(&points, config.palette_size, &mut rng)?;

    if fit.centers.len() < config.palette_size {
        warn!(
            "requested {} colors but only {} pixels were sampled; returning {}",
            config.palette_size,
            points.len(),
            fit.centers.len()
        );
    }

    Ok(fit
        .centers
        .into_iter()
        .map(|center| from_point(center, config.color_space))
        .collect())
}

/// Positional form of [`extract`] using the default (RGB) color space.
pub fn extract_palette(
    pixels: &[Pixel],
    sample_size: usize,
    palette_size: usize,
    model: ModelKind,
    seed: u64,
) -> PaletteResult<Vec<Pixel>> {
    extract(pixels, &ExtractConfig::new(sample_size, palette_size, model, seed))
}
