//! Seeded pixel sampling.

use rand::Rng;
use rand::seq::index;

use crate::color::Pixel;

/// Draw up to `sample_size` pixels without replacement.
///
/// When the image holds no more than `sample_size` pixels every pixel is
/// returned in image order and the RNG is left untouched. Otherwise the
/// drawn indices are sorted so the sample keeps image order, which makes
/// the result depend only on *which* pixels were drawn.
pub fn sample_pixels<R: Rng + ?Sized>(pixels: &[Pixel], sample_size: usize, rng: &mut R) -> Vec<Pixel> {
    if sample_size >= pixels.len() {
        return pixels.to_vec();
    }

    let mut picked = index::sample(rng, pixels.len(), sample_size).into_vec();
    picked.sort_unstable();
    picked.into_iter().map(|i| pixels[i]).collect()
}
