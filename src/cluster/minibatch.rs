use rand::{Rng, RngCore};

use super::{ClusterModel, Fit, distance_squared, nearest, plus_plus_init, scaled_tolerance};
use crate::PaletteResult;
use crate::color::Point;
use crate::config::ModelKind;

/// Mini-batch k-means (Sculley, "Web-Scale K-Means Clustering").
///
/// Each step draws `batch_size` points with replacement and nudges their
/// nearest centers towards them with a per-center learning rate of
/// `1 / points_seen`.
#[derive(Clone, Debug)]
pub struct MiniBatchKMeans {
    pub batch_size: usize,
    pub max_iter: usize,
    pub tolerance: f64,
    /// Consecutive quiet batches required before stopping early.
    pub max_no_improvement: usize,
}

impl Default for MiniBatchKMeans {
    fn default() -> Self {
        Self {
            batch_size: 1024,
            max_iter: 100,
            tolerance: 1e-4,
            max_no_improvement: 10,
        }
    }
}

impl ClusterModel for MiniBatchKMeans {
    fn fit(&self, points: &[Point], k: usize, rng: &mut dyn RngCore) -> PaletteResult<Fit> {
        let k = k.min(points.len());
        let batch_size = self.batch_size.clamp(1, points.len());
        let threshold = scaled_tolerance(points, self.tolerance);

        let mut centers = plus_plus_init(points, k, rng);
        let mut seen = vec![0u64; k];
        let mut quiet = 0;

        for _ in 0..self.max_iter {
            let previous = centers.clone();

            for _ in 0..batch_size {
                let point = &points[rng.random_range(0..points.len())];
                let idx = nearest(point, &centers);
                seen[idx] += 1;
                let eta = 1.0 / seen[idx] as f32;
                let center = &mut centers[idx];
                for d in 0..3 {
                    center[d] += eta * (point[d] - center[d]);
                }
            }

            let shift: f64 = previous
                .iter()
                .zip(&centers)
                .map(|(a, b)| distance_squared(a, b))
                .sum();
            if shift <= threshold {
                quiet += 1;
                if quiet >= self.max_no_improvement {
                    break;
                }
            } else {
                quiet = 0;
            }
        }

        let labels = points.iter().map(|p| nearest(p, &centers)).collect();
        Ok(Fit { centers, labels })
    }

    fn kind(&self) -> ModelKind {
        ModelKind::MiniBatchKMeans
    }
}
