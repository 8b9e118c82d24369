//! Clustering models used to summarize sampled pixels.
//!
//! All models work on 3-dimensional [`Point`]s and consume randomness only
//! through the RNG handed to [`ClusterModel::fit`], so a seeded RNG gives a
//! reproducible fit.
//!
//! - [`KMeans`]: k-means++ seeding followed by Lloyd iterations
//! - [`BisectingKMeans`]: divisive, repeatedly 2-means splits the worst cluster
//! - [`MiniBatchKMeans`]: online center updates from random batches
//! - [`GaussianMixture`]: diagonal-covariance EM, seeded from k-means

mod bisecting;
mod gaussian;
mod kmeans;
mod minibatch;

pub use bisecting::BisectingKMeans;
pub use gaussian::GaussianMixture;
pub use kmeans::KMeans;
pub use minibatch::MiniBatchKMeans;

use rand::{Rng, RngCore};

use crate::PaletteResult;
use crate::color::Point;
use crate::config::ModelKind;

/// Result of fitting a model: one representative per cluster, and the
/// cluster each input point was assigned to.
#[derive(Clone, Debug, PartialEq)]
pub struct Fit {
    /// Cluster representatives, indexed by cluster id.
    pub centers: Vec<Point>,
    /// `labels[i]` is the cluster of the i-th input point.
    pub labels: Vec<usize>,
}

impl Fit {
    /// Sum of squared distances from each point to its center.
    pub fn inertia(&self, points: &[Point]) -> f64 {
        points
            .iter()
            .zip(&self.labels)
            .map(|(p, &label)| distance_squared(p, &self.centers[label]))
            .sum()
    }
}

/// Common interface for the palette clustering models.
pub trait ClusterModel {
    /// Group `points` into (at most) `k` clusters.
    ///
    /// `points` is never empty and `k` is never zero; the caller checks both.
    fn fit(&self, points: &[Point], k: usize, rng: &mut dyn RngCore) -> PaletteResult<Fit>;

    fn kind(&self) -> ModelKind;
}

/// Instantiate the model for `kind` with its default parameters.
pub fn build_model(kind: ModelKind) -> Box<dyn ClusterModel> {
    match kind {
        ModelKind::KMeans => Box::new(KMeans::default()),
        ModelKind::BisectingKMeans => Box::new(BisectingKMeans::default()),
        ModelKind::GaussianMixture => Box::new(GaussianMixture::default()),
        ModelKind::MiniBatchKMeans => Box::new(MiniBatchKMeans::default()),
    }
}

// ------------------------------------------------------------
// Shared helpers
// ------------------------------------------------------------

#[inline]
pub(crate) fn distance_squared(a: &Point, b: &Point) -> f64 {
    let dx = (a[0] - b[0]) as f64;
    let dy = (a[1] - b[1]) as f64;
    let dz = (a[2] - b[2]) as f64;
    dx * dx + dy * dy + dz * dz
}

/// Index of the closest center. Ties go to the lowest index.
pub(crate) fn nearest(point: &Point, centers: &[Point]) -> usize {
    let mut best_idx = 0;
    let mut best_dist = f64::INFINITY;
    for (idx, center) in centers.iter().enumerate() {
        let dist = distance_squared(point, center);
        if dist < best_dist {
            best_dist = dist;
            best_idx = idx;
        }
    }
    best_idx
}

/// Absolute convergence threshold: `tolerance` scaled by the mean
/// per-axis variance of the data.
pub(crate) fn scaled_tolerance(points: &[Point], tolerance: f64) -> f64 {
    let n = points.len() as f64;
    let mut mean = [0.0f64; 3];
    for p in points {
        for d in 0..3 {
            mean[d] += p[d] as f64;
        }
    }
    for m in &mut mean {
        *m /= n;
    }

    let mut variance = 0.0;
    for p in points {
        for d in 0..3 {
            let diff = p[d] as f64 - mean[d];
            variance += diff * diff;
        }
    }
    tolerance * variance / (n * 3.0)
}

/// k-means++ seeding.
///
/// The first center is a uniformly drawn point; each following center is
/// drawn with probability proportional to its squared distance from the
/// nearest chosen center. When every point already coincides with a center
/// the draw falls back to uniform, which duplicates an existing center.
pub(crate) fn plus_plus_init(points: &[Point], k: usize, rng: &mut dyn RngCore) -> Vec<Point> {
    let mut centers = Vec::with_capacity(k);
    centers.push(points[rng.random_range(0..points.len())]);

    let mut closest: Vec<f64> = points
        .iter()
        .map(|p| distance_squared(p, &centers[0]))
        .collect();

    while centers.len() < k {
        let total: f64 = closest.iter().sum();
        let chosen = if total > 0.0 {
            let mut target = rng.random::<f64>() * total;
            let mut chosen = points.len() - 1;
            for (idx, &weight) in closest.iter().enumerate() {
                if weight > 0.0 && target < weight {
                    chosen = idx;
                    break;
                }
                target -= weight;
            }
            // Rounding can walk past the last positive weight.
            while closest[chosen] == 0.0 && chosen > 0 {
                chosen -= 1;
            }
            chosen
        } else {
            rng.random_range(0..points.len())
        };

        let center = points[chosen];
        for (dist, p) in closest.iter_mut().zip(points) {
            *dist = dist.min(distance_squared(p, &center));
        }
        centers.push(center);
    }

    centers
}

/// Lloyd iterations from the given starting centers.
///
/// A center that loses all of its points stays where it was.
pub(crate) fn lloyd(points: &[Point], mut centers: Vec<Point>, max_iter: usize, tolerance: f64) -> Fit {
    let threshold = scaled_tolerance(points, tolerance);
    let k = centers.len();
    let mut labels = vec![0usize; points.len()];

    for _ in 0..max_iter {
        for (label, p) in labels.iter_mut().zip(points) {
            *label = nearest(p, &centers);
        }

        let mut sums = vec![[0.0f64; 3]; k];
        let mut counts = vec![0usize; k];
        for (p, &label) in points.iter().zip(&labels) {
            counts[label] += 1;
            for d in 0..3 {
                sums[label][d] += p[d] as f64;
            }
        }

        let mut shift = 0.0;
        for (idx, center) in centers.iter_mut().enumerate() {
            if counts[idx] == 0 {
                continue;
            }
            let n = counts[idx] as f64;
            let updated = [
                (sums[idx][0] / n) as f32,
                (sums[idx][1] / n) as f32,
                (sums[idx][2] / n) as f32,
            ];
            shift += distance_squared(center, &updated);
            *center = updated;
        }

        if shift <= threshold {
            break;
        }
    }

    for (label, p) in labels.iter_mut().zip(points) {
        *label = nearest(p, &centers);
    }

    Fit { centers, labels }
}
