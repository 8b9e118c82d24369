use rand::RngCore;

use super::{ClusterModel, Fit, lloyd, plus_plus_init};
use crate::PaletteResult;
use crate::color::Point;
use crate::config::ModelKind;

/// Lloyd's k-means with k-means++ seeding.
#[derive(Clone, Debug)]
pub struct KMeans {
    pub max_iter: usize,
    /// Relative to the mean per-axis variance of the data.
    pub tolerance: f64,
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            max_iter: 300,
            tolerance: 1e-4,
        }
    }
}

impl ClusterModel for KMeans {
    fn fit(&self, points: &[Point], k: usize, rng: &mut dyn RngCore) -> PaletteResult<Fit> {
        let k = k.min(points.len());
        let centers = plus_plus_init(points, k, rng);
        Ok(lloyd(points, centers, self.max_iter, self.tolerance))
    }

    fn kind(&self) -> ModelKind {
        ModelKind::KMeans
    }
}
