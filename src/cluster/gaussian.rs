use std::f64::consts::PI;

use rand::RngCore;

use super::{ClusterModel, Fit, KMeans};
use crate::color::Point;
use crate::config::ModelKind;
use crate::{PaletteError, PaletteResult};

/// Gaussian mixture with diagonal covariances, fitted by EM.
///
/// Responsibilities start from a k-means labelling. The palette color of a
/// component is its mean.
#[derive(Clone, Debug)]
pub struct GaussianMixture {
    pub max_iter: usize,
    /// Stop once the mean log-likelihood improves by less than this.
    pub tolerance: f64,
    /// Added to every variance so collapsed components stay finite.
    pub reg_covar: f64,
}

impl Default for GaussianMixture {
    fn default() -> Self {
        Self {
            max_iter: 100,
            tolerance: 1e-3,
            reg_covar: 1e-6,
        }
    }
}

const WEIGHT_FLOOR: f64 = 1e-300;

struct Component {
    weight: f64,
    mean: [f64; 3],
    variance: [f64; 3],
}

impl Component {
    fn log_density(&self, point: &Point) -> f64 {
        let mut acc = 0.0;
        for d in 0..3 {
            let diff = point[d] as f64 - self.mean[d];
            acc += (2.0 * PI * self.variance[d]).ln() + diff * diff / self.variance[d];
        }
        self.weight.max(WEIGHT_FLOOR).ln() - 0.5 * acc
    }
}

impl GaussianMixture {
    /// Re-estimate every component from the responsibilities.
    ///
    /// A component with (numerically) no responsibility keeps its previous
    /// mean and variance and gets a negligible weight.
    fn maximize(&self, points: &[Point], resp: &[Vec<f64>], components: &mut [Component]) {
        let n = points.len() as f64;
        for (j, component) in components.iter_mut().enumerate() {
            let nk: f64 = resp.iter().map(|r| r[j]).sum();
            component.weight = nk / n;
            if nk < 1e-10 {
                continue;
            }

            let mut mean = [0.0f64; 3];
            for (p, r) in points.iter().zip(resp) {
                for d in 0..3 {
                    mean[d] += r[j] * p[d] as f64;
                }
            }
            for m in &mut mean {
                *m /= nk;
            }

            let mut variance = [0.0f64; 3];
            for (p, r) in points.iter().zip(resp) {
                for d in 0..3 {
                    let diff = p[d] as f64 - mean[d];
                    variance[d] += r[j] * diff * diff;
                }
            }
            for v in &mut variance {
                *v = *v / nk + self.reg_covar;
            }

            component.mean = mean;
            component.variance = variance;
        }
    }

    /// Fill `resp` and return the mean log-likelihood.
    fn expectation(points: &[Point], components: &[Component], resp: &mut [Vec<f64>]) -> f64 {
        let mut total = 0.0;
        for (p, r) in points.iter().zip(resp.iter_mut()) {
            for (slot, component) in r.iter_mut().zip(components) {
                *slot = component.log_density(p);
            }
            let max = r.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let sum: f64 = r.iter().map(|lp| (lp - max).exp()).sum();
            let log_norm = max + sum.ln();
            for slot in r.iter_mut() {
                *slot = (*slot - log_norm).exp();
            }
            total += log_norm;
        }
        total / points.len() as f64
    }
}

impl ClusterModel for GaussianMixture {
    fn fit(&self, points: &[Point], k: usize, rng: &mut dyn RngCore) -> PaletteResult<Fit> {
        if points.len() < k {
            return Err(PaletteError::ModelFit(format!(
                "GaussianMixture needs at least {k} samples for {k} components, got {}",
                points.len()
            )));
        }

        let init = KMeans::default().fit(points, k, rng)?;
        let mut resp: Vec<Vec<f64>> = init
            .labels
            .iter()
            .map(|&label| {
                let mut row = vec![0.0; k];
                row[label] = 1.0;
                row
            })
            .collect();

        let mut components: Vec<Component> = init
            .centers
            .iter()
            .map(|c| Component {
                weight: 0.0,
                mean: [c[0] as f64, c[1] as f64, c[2] as f64],
                variance: [self.reg_covar; 3],
            })
            .collect();

        self.maximize(points, &resp, &mut components);
        let mut log_likelihood = f64::NEG_INFINITY;

        for iteration in 0..self.max_iter {
            let current = Self::expectation(points, &components, &mut resp);
            if !current.is_finite() {
                return Err(PaletteError::ModelFit(format!(
                    "GaussianMixture log-likelihood diverged at iteration {iteration}"
                )));
            }
            self.maximize(points, &resp, &mut components);

            let gain = current - log_likelihood;
            log_likelihood = current;
            if gain.abs() < self.tolerance {
                break;
            }
        }

        let labels = resp
            .iter()
            .map(|r| {
                r.iter()
                    .enumerate()
                    .fold((0, f64::NEG_INFINITY), |best, (j, &v)| {
                        if v > best.1 { (j, v) } else { best }
                    })
                    .0
            })
            .collect();

        let centers = components
            .iter()
            .map(|c| [c.mean[0] as f32, c.mean[1] as f32, c.mean[2] as f32])
            .collect();

        Ok(Fit { centers, labels })
    }

    fn kind(&self) -> ModelKind {
        ModelKind::GaussianMixture
    }
}
