use rand::RngCore;

use super::{ClusterModel, Fit, distance_squared, lloyd, plus_plus_init};
use crate::PaletteResult;
use crate::color::Point;
use crate::config::ModelKind;

/// Divisive k-means: start from a single cluster and keep splitting the
/// cluster with the largest inertia in two until there are `k`.
#[derive(Clone, Debug)]
pub struct BisectingKMeans {
    /// Lloyd iterations per 2-means split.
    pub max_iter: usize,
    pub tolerance: f64,
}

impl Default for BisectingKMeans {
    fn default() -> Self {
        Self {
            max_iter: 300,
            tolerance: 1e-4,
        }
    }
}

struct Node {
    center: Point,
    members: Vec<usize>,
    inertia: f64,
}

impl Node {
    fn new(points: &[Point], center: Point, members: Vec<usize>) -> Self {
        let inertia = members
            .iter()
            .map(|&i| distance_squared(&points[i], &center))
            .sum();
        Self {
            center,
            members,
            inertia,
        }
    }
}

fn mean(points: &[Point]) -> Point {
    let mut sum = [0.0f64; 3];
    for p in points {
        for d in 0..3 {
            sum[d] += p[d] as f64;
        }
    }
    let n = points.len() as f64;
    [(sum[0] / n) as f32, (sum[1] / n) as f32, (sum[2] / n) as f32]
}

impl ClusterModel for BisectingKMeans {
    fn fit(&self, points: &[Point], k: usize, rng: &mut dyn RngCore) -> PaletteResult<Fit> {
        let k = k.min(points.len());
        let mut nodes = vec![Node::new(points, mean(points), (0..points.len()).collect())];

        while nodes.len() < k {
            let (worst, _) = nodes
                .iter()
                .enumerate()
                .fold((0, f64::NEG_INFINITY), |best, (idx, node)| {
                    if node.inertia > best.1 { (idx, node.inertia) } else { best }
                });

            if nodes[worst].inertia <= 0.0 {
                // Nothing left to separate; the extra cluster is an empty copy.
                let center = nodes[worst].center;
                nodes.push(Node::new(points, center, Vec::new()));
                continue;
            }

            let subset: Vec<Point> = nodes[worst].members.iter().map(|&i| points[i]).collect();
            let seeds = plus_plus_init(&subset, 2, rng);
            let split = lloyd(&subset, seeds, self.max_iter, self.tolerance);

            let mut halves: [Vec<usize>; 2] = [Vec::new(), Vec::new()];
            for (&member, &label) in nodes[worst].members.iter().zip(&split.labels) {
                halves[label].push(member);
            }
            let [left, right] = halves;
            nodes[worst] = Node::new(points, split.centers[0], left);
            nodes.push(Node::new(points, split.centers[1], right));
        }

        let mut labels = vec![0usize; points.len()];
        for (cluster, node) in nodes.iter().enumerate() {
            for &member in &node.members {
                labels[member] = cluster;
            }
        }

        Ok(Fit {
            centers: nodes.into_iter().map(|node| node.center).collect(),
            labels,
        })
    }

    fn kind(&self) -> ModelKind {
        ModelKind::BisectingKMeans
    }
}
