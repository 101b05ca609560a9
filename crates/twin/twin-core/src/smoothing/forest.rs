//! Bagged regression-tree smoother
//!
//! Each tree is grown on a bootstrap sample of `(t, y)` pairs, splitting on
//! the time midpoint that most reduces the sum of squared errors. The
//! prediction at each `t` is the mean over all trees. Sampling uses a
//! `StdRng` seeded from the configured seed, so the output is a pure
//! function of the input and the settings.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use twin_spi::{check_smoothing_input, Result, Smoother, TwinError};

/// Trees grown when none is configured.
pub const DEFAULT_TREES: usize = 100;

/// Upper bound on the ensemble size.
pub const MAX_TREES: usize = 1000;

/// Seed used when none is configured.
pub const DEFAULT_FOREST_SEED: u64 = 42;

#[derive(Debug, Clone)]
enum Node {
    Leaf(f64),
    Split {
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn predict(&self, t: f64) -> f64 {
        match self {
            Node::Leaf(value) => *value,
            Node::Split {
                threshold,
                left,
                right,
            } => {
                if t <= *threshold {
                    left.predict(t)
                } else {
                    right.predict(t)
                }
            }
        }
    }
}

/// Random-forest style regression over the single time feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestSmoother {
    trees: usize,
    max_depth: Option<usize>,
    min_samples_leaf: usize,
    seed: u64,
}

impl Default for ForestSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_TREES, DEFAULT_FOREST_SEED)
    }
}

impl ForestSmoother {
    pub fn new(trees: usize, seed: u64) -> Self {
        Self {
            trees,
            max_depth: None,
            min_samples_leaf: 1,
            seed,
        }
    }

    /// Limit tree depth. `None` grows until leaves are pure or minimal.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_min_samples_leaf(mut self, min_samples_leaf: usize) -> Self {
        self.min_samples_leaf = min_samples_leaf;
        self
    }

    pub fn trees(&self) -> usize {
        self.trees
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn validate(&self) -> Result<()> {
        if self.trees == 0 || self.trees > MAX_TREES {
            return Err(TwinError::invalid_parameter(
                "trees",
                format!("must be in [1, {}], got {}", MAX_TREES, self.trees),
            ));
        }
        if self.min_samples_leaf == 0 {
            return Err(TwinError::invalid_parameter(
                "min_samples_leaf",
                "must be at least 1",
            ));
        }
        if self.max_depth == Some(0) {
            return Err(TwinError::invalid_parameter("max_depth", "must be at least 1"));
        }
        Ok(())
    }

    fn grow(&self, samples: &[(f64, f64)], depth: usize) -> Node {
        let n = samples.len();
        let sum: f64 = samples.iter().map(|s| s.1).sum();
        let mean = sum / n as f64;

        let depth_reached = self.max_depth.is_some_and(|max| depth >= max);
        if depth_reached || n < 2 * self.min_samples_leaf {
            return Node::Leaf(mean);
        }

        let sum_sq: f64 = samples.iter().map(|s| s.1 * s.1).sum();
        let parent_sse = sum_sq - sum * sum / n as f64;
        if parent_sse <= 1e-12 {
            return Node::Leaf(mean);
        }

        // samples are sorted by t; scan split positions with running sums
        let mut best: Option<(usize, f64)> = None;
        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for i in 1..n {
            let y = samples[i - 1].1;
            left_sum += y;
            left_sq += y * y;

            if i < self.min_samples_leaf || n - i < self.min_samples_leaf {
                continue;
            }
            if samples[i - 1].0 >= samples[i].0 {
                continue;
            }

            let nl = i as f64;
            let nr = (n - i) as f64;
            let right_sum = sum - left_sum;
            let right_sq = sum_sq - left_sq;
            let sse = (left_sq - left_sum * left_sum / nl) + (right_sq - right_sum * right_sum / nr);

            if best.map_or(true, |(_, b)| sse < b) {
                best = Some((i, sse));
            }
        }

        match best {
            Some((i, sse)) if sse < parent_sse => {
                let threshold = (samples[i - 1].0 + samples[i].0) / 2.0;
                let (left, right) = samples.split_at(i);
                Node::Split {
                    threshold,
                    left: Box::new(self.grow(left, depth + 1)),
                    right: Box::new(self.grow(right, depth + 1)),
                }
            }
            _ => Node::Leaf(mean),
        }
    }
}

impl Smoother for ForestSmoother {
    fn smooth(&self, t: &[f64], y: &[f64]) -> Result<Vec<f64>> {
        check_smoothing_input(t, y)?;
        self.validate()?;

        let n = y.len();
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut totals = vec![0.0; n];

        for _ in 0..self.trees {
            let mut sample: Vec<(f64, f64)> = (0..n)
                .map(|_| {
                    let i = rng.gen_range(0..n);
                    (t[i], y[i])
                })
                .collect();
            sample.sort_by(|a, b| a.0.total_cmp(&b.0));

            let tree = self.grow(&sample, 0);
            for (total, &ti) in totals.iter_mut().zip(t.iter()) {
                *total += tree.predict(ti);
            }
        }

        debug!(trees = self.trees, seed = self.seed, "fitted forest");

        let count = self.trees as f64;
        Ok(totals.into_iter().map(|v| v / count).collect())
    }

    fn name(&self) -> &str {
        "random-forest"
    }
}
