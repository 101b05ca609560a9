//! Regression smoothers
//!
//! Interchangeable strategies fitted to the observed curve:
//!
//! - **Polynomial**: least squares on a polynomial basis (default degree 3)
//! - **Random forest**: bagged regression trees over the time feature
//! - **Kernel**: RBF kernel ridge regression
//! - **None**: prediction equals observation

pub mod forest;
pub mod identity;
pub mod kernel;
mod linalg;
pub mod polynomial;

pub use forest::ForestSmoother;
pub use identity::IdentitySmoother;
pub use kernel::KernelSmoother;
pub use polynomial::PolynomialSmoother;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use twin_spi::{Result, Smoother, TwinError};

/// Strategy selector used by configuration, the CLI, and the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SmootherKind {
    #[default]
    Polynomial,
    RandomForest,
    Kernel,
    None,
}

impl SmootherKind {
    pub fn all() -> &'static [SmootherKind] {
        &[
            SmootherKind::Polynomial,
            SmootherKind::RandomForest,
            SmootherKind::Kernel,
            SmootherKind::None,
        ]
    }

    /// Identifier accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            SmootherKind::Polynomial => "polynomial",
            SmootherKind::RandomForest => "random-forest",
            SmootherKind::Kernel => "kernel",
            SmootherKind::None => "none",
        }
    }

    /// Human-readable name for tables and charts.
    pub fn label(self) -> &'static str {
        match self {
            SmootherKind::Polynomial => "Polynomial Regression",
            SmootherKind::RandomForest => "Random Forest",
            SmootherKind::Kernel => "Kernel Ridge (RBF)",
            SmootherKind::None => "None",
        }
    }

    /// Next strategy in cycling order, wrapping around.
    pub fn next(self) -> Self {
        let all = Self::all();
        let i = all.iter().position(|k| *k == self).unwrap_or(0);
        all[(i + 1) % all.len()]
    }
}

impl fmt::Display for SmootherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SmootherKind {
    type Err = TwinError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "polynomial" | "poly" => Ok(SmootherKind::Polynomial),
            "random-forest" | "forest" | "rf" => Ok(SmootherKind::RandomForest),
            "kernel" | "svr" => Ok(SmootherKind::Kernel),
            "none" | "identity" => Ok(SmootherKind::None),
            other => Err(TwinError::invalid_parameter(
                "model",
                format!(
                    "unknown smoother '{}', expected polynomial, random-forest, kernel or none",
                    other
                ),
            )),
        }
    }
}

fn default_degree() -> usize {
    polynomial::DEFAULT_DEGREE
}

fn default_trees() -> usize {
    forest::DEFAULT_TREES
}

fn default_min_samples_leaf() -> usize {
    1
}

fn default_forest_seed() -> u64 {
    forest::DEFAULT_FOREST_SEED
}

fn default_regularization() -> f64 {
    kernel::DEFAULT_REGULARIZATION
}

/// Strategy choice plus the tuning knobs of every strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmootherSettings {
    #[serde(default)]
    pub kind: SmootherKind,
    #[serde(default = "default_degree")]
    pub degree: usize,
    #[serde(default = "default_trees")]
    pub trees: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    #[serde(default = "default_min_samples_leaf")]
    pub min_samples_leaf: usize,
    #[serde(default = "default_forest_seed")]
    pub forest_seed: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma: Option<f64>,
    #[serde(default = "default_regularization")]
    pub regularization: f64,
}

impl Default for SmootherSettings {
    fn default() -> Self {
        Self {
            kind: SmootherKind::default(),
            degree: default_degree(),
            trees: default_trees(),
            max_depth: None,
            min_samples_leaf: default_min_samples_leaf(),
            forest_seed: default_forest_seed(),
            gamma: None,
            regularization: default_regularization(),
        }
    }
}

impl SmootherSettings {
    pub fn with_kind(mut self, kind: SmootherKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check the settings of the selected strategy.
    pub fn validate(&self) -> Result<()> {
        match self.kind {
            SmootherKind::Polynomial => self.polynomial().validate(),
            SmootherKind::RandomForest => self.forest().validate(),
            SmootherKind::Kernel => self.kernel().validate(),
            SmootherKind::None => Ok(()),
        }
    }

    /// Instantiate the selected strategy.
    pub fn build(&self) -> Result<Box<dyn Smoother>> {
        self.validate()?;
        Ok(match self.kind {
            SmootherKind::Polynomial => Box::new(self.polynomial()),
            SmootherKind::RandomForest => Box::new(self.forest()),
            SmootherKind::Kernel => Box::new(self.kernel()),
            SmootherKind::None => Box::new(IdentitySmoother),
        })
    }

    fn polynomial(&self) -> PolynomialSmoother {
        PolynomialSmoother::new(self.degree)
    }

    fn forest(&self) -> ForestSmoother {
        ForestSmoother::new(self.trees, self.forest_seed)
            .with_max_depth(self.max_depth)
            .with_min_samples_leaf(self.min_samples_leaf)
    }

    fn kernel(&self) -> KernelSmoother {
        KernelSmoother::new(self.gamma, self.regularization)
    }
}

impl From<SmootherKind> for SmootherSettings {
    fn from(kind: SmootherKind) -> Self {
        Self::default().with_kind(kind)
    }
}
