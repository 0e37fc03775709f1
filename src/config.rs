//! Ranking configuration
//!
//! One flat set of knobs shared by both algorithms, loadable from YAML:
//!
//! ```yaml
//! damping_factor: 0.85
//! samples: 10000
//! seed: 42
//! chains: 4
//! epsilon: 0.001
//! max_iterations: 1000
//! parallel: true
//! ```
//!
//! Missing keys fall back to [`RankerConfig::default`].

use linkrank_algorithms::{PageRankConfig, SamplingConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for a ranking run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    /// Probability of following a link rather than jumping
    pub damping_factor: f64,
    /// Pages visited by the sampling estimator
    pub samples: usize,
    /// Seed for the sampling estimator; random when unset
    pub seed: Option<u64>,
    /// Independent sampling chains
    pub chains: usize,
    /// Convergence threshold of the iterative solver
    pub epsilon: f64,
    /// Iteration cap of the iterative solver
    pub max_iterations: usize,
    /// Parallel per-page updates in the iterative solver
    pub parallel: bool,
}

impl Default for RankerConfig {
    fn default() -> Self {
        let sampling = SamplingConfig::default();
        let pagerank = PageRankConfig::default();
        Self {
            damping_factor: pagerank.damping_factor,
            samples: sampling.samples,
            seed: sampling.seed,
            chains: sampling.chains,
            epsilon: pagerank.epsilon,
            max_iterations: pagerank.max_iterations,
            parallel: pagerank.parallel,
        }
    }
}

impl RankerConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Reject settings either algorithm would refuse
    pub fn validate(&self) -> ConfigResult<()> {
        self.sampling()
            .validate::<String>()
            .and_then(|_| self.pagerank().validate::<String>())
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn sampling(&self) -> SamplingConfig {
        SamplingConfig {
            damping_factor: self.damping_factor,
            samples: self.samples,
            seed: self.seed,
            chains: self.chains,
        }
    }

    pub fn pagerank(&self) -> PageRankConfig {
        PageRankConfig {
            damping_factor: self.damping_factor,
            epsilon: self.epsilon,
            max_iterations: self.max_iterations,
            parallel: self.parallel,
        }
    }
}
