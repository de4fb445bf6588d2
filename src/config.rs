//! Run configuration
//!
//! One YAML document covers the ranking engine, the worker pool and the
//! graph generator. Every field is optional; omitted ones take their defaults.
//!
//! ```yaml
//! iterations: 20
//! relationship_types: [FRIEND_OF]
//! seed: 42
//! pagerank:
//!   damping_factor: 0.85
//!   dangling: redistribute
//! pool:
//!   workers: 4
//! generator:
//!   node_count: 1000
//!   mean_degree: 10
//!   beta: 0.5
//! ```

use graphrank_algorithms::{AlgoError, PageRankConfig, PoolConfig, WattsStrogatzConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(#[from] AlgoError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphRankConfig {
    pub pagerank: PageRankConfig,
    pub pool: PoolConfig,
    pub generator: WattsStrogatzConfig,
    /// Fixed number of PageRank iterations
    pub iterations: usize,
    /// Relationship types to rank over; empty means all
    pub relationship_types: Vec<String>,
    /// Seed for reproducible generation
    pub seed: Option<u64>,
}

impl Default for GraphRankConfig {
    fn default() -> Self {
        Self {
            pagerank: PageRankConfig::default(),
            pool: PoolConfig::default(),
            generator: WattsStrogatzConfig::default(),
            iterations: 20,
            relationship_types: Vec::new(),
            seed: None,
        }
    }
}

impl GraphRankConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: GraphRankConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml_string(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.iterations == 0 {
            return Err(AlgoError::InvalidIterationCount(0).into());
        }
        if self.pool.workers == 0 {
            return Err(AlgoError::InvalidConfig("pool needs at least one worker".to_string()).into());
        }
        self.pagerank.validate()?;
        self.generator.validate()?;
        Ok(())
    }

    /// Relationship types as the borrowed slice the engine takes
    pub fn relationship_type_refs(&self) -> Vec<&str> {
        self.relationship_types.iter().map(String::as_str).collect()
    }
}
