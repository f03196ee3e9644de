use crate::algos::model_based::mdp::vi::{
    check_params, DEFAULT_GAMMA, DEFAULT_MAX_ITERATIONS, DEFAULT_THRESHOLD,
};
use rl_agent::{Continous, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Value iteration settings. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub gamma: Continous,
    pub threshold: Continous,
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            gamma: DEFAULT_GAMMA,
            threshold: DEFAULT_THRESHOLD,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        check_params(self.gamma, self.threshold, self.max_iterations)
    }
}
