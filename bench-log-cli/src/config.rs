//! Experiment configuration loading and parsing

use anyhow::{ensure, Context, Result};
use bench_log_core::EcdfConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main application configuration (loaded from experiment.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExperimentConfig {
    #[serde(default)]
    pub experiment: ExperimentSection,
    #[serde(default)]
    pub ecdf: EcdfConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExperimentSection {
    #[serde(default = "default_suite")]
    pub suite: String,
    pub functions: Vec<usize>,
    pub instances: Vec<usize>,
    pub dimensions: Vec<usize>,
    #[serde(default = "default_runs")]
    pub runs: usize,
    /// Evaluations per run
    #[serde(default = "default_budget")]
    pub budget: usize,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_bounds")]
    pub bounds: (f64, f64),
}

fn default_suite() -> String {
    "toy".to_string()
}

fn default_runs() -> usize {
    2
}

fn default_budget() -> usize {
    100
}

fn default_bounds() -> (f64, f64) {
    (-5.0, 5.0)
}

impl Default for ExperimentSection {
    fn default() -> Self {
        Self {
            suite: default_suite(),
            functions: vec![1, 2],
            instances: vec![1, 2],
            dimensions: vec![2, 5],
            runs: default_runs(),
            budget: default_budget(),
            seed: 0,
            bounds: default_bounds(),
        }
    }
}

impl ExperimentConfig {
    /// Check the experiment section and the grid configuration
    pub fn validate(&self) -> Result<()> {
        let e = &self.experiment;
        ensure!(!e.functions.is_empty(), "experiment.functions is empty");
        ensure!(!e.instances.is_empty(), "experiment.instances is empty");
        ensure!(!e.dimensions.is_empty(), "experiment.dimensions is empty");
        ensure!(e.runs > 0, "experiment.runs must be at least 1");
        ensure!(e.budget > 0, "experiment.budget must be at least 1");
        ensure!(
            e.bounds.0 < e.bounds.1,
            "experiment.bounds must be increasing, got {:?}",
            e.bounds
        );
        self.ecdf.validate().context("Invalid [ecdf] section")?;
        Ok(())
    }
}

/// Load and validate an experiment configuration from a TOML file
pub fn load_config(path: &Path) -> Result<ExperimentConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: ExperimentConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config
        .validate()
        .with_context(|| format!("Invalid config file: {:?}", path))?;

    Ok(config)
}
