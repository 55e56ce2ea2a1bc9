//! Attainment grid configuration
//!
//! This module defines the configuration of the ECDF logger: the target and
//! budget axes of the attainment grid, and what happens when the logger is
//! moved to another suite.

use crate::types::{LoggerError, Result};
use serde::{Deserialize, Serialize};

/// Spacing of the bins along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    #[default]
    Linear,
    /// Logarithmic spacing, requires a strictly positive lower bound
    Log,
}

/// Behaviour of `attach_suite` when the suite name changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuiteChange {
    /// Keep the grid; the suite name becomes part of the function key
    #[default]
    Rekey,
    /// Discard the accumulated grid
    Clear,
}

/// Bounds and bin count of one grid axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub min: f64,
    pub max: f64,
    pub bins: usize,
    #[serde(default)]
    pub scale: Scale,
}

impl AxisConfig {
    pub fn linear(min: f64, max: f64, bins: usize) -> Self {
        Self {
            min,
            max,
            bins,
            scale: Scale::Linear,
        }
    }

    pub fn log(min: f64, max: f64, bins: usize) -> Self {
        Self {
            min,
            max,
            bins,
            scale: Scale::Log,
        }
    }

    /// Check bounds and bin count
    pub fn validate(&self, axis: &str) -> Result<()> {
        if self.bins == 0 {
            return Err(LoggerError::InvalidConfig(format!("{} axis needs at least one bin", axis)));
        }
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(LoggerError::InvalidConfig(format!(
                "{} axis bounds must be finite with min < max, got [{}, {}]",
                axis, self.min, self.max
            )));
        }
        if self.scale == Scale::Log && self.min <= 0.0 {
            return Err(LoggerError::InvalidConfig(format!(
                "{} axis is logarithmic and needs min > 0, got {}",
                axis, self.min
            )));
        }
        Ok(())
    }
}

/// Configuration of the ECDF logger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcdfConfig {
    /// Target values (transformed objective values)
    #[serde(default = "default_targets")]
    pub targets: AxisConfig,

    /// Evaluation budgets
    #[serde(default = "default_budgets")]
    pub budgets: AxisConfig,

    /// What `attach_suite` does with the grid
    #[serde(default)]
    pub suite_change: SuiteChange,
}

fn default_targets() -> AxisConfig {
    AxisConfig::log(1e-8, 1e8, 20)
}

fn default_budgets() -> AxisConfig {
    AxisConfig::linear(0.0, 1000.0, 20)
}

impl Default for EcdfConfig {
    fn default() -> Self {
        Self {
            targets: default_targets(),
            budgets: default_budgets(),
            suite_change: SuiteChange::default(),
        }
    }
}

impl EcdfConfig {
    /// Create a configuration with linear axes
    pub fn new(
        target_min: f64,
        target_max: f64,
        target_bins: usize,
        budget_min: f64,
        budget_max: f64,
        budget_bins: usize,
    ) -> Self {
        Self {
            targets: AxisConfig::linear(target_min, target_max, target_bins),
            budgets: AxisConfig::linear(budget_min, budget_max, budget_bins),
            suite_change: SuiteChange::default(),
        }
    }

    /// Builder method: set the target axis
    pub fn with_targets(mut self, targets: AxisConfig) -> Self {
        self.targets = targets;
        self
    }

    /// Builder method: set the budget axis
    pub fn with_budgets(mut self, budgets: AxisConfig) -> Self {
        self.budgets = budgets;
        self
    }

    /// Builder method: set the suite change policy
    pub fn with_suite_change(mut self, suite_change: SuiteChange) -> Self {
        self.suite_change = suite_change;
        self
    }

    /// Check both axes
    pub fn validate(&self) -> Result<()> {
        self.targets.validate("target")?;
        self.budgets.validate("budget")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ecdf_config_builder() {
        let config = EcdfConfig::new(0.0, 6e7, 20, 0.0, 100.0, 20)
            .with_targets(AxisConfig::log(1e-8, 1e2, 10))
            .with_suite_change(SuiteChange::Clear);

        assert_eq!(config.targets.scale, Scale::Log);
        assert_eq!(config.targets.bins, 10);
        assert_eq!(config.budgets.max, 100.0);
        assert_eq!(config.suite_change, SuiteChange::Clear);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(AxisConfig::linear(0.0, 1.0, 0).validate("target").is_err());
        assert!(AxisConfig::linear(1.0, 1.0, 4).validate("target").is_err());
        assert!(AxisConfig::linear(f64::NAN, 1.0, 4).validate("target").is_err());
        assert!(AxisConfig::log(0.0, 1.0, 4).validate("target").is_err());
        assert!(AxisConfig::linear(0.0, 1.0, 4).validate("target").is_ok());
        assert!(EcdfConfig::default().validate().is_ok());
    }

    #[test]
    fn test_deserialization_defaults() {
        let config: EcdfConfig = serde_json::from_str(
            r#"{"targets": {"min": 0.0, "max": 60000000.0, "bins": 20}}"#,
        )
        .unwrap();
        assert_eq!(config.targets.scale, Scale::Linear);
        assert_eq!(config.budgets, default_budgets());
        assert_eq!(config.suite_change, SuiteChange::Rekey);
    }
}
