//! Core types for the benchmark logging library
//!
//! This module defines the data that flows from a running problem into its
//! loggers: the problem descriptor handed over on attach, and the immutable
//! evaluation snapshot produced once per objective function call.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for logger operations
pub type Result<T> = std::result::Result<T, LoggerError>;

/// Errors that can occur while wiring or driving loggers
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("Logger has not been attached to a problem")]
    Unattached,

    #[error("Property already watched: {0}")]
    DuplicateProperty(String),

    #[error("Property not found: {0}")]
    PropertyNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{failed} of {total} loggers failed, first error: {first}")]
    Fanout {
        failed: usize,
        total: usize,
        first: Box<LoggerError>,
    },
}

/// Direction of optimization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OptimizationType {
    /// Lower objective values are better
    #[default]
    Minimization,
    /// Higher objective values are better
    Maximization,
}

impl OptimizationType {
    /// Value every real objective value improves on
    pub fn worst_value(&self) -> f64 {
        match self {
            OptimizationType::Minimization => f64::INFINITY,
            OptimizationType::Maximization => f64::NEG_INFINITY,
        }
    }

    /// True if `candidate` is strictly better than `reference`
    pub fn is_better(&self, candidate: f64, reference: f64) -> bool {
        match self {
            OptimizationType::Minimization => candidate < reference,
            OptimizationType::Maximization => candidate > reference,
        }
    }
}

impl fmt::Display for OptimizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizationType::Minimization => write!(f, "Minimization"),
            OptimizationType::Maximization => write!(f, "Maximization"),
        }
    }
}

/// Identity of the problem a logger is attached to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProblemDescriptor {
    /// Stable numeric function id within its suite
    pub problem_id: usize,
    /// Instance id (transformation seed)
    pub instance_id: usize,
    /// Number of decision variables
    pub n_variables: usize,
    /// Optimization direction
    pub optimization_type: OptimizationType,
}

impl ProblemDescriptor {
    /// Create a descriptor for a minimization problem
    pub fn new(problem_id: usize, instance_id: usize, n_variables: usize) -> Self {
        Self {
            problem_id,
            instance_id,
            n_variables,
            optimization_type: OptimizationType::Minimization,
        }
    }

    /// Builder method: set the optimization direction
    pub fn with_optimization_type(mut self, optimization_type: OptimizationType) -> Self {
        self.optimization_type = optimization_type;
        self
    }
}

impl fmt::Display for ProblemDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "f{} i{} d{} ({})",
            self.problem_id, self.instance_id, self.n_variables, self.optimization_type
        )
    }
}

/// Immutable record of one objective function call
///
/// All running-best fields are already updated to include this call when
/// the snapshot reaches a trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationSnapshot {
    /// Objective value as returned by the function
    pub raw_y: f64,
    /// Objective value after the problem's transformation
    pub transformed_y: f64,
    /// Best raw value seen in this run
    pub raw_y_best: f64,
    /// Best transformed value seen in this run
    pub transformed_y_best: f64,
    /// Number of calls made in this run, this one included
    pub evaluations: usize,
    /// Known optimum of the problem, if any
    pub optimum: Option<f64>,
}

impl EvaluationSnapshot {
    /// Snapshot of a single, first evaluation
    pub fn first(raw_y: f64, transformed_y: f64) -> Self {
        Self {
            raw_y,
            transformed_y,
            raw_y_best: raw_y,
            transformed_y_best: transformed_y,
            evaluations: 1,
            optimum: None,
        }
    }

    /// Builder method: attach the known optimum
    pub fn with_optimum(mut self, optimum: f64) -> Self {
        self.optimum = Some(optimum);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimization_direction() {
        let min = OptimizationType::Minimization;
        assert!(min.is_better(1.0, 2.0));
        assert!(!min.is_better(2.0, 2.0));
        assert!(min.is_better(1e300, min.worst_value()));

        let max = OptimizationType::Maximization;
        assert!(max.is_better(3.0, 2.0));
        assert!(!max.is_better(2.0, 2.0));
        assert!(max.is_better(-1e300, max.worst_value()));
    }

    #[test]
    fn test_descriptor_display() {
        let problem = ProblemDescriptor::new(3, 1, 10);
        assert_eq!(format!("{}", problem), "f3 i1 d10 (Minimization)");
    }

    #[test]
    fn test_first_snapshot() {
        let snapshot = EvaluationSnapshot::first(12.0, 2.0).with_optimum(10.0);
        assert_eq!(snapshot.evaluations, 1);
        assert_eq!(snapshot.transformed_y_best, 2.0);
        assert_eq!(snapshot.optimum, Some(10.0));
    }
}
