//! Triggers deciding when a log event is handled
//!
//! A trigger sees every evaluation snapshot delivered to its logger and
//! answers whether the logger should act on it. Stateful triggers keep their
//! state privately and clear it on `reset()`, which the logger calls at the
//! start of every run.

pub mod set;

pub use set::{all, any, Combination, TriggerSet};

use crate::types::{EvaluationSnapshot, LoggerError, OptimizationType, ProblemDescriptor, Result};
use std::collections::BTreeSet;

/// Predicate over an evaluation event
pub trait Trigger {
    /// True if a log event is to be handled for this snapshot
    fn evaluate(&mut self, snapshot: &EvaluationSnapshot, problem: &ProblemDescriptor) -> bool;

    /// Clear any internal state. Safe to call before the first evaluation.
    fn reset(&mut self) {}
}

impl<T: Trigger + ?Sized> Trigger for Box<T> {
    fn evaluate(&mut self, snapshot: &EvaluationSnapshot, problem: &ProblemDescriptor) -> bool {
        (**self).evaluate(snapshot, problem)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

/// Fires on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct Always;

impl Trigger for Always {
    fn evaluate(&mut self, _snapshot: &EvaluationSnapshot, _problem: &ProblemDescriptor) -> bool {
        true
    }
}

/// Log at every call of the objective function
pub fn always() -> Box<dyn Trigger> {
    Box::new(Always)
}

/// Fires on a strict improvement of the transformed value
///
/// The held best is compared against `transformed_y`, not against the
/// snapshot's `transformed_y_best`: the latter already includes the current
/// call, so using it would only ever allow an equality test.
///
/// The direction is either fixed at construction or read from the attached
/// problem on every call.
#[derive(Debug, Clone, Default)]
pub struct OnImprovement {
    /// `None` until the first improvement after construction or reset
    best: Option<f64>,
    optimization_type: Option<OptimizationType>,
}

impl OnImprovement {
    /// Create a trigger for the given optimization direction
    pub fn new(optimization_type: OptimizationType) -> Self {
        Self {
            best: None,
            optimization_type: Some(optimization_type),
        }
    }

    /// Create a trigger using the direction of the problem it is evaluated on
    pub fn following_problem() -> Self {
        Self::default()
    }

    /// Best transformed value seen since the last reset
    pub fn best(&self) -> Option<f64> {
        self.best
    }
}

impl Trigger for OnImprovement {
    fn evaluate(&mut self, snapshot: &EvaluationSnapshot, problem: &ProblemDescriptor) -> bool {
        let direction = self.optimization_type.unwrap_or(problem.optimization_type);
        let held = self.best.unwrap_or_else(|| direction.worst_value());
        if direction.is_better(snapshot.transformed_y, held) {
            self.best = Some(snapshot.transformed_y);
            return true;
        }
        false
    }

    fn reset(&mut self) {
        self.best = None;
    }
}

/// Log whenever the transformed value strictly improves
pub fn on_improvement(optimization_type: OptimizationType) -> Box<dyn Trigger> {
    Box::new(OnImprovement::new(optimization_type))
}

/// Log whenever the transformed value strictly improves in the direction of
/// the attached problem
pub fn on_problem_improvement() -> Box<dyn Trigger> {
    Box::new(OnImprovement::following_problem())
}

/// Fires every `interval` evaluations
#[derive(Debug, Clone)]
pub struct Each {
    interval: usize,
    starting_at_first: bool,
}

impl Each {
    /// Fire when the evaluation count is a multiple of `interval`
    pub fn new(interval: usize) -> Result<Self> {
        if interval == 0 {
            return Err(LoggerError::InvalidConfig(
                "trigger interval must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            interval,
            starting_at_first: false,
        })
    }

    /// Builder method: also fire on the very first evaluation
    pub fn starting_at_first(mut self, enabled: bool) -> Self {
        self.starting_at_first = enabled;
        self
    }
}

impl Trigger for Each {
    fn evaluate(&mut self, snapshot: &EvaluationSnapshot, _problem: &ProblemDescriptor) -> bool {
        (self.starting_at_first && snapshot.evaluations == 1)
            || snapshot.evaluations % self.interval == 0
    }
}

/// Fires at fixed evaluation counts
#[derive(Debug, Clone, Default)]
pub struct At {
    points: Vec<usize>,
}

impl At {
    /// Fire when the evaluation count equals one of `points`
    pub fn new(mut points: Vec<usize>) -> Self {
        points.sort_unstable();
        points.dedup();
        Self { points }
    }

    /// Fire at `1, base, base^2, ...` up to and including `limit`
    pub fn exponential(base: usize, limit: usize) -> Result<Self> {
        if base < 2 {
            return Err(LoggerError::InvalidConfig(format!(
                "exponential checkpoint base must be at least 2, got {}",
                base
            )));
        }
        let points = std::iter::successors(Some(1usize), |&p| p.checked_mul(base))
            .take_while(|&p| p <= limit)
            .collect();
        Ok(Self { points })
    }

    /// Checkpoints, sorted and deduplicated
    pub fn points(&self) -> &[usize] {
        &self.points
    }
}

impl Trigger for At {
    fn evaluate(&mut self, snapshot: &EvaluationSnapshot, _problem: &ProblemDescriptor) -> bool {
        self.points.binary_search(&snapshot.evaluations).is_ok()
    }
}

/// Fires the first time `transformed_y` lands in a range `[base^k, base^(k+1))`
///
/// Every non-positive value shares one range below all others. Visited
/// ranges are forgotten on reset. NaN and infinite values never fire.
#[derive(Debug, Clone)]
pub struct PerRange {
    base: f64,
    visited: BTreeSet<i64>,
}

impl PerRange {
    pub fn new(base: f64) -> Result<Self> {
        if !(base.is_finite() && base > 1.0) {
            return Err(LoggerError::InvalidConfig(format!(
                "range base must be finite and greater than 1, got {}",
                base
            )));
        }
        Ok(Self {
            base,
            visited: BTreeSet::new(),
        })
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    /// Exponent of the range holding `y`
    fn range_of(&self, y: f64) -> i64 {
        if y <= 0.0 {
            return i64::MIN;
        }
        let mut k = (y.ln() / self.base.ln()).floor();
        // ln rounding can land one range low on exact powers, or one high just below them
        if self.base.powf(k + 1.0) <= y {
            k += 1.0;
        } else if self.base.powf(k) > y {
            k -= 1.0;
        }
        k as i64
    }
}

impl Trigger for PerRange {
    fn evaluate(&mut self, snapshot: &EvaluationSnapshot, _problem: &ProblemDescriptor) -> bool {
        let y = snapshot.transformed_y;
        if !y.is_finite() {
            return false;
        }
        let range = self.range_of(y);
        self.visited.insert(range)
    }

    fn reset(&mut self) {
        self.visited.clear();
    }
}
