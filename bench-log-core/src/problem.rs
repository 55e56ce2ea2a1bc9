//! Problem wrapper driving attached loggers
//!
//! A [`Problem`] wraps a caller-supplied objective function. Each call
//! updates the run state, builds one [`EvaluationSnapshot`] with the running
//! bests already included, and delivers it to every attached logger.

use crate::combine::Combine;
use crate::logger::{Logger, SharedLogger};
use crate::types::{EvaluationSnapshot, ProblemDescriptor, Result};

type Objective = Box<dyn FnMut(&[f64]) -> f64>;
type Transform = Box<dyn Fn(f64) -> f64>;

/// Running state of the current run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunState {
    pub evaluations: usize,
    pub raw_y_best: f64,
    pub transformed_y_best: f64,
}

impl RunState {
    fn new(worst: f64) -> Self {
        Self {
            evaluations: 0,
            raw_y_best: worst,
            transformed_y_best: worst,
        }
    }
}

/// Objective function with run state and attached loggers
pub struct Problem {
    descriptor: ProblemDescriptor,
    objective: Objective,
    transform: Transform,
    optimum: Option<f64>,
    state: RunState,
    loggers: Combine,
}

impl Problem {
    /// Wrap an objective function
    pub fn new(descriptor: ProblemDescriptor, objective: impl FnMut(&[f64]) -> f64 + 'static) -> Self {
        let mut loggers = Combine::default();
        loggers.attach_problem(&descriptor);
        Self {
            state: RunState::new(descriptor.optimization_type.worst_value()),
            descriptor,
            objective: Box::new(objective),
            transform: Box::new(|y| y),
            optimum: None,
            loggers,
        }
    }

    /// Builder method: map raw objective values to transformed ones
    pub fn with_transform(mut self, transform: impl Fn(f64) -> f64 + 'static) -> Self {
        self.transform = Box::new(transform);
        self
    }

    /// Builder method: set the known optimum
    pub fn with_optimum(mut self, optimum: f64) -> Self {
        self.optimum = Some(optimum);
        self
    }

    pub fn descriptor(&self) -> &ProblemDescriptor {
        &self.descriptor
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Attach a logger; it is bound to this problem immediately
    pub fn attach_logger(&mut self, logger: SharedLogger) {
        self.loggers.push(logger);
    }

    /// Announce the suite this problem belongs to
    pub fn attach_suite(&mut self, suite_name: &str) {
        self.loggers.attach_suite(suite_name);
    }

    pub fn loggers(&self) -> &[SharedLogger] {
        self.loggers.loggers()
    }

    /// Evaluate the objective and notify the loggers
    ///
    /// The state is updated even if a logger fails; the failure is returned
    /// after every logger has seen the snapshot.
    pub fn evaluate(&mut self, x: &[f64]) -> Result<f64> {
        let raw_y = (self.objective)(x);
        let transformed_y = (self.transform)(raw_y);

        let direction = self.descriptor.optimization_type;
        self.state.evaluations += 1;
        if direction.is_better(raw_y, self.state.raw_y_best) {
            self.state.raw_y_best = raw_y;
        }
        if direction.is_better(transformed_y, self.state.transformed_y_best) {
            self.state.transformed_y_best = transformed_y;
        }

        let snapshot = EvaluationSnapshot {
            raw_y,
            transformed_y,
            raw_y_best: self.state.raw_y_best,
            transformed_y_best: self.state.transformed_y_best,
            evaluations: self.state.evaluations,
            optimum: self.optimum,
        };
        if !self.loggers.is_empty() {
            self.loggers.log(&snapshot)?;
        }
        Ok(raw_y)
    }

    /// Start a new run: clear the state and reset every logger
    pub fn reset(&mut self) {
        log::debug!("Resetting problem {}", self.descriptor);
        self.state = RunState::new(self.descriptor.optimization_type.worst_value());
        self.loggers.reset();
        self.loggers.attach_problem(&self.descriptor);
    }
}

impl std::fmt::Debug for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Problem")
            .field("descriptor", &self.descriptor)
            .field("state", &self.state)
            .field("optimum", &self.optimum)
            .field("loggers", &self.loggers.len())
            .finish()
    }
}
