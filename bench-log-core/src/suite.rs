//! Named collections of problems
//!
//! A suite enumerates problem descriptors (problem, then instance, then
//! dimension) and builds each problem through a caller-supplied factory.
//! Loggers attached to the suite see the suite name first and are then
//! attached to every problem produced.

use crate::logger::SharedLogger;
use crate::problem::Problem;
use crate::types::{LoggerError, ProblemDescriptor, Result};

/// Suite of problems built on demand
pub struct Suite<F>
where
    F: FnMut(&ProblemDescriptor) -> Problem,
{
    name: String,
    problem_ids: Vec<usize>,
    instances: Vec<usize>,
    dimensions: Vec<usize>,
    factory: F,
    loggers: Vec<SharedLogger>,
}

impl<F> Suite<F>
where
    F: FnMut(&ProblemDescriptor) -> Problem,
{
    /// Create a suite; every axis must be non-empty
    pub fn new(
        name: impl Into<String>,
        problem_ids: Vec<usize>,
        instances: Vec<usize>,
        dimensions: Vec<usize>,
        factory: F,
    ) -> Result<Self> {
        let name = name.into();
        for (axis, values) in [
            ("problem_ids", &problem_ids),
            ("instances", &instances),
            ("dimensions", &dimensions),
        ] {
            if values.is_empty() {
                return Err(LoggerError::InvalidConfig(format!(
                    "suite '{}' has no {}",
                    name, axis
                )));
            }
        }
        if dimensions.contains(&0) {
            return Err(LoggerError::InvalidConfig(format!(
                "suite '{}' has a zero dimension",
                name
            )));
        }

        Ok(Self {
            name,
            problem_ids,
            instances,
            dimensions,
            factory,
            loggers: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attach a logger to the suite and every problem it will produce
    pub fn attach_logger(&mut self, logger: SharedLogger) {
        logger.borrow_mut().attach_suite(&self.name);
        self.loggers.push(logger);
    }

    /// All descriptors in iteration order
    pub fn descriptors(&self) -> Vec<ProblemDescriptor> {
        let mut descriptors =
            Vec::with_capacity(self.problem_ids.len() * self.instances.len() * self.dimensions.len());
        for &problem_id in &self.problem_ids {
            for &instance_id in &self.instances {
                for &dimension in &self.dimensions {
                    descriptors.push(ProblemDescriptor::new(problem_id, instance_id, dimension));
                }
            }
        }
        descriptors
    }

    pub fn len(&self) -> usize {
        self.problem_ids.len() * self.instances.len() * self.dimensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build the problems one at a time, with the suite's loggers attached
    /// and reset
    pub fn problems(&mut self) -> impl Iterator<Item = Problem> + '_ {
        let descriptors = self.descriptors();
        descriptors.into_iter().map(move |descriptor| {
            log::debug!("Suite {}: building {}", self.name, descriptor);
            let mut problem = (self.factory)(&descriptor);
            problem.attach_suite(&self.name);
            for logger in &self.loggers {
                problem.attach_logger(logger.clone());
            }
            // Trigger state left over from the previous problem is cleared here
            problem.reset();
            problem
        })
    }
}

impl<F> std::fmt::Debug for Suite<F>
where
    F: FnMut(&ProblemDescriptor) -> Problem,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Suite")
            .field("name", &self.name)
            .field("problem_ids", &self.problem_ids)
            .field("instances", &self.instances)
            .field("dimensions", &self.dimensions)
            .field("loggers", &self.loggers.len())
            .finish()
    }
}
