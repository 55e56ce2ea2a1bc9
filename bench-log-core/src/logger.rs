//! Logger interface and lifecycle
//!
//! A logger is attached to a problem, receives one snapshot per objective
//! function call through `log`, and asks its trigger set whether to handle
//! it. `reset` starts a new run: stateful triggers are cleared, accumulated
//! results are kept.
//!
//! Concrete loggers embed a [`LoggerCore`], which owns the trigger set, the
//! property registry and the attach state, and implement [`Logger::handle`].

use crate::properties::{Property, PropertyRegistry};
use crate::triggers::{Trigger, TriggerSet};
use crate::types::{EvaluationSnapshot, LoggerError, ProblemDescriptor, Result};
use std::cell::RefCell;
use std::rc::Rc;

/// Logger shared between a problem and the code that inspects it
pub type SharedLogger = Rc<RefCell<dyn Logger>>;

/// Whether a logger is bound to a problem
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AttachState {
    #[default]
    Unattached,
    Attached(ProblemDescriptor),
}

/// State shared by every logger implementation
#[derive(Debug, Default)]
pub struct LoggerCore {
    triggers: TriggerSet,
    properties: PropertyRegistry,
    state: AttachState,
    suite: Option<String>,
    /// Last snapshot delivered in the current run
    last: Option<EvaluationSnapshot>,
}

impl LoggerCore {
    /// Create an unattached core, failing on duplicate property names
    pub fn new(triggers: TriggerSet, properties: Vec<Box<dyn Property>>) -> Result<Self> {
        Ok(Self {
            triggers,
            properties: PropertyRegistry::from_properties(properties)?,
            ..Self::default()
        })
    }

    /// Bind to a problem. Returns true if the bound descriptor changed.
    ///
    /// Only the descriptor is replaced; triggers and the last snapshot are
    /// cleared by the `reset` that starts the next run.
    pub fn attach_problem(&mut self, problem: &ProblemDescriptor) -> bool {
        if matches!(&self.state, AttachState::Attached(current) if current == problem) {
            return false;
        }
        log::debug!("Attaching problem {}", problem);
        self.state = AttachState::Attached(problem.clone());
        true
    }

    /// Record the suite name. Returns true if it changed.
    pub fn attach_suite(&mut self, suite_name: &str) -> bool {
        if self.suite.as_deref() == Some(suite_name) {
            return false;
        }
        log::debug!("Attaching suite {}", suite_name);
        self.suite = Some(suite_name.to_string());
        true
    }

    /// Check the trigger set for this snapshot
    ///
    /// # Returns
    /// * `Err(Unattached)` if no problem was attached
    /// * `Ok(true)` if the logger should handle the snapshot
    pub fn should_handle(&mut self, snapshot: &EvaluationSnapshot) -> Result<bool> {
        let problem = match &self.state {
            AttachState::Unattached => return Err(LoggerError::Unattached),
            AttachState::Attached(problem) => problem,
        };
        self.last = Some(*snapshot);
        Ok(self.triggers.evaluate(snapshot, problem))
    }

    /// Start a new run: clear the triggers and the last snapshot
    pub fn reset(&mut self) {
        log::debug!("Resetting logger triggers");
        self.triggers.reset();
        self.last = None;
    }

    /// Register a property
    pub fn watch(&mut self, property: Box<dyn Property>) -> Result<()> {
        self.properties.insert(property)
    }

    /// Read a property against the last snapshot of the current run
    pub fn property(&self, name: &str) -> Result<Option<f64>> {
        self.properties.read(name, self.last.as_ref())
    }

    pub fn properties(&self) -> &PropertyRegistry {
        &self.properties
    }

    pub fn triggers(&self) -> &TriggerSet {
        &self.triggers
    }

    pub fn state(&self) -> &AttachState {
        &self.state
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.state, AttachState::Attached(_))
    }

    /// Descriptor of the attached problem
    pub fn problem(&self) -> Option<&ProblemDescriptor> {
        match &self.state {
            AttachState::Attached(problem) => Some(problem),
            AttachState::Unattached => None,
        }
    }

    pub fn suite(&self) -> Option<&str> {
        self.suite.as_deref()
    }

    pub fn last_snapshot(&self) -> Option<&EvaluationSnapshot> {
        self.last.as_ref()
    }
}

/// Interface of loggers
///
/// Implementors provide access to their [`LoggerCore`] and the handling
/// logic; the lifecycle methods have default implementations. Overrides of
/// `attach_problem` and `reset` must still forward to the core.
pub trait Logger {
    fn core(&self) -> &LoggerCore;

    fn core_mut(&mut self) -> &mut LoggerCore;

    /// Called for every snapshot the trigger set lets through
    fn handle(&mut self, snapshot: &EvaluationSnapshot) -> Result<()>;

    /// Bind to a new problem/instance. Calling it again with the same
    /// descriptor has no effect. Run state is kept until `reset`.
    fn attach_problem(&mut self, problem: &ProblemDescriptor) {
        self.core_mut().attach_problem(problem);
    }

    /// Announce the suite producing the next problems
    fn attach_suite(&mut self, suite_name: &str) {
        self.core_mut().attach_suite(suite_name);
    }

    /// Deliver one evaluation. Fails if no problem is attached.
    fn log(&mut self, snapshot: &EvaluationSnapshot) -> Result<()> {
        if self.core_mut().should_handle(snapshot)? {
            log::trace!(
                "Logger triggered at evaluation {} (best {})",
                snapshot.evaluations,
                snapshot.transformed_y_best
            );
            self.handle(snapshot)?;
        }
        Ok(())
    }

    /// Start a new run
    fn reset(&mut self) {
        self.core_mut().reset();
    }

    /// Look up a property by name
    fn property(&self, name: &str) -> Result<Option<f64>> {
        self.core().property(name)
    }
}

/// A logger to which properties can be added at runtime
pub trait Watcher: Logger {
    /// Register a property. Fails if the name is already watched.
    fn watch(&mut self, property: Box<dyn Property>) -> Result<()> {
        self.core_mut().watch(property)
    }
}
