//! Fan-out of one event stream to several loggers
//!
//! Every lifecycle call is forwarded to each logger. A failing logger does
//! not stop delivery to the others; the failures are collected into a single
//! [`LoggerError::Fanout`].

use crate::logger::{Logger, LoggerCore, SharedLogger};
use crate::types::{EvaluationSnapshot, LoggerError, ProblemDescriptor, Result};

/// Logger forwarding to a list of shared loggers
#[derive(Default)]
pub struct Combine {
    core: LoggerCore,
    loggers: Vec<SharedLogger>,
}

impl Combine {
    pub fn new(loggers: Vec<SharedLogger>) -> Self {
        Self {
            core: LoggerCore::default(),
            loggers,
        }
    }

    /// Add a logger. It is brought up to date with the current suite and
    /// problem.
    pub fn push(&mut self, logger: SharedLogger) {
        {
            let mut inner = logger.borrow_mut();
            if let Some(suite) = self.core.suite() {
                inner.attach_suite(suite);
            }
            if let Some(problem) = self.core.problem() {
                inner.attach_problem(problem);
            }
        }
        self.loggers.push(logger);
    }

    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }

    pub fn loggers(&self) -> &[SharedLogger] {
        &self.loggers
    }
}

impl std::fmt::Debug for Combine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Combine")
            .field("core", &self.core)
            .field("loggers", &self.loggers.len())
            .finish()
    }
}

impl Logger for Combine {
    fn core(&self) -> &LoggerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut LoggerCore {
        &mut self.core
    }

    fn handle(&mut self, _snapshot: &EvaluationSnapshot) -> Result<()> {
        Ok(())
    }

    fn attach_problem(&mut self, problem: &ProblemDescriptor) {
        self.core.attach_problem(problem);
        for logger in &self.loggers {
            logger.borrow_mut().attach_problem(problem);
        }
    }

    fn attach_suite(&mut self, suite_name: &str) {
        self.core.attach_suite(suite_name);
        for logger in &self.loggers {
            logger.borrow_mut().attach_suite(suite_name);
        }
    }

    /// Deliver to every logger, then report the failures
    fn log(&mut self, snapshot: &EvaluationSnapshot) -> Result<()> {
        if !self.core.is_attached() {
            return Err(LoggerError::Unattached);
        }

        let mut errors = Vec::new();
        for (idx, logger) in self.loggers.iter().enumerate() {
            if let Err(e) = logger.borrow_mut().log(snapshot) {
                log::warn!("Logger {} failed: {}", idx, e);
                errors.push(e);
            }
        }

        let failed = errors.len();
        match errors.into_iter().next() {
            None => Ok(()),
            Some(first) => Err(LoggerError::Fanout {
                failed,
                total: self.loggers.len(),
                first: Box::new(first),
            }),
        }
    }

    fn reset(&mut self) {
        self.core.reset();
        for logger in &self.loggers {
            logger.borrow_mut().reset();
        }
    }

    /// First logger exposing the property wins
    fn property(&self, name: &str) -> Result<Option<f64>> {
        for logger in &self.loggers {
            match logger.borrow().property(name) {
                Err(LoggerError::PropertyNotFound(_)) => continue,
                other => return other,
            }
        }
        Err(LoggerError::PropertyNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EcdfConfig;
    use crate::ecdf::{EcdfLogger, EcdfSum, Reducer};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Fails on every handled event
    #[derive(Default)]
    struct Failing {
        core: LoggerCore,
    }

    impl Logger for Failing {
        fn core(&self) -> &LoggerCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut LoggerCore {
            &mut self.core
        }

        fn handle(&mut self, _snapshot: &EvaluationSnapshot) -> Result<()> {
            Err(LoggerError::InvalidConfig("broken handler".to_string()))
        }
    }

    fn failing() -> SharedLogger {
        let core = LoggerCore::new(crate::triggers::any(vec![crate::triggers::always()]), vec![])
            .unwrap();
        Rc::new(RefCell::new(Failing { core }))
    }

    fn ecdf() -> Rc<RefCell<EcdfLogger>> {
        let config = EcdfConfig::new(0.0, 100.0, 10, 0.0, 10.0, 10);
        Rc::new(RefCell::new(EcdfLogger::new(config).unwrap()))
    }

    fn shared(logger: &Rc<RefCell<EcdfLogger>>) -> SharedLogger {
        logger.clone()
    }

    #[test]
    fn test_log_requires_attach() {
        let mut combine = Combine::new(vec![shared(&ecdf())]);
        assert!(matches!(
            combine.log(&EvaluationSnapshot::first(1.0, 1.0)),
            Err(LoggerError::Unattached)
        ));

        let mut empty = Combine::default();
        assert!(empty.is_empty());
        assert!(matches!(
            empty.log(&EvaluationSnapshot::first(1.0, 1.0)),
            Err(LoggerError::Unattached)
        ));
        empty.attach_problem(&ProblemDescriptor::new(1, 1, 2));
        assert!(empty.log(&EvaluationSnapshot::first(1.0, 1.0)).is_ok());
    }

    #[test]
    fn test_failure_is_isolated() {
        let healthy = ecdf();
        let mut combine = Combine::new(vec![failing(), shared(&healthy), failing()]);
        combine.attach_problem(&ProblemDescriptor::new(1, 1, 2));

        let err = combine.log(&EvaluationSnapshot::first(35.0, 35.0)).unwrap_err();
        assert!(matches!(
            err,
            LoggerError::Fanout { failed: 2, total: 3, ref first }
                if matches!(**first, LoggerError::InvalidConfig(_))
        ));
        assert_eq!(EcdfSum.reduce(healthy.borrow().data()), 7);
    }

    #[test]
    fn test_lifecycle_forwarding() {
        let first = ecdf();
        let second = ecdf();
        let mut combine = Combine::new(vec![shared(&first)]);
        combine.attach_suite("bbob");
        combine.attach_problem(&ProblemDescriptor::new(1, 1, 2));
        combine.push(shared(&second));
        assert_eq!(combine.len(), 2);

        combine.log(&EvaluationSnapshot::first(35.0, 35.0)).unwrap();
        combine.reset();
        combine.log(&EvaluationSnapshot::first(35.0, 35.0)).unwrap();

        for logger in [&first, &second] {
            let logger = logger.borrow();
            assert_eq!(logger.core().suite(), Some("bbob"));
            assert_eq!(logger.size().runs, 2);
        }
    }

    #[test]
    fn test_property_lookup() {
        let mut combine = Combine::new(vec![failing(), shared(&ecdf())]);
        combine.attach_problem(&ProblemDescriptor::new(1, 1, 2));
        assert_eq!(combine.property("evaluations").unwrap(), None);
        combine.log(&EvaluationSnapshot::first(35.0, 35.0)).unwrap_err();
        assert_eq!(combine.property("evaluations").unwrap(), Some(1.0));
        assert!(matches!(
            combine.property("missing"),
            Err(LoggerError::PropertyNotFound(_))
        ));
    }
}
