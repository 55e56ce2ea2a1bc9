//! In-memory recording of watched properties
//!
//! The store keeps one row per handled event, holding the value of every
//! watched property in registration order. Rows are grouped per run.

use crate::logger::{Logger, LoggerCore, Watcher};
use crate::properties::Property;
use crate::triggers::TriggerSet;
use crate::types::{EvaluationSnapshot, LoggerError, ProblemDescriptor, Result};
use std::collections::BTreeMap;

/// Identifies one run of one problem
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunKey {
    pub suite: String,
    pub problem_id: usize,
    pub dimension: usize,
    pub instance: usize,
    pub run: usize,
}

/// Values of the watched properties at one event
pub type Record = Vec<Option<f64>>;

/// Logger keeping every handled event in memory
#[derive(Debug)]
pub struct Store {
    core: LoggerCore,
    records: BTreeMap<RunKey, Vec<Record>>,
    /// Run receiving rows; `None` until the first handled event of a run
    current: Option<RunKey>,
}

impl Store {
    /// Create a store with the given triggers and initial properties
    pub fn new(triggers: TriggerSet, properties: Vec<Box<dyn Property>>) -> Result<Self> {
        Ok(Self {
            core: LoggerCore::new(triggers, properties)?,
            records: BTreeMap::new(),
            current: None,
        })
    }

    /// Property names, i.e. the record columns
    pub fn columns(&self) -> Vec<String> {
        self.core.properties().names()
    }

    /// Rows of one run
    pub fn records(&self, key: &RunKey) -> Option<&[Record]> {
        self.records.get(key).map(|r| r.as_slice())
    }

    /// Runs with at least one row
    pub fn runs(&self) -> impl Iterator<Item = &RunKey> + '_ {
        self.records.keys()
    }

    /// Drop every row
    pub fn clear(&mut self) {
        self.records.clear();
        self.current = None;
    }

    /// Key for a fresh run of the attached problem
    fn next_run(&self, problem: &ProblemDescriptor) -> RunKey {
        let mut key = RunKey {
            suite: self.core.suite().unwrap_or_default().to_string(),
            problem_id: problem.problem_id,
            dimension: problem.n_variables,
            instance: problem.instance_id,
            run: 0,
        };
        key.run = self
            .records
            .keys()
            .filter(|k| {
                k.suite == key.suite
                    && k.problem_id == key.problem_id
                    && k.dimension == key.dimension
                    && k.instance == key.instance
            })
            .count();
        key
    }
}

impl Logger for Store {
    fn core(&self) -> &LoggerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut LoggerCore {
        &mut self.core
    }

    fn attach_problem(&mut self, problem: &ProblemDescriptor) {
        if self.core.attach_problem(problem) {
            self.current = None;
        }
    }

    fn attach_suite(&mut self, suite_name: &str) {
        if self.core.attach_suite(suite_name) {
            self.current = None;
        }
    }

    fn reset(&mut self) {
        self.core.reset();
        self.current = None;
    }

    fn handle(&mut self, snapshot: &EvaluationSnapshot) -> Result<()> {
        let key = match &self.current {
            Some(key) => key.clone(),
            None => {
                let problem = self.core.problem().ok_or(LoggerError::Unattached)?;
                self.next_run(problem)
            }
        };
        let row = self.core.properties().read_all(snapshot);
        self.records.entry(key.clone()).or_default().push(row);
        self.current = Some(key);
        Ok(())
    }
}

impl Watcher for Store {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::{watch, Reference};
    use crate::triggers::{any, on_improvement};
    use crate::types::OptimizationType;
    use std::cell::Cell;
    use std::rc::Rc;

    fn snapshot(y: f64, best: f64, evaluations: usize) -> EvaluationSnapshot {
        EvaluationSnapshot {
            raw_y: y,
            transformed_y: y,
            raw_y_best: best,
            transformed_y_best: best,
            evaluations,
            optimum: None,
        }
    }

    fn store() -> Store {
        let triggers = any(vec![on_improvement(OptimizationType::Minimization)]);
        Store::new(triggers, vec![watch::evaluations(), watch::transformed_y_best()]).unwrap()
    }

    fn key(run: usize) -> RunKey {
        RunKey {
            suite: String::new(),
            problem_id: 1,
            dimension: 2,
            instance: 1,
            run,
        }
    }

    #[test]
    fn test_records_improvements() {
        let mut store = store();
        store.attach_problem(&ProblemDescriptor::new(1, 1, 2));
        store.log(&snapshot(5.0, 5.0, 1)).unwrap();
        store.log(&snapshot(7.0, 5.0, 2)).unwrap();
        store.log(&snapshot(3.0, 3.0, 3)).unwrap();

        assert_eq!(store.columns(), vec!["evaluations", "transformed_y_best"]);
        let rows = store.records(&key(0)).unwrap();
        assert_eq!(rows, &[vec![Some(1.0), Some(5.0)], vec![Some(3.0), Some(3.0)]]);
    }

    #[test]
    fn test_watch_adds_column() {
        let mut store = store();
        let step_size = Rc::new(Cell::new(0.5));
        store.watch(Box::new(Reference::new("step_size", step_size.clone()))).unwrap();
        assert!(store.watch(watch::evaluations()).is_err());

        store.attach_problem(&ProblemDescriptor::new(1, 1, 2));
        store.log(&snapshot(5.0, 5.0, 1)).unwrap();
        step_size.set(0.25);
        store.log(&snapshot(4.0, 4.0, 2)).unwrap();

        let rows = store.records(&key(0)).unwrap();
        assert_eq!(rows[0][2], Some(0.5));
        assert_eq!(rows[1][2], Some(0.25));
        assert_eq!(store.property("step_size").unwrap(), Some(0.25));
    }

    #[test]
    fn test_runs_are_separated() {
        let mut store = store();
        store.attach_problem(&ProblemDescriptor::new(1, 1, 2));
        store.log(&snapshot(5.0, 5.0, 1)).unwrap();
        store.reset();
        store.log(&snapshot(5.0, 5.0, 1)).unwrap();
        store.reset();

        assert_eq!(store.runs().count(), 2);
        assert_eq!(store.records(&key(1)).map(|r| r.len()), Some(1));

        store.clear();
        assert_eq!(store.runs().count(), 0);
    }

    #[test]
    fn test_log_requires_attach() {
        let mut store = store();
        assert!(matches!(
            store.log(&snapshot(5.0, 5.0, 1)),
            Err(LoggerError::Unattached)
        ));
    }
}
