//! ECDF aggregation logger
//!
//! Turns the stream of evaluations into an attainment grid: for each run it
//! records which (target, budget) pairs were reached. The grid is kept across
//! `reset` and `attach_problem` calls; only [`EcdfLogger::clear`] (or a suite
//! switch under [`SuiteChange::Clear`]) discards it.
//!
//! # Example
//!
//! ```
//! use bench_log_core::{EcdfConfig, EcdfLogger, EcdfSum, EvaluationSnapshot, Logger,
//!     ProblemDescriptor, Reducer};
//!
//! let mut logger = EcdfLogger::new(EcdfConfig::new(0.0, 100.0, 10, 0.0, 10.0, 10)).unwrap();
//! logger.attach_problem(&ProblemDescriptor::new(1, 1, 2));
//! logger.log(&EvaluationSnapshot::first(5.0, 5.0)).unwrap();
//!
//! // All ten targets at or above 5.0, first budget bin only
//! assert_eq!(EcdfSum.reduce(logger.data()), 10);
//! ```

pub mod grid;
pub mod range;
pub mod reducer;

pub use grid::{AttainmentCell, AttainmentGrid, CellKey, FunctionKey, GridEntry, GridExtents};
pub use range::Range;
pub use reducer::{EcdfProportion, EcdfSum, FunctionSummary, GridSummary, Reducer};

use crate::config::{EcdfConfig, SuiteChange};
use crate::logger::{Logger, LoggerCore};
use crate::properties::{watch, SnapshotField};
use crate::triggers::{always, any, on_problem_improvement, TriggerSet};
use crate::types::{EvaluationSnapshot, LoggerError, OptimizationType, ProblemDescriptor, Result};

/// Logger aggregating attained (target, budget) pairs per run
#[derive(Debug)]
pub struct EcdfLogger {
    core: LoggerCore,
    config: EcdfConfig,
    targets: Range,
    budgets: Range,
    grid: AttainmentGrid,
    /// Run receiving events; `None` until the first handled event of a run
    current_run: Option<usize>,
}

impl EcdfLogger {
    /// Create a logger handling strict improvements of the attached
    /// problem's transformed value
    ///
    /// Between improvements the best is unchanged, so the budget bins a run
    /// attains end at its last improvement.
    pub fn new(config: EcdfConfig) -> Result<Self> {
        Self::with_triggers(config, any(vec![on_problem_improvement()]))
    }

    /// Create a logger handling every evaluation
    pub fn every_evaluation(config: EcdfConfig) -> Result<Self> {
        Self::with_triggers(config, any(vec![always()]))
    }

    /// Create a logger with a custom trigger set
    pub fn with_triggers(config: EcdfConfig, triggers: TriggerSet) -> Result<Self> {
        config.validate()?;
        let targets = Range::new(&config.targets)?;
        let budgets = Range::new(&config.budgets)?;
        let core = LoggerCore::new(
            triggers,
            vec![watch::evaluations(), watch::transformed_y_best()],
        )?;

        Ok(Self {
            core,
            grid: AttainmentGrid::new(targets.bins(), budgets.bins()),
            targets,
            budgets,
            config,
            current_run: None,
        })
    }

    /// The accumulated grid
    pub fn data(&self) -> &AttainmentGrid {
        &self.grid
    }

    /// Extents of the grid as (functions, dimensions, instances, runs)
    pub fn size(&self) -> GridExtents {
        self.grid.extents()
    }

    pub fn summary(&self) -> GridSummary {
        GridSummary::new(&self.grid)
    }

    pub fn config(&self) -> &EcdfConfig {
        &self.config
    }

    pub fn targets(&self) -> &Range {
        &self.targets
    }

    pub fn budgets(&self) -> &Range {
        &self.budgets
    }

    /// Discard all accumulated results
    pub fn clear(&mut self) {
        log::debug!("Clearing attainment grid");
        self.grid.clear();
        self.current_run = None;
    }

    fn cell_key(&self) -> Option<CellKey> {
        let problem = self.core.problem()?;
        Some(CellKey {
            function: FunctionKey {
                suite: self.core.suite().unwrap_or_default().to_string(),
                problem_id: problem.problem_id,
            },
            dimension: problem.n_variables,
            instance: problem.instance_id,
        })
    }

    fn read(&self, field: SnapshotField) -> Result<Option<f64>> {
        self.core.property(field.as_str())
    }
}

impl Logger for EcdfLogger {
    fn core(&self) -> &LoggerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut LoggerCore {
        &mut self.core
    }

    fn attach_problem(&mut self, problem: &ProblemDescriptor) {
        if self.core.attach_problem(problem) {
            self.current_run = None;
        }
    }

    fn attach_suite(&mut self, suite_name: &str) {
        if self.core.attach_suite(suite_name) {
            if self.config.suite_change == SuiteChange::Clear {
                self.clear();
            }
            self.current_run = None;
        }
    }

    fn reset(&mut self) {
        self.core.reset();
        self.current_run = None;
    }

    fn handle(&mut self, _snapshot: &EvaluationSnapshot) -> Result<()> {
        let (Some(evaluations), Some(best)) = (
            self.read(SnapshotField::Evaluations)?,
            self.read(SnapshotField::TransformedYBest)?,
        ) else {
            return Ok(());
        };
        if !best.is_finite() {
            log::warn!("Ignoring non-finite best value {} at evaluation {}", best, evaluations);
            return Ok(());
        }

        let key = self.cell_key().ok_or(LoggerError::Unattached)?;
        let direction = self
            .core
            .problem()
            .map(|p| p.optimization_type)
            .unwrap_or_default();

        let target_bins = match direction {
            OptimizationType::Minimization => self.targets.upper_index(best)..=self.targets.bins() - 1,
            OptimizationType::Maximization => 0..=self.targets.lower_index(best),
        };
        let budget_bins = 0..=self.budgets.upper_index(evaluations);

        let (run, cell) = self.grid.run_mut(&key, self.current_run);
        let added = cell.mark(target_bins, budget_bins);
        self.current_run = Some(run);

        log::trace!(
            "Run {} of f{} d{} i{}: {} new pairs, {} attained",
            run,
            key.function.problem_id,
            key.dimension,
            key.instance,
            added,
            cell.count()
        );
        Ok(())
    }
}
