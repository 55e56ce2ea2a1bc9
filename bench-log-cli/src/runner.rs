//! Random search experiment driver
//!
//! Builds a suite of shifted toy objectives, attaches an ECDF logger and
//! runs uniform random search on every problem.

use crate::config::ExperimentConfig;
use bench_log_core::{EcdfLogger, EcdfSum, Problem, ProblemDescriptor, Reducer, Suite};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Unknown function id {0} (available: 1 = sphere, 2 = ellipsoid)")]
    UnknownFunction(usize),

    #[error("Logger error: {0}")]
    Logger(#[from] bench_log_core::LoggerError),
}

/// Toy objective functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Function {
    #[default]
    Sphere,
    Ellipsoid,
}

impl Function {
    pub fn from_id(problem_id: usize) -> Result<Self, RunnerError> {
        match problem_id {
            1 => Ok(Function::Sphere),
            2 => Ok(Function::Ellipsoid),
            other => Err(RunnerError::UnknownFunction(other)),
        }
    }

    /// Objective with its optimum moved to `shift`
    pub fn objective(self, shift: Vec<f64>) -> impl Fn(&[f64]) -> f64 {
        move |x: &[f64]| -> f64 {
            let n = x.len();
            x.iter()
                .zip(&shift)
                .enumerate()
                .map(|(i, (xi, si))| {
                    let d = xi - si;
                    let weight = match self {
                        Function::Sphere => 1.0,
                        Function::Ellipsoid if n > 1 => 1e6f64.powf(i as f64 / (n - 1) as f64),
                        Function::Ellipsoid => 1.0,
                    };
                    weight * d * d
                })
                .sum()
        }
    }
}

/// Linear congruential generator (Knuth's MMIX constants)
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Uniform value in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform value in `[lo, hi)`
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Instance-dependent optimum location, inside `[-4, 4]`
fn shift_for(instance: usize, dimension: usize) -> Vec<f64> {
    let mut rng = Lcg::new(instance as u64);
    (0..dimension).map(|_| rng.uniform(-4.0, 4.0)).collect()
}

/// Outcome of one run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub problem_id: usize,
    pub instance: usize,
    pub dimension: usize,
    pub run: usize,
    pub best: f64,
    /// ECDF total over everything logged so far
    pub cumulative_sum: usize,
}

/// Run the whole experiment, returning the per-run reports and the logger
pub fn run_experiment(
    config: &ExperimentConfig,
) -> Result<(Vec<RunReport>, Rc<RefCell<EcdfLogger>>), RunnerError> {
    let e = &config.experiment;
    let functions = e
        .functions
        .iter()
        .map(|&id| Function::from_id(id).map(|f| (id, f)))
        .collect::<Result<BTreeMap<_, _>, _>>()?;

    let logger = Rc::new(RefCell::new(EcdfLogger::new(config.ecdf.clone())?));

    let factory = |descriptor: &ProblemDescriptor| {
        let function = functions.get(&descriptor.problem_id).copied().unwrap_or_default();
        let shift = shift_for(descriptor.instance_id, descriptor.n_variables);
        Problem::new(descriptor.clone(), function.objective(shift)).with_optimum(0.0)
    };
    let mut suite = Suite::new(
        e.suite.clone(),
        e.functions.clone(),
        e.instances.clone(),
        e.dimensions.clone(),
        factory,
    )?;
    suite.attach_logger(logger.clone());
    log::info!("Running {} problems x {} runs on suite '{}'", suite.len(), e.runs, suite.name());

    let mut rng = Lcg::new(e.seed);
    let (lo, hi) = e.bounds;
    let mut reports = Vec::new();
    for mut problem in suite.problems() {
        let descriptor = problem.descriptor().clone();
        for run in 0..e.runs {
            let mut x = vec![0.0; descriptor.n_variables];
            for _ in 0..e.budget {
                for xi in x.iter_mut() {
                    *xi = rng.uniform(lo, hi);
                }
                problem.evaluate(&x)?;
            }

            let report = RunReport {
                problem_id: descriptor.problem_id,
                instance: descriptor.instance_id,
                dimension: descriptor.n_variables,
                run,
                best: problem.state().transformed_y_best,
                cumulative_sum: EcdfSum.reduce(logger.borrow().data()),
            };
            log::debug!("{} run {}: best {:.3e}", descriptor, run, report.best);
            reports.push(report);
            problem.reset();
        }
    }

    Ok((reports, logger))
}
