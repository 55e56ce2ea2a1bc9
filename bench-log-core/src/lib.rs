//! Benchmark Logging Library
//!
//! An observer pipeline for black-box optimization benchmarks: problems emit
//! one snapshot per objective evaluation, and attached loggers decide through
//! triggers whether to act on it.
//!
//! # Architecture
//!
//! - Triggers (`Always`, `OnImprovement`, `Each`, `At`, `PerRange`) composed with any/all
//! - Properties expose named values from the snapshot or from outside state
//! - Loggers share an attach/log/reset lifecycle through [`LoggerCore`]
//! - [`EcdfLogger`] aggregates an attainment grid over targets and budgets
//! - [`Store`] keeps watched properties in memory, [`Combine`] fans out
//! - [`Problem`] and [`Suite`] drive the loggers from an objective function
//!
//! The library does NOT:
//! - Implement benchmark functions
//! - Write log files or plots
//! - Share loggers between threads
//!
//! # Example Usage
//!
//! ```
//! use bench_log_core::{EcdfConfig, EcdfLogger, EcdfSum, Problem, ProblemDescriptor, Reducer};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let logger = Rc::new(RefCell::new(
//!     EcdfLogger::new(EcdfConfig::new(0.0, 100.0, 10, 0.0, 10.0, 10)).unwrap(),
//! ));
//!
//! let sphere = |x: &[f64]| -> f64 { x.iter().map(|v| v * v).sum() };
//! let mut problem = Problem::new(ProblemDescriptor::new(1, 1, 2), sphere);
//! problem.attach_logger(logger.clone());
//!
//! problem.evaluate(&[3.0, 4.0]).unwrap();
//! problem.reset();
//! problem.evaluate(&[1.0, 0.0]).unwrap();
//!
//! let logger = logger.borrow();
//! assert_eq!(logger.size().runs, 2);
//! assert!(EcdfSum.reduce(logger.data()) > 0);
//! ```

// Public modules
pub mod combine;
pub mod config;
pub mod ecdf;
pub mod logger;
pub mod problem;
pub mod properties;
pub mod store;
pub mod suite;
pub mod triggers;
pub mod types;

// Re-export main types for convenience
pub use combine::Combine;
pub use config::{AxisConfig, EcdfConfig, Scale, SuiteChange};
pub use ecdf::{
    AttainmentCell, AttainmentGrid, EcdfLogger, EcdfProportion, EcdfSum, FunctionKey,
    GridExtents, GridSummary, Range, Reducer,
};
pub use logger::{AttachState, Logger, LoggerCore, SharedLogger, Watcher};
pub use problem::{Problem, RunState};
pub use properties::{
    watch, FnProperty, Property, PropertyRegistry, Reference, SnapshotField, Tracked,
};
pub use store::{Record, RunKey, Store};
pub use suite::Suite;
pub use triggers::{
    all, always, any, on_improvement, on_problem_improvement, Always, At, Combination, Each,
    OnImprovement, PerRange, Trigger, TriggerSet,
};
pub use types::{
    EvaluationSnapshot, LoggerError, OptimizationType, ProblemDescriptor, Result,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
