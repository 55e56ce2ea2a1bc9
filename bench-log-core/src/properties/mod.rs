//! Named scalar values a logger can expose or record
//!
//! A property reads one value out of the current evaluation snapshot or out
//! of a live variable owned by the caller. Values are optional: a source may
//! be live but have nothing to report yet.

pub mod registry;

pub use registry::PropertyRegistry;

use crate::types::EvaluationSnapshot;
use std::cell::Cell;
use std::rc::Rc;

/// A named, possibly-absent scalar value source
pub trait Property {
    /// Unique name within a logger
    fn name(&self) -> &str;

    /// Current value, given the last snapshot delivered to the logger
    fn value(&self, snapshot: &EvaluationSnapshot) -> Option<f64>;
}

/// Snapshot fields exposed as properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotField {
    Evaluations,
    RawY,
    RawYBest,
    TransformedY,
    TransformedYBest,
    Optimum,
}

impl SnapshotField {
    pub const ALL: [SnapshotField; 6] = [
        SnapshotField::Evaluations,
        SnapshotField::RawY,
        SnapshotField::RawYBest,
        SnapshotField::TransformedY,
        SnapshotField::TransformedYBest,
        SnapshotField::Optimum,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotField::Evaluations => "evaluations",
            SnapshotField::RawY => "raw_y",
            SnapshotField::RawYBest => "raw_y_best",
            SnapshotField::TransformedY => "transformed_y",
            SnapshotField::TransformedYBest => "transformed_y_best",
            SnapshotField::Optimum => "optimum",
        }
    }
}

impl Property for SnapshotField {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn value(&self, snapshot: &EvaluationSnapshot) -> Option<f64> {
        match self {
            SnapshotField::Evaluations => Some(snapshot.evaluations as f64),
            SnapshotField::RawY => Some(snapshot.raw_y),
            SnapshotField::RawYBest => Some(snapshot.raw_y_best),
            SnapshotField::TransformedY => Some(snapshot.transformed_y),
            SnapshotField::TransformedYBest => Some(snapshot.transformed_y_best),
            SnapshotField::Optimum => snapshot.optimum,
        }
    }
}

/// Live variable owned by the caller, e.g. an algorithm parameter
#[derive(Debug, Clone)]
pub struct Reference {
    name: String,
    source: Rc<Cell<f64>>,
}

impl Reference {
    pub fn new(name: impl Into<String>, source: Rc<Cell<f64>>) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }
}

impl Property for Reference {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self, _snapshot: &EvaluationSnapshot) -> Option<f64> {
        Some(self.source.get())
    }
}

/// Live variable that may hold no value
#[derive(Debug, Clone)]
pub struct Tracked {
    name: String,
    source: Rc<Cell<Option<f64>>>,
}

impl Tracked {
    pub fn new(name: impl Into<String>, source: Rc<Cell<Option<f64>>>) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }
}

impl Property for Tracked {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self, _snapshot: &EvaluationSnapshot) -> Option<f64> {
        self.source.get()
    }
}

/// Property computed by a closure over the snapshot
pub struct FnProperty<F> {
    name: String,
    accessor: F,
}

impl<F> FnProperty<F>
where
    F: Fn(&EvaluationSnapshot) -> Option<f64>,
{
    pub fn new(name: impl Into<String>, accessor: F) -> Self {
        Self {
            name: name.into(),
            accessor,
        }
    }
}

impl<F> Property for FnProperty<F>
where
    F: Fn(&EvaluationSnapshot) -> Option<f64>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self, snapshot: &EvaluationSnapshot) -> Option<f64> {
        (self.accessor)(snapshot)
    }
}

/// Shorthands for the snapshot field properties
pub mod watch {
    use super::{Property, SnapshotField};

    pub fn evaluations() -> Box<dyn Property> {
        Box::new(SnapshotField::Evaluations)
    }

    pub fn raw_y() -> Box<dyn Property> {
        Box::new(SnapshotField::RawY)
    }

    pub fn raw_y_best() -> Box<dyn Property> {
        Box::new(SnapshotField::RawYBest)
    }

    pub fn transformed_y() -> Box<dyn Property> {
        Box::new(SnapshotField::TransformedY)
    }

    pub fn transformed_y_best() -> Box<dyn Property> {
        Box::new(SnapshotField::TransformedYBest)
    }

    pub fn optimum() -> Box<dyn Property> {
        Box::new(SnapshotField::Optimum)
    }
}
