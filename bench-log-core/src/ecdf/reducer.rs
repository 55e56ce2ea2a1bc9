//! Scalar views of an attainment grid

use super::grid::{AttainmentGrid, FunctionKey, GridExtents};
use serde::Serialize;
use std::collections::BTreeMap;

/// Reduces a whole grid to a single value
pub trait Reducer {
    type Output;

    fn reduce(&self, grid: &AttainmentGrid) -> Self::Output;
}

/// Total number of attained (target, budget) pairs over all cells
#[derive(Debug, Clone, Copy, Default)]
pub struct EcdfSum;

impl Reducer for EcdfSum {
    type Output = usize;

    fn reduce(&self, grid: &AttainmentGrid) -> usize {
        grid.entries().map(|e| e.cell.count()).sum()
    }
}

impl EcdfSum {
    /// Totals per function key, summed over dimensions, instances and runs
    pub fn per_function(&self, grid: &AttainmentGrid) -> BTreeMap<FunctionKey, usize> {
        let mut totals = BTreeMap::new();
        for entry in grid.entries() {
            *totals.entry(entry.function.clone()).or_insert(0) += entry.cell.count();
        }
        totals
    }
}

/// Fraction of all possible pairs that were attained
#[derive(Debug, Clone, Copy, Default)]
pub struct EcdfProportion;

impl Reducer for EcdfProportion {
    type Output = f64;

    fn reduce(&self, grid: &AttainmentGrid) -> f64 {
        let (attained, capacity) = grid
            .entries()
            .fold((0usize, 0usize), |(a, c), e| (a + e.cell.count(), c + e.cell.capacity()));
        if capacity == 0 {
            0.0
        } else {
            attained as f64 / capacity as f64
        }
    }
}

/// Attainment total of one function
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionSummary {
    pub suite: String,
    pub problem_id: usize,
    pub attained: usize,
}

/// Report-friendly summary of a grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSummary {
    pub extents: GridExtents,
    pub target_bins: usize,
    pub budget_bins: usize,
    pub attained: usize,
    pub proportion: f64,
    pub functions: Vec<FunctionSummary>,
}

impl GridSummary {
    pub fn new(grid: &AttainmentGrid) -> Self {
        let functions = EcdfSum
            .per_function(grid)
            .into_iter()
            .map(|(key, attained)| FunctionSummary {
                suite: key.suite,
                problem_id: key.problem_id,
                attained,
            })
            .collect();

        Self {
            extents: grid.extents(),
            target_bins: grid.target_bins(),
            budget_bins: grid.budget_bins(),
            attained: EcdfSum.reduce(grid),
            proportion: EcdfProportion.reduce(grid),
            functions,
        }
    }
}
