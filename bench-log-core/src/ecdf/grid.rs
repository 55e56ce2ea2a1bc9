//! Four-axis attainment grid
//!
//! Cells are indexed by (function, dimension, instance, run). Each cell holds
//! the set of (target bin, budget bin) pairs attained by that run.

use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Function axis key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FunctionKey {
    /// Suite that produced the problem (empty if none was announced)
    pub suite: String,
    pub problem_id: usize,
}

/// Location of a run list in the grid
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub function: FunctionKey,
    pub dimension: usize,
    pub instance: usize,
}

/// Sizes of the four grid axes
///
/// Every axis reports the largest extent found under any parent, so a grid
/// with ragged coverage reports the shape of its bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GridExtents {
    pub functions: usize,
    pub dimensions: usize,
    pub instances: usize,
    pub runs: usize,
}

impl GridExtents {
    /// (functions, dimensions, instances, runs)
    pub fn as_tuple(&self) -> (usize, usize, usize, usize) {
        (self.functions, self.dimensions, self.instances, self.runs)
    }
}

/// Attained (target, budget) pairs of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttainmentCell {
    target_bins: usize,
    budget_bins: usize,
    /// Row-major: target bin, then budget bin
    attained: Vec<bool>,
    count: usize,
}

impl AttainmentCell {
    pub fn new(target_bins: usize, budget_bins: usize) -> Self {
        Self {
            target_bins,
            budget_bins,
            attained: vec![false; target_bins * budget_bins],
            count: 0,
        }
    }

    /// Mark every pair in the given bin ranges. Returns the number of pairs
    /// that were not attained before.
    pub fn mark(&mut self, targets: RangeInclusive<usize>, budgets: RangeInclusive<usize>) -> usize {
        let mut added = 0;
        for t in targets.filter(|t| *t < self.target_bins) {
            let row = t * self.budget_bins;
            for b in budgets.clone().filter(|b| *b < self.budget_bins) {
                let slot = &mut self.attained[row + b];
                if !*slot {
                    *slot = true;
                    added += 1;
                }
            }
        }
        self.count += added;
        added
    }

    pub fn is_attained(&self, target_bin: usize, budget_bin: usize) -> bool {
        target_bin < self.target_bins
            && budget_bin < self.budget_bins
            && self.attained[target_bin * self.budget_bins + budget_bin]
    }

    /// Number of attained pairs
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of pairs the cell can hold
    pub fn capacity(&self) -> usize {
        self.attained.len()
    }
}

/// One cell with its grid coordinates
#[derive(Debug, Clone, Copy)]
pub struct GridEntry<'a> {
    pub function: &'a FunctionKey,
    pub dimension: usize,
    pub instance: usize,
    pub run: usize,
    pub cell: &'a AttainmentCell,
}

type Runs = Vec<AttainmentCell>;
type Instances = BTreeMap<usize, Runs>;
type Dimensions = BTreeMap<usize, Instances>;

/// Attainment cells indexed by (function, dimension, instance, run)
#[derive(Debug, Clone, PartialEq)]
pub struct AttainmentGrid {
    target_bins: usize,
    budget_bins: usize,
    functions: BTreeMap<FunctionKey, Dimensions>,
}

impl AttainmentGrid {
    pub fn new(target_bins: usize, budget_bins: usize) -> Self {
        Self {
            target_bins,
            budget_bins,
            functions: BTreeMap::new(),
        }
    }

    pub fn target_bins(&self) -> usize {
        self.target_bins
    }

    pub fn budget_bins(&self) -> usize {
        self.budget_bins
    }

    /// Get the cell of an existing run, or open a new run when `run` is
    /// `None` or unknown. Returns the run index with the cell.
    pub fn run_mut(&mut self, key: &CellKey, run: Option<usize>) -> (usize, &mut AttainmentCell) {
        let runs = self
            .functions
            .entry(key.function.clone())
            .or_default()
            .entry(key.dimension)
            .or_default()
            .entry(key.instance)
            .or_default();

        let index = match run {
            Some(index) if index < runs.len() => index,
            _ => {
                log::debug!(
                    "Opening run {} for f{} d{} i{}",
                    runs.len(),
                    key.function.problem_id,
                    key.dimension,
                    key.instance
                );
                runs.push(AttainmentCell::new(self.target_bins, self.budget_bins));
                runs.len() - 1
            }
        };
        (index, &mut runs[index])
    }

    /// Get the cell of a run
    pub fn cell(&self, key: &CellKey, run: usize) -> Option<&AttainmentCell> {
        self.functions
            .get(&key.function)?
            .get(&key.dimension)?
            .get(&key.instance)?
            .get(run)
    }

    /// Iterate over all cells in key order
    pub fn entries(&self) -> impl Iterator<Item = GridEntry<'_>> + '_ {
        self.functions.iter().flat_map(|(function, dimensions)| {
            dimensions.iter().flat_map(move |(dimension, instances)| {
                instances.iter().flat_map(move |(instance, runs)| {
                    runs.iter().enumerate().map(move |(run, cell)| GridEntry {
                        function,
                        dimension: *dimension,
                        instance: *instance,
                        run,
                        cell,
                    })
                })
            })
        })
    }

    /// Function keys present in the grid
    pub fn functions(&self) -> impl Iterator<Item = &FunctionKey> + '_ {
        self.functions.keys()
    }

    pub fn extents(&self) -> GridExtents {
        let functions = self.functions.len();
        let dimensions = self.functions.values().map(|d| d.len()).max().unwrap_or(0);
        let instances = self
            .functions
            .values()
            .flat_map(|d| d.values())
            .map(|i| i.len())
            .max()
            .unwrap_or(0);
        let runs = self
            .functions
            .values()
            .flat_map(|d| d.values())
            .flat_map(|i| i.values())
            .map(|r| r.len())
            .max()
            .unwrap_or(0);

        GridExtents {
            functions,
            dimensions,
            instances,
            runs,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Drop every cell
    pub fn clear(&mut self) {
        self.functions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(problem_id: usize, dimension: usize, instance: usize) -> CellKey {
        CellKey {
            function: FunctionKey {
                suite: "bbob".to_string(),
                problem_id,
            },
            dimension,
            instance,
        }
    }

    #[test]
    fn test_cell_mark_is_a_union() {
        let mut cell = AttainmentCell::new(4, 3);
        assert_eq!(cell.mark(2..=3, 0..=1), 4);
        assert_eq!(cell.mark(1..=3, 0..=1), 2);
        assert_eq!(cell.mark(2..=3, 0..=0), 0);
        assert_eq!(cell.count(), 6);
        assert!(cell.is_attained(1, 1));
        assert!(!cell.is_attained(0, 0));
        assert!(!cell.is_attained(1, 2));
        assert!(!cell.is_attained(9, 0));
        assert_eq!(cell.capacity(), 12);
    }

    #[test]
    fn test_mark_ignores_bins_outside_the_cell() {
        let mut cell = AttainmentCell::new(2, 2);
        assert_eq!(cell.mark(1..=5, 0..=5), 2);
        assert_eq!(cell.count(), 2);
    }

    #[test]
    fn test_run_mut_opens_runs() {
        let mut grid = AttainmentGrid::new(2, 2);
        let (first, _) = grid.run_mut(&key(1, 2, 1), None);
        let (again, cell) = grid.run_mut(&key(1, 2, 1), Some(first));
        cell.mark(0..=0, 0..=0);
        let (second, _) = grid.run_mut(&key(1, 2, 1), None);

        assert_eq!((first, again, second), (0, 0, 1));
        assert_eq!(grid.cell(&key(1, 2, 1), 0).map(|c| c.count()), Some(1));
        assert_eq!(grid.cell(&key(1, 2, 1), 1).map(|c| c.count()), Some(0));
        assert!(grid.cell(&key(1, 2, 1), 2).is_none());
    }

    #[test]
    fn test_extents() {
        let mut grid = AttainmentGrid::new(2, 2);
        assert_eq!(grid.extents(), GridExtents::default());

        for f in 1..=2 {
            for d in [2, 10] {
                for i in 1..=2 {
                    grid.run_mut(&key(f, d, i), None);
                    grid.run_mut(&key(f, d, i), None);
                }
            }
        }
        grid.run_mut(&key(1, 2, 1), None);

        assert_eq!(grid.extents().as_tuple(), (2, 2, 2, 3));
        assert_eq!(grid.entries().count(), 17);
        grid.clear();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_entries_order() {
        let mut grid = AttainmentGrid::new(1, 1);
        grid.run_mut(&key(2, 5, 1), None);
        grid.run_mut(&key(1, 5, 3), None);
        grid.run_mut(&key(1, 5, 1), None);
        let order: Vec<(usize, usize)> = grid
            .entries()
            .map(|e| (e.function.problem_id, e.instance))
            .collect();
        assert_eq!(order, vec![(1, 1), (1, 3), (2, 1)]);
    }
}
