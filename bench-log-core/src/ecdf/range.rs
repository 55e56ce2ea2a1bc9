//! Binning of one grid axis
//!
//! Bin `i` spans `[edges[i], edges[i + 1]]`. Lookups compare against the
//! stored edges, so a value equal to an edge resolves the same way whatever
//! rounding produced that edge.

use crate::config::{AxisConfig, Scale};
use crate::types::Result;

/// Fixed set of bins over `[min, max]`
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    scale: Scale,
    edges: Vec<f64>,
}

impl Range {
    /// Build the bins of a validated axis
    pub fn new(axis: &AxisConfig) -> Result<Self> {
        axis.validate("range")?;
        let n = axis.bins;

        let mut edges: Vec<f64> = match axis.scale {
            Scale::Linear => {
                let width = axis.max - axis.min;
                (0..=n).map(|k| axis.min + width * k as f64 / n as f64).collect()
            }
            Scale::Log => {
                let (lo, hi) = (axis.min.ln(), axis.max.ln());
                (0..=n).map(|k| (lo + (hi - lo) * k as f64 / n as f64).exp()).collect()
            }
        };
        edges[0] = axis.min;
        edges[n] = axis.max;

        Ok(Self {
            scale: axis.scale,
            edges,
        })
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Number of bins
    pub fn bins(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn min(&self) -> f64 {
        self.edges[0]
    }

    pub fn max(&self) -> f64 {
        self.edges[self.bins()]
    }

    /// Lower and upper edge of a bin
    pub fn bounds(&self, bin: usize) -> Option<(f64, f64)> {
        Some((*self.edges.get(bin)?, *self.edges.get(bin + 1)?))
    }

    /// First bin whose upper edge is at or above `value`
    ///
    /// Values below `min` map to the first bin, values above `max` to the
    /// last one.
    pub fn upper_index(&self, value: f64) -> usize {
        let last = self.bins() - 1;
        self.edges[1..].partition_point(|&edge| edge < value).min(last)
    }

    /// Last bin whose lower edge is at or below `value`
    ///
    /// Values below `min` map to the first bin, values above `max` to the
    /// last one.
    pub fn lower_index(&self, value: f64) -> usize {
        let n = self.bins();
        self.edges[..n]
            .partition_point(|&edge| edge <= value)
            .saturating_sub(1)
    }
}
