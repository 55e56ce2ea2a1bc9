//! Report generation
//!
//! Prints a per-run table and the final grid summary as JSON.

use crate::runner::RunReport;
use anyhow::{Context, Result};
use bench_log_core::GridSummary;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Full experiment output, as written to the JSON file
#[derive(Debug, Serialize)]
pub struct ExperimentReport<'a> {
    pub runs: &'a [RunReport],
    pub summary: &'a GridSummary,
}

/// Write the per-run table
pub fn write_runs<W: Write>(out: &mut W, runs: &[RunReport]) -> Result<()> {
    writeln!(out, "{:>4} {:>4} {:>4} {:>4} {:>12} {:>10}", "f", "i", "d", "run", "best", "ecdf_sum")?;
    writeln!(out, "{}", "-".repeat(43))?;
    for r in runs {
        writeln!(
            out,
            "{:>4} {:>4} {:>4} {:>4} {:>12.4e} {:>10}",
            r.problem_id, r.instance, r.dimension, r.run, r.best, r.cumulative_sum
        )?;
    }
    Ok(())
}

/// Write the grid summary as pretty JSON
pub fn write_summary<W: Write>(out: &mut W, summary: &GridSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("Failed to serialize summary")?;
    writeln!(out, "{}", json)?;
    Ok(())
}

/// Save runs and summary to a JSON file
pub fn save_report(path: &Path, runs: &[RunReport], summary: &GridSummary) -> Result<()> {
    let report = ExperimentReport { runs, summary };
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    fs::write(path, json).with_context(|| format!("Failed to write report: {:?}", path))?;
    log::info!("Report written to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bench_log_core::AttainmentGrid;

    fn sample_runs() -> Vec<RunReport> {
        vec![
            RunReport {
                problem_id: 1,
                instance: 1,
                dimension: 2,
                run: 0,
                best: 0.25,
                cumulative_sum: 120,
            },
            RunReport {
                problem_id: 1,
                instance: 1,
                dimension: 2,
                run: 1,
                best: 0.5,
                cumulative_sum: 230,
            },
        ]
    }

    #[test]
    fn test_write_runs() {
        let mut out = Vec::new();
        write_runs(&mut out, &sample_runs()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().last().unwrap().ends_with("230"));
    }

    #[test]
    fn test_write_summary() {
        let summary = GridSummary::new(&AttainmentGrid::new(4, 4));
        let mut out = Vec::new();
        write_summary(&mut out, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["attained"], 0);
        assert_eq!(value["target_bins"], 4);
    }
}
