//! Run-level report: a JSON document for the CI summary comment plus a
//! human console rendering.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::validation::ValidationResult;

pub const DEFAULT_REPORT_FILE: &str = "validation-report.json";

/// All results of one run, in input-directory order.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub results: Vec<ValidationResult>,
}

impl RunReport {
    pub fn new(results: Vec<ValidationResult>) -> Self {
        Self { results }
    }

    /// True when any contribution carries a hard error.
    pub fn has_errors(&self) -> bool {
        self.results.iter().any(|r| !r.is_valid())
    }

    /// Persist the report for the CI summary step.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!("Report written to {}", path.display());
        Ok(())
    }

    /// Render one block per contribution to stdout.
    pub fn render(&self) {
        for result in &self.results {
            let marker = if result.is_valid() {
                "✓".green()
            } else {
                "✗".red()
            };
            println!("{marker} {}", result.directory());

            for error in result.errors() {
                println!("   {} {error}", "✗".red());
            }
            for warning in result.warnings() {
                println!("   {} {warning}", "⚠".yellow());
            }
            if let Some(stats) = result.stats() {
                println!(
                    "   Records: {} total, {} rejected, {} flagged",
                    stats.total, stats.rejected, stats.flagged
                );
            }
            println!();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{Stats, ValidationResult};
    use tempfile::TempDir;

    #[test]
    fn report_round_trips_through_json() {
        let mut ok = ValidationResult::new("contributions/uh-ctahr/soil-2025");
        ok.set_stats(Stats::default());
        let mut bad = ValidationResult::new("contributions/usgs/wells-2025");
        bad.error("Data file not found: wells.csv");

        let report = RunReport::new(vec![ok, bad]);
        assert!(report.has_errors());

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_REPORT_FILE);
        report.write(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["results"][0]["valid"], true);
        assert_eq!(value["results"][0]["stats"]["total"], 0);
        assert_eq!(value["results"][1]["valid"], false);
        assert_eq!(
            value["results"][1]["errors"][0],
            "Data file not found: wells.csv"
        );
    }

    #[test]
    fn all_valid_report_has_no_errors() {
        let report = RunReport::new(vec![ValidationResult::new("a")]);
        assert!(!report.has_errors());
    }
}
