//! Per-contribution outcome accumulator.
//!
//! Findings come in exactly two severities: errors block the merge, warnings
//! never do. `error()` and `warn()` are the only mutators, so `valid` can
//! never drift out of sync with the error list.

use serde::Serialize;

/// Record counters accumulated across all datasets of one contribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Records (CSV rows + GeoJSON features) seen
    pub total: usize,
    /// Count of (row, failing check) occurrences — a row failing two checks
    /// counts twice; see DESIGN.md
    pub rejected: usize,
    /// Rows flagged for human review (out-of-bounds coordinates)
    pub flagged: usize,
}

/// Outcome of validating one contribution directory.
#[derive(Debug, Serialize)]
pub struct ValidationResult {
    directory: String,
    valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
    /// `None` only when metadata validation short-circuited before any
    /// dataset was examined
    stats: Option<Stats>,
}

impl ValidationResult {
    pub fn new(directory: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: None,
        }
    }

    /// Record a hard failure. The contribution is invalid from here on.
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.valid = false;
    }

    /// Record an advisory finding. Never affects validity.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn set_stats(&mut self, stats: Stats) {
        self.stats = Some(stats);
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn stats(&self) -> Option<&Stats> {
        self.stats.as_ref()
    }
}
