//! Per-dataset checks: file existence, moku-id and coverage declarations,
//! and format-specific content validation for CSV and GeoJSON files.
//!
//! Each dataset entry is validated independently; a failure here never
//! prevents sibling entries (or sibling contributions) from being checked.

use serde_json::Value;
use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::debug;

use super::result::{Stats, ValidationResult};
use crate::reference::ReferenceData;
use crate::schema::{DatasetEntry, FieldType};

/// Coordinates outside these ranges are flagged for review, never rejected.
const HAWAII_LAT_BOUNDS: RangeInclusive<f64> = 18.0..=23.0;
const HAWAII_LNG_BOUNDS: RangeInclusive<f64> = -161.0..=-154.0;

/// Coverage free text shorter than this does not count as a declaration.
const MIN_COVERAGE_LEN: usize = 10;

pub struct DatasetValidator<'a> {
    refs: &'a ReferenceData,
}

impl<'a> DatasetValidator<'a> {
    pub fn new(refs: &'a ReferenceData) -> Self {
        Self { refs }
    }

    /// Run every check for one dataset entry, accumulating findings on
    /// `result` and record counters on `stats`.
    pub fn validate_entry(
        &self,
        dir: &Path,
        entry: &DatasetEntry,
        result: &mut ValidationResult,
        stats: &mut Stats,
    ) {
        let data_path = dir.join(&entry.file);
        if !data_path.exists() {
            result.error(format!("Data file not found: {}", entry.file));
            return;
        }

        // Advisory only: the moku list evolves, so an unknown id must never
        // block a merge.
        for moku_id in &entry.moku_ids {
            if !self.refs.is_valid_moku_id(moku_id) {
                result.warn(format!(
                    "Unknown moku_id: \"{moku_id}\" in dataset \"{}\" - verify against docs/moku-districts.md",
                    entry.title
                ));
            }
        }

        // Every dataset must be geographically locatable by at least one
        // mechanism: coordinate columns, moku ids, or a coverage description.
        let has_coverage_text = entry
            .coverage
            .as_deref()
            .is_some_and(|text| text.chars().count() >= MIN_COVERAGE_LEN);
        if !entry.has_coordinate_columns() && entry.moku_ids.is_empty() && !has_coverage_text {
            result.error(format!(
                "Dataset \"{}\" has no coordinate columns, no moku_ids, and no coverage description. \
                 Provide at least one: latitude/longitude columns in schema, moku_ids, or a coverage text field.",
                entry.title
            ));
        }

        match data_path.extension().and_then(|ext| ext.to_str()) {
            Some("csv") => self.validate_csv(&data_path, entry, result, stats),
            Some("geojson") => self.validate_geojson(&data_path, entry, result, stats),
            // Only the two known formats have content rules
            _ => debug!("No content rules for {}, skipping", entry.file),
        }
    }

    fn validate_csv(
        &self,
        data_path: &Path,
        entry: &DatasetEntry,
        result: &mut ValidationResult,
        stats: &mut Stats,
    ) {
        let mut reader = match csv::Reader::from_path(data_path) {
            Ok(reader) => reader,
            Err(e) => {
                result.error(format!("CSV parse error in {}: {e}", entry.file));
                return;
            }
        };

        let headers: Vec<String> = match reader.headers() {
            Ok(headers) => headers.iter().map(str::to_string).collect(),
            Err(e) => {
                result.error(format!("CSV parse error in {}: {e}", entry.file));
                return;
            }
        };

        // Parse the whole file up front: a malformed row rejects the file
        // without counting any of its records.
        let mut records = Vec::new();
        for record in reader.records() {
            match record {
                Ok(record) => records.push(record),
                Err(e) => {
                    result.error(format!("CSV parse error in {}: {e}", entry.file));
                    return;
                }
            }
        }
        stats.total += records.len();

        // Header coverage is checked once, not per row
        for field in &entry.required_fields {
            if !headers.iter().any(|h| h == field) {
                result.error(format!(
                    "Required field \"{field}\" not found in CSV headers. Available: {}",
                    headers.join(", ")
                ));
            }
        }
        for field in entry.schema.keys() {
            if !headers.iter().any(|h| h == field) {
                result.warn(format!("Schema field \"{field}\" not found in CSV headers"));
            }
        }

        // site_id uniqueness is scoped to this file, not the contribution
        let mut seen_site_ids = HashSet::new();
        for (index, record) in records.iter().enumerate() {
            // 1-indexed data position plus the header line, so reported row
            // numbers match the file on disk
            let row = index + 2;
            self.check_row(row, &headers, record, entry, &mut seen_site_ids, result, stats);
        }

        debug!("Checked {} rows in {}", records.len(), entry.file);
    }

    #[allow(clippy::too_many_arguments)]
    fn check_row(
        &self,
        row: usize,
        headers: &[String],
        record: &csv::StringRecord,
        entry: &DatasetEntry,
        seen_site_ids: &mut HashSet<String>,
        result: &mut ValidationResult,
        stats: &mut Stats,
    ) {
        // A row may increment `rejected` once per failing check; see DESIGN.md
        for field in &entry.required_fields {
            match field_value(headers, record, field) {
                None | Some("") => {
                    result.error(format!("Row {row}: required field \"{field}\" is empty"));
                    stats.rejected += 1;
                }
                Some(_) => {}
            }
        }

        for (field, field_type) in &entry.schema {
            if *field_type != FieldType::Number {
                continue;
            }
            if let Some(value) = field_value(headers, record, field)
                && !value.is_empty()
                && value.trim().parse::<f64>().is_err()
            {
                result.error(format!(
                    "Row {row}: field \"{field}\" expected number, got \"{value}\""
                ));
                stats.rejected += 1;
            }
        }

        if let (Some(lat_raw), Some(lng_raw)) = (
            field_value(headers, record, "latitude"),
            field_value(headers, record, "longitude"),
        ) && !lat_raw.is_empty()
            && !lng_raw.is_empty()
            && let (Ok(lat), Ok(lng)) = (lat_raw.trim().parse::<f64>(), lng_raw.trim().parse::<f64>())
            && !(HAWAII_LAT_BOUNDS.contains(&lat) && HAWAII_LNG_BOUNDS.contains(&lng))
        {
            result.warn(format!(
                "Row {row}: coordinates ({lat}, {lng}) outside Hawaii bounds"
            ));
            stats.flagged += 1;
        }

        if let Some(site_id) = field_value(headers, record, "site_id")
            && !site_id.is_empty()
            && !seen_site_ids.insert(site_id.to_string())
        {
            result.error(format!("Row {row}: duplicate site_id \"{site_id}\""));
            stats.rejected += 1;
        }
    }

    fn validate_geojson(
        &self,
        data_path: &Path,
        entry: &DatasetEntry,
        result: &mut ValidationResult,
        stats: &mut Stats,
    ) {
        let content = match std::fs::read_to_string(data_path) {
            Ok(content) => content,
            Err(e) => {
                result.error(format!("GeoJSON parse error in {}: {e}", entry.file));
                return;
            }
        };

        let document: Value = match serde_json::from_str(&content) {
            Ok(document) => document,
            Err(e) => {
                result.error(format!("GeoJSON parse error in {}: {e}", entry.file));
                return;
            }
        };

        match document.get("type").and_then(Value::as_str) {
            Some("FeatureCollection") => {
                let features = document
                    .get("features")
                    .and_then(Value::as_array)
                    .map_or(0, Vec::len);
                stats.total += features;
            }
            found => {
                result.error(format!(
                    "{}: expected FeatureCollection, got {}",
                    entry.file,
                    found.unwrap_or("none")
                ));
            }
        }
    }
}

/// Look up a record value by header name. `None` when the column does not
/// exist or the row is short.
fn field_value<'r>(headers: &[String], record: &'r csv::StringRecord, name: &str) -> Option<&'r str> {
    headers
        .iter()
        .position(|h| h == name)
        .and_then(|index| record.get(index))
}
