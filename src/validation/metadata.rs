//! Metadata validation: the only stage allowed to short-circuit a
//! contribution. Without a readable, schema-conformant `metadata.json` the
//! downstream checks have nothing trustworthy to work from.

use serde_json::Value;
use std::path::Path;
use tracing::debug;

use super::result::ValidationResult;
use crate::reference::ReferenceData;
use crate::schema::Metadata;

pub struct MetadataValidator<'a> {
    refs: &'a ReferenceData,
}

impl<'a> MetadataValidator<'a> {
    pub fn new(refs: &'a ReferenceData) -> Self {
        Self { refs }
    }

    /// Validate `<dir>/metadata.json`. Returns the typed metadata on
    /// success; on failure the findings are already recorded on `result`
    /// and the caller must stop processing this contribution.
    pub fn validate(&self, dir: &Path, result: &mut ValidationResult) -> Option<Metadata> {
        let metadata_path = dir.join("metadata.json");
        if !metadata_path.exists() {
            result.error("metadata.json not found");
            return None;
        }

        let content = match std::fs::read_to_string(&metadata_path) {
            Ok(content) => content,
            Err(e) => {
                result.error(format!("metadata.json parse error: {e}"));
                return None;
            }
        };

        let document: Value = match serde_json::from_str(&content) {
            Ok(document) => document,
            Err(e) => {
                result.error(format!("metadata.json parse error: {e}"));
                return None;
            }
        };

        // Report every schema violation, not just the first
        let violations: Vec<String> = self
            .refs
            .metadata_schema()
            .iter_errors(&document)
            .map(|error| {
                let path = error.instance_path.to_string();
                let path = if path.is_empty() { "/".to_string() } else { path };
                format!("Schema: {path} {error}")
            })
            .collect();

        if !violations.is_empty() {
            for violation in violations {
                result.error(violation);
            }
            return None;
        }

        // A lax user-supplied schema can pass documents our typed model
        // rejects; treat that the same as non-conformance.
        match serde_json::from_value::<Metadata>(document) {
            Ok(metadata) => {
                debug!("Metadata validated for {:?}", dir);
                Some(metadata)
            }
            Err(e) => {
                result.error(format!("metadata.json does not match expected structure: {e}"));
                None
            }
        }
    }
}
