//! Reference data loaded once per run: the metadata JSON Schema, the set of
//! valid moku identifiers, and the contributor approval registry.
//!
//! All three live in the data-commons repository being validated, not in
//! this crate, so a test (or a second commons) can supply its own copies.
//! Failures here are process-level failures — a commons checkout without its
//! schema or registry cannot be validated at all — and are kept distinct
//! from per-contribution validation findings.

use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::schema::{ContributorRegistry, MokuIdList};

const METADATA_SCHEMA_PATH: &str = "schemas/metadata.schema.json";
const MOKU_IDS_PATH: &str = "schemas/valid-moku-ids.json";
const REGISTRY_PATH: &str = "registry/contributors.json";

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to compile metadata schema: {0}")]
    SchemaCompile(String),
}

/// Read-only inputs shared by every contribution in a run.
pub struct ReferenceData {
    metadata_schema: jsonschema::Validator,
    valid_moku_ids: HashSet<String>,
    approved_slugs: HashSet<String>,
}

impl ReferenceData {
    /// Load and compile all reference data from a commons repository root.
    pub fn load(root: &Path) -> Result<Self, ReferenceError> {
        let schema: Value = read_json(&root.join(METADATA_SCHEMA_PATH))?;
        let metadata_schema = jsonschema::draft7::options()
            .build(&schema)
            .map_err(|e| ReferenceError::SchemaCompile(e.to_string()))?;

        let moku_list: MokuIdList = parse_json(&root.join(MOKU_IDS_PATH))?;
        let registry: ContributorRegistry = parse_json(&root.join(REGISTRY_PATH))?;

        let approved_slugs: HashSet<String> = registry
            .contributors
            .into_iter()
            .filter(|c| c.is_approved())
            .map(|c| c.slug)
            .collect();

        debug!(
            "Loaded reference data: {} moku ids, {} approved contributors",
            moku_list.moku_ids.len(),
            approved_slugs.len()
        );

        Ok(Self {
            metadata_schema,
            valid_moku_ids: moku_list.moku_ids.into_iter().collect(),
            approved_slugs,
        })
    }

    pub fn metadata_schema(&self) -> &jsonschema::Validator {
        &self.metadata_schema
    }

    pub fn is_valid_moku_id(&self, moku_id: &str) -> bool {
        self.valid_moku_ids.contains(moku_id)
    }

    pub fn is_approved_contributor(&self, slug: &str) -> bool {
        self.approved_slugs.contains(slug)
    }
}

fn read_json(path: &Path) -> Result<Value, ReferenceError> {
    let content = std::fs::read_to_string(path).map_err(|source| ReferenceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ReferenceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ReferenceError> {
    let value = read_json(path)?;
    serde_json::from_value(value).map_err(|source| ReferenceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
