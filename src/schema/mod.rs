//! Typed views of the documents the validator consumes: contribution
//! metadata, the contributor registry, and the moku-id list.
//!
//! `Metadata` is only deserialized after the raw document has passed JSON
//! Schema validation, so these structs stay deliberately permissive —
//! structural enforcement lives in the schema file, not here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parsed `metadata.json` for one contribution directory.
#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    /// Registry slug of the submitting contributor
    pub contributor: String,

    /// Datasets declared by this contribution, in document order
    pub datasets: Vec<DatasetEntry>,
}

/// One declared data file within a contribution.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetEntry {
    /// Path of the data file, relative to the contribution directory
    pub file: String,

    /// Human-readable dataset title
    pub title: String,

    /// Declared column types, keyed by column name
    #[serde(default)]
    pub schema: BTreeMap<String, FieldType>,

    /// Columns that must be present and non-empty in every row
    #[serde(default)]
    pub required_fields: Vec<String>,

    /// Moku (district) identifiers covered by this dataset
    #[serde(default)]
    pub moku_ids: Vec<String>,

    /// Free-text description of geographic coverage
    #[serde(default)]
    pub coverage: Option<String>,
}

impl DatasetEntry {
    /// True when the declared schema carries both coordinate columns.
    pub fn has_coordinate_columns(&self) -> bool {
        self.schema.contains_key("latitude") && self.schema.contains_key("longitude")
    }
}

/// Declared type of a tabular column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Number,
    String,
    Boolean,
    Date,
    /// Forward-compatible catch-all for types this validator has no rules for
    #[serde(other)]
    Other,
}

/// `registry/contributors.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ContributorRegistry {
    pub contributors: Vec<RegistryEntry>,
}

/// One contributor in the registry.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryEntry {
    pub slug: String,
    pub status: String,
}

impl RegistryEntry {
    pub fn is_approved(&self) -> bool {
        self.status == "approved"
    }
}

/// `schemas/valid-moku-ids.json`
#[derive(Debug, Clone, Deserialize)]
pub struct MokuIdList {
    pub moku_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_deserializes_with_optional_fields_absent() {
        let doc = r#"{
            "contributor": "uh-ctahr",
            "datasets": [
                {"file": "soil.csv", "title": "Soil samples"}
            ]
        }"#;

        let metadata: Metadata = serde_json::from_str(doc).unwrap();
        assert_eq!(metadata.contributor, "uh-ctahr");
        let dataset = &metadata.datasets[0];
        assert!(dataset.schema.is_empty());
        assert!(dataset.required_fields.is_empty());
        assert!(dataset.moku_ids.is_empty());
        assert!(dataset.coverage.is_none());
    }

    #[test]
    fn unknown_field_type_falls_back_to_other() {
        let doc = r#"{
            "file": "sites.csv",
            "title": "Sites",
            "schema": {"site_id": "string", "depth": "number", "geom": "wkt"}
        }"#;

        let dataset: DatasetEntry = serde_json::from_str(doc).unwrap();
        assert_eq!(dataset.schema["depth"], FieldType::Number);
        assert_eq!(dataset.schema["geom"], FieldType::Other);
    }

    #[test]
    fn coordinate_columns_require_both_latitude_and_longitude() {
        let with_both: DatasetEntry = serde_json::from_str(
            r#"{"file": "a.csv", "title": "A",
                "schema": {"latitude": "number", "longitude": "number"}}"#,
        )
        .unwrap();
        let latitude_only: DatasetEntry = serde_json::from_str(
            r#"{"file": "b.csv", "title": "B", "schema": {"latitude": "number"}}"#,
        )
        .unwrap();

        assert!(with_both.has_coordinate_columns());
        assert!(!latitude_only.has_coordinate_columns());
    }

    #[test]
    fn registry_entry_approval() {
        let registry: ContributorRegistry = serde_json::from_str(
            r#"{"contributors": [
                {"slug": "uh-ctahr", "status": "approved"},
                {"slug": "pending-lab", "status": "pending"}
            ]}"#,
        )
        .unwrap();

        assert!(registry.contributors[0].is_approved());
        assert!(!registry.contributors[1].is_approved());
    }
}
