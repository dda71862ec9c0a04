//! Shared fixture builder: lays down a minimal data-commons checkout
//! (reference data plus contribution directories) inside a TempDir.

use std::fs;
use std::path::{Path, PathBuf};

pub const METADATA_SCHEMA: &str = r#"{
    "$schema": "http://json-schema.org/draft-07/schema#",
    "type": "object",
    "required": ["contributor", "datasets"],
    "properties": {
        "contributor": {"type": "string"},
        "datasets": {
            "type": "array",
            "items": {
                "type": "object",
                "required": ["file", "title"],
                "properties": {
                    "file": {"type": "string"},
                    "title": {"type": "string"},
                    "schema": {"type": "object"},
                    "required_fields": {"type": "array", "items": {"type": "string"}},
                    "moku_ids": {"type": "array", "items": {"type": "string"}},
                    "coverage": {"type": "string"}
                }
            }
        }
    }
}"#;

pub fn write_reference_data(root: &Path) {
    fs::create_dir_all(root.join("schemas")).unwrap();
    fs::create_dir_all(root.join("registry")).unwrap();
    fs::write(root.join("schemas/metadata.schema.json"), METADATA_SCHEMA).unwrap();
    fs::write(
        root.join("schemas/valid-moku-ids.json"),
        r#"{"moku_ids": ["oahu-koolaupoko", "oahu-ewa", "hawaii-kona"]}"#,
    )
    .unwrap();
    fs::write(
        root.join("registry/contributors.json"),
        r#"{"contributors": [
            {"slug": "uh-ctahr", "status": "approved"},
            {"slug": "usgs-pihl", "status": "approved"},
            {"slug": "pending-lab", "status": "pending"}
        ]}"#,
    )
    .unwrap();
}

pub fn write_contribution(root: &Path, rel: &str, metadata: &str) -> PathBuf {
    let dir = root.join("contributions").join(rel);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("metadata.json"), metadata).unwrap();
    dir
}
