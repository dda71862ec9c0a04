use std::path::Path;
use tracing::{debug, info};

use super::dataset::DatasetValidator;
use super::metadata::MetadataValidator;
use super::result::{Stats, ValidationResult};
use crate::reference::ReferenceData;

/// Validates one contribution directory at a time against shared,
/// read-only reference data.
pub struct Validator<'a> {
    metadata_validator: MetadataValidator<'a>,
    dataset_validator: DatasetValidator<'a>,
    refs: &'a ReferenceData,
}

impl<'a> Validator<'a> {
    pub fn new(refs: &'a ReferenceData) -> Self {
        Self {
            metadata_validator: MetadataValidator::new(refs),
            dataset_validator: DatasetValidator::new(refs),
            refs,
        }
    }

    /// Validate a single contribution directory. `root` is the commons
    /// repository root; the result's directory id is relative to it.
    pub fn validate_contribution(&self, root: &Path, dir: &Path) -> ValidationResult {
        let rel_path = dir
            .strip_prefix(root)
            .unwrap_or(dir)
            .display()
            .to_string();
        debug!("Validating contribution {rel_path}");

        let mut result = ValidationResult::new(rel_path);

        // Metadata problems are the only short-circuit: nothing downstream
        // can be trusted without a conformant document.
        let Some(metadata) = self.metadata_validator.validate(dir, &mut result) else {
            return result;
        };

        // Authorization failure does not stop dataset checks; one run should
        // surface every problem.
        if !self.refs.is_approved_contributor(&metadata.contributor) {
            result.error(format!(
                "Contributor \"{}\" is not approved in registry/contributors.json",
                metadata.contributor
            ));
        }

        let mut stats = Stats::default();
        for entry in &metadata.datasets {
            self.dataset_validator
                .validate_entry(dir, entry, &mut result, &mut stats);
        }
        result.set_stats(stats);

        if result.is_valid() {
            info!("✓ Contribution validated: {}", result.directory());
        }
        result
    }
}
