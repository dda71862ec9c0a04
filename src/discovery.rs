//! Discovery of which contribution directories to validate.
//!
//! CI passes an explicit changed-directory list; local runs fall back to a
//! full scan of `contributions/<contributor>/<dataset>/`. Either way the
//! output order is stable, and the report follows it.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

const CONTRIBUTIONS_DIR: &str = "contributions";

/// Resolve the ordered list of contribution directories for one run.
///
/// `changed` is a newline-separated list of paths relative to the
/// contributions root (as produced by the CI diff step); when absent the
/// whole tree is scanned.
pub fn contribution_dirs(root: &Path, changed: Option<&str>) -> Result<Vec<PathBuf>> {
    let contrib_root = root.join(CONTRIBUTIONS_DIR);

    if let Some(changed) = changed
        && !changed.trim().is_empty()
    {
        let dirs: Vec<PathBuf> = changed
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| contrib_root.join(line))
            .collect();
        debug!("Using {} changed contribution dir(s)", dirs.len());
        return Ok(dirs);
    }

    if !contrib_root.is_dir() {
        return Ok(Vec::new());
    }

    // Contributions live exactly two levels deep: contributor/dataset.
    // Underscore and dot prefixes mark templates and editor droppings.
    let mut dirs = Vec::new();
    let walker = WalkDir::new(&contrib_root)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped(entry));
    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to scan {}", contrib_root.display()))?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }

    debug!("Discovered {} contribution dir(s)", dirs.len());
    Ok(dirs)
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('_') || name.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn scans_two_levels_and_skips_underscore_and_hidden() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        for dir in [
            "contributions/uh-ctahr/soil-2025",
            "contributions/uh-ctahr/rainfall-2024",
            "contributions/_template/example",
            "contributions/.git-stuff/x",
            "contributions/usgs/.hidden",
        ] {
            fs::create_dir_all(root.join(dir)).unwrap();
        }
        // A stray file at dataset depth is not a contribution
        fs::write(root.join("contributions/uh-ctahr/README.md"), "hi").unwrap();

        let dirs = contribution_dirs(root, None).unwrap();
        let names: Vec<_> = dirs
            .iter()
            .map(|d| d.strip_prefix(root).unwrap().display().to_string())
            .collect();
        assert_eq!(
            names,
            [
                "contributions/uh-ctahr/rainfall-2024",
                "contributions/uh-ctahr/soil-2025"
            ]
        );
    }

    #[test]
    fn changed_list_preserves_given_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        let dirs = contribution_dirs(root, Some("usgs/wells-2025\nuh-ctahr/soil-2025\n")).unwrap();
        assert_eq!(dirs[0], root.join("contributions/usgs/wells-2025"));
        assert_eq!(dirs[1], root.join("contributions/uh-ctahr/soil-2025"));
    }

    #[test]
    fn blank_changed_list_falls_back_to_scan() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("contributions/usgs/wells-2025")).unwrap();

        let dirs = contribution_dirs(root, Some("  \n")).unwrap();
        assert_eq!(dirs, [root.join("contributions/usgs/wells-2025")]);
    }

    #[test]
    fn missing_contributions_root_is_empty_not_error() {
        let temp_dir = TempDir::new().unwrap();

        let dirs = contribution_dirs(temp_dir.path(), None).unwrap();
        assert!(dirs.is_empty());
    }
}
