//! Recursive scan for MUD reference source files.
//!
//! Collects paths whose extension is one of the known source extensions
//! and stops walking as soon as the cap is reached. Order past the cap is
//! whatever the traversal yields. A missing root is reported as its own
//! error so the caller can tell "nothing found" from "references not
//! extracted yet".

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

/// Scan stops once this many matches have been collected.
pub const SCAN_CAP: usize = 100;

pub const REFERENCE_EXTENSIONS: [&str; 3] = ["c", "h", "lpc"];

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("reference folder {} does not exist. Run extraction in the mud-references folder", .0.display())]
    RootMissing(PathBuf),
}

pub fn scan_references(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if !root.exists() {
        return Err(ScanError::RootMissing(root.to_path_buf()));
    }

    let mut matches = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(ext) = entry.path().extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if REFERENCE_EXTENSIONS.contains(&ext) {
            matches.push(entry.into_path());
            if matches.len() >= SCAN_CAP {
                break;
            }
        }
    }
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn scan_caps_at_one_hundred_matches() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("lib");
        fs::create_dir_all(&sub).unwrap();
        for i in 0..150 {
            fs::write(sub.join(format!("room_{i}.c")), "// room").unwrap();
        }

        let found = scan_references(dir.path()).unwrap();
        assert_eq!(found.len(), SCAN_CAP);
    }

    #[test]
    fn scan_filters_by_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("driver.c"), "").unwrap();
        fs::write(dir.path().join("efuns.h"), "").unwrap();
        fs::write(dir.path().join("combat.lpc"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("Makefile"), "").unwrap();

        let mut found = scan_references(dir.path()).unwrap();
        found.sort();
        let names: Vec<_> = found
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["combat.lpc", "driver.c", "efuns.h"]);
    }

    #[test]
    fn scan_missing_root_is_distinct_from_empty() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("extracted");
        assert!(matches!(
            scan_references(&missing),
            Err(ScanError::RootMissing(_))
        ));

        fs::create_dir_all(&missing).unwrap();
        assert!(scan_references(&missing).unwrap().is_empty());
    }
}
