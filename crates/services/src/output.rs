//! Saving generated responses.
//!
//! Responses are written as C source files named after the context
//! category and a local timestamp, e.g. `driver_20260112_074743.c`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use shared::context::ContextCategory;
use tracing::info;

pub fn save_response(gen_dir: &Path, category: ContextCategory, text: &str) -> Result<PathBuf> {
    fs::create_dir_all(gen_dir)
        .with_context(|| format!("failed to create output folder {}", gen_dir.display()))?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!("{}_{}.c", category.save_prefix(), timestamp);
    let path = gen_dir.join(&filename);

    fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = text.len(), "saved response");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_writes_exact_text_with_timestamped_name() {
        let dir = tempdir().unwrap();
        let gen_dir = dir.path().join("gen");
        let text = "void create() {\n    set_short(\"a plain room\");\n}\n";

        let path = save_response(&gen_dir, ContextCategory::Mudlib, text).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), text);

        let name = path.file_name().unwrap().to_str().unwrap();
        let rest = name.strip_prefix("mudlib_").unwrap();
        let stem = rest.strip_suffix(".c").unwrap();
        // YYYYMMDD_HHMMSS: 14 digits split by one underscore
        let (date, time) = stem.split_once('_').unwrap();
        assert_eq!(date.len(), 8);
        assert_eq!(time.len(), 6);
        assert!(date.chars().all(|c| c.is_ascii_digit()));
        assert!(time.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn save_creates_output_folder_if_absent() {
        let dir = tempdir().unwrap();
        let gen_dir = dir.path().join("nested").join("gen");
        assert!(!gen_dir.exists());

        save_response(&gen_dir, ContextCategory::Driver, "x").unwrap();
        assert!(gen_dir.exists());
    }
}
