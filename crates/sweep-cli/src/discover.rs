//! Finding the stylesheets to process.

use std::path::{Path, PathBuf};

use anyhow::Context;
use walkdir::WalkDir;

/// Every `*.scss` file under `dir`, hidden directories included, in a
/// stable depth-first order (entries sorted by file name).
pub fn find_scss_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        let is_scss = entry.path().extension().is_some_and(|ext| ext == "scss");
        if entry.file_type().is_file() && is_scss {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
