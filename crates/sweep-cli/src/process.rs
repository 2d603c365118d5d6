//! Running a rewrite over a directory of stylesheets.
//!
//! Files are handled one at a time in discovery order. Any read, parse or
//! write failure stops the run; files already rewritten stay rewritten.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use sweep_rewrite::{Feature, RemovalRecord};

use crate::discover::find_scss_files;

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub target_dir: PathBuf,
    /// Copy each file to `<file>.bak` before overwriting it.
    pub backups: bool,
}

/// Outcome of a whole run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_found: usize,
    pub files_changed: usize,
    pub removals: Vec<RemovalRecord>,
}

/// Outcome of a single file.
#[derive(Debug)]
pub struct FileOutcome {
    pub changed: bool,
    pub removals: Vec<RemovalRecord>,
}

/// Discover, rewrite and report.
pub fn run(feature: Feature, options: &RunOptions) -> anyhow::Result<RunSummary> {
    tracing::info!(
        "Searching for .scss files in: {}",
        options.target_dir.display()
    );
    let files = find_scss_files(&options.target_dir)?;

    if files.is_empty() {
        tracing::warn!("No .scss files found in the specified directory.");
        return Ok(RunSummary::default());
    }

    tracing::info!("Found {} .scss file(s).", files.len());

    let mut summary = RunSummary {
        files_found: files.len(),
        ..RunSummary::default()
    };

    for file in &files {
        tracing::info!("Processing file: {}", file.display());
        let outcome = process_file(feature, file, options)?;
        if outcome.changed {
            summary.files_changed += 1;
        }
        summary.removals.extend(outcome.removals);
    }

    report(feature, &summary);
    Ok(summary)
}

/// Rewrite one file in place if the feature changed anything.
pub fn process_file(
    feature: Feature,
    path: &Path,
    options: &RunOptions,
) -> anyhow::Result<FileOutcome> {
    let file_path = path.display().to_string();
    let source = fs::read_to_string(path).with_context(|| format!("failed to read {file_path}"))?;

    let rewritten = feature
        .rewrite(&source, &file_path)
        .with_context(|| format!("failed to parse {file_path}"))?;

    if rewritten.report.changed {
        if options.backups {
            let backup = backup_path(path);
            fs::copy(path, &backup)
                .with_context(|| format!("failed to back up {file_path}"))?;
            tracing::info!("Backup created at: {}", backup.display());
        }

        fs::write(path, &rewritten.output)
            .with_context(|| format!("failed to write {file_path}"))?;
        tracing::info!("Updated file: {file_path}");
    }

    Ok(FileOutcome {
        changed: rewritten.report.changed,
        removals: rewritten.report.removals,
    })
}

/// `<path>.bak`, keeping the original extension.
fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".bak");
    PathBuf::from(name)
}

fn report(feature: Feature, summary: &RunSummary) {
    if summary.files_changed > 0 {
        tracing::info!(
            "Rewrote {} of {} file(s).",
            summary.files_changed,
            summary.files_found
        );
    }

    if summary.removals.is_empty() {
        tracing::info!("{}", feature.nothing_found_message());
        return;
    }

    tracing::info!("{}", feature.removed_heading());
    for removal in &summary.removals {
        tracing::info!("File: {}", removal.file_path);
        tracing::info!("  Selector: {}", removal.selector);
        tracing::info!("  Line: {}", removal.line);
    }

    tracing::info!("Cleanup complete!");
}
