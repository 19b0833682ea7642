//! Batch normalization of a directory of raw play texts.
//!
//! Each `*.txt` under the source directory is normalized and written to the
//! destination directory under its derived name. One file's failure is
//! reported and recorded but never aborts the batch unless fail-fast is
//! requested. A machine-readable stats artifact summarizing the run can be
//! written alongside the console report.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

use crate::{discovery, normalize, source};

/// Batch behavior switches.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Abort the whole batch on the first failing file.
    pub fail_fast: bool,
    /// Draw a console progress bar while processing.
    pub show_progress: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            show_progress: true,
        }
    }
}

/// Outcome of normalizing one file.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FileReport {
    /// Source path as given.
    pub input: String,
    /// Derived output filename (relative to the destination directory).
    pub output: String,
    /// Lines read from the source.
    pub lines_in: u64,
    /// Lines after normalization.
    pub lines_out: u64,
    /// "success" or "failed".
    pub status: String,
    /// Error message when processing failed.
    pub error: Option<String>,
}

/// Whole-run summary, serialized to the stats artifact.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BatchStats {
    pub files_total: usize,
    pub files_succeeded: usize,
    pub files_failed: usize,
    pub duration_ms: u64,
    pub reports: Vec<FileReport>,
}

/// Normalize every text file under `src_dir` into `dest_dir`.
pub fn run(src_dir: &Path, dest_dir: &Path, config: &BatchConfig) -> Result<BatchStats> {
    if !src_dir.is_dir() {
        anyhow::bail!("source directory does not exist: {}", src_dir.display());
    }
    std::fs::create_dir_all(dest_dir)
        .with_context(|| format!("failed to create {}", dest_dir.display()))?;

    let files = discovery::find_text_files(src_dir)?;
    info!(count = files.len(), src = %src_dir.display(), "starting batch normalization");

    let started = Instant::now();
    let bar = progress_bar(files.len(), config.show_progress);
    let mut reports = Vec::with_capacity(files.len());

    for path in &files {
        let report = normalize_one(path, dest_dir);
        match &report.error {
            None => emit(&bar, format!("  ✓ {} -> {}", report.input, report.output)),
            Some(e) => {
                warn!(input = %report.input, error = %e, "file failed");
                emit(&bar, format!("  ✗ {}: {}", report.input, e));
            }
        }
        let abort = report.error.is_some() && config.fail_fast;
        reports.push(report);
        bar.inc(1);
        if abort {
            bar.abandon();
            anyhow::bail!("aborting batch after failure in {}", path.display());
        }
    }
    bar.finish_and_clear();

    let stats = BatchStats {
        files_total: reports.len(),
        files_succeeded: reports.iter().filter(|r| r.error.is_none()).count(),
        files_failed: reports.iter().filter(|r| r.error.is_some()).count(),
        duration_ms: started.elapsed().as_millis() as u64,
        reports,
    };

    info!(
        total = stats.files_total,
        succeeded = stats.files_succeeded,
        failed = stats.files_failed,
        duration_ms = stats.duration_ms,
        "batch normalization complete"
    );
    Ok(stats)
}

/// Serialize run stats to a JSON file.
pub fn write_stats(stats: &BatchStats, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(stats).context("failed to serialize batch stats")?;
    source::write_text(path, &json)
}

fn normalize_one(input: &Path, dest_dir: &Path) -> FileReport {
    let input_name = input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| input.display().to_string());
    let output_name = normalize::output_file_name(&input_name);

    let mut report = FileReport {
        input: input.display().to_string(),
        output: output_name.clone(),
        lines_in: 0,
        lines_out: 0,
        status: "failed".to_string(),
        error: None,
    };

    let outcome = source::read_lines(input).and_then(|lines| {
        report.lines_in = lines.len() as u64;
        let normalized = normalize::normalize_lines(&lines);
        report.lines_out = normalized.len() as u64;
        source::write_text(&dest_dir.join(&output_name), &normalized.join("\n"))
    });

    match outcome {
        Ok(()) => report.status = "success".to_string(),
        Err(e) => report.error = Some(format!("{e:#}")),
    }
    report
}

fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template("[{pos}/{len}] {bar:40.cyan/blue} {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

/// Route per-file messages through the bar so they print above it; fall
/// back to plain stdout when the bar is hidden.
fn emit(bar: &ProgressBar, message: String) {
    if bar.is_hidden() {
        println!("{message}");
    } else {
        bar.println(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn quiet() -> BatchConfig {
        BatchConfig {
            fail_fast: false,
            show_progress: false,
        }
    }

    #[test]
    fn test_batch_normalizes_directory() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        std::fs::write(
            src.path().join("hamlet_TXT_FolgerShakespeare.txt"),
            "Hamlet\nACT 1\nScene 1\nFirst line\nthat wraps here\n",
        )
        .unwrap();

        let stats = run(src.path(), dest.path(), &quiet()).unwrap();
        assert_eq!(stats.files_total, 1);
        assert_eq!(stats.files_succeeded, 1);
        assert_eq!(stats.files_failed, 0);

        let out = std::fs::read_to_string(dest.path().join("hamlet_folger_mod.txt")).unwrap();
        assert_eq!(out, "Hamlet\nACT 1\nScene 1\nFirst line that wraps here");
    }

    #[test]
    fn test_batch_continues_past_failures() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        // invalid UTF-8 fails the read for this file only
        std::fs::write(src.path().join("broken.txt"), [0xFF, 0xFE, 0xFD]).unwrap();
        std::fs::write(src.path().join("good.txt"), "T\nACT 1\nScene 1\nline\n").unwrap();

        let stats = run(src.path(), dest.path(), &quiet()).unwrap();
        assert_eq!(stats.files_total, 2);
        assert_eq!(stats.files_succeeded, 1);
        assert_eq!(stats.files_failed, 1);
        assert!(dest.path().join("good_folger_mod.txt").exists());
    }

    #[test]
    fn test_missing_source_directory_is_error() {
        let dest = TempDir::new().unwrap();
        let missing = dest.path().join("absent");
        assert!(run(&missing, dest.path(), &quiet()).is_err());
    }

    #[test]
    fn test_stats_artifact_round_trips() {
        let src = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        std::fs::write(src.path().join("a.txt"), "T\nACT 1\nScene 1\nx\n").unwrap();

        let stats = run(src.path(), dest.path(), &quiet()).unwrap();
        let stats_path = dest.path().join("normalize_stats.json");
        write_stats(&stats, &stats_path).unwrap();

        let loaded: BatchStats =
            serde_json::from_str(&std::fs::read_to_string(&stats_path).unwrap()).unwrap();
        assert_eq!(loaded.files_total, 1);
        assert_eq!(loaded.reports[0].output, "a_folger_mod.txt");
    }
}
