//! Library API for modgraph.
//!
//! Unlike the CLI commands which print output and return exit codes, these
//! functions return `Result`s for calling code to handle.
//!
//! # Example
//!
//! ```no_run
//! use modgraph::{AnalysisOptions, analyze, write_reports};
//! use std::path::Path;
//!
//! let result = analyze(Path::new("src"), AnalysisOptions::default())?;
//! println!("{} files, {} cycles", result.files.len(), result.cycles.len());
//! write_reports(&result, Path::new("."))?;
//! # Ok::<(), modgraph::ModgraphError>(())
//! ```

use crate::analysis::{self, CycleMode};
use crate::config::{Config, ConfigError};
use crate::fs::{FileSystem, default_fs, ensure_writable_dir};
use crate::model::AnalysisResult;
use crate::output::{WriteReport, write_artifacts};
use crate::parser::LexicalExtractor;
use chrono::{DateTime, TimeZone, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that stop a run before any report is written.
#[derive(Debug, Error)]
pub enum ModgraphError {
    /// The root path does not exist or cannot be resolved.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Configuration file error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Output directory {} is not writable: {source}", .path.display())]
    OutputNotWritable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// One or more report files could not be written.
    #[error("Failed to write {} report file(s): {}", .0.failed.len(), first_failure(.0))]
    Artifacts(WriteReport),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn first_failure(report: &WriteReport) -> String {
    report
        .failed
        .first()
        .map(|e| e.to_string())
        .unwrap_or_default()
}

/// Options for the `analyze` function.
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    /// Explicit config file. Without one, `.modgraph.toml` in the root is
    /// used when present.
    pub config_path: Option<PathBuf>,

    /// Use this config as-is instead of loading one.
    pub config: Option<Config>,

    pub cycle_mode: CycleMode,

    /// Overrides `scan.max_nodes`.
    pub max_nodes: Option<usize>,

    /// Report timestamp. Defaults to `SOURCE_DATE_EPOCH` when set, else now.
    pub timestamp: Option<DateTime<Utc>>,
}

/// Analyze the source tree under `path`.
///
/// Fails only when the root is missing or not a directory, or when the
/// config cannot be loaded. Per-file problems are collected in
/// `AnalysisResult::warnings`.
pub fn analyze(path: &Path, options: AnalysisOptions) -> Result<AnalysisResult, ModgraphError> {
    let root = resolve_root(path)?;

    let mut config = match options.config {
        Some(config) => config,
        None => load_config(&root, options.config_path.as_deref())?,
    };
    if let Some(max_nodes) = options.max_nodes {
        config.scan.max_nodes = max_nodes;
    }

    let extractor = LexicalExtractor::new(config.complexity.clone());
    let generated_at = options.timestamp.unwrap_or_else(report_timestamp);

    Ok(analysis::analyze(
        &root,
        &config,
        &extractor,
        default_fs(),
        options.cycle_mode,
        generated_at,
    ))
}

/// Write the JSON report, Markdown summary and Mermaid diagram into
/// `out_dir` using the default diagram limits.
pub fn write_reports(result: &AnalysisResult, out_dir: &Path) -> Result<WriteReport, ModgraphError> {
    write_reports_with(result, out_dir, &Config::default(), default_fs())
}

/// Like [`write_reports`] with explicit config and filesystem. The output
/// directory is checked for writability before anything is written.
pub fn write_reports_with(
    result: &AnalysisResult,
    out_dir: &Path,
    config: &Config,
    fs: &dyn FileSystem,
) -> Result<WriteReport, ModgraphError> {
    ensure_writable_dir(fs, out_dir).map_err(|source| ModgraphError::OutputNotWritable {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let report = write_artifacts(result, out_dir, &config.diagram, fs);
    if report.is_success() {
        Ok(report)
    } else {
        Err(ModgraphError::Artifacts(report))
    }
}

/// Canonicalize `path` and check that it is a directory.
pub fn resolve_root(path: &Path) -> Result<PathBuf, ModgraphError> {
    let resolved = path
        .canonicalize()
        .map_err(|_| ModgraphError::PathNotFound(path.to_path_buf()))?;
    if !resolved.is_dir() {
        return Err(ModgraphError::NotADirectory(path.to_path_buf()));
    }
    Ok(resolved)
}

/// Load the explicit config file if given, else the project's own.
pub fn load_config(root: &Path, config_path: Option<&Path>) -> Result<Config, ConfigError> {
    match config_path {
        Some(file) => Config::load_file(file),
        None => Config::load(root),
    }
}

/// `SOURCE_DATE_EPOCH` (seconds) when set and valid, otherwise the current
/// time.
pub fn report_timestamp() -> DateTime<Utc> {
    std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|value| value.trim().parse::<i64>().ok())
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .unwrap_or_else(Utc::now)
}
