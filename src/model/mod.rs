mod cycle;
mod recommendation;
mod source_file;

pub use cycle::Cycle;
pub use recommendation::{Category, Priority, Recommendation};
pub use source_file::{
    Complexity, ComplexityLevel, ComponentDef, ExportKind, ExportSymbol, FileKind, HookUsage,
    ImportEdge, ImportKind, SourceFile, StylingMethod,
};

use crate::analysis::{DependencyGraph, Summary};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Everything a single analysis run produced. Built once, never mutated.
pub struct AnalysisResult {
    pub project_name: String,
    pub root: PathBuf,
    pub generated_at: DateTime<Utc>,
    /// Scanned files, sorted by project-relative path.
    pub files: Vec<SourceFile>,
    pub graph: DependencyGraph,
    pub cycles: Vec<Cycle>,
    pub summary: Summary,
    pub recommendations: Vec<Recommendation>,
    pub warnings: Vec<ScanWarning>,
    /// Set when the node cap cut the file set short.
    pub truncated: bool,
}

/// A recoverable per-item problem. Never affects the exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanWarning {
    pub path: PathBuf,
    pub message: String,
}

impl ScanWarning {
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

impl AnalysisResult {
    pub fn file(&self, path: &str) -> Option<&SourceFile> {
        self.files
            .binary_search_by(|f| f.path.as_str().cmp(path))
            .ok()
            .map(|i| &self.files[i])
    }
}
