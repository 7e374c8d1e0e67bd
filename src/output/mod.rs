mod json;
mod markdown;
mod mermaid;

pub use json::JsonOutput;
pub use markdown::MarkdownOutput;
pub use mermaid::{EdgePlan, MermaidOutput, plan_edges};

use crate::config::DiagramLimits;
use crate::fs::FileSystem;
use crate::model::AnalysisResult;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub trait OutputFormatter {
    fn format<W: Write>(&self, result: &AnalysisResult, writer: &mut W) -> std::io::Result<()>;
}

/// The three report files written for every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Json,
    Markdown,
    Diagram,
}

impl Artifact {
    pub const ALL: [Artifact; 3] = [Artifact::Json, Artifact::Markdown, Artifact::Diagram];

    pub fn file_name(&self) -> &'static str {
        match self {
            Artifact::Json => "dependency-analysis.json",
            Artifact::Markdown => "dependency-analysis.md",
            Artifact::Diagram => "dependency-graph.mmd",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Artifact::Json => "detailed data",
            Artifact::Markdown => "human-readable",
            Artifact::Diagram => "Mermaid diagram",
        }
    }
}

#[derive(Debug, Error)]
#[error("failed to write {}: {source}", .path.display())]
pub struct ArtifactError {
    pub artifact: Artifact,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Outcome of writing every artifact. One failure never stops the rest.
#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<(Artifact, PathBuf)>,
    pub failed: Vec<ArtifactError>,
    /// Graph edges left out of the diagram by the edge caps.
    pub diagram_edges_omitted: usize,
}

impl WriteReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Render the JSON report, the Markdown summary and the Mermaid diagram
/// into `out_dir`.
pub fn write_artifacts(
    result: &AnalysisResult,
    out_dir: &Path,
    limits: &DiagramLimits,
    fs: &dyn FileSystem,
) -> WriteReport {
    let mut report = WriteReport {
        diagram_edges_omitted: plan_edges(result, limits).omitted,
        ..WriteReport::default()
    };

    for artifact in Artifact::ALL {
        let path = out_dir.join(artifact.file_name());
        let rendered = match artifact {
            Artifact::Json => render(&JsonOutput::new(), result),
            Artifact::Markdown => render(&MarkdownOutput::new(), result),
            Artifact::Diagram => render(&MermaidOutput::new(limits.clone()), result),
        };

        match rendered.and_then(|content| fs.write(&path, &content)) {
            Ok(()) => report.written.push((artifact, path)),
            Err(source) => report.failed.push(ArtifactError {
                artifact,
                path,
                source,
            }),
        }
    }

    report
}

/// Format into a string, for callers that want the text rather than a file.
pub fn render<F: OutputFormatter>(formatter: &F, result: &AnalysisResult) -> io::Result<String> {
    let mut buf = Vec::new();
    formatter.format(result, &mut buf)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Convert an absolute path to a `/`-separated path relative to the project
/// root. Paths outside the root are returned as-is.
pub fn relative_path(path: &Path, project_root: &Path) -> String {
    match path.strip_prefix(project_root) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => crate::analysis::to_slash(rel),
        Err(_) => path.display().to_string(),
    }
}
