use crate::analysis::{ComponentPatterns, Summary};
use crate::model::{AnalysisResult, ComplexityLevel, FileKind, Recommendation, SourceFile};
use crate::output::{OutputFormatter, relative_path};
use chrono::SecondsFormat;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Structured report with camelCase keys, one entry per node under
/// `dependencyGraph`.
pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    project: &'a str,
    timestamp: String,
    truncated: bool,
    summary: &'a Summary,
    dependency_graph: BTreeMap<&'a str, JsonNode<'a>>,
    circular_dependencies: Vec<&'a [String]>,
    component_analysis: JsonComponentAnalysis<'a>,
    recommendations: &'a [Recommendation],
    warnings: Vec<JsonWarning<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonNode<'a> {
    #[serde(flatten)]
    file: &'a SourceFile,
    depends_on: Vec<&'a str>,
    dependents: Vec<&'a str>,
    unresolved_imports: Vec<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonComponentAnalysis<'a> {
    by_type: &'a BTreeMap<FileKind, usize>,
    complexity: &'a BTreeMap<ComplexityLevel, usize>,
    patterns: ComponentPatterns,
}

#[derive(Serialize)]
struct JsonWarning<'a> {
    path: String,
    message: &'a str,
}

impl OutputFormatter for JsonOutput {
    fn format<W: Write>(&self, result: &AnalysisResult, writer: &mut W) -> std::io::Result<()> {
        let report = JsonReport {
            project: &result.project_name,
            timestamp: result
                .generated_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            truncated: result.truncated,
            summary: &result.summary,
            dependency_graph: result
                .files
                .iter()
                .map(|file| {
                    let node = JsonNode {
                        file,
                        depends_on: result.graph.depends_on(&file.path),
                        dependents: result.graph.dependents(&file.path),
                        unresolved_imports: file
                            .unresolved_imports()
                            .map(|i| i.raw_specifier.as_str())
                            .collect(),
                    };
                    (file.path.as_str(), node)
                })
                .collect(),
            circular_dependencies: result.cycles.iter().map(|c| c.path()).collect(),
            component_analysis: JsonComponentAnalysis {
                by_type: &result.summary.file_types,
                complexity: &result.summary.complexity_distribution,
                patterns: result.summary.patterns,
            },
            recommendations: &result.recommendations,
            warnings: result
                .warnings
                .iter()
                .map(|w| JsonWarning {
                    path: relative_path(&w.path, &result.root),
                    message: &w.message,
                })
                .collect(),
        };

        let json = serde_json::to_string_pretty(&report).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::{analyze_tree, cyclic_project};
    use crate::output::render;
    use serde_json::Value;

    fn report(result: &AnalysisResult) -> Value {
        serde_json::from_str(&render(&JsonOutput::new(), result).unwrap()).unwrap()
    }

    #[test]
    fn test_report_shape() {
        let (_dir, result) = cyclic_project();
        let json = report(&result);

        assert_eq!(json["timestamp"], "2024-05-01T12:00:00.000Z");
        assert_eq!(json["truncated"], false);
        assert_eq!(json["summary"]["totalFiles"], 3);
        assert_eq!(json["summary"]["circularDependencies"], 1);
        assert_eq!(json["summary"]["complexityDistribution"]["simple"], 3);
        assert_eq!(json["summary"]["complexityDistribution"]["complex"], 0);
        assert_eq!(
            json["circularDependencies"],
            serde_json::json!([["a.ts", "b.ts", "c.tsx", "a.ts"]])
        );
        assert_eq!(json["componentAnalysis"]["byType"]["component"], 1);
        assert_eq!(json["recommendations"][0]["priority"], "high");
    }

    #[test]
    fn test_node_entries() {
        let (_dir, result) = cyclic_project();
        let json = report(&result);
        let node = &json["dependencyGraph"]["c.tsx"];

        assert_eq!(node["kind"], "component");
        assert_eq!(node["dependsOn"], serde_json::json!(["a.ts"]));
        assert_eq!(node["dependents"], serde_json::json!(["b.ts"]));
        assert_eq!(node["externalDependencies"], serde_json::json!(["react"]));
        assert_eq!(node["unresolvedImports"], serde_json::json!(["./missing"]));
        assert_eq!(node["complexity"]["level"], "simple");
        assert!(node.get("absolutePath").is_none());
    }

    #[test]
    fn test_external_imports_never_become_edges() {
        let (_dir, result) = analyze_tree(&[("a.ts", "import React from 'react';\n")]);
        let json = report(&result);
        assert_eq!(json["dependencyGraph"]["a.ts"]["dependsOn"], serde_json::json!([]));
        assert_eq!(json["summary"]["totalDependencies"], 0);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let (_dir, result) = cyclic_project();
        assert_eq!(
            render(&JsonOutput::new(), &result).unwrap(),
            render(&JsonOutput::new(), &result).unwrap()
        );
    }
}
