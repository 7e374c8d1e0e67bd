mod circular;
pub mod complexity;
mod graph;
mod recommend;
mod resolve;
mod summary;
mod walk;

pub use circular::{CycleMode, detect_cycles};
pub use graph::DependencyGraph;
pub use recommend::recommend;
pub use resolve::{ImportResolver, resolve_imports};
pub use summary::{ComponentPatterns, Summary};
pub use walk::{CandidateFile, WalkOutcome, discover_files, to_slash};

use crate::config::Config;
use crate::fs::FileSystem;
use crate::model::{AnalysisResult, ScanWarning, SourceFile};
use crate::parser::{SourceExtractor, opaque_file};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use std::path::Path;

/// Run the whole pipeline over `root`: walk, extract, resolve, build the
/// graph, find cycles, then summarize. Per-file problems end up in
/// `warnings`; nothing here fails.
///
/// Extraction runs in parallel. Resolution starts only once every file is
/// known, and the file list is re-sorted so the result never depends on
/// scheduling.
pub fn analyze(
    root: &Path,
    config: &Config,
    extractor: &dyn SourceExtractor,
    fs: &dyn FileSystem,
    cycle_mode: CycleMode,
    generated_at: DateTime<Utc>,
) -> AnalysisResult {
    let project_name = root
        .canonicalize()
        .ok()
        .as_deref()
        .and_then(|p| p.file_name())
        .and_then(|s| s.to_str())
        .unwrap_or("project")
        .to_string();

    let WalkOutcome {
        files: mut candidates,
        mut warnings,
    } = discover_files(root, &config.scan);

    let truncated = candidates.len() > config.scan.max_nodes;
    if truncated {
        warnings.push(ScanWarning::new(
            root,
            format!(
                "analysis truncated: {} files found, only the first {} were analyzed",
                candidates.len(),
                config.scan.max_nodes
            ),
        ));
        candidates.truncate(config.scan.max_nodes);
    }

    let extracted: Vec<(SourceFile, Option<ScanWarning>)> = candidates
        .par_iter()
        .map(|candidate| extract_file(candidate, extractor, fs))
        .collect();

    let mut files = Vec::with_capacity(extracted.len());
    for (file, warning) in extracted {
        warnings.extend(warning);
        files.push(file);
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));

    let resolver = ImportResolver::for_files(&files, &config.resolve.extensions);
    let files = resolve_imports(files, &resolver);

    let graph = DependencyGraph::build(&files);
    let cycles = detect_cycles(&graph, cycle_mode);
    let summary = Summary::compute(&files, &graph, &cycles);
    let recommendations = recommend(&summary, &config.recommendations);

    AnalysisResult {
        project_name,
        root: root.to_path_buf(),
        generated_at,
        files,
        graph,
        cycles,
        summary,
        recommendations,
        warnings,
        truncated,
    }
}

/// Read and extract one file. Unreadable or undecodable content is kept as
/// an opaque module so it still shows up as a node.
fn extract_file(
    candidate: &CandidateFile,
    extractor: &dyn SourceExtractor,
    fs: &dyn FileSystem,
) -> (SourceFile, Option<ScanWarning>) {
    let bytes = match fs.read(&candidate.absolute) {
        Ok(bytes) => bytes,
        Err(e) => {
            return (
                opaque_file(&candidate.relative, &candidate.absolute, &[]),
                Some(ScanWarning::new(
                    &candidate.absolute,
                    format!("could not read file: {}", e),
                )),
            );
        }
    };

    match extractor.extract(&candidate.relative, &candidate.absolute, &bytes) {
        Ok(file) => (file, None),
        Err(e) => (
            opaque_file(&candidate.relative, &candidate.absolute, &bytes),
            Some(ScanWarning::new(
                &candidate.absolute,
                format!("treated as plain module: {}", e),
            )),
        ),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFs;
    use crate::model::FileKind;
    use crate::parser::LexicalExtractor;
    use std::fs as stdfs;
    use tempfile::TempDir;

    fn analyze_tree(tree: &[(&str, &str)], config: &Config) -> (TempDir, AnalysisResult) {
        let dir = TempDir::new().unwrap();
        for (rel, content) in tree {
            let path = dir.path().join(rel);
            stdfs::create_dir_all(path.parent().unwrap()).unwrap();
            stdfs::write(path, content).unwrap();
        }
        let result = analyze(
            dir.path(),
            config,
            &LexicalExtractor::default(),
            crate::fs::default_fs(),
            CycleMode::BackEdge,
            DateTime::<Utc>::UNIX_EPOCH,
        );
        (dir, result)
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let (_dir, result) = analyze_tree(
            &[
                ("a.ts", "import { b } from './b';\nexport const a = b;\n"),
                ("b.ts", "import { c } from './c';\nexport const b = c;\n"),
                ("c.ts", "import { a } from './a';\nexport const c = 1;\n"),
                ("d.ts", "import React from 'react';\nimport x from './nope';\n"),
            ],
            &Config::default(),
        );

        let paths: Vec<_> = result.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["a.ts", "b.ts", "c.ts", "d.ts"]);
        assert_eq!(result.cycles.len(), 1);
        assert_eq!(result.cycles[0].path(), ["a.ts", "b.ts", "c.ts", "a.ts"]);
        assert_eq!(result.summary.circular_dependencies, 1);
        assert_eq!(result.summary.unresolved_imports, 1);
        assert!(result.graph.depends_on("d.ts").is_empty());
        assert_eq!(
            result.file("d.ts").unwrap().external_dependencies,
            vec!["react"]
        );
        assert!(!result.truncated);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_node_cap_truncates() {
        let mut config = Config::default();
        config.scan.max_nodes = 2;
        let (_dir, result) = analyze_tree(
            &[("a.ts", ""), ("b.ts", ""), ("c.ts", "")],
            &config,
        );

        assert!(result.truncated);
        assert_eq!(result.files.len(), 2);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("truncated"));
    }

    #[test]
    fn test_undecodable_file_becomes_module() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.js");
        stdfs::write(&path, "").unwrap();

        // Walking sees the real tree; contents come from the mock.
        let fs = MockFs::with_files([(&path, vec![0x00u8, 0x01, 0x02])]);
        let result = analyze(
            dir.path(),
            &Config::default(),
            &LexicalExtractor::default(),
            &fs,
            CycleMode::BackEdge,
            DateTime::<Utc>::UNIX_EPOCH,
        );

        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files[0].kind, FileKind::Module);
        assert_eq!(result.files[0].size_bytes, 3);
        assert_eq!(result.warnings.len(), 1);
    }
}
