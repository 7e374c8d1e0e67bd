//! Integration tests for the modgraph library API.

use chrono::{TimeZone, Utc};
use modgraph::analysis::CycleMode;
use modgraph::model::FileKind;
use modgraph::{AnalysisOptions, ModgraphError, analyze, write_reports};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn tree(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (rel, content) in files {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    dir
}

fn fixed_options() -> AnalysisOptions {
    AnalysisOptions {
        timestamp: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        ..AnalysisOptions::default()
    }
}

#[test]
fn test_three_file_cycle() {
    let dir = tree(&[
        ("a.ts", "import { b } from './b';\nexport const a = 1;\n"),
        ("b.ts", "import { c } from './c';\nexport const b = 2;\n"),
        ("c.ts", "import { a } from './a';\nexport const c = 3;\n"),
    ]);

    let result = analyze(dir.path(), fixed_options()).unwrap();

    assert_eq!(result.cycles.len(), 1);
    assert_eq!(result.cycles[0].path(), ["a.ts", "b.ts", "c.ts", "a.ts"]);
    assert_eq!(result.summary.circular_dependencies, 1);
    for (from, to) in result.cycles[0].edges() {
        assert!(result.graph.has_edge(from, to));
    }
}

#[test]
fn test_missing_import_is_recorded_not_followed() {
    let dir = tree(&[("a.ts", "import { m } from './missing';\n")]);

    let result = analyze(dir.path(), fixed_options()).unwrap();

    assert!(result.graph.depends_on("a.ts").is_empty());
    let file = result.file("a.ts").unwrap();
    let unresolved: Vec<_> = file
        .unresolved_imports()
        .map(|i| i.raw_specifier.as_str())
        .collect();
    assert_eq!(unresolved, vec!["./missing"]);
    assert_eq!(result.summary.unresolved_imports, 1);
}

#[test]
fn test_package_import_is_external_metadata() {
    let dir = tree(&[(
        "a.tsx",
        "import React from 'react';\nimport { Box } from '@mui/material/Box';\n",
    )]);

    let result = analyze(dir.path(), fixed_options()).unwrap();

    assert_eq!(result.graph.edge_count(), 0);
    assert_eq!(
        result.file("a.tsx").unwrap().external_dependencies,
        vec!["react", "@mui/material"]
    );
}

#[test]
fn test_resolution_follows_extension_priority() {
    let dir = tree(&[
        ("lib/foo.js", "export const foo = 'js';\n"),
        ("lib/foo.ts", "export const foo = 'ts';\n"),
        ("index.ts", "import { foo } from './lib/foo';\n"),
    ]);

    let result = analyze(dir.path(), fixed_options()).unwrap();

    assert_eq!(result.graph.depends_on("index.ts"), vec!["lib/foo.ts"]);
}

#[test]
fn test_directory_index_resolution() {
    let dir = tree(&[
        ("components/index.ts", "export * from './Button';\n"),
        ("components/Button.tsx", "export const Button = () => <button />;\n"),
        ("App.tsx", "import { Button } from './components';\n"),
    ]);

    let result = analyze(dir.path(), fixed_options()).unwrap();

    assert_eq!(result.graph.depends_on("App.tsx"), vec!["components/index.ts"]);
    assert_eq!(
        result.graph.depends_on("components/index.ts"),
        vec!["components/Button.tsx"]
    );
    assert_eq!(
        result.file("components/Button.tsx").unwrap().kind,
        FileKind::Component
    );
}

#[test]
fn test_tree_shaped_project_has_no_cycles() {
    let dir = tree(&[
        ("main.ts", "import './left';\nimport './right';\n"),
        ("left.ts", "import './shared';\n"),
        ("right.ts", "import './shared';\n"),
        ("shared.ts", "export const x = 1;\n"),
    ]);

    for cycle_mode in [CycleMode::BackEdge, CycleMode::Scc] {
        let options = AnalysisOptions {
            cycle_mode,
            ..fixed_options()
        };
        let result = analyze(dir.path(), options).unwrap();
        assert!(result.cycles.is_empty());
        assert_eq!(result.graph.dependents("shared.ts"), vec!["left.ts", "right.ts"]);
    }
}

#[test]
fn test_hidden_and_dependency_dirs_are_skipped() {
    let dir = tree(&[
        ("app.ts", "import x from 'lodash';\n"),
        ("node_modules/lodash/index.js", "module.exports = {};\n"),
        (".next/cache.js", "\n"),
    ]);

    let result = analyze(dir.path(), fixed_options()).unwrap();
    let paths: Vec<_> = result.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["app.ts"]);
}

#[test]
fn test_reports_are_byte_identical_across_runs() {
    let dir = tree(&[
        ("a.ts", "import './b';\nimport './c';\n"),
        ("b.ts", "import './a';\n"),
        ("c.tsx", "import React from 'react';\nexport default function C() { return <p/>; }\n"),
    ]);
    let out1 = TempDir::new().unwrap();
    let out2 = TempDir::new().unwrap();

    let first = analyze(dir.path(), fixed_options()).unwrap();
    write_reports(&first, out1.path()).unwrap();
    let second = analyze(dir.path(), fixed_options()).unwrap();
    write_reports(&second, out2.path()).unwrap();

    for name in [
        "dependency-analysis.json",
        "dependency-analysis.md",
        "dependency-graph.mmd",
    ] {
        let a = fs::read(out1.path().join(name)).unwrap();
        let b = fs::read(out2.path().join(name)).unwrap();
        assert_eq!(a, b, "{} differs between runs", name);
    }
}

#[test]
fn test_config_file_in_root_is_used() {
    let dir = tree(&[
        (".modgraph.toml", "[scan]\nextensions = [\"ts\"]\n"),
        ("a.ts", ""),
        ("b.js", ""),
    ]);

    let result = analyze(dir.path(), fixed_options()).unwrap();
    assert_eq!(result.files.len(), 1);
    assert_eq!(result.files[0].path, "a.ts");
}

#[test]
fn test_analyze_invalid_path() {
    let result = analyze(Path::new("/nonexistent/path"), AnalysisOptions::default());

    match result {
        Err(ModgraphError::PathNotFound(_)) => {}
        Err(e) => panic!("Expected PathNotFound error, got: {:?}", e),
        Ok(_) => panic!("Expected error for invalid path"),
    }
}
