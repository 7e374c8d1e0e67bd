use crate::analysis::DependencyGraph;
use crate::model::{ComplexityLevel, Cycle, FileKind, SourceFile, StylingMethod};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Aggregate statistics over one analysis run.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_files: usize,
    pub total_dependencies: usize,
    pub circular_dependencies: usize,
    /// Mean `dependsOn` size, rounded to one decimal.
    pub average_dependencies: f64,
    /// Only kinds that occur.
    pub file_types: BTreeMap<FileKind, usize>,
    /// Always carries all three levels.
    pub complexity_distribution: BTreeMap<ComplexityLevel, usize>,
    pub unresolved_imports: usize,
    pub files_with_unresolved_imports: usize,
    /// Distinct external packages, sorted.
    pub external_packages: Vec<String>,
    /// Number of files using each styling method.
    pub styling_methods: BTreeMap<StylingMethod, usize>,
    #[serde(skip)]
    pub patterns: ComponentPatterns,
}

/// Rough split of files by the role their hooks and components suggest.
/// Each file lands in at most one bucket.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ComponentPatterns {
    pub containers: usize,
    pub presentational: usize,
    pub hooks: usize,
    pub utilities: usize,
}

impl Summary {
    pub fn compute(files: &[SourceFile], graph: &DependencyGraph, cycles: &[Cycle]) -> Self {
        let total_files = files.len();
        let total_dependencies = graph.edge_count();

        let mut file_types = BTreeMap::new();
        let mut complexity_distribution: BTreeMap<ComplexityLevel, usize> =
            ComplexityLevel::ALL.iter().map(|level| (*level, 0)).collect();
        let mut styling_methods = BTreeMap::new();
        let mut external_packages = BTreeSet::new();
        let mut patterns = ComponentPatterns::default();
        let mut unresolved_imports = 0;
        let mut files_with_unresolved_imports = 0;

        for file in files {
            *file_types.entry(file.kind).or_insert(0) += 1;
            *complexity_distribution
                .entry(file.complexity.level)
                .or_insert(0) += 1;

            for method in &file.styling {
                *styling_methods.entry(*method).or_insert(0) += 1;
            }
            external_packages.extend(file.external_dependencies.iter().cloned());

            let unresolved = file.unresolved_imports().count();
            if unresolved > 0 {
                unresolved_imports += unresolved;
                files_with_unresolved_imports += 1;
            }

            patterns.record(file);
        }

        Self {
            total_files,
            total_dependencies,
            circular_dependencies: cycles.len(),
            average_dependencies: average(total_dependencies, total_files),
            file_types,
            complexity_distribution,
            unresolved_imports,
            files_with_unresolved_imports,
            external_packages: external_packages.into_iter().collect(),
            styling_methods,
            patterns,
        }
    }

    pub fn complex_files(&self) -> usize {
        self.complexity_distribution
            .get(&ComplexityLevel::Complex)
            .copied()
            .unwrap_or(0)
    }

    pub fn files_of_kind(&self, kind: FileKind) -> usize {
        self.file_types.get(&kind).copied().unwrap_or(0)
    }
}

impl ComponentPatterns {
    fn record(&mut self, file: &SourceFile) {
        if is_container(file) {
            self.containers += 1;
        } else if is_presentational(file) {
            self.presentational += 1;
        } else if file.kind == FileKind::Hook {
            self.hooks += 1;
        } else if file.kind == FileKind::Utility {
            self.utilities += 1;
        }
    }
}

fn is_container(file: &SourceFile) -> bool {
    file.hooks.iter().any(|hook| {
        ["State", "Effect", "Fetch"]
            .iter()
            .any(|marker| hook.name.contains(marker))
    })
}

fn is_presentational(file: &SourceFile) -> bool {
    !file.components.is_empty() && file.hooks.iter().all(|hook| hook.name == "useTheme")
}

fn average(total: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (total as f64 / count as f64 * 10.0).round() / 10.0
}
