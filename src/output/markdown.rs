use crate::model::AnalysisResult;
use crate::output::{Artifact, OutputFormatter, relative_path};
use chrono::SecondsFormat;
use std::io::Write;

/// Narrative summary, one section per statistic.
pub struct MarkdownOutput;

impl MarkdownOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkdownOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for MarkdownOutput {
    fn format<W: Write>(&self, result: &AnalysisResult, writer: &mut W) -> std::io::Result<()> {
        let summary = &result.summary;

        writeln!(writer, "# Dependency Analysis: {}\n", result.project_name)?;
        writeln!(
            writer,
            "Generated: {}\n",
            result
                .generated_at
                .to_rfc3339_opts(SecondsFormat::Millis, true)
        )?;

        if result.truncated {
            writeln!(
                writer,
                "> **Analysis truncated**: the node cap was reached, only the first {} files were analyzed.\n",
                summary.total_files
            )?;
        }

        writeln!(writer, "## Summary\n")?;
        writeln!(writer, "- **Total Files**: {}", summary.total_files)?;
        writeln!(writer, "- **Total Dependencies**: {}", summary.total_dependencies)?;
        writeln!(
            writer,
            "- **Circular Dependencies**: {}",
            summary.circular_dependencies
        )?;
        writeln!(
            writer,
            "- **Average Dependencies per File**: {}",
            summary.average_dependencies
        )?;
        writeln!(
            writer,
            "- **Unresolved Local Imports**: {}",
            summary.unresolved_imports
        )?;
        writeln!(
            writer,
            "- **External Packages**: {}\n",
            summary.external_packages.len()
        )?;

        writeln!(writer, "## File Types Distribution\n")?;
        if summary.file_types.is_empty() {
            writeln!(writer, "No files scanned.")?;
        }
        for (kind, count) in &summary.file_types {
            writeln!(writer, "- **{}**: {}", kind, count)?;
        }
        writeln!(writer)?;

        writeln!(writer, "## Complexity Distribution\n")?;
        for (level, count) in &summary.complexity_distribution {
            writeln!(writer, "- **{}**: {}", level, count)?;
        }
        writeln!(writer)?;

        let patterns = &summary.patterns;
        writeln!(writer, "## Component Patterns\n")?;
        writeln!(writer, "- **Containers**: {}", patterns.containers)?;
        writeln!(writer, "- **Presentational**: {}", patterns.presentational)?;
        writeln!(writer, "- **Hooks**: {}", patterns.hooks)?;
        writeln!(writer, "- **Utilities**: {}\n", patterns.utilities)?;

        writeln!(writer, "## Circular Dependencies\n")?;
        if result.cycles.is_empty() {
            writeln!(writer, "None found! 🎉\n")?;
        }
        for (index, cycle) in result.cycles.iter().enumerate() {
            writeln!(writer, "### Cycle {}\n", index + 1)?;
            for file in cycle.path() {
                writeln!(writer, "- {}", file)?;
            }
            writeln!(writer)?;
        }

        let unresolved: Vec<_> = result
            .files
            .iter()
            .filter(|f| f.unresolved_imports().next().is_some())
            .collect();
        if !unresolved.is_empty() {
            writeln!(writer, "## Unresolved Imports\n")?;
            for file in unresolved {
                let specs: Vec<_> = file
                    .unresolved_imports()
                    .map(|i| format!("`{}` (line {})", i.raw_specifier, i.line))
                    .collect();
                writeln!(writer, "- `{}` → {}", file.path, specs.join(", "))?;
            }
            writeln!(writer)?;
        }

        if !summary.external_packages.is_empty() {
            writeln!(writer, "## External Packages\n")?;
            for package in &summary.external_packages {
                writeln!(writer, "- `{}`", package)?;
            }
            writeln!(writer)?;
        }

        writeln!(writer, "## Recommendations\n")?;
        if result.recommendations.is_empty() {
            writeln!(writer, "No recommendations.\n")?;
        }
        for rec in &result.recommendations {
            writeln!(writer, "### {} ({} priority)\n", rec.title, rec.priority)?;
            writeln!(writer, "- **Category**: {}", rec.category)?;
            writeln!(writer, "- **Description**: {}", rec.description)?;
            writeln!(writer, "- **Impact**: {}\n", rec.impact)?;
        }

        if !result.warnings.is_empty() {
            writeln!(writer, "## Warnings\n")?;
            for warning in &result.warnings {
                writeln!(
                    writer,
                    "- `{}`: {}",
                    relative_path(&warning.path, &result.root),
                    warning.message
                )?;
            }
            writeln!(writer)?;
        }

        writeln!(writer, "## Dependency Graph\n")?;
        writeln!(
            writer,
            "View the {} file with a Mermaid viewer to see the visual dependency graph.",
            Artifact::Diagram.file_name()
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::{analyze_tree, cyclic_project};
    use crate::output::render;

    #[test]
    fn test_sections_for_cyclic_project() {
        let (_dir, result) = cyclic_project();
        let md = render(&MarkdownOutput::new(), &result).unwrap();

        assert!(md.contains("Generated: 2024-05-01T12:00:00.000Z"));
        assert!(md.contains("- **Total Files**: 3"));
        assert!(md.contains("- **Circular Dependencies**: 1"));
        assert!(md.contains("### Cycle 1\n\n- a.ts\n- b.ts\n- c.tsx\n- a.ts\n"));
        assert!(md.contains("- `c.tsx` → `./missing` (line 3)"));
        assert!(md.contains("### Resolve Circular Dependencies (high priority)"));
        assert!(md.contains("- `react`"));
        assert!(!md.contains("Analysis truncated"));
    }

    #[test]
    fn test_clean_project() {
        let (_dir, result) = analyze_tree(&[
            ("index.ts", "import { x } from './lib';\nexport const y = x;\n"),
            ("lib.ts", "export const x = 1;\n"),
        ]);
        let md = render(&MarkdownOutput::new(), &result).unwrap();

        assert!(md.contains("None found! 🎉"));
        assert!(!md.contains("## Unresolved Imports"));
        assert!(!md.contains("## Warnings"));
        assert!(md.contains("- **simple**: 2"));
    }
}
