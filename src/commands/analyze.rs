use crate::analysis;
use crate::api::report_timestamp;
use crate::cli::AnalyzeArgs;
use crate::fs::{FileSystem, default_fs, ensure_writable_dir};
use crate::model::AnalysisResult;
use crate::output::{MarkdownOutput, WriteReport, render, write_artifacts};
use crate::parser::LexicalExtractor;
use crate::style;
use std::io;

use super::CommandContext;

pub fn cmd_analyze(args: AnalyzeArgs) -> i32 {
    cmd_analyze_with_fs(args, default_fs())
}

pub fn cmd_analyze_with_fs(args: AnalyzeArgs, fs: &dyn FileSystem) -> i32 {
    let mut ctx = match CommandContext::new(&args.path, args.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };
    args.apply_overrides(&mut ctx.config);

    // Fail before scanning so an unwritable destination never leaves partial reports.
    if let Err(e) = ensure_writable_dir(fs, &args.out_dir) {
        style::error(&format!(
            "Cannot write reports to {}: {}",
            style::path(&args.out_dir),
            e
        ));
        return 1;
    }

    if !args.quiet {
        style::status(&format!("Analyzing {}...", style::path(&ctx.path)));
    }

    let extractor = LexicalExtractor::new(ctx.config.complexity.clone());
    let result = analysis::analyze(
        &ctx.path,
        &ctx.config,
        &extractor,
        fs,
        args.cycle_mode,
        report_timestamp(),
    );

    if !args.quiet {
        for warning in &result.warnings {
            style::scan_warning(warning, &ctx.path);
        }
    }

    let report = write_artifacts(&result, &args.out_dir, &ctx.config.diagram, fs);
    for failure in &report.failed {
        style::error(&failure.to_string());
    }

    if !args.quiet {
        print_summary(&result, &report);
    }

    // Cycles are findings, not failures; only missing reports fail the run.
    if report.is_success() { 0 } else { 1 }
}

const CYCLES_SHOWN: usize = 5;

fn print_summary(result: &AnalysisResult, report: &WriteReport) {
    let summary = &result.summary;

    if report.diagram_edges_omitted > 0 {
        style::warning(&format!(
            "Diagram truncated: {} of {} edges omitted",
            report.diagram_edges_omitted, summary.total_dependencies
        ));
    }

    style::section("Summary");
    println!("{}", style::metric("Files", summary.total_files));
    println!("{}", style::metric("Dependencies", summary.total_dependencies));
    println!(
        "{}",
        style::metric("Circular dependencies", summary.circular_dependencies)
    );
    println!(
        "{}",
        style::metric("Average dependencies", summary.average_dependencies)
    );
    println!(
        "{}",
        style::metric("Unresolved imports", summary.unresolved_imports)
    );

    if !result.recommendations.is_empty() {
        style::section("Recommendations");
        for rec in &result.recommendations {
            println!("  [{}] {}", style::priority(rec.priority), rec.title);
        }
    }

    if !report.written.is_empty() {
        style::section("Reports");
        for (artifact, path) in &report.written {
            println!("  {} ({})", style::path(path), artifact.description());
        }
    }

    if report.is_success() {
        println!();
        style::success("Analysis complete");
    }

    if style::is_terminal() {
        match render(&MarkdownOutput::new(), result) {
            Ok(markdown) => {
                println!();
                if let Err(e) = style::render_markdown(&markdown, &mut io::stdout()) {
                    style::error(&format!("Failed to render summary: {}", e));
                }
            }
            Err(e) => style::error(&format!("Failed to format summary: {}", e)),
        }
    } else if !result.cycles.is_empty() {
        style::section("Cycles");
        for cycle in result.cycles.iter().take(CYCLES_SHOWN) {
            println!("  {}", style::cycle(cycle));
        }
        if result.cycles.len() > CYCLES_SHOWN {
            style::hint("see dependency-analysis.md for the full cycle list");
        }
    }
}
