//! File complexity scoring.
//!
//! A single comparable score per file:
//!
//! ```text
//! score = round(lines / lines_per_point
//!             + branches / branches_per_point
//!             + functions / functions_per_point
//!             + imports / imports_per_point)
//! ```
//!
//! The weights and the `simple`/`moderate`/`complex` cut-offs live in
//! `ComplexityPolicy` and can be overridden from `.modgraph.toml`.

use crate::config::ComplexityPolicy;
use crate::model::Complexity;
use regex::Regex;
use std::sync::LazyLock;

// `?.` is optional chaining and `?:` an optional TS member; neither branches.
static BRANCH_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:if|while|for|switch|case|catch)\b|&&|\|\||\?\?|\?[^.?:]")
        .expect("branch token pattern")
});

static FUNCTION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfunction\b|=>").expect("function token pattern"));

/// Measure comment-masked `source`. `line_count` is taken from the raw text.
pub fn measure(
    source: &str,
    line_count: usize,
    import_count: usize,
    policy: &ComplexityPolicy,
) -> Complexity {
    let branches = BRANCH_TOKEN.find_iter(source).count();
    let functions = FUNCTION_TOKEN.find_iter(source).count();
    let score = score(line_count, branches, functions, import_count, policy);

    Complexity {
        lines: line_count,
        branches,
        functions,
        imports: import_count,
        score,
        level: policy.level_for(score),
    }
}

pub fn score(
    lines: usize,
    branches: usize,
    functions: usize,
    imports: usize,
    policy: &ComplexityPolicy,
) -> u32 {
    let raw = ratio(lines, policy.lines_per_point)
        + ratio(branches, policy.branches_per_point)
        + ratio(functions, policy.functions_per_point)
        + ratio(imports, policy.imports_per_point);
    raw.round() as u32
}

fn ratio(count: usize, per_point: f64) -> f64 {
    if per_point <= 0.0 {
        0.0
    } else {
        count as f64 / per_point
    }
}
