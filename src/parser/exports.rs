use crate::model::{ExportKind, ExportSymbol};
use crate::parser::common::LineIndex;
use regex::Regex;
use std::sync::LazyLock;

static NAMED_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\bexport\s+(?:declare\s+)?(?:async\s+)?(?:abstract\s+)?(const|let|var|function|class|interface|type|enum)\b\s*\*?\s*([A-Za-z_$][\w$]*)",
    )
    .expect("named export pattern")
});

static EXPORT_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bexport\s+(type\s+)?\{([^}]*)\}(\s*from\b)?").expect("export list pattern")
});

static DEFAULT_EXPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\bexport\s+default\s+(?:async\s+)?(?:(function|class)\b\s*\*?\s*)?([A-Za-z_$][\w$]*)?",
    )
    .expect("default export pattern")
});

/// Named and default exports in order of appearance. Re-exports
/// (`export { a } from "./x"`) are imports, not local declarations, and are
/// skipped here.
pub fn extract_exports(source: &str, lines: &LineIndex) -> Vec<ExportSymbol> {
    let mut found: Vec<(usize, ExportSymbol)> = Vec::new();

    for caps in NAMED_DECLARATION.captures_iter(source) {
        let (Some(whole), Some(keyword), Some(name)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        found.push((
            whole.start(),
            ExportSymbol {
                name: name.as_str().to_string(),
                is_default: false,
                kind: declaration_kind(keyword.as_str()),
                line: lines.line_of(whole.start()),
            },
        ));
    }

    for caps in EXPORT_LIST.captures_iter(source) {
        if caps.get(3).is_some() {
            continue;
        }
        let (Some(whole), Some(list)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        let kind = if caps.get(1).is_some() {
            ExportKind::Type
        } else {
            ExportKind::Value
        };
        let line = lines.line_of(whole.start());
        for item in list.as_str().split(',') {
            let item = item.trim().trim_start_matches("type ").trim();
            if item.is_empty() {
                continue;
            }
            let exported = item.rsplit(" as ").next().unwrap_or(item).trim();
            found.push((
                whole.start(),
                ExportSymbol {
                    name: exported.to_string(),
                    is_default: exported == "default",
                    kind,
                    line,
                },
            ));
        }
    }

    for caps in DEFAULT_EXPORT.captures_iter(source) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let kind = caps
            .get(1)
            .map_or(ExportKind::Value, |k| declaration_kind(k.as_str()));
        let name = caps.get(2).map_or("default", |n| n.as_str());
        found.push((
            whole.start(),
            ExportSymbol {
                name: name.to_string(),
                is_default: true,
                kind,
                line: lines.line_of(whole.start()),
            },
        ));
    }

    // Stable sort keeps list items in their written order.
    found.sort_by_key(|(offset, _)| *offset);
    found.into_iter().map(|(_, symbol)| symbol).collect()
}

fn declaration_kind(keyword: &str) -> ExportKind {
    match keyword {
        "const" => ExportKind::Const,
        "let" => ExportKind::Let,
        "var" => ExportKind::Var,
        "function" => ExportKind::Function,
        "class" => ExportKind::Class,
        "interface" => ExportKind::Interface,
        "type" => ExportKind::Type,
        "enum" => ExportKind::Enum,
        _ => ExportKind::Value,
    }
}
