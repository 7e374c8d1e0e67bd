use crate::model::{ImportEdge, ImportKind};
use crate::parser::common::LineIndex;
use regex::Regex;
use std::sync::LazyLock;

static STATIC_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\bimport\s+(?:type\s+)?(?:[\w$]+\s*,\s*)?(?:\{[^}]*\}|\*\s*as\s+[\w$]+|[\w$]+)\s+from\s*['"]([^'"\n]+)['"]"#,
    )
    .expect("static import pattern")
});

static SIDE_EFFECT_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bimport\s*['"]([^'"\n]+)['"]"#).expect("side-effect import pattern")
});

static RE_EXPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\bexport\s+(?:type\s+)?(?:\*(?:\s*as\s+[\w$]+)?|\{[^}]*\})\s*from\s*['"]([^'"\n]+)['"]"#,
    )
    .expect("re-export pattern")
});

static DYNAMIC_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bimport\s*\(\s*['"]([^'"\n]+)['"]\s*\)"#).expect("dynamic import pattern")
});

/// Every import statement in `source`, in order of appearance. Specifiers
/// are kept verbatim and left unresolved.
pub fn extract_imports(source: &str, lines: &LineIndex) -> Vec<ImportEdge> {
    let shapes: [(&Regex, ImportKind); 4] = [
        (&STATIC_IMPORT, ImportKind::Static),
        (&SIDE_EFFECT_IMPORT, ImportKind::SideEffect),
        (&RE_EXPORT, ImportKind::ReExport),
        (&DYNAMIC_IMPORT, ImportKind::Dynamic),
    ];

    let mut found: Vec<(usize, ImportEdge)> = Vec::new();
    for (pattern, kind) in shapes {
        for caps in pattern.captures_iter(source) {
            let (Some(whole), Some(spec)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let edge = ImportEdge::new(spec.as_str(), lines.line_of(whole.start()), kind);
            found.push((whole.start(), edge));
        }
    }

    found.sort_by_key(|(offset, _)| *offset);
    found.into_iter().map(|(_, edge)| edge).collect()
}

/// Distinct package names across non-local imports, first appearance wins.
pub fn external_dependencies(imports: &[ImportEdge]) -> Vec<String> {
    let mut packages: Vec<String> = Vec::new();
    for name in imports.iter().filter_map(ImportEdge::package_name) {
        if !packages.iter().any(|p| p == name) {
            packages.push(name.to_string());
        }
    }
    packages
}
