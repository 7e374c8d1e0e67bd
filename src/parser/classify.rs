//! Lexical file-role classifier.
//!
//! Rules are checked in a fixed priority order and the first match wins.
//! It works on substrings and regexes over comment-masked source, so it will
//! misclassify unusual files; that is accepted in exchange for linear-time
//! classification with no parser.

use crate::model::{ComponentDef, ExportSymbol, FileKind, ImportEdge};
use regex::Regex;
use std::sync::LazyLock;

pub const CONFIG_EXTENSIONS: &[&str] = &["json"];
pub const STYLE_EXTENSIONS: &[&str] = &["css", "scss", "sass", "less"];

static FUNCTION_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfunction\b").expect("function keyword pattern"));

static STANDALONE_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\b")
        .expect("standalone function pattern")
});

static TOP_LEVEL_ARROW_CONST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^(?:export\s+)?const\s+[A-Za-z_$][\w$]*\s*(?::[^=\n]+)?=\s*(?:async\s+)?(?:\([^)]*\)|[A-Za-z_$][\w$]*)\s*(?::[^=\n]+)?=>",
    )
    .expect("arrow const pattern")
});

static HOOK_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^use[A-Z0-9]").expect("hook name pattern"));

static TEST_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:describe|test|it)\s*\(").expect("test call pattern"));

/// What the classifier looks at for one file.
pub struct ClassifyInput<'a> {
    pub path: &'a str,
    pub extension: &'a str,
    /// Comment-masked source text.
    pub source: &'a str,
    pub exports: &'a [ExportSymbol],
    pub components: &'a [ComponentDef],
    pub imports: &'a [ImportEdge],
}

pub fn classify(input: &ClassifyInput<'_>) -> FileKind {
    let ext = input.extension.to_ascii_lowercase();
    let has_exports = !input.exports.is_empty();

    if CONFIG_EXTENSIONS.contains(&ext.as_str()) {
        return FileKind::Config;
    }
    if STYLE_EXTENSIONS.contains(&ext.as_str()) {
        return FileKind::Style;
    }
    if input.exports.iter().any(|e| e.is_default) && FUNCTION_KEYWORD.is_match(input.source) {
        return FileKind::Component;
    }
    if has_exports && TOP_LEVEL_ARROW_CONST.is_match(input.source) {
        return FileKind::Component;
    }
    if has_exports && STANDALONE_FUNCTION.is_match(input.source) {
        return FileKind::Utility;
    }
    if exports_hook(input.exports) && !renders_ui(input) {
        return FileKind::Hook;
    }
    if has_exports && input.exports.iter().all(ExportSymbol::is_type_only) {
        return FileKind::Types;
    }
    if looks_like_test(input.path, input.source) {
        return FileKind::Test;
    }

    FileKind::Module
}

fn exports_hook(exports: &[ExportSymbol]) -> bool {
    exports.iter().any(|e| HOOK_NAME.is_match(&e.name))
}

fn renders_ui(input: &ClassifyInput<'_>) -> bool {
    !input.components.is_empty()
        || input.imports.iter().any(|i| {
            let spec = i.raw_specifier.to_ascii_lowercase();
            STYLE_EXTENSIONS
                .iter()
                .any(|ext| spec.ends_with(&format!(".{}", ext)))
        })
}

fn looks_like_test(path: &str, source: &str) -> bool {
    path.contains(".test.")
        || path.contains(".spec.")
        || path.contains("__tests__/")
        || TEST_CALL.is_match(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExportKind, ImportKind};

    fn export(name: &str, kind: ExportKind, is_default: bool) -> ExportSymbol {
        ExportSymbol {
            name: name.to_string(),
            is_default,
            kind,
            line: 1,
        }
    }

    fn kind_of(path: &str, source: &str, exports: &[ExportSymbol]) -> FileKind {
        let extension = path.rsplit('.').next().unwrap_or("");
        classify(&ClassifyInput {
            path,
            extension,
            source,
            exports,
            components: &[],
            imports: &[],
        })
    }

    #[test]
    fn test_extension_rules_win() {
        let default_fn = [export("App", ExportKind::Function, true)];
        assert_eq!(
            kind_of("package.json", "function", &default_fn),
            FileKind::Config
        );
        assert_eq!(kind_of("theme.scss", ".a { }", &[]), FileKind::Style);
    }

    #[test]
    fn test_default_export_with_function_is_component() {
        let exports = [export("App", ExportKind::Function, true)];
        assert_eq!(
            kind_of("App.tsx", "export default function App() {}", &exports),
            FileKind::Component
        );
    }

    #[test]
    fn test_arrow_const_with_export_is_component() {
        let exports = [export("Card", ExportKind::Const, false)];
        let source = "export const Card = ({ title }: Props) => null;";
        assert_eq!(kind_of("Card.tsx", source, &exports), FileKind::Component);
    }

    #[test]
    fn test_exported_function_is_utility() {
        let exports = [export("slugify", ExportKind::Function, false)];
        let source = "export function slugify(s: string) { return s; }";
        assert_eq!(kind_of("slug.ts", source, &exports), FileKind::Utility);
    }

    #[test]
    fn test_hook_export_without_ui() {
        let exports = [export("useStore", ExportKind::Const, false)];
        let source = "export const useStore = create(set => ({}));";
        assert_eq!(kind_of("store.ts", source, &exports), FileKind::Hook);

        let style_import = [ImportEdge::new("./store.css", 1, ImportKind::SideEffect)];
        let kind = classify(&ClassifyInput {
            path: "store.ts",
            extension: "ts",
            source,
            exports: &exports,
            components: &[],
            imports: &style_import,
        });
        assert_ne!(kind, FileKind::Hook);
    }

    #[test]
    fn test_type_only_exports() {
        let exports = [
            export("Props", ExportKind::Interface, false),
            export("Id", ExportKind::Type, false),
        ];
        let source = "export interface Props {}\nexport type Id = string;";
        assert_eq!(kind_of("types.ts", source, &exports), FileKind::Types);
    }

    #[test]
    fn test_test_files() {
        let source = "describe('x', () => { test('y', () => {}); });";
        assert_eq!(kind_of("x.ts", source, &[]), FileKind::Test);
        assert_eq!(kind_of("src/__tests__/y.ts", "", &[]), FileKind::Test);
    }

    #[test]
    fn test_fallback_is_module() {
        assert_eq!(
            kind_of("main.ts", "console.log('hi');", &[]),
            FileKind::Module
        );
    }
}
