use crate::model::{ComponentDef, HookUsage, StylingMethod};
use crate::parser::common::{LineIndex, balanced_block};
use regex::Regex;
use std::sync::LazyLock;

static PASCAL_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:const|let|function)\s+([A-Z][\w$]*)").expect("component declaration pattern")
});

static RETURNS_MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\breturn|=>)\s*\(?\s*<[A-Za-z>]").expect("markup return pattern")
});

static HOOK_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(use[A-Z][\w$]*)\s*\(").expect("hook call pattern"));

static SX_PROP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bsx\s*[=:]").expect("sx pattern"));

/// PascalCase declarations whose body returns markup.
pub fn extract_components(source: &str, lines: &LineIndex) -> Vec<ComponentDef> {
    PASCAL_DECLARATION
        .captures_iter(source)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            let body = declaration_body(source, whole.start());
            RETURNS_MARKUP.is_match(body).then(|| ComponentDef {
                name: name.as_str().to_string(),
                line: lines.line_of(whole.start()),
            })
        })
        .collect()
}

/// Text of the declaration starting at `start`. Parameter lists and type
/// annotations are skipped, so a destructured `({ title })` is never taken
/// for the body. The body is the first top-level block, or the statement up
/// to its first top-level `;`.
fn declaration_body(source: &str, start: usize) -> &str {
    let rest = &source[start..];
    let bytes = rest.as_bytes();
    let mut i = if bytes.starts_with(b"function") {
        0
    } else {
        initializer_start(bytes)
    };
    let mut depth = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth = depth.saturating_sub(1),
            b';' if depth == 0 => return &rest[..=i],
            b'{' if depth == 0 => {
                let block = balanced_block(source, start + i);
                return &rest[..i + block.len()];
            }
            b'=' if depth == 0 && bytes.get(i + 1) == Some(&b'>') => {
                i += 2;
                while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
                    i += 1;
                }
                if bytes.get(i) == Some(&b'{') {
                    let block = balanced_block(source, start + i);
                    return &rest[..i + block.len()];
                }
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    rest
}

/// Offset just past the `=` of a `const`/`let` declaration, stepping over a
/// type annotation such as `: React.FC<{ label: string }>`.
fn initializer_start(bytes: &[u8]) -> usize {
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'(' | b'[' | b'{' | b'<' => depth += 1,
            b')' | b']' | b'}' | b'>' => depth = depth.saturating_sub(1),
            b'=' if bytes.get(i + 1) == Some(&b'>') => i += 1,
            b'=' if depth == 0 => return i + 1,
            b';' if depth == 0 => return i,
            _ => {}
        }
        i += 1;
    }
    bytes.len()
}

/// `useXxx(` call sites. Declarations (`function useXxx(`) are not calls.
pub fn extract_hook_usage(source: &str, lines: &LineIndex) -> Vec<HookUsage> {
    HOOK_CALL
        .captures_iter(source)
        .filter_map(|caps| {
            let name = caps.get(1)?;
            if source[..name.start()].trim_end().ends_with("function") {
                return None;
            }
            Some(HookUsage {
                name: name.as_str().to_string(),
                line: lines.line_of(name.start()),
            })
        })
        .collect()
}

/// Styling approaches visible in the file, sorted and deduplicated.
pub fn detect_styling(source: &str) -> Vec<StylingMethod> {
    let mut methods = Vec::new();

    if source.contains("styled(") || source.contains("styled.") {
        methods.push(StylingMethod::StyledComponents);
    }
    if source.contains("makeStyles") || source.contains("useStyles") {
        methods.push(StylingMethod::Jss);
    }
    if SX_PROP.is_match(source) {
        methods.push(StylingMethod::Sx);
    }
    if source.contains("className=") {
        methods.push(StylingMethod::CssClasses);
    }
    if source.contains(" style={") || source.contains("\tstyle={") || source.contains("\nstyle={")
    {
        methods.push(StylingMethod::InlineStyles);
    }

    methods.sort();
    methods.dedup();
    methods
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(source: &str) -> LineIndex {
        LineIndex::new(source)
    }

    #[test]
    fn test_function_and_arrow_components() {
        let source = r#"const MAX = 3;
function Header() {
  return (
    <h1>title</h1>
  );
}
const Footer = () => <footer />;
const Config = { a: 1 };
export default function Page() { if (x) { y(); } return <><Header /></>; }
"#;
        let found = extract_components(source, &lines(source));
        let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Header", "Footer", "Page"]);
        assert_eq!(found[0].line, 2);
    }

    #[test]
    fn test_destructured_props() {
        let source = r#"export function Card({ title }: Props) {
  return <div>{title}</div>;
}
export const Row = ({ label }) => {
  return <span>{label}</span>;
};
const Cell: React.FC<{ value: number }> = ({ value }) => (
  <td>{value}</td>
);
export function Total({ items }: { items: number[] }) {
  return items.length;
}
"#;
        let found = extract_components(source, &lines(source));
        let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Card", "Row", "Cell"]);
        assert_eq!(found[1].line, 4);
    }

    #[test]
    fn test_comparison_is_not_markup() {
        let source = "function Clamp(a, b) { return a < b ? a : b; }";
        assert!(extract_components(source, &lines(source)).is_empty());
    }

    #[test]
    fn test_hook_usage_skips_declarations() {
        let source = r#"export function useCounter() {
  const [n, setN] = useState(0);
  useEffect(() => {}, []);
  return n;
}"#;
        let hooks = extract_hook_usage(source, &lines(source));
        let names: Vec<_> = hooks.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["useState", "useEffect"]);
        assert_eq!(hooks[0].line, 2);
    }

    #[test]
    fn test_detect_styling() {
        let source = r#"const Box = styled.div``;
const useStyles = makeStyles({});
<Button sx={{ p: 1 }} className="x" style={{ color: 'red' }} />"#;
        assert_eq!(
            detect_styling(source),
            vec![
                StylingMethod::StyledComponents,
                StylingMethod::Jss,
                StylingMethod::Sx,
                StylingMethod::CssClasses,
                StylingMethod::InlineStyles,
            ]
        );
        assert!(detect_styling("export const a = 1;").is_empty());
    }
}
