/// Byte offset to 1-based line number lookup for one source text.
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    pub fn line_of(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(i) => i + 1,
            Err(i) => i,
        }
    }
}

/// Blank out `//` and `/* */` comments with spaces, keeping byte offsets and
/// newlines intact so line numbers still line up. String literals are
/// tracked so `"http://..."` is not mistaken for a comment.
pub fn mask_comments(source: &str) -> String {
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        Code,
        Line,
        Block,
        Str(u8),
    }

    let bytes = source.as_bytes();
    let mut out = bytes.to_vec();
    let mut state = State::Code;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();
        match state {
            State::Code => match (b, next) {
                (b'/', Some(b'/')) => {
                    state = State::Line;
                    out[i] = b' ';
                    out[i + 1] = b' ';
                    i += 1;
                }
                (b'/', Some(b'*')) => {
                    state = State::Block;
                    out[i] = b' ';
                    out[i + 1] = b' ';
                    i += 1;
                }
                (b'\'' | b'"' | b'`', _) => state = State::Str(b),
                _ => {}
            },
            State::Line => {
                if b == b'\n' {
                    state = State::Code;
                } else {
                    out[i] = b' ';
                }
            }
            State::Block => {
                if b == b'*' && next == Some(b'/') {
                    out[i] = b' ';
                    out[i + 1] = b' ';
                    i += 1;
                    state = State::Code;
                } else if b != b'\n' {
                    out[i] = b' ';
                }
            }
            State::Str(quote) => {
                if b == b'\\' {
                    i += 1;
                } else if b == quote || (b == b'\n' && quote != b'`') {
                    state = State::Code;
                }
            }
        }
        i += 1;
    }

    // Only whole comment bodies are replaced, so the bytes stay valid UTF-8.
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Text from `start` through the brace that closes the first `{` after it.
/// Returns the rest of the source if braces never balance.
pub fn balanced_block(source: &str, start: usize) -> &str {
    let rest = &source[start..];
    let mut depth = 0usize;
    let mut opened = false;

    for (i, c) in rest.char_indices() {
        match c {
            '{' => {
                depth += 1;
                opened = true;
            }
            '}' if opened => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return &rest[..=i];
                }
            }
            _ => {}
        }
    }

    rest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_of() {
        let source = "a\nbc\n\nd";
        let index = LineIndex::new(source);
        assert_eq!(index.line_of(0), 1);
        assert_eq!(index.line_of(2), 2);
        assert_eq!(index.line_of(3), 2);
        assert_eq!(index.line_of(5), 3);
        assert_eq!(index.line_of(6), 4);
    }

    #[test]
    fn test_mask_comments_keeps_offsets() {
        let source = "import a from './a'; // import b from './b'\n/* x\ny */ const z = 1;";
        let masked = mask_comments(source);
        assert_eq!(masked.len(), source.len());
        assert!(masked.contains("import a from './a';"));
        assert!(!masked.contains("./b"));
        assert_eq!(masked.matches('\n').count(), 2);
        assert!(masked.ends_with("const z = 1;"));
    }

    #[test]
    fn test_mask_comments_ignores_slashes_in_strings() {
        let source = "const url = \"http://example.com\"; // trailing";
        let masked = mask_comments(source);
        assert!(masked.contains("\"http://example.com\""));
        assert!(!masked.contains("trailing"));
    }

    #[test]
    fn test_mask_comments_multibyte() {
        let source = "// héllo wörld\nconst a = 'ü';";
        let masked = mask_comments(source);
        assert_eq!(masked.len(), source.len());
        assert!(masked.ends_with("const a = 'ü';"));
    }

    #[test]
    fn test_balanced_block() {
        let source = "function A() { if (x) { y(); } return 1; } const b = 2;";
        assert_eq!(
            balanced_block(source, 0),
            "function A() { if (x) { y(); } return 1; }"
        );
    }

    #[test]
    fn test_unbalanced_block_runs_to_end() {
        let source = "const A = () => { return <div/>;";
        assert_eq!(balanced_block(source, 6), "A = () => { return <div/>;");
    }
}
