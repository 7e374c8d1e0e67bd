mod classify;
mod common;
mod components;
mod exports;
mod imports;
mod lexical;

use crate::model::SourceFile;
use std::path::Path;
use thiserror::Error;

pub use classify::{ClassifyInput, classify};
pub use common::{LineIndex, mask_comments};
pub use components::{detect_styling, extract_components, extract_hook_usage};
pub use exports::extract_exports;
pub use imports::{external_dependencies, extract_imports};
pub use lexical::LexicalExtractor;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("content is not valid UTF-8 text: {0}")]
    NotUtf8(#[from] std::str::Utf8Error),
    #[error("content looks binary (NUL byte at offset {0})")]
    Binary(usize),
}

/// Turns one file's raw bytes into a `SourceFile`, leaving every
/// `resolved_target` empty. Implementations must not look at other files.
pub trait SourceExtractor: Send + Sync {
    fn extract(
        &self,
        path: &str,
        absolute_path: &Path,
        bytes: &[u8],
    ) -> Result<SourceFile, ExtractError>;
}

/// Fallback record for content that could not be decoded: a plain `module`
/// with sizes filled in and nothing extracted.
pub fn opaque_file(path: &str, absolute_path: &Path, bytes: &[u8]) -> SourceFile {
    let mut file = SourceFile::new(path, absolute_path.to_path_buf());
    file.size_bytes = bytes.len() as u64;
    file.line_count = bytes.split(|b| *b == b'\n').count();
    file.complexity.lines = file.line_count;
    file
}

/// Decode bytes as text, rejecting anything that looks binary.
pub fn decode_text(bytes: &[u8]) -> Result<&str, ExtractError> {
    if let Some(pos) = bytes.iter().position(|b| *b == 0) {
        return Err(ExtractError::Binary(pos));
    }
    let text = std::str::from_utf8(bytes)?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}
