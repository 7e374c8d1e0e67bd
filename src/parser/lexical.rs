use crate::analysis::complexity;
use crate::config::ComplexityPolicy;
use crate::model::SourceFile;
use crate::parser::classify::{CONFIG_EXTENSIONS, ClassifyInput, STYLE_EXTENSIONS, classify};
use crate::parser::common::{LineIndex, mask_comments};
use crate::parser::components::{detect_styling, extract_components, extract_hook_usage};
use crate::parser::exports::extract_exports;
use crate::parser::imports::{external_dependencies, extract_imports};
use crate::parser::{ExtractError, SourceExtractor, decode_text};
use std::path::Path;

/// Regex/substring extractor for JavaScript and TypeScript sources.
/// Stylesheets and JSON are measured and classified but not scanned for
/// imports or exports.
pub struct LexicalExtractor {
    policy: ComplexityPolicy,
}

impl LexicalExtractor {
    pub fn new(policy: ComplexityPolicy) -> Self {
        Self { policy }
    }
}

impl Default for LexicalExtractor {
    fn default() -> Self {
        Self::new(ComplexityPolicy::default())
    }
}

impl SourceExtractor for LexicalExtractor {
    fn extract(
        &self,
        path: &str,
        absolute_path: &Path,
        bytes: &[u8],
    ) -> Result<SourceFile, ExtractError> {
        let text = decode_text(bytes)?;
        let extension = path.rsplit_once('.').map_or("", |(_, ext)| ext);
        let is_script = !CONFIG_EXTENSIONS.contains(&extension)
            && !STYLE_EXTENSIONS.contains(&extension);

        let mut file = SourceFile::new(path, absolute_path.to_path_buf());
        file.size_bytes = bytes.len() as u64;
        file.line_count = text.split('\n').count();

        let masked = mask_comments(text);
        let lines = LineIndex::new(&masked);

        if is_script {
            file.imports = extract_imports(&masked, &lines);
            file.exports = extract_exports(&masked, &lines);
            file.components = extract_components(&masked, &lines);
            file.hooks = extract_hook_usage(&masked, &lines);
            file.styling = detect_styling(&masked);
            file.external_dependencies = external_dependencies(&file.imports);
        }

        file.kind = classify(&ClassifyInput {
            path,
            extension,
            source: &masked,
            exports: &file.exports,
            components: &file.components,
            imports: &file.imports,
        });
        file.complexity = complexity::measure(
            if is_script { &masked } else { "" },
            file.line_count,
            file.imports.len(),
            &self.policy,
        );

        Ok(file)
    }
}
