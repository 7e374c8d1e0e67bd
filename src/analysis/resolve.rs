//! Local import resolution against the scanned file set.
//!
//! Resolution is purely lexical: the specifier is joined onto the importing
//! file's directory and the candidates are looked up in the set of paths the
//! walker found. Nothing outside that set can ever become a graph edge.

use crate::model::SourceFile;
use std::collections::HashSet;

pub struct ImportResolver {
    known: HashSet<String>,
    extensions: Vec<String>,
}

impl ImportResolver {
    /// `extensions` is the probe order, dot included (`.tsx`, `.ts`, ...).
    pub fn new<'a, I>(paths: I, extensions: &[String]) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            known: paths.into_iter().map(str::to_string).collect(),
            extensions: extensions.to_vec(),
        }
    }

    pub fn for_files(files: &[SourceFile], extensions: &[String]) -> Self {
        Self::new(files.iter().map(|f| f.path.as_str()), extensions)
    }

    /// Map a local specifier written in `importer_dir` to a scanned path.
    ///
    /// Probe order: the exact path, then `<base><ext>` for each extension,
    /// then `<base>/index<ext>`. The first hit wins.
    pub fn resolve(&self, importer_dir: &str, specifier: &str) -> Option<String> {
        if !specifier.starts_with('.') {
            return None;
        }

        let base = join_normalized(importer_dir, specifier)?;

        if !base.is_empty() && self.known.contains(&base) {
            return Some(base);
        }

        if !base.is_empty() {
            for ext in &self.extensions {
                let candidate = format!("{}{}", base, ext);
                if self.known.contains(&candidate) {
                    return Some(candidate);
                }
            }
        }

        let index_base = if base.is_empty() {
            "index".to_string()
        } else {
            format!("{}/index", base)
        };
        self.extensions
            .iter()
            .map(|ext| format!("{}{}", index_base, ext))
            .find(|candidate| self.known.contains(candidate))
    }
}

/// Fill in `resolved_target` for every local import. Returns new records;
/// the input is consumed, not shared.
pub fn resolve_imports(files: Vec<SourceFile>, resolver: &ImportResolver) -> Vec<SourceFile> {
    files
        .into_iter()
        .map(|mut file| {
            let dir = file.dir().to_string();
            for import in file.imports.iter_mut().filter(|i| i.is_local) {
                import.resolved_target = resolver.resolve(&dir, &import.raw_specifier);
            }
            file
        })
        .collect()
}

/// Lexically join `specifier` onto `dir` and collapse `.`/`..`. Returns
/// `None` when the result would escape the project root.
fn join_normalized(dir: &str, specifier: &str) -> Option<String> {
    let mut parts: Vec<&str> = dir.split('/').filter(|p| !p.is_empty()).collect();

    for segment in specifier.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }

    Some(parts.join("/"))
}
