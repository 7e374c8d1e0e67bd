use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// One scanned file and everything the extractor learned about it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    /// Project-relative path with `/` separators. Stable node identity.
    pub path: String,
    /// Filesystem location, only used while resolving.
    #[serde(skip)]
    pub absolute_path: PathBuf,
    pub kind: FileKind,
    pub size_bytes: u64,
    pub line_count: usize,
    pub imports: Vec<ImportEdge>,
    pub exports: Vec<ExportSymbol>,
    pub components: Vec<ComponentDef>,
    pub hooks: Vec<HookUsage>,
    pub styling: Vec<StylingMethod>,
    /// Package names referenced by non-local imports, in first-appearance order.
    pub external_dependencies: Vec<String>,
    pub complexity: Complexity,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Component,
    Hook,
    Utility,
    Types,
    Test,
    Style,
    Config,
    Module,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportEdge {
    pub raw_specifier: String,
    pub line: usize,
    pub kind: ImportKind,
    pub is_local: bool,
    /// Filled in by the resolver; `None` for packages and dangling local imports.
    pub resolved_target: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ImportKind {
    /// `import x from "..."`
    Static,
    /// `import "..."`
    SideEffect,
    /// `export { x } from "..."` / `export * from "..."`
    ReExport,
    /// `import("...")`
    Dynamic,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportSymbol {
    pub name: String,
    pub is_default: bool,
    pub kind: ExportKind,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Const,
    Let,
    Var,
    Function,
    Class,
    Interface,
    Type,
    Enum,
    /// `export default <expr>` where the declaration kind is unknown
    Value,
}

/// A PascalCase declaration whose body renders markup.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ComponentDef {
    pub name: String,
    pub line: usize,
}

/// A `useXxx(` call site.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HookUsage {
    pub name: String,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum StylingMethod {
    StyledComponents,
    Jss,
    Sx,
    CssClasses,
    InlineStyles,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Complexity {
    pub lines: usize,
    pub branches: usize,
    pub functions: usize,
    pub imports: usize,
    pub score: u32,
    pub level: ComplexityLevel,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    #[default]
    Simple,
    Moderate,
    Complex,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, absolute_path: PathBuf) -> Self {
        Self {
            path: path.into(),
            absolute_path,
            kind: FileKind::Module,
            size_bytes: 0,
            line_count: 0,
            imports: Vec::new(),
            exports: Vec::new(),
            components: Vec::new(),
            hooks: Vec::new(),
            styling: Vec::new(),
            external_dependencies: Vec::new(),
            complexity: Complexity::default(),
        }
    }

    /// File name without directories, e.g. `Button.tsx`.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Directory part of the project-relative path, empty at the root.
    pub fn dir(&self) -> &str {
        match self.path.rfind('/') {
            Some(pos) => &self.path[..pos],
            None => "",
        }
    }

    pub fn local_imports(&self) -> impl Iterator<Item = &ImportEdge> {
        self.imports.iter().filter(|i| i.is_local)
    }

    /// Local imports the resolver could not map to a scanned file.
    pub fn unresolved_imports(&self) -> impl Iterator<Item = &ImportEdge> {
        self.local_imports().filter(|i| i.resolved_target.is_none())
    }
}

impl FileKind {
    pub const ALL: [FileKind; 8] = [
        FileKind::Component,
        FileKind::Hook,
        FileKind::Utility,
        FileKind::Types,
        FileKind::Test,
        FileKind::Style,
        FileKind::Config,
        FileKind::Module,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Component => "component",
            FileKind::Hook => "hook",
            FileKind::Utility => "utility",
            FileKind::Types => "types",
            FileKind::Test => "test",
            FileKind::Style => "style",
            FileKind::Config => "config",
            FileKind::Module => "module",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ImportEdge {
    pub fn new(raw_specifier: impl Into<String>, line: usize, kind: ImportKind) -> Self {
        let raw_specifier = raw_specifier.into();
        let is_local = raw_specifier.starts_with('.');
        Self {
            raw_specifier,
            line,
            kind,
            is_local,
            resolved_target: None,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.kind == ImportKind::Dynamic
    }

    /// Package name for a non-local specifier: `@scope/name` for scoped
    /// packages, otherwise everything before the first `/`.
    pub fn package_name(&self) -> Option<&str> {
        if self.is_local || self.raw_specifier.is_empty() {
            return None;
        }
        let spec = self.raw_specifier.as_str();
        let end = if spec.starts_with('@') {
            spec.match_indices('/').nth(1).map(|(i, _)| i)
        } else {
            spec.find('/')
        };
        Some(end.map_or(spec, |i| &spec[..i]))
    }
}

impl ExportSymbol {
    /// Type-level exports carry no runtime value.
    pub fn is_type_only(&self) -> bool {
        matches!(self.kind, ExportKind::Interface | ExportKind::Type)
    }
}

impl StylingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            StylingMethod::StyledComponents => "styled-components",
            StylingMethod::Jss => "jss",
            StylingMethod::Sx => "sx",
            StylingMethod::CssClasses => "css-classes",
            StylingMethod::InlineStyles => "inline-styles",
        }
    }
}

impl ComplexityLevel {
    pub const ALL: [ComplexityLevel; 3] = [
        ComplexityLevel::Simple,
        ComplexityLevel::Moderate,
        ComplexityLevel::Complex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityLevel::Simple => "simple",
            ComplexityLevel::Moderate => "moderate",
            ComplexityLevel::Complex => "complex",
        }
    }
}

impl fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locality_follows_relative_marker() {
        assert!(ImportEdge::new("./foo", 1, ImportKind::Static).is_local);
        assert!(ImportEdge::new("../foo", 1, ImportKind::Static).is_local);
        assert!(!ImportEdge::new("react", 1, ImportKind::Static).is_local);
        assert!(!ImportEdge::new("@mui/material", 1, ImportKind::Static).is_local);
    }

    #[test]
    fn test_package_name() {
        let name = |s: &str| {
            ImportEdge::new(s, 1, ImportKind::Static)
                .package_name()
                .map(str::to_string)
        };

        assert_eq!(name("react"), Some("react".to_string()));
        assert_eq!(name("react-dom/client"), Some("react-dom".to_string()));
        assert_eq!(name("@mui/material"), Some("@mui/material".to_string()));
        assert_eq!(
            name("@mui/icons-material/Add"),
            Some("@mui/icons-material".to_string())
        );
        assert_eq!(name("@scope"), Some("@scope".to_string()));
        assert_eq!(name("./local"), None);
    }

    #[test]
    fn test_file_name_and_dir() {
        let file = SourceFile::new("components/forms/Input.tsx", PathBuf::new());
        assert_eq!(file.file_name(), "Input.tsx");
        assert_eq!(file.dir(), "components/forms");

        let root = SourceFile::new("main.ts", PathBuf::new());
        assert_eq!(root.file_name(), "main.ts");
        assert_eq!(root.dir(), "");
    }
}
