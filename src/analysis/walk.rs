use crate::config::ScanSettings;
use crate::model::ScanWarning;
use ignore::{DirEntry, WalkBuilder};
use std::path::{Path, PathBuf};

/// Files found under a root, sorted by project-relative path.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    pub files: Vec<CandidateFile>,
    pub warnings: Vec<ScanWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Project-relative, `/`-separated.
    pub relative: String,
    pub absolute: PathBuf,
}

/// Enumerate files under `root` whose extension is allow-listed, skipping
/// hidden and excluded directories. Unreadable entries become warnings and
/// the walk carries on with their siblings.
pub fn discover_files(root: &Path, settings: &ScanSettings) -> WalkOutcome {
    let exclude_dirs = settings.exclude_dirs.clone();

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .git_ignore(settings.respect_gitignore)
        .git_exclude(settings.respect_gitignore)
        .require_git(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| !is_skipped_dir(entry, &exclude_dirs))
        .build();

    let mut outcome = WalkOutcome::default();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                outcome.warnings.push(walk_warning(root, &err));
                continue;
            }
        };

        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let path = entry.path();
        if !has_allowed_extension(path, &settings.extensions) {
            continue;
        }

        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };

        outcome.files.push(CandidateFile {
            relative: to_slash(relative),
            absolute: path.to_path_buf(),
        });
    }

    outcome.files.sort_by(|a, b| a.relative.cmp(&b.relative));
    outcome
}

fn is_skipped_dir(entry: &DirEntry, exclude_dirs: &[String]) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_dir()) {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || exclude_dirs.iter().any(|d| *d == name)
}

fn has_allowed_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
}

/// Warning for an entry the walker could not read. The path goes in the
/// warning's `path` (reports show it root-relative); the message carries
/// only the cause, never an absolute path.
fn walk_warning(root: &Path, err: &ignore::Error) -> ScanWarning {
    let path = error_path(err).unwrap_or_else(|| root.to_path_buf());
    ScanWarning::new(path, format!("skipped: {}", error_cause(err)))
}

fn error_cause(err: &ignore::Error) -> String {
    match err {
        ignore::Error::WithPath { err, .. }
        | ignore::Error::WithDepth { err, .. }
        | ignore::Error::WithLineNumber { err, .. } => error_cause(err),
        ignore::Error::Loop { .. } => "symbolic link loop".to_string(),
        ignore::Error::Partial(errs) => errs
            .iter()
            .map(error_cause)
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

fn error_path(err: &ignore::Error) -> Option<PathBuf> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.clone()),
        ignore::Error::WithDepth { err, .. } => error_path(err),
        ignore::Error::WithLineNumber { err, .. } => error_path(err),
        ignore::Error::Loop { child, .. } => Some(child.clone()),
        _ => None,
    }
}

/// Join path components with `/` regardless of platform.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
