//! Centralized filesystem operations for better testability.
//!
//! Source reads and artifact writes go through the `FileSystem` trait so the
//! pipeline and the report writer can run against an in-memory tree in tests.
//! Directory walking stays on the real filesystem (see `analysis::walk`).

use std::io;
use std::path::Path;

/// Trait for filesystem operations, enabling dependency injection and testing.
pub trait FileSystem: Send + Sync {
    /// Read the raw bytes of a file. Decoding is the caller's concern.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Write content to a file, creating it if it doesn't exist.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;
}

/// Real filesystem implementation using std::fs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl FileSystem for RealFs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Global default filesystem for use when dependency injection isn't practical.
pub fn default_fs() -> &'static RealFs {
    static INSTANCE: RealFs = RealFs;
    &INSTANCE
}

/// Check that `dir` is an existing directory we can create files in, by
/// writing and removing a probe file.
pub fn ensure_writable_dir(fs: &dyn FileSystem, dir: &Path) -> io::Result<()> {
    if !fs.is_dir(dir) {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("output directory does not exist: {}", dir.display()),
        ));
    }
    let probe = dir.join(".modgraph-write-probe");
    fs.write(&probe, "")?;
    fs.remove_file(&probe)
}
