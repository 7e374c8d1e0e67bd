mod analyze;
mod init;

pub use analyze::{cmd_analyze, cmd_analyze_with_fs};
pub use init::{cmd_init, cmd_init_with_fs};

use crate::api::{ModgraphError, resolve_root};
use crate::config::Config;
use crate::style;
use std::path::{Path, PathBuf};

/// Shared context for command execution: the resolved root and its config.
pub struct CommandContext {
    pub path: PathBuf,
    pub config: Config,
}

impl CommandContext {
    /// Resolve the root and load config. An explicit config file must load;
    /// a broken `.modgraph.toml` in the root only warns and falls back to
    /// defaults. Returns Err(exit_code) if setup fails.
    pub fn new(path: &Path, config_path: Option<&Path>) -> Result<Self, i32> {
        let resolved_path = match resolve_root(path) {
            Ok(p) => p,
            Err(ModgraphError::NotADirectory(_)) => {
                style::error(&format!("Not a directory: {}", style::path(path)));
                return Err(1);
            }
            Err(_) => {
                style::error(&format!("Could not resolve path: {}", style::path(path)));
                return Err(1);
            }
        };

        let config = match config_path {
            Some(file) => match Config::load_file(file) {
                Ok(config) => config,
                Err(e) => {
                    style::error(&format!("Failed to load {}: {}", style::path(file), e));
                    return Err(1);
                }
            },
            None => Config::load(&resolved_path).unwrap_or_else(|e| {
                style::warning(&format!("Failed to load config: {}. Using defaults.", e));
                Config::default()
            }),
        };

        Ok(Self {
            path: resolved_path,
            config,
        })
    }
}
