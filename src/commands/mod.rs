mod check;
mod init;

pub use check::{cmd_check, cmd_check_with_fs};
pub use init::{cmd_init, cmd_init_with_fs};

use crate::api::{VerifyOptions, project_dir};
use crate::config::Config;
use crate::fs::FileSystem;
use crate::style;
use std::path::{Path, PathBuf};

/// Exit code for a run that stopped before producing a verdict.
pub const EXIT_ABORTED: i32 = 2;

/// Resolved input path and effective configuration for one command.
pub struct CommandContext {
    pub path: PathBuf,
    pub config: Config,
}

impl CommandContext {
    /// Returns Err(exit_code) if the path does not exist.
    pub fn new(path: &Path, options: &VerifyOptions, fs: &dyn FileSystem) -> Result<Self, i32> {
        if !fs.exists(path) {
            style::error(&format!("Could not resolve path: {}", style::path(path)));
            return Err(EXIT_ABORTED);
        }

        let config = Config::load_with_fs(project_dir(path, fs), fs).unwrap_or_else(|e| {
            style::warning(&format!("Failed to load config: {}. Using defaults.", e));
            Config::default()
        });

        Ok(Self {
            path: path.to_path_buf(),
            config: options.apply(config),
        })
    }
}
