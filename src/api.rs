//! Library API for modgate.
//!
//! Unlike the CLI commands, which print and return exit codes, these
//! functions return `Result`s for calling code to handle.
//!
//! # Example
//!
//! ```
//! use modgate::{CompilationUnit, VerifyOptions, verify};
//!
//! let units = vec![
//!     CompilationUnit::new("orders.OrderService").references("orders.internal.OrderValidator"),
//!     CompilationUnit::new("orders.internal.OrderValidator"),
//!     CompilationUnit::new("inventory.InventoryService").references("orders.OrderService"),
//! ];
//!
//! let verdict = verify(&units, &VerifyOptions::default())?;
//! assert!(verdict.passed());
//! # Ok::<(), modgate::ModgateError>(())
//! ```

use crate::analysis::{self, AnalysisError};
use crate::config::{Config, ConfigError, UnresolvedPolicy};
use crate::fs::{FileSystem, default_fs};
use crate::input::{self, InputError};
use crate::model::{CompilationUnit, Verdict};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModgateError {
    /// The specified path could not be found.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Malformed input, duplicate definitions, or unresolved symbols under
    /// the fail policy.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// A module filter named a module that does not exist.
    #[error("Unknown module: {0}")]
    UnknownModule(String),
}

/// Overrides layered on top of the configuration file (or the defaults).
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    pub internal_marker: Option<String>,
    pub on_unresolved: Option<UnresolvedPolicy>,
    pub root_package: Option<String>,
    /// Narrow the verdict to a single module.
    pub module: Option<String>,
}

impl VerifyOptions {
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(marker) = self.internal_marker.as_deref().map(str::trim) {
            if !marker.is_empty() {
                config.internal_marker = marker.to_string();
            }
        }
        if let Some(policy) = self.on_unresolved {
            config.on_unresolved = policy;
        }
        if let Some(root) = &self.root_package {
            config = config.with_root_package(root);
        }
        config
    }
}

/// Verify an in-memory set of units against the defaults plus `options`.
pub fn verify(units: &[CompilationUnit], options: &VerifyOptions) -> Result<Verdict, ModgateError> {
    let config = options.apply(Config::default());
    verify_with_config(units, &config, options.module.as_deref())
}

pub fn verify_with_config(
    units: &[CompilationUnit],
    config: &Config,
    module: Option<&str>,
) -> Result<Verdict, ModgateError> {
    let verdict = analysis::verify(units, config)?;

    match module {
        Some(name) => verdict
            .for_module(name)
            .ok_or_else(|| ModgateError::UnknownModule(name.to_string())),
        None => Ok(verdict),
    }
}

/// Load manifests from `path` (a file or a directory), pick up
/// `.modgate.toml` from the project directory, and verify.
pub fn verify_path(path: &Path, options: &VerifyOptions) -> Result<Verdict, ModgateError> {
    verify_path_with_fs(path, options, default_fs())
}

pub fn verify_path_with_fs(
    path: &Path,
    options: &VerifyOptions,
    fs: &dyn FileSystem,
) -> Result<Verdict, ModgateError> {
    if !fs.exists(path) {
        return Err(ModgateError::PathNotFound(path.to_path_buf()));
    }

    let config = Config::load_with_fs(project_dir(path, fs), fs)?;
    let config = options.apply(config);

    let units = input::load_units(path, fs)?;
    verify_with_config(&units, &config, options.module.as_deref())
}

/// Directory holding the configuration file for an input path.
pub fn project_dir<'a>(path: &'a Path, fs: &dyn FileSystem) -> &'a Path {
    if fs.is_dir(path) {
        path
    } else {
        path.parent().unwrap_or(path)
    }
}
