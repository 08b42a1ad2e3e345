use crate::fs::{FileSystem, default_fs};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".modgate.toml";
pub const DEFAULT_INTERNAL_MARKER: &str = "internal";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// What to do with a referenced symbol that no unit defines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedPolicy {
    /// Drop the edge and keep going; the reference is listed as a warning.
    #[default]
    Skip,
    /// Abort the run on the first unresolved reference.
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Package segment that marks a sub-package as internal to its module.
    pub internal_marker: String,
    pub on_unresolved: UnresolvedPolicy,
    /// Base package stripped before the module segment is taken, e.g.
    /// `com.example.shop` so that `com.example.shop.orders` is module `orders`.
    pub root_package: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    internal_marker: Option<String>,
    on_unresolved: Option<UnresolvedPolicy>,
    root_package: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            internal_marker: DEFAULT_INTERNAL_MARKER.to_string(),
            on_unresolved: UnresolvedPolicy::Skip,
            root_package: None,
        }
    }
}

impl Config {
    pub fn load(project_path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_fs(project_path, default_fs())
    }

    pub fn load_with_fs(project_path: &Path, fs: &dyn FileSystem) -> Result<Self, ConfigError> {
        let config_path = project_path.join(CONFIG_FILE_NAME);

        if !fs.exists(&config_path) {
            return Ok(Self::default());
        }

        let content = fs.read_to_string(&config_path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;

        let internal_marker = raw
            .internal_marker
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_INTERNAL_MARKER.to_string());

        Ok(Self {
            internal_marker,
            on_unresolved: raw.on_unresolved.unwrap_or_default(),
            root_package: raw.root_package.as_deref().and_then(parse_package),
        })
    }

    pub fn with_root_package(mut self, root: &str) -> Self {
        self.root_package = parse_package(root);
        self
    }
}

/// Split a dotted package name into segments. Blank input means "no package".
pub fn parse_package(dotted: &str) -> Option<Vec<String>> {
    let trimmed = dotted.trim().trim_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.split('.').map(str::to_string).collect())
}

pub fn generate_config_template() -> String {
    format!(
        r#"# modgate configuration
#
# Units are grouped into modules by the first package segment below
# `root_package`. A unit whose package contains `internal_marker` after the
# module segment is internal: only units of the same module may use it.

# Sub-package name that marks module internals.
internal_marker = "{marker}"

# What to do when a referenced symbol has no definition in the input:
#   "skip" - drop the reference and list it as a warning
#   "fail" - abort the run
on_unresolved = "skip"

# Base package of the application. Leave unset when modules are top-level.
# root_package = "com.example.shop"
"#,
        marker = DEFAULT_INTERNAL_MARKER
    )
}
