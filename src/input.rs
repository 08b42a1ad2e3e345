//! Loading compilation units from manifest files.
//!
//! Extracting units from source code is the job of a language-specific
//! front end. modgate only reads what such a tool emits: a JSON or TOML
//! manifest listing each unit with its package and symbol sets.
//!
//! ```json
//! { "units": [
//!   { "qualifiedName": "orders.OrderService",
//!     "referencedSymbols": ["orders.internal.OrderValidator"] }
//! ] }
//! ```

use crate::fs::FileSystem;
use crate::model::{CompilationUnit, package_of};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

const MANIFEST_SUFFIXES: [&str; 2] = [".units.json", ".units.toml"];

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON manifest {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid TOML manifest {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Unsupported manifest format: {0} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),
    #[error("No *.units.json or *.units.toml manifests found in {0}")]
    Empty(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Toml,
}

impl ManifestFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(Self::Json),
            Some("toml") => Some(Self::Toml),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonManifest {
    Wrapped { units: Vec<RawUnit> },
    Bare(Vec<RawUnit>),
}

#[derive(Debug, Deserialize)]
struct TomlManifest {
    #[serde(default)]
    units: Vec<RawUnit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUnit {
    #[serde(alias = "qualified_name")]
    qualified_name: String,
    #[serde(default, alias = "package_path")]
    package_path: Option<RawPackage>,
    #[serde(default, alias = "defined_symbols")]
    defined_symbols: BTreeSet<String>,
    #[serde(default, alias = "referenced_symbols")]
    referenced_symbols: BTreeSet<String>,
}

/// A package given either as `["orders", "internal"]` or as `"orders.internal"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPackage {
    Segments(Vec<String>),
    Dotted(String),
}

impl From<RawUnit> for CompilationUnit {
    fn from(raw: RawUnit) -> Self {
        let package_path = match raw.package_path {
            Some(RawPackage::Segments(segments)) => segments,
            Some(RawPackage::Dotted(dotted)) if dotted.is_empty() => Vec::new(),
            Some(RawPackage::Dotted(dotted)) => dotted.split('.').map(str::to_string).collect(),
            None => package_of(&raw.qualified_name),
        };

        CompilationUnit {
            qualified_name: raw.qualified_name,
            package_path,
            defined_symbols: raw.defined_symbols,
            referenced_symbols: raw.referenced_symbols,
        }
    }
}

pub fn parse_json(content: &str) -> Result<Vec<CompilationUnit>, serde_json::Error> {
    let units = match serde_json::from_str::<JsonManifest>(content)? {
        JsonManifest::Wrapped { units } | JsonManifest::Bare(units) => units,
    };
    Ok(units.into_iter().map(CompilationUnit::from).collect())
}

pub fn parse_toml(content: &str) -> Result<Vec<CompilationUnit>, toml::de::Error> {
    let manifest: TomlManifest = toml::from_str(content)?;
    Ok(manifest.units.into_iter().map(CompilationUnit::from).collect())
}

pub fn is_manifest(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| MANIFEST_SUFFIXES.iter().any(|s| name.ends_with(s)))
}

/// Load units from a single manifest, or from every manifest below a
/// directory in sorted path order.
pub fn load_units(path: &Path, fs: &dyn FileSystem) -> Result<Vec<CompilationUnit>, InputError> {
    if !fs.is_dir(path) {
        return load_manifest(path, fs);
    }

    let files = fs.list_files(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let manifests: Vec<_> = files.into_iter().filter(|f| is_manifest(f)).collect();
    if manifests.is_empty() {
        return Err(InputError::Empty(path.to_path_buf()));
    }

    let mut units = Vec::new();
    for manifest in &manifests {
        units.extend(load_manifest(manifest, fs)?);
    }
    Ok(units)
}

pub fn load_manifest(path: &Path, fs: &dyn FileSystem) -> Result<Vec<CompilationUnit>, InputError> {
    let format = ManifestFormat::from_path(path)
        .ok_or_else(|| InputError::UnsupportedFormat(path.to_path_buf()))?;

    let content = fs.read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match format {
        ManifestFormat::Json => parse_json(&content).map_err(|source| InputError::Json {
            path: path.to_path_buf(),
            source,
        }),
        ManifestFormat::Toml => parse_toml(&content).map_err(|source| InputError::Toml {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFs;

    #[test]
    fn test_parse_json_wrapped_and_bare() {
        let wrapped = r#"{"units": [{"qualifiedName": "orders.OrderService"}]}"#;
        let bare = r#"[{"qualified_name": "orders.OrderService"}]"#;

        let a = parse_json(wrapped).unwrap();
        let b = parse_json(bare).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0].package_path, vec!["orders"]);
    }

    #[test]
    fn test_package_forms() {
        let json = r#"[
            {"qualifiedName": "a.X", "packagePath": ["orders", "internal"]},
            {"qualifiedName": "b.Y", "packagePath": "inventory.internal"},
            {"qualifiedName": "c.Z", "packagePath": ""}
        ]"#;

        let units = parse_json(json).unwrap();
        assert_eq!(units[0].package_path, vec!["orders", "internal"]);
        assert_eq!(units[1].package_path, vec!["inventory", "internal"]);
        assert!(units[2].package_path.is_empty());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[[units]]
qualified_name = "inventory.InventoryService"
referenced_symbols = ["orders.OrderService"]

[[units]]
qualifiedName = "orders.OrderService"
definedSymbols = ["orders.OrderService.isOrderValid"]
"#;

        let units = parse_toml(toml).unwrap();
        assert_eq!(units.len(), 2);
        assert!(units[0].referenced_symbols.contains("orders.OrderService"));
        assert!(units[1].defines_symbol("orders.OrderService.isOrderValid"));
    }

    #[test]
    fn test_load_directory_in_path_order() {
        let fs = MockFs::with_files([
            (
                "/repo/units/orders.units.json",
                r#"[{"qualifiedName": "orders.OrderService"}]"#,
            ),
            (
                "/repo/units/inventory.units.toml",
                "[[units]]\nqualifiedName = \"inventory.InventoryService\"\n",
            ),
            ("/repo/units/README.md", "not a manifest"),
        ]);

        let units = load_units(Path::new("/repo/units"), &fs).unwrap();
        let names: Vec<_> = units.iter().map(|u| u.qualified_name.as_str()).collect();
        assert_eq!(names, vec!["inventory.InventoryService", "orders.OrderService"]);
    }

    #[test]
    fn test_load_errors() {
        let fs = MockFs::with_files([
            ("/repo/units.yaml", "units: []"),
            ("/repo/bad.json", "{ not json"),
            ("/docs/README.md", "nothing here"),
        ]);

        assert!(matches!(
            load_units(Path::new("/repo/units.yaml"), &fs),
            Err(InputError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            load_units(Path::new("/repo/bad.json"), &fs),
            Err(InputError::Json { .. })
        ));
        assert!(matches!(
            load_units(Path::new("/repo/missing.json"), &fs),
            Err(InputError::Io { .. })
        ));
        assert!(matches!(
            load_units(Path::new("/docs"), &fs),
            Err(InputError::Empty(_))
        ));
    }
}
