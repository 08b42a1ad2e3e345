use super::AnalysisError;
use crate::config::Config;
use crate::model::{CompilationUnit, ModuleSummary, Placement, Visibility};
use std::collections::BTreeMap;

/// Assign every unit to its module and derive its visibility from the package path.
///
/// With a root package configured, the path must start with it and the module
/// is the first segment after it. Otherwise the module is the first segment.
pub fn partition(
    units: &[CompilationUnit],
    config: &Config,
) -> Result<Vec<Placement>, AnalysisError> {
    units.iter().map(|unit| place(unit, config)).collect()
}

pub fn place(unit: &CompilationUnit, config: &Config) -> Result<Placement, AnalysisError> {
    if unit.package_path.is_empty() {
        return Err(AnalysisError::invalid_unit(
            &unit.qualified_name,
            "empty package path",
        ));
    }

    let root: &[String] = config.root_package.as_deref().unwrap_or(&[]);
    let relative = match unit.package_path.strip_prefix(root) {
        Some(rest) => rest,
        None => {
            return Err(AnalysisError::invalid_unit(
                &unit.qualified_name,
                format!(
                    "package `{}` is outside root package `{}`",
                    unit.package_path.join("."),
                    root.join(".")
                ),
            ));
        }
    };

    let Some((module, below_module)) = relative.split_first() else {
        return Err(AnalysisError::invalid_unit(
            &unit.qualified_name,
            format!("unit sits directly in root package `{}`", root.join(".")),
        ));
    };

    Ok(Placement {
        module: module.clone(),
        visibility: visibility_of(below_module, &config.internal_marker),
        display_name: display_name(&unit.qualified_name, root),
    })
}

/// Internal iff any segment beneath the module root is the marker.
pub fn visibility_of(segments_below_module: &[String], internal_marker: &str) -> Visibility {
    if segments_below_module.iter().any(|s| s == internal_marker) {
        Visibility::Internal
    } else {
        Visibility::Public
    }
}

fn display_name(qualified_name: &str, root: &[String]) -> String {
    if root.is_empty() {
        return qualified_name.to_string();
    }
    let prefix = format!("{}.", root.join("."));
    qualified_name
        .strip_prefix(&prefix)
        .unwrap_or(qualified_name)
        .to_string()
}

/// Per-module unit counts, sorted by module name.
pub fn summarize(placements: &[Placement]) -> Vec<ModuleSummary> {
    let mut by_module: BTreeMap<&str, (usize, usize)> = BTreeMap::new();

    for placement in placements {
        let counts = by_module.entry(placement.module.as_str()).or_default();
        match placement.visibility {
            Visibility::Public => counts.0 += 1,
            Visibility::Internal => counts.1 += 1,
        }
    }

    by_module
        .into_iter()
        .map(|(name, (public_units, internal_units))| ModuleSummary {
            name: name.to_string(),
            public_units,
            internal_units,
            depends_on: Vec::new(),
        })
        .collect()
}
