use serde::{Deserialize, Serialize};
use std::fmt;

/// An illegal reference from one module into another module's non-public unit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Violation {
    pub from_module: String,
    pub to_module: String,
    pub from_unit: String,
    pub to_unit: String,
    pub reason: ViolationReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationReason {
    /// Target lives in the other module's internal package.
    Internal,
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationReason::Internal => write!(f, "internal"),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({})",
            qualify(&self.from_module, &self.from_unit),
            qualify(&self.to_module, &self.to_unit),
            self.reason
        )
    }
}

/// Prefix a unit's display name with its module unless it already starts with it.
pub fn qualify(module: &str, unit: &str) -> String {
    let already_qualified = unit
        .strip_prefix(module)
        .is_some_and(|rest| rest.starts_with('.'));
    if already_qualified {
        unit.to_string()
    } else {
        format!("{}.{}", module, unit)
    }
}

/// A dependency cycle between modules. The first module is repeated at the end.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CycleReport {
    pub modules: Vec<String>,
}

impl CycleReport {
    /// Build a report from the distinct members of a cycle, rotating it so the
    /// smallest module name comes first and closing the loop.
    pub fn from_members(mut members: Vec<String>) -> Self {
        if let Some(min_pos) = members
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.cmp(b.1))
            .map(|(i, _)| i)
        {
            members.rotate_left(min_pos);
        }
        if let Some(first) = members.first().cloned() {
            members.push(first);
        }
        Self { modules: members }
    }

    /// Number of distinct modules in the cycle.
    pub fn len(&self) -> usize {
        self.modules.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, module: &str) -> bool {
        self.modules.iter().any(|m| m == module)
    }
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.modules.join(" -> "))
    }
}

/// A referenced symbol that matched no definition and was skipped.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnresolvedReference {
    pub module: String,
    pub unit: String,
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSummary {
    pub name: String,
    pub public_units: usize,
    pub internal_units: usize,
    /// Other modules this one references, sorted.
    #[serde(default)]
    pub depends_on: Vec<String>,
}
