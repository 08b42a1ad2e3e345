use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A single compilation unit as produced by an external parser: its name,
/// the package it lives in, and the symbols it defines and references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationUnit {
    pub qualified_name: String,
    pub package_path: Vec<String>,
    pub defined_symbols: BTreeSet<String>,
    pub referenced_symbols: BTreeSet<String>,
}

impl CompilationUnit {
    /// Create a unit whose package path is derived from its qualified name.
    pub fn new(qualified_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        let package_path = package_of(&qualified_name);

        Self {
            qualified_name,
            package_path,
            defined_symbols: BTreeSet::new(),
            referenced_symbols: BTreeSet::new(),
        }
    }

    pub fn with_package<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.package_path = segments.into_iter().map(Into::into).collect();
        self
    }

    pub fn defines(mut self, symbol: impl Into<String>) -> Self {
        self.defined_symbols.insert(symbol.into());
        self
    }

    pub fn references(mut self, symbol: impl Into<String>) -> Self {
        self.referenced_symbols.insert(symbol.into());
        self
    }

    /// Every symbol this unit owns. The qualified name is always included.
    pub fn all_definitions(&self) -> impl Iterator<Item = &str> {
        let own = if self.defined_symbols.contains(&self.qualified_name) {
            None
        } else {
            Some(self.qualified_name.as_str())
        };
        own.into_iter()
            .chain(self.defined_symbols.iter().map(String::as_str))
    }

    pub fn defines_symbol(&self, symbol: &str) -> bool {
        self.qualified_name == symbol || self.defined_symbols.contains(symbol)
    }
}

/// Package segments of a dotted qualified name (everything but the last segment).
pub fn package_of(qualified_name: &str) -> Vec<String> {
    let mut segments: Vec<String> = qualified_name.split('.').map(str::to_string).collect();
    segments.pop();
    segments
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Internal,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Internal => write!(f, "internal"),
        }
    }
}

/// Where the partitioner put a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub module: String,
    pub visibility: Visibility,
    /// Qualified name relative to the root package, used for display.
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_derived_from_name() {
        let unit = CompilationUnit::new("orders.internal.OrderValidator");
        assert_eq!(unit.package_path, vec!["orders", "internal"]);

        let unit = CompilationUnit::new("Main");
        assert!(unit.package_path.is_empty());
    }

    #[test]
    fn test_qualified_name_is_always_defined() {
        let unit = CompilationUnit::new("orders.OrderService").defines("orders.OrderService.isOrderValid");

        let defs: Vec<_> = unit.all_definitions().collect();
        assert_eq!(
            defs,
            vec!["orders.OrderService", "orders.OrderService.isOrderValid"]
        );
        assert!(unit.defines_symbol("orders.OrderService"));
        assert!(!unit.defines_symbol("orders.OrderRepository"));
    }

    #[test]
    fn test_explicit_self_definition_not_duplicated() {
        let unit = CompilationUnit::new("orders.OrderService").defines("orders.OrderService");
        assert_eq!(unit.all_definitions().count(), 1);
    }
}
