use super::AnalysisError;
use crate::config::UnresolvedPolicy;
use crate::model::CompilationUnit;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Unit-level dependency graph resolved from symbol references.
///
/// Node `i` carries the input index `i`; there is at most one edge per ordered pair of units.
pub struct SymbolGraph {
    graph: DiGraph<usize, ()>,
    unresolved: Vec<(usize, String)>,
}

impl SymbolGraph {
    pub fn build(
        units: &[CompilationUnit],
        policy: UnresolvedPolicy,
    ) -> Result<Self, AnalysisError> {
        for unit in units {
            validate_unit(unit)?;
        }

        let definitions = index_definitions(units)?;

        let mut graph = DiGraph::with_capacity(units.len(), 0);
        for idx in 0..units.len() {
            graph.add_node(idx);
        }

        let mut unresolved = Vec::new();
        for (from, unit) in units.iter().enumerate() {
            for symbol in &unit.referenced_symbols {
                match definitions.get(symbol.as_str()) {
                    Some(&to) if to == from => {}
                    Some(&to) => {
                        graph.update_edge(NodeIndex::new(from), NodeIndex::new(to), ());
                    }
                    None => match policy {
                        UnresolvedPolicy::Skip => unresolved.push((from, symbol.clone())),
                        UnresolvedPolicy::Fail => {
                            return Err(AnalysisError::UnresolvedSymbol {
                                unit: unit.qualified_name.clone(),
                                symbol: symbol.clone(),
                            });
                        }
                    },
                }
            }
        }

        Ok(Self {
            graph,
            unresolved,
        })
    }

    /// Resolved `(from, to)` unit index pairs, sorted.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<_> = self
            .graph
            .edge_references()
            .map(|e| (self.graph[e.source()], self.graph[e.target()]))
            .collect();
        edges.sort_unstable();
        edges
    }

    /// References dropped under the skip policy, as `(unit index, symbol)`,
    /// in input order.
    pub fn unresolved(&self) -> &[(usize, String)] {
        &self.unresolved
    }
}

fn validate_unit(unit: &CompilationUnit) -> Result<(), AnalysisError> {
    if unit.qualified_name.trim().is_empty() {
        return Err(AnalysisError::invalid_unit(
            &unit.qualified_name,
            "empty qualified name",
        ));
    }
    if unit.package_path.is_empty() {
        return Err(AnalysisError::invalid_unit(
            &unit.qualified_name,
            "empty package path",
        ));
    }
    if unit.package_path.iter().any(|s| s.trim().is_empty()) {
        return Err(AnalysisError::invalid_unit(
            &unit.qualified_name,
            format!("blank segment in package `{}`", unit.package_path.join(".")),
        ));
    }
    Ok(())
}

fn index_definitions(units: &[CompilationUnit]) -> Result<HashMap<&str, usize>, AnalysisError> {
    let mut definitions: HashMap<&str, usize> = HashMap::new();

    for (idx, unit) in units.iter().enumerate() {
        for symbol in unit.all_definitions() {
            if let Some(&first) = definitions.get(symbol) {
                return Err(AnalysisError::DuplicateSymbol {
                    symbol: symbol.to_string(),
                    first: units[first].qualified_name.clone(),
                    second: unit.qualified_name.clone(),
                });
            }
            definitions.insert(symbol, idx);
        }
    }

    Ok(definitions)
}
