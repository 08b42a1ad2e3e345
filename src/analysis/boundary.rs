use crate::analysis::SymbolGraph;
use crate::model::{Placement, Violation, ViolationReason, Visibility};
use rayon::prelude::*;

/// Find every cross-module edge whose target is internal to its module.
///
/// Edges are checked in parallel; the result is sorted afterwards by
/// `(from_module, to_module, from_unit, to_unit)`.
pub fn detect_violations(graph: &SymbolGraph, placements: &[Placement]) -> Vec<Violation> {
    let mut violations: Vec<Violation> = graph
        .edges()
        .par_iter()
        .filter_map(|&(from, to)| check_edge(&placements[from], &placements[to]))
        .collect();

    violations.sort();
    violations
}

/// An edge is legal when it stays inside one module or targets a public unit.
pub fn check_edge(from: &Placement, to: &Placement) -> Option<Violation> {
    if from.module == to.module || to.visibility == Visibility::Public {
        return None;
    }

    Some(Violation {
        from_module: from.module.clone(),
        to_module: to.module.clone(),
        from_unit: from.display_name.clone(),
        to_unit: to.display_name.clone(),
        reason: ViolationReason::Internal,
    })
}
