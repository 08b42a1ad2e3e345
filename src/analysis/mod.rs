mod boundary;
mod circular;
mod error;
mod graph;
mod partition;

pub use boundary::{check_edge, detect_violations};
pub use circular::{ModuleGraph, detect_module_cycles};
pub use error::AnalysisError;
pub use graph::SymbolGraph;
pub use partition::{partition, place, summarize, visibility_of};

use crate::config::Config;
use crate::model::{CompilationUnit, UnresolvedReference, Verdict};

/// Run the whole pipeline over one snapshot of units: build the symbol graph,
/// place units in modules, evaluate boundary rules and look for module cycles.
///
/// Input defects abort with an [`AnalysisError`]; findings are returned in the
/// [`Verdict`]. Nothing here performs I/O or touches shared state.
pub fn verify(units: &[CompilationUnit], config: &Config) -> Result<Verdict, AnalysisError> {
    let graph = SymbolGraph::build(units, config.on_unresolved)?;
    let placements = partition(units, config)?;

    let violations = detect_violations(&graph, &placements);

    let module_graph = ModuleGraph::build(&graph, &placements);
    let cycles = detect_module_cycles(&module_graph);

    let mut unresolved: Vec<UnresolvedReference> = graph
        .unresolved()
        .iter()
        .map(|(idx, symbol)| UnresolvedReference {
            module: placements[*idx].module.clone(),
            unit: placements[*idx].display_name.clone(),
            symbol: symbol.clone(),
        })
        .collect();
    unresolved.sort();

    let mut modules = summarize(&placements);
    for summary in &mut modules {
        summary.depends_on = module_graph.dependencies(&summary.name);
    }

    Ok(Verdict::new(violations, cycles, unresolved, modules))
}
