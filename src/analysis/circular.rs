use crate::analysis::SymbolGraph;
use crate::model::{CycleReport, Placement};
use petgraph::Direction;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// Units collapsed to their modules. Intra-module edges are dropped, so the
/// graph never has self-loops. Nodes are added in module-name order.
pub struct ModuleGraph {
    graph: DiGraph<String, ()>,
    node_indices: HashMap<String, NodeIndex>,
}

impl ModuleGraph {
    pub fn build(units: &SymbolGraph, placements: &[Placement]) -> Self {
        let modules: BTreeSet<&str> = placements.iter().map(|p| p.module.as_str()).collect();

        let mut graph = DiGraph::with_capacity(modules.len(), 0);
        let mut node_indices = HashMap::new();
        for module in modules {
            let idx = graph.add_node(module.to_string());
            node_indices.insert(module.to_string(), idx);
        }

        for (from, to) in units.edges() {
            let (from, to) = (&placements[from].module, &placements[to].module);
            if from == to {
                continue;
            }
            graph.update_edge(node_indices[from], node_indices[to], ());
        }

        Self {
            graph,
            node_indices,
        }
    }

    pub fn graph(&self) -> &DiGraph<String, ()> {
        &self.graph
    }

    /// Modules the given module depends on, sorted.
    pub fn dependencies(&self, module: &str) -> Vec<String> {
        let Some(&idx) = self.node_indices.get(module) else {
            return Vec::new();
        };
        let mut deps: Vec<String> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|n| self.graph[n].clone())
            .collect();
        deps.sort();
        deps
    }
}

/// Shortest cycle through every module edge that lies on a cycle, each
/// reported once starting at its smallest module, sorted.
///
/// At most one report per edge, so the output is bounded by the edge count
/// even when the module graph is dense.
pub fn detect_module_cycles(modules: &ModuleGraph) -> Vec<CycleReport> {
    let graph = modules.graph();
    let mut cycles = Vec::new();

    for component in tarjan_scc(graph) {
        if component.len() < 2 {
            continue;
        }
        let members: BTreeSet<NodeIndex> = component.iter().copied().collect();
        for &from in &members {
            for to in successors(graph, from) {
                if !members.contains(&to) {
                    continue;
                }
                if let Some(path) = shortest_path(graph, &members, to, from) {
                    let mut cycle = vec![from];
                    cycle.extend(path.into_iter().filter(|&n| n != from));
                    let names = cycle.into_iter().map(|idx| graph[idx].clone()).collect();
                    cycles.push(CycleReport::from_members(names));
                }
            }
        }
    }

    cycles.sort();
    cycles.dedup();
    cycles
}

/// Breadth-first path from `start` to `goal` inside one strongly connected
/// component, both ends included. Successors are visited in ascending order.
fn shortest_path(
    graph: &DiGraph<String, ()>,
    members: &BTreeSet<NodeIndex>,
    start: NodeIndex,
    goal: NodeIndex,
) -> Option<Vec<NodeIndex>> {
    let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut seen: HashSet<NodeIndex> = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(node) = queue.pop_front() {
        if node == goal {
            let mut path = vec![goal];
            let mut cursor = goal;
            while let Some(&prev) = parent.get(&cursor) {
                path.push(prev);
                cursor = prev;
            }
            path.reverse();
            return Some(path);
        }
        for next in successors(graph, node) {
            if members.contains(&next) && seen.insert(next) {
                parent.insert(next, node);
                queue.push_back(next);
            }
        }
    }

    None
}

/// Outgoing neighbors in ascending index order, which is module-name order.
fn successors(graph: &DiGraph<String, ()>, node: NodeIndex) -> Vec<NodeIndex> {
    let mut next: Vec<NodeIndex> = graph.neighbors_directed(node, Direction::Outgoing).collect();
    next.sort_unstable();
    next.dedup();
    next
}
