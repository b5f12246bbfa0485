//! `WeightedGraph`: explicit directed graph with non-negative edge costs.
//!
//! Nodes are indices `0..node_count`; the action is the destination node.
//! Successors are generated in edge-insertion order.

use std::collections::BTreeSet;

use lodestar_search::contract::{Cost, Problem, Successor};

use super::ILLEGAL_PATH_COST;

#[derive(Debug, Clone)]
pub struct WeightedGraph {
    id: String,
    names: Vec<String>,
    adjacency: Vec<Vec<(usize, Cost)>>,
    start: usize,
    goals: BTreeSet<usize>,
}

impl WeightedGraph {
    /// Graph with `node_count` nodes named by index and no edges.
    #[must_use]
    pub fn new(id: impl Into<String>, node_count: usize, start: usize, goals: &[usize]) -> Self {
        Self {
            id: id.into(),
            names: (0..node_count).map(|i| i.to_string()).collect(),
            adjacency: vec![Vec::new(); node_count],
            start,
            goals: goals.iter().copied().collect(),
        }
    }

    /// `A→B(1), A→C(5), B→D(1), C→D(1)`, start A, goal D.
    #[must_use]
    pub fn diamond() -> Self {
        let mut graph = Self::new("diamond", 4, 0, &[3]).with_names(&["A", "B", "C", "D"]);
        graph.add_edge(0, 1, 1);
        graph.add_edge(0, 2, 5);
        graph.add_edge(1, 3, 1);
        graph.add_edge(2, 3, 1);
        graph
    }

    /// Replace node names; extra names are ignored.
    #[must_use]
    pub fn with_names(mut self, names: &[&str]) -> Self {
        for (slot, name) in self.names.iter_mut().zip(names) {
            *slot = (*name).to_string();
        }
        self
    }

    /// Add a directed edge. Parallel edges are kept.
    ///
    /// Edges touching nodes outside `0..node_count` are ignored.
    pub fn add_edge(&mut self, from: usize, to: usize, cost: Cost) {
        if to < self.adjacency.len() {
            if let Some(out) = self.adjacency.get_mut(from) {
                out.push((to, cost));
            }
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    #[must_use]
    pub fn goals(&self) -> &BTreeSet<usize> {
        &self.goals
    }

    #[must_use]
    pub fn name(&self, node: usize) -> Option<&str> {
        self.names.get(node).map(String::as_str)
    }

    /// Outgoing `(to, cost)` edges of `node`, in insertion order.
    #[must_use]
    pub fn edges_from(&self, node: usize) -> &[(usize, Cost)] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or_default()
    }

    /// Names along a plan, starting with the start node.
    #[must_use]
    pub fn describe(&self, plan: &[usize]) -> Vec<&str> {
        std::iter::once(self.start)
            .chain(plan.iter().copied())
            .filter_map(|node| self.name(node))
            .collect()
    }
}

impl Problem for WeightedGraph {
    type State = usize;
    type Action = usize;

    fn problem_id(&self) -> &str {
        &self.id
    }

    fn start_state(&self) -> usize {
        self.start
    }

    fn is_goal(&self, state: &usize) -> bool {
        self.goals.contains(state)
    }

    fn successors(&self, state: &usize) -> Vec<Successor<usize, usize>> {
        self.edges_from(*state)
            .iter()
            .map(|&(to, cost)| Successor::new(to, to, cost))
            .collect()
    }

    /// Cheapest parallel edge per hop; [`ILLEGAL_PATH_COST`] for a missing edge.
    fn path_cost(&self, actions: &[usize]) -> Cost {
        let mut at = self.start;
        let mut total: Cost = 0;
        for &to in actions {
            let hop = self
                .edges_from(at)
                .iter()
                .filter(|(dest, _)| *dest == to)
                .map(|(_, cost)| *cost)
                .min();
            let Some(cost) = hop else {
                return ILLEGAL_PATH_COST;
            };
            total = total.saturating_add(cost);
            at = to;
        }
        total
    }
}
