//! Seeded generators and brute-force oracles shared by the lock tests.
//!
//! Every generator takes an explicit RNG; tests seed `StdRng` so failures
//! reproduce from the printed seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lodestar_harness::worlds::tree_game::GameTree;
use lodestar_harness::worlds::weighted_graph::WeightedGraph;
use lodestar_harness::worlds::ILLEGAL_PATH_COST;
use lodestar_search::contract::{Cost, Problem};

/// Seeded RNG for reproducible property checks.
#[must_use]
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Parameters for [`random_graph`].
#[derive(Debug, Clone, Copy)]
pub struct GraphShape {
    pub nodes: usize,
    /// Chance of each ordered pair getting an edge, in percent.
    pub edge_percent: u32,
    /// Edge costs are drawn from `1..=max_cost`.
    pub max_cost: Cost,
}

/// Random digraph on `shape.nodes` nodes; start 0, goal `nodes - 1`.
///
/// Pairs are visited in `(from, to)` order so the edge list depends only on
/// the RNG stream.
pub fn random_graph<R: Rng + ?Sized>(rng: &mut R, shape: GraphShape) -> WeightedGraph {
    let goal = shape.nodes.saturating_sub(1);
    let mut graph = WeightedGraph::new("random", shape.nodes, 0, &[goal]);
    for from in 0..shape.nodes {
        for to in 0..shape.nodes {
            if from != to && rng.gen_range(0..100) < shape.edge_percent {
                graph.add_edge(from, to, rng.gen_range(1..=shape.max_cost.max(1)));
            }
        }
    }
    graph
}

/// Visit every simple path from the start; call `f(cost, hops)` on those
/// ending at a goal.
fn for_each_goal_path(graph: &WeightedGraph, f: &mut impl FnMut(Cost, usize)) {
    fn walk(
        graph: &WeightedGraph,
        at: usize,
        cost: Cost,
        on_path: &mut [bool],
        hops: usize,
        f: &mut impl FnMut(Cost, usize),
    ) {
        if graph.is_goal(&at) {
            f(cost, hops);
        }
        for &(to, step) in graph.edges_from(at) {
            if !on_path[to] {
                on_path[to] = true;
                walk(graph, to, cost + step, on_path, hops + 1, f);
                on_path[to] = false;
            }
        }
    }

    let mut on_path = vec![false; graph.node_count()];
    if let Some(slot) = on_path.get_mut(graph.start()) {
        *slot = true;
        walk(graph, graph.start(), 0, &mut on_path, 0, f);
    }
}

/// Minimum path cost by exhaustive enumeration of simple paths.
#[must_use]
pub fn brute_force_min_cost(graph: &WeightedGraph) -> Option<Cost> {
    let mut best: Option<Cost> = None;
    for_each_goal_path(graph, &mut |cost, _| {
        best = Some(best.map_or(cost, |b| b.min(cost)));
    });
    best
}

/// Minimum action count by exhaustive enumeration of simple paths.
#[must_use]
pub fn brute_force_min_hops(graph: &WeightedGraph) -> Option<usize> {
    let mut best: Option<usize> = None;
    for_each_goal_path(graph, &mut |_, hops| {
        best = Some(best.map_or(hops, |b| b.min(hops)));
    });
    best
}

/// Exact remaining cost from every node to the nearest goal (`None` if no
/// goal is reachable), by Bellman-Ford relaxation over reversed edges.
#[must_use]
pub fn exact_costs_to_goal(graph: &WeightedGraph) -> Vec<Option<Cost>> {
    let n = graph.node_count();
    let mut dist: Vec<Option<Cost>> = (0..n)
        .map(|node| graph.goals().contains(&node).then_some(0))
        .collect();
    for _ in 0..n {
        let mut changed = false;
        for from in 0..n {
            for &(to, cost) in graph.edges_from(from) {
                if let Some(rest) = dist[to] {
                    let through = rest + cost;
                    let improves = match dist[from] {
                        Some(d) => through < d,
                        None => true,
                    };
                    if improves {
                        dist[from] = Some(through);
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }
    dist
}

/// Whether `plan` is a legal action sequence that ends on a goal.
#[must_use]
pub fn plan_reaches_goal(graph: &WeightedGraph, plan: &[usize]) -> bool {
    let end = plan.last().copied().unwrap_or(graph.start());
    graph.path_cost(plan) < ILLEGAL_PATH_COST && graph.is_goal(&end)
}

/// Random game tree of at most `depth` interior levels.
///
/// Leaf payoffs and static values are integers in `-20..=20` so float
/// comparisons stay exact. Interior nodes occasionally end early as leaves.
pub fn random_game_tree<R: Rng + ?Sized>(
    rng: &mut R,
    depth: u32,
    max_branching: usize,
) -> GameTree {
    let value = f64::from(rng.gen_range(-20_i32..=20));
    if depth == 0 || rng.gen_range(0..10) == 0 {
        return GameTree::Leaf(value);
    }
    let width = rng.gen_range(1..=max_branching.max(1));
    GameTree::Node {
        value,
        children: (0..width)
            .map(|_| random_game_tree(rng, depth - 1, max_branching))
            .collect(),
    }
}

/// How an oracle combines opponent children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentModel {
    Min,
    Mean,
}

/// Reference game-tree value computed directly on the [`GameTree`], without
/// the engine.
#[must_use]
pub fn tree_value_oracle(
    tree: &GameTree,
    num_agents: usize,
    depth_limit: u32,
    model: OpponentModel,
) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    fn value(
        tree: &GameTree,
        depth: u32,
        agent: usize,
        num_agents: usize,
        limit: u32,
        model: OpponentModel,
    ) -> f64 {
        let (static_value, children) = match tree {
            GameTree::Leaf(v) => return *v,
            GameTree::Node { value, children } => (*value, children),
        };
        if depth >= limit || children.is_empty() {
            return static_value;
        }
        let (next_depth, next_agent) = if agent + 1 >= num_agents {
            (depth + 1, 0)
        } else {
            (depth, agent + 1)
        };
        let values: Vec<f64> = children
            .iter()
            .map(|c| value(c, next_depth, next_agent, num_agents, limit, model))
            .collect();
        if agent == 0 {
            values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        } else {
            match model {
                OpponentModel::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
                OpponentModel::Mean => values.iter().sum::<f64>() / values.len() as f64,
            }
        }
    }

    value(tree, 0, 0, num_agents.max(1), depth_limit, model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_graph() {
        let shape = GraphShape {
            nodes: 6,
            edge_percent: 40,
            max_cost: 9,
        };
        let a = random_graph(&mut seeded(3), shape);
        let b = random_graph(&mut seeded(3), shape);
        for node in 0..6 {
            assert_eq!(a.edges_from(node), b.edges_from(node));
        }
    }

    #[test]
    fn oracles_agree_on_the_diamond() {
        let graph = WeightedGraph::diamond();
        assert_eq!(brute_force_min_cost(&graph), Some(2));
        assert_eq!(brute_force_min_hops(&graph), Some(2));
        assert_eq!(
            exact_costs_to_goal(&graph),
            vec![Some(2), Some(1), Some(1), Some(0)]
        );
        assert!(plan_reaches_goal(&graph, &[2, 3]));
        assert!(!plan_reaches_goal(&graph, &[1]));
    }

    #[test]
    fn tree_oracle_on_a_fan() {
        let tree = GameTree::node(vec![GameTree::fan(&[0.0, 10.0]), GameTree::fan(&[4.0])]);
        assert!((tree_value_oracle(&tree, 2, 1, OpponentModel::Min) - 4.0).abs() < 1e-9);
        assert!((tree_value_oracle(&tree, 2, 1, OpponentModel::Mean) - 5.0).abs() < 1e-9);
    }
}
