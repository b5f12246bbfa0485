//! Shared helpers for lodestar benchmark suites.
//!
//! Every benchmark input is generated from a fixed seed and fingerprinted
//! with [`input_digest`], so a regression report can show that two runs
//! timed the same workload.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lodestar_harness::worlds::grid_maze::GridMaze;
use lodestar_harness::worlds::tree_game::GameTree;
use lodestar_harness::worlds::weighted_graph::WeightedGraph;
use lodestar_kernel::proof::canon::canonical_json_bytes;
use lodestar_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use lodestar_search::policy::SearchPolicy;

/// A named search workload.
pub struct Regime {
    pub name: &'static str,
    pub graph: WeightedGraph,
    pub policy: SearchPolicy,
}

/// Layered digraph: `layers` layers of `width` nodes, every node linked to
/// `fan_out` random nodes of the next layer. Start is an extra source node,
/// goal an extra sink.
///
/// Duplicate paths are common, which exercises stale-pop elimination.
#[must_use]
pub fn layered_graph(seed: u64, layers: usize, width: usize, fan_out: usize) -> WeightedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = layers * width;
    let goal = start + 1;
    let mut graph = WeightedGraph::new(format!("layered_{seed}"), goal + 1, start, &[goal]);
    let width = width.max(1);

    for slot in 0..width {
        graph.add_edge(start, slot, rng.gen_range(1..=9));
    }
    for layer in 0..layers.saturating_sub(1) {
        for slot in 0..width {
            let from = layer * width + slot;
            for _ in 0..fan_out {
                let to = (layer + 1) * width + rng.gen_range(0..width);
                graph.add_edge(from, to, rng.gen_range(1..=9));
            }
        }
    }
    let last = layers.saturating_sub(1) * width;
    for slot in 0..width {
        graph.add_edge(last + slot, goal, rng.gen_range(1..=9));
    }
    graph
}

/// Open `rows` x `cols` arena with scattered wall blocks, start in the top
/// right and goal in the bottom left.
///
/// # Panics
///
/// Panics if the generated layout does not parse. Benchmark setup failures
/// are fatal.
#[must_use]
pub fn open_maze(seed: u64, rows: usize, cols: usize) -> GridMaze {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut layout = String::new();
    for row in 0..rows {
        for col in 0..cols {
            let border = row == 0 || col == 0 || row + 1 == rows || col + 1 == cols;
            let ch = if border {
                '%'
            } else if row == 1 && col + 2 == cols {
                'P'
            } else if row + 2 == rows && col == 1 {
                '.'
            } else if row % 2 == 0 && col % 3 == 0 && rng.gen_range(0..3) == 0 {
                '%'
            } else {
                ' '
            };
            layout.push(ch);
        }
        layout.push('\n');
    }
    GridMaze::parse(format!("open_maze_{seed}"), &layout).expect("generated layout parses")
}

/// Complete game tree of `depth` levels with `branching` children per
/// interior node and random integer payoffs.
#[must_use]
pub fn complete_game_tree(seed: u64, depth: u32, branching: usize) -> GameTree {
    fn grow(rng: &mut StdRng, depth: u32, branching: usize) -> GameTree {
        let value = f64::from(rng.gen_range(-100_i32..=100));
        if depth == 0 {
            return GameTree::Leaf(value);
        }
        GameTree::Node {
            value,
            children: (0..branching).map(|_| grow(rng, depth - 1, branching)).collect(),
        }
    }
    grow(&mut StdRng::seed_from_u64(seed), depth, branching)
}

/// The search regimes timed by `macro_regimes`.
#[must_use]
pub fn search_regimes() -> Vec<Regime> {
    vec![
        Regime {
            name: "layered_narrow",
            graph: layered_graph(1, 40, 8, 3),
            policy: SearchPolicy::default(),
        },
        Regime {
            name: "layered_wide",
            graph: layered_graph(2, 12, 64, 6),
            policy: SearchPolicy::default(),
        },
        Regime {
            name: "layered_budget_limited",
            graph: layered_graph(3, 12, 64, 6),
            policy: SearchPolicy::with_max_expansions(200),
        },
        Regime {
            name: "layered_depth_limited",
            graph: layered_graph(4, 40, 8, 3),
            policy: SearchPolicy::with_max_depth(20),
        },
    ]
}

/// Fingerprint of a graph workload under [`HashDomain::BenchInput`].
///
/// # Panics
///
/// Panics if the description cannot be canonicalized.
#[must_use]
pub fn input_digest(graph: &WeightedGraph) -> ContentHash {
    let edges: Vec<serde_json::Value> = (0..graph.node_count())
        .flat_map(move |from| {
            graph
                .edges_from(from)
                .iter()
                .map(move |&(to, cost)| serde_json::json!([from, to, cost]))
        })
        .collect();
    let description = serde_json::json!({
        "edges": edges,
        "goals": graph.goals().iter().collect::<Vec<_>>(),
        "node_count": graph.node_count(),
        "start": graph.start(),
    });
    let bytes = canonical_json_bytes(&description).expect("canon");
    canonical_hash(HashDomain::BenchInput, &bytes)
}
