//! Search optimality lock tests.
//!
//! Proves, over seeded random digraphs checked against brute-force oracles:
//! 1. Breadth-first plans have the minimum action count
//! 2. Uniform-cost plans have the minimum path cost
//! 3. A* with an admissible, consistent heuristic matches uniform-cost cost
//! 4. Depth-first finds a legal plan whenever one exists
//! 5. Reported cost equals `path_cost` of the returned plan
//! 6. No state is expanded twice

use std::collections::{BTreeMap, BTreeSet};

use lock_tests::{
    brute_force_min_cost, brute_force_min_hops, exact_costs_to_goal, plan_reaches_goal,
    random_graph, seeded, GraphShape,
};
use lodestar_harness::worlds::grid_maze::{manhattan_heuristic, GridMaze};
use lodestar_harness::worlds::weighted_graph::WeightedGraph;
use lodestar_search::contract::{Cost, Problem};
use lodestar_search::graph::SuccessorOutcome;
use lodestar_search::heuristic::NullHeuristic;
use lodestar_search::policy::{SearchPolicy, Strategy};
use lodestar_search::search::{search, SearchResult};
use rand::Rng;

const SEEDS: u64 = 150;

fn shape_for(seed: u64, max_cost: Cost) -> (GraphShape, rand::rngs::StdRng) {
    let mut rng = seeded(seed);
    let shape = GraphShape {
        nodes: rng.gen_range(2..=8),
        edge_percent: rng.gen_range(15..=45),
        max_cost,
    };
    (shape, rng)
}

fn run<H>(graph: &WeightedGraph, strategy: Strategy, heuristic: &H) -> SearchResult<usize>
where
    H: lodestar_search::heuristic::Heuristic<WeightedGraph>,
{
    search(graph, strategy, heuristic, &SearchPolicy::default())
}

fn assert_consistent_plan(graph: &WeightedGraph, result: &SearchResult<usize>, seed: u64) {
    if result.is_goal_reached() {
        assert!(
            plan_reaches_goal(graph, &result.actions),
            "seed {seed}: plan {:?} does not reach a goal",
            result.actions
        );
        assert_eq!(
            graph.path_cost(&result.actions),
            result.cost,
            "seed {seed}: reported cost disagrees with path_cost"
        );
    } else {
        assert!(result.actions.is_empty(), "seed {seed}: plan without goal");
    }
}

/// Replays the audit graph against `graph` to recover each expanded node's
/// state, then checks that no state was expanded twice.
fn assert_no_state_expanded_twice(graph: &WeightedGraph, result: &SearchResult<usize>) {
    let node_count = u64::try_from(graph.node_count()).unwrap();
    assert!(result.counters.expansions <= node_count);

    let events = &result.graph.as_ref().unwrap().expansions;
    let mut states: BTreeMap<u64, usize> = BTreeMap::new();
    let mut expanded = BTreeSet::new();
    for event in events {
        let state = match event.parent_id {
            None => graph.start_state(),
            Some(_) => states[&event.node_id],
        };
        assert!(
            expanded.insert(state),
            "state {state} expanded twice (node {})",
            event.node_id
        );
        let successors = graph.successors(&state);
        for record in &event.successors {
            if let SuccessorOutcome::Pushed { to_node } = record.outcome {
                let index = usize::try_from(record.index).unwrap();
                states.insert(to_node, successors[index].state);
            }
        }
    }
    assert_eq!(expanded.len(), events.len());
}

// ---------------------------------------------------------------------------
// 1. Breadth-first minimizes action count
// ---------------------------------------------------------------------------

#[test]
fn bfs_minimizes_action_count_on_unit_graphs() {
    for seed in 0..SEEDS {
        let (shape, mut rng) = shape_for(seed, 1);
        let graph = random_graph(&mut rng, shape);
        let result = run(&graph, Strategy::BreadthFirst, &NullHeuristic);

        assert_consistent_plan(&graph, &result, seed);
        assert_eq!(
            result.is_goal_reached().then_some(result.actions.len()),
            brute_force_min_hops(&graph),
            "seed {seed}"
        );
    }
}

// ---------------------------------------------------------------------------
// 2. Uniform-cost minimizes path cost
// ---------------------------------------------------------------------------

#[test]
fn ucs_minimizes_path_cost() {
    for seed in 0..SEEDS {
        let (shape, mut rng) = shape_for(seed, 9);
        let graph = random_graph(&mut rng, shape);
        let result = run(&graph, Strategy::UniformCost, &NullHeuristic);

        assert_consistent_plan(&graph, &result, seed);
        assert_no_state_expanded_twice(&graph, &result);
        assert_eq!(
            result.is_goal_reached().then_some(result.cost),
            brute_force_min_cost(&graph),
            "seed {seed}"
        );
    }
}

// ---------------------------------------------------------------------------
// 3. A* with admissible heuristics
// ---------------------------------------------------------------------------

#[test]
fn astar_with_null_heuristic_matches_ucs() {
    for seed in 0..SEEDS {
        let (shape, mut rng) = shape_for(seed, 9);
        let graph = random_graph(&mut rng, shape);
        let ucs = run(&graph, Strategy::UniformCost, &NullHeuristic);
        let astar = run(&graph, Strategy::AStar, &NullHeuristic);

        assert_eq!(astar.actions, ucs.actions, "seed {seed}");
        assert_eq!(astar.cost, ucs.cost, "seed {seed}");
        assert_eq!(astar.counters, ucs.counters, "seed {seed}");
    }
}

#[test]
fn astar_with_exact_heuristic_is_optimal() {
    for seed in 0..SEEDS {
        let (shape, mut rng) = shape_for(seed, 9);
        let graph = random_graph(&mut rng, shape);
        let exact = exact_costs_to_goal(&graph);
        let perfect = |s: &usize, _: &WeightedGraph| -> Cost { exact[*s].unwrap_or(0) };
        let halved = |s: &usize, _: &WeightedGraph| -> Cost { exact[*s].unwrap_or(0) / 2 };
        let expected = brute_force_min_cost(&graph);

        for (label, result) in [
            ("exact", run(&graph, Strategy::AStar, &perfect)),
            ("halved", run(&graph, Strategy::AStar, &halved)),
        ] {
            assert_consistent_plan(&graph, &result, seed);
            assert_no_state_expanded_twice(&graph, &result);
            assert_eq!(
                result.is_goal_reached().then_some(result.cost),
                expected,
                "seed {seed}, {label} heuristic"
            );
        }
    }
}

#[test]
fn informed_search_expands_no_more_than_uninformed() {
    for seed in 0..SEEDS {
        let (shape, mut rng) = shape_for(seed, 9);
        let graph = random_graph(&mut rng, shape);
        let exact = exact_costs_to_goal(&graph);
        // Dead ends get an estimate above any plan cost so A* never pops them
        // ahead of the goal.
        let perfect = |s: &usize, _: &WeightedGraph| -> Cost { exact[*s].unwrap_or(1_000) };
        if brute_force_min_cost(&graph).is_none() {
            continue;
        }
        let ucs = run(&graph, Strategy::UniformCost, &NullHeuristic);
        let astar = run(&graph, Strategy::AStar, &perfect);
        assert!(
            astar.counters.expansions <= ucs.counters.expansions,
            "seed {seed}: astar {} > ucs {}",
            astar.counters.expansions,
            ucs.counters.expansions
        );
    }
}

// ---------------------------------------------------------------------------
// 4. Depth-first completeness on finite graphs
// ---------------------------------------------------------------------------

#[test]
fn dfs_finds_a_legal_plan_whenever_one_exists() {
    for seed in 0..SEEDS {
        let (shape, mut rng) = shape_for(seed, 9);
        let graph = random_graph(&mut rng, shape);
        let result = run(&graph, Strategy::DepthFirst, &NullHeuristic);

        assert_consistent_plan(&graph, &result, seed);
        assert_no_state_expanded_twice(&graph, &result);
        assert_eq!(
            result.is_goal_reached(),
            brute_force_min_cost(&graph).is_some(),
            "seed {seed}"
        );
    }
}

// ---------------------------------------------------------------------------
// 5. Grid maze reference values
// ---------------------------------------------------------------------------

#[test]
fn tiny_maze_optimal_cost_is_shared_by_optimal_strategies() {
    let maze = GridMaze::tiny().unwrap();
    let policy = SearchPolicy::default();
    let bfs = search(&maze, Strategy::BreadthFirst, &NullHeuristic, &policy);
    let ucs = search(&maze, Strategy::UniformCost, &NullHeuristic, &policy);
    let astar = search(&maze, Strategy::AStar, &manhattan_heuristic, &policy);
    let dfs = search(&maze, Strategy::DepthFirst, &NullHeuristic, &policy);

    for result in [&bfs, &ucs, &astar] {
        assert!(result.is_goal_reached());
        assert_eq!(result.cost, 8);
        assert_eq!(maze.path_cost(&result.actions), 8);
    }
    assert!(dfs.is_goal_reached());
    assert!(dfs.cost >= 8);
    assert_eq!(maze.path_cost(&dfs.actions), dfs.cost);
    assert!(astar.counters.expansions <= ucs.counters.expansions);
}
