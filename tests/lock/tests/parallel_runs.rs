//! Concurrent searches and decisions over shared inputs.
//!
//! Proves:
//! 1. Agents, registries, and worlds can be shared with worker threads
//! 2. Running searches and decisions at once reproduces the sequential results

use std::thread;

use lodestar_game::agent::{AdversarialAgent, AgentConfig};
use lodestar_game::mode::SearchMode;
use lodestar_game::tree::Decision;
use lodestar_harness::runner::run_search;
use lodestar_harness::worlds::grid::Direction;
use lodestar_harness::worlds::grid_chase::{chase_evaluators, GridChase, SMALL_CHASE};
use lodestar_harness::worlds::grid_maze::{manhattan_heuristic, GridMaze};
use lodestar_search::policy::{SearchPolicy, Strategy};

fn agents() -> Vec<AdversarialAgent<GridChase>> {
    let registry = chase_evaluators();
    SearchMode::ALL
        .iter()
        .map(|&mode| {
            AdversarialAgent::new(
                AgentConfig {
                    evaluator: "better".into(),
                    depth: 2,
                    mode,
                },
                &registry,
            )
            .unwrap()
        })
        .collect()
}

fn maze_digest(maze: &GridMaze, strategy: Strategy) -> (Vec<Direction>, String) {
    let run = run_search(maze, strategy, &manhattan_heuristic, &SearchPolicy::default()).unwrap();
    (run.result.actions, run.bundle.digest.as_str().to_string())
}

#[test]
fn shared_types_cross_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AdversarialAgent<GridChase>>();
    assert_send_sync::<GridChase>();
    assert_send_sync::<GridMaze>();
}

#[test]
fn concurrent_runs_match_sequential_runs() {
    let maze = GridMaze::tiny().unwrap();
    let chase = GridChase::parse(SMALL_CHASE).unwrap();
    let agents = agents();

    let sequential_searches: Vec<_> = Strategy::ALL
        .iter()
        .map(|&strategy| maze_digest(&maze, strategy))
        .collect();
    let sequential_decisions: Vec<Decision<Direction>> =
        agents.iter().map(|agent| agent.decide(&chase)).collect();

    let (searches, decisions) = thread::scope(|scope| {
        let search_handles: Vec<_> = Strategy::ALL
            .iter()
            .map(|&strategy| {
                let maze = &maze;
                scope.spawn(move || maze_digest(maze, strategy))
            })
            .collect();
        let decision_handles: Vec<_> = agents
            .iter()
            .map(|agent| {
                let chase = &chase;
                scope.spawn(move || agent.decide(chase))
            })
            .collect();
        (
            search_handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect::<Vec<_>>(),
            decision_handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect::<Vec<_>>(),
        )
    });

    assert_eq!(searches, sequential_searches);
    assert_eq!(decisions, sequential_decisions);
}

#[test]
fn agent_moves_to_a_worker_thread() {
    let chase = GridChase::parse(SMALL_CHASE).unwrap();
    let agent = agents().remove(0);
    let expected = agent.get_action(&chase);
    let worker_state = chase.clone();
    let chosen = thread::spawn(move || agent.get_action(&worker_state))
        .join()
        .unwrap();
    assert_eq!(chosen, expected);
}
