//! Runs the reference search worlds through the harness and prints
//! deterministic `key=value` lines for cross-process verification.
//!
//! Usage: `search_fixture`

use lodestar_game::agent::{AdversarialAgent, AgentConfig};
use lodestar_game::mode::SearchMode;
use lodestar_harness::bundle::verify_bundle;
use lodestar_harness::runner::run_search;
use lodestar_harness::worlds::grid_chase::{chase_evaluators, GridChase};
use lodestar_harness::worlds::grid_maze::{manhattan_heuristic, GridMaze};
use lodestar_harness::worlds::weighted_graph::WeightedGraph;
use lodestar_search::heuristic::NullHeuristic;
use lodestar_search::policy::{SearchPolicy, Strategy};

fn main() {
    let policy = SearchPolicy::default();

    let diamond = WeightedGraph::diamond();
    for strategy in Strategy::ALL {
        let run = run_search(&diamond, strategy, &NullHeuristic, &policy)
            .expect("diamond search run failed");
        verify_bundle(&run.bundle).expect("diamond bundle does not verify");
        let graph = run.result.graph.as_ref().expect("graph recorded");
        println!(
            "diamond.{strategy}.plan={}",
            diamond.describe(&run.result.actions).join(">")
        );
        println!("diamond.{strategy}.cost={}", run.result.cost);
        println!(
            "diamond.{strategy}.termination_reason={}",
            run.result.termination_reason.as_str()
        );
        println!(
            "diamond.{strategy}.search_graph_digest={}",
            graph.digest().expect("graph digest").as_str()
        );
        println!(
            "diamond.{strategy}.report_digest={}",
            run.report_digest.as_str()
        );
        println!("diamond.{strategy}.bundle_digest={}", run.bundle.digest.as_str());
    }

    let maze = GridMaze::tiny().expect("tiny maze layout");
    let run = run_search(&maze, Strategy::AStar, &manhattan_heuristic, &policy)
        .expect("maze search run failed");
    println!("maze.astar.cost={}", run.result.cost);
    println!("maze.astar.expansions={}", run.result.counters.expansions);
    println!("maze.astar.bundle_digest={}", run.bundle.digest.as_str());

    let game = GridChase::small().expect("chase layout");
    let registry = chase_evaluators();
    for mode in SearchMode::ALL {
        let agent = AdversarialAgent::new(
            AgentConfig {
                evaluator: "better".into(),
                depth: 2,
                mode,
            },
            &registry,
        )
        .expect("evaluator registered");
        let decision = agent.decide(&game);
        let action = decision.action.map_or("none", |a| a.as_str());
        println!("chase.{mode}.action={action}");
        println!("chase.{mode}.value_bits={:016x}", decision.value.to_bits());
        println!("chase.{mode}.expanded={}", decision.stats.expanded);
    }
}
