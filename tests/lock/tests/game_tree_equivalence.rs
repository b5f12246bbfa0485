//! Game-tree evaluation lock tests.
//!
//! Proves, over seeded random trees checked against a direct recursive oracle:
//! 1. Alpha-beta returns the same action and value as minimax
//! 2. Alpha-beta never expands more nodes than minimax
//! 3. Minimax and expectimax values match the oracle for every agent count
//! 4. Fixed reference trees produce the textbook values

use lock_tests::{random_game_tree, seeded, tree_value_oracle, OpponentModel};
use lodestar_game::mode::SearchMode;
use lodestar_game::tree::decide;
use lodestar_harness::worlds::tree_game::{tree_value, GameTree, TreeGame};

const SEEDS: u64 = 80;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ---------------------------------------------------------------------------
// 1-2. Pruning is value-preserving and never costlier
// ---------------------------------------------------------------------------

#[test]
fn alpha_beta_matches_minimax_on_random_trees() {
    for seed in 0..SEEDS {
        let tree = random_game_tree(&mut seeded(seed), 6, 3);
        for agents in 1..=3 {
            let game = TreeGame::new(&tree, agents);
            for depth in 0..=3 {
                let full = decide(&game, depth, &tree_value, SearchMode::Minimax);
                let pruned = decide(&game, depth, &tree_value, SearchMode::AlphaBeta);
                assert_eq!(
                    pruned.action, full.action,
                    "seed {seed}, agents {agents}, depth {depth}"
                );
                assert!(
                    close(pruned.value, full.value),
                    "seed {seed}, agents {agents}, depth {depth}: {} vs {}",
                    pruned.value,
                    full.value
                );
                assert!(
                    pruned.stats.expanded <= full.stats.expanded,
                    "seed {seed}, agents {agents}, depth {depth}: pruning expanded more"
                );
                assert_eq!(full.stats.cutoffs, 0);
            }
        }
    }
}

#[test]
fn pruning_happens_somewhere() {
    let total: u64 = (0..SEEDS)
        .map(|seed| {
            let tree = random_game_tree(&mut seeded(seed), 4, 3);
            decide(&TreeGame::new(&tree, 2), 2, &tree_value, SearchMode::AlphaBeta)
                .stats
                .cutoffs
        })
        .sum();
    assert!(total > 0);
}

// ---------------------------------------------------------------------------
// 3. Oracle agreement
// ---------------------------------------------------------------------------

#[test]
fn values_match_the_oracle() {
    for seed in 0..SEEDS {
        let tree = random_game_tree(&mut seeded(seed), 6, 3);
        for agents in 1..=3 {
            let game = TreeGame::new(&tree, agents);
            for depth in 0..=3 {
                let minimax = decide(&game, depth, &tree_value, SearchMode::Minimax);
                let expecti = decide(&game, depth, &tree_value, SearchMode::Expectimax);
                let min_oracle = tree_value_oracle(&tree, agents, depth, OpponentModel::Min);
                let mean_oracle = tree_value_oracle(&tree, agents, depth, OpponentModel::Mean);
                assert!(
                    close(minimax.value, min_oracle),
                    "seed {seed}, agents {agents}, depth {depth}: minimax {} oracle {min_oracle}",
                    minimax.value
                );
                assert!(
                    close(expecti.value, mean_oracle),
                    "seed {seed}, agents {agents}, depth {depth}: expectimax {} mean {mean_oracle}",
                    expecti.value
                );
            }
        }
    }
}

#[test]
fn single_agent_modes_coincide() {
    for seed in 0..SEEDS {
        let tree = random_game_tree(&mut seeded(seed), 5, 3);
        let game = TreeGame::new(&tree, 1);
        let values: Vec<f64> = SearchMode::ALL
            .into_iter()
            .map(|mode| decide(&game, 3, &tree_value, mode).value)
            .collect();
        assert!(values.windows(2).all(|w| close(w[0], w[1])), "seed {seed}");
    }
}

#[test]
fn root_action_is_the_first_best_child() {
    for seed in 0..SEEDS {
        let tree = random_game_tree(&mut seeded(seed), 5, 4);
        let GameTree::Node { children, .. } = &tree else {
            continue;
        };
        // With one agent every child is again agent 0, one cycle deeper.
        let game = TreeGame::new(&tree, 1);
        let decision = decide(&game, 3, &tree_value, SearchMode::Minimax);
        let child_values: Vec<f64> = children
            .iter()
            .map(|c| tree_value_oracle(c, 1, 2, OpponentModel::Min))
            .collect();
        let best = child_values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let first_best = child_values.iter().position(|&v| close(v, best));
        assert_eq!(decision.action, first_best, "seed {seed}");
        assert!(close(decision.value, best), "seed {seed}");
    }
}

// ---------------------------------------------------------------------------
// 4. Reference trees
// ---------------------------------------------------------------------------

#[test]
fn expectimax_averages_opponent_payoffs() {
    // Max over [mean(0, 10), mean(3, 7)]: both 5, first kept.
    let tree = GameTree::node(vec![GameTree::fan(&[0.0, 10.0]), GameTree::fan(&[3.0, 7.0])]);
    let game = TreeGame::new(&tree, 2);

    let expecti = decide(&game, 1, &tree_value, SearchMode::Expectimax);
    assert!(close(expecti.value, 5.0));
    assert_eq!(expecti.action, Some(0));

    let minimax = decide(&game, 1, &tree_value, SearchMode::Minimax);
    assert!(close(minimax.value, 3.0));
    assert_eq!(minimax.action, Some(1));
}

#[test]
fn equal_payoffs_make_every_mode_agree() {
    let tree = GameTree::node(vec![
        GameTree::fan(&[4.0, 4.0, 4.0]),
        GameTree::fan(&[4.0, 4.0]),
    ]);
    let game = TreeGame::new(&tree, 2);
    for mode in SearchMode::ALL {
        let decision = decide(&game, 1, &tree_value, mode);
        assert!(close(decision.value, 4.0), "{mode}");
        assert_eq!(decision.action, Some(0), "{mode}");
    }
}

#[test]
fn depth_zero_is_static_evaluation() {
    let tree = GameTree::node(vec![GameTree::fan(&[1.0, 2.0])]);
    let game = TreeGame::new(&tree, 2);
    for mode in SearchMode::ALL {
        let decision = decide(&game, 0, &tree_value, mode);
        assert_eq!(decision.action, None);
        assert!(close(decision.value, game.static_value()));
        assert_eq!(decision.stats.expanded, 0);
        assert_eq!(decision.stats.leaves, 1);
    }
}
