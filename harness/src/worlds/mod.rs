//! Reference worlds for tests and benchmarks.
//!
//! Worlds are fixtures, not part of the engine contract: the search and game
//! crates see them only through `Problem` and `GameState`.

use lodestar_search::contract::Cost;

pub mod grid;
pub mod grid_chase;
pub mod grid_maze;
pub mod tree_game;
pub mod weighted_graph;

/// Path cost reported for an action sequence that is not legal from the
/// start state.
pub const ILLEGAL_PATH_COST: Cost = 999_999;
