//! Lodestar Game: bounded-depth game-tree evaluation over a multi-agent,
//! turn-based game abstraction.
//!
//! Agent 0 maximizes; agents `1..N` are opponents that either minimize
//! (minimax, alpha-beta) or act uniformly at random (expectimax). One unit of
//! depth is a full cycle through every agent.
//!
//! # Key types
//!
//! - [`GameState`](contract::GameState): agents, legal actions, successors
//! - [`Evaluator`](evaluation::Evaluator): static evaluation of cut-off states
//! - [`SearchMode`](mode::SearchMode): minimax, alpha-beta, expectimax
//! - [`decide`](tree::decide): root decision plus [`TreeStats`](tree::TreeStats)
//! - [`AdversarialAgent`](agent::AdversarialAgent): configured, reusable decider
//! - [`ReflexAgent`](reflex::ReflexAgent): one-ply chooser with random tie-breaks

#![forbid(unsafe_code)]

pub mod agent;
pub mod contract;
pub mod error;
pub mod evaluation;
pub mod mode;
pub mod reflex;
pub mod tree;
