//! Lodestar Search: generic state-space search over an abstract problem.
//!
//! # Crate dependency graph
//!
//! ```text
//! lodestar_kernel  ←  lodestar_search  ←  lodestar_harness
//! (canon, hashing)    (frontiers, loop)    (worlds, bundles)
//! ```
//!
//! # Key types
//!
//! - [`Problem`](contract::Problem): start state, goal test, successors, path cost
//! - [`Strategy`](policy::Strategy): depth-first, breadth-first, uniform-cost, A*
//! - [`Heuristic`](heuristic::Heuristic): remaining-cost estimate consulted by A*
//! - [`SearchPolicy`](policy::SearchPolicy): expansion and depth budgets
//! - [`SearchResult`](search::SearchResult): plan, counters, termination reason
//! - [`SearchGraph`](graph::SearchGraph): expansion-event audit log

#![forbid(unsafe_code)]

pub mod contract;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod heuristic;
pub mod node;
pub mod policy;
pub mod search;
