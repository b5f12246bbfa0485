//! Lodestar Harness: reference worlds and run packaging.
//!
//! The harness runs a search through `lodestar_search` and packages the
//! audit graph as a self-contained, content-addressed artifact bundle.
//!
//! The harness does NOT implement search or game-tree logic; it delegates to
//! the engine crates. Worlds provide domain rules and evaluators only.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bundle;
pub mod runner;
pub mod worlds;
