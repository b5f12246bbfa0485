//! Lodestar Kernel: the deterministic primitives shared by the engine crates.
//!
//! # API Surface
//!
//! - [`proof::canon::canonical_json_bytes`] -- the single canonical JSON serializer
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 content hashing
//! - [`proof::hash_domain::HashDomain`] -- the typed list of hash domains
//!
//! Search and game-tree crates record their audit artifacts through these
//! functions so that identical inputs always produce identical bytes.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod proof;
