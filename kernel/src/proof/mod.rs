//! Proof module: canonical serialization and content hashing.
//!
//! `hash` depends on `hash_domain`; `canon` depends on nothing internal.

pub mod canon;
pub mod hash;
pub mod hash_domain;
