//! Test helpers shared across crates.
//!
//! This crate provides temporary UTF-8 directory trees, canned template sets
//! for small registries, `figment::Jail` plumbing and text normalisation for
//! behavioural steps.

pub mod figment;
pub mod templates;
pub mod text;
pub mod tree;
