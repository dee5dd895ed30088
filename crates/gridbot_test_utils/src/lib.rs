//! # Gridbot Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Snapshot fixture builder
//! - Pathfinder stubs
//! - Property-based testing re-exports

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;

pub use fixtures::{OpenField, SnapshotBuilder, Unreachable};

/// Re-export proptest for convenience.
pub use proptest;
