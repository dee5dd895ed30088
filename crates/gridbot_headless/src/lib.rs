//! # Gridbot Headless
//!
//! Headless skirmish runner: drives one decision engine per player
//! over a mirrored synthetic map with a coarse action executor, for
//! CI smoke runs and eyeballing agent behavior without a real host.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod report;
pub mod runner;

pub use report::{MatchReport, PlayerReport};
pub use runner::{Skirmish, SkirmishConfig};
