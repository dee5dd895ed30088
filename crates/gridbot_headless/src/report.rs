//! End-of-match report, serialized as JSON on stdout.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Summary of one finished skirmish.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchReport {
    /// Ticks actually simulated.
    pub ticks: u64,
    /// Winning player, if the match was decided.
    pub winner: Option<u8>,
    /// Orders issued over the whole match, by action kind.
    pub actions: BTreeMap<String, u64>,
    /// Per-player final standing.
    pub players: Vec<PlayerReport>,
}

/// Final standing of one player.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerReport {
    /// Player identity.
    pub player: u8,
    /// Units still alive at the end.
    pub units: usize,
    /// Resource stock at the end.
    pub resources: u32,
}
