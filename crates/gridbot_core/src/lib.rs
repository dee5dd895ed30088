//! # Gridbot Core
//!
//! Per-tick decision engine for an autonomous agent controlling a
//! population of units in a grid RTS simulation.
//!
//! Each tick the engine receives a read-only [`snapshot::WorldSnapshot`]
//! and emits, for every controllable unit that is currently idle, at
//! most one action that is affordable, non-duplicated, and
//! role-appropriate. This crate contains **only** deterministic logic:
//! - No rendering
//! - No IO (beyond optional catalog loading)
//! - No randomness
//! - No internal concurrency; one synchronous call per tick
//!
//! ## Crate Structure
//!
//! - [`catalog`] - Data-driven unit type catalog
//! - [`snapshot`] - Read-only world state per tick
//! - [`action`] - Actions, bundles, and the issuer capability
//! - [`roles`] - Unit classification and worker allocation
//! - [`economy`] - Construction, harvest dispatch, production
//! - [`combat`] - Target selection and repositioning
//! - [`pathfinding`] - Reachability probing
//! - [`engine`] - The tick orchestrator and agent lifecycle

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod action;
pub mod catalog;
pub mod combat;
pub mod economy;
pub mod engine;
pub mod error;
pub mod pathfinding;
pub mod roles;
pub mod snapshot;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::action::{Action, ActionBundle, ActionIssuer, BundleIssuer};
    pub use crate::catalog::{CoreTypes, UnitTypeCatalog, UnitTypeId, UnitTypeStats};
    pub use crate::engine::{Agent, AgentState};
    pub use crate::error::{EngineError, Result};
    pub use crate::pathfinding::{GridPathfinder, Pathfinder};
    pub use crate::roles::{Role, TickView, WorkerSplit};
    pub use crate::snapshot::{
        CurrentAction, GridPos, Owner, PlayerId, PlayerInfo, Unit, UnitId, WorldSnapshot,
    };
}
