//! Actions emitted by the engine and the issuer capability.
//!
//! The engine registers intents through the [`ActionIssuer`] trait
//! rather than talking to the host directly; the shipped
//! [`BundleIssuer`] accumulates intents into an [`ActionBundle`] that
//! the host translates into low-level simulation commands.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::catalog::UnitTypeId;
use crate::snapshot::{CurrentAction, GridPos, UnitId, WorldSnapshot};

/// A command to a single unit for this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Move to a destination cell.
    Move {
        /// Destination cell.
        dest: GridPos,
    },
    /// Attack a target unit.
    Attack {
        /// Target unit.
        target: UnitId,
    },
    /// Gather from a pile and return to a depot, repeatedly.
    Harvest {
        /// Resource pile to gather from.
        pile: UnitId,
        /// Depot to return resources to.
        depot: UnitId,
    },
    /// Produce a unit of the given type.
    Train {
        /// Type to train.
        kind: UnitTypeId,
    },
    /// Construct a structure of the given type at a cell.
    Build {
        /// Structure type.
        kind: UnitTypeId,
        /// Placement cell.
        at: GridPos,
    },
}

impl Action {
    /// Short name of the action kind, for logs and reports.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Move { .. } => "move",
            Self::Attack { .. } => "attack",
            Self::Harvest { .. } => "harvest",
            Self::Train { .. } => "train",
            Self::Build { .. } => "build",
        }
    }

    /// True if this intent matches an in-flight action, meaning
    /// issuing it again would only reset the unit's progress.
    #[must_use]
    pub fn matches_current(&self, current: &CurrentAction) -> bool {
        match (self, current) {
            (Self::Move { dest }, CurrentAction::Move { dest: d }) => dest == d,
            (Self::Attack { target }, CurrentAction::Attack { target: t }) => target == t,
            (
                Self::Harvest { pile, depot },
                CurrentAction::Harvest { pile: p, depot: d },
            ) => pile == p && depot == d,
            (Self::Train { kind }, CurrentAction::Train { kind: k }) => kind == k,
            (Self::Build { kind, at }, CurrentAction::Build { kind: k, at: a }) => {
                kind == k && at == a
            }
            _ => false,
        }
    }
}

/// All intents for one tick: at most one action per unit.
///
/// A later insert for the same unit replaces the earlier action while
/// keeping the unit's original position in issue order. This is how
/// repositioning overrides a combat order issued earlier in the tick.
#[derive(Clone, Debug, Default)]
pub struct ActionBundle {
    order: Vec<UnitId>,
    actions: HashMap<UnitId, Action>,
}

impl ActionBundle {
    /// Create an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of units with an action this tick.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if no actions were issued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The action assigned to a unit, if any.
    #[must_use]
    pub fn get(&self, unit: UnitId) -> Option<&Action> {
        self.actions.get(&unit)
    }

    /// Assign an action to a unit, replacing any earlier assignment.
    pub fn insert(&mut self, unit: UnitId, action: Action) {
        if self.actions.insert(unit, action).is_none() {
            self.order.push(unit);
        }
    }

    /// Iterate (unit, action) pairs in issue order.
    pub fn iter(&self) -> impl Iterator<Item = (UnitId, &Action)> {
        self.order.iter().map(|id| (*id, &self.actions[id]))
    }

    /// Consume the bundle into an ordered list.
    #[must_use]
    pub fn into_vec(self) -> Vec<(UnitId, Action)> {
        let mut actions = self.actions;
        self.order
            .into_iter()
            .filter_map(|id| actions.remove(&id).map(|a| (id, a)))
            .collect()
    }
}

/// Capability interface the engine uses to register intents.
///
/// The host supplies an implementation; the engine never constructs
/// simulation commands itself.
pub trait ActionIssuer {
    /// Send a unit to a destination cell.
    fn move_to(&mut self, unit: UnitId, dest: GridPos);
    /// Order a unit to attack a target.
    fn attack(&mut self, unit: UnitId, target: UnitId);
    /// Order a worker into a harvest loop between a pile and a depot.
    fn harvest(&mut self, unit: UnitId, pile: UnitId, depot: UnitId);
    /// Order a structure to train a unit type.
    fn train(&mut self, producer: UnitId, kind: UnitTypeId);
    /// Order a worker to construct a structure at a cell.
    fn build(&mut self, unit: UnitId, kind: UnitTypeId, at: GridPos);
}

/// The standard issuer: accumulates intents into an [`ActionBundle`],
/// suppressing any intent identical to the unit's in-flight action so
/// that re-issuing an order never resets its progress.
pub struct BundleIssuer<'a> {
    snapshot: &'a WorldSnapshot,
    bundle: ActionBundle,
}

impl<'a> BundleIssuer<'a> {
    /// Create an issuer for the current tick's snapshot.
    #[must_use]
    pub fn new(snapshot: &'a WorldSnapshot) -> Self {
        Self {
            snapshot,
            bundle: ActionBundle::new(),
        }
    }

    /// The accumulated bundle so far.
    #[must_use]
    pub fn bundle(&self) -> &ActionBundle {
        &self.bundle
    }

    /// Finish the tick and take the bundle.
    #[must_use]
    pub fn into_bundle(self) -> ActionBundle {
        self.bundle
    }

    fn issue(&mut self, unit: UnitId, action: Action) {
        if let Some(current) = self.snapshot.current_action(unit) {
            if action.matches_current(current) {
                trace!(unit, kind = action.kind_name(), "order already in flight");
                return;
            }
        }
        trace!(unit, kind = action.kind_name(), "issuing order");
        self.bundle.insert(unit, action);
    }
}

impl ActionIssuer for BundleIssuer<'_> {
    fn move_to(&mut self, unit: UnitId, dest: GridPos) {
        self.issue(unit, Action::Move { dest });
    }

    fn attack(&mut self, unit: UnitId, target: UnitId) {
        self.issue(unit, Action::Attack { target });
    }

    fn harvest(&mut self, unit: UnitId, pile: UnitId, depot: UnitId) {
        self.issue(unit, Action::Harvest { pile, depot });
    }

    fn train(&mut self, producer: UnitId, kind: UnitTypeId) {
        self.issue(producer, Action::Train { kind });
    }

    fn build(&mut self, unit: UnitId, kind: UnitTypeId, at: GridPos) {
        self.issue(unit, Action::Build { kind, at });
    }
}
