//! Per-tick unit classification and worker role allocation.
//!
//! Role assignment is fully recomputed from the snapshot every tick:
//! what a unit does at tick N depends only on snapshot N and the
//! agent's alternation state, never on what it was assigned at tick
//! N-1. This avoids stale-assignment bugs across unit deaths and
//! spawns at the cost of recomputation, which is linear in the unit
//! count.

use tracing::debug;

use crate::catalog::{CoreTypes, UnitTypeCatalog};
use crate::snapshot::{PlayerId, Unit, UnitId, WorldSnapshot};

/// Map area at or below which the map counts as small; small maps get
/// no extra free worker.
pub const SMALL_MAP_AREA: i32 = 64;

/// A unit's functional role for the current tick.
///
/// Assigned once per tick by the allocator and consumed by downstream
/// components; every unit lands in at most one role bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Free worker on economy duty (harvest, or claimed for building).
    Harvester,
    /// Sent to fight: battle workers and combat units.
    Soldier,
    /// Free worker claimed by the construction planner this tick.
    Builder,
    /// No role target this tick.
    Idle,
}

/// The classifier's partition of the snapshot for one player.
///
/// Borrowed views into the snapshot; pure function output, valid for
/// the duration of the tick.
#[derive(Debug)]
pub struct TickView<'a> {
    /// The player the engine is deciding for.
    pub player: PlayerId,
    /// Owned harvest-capable units, in snapshot order.
    pub workers: Vec<&'a Unit>,
    /// Owned ranged combat units.
    pub ranged: Vec<&'a Unit>,
    /// Owned light combat units.
    pub light: Vec<&'a Unit>,
    /// First owned depot; anchors side-of-map heuristics.
    pub depot: Option<&'a Unit>,
    /// First owned barracks; anchors the ranged wedge check.
    pub barracks: Option<&'a Unit>,
    /// Number of owned depots.
    pub depot_count: usize,
    /// Number of owned barracks.
    pub barracks_count: usize,
    /// Resource piles remaining anywhere on the map.
    pub resource_piles: usize,
    /// All visible enemy units (owned by another player; neutral
    /// entities are not enemies).
    pub enemies: Vec<&'a Unit>,
}

impl TickView<'_> {
    /// Number of owned workers.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }
}

/// Partition the snapshot's unit list by ownership and capability.
///
/// Workers are recognized by the harvest capability flag, depots by
/// the stockpile flag, resource piles by the resource flag; ranged and
/// light units by their type tags.
#[must_use]
pub fn classify<'a>(
    player: PlayerId,
    snapshot: &'a WorldSnapshot,
    catalog: &UnitTypeCatalog,
    types: CoreTypes,
) -> TickView<'a> {
    let mut view = TickView {
        player,
        workers: Vec::new(),
        ranged: Vec::new(),
        light: Vec::new(),
        depot: None,
        barracks: None,
        depot_count: 0,
        barracks_count: 0,
        resource_piles: 0,
        enemies: Vec::new(),
    };

    for unit in snapshot.units() {
        if catalog.is_resource(unit.kind) {
            view.resource_piles += 1;
            continue;
        }
        if unit.owner.is_enemy_of(player) {
            view.enemies.push(unit);
            continue;
        }
        if unit.owner.player() != Some(player) {
            continue;
        }

        if catalog.can_harvest(unit.kind) {
            view.workers.push(unit);
        }
        if catalog.is_depot(unit.kind) {
            view.depot_count += 1;
            view.depot.get_or_insert(unit);
        }
        if unit.kind == types.barracks {
            view.barracks_count += 1;
            view.barracks.get_or_insert(unit);
        }
        if unit.kind == types.ranged {
            view.ranged.push(unit);
        }
        if unit.kind == types.light {
            view.light.push(unit);
        }
    }

    view
}

/// Free worker quota offset derived from map size: bigger maps support
/// one more free worker.
#[must_use]
pub fn worker_offset(snapshot: &WorldSnapshot) -> usize {
    if snapshot.area() > SMALL_MAP_AREA {
        1
    } else {
        0
    }
}

/// The allocator's split of the owned worker pool.
#[derive(Debug, Default)]
pub struct WorkerSplit<'a> {
    /// Harvest/build eligible workers, in snapshot order.
    pub free: Vec<&'a Unit>,
    /// Workers committed to combat this tick.
    pub battle: Vec<&'a Unit>,
}

impl WorkerSplit<'_> {
    /// The role a worker was assigned, for logging and tests. Workers
    /// later claimed by the construction planner become builders.
    #[must_use]
    pub fn role_of(&self, unit: UnitId) -> Role {
        if self.free.iter().any(|u| u.id == unit) {
            Role::Harvester
        } else if self.battle.iter().any(|u| u.id == unit) {
            Role::Soldier
        } else {
            Role::Idle
        }
    }
}

/// Split the worker pool into free workers and battle workers.
///
/// With no resource piles left, harvesting is pointless and every
/// worker fights. Otherwise the free-worker quota is
/// `depot_count + offset`, filled in snapshot order; the remainder
/// goes to battle. A pool smaller than the quota becomes all free
/// workers.
#[must_use]
pub fn split_workers<'a>(view: &TickView<'a>, offset: usize) -> WorkerSplit<'a> {
    let mut split = WorkerSplit::default();
    if view.workers.is_empty() {
        return split;
    }

    if view.resource_piles == 0 {
        debug!(
            player = view.player.0,
            workers = view.workers.len(),
            "no resource piles left; committing all workers to combat"
        );
        split.battle = view.workers.clone();
        return split;
    }

    let quota = view.depot_count + offset;
    for &worker in &view.workers {
        if split.free.len() < quota {
            split.free.push(worker);
        } else {
            split.battle.push(worker);
        }
    }

    debug_assert!(split.free.len() <= quota);
    debug_assert_eq!(split.free.len() + split.battle.len(), view.workers.len());
    split
}
