//! Economic decisions: construction, harvest dispatch, and production.

use tracing::debug;

use crate::action::ActionIssuer;
use crate::catalog::{CoreTypes, UnitTypeCatalog, UnitTypeId};
use crate::combat;
use crate::roles::TickView;
use crate::snapshot::{nearest_unit, GridPos, Owner, Unit, WorldSnapshot};

/// Train workers while the owned-worker count is at or below this cap.
pub const WORKER_CAP: usize = 5;

/// Resource stock required before starting a barracks. One above the
/// structure's cost, so the economy is not drained to zero.
pub const BARRACKS_RESOURCE_FLOOR: u32 = 6;

/// Owned workers required before a barracks is worth starting.
pub const MIN_WORKERS_FOR_BARRACKS: usize = 4;

/// Cross-tick production state: which combat type the barracks trains
/// next. Initialized at match start, never reset mid-match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrainRotation {
    next_is_ranged: bool,
}

impl TrainRotation {
    /// Start a fresh rotation; ranged trains first.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_is_ranged: true,
        }
    }

    /// The combat type the barracks should train next.
    #[must_use]
    pub fn selected(&self, types: CoreTypes) -> UnitTypeId {
        if self.next_is_ranged {
            types.ranged
        } else {
            types.light
        }
    }

    /// Flip to the other combat type after a successful train order.
    pub fn advance(&mut self) {
        self.next_is_ranged = !self.next_is_ranged;
    }
}

impl Default for TrainRotation {
    fn default() -> Self {
        Self::new()
    }
}

/// Construction planning, run from within worker allocation.
///
/// Claims builders from the front of the free-worker list; claimed
/// workers are unavailable to the harvest dispatcher this tick. The
/// barracks check runs before the depot check, and each runs every
/// tick while the respective structure count is zero. Once a
/// structure exists in the snapshot, even mid-construction, the
/// planner stops reissuing.
pub fn plan_construction<'a>(
    view: &TickView<'a>,
    free: &mut Vec<&'a Unit>,
    snapshot: &WorldSnapshot,
    types: CoreTypes,
    catalog: &UnitTypeCatalog,
    issuer: &mut impl ActionIssuer,
) {
    let resources = snapshot.resources(view.player);

    if view.barracks_count == 0
        && !free.is_empty()
        && resources >= BARRACKS_RESOURCE_FLOOR
        && view.worker_count() >= MIN_WORKERS_FOR_BARRACKS
    {
        let builder = free.remove(0);
        let at = barracks_site(view.depot, builder, snapshot);
        debug!(
            player = view.player.0,
            builder = builder.id,
            x = at.x,
            y = at.y,
            "starting barracks"
        );
        issuer.build(builder.id, types.barracks, at);
    }

    if view.depot_count == 0 && !free.is_empty() && resources >= catalog.cost(types.depot) {
        let builder = free.remove(0);
        debug!(
            player = view.player.0,
            builder = builder.id,
            "no depot owned; starting one at the builder's cell"
        );
        issuer.build(builder.id, types.depot, builder.pos);
    }
}

/// Barracks placement, mirrored by which half of the map the depot
/// occupies: at or right of center builds up-and-right of the depot,
/// left of center builds down-and-left. With no depot the builder's
/// own cell is used.
fn barracks_site(depot: Option<&Unit>, builder: &Unit, snapshot: &WorldSnapshot) -> GridPos {
    match depot {
        Some(d) if d.pos.x - snapshot.width / 2 >= 0 => GridPos::new(d.pos.x + 2, d.pos.y - 2),
        Some(d) => GridPos::new(d.pos.x - 2, d.pos.y + 4),
        None => builder.pos,
    }
}

/// Harvest dispatch for the free workers left after construction
/// claims.
///
/// Each worker pairs the nearest resource pile with the nearest owned
/// depot (Manhattan distance, first-encountered tie-break). Re-issue
/// is suppressed when the worker's in-flight order already targets
/// that exact pair, so harvest progress is never reset by the per-tick
/// recomputation. A worker with no pile/depot pair falls back to
/// combat targeting rather than sitting idle.
pub fn dispatch_harvest(
    view: &TickView<'_>,
    free: &[&Unit],
    snapshot: &WorldSnapshot,
    catalog: &UnitTypeCatalog,
    issuer: &mut impl ActionIssuer,
) {
    for worker in free {
        let pile = nearest_unit(
            worker.pos,
            snapshot
                .units()
                .iter()
                .filter(|u| catalog.is_resource(u.kind)),
        );
        let depot = nearest_unit(
            worker.pos,
            snapshot.units().iter().filter(|u| {
                catalog.is_depot(u.kind) && u.owner == Owner::Player(view.player)
            }),
        );

        match (pile, depot) {
            (Some(pile), Some(depot)) => {
                issuer.harvest(worker.id, pile.id, depot.id);
            }
            _ => {
                // No reachable resource/depot pair; fight instead.
                combat::battle_behavior(worker, view, catalog, issuer);
            }
        }
    }
}

/// Production policy for idle structures.
///
/// Depots train workers while affordable and the worker population is
/// at or below [`WORKER_CAP`]. The barracks trains the
/// rotation-selected combat type and flips the rotation; the two
/// types alternate strictly one-for-one, with no substitution when
/// the selected type is unaffordable.
pub fn plan_production(
    view: &TickView<'_>,
    snapshot: &WorldSnapshot,
    rotation: &mut TrainRotation,
    types: CoreTypes,
    catalog: &UnitTypeCatalog,
    issuer: &mut impl ActionIssuer,
) {
    let resources = snapshot.resources(view.player);

    for unit in snapshot.units() {
        if unit.owner.player() != Some(view.player) || !snapshot.is_idle(unit.id) {
            continue;
        }

        if catalog.is_depot(unit.kind)
            && resources >= catalog.cost(types.worker)
            && view.worker_count() <= WORKER_CAP
        {
            issuer.train(unit.id, types.worker);
        }

        if unit.kind == types.barracks {
            let kind = rotation.selected(types);
            if resources >= catalog.cost(kind) {
                debug!(
                    player = view.player.0,
                    barracks = unit.id,
                    kind = kind.as_u16(),
                    "training combat unit"
                );
                issuer.train(unit.id, kind);
                rotation.advance();
            }
        }
    }
}
