//! Tactical decisions: target selection and defensive repositioning.

use tracing::trace;

use crate::action::ActionIssuer;
use crate::catalog::UnitTypeCatalog;
use crate::pathfinding::Pathfinder;
use crate::roles::TickView;
use crate::snapshot::{GridPos, Unit, WorldSnapshot};

/// Maximum candidate parking cells probed per unit per tick.
pub const STACK_PROBES: i32 = 5;

/// What a combat unit can see this tick: the nearest enemy that is
/// not a depot, and whether any enemy depot is visible at all. The
/// depot is not distance-ranked; any visible one qualifies.
#[derive(Debug, Default)]
pub struct EnemySurvey<'a> {
    /// Nearest non-depot enemy by Manhattan distance.
    pub nearest: Option<&'a Unit>,
    /// Some visible enemy depot, if any.
    pub depot: Option<&'a Unit>,
}

/// Scan the visible enemies from one unit's position.
///
/// The first non-depot candidate is always accepted; a later one
/// replaces it only when strictly closer (ties keep the
/// first-encountered enemy).
#[must_use]
pub fn survey_enemies<'a>(
    unit: &Unit,
    view: &TickView<'a>,
    catalog: &UnitTypeCatalog,
) -> EnemySurvey<'a> {
    let mut survey = EnemySurvey::default();
    let mut best = 0u32;

    for &enemy in &view.enemies {
        if catalog.is_depot(enemy.kind) {
            survey.depot.get_or_insert(enemy);
            continue;
        }
        let d = unit.distance_to(enemy);
        if survey.nearest.is_none() || d < best {
            survey.nearest = Some(enemy);
            best = d;
        }
    }

    survey
}

/// Combat targeting for one combat-capable unit, evaluated fresh
/// every tick.
///
/// Non-depot enemies are always prioritized over depots; with nothing
/// visible the unit stays idle this tick.
pub fn battle_behavior(
    unit: &Unit,
    view: &TickView<'_>,
    catalog: &UnitTypeCatalog,
    issuer: &mut impl ActionIssuer,
) {
    let survey = survey_enemies(unit, view, catalog);
    if let Some(enemy) = survey.nearest {
        issuer.attack(unit.id, enemy.id);
    } else if let Some(depot) = survey.depot {
        issuer.attack(unit.id, depot.id);
    } else {
        trace!(unit = unit.id, "no visible enemies; staying idle");
    }
}

/// Defensive repositioning for units that would otherwise cluster at
/// a chokepoint ("stacking").
///
/// The owned depot's half of the map picks the parking edge: a
/// left-side depot parks units down the left column, a right-side
/// depot down the right column (one column in at `offset`). Up to
/// [`STACK_PROBES`] candidate cells are probed through the
/// pathfinder; the first reachable one gets a move order. If none is
/// reachable the unit stays put this tick; the whole computation is
/// stateless, so it is retried next tick.
pub fn stack_unit(
    unit: &Unit,
    view: &TickView<'_>,
    snapshot: &WorldSnapshot,
    pathfinder: &impl Pathfinder,
    offset: i32,
    issuer: &mut impl ActionIssuer,
) {
    // Without a depot there is no side to anchor on.
    let Some(depot) = view.depot else {
        return;
    };
    let on_left = depot.pos.x - snapshot.width / 2 < 0;

    for n in 0..STACK_PROBES {
        let dest = if on_left {
            GridPos::new(offset, snapshot.height - 1 - n)
        } else {
            GridPos::new(snapshot.width - 1 - offset, n)
        };
        if pathfinder.reachable(unit.pos, dest, snapshot) {
            issuer.move_to(unit.id, dest);
            return;
        }
    }
    trace!(unit = unit.id, "no reachable parking cell this tick");
}
