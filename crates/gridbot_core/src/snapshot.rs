//! Read-only world state consumed by the engine each tick.
//!
//! A [`WorldSnapshot`] is the engine's entire view of the simulation:
//! the unit list, map dimensions, per-player resource stock, and a
//! per-unit in-flight action query. The engine never mutates it;
//! resource stock changes happen in the host simulation after actions
//! execute.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::UnitTypeId;

/// Unique identifier for units.
pub type UnitId = u64;

/// Identifier for a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

/// Who owns a unit. Resource piles are neutral.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    /// Owned by a player.
    Player(PlayerId),
    /// Neutral map entity (resource piles).
    Neutral,
}

impl Owner {
    /// The owning player, if any.
    #[must_use]
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Self::Player(p) => Some(p),
            Self::Neutral => None,
        }
    }

    /// True for units owned by a player other than `me`.
    /// Neutral entities are never enemies.
    #[must_use]
    pub fn is_enemy_of(self, me: PlayerId) -> bool {
        matches!(self, Self::Player(p) if p != me)
    }
}

/// A position on the integer grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl GridPos {
    /// Create a new grid position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance, the engine's sole distance metric.
    #[must_use]
    pub fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// One unit as seen in a snapshot. Immutable for the duration of a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Stable identity across ticks.
    pub id: UnitId,
    /// Type tag; capabilities come from the catalog.
    pub kind: UnitTypeId,
    /// Owning player, or neutral.
    pub owner: Owner,
    /// Current grid cell.
    pub pos: GridPos,
}

impl Unit {
    /// Create a new unit record.
    #[must_use]
    pub const fn new(id: UnitId, kind: UnitTypeId, owner: Owner, pos: GridPos) -> Self {
        Self {
            id,
            kind,
            owner,
            pos,
        }
    }

    /// Manhattan distance to another unit.
    #[must_use]
    pub fn distance_to(&self, other: &Unit) -> u32 {
        self.pos.manhattan(other.pos)
    }
}

/// Per-player state visible to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    /// Player identity.
    pub id: PlayerId,
    /// Current resource stock.
    pub resources: u32,
}

/// An in-flight order as reported by the host, used for idempotence
/// checks. Reveals at least the action kind; harvest orders also
/// reveal the targeted pile/depot pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrentAction {
    /// Moving toward a destination cell.
    Move {
        /// Destination cell.
        dest: GridPos,
    },
    /// Attacking a target unit.
    Attack {
        /// Target unit.
        target: UnitId,
    },
    /// Harvest loop between a pile and a depot.
    Harvest {
        /// Resource pile being gathered.
        pile: UnitId,
        /// Depot receiving the resources.
        depot: UnitId,
    },
    /// Producing a unit.
    Train {
        /// Type being trained.
        kind: UnitTypeId,
    },
    /// Constructing a structure.
    Build {
        /// Structure type under construction.
        kind: UnitTypeId,
        /// Placement cell.
        at: GridPos,
    },
}

/// The full unit list for the current tick plus map metadata.
///
/// Shared read-only by all engine components within a tick.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Map width in cells.
    pub width: i32,
    /// Map height in cells.
    pub height: i32,
    units: Vec<Unit>,
    players: Vec<PlayerInfo>,
    current: HashMap<UnitId, CurrentAction>,
}

impl WorldSnapshot {
    /// Create an empty snapshot for a map of the given dimensions.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            units: Vec::new(),
            players: Vec::new(),
            current: HashMap::new(),
        }
    }

    /// Map area in cells.
    #[must_use]
    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    /// Append a unit. Units are iterated in insertion order, which is
    /// the tie-break order for all nearest-unit searches.
    pub fn push_unit(&mut self, unit: Unit) {
        self.units.push(unit);
    }

    /// All units in the snapshot.
    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Look up a unit by ID.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Set a player's resource stock.
    pub fn set_resources(&mut self, player: PlayerId, resources: u32) {
        if let Some(info) = self.players.iter_mut().find(|p| p.id == player) {
            info.resources = resources;
        } else {
            self.players.push(PlayerInfo {
                id: player,
                resources,
            });
        }
    }

    /// A player's resource stock. Unknown players have zero stock.
    #[must_use]
    pub fn resources(&self, player: PlayerId) -> u32 {
        self.players
            .iter()
            .find(|p| p.id == player)
            .map_or(0, |p| p.resources)
    }

    /// Record a unit's in-flight action.
    pub fn set_current_action(&mut self, unit: UnitId, action: CurrentAction) {
        self.current.insert(unit, action);
    }

    /// A unit's in-flight action, if it has one.
    #[must_use]
    pub fn current_action(&self, unit: UnitId) -> Option<&CurrentAction> {
        self.current.get(&unit)
    }

    /// True if the unit has no in-flight action.
    #[must_use]
    pub fn is_idle(&self, unit: UnitId) -> bool {
        !self.current.contains_key(&unit)
    }

    /// True if the cell lies within the map.
    #[must_use]
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// True if any unit stands on the cell.
    #[must_use]
    pub fn occupied(&self, pos: GridPos) -> bool {
        self.units.iter().any(|u| u.pos == pos)
    }
}

/// Pick the nearest unit by Manhattan distance.
///
/// Canonical comparator: the first candidate is always accepted, and a
/// later candidate replaces the best only when strictly closer. Ties go
/// to the first-encountered unit, so results are deterministic in
/// snapshot order.
#[must_use]
pub fn nearest_unit<'a>(
    from: GridPos,
    candidates: impl IntoIterator<Item = &'a Unit>,
) -> Option<&'a Unit> {
    let mut best: Option<(&Unit, u32)> = None;
    for unit in candidates {
        let d = from.manhattan(unit.pos);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((unit, d)),
        }
    }
    best.map(|(unit, _)| unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: UnitId, x: i32, y: i32) -> Unit {
        Unit::new(
            id,
            UnitTypeId::new(0),
            Owner::Player(PlayerId(0)),
            GridPos::new(x, y),
        )
    }

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(GridPos::new(0, 0).manhattan(GridPos::new(3, 4)), 7);
        assert_eq!(GridPos::new(5, 5).manhattan(GridPos::new(5, 5)), 0);
        assert_eq!(GridPos::new(-2, 1).manhattan(GridPos::new(2, -1)), 6);
    }

    #[test]
    fn test_owner_enemy_of() {
        let me = PlayerId(0);
        assert!(Owner::Player(PlayerId(1)).is_enemy_of(me));
        assert!(!Owner::Player(me).is_enemy_of(me));
        assert!(!Owner::Neutral.is_enemy_of(me));
    }

    #[test]
    fn test_idle_and_current_action() {
        let mut snap = WorldSnapshot::new(8, 8);
        snap.push_unit(unit(1, 0, 0));
        assert!(snap.is_idle(1));

        snap.set_current_action(1, CurrentAction::Harvest { pile: 7, depot: 9 });
        assert!(!snap.is_idle(1));
        assert_eq!(
            snap.current_action(1),
            Some(&CurrentAction::Harvest { pile: 7, depot: 9 })
        );
    }

    #[test]
    fn test_resources_default_to_zero() {
        let mut snap = WorldSnapshot::new(8, 8);
        assert_eq!(snap.resources(PlayerId(0)), 0);
        snap.set_resources(PlayerId(0), 6);
        assert_eq!(snap.resources(PlayerId(0)), 6);
        snap.set_resources(PlayerId(0), 5);
        assert_eq!(snap.resources(PlayerId(0)), 5);
    }

    #[test]
    fn test_nearest_unit_picks_strictly_closer() {
        let units = vec![unit(1, 5, 0), unit(2, 2, 0), unit(3, 2, 0)];
        let found = nearest_unit(GridPos::new(0, 0), units.iter()).unwrap();
        // Unit 2 is strictly closer than 1; unit 3 ties and loses to 2.
        assert_eq!(found.id, 2);
    }

    #[test]
    fn test_nearest_unit_accepts_first_candidate() {
        let units = vec![unit(1, 100, 100)];
        let found = nearest_unit(GridPos::new(0, 0), units.iter()).unwrap();
        assert_eq!(found.id, 1);
    }

    #[test]
    fn test_nearest_unit_empty() {
        assert!(nearest_unit(GridPos::new(0, 0), std::iter::empty()).is_none());
    }

    #[test]
    fn test_bounds_and_occupancy() {
        let mut snap = WorldSnapshot::new(4, 4);
        snap.push_unit(unit(1, 2, 2));

        assert!(snap.in_bounds(GridPos::new(0, 0)));
        assert!(snap.in_bounds(GridPos::new(3, 3)));
        assert!(!snap.in_bounds(GridPos::new(4, 0)));
        assert!(!snap.in_bounds(GridPos::new(0, -1)));

        assert!(snap.occupied(GridPos::new(2, 2)));
        assert!(!snap.occupied(GridPos::new(1, 1)));
    }
}
