//! Test fixtures and helpers.
//!
//! Pre-built snapshots and pathfinder stubs for consistent testing.
//! The builder uses the standard catalog, so fixture costs and
//! capability flags match the reference policy.

use gridbot_core::catalog::{CoreTypes, UnitTypeCatalog};
use gridbot_core::pathfinding::Pathfinder;
use gridbot_core::snapshot::{
    CurrentAction, GridPos, Owner, PlayerId, Unit, UnitId, WorldSnapshot,
};

/// The well-known types of the standard catalog.
#[must_use]
pub fn standard_types() -> CoreTypes {
    CoreTypes::resolve(&UnitTypeCatalog::standard()).expect("standard catalog is complete")
}

/// Incremental snapshot builder over the standard catalog.
///
/// Every placement method returns the new unit's ID so tests can
/// assert on the actions it receives. Units are added in call order,
/// which is the tie-break order for nearest-unit searches.
pub struct SnapshotBuilder {
    snapshot: WorldSnapshot,
    catalog: UnitTypeCatalog,
    types: CoreTypes,
    next_id: UnitId,
}

impl SnapshotBuilder {
    /// Start an empty map of the given dimensions.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        let catalog = UnitTypeCatalog::standard();
        let types = CoreTypes::resolve(&catalog).expect("standard catalog is complete");
        Self {
            snapshot: WorldSnapshot::new(width, height),
            catalog,
            types,
            next_id: 1,
        }
    }

    /// The catalog backing this builder.
    #[must_use]
    pub fn catalog(&self) -> &UnitTypeCatalog {
        &self.catalog
    }

    /// The resolved well-known types.
    #[must_use]
    pub fn types(&self) -> CoreTypes {
        self.types
    }

    fn place(&mut self, kind: gridbot_core::catalog::UnitTypeId, owner: Owner, x: i32, y: i32) -> UnitId {
        let id = self.next_id;
        self.next_id += 1;
        self.snapshot
            .push_unit(Unit::new(id, kind, owner, GridPos::new(x, y)));
        id
    }

    /// Add an owned worker.
    pub fn worker(&mut self, player: PlayerId, x: i32, y: i32) -> UnitId {
        self.place(self.types.worker, Owner::Player(player), x, y)
    }

    /// Add an owned depot.
    pub fn depot(&mut self, player: PlayerId, x: i32, y: i32) -> UnitId {
        self.place(self.types.depot, Owner::Player(player), x, y)
    }

    /// Add an owned barracks.
    pub fn barracks(&mut self, player: PlayerId, x: i32, y: i32) -> UnitId {
        self.place(self.types.barracks, Owner::Player(player), x, y)
    }

    /// Add an owned ranged unit.
    pub fn ranged(&mut self, player: PlayerId, x: i32, y: i32) -> UnitId {
        self.place(self.types.ranged, Owner::Player(player), x, y)
    }

    /// Add an owned light unit.
    pub fn light(&mut self, player: PlayerId, x: i32, y: i32) -> UnitId {
        self.place(self.types.light, Owner::Player(player), x, y)
    }

    /// Add a neutral resource pile.
    pub fn pile(&mut self, x: i32, y: i32) -> UnitId {
        self.place(self.types.resource, Owner::Neutral, x, y)
    }

    /// Set a player's resource stock.
    pub fn resources(&mut self, player: PlayerId, amount: u32) {
        self.snapshot.set_resources(player, amount);
    }

    /// Record an in-flight action for a unit.
    pub fn current(&mut self, unit: UnitId, action: CurrentAction) {
        self.snapshot.set_current_action(unit, action);
    }

    /// Clone out the snapshot. The builder stays usable, so tests can
    /// derive follow-up ticks from the same setup.
    #[must_use]
    pub fn build(&self) -> WorldSnapshot {
        self.snapshot.clone()
    }
}

/// Pathfinder stub: everything is reachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenField;

impl Pathfinder for OpenField {
    fn reachable(&self, _from: GridPos, _to: GridPos, _snapshot: &WorldSnapshot) -> bool {
        true
    }
}

/// Pathfinder stub: nothing is reachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unreachable;

impl Pathfinder for Unreachable {
    fn reachable(&self, _from: GridPos, _to: GridPos, _snapshot: &WorldSnapshot) -> bool {
        false
    }
}
