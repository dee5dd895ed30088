//! The per-tick orchestrator and agent lifecycle.
//!
//! [`Agent::get_action`] is the engine's single entry point: given a
//! player and a read-only snapshot it returns one [`ActionBundle`],
//! always, for any well-formed snapshot. Sub-components run in a
//! fixed order each tick: the worker pipeline (allocate, construct,
//! fight, stack, harvest), then combat units, then production.

use tracing::debug;

use crate::action::{ActionBundle, BundleIssuer};
use crate::catalog::{CoreTypes, UnitTypeCatalog};
use crate::combat;
use crate::economy::{self, TrainRotation};
use crate::error::Result;
use crate::pathfinding::{GridPathfinder, Pathfinder};
use crate::roles::{self, TickView, SMALL_MAP_AREA};
use crate::snapshot::{PlayerId, WorldSnapshot};

/// Battle-worker count at which third-and-later workers are parked
/// out of the way instead of crowding the same chokepoint.
pub const STACK_THRESHOLD: usize = 3;

/// Cross-tick agent state.
///
/// Initialized at match start and never reset mid-match; everything
/// else the engine knows is recomputed from the snapshot every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AgentState {
    /// Barracks production rotation.
    pub rotation: TrainRotation,
    /// Whether the current map counts as small; recomputed from map
    /// area every tick.
    pub small_map: bool,
}

impl AgentState {
    /// Fresh state for a new match.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rotation: TrainRotation::new(),
            small_map: false,
        }
    }
}

/// The decision engine for one player.
///
/// Generic over the [`Pathfinder`] so hosts can plug in their own
/// motion planner; the default probes the snapshot occupancy grid.
#[derive(Clone, Debug)]
pub struct Agent<P = GridPathfinder> {
    catalog: UnitTypeCatalog,
    types: CoreTypes,
    state: AgentState,
    pathfinder: P,
}

impl Agent<GridPathfinder> {
    /// Create an agent over a catalog, using the built-in grid
    /// pathfinder.
    ///
    /// Fails if the catalog is missing any of the well-known type
    /// names the policies are written against.
    pub fn new(catalog: UnitTypeCatalog) -> Result<Self> {
        Self::with_pathfinder(catalog, GridPathfinder::new())
    }
}

impl<P: Pathfinder> Agent<P> {
    /// Create an agent with a host-supplied pathfinder.
    pub fn with_pathfinder(catalog: UnitTypeCatalog, pathfinder: P) -> Result<Self> {
        let types = CoreTypes::resolve(&catalog)?;
        Ok(Self {
            catalog,
            types,
            state: AgentState::new(),
            pathfinder,
        })
    }

    /// Restore match-start state. The catalog and pathfinder are kept.
    pub fn reset(&mut self) {
        self.state = AgentState::new();
    }

    /// The agent's cross-tick state.
    #[must_use]
    pub fn state(&self) -> &AgentState {
        &self.state
    }

    /// The catalog this agent was built over.
    #[must_use]
    pub fn catalog(&self) -> &UnitTypeCatalog {
        &self.catalog
    }

    /// Plan one tick: an action for every idle controllable unit that
    /// has a role target, nothing for the rest.
    ///
    /// Total: never fails, never panics on a well-formed snapshot.
    pub fn get_action(&mut self, player: PlayerId, snapshot: &WorldSnapshot) -> ActionBundle {
        self.state.small_map = snapshot.area() <= SMALL_MAP_AREA;

        let view = roles::classify(player, snapshot, &self.catalog, self.types);
        let mut issuer = BundleIssuer::new(snapshot);

        self.plan_workers(&view, snapshot, &mut issuer);
        self.plan_combat_units(&view, snapshot, &mut issuer);
        economy::plan_production(
            &view,
            snapshot,
            &mut self.state.rotation,
            self.types,
            &self.catalog,
            &mut issuer,
        );

        let bundle = issuer.into_bundle();
        debug!(
            player = player.0,
            actions = bundle.len(),
            units = snapshot.units().len(),
            "tick planned"
        );
        bundle
    }

    /// The worker pipeline: allocation, construction, battle orders,
    /// chokepoint stacking, then harvest dispatch.
    fn plan_workers(
        &self,
        view: &TickView<'_>,
        snapshot: &WorldSnapshot,
        issuer: &mut BundleIssuer<'_>,
    ) {
        if view.workers.is_empty() {
            return;
        }

        let offset = roles::worker_offset(snapshot);
        let mut split = roles::split_workers(view, offset);

        economy::plan_construction(view, &mut split.free, snapshot, self.types, &self.catalog, issuer);

        for worker in &split.battle {
            combat::battle_behavior(worker, view, &self.catalog, issuer);
        }

        // Beyond two battle workers the rest would only crowd the
        // same chokepoint; park them instead. The move replaces the
        // battle order issued just above.
        if split.battle.len() >= STACK_THRESHOLD {
            for worker in split.battle.iter().skip(STACK_THRESHOLD - 1) {
                combat::stack_unit(worker, view, snapshot, &self.pathfinder, 0, issuer);
            }
        }

        economy::dispatch_harvest(view, &split.free, snapshot, &self.catalog, issuer);
    }

    /// Combat units: ranged first (with the barracks wedge check),
    /// then light.
    fn plan_combat_units(
        &self,
        view: &TickView<'_>,
        snapshot: &WorldSnapshot,
        issuer: &mut BundleIssuer<'_>,
    ) {
        for unit in &view.ranged {
            // A ranged unit wedged against the barracks edge blocks
            // production; reposition it instead of fighting this tick.
            if let Some(barracks) = view.barracks {
                if unit.distance_to(barracks) == 1 {
                    combat::stack_unit(unit, view, snapshot, &self.pathfinder, 1, issuer);
                    continue;
                }
            }
            combat::battle_behavior(unit, view, &self.catalog, issuer);
        }

        for unit in &view.light {
            combat::battle_behavior(unit, view, &self.catalog, issuer);
        }
    }
}
