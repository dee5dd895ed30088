//! Mirrored two-agent skirmish with a coarse action executor.
//!
//! The executor is deliberately simple: it exists to exercise the
//! engine over many consecutive ticks, not to be a faithful
//! simulation. Moves step one cell per tick, attacks chip one hit
//! point in range, harvest round-trips credit one resource, and
//! production spawns after a cost-proportional delay. In-flight
//! orders are carried in the snapshot so the engine's idempotence
//! path runs on every tick.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, info, warn};

use gridbot_core::prelude::*;

use crate::report::{MatchReport, PlayerReport};

/// Starting resource stock per player.
const STARTING_RESOURCES: u32 = 5;

/// Resources in each starting pile.
const PILE_STOCK: u32 = 20;

/// Skirmish parameters.
#[derive(Clone, Copy, Debug)]
pub struct SkirmishConfig {
    /// Map width in cells.
    pub width: i32,
    /// Map height in cells.
    pub height: i32,
    /// Tick limit; the match is scored on standing if it is reached.
    pub max_ticks: u64,
}

impl Default for SkirmishConfig {
    fn default() -> Self {
        Self {
            width: 12,
            height: 12,
            max_ticks: 600,
        }
    }
}

/// One live unit in the executor's world.
#[derive(Clone, Copy, Debug)]
struct SimUnit {
    id: UnitId,
    kind: UnitTypeId,
    owner: Owner,
    pos: GridPos,
    hp: i32,
}

/// A queued production, completing at `ready_at`.
#[derive(Clone, Copy, Debug)]
struct PendingSpawn {
    producer: UnitId,
    kind: UnitTypeId,
    owner: Owner,
    ready_at: u64,
}

/// A mirrored two-player match driven by one [`Agent`] per side.
pub struct Skirmish {
    config: SkirmishConfig,
    catalog: UnitTypeCatalog,
    types: CoreTypes,
    agents: Vec<Agent>,
    units: Vec<SimUnit>,
    current: HashMap<UnitId, CurrentAction>,
    resources: [u32; 2],
    stock: HashMap<UnitId, u32>,
    carrying: HashSet<UnitId>,
    build_left: HashMap<UnitId, u32>,
    pending: Vec<PendingSpawn>,
    next_id: UnitId,
    tick: u64,
    actions: BTreeMap<&'static str, u64>,
}

impl Skirmish {
    /// Set up a mirrored start on the configured map: one depot, one
    /// worker, and one resource pile per side.
    pub fn new(config: SkirmishConfig, catalog: UnitTypeCatalog) -> Result<Self> {
        let types = CoreTypes::resolve(&catalog)?;
        let agents = vec![Agent::new(catalog.clone())?, Agent::new(catalog.clone())?];

        let mut sim = Self {
            config,
            catalog,
            types,
            agents,
            units: Vec::new(),
            current: HashMap::new(),
            resources: [STARTING_RESOURCES; 2],
            stock: HashMap::new(),
            carrying: HashSet::new(),
            build_left: HashMap::new(),
            pending: Vec::new(),
            next_id: 1,
            tick: 0,
            actions: BTreeMap::new(),
        };
        sim.seed();
        Ok(sim)
    }

    fn seed(&mut self) {
        let (w, h) = (self.config.width, self.config.height);
        let p0 = Owner::Player(PlayerId(0));
        let p1 = Owner::Player(PlayerId(1));

        self.spawn(self.types.depot, p0, GridPos::new(1, 1));
        self.spawn(self.types.worker, p0, GridPos::new(2, 2));
        self.spawn(self.types.depot, p1, GridPos::new(w - 2, h - 2));
        self.spawn(self.types.worker, p1, GridPos::new(w - 3, h - 3));

        let near = self.spawn(self.types.resource, Owner::Neutral, GridPos::new(0, 0));
        let far = self.spawn(self.types.resource, Owner::Neutral, GridPos::new(w - 1, h - 1));
        self.stock.insert(near, PILE_STOCK);
        self.stock.insert(far, PILE_STOCK);
    }

    fn spawn(&mut self, kind: UnitTypeId, owner: Owner, pos: GridPos) -> UnitId {
        let id = self.next_id;
        self.next_id += 1;
        let hp = self.initial_hp(kind);
        self.units.push(SimUnit {
            id,
            kind,
            owner,
            pos,
            hp,
        });
        id
    }

    fn initial_hp(&self, kind: UnitTypeId) -> i32 {
        if kind == self.types.depot {
            10
        } else if kind == self.types.barracks || kind == self.types.light {
            4
        } else {
            1
        }
    }

    fn attack_range(&self, kind: UnitTypeId) -> u32 {
        if kind == self.types.ranged {
            3
        } else {
            1
        }
    }

    /// Run to completion and report.
    pub fn run(&mut self) -> MatchReport {
        info!(
            width = self.config.width,
            height = self.config.height,
            max_ticks = self.config.max_ticks,
            "skirmish starting"
        );

        while self.tick < self.config.max_ticks {
            if self.unit_count(0) == 0 || self.unit_count(1) == 0 {
                break;
            }
            let snap = self.snapshot();
            for p in 0..2u8 {
                let bundle = self.agents[usize::from(p)].get_action(PlayerId(p), &snap);
                for (unit, action) in bundle.into_vec() {
                    self.accept(PlayerId(p), unit, action);
                }
            }
            self.step();
            self.tick += 1;
        }

        let report = self.report();
        info!(ticks = report.ticks, winner = ?report.winner, "skirmish finished");
        report
    }

    /// The current world as the engine sees it.
    pub fn snapshot(&self) -> WorldSnapshot {
        let mut snap = WorldSnapshot::new(self.config.width, self.config.height);
        for u in &self.units {
            snap.push_unit(Unit::new(u.id, u.kind, u.owner, u.pos));
        }
        snap.set_resources(PlayerId(0), self.resources[0]);
        snap.set_resources(PlayerId(1), self.resources[1]);
        for (&unit, &action) in &self.current {
            snap.set_current_action(unit, action);
        }
        snap
    }

    /// Register one freshly issued order.
    fn accept(&mut self, player: PlayerId, unit: UnitId, action: Action) {
        let Some(owner) = self.unit_by_id(unit).map(|u| u.owner) else {
            warn!(unit, "order for a unit that no longer exists");
            return;
        };
        if owner != Owner::Player(player) {
            warn!(unit, "order for a unit the player does not own");
            return;
        }

        *self.actions.entry(action.kind_name()).or_insert(0) += 1;
        let p = usize::from(player.0);

        match action {
            Action::Move { dest } => {
                self.current.insert(unit, CurrentAction::Move { dest });
            }
            Action::Attack { target } => {
                self.current.insert(unit, CurrentAction::Attack { target });
            }
            Action::Harvest { pile, depot } => {
                self.current
                    .insert(unit, CurrentAction::Harvest { pile, depot });
            }
            Action::Train { kind } => {
                let cost = self.catalog.cost(kind);
                if cost > self.resources[p] {
                    debug!(unit, "train order arrived unaffordable; dropped");
                    return;
                }
                self.resources[p] -= cost;
                self.pending.push(PendingSpawn {
                    producer: unit,
                    kind,
                    owner: Owner::Player(player),
                    ready_at: self.tick + u64::from(cost) * 2 + 1,
                });
                self.current.insert(unit, CurrentAction::Train { kind });
            }
            Action::Build { kind, at } => {
                let cost = self.catalog.cost(kind);
                if cost > self.resources[p] {
                    debug!(unit, "build order arrived unaffordable; dropped");
                    return;
                }
                self.resources[p] -= cost;
                self.build_left.insert(unit, cost.max(1));
                self.current.insert(unit, CurrentAction::Build { kind, at });
            }
        }
    }

    /// Advance every in-flight order by one tick.
    fn step(&mut self) {
        self.complete_productions();

        let ids: Vec<UnitId> = self.units.iter().map(|u| u.id).collect();
        for id in ids {
            let Some(action) = self.current.get(&id).copied() else {
                continue;
            };
            if self.unit_by_id(id).is_none() {
                continue;
            }
            match action {
                CurrentAction::Move { dest } => self.step_move(id, dest),
                CurrentAction::Attack { target } => self.step_attack(id, target),
                CurrentAction::Harvest { pile, depot } => self.step_harvest(id, pile, depot),
                // Waits for the pending spawn.
                CurrentAction::Train { .. } => {}
                CurrentAction::Build { kind, at } => self.step_build(id, kind, at),
            }
        }
    }

    fn complete_productions(&mut self) {
        let tick = self.tick;
        let (due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.ready_at <= tick);
        self.pending = rest;

        for spawn in due {
            self.current.remove(&spawn.producer);
            let Some(anchor) = self.unit_by_id(spawn.producer).map(|u| u.pos) else {
                // Producer died mid-production; the order is lost.
                continue;
            };
            if let Some(pos) = self.free_neighbor(anchor) {
                let id = self.spawn(spawn.kind, spawn.owner, pos);
                debug!(unit = id, "production complete");
            } else {
                debug!(producer = spawn.producer, "no room to place production");
            }
        }
    }

    fn step_move(&mut self, id: UnitId, dest: GridPos) {
        let pos = self.unit_by_id(id).map(|u| u.pos);
        match pos {
            Some(p) if p == dest => {
                self.current.remove(&id);
            }
            Some(p) => self.step_toward(id, p, dest),
            None => {}
        }
    }

    fn step_attack(&mut self, id: UnitId, target: UnitId) {
        let Some(target_pos) = self.unit_by_id(target).map(|u| u.pos) else {
            self.current.remove(&id);
            return;
        };
        let Some(me) = self.unit_by_id(id).copied() else {
            return;
        };
        if me.pos.manhattan(target_pos) <= self.attack_range(me.kind) {
            self.damage(target);
        } else {
            self.step_toward(id, me.pos, target_pos);
        }
    }

    fn step_harvest(&mut self, id: UnitId, pile: UnitId, depot: UnitId) {
        let Some(me) = self.unit_by_id(id).copied() else {
            return;
        };
        if self.carrying.contains(&id) {
            let Some(depot_pos) = self.unit_by_id(depot).map(|u| u.pos) else {
                self.current.remove(&id);
                return;
            };
            if me.pos.manhattan(depot_pos) <= 1 {
                if let Some(player) = me.owner.player() {
                    self.resources[usize::from(player.0)] += 1;
                }
                self.carrying.remove(&id);
            } else {
                self.step_toward(id, me.pos, depot_pos);
            }
        } else {
            let Some(pile_pos) = self.unit_by_id(pile).map(|u| u.pos) else {
                self.current.remove(&id);
                return;
            };
            if me.pos.manhattan(pile_pos) <= 1 {
                self.carrying.insert(id);
                let exhausted = {
                    let left = self.stock.entry(pile).or_insert(1);
                    *left = left.saturating_sub(1);
                    *left == 0
                };
                if exhausted {
                    self.remove_unit(pile);
                }
            } else {
                self.step_toward(id, me.pos, pile_pos);
            }
        }
    }

    fn step_build(&mut self, id: UnitId, kind: UnitTypeId, at: GridPos) {
        let Some(me) = self.unit_by_id(id).copied() else {
            return;
        };
        if me.pos.manhattan(at) <= 1 {
            let done = {
                let left = self.build_left.entry(id).or_insert(1);
                *left = left.saturating_sub(1);
                *left == 0
            };
            if done {
                self.build_left.remove(&id);
                self.current.remove(&id);
                if self.unit_at(at).is_none() && self.in_bounds(at) {
                    let structure = self.spawn(kind, me.owner, at);
                    debug!(unit = structure, "construction complete");
                } else {
                    debug!(unit = id, "construction site blocked; order lost");
                }
            }
        } else {
            self.step_toward(id, me.pos, at);
        }
    }

    /// One-cell step, x axis first, skipping occupied cells. Blocked
    /// units stay put for the tick.
    fn step_toward(&mut self, id: UnitId, from: GridPos, dest: GridPos) {
        let dx = (dest.x - from.x).signum();
        let dy = (dest.y - from.y).signum();
        let candidates = [
            GridPos::new(from.x + dx, from.y),
            GridPos::new(from.x, from.y + dy),
        ];
        for next in candidates {
            if next != from && self.in_bounds(next) && self.unit_at(next).is_none() {
                if let Some(u) = self.units.iter_mut().find(|u| u.id == id) {
                    u.pos = next;
                }
                return;
            }
        }
    }

    fn damage(&mut self, target: UnitId) {
        let dead = match self.units.iter_mut().find(|u| u.id == target) {
            Some(u) => {
                u.hp -= 1;
                u.hp <= 0
            }
            None => false,
        };
        if dead {
            debug!(unit = target, "unit destroyed");
            self.remove_unit(target);
        }
    }

    fn remove_unit(&mut self, id: UnitId) {
        self.units.retain(|u| u.id != id);
        self.current.remove(&id);
        self.stock.remove(&id);
        self.carrying.remove(&id);
        self.build_left.remove(&id);
    }

    fn unit_by_id(&self, id: UnitId) -> Option<&SimUnit> {
        self.units.iter().find(|u| u.id == id)
    }

    fn unit_at(&self, pos: GridPos) -> Option<&SimUnit> {
        self.units.iter().find(|u| u.pos == pos)
    }

    fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.config.width && pos.y >= 0 && pos.y < self.config.height
    }

    fn free_neighbor(&self, pos: GridPos) -> Option<GridPos> {
        [(1, 0), (0, 1), (-1, 0), (0, -1)]
            .into_iter()
            .map(|(dx, dy)| GridPos::new(pos.x + dx, pos.y + dy))
            .find(|&p| self.in_bounds(p) && self.unit_at(p).is_none())
    }

    fn unit_count(&self, player: u8) -> usize {
        self.units
            .iter()
            .filter(|u| u.owner == Owner::Player(PlayerId(player)))
            .count()
    }

    fn report(&self) -> MatchReport {
        let counts = [self.unit_count(0), self.unit_count(1)];
        let winner = match counts {
            [0, 0] => None,
            [_, 0] => Some(0),
            [0, _] => Some(1),
            _ => {
                // Tick limit reached; score on standing.
                let standing =
                    |p: usize| (counts[p], self.resources[p]);
                match standing(0).cmp(&standing(1)) {
                    std::cmp::Ordering::Greater => Some(0),
                    std::cmp::Ordering::Less => Some(1),
                    std::cmp::Ordering::Equal => None,
                }
            }
        };

        MatchReport {
            ticks: self.tick,
            winner,
            actions: self
                .actions
                .iter()
                .map(|(k, v)| ((*k).to_string(), *v))
                .collect(),
            players: (0u8..2)
                .map(|p| PlayerReport {
                    player: p,
                    units: counts[usize::from(p)],
                    resources: self.resources[usize::from(p)],
                })
                .collect(),
        }
    }
}
