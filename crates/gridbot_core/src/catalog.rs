//! Data-driven unit type catalog.
//!
//! This module is the single source of truth for unit type identity:
//! - [`UnitTypeId`]: numeric ID for fast, deterministic runtime use
//! - [`UnitTypeStats`]: cost and capability flags per type
//! - [`UnitTypeCatalog`]: maps between names and IDs, provides metadata
//!
//! The catalog is resolved once at agent initialization and never
//! mutated afterwards. It can be loaded from a RON file so the engine
//! carries no hardcoded unit data beyond the [`UnitTypeCatalog::standard`]
//! defaults used by tests and the headless runner.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Numeric identifier for a unit type.
///
/// Cheap (`Copy`, 2 bytes) and stable for the lifetime of a catalog,
/// so snapshots and actions can carry it instead of a string name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct UnitTypeId(u16);

impl UnitTypeId {
    /// Sentinel value indicating no unit type.
    pub const NONE: Self = Self(u16::MAX);

    /// Create a new unit type ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Check if this is a valid ID (not NONE).
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != u16::MAX
    }
}

/// Static stats for one unit type: build/train cost and capability flags.
///
/// Capability flags drive classification; the engine never matches on
/// type names at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitTypeStats {
    /// Type name, e.g. "worker".
    pub name: String,
    /// Resource cost to train or build one unit of this type.
    pub cost: u32,
    /// Can gather from resource piles and construct structures.
    #[serde(default)]
    pub can_harvest: bool,
    /// Collects harvested resources (a stockpile structure).
    #[serde(default)]
    pub is_depot: bool,
    /// A neutral, harvestable map entity.
    #[serde(default)]
    pub is_resource: bool,
    /// Has a weapon.
    #[serde(default)]
    pub can_attack: bool,
}

/// On-disk catalog format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    types: Vec<UnitTypeStats>,
}

/// Central registry mapping unit type names to IDs and metadata.
///
/// Built once at load time, then used for lookups throughout the
/// engine. Immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct UnitTypeCatalog {
    /// Lookup by numeric ID (O(1) array index).
    by_id: Vec<UnitTypeStats>,
    /// Lookup by name.
    by_name: HashMap<String, UnitTypeId>,
}

impl UnitTypeCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The reference catalog: the six types the engine's policies know about.
    ///
    /// Costs match the reference policy (worker 1, combat types 2,
    /// barracks 5, depot 10, resource piles cost nothing).
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        catalog.register(UnitTypeStats {
            name: "worker".into(),
            cost: 1,
            can_harvest: true,
            is_depot: false,
            is_resource: false,
            can_attack: true,
        });
        catalog.register(UnitTypeStats {
            name: "light".into(),
            cost: 2,
            can_harvest: false,
            is_depot: false,
            is_resource: false,
            can_attack: true,
        });
        catalog.register(UnitTypeStats {
            name: "ranged".into(),
            cost: 2,
            can_harvest: false,
            is_depot: false,
            is_resource: false,
            can_attack: true,
        });
        catalog.register(UnitTypeStats {
            name: "depot".into(),
            cost: 10,
            can_harvest: false,
            is_depot: true,
            is_resource: false,
            can_attack: false,
        });
        catalog.register(UnitTypeStats {
            name: "barracks".into(),
            cost: 5,
            can_harvest: false,
            is_depot: false,
            is_resource: false,
            can_attack: false,
        });
        catalog.register(UnitTypeStats {
            name: "resource".into(),
            cost: 0,
            can_harvest: false,
            is_depot: false,
            is_resource: true,
            can_attack: false,
        });
        catalog
    }

    /// Load a catalog from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EngineError::CatalogNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Load from a RON string.
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        let file: CatalogFile = ron::from_str(ron)?;
        let mut catalog = Self::new();
        for stats in file.types {
            catalog.register(stats);
        }
        Ok(catalog)
    }

    /// Register a unit type and return its assigned numeric ID.
    ///
    /// Re-registering an existing name returns the existing ID.
    pub fn register(&mut self, stats: UnitTypeStats) -> UnitTypeId {
        if let Some(&existing) = self.by_name.get(&stats.name) {
            return existing;
        }
        let id = UnitTypeId::new(self.by_id.len() as u16);
        self.by_name.insert(stats.name.clone(), id);
        self.by_id.push(stats);
        id
    }

    /// Get type stats by numeric ID. O(1) array lookup.
    #[inline]
    #[must_use]
    pub fn get(&self, id: UnitTypeId) -> Option<&UnitTypeStats> {
        if !id.is_valid() {
            return None;
        }
        self.by_id.get(id.0 as usize)
    }

    /// Find a type's numeric ID by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<UnitTypeId> {
        self.by_name.get(name).copied()
    }

    /// Resolve a type name, failing with [`EngineError::UnknownUnitType`]
    /// if the catalog does not contain it.
    pub fn resolve(&self, name: &str) -> Result<UnitTypeId> {
        self.find(name)
            .ok_or_else(|| EngineError::UnknownUnitType(name.to_string()))
    }

    /// Resource cost of a type. Returns 0 for an invalid ID.
    #[inline]
    #[must_use]
    pub fn cost(&self, id: UnitTypeId) -> u32 {
        self.get(id).map_or(0, |s| s.cost)
    }

    /// Whether the type can gather resources and construct structures.
    #[inline]
    #[must_use]
    pub fn can_harvest(&self, id: UnitTypeId) -> bool {
        self.get(id).is_some_and(|s| s.can_harvest)
    }

    /// Whether the type is a resource stockpile structure.
    #[inline]
    #[must_use]
    pub fn is_depot(&self, id: UnitTypeId) -> bool {
        self.get(id).is_some_and(|s| s.is_depot)
    }

    /// Whether the type is a neutral resource pile.
    #[inline]
    #[must_use]
    pub fn is_resource(&self, id: UnitTypeId) -> bool {
        self.get(id).is_some_and(|s| s.is_resource)
    }

    /// Whether the type has a weapon.
    #[inline]
    #[must_use]
    pub fn can_attack(&self, id: UnitTypeId) -> bool {
        self.get(id).is_some_and(|s| s.can_attack)
    }

    /// Total number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// The well-known types the decision policies are written against,
/// resolved once at agent initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreTypes {
    /// Harvest-capable builder unit.
    pub worker: UnitTypeId,
    /// Resource stockpile structure.
    pub depot: UnitTypeId,
    /// Combat unit production structure.
    pub barracks: UnitTypeId,
    /// Ranged combat unit.
    pub ranged: UnitTypeId,
    /// Light melee combat unit.
    pub light: UnitTypeId,
    /// Neutral resource pile.
    pub resource: UnitTypeId,
}

impl CoreTypes {
    /// Resolve all well-known type names against a catalog.
    pub fn resolve(catalog: &UnitTypeCatalog) -> Result<Self> {
        Ok(Self {
            worker: catalog.resolve("worker")?,
            depot: catalog.resolve("depot")?,
            barracks: catalog.resolve("barracks")?,
            ranged: catalog.resolve("ranged")?,
            light: catalog.resolve("light")?,
            resource: catalog.resolve("resource")?,
        })
    }
}
