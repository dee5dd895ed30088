//! Error types for the decision engine.
//!
//! Errors only occur during setup (catalog loading, type resolution).
//! Per-tick planning is total: [`crate::engine::Agent::get_action`]
//! always returns a bundle for any well-formed snapshot.

use thiserror::Error;

/// Result type alias using [`EngineError`].
pub type Result<T> = std::result::Result<T, EngineError>;

/// Top-level error type for engine setup.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Catalog file not found.
    #[error("Catalog file not found: {0}")]
    CatalogNotFound(String),

    /// Failed to read a catalog file.
    #[error("Failed to read catalog file: {0}")]
    CatalogRead(#[from] std::io::Error),

    /// Failed to parse a RON catalog.
    #[error("Failed to parse catalog: {0}")]
    CatalogParse(#[from] ron::error::SpannedError),

    /// A required unit type name is missing from the catalog.
    #[error("Unknown unit type: {0}")]
    UnknownUnitType(String),
}
