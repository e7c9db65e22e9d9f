//! Unified error types for the marketplace core.
//!
//! Lookup misses, ownership violations, state conflicts, and input validation
//! each get their own variant so callers (e.g. an HTTP layer) can map them to
//! the right response without string matching.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (missing file, bad TOML, etc.)
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// A referenced entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity that was looked up (e.g. "course", "category")
        entity: &'static str,
        /// Identifier used in the failed lookup
        id: String,
    },

    /// Input failed validation (empty search query, bad rating, bad status value)
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the invalid input
        message: String,
    },

    /// The acting account is not allowed to perform the operation
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Description of the ownership/permission violation
        message: String,
    },

    /// The operation conflicts with current state (e.g. finishing a course
    /// that still has enrolled tutees, enrolling twice)
    #[error("Conflict: {message}")]
    Conflict {
        /// Description of the conflicting state
        message: String,
    },

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
