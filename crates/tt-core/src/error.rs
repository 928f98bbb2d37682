//! Workspace base error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` where a core
//! validation can fail inside them (`SimError::Core` for the run region).
//! Nothing inside a simulation tick returns an error; these types exist for
//! loaders, config, and builders.

use thiserror::Error;

/// The base error type shared by the `tt-*` crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid region: {0}")]
    InvalidRegion(String),
}

/// Shorthand result type for all `tt-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
