//! Error types.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record with this name is stored.
    #[error("Config not found: {0}")]
    NotFound(String),
    /// A record with this name is already stored.
    #[error("Config already exists: {0}")]
    AlreadyExists(String),
}

pub type StoreResult<T> = core::result::Result<T, StoreError>;
