//! Package store error types.

use thiserror::Error;

/// Errors from package store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("version {version} of {name} is already published")]
    Conflict { name: String, version: String },

    #[error("invalid package data: {0}")]
    Invalid(String),
}
