//! Error taxonomy for registry operations
//!
//! An empty result is success, not an error; `NotFound` covers only lookups
//! of a specific record that does not exist. Validation failures carry
//! field-level messages for the boundary to surface as a 400-equivalent.
//! Unauthorized is produced entirely by the boundary, never here.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Unknown name, unknown version, or "latest" resolved to nothing
    #[error("server not found")]
    NotFound,

    /// Malformed publish payload
    #[error("validation failed: {}", details.join("; "))]
    Validation { details: Vec<String> },
}

impl RegistryError {
    pub fn validation(details: Vec<String>) -> Self {
        Self::Validation { details }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
