//! Typed errors for the registry core.

use thiserror::Error;

use crate::property::PropertyType;

/// Errors raised when assigning values into a property collection.
#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("type mismatch for property '{id}': expected {expected}, got {actual}")]
    TypeMismatch {
        id: String,
        expected: PropertyType,
        actual: PropertyType,
    },

    #[error("unknown property '{0}'")]
    UnknownProperty(String),
}
