//! # Error Types
//!
//! Errors raised by the core primitives. Validation failures are not errors
//! in this workspace; they are returned as data by `dp1-schema`.

use thiserror::Error;

/// Error during canonical serialization.
///
/// Inputs reaching the canonicalizer have already passed schema validation,
/// so this signals a programming-contract violation rather than bad input.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// The value has no JSON representation (non-string map key,
    /// failing `Serialize` impl).
    #[error("failed to canonicalize value: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
