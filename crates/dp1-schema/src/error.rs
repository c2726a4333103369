//! # Error Types
//!
//! Errors raised while preparing or running the validator. A document
//! that fails its checks is not an error here; it is reported through
//! [`SchemaValidationError::ValidationFailed`] or as
//! [`crate::ValidationFailure`] data.

use thiserror::Error;

use crate::issue::ValidationIssue;

/// Error during schema validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document did not conform to the playlist schema.
    #[error("validation failed: {}", crate::issue::join_issues(.issues))]
    ValidationFailed {
        /// Issues in discovery order.
        issues: Vec<ValidationIssue>,
    },

    /// The embedded schema document could not be parsed.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError {
        /// Schema identifier.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The compiled validator could not be built (invalid schema).
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema identifier.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// A document that passed every check did not deserialize into the
    /// typed model. Indicates drift between the schema and `dp1-core`.
    #[error("validated document does not match the playlist model: {0}")]
    ModelMismatch(#[from] serde_json::Error),
}

impl SchemaValidationError {
    /// Issues carried by a `ValidationFailed` error, empty otherwise.
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::ValidationFailed { issues } => issues,
            _ => &[],
        }
    }
}
