//! # Parser
//!
//! The entry point consumers call on untrusted input. Every outcome is a
//! value: either the typed [`Playlist`] or a [`ParseError`] whose `type`
//! is `invalid_json` (not an object-shaped document, or an unexpected
//! failure) or `validation_error` (object-shaped but breaking one or more
//! rules, with the issues in `details`).
//!
//! JSON arrays count as object-shaped and therefore reach the validator,
//! which rejects them as a `validation_error`.

use std::fmt;

use dp1_core::Playlist;
use dp1_schema::{join_issues, SchemaValidationError, SchemaValidator, ValidationIssue};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message for input that is not an object or array.
pub const INVALID_INPUT_MESSAGE: &str = "Input must be a valid JSON object";

/// Category of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    InvalidJson,
    ValidationError,
}

impl ParseErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidJson => "invalid_json",
            Self::ValidationError => "validation_error",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a document was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ParseError {
    #[serde(rename = "type")]
    pub kind: ParseErrorKind,
    pub message: String,
    /// Violated rules in discovery order; only for `validation_error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationIssue>>,
}

impl ParseError {
    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self {
            kind: ParseErrorKind::InvalidJson,
            message: message.into(),
            details: None,
        }
    }

    pub fn validation(details: Vec<ValidationIssue>) -> Self {
        Self {
            kind: ParseErrorKind::ValidationError,
            message: join_issues(&details),
            details: Some(details),
        }
    }
}

impl From<SchemaValidationError> for ParseError {
    fn from(err: SchemaValidationError) -> Self {
        match err {
            SchemaValidationError::ValidationFailed { issues } => Self::validation(issues),
            other => Self::invalid_json(other.to_string()),
        }
    }
}

/// Serializable `{playlist}` / `{error}` envelope for a parse outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playlist: Option<Playlist>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ParseError>,
}

impl From<Result<Playlist, ParseError>> for ParseResult {
    fn from(result: Result<Playlist, ParseError>) -> Self {
        match result {
            Ok(playlist) => Self {
                playlist: Some(playlist),
                error: None,
            },
            Err(error) => Self {
                playlist: None,
                error: Some(error),
            },
        }
    }
}

/// Parse and validate an untrusted JSON value.
///
/// Each call loads the embedded schema and compiles a fresh validator.
/// Callers validating many documents should build one [`SchemaValidator`]
/// and pass it to [`parse_playlist_with`].
pub fn parse_playlist(input: &Value) -> Result<Playlist, ParseError> {
    let validator = SchemaValidator::new()?;
    parse_playlist_with(&validator, input)
}

/// [`parse_playlist`] with a caller-supplied validator, reused across calls
/// or configured with a custom minimum `dpVersion`.
pub fn parse_playlist_with(
    validator: &SchemaValidator,
    input: &Value,
) -> Result<Playlist, ParseError> {
    if !matches!(input, Value::Object(_) | Value::Array(_)) {
        return Err(ParseError::invalid_json(INVALID_INPUT_MESSAGE));
    }
    validator.validate_playlist(input).map_err(|err| {
        let err = ParseError::from(err);
        tracing::debug!(
            kind = %err.kind,
            issue_count = err.details.as_ref().map_or(0, Vec::len),
            "playlist rejected"
        );
        err
    })
}

/// Parse JSON text, then validate it.
///
/// Syntax errors are `invalid_json` carrying the JSON parser's message.
pub fn parse_playlist_str(input: &str) -> Result<Playlist, ParseError> {
    let value: Value =
        serde_json::from_str(input).map_err(|e| ParseError::invalid_json(e.to_string()))?;
    parse_playlist(&value)
}
