//! # Validation Issues
//!
//! Validation outcomes are data. A single [`ValidationIssue`] names the
//! failing field by its dotted path (`items.0.provenance.contract`) and
//! carries a human-readable message. Sub-validators return a
//! [`ValidationResult`] that serializes to
//! `{"success":true}` or `{"success":false,"error":{"message":..,"issues":[..]}}`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dotted path to the offending field; empty for the document root.
    pub path: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The same issue with `prefix` prepended to its path.
    pub fn prefixed(self, prefix: &str) -> Self {
        Self {
            path: join_path(prefix, &self.path),
            message: self.message,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// `path: message` pairs separated by `"; "`.
pub fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Join two dotted path segments, skipping empty ones.
pub(crate) fn join_path(base: &str, tail: &str) -> String {
    match (base.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (false, true) => base.to_string(),
        (false, false) => format!("{base}.{tail}"),
    }
}

/// Failure half of a [`ValidationResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Joined issues, or a component-specific fallback when there are none.
    pub message: String,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationFailure {
    /// Build a failure whose message is the joined issues, or `fallback`
    /// when `issues` is empty.
    pub fn from_issues(issues: Vec<ValidationIssue>, fallback: &str) -> Self {
        let joined = join_issues(&issues);
        Self {
            message: if joined.is_empty() {
                fallback.to_string()
            } else {
                joined
            },
            issues,
        }
    }

    /// A failure described only by its message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            issues: Vec::new(),
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationFailure {}

/// Outcome of a sub-validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ValidationFailure>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn invalid(failure: ValidationFailure) -> Self {
        Self {
            success: false,
            error: Some(failure),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.success
    }

    /// Issues of a failed result; empty on success.
    pub fn issues(&self) -> &[ValidationIssue] {
        match &self.error {
            Some(failure) => &failure.issues,
            None => &[],
        }
    }

    /// Convert into a standard `Result`.
    pub fn into_result(self) -> Result<(), ValidationFailure> {
        match self.error {
            Some(failure) if !self.success => Err(failure),
            _ => Ok(()),
        }
    }
}

impl From<Result<(), ValidationFailure>> for ValidationResult {
    fn from(result: Result<(), ValidationFailure>) -> Self {
        match result {
            Ok(()) => Self::valid(),
            Err(failure) => Self::invalid(failure),
        }
    }
}
