//! Free-function validators over the default [`SchemaValidator`].
//!
//! Each call builds its own validator; callers validating many documents
//! should hold a [`SchemaValidator`] instead.

use dp1_core::Playlist;
use serde_json::Value;

use crate::config::MIN_DP_VERSION;
use crate::error::SchemaValidationError;
use crate::issue::{ValidationFailure, ValidationResult};
use crate::rules;
use crate::validate::{SchemaComponent, SchemaValidator};

/// `dp_version` is semver (an optional leading `v` is allowed) and at least
/// `1.0.0`.
pub fn validate_dp_version(dp_version: &str) -> ValidationResult {
    rules::check_dp_version(dp_version, &MIN_DP_VERSION)
        .map_err(ValidationFailure::message)
        .into()
}

pub fn validate_display_prefs(input: &Value) -> ValidationResult {
    validate_component(input, SchemaComponent::DisplayPrefs)
}

pub fn validate_repro(input: &Value) -> ValidationResult {
    validate_component(input, SchemaComponent::Repro)
}

/// Shape checks plus the provenance conditionals; issue paths are
/// relative to `input`.
pub fn validate_provenance(input: &Value) -> ValidationResult {
    validate_component(input, SchemaComponent::Provenance)
}

pub fn validate_playlist_item(input: &Value) -> ValidationResult {
    validate_component(input, SchemaComponent::PlaylistItem)
}

/// Validate a whole playlist into its typed form.
pub fn validate_playlist(input: &Value) -> Result<Playlist, SchemaValidationError> {
    SchemaValidator::new()?.validate_playlist(input)
}

fn validate_component(input: &Value, component: SchemaComponent) -> ValidationResult {
    match SchemaValidator::new() {
        Ok(validator) => validator.validate(input, component),
        Err(e) => ValidationResult::invalid(ValidationFailure::message(e.to_string())),
    }
}
