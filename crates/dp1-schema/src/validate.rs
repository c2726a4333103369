//! # Schema Validation
//!
//! Runtime validation of DP-1 documents against the embedded JSON Schema
//! (Draft 2020-12), followed by the cross-field rules in [`crate::rules`].
//!
//! ## Two Passes
//!
//! 1. **Shape**: the `jsonschema` crate checks types, presence, patterns,
//!    lengths, bounds, enums and the `uuid` format. Timestamps must be UTC
//!    with a `Z` suffix. Each error becomes a [`ValidationIssue`] keyed by
//!    dotted path.
//! 2. **Rules**: `dpVersion` policy and provenance conditionals. A rule
//!    only runs on a sub-tree that produced no shape issue, so rule issues
//!    never duplicate or contradict shape issues.
//!
//! ## Components
//!
//! Every `$defs` entry the public API exposes ([`SchemaComponent`]) can be
//! validated on its own. The sub-schema is the component's `$ref` wrapped
//! around the full `$defs` table, so nested references still resolve.
//!
//! Validators are compiled per call. Nothing is cached between calls.

use dp1_core::{Playlist, Provenance};
use jsonschema::error::ValidationErrorKind;
use jsonschema::{ValidationError, Validator};
use serde_json::{json, Value};

use crate::config::SchemaConfig;
use crate::error::SchemaValidationError;
use crate::issue::{join_path, ValidationFailure, ValidationIssue, ValidationResult};
use crate::rules;

/// The DP-1 playlist schema, embedded at compile time.
pub const PLAYLIST_SCHEMA: &str = include_str!("../schemas/dp1-playlist.schema.json");

const PLAYLIST_SCHEMA_NAME: &str = "dp1-playlist.schema.json";
const DRAFT_2020_12: &str = "https://json-schema.org/draft/2020-12/schema";

/// A validatable part of a DP-1 document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaComponent {
    Playlist,
    PlaylistItem,
    DisplayPrefs,
    Repro,
    Provenance,
}

impl SchemaComponent {
    /// Name of the component's entry under `$defs`.
    pub fn definition(&self) -> &'static str {
        match self {
            Self::Playlist => "Playlist",
            Self::PlaylistItem => "PlaylistItem",
            Self::DisplayPrefs => "DisplayPrefs",
            Self::Repro => "Repro",
            Self::Provenance => "Provenance",
        }
    }

    /// Failure message used when a rejection carries no issues.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::Playlist => "Invalid playlist",
            Self::PlaylistItem => "Invalid item in playlist",
            Self::DisplayPrefs => "Invalid display preferences",
            Self::Repro => "Invalid reproduction metadata",
            Self::Provenance => "Invalid provenance",
        }
    }
}

/// Validator for DP-1 documents and their components.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    schema: Value,
    config: SchemaConfig,
}

impl SchemaValidator {
    /// Validator with the default configuration.
    ///
    /// # Errors
    ///
    /// Only if the embedded schema is not valid JSON.
    pub fn new() -> Result<Self, SchemaValidationError> {
        Self::with_config(SchemaConfig::default())
    }

    /// Validator with an explicit configuration.
    pub fn with_config(config: SchemaConfig) -> Result<Self, SchemaValidationError> {
        let schema = serde_json::from_str(PLAYLIST_SCHEMA).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: PLAYLIST_SCHEMA_NAME.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self { schema, config })
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// The parsed playlist schema document.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Compile the validator for one component.
    pub fn build_validator(
        &self,
        component: SchemaComponent,
    ) -> Result<Validator, SchemaValidationError> {
        let schema = match component {
            SchemaComponent::Playlist => self.schema.clone(),
            other => json!({
                "$schema": DRAFT_2020_12,
                "$defs": self.schema.get("$defs").cloned().unwrap_or(Value::Null),
                "$ref": format!("#/$defs/{}", other.definition()),
            }),
        };

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        opts.should_validate_formats(true);
        opts.build(&schema)
            .map_err(|e| SchemaValidationError::ValidatorBuildError {
                schema_name: component.definition().to_string(),
                reason: e.to_string(),
            })
    }

    /// Every issue `instance` raises as `component`, shape issues first.
    pub fn collect_issues(
        &self,
        instance: &Value,
        component: SchemaComponent,
    ) -> Result<Vec<ValidationIssue>, SchemaValidationError> {
        let validator = self.build_validator(component)?;
        let mut issues: Vec<ValidationIssue> =
            validator.iter_errors(instance).map(|e| shape_issue(&e)).collect();
        let rule_issues = self.rule_issues(instance, component, &issues);
        issues.extend(rule_issues);
        Ok(issues)
    }

    /// Validate a whole playlist into its typed form.
    ///
    /// # Errors
    ///
    /// `ValidationFailed` with every issue found, or a build/model error
    /// if the embedded schema itself is broken.
    pub fn validate_playlist(&self, instance: &Value) -> Result<Playlist, SchemaValidationError> {
        let issues = self.collect_issues(instance, SchemaComponent::Playlist)?;
        if !issues.is_empty() {
            tracing::debug!(issue_count = issues.len(), "playlist failed validation");
            return Err(SchemaValidationError::ValidationFailed { issues });
        }
        Ok(serde_json::from_value(instance.clone())?)
    }

    /// Validate `instance` as `component`.
    ///
    /// Never fails outward: a broken validator is reported as a failure
    /// carrying the build error's message.
    pub fn validate(&self, instance: &Value, component: SchemaComponent) -> ValidationResult {
        match self.collect_issues(instance, component) {
            Ok(issues) if issues.is_empty() => ValidationResult::valid(),
            Ok(issues) => ValidationResult::invalid(ValidationFailure::from_issues(
                issues,
                component.fallback_message(),
            )),
            Err(e) => ValidationResult::invalid(ValidationFailure::message(e.to_string())),
        }
    }

    /// Check a `dpVersion` string against the configured minimum.
    pub fn validate_dp_version(&self, dp_version: &str) -> ValidationResult {
        rules::check_dp_version(dp_version, &self.config.min_dp_version)
            .map_err(ValidationFailure::message)
            .into()
    }

    fn rule_issues(
        &self,
        instance: &Value,
        component: SchemaComponent,
        shape: &[ValidationIssue],
    ) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        match component {
            SchemaComponent::Playlist => {
                if let Some(version) = instance.get("dpVersion").and_then(Value::as_str) {
                    if !touches(shape, "dpVersion") {
                        if let Err(message) =
                            rules::check_dp_version(version, &self.config.min_dp_version)
                        {
                            issues.push(ValidationIssue::new("dpVersion", message));
                        }
                    }
                }
                if let Some(items) = instance.get("items").and_then(Value::as_array) {
                    for (i, item) in items.iter().enumerate() {
                        if let Some(provenance) = item.get("provenance") {
                            let base = format!("items.{i}.provenance");
                            issues.extend(provenance_issues(provenance, &base, shape));
                        }
                    }
                }
            }
            SchemaComponent::PlaylistItem => {
                if let Some(provenance) = instance.get("provenance") {
                    issues.extend(provenance_issues(provenance, "provenance", shape));
                }
            }
            SchemaComponent::Provenance => {
                issues.extend(provenance_issues(instance, "", shape));
            }
            SchemaComponent::DisplayPrefs | SchemaComponent::Repro => {}
        }
        issues
    }
}

fn provenance_issues(value: &Value, base: &str, shape: &[ValidationIssue]) -> Vec<ValidationIssue> {
    if touches(shape, base) {
        return Vec::new();
    }
    match serde_json::from_value::<Provenance>(value.clone()) {
        Ok(provenance) => rules::check_provenance(&provenance)
            .into_iter()
            .map(|issue| issue.prefixed(base))
            .collect(),
        Err(e) => {
            tracing::warn!(path = base, error = %e, "shape-valid provenance did not deserialize");
            Vec::new()
        }
    }
}

/// Whether any shape issue lies at or below `base`.
fn touches(shape: &[ValidationIssue], base: &str) -> bool {
    if base.is_empty() {
        return !shape.is_empty();
    }
    let nested = format!("{base}.");
    shape
        .iter()
        .any(|issue| issue.path == base || issue.path.starts_with(&nested))
}

/// Map a `jsonschema` error onto the issue format consumers expect.
fn shape_issue(error: &ValidationError<'_>) -> ValidationIssue {
    let path = pointer_to_path(&error.instance_path.to_string());
    match &error.kind {
        ValidationErrorKind::Required { property, .. } => {
            let name = property
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| property.to_string());
            ValidationIssue::new(join_path(&path, &name), "Required")
        }
        ValidationErrorKind::MinItems { limit, .. } => {
            ValidationIssue::new(path, format!("Array must contain at least {limit} element(s)"))
        }
        ValidationErrorKind::MaxItems { limit, .. } => {
            ValidationIssue::new(path, format!("Array must contain at most {limit} element(s)"))
        }
        _ => ValidationIssue::new(path, error.to_string()),
    }
}

/// `/items/0/provenance` -> `items.0.provenance`.
fn pointer_to_path(pointer: &str) -> String {
    pointer
        .split('/')
        .skip(1)
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::Version;

    fn validator() -> SchemaValidator {
        SchemaValidator::new().unwrap()
    }

    fn item() -> Value {
        json!({
            "id": "385f79b6-a45f-4c1c-8080-e93a192adccc",
            "source": "https://example.com/art.html",
            "duration": 300,
            "license": "open",
            "created": "2025-01-01T00:00:00Z"
        })
    }

    fn playlist() -> Value {
        json!({
            "dpVersion": "1.0.0",
            "id": "385f79b6-a45f-4c1c-8080-e93a192adccd",
            "slug": "test-playlist",
            "title": "Test Playlist",
            "created": "2025-01-01T00:00:00Z",
            "items": [item()]
        })
    }

    fn paths(issues: &[ValidationIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.path.as_str()).collect()
    }

    #[test]
    fn embedded_schema_loads_and_every_component_builds() {
        let v = validator();
        for component in [
            SchemaComponent::Playlist,
            SchemaComponent::PlaylistItem,
            SchemaComponent::DisplayPrefs,
            SchemaComponent::Repro,
            SchemaComponent::Provenance,
        ] {
            v.build_validator(component).unwrap();
        }
    }

    #[test]
    fn pointer_conversion() {
        assert_eq!(pointer_to_path(""), "");
        assert_eq!(pointer_to_path("/items/0/provenance"), "items.0.provenance");
        assert_eq!(pointer_to_path("/engineVersion/a~1b"), "engineVersion.a/b");
    }

    #[test]
    fn valid_playlist_is_typed() {
        let pl = validator().validate_playlist(&playlist()).unwrap();
        assert_eq!(pl.slug, "test-playlist");
        assert_eq!(pl.items.len(), 1);
    }

    #[test]
    fn missing_fields_are_reported_at_their_own_path() {
        let issues = validator()
            .collect_issues(&json!({"title": "x"}), SchemaComponent::Playlist)
            .unwrap();
        for field in ["dpVersion", "id", "slug", "created", "items"] {
            let issue = issues.iter().find(|i| i.path == field).unwrap();
            assert_eq!(issue.message, "Required");
        }
    }

    #[test]
    fn empty_items_rejected() {
        let mut doc = playlist();
        doc["items"] = json!([]);
        let issues = validator()
            .collect_issues(&doc, SchemaComponent::Playlist)
            .unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "items");
        assert_eq!(issues[0].message, "Array must contain at least 1 element(s)");
    }

    #[test]
    fn nested_paths_are_dotted() {
        let mut doc = playlist();
        doc["items"][0]["duration"] = json!(0);
        let issues = validator()
            .collect_issues(&doc, SchemaComponent::Playlist)
            .unwrap();
        assert_eq!(paths(&issues), ["items.0.duration"]);
    }

    #[test]
    fn bad_slug_and_signature() {
        let mut doc = playlist();
        doc["slug"] = json!("has spaces");
        doc["signature"] = json!("rsa:0xabc");
        let issues = validator()
            .collect_issues(&doc, SchemaComponent::Playlist)
            .unwrap();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|i| i.path == "slug"));
        assert!(issues.iter().any(|i| i.path == "signature"));
    }

    #[test]
    fn formats_are_checked() {
        let mut doc = playlist();
        doc["id"] = json!("not-a-uuid");
        doc["created"] = json!("yesterday");
        let issues = validator()
            .collect_issues(&doc, SchemaComponent::Playlist)
            .unwrap();
        assert!(issues.iter().any(|i| i.path == "id"));
        assert!(issues.iter().any(|i| i.path == "created"));
    }

    #[test]
    fn timestamps_are_utc_only() {
        let v = validator();
        for bad in [
            "2024-01-15T14:30:00+01:00",
            "2024-01-15t14:30:00z",
            "2024-01-15 14:30:00Z",
        ] {
            let mut doc = playlist();
            doc["items"][0]["created"] = json!(bad);
            let issues = v.collect_issues(&doc, SchemaComponent::Playlist).unwrap();
            assert_eq!(paths(&issues), ["items.0.created"], "{bad}");
        }
        for good in ["2024-01-15T14:30:00Z", "2024-01-15T14:30:00.123456Z"] {
            let mut doc = playlist();
            doc["created"] = json!(good);
            let issues = v.collect_issues(&doc, SchemaComponent::Playlist).unwrap();
            assert!(issues.is_empty(), "{good}: {issues:?}");
        }
    }

    #[test]
    fn dp_version_rule_runs_after_shape() {
        let mut doc = playlist();
        doc["dpVersion"] = json!("0.9.0");
        let issues = validator()
            .collect_issues(&doc, SchemaComponent::Playlist)
            .unwrap();
        assert_eq!(paths(&issues), ["dpVersion"]);
        assert!(issues[0].message.contains("is below minimum required version"));

        doc["dpVersion"] = json!(1);
        let issues = validator()
            .collect_issues(&doc, SchemaComponent::Playlist)
            .unwrap();
        assert_eq!(issues.len(), 1, "type error only, no rule issue: {issues:?}");
    }

    #[test]
    fn configured_minimum_is_honoured() {
        let v = SchemaValidator::with_config(SchemaConfig::with_min_dp_version(Version::new(1, 1, 0)))
            .unwrap();
        assert!(!v.validate_dp_version("1.0.0").is_valid());
        assert!(v.validate_dp_version("1.1.0").is_valid());
        assert!(v.validate_playlist(&playlist()).is_err());
    }

    #[test]
    fn provenance_rules_are_prefixed_in_playlists() {
        let mut doc = playlist();
        doc["items"][0]["provenance"] = json!({"type": "offChainURI", "contract": {"chain": "evm"}});
        let err = validator().validate_playlist(&doc).unwrap_err();
        assert_eq!(paths(err.issues()), ["items.0.provenance.contract"]);
    }

    #[test]
    fn provenance_rules_skip_shape_invalid_blocks() {
        let v = validator();
        let issues = v
            .collect_issues(&json!({"type": "onChain", "contract": {"chain": "solana"}}), SchemaComponent::Provenance)
            .unwrap();
        assert_eq!(paths(&issues), ["contract.chain"]);
    }

    #[test]
    fn provenance_component_uses_relative_paths() {
        let result = validator().validate(&json!({"type": "onChain"}), SchemaComponent::Provenance);
        assert!(!result.is_valid());
        assert_eq!(result.issues()[0].path, "contract");
        assert_eq!(
            result.issues()[0].message,
            "contract is required when provenance on chain or in series registry"
        );
    }

    #[test]
    fn item_component_checks_nested_provenance() {
        let mut doc = item();
        doc["provenance"] = json!({"type": "seriesRegistry", "contract": {"chain": "evm", "address": "0xabc"}});
        let result = validator().validate(&doc, SchemaComponent::PlaylistItem);
        assert_eq!(paths(result.issues()), ["provenance.contract.seriesId"]);
    }

    #[test]
    fn failure_message_joins_issues() {
        let result = validator().validate(
            &json!({"scaling": "zoom", "background": "red"}),
            SchemaComponent::DisplayPrefs,
        );
        let failure = result.error.unwrap();
        assert_eq!(failure.issues.len(), 2);
        assert!(failure.message.contains("; "));
        assert!(failure.message.contains("background: "));
        assert!(failure.message.contains("scaling: "));
    }

    #[test]
    fn unknown_keys_are_accepted() {
        let mut doc = playlist();
        doc["extra"] = json!({"anything": true});
        assert!(validator().validate_playlist(&doc).is_ok());
    }
}
