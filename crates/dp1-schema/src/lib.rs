//! # dp1-schema — Playlist Validation
//!
//! Decides whether an arbitrary JSON value is a well-formed DP-1 playlist
//! (or one of its components) and reports every violated rule as a
//! path-qualified [`ValidationIssue`].
//!
//! - `schemas/dp1-playlist.schema.json` holds the declarative field
//!   constraints (Draft 2020-12), embedded at compile time.
//! - [`SchemaValidator`] runs the shape pass through `jsonschema` and then
//!   the cross-field rules in [`rules`].
//! - [`validators`] exposes one free function per component for callers
//!   that validate partial documents.
//!
//! ## Crate Policy
//!
//! - Depends only on `dp1-core` internally.
//! - Document failures are data. `SchemaValidationError` is returned only
//!   by the typed `validate_playlist` entry point or when the embedded
//!   schema itself is broken.

pub mod config;
pub mod error;
pub mod issue;
pub mod rules;
pub mod validate;
pub mod validators;

pub use config::{SchemaConfig, MIN_DP_VERSION};
pub use error::SchemaValidationError;
pub use issue::{join_issues, ValidationFailure, ValidationIssue, ValidationResult};
pub use rules::{validate_no_protected_fields, PROTECTED_FIELDS};
pub use validate::{SchemaComponent, SchemaValidator, PLAYLIST_SCHEMA};
pub use validators::{
    validate_display_prefs, validate_dp_version, validate_playlist, validate_playlist_item,
    validate_provenance, validate_repro,
};
