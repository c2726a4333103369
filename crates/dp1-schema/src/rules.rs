//! # Cross-Field Rules
//!
//! Checks that JSON Schema cannot express cleanly and that run after the
//! shape pass has accepted the relevant sub-tree:
//!
//! - `dpVersion` must be semver and not older than the configured minimum.
//!   Surrounding whitespace and one leading `v` are ignored.
//! - Provenance of type `onChain` / `seriesRegistry` needs a contract with
//!   an address (plus `tokenId` / `seriesId` respectively); `offChainURI`
//!   provenance must not carry a contract.
//!
//! Every rule is evaluated; none short-circuits another. Issue paths are
//! relative to the checked value, callers prefix them with its location.

use dp1_core::{Provenance, ProvenanceType};
use semver::Version;
use serde_json::Value;

use crate::issue::ValidationIssue;

/// Fields assigned by the server that an update body must not carry.
pub const PROTECTED_FIELDS: [&str; 4] = ["id", "slug", "created", "signature"];

/// Check `dp_version` against `min`, returning the failure message.
pub fn check_dp_version(dp_version: &str, min: &Version) -> Result<(), String> {
    let trimmed = dp_version.trim();
    let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
    let version = Version::parse(bare)
        .map_err(|_| format!("Invalid semantic version format: {dp_version}"))?;
    if version < *min {
        return Err(format!(
            "dpVersion {dp_version} is below minimum required version {min}"
        ));
    }
    Ok(())
}

/// Conditional contract requirements for a shape-valid provenance block.
pub fn check_provenance(provenance: &Provenance) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let contract = provenance.contract.as_ref();

    if provenance.kind.requires_contract() {
        if contract.is_none() {
            issues.push(ValidationIssue::new(
                "contract",
                "contract is required when provenance on chain or in series registry",
            ));
        }
        if contract.and_then(|c| c.address.as_ref()).is_none() {
            issues.push(ValidationIssue::new(
                "contract.address",
                "contract.address is required for onChain or seriesRegistry provenance",
            ));
        }
    }

    match provenance.kind {
        ProvenanceType::OnChain if contract.and_then(|c| c.token_id.as_ref()).is_none() => {
            issues.push(ValidationIssue::new(
                "contract.tokenId",
                "contract.tokenId is required when provenance type is onChain",
            ));
        }
        ProvenanceType::SeriesRegistry if contract.and_then(|c| c.series_id.as_ref()).is_none() => {
            issues.push(ValidationIssue::new(
                "contract.seriesId",
                "contract.seriesId is required when provenance type is seriesRegistry",
            ));
        }
        ProvenanceType::OffChainUri if contract.is_some() => {
            issues.push(ValidationIssue::new(
                "contract",
                "contract is not allowed when provenance is off chain URI",
            ));
        }
        _ => {}
    }

    issues
}

/// Report which protected fields an update body carries.
///
/// Non-object bodies carry no fields and pass.
pub fn validate_no_protected_fields(body: &Value) -> Result<(), Vec<String>> {
    let Some(object) = body.as_object() else {
        return Ok(());
    };
    let present: Vec<String> = PROTECTED_FIELDS
        .iter()
        .filter(|field| object.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    if present.is_empty() {
        Ok(())
    } else {
        Err(present)
    }
}
