//! # Validator Configuration
//!
//! The minimum accepted `dpVersion` is configuration, not global state.
//! Embedding services can deserialize a [`SchemaConfig`] from their own
//! settings and hand it to [`crate::SchemaValidator::with_config`].

use semver::Version;
use serde::{Deserialize, Serialize};

/// Oldest protocol version accepted by default.
pub const MIN_DP_VERSION: Version = Version::new(1, 0, 0);

/// Settings for [`crate::SchemaValidator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaConfig {
    /// Documents declaring a lower `dpVersion` are rejected.
    pub min_dp_version: Version,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            min_dp_version: MIN_DP_VERSION,
        }
    }
}

impl SchemaConfig {
    /// Config with a different minimum version.
    pub fn with_min_dp_version(min_dp_version: Version) -> Self {
        Self { min_dp_version }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_minimum_is_one_zero_zero() {
        assert_eq!(SchemaConfig::default().min_dp_version.to_string(), "1.0.0");
    }

    #[test]
    fn deserializes_from_camel_case() {
        let cfg: SchemaConfig =
            serde_json::from_value(serde_json::json!({"minDpVersion": "1.2.0"})).unwrap();
        assert_eq!(cfg.min_dp_version, Version::new(1, 2, 0));
    }

    #[test]
    fn missing_fields_fall_back_to_default() {
        let cfg: SchemaConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(cfg, SchemaConfig::default());
    }
}
