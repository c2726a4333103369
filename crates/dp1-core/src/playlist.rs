//! # DP-1 Playlist Data Model
//!
//! Typed representation of a DP-1 playlist: an ordered list of display items
//! with optional display preferences, reproducibility metadata and
//! provenance.
//!
//! ## Wire Fidelity
//!
//! Values of this module are what the schema validator hands back after a
//! successful parse, and what the signer canonicalizes. The canonical form of
//! a parsed playlist must equal the canonical form of the JSON it came from,
//! so:
//!
//! - identifiers, timestamps, URIs and hex strings stay `String` (a `Uuid`
//!   would lowercase, a `DateTime` would re-render fractional seconds);
//! - every optional field is skipped when absent rather than written as
//!   `null`;
//! - `override` is an opaque JSON map.
//!
//! Unknown keys are dropped on deserialization, matching the non-strict
//! object semantics of the schema.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::canonical::CanonicalBytes;
use crate::error::CanonicalizationError;

/// Protocol version written by [`Playlist::new`].
pub const DP_VERSION: &str = "1.0.0";

/// Licensing model for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum License {
    Open,
    Token,
    Subscription,
}

/// How an artwork is scaled into the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scaling {
    Fit,
    Fill,
    Stretch,
    Auto,
}

/// Display margin: a bare non-negative number, or a CSS length with one of
/// the `px`, `%`, `vw`, `vh` units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Margin {
    Number(f64),
    Css(String),
}

/// Mouse gestures the artwork is allowed to receive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseInteraction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drag: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover: Option<bool>,
}

/// Input forwarded to the artwork.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    /// Keyboard keys passed through to the artwork.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyboard: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mouse: Option<MouseInteraction>,
}

/// Per-item or playlist-wide display preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayPrefs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaling: Option<Scaling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    /// `#rgb`, `#rrggbb` or `transparent`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,
    #[serde(rename = "loop", default, skip_serializing_if = "Option::is_none")]
    pub loop_playback: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction: Option<Interaction>,
}

/// Reference frame hashes used to check a reproduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameHash {
    /// `0x`-prefixed SHA-256 of the reference frame.
    pub sha256: String,
    /// `0x`-prefixed perceptual hash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phash: Option<String>,
}

/// Reproducibility metadata for generative works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repro {
    /// Rendering engine name to version string.
    #[serde(rename = "engineVersion")]
    pub engine_version: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
    #[serde(rename = "assetsSHA256")]
    pub assets_sha256: Vec<String>,
    #[serde(rename = "frameHash")]
    pub frame_hash: FrameHash,
}

/// Discriminant for where an item's content originates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProvenanceType {
    #[serde(rename = "onChain")]
    OnChain,
    #[serde(rename = "seriesRegistry")]
    SeriesRegistry,
    #[serde(rename = "offChainURI")]
    OffChainUri,
}

impl ProvenanceType {
    /// Returns `true` when the provenance must name a contract.
    pub fn requires_contract(&self) -> bool {
        matches!(self, Self::OnChain | Self::SeriesRegistry)
    }

    /// The wire name of this discriminant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnChain => "onChain",
            Self::SeriesRegistry => "seriesRegistry",
            Self::OffChainUri => "offChainURI",
        }
    }
}

impl std::fmt::Display for ProvenanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Evm,
    Tezos,
    Bitmark,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStandard {
    Erc721,
    Erc1155,
    Fa2,
    Other,
}

/// Series identifier: a `u32`-ranged integer or a free-form string.
///
/// The numeric arm keeps the producer's `serde_json::Number` so that the
/// canonical form reproduces exactly what the producer wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesId {
    Number(serde_json::Number),
    Text(String),
}

impl From<u32> for SeriesId {
    fn from(n: u32) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for SeriesId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// On-chain location of the token or series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub chain: Chain,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<TokenStandard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "seriesId", default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<SeriesId>,
    #[serde(rename = "tokenId", default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(rename = "metaHash", default, skip_serializing_if = "Option::is_none")]
    pub meta_hash: Option<String>,
}

impl Contract {
    /// A contract on `chain` with every optional field unset.
    pub fn new(chain: Chain) -> Self {
        Self {
            chain,
            standard: None,
            address: None,
            series_id: None,
            token_id: None,
            uri: None,
            meta_hash: None,
        }
    }
}

/// Content the item depends on (libraries, referenced works).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub chain: Chain,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<TokenStandard>,
    pub uri: String,
}

/// Where an item's content comes from.
///
/// Which `contract` fields must be present depends on `kind`; those
/// cross-field rules are enforced by the schema validator, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    #[serde(rename = "type")]
    pub kind: ProvenanceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<Contract>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<Dependency>>,
}

/// A single display item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub source: String,
    /// Seconds; at least 1.
    pub duration: f64,
    pub license: License,
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "override", default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayPrefs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repro: Option<Repro>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
    pub created: String,
}

impl PlaylistItem {
    /// Build an item with a fresh v4 id and the current UTC time.
    pub fn new(source: impl Into<String>, duration: f64, license: License) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: None,
            source: source.into(),
            duration,
            license,
            reference: None,
            overrides: None,
            display: None,
            repro: None,
            provenance: None,
            created: timestamp_now(),
        }
    }
}

/// Playlist-wide defaults applied to items that do not override them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayPrefs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// A DP-1 playlist.
///
/// Immutable once validated: [`with_signature`](Self::with_signature) and
/// [`without_signature`](Self::without_signature) produce new values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(rename = "dpVersion")]
    pub dp_version: String,
    pub id: String,
    pub slug: String,
    pub title: String,
    pub created: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<PlaylistDefaults>,
    pub items: Vec<PlaylistItem>,
    /// `ed25519:0x<hex>`; absent until signed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl Playlist {
    /// Build an unsigned playlist with a fresh v4 id, the current UTC time
    /// and [`DP_VERSION`].
    pub fn new(
        title: impl Into<String>,
        slug: impl Into<String>,
        items: Vec<PlaylistItem>,
    ) -> Self {
        Self {
            dp_version: DP_VERSION.to_string(),
            id: uuid::Uuid::new_v4().to_string(),
            slug: slug.into(),
            title: title.into(),
            created: timestamp_now(),
            defaults: None,
            items,
            signature: None,
        }
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// A copy of this playlist with the `signature` field removed.
    pub fn without_signature(&self) -> Self {
        Self {
            signature: None,
            ..self.clone()
        }
    }

    /// This playlist with `signature` attached, replacing any previous one.
    pub fn with_signature(self, signature: impl Into<String>) -> Self {
        Self {
            signature: Some(signature.into()),
            ..self
        }
    }

    /// Compute the canonical signing input for this playlist.
    ///
    /// The signing input is the canonical form of the playlist with the
    /// `signature` field removed, so it is identical before and after
    /// signing.
    pub fn signing_input(&self) -> Result<CanonicalBytes, CanonicalizationError> {
        let mut val = serde_json::to_value(self)?;
        if let Some(obj) = val.as_object_mut() {
            obj.remove("signature");
        }
        CanonicalBytes::from_value(&val)
    }
}

/// Current UTC time as RFC 3339 with millisecond precision and `Z` suffix.
fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
