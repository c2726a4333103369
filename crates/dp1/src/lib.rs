//! # dp1 — DP-1 Playlist Toolkit
//!
//! Single import for producers and consumers of DP-1 playlists.
//!
//! ```text
//! untrusted JSON ─▶ parse_playlist ─▶ Playlist ─▶ sign_playlist / verify_playlist_signature
//! ```
//!
//! - [`parse_playlist`] validates untrusted input and never fails with
//!   anything but a [`ParseError`] value.
//! - [`sign_playlist`] produces an `ed25519:0x<hex>` signature over the
//!   RFC 8785 canonical form of the playlist without its signature.
//! - [`verify_playlist_signature`] answers only `true` or `false`.
//! - The per-component validators (`validate_dp_version`,
//!   `validate_display_prefs`, `validate_repro`, `validate_provenance`,
//!   `validate_playlist_item`) check partial documents.
//!
//! The building blocks live in `dp1-core` (model, canonical form, digest),
//! `dp1-schema` (validation) and `dp1-crypto` (provider, signer, verifier)
//! and are re-exported here.

pub mod parse;

pub use parse::{
    parse_playlist, parse_playlist_str, parse_playlist_with, ParseError, ParseErrorKind,
    ParseResult, INVALID_INPUT_MESSAGE,
};

pub use dp1_core::{
    sha256_digest, CanonicalBytes, CanonicalizationError, Chain, ContentDigest, Contract,
    Dependency, DisplayPrefs, FrameHash, Interaction, License, Margin, MouseInteraction, Playlist,
    PlaylistDefaults, PlaylistItem, Provenance, ProvenanceType, Repro, Scaling, SeriesId,
    TokenStandard, DP_VERSION,
};
pub use dp1_crypto::{
    decode_hex_key, decode_signature, format_signature, sign_playlist, signing_input_for_value,
    verify_playlist_signature, CryptoError, CryptoProvider, Ed25519KeyPair, Ed25519Provider,
    PrivateKey, Signer, Verifier, SIGNATURE_PREFIX,
};
pub use dp1_schema::{
    validate_display_prefs, validate_dp_version, validate_no_protected_fields, validate_playlist,
    validate_playlist_item, validate_provenance, validate_repro, SchemaComponent, SchemaConfig,
    SchemaValidationError, SchemaValidator, ValidationFailure, ValidationIssue, ValidationResult,
    MIN_DP_VERSION,
};
