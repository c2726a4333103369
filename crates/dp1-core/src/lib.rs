//! # dp1-core — Foundational Types for DP-1 Playlists
//!
//! This crate is the leaf of the DP-1 workspace. It defines the playlist
//! data model and the byte-level primitives that signing and verification
//! are built on. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Wire-faithful model.** Identifiers, timestamps and hex digests are
//!    kept as the exact strings the producer wrote. Re-serializing a parsed
//!    playlist must not reformat anything, or signatures produced by other
//!    implementations stop verifying.
//!
//! 2. **`CanonicalBytes` newtype.** ALL digest computation flows through
//!    `CanonicalBytes::new()`, which produces the RFC 8785 form terminated by
//!    a single `\n`. No raw `serde_json::to_vec()` for digests.
//!
//! 3. **`sha256_digest()` accepts only `&CanonicalBytes`.** Compile-time
//!    enforcement that every hash in the signing path covers canonical bytes.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `dp1-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod playlist;

pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, ContentDigest};
pub use error::CanonicalizationError;
pub use playlist::{
    Chain, Contract, Dependency, DisplayPrefs, FrameHash, Interaction, License, Margin,
    MouseInteraction, Playlist, PlaylistDefaults, PlaylistItem, Provenance, ProvenanceType, Repro,
    Scaling, SeriesId, TokenStandard, DP_VERSION,
};
