//! # dp1-crypto — Playlist Signatures
//!
//! Implements the DP-1 hash-then-sign protocol on top of the canonical form
//! from `dp1-core`:
//!
//! ```text
//! playlist ─▶ strip signature ─▶ CanonicalBytes ─▶ SHA-256 ─▶ Ed25519 ─▶ "ed25519:0x<hex>"
//! ```
//!
//! - [`CryptoProvider`] isolates the hash and signature math behind an
//!   async interface; [`Ed25519Provider`] is the default in-process back-end.
//! - [`Signer`] / [`Verifier`] orchestrate canonicalization and the provider.
//! - [`keys`] decodes hex / PKCS#8 key material and offers a producer-side
//!   [`Ed25519KeyPair`].
//!
//! ## Crate Policy
//!
//! - Depends only on `dp1-core` internally.
//! - No mocking of cryptographic operations in tests. All tests use real
//!   `CanonicalBytes`, real SHA-256, real Ed25519.
//! - Verification never returns an error to its caller.

pub mod error;
pub mod keys;
pub mod provider;
pub mod signing;

pub use error::CryptoError;
pub use keys::{decode_hex_key, Ed25519KeyPair, PrivateKey};
pub use provider::{CryptoProvider, Ed25519Provider};
pub use signing::{
    decode_signature, format_signature, sign_playlist, signing_input_for_value,
    verify_playlist_signature, Signer, Verifier, SIGNATURE_PREFIX,
};
