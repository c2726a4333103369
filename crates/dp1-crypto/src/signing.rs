//! # Playlist Signing and Verification
//!
//! - **Signing** canonicalizes the playlist with `signature` removed,
//!   digests the canonical bytes with SHA-256, signs the digest with
//!   Ed25519 and formats the result as `ed25519:0x<lowercase hex>`.
//!
//! - **Verification** strips the `ed25519:0x` prefix, hex-decodes the
//!   signature, recomputes the digest over the playlist without its
//!   signature and checks it with the public key.
//!
//! ## Failure Semantics
//!
//! Signing propagates malformed key input as `CryptoError`. Verification
//! never returns an error: a missing signature, undecodable hex, a bad
//! public key or a provider failure all come back as `false`, exactly like
//! a signature that does not match. Callers must not try to tell these
//! apart.
//!
//! ## Wire vs. Typed Input
//!
//! [`Verifier::verify`] works on a typed [`Playlist`], which only carries the
//! fields the DP-1 schema knows. A document signed with extra producer
//! fields must be verified through [`Verifier::verify_value`], which
//! canonicalizes the raw JSON as received.

use dp1_core::{CanonicalBytes, Playlist};
use serde_json::Value;

use crate::error::CryptoError;
use crate::keys::PrivateKey;
use crate::provider::{CryptoProvider, Ed25519Provider};

/// Prefix of the `signature` field.
pub const SIGNATURE_PREFIX: &str = "ed25519:0x";

/// Name of the field excluded from the signing input.
const SIGNATURE_FIELD: &str = "signature";

/// Format raw signature bytes as a `signature` field value.
pub fn format_signature(bytes: &[u8]) -> String {
    format!("{SIGNATURE_PREFIX}{}", hex::encode(bytes))
}

/// Decode a `signature` field value into raw bytes.
///
/// A missing prefix leaves the value as-is before decoding. Undecodable
/// hex yields an empty byte sequence, which deterministically fails
/// verification.
pub fn decode_signature(field: &str) -> Vec<u8> {
    let hex = field.strip_prefix(SIGNATURE_PREFIX).unwrap_or(field);
    hex::decode(hex).unwrap_or_default()
}

/// Canonical signing input for an arbitrary JSON document: the document
/// with its top-level `signature` key removed.
pub fn signing_input_for_value(value: &Value) -> Result<CanonicalBytes, CryptoError> {
    let mut value = value.clone();
    if let Some(obj) = value.as_object_mut() {
        obj.remove(SIGNATURE_FIELD);
    }
    Ok(CanonicalBytes::from_value(&value)?)
}

/// Produces `signature` fields for playlists.
#[derive(Debug, Clone, Default)]
pub struct Signer<P = Ed25519Provider> {
    provider: P,
}

impl<P: CryptoProvider> Signer<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Sign a playlist, returning the `signature` field value.
    ///
    /// Any signature already present on `playlist` is ignored.
    ///
    /// # Errors
    ///
    /// Malformed private key input (odd-length or non-hex string,
    /// undecodable key bytes) and provider failures.
    pub async fn sign(
        &self,
        playlist: &Playlist,
        private_key: impl Into<PrivateKey>,
    ) -> Result<String, CryptoError> {
        let canonical = playlist.signing_input()?;
        self.sign_canonical(&canonical, private_key.into()).await
    }

    /// Sign a playlist and return a new value with `signature` attached.
    pub async fn sign_playlist(
        &self,
        playlist: &Playlist,
        private_key: impl Into<PrivateKey>,
    ) -> Result<Playlist, CryptoError> {
        let signature = self.sign(playlist, private_key).await?;
        Ok(playlist.without_signature().with_signature(signature))
    }

    /// Sign an arbitrary playlist-shaped JSON document.
    pub async fn sign_value(
        &self,
        value: &Value,
        private_key: impl Into<PrivateKey>,
    ) -> Result<String, CryptoError> {
        let canonical = signing_input_for_value(value)?;
        self.sign_canonical(&canonical, private_key.into()).await
    }

    async fn sign_canonical(
        &self,
        canonical: &CanonicalBytes,
        private_key: PrivateKey,
    ) -> Result<String, CryptoError> {
        let digest = self.provider.digest(canonical).await?;
        let material = private_key.to_bytes()?;
        let key = self.provider.import_signing_key(&material).await?;
        let signature = self.provider.sign(&digest, &key).await?;
        tracing::debug!(
            provider = self.provider.provider_name(),
            digest = %digest,
            "signed playlist"
        );
        Ok(format_signature(&signature))
    }
}

/// Checks `signature` fields against a public key.
#[derive(Debug, Clone, Default)]
pub struct Verifier<P = Ed25519Provider> {
    provider: P,
}

impl<P: CryptoProvider> Verifier<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Verify a typed playlist's signature with a raw 32-byte public key.
    pub async fn verify(&self, playlist: &Playlist, public_key: &[u8]) -> bool {
        let Some(field) = playlist.signature.as_deref() else {
            return false;
        };
        let signature = decode_signature(field);
        match playlist.signing_input() {
            Ok(canonical) => self.check(&canonical, &signature, public_key).await,
            Err(e) => {
                tracing::warn!(error = %e, "signature verification failed");
                false
            }
        }
    }

    /// Verify a playlist document exactly as received on the wire.
    pub async fn verify_value(&self, value: &Value, public_key: &[u8]) -> bool {
        let Some(field) = value.get(SIGNATURE_FIELD).and_then(Value::as_str) else {
            return false;
        };
        let signature = decode_signature(field);
        match signing_input_for_value(value) {
            Ok(canonical) => self.check(&canonical, &signature, public_key).await,
            Err(e) => {
                tracing::warn!(error = %e, "signature verification failed");
                false
            }
        }
    }

    async fn check(&self, canonical: &CanonicalBytes, signature: &[u8], public_key: &[u8]) -> bool {
        match self.try_check(canonical, signature, public_key).await {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.provider_name(),
                    error = %e,
                    "signature verification failed"
                );
                false
            }
        }
    }

    async fn try_check(
        &self,
        canonical: &CanonicalBytes,
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<bool, CryptoError> {
        let digest = self.provider.digest(canonical).await?;
        let key = self.provider.import_verifying_key(public_key).await?;
        self.provider.verify(&digest, signature, &key).await
    }
}

/// Sign a playlist with the in-process Ed25519 provider.
pub async fn sign_playlist(
    playlist: &Playlist,
    private_key: impl Into<PrivateKey>,
) -> Result<String, CryptoError> {
    Signer::new(Ed25519Provider).sign(playlist, private_key).await
}

/// Verify a playlist signature with the in-process Ed25519 provider.
pub async fn verify_playlist_signature(playlist: &Playlist, public_key: &[u8]) -> bool {
    Verifier::new(Ed25519Provider).verify(playlist, public_key).await
}
