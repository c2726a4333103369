//! # Crypto Provider Abstraction
//!
//! The signer and verifier never touch hash or signature math directly.
//! They call a [`CryptoProvider`], which exposes the four operations of the
//! DP-1 hash-then-sign scheme:
//!
//! - `digest`: SHA-256 over canonical bytes,
//! - `import_signing_key` / `import_verifying_key`: turn key material into
//!   provider-specific key handles,
//! - `sign`: Ed25519 over a digest,
//! - `verify`: Ed25519 verification over a digest.
//!
//! [`Ed25519Provider`] is the in-process back-end built on `sha2` and
//! `ed25519-dalek`. Hardware-backed or remote back-ends implement the same
//! trait with their own key handle types; nothing in validation or
//! canonicalization changes.
//!
//! All operations are `async` so that back-ends that suspend (HSM, KMS,
//! WebCrypto bridges) fit the same interface. The in-process provider never
//! suspends.

use async_trait::async_trait;
use dp1_core::{sha256_digest, CanonicalBytes, ContentDigest};
use ed25519_dalek::{Signer as _, Verifier as _};

use crate::error::CryptoError;
use crate::keys;

/// Hashing and signature service used by [`crate::Signer`] and
/// [`crate::Verifier`].
///
/// Implementations must be `Send + Sync` so a single provider can be
/// shared across concurrent sign/verify calls.
#[async_trait]
pub trait CryptoProvider: Send + Sync {
    /// Provider-specific handle for a private key.
    type SigningKey: Send + Sync;
    /// Provider-specific handle for a public key.
    type VerifyingKey: Send + Sync;

    /// SHA-256 over canonical bytes.
    async fn digest(&self, data: &CanonicalBytes) -> Result<ContentDigest, CryptoError>;

    /// Import private key material (seed, keypair or PKCS#8 DER).
    async fn import_signing_key(&self, material: &[u8])
        -> Result<Self::SigningKey, CryptoError>;

    /// Import a raw public key.
    async fn import_verifying_key(
        &self,
        material: &[u8],
    ) -> Result<Self::VerifyingKey, CryptoError>;

    /// Ed25519-sign a digest, returning the raw signature bytes.
    async fn sign(
        &self,
        digest: &ContentDigest,
        key: &Self::SigningKey,
    ) -> Result<Vec<u8>, CryptoError>;

    /// Check raw signature bytes against a digest.
    ///
    /// `Ok(false)` means the signature does not match; `Err` means the
    /// check could not be performed.
    async fn verify(
        &self,
        digest: &ContentDigest,
        signature: &[u8],
        key: &Self::VerifyingKey,
    ) -> Result<bool, CryptoError>;

    /// Human-readable name for this provider (for diagnostics/logging).
    fn provider_name(&self) -> &str;
}

/// In-process SHA-256 + Ed25519 provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Provider;

#[async_trait]
impl CryptoProvider for Ed25519Provider {
    type SigningKey = ed25519_dalek::SigningKey;
    type VerifyingKey = ed25519_dalek::VerifyingKey;

    async fn digest(&self, data: &CanonicalBytes) -> Result<ContentDigest, CryptoError> {
        Ok(sha256_digest(data))
    }

    async fn import_signing_key(
        &self,
        material: &[u8],
    ) -> Result<Self::SigningKey, CryptoError> {
        keys::import_signing_key(material)
    }

    async fn import_verifying_key(
        &self,
        material: &[u8],
    ) -> Result<Self::VerifyingKey, CryptoError> {
        keys::import_verifying_key(material)
    }

    async fn sign(
        &self,
        digest: &ContentDigest,
        key: &Self::SigningKey,
    ) -> Result<Vec<u8>, CryptoError> {
        Ok(key.sign(digest.as_bytes()).to_bytes().to_vec())
    }

    async fn verify(
        &self,
        digest: &ContentDigest,
        signature: &[u8],
        key: &Self::VerifyingKey,
    ) -> Result<bool, CryptoError> {
        let bytes = <[u8; 64]>::try_from(signature)
            .map_err(|_| CryptoError::InvalidSignatureLength(signature.len()))?;
        let sig = ed25519_dalek::Signature::from_bytes(&bytes);
        Ok(key.verify(digest.as_bytes(), &sig).is_ok())
    }

    fn provider_name(&self) -> &str {
        "Ed25519Provider"
    }
}
