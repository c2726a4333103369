//! # Cryptographic Error Types
//!
//! Structured errors for key import, signing and the crypto provider.
//!
//! These only ever reach callers from the signing path. Verification maps
//! every internal failure to `false`.

use dp1_core::CanonicalizationError;
use thiserror::Error;

/// Errors from cryptographic operations on DP-1 playlists.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Hex key material with an odd number of digits.
    #[error("Invalid hex string: odd length")]
    OddLengthHex,

    /// Hex key material containing non-hex characters.
    #[error("hex decode error: {0}")]
    HexDecode(String),

    /// Private key bytes that are neither a 32-byte seed, a 64-byte
    /// keypair nor a PKCS#8 document.
    #[error("invalid Ed25519 signing key: {0}")]
    InvalidSigningKey(String),

    /// Public key bytes that are not a valid Ed25519 point.
    #[error("invalid Ed25519 public key: {0}")]
    InvalidPublicKey(String),

    /// Signature byte length other than 64.
    #[error("invalid Ed25519 signature length: expected 64 bytes, got {0}")]
    InvalidSignatureLength(usize),

    /// The playlist could not be brought into canonical form.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Failure reported by a crypto provider back-end.
    #[error("crypto provider error: {0}")]
    Provider(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_length_display_is_stable() {
        assert_eq!(
            CryptoError::OddLengthHex.to_string(),
            "Invalid hex string: odd length"
        );
    }

    #[test]
    fn invalid_signature_length_display() {
        let msg = CryptoError::InvalidSignatureLength(32).to_string();
        assert!(msg.contains("64 bytes"));
        assert!(msg.contains("32"));
    }

    #[test]
    fn provider_display() {
        let err = CryptoError::Provider("hsm offline".to_string());
        assert!(err.to_string().contains("hsm offline"));
    }
}
