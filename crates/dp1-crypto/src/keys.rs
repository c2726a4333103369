//! # Key Material
//!
//! Decoding and import of Ed25519 keys supplied by playlist producers and
//! consumers.
//!
//! Private keys arrive either as raw bytes or as a hex string with an
//! optional `0x` prefix. The decoded bytes may be:
//!
//! - a 32-byte Ed25519 seed,
//! - a 64-byte `seed || public key` keypair,
//! - a PKCS#8 DER document (what WebCrypto-based producers export).
//!
//! Public keys are raw 32-byte Ed25519 points.
//!
//! ## Security Invariants
//!
//! - `PrivateKey` and `Ed25519KeyPair` redact their key material in `Debug`.
//! - Neither type implements `Serialize`.

use ed25519_dalek::pkcs8::DecodePrivateKey;
use ed25519_dalek::{SigningKey, VerifyingKey};

use crate::error::CryptoError;

/// Private key input accepted by the signer.
#[derive(Clone)]
pub enum PrivateKey {
    /// Raw key bytes.
    Bytes(Vec<u8>),
    /// Hex-encoded key bytes, optionally `0x`-prefixed.
    Hex(String),
}

impl PrivateKey {
    /// Decode into raw key bytes.
    ///
    /// # Errors
    ///
    /// Hex input with an odd number of digits or non-hex characters.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CryptoError> {
        match self {
            Self::Bytes(bytes) => Ok(bytes.clone()),
            Self::Hex(hex) => decode_hex_key(hex),
        }
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bytes(_) => write!(f, "PrivateKey::Bytes(<private>)"),
            Self::Hex(_) => write!(f, "PrivateKey::Hex(<private>)"),
        }
    }
}

impl From<Vec<u8>> for PrivateKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for PrivateKey {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<[u8; 32]> for PrivateKey {
    fn from(seed: [u8; 32]) -> Self {
        Self::Bytes(seed.to_vec())
    }
}

impl From<&str> for PrivateKey {
    fn from(hex: &str) -> Self {
        Self::Hex(hex.to_string())
    }
}

impl From<String> for PrivateKey {
    fn from(hex: String) -> Self {
        Self::Hex(hex)
    }
}

/// Decode hex key material, stripping one leading `0x`.
///
/// # Errors
///
/// `CryptoError::OddLengthHex` if the remaining digits are odd in number,
/// `CryptoError::HexDecode` on any non-hex character.
pub fn decode_hex_key(hex: &str) -> Result<Vec<u8>, CryptoError> {
    let clean = hex.strip_prefix("0x").unwrap_or(hex);
    if clean.len() % 2 != 0 {
        return Err(CryptoError::OddLengthHex);
    }
    hex::decode(clean).map_err(|e| CryptoError::HexDecode(e.to_string()))
}

/// Import an Ed25519 signing key from seed, keypair or PKCS#8 DER bytes.
pub fn import_signing_key(material: &[u8]) -> Result<SigningKey, CryptoError> {
    if let Ok(seed) = <[u8; 32]>::try_from(material) {
        return Ok(SigningKey::from_bytes(&seed));
    }
    if let Ok(keypair) = <[u8; 64]>::try_from(material) {
        return SigningKey::from_keypair_bytes(&keypair)
            .map_err(|e| CryptoError::InvalidSigningKey(format!("keypair bytes: {e}")));
    }
    SigningKey::from_pkcs8_der(material)
        .map_err(|e| CryptoError::InvalidSigningKey(format!("pkcs8: {e}")))
}

/// Import an Ed25519 verifying key from its raw 32-byte encoding.
pub fn import_verifying_key(material: &[u8]) -> Result<VerifyingKey, CryptoError> {
    let bytes = <[u8; 32]>::try_from(material).map_err(|_| {
        CryptoError::InvalidPublicKey(format!(
            "expected 32 bytes, got {}",
            material.len()
        ))
    })?;
    VerifyingKey::from_bytes(&bytes).map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
}

/// An Ed25519 key pair for producers.
///
/// Does not implement `Serialize`. The private seed is reachable only
/// through [`Ed25519KeyPair::secret_seed`].
pub struct Ed25519KeyPair {
    signing_key: SigningKey,
}

impl Ed25519KeyPair {
    /// Generate a new random key pair from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self {
            signing_key: SigningKey::generate(&mut csprng),
        }
    }

    /// Create a key pair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Raw 32-byte public key, the form [`crate::Verifier`] accepts.
    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Raw 32-byte private seed, the form [`crate::Signer`] accepts.
    pub fn secret_seed(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    /// The seed wrapped as signer input.
    pub fn private_key(&self) -> PrivateKey {
        PrivateKey::from(self.secret_seed())
    }
}

impl std::fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519KeyPair(<private>)")
    }
}
