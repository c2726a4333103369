//! # Canonical Serialization — RFC 8785 Byte Production
//!
//! This module defines `CanonicalBytes`, the sole construction path for bytes
//! that are hashed and signed anywhere in the DP-1 workspace.
//!
//! ## Security Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is through `CanonicalBytes::new()`, which serializes the
//! value through `serde_jcs` and appends the DP-1 line terminator.
//!
//! Any function requiring canonical bytes for a digest must accept
//! `&CanonicalBytes`, so a "wrong serialization path" defect (hashing the
//! producer's pretty-printed JSON, or `serde_json::to_vec()` output with
//! insertion-ordered keys) cannot be written.
//!
//! ## Canonical Form
//!
//! 1. **Sorted keys** at every nesting level.
//! 2. **No insignificant whitespace**: compact separators.
//! 3. **ECMAScript number formatting**: `300.0` becomes `300`, `1.5` stays
//!    `1.5`, shortest round-trippable representation. Integers beyond
//!    +/-2^53 are rounded to the nearest double first.
//! 4. **Single trailing `\n`**, appended after the JCS text.
//!
//! Two values that are logically equal produce byte-identical output,
//! regardless of the key order or formatting they were parsed from.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Line terminator appended to every canonical form.
const CANONICAL_TERMINATOR: char = '\n';

/// Bytes produced exclusively by RFC 8785 canonicalization, terminated by
/// a single line feed.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - Object keys are sorted, separators are compact, numbers use the
///   RFC 8785 number-to-string algorithm.
/// - The byte sequence is valid UTF-8 and ends with exactly one `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::SerializationFailed` if the value has
    /// no JSON representation.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        Self::from_value(&value)
    }

    /// Construct canonical bytes from an already-built JSON value.
    pub fn from_value(value: &Value) -> Result<Self, CanonicalizationError> {
        let value = coerce_json_numbers(value);
        let mut text = serde_jcs::to_string(&value)?;
        if !text.ends_with(CANONICAL_TERMINATOR) {
            text.push(CANONICAL_TERMINATOR);
        }
        Ok(Self(text.into_bytes()))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The canonical form as text.
    pub fn as_str(&self) -> &str {
        // Built from a `String` in `from_value`; never mutated afterwards.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for CanonicalBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Largest magnitude at which every integer is an exact IEEE-754 double.
const MAX_SAFE_INTEGER: u64 = 1 << 53;

/// Rewrite integers beyond +/-2^53 as doubles.
///
/// RFC 8785 renders every number as an IEEE-754 double, so
/// `9007199254740993` must canonicalize as `9007199254740992`.
/// `serde_json` keeps such integers exact, which `serde_jcs` would then
/// print verbatim.
fn coerce_json_numbers(value: &Value) -> Value {
    match value {
        Value::Number(n) => {
            let beyond_safe = match (n.as_u64(), n.as_i64()) {
                (Some(u), _) => u > MAX_SAFE_INTEGER,
                (None, Some(i)) => i.unsigned_abs() > MAX_SAFE_INTEGER,
                (None, None) => false,
            };
            match n.as_f64().and_then(serde_json::Number::from_f64) {
                Some(double) if beyond_safe => Value::Number(double),
                _ => value.clone(),
            }
        }
        Value::Array(items) => Value::Array(items.iter().map(coerce_json_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), coerce_json_numbers(v)))
                .collect(),
        ),
        Value::Null | Value::Bool(_) | Value::String(_) => value.clone(),
    }
}
