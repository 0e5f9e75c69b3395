//! Key material derivation.
//!
//! The host hands the codec a key as either an `x'..'` blob literal or an
//! arbitrary passphrase. Both forms reduce to exactly [`KEY_SIZE`] bytes of
//! key material; a literal of the wrong length is an error, never a silent
//! truncation.

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CodecError, CodecResult};

/// Cipher key length in bytes (AES-256).
pub const KEY_SIZE: usize = 32;

/// Two-character prefix marking a hex blob key literal.
const HEX_PREFIX: &str = "x'";

/// Symmetric key material for the page cipher.
///
/// Owned by the codec context for the lifetime of the attached file and
/// zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    bytes: [u8; KEY_SIZE],
}

impl KeyMaterial {
    /// Derives key material from caller key input.
    ///
    /// Input starting with `x'` (case-insensitive) is treated as a hex
    /// blob literal; anything else is a passphrase.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EmptyKey`] for empty input, or the underlying
    /// error from [`from_hex_literal`](Self::from_hex_literal) /
    /// [`from_passphrase`](Self::from_passphrase).
    pub fn from_input(input: &str) -> CodecResult<Self> {
        if input.is_empty() {
            return Err(CodecError::EmptyKey);
        }
        if has_hex_prefix(input) {
            Self::from_hex_literal(input)
        } else {
            Self::from_passphrase(input.as_bytes())
        }
    }

    /// Decodes an `x'<hex digits>'` blob literal into key material.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidHexKey`] for a malformed literal and
    /// [`CodecError::InvalidKeySize`] if the decoded blob is not exactly
    /// [`KEY_SIZE`] bytes.
    pub fn from_hex_literal(literal: &str) -> CodecResult<Self> {
        if !has_hex_prefix(literal) {
            return Err(CodecError::invalid_hex_key("missing x' prefix"));
        }
        let digits = literal[HEX_PREFIX.len()..]
            .strip_suffix('\'')
            .ok_or_else(|| CodecError::invalid_hex_key("missing closing quote"))?;

        let mut decoded = hex::decode(digits)
            .map_err(|e| CodecError::invalid_hex_key(e.to_string()))?;
        if decoded.len() != KEY_SIZE {
            let actual = decoded.len();
            decoded.zeroize();
            return Err(CodecError::invalid_key_size(actual, KEY_SIZE));
        }

        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(&decoded);
        decoded.zeroize();
        Ok(Self { bytes })
    }

    /// Derives key material from a passphrase via one digest pass.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EmptyKey`] for an empty passphrase, or
    /// [`CodecError::InvalidKeySize`] if the digest output does not match
    /// the cipher key length (the digest/cipher pairing is a compile-time
    /// choice, but the length is still checked rather than assumed).
    pub fn from_passphrase(passphrase: &[u8]) -> CodecResult<Self> {
        if passphrase.is_empty() {
            return Err(CodecError::EmptyKey);
        }
        let digest = Sha256::digest(passphrase);
        if digest.len() != KEY_SIZE {
            return Err(CodecError::invalid_key_size(digest.len(), KEY_SIZE));
        }
        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(&digest);
        Ok(Self { bytes })
    }

    /// Returns the key as a byte array.
    ///
    /// # Security
    ///
    /// Do not log or persist the result.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

/// Checks for the case-insensitive `x'` marker without assuming the input
/// is long enough or ASCII.
fn has_hex_prefix(input: &str) -> bool {
    input
        .get(..HEX_PREFIX.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(HEX_PREFIX))
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
