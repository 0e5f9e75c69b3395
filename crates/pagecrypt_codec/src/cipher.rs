//! The page transform.
//!
//! One region of a page goes through AES-256-CTR in a single pass. CTR is
//! the streaming mode of the block cipher: no padding, output exactly as
//! long as the input, and any region length is acceptable — the page-1
//! body is shorter than a full page and not block-aligned.

use aes::cipher::{KeyIvInit, StreamCipher};
use aes::Aes256;

use crate::error::{CodecError, CodecResult};
use crate::key::KeyMaterial;

/// Cipher block size in bytes; page sizes must be a multiple of this.
pub const BLOCK_SIZE: usize = 16;

/// Number of IV bytes the cipher consumes.
pub const IV_SIZE: usize = 16;

type Aes256Ctr = ctr::Ctr128BE<Aes256>;

/// Streams `input` through the cipher into `output`.
///
/// The same call serves both directions: applying the keystream to
/// ciphertext yields the plaintext again, so encryption and decryption
/// are exact inverses under the same key and IV. The transform keeps no
/// state between calls.
///
/// # Errors
///
/// Returns [`CodecError::LengthMismatch`] if `output` is not exactly as
/// long as `input`, and [`CodecError::TransformFailed`] if the cipher
/// itself fails. Both abort the surrounding page operation — the host
/// must never see a partially transformed page.
pub fn transform_region(
    key: &KeyMaterial,
    iv: &[u8; IV_SIZE],
    input: &[u8],
    output: &mut [u8],
) -> CodecResult<()> {
    if output.len() != input.len() {
        return Err(CodecError::length_mismatch(input.len(), output.len()));
    }

    let mut cipher = Aes256Ctr::new(key.as_bytes().into(), iv.into());
    cipher
        .apply_keystream_b2b(input, output)
        .map_err(|e| CodecError::transform_failed(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> KeyMaterial {
        KeyMaterial::from_passphrase(b"cipher-test-key").unwrap()
    }

    #[test]
    fn transform_is_its_own_inverse() {
        let key = test_key();
        let iv = [9u8; IV_SIZE];
        let plaintext = vec![0x5au8; 1000];

        let mut ciphertext = vec![0u8; plaintext.len()];
        transform_region(&key, &iv, &plaintext, &mut ciphertext).unwrap();
        assert_ne!(ciphertext, plaintext);

        let mut recovered = vec![0u8; plaintext.len()];
        transform_region(&key, &iv, &ciphertext, &mut recovered).unwrap();
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn transform_is_deterministic() {
        let key = test_key();
        let iv = [3u8; IV_SIZE];
        let input = b"same input, same output";

        let mut a = vec![0u8; input.len()];
        let mut b = vec![0u8; input.len()];
        transform_region(&key, &iv, input, &mut a).unwrap();
        transform_region(&key, &iv, input, &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_ivs_differ() {
        let key = test_key();
        let input = vec![0u8; 64];

        let mut a = vec![0u8; input.len()];
        let mut b = vec![0u8; input.len()];
        transform_region(&key, &[1u8; IV_SIZE], &input, &mut a).unwrap();
        transform_region(&key, &[2u8; IV_SIZE], &input, &mut b).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn non_block_aligned_region_is_fine() {
        // The page-1 body is page_size - 24 bytes, which is never a
        // multiple of the block size for power-of-two page sizes.
        let key = test_key();
        let iv = [4u8; IV_SIZE];
        let input = vec![0xaau8; 1000];

        let mut out = vec![0u8; input.len()];
        transform_region(&key, &iv, &input, &mut out).unwrap();
        assert_eq!(out.len(), input.len());
    }

    #[test]
    fn output_length_mismatch_fails() {
        let key = test_key();
        let iv = [0u8; IV_SIZE];
        let input = vec![0u8; 32];

        let mut short = vec![0u8; 16];
        assert!(matches!(
            transform_region(&key, &iv, &input, &mut short),
            Err(CodecError::LengthMismatch {
                expected: 32,
                actual: 16
            })
        ));
    }
}
