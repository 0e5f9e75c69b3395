//! Per-page IV derivation.

use sha2::{Digest, Sha256};

use crate::header::SALT_SIZE;
use crate::PageNo;

/// Number of bytes one digest pass yields.
pub const DIGEST_SIZE: usize = 32;

/// Derives the IV for one page from the file salt and the page number.
///
/// The salt and the fixed-width little-endian page number go through a
/// single digest pass. Nothing is persisted: decryption recomputes the
/// same IV from the salt already at hand, and distinct page numbers yield
/// distinct IVs for as long as the digest resists collisions.
///
/// The cipher consumes the leading [`IV_SIZE`](crate::IV_SIZE) bytes of
/// the result.
#[must_use]
pub fn derive_iv(salt: &[u8; SALT_SIZE], page_no: PageNo) -> [u8; DIGEST_SIZE] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(page_no.to_le_bytes());
    hasher.finalize().into()
}
