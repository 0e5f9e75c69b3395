//! Page-1 header layout and directional salt handling.
//!
//! The first [`HDR_SIZE`] bytes of page 1 never pass through the cipher.
//! They carry the per-file random salt followed by a fixed marker, so an
//! encrypted file stays identifiable without the key and the salt can be
//! recovered on reopen.
//!
//! Salt movement is directional and the two directions are separate
//! operations on purpose: the encrypt path writes the context's salt *to*
//! the page ([`write_header`]), the decrypt path reads the stored salt
//! *from* the page ([`read_salt`]). Conflating the two was the ordering
//! bug in older codecs of this design — a codec must never read a salt
//! back out of a buffer it just populated with its own in-memory salt.

use crate::error::{CodecError, CodecResult};

/// Length of the per-file random salt at the head of page 1.
pub const SALT_SIZE: usize = 16;

/// Total plaintext header length at the head of page 1.
pub const HDR_SIZE: usize = 24;

/// Length of the file marker that follows the salt.
pub const MAGIC_SIZE: usize = HDR_SIZE - SALT_SIZE;

/// Marker identifying an encrypted pagecrypt file; the last byte is the
/// format version.
pub const FILE_MAGIC: [u8; MAGIC_SIZE] = *b"PgCrypt\x01";

/// Writes the context's salt and the file marker into a page-1 header.
///
/// Encrypt/fresh-file path: the in-memory salt is the source of truth and
/// the marker makes the file self-describing. `header` must be at least
/// [`HDR_SIZE`] bytes.
pub(crate) fn write_header(salt: &[u8; SALT_SIZE], header: &mut [u8]) {
    header[..SALT_SIZE].copy_from_slice(salt);
    header[SALT_SIZE..HDR_SIZE].copy_from_slice(&FILE_MAGIC);
}

/// Reads the stored salt out of a page-1 header read from disk.
///
/// Decrypt/reopen path: the on-disk salt overrides whatever salt the
/// context generated at attach time, since it is what every page of the
/// file was enciphered under.
///
/// # Errors
///
/// Returns [`CodecError::BadMagic`] if the marker does not match —
/// decrypting an unrecognized file would only produce garbage.
pub fn read_salt(header: &[u8]) -> CodecResult<[u8; SALT_SIZE]> {
    validate_magic(header)?;
    let mut salt = [0u8; SALT_SIZE];
    salt.copy_from_slice(&header[..SALT_SIZE]);
    Ok(salt)
}

/// Checks that a page-1 header carries the expected file marker.
///
/// # Errors
///
/// Returns [`CodecError::BadMagic`] if the header is too short or the
/// marker bytes differ.
pub fn validate_magic(header: &[u8]) -> CodecResult<()> {
    if header.len() < HDR_SIZE || header[SALT_SIZE..HDR_SIZE] != FILE_MAGIC {
        return Err(CodecError::BadMagic);
    }
    Ok(())
}
