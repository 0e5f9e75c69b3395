//! Codec context and the per-page entry point.

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use crate::cipher::{transform_region, BLOCK_SIZE, IV_SIZE};
use crate::error::{CodecError, CodecResult};
use crate::header::{self, HDR_SIZE, SALT_SIZE};
use crate::iv::derive_iv;
use crate::key::KeyMaterial;
use crate::PageNo;

/// The page number that carries the plaintext header.
pub const FIRST_PAGE: PageNo = 1;

/// Transform direction for one page transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOp {
    /// Page was read from disk and must be decrypted.
    Decrypt,
    /// Page is about to be written and must be encrypted.
    Encrypt,
}

impl PageOp {
    /// Maps a raw host op code to a transform direction.
    ///
    /// The numbering is the host pager's: 0, 2 and 3 are read-side calls
    /// that need decryption; 6 and 7 are write-side calls that need
    /// encryption. `None` means the call is informational and the page
    /// passes through untouched.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 | 2 | 3 => Some(Self::Decrypt),
            6 | 7 => Some(Self::Encrypt),
            _ => None,
        }
    }
}

/// Per-file codec state: key material, salt and the reusable scratch
/// buffer.
///
/// One context exists per attached database file, created at attach time
/// and dropped at detach. The scratch buffer is sized to exactly one page
/// and reused for every transform, so the per-page hook never allocates.
///
/// # Concurrency
///
/// At most one transform may be in flight per context. The host engine's
/// page-level serialization (a single writer per open file) is what
/// upholds this; the context itself takes `&mut self` and performs no
/// internal locking.
pub struct CodecContext {
    key: KeyMaterial,
    salt: [u8; SALT_SIZE],
    scratch: Vec<u8>,
    page_size: usize,
}

impl CodecContext {
    /// Creates a context for a file of `page_size`-byte pages.
    ///
    /// Derives the key from `key_input` (hex literal or passphrase) and
    /// generates a fresh random salt. For a brand-new file the salt
    /// reaches disk with the first write of page 1; when attaching to an
    /// existing file the caller must overwrite it with the stored one via
    /// [`adopt_salt`](Self::adopt_salt) before decrypting anything.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EmptyKey`] / key derivation errors, or
    /// [`CodecError::InvalidPageSize`] if `page_size` is not a block-size
    /// multiple larger than the page-1 header.
    pub fn new(page_size: usize, key_input: &str) -> CodecResult<Self> {
        if page_size <= HDR_SIZE || page_size % BLOCK_SIZE != 0 {
            return Err(CodecError::InvalidPageSize { page_size });
        }
        let key = KeyMaterial::from_input(key_input)?;

        let mut salt = [0u8; SALT_SIZE];
        OsRng.fill_bytes(&mut salt);

        Ok(Self {
            key,
            salt,
            scratch: vec![0u8; page_size],
            page_size,
        })
    }

    /// Replaces the context's salt with one recovered from disk.
    ///
    /// Reopen path only: the stored salt is what the file's pages were
    /// enciphered under, so it must win over the freshly generated one
    /// before any page is decrypted.
    pub fn adopt_salt(&mut self, salt: [u8; SALT_SIZE]) {
        self.salt = salt;
    }

    /// The page size this context was attached with.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The current per-file salt.
    #[must_use]
    pub fn salt(&self) -> &[u8; SALT_SIZE] {
        &self.salt
    }

    /// Read-only view of the key material, for diagnostic use.
    ///
    /// # Security
    ///
    /// Do not log or persist the result.
    #[must_use]
    pub fn key_material(&self) -> &[u8] {
        self.key.as_bytes()
    }

    /// The per-page codec hook: one call per page transfer.
    ///
    /// Dispatches on `code` (see [`PageOp::from_code`]); unrecognized
    /// codes return `page` unchanged with no cryptographic work done.
    ///
    /// Calling convention, matching what host pagers expect:
    /// - encrypt calls leave `page` untouched and return the context's
    ///   scratch buffer — the host writes the returned bytes to disk and
    ///   keeps using its own buffer;
    /// - decrypt calls copy the result back into `page` and return it —
    ///   the host keeps its own buffer identity.
    ///
    /// Page 1 is routed through the header handler: its leading
    /// [`HDR_SIZE`] bytes stay outside the cipher boundary, the encrypt
    /// path writes the salt and file marker into them, and the decrypt
    /// path adopts the stored salt before deriving this page's IV.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::PageSizeMismatch`] for a wrong-sized buffer,
    /// [`CodecError::BadMagic`] when decrypting a page 1 that does not
    /// carry the file marker, and the underlying transform errors. Any
    /// error means the page was not (fully) transformed and the host must
    /// abort that page operation.
    pub fn codec_entry<'a>(
        &'a mut self,
        page: &'a mut [u8],
        page_no: PageNo,
        code: u8,
    ) -> CodecResult<&'a [u8]> {
        let Some(op) = PageOp::from_code(code) else {
            return Ok(page);
        };
        if page.len() != self.page_size {
            return Err(CodecError::page_size_mismatch(self.page_size, page.len()));
        }
        tracing::debug!(page_no, ?op, "page transform");

        if page_no == FIRST_PAGE {
            // Header handling first: the decrypt path adopts the on-disk
            // salt, which the IV derivation below must already use.
            self.handle_page_one_header(page, op)?;
            let iv = self.page_iv(page_no);
            transform_region(
                &self.key,
                &iv,
                &page[HDR_SIZE..],
                &mut self.scratch[HDR_SIZE..],
            )?;
        } else {
            let iv = self.page_iv(page_no);
            transform_region(&self.key, &iv, page, &mut self.scratch)?;
        }

        match op {
            PageOp::Encrypt => Ok(self.scratch.as_slice()),
            PageOp::Decrypt => {
                page.copy_from_slice(&self.scratch);
                Ok(page)
            }
        }
    }

    /// Truncates the derived digest to the cipher's IV length.
    fn page_iv(&self, page_no: PageNo) -> [u8; IV_SIZE] {
        let digest = derive_iv(&self.salt, page_no);
        let mut iv = [0u8; IV_SIZE];
        iv.copy_from_slice(&digest[..IV_SIZE]);
        iv
    }

    /// Prepares the scratch header for a page-1 transform.
    ///
    /// The header region travels verbatim into the scratch buffer, then
    /// one of two distinct directional operations runs. Keeping them
    /// separate is what makes reopening under a different in-memory salt
    /// work: the salt is never read back out of a buffer this codec
    /// populated itself.
    fn handle_page_one_header(&mut self, page: &[u8], op: PageOp) -> CodecResult<()> {
        self.scratch[..HDR_SIZE].copy_from_slice(&page[..HDR_SIZE]);
        match op {
            PageOp::Encrypt => {
                // Fresh-file/write path: context salt and marker to disk.
                header::write_header(&self.salt, &mut self.scratch[..HDR_SIZE]);
            }
            PageOp::Decrypt => {
                // Reopen/read path: the stored salt is the source of
                // truth and must be adopted before the IV is derived.
                self.salt = header::read_salt(&page[..HDR_SIZE])?;
            }
        }
        Ok(())
    }
}

impl Drop for CodecContext {
    fn drop(&mut self) {
        // The scratch buffer may still hold the last page's plaintext.
        self.scratch.zeroize();
        self.salt.zeroize();
    }
}

impl std::fmt::Debug for CodecContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecContext")
            .field("key", &"[REDACTED]")
            .field("salt", &"[REDACTED]")
            .field("page_size", &self.page_size)
            .finish()
    }
}
