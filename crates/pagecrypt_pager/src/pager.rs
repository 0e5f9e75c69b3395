//! The encrypted pager: codec lifecycle over a page store.

use zeroize::Zeroize;

use crate::error::PagerResult;
use crate::store::PageStore;
use pagecrypt_codec::{read_salt, CodecContext, PageNo, HDR_SIZE, SALT_SIZE};

/// Op code for a read-side (decrypt) codec call.
const OP_READ: u8 = 3;
/// Op code for a write-side (encrypt) codec call.
const OP_WRITE: u8 = 6;

/// A pager that encrypts pages on their way into a [`PageStore`] and
/// decrypts them on the way out.
///
/// This type plays the host engine's role around the codec: it owns the
/// store, serializes page I/O (`&mut self` on every transfer, upholding
/// the codec's one-transform-at-a-time contract) and calls the codec
/// hook once per page in the correct mode.
///
/// # Key caveat
///
/// The codec is unauthenticated. Attaching with the wrong key succeeds
/// and decryption produces garbage bytes rather than an error; only the
/// page-1 file marker is verified, which authenticates the format, not
/// the key.
pub struct EncryptedPager {
    store: Box<dyn PageStore>,
    codec: CodecContext,
    page_size: usize,
}

impl EncryptedPager {
    /// Attaches the codec to a page store.
    ///
    /// The page size is taken from the store and fixed for the life of
    /// the pager. For an empty store the freshly generated salt is kept;
    /// it reaches disk with the first write of page 1. For a store that
    /// already has pages, page 1's header is read eagerly, the file
    /// marker is validated and the stored salt is adopted into the codec
    /// *before* any page can be decrypted — that ordering is what makes
    /// reopening work.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty key, an unusable page size, a store
    /// whose page 1 lacks the file marker, or I/O failure.
    pub fn attach(store: Box<dyn PageStore>, key_input: &str) -> PagerResult<Self> {
        let page_size = store.page_size();
        let mut codec = CodecContext::new(page_size, key_input)?;

        let page_count = store.page_count()?;
        if page_count > 0 {
            let mut first = vec![0u8; page_size];
            store.read_page(1, &mut first)?;
            let salt = read_salt(&first[..HDR_SIZE])?;
            codec.adopt_salt(salt);
            tracing::info!(page_count, "attached to existing encrypted store");
        } else {
            tracing::info!("attached to fresh store");
        }

        Ok(Self {
            store,
            codec,
            page_size,
        })
    }

    /// Reads and decrypts one page into `buf`.
    ///
    /// # Errors
    ///
    /// Returns store errors (missing page, wrong buffer size, I/O) or
    /// codec errors; on error `buf` must be considered garbage.
    pub fn read_page(&mut self, page_no: PageNo, buf: &mut [u8]) -> PagerResult<()> {
        self.store.read_page(page_no, buf)?;
        self.codec.codec_entry(buf, page_no, OP_READ)?;
        Ok(())
    }

    /// Encrypts and writes one page.
    ///
    /// `page` holds the plaintext and is left untouched; the ciphertext
    /// is produced in the codec's scratch buffer and handed straight to
    /// the store.
    ///
    /// # Errors
    ///
    /// Returns codec errors or store errors; on error nothing was
    /// written.
    pub fn write_page(&mut self, page_no: PageNo, page: &mut [u8]) -> PagerResult<()> {
        let encrypted = self.codec.codec_entry(page, page_no, OP_WRITE)?;
        self.store.write_page(page_no, encrypted)?;
        Ok(())
    }

    /// Re-encrypts the whole store under a new key and a new salt.
    ///
    /// Every page is read and decrypted under the current context, then
    /// encrypted under a fresh context derived from `new_key_input` and
    /// written back; the store is synced before the new context replaces
    /// the old one. This is a genuine re-encryption pass — a rekey that
    /// merely swapped contexts would leave the file unreadable.
    ///
    /// A crash in the middle leaves a file that is part old key, part
    /// new; recovering that needs journaling, which belongs to the host
    /// engine. Take a backup before rekeying anything irreplaceable.
    ///
    /// # Errors
    ///
    /// Returns key derivation, codec or store errors. On error the
    /// current context is kept, but already rewritten pages stay under
    /// the new key.
    pub fn rekey(&mut self, new_key_input: &str) -> PagerResult<()> {
        let mut new_codec = CodecContext::new(self.page_size, new_key_input)?;
        let page_count = self.store.page_count()?;
        tracing::info!(page_count, "rekeying store");

        let mut buf = vec![0u8; self.page_size];
        for page_no in 1..=page_count {
            self.store.read_page(page_no, &mut buf)?;
            self.codec.codec_entry(&mut buf, page_no, OP_READ)?;
            let encrypted = new_codec.codec_entry(&mut buf, page_no, OP_WRITE)?;
            self.store.write_page(page_no, encrypted)?;
        }
        buf.zeroize();

        self.store.sync()?;
        self.codec = new_codec;
        Ok(())
    }

    /// Number of pages currently in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store size cannot be determined.
    pub fn page_count(&self) -> PagerResult<u32> {
        self.store.page_count()
    }

    /// The page size this pager was attached with.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The current per-file salt.
    #[must_use]
    pub fn salt(&self) -> &[u8; SALT_SIZE] {
        self.codec.salt()
    }

    /// Read-only view of the key material, for diagnostic/export use.
    ///
    /// # Security
    ///
    /// Do not log or persist the result.
    #[must_use]
    pub fn key_material(&self) -> &[u8] {
        self.codec.key_material()
    }

    /// Forces all written pages down to durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync operation fails.
    pub fn sync(&mut self) -> PagerResult<()> {
        self.store.sync()
    }
}

impl std::fmt::Debug for EncryptedPager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedPager")
            .field("codec", &self.codec)
            .field("page_size", &self.page_size)
            .finish()
    }
}
