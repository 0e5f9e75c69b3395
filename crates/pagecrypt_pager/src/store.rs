//! Page store trait definition.

use crate::error::PagerResult;
use pagecrypt_codec::PageNo;

/// A low-level store of fixed-size pages.
///
/// Page stores are **opaque page arrays**: they read and write whole
/// pages by 1-based page number and do not interpret page contents. All
/// encryption and file-format knowledge lives above them, in
/// [`EncryptedPager`](crate::EncryptedPager).
///
/// # Invariants
///
/// - Pages are numbered from 1; page `n` occupies bytes
///   `[(n-1) * page_size, n * page_size)` of the backing storage
/// - `read_page` returns exactly the bytes last written to that page
/// - A store may grow only by writing page `page_count() + 1`; writes
///   further out are an error, never silent sparse growth
/// - Implementations must be `Send + Sync`
///
/// # Implementors
///
/// - [`super::InMemoryPageStore`] - For testing
/// - [`super::FilePageStore`] - For persistent storage
pub trait PageStore: Send + Sync {
    /// Reads page `page_no` into `buf`.
    ///
    /// `buf` must be exactly one page long.
    ///
    /// # Errors
    ///
    /// Returns an error if the page does not exist, the buffer has the
    /// wrong size, or an I/O error occurs.
    fn read_page(&self, page_no: PageNo, buf: &mut [u8]) -> PagerResult<()>;

    /// Writes one page of data at `page_no`.
    ///
    /// Writing page `page_count() + 1` extends the store by one page.
    ///
    /// # Errors
    ///
    /// Returns an error if `page_no` is 0 or more than one past the end,
    /// the buffer has the wrong size, or an I/O error occurs.
    fn write_page(&mut self, page_no: PageNo, data: &[u8]) -> PagerResult<()>;

    /// Returns the number of pages currently in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be determined.
    fn page_count(&self) -> PagerResult<u32>;

    /// Returns the fixed page size in bytes.
    fn page_size(&self) -> usize;

    /// Forces all written pages down to durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync operation fails.
    fn sync(&mut self) -> PagerResult<()>;
}
