//! In-memory page store for testing.

use parking_lot::RwLock;

use crate::error::{PagerError, PagerResult};
use crate::store::PageStore;
use pagecrypt_codec::PageNo;

/// An in-memory page store.
///
/// Holds all pages in a contiguous buffer. Suitable for unit tests,
/// integration tests and ephemeral data that never touches disk.
///
/// # Example
///
/// ```rust
/// use pagecrypt_pager::{InMemoryPageStore, PageStore};
///
/// let mut store = InMemoryPageStore::new(512);
/// store.write_page(1, &[0u8; 512]).unwrap();
/// assert_eq!(store.page_count().unwrap(), 1);
/// ```
#[derive(Debug)]
pub struct InMemoryPageStore {
    data: RwLock<Vec<u8>>,
    page_size: usize,
}

impl InMemoryPageStore {
    /// Creates an empty store of `page_size`-byte pages.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            data: RwLock::new(Vec::new()),
            page_size,
        }
    }

    /// Creates a store over pre-existing raw bytes.
    ///
    /// Useful for testing reopen scenarios. The byte length must be a
    /// whole number of pages.
    ///
    /// # Errors
    ///
    /// Returns [`PagerError::TruncatedStore`] if `data` is not a
    /// page-size multiple.
    pub fn with_data(data: Vec<u8>, page_size: usize) -> PagerResult<Self> {
        if data.len() % page_size != 0 {
            return Err(PagerError::TruncatedStore {
                size: data.len() as u64,
                page_size,
            });
        }
        Ok(Self {
            data: RwLock::new(data),
            page_size,
        })
    }

    /// Returns a copy of the raw (encrypted) bytes.
    ///
    /// Useful for testing and debugging.
    #[must_use]
    pub fn data(&self) -> Vec<u8> {
        self.data.read().clone()
    }

    fn page_range(&self, page_no: PageNo) -> std::ops::Range<usize> {
        let start = (page_no as usize - 1) * self.page_size;
        start..start + self.page_size
    }
}

impl PageStore for InMemoryPageStore {
    fn read_page(&self, page_no: PageNo, buf: &mut [u8]) -> PagerResult<()> {
        if buf.len() != self.page_size {
            return Err(PagerError::buffer_size(self.page_size, buf.len()));
        }
        let data = self.data.read();
        let count = (data.len() / self.page_size) as u32;
        if page_no == 0 || page_no > count {
            return Err(PagerError::page_out_of_range(page_no, count));
        }
        buf.copy_from_slice(&data[self.page_range(page_no)]);
        Ok(())
    }

    fn write_page(&mut self, page_no: PageNo, page: &[u8]) -> PagerResult<()> {
        if page.len() != self.page_size {
            return Err(PagerError::buffer_size(self.page_size, page.len()));
        }
        let mut data = self.data.write();
        let count = (data.len() / self.page_size) as u32;
        if page_no == 0 || page_no > count + 1 {
            return Err(PagerError::page_out_of_range(page_no, count));
        }
        if page_no == count + 1 {
            data.extend_from_slice(page);
        } else {
            let range = self.page_range(page_no);
            data[range].copy_from_slice(page);
        }
        Ok(())
    }

    fn page_count(&self) -> PagerResult<u32> {
        Ok((self.data.read().len() / self.page_size) as u32)
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn sync(&mut self) -> PagerResult<()> {
        // Nothing to make durable
        Ok(())
    }
}
