//! File-based page store for persistent storage.

use parking_lot::RwLock;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::{PagerError, PagerResult};
use crate::store::PageStore;
use pagecrypt_codec::PageNo;

/// A file-based page store.
///
/// Pages live back to back in a single file; page `n` starts at byte
/// `(n-1) * page_size`. Data survives process restarts.
///
/// # Durability
///
/// `sync()` calls `File::sync_all()` so both data and metadata reach
/// disk.
///
/// # Thread Safety
///
/// Reads take `&self`; an internal lock keeps seek-and-read sequences
/// consistent when the store is shared.
///
/// # Example
///
/// ```no_run
/// use pagecrypt_pager::{FilePageStore, PageStore};
/// use std::path::Path;
///
/// let mut store = FilePageStore::open(Path::new("data.db"), 4096).unwrap();
/// store.write_page(1, &[0u8; 4096]).unwrap();
/// store.sync().unwrap();
/// ```
#[derive(Debug)]
pub struct FilePageStore {
    path: PathBuf,
    file: RwLock<File>,
    page_size: usize,
    page_count: RwLock<u32>,
}

impl FilePageStore {
    /// Opens or creates a page store at the given path.
    ///
    /// An existing file is opened as-is; its length must be a whole
    /// number of pages.
    ///
    /// # Errors
    ///
    /// Returns [`PagerError::InvalidPageSize`] for a zero page size,
    /// [`PagerError::TruncatedStore`] if the existing file length is not
    /// a page-size multiple, or an I/O error.
    pub fn open(path: &Path, page_size: usize) -> PagerResult<Self> {
        if page_size == 0 {
            return Err(PagerError::InvalidPageSize { page_size });
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let size = file.metadata()?.len();
        if size % page_size as u64 != 0 {
            return Err(PagerError::TruncatedStore { size, page_size });
        }

        Ok(Self {
            path: path.to_path_buf(),
            file: RwLock::new(file),
            page_size,
            page_count: RwLock::new((size / page_size as u64) as u32),
        })
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn page_offset(&self, page_no: PageNo) -> u64 {
        (page_no as u64 - 1) * self.page_size as u64
    }
}

impl PageStore for FilePageStore {
    fn read_page(&self, page_no: PageNo, buf: &mut [u8]) -> PagerResult<()> {
        if buf.len() != self.page_size {
            return Err(PagerError::buffer_size(self.page_size, buf.len()));
        }
        let count = *self.page_count.read();
        if page_no == 0 || page_no > count {
            return Err(PagerError::page_out_of_range(page_no, count));
        }

        let mut file = self.file.write();
        file.seek(SeekFrom::Start(self.page_offset(page_no)))?;
        file.read_exact(buf)?;
        Ok(())
    }

    fn write_page(&mut self, page_no: PageNo, page: &[u8]) -> PagerResult<()> {
        if page.len() != self.page_size {
            return Err(PagerError::buffer_size(self.page_size, page.len()));
        }
        let mut count = self.page_count.write();
        if page_no == 0 || page_no > *count + 1 {
            return Err(PagerError::page_out_of_range(page_no, *count));
        }

        let mut file = self.file.write();
        file.seek(SeekFrom::Start(self.page_offset(page_no)))?;
        file.write_all(page)?;
        if page_no == *count + 1 {
            *count = page_no;
        }
        Ok(())
    }

    fn page_count(&self) -> PagerResult<u32> {
        Ok(*self.page_count.read())
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn sync(&mut self) -> PagerResult<()> {
        let file = self.file.write();
        file.sync_all()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const PAGE_SIZE: usize = 128;

    #[test]
    fn file_create_new() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.db");

        let store = FilePageStore::open(&path, PAGE_SIZE).unwrap();
        assert_eq!(store.page_count().unwrap(), 0);
        assert!(path.exists());
    }

    #[test]
    fn file_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.db");

        let mut store = FilePageStore::open(&path, PAGE_SIZE).unwrap();
        store.write_page(1, &[0x11; PAGE_SIZE]).unwrap();
        store.write_page(2, &[0x22; PAGE_SIZE]).unwrap();
        store.write_page(1, &[0x33; PAGE_SIZE]).unwrap();

        let mut buf = [0u8; PAGE_SIZE];
        store.read_page(1, &mut buf).unwrap();
        assert_eq!(buf, [0x33; PAGE_SIZE]);
        store.read_page(2, &mut buf).unwrap();
        assert_eq!(buf, [0x22; PAGE_SIZE]);
    }

    #[test]
    fn file_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.db");

        {
            let mut store = FilePageStore::open(&path, PAGE_SIZE).unwrap();
            store.write_page(1, &[0x77; PAGE_SIZE]).unwrap();
            store.sync().unwrap();
        }

        let store = FilePageStore::open(&path, PAGE_SIZE).unwrap();
        assert_eq!(store.page_count().unwrap(), 1);
        let mut buf = [0u8; PAGE_SIZE];
        store.read_page(1, &mut buf).unwrap();
        assert_eq!(buf, [0x77; PAGE_SIZE]);
    }

    #[test]
    fn file_rejects_partial_page_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.db");
        std::fs::write(&path, vec![0u8; PAGE_SIZE + 7]).unwrap();

        assert!(matches!(
            FilePageStore::open(&path, PAGE_SIZE),
            Err(PagerError::TruncatedStore { .. })
        ));
    }

    #[test]
    fn file_rejects_zero_page_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.db");
        assert!(matches!(
            FilePageStore::open(&path, 0),
            Err(PagerError::InvalidPageSize { .. })
        ));
    }

    #[test]
    fn file_read_past_end_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.db");

        let mut store = FilePageStore::open(&path, PAGE_SIZE).unwrap();
        store.write_page(1, &[0; PAGE_SIZE]).unwrap();

        let mut buf = [0u8; PAGE_SIZE];
        assert!(matches!(
            store.read_page(2, &mut buf),
            Err(PagerError::PageOutOfRange { .. })
        ));
    }

    #[test]
    fn file_write_must_be_contiguous() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.db");

        let mut store = FilePageStore::open(&path, PAGE_SIZE).unwrap();
        assert!(matches!(
            store.write_page(2, &[0; PAGE_SIZE]),
            Err(PagerError::PageOutOfRange { .. })
        ));
    }

    #[test]
    fn file_path_accessor() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.db");
        let store = FilePageStore::open(&path, PAGE_SIZE).unwrap();
        assert_eq!(store.path(), path);
    }
}
