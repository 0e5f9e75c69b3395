//! Error types for pager operations.

use std::io;
use thiserror::Error;

/// Result type for pager operations.
pub type PagerResult<T> = Result<T, PagerError>;

/// Errors that can occur during pager operations.
#[derive(Debug, Error)]
pub enum PagerError {
    /// Codec-level failure (key derivation, page transform, header).
    #[error("codec error: {0}")]
    Codec(#[from] pagecrypt_codec::CodecError),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A page number referred outside the store.
    #[error("page {page_no} out of range: store has {page_count} pages")]
    PageOutOfRange {
        /// The requested page number.
        page_no: u32,
        /// Number of pages the store currently holds.
        page_count: u32,
    },

    /// The backing file's length is not a whole number of pages.
    #[error("store size {size} is not a multiple of page size {page_size}")]
    TruncatedStore {
        /// Size of the backing storage in bytes.
        size: u64,
        /// The configured page size.
        page_size: usize,
    },

    /// A page buffer did not match the store's page size.
    #[error("page buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize {
        /// The store's page size.
        expected: usize,
        /// Length of the buffer that was passed.
        actual: usize,
    },

    /// The configured page size is unusable.
    #[error("invalid page size: {page_size}")]
    InvalidPageSize {
        /// The rejected page size.
        page_size: usize,
    },
}

impl PagerError {
    /// Creates a page out of range error.
    pub fn page_out_of_range(page_no: u32, page_count: u32) -> Self {
        Self::PageOutOfRange {
            page_no,
            page_count,
        }
    }

    /// Creates a buffer size mismatch error.
    pub fn buffer_size(expected: usize, actual: usize) -> Self {
        Self::BufferSize { expected, actual }
    }
}
