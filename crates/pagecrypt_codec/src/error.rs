//! Error types for codec operations.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while deriving keys or transforming pages.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The supplied key input was empty or missing.
    #[error("key must not be empty")]
    EmptyKey,

    /// A hex key literal could not be decoded.
    #[error("invalid hex key literal: {reason}")]
    InvalidHexKey {
        /// Why decoding failed.
        reason: String,
    },

    /// Key material does not match the cipher's required key length.
    #[error("invalid key size: expected {expected} bytes, got {actual}")]
    InvalidKeySize {
        /// Required key length in bytes.
        expected: usize,
        /// Length that was actually supplied or derived.
        actual: usize,
    },

    /// The page size cannot be used with this codec.
    #[error("invalid page size {page_size}: must be a multiple of the cipher block size and larger than the page-1 header")]
    InvalidPageSize {
        /// The rejected page size.
        page_size: usize,
    },

    /// A page buffer did not match the context's page size.
    #[error("page buffer size mismatch: expected {expected} bytes, got {actual}")]
    PageSizeMismatch {
        /// The context's page size.
        expected: usize,
        /// Length of the buffer the host passed.
        actual: usize,
    },

    /// Cipher output length differed from input length.
    ///
    /// Returning short or long output would hand the host a corrupted
    /// page, so the transform is aborted instead.
    #[error("transform length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        /// Input length.
        expected: usize,
        /// Output length the cipher produced or was offered.
        actual: usize,
    },

    /// Page 1 does not carry the expected file marker.
    #[error("file marker mismatch in page 1 header")]
    BadMagic,

    /// The cipher failed while processing a page.
    #[error("page transform failed: {message}")]
    TransformFailed {
        /// Description of the failure.
        message: String,
    },
}

impl CodecError {
    /// Creates an invalid hex key error.
    pub fn invalid_hex_key(reason: impl Into<String>) -> Self {
        Self::InvalidHexKey {
            reason: reason.into(),
        }
    }

    /// Creates an invalid key size error.
    pub fn invalid_key_size(actual: usize, expected: usize) -> Self {
        Self::InvalidKeySize { expected, actual }
    }

    /// Creates a page buffer size mismatch error.
    pub fn page_size_mismatch(expected: usize, actual: usize) -> Self {
        Self::PageSizeMismatch { expected, actual }
    }

    /// Creates a transform length mismatch error.
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }

    /// Creates a transform failed error.
    pub fn transform_failed(message: impl Into<String>) -> Self {
        Self::TransformFailed {
            message: message.into(),
        }
    }
}
