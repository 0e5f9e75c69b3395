//! # pagecrypt codec
//!
//! Transparent page-level encryption for paged storage files.
//!
//! The codec sits between a storage engine's page cache and the on-disk
//! file: every page is encrypted on its way to disk and decrypted on its
//! way back, and the engine above sees unchanged logical page contents.
//! Nothing extra is stored per page — the IV for each page is recomputed
//! from a per-file random salt and the page number, so pages stay exactly
//! `page_size` bytes on disk.
//!
//! Page 1 is special: its first [`HDR_SIZE`] bytes stay outside the cipher
//! boundary. They hold the salt (so the file can be reopened) followed by a
//! fixed marker (so the file is identifiable without the key).
//!
//! ## Security Model
//!
//! - AES-256-CTR, one deterministic IV per (salt, page number) pair
//! - Key material from a passphrase digest or an `x'..'` hex literal
//! - Keys, salt and the scratch buffer are zeroized on drop
//! - No authentication: a wrong key or a tampered page yields garbage
//!   plaintext, not an error
//!
//! ## Usage
//!
//! ```rust
//! use pagecrypt_codec::CodecContext;
//!
//! let mut codec = CodecContext::new(1024, "correct-horse").unwrap();
//! let mut page = vec![0xAAu8; 1024];
//!
//! // op code 6: encrypt for write; the ciphertext lives in the codec's
//! // scratch buffer and `page` is left untouched.
//! let on_disk = codec.codec_entry(&mut page, 2, 6).unwrap().to_vec();
//!
//! // op code 3: decrypt after read, in the caller's buffer.
//! let mut read_back = on_disk;
//! codec.codec_entry(&mut read_back, 2, 3).unwrap();
//! assert_eq!(read_back, page);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod cipher;
mod context;
mod error;
mod header;
mod iv;
mod key;

pub use cipher::{transform_region, BLOCK_SIZE, IV_SIZE};
pub use context::{CodecContext, PageOp, FIRST_PAGE};
pub use error::{CodecError, CodecResult};
pub use header::{read_salt, validate_magic, FILE_MAGIC, HDR_SIZE, MAGIC_SIZE, SALT_SIZE};
pub use iv::{derive_iv, DIGEST_SIZE};
pub use key::{KeyMaterial, KEY_SIZE};

/// 1-based page number within a paged file.
pub type PageNo = u32;

/// Crate version, for diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
