//! # pagecrypt pager
//!
//! Page store abstraction and the encrypted pager that drives
//! `pagecrypt_codec`.
//!
//! This crate plays the host engine's role from the codec's point of
//! view: it owns the file layout (fixed-size, 1-based pages), serializes
//! page I/O, and invokes the codec hook once per page transfer in the
//! correct mode.
//!
//! ## Design Principles
//!
//! - Page stores are **opaque page arrays** — they do not interpret page
//!   contents and know nothing about encryption
//! - The pager owns all codec interaction: decrypt after read, encrypt
//!   before write, salt recovery at attach, full re-encryption on rekey
//! - Must be `Send + Sync` for shared access
//!
//! ## Available Stores
//!
//! - [`InMemoryPageStore`] - For testing and ephemeral data
//! - [`FilePageStore`] - For persistent storage using OS file APIs
//!
//! ## Example
//!
//! ```rust
//! use pagecrypt_pager::{EncryptedPager, InMemoryPageStore};
//!
//! let store = InMemoryPageStore::new(1024);
//! let mut pager = EncryptedPager::attach(Box::new(store), "passphrase").unwrap();
//!
//! let mut page = vec![0x42u8; 1024];
//! pager.write_page(1, &mut page).unwrap();
//!
//! let mut read_back = vec![0u8; 1024];
//! pager.read_page(1, &mut read_back).unwrap();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod memory;
mod pager;
mod store;

pub use error::{PagerError, PagerResult};
pub use file::FilePageStore;
pub use memory::InMemoryPageStore;
pub use pager::EncryptedPager;
pub use store::PageStore;

/// Crate version, for diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
