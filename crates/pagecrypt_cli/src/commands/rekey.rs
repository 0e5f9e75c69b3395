//! Rekey command implementation.

use std::path::Path;

use pagecrypt_pager::{EncryptedPager, FilePageStore};

/// Runs the rekey command.
///
/// Attaches under the current key, re-encrypts every page under the new
/// key and a fresh salt, and syncs the file.
pub fn run(
    path: &Path,
    page_size: usize,
    key: &str,
    new_key: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("No file found at {}", path.display()).into());
    }

    let store = FilePageStore::open(path, page_size)?;
    let mut pager = EncryptedPager::attach(Box::new(store), key)?;
    let page_count = pager.page_count()?;

    pager.rekey(new_key)?;

    println!("rekeyed {page_count} pages at {}", path.display());
    Ok(())
}
