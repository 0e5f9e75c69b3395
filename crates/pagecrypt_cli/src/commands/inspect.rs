//! Inspect command implementation.

use std::path::Path;

use pagecrypt_codec::{validate_magic, HDR_SIZE, SALT_SIZE};
use pagecrypt_pager::{FilePageStore, PageStore};

/// Runs the inspect command.
///
/// Reads page 1's plaintext header straight off the store — no key is
/// needed to identify the file and show its salt.
pub fn run(path: &Path, page_size: usize) -> Result<(), Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("No file found at {}", path.display()).into());
    }

    let store = FilePageStore::open(path, page_size)?;
    let page_count = store.page_count()?;

    println!("file:       {}", path.display());
    println!("page size:  {page_size}");
    println!("pages:      {page_count}");

    if page_count == 0 {
        println!("status:     empty (no page 1 yet)");
        return Ok(());
    }

    let mut first = vec![0u8; page_size];
    store.read_page(1, &mut first)?;

    match validate_magic(&first[..HDR_SIZE]) {
        Ok(()) => {
            println!("marker:     valid");
            println!("salt:       {}", hex::encode(&first[..SALT_SIZE]));
        }
        Err(_) => {
            println!("marker:     missing - not a pagecrypt file");
        }
    }

    Ok(())
}
