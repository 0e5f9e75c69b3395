//! End-to-end page transform properties.

use pagecrypt_codec::{
    derive_iv, CodecContext, CodecError, FILE_MAGIC, FIRST_PAGE, HDR_SIZE, SALT_SIZE,
};
use proptest::prelude::*;

const OP_READ: u8 = 3;
const OP_WRITE: u8 = 6;

/// Encrypt-then-decrypt through two independent contexts sharing only the
/// key and salt, the way a write and a later read actually happen.
fn roundtrip(page_size: usize, key: &str, page_no: u32, plaintext: &[u8]) -> Vec<u8> {
    let mut writer = CodecContext::new(page_size, key).unwrap();
    let mut page = plaintext.to_vec();
    let mut on_disk = writer
        .codec_entry(&mut page, page_no, OP_WRITE)
        .unwrap()
        .to_vec();

    let mut reader = CodecContext::new(page_size, key).unwrap();
    reader.adopt_salt(*writer.salt());
    reader
        .codec_entry(&mut on_disk, page_no, OP_READ)
        .unwrap();
    on_disk
}

proptest! {
    #[test]
    fn body_pages_round_trip(
        page in prop::collection::vec(any::<u8>(), 512),
        page_no in 2u32..10_000,
    ) {
        let recovered = roundtrip(512, "prop-key", page_no, &page);
        prop_assert_eq!(recovered, page);
    }

    #[test]
    fn ciphertext_differs_from_plaintext(
        seed in any::<u8>(),
        page_no in 2u32..1_000,
    ) {
        let page = vec![seed; 4096];
        let mut codec = CodecContext::new(4096, "prop-key").unwrap();
        let mut buf = page.clone();
        let encrypted = codec.codec_entry(&mut buf, page_no, OP_WRITE).unwrap();
        prop_assert_ne!(encrypted.to_vec(), page);
    }
}

#[test]
fn scenario_page_one_aa_bytes() {
    // page size 1024, 24-byte header, passphrase "correct-horse",
    // page-1 body of 1000 bytes of 0xAA.
    const PAGE_SIZE: usize = 1024;
    let mut page = vec![0u8; PAGE_SIZE];
    for b in &mut page[HDR_SIZE..] {
        *b = 0xAA;
    }
    assert_eq!(PAGE_SIZE - HDR_SIZE, 1000);

    let mut writer = CodecContext::new(PAGE_SIZE, "correct-horse").unwrap();
    let mut buf = page.clone();
    let on_disk = writer
        .codec_entry(&mut buf, FIRST_PAGE, OP_WRITE)
        .unwrap()
        .to_vec();

    // Same key recovers the 1000 body bytes exactly.
    let mut reader = CodecContext::new(PAGE_SIZE, "correct-horse").unwrap();
    let mut same_key = on_disk.clone();
    reader
        .codec_entry(&mut same_key, FIRST_PAGE, OP_READ)
        .unwrap();
    assert_eq!(&same_key[HDR_SIZE..], &page[HDR_SIZE..]);

    // A different passphrase-derived key must not reproduce them.
    let mut wrong = CodecContext::new(PAGE_SIZE, "incorrect-donkey").unwrap();
    let mut wrong_key = on_disk;
    wrong
        .codec_entry(&mut wrong_key, FIRST_PAGE, OP_READ)
        .unwrap();
    assert_ne!(&wrong_key[HDR_SIZE..], &page[HDR_SIZE..]);
}

#[test]
fn header_invariant_holds_for_any_plaintext() {
    let mut codec = CodecContext::new(2048, "header-key").unwrap();
    let salt = *codec.salt();

    // Even a page-1 whose header region is full of noise comes out with
    // the context's salt and the fixed marker.
    let mut page = vec![0x5Fu8; 2048];
    let encrypted = codec
        .codec_entry(&mut page, FIRST_PAGE, OP_WRITE)
        .unwrap();
    assert_eq!(&encrypted[..SALT_SIZE], &salt);
    assert_eq!(&encrypted[SALT_SIZE..HDR_SIZE], &FILE_MAGIC);
}

#[test]
fn iv_is_deterministic_and_unique_per_page() {
    let salt = [0xC3u8; SALT_SIZE];
    assert_eq!(derive_iv(&salt, 7), derive_iv(&salt, 7));
    assert_ne!(derive_iv(&salt, 7), derive_iv(&salt, 8));
    assert_ne!(derive_iv(&salt, 1), derive_iv(&salt, 0x0100_0001));
}

#[test]
fn reopen_recovers_salt_before_decrypting() {
    const PAGE_SIZE: usize = 512;
    let mut writer = CodecContext::new(PAGE_SIZE, "reopen-key").unwrap();
    let salt = *writer.salt();

    let mut page_one = vec![0x10u8; PAGE_SIZE];
    let disk_one = writer
        .codec_entry(&mut page_one, FIRST_PAGE, OP_WRITE)
        .unwrap()
        .to_vec();
    let mut page_two = vec![0x20u8; PAGE_SIZE];
    let disk_two = writer
        .codec_entry(&mut page_two, 2, OP_WRITE)
        .unwrap()
        .to_vec();

    // A reattached context starts with a different random salt; reading
    // page 1 first (as a pager does) adopts the stored one, after which
    // every other page decrypts correctly.
    let mut reader = CodecContext::new(PAGE_SIZE, "reopen-key").unwrap();
    let mut buf = disk_one;
    reader.codec_entry(&mut buf, FIRST_PAGE, OP_READ).unwrap();
    assert_eq!(reader.salt(), &salt);

    let mut buf = disk_two;
    reader.codec_entry(&mut buf, 2, OP_READ).unwrap();
    assert_eq!(buf, page_two);
}

#[test]
fn hex_key_of_wrong_length_fails_attach() {
    let short = format!("x'{}'", "ab".repeat(16));
    assert!(matches!(
        CodecContext::new(1024, &short),
        Err(CodecError::InvalidKeySize { .. })
    ));
}

#[test]
fn pass_through_performs_no_crypto() {
    let mut codec = CodecContext::new(1024, "pass-key").unwrap();
    let mut page = vec![0x77u8; 1024];
    let original = page.clone();
    let out = codec.codec_entry(&mut page, 3, 42).unwrap();
    assert_eq!(out, original.as_slice());
}
