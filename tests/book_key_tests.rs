// tests/book_key_tests.rs
//! Layer 3: key material → book key

mod common;

use common::{iv, key_material_text, vectors};
use ridicrypt_rs::aliases::DeviceId;
use ridicrypt_rs::encryptor::seal_key_material;
use ridicrypt_rs::{derive_book_key, Layer, RidiError};

#[test]
fn fixture_key_material_yields_book_key() {
    let fixture = vectors().pipeline;
    let key = derive_book_key(&fixture.key_material(), &fixture.device_id()).unwrap();
    assert_eq!(key.expose_secret(), fixture.book_key.as_bytes());
    assert_eq!(
        fixture.key_material_plaintext.chars().skip(68).take(16).collect::<String>(),
        fixture.book_key
    );
}

#[test]
fn only_first_sixteen_id_bytes_matter() {
    let fixture = vectors().pipeline;
    let mut longer = fixture.device_id[..16].to_string();
    longer.push_str("-anything-else");

    let key = derive_book_key(&fixture.key_material(), &DeviceId::new(longer)).unwrap();
    assert_eq!(key.expose_secret(), fixture.book_key.as_bytes());
}

#[test]
fn window_is_counted_in_characters() {
    let device_id = vectors().pipeline.device_id();
    // Replace the first ASCII prefix char with a 3-byte one; the character
    // window is unchanged while the byte window moves by two.
    let text = key_material_text("QwErTyUiOp123456").replacen('R', "€", 1);
    assert_eq!(text.chars().count(), 91);

    let file = seal_key_material(&text, &device_id, &iv(0x42)).unwrap();
    let key = derive_book_key(&file, &device_id).unwrap();
    assert_eq!(key.expose_secret(), b"QwErTyUiOp123456");
    assert_ne!(&text.as_bytes()[68..84], b"QwErTyUiOp123456");
}

#[test]
fn wrong_device_id() {
    let fixture = vectors().pipeline;
    let other = DeviceId::new("ffffffff-ffff-ffff-ffff-ffffffffffff".to_string());
    let err = derive_book_key(&fixture.key_material(), &other).unwrap_err();
    assert!(matches!(err, RidiError::KeyMaterialDecode(_)), "{err:?}");
    assert_eq!(err.layer(), Some(Layer::BookKey));
}

#[test]
fn misframed_files() {
    let device_id = vectors().pipeline.device_id();
    for len in [0usize, 15, 16, 31] {
        let err = derive_book_key(&vec![0u8; len], &device_id).unwrap_err();
        assert!(matches!(err, RidiError::KeyMaterialDecode(_)), "length {len}");
    }
}

#[test]
fn short_text_is_rejected() {
    let device_id = vectors().pipeline.device_id();
    let file = seal_key_material(&"k".repeat(83), &device_id, &iv(1)).unwrap();
    assert!(matches!(
        derive_book_key(&file, &device_id),
        Err(RidiError::KeyMaterialDecode(_))
    ));
}
