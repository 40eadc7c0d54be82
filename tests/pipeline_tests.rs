// tests/pipeline_tests.rs
//! All four layers end to end

mod common;

use common::{iv, key_material_text, vectors};
use ridicrypt_rs::aliases::DeviceId;
use ridicrypt_rs::encryptor::{encode_secret, seal_content, seal_key_material};
use ridicrypt_rs::pipeline::{unlock_device_with, MemoryCredentialStore, MemoryTitle};
use ridicrypt_rs::{
    decrypt_library, decrypt_title, unlock_device, CancelFlag, Conformant, ContentBatch,
    ContentBatchBuilder, FileStatus, Layer, RidiError, SettingsVault,
};

fn batch() -> ContentBatch {
    ContentBatchBuilder::new().with_workers(2).build().unwrap()
}

fn fixture_title() -> MemoryTitle {
    let fixture = vectors().pipeline;
    MemoryTitle::new("852000123", fixture.key_material())
        .with_file("Text/ch1.xhtml", fixture.content())
        .with_file("Images/cover.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00])
}

#[test]
fn credential_to_plaintext() {
    let fixture = vectors().pipeline;
    let store = MemoryCredentialStore::new().with_device_credential(fixture.secret_b64.clone());

    let device_id = unlock_device(&store, &fixture.settings_blob()).unwrap();
    assert_eq!(device_id.expose_secret(), &fixture.device_id);

    let report = decrypt_title(&fixture_title(), &device_id, &batch()).unwrap();
    assert_eq!(report.title_id, "852000123");
    assert_eq!(report.files[0].name, "Text/ch1.xhtml");
    assert_eq!(report.files[0].outcome.bytes(), fixture.content_plaintext.as_bytes());
    assert_eq!(report.files[1].outcome.status(), FileStatus::PassedThrough);
    assert_eq!(report.stats.warnings(), 1);
}

#[test]
fn missing_credential_is_collaborator_error() {
    let fixture = vectors().pipeline;
    let err = unlock_device(&MemoryCredentialStore::new(), &fixture.settings_blob()).unwrap_err();
    assert!(matches!(err, RidiError::Collaborator(_)));
}

#[test]
fn wrong_credential_fails_at_settings() {
    let fixture = vectors().pipeline;
    let wrong = ridicrypt_rs::aliases::DeviceSecret::new(fixture.wrong_secret.clone());
    let store = MemoryCredentialStore::new().with_device_credential(encode_secret(&wrong));

    let err = unlock_device(&store, &fixture.settings_blob()).unwrap_err();
    assert_eq!(err.layer(), Some(Layer::Settings));
    assert!(err.is_fatal_for_library());
}

#[test]
fn bad_title_is_skipped_others_continue() {
    let fixture = vectors().pipeline;
    let device_id = fixture.device_id();
    let book_key = fixture.book_key();

    let second = MemoryTitle::new(
        "second",
        seal_key_material(&key_material_text(&fixture.book_key), &device_id, &iv(9)).unwrap(),
    )
    .with_file("a.xhtml", seal_content(b"second title", &book_key, &iv(3)).unwrap());

    let titles = vec![
        fixture_title(),
        MemoryTitle::new("broken", vec![0u8; 20]),
        second,
    ];
    let report = decrypt_library(&titles, &device_id, &batch());

    assert_eq!(report.decrypted.len(), 2);
    assert_eq!(report.decrypted[1].title_id, "second");
    assert_eq!(report.decrypted[1].files[0].outcome.bytes(), b"second title");

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].title_id, "broken");
    assert_eq!(report.skipped[0].layer, Some(Layer::BookKey));
    assert!(report.not_started.is_empty());

    let stats = report.stats();
    assert_eq!(stats.count(FileStatus::Decrypted), 2);
    assert_eq!(stats.count(FileStatus::PassedThrough), 1);
}

#[test]
fn short_device_id_skips_title_at_book_key_layer() {
    let fixture = vectors().pipeline;
    let titles = vec![MemoryTitle::new("852000123", fixture.key_material())];
    let short = DeviceId::new("short".to_string());

    let report = decrypt_library(&titles, &short, &batch());

    assert!(report.decrypted.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].layer, Some(Layer::BookKey));
    assert!(matches!(report.skipped[0].error, RidiError::KeyMaterialDecode(_)));
}

#[test]
fn conformant_vault_is_fatal_at_settings_layer() {
    let fixture = vectors().pipeline;
    let store = MemoryCredentialStore::new().with_device_credential(fixture.secret_b64.clone());

    let err = unlock_device_with(
        &SettingsVault::with_schedule(Conformant),
        &store,
        &fixture.settings_blob(),
    )
    .unwrap_err();
    assert_eq!(err.layer(), Some(Layer::Settings));
    assert!(err.is_fatal_for_library());
}

#[test]
fn cancelled_library_starts_nothing() {
    let fixture = vectors().pipeline;
    let cancel = CancelFlag::new();
    let batch = ContentBatchBuilder::new()
        .with_cancel_flag(cancel.clone())
        .build()
        .unwrap();
    cancel.cancel();

    let titles = vec![fixture_title(), fixture_title()];
    let report = decrypt_library(&titles, &fixture.device_id(), &batch);

    assert!(report.decrypted.is_empty());
    assert!(report.skipped.is_empty());
    assert_eq!(report.not_started, vec!["852000123", "852000123"]);
}
