// src/decryptor/mod.rs

//! The four decryption layers, in pipeline order.
//!
//! | Layer | Function | Input → Output |
//! |-------|----------|----------------|
//! | 1 | [`decode_secret`] | base64 credential → [`DeviceSecret`](crate::aliases::DeviceSecret) |
//! | 2 | [`SettingsVault::open`] | settings blob + secret → [`SettingsRecord`] |
//! | 3 | [`derive_book_key`] | key-material file + device id → [`BookKey16`](crate::aliases::BookKey16) |
//! | 4 | [`decrypt_content`] | content file + book key → [`ContentOutcome`] |
//!
//! Layers 1–3 fail fast. Layer 4 never fails.

pub(crate) mod book_key;
pub(crate) mod content;
pub(crate) mod secret;
pub(crate) mod settings;

pub use book_key::{book_key_from_text, derive_book_key};
pub use content::{decrypt_content, ContentOutcome, FileStatus};
pub use secret::decode_secret;
pub use settings::{open_settings, SettingsRecord, SettingsVault};
