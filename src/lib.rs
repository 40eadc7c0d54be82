// src/lib.rs

//! Key derivation and decryption for the Ridi desktop reader's local library.
//!
//! Four chained layers turn the device secret from the OS credential store
//! into readable book files:
//!
//! 1. [`decode_secret`] - base64 credential → 36-character device secret
//! 2. [`SettingsVault`] - settings blob → device identifier, using the vendor's
//!    generalized Rijndael key schedule (18 rounds for the 48-byte key)
//! 3. [`derive_book_key`] - key-material file → 16-byte book key
//! 4. [`decrypt_content`] / [`ContentBatch`] - content files → plaintext
//!
//! [`pipeline`] runs all four against caller-supplied collaborators.

pub mod aliases;
pub mod batch_ops;
pub mod builders;
pub mod consts;
pub mod crypto;
pub mod decryptor;
pub mod encryptor;
pub mod error;
pub mod header;
pub mod pipeline;
pub mod utils;

// High-level API
pub use decryptor::{
    decode_secret, decrypt_content, derive_book_key, open_settings, ContentOutcome, FileStatus,
    SettingsRecord, SettingsVault,
};
pub use error::{Layer, RidiError};

pub use batch_ops::{decrypt_batch, BatchReport, DecryptedFile, OutcomeStats};
pub use builders::{CancelFlag, ContentBatch, ContentBatchBuilder};
pub use pipeline::{
    decrypt_library, decrypt_title, unlock_device, CredentialStore, LibraryReport, TitleReport,
    TitleSource,
};

// Key schedules are public at the root so tests and tools can pin a strategy.
pub use crypto::schedule::{Conformant, Generalized, KeySchedule};
