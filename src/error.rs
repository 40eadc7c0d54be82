//! # Error Types
//!
//! This module defines the error types used throughout the library.
//! All fallible operations return [`Result<T, RidiError>`](RidiError).
//!
//! Content files (layer 4) never produce an error: irregular files are
//! classified outcomes, see [`crate::decryptor::ContentOutcome`].

use std::fmt;
use thiserror::Error;

/// The error type for every layer of the key-derivation pipeline.
///
/// Messages never include key material, secrets or device identifiers.
#[derive(Error, Debug)]
pub enum RidiError {
    /// I/O error reported by a filesystem collaborator.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored credential is not valid base64, or does not decode to
    /// exactly 36 bytes of UTF-8.
    #[error("Malformed credential: {0}")]
    MalformedCredential(String),

    /// The decrypted settings plaintext does not end in valid PKCS#7 padding.
    ///
    /// This almost always means the device secret was wrong.
    #[error("Settings plaintext has invalid padding (wrong device secret?)")]
    UnpaddablePlaintext,

    /// The settings plaintext is not UTF-8 or not a well-formed record.
    #[error("Settings parse error: {0}")]
    SettingsParse(String),

    /// The settings record parsed, but has no device identifier at the expected path.
    /// The contained value is the JSON pointer that was looked up.
    #[error("Settings record has no device identifier at {0}")]
    MissingDeviceId(String),

    /// The key schedule configured on the settings vault refused the derived key.
    #[error("Settings key rejected: {0}")]
    SettingsKey(String),

    /// A per-title key-material file could not be turned into a book key:
    /// wrong length, bad padding, invalid UTF-8 or too few characters.
    #[error("Key material decode error: {0}")]
    KeyMaterialDecode(String),

    /// A key does not fit the requested key schedule or cipher.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// A block-mode primitive was handed input that is not a whole number of blocks.
    #[error("Input of {len} bytes is not a multiple of the 16-byte block size")]
    BlockAlignment { len: usize },

    /// A credential store or title source failed to deliver its data.
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    /// The content worker pool could not be set up.
    #[error("Batch error: {0}")]
    Batch(String),
}

/// The pipeline layer an error originated in.
///
/// Used to tell the user which stage a skipped title failed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Secret,
    Settings,
    BookKey,
    Content,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layer::Secret => "secret decoder",
            Layer::Settings => "settings vault",
            Layer::BookKey => "book key deriver",
            Layer::Content => "content decryptor",
        };
        f.write_str(name)
    }
}

impl RidiError {
    /// The layer this error belongs to, if it maps onto one.
    ///
    /// `Io`, `Collaborator`, `InvalidKey` and `BlockAlignment` come from
    /// collaborators or shared primitives and return `None`. The layers
    /// rewrap primitive failures into their own variants.
    pub fn layer(&self) -> Option<Layer> {
        match self {
            RidiError::MalformedCredential(_) => Some(Layer::Secret),
            RidiError::UnpaddablePlaintext
            | RidiError::SettingsParse(_)
            | RidiError::SettingsKey(_)
            | RidiError::MissingDeviceId(_) => Some(Layer::Settings),
            RidiError::KeyMaterialDecode(_) => Some(Layer::BookKey),
            RidiError::Batch(_) => Some(Layer::Content),
            RidiError::Io(_)
            | RidiError::InvalidKey(_)
            | RidiError::BlockAlignment { .. }
            | RidiError::Collaborator(_) => None,
        }
    }

    /// `true` when the error invalidates every title, not just the current one.
    ///
    /// Secret and settings failures gate the shared device identifier.
    pub fn is_fatal_for_library(&self) -> bool {
        matches!(self.layer(), Some(Layer::Secret | Layer::Settings))
    }
}
