// src/decryptor/content.rs
//! Layer 4: content file + book key → plaintext
//!
//! Never fails. A file that is not shaped like `IV ‖ ciphertext` is handed
//! back untouched, and a decryption whose padding does not check out is
//! returned without trimming. Both cases are visible in [`ContentOutcome`].

use crate::aliases::BookKey16;
use crate::crypto::cbc::decrypt_cbc_aligned;
use crate::header::{classify_content, ContentLayout, PassThroughReason};
use crate::utils::pkcs7_padding_len;

/// Where a content file ended up. `Untouched` only occurs in batches that were cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileStatus {
    Untouched,
    PassedThrough,
    Decrypted,
    DecryptedUnpadded,
}

/// Result of running one content file through the content layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentOutcome {
    /// Decrypted, valid PKCS#7 padding removed.
    Decrypted(Vec<u8>),
    /// Decrypted, but the padding was invalid so nothing was trimmed.
    /// Usually a wrong key.
    DecryptedUnpadded(Vec<u8>),
    /// Not decryptable by this layer; these are the input bytes, unchanged.
    PassedThrough {
        data: Vec<u8>,
        reason: PassThroughReason,
    },
}

impl ContentOutcome {
    pub fn status(&self) -> FileStatus {
        match self {
            ContentOutcome::Decrypted(_) => FileStatus::Decrypted,
            ContentOutcome::DecryptedUnpadded(_) => FileStatus::DecryptedUnpadded,
            ContentOutcome::PassedThrough { .. } => FileStatus::PassedThrough,
        }
    }

    /// The bytes to write out for this file.
    pub fn bytes(&self) -> &[u8] {
        match self {
            ContentOutcome::Decrypted(data)
            | ContentOutcome::DecryptedUnpadded(data)
            | ContentOutcome::PassedThrough { data, .. } => data,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            ContentOutcome::Decrypted(data)
            | ContentOutcome::DecryptedUnpadded(data)
            | ContentOutcome::PassedThrough { data, .. } => data,
        }
    }

    /// `true` for anything other than a clean decryption.
    pub fn is_warning(&self) -> bool {
        !matches!(self, ContentOutcome::Decrypted(_))
    }
}

/// Decrypt one content file with the title's book key.
///
/// Takes the buffer by value so pass-through returns the very same bytes.
///
/// # Example
///
/// ```
/// use ridicrypt_rs::aliases::BookKey16;
/// use ridicrypt_rs::decryptor::{decrypt_content, FileStatus};
///
/// let key = BookKey16::new(*b"0123456789abcdef");
/// let outcome = decrypt_content(b"<html/>".to_vec(), &key);
/// assert_eq!(outcome.status(), FileStatus::PassedThrough);
/// assert_eq!(outcome.bytes(), b"<html/>");
/// ```
pub fn decrypt_content(file: Vec<u8>, key: &BookKey16) -> ContentOutcome {
    let mut plaintext = match classify_content(&file) {
        ContentLayout::Plain(reason) => {
            return ContentOutcome::PassedThrough { data: file, reason };
        }
        ContentLayout::Encrypted { iv, ciphertext } => {
            decrypt_cbc_aligned(key.expose_secret(), iv, ciphertext)
        }
    };

    match pkcs7_padding_len(&plaintext) {
        Some(pad) => {
            plaintext.truncate(plaintext.len() - pad);
            ContentOutcome::Decrypted(plaintext)
        }
        None => ContentOutcome::DecryptedUnpadded(plaintext),
    }
}
