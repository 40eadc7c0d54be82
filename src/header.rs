//! # Buffer Framing
//!
//! The three encrypted buffer formats share one of two framings:
//!
//! - **Settings blob**: `256-byte opaque header ‖ ECB ciphertext`
//! - **Key-material file** and **content file**: `16-byte IV ‖ CBC ciphertext`
//!
//! Nothing here decrypts. The functions only split buffers and decide whether
//! a content file is shaped like ciphertext at all.

use crate::consts::{BLOCK_SIZE, SETTINGS_HEADER_LEN};
use crate::error::RidiError;

/// Why a content file was handed back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassThroughReason {
    /// Shorter than one IV.
    TooShort,
    /// Exactly one IV long, no ciphertext behind it.
    NoCiphertext,
    /// The bytes after the IV are not a multiple of the block size.
    Unaligned,
}

/// Shape of a content file, decided from its length alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentLayout<'a> {
    /// `IV ‖ ciphertext` with a positive, block-aligned ciphertext length.
    Encrypted { iv: &'a [u8; 16], ciphertext: &'a [u8] },
    /// Not decryptable by this layer; the file is passed through.
    Plain(PassThroughReason),
}

/// Split a settings blob into its opaque header and the ciphertext behind it.
///
/// The header is never interpreted. Fails when the blob is not longer than the
/// header or when the ciphertext is not block-aligned.
///
/// # Example
///
/// ```
/// use ridicrypt_rs::header::split_settings_blob;
///
/// let blob = [0u8; 256 + 32];
/// let ciphertext = split_settings_blob(&blob)?;
/// assert_eq!(ciphertext.len(), 32);
/// # Ok::<(), ridicrypt_rs::RidiError>(())
/// ```
pub fn split_settings_blob(blob: &[u8]) -> Result<&[u8], RidiError> {
    if blob.len() <= SETTINGS_HEADER_LEN {
        return Err(RidiError::SettingsParse(format!(
            "settings blob is {} bytes, expected more than the {SETTINGS_HEADER_LEN}-byte header",
            blob.len()
        )));
    }
    let ciphertext = &blob[SETTINGS_HEADER_LEN..];
    if ciphertext.len() % BLOCK_SIZE != 0 {
        // A misaligned ciphertext cannot decrypt to valid padding either way.
        return Err(RidiError::UnpaddablePlaintext);
    }
    Ok(ciphertext)
}

/// Split a key-material file into `(iv, ciphertext)`.
///
/// The ciphertext must be a positive multiple of 16 bytes.
pub fn split_key_material(file: &[u8]) -> Result<(&[u8; 16], &[u8]), RidiError> {
    match classify_content(file) {
        ContentLayout::Encrypted { iv, ciphertext } => Ok((iv, ciphertext)),
        ContentLayout::Plain(reason) => Err(RidiError::KeyMaterialDecode(format!(
            "key material file of {} bytes is not IV + block-aligned ciphertext ({reason:?})",
            file.len()
        ))),
    }
}

/// Decide from its length whether a content file is `IV ‖ ciphertext`.
///
/// A file qualifies only if it is at least 16 bytes long and `len - 16` is a
/// positive multiple of 16.
pub fn classify_content(file: &[u8]) -> ContentLayout<'_> {
    let Some((iv, ciphertext)) = file.split_first_chunk::<BLOCK_SIZE>() else {
        return ContentLayout::Plain(PassThroughReason::TooShort);
    };
    if ciphertext.is_empty() {
        ContentLayout::Plain(PassThroughReason::NoCiphertext)
    } else if ciphertext.len() % BLOCK_SIZE != 0 {
        ContentLayout::Plain(PassThroughReason::Unaligned)
    } else {
        ContentLayout::Encrypted { iv, ciphertext }
    }
}
