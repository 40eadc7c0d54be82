// src/decryptor/book_key.rs
//! Layer 3: key-material file + device identifier → book key

use crate::aliases::{BookKey16, DeviceId};
use crate::consts::{BOOK_KEY_CHAR_END, BOOK_KEY_CHAR_START, KEY_MATERIAL_MIN_CHARS};
use crate::crypto::cbc::decrypt_cbc;
use crate::crypto::kdf::device_key::derive_device_key;
use crate::error::RidiError;
use crate::header::split_key_material;
use crate::utils::{char_window, strip_pkcs7};

/// Derive a title's 16-byte content key from its key-material file.
///
/// The file is `IV ‖ AES-128-CBC(deviceId[0..16], PKCS7(text))`. The book key
/// is characters 68..84 of `text`, counted as Unicode scalar values and
/// re-encoded as UTF-8.
///
/// # Errors
///
/// [`RidiError::KeyMaterialDecode`] when the device identifier is shorter than
/// 16 bytes, the file is misframed, the padding is wrong, the text is not
/// UTF-8, it holds fewer than 84 characters, or the key window does not encode
/// to exactly 16 bytes.
pub fn derive_book_key(key_material: &[u8], device_id: &DeviceId) -> Result<BookKey16, RidiError> {
    let (iv, ciphertext) = split_key_material(key_material)?;
    let device_key = derive_device_key(device_id).map_err(into_key_material_error)?;

    let decrypted =
        decrypt_cbc(device_key.expose_secret(), iv, ciphertext).map_err(into_key_material_error)?;
    let plaintext = strip_pkcs7(&decrypted).ok_or_else(|| {
        RidiError::KeyMaterialDecode("invalid PKCS#7 padding (wrong device identifier?)".into())
    })?;
    let text = std::str::from_utf8(plaintext)
        .map_err(|e| RidiError::KeyMaterialDecode(format!("plaintext is not UTF-8: {e}")))?;

    book_key_from_text(text)
}

fn into_key_material_error(err: RidiError) -> RidiError {
    match err {
        RidiError::InvalidKey(reason) => RidiError::KeyMaterialDecode(reason),
        RidiError::BlockAlignment { len } => {
            RidiError::KeyMaterialDecode(format!("ciphertext of {len} bytes is not block-aligned"))
        }
        other => other,
    }
}

/// Cut the book key out of decrypted key-material text.
pub fn book_key_from_text(text: &str) -> Result<BookKey16, RidiError> {
    let chars = text.chars().count();
    if chars < KEY_MATERIAL_MIN_CHARS {
        return Err(RidiError::KeyMaterialDecode(format!(
            "text has {chars} characters, need at least {KEY_MATERIAL_MIN_CHARS}"
        )));
    }

    let window = char_window(text, BOOK_KEY_CHAR_START, BOOK_KEY_CHAR_END).ok_or_else(|| {
        RidiError::KeyMaterialDecode("book key window out of range".into())
    })?;

    let key: [u8; 16] = window.as_bytes().try_into().map_err(|_| {
        RidiError::KeyMaterialDecode(format!(
            "book key characters encode to {} bytes, expected 16",
            window.len()
        ))
    })?;

    Ok(BookKey16::new(key))
}
