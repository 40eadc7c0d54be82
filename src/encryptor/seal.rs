// src/encryptor/seal.rs
//! Inverse of each decryption layer

use crate::aliases::{BookKey16, DeviceId, DeviceSecret, Iv16};
use crate::consts::{BLOCK_SIZE, SETTINGS_HEADER_LEN};
use crate::crypto::cbc::encrypt_cbc;
use crate::crypto::kdf::device_key::derive_device_key;
use crate::crypto::kdf::settings_key::derive_settings_key;
use crate::crypto::rijndael::Rijndael;
use crate::crypto::schedule::Generalized;
use crate::error::RidiError;
use crate::utils::pad_pkcs7;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Base64-encode a device secret the way the credential store holds it.
pub fn encode_secret(secret: &DeviceSecret) -> String {
    STANDARD.encode(secret.expose_secret().as_bytes())
}

/// Build a settings blob: `header ‖ ECB(generalized, PKCS7(secret), PKCS7(plaintext))`.
pub fn seal_settings(
    plaintext: &[u8],
    secret: &DeviceSecret,
    header: &[u8; SETTINGS_HEADER_LEN],
) -> Result<Vec<u8>, RidiError> {
    let key = derive_settings_key(secret);
    let cipher = Rijndael::new(&Generalized, key.expose_secret())?;

    let mut body = pad_pkcs7(plaintext, BLOCK_SIZE);
    cipher.encrypt_ecb(&mut body)?;

    let mut blob = Vec::with_capacity(SETTINGS_HEADER_LEN + body.len());
    blob.extend_from_slice(header);
    blob.extend_from_slice(&body);
    Ok(blob)
}

/// Build a key-material file: `iv ‖ CBC(deviceId[0..16], PKCS7(text))`.
pub fn seal_key_material(text: &str, device_id: &DeviceId, iv: &Iv16) -> Result<Vec<u8>, RidiError> {
    let key = derive_device_key(device_id)?;
    seal_cbc(text.as_bytes(), key.expose_secret(), iv)
}

/// Build a content file: `iv ‖ CBC(book key, PKCS7(plaintext))`.
pub fn seal_content(plaintext: &[u8], key: &BookKey16, iv: &Iv16) -> Result<Vec<u8>, RidiError> {
    seal_cbc(plaintext, key.expose_secret(), iv)
}

fn seal_cbc(plaintext: &[u8], key: &[u8; 16], iv: &Iv16) -> Result<Vec<u8>, RidiError> {
    let ciphertext = encrypt_cbc(key, iv, &pad_pkcs7(plaintext, BLOCK_SIZE))?;
    let mut file = Vec::with_capacity(BLOCK_SIZE + ciphertext.len());
    file.extend_from_slice(iv.expose_secret());
    file.extend_from_slice(&ciphertext);
    Ok(file)
}

/// [`seal_content`] with a fresh random IV.
#[cfg(feature = "rand")]
pub fn seal_content_random_iv(plaintext: &[u8], key: &BookKey16) -> Result<Vec<u8>, RidiError> {
    use crate::crypto::rng::SecureRandomExt;
    seal_content(plaintext, key, &Iv16::random()?)
}

/// [`seal_key_material`] with a fresh random IV.
#[cfg(feature = "rand")]
pub fn seal_key_material_random_iv(text: &str, device_id: &DeviceId) -> Result<Vec<u8>, RidiError> {
    use crate::crypto::rng::SecureRandomExt;
    seal_key_material(text, device_id, &Iv16::random()?)
}
