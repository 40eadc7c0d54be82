// src/crypto/kdf/settings_key.rs

use crate::aliases::{DeviceSecret, SettingsKey};
use crate::consts::BLOCK_SIZE;
use crate::utils::pad_pkcs7;

/// Derive the settings-vault key from the device secret.
///
/// The secret's UTF-8 bytes are the key. When their length is not a multiple
/// of 16, PKCS#7 padding extends them to the next multiple, so a 36-byte
/// secret becomes a 48-byte (12-word, 18-round) key ending in twelve `0x0C`.
pub fn derive_settings_key(secret: &DeviceSecret) -> SettingsKey {
    let bytes = secret.expose_secret().as_bytes();
    let key = if bytes.len() % BLOCK_SIZE == 0 {
        bytes.to_vec()
    } else {
        pad_pkcs7(bytes, BLOCK_SIZE)
    };
    SettingsKey::new(key)
}
