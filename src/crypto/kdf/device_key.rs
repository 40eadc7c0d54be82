// src/crypto/kdf/device_key.rs

use crate::aliases::{DeviceId, DeviceKey16};
use crate::consts::DEVICE_KEY_LEN;
use crate::error::RidiError;

/// Cut the AES-128 key for key-material files out of the device identifier.
///
/// The key is the first 16 raw UTF-8 bytes of the identifier, not re-encoded
/// and not hashed. Shorter identifiers are rejected instead of zero-filled.
pub fn derive_device_key(device_id: &DeviceId) -> Result<DeviceKey16, RidiError> {
    let bytes = device_id.expose_secret().as_bytes();
    let head: [u8; DEVICE_KEY_LEN] = bytes
        .get(..DEVICE_KEY_LEN)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| {
            RidiError::InvalidKey(format!(
                "device identifier has {} bytes, need at least {DEVICE_KEY_LEN}",
                bytes.len()
            ))
        })?;
    Ok(DeviceKey16::new(head))
}
