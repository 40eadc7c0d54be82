// src/decryptor/secret.rs
//! Layer 1: stored credential → device secret

use crate::aliases::DeviceSecret;
use crate::consts::DEVICE_SECRET_LEN;
use crate::error::RidiError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Decode the base64 credential read from the OS credential store.
///
/// The result must be exactly 36 bytes of UTF-8 (the canonical
/// `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` form). The string is only ever used
/// as key material and is not validated beyond its length and encoding.
/// Surrounding whitespace from the store is ignored.
///
/// # Example
///
/// ```
/// use ridicrypt_rs::decode_secret;
///
/// let secret = decode_secret("OGE0MWI1MGQtOGY1Ni00NzJjLTgxOGEtZmQzYjBjYjFmNDAw")?;
/// assert_eq!(secret.expose_secret(), "8a41b50d-8f56-472c-818a-fd3b0cb1f400");
/// # Ok::<(), ridicrypt_rs::RidiError>(())
/// ```
pub fn decode_secret(raw_credential: &str) -> Result<DeviceSecret, RidiError> {
    let bytes = STANDARD
        .decode(raw_credential.trim())
        .map_err(|e| RidiError::MalformedCredential(format!("not valid base64: {e}")))?;

    if bytes.len() != DEVICE_SECRET_LEN {
        return Err(RidiError::MalformedCredential(format!(
            "decoded to {} bytes, expected {DEVICE_SECRET_LEN}",
            bytes.len()
        )));
    }

    let secret = String::from_utf8(bytes)
        .map_err(|_| RidiError::MalformedCredential("decoded bytes are not UTF-8".into()))?;

    Ok(DeviceSecret::new(secret))
}
