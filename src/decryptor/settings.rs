// src/decryptor/settings.rs
//! Layer 2: settings blob + device secret → settings record
//!
//! ```text
//! blob = [256-byte opaque header][ciphertext, 16-byte aligned]
//! key  = PKCS7(secret bytes) → 48 bytes → 12 words → 18 rounds
//! ECB decrypt with the generalized schedule, strip PKCS#7 by hand, parse JSON
//! ```

use crate::aliases::{DeviceId, DeviceSecret};
use crate::consts::{DEVICE_ID_POINTER, DEVICE_KEY_LEN};
use crate::crypto::kdf::settings_key::derive_settings_key;
use crate::crypto::rijndael::Rijndael;
use crate::crypto::schedule::{Generalized, KeySchedule};
use crate::error::RidiError;
use crate::header::split_settings_blob;
use crate::utils::pkcs7_padding_len;
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Decrypted settings: the full JSON document plus the device identifier found in it.
pub struct SettingsRecord {
    document: Value,
    device_id: DeviceId,
}

impl SettingsRecord {
    /// The whole parsed document, unrelated sibling fields included.
    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    pub fn into_device_id(self) -> DeviceId {
        self.device_id
    }
}

// The document holds the device identifier in clear, so only its shape is printed.
impl fmt::Debug for SettingsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys = self.document.as_object().map_or(0, |o| o.len());
        f.debug_struct("SettingsRecord")
            .field("top_level_keys", &keys)
            .field("device_id", &"[REDACTED]")
            .finish()
    }
}

/// Opens settings blobs with a configurable key schedule and device-id location.
///
/// The default is the vendor's [`Generalized`] schedule and
/// [`DEVICE_ID_POINTER`]. Plugging in [`crate::crypto::schedule::Conformant`]
/// makes every real blob fail with [`RidiError::SettingsKey`], since the
/// derived key is 48 bytes long.
#[derive(Debug, Clone)]
pub struct SettingsVault<S: KeySchedule = Generalized> {
    schedule: S,
    device_id_pointer: String,
}

impl SettingsVault<Generalized> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_schedule(Generalized)
    }
}

impl Default for SettingsVault<Generalized> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: KeySchedule> SettingsVault<S> {
    #[must_use]
    pub fn with_schedule(schedule: S) -> Self {
        Self {
            schedule,
            device_id_pointer: DEVICE_ID_POINTER.to_string(),
        }
    }

    /// Look the device identifier up at another JSON pointer (RFC 6901).
    #[must_use]
    pub fn with_device_id_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.device_id_pointer = pointer.into();
        self
    }

    pub fn device_id_pointer(&self) -> &str {
        &self.device_id_pointer
    }

    /// Decrypt and parse a settings blob.
    ///
    /// # Errors
    ///
    /// - [`RidiError::UnpaddablePlaintext`] - padding check failed, usually a wrong secret
    /// - [`RidiError::SettingsParse`] - blob too short, not UTF-8, not JSON, or identifier too short
    /// - [`RidiError::MissingDeviceId`] - no string at the device-id pointer
    /// - [`RidiError::SettingsKey`] - the schedule rejected the derived key
    pub fn open(&self, blob: &[u8], secret: &DeviceSecret) -> Result<SettingsRecord, RidiError> {
        let ciphertext = split_settings_blob(blob)?;

        let key = derive_settings_key(secret);
        let cipher = Rijndael::new(&self.schedule, key.expose_secret()).map_err(|e| match e {
            RidiError::InvalidKey(reason) => {
                RidiError::SettingsKey(format!("{} schedule: {reason}", self.schedule.name()))
            }
            other => other,
        })?;
        debug!(
            schedule = self.schedule.name(),
            rounds = cipher.rounds(),
            ciphertext_len = ciphertext.len(),
            "decrypting settings blob"
        );

        let mut plaintext = ciphertext.to_vec();
        cipher.decrypt_ecb(&mut plaintext)?;

        let pad = pkcs7_padding_len(&plaintext).ok_or(RidiError::UnpaddablePlaintext)?;
        plaintext.truncate(plaintext.len() - pad);

        let text = String::from_utf8(plaintext)
            .map_err(|e| RidiError::SettingsParse(format!("plaintext is not UTF-8: {e}")))?;
        let document: Value = serde_json::from_str(&text)
            .map_err(|e| RidiError::SettingsParse(format!("plaintext is not JSON: {e}")))?;

        let device_id = document
            .pointer(&self.device_id_pointer)
            .and_then(Value::as_str)
            .ok_or_else(|| RidiError::MissingDeviceId(self.device_id_pointer.clone()))?;

        if device_id.len() < DEVICE_KEY_LEN {
            return Err(RidiError::SettingsParse(format!(
                "device identifier has {} bytes, need at least {DEVICE_KEY_LEN}",
                device_id.len()
            )));
        }

        let device_id = DeviceId::new(device_id.to_string());
        Ok(SettingsRecord {
            document,
            device_id,
        })
    }
}

/// [`SettingsVault::open`] with the default vault.
pub fn open_settings(blob: &[u8], secret: &DeviceSecret) -> Result<SettingsRecord, RidiError> {
    SettingsVault::new().open(blob, secret)
}
