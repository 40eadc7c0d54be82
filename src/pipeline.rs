//! # Pipeline
//!
//! Wires the four layers together behind two collaborator traits:
//!
//! - [`CredentialStore`] - the OS secure credential store (layer 1 input)
//! - [`TitleSource`] - one downloaded title: its key-material file and content files
//!
//! Locating files on disk and repackaging the recovered files are left to the
//! implementors of these traits.
//!
//! ```text
//! credential ─▶ decode_secret ─▶ SettingsVault::open ─▶ DeviceId      (once)
//!                                                         │
//!   per title: key material ─▶ derive_book_key ◀──────────┘
//!                                   │
//!              content files ─▶ ContentBatch::decrypt ─▶ TitleReport
//! ```

use std::collections::HashMap;

use tracing::{info, warn};

use crate::aliases::DeviceId;
use crate::batch_ops::{BatchReport, DecryptedFile, OutcomeStats};
use crate::builders::ContentBatch;
use crate::consts::{CREDENTIAL_ACCOUNT, CREDENTIAL_SERVICE};
use crate::crypto::schedule::KeySchedule;
use crate::decryptor::{decode_secret, derive_book_key, SettingsVault};
use crate::error::{Layer, RidiError};

/// Read access to the OS credential store.
pub trait CredentialStore {
    /// The stored value for `service`/`account`, as the store returns it (base64 text).
    fn read_credential(&self, service: &str, account: &str) -> Result<String, RidiError>;
}

/// One title as delivered by the filesystem collaborator.
pub trait TitleSource {
    fn title_id(&self) -> &str;

    /// Raw bytes of the title's key-material file.
    fn key_material(&self) -> Result<Vec<u8>, RidiError>;

    /// `(name, bytes)` of every content file, in the order they should be reported.
    fn content_files(&self) -> Result<Vec<(String, Vec<u8>)>, RidiError>;
}

/// In-memory [`CredentialStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    entries: HashMap<(String, String), String>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `raw` under the reader's fixed service/account pair.
    #[must_use]
    pub fn with_device_credential(mut self, raw: impl Into<String>) -> Self {
        self.insert(CREDENTIAL_SERVICE, CREDENTIAL_ACCOUNT, raw);
        self
    }

    pub fn insert(&mut self, service: &str, account: &str, value: impl Into<String>) {
        self.entries
            .insert((service.to_string(), account.to_string()), value.into());
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn read_credential(&self, service: &str, account: &str) -> Result<String, RidiError> {
        self.entries
            .get(&(service.to_string(), account.to_string()))
            .cloned()
            .ok_or_else(|| {
                RidiError::Collaborator(format!("no credential for {service}/{account}"))
            })
    }
}

/// In-memory [`TitleSource`].
#[derive(Debug, Clone)]
pub struct MemoryTitle {
    id: String,
    key_material: Vec<u8>,
    files: Vec<(String, Vec<u8>)>,
}

impl MemoryTitle {
    #[must_use]
    pub fn new(id: impl Into<String>, key_material: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            key_material,
            files: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_file(mut self, name: impl Into<String>, data: Vec<u8>) -> Self {
        self.files.push((name.into(), data));
        self
    }
}

impl TitleSource for MemoryTitle {
    fn title_id(&self) -> &str {
        &self.id
    }

    fn key_material(&self) -> Result<Vec<u8>, RidiError> {
        Ok(self.key_material.clone())
    }

    fn content_files(&self) -> Result<Vec<(String, Vec<u8>)>, RidiError> {
        Ok(self.files.clone())
    }
}

/// Layers 1 and 2: read the credential, decode it and open the settings blob.
///
/// Any error here is fatal for every title.
pub fn unlock_device<C>(store: &C, settings_blob: &[u8]) -> Result<DeviceId, RidiError>
where
    C: CredentialStore + ?Sized,
{
    unlock_device_with(&SettingsVault::new(), store, settings_blob)
}

/// [`unlock_device`] with a custom vault (schedule or device-id pointer).
pub fn unlock_device_with<S, C>(
    vault: &SettingsVault<S>,
    store: &C,
    settings_blob: &[u8],
) -> Result<DeviceId, RidiError>
where
    S: KeySchedule,
    C: CredentialStore + ?Sized,
{
    let raw = store.read_credential(CREDENTIAL_SERVICE, CREDENTIAL_ACCOUNT)?;
    let secret = decode_secret(&raw)?;
    let record = vault.open(settings_blob, &secret)?;
    info!("device unlocked");
    Ok(record.into_device_id())
}

/// Result of decrypting one title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleReport {
    pub title_id: String,
    /// Processed files, in the order the title source listed them.
    pub files: Vec<DecryptedFile>,
    pub untouched: Vec<String>,
    pub stats: OutcomeStats,
    pub cancelled: bool,
}

impl TitleReport {
    fn from_batch(title_id: String, batch: BatchReport) -> Self {
        Self {
            title_id,
            files: batch.files,
            untouched: batch.untouched,
            stats: batch.stats,
            cancelled: batch.cancelled,
        }
    }
}

/// Layers 3 and 4 for one title.
///
/// Content warnings are logged once per title as a summary.
pub fn decrypt_title<T>(
    title: &T,
    device_id: &DeviceId,
    batch: &ContentBatch,
) -> Result<TitleReport, RidiError>
where
    T: TitleSource + ?Sized,
{
    let title_id = title.title_id().to_string();

    let key_material = title.key_material()?;
    let book_key = derive_book_key(&key_material, device_id)?;
    info!(title = %title_id, "book key derived");

    let report = batch.decrypt(title.content_files()?, &book_key);
    if report.stats.warnings() > 0 {
        warn!(title = %title_id, summary = %report.stats.summary(), "content files not cleanly decrypted");
    }

    Ok(TitleReport::from_batch(title_id, report))
}

/// A title that could not be decrypted, and where it failed.
#[derive(Debug)]
pub struct SkippedTitle {
    pub title_id: String,
    pub layer: Option<Layer>,
    pub error: RidiError,
}

/// Result of decrypting many titles with one device identifier.
#[derive(Debug, Default)]
pub struct LibraryReport {
    pub decrypted: Vec<TitleReport>,
    pub skipped: Vec<SkippedTitle>,
    /// Titles never started because the batch was cancelled.
    pub not_started: Vec<String>,
}

impl LibraryReport {
    /// Content statistics summed over every decrypted title.
    pub fn stats(&self) -> OutcomeStats {
        self.decrypted
            .iter()
            .fold(OutcomeStats::default(), |mut acc, title| {
                acc.untouched += title.stats.untouched;
                acc.passed_through += title.stats.passed_through;
                acc.decrypted += title.stats.decrypted;
                acc.decrypted_unpadded += title.stats.decrypted_unpadded;
                acc
            })
    }
}

/// Decrypt every title. A failing title is skipped and recorded; the rest go on.
///
/// Cancellation is checked between titles and, inside a title, between files.
pub fn decrypt_library<T>(titles: &[T], device_id: &DeviceId, batch: &ContentBatch) -> LibraryReport
where
    T: TitleSource,
{
    let mut report = LibraryReport::default();

    for title in titles {
        if batch.cancel_flag().is_cancelled() {
            report.not_started.push(title.title_id().to_string());
            continue;
        }

        match decrypt_title(title, device_id, batch) {
            Ok(title_report) => report.decrypted.push(title_report),
            Err(error) => {
                let layer = error.layer();
                match layer {
                    Some(layer) => {
                        warn!(title = %title.title_id(), %layer, %error, "skipping title")
                    }
                    None => warn!(title = %title.title_id(), %error, "skipping title"),
                }
                report.skipped.push(SkippedTitle {
                    title_id: title.title_id().to_string(),
                    layer,
                    error,
                });
            }
        }
    }

    info!(
        decrypted = report.decrypted.len(),
        skipped = report.skipped.len(),
        summary = %report.stats().summary(),
        "library done"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_reports_missing_entries() {
        let store = MemoryCredentialStore::new();
        let err = store
            .read_credential(CREDENTIAL_SERVICE, CREDENTIAL_ACCOUNT)
            .unwrap_err();
        assert!(matches!(err, RidiError::Collaborator(_)));
        assert_eq!(err.layer(), None);
    }

    #[test]
    fn malformed_credential_stops_before_settings() {
        let store = MemoryCredentialStore::new().with_device_credential("c2hvcnQ=");
        let err = unlock_device(&store, &[0u8; 512]).unwrap_err();
        assert_eq!(err.layer(), Some(Layer::Secret));
    }
}
