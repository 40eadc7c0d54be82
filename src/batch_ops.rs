//! Layer-4 batches: one book key, many content files.
//!
//! Files are independent and share only the read-only key, so with the
//! `batch-ops` feature they are decrypted on a bounded rayon pool. Results
//! come back in input order, keyed by name. Nothing in a batch can fail a
//! single file; irregular files are counted in [`OutcomeStats`].

#[cfg(feature = "batch-ops")]
use rayon::prelude::*;
use tracing::{debug, info};

use crate::aliases::BookKey16;
use crate::builders::{CancelFlag, ContentBatch, ContentBatchBuilder};
use crate::decryptor::{decrypt_content, ContentOutcome, FileStatus};
use crate::error::RidiError;

/// One content file after the content layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptedFile {
    pub name: String,
    pub outcome: ContentOutcome,
}

/// Per-class file counts for one batch.
///
/// Whether a pass-through file was really plaintext, or a wrong key happened
/// to meet the size rule, cannot be told from the bytes. The counts are
/// reported so the caller can judge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeStats {
    pub untouched: usize,
    pub passed_through: usize,
    pub decrypted: usize,
    pub decrypted_unpadded: usize,
}

impl OutcomeStats {
    pub fn record(&mut self, status: FileStatus) {
        *self.slot(status) += 1;
    }

    pub fn count(&self, status: FileStatus) -> usize {
        match status {
            FileStatus::Untouched => self.untouched,
            FileStatus::PassedThrough => self.passed_through,
            FileStatus::Decrypted => self.decrypted,
            FileStatus::DecryptedUnpadded => self.decrypted_unpadded,
        }
    }

    pub fn total(&self) -> usize {
        self.untouched + self.passed_through + self.decrypted + self.decrypted_unpadded
    }

    /// Share of files with `status`, `0.0` for an empty batch.
    pub fn fraction(&self, status: FileStatus) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.count(status) as f64 / total as f64,
        }
    }

    /// Files that were not cleanly decrypted.
    pub fn warnings(&self) -> usize {
        self.total() - self.decrypted
    }

    /// One-line summary, e.g. `12 files: 10 decrypted, 1 unpadded, 1 passed through, 0 untouched`.
    pub fn summary(&self) -> String {
        format!(
            "{} files: {} decrypted, {} unpadded, {} passed through, {} untouched",
            self.total(),
            self.decrypted,
            self.decrypted_unpadded,
            self.passed_through,
            self.untouched
        )
    }

    fn slot(&mut self, status: FileStatus) -> &mut usize {
        match status {
            FileStatus::Untouched => &mut self.untouched,
            FileStatus::PassedThrough => &mut self.passed_through,
            FileStatus::Decrypted => &mut self.decrypted,
            FileStatus::DecryptedUnpadded => &mut self.decrypted_unpadded,
        }
    }
}

/// Everything a batch produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Processed files, in input order.
    pub files: Vec<DecryptedFile>,
    /// Names of files skipped because the batch was cancelled.
    pub untouched: Vec<String>,
    pub stats: OutcomeStats,
    pub cancelled: bool,
}

impl ContentBatch {
    /// Decrypt every `(name, bytes)` pair with `key` on the batch's worker pool.
    ///
    /// The cancel flag is checked before each file. Files not started when it
    /// trips are reported as untouched.
    pub fn decrypt(&self, files: Vec<(String, Vec<u8>)>, key: &BookKey16) -> BatchReport {
        debug!(files = files.len(), workers = self.workers, "decrypting content batch");

        let results = self.run(files, key);

        let mut report = BatchReport::default();
        for (name, outcome) in results {
            match outcome {
                Some(outcome) => {
                    report.stats.record(outcome.status());
                    report.files.push(DecryptedFile { name, outcome });
                }
                None => {
                    report.stats.record(FileStatus::Untouched);
                    report.untouched.push(name);
                }
            }
        }
        report.cancelled = !report.untouched.is_empty();

        if report.cancelled {
            info!(untouched = report.untouched.len(), "content batch cancelled");
        }
        report
    }

    #[cfg(feature = "batch-ops")]
    fn run(
        &self,
        files: Vec<(String, Vec<u8>)>,
        key: &BookKey16,
    ) -> Vec<(String, Option<ContentOutcome>)> {
        let cancel = &self.cancel;
        self.pool.install(|| {
            files
                .into_par_iter()
                .map(|(name, data)| decrypt_one(name, data, key, cancel))
                .collect()
        })
    }

    #[cfg(not(feature = "batch-ops"))]
    fn run(
        &self,
        files: Vec<(String, Vec<u8>)>,
        key: &BookKey16,
    ) -> Vec<(String, Option<ContentOutcome>)> {
        files
            .into_iter()
            .map(|(name, data)| decrypt_one(name, data, key, &self.cancel))
            .collect()
    }
}

#[inline]
fn decrypt_one(
    name: String,
    data: Vec<u8>,
    key: &BookKey16,
    cancel: &CancelFlag,
) -> (String, Option<ContentOutcome>) {
    if cancel.is_cancelled() {
        return (name, None);
    }
    let outcome = decrypt_content(data, key);
    (name, Some(outcome))
}

/// Decrypt a batch with default settings (all cores, no cancellation).
///
/// Starts a fresh worker pool. Build a [`ContentBatch`] once when decrypting
/// many titles.
///
/// # Errors
///
/// [`RidiError::Batch`] when the worker pool cannot be created.
pub fn decrypt_batch(
    files: Vec<(String, Vec<u8>)>,
    key: &BookKey16,
) -> Result<BatchReport, RidiError> {
    Ok(ContentBatchBuilder::new().build()?.decrypt(files, key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions() {
        let mut stats = OutcomeStats::default();
        assert_eq!(stats.fraction(FileStatus::Decrypted), 0.0);
        stats.record(FileStatus::Decrypted);
        stats.record(FileStatus::Decrypted);
        stats.record(FileStatus::Decrypted);
        stats.record(FileStatus::PassedThrough);
        assert_eq!(stats.fraction(FileStatus::Decrypted), 0.75);
        assert_eq!(stats.warnings(), 1);
        assert_eq!(
            stats.summary(),
            "4 files: 3 decrypted, 0 unpadded, 1 passed through, 0 untouched"
        );
    }
}
