// src/builders/batch_builder.rs
//! Content batch configuration

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::RidiError;

/// Cooperative cancellation shared between a caller and running batches.
///
/// Checked between files, never inside one file's cipher operation. Clones
/// share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Number of cores available to this process, at least 1.
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Builder for [`ContentBatch`].
///
/// Defaults: one worker per available core, a fresh (never cancelled) flag.
///
/// # Thread Safety
///
/// The built [`ContentBatch`] is `Send + Sync` and can decrypt several titles
/// from different threads. Clones share one worker pool and one [`CancelFlag`].
///
/// # Example
///
/// ```
/// use ridicrypt_rs::builders::{CancelFlag, ContentBatchBuilder};
///
/// let cancel = CancelFlag::new();
/// let batch = ContentBatchBuilder::new()
///     .with_workers(2)
///     .with_cancel_flag(cancel.clone())
///     .build()?;
/// assert!(batch.workers() >= 1);
/// assert!(!batch.cancel_flag().is_cancelled());
/// # Ok::<(), ridicrypt_rs::RidiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ContentBatchBuilder {
    workers: usize,
    cancel: CancelFlag,
}

impl ContentBatchBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            workers: available_workers(),
            cancel: CancelFlag::new(),
        }
    }

    /// Set the worker count. Clamped to `1..=available cores`.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.clamp(1, available_workers());
        self
    }

    #[must_use]
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers
    }

    /// Start the worker pool and return the batch that owns it.
    ///
    /// # Errors
    ///
    /// [`RidiError::Batch`] when the pool threads cannot be spawned.
    pub fn build(self) -> Result<ContentBatch, RidiError> {
        #[cfg(feature = "batch-ops")]
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("ridi-content-{i}"))
            .build()
            .map(Arc::new)
            .map_err(|e| RidiError::Batch(format!("cannot start worker pool: {e}")))?;

        Ok(ContentBatch {
            workers: self.workers,
            cancel: self.cancel,
            #[cfg(feature = "batch-ops")]
            pool,
        })
    }
}

impl Default for ContentBatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A configured layer-4 batch, run with `ContentBatch::decrypt`.
#[derive(Debug, Clone)]
pub struct ContentBatch {
    pub(crate) workers: usize,
    pub(crate) cancel: CancelFlag,
    #[cfg(feature = "batch-ops")]
    pub(crate) pool: Arc<rayon::ThreadPool>,
}

impl ContentBatch {
    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }
}
