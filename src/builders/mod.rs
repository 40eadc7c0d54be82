//! # Builders
//!
//! Builder patterns for configuring pipeline operations.
//!
//! ## Modules
//!
//! - [`batch_builder`] - worker count and cancellation for content batches
//!
//! ## Usage
//!
//! Builders provide a fluent API with sensible defaults and optional customization.

pub mod batch_builder;

pub use batch_builder::{CancelFlag, ContentBatch, ContentBatchBuilder};
