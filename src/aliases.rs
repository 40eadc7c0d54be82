//! # Secure-Gate Type Aliases
//!
//! Every secret that flows through the pipeline is wrapped in a
//! [`secure-gate`](https://github.com/Slurp9187/secure-gate) container, so
//! reading it requires an explicit `.expose_secret()`.
//!
//! ## Type Categories
//!
//! ### Generic Secure Buffers
//! - [`SpanBuffer<N>`] - Generic secure stack buffer for any size `N`
//!
//! ### Semantic Fixed-Size Types
//! - [`Iv16`] - 16-byte CBC initialization vector
//! - [`BookKey16`] - 16-byte per-title content key (layer 3 output)
//! - [`DeviceKey16`] - 16-byte key cut from the device identifier (layer 3 input)
//!
//! ### Dynamic Secrets
//! - [`DeviceSecret`] - decoded 36-character device secret (layer 1 output)
//! - [`DeviceId`] - device identifier read from the settings record (layer 2 output)
//! - [`SettingsKey`] - padded key material fed to the generalized schedule

use secure_gate::{Dynamic, Fixed};

// ─────────────────────────────────────────────────────────────────────────────
// SpanBuffer: generic secure stack buffer (direct alias to secure-gate's Fixed)
// ─────────────────────────────────────────────────────────────────────────────
pub type SpanBuffer<const N: usize> = Fixed<[u8; N]>;

pub type Iv16 = SpanBuffer<16>; // key-material and content IVs
pub type BookKey16 = SpanBuffer<16>; // content key, shared read-only across workers
pub type DeviceKey16 = SpanBuffer<16>; // deviceId[0..16]

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic secrets
// ─────────────────────────────────────────────────────────────────────────────
pub type DeviceSecret = Dynamic<String>;
pub type DeviceId = Dynamic<String>;
pub type SettingsKey = Dynamic<Vec<u8>>;
