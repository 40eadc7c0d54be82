//! # Key Derivation
//!
//! Both derivations are plain byte manipulation, no hashing:
//!
//! - [`settings_key`] - device secret → PKCS#7-padded word key for the generalized schedule
//! - [`device_key`] - device identifier → 16-byte AES-128 key for key-material files

pub mod device_key;
pub mod settings_key;
