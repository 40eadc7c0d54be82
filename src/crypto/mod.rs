// src/crypto/mod.rs

//! Low-level crypto primitives.
//!
//! - [`schedule`] - pluggable key schedules (conformant AES and the vendor generalization)
//! - [`rijndael`] - block cipher over any schedule, ECB helpers
//! - [`cbc`] - conformant AES-128-CBC used by the key-material and content layers
//! - [`kdf`] - byte-level key derivations feeding the ciphers

pub mod cbc;
pub mod kdf;
pub mod rijndael;
#[cfg(feature = "rand")]
pub mod rng;
pub mod schedule;
