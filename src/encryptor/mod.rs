// src/encryptor/mod.rs

//! Sealing side: the inverse of every decryption layer.
//!
//! Builds settings blobs, key-material files and content files from known
//! plaintext. Used to create fixtures and to round-trip the vendor cipher.

pub(crate) mod seal;

pub use seal::{encode_secret, seal_content, seal_key_material, seal_settings};
#[cfg(feature = "rand")]
pub use seal::{seal_content_random_iv, seal_key_material_random_iv};
