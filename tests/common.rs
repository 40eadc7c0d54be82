// tests/common.rs
//! Known-answer vectors and fixtures shared across test files

#![allow(dead_code)] // each test binary uses a different subset

use ridicrypt_rs::aliases::{BookKey16, DeviceId, DeviceSecret, Iv16};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct BlockVector {
    pub name: String,
    pub key_hex: String,
    pub plaintext_hex: String,
    pub ciphertext_hex: String,
}

#[derive(Debug, Deserialize)]
pub struct PipelineFixture {
    pub secret_b64: String,
    pub secret: String,
    pub wrong_secret: String,
    pub settings_header_byte: u8,
    pub settings_ciphertext_hex: String,
    pub settings_plaintext: String,
    pub device_id: String,
    pub key_material_hex: String,
    pub key_material_plaintext: String,
    pub book_key: String,
    pub content_hex: String,
    pub content_plaintext: String,
}

#[derive(Debug, Deserialize)]
pub struct Vectors {
    pub fips197: Vec<BlockVector>,
    pub schedule_vectors: Vec<BlockVector>,
    pub aes256_truncated_48_ciphertext_hex: String,
    pub pipeline: PipelineFixture,
}

pub fn vectors() -> Vectors {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("vector")
        .join("data")
        .join("ridi_vectors.json");

    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));

    serde_json::from_str(&content).unwrap_or_else(|e| panic!("Failed to parse vectors: {e}"))
}

pub fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap_or_else(|e| panic!("bad hex {s}: {e}"))
}

impl PipelineFixture {
    pub fn settings_blob(&self) -> Vec<u8> {
        let mut blob = vec![self.settings_header_byte; 256];
        blob.extend(unhex(&self.settings_ciphertext_hex));
        blob
    }

    pub fn secret(&self) -> DeviceSecret {
        DeviceSecret::new(self.secret.clone())
    }

    pub fn device_id(&self) -> DeviceId {
        DeviceId::new(self.device_id.clone())
    }

    pub fn book_key(&self) -> BookKey16 {
        let bytes: [u8; 16] = self.book_key.as_bytes().try_into().expect("16-byte book key");
        BookKey16::new(bytes)
    }

    pub fn key_material(&self) -> Vec<u8> {
        unhex(&self.key_material_hex)
    }

    pub fn content(&self) -> Vec<u8> {
        unhex(&self.content_hex)
    }
}

pub fn iv(byte: u8) -> Iv16 {
    Iv16::new([byte; 16])
}

/// An ASCII key-material text whose characters 68..84 are `key`.
pub fn key_material_text(key: &str) -> String {
    assert_eq!(key.len(), 16);
    format!(
        "{}{}{}",
        "RIDI-KEYMATERIAL-v1|title=000000001|issued=2024-01-01T00:00:00Z|k=AA",
        key,
        "|sig=00"
    )
}
