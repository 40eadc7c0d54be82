// src/crypto/cbc.rs
//! Conformant AES-128-CBC over the `aes` crate
//!
//! Key-material files and content files both use plain AES-128-CBC. Padding
//! is left to the caller: the book-key layer removes it strictly, the content
//! layer tolerantly.

use crate::aliases::Iv16;
use crate::consts::BLOCK_SIZE;
use crate::error::RidiError;
use crate::utils::xor_blocks;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128Dec, Aes128Enc, Block as AesBlock};

/// Decrypt block-aligned `ciphertext` with AES-128-CBC. No padding is removed.
#[inline]
pub fn decrypt_cbc(key: &[u8; 16], iv: &[u8; 16], ciphertext: &[u8]) -> Result<Vec<u8>, RidiError> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(RidiError::BlockAlignment {
            len: ciphertext.len(),
        });
    }

    Ok(decrypt_cbc_aligned(key, iv, ciphertext))
}

/// AES-128-CBC decryption of whole blocks, for callers that already checked
/// alignment. A trailing partial block is ignored.
#[inline]
pub fn decrypt_cbc_aligned(key: &[u8; 16], iv: &[u8; 16], ciphertext: &[u8]) -> Vec<u8> {
    let cipher = Aes128Dec::new(key.into());
    let blocks = ciphertext.len() / BLOCK_SIZE;
    let mut plaintext = vec![0u8; blocks * BLOCK_SIZE];
    let mut previous: &[u8] = iv;

    for (chunk, out) in ciphertext
        .chunks_exact(BLOCK_SIZE)
        .zip(plaintext.chunks_exact_mut(BLOCK_SIZE))
    {
        let mut block = *AesBlock::from_slice(chunk);
        cipher.decrypt_block(&mut block);
        xor_blocks(block.as_slice(), previous, out);
        previous = chunk;
    }

    plaintext
}

/// Encrypt block-aligned `plaintext` with AES-128-CBC. No padding is added.
#[inline]
pub fn encrypt_cbc(key: &[u8; 16], iv: &Iv16, plaintext: &[u8]) -> Result<Vec<u8>, RidiError> {
    if plaintext.len() % BLOCK_SIZE != 0 {
        return Err(RidiError::BlockAlignment {
            len: plaintext.len(),
        });
    }

    let cipher = Aes128Enc::new(key.into());
    let mut ciphertext = Vec::with_capacity(plaintext.len());
    let mut previous: [u8; 16] = *iv.expose_secret();

    for chunk in plaintext.chunks_exact(BLOCK_SIZE) {
        let mut mixed = [0u8; 16];
        xor_blocks(chunk, &previous, &mut mixed);
        let mut block = AesBlock::from(mixed);
        cipher.encrypt_block(&mut block);
        previous.copy_from_slice(block.as_slice());
        ciphertext.extend_from_slice(&previous);
    }

    Ok(ciphertext)
}
