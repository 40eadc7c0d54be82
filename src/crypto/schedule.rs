// src/crypto/schedule.rs
//! Pluggable Rijndael key schedules
//!
//! The settings vault encrypts with a key that is longer than anything
//! FIPS-197 allows. Its cipher keeps running the key-expansion recurrence for
//! as many words as the key has, and adds rounds to match:
//!
//! | key bytes | words `Nk` | rounds `Nk + 6` | round keys `Nk + 7` |
//! |-----------|-----------|-----------------|---------------------|
//! | 16        | 4         | 10              | 11                  |
//! | 24        | 6         | 12              | 13                  |
//! | 32        | 8         | 14              | 15                  |
//! | 36        | 9         | 15              | 16                  |
//! | 48        | 12        | 18              | 19                  |
//!
//! For 16/24/32-byte keys both schedules produce the same round keys.
//! Anything else only the [`Generalized`] schedule accepts. Swapping it for a
//! conformant AES primitive silently yields different plaintext.

use crate::crypto::rijndael::SBOX;
use crate::error::RidiError;

/// Round constants indexed by `i / Nk`. Index 0 is never used.
///
/// With `Nk >= 4` the largest index reached is `(4 * (Nk + 7) - 1) / Nk <= 10`.
const RCON: [u8; 11] = [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1B, 0x36];

/// Expanded key: one 16-byte round key per round, plus the initial whitening key.
#[derive(Clone)]
pub struct RoundKeys {
    keys: Vec<[u8; 16]>,
}

impl RoundKeys {
    /// Number of cipher rounds (`round keys - 1`).
    #[inline]
    pub fn rounds(&self) -> usize {
        self.keys.len() - 1
    }

    /// Round key `round` (0 = initial whitening key).
    #[inline]
    pub fn get(&self, round: usize) -> &[u8; 16] {
        &self.keys[round]
    }

    /// Every round key, in encryption order.
    pub fn as_slice(&self) -> &[[u8; 16]] {
        &self.keys
    }
}

/// A strategy that turns raw key bytes into round keys.
pub trait KeySchedule: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Expand `key` into round keys, or reject a key length this schedule does not support.
    fn expand(&self, key: &[u8]) -> Result<RoundKeys, RidiError>;
}

/// FIPS-197 AES: 16, 24 or 32-byte keys, 10/12/14 rounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Conformant;

/// Vendor generalization: any key of at least 16 bytes whose length is a
/// multiple of 4. `Nk + 6` rounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Generalized;

impl KeySchedule for Conformant {
    fn name(&self) -> &'static str {
        "conformant"
    }

    fn expand(&self, key: &[u8]) -> Result<RoundKeys, RidiError> {
        match key.len() {
            16 | 24 | 32 => Ok(expand_words(key)),
            n => Err(RidiError::InvalidKey(format!(
                "conformant AES needs a 16, 24 or 32-byte key, got {n}"
            ))),
        }
    }
}

impl KeySchedule for Generalized {
    fn name(&self) -> &'static str {
        "generalized"
    }

    fn expand(&self, key: &[u8]) -> Result<RoundKeys, RidiError> {
        if key.len() < 16 || key.len() % 4 != 0 {
            return Err(RidiError::InvalidKey(format!(
                "generalized schedule needs at least 16 bytes in whole 32-bit words, got {}",
                key.len()
            )));
        }
        Ok(expand_words(key))
    }
}

#[inline]
fn sub_word(w: [u8; 4]) -> [u8; 4] {
    [
        SBOX[w[0] as usize],
        SBOX[w[1] as usize],
        SBOX[w[2] as usize],
        SBOX[w[3] as usize],
    ]
}

/// The Rijndael key-expansion recurrence, run for `4 * (Nk + 7)` words.
///
/// Caller guarantees `key.len()` is a multiple of 4 and at least 16.
fn expand_words(key: &[u8]) -> RoundKeys {
    let nk = key.len() / 4;
    let total_words = 4 * (nk + 7);

    let mut words: Vec<[u8; 4]> = Vec::with_capacity(total_words);
    for chunk in key.chunks_exact(4) {
        words.push([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    for i in nk..total_words {
        let mut t = words[i - 1];
        if i % nk == 0 {
            t = sub_word([t[1], t[2], t[3], t[0]]);
            t[0] ^= RCON[i / nk];
        } else if nk > 6 && i % nk == 4 {
            t = sub_word(t);
        }
        let back = words[i - nk];
        words.push([back[0] ^ t[0], back[1] ^ t[1], back[2] ^ t[2], back[3] ^ t[3]]);
    }

    let keys = words
        .chunks_exact(4)
        .map(|w| {
            let mut rk = [0u8; 16];
            for (dst, word) in rk.chunks_exact_mut(4).zip(w) {
                dst.copy_from_slice(word);
            }
            rk
        })
        .collect();

    RoundKeys { keys }
}
