// src/crypto/rijndael.rs
//! Table-driven Rijndael block cipher over an arbitrary number of rounds
//!
//! The round function is plain AES. Only the number of rounds varies, and it
//! comes from the [`RoundKeys`] produced by a [`KeySchedule`]. Not
//! constant-time: this is for offline recovery of local files.

use crate::crypto::schedule::{KeySchedule, RoundKeys};
use crate::error::RidiError;

type Block = [u8; 16];

pub(crate) const SBOX: [u8; 256] = [
    0x63, 0x7C, 0x77, 0x7B, 0xF2, 0x6B, 0x6F, 0xC5, 0x30, 0x01, 0x67, 0x2B, 0xFE, 0xD7, 0xAB, 0x76,
    0xCA, 0x82, 0xC9, 0x7D, 0xFA, 0x59, 0x47, 0xF0, 0xAD, 0xD4, 0xA2, 0xAF, 0x9C, 0xA4, 0x72, 0xC0,
    0xB7, 0xFD, 0x93, 0x26, 0x36, 0x3F, 0xF7, 0xCC, 0x34, 0xA5, 0xE5, 0xF1, 0x71, 0xD8, 0x31, 0x15,
    0x04, 0xC7, 0x23, 0xC3, 0x18, 0x96, 0x05, 0x9A, 0x07, 0x12, 0x80, 0xE2, 0xEB, 0x27, 0xB2, 0x75,
    0x09, 0x83, 0x2C, 0x1A, 0x1B, 0x6E, 0x5A, 0xA0, 0x52, 0x3B, 0xD6, 0xB3, 0x29, 0xE3, 0x2F, 0x84,
    0x53, 0xD1, 0x00, 0xED, 0x20, 0xFC, 0xB1, 0x5B, 0x6A, 0xCB, 0xBE, 0x39, 0x4A, 0x4C, 0x58, 0xCF,
    0xD0, 0xEF, 0xAA, 0xFB, 0x43, 0x4D, 0x33, 0x85, 0x45, 0xF9, 0x02, 0x7F, 0x50, 0x3C, 0x9F, 0xA8,
    0x51, 0xA3, 0x40, 0x8F, 0x92, 0x9D, 0x38, 0xF5, 0xBC, 0xB6, 0xDA, 0x21, 0x10, 0xFF, 0xF3, 0xD2,
    0xCD, 0x0C, 0x13, 0xEC, 0x5F, 0x97, 0x44, 0x17, 0xC4, 0xA7, 0x7E, 0x3D, 0x64, 0x5D, 0x19, 0x73,
    0x60, 0x81, 0x4F, 0xDC, 0x22, 0x2A, 0x90, 0x88, 0x46, 0xEE, 0xB8, 0x14, 0xDE, 0x5E, 0x0B, 0xDB,
    0xE0, 0x32, 0x3A, 0x0A, 0x49, 0x06, 0x24, 0x5C, 0xC2, 0xD3, 0xAC, 0x62, 0x91, 0x95, 0xE4, 0x79,
    0xE7, 0xC8, 0x37, 0x6D, 0x8D, 0xD5, 0x4E, 0xA9, 0x6C, 0x56, 0xF4, 0xEA, 0x65, 0x7A, 0xAE, 0x08,
    0xBA, 0x78, 0x25, 0x2E, 0x1C, 0xA6, 0xB4, 0xC6, 0xE8, 0xDD, 0x74, 0x1F, 0x4B, 0xBD, 0x8B, 0x8A,
    0x70, 0x3E, 0xB5, 0x66, 0x48, 0x03, 0xF6, 0x0E, 0x61, 0x35, 0x57, 0xB9, 0x86, 0xC1, 0x1D, 0x9E,
    0xE1, 0xF8, 0x98, 0x11, 0x69, 0xD9, 0x8E, 0x94, 0x9B, 0x1E, 0x87, 0xE9, 0xCE, 0x55, 0x28, 0xDF,
    0x8C, 0xA1, 0x89, 0x0D, 0xBF, 0xE6, 0x42, 0x68, 0x41, 0x99, 0x2D, 0x0F, 0xB0, 0x54, 0xBB, 0x16,
];

const INV_SBOX: [u8; 256] = invert_sbox(&SBOX);

const fn invert_sbox(sbox: &[u8; 256]) -> [u8; 256] {
    let mut inv = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        inv[sbox[i] as usize] = i as u8;
        i += 1;
    }
    inv
}

// Multiplication in GF(2^8) modulo x^8 + x^4 + x^3 + x + 1.
#[inline]
fn gmul(mut a: u8, mut b: u8) -> u8 {
    let mut p = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            p ^= a;
        }
        let hi = a & 0x80 != 0;
        a <<= 1;
        if hi {
            a ^= 0x1B;
        }
        b >>= 1;
    }
    p
}

// State is column-major: bytes [4c..4c+4] form column c.

fn sub_bytes(s: &mut Block) {
    for b in s.iter_mut() {
        *b = SBOX[*b as usize];
    }
}

fn inv_sub_bytes(s: &mut Block) {
    for b in s.iter_mut() {
        *b = INV_SBOX[*b as usize];
    }
}

fn shift_rows(s: &mut Block) {
    let t = s[1];
    s[1] = s[5];
    s[5] = s[9];
    s[9] = s[13];
    s[13] = t;
    s.swap(2, 10);
    s.swap(6, 14);
    let t = s[15];
    s[15] = s[11];
    s[11] = s[7];
    s[7] = s[3];
    s[3] = t;
}

fn inv_shift_rows(s: &mut Block) {
    let t = s[13];
    s[13] = s[9];
    s[9] = s[5];
    s[5] = s[1];
    s[1] = t;
    s.swap(2, 10);
    s.swap(6, 14);
    let t = s[3];
    s[3] = s[7];
    s[7] = s[11];
    s[11] = s[15];
    s[15] = t;
}

fn mix_columns(s: &mut Block) {
    for col in s.chunks_exact_mut(4) {
        let (s0, s1, s2, s3) = (col[0], col[1], col[2], col[3]);
        col[0] = gmul(0x02, s0) ^ gmul(0x03, s1) ^ s2 ^ s3;
        col[1] = s0 ^ gmul(0x02, s1) ^ gmul(0x03, s2) ^ s3;
        col[2] = s0 ^ s1 ^ gmul(0x02, s2) ^ gmul(0x03, s3);
        col[3] = gmul(0x03, s0) ^ s1 ^ s2 ^ gmul(0x02, s3);
    }
}

fn inv_mix_columns(s: &mut Block) {
    for col in s.chunks_exact_mut(4) {
        let (s0, s1, s2, s3) = (col[0], col[1], col[2], col[3]);
        col[0] = gmul(0x0E, s0) ^ gmul(0x0B, s1) ^ gmul(0x0D, s2) ^ gmul(0x09, s3);
        col[1] = gmul(0x09, s0) ^ gmul(0x0E, s1) ^ gmul(0x0B, s2) ^ gmul(0x0D, s3);
        col[2] = gmul(0x0D, s0) ^ gmul(0x09, s1) ^ gmul(0x0E, s2) ^ gmul(0x0B, s3);
        col[3] = gmul(0x0B, s0) ^ gmul(0x0D, s1) ^ gmul(0x09, s2) ^ gmul(0x0E, s3);
    }
}

#[inline]
fn add_round_key(s: &mut Block, rk: &Block) {
    for (b, k) in s.iter_mut().zip(rk) {
        *b ^= k;
    }
}

/// Rijndael with 128-bit blocks and whatever round count the schedule produced.
///
/// # Example
///
/// ```
/// use ridicrypt_rs::crypto::rijndael::Rijndael;
/// use ridicrypt_rs::crypto::schedule::Generalized;
///
/// let cipher = Rijndael::new(&Generalized, &[0x42u8; 48])?;
/// assert_eq!(cipher.rounds(), 18);
///
/// let mut block = *b"sixteen byte blk";
/// cipher.encrypt_block(&mut block);
/// cipher.decrypt_block(&mut block);
/// assert_eq!(&block, b"sixteen byte blk");
/// # Ok::<(), ridicrypt_rs::RidiError>(())
/// ```
#[derive(Clone)]
pub struct Rijndael {
    round_keys: RoundKeys,
}

impl Rijndael {
    /// Expand `key` with `schedule` and build a cipher over the result.
    pub fn new(schedule: &dyn KeySchedule, key: &[u8]) -> Result<Self, RidiError> {
        Ok(Self::from_round_keys(schedule.expand(key)?))
    }

    pub fn from_round_keys(round_keys: RoundKeys) -> Self {
        Self { round_keys }
    }

    pub fn rounds(&self) -> usize {
        self.round_keys.rounds()
    }

    pub fn encrypt_block(&self, block: &mut Block) {
        let rk = &self.round_keys;
        let nr = rk.rounds();
        add_round_key(block, rk.get(0));
        for round in 1..nr {
            sub_bytes(block);
            shift_rows(block);
            mix_columns(block);
            add_round_key(block, rk.get(round));
        }
        sub_bytes(block);
        shift_rows(block);
        add_round_key(block, rk.get(nr));
    }

    pub fn decrypt_block(&self, block: &mut Block) {
        let rk = &self.round_keys;
        let nr = rk.rounds();
        add_round_key(block, rk.get(nr));
        for round in (1..nr).rev() {
            inv_shift_rows(block);
            inv_sub_bytes(block);
            add_round_key(block, rk.get(round));
            inv_mix_columns(block);
        }
        inv_shift_rows(block);
        inv_sub_bytes(block);
        add_round_key(block, rk.get(0));
    }

    /// ECB-encrypt `data` in place. No padding is added.
    pub fn encrypt_ecb(&self, data: &mut [u8]) -> Result<(), RidiError> {
        check_aligned(data.len())?;
        for chunk in data.chunks_exact_mut(16) {
            let block: &mut Block = chunk.try_into().map_err(|_| misaligned(16))?;
            self.encrypt_block(block);
        }
        Ok(())
    }

    /// ECB-decrypt `data` in place. No padding is removed.
    pub fn decrypt_ecb(&self, data: &mut [u8]) -> Result<(), RidiError> {
        check_aligned(data.len())?;
        for chunk in data.chunks_exact_mut(16) {
            let block: &mut Block = chunk.try_into().map_err(|_| misaligned(16))?;
            self.decrypt_block(block);
        }
        Ok(())
    }
}

fn check_aligned(len: usize) -> Result<(), RidiError> {
    if len % 16 == 0 {
        Ok(())
    } else {
        Err(misaligned(len))
    }
}

fn misaligned(len: usize) -> RidiError {
    RidiError::BlockAlignment { len }
}
