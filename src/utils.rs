// ============================================================================
// FILE: src/utils.rs
// ============================================================================

//! Utility functions used across the library.

use crate::consts::BLOCK_SIZE;

/// XORs two 16-byte blocks and writes the result to `output`.
///
/// Used by the CBC chaining in [`crate::crypto::cbc`].
///
/// # Panics (by contract)
///
/// Panics if any of the three slices is shorter than 16 bytes. All callers
/// pass whole AES blocks.
#[inline(always)]
pub const fn xor_blocks(block_a: &[u8], block_b: &[u8], output: &mut [u8]) {
    let mut i = 0;
    while i < 16 {
        output[i] = block_a[i] ^ block_b[i];
        i += 1;
    }
}

/// Length of valid PKCS#7 padding at the end of `data`, if any.
///
/// The last byte `P` is the padding length. Padding is valid only when
/// `1 <= P <= 16`, `P <= data.len()` and the final `P` bytes all equal `P`.
#[inline]
pub fn pkcs7_padding_len(data: &[u8]) -> Option<usize> {
    let &last = data.last()?;
    let pad = last as usize;
    if pad == 0 || pad > BLOCK_SIZE || pad > data.len() {
        return None;
    }
    data[data.len() - pad..]
        .iter()
        .all(|&b| b == last)
        .then_some(pad)
}

/// Strict PKCS#7 removal: the unpadded prefix, or `None` if the padding is invalid.
#[inline]
pub fn strip_pkcs7(data: &[u8]) -> Option<&[u8]> {
    pkcs7_padding_len(data).map(|pad| &data[..data.len() - pad])
}

/// Appends PKCS#7 padding up to the next multiple of `block`.
///
/// A full block of padding is added when `data` is already aligned.
pub fn pad_pkcs7(data: &[u8], block: usize) -> Vec<u8> {
    let pad = block - data.len() % block;
    let mut out = Vec::with_capacity(data.len() + pad);
    out.extend_from_slice(data);
    out.resize(data.len() + pad, pad as u8);
    out
}

/// Characters `start..end` of `text`, counted in Unicode scalar values.
///
/// Returns `None` when `text` holds fewer than `end` characters. Never
/// splits a multi-byte character, unlike byte slicing.
pub fn char_window(text: &str, start: usize, end: usize) -> Option<String> {
    if start > end {
        return None;
    }
    let window: String = text.chars().skip(start).take(end - start).collect();
    (window.chars().count() == end - start).then_some(window)
}
