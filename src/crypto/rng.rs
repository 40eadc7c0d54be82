// src/crypto/rng.rs
//! Random IVs for the sealing side (feature `rand`)
//!
//! Adds `T::random()` to every `Fixed<[u8; N]>` alias (`Iv16`, `BookKey16`, ...)
//! using a thread-local `OsRng`.

use crate::error::RidiError;
use rand::{rngs::OsRng, TryRngCore};
use secure_gate::Fixed;
use std::cell::RefCell;

/// Extension trait – gives `.random()` to all fixed-size secret types
pub trait SecureRandomExt: Sized {
    /// Generate a cryptographically secure random instance of this type
    fn random() -> Result<Self, RidiError>;
}

thread_local! {
    static RNG: RefCell<OsRng> = const { RefCell::new(OsRng) };
}

impl<const N: usize> SecureRandomExt for Fixed<[u8; N]> {
    #[inline]
    fn random() -> Result<Self, RidiError> {
        RNG.with(|rng_cell| {
            let mut bytes = [0u8; N];
            rng_cell
                .borrow_mut()
                .try_fill_bytes(&mut bytes)
                .map_err(|e| RidiError::InvalidKey(format!("OS randomness unavailable: {e}")))?;
            Ok(Fixed::new(bytes))
        })
    }
}
