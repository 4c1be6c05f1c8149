//! # Seed → State Derivation
//!
//! The only bridge from entropy to a resonance state. Byte-level choices here
//! are a compatibility contract between implementations:
//!
//! 1. `digest = SHA-512(seed)` (64 bytes, UTF-8 seed)
//! 2. For basis prime index `i`: `re = digest[i % 64]`, `im = digest[(i + 1) % 64]`
//! 3. Each byte maps to `[-1.0, 1.0]` via `b / 127.5 - 1.0`
//! 4. Normalize
//!
//! Consecutive prime indices share one byte (`i + 1` of prime `i` is the `re`
//! byte of prime `i + 1`); bases longer than 64 primes wrap around the digest.

use crate::complex::Complex;
use crate::primes::generate_primes;
use crate::state::PrimeHilbertState;
use sha2::{Digest, Sha512};

/// Digest width in bytes.
pub const DIGEST_LEN: usize = 64;

/// SHA-512 output.
pub type SeedDigest = [u8; DIGEST_LEN];

/// SHA-512 of the UTF-8 seed.
pub fn seed_digest(seed: &str) -> SeedDigest {
    let mut hasher = Sha512::new();
    hasher.update(seed.as_bytes());
    let result = hasher.finalize();

    let mut digest = [0u8; DIGEST_LEN];
    digest.copy_from_slice(&result);
    digest
}

#[inline]
fn byte_to_unit(b: u8) -> f64 {
    (b as f64 / 127.5) - 1.0
}

/// Derive a normalized state over the first `prime_count` primes from `seed`.
pub fn hash_to_state(seed: &str, prime_count: usize) -> PrimeHilbertState {
    let digest = seed_digest(seed);
    let primes = generate_primes(prime_count);

    let amplitudes = (0..primes.len())
        .map(|i| {
            let re = byte_to_unit(digest[i % DIGEST_LEN]);
            let im = byte_to_unit(digest[(i + 1) % DIGEST_LEN]);
            Complex::new(re, im)
        })
        .collect();

    PrimeHilbertState::from_parts(primes, amplitudes).normalized()
}
