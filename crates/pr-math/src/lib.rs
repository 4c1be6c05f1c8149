//! # PR-Math: Prime Resonance Mathematics
//!
//! Vector-space primitives that identities are derived from.
//!
//! ## Components
//!
//! - `complex` - Minimal complex-number value type
//! - `state` - `PrimeHilbertState`, a complex amplitude vector keyed by primes
//! - `primes` - Deterministic trial-division prime generation
//! - `hashing` - SHA-512 seed → normalized state derivation
//!
//! ## Determinism
//!
//! `generate_primes`, `hash_to_state` and `PrimeHilbertState::evolve` are
//! bit-reproducible for identical inputs. `PrimeHilbertState::project` is not:
//! it draws a fresh phase per prime from the supplied random source.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod complex;
pub mod errors;
pub mod hashing;
pub mod primes;
pub mod state;

pub use complex::Complex;
pub use errors::MathError;
pub use hashing::{hash_to_state, seed_digest, SeedDigest, DIGEST_LEN};
pub use primes::{generate_primes, is_prime};
pub use state::{Kappa, PrimeHilbertState, DEFAULT_KAPPA, NORM_EPSILON, PROB_EPSILON};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
