//! Math error types.

use thiserror::Error;

/// Errors raised by state construction and parameter validation.
///
/// Degenerate vectors (zero norm, empty basis) are not errors; they are
/// handled by the no-op policies on `PrimeHilbertState`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MathError {
    /// Amplitude addressed a prime outside the state's basis
    #[error("Prime {0} is not part of the state basis")]
    PrimeNotInBasis(u64),

    /// Amplitude component is NaN or infinite
    #[error("Non-finite amplitude at prime {prime}")]
    NonFiniteAmplitude {
        /// Basis prime holding the bad amplitude
        prime: u64,
    },

    /// Basis key is not a prime number
    #[error("Basis key {0} is not prime")]
    NotPrime(u64),

    /// Evolution constant must be finite and positive
    #[error("Invalid kappa {0}: must be finite and > 0")]
    InvalidKappa(f64),
}
