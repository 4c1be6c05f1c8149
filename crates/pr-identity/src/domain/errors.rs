//! # Identity Errors
//!
//! Error taxonomy for identity generation, remote payload decoding and genesis
//! loading. None of these are fatal to the host process: callers treat them
//! as "no valid identity available".

use pr_math::MathError;
use thiserror::Error;

/// A published resonance state could not be accepted.
///
/// Raised at decode time, before any coherence computation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResonanceDecodeError {
    /// Payload is not a JSON object of `{re, im}` amplitudes
    #[error("Malformed resonance JSON: {0}")]
    InvalidJson(String),

    /// Map key does not parse as an unsigned integer
    #[error("Invalid prime key: {0:?}")]
    InvalidPrimeKey(String),

    /// Map key is an integer but not prime
    #[error("Basis key {0} is not prime")]
    NotPrime(u64),

    /// Map key is larger than any prime a valid basis can contain
    #[error("Basis key {0} exceeds the largest admissible prime")]
    PrimeOutOfRange(u64),

    /// Declared `primes` list differs from the state's basis
    #[error("Declared primes {declared:?} do not match state basis {basis:?}")]
    BasisMismatch {
        /// `primes` as published
        declared: Vec<u64>,
        /// Keys of the published state, ascending
        basis: Vec<u64>,
    },

    /// Amplitude is NaN or infinite
    #[error("Non-finite amplitude at prime {prime}")]
    NonFiniteAmplitude {
        /// Offending basis prime
        prime: u64,
    },

    /// Published states must have unit norm
    #[error("Resonance state not normalized (norm² = {norm_squared})")]
    NotNormalized {
        /// Observed `Σ |amp|²`
        norm_squared: f64,
    },
}

impl From<MathError> for ResonanceDecodeError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::NotPrime(p) => Self::NotPrime(p),
            MathError::NonFiniteAmplitude { prime } => Self::NonFiniteAmplitude { prime },
            MathError::PrimeNotInBasis(p) => Self::NotPrime(p),
            MathError::InvalidKappa(k) => Self::InvalidJson(format!("unexpected kappa {k}")),
        }
    }
}

/// Genesis record could not be loaded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenesisError {
    /// Source could not be read (missing file, permissions)
    #[error("Genesis source {location} unreadable: {reason}")]
    Unreadable {
        /// Path or description of the source
        location: String,
        /// Underlying I/O failure
        reason: String,
    },

    /// Contents are not valid JSON
    #[error("Genesis record is not valid JSON: {0}")]
    MalformedJson(String),

    /// JSON is valid but required fields are missing or empty
    #[error("Genesis record invalid: {0}")]
    InvalidRecord(String),
}

/// Identity service and key triplet errors.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Remote resonance payload rejected
    #[error("Malformed resonance payload: {0}")]
    MalformedResonance(#[from] ResonanceDecodeError),

    /// A live identity already exists for this node id
    #[error("Identity already generated for node {0}")]
    AlreadyGenerated(String),

    /// No live identity for this node id
    #[error("Unknown identity: {0}")]
    UnknownIdentity(String),

    /// Genesis is not loaded and bootstrap identities are disabled
    #[error("Refusing to generate identity in pre-genesis bootstrap mode")]
    BootstrapRefused,

    /// Configuration value rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Classical public key is not a valid Ed25519 point or hex string
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Signature bytes could not be parsed
    #[error("Invalid signature format")]
    InvalidSignature,

    /// Signature does not verify against the key and message
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Math-layer parameter rejected
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}
