//! # Private and Public Resonance States
//!
//! The private state never leaves the process: it has no serde impls, a
//! redacted `Debug`, and its amplitudes are wiped on drop. The public state is
//! what gets published and received, and every incoming copy is validated
//! before use.

use super::config::MAX_PRIME_COUNT;
use super::errors::ResonanceDecodeError;
use pr_math::{Complex, Kappa, PrimeHilbertState};
use rand::Rng;
use serde::de::Error as DeError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Tolerance on `Σ |amp|²` for received public states.
pub const NORMALIZATION_TOLERANCE: f64 = 1e-6;

/// Largest basis key accepted from a remote payload.
///
/// Covers the first `MAX_PRIME_COUNT` primes (the 4096th is 38873). Keys above
/// it are rejected before any primality test runs.
pub const MAX_BASIS_PRIME: u64 = 40_000;

/// Secret resonance state of a key triplet.
pub struct PrivateResonanceState(PrimeHilbertState);

impl PrivateResonanceState {
    pub(crate) fn new(state: PrimeHilbertState) -> Self {
        Self(state)
    }

    /// Basis primes.
    pub fn basis(&self) -> &[u64] {
        self.0.basis()
    }

    /// Shannon entropy of the magnitude distribution.
    pub fn entropy(&self) -> f64 {
        self.0.entropy()
    }

    /// Raw amplitudes.
    ///
    /// Use carefully: anything derived from this reveals secret phase
    /// information.
    pub fn expose(&self) -> &PrimeHilbertState {
        &self.0
    }

    pub(crate) fn evolve(&self, dt: f64, kappa: Kappa) -> Self {
        Self(self.0.evolve(dt, kappa))
    }

    pub(crate) fn project<R>(
        &self,
        rng: &mut R,
        attenuation: &BTreeMap<u64, f64>,
    ) -> PublicResonanceState
    where
        R: Rng + ?Sized,
    {
        PublicResonanceState(self.0.project_with(rng, attenuation))
    }
}

impl fmt::Debug for PrivateResonanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateResonanceState([REDACTED; {} primes])", self.0.len())
    }
}

impl Drop for PrivateResonanceState {
    fn drop(&mut self) {
        self.0.wipe();
    }
}

/// Published resonance state.
///
/// Serializes as a JSON object mapping decimal prime strings to `{re, im}`.
#[derive(Clone, Debug, PartialEq)]
pub struct PublicResonanceState(PrimeHilbertState);

impl PublicResonanceState {
    /// Parse and validate a received JSON payload.
    pub fn from_json(payload: &str) -> Result<Self, ResonanceDecodeError> {
        let raw: BTreeMap<String, Complex> = serde_json::from_str(payload)
            .map_err(|e| ResonanceDecodeError::InvalidJson(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Validate an already-parsed JSON value.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ResonanceDecodeError> {
        let raw = BTreeMap::<String, Complex>::deserialize(value)
            .map_err(|e| ResonanceDecodeError::InvalidJson(e.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: BTreeMap<String, Complex>) -> Result<Self, ResonanceDecodeError> {
        let mut pairs = Vec::with_capacity(raw.len());
        for (key, amp) in raw {
            let prime = key
                .parse::<u64>()
                .map_err(|_| ResonanceDecodeError::InvalidPrimeKey(key.clone()))?;
            if prime > MAX_BASIS_PRIME {
                return Err(ResonanceDecodeError::PrimeOutOfRange(prime));
            }
            pairs.push((prime, amp));
        }

        let state = PrimeHilbertState::from_amplitudes(pairs)?;

        let norm_squared = state.norm_squared();
        if (norm_squared - 1.0).abs() > NORMALIZATION_TOLERANCE {
            return Err(ResonanceDecodeError::NotNormalized { norm_squared });
        }
        Ok(Self(state))
    }

    /// Serialize to the wire JSON object.
    pub fn to_json(&self) -> String {
        serde_json::Value::from(self).to_string()
    }

    /// Underlying state.
    pub fn state(&self) -> &PrimeHilbertState {
        &self.0
    }

    /// Basis primes.
    pub fn basis(&self) -> &[u64] {
        self.0.basis()
    }

    /// `|<self|other>|²` clamped to `[0, 1]`.
    pub fn coherence(&self, other: &PublicResonanceState) -> f64 {
        self.0.coherence(&other.0)
    }

    /// Shannon entropy of the magnitude distribution.
    pub fn entropy(&self) -> f64 {
        self.0.entropy()
    }
}

impl From<&PublicResonanceState> for serde_json::Value {
    fn from(state: &PublicResonanceState) -> Self {
        let map = state
            .0
            .iter()
            .map(|(p, amp)| {
                let amp = serde_json::json!({ "re": amp.re, "im": amp.im });
                (p.to_string(), amp)
            })
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

impl Serialize for PublicResonanceState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (prime, amp) in self.0.iter() {
            map.serialize_entry(&prime.to_string(), &amp)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PublicResonanceState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Complex>::deserialize(deserializer)?;
        Self::from_raw(raw).map_err(D::Error::custom)
    }
}
