//! # Identity Entities
//!
//! Wire-visible identity bundle and the parameters shared by every identity
//! on a network.

use super::errors::ResonanceDecodeError;
use super::resonance::PublicResonanceState;
use pr_math::Kappa;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Node identifier (caller-chosen, unique per live identity).
pub type NodeId = String;

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// Parameters every participant of a network must agree on.
#[derive(Clone, Debug, PartialEq)]
pub struct ResonanceParams {
    /// Size of the prime basis
    pub prime_count: usize,
    /// Evolution rate constant
    pub kappa: Kappa,
    /// Per-prime magnitude factors applied at projection time
    pub attenuation: BTreeMap<u64, f64>,
}

impl Default for ResonanceParams {
    fn default() -> Self {
        Self {
            prime_count: 64,
            kappa: Kappa::default(),
            attenuation: BTreeMap::new(),
        }
    }
}

/// Classical half of a published identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassicalIdentity {
    /// Lowercase hex Ed25519 verifying key
    pub public_key: String,
}

/// Resonance half of a published identity.
///
/// `primes` must equal the basis of `state`; decoding rejects bundles where
/// they differ.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawResonanceIdentity")]
pub struct ResonanceIdentity {
    /// Projected public state
    pub state: PublicResonanceState,
    /// Basis primes, ascending
    pub primes: Vec<u64>,
    /// Last evolution time (ms)
    pub timestamp: Timestamp,
}

impl ResonanceIdentity {
    /// Check that the declared primes match the state's basis.
    pub fn validate(&self) -> Result<(), ResonanceDecodeError> {
        if self.primes != self.state.basis() {
            return Err(ResonanceDecodeError::BasisMismatch {
                declared: self.primes.clone(),
                basis: self.state.basis().to_vec(),
            });
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResonanceIdentity {
    state: PublicResonanceState,
    primes: Vec<u64>,
    timestamp: Timestamp,
}

impl TryFrom<RawResonanceIdentity> for ResonanceIdentity {
    type Error = ResonanceDecodeError;

    fn try_from(raw: RawResonanceIdentity) -> Result<Self, Self::Error> {
        let identity = Self {
            state: raw.state,
            primes: raw.primes,
            timestamp: raw.timestamp,
        };
        identity.validate()?;
        Ok(identity)
    }
}

/// Everything a node publishes about itself.
///
/// ```json
/// {
///   "nodeId": "agentA",
///   "classical": { "publicKey": "3b6a27bc..." },
///   "resonance": { "state": { "2": { "re": 0.1, "im": -0.2 } }, "primes": [2], "timestamp": 1700000000000 },
///   "bootstrap": false
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicIdentity {
    /// Owning node
    pub node_id: NodeId,
    /// Classical signing key
    pub classical: ClassicalIdentity,
    /// Resonance projection
    pub resonance: ResonanceIdentity,
    /// Generated before genesis was loaded
    #[serde(default)]
    pub bootstrap: bool,
}

impl PublicIdentity {
    /// Parse and validate a received bundle.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> String {
        // Every field is a string, integer or finite float.
        serde_json::to_string(self).unwrap_or_default()
    }
}
