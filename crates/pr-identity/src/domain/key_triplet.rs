//! # Key Triplet
//!
//! A node identity is three linked keys:
//!
//! - `priv`: secret resonance state, derived deterministically from
//!   `(network context, seed, node id)`
//! - `res`: public projection of `priv` (magnitudes kept, phases redrawn)
//! - `classical`: Ed25519 signing key
//!
//! Construction goes through the `PendingIdentity` typestate, so a
//! `KeyTriplet` value always holds all three keys.
//!
//! ```text
//! PendingIdentity ──generate()──► KeyTriplet ──evolve()──► KeyTriplet
//! ```

use super::entities::{
    ClassicalIdentity, NodeId, PublicIdentity, ResonanceIdentity, ResonanceParams, Timestamp,
};
use super::errors::IdentityError;
use super::network_state::BOOTSTRAP_CONTEXT;
use super::resonance::{PrivateResonanceState, PublicResonanceState};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use pr_math::hash_to_state;
use rand::{CryptoRng, RngCore};
use std::fmt;
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

/// Separator between the parts of the entropy source string.
pub const ENTROPY_SEPARATOR: char = ':';

/// Bytes of randomness behind a generated seed and a signing key.
const RANDOM_SECRET_LEN: usize = 32;

/// `"{context}:{seed}:{node_id}"`
///
/// Binding the network context makes the same seed produce unrelated secrets
/// on different networks.
pub fn entropy_source(network_context: &str, seed: &str, node_id: &str) -> Zeroizing<String> {
    Zeroizing::new(format!(
        "{network_context}{ENTROPY_SEPARATOR}{seed}{ENTROPY_SEPARATOR}{node_id}"
    ))
}

/// Identity that has a node id but no keys yet.
#[derive(Debug, Clone)]
pub struct PendingIdentity {
    node_id: NodeId,
}

impl PendingIdentity {
    /// Start an identity for `node_id`.
    pub fn new(node_id: impl Into<NodeId>) -> Self {
        Self {
            node_id: node_id.into(),
        }
    }

    /// Node id this identity will carry.
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Derive all three keys.
    ///
    /// With `seed = None` a random 32-byte seed is drawn from `rng`, so the
    /// private state is not reproducible. `priv` depends only on
    /// `(network_context, seed, node_id, params.prime_count)`.
    pub fn generate<R>(
        self,
        seed: Option<&str>,
        network_context: &str,
        params: &ResonanceParams,
        rng: &mut R,
        now: Timestamp,
    ) -> KeyTriplet
    where
        R: RngCore + CryptoRng,
    {
        let seed = match seed {
            Some(s) => Zeroizing::new(s.to_string()),
            None => {
                let mut bytes = [0u8; RANDOM_SECRET_LEN];
                rng.fill_bytes(&mut bytes);
                let encoded = Zeroizing::new(hex::encode(bytes));
                bytes.zeroize();
                encoded
            }
        };

        let source = entropy_source(network_context, &seed, &self.node_id);
        let private_state =
            PrivateResonanceState::new(hash_to_state(&source, params.prime_count));
        let public_state = private_state.project(rng, &params.attenuation);

        let mut key_bytes = [0u8; RANDOM_SECRET_LEN];
        rng.fill_bytes(&mut key_bytes);
        let signing_key = SigningKey::from_bytes(&key_bytes);
        key_bytes.zeroize();

        KeyTriplet {
            node_id: self.node_id,
            private_state,
            public_state,
            signing_key,
            last_evolution: now,
            bootstrap: network_context == BOOTSTRAP_CONTEXT,
        }
    }
}

/// Fully generated identity.
///
/// `public_state` is always a projection of the current `private_state`, and
/// `last_evolution` never decreases.
pub struct KeyTriplet {
    node_id: NodeId,
    private_state: PrivateResonanceState,
    public_state: PublicResonanceState,
    signing_key: SigningKey,
    last_evolution: Timestamp,
    bootstrap: bool,
}

impl KeyTriplet {
    /// Owning node.
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Generated under the bootstrap context.
    pub fn is_bootstrap(&self) -> bool {
        self.bootstrap
    }

    /// Time of the last evolution (or generation).
    pub fn last_evolution(&self) -> Timestamp {
        self.last_evolution
    }

    /// Secret state.
    pub fn private_state(&self) -> &PrivateResonanceState {
        &self.private_state
    }

    /// Current public projection.
    pub fn public_state(&self) -> &PublicResonanceState {
        &self.public_state
    }

    /// Ed25519 verifying key.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Lowercase hex of the verifying key.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.verifying_key().as_bytes())
    }

    /// Advance the private state to `now` and re-project.
    ///
    /// `dt = (now - last_evolution) / 1000` seconds. Returns `false` without
    /// touching anything when `now` is not after the last evolution.
    pub fn evolve<R>(&mut self, now: Timestamp, params: &ResonanceParams, rng: &mut R) -> bool
    where
        R: RngCore + CryptoRng,
    {
        if now <= self.last_evolution {
            return false;
        }

        let dt = (now - self.last_evolution) as f64 / 1000.0;
        self.private_state = self.private_state.evolve(dt, params.kappa);
        self.public_state = self.private_state.project(rng, &params.attenuation);
        self.last_evolution = now;
        debug!(node_id = %self.node_id, dt_secs = dt, "Private state evolved");
        true
    }

    /// Evolve to `now`, then build the publishable bundle.
    pub fn public_identity<R>(
        &mut self,
        now: Timestamp,
        params: &ResonanceParams,
        rng: &mut R,
    ) -> PublicIdentity
    where
        R: RngCore + CryptoRng,
    {
        self.evolve(now, params, rng);
        self.snapshot()
    }

    /// Bundle for the current state, without evolving.
    pub fn snapshot(&self) -> PublicIdentity {
        PublicIdentity {
            node_id: self.node_id.clone(),
            classical: ClassicalIdentity {
                public_key: self.public_key_hex(),
            },
            resonance: ResonanceIdentity {
                state: self.public_state.clone(),
                primes: self.public_state.basis().to_vec(),
                timestamp: self.last_evolution,
            },
            bootstrap: self.bootstrap,
        }
    }

    /// Coherence between this identity's public state and `other`.
    pub fn coherence_with(&self, other: &PublicResonanceState) -> f64 {
        self.public_state.coherence(other)
    }

    /// Coherence against a received JSON payload.
    ///
    /// Malformed payloads are rejected before any computation.
    pub fn resonance_with(&self, payload: &str) -> Result<f64, IdentityError> {
        let other = PublicResonanceState::from_json(payload)?;
        Ok(self.coherence_with(&other))
    }

    /// Shannon entropy of the private magnitude distribution.
    pub fn entropy(&self) -> f64 {
        self.private_state.entropy()
    }

    /// Sign `message` with the classical key.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }
}

impl fmt::Debug for KeyTriplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyTriplet")
            .field("node_id", &self.node_id)
            .field("private_state", &self.private_state)
            .field("public_key", &self.public_key_hex())
            .field("last_evolution", &self.last_evolution)
            .field("bootstrap", &self.bootstrap)
            .finish()
    }
}

/// Verify an Ed25519 signature against a hex-encoded public key.
pub fn verify_classical(
    public_key_hex: &str,
    message: &[u8],
    signature: &[u8],
) -> Result<(), IdentityError> {
    let key_bytes: [u8; 32] = hex::decode(public_key_hex)
        .map_err(|_| IdentityError::InvalidPublicKey)?
        .try_into()
        .map_err(|_| IdentityError::InvalidPublicKey)?;
    let verifying_key =
        VerifyingKey::from_bytes(&key_bytes).map_err(|_| IdentityError::InvalidPublicKey)?;

    let signature =
        Signature::from_slice(signature).map_err(|_| IdentityError::InvalidSignature)?;

    verifying_key
        .verify(message, &signature)
        .map_err(|_| IdentityError::SignatureVerificationFailed)
}
