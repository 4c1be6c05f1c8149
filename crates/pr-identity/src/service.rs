//! # Identity Service
//!
//! Application service that implements the `IdentityApi` trait.
//!
//! ## Architecture
//!
//! - Implements the inbound port (`IdentityApi`)
//! - Uses the outbound ports (`TimeSource`, `EntropySource`) for the clock
//!   and for all randomness
//! - Reads the network context from a shared, already-loaded `NetworkState`
//! - Keeps one `KeyTriplet` per live node id
//!
//! Each triplet sits behind its own mutex, so evolving one identity never
//! blocks another.

use crate::domain::{
    verify_classical, IdentityConfig, IdentityError, KeyTriplet, NetworkState, NodeId,
    PendingIdentity, PublicIdentity, ResonanceParams,
};
use crate::ports::inbound::IdentityApi;
use crate::ports::outbound::{EntropySource, TimeSource};
use parking_lot::{Mutex, RwLock};
use pr_telemetry::{metric_inc, metric_observe};
use pr_telemetry::metrics::{
    COHERENCE_CHECKS, COHERENCE_SCORE, IDENTITIES_DECOMMISSIONED, IDENTITIES_GENERATED,
    IDENTITY_EVOLUTIONS, MALFORMED_PAYLOADS,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use zeroize::Zeroize;

/// Identity Service.
pub struct IdentityService<T: TimeSource, E: EntropySource> {
    network: Arc<NetworkState>,
    params: ResonanceParams,
    allow_bootstrap: bool,
    time: T,
    entropy: E,
    identities: RwLock<HashMap<NodeId, Arc<Mutex<KeyTriplet>>>>,
}

impl<T: TimeSource, E: EntropySource> IdentityService<T, E> {
    /// Create a new identity service.
    ///
    /// # Arguments
    /// * `network` - Network state, loaded (or deliberately left in bootstrap)
    /// * `config` - Validated into network parameters
    /// * `time` - Clock for generation and evolution timestamps
    /// * `entropy` - Randomness for seeds, phases and signing keys
    pub fn new(
        network: Arc<NetworkState>,
        config: &IdentityConfig,
        time: T,
        entropy: E,
    ) -> Result<Self, IdentityError> {
        let params = config.resonance_params()?;
        info!(
            context = %network.context(),
            prime_count = params.prime_count,
            kappa = params.kappa.value(),
            "Identity service initialized"
        );

        Ok(Self {
            network,
            params,
            allow_bootstrap: config.allow_bootstrap,
            time,
            entropy,
            identities: RwLock::new(HashMap::new()),
        })
    }

    /// Network parameters in use.
    pub fn params(&self) -> &ResonanceParams {
        &self.params
    }

    /// Shared network state.
    pub fn network(&self) -> &Arc<NetworkState> {
        &self.network
    }

    /// Injected clock.
    pub fn clock(&self) -> &T {
        &self.time
    }

    /// Number of live identities.
    pub fn identity_count(&self) -> usize {
        self.identities.read().len()
    }

    /// Fresh CSPRNG seeded from the entropy port.
    fn rng(&self) -> StdRng {
        let mut seed = [0u8; 32];
        self.entropy.fill_bytes(&mut seed);
        let rng = StdRng::from_seed(seed);
        seed.zeroize();
        rng
    }

    fn triplet(&self, node_id: &str) -> Result<Arc<Mutex<KeyTriplet>>, IdentityError> {
        self.identities
            .read()
            .get(node_id)
            .cloned()
            .ok_or_else(|| IdentityError::UnknownIdentity(node_id.to_string()))
    }

    fn record_coherence(&self, node_id: &str, coherence: f64) -> f64 {
        metric_inc!(COHERENCE_CHECKS);
        metric_observe!(COHERENCE_SCORE, coherence);
        debug!(node_id, coherence, "Coherence computed");
        coherence
    }

    /// Verify a classical signature published by any identity.
    pub fn verify_signature(
        &self,
        public_key_hex: &str,
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), IdentityError> {
        verify_classical(public_key_hex, message, signature)
    }
}

impl<T: TimeSource, E: EntropySource> IdentityApi for IdentityService<T, E> {
    fn network_context(&self) -> String {
        self.network.context().to_string()
    }

    fn is_bootstrap(&self) -> bool {
        self.network.is_bootstrap()
    }

    fn is_root(&self, public_key: &str) -> bool {
        self.network.is_root(public_key)
    }

    fn generate_identity(
        &self,
        node_id: &str,
        seed: Option<&str>,
    ) -> Result<PublicIdentity, IdentityError> {
        if self.network.is_bootstrap() && !self.allow_bootstrap {
            warn!(node_id, "Identity generation refused: no genesis loaded");
            return Err(IdentityError::BootstrapRefused);
        }

        let mut identities = self.identities.write();
        let slot = match identities.entry(node_id.to_string()) {
            Entry::Occupied(_) => {
                return Err(IdentityError::AlreadyGenerated(node_id.to_string()));
            }
            Entry::Vacant(slot) => slot,
        };

        let mut rng = self.rng();
        let triplet = PendingIdentity::new(node_id).generate(
            seed,
            self.network.context(),
            &self.params,
            &mut rng,
            self.time.now(),
        );
        let bundle = triplet.snapshot();

        let mode = if triplet.is_bootstrap() {
            "bootstrap"
        } else {
            "anchored"
        };
        metric_inc!(IDENTITIES_GENERATED, &[mode]);
        info!(
            node_id,
            mode,
            seeded = seed.is_some(),
            public_key = %bundle.classical.public_key,
            "Identity generated"
        );

        slot.insert(Arc::new(Mutex::new(triplet)));
        Ok(bundle)
    }

    fn evolve_identity(&self, node_id: &str) -> Result<bool, IdentityError> {
        let triplet = self.triplet(node_id)?;
        let mut rng = self.rng();
        let now = self.time.now();

        let advanced = triplet.lock().evolve(now, &self.params, &mut rng);
        if advanced {
            metric_inc!(IDENTITY_EVOLUTIONS);
            debug!(node_id, now, "Identity evolved");
        }
        Ok(advanced)
    }

    fn public_identity(&self, node_id: &str) -> Result<PublicIdentity, IdentityError> {
        let triplet = self.triplet(node_id)?;
        let mut rng = self.rng();
        let now = self.time.now();

        let mut guard = triplet.lock();
        if guard.evolve(now, &self.params, &mut rng) {
            metric_inc!(IDENTITY_EVOLUTIONS);
        }
        Ok(guard.snapshot())
    }

    fn resonance_with_payload(&self, node_id: &str, payload: &str) -> Result<f64, IdentityError> {
        let triplet = self.triplet(node_id)?;
        let coherence = triplet.lock().resonance_with(payload).map_err(|e| {
            metric_inc!(MALFORMED_PAYLOADS);
            warn!(node_id, error = %e, "Rejected resonance payload");
            e
        })?;
        Ok(self.record_coherence(node_id, coherence))
    }

    fn resonance_with_identity(
        &self,
        node_id: &str,
        other: &PublicIdentity,
    ) -> Result<f64, IdentityError> {
        other.resonance.validate()?;
        let triplet = self.triplet(node_id)?;
        let coherence = triplet.lock().coherence_with(&other.resonance.state);
        Ok(self.record_coherence(node_id, coherence))
    }

    fn sign(&self, node_id: &str, message: &[u8]) -> Result<Vec<u8>, IdentityError> {
        let triplet = self.triplet(node_id)?;
        let signature = triplet.lock().sign(message);
        Ok(signature.to_bytes().to_vec())
    }

    fn entropy(&self, node_id: &str) -> Result<f64, IdentityError> {
        let triplet = self.triplet(node_id)?;
        let entropy = triplet.lock().entropy();
        Ok(entropy)
    }

    fn decommission(&self, node_id: &str) -> Result<(), IdentityError> {
        let removed = self.identities.write().remove(node_id);
        match removed {
            Some(_) => {
                metric_inc!(IDENTITIES_DECOMMISSIONED);
                info!(node_id, "Identity decommissioned");
                Ok(())
            }
            None => Err(IdentityError::UnknownIdentity(node_id.to_string())),
        }
    }
}
