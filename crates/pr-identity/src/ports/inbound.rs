//! # Inbound Ports
//!
//! API trait defining what the identity engine can do.

use crate::domain::{IdentityError, PublicIdentity};

/// Identity API - inbound port.
pub trait IdentityApi: Send + Sync {
    /// Current network context (genesis hash or bootstrap sentinel).
    fn network_context(&self) -> String;

    /// No genesis is loaded.
    fn is_bootstrap(&self) -> bool;

    /// `public_key` is the Aleph root key.
    fn is_root(&self, public_key: &str) -> bool;

    /// Generate a key triplet for `node_id` and return its public bundle.
    fn generate_identity(
        &self,
        node_id: &str,
        seed: Option<&str>,
    ) -> Result<PublicIdentity, IdentityError>;

    /// Evolve `node_id` to the current time. Returns whether time advanced.
    fn evolve_identity(&self, node_id: &str) -> Result<bool, IdentityError>;

    /// Evolve, then return the public bundle.
    fn public_identity(&self, node_id: &str) -> Result<PublicIdentity, IdentityError>;

    /// Coherence of `node_id` against a received resonance JSON payload.
    fn resonance_with_payload(&self, node_id: &str, payload: &str) -> Result<f64, IdentityError>;

    /// Coherence of `node_id` against a received identity bundle.
    fn resonance_with_identity(
        &self,
        node_id: &str,
        other: &PublicIdentity,
    ) -> Result<f64, IdentityError>;

    /// Sign `message` with the classical key of `node_id`.
    fn sign(&self, node_id: &str, message: &[u8]) -> Result<Vec<u8>, IdentityError>;

    /// Shannon entropy of the private magnitude distribution of `node_id`.
    fn entropy(&self, node_id: &str) -> Result<f64, IdentityError>;

    /// Drop `node_id`, wiping its secret state.
    fn decommission(&self, node_id: &str) -> Result<(), IdentityError>;
}
