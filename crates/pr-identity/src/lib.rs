//! # PR-Identity: Prime-Resonance Identity & Trust Anchoring
//!
//! Generates and maintains node identities bound to a genesis-anchored
//! network context.
//!
//! ## Architecture
//!
//! Hexagonal layout:
//!
//! - `domain` - Key triplets, resonance states, network state, config, errors
//! - `ports` - `IdentityApi` (inbound); `TimeSource`, `EntropySource`,
//!   `GenesisSource` (outbound)
//! - `adapters` - File and in-memory genesis sources, OS entropy
//! - `service` - `IdentityService`, the application service
//!
//! ## Trust Model
//!
//! 1. Load genesis once per process into a `NetworkState`. Its hash becomes
//!    the network context; its Aleph key becomes the root key.
//! 2. Without genesis the node runs in bootstrap mode under
//!    `BOOTSTRAP_CONTEXT`, nothing is root, and identity generation is
//!    refused unless explicitly allowed.
//! 3. Every identity binds `(context, seed, node id)` into its private state,
//!    so the same seed yields unrelated identities on different networks.
//!
//! ## Security Properties
//!
//! - Private resonance states are never serialized, print redacted and are
//!   wiped on drop
//! - Received resonance payloads are validated before any computation
//! - Root-key comparison is constant-time

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{FileGenesisSource, InMemoryGenesisSource, OsEntropySource};
pub use domain::{
    constant_time_compare, entropy_source, verify_classical, ClassicalIdentity, GenesisAnchor,
    GenesisError, IdentityConfig, IdentityError, KeyTriplet, LoadOutcome, NetworkState, NodeId,
    PendingIdentity, PrivateResonanceState, PublicIdentity, PublicResonanceState,
    ResonanceDecodeError, ResonanceIdentity, ResonanceParams, Timestamp, BOOTSTRAP_CONTEXT,
    DEFAULT_GENESIS_PATH, MAX_BASIS_PRIME, MAX_PRIME_COUNT, NORMALIZATION_TOLERANCE,
};
pub use ports::{
    EntropySource, GenesisSource, IdentityApi, MockEntropySource, MockTimeSource,
    SystemTimeSource, TimeSource,
};
pub use service::IdentityService;

/// Service over the system clock and OS randomness.
pub type DefaultIdentityService = IdentityService<SystemTimeSource, OsEntropySource>;

/// Load genesis from `config.genesis_path` and start a production service.
///
/// A missing or invalid genesis is not an error here: the returned service
/// runs in bootstrap mode and the failure is in the `LoadOutcome`.
pub fn bootstrap_service(
    config: &IdentityConfig,
) -> Result<(DefaultIdentityService, LoadOutcome), IdentityError> {
    let mut network = NetworkState::new();
    let outcome = network.load(&FileGenesisSource::new(&config.genesis_path));
    let service = IdentityService::new(
        std::sync::Arc::new(network),
        config,
        SystemTimeSource,
        OsEntropySource,
    )?;
    Ok((service, outcome))
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
