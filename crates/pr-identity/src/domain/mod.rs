//! # Domain Layer - Identity Engine
//!
//! Pure identity logic: key triplets, resonance states and the genesis
//! trust anchor.
//!
//! ## Components
//!
//! - `key_triplet`: `PendingIdentity` → `KeyTriplet` typestate, evolution, signing
//! - `resonance`: private (secret) and public (published) resonance states
//! - `network_state`: genesis loading, network context, root-key check
//! - `entities`: `PublicIdentity` bundle, `ResonanceParams`
//! - `config`: `IdentityConfig`
//! - `errors`: `IdentityError`, `GenesisError`, `ResonanceDecodeError`

pub mod config;
pub mod entities;
pub mod errors;
pub mod key_triplet;
pub mod network_state;
pub mod resonance;
pub mod security;

pub use config::*;
pub use entities::*;
pub use errors::*;
pub use key_triplet::*;
pub use network_state::*;
pub use resonance::*;
pub use security::*;
