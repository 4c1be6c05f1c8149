//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits against the filesystem and the OS RNG.

mod genesis;
mod os_entropy;

pub use genesis::{FileGenesisSource, InMemoryGenesisSource};
pub use os_entropy::OsEntropySource;
