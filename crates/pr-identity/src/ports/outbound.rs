//! # Outbound Ports
//!
//! Dependencies the identity service needs from its environment: a clock,
//! a source of cryptographic randomness and a place to read genesis from.

use crate::domain::{GenesisError, Timestamp};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};

/// Wall clock in milliseconds.
pub trait TimeSource: Send + Sync {
    /// Current time in milliseconds since the Unix epoch.
    fn now(&self) -> Timestamp;
}

/// System clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Cryptographically secure random bytes.
///
/// Feeds seed generation, projection phases and classical key material.
pub trait EntropySource: Send + Sync {
    /// Fill `dest` with random bytes.
    fn fill_bytes(&self, dest: &mut [u8]);
}

/// Raw genesis record.
pub trait GenesisSource: Send + Sync {
    /// Read the full record.
    fn read_genesis(&self) -> Result<String, GenesisError>;

    /// Human-readable location for logs.
    fn location(&self) -> String;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Manually driven clock.
#[derive(Debug, Default)]
pub struct MockTimeSource {
    now: AtomicU64,
}

impl MockTimeSource {
    /// Start at `now` milliseconds.
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: AtomicU64::new(now),
        }
    }

    /// Move forward by `millis`.
    pub fn advance(&self, millis: u64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }

    /// Jump to `now`.
    pub fn set(&self, now: Timestamp) {
        self.now.store(now, Ordering::SeqCst);
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}

/// Deterministic byte stream from a fixed seed.
///
/// Not secure. Identical seeds give identical keys and phases.
#[derive(Debug)]
pub struct MockEntropySource {
    rng: Mutex<StdRng>,
}

impl MockEntropySource {
    /// Stream seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl EntropySource for MockEntropySource {
    fn fill_bytes(&self, dest: &mut [u8]) {
        self.rng.lock().fill_bytes(dest);
    }
}
