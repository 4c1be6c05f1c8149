//! Operating-system randomness.

use crate::ports::EntropySource;
use rand::rngs::OsRng;
use rand::RngCore;

/// `EntropySource` backed by the OS CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropySource;

impl EntropySource for OsEntropySource {
    fn fill_bytes(&self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}
