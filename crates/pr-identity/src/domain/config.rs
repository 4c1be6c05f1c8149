//! Identity engine configuration.

use super::entities::ResonanceParams;
use super::errors::IdentityError;
use super::network_state::DEFAULT_GENESIS_PATH;
use pr_math::{generate_primes, is_prime, Kappa, DEFAULT_KAPPA};
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

/// Largest accepted prime basis.
pub const MAX_PRIME_COUNT: usize = 4096;

/// Identity engine settings.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityConfig {
    /// Genesis record location
    pub genesis_path: PathBuf,

    /// Size of the prime basis
    pub prime_count: usize,

    /// Evolution rate constant
    pub kappa: f64,

    /// Per-prime magnitude factors for projection
    pub attenuation: BTreeMap<u64, f64>,

    /// Allow generating identities before genesis is loaded
    pub allow_bootstrap: bool,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            genesis_path: PathBuf::from(DEFAULT_GENESIS_PATH),
            prime_count: 64,
            kappa: DEFAULT_KAPPA,
            attenuation: BTreeMap::new(),
            allow_bootstrap: false,
        }
    }
}

impl IdentityConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PR_GENESIS_PATH`: Genesis file (default: genesis.json)
    /// - `PR_PRIME_COUNT`: Basis size (default: 64)
    /// - `PR_KAPPA`: Evolution constant (default: 137.035999)
    /// - `PR_ATTENUATION`: `prime=factor` pairs, comma separated (default: none)
    /// - `PR_ALLOW_BOOTSTRAP`: Allow pre-genesis identities (default: false)
    pub fn from_env() -> Result<Self, IdentityError> {
        let defaults = Self::default();

        let prime_count = match env::var("PR_PRIME_COUNT") {
            Ok(v) => v
                .trim()
                .parse()
                .map_err(|_| IdentityError::InvalidConfig(format!("PR_PRIME_COUNT={v}")))?,
            Err(_) => defaults.prime_count,
        };

        let kappa = match env::var("PR_KAPPA") {
            Ok(v) => v
                .trim()
                .parse()
                .map_err(|_| IdentityError::InvalidConfig(format!("PR_KAPPA={v}")))?,
            Err(_) => defaults.kappa,
        };

        let attenuation = match env::var("PR_ATTENUATION") {
            Ok(v) => parse_attenuation(&v)?,
            Err(_) => defaults.attenuation,
        };

        let config = Self {
            genesis_path: env::var("PR_GENESIS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.genesis_path),
            prime_count,
            kappa,
            attenuation,
            allow_bootstrap: env::var("PR_ALLOW_BOOTSTRAP")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.allow_bootstrap),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), IdentityError> {
        if self.prime_count == 0 || self.prime_count > MAX_PRIME_COUNT {
            return Err(IdentityError::InvalidConfig(format!(
                "prime_count must be in 1..={MAX_PRIME_COUNT}, got {}",
                self.prime_count
            )));
        }

        Kappa::new(self.kappa)?;

        for (&prime, &factor) in &self.attenuation {
            if !is_prime(prime) {
                return Err(IdentityError::InvalidConfig(format!(
                    "attenuation key {prime} is not prime"
                )));
            }
            if !factor.is_finite() || factor < 0.0 {
                return Err(IdentityError::InvalidConfig(format!(
                    "attenuation factor for {prime} must be finite and >= 0, got {factor}"
                )));
            }
        }

        // A projection with every magnitude zeroed cannot be normalized.
        let silenced = |p: &u64| self.attenuation.get(p) == Some(&0.0);
        if generate_primes(self.prime_count).iter().all(silenced) {
            return Err(IdentityError::InvalidConfig(format!(
                "attenuation zeroes all {} basis primes",
                self.prime_count
            )));
        }
        Ok(())
    }

    /// Validated network parameters.
    pub fn resonance_params(&self) -> Result<ResonanceParams, IdentityError> {
        self.validate()?;
        Ok(ResonanceParams {
            prime_count: self.prime_count,
            kappa: Kappa::new(self.kappa)?,
            attenuation: self.attenuation.clone(),
        })
    }
}

/// Parse `"2=0.5,3=0.9"`.
pub fn parse_attenuation(raw: &str) -> Result<BTreeMap<u64, f64>, IdentityError> {
    let mut map = BTreeMap::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (prime, factor) = entry
            .split_once('=')
            .ok_or_else(|| IdentityError::InvalidConfig(format!("attenuation entry {entry:?}")))?;
        let prime = prime
            .trim()
            .parse::<u64>()
            .map_err(|_| IdentityError::InvalidConfig(format!("attenuation prime {prime:?}")))?;
        let factor = factor
            .trim()
            .parse::<f64>()
            .map_err(|_| IdentityError::InvalidConfig(format!("attenuation factor {factor:?}")))?;
        map.insert(prime, factor);
    }
    Ok(map)
}
