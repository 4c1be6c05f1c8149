//! # Prime Hilbert State
//!
//! A finite complex-amplitude vector whose basis is an ascending list of
//! distinct primes.
//!
//! ## Transforms
//!
//! | Method | Deterministic | Result |
//! |--------|---------------|--------|
//! | `normalize` | yes | Unit norm (no-op below `NORM_EPSILON`) |
//! | `evolve` | yes | Per-prime phase rotation at rate `ln κ / ln p`, renormalized |
//! | `project_with` | no | Magnitudes kept (optionally attenuated), phases redrawn, renormalized |
//!
//! Two states only interact over the primes they share: `inner` ignores primes
//! present in a single operand, so states built over different prime counts
//! remain comparable on their overlap.
//!
//! Degenerate inputs are legal values, not errors. An empty basis has zero
//! entropy and an inner product of exactly `(0, 0)`.

use crate::complex::Complex;
use crate::errors::MathError;
use crate::primes::{generate_primes, is_prime};
use rand::Rng;
use std::collections::BTreeMap;
use std::f64::consts::TAU;
use zeroize::Zeroize;

/// Norms below this are treated as the zero vector by `normalize`.
pub const NORM_EPSILON: f64 = 1e-10;

/// Probabilities at or below this are skipped by `entropy` (avoids `ln 0`).
pub const PROB_EPSILON: f64 = 1e-10;

/// Default network-wide evolution constant.
pub const DEFAULT_KAPPA: f64 = 137.035999;

/// Evolution frequency constant.
///
/// Controls the relative rotation rates between basis primes. All participants
/// of a network must agree on the value, so it is threaded explicitly through
/// every evolution call instead of living in a global.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kappa(f64);

impl Kappa {
    /// Validate and wrap a kappa value.
    ///
    /// `ln κ` must be finite, so κ must be finite and `> 0`. Values below 1
    /// reverse the rotation direction; `κ = 1` freezes evolution.
    pub fn new(value: f64) -> Result<Self, MathError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(MathError::InvalidKappa(value));
        }
        Ok(Self(value))
    }

    /// Raw value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Rotation frequency (cycles per second) of basis prime `p`: `ln κ / ln p`.
    pub fn frequency(&self, prime: u64) -> f64 {
        self.0.ln() / (prime as f64).ln()
    }
}

impl Default for Kappa {
    fn default() -> Self {
        Self(DEFAULT_KAPPA)
    }
}

/// Complex amplitude vector over a prime basis.
///
/// Transforms return new instances; only `normalize` and `set_amplitude`
/// mutate in place, and the basis never changes after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct PrimeHilbertState {
    /// Ascending, duplicate-free basis primes
    primes: Vec<u64>,
    /// `amplitudes[i]` belongs to `primes[i]`
    amplitudes: Vec<Complex>,
}

impl PrimeHilbertState {
    /// Create an all-zero state over `basis`.
    ///
    /// The basis is sorted and de-duplicated. Fails if any entry is not prime.
    pub fn new(basis: &[u64]) -> Result<Self, MathError> {
        if let Some(&bad) = basis.iter().find(|&&p| !is_prime(p)) {
            return Err(MathError::NotPrime(bad));
        }

        let mut primes = basis.to_vec();
        primes.sort_unstable();
        primes.dedup();

        let amplitudes = vec![Complex::ZERO; primes.len()];
        Ok(Self { primes, amplitudes })
    }

    /// Create an all-zero state over the first `count` primes.
    pub fn with_prime_count(count: usize) -> Self {
        let primes = generate_primes(count);
        let amplitudes = vec![Complex::ZERO; primes.len()];
        Self { primes, amplitudes }
    }

    /// Build a state from `(prime, amplitude)` pairs.
    ///
    /// Every key must be prime and every amplitude finite. Duplicate keys keep
    /// the last value.
    pub fn from_amplitudes<I>(pairs: I) -> Result<Self, MathError>
    where
        I: IntoIterator<Item = (u64, Complex)>,
    {
        let mut slots = BTreeMap::new();
        for (prime, amp) in pairs {
            if !is_prime(prime) {
                return Err(MathError::NotPrime(prime));
            }
            if !amp.is_finite() {
                return Err(MathError::NonFiniteAmplitude { prime });
            }
            slots.insert(prime, amp);
        }

        let (primes, amplitudes) = slots.into_iter().unzip();
        Ok(Self { primes, amplitudes })
    }

    /// Internal constructor for callers that already hold a valid sorted basis.
    pub(crate) fn from_parts(primes: Vec<u64>, amplitudes: Vec<Complex>) -> Self {
        debug_assert_eq!(primes.len(), amplitudes.len());
        debug_assert!(primes.windows(2).all(|w| w[0] < w[1]));
        Self { primes, amplitudes }
    }

    /// The basis primes, ascending.
    pub fn basis(&self) -> &[u64] {
        &self.primes
    }

    /// Number of basis primes.
    pub fn len(&self) -> usize {
        self.primes.len()
    }

    /// Basis is empty.
    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    /// Iterate `(prime, amplitude)` in ascending prime order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, Complex)> + '_ {
        self.primes.iter().copied().zip(self.amplitudes.iter().copied())
    }

    /// Amplitudes keyed by prime.
    pub fn to_amplitude_map(&self) -> BTreeMap<u64, Complex> {
        self.iter().collect()
    }

    /// Overwrite the amplitude of a basis prime.
    pub fn set_amplitude(&mut self, prime: u64, amp: Complex) -> Result<(), MathError> {
        if !amp.is_finite() {
            return Err(MathError::NonFiniteAmplitude { prime });
        }
        let idx = self
            .primes
            .binary_search(&prime)
            .map_err(|_| MathError::PrimeNotInBasis(prime))?;
        self.amplitudes[idx] = amp;
        Ok(())
    }

    /// Amplitude at `prime`, or zero when the prime is outside the basis.
    pub fn amplitude(&self, prime: u64) -> Complex {
        match self.primes.binary_search(&prime) {
            Ok(idx) => self.amplitudes[idx],
            Err(_) => Complex::ZERO,
        }
    }

    /// `Σ |amp_p|²`
    pub fn norm_squared(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.magnitude_squared()).sum()
    }

    /// Unit norm within `tolerance`.
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.norm_squared() - 1.0).abs() <= tolerance
    }

    /// Per-prime magnitudes, ascending by prime.
    pub fn magnitudes(&self) -> Vec<(u64, f64)> {
        self.iter().map(|(p, a)| (p, a.magnitude())).collect()
    }

    /// `Σ conj(self[p]) · other[p]` over primes present in both states.
    pub fn inner(&self, other: &PrimeHilbertState) -> Complex {
        let mut sum = Complex::ZERO;
        let (mut i, mut j) = (0, 0);

        // Both bases are sorted, so a merge walk finds the overlap.
        while i < self.primes.len() && j < other.primes.len() {
            match self.primes[i].cmp(&other.primes[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum = sum + self.amplitudes[i].conjugate() * other.amplitudes[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// `|inner(self, other)|²`, clamped to `[0, 1]` against rounding.
    ///
    /// Only meaningful as a bounded score when both states are normalized.
    pub fn coherence(&self, other: &PrimeHilbertState) -> f64 {
        self.inner(other).magnitude_squared().clamp(0.0, 1.0)
    }

    /// Scale to unit norm in place.
    ///
    /// Leaves the state untouched when its norm is below `NORM_EPSILON`.
    pub fn normalize(&mut self) -> &mut Self {
        let norm = self.norm_squared().sqrt();
        if norm < NORM_EPSILON {
            return self;
        }

        let inv = 1.0 / norm;
        for amp in &mut self.amplitudes {
            *amp = amp.scale(inv);
        }
        self
    }

    /// Normalized copy.
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Shannon entropy `-Σ prob_p · ln(prob_p)` with `prob_p = |amp_p|²`.
    pub fn entropy(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(|a| a.magnitude_squared())
            .filter(|&prob| prob > PROB_EPSILON)
            .map(|prob| -prob * prob.ln())
            .sum()
    }

    /// Deterministic time evolution with no noise term.
    pub fn evolve(&self, dt: f64, kappa: Kappa) -> Self {
        self.evolve_with_noise(dt, kappa, |_| 0.0)
    }

    /// Rotate each amplitude by `2π · (ln κ / ln p) · dt + noise(p)`, then renormalize.
    ///
    /// Bit-reproducible for identical `dt`, `kappa` and a pure `noise`.
    pub fn evolve_with_noise<F>(&self, dt: f64, kappa: Kappa, noise: F) -> Self
    where
        F: Fn(u64) -> f64,
    {
        let amplitudes = self
            .iter()
            .map(|(p, amp)| {
                let angle = TAU * kappa.frequency(p) * dt + noise(p);
                amp * Complex::from_polar(1.0, angle)
            })
            .collect();

        Self::from_parts(self.primes.clone(), amplitudes).normalized()
    }

    /// One-way projection: keep (attenuated) magnitudes, redraw every phase
    /// uniformly in `[0, 2π)` from `rng`, renormalize.
    ///
    /// `attenuation` maps primes to magnitude factors; missing primes use 1.0.
    pub fn project_with<R>(&self, rng: &mut R, attenuation: &BTreeMap<u64, f64>) -> Self
    where
        R: Rng + ?Sized,
    {
        let amplitudes = self
            .iter()
            .map(|(p, amp)| {
                let factor = attenuation.get(&p).copied().unwrap_or(1.0);
                let theta = rng.gen::<f64>() * TAU;
                Complex::from_polar(amp.magnitude() * factor, theta)
            })
            .collect();

        Self::from_parts(self.primes.clone(), amplitudes).normalized()
    }

    /// `project_with` using the thread-local RNG.
    pub fn project(&self, attenuation: &BTreeMap<u64, f64>) -> Self {
        self.project_with(&mut rand::thread_rng(), attenuation)
    }

    /// Overwrite every amplitude with zero.
    pub fn wipe(&mut self) {
        self.amplitudes.zeroize();
    }
}
