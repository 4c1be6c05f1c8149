//! # Complex Numbers
//!
//! Immutable `(re, im)` pair of `f64`. Every operation returns a new value.
//!
//! Callers are responsible for not feeding NaN-producing inputs; nothing here
//! checks for them except `is_finite`.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Complex number over IEEE-754 doubles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    /// Real component
    pub re: f64,
    /// Imaginary component
    pub im: f64,
}

impl Complex {
    /// Additive identity.
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };

    /// Multiplicative identity.
    pub const ONE: Complex = Complex { re: 1.0, im: 0.0 };

    /// Create from components.
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Construct `(r·cos θ, r·sin θ)`.
    pub fn from_polar(r: f64, theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self {
            re: r * cos,
            im: r * sin,
        }
    }

    /// Multiply both components by a real scalar.
    pub fn scale(self, s: f64) -> Self {
        Self {
            re: self.re * s,
            im: self.im * s,
        }
    }

    /// Negate the imaginary component.
    pub fn conjugate(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }

    /// `sqrt(re² + im²)`
    pub fn magnitude(self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// `re² + im²`, i.e. the probability weight of an amplitude.
    pub fn magnitude_squared(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// `atan2(im, re)`
    pub fn phase(self) -> f64 {
        self.im.atan2(self.re)
    }

    /// Both components are finite.
    pub fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

impl Add for Complex {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl Sub for Complex {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl Mul for Complex {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

// Lets amplitude buffers be wiped with `Zeroize`.
impl zeroize::DefaultIsZeroes for Complex {}

impl Neg for Complex {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}
