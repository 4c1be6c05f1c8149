//! # Attack Simulations
//!
//! Each module plays an adversary against the identity engine and asserts the
//! attack fails.

pub mod payload_injection;
pub mod root_impersonation;
