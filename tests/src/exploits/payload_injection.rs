//! # Resonance Payload Injection
//!
//! An adversary publishes crafted resonance states hoping to crash the
//! receiver, force a perfect coherence score or poison a comparison with
//! NaN. Every such payload must be rejected at decode time.

#[cfg(test)]
mod tests {
    use crate::anchored_service;
    use pr_identity::{
        IdentityApi, IdentityError, PublicIdentity, ResonanceDecodeError, MAX_BASIS_PRIME,
    };
    use std::time::{Duration, Instant};

    fn reject(payload: &str) -> ResonanceDecodeError {
        let service = anchored_service(100);
        service.generate_identity("victim", Some("seed")).unwrap();
        match service.resonance_with_payload("victim", payload) {
            Err(IdentityError::MalformedResonance(e)) => e,
            other => panic!("payload accepted: {payload} -> {other:?}"),
        }
    }

    #[test]
    fn test_attack_unnormalized_amplification() {
        // Scaling the victim's own basis up would push coherence above 1.
        let err = reject(r#"{"2": {"re": 10.0, "im": 0.0}, "3": {"re": 10.0, "im": 0.0}}"#);
        assert!(matches!(err, ResonanceDecodeError::NotNormalized { .. }));
    }

    #[test]
    fn test_attack_overflowing_amplitude() {
        // 1e400 does not fit an f64.
        let err = reject(r#"{"2": {"re": 1e400, "im": 0.0}}"#);
        assert!(matches!(
            err,
            ResonanceDecodeError::InvalidJson(_) | ResonanceDecodeError::NonFiniteAmplitude { .. }
        ));
    }

    #[test]
    fn test_attack_composite_basis() {
        let err = reject(r#"{"1": {"re": 1.0, "im": 0.0}}"#);
        assert_eq!(err, ResonanceDecodeError::NotPrime(1));
    }

    #[test]
    fn test_attack_negative_or_garbage_keys() {
        assert!(matches!(
            reject(r#"{"-2": {"re": 1.0, "im": 0.0}}"#),
            ResonanceDecodeError::InvalidPrimeKey(_)
        ));
        assert!(matches!(
            reject(r#"{"0x2": {"re": 1.0, "im": 0.0}}"#),
            ResonanceDecodeError::InvalidPrimeKey(_)
        ));
    }

    #[test]
    fn test_attack_type_confusion() {
        assert!(matches!(
            reject(r#"{"2": [1.0, 0.0]}"#),
            ResonanceDecodeError::InvalidJson(_)
        ));
        assert!(matches!(
            reject(r#"{"2": {"re": "1", "im": 0}}"#),
            ResonanceDecodeError::InvalidJson(_)
        ));
        assert!(matches!(reject("null"), ResonanceDecodeError::InvalidJson(_)));
    }

    #[test]
    fn test_attack_huge_prime_keys_rejected_cheaply() {
        let service = anchored_service(102);
        service.generate_identity("victim", Some("seed")).unwrap();

        // Primes just below 2^64 would cost billions of trial divisions each.
        let payload = [
            18446744073709551557u64,
            18446744073709551533,
            18446744073709551521,
        ]
        .iter()
        .map(|p| format!(r#""{p}": {{"re": 0.5, "im": 0.0}}"#))
        .collect::<Vec<_>>()
        .join(",");

        let started = Instant::now();
        let err = service
            .resonance_with_payload("victim", &format!("{{{payload}}}"))
            .unwrap_err();
        assert!(started.elapsed() < Duration::from_secs(1));
        assert!(matches!(
            err,
            IdentityError::MalformedResonance(ResonanceDecodeError::PrimeOutOfRange(p)) if p > MAX_BASIS_PRIME
        ));
    }

    #[test]
    fn test_attack_bundle_primes_disagree_with_state() {
        let service = anchored_service(103);
        service.generate_identity("victim", Some("seed")).unwrap();
        let honest = service.generate_identity("peer", Some("peer-seed")).unwrap();

        let mut value = serde_json::to_value(&honest).unwrap();
        value["resonance"]["primes"] = serde_json::json!([2]);
        assert!(PublicIdentity::from_json(&value.to_string()).is_err());

        let mut forged = honest.clone();
        forged.resonance.primes = vec![2];
        assert!(matches!(
            service.resonance_with_identity("victim", &forged),
            Err(IdentityError::MalformedResonance(ResonanceDecodeError::BasisMismatch { .. }))
        ));
        assert!(service.resonance_with_identity("victim", &honest).is_ok());
    }

    #[test]
    fn test_attack_empty_state() {
        assert!(matches!(reject("{}"), ResonanceDecodeError::NotNormalized { .. }));
    }

    #[test]
    fn test_rejection_leaves_identity_usable() {
        let service = anchored_service(101);
        let own = service.generate_identity("victim", Some("seed")).unwrap();
        assert!(service.resonance_with_payload("victim", "garbage").is_err());

        let c = service
            .resonance_with_payload("victim", &own.resonance.state.to_json())
            .unwrap();
        assert!((c - 1.0).abs() < 1e-9);
    }
}
