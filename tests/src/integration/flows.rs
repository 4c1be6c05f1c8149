//! # Identity Lifecycle Flows
//!
//! Drives `IdentityService` end to end over mock clock and entropy ports:
//!
//! 1. **Generation**: genesis-anchored identities, seed reproducibility
//! 2. **Publication**: bundles cross a JSON boundary and are re-validated
//! 3. **Resonance**: coherence between independently running services
//! 4. **Evolution**: drift driven by the injected clock
//! 5. **Decommission**: identities leave the registry

#[cfg(test)]
mod tests {
    use crate::{anchored_service, network_from, service_on, TEST_GENESIS};
    use pr_identity::{
        entropy_source, IdentityApi, IdentityError, PublicIdentity, PublicResonanceState,
    };
    use pr_math::hash_to_state;

    // =============================================================================
    // GENERATION
    // =============================================================================

    #[test]
    fn test_same_seed_reproduces_private_state_across_runs() {
        // Two independent "processes" with different randomness.
        let run_1 = anchored_service(1);
        let run_2 = anchored_service(2);

        let a = run_1.generate_identity("agentA", Some("seed1")).unwrap();
        let b = run_2.generate_identity("agentA", Some("seed1")).unwrap();

        // Entropy derivation is identical...
        let expected = hash_to_state(&entropy_source("G1", "seed1", "agentA"), 32);
        assert_eq!(run_1.network_context(), "G1");
        assert_eq!(run_1.entropy("agentA").unwrap(), expected.entropy());
        assert_eq!(run_2.entropy("agentA").unwrap(), expected.entropy());

        // ...but the published projection and classical keys are not.
        assert_ne!(a.resonance.state, b.resonance.state);
        assert_ne!(a.classical.public_key, b.classical.public_key);
    }

    #[test]
    fn test_projections_of_same_secret_share_magnitudes_only() {
        let a = anchored_service(3)
            .generate_identity("agentA", Some("seed1"))
            .unwrap();
        let b = anchored_service(4)
            .generate_identity("agentA", Some("seed1"))
            .unwrap();

        let mags_a = a.resonance.state.state().magnitudes();
        let mags_b = b.resonance.state.state().magnitudes();
        for ((p1, m1), (p2, m2)) in mags_a.iter().zip(mags_b.iter()) {
            assert_eq!(p1, p2);
            assert!((m1 - m2).abs() < 1e-9);
        }

        // Phases were redrawn, so the two publications are not a stable fingerprint.
        let coherence = a.resonance.state.coherence(&b.resonance.state);
        assert!((0.0..1.0).contains(&coherence));
        assert!(coherence < 0.999);
    }

    #[test]
    fn test_unseeded_identities_are_unrelated() {
        let service = anchored_service(5);
        service.generate_identity("agentA", None).unwrap();
        service.generate_identity("agentB", None).unwrap();

        let ha = service.entropy("agentA").unwrap();
        let hb = service.entropy("agentB").unwrap();
        assert_ne!(ha, hb);
    }

    // =============================================================================
    // PUBLICATION
    // =============================================================================

    #[test]
    fn test_bundle_survives_json_boundary() {
        let service = anchored_service(6);
        let bundle = service.generate_identity("agentA", Some("seed1")).unwrap();

        let wire = bundle.to_json();
        assert!(wire.contains("\"nodeId\":\"agentA\""));
        assert!(wire.contains("\"publicKey\""));

        let received = PublicIdentity::from_json(&wire).unwrap();
        assert_eq!(received.node_id, bundle.node_id);
        assert_eq!(received.classical, bundle.classical);
        assert_eq!(received.resonance.primes, bundle.resonance.primes);
        assert_eq!(received.resonance.timestamp, bundle.resonance.timestamp);
    }

    #[test]
    fn test_signed_bundle_verifies_on_receiver() {
        let sender = anchored_service(7);
        let receiver = anchored_service(8);

        let bundle = sender.generate_identity("agentA", Some("seed1")).unwrap();
        let wire = bundle.to_json();
        let signature = sender.sign("agentA", wire.as_bytes()).unwrap();

        let received = PublicIdentity::from_json(&wire).unwrap();
        assert!(receiver
            .verify_signature(&received.classical.public_key, wire.as_bytes(), &signature)
            .is_ok());

        let mut tampered = wire.clone().into_bytes();
        tampered[0] = b' ';
        assert!(matches!(
            receiver.verify_signature(&received.classical.public_key, &tampered, &signature),
            Err(IdentityError::SignatureVerificationFailed)
        ));
    }

    // =============================================================================
    // RESONANCE
    // =============================================================================

    #[test]
    fn test_cross_service_resonance() {
        let alice = anchored_service(9);
        let bob = anchored_service(10);

        let a = alice.generate_identity("agentA", Some("seed1")).unwrap();
        let b = bob.generate_identity("agentB", Some("seed2")).unwrap();

        let ab = alice
            .resonance_with_payload("agentA", &b.resonance.state.to_json())
            .unwrap();
        let ba = bob
            .resonance_with_payload("agentB", &a.resonance.state.to_json())
            .unwrap();

        assert!((0.0..=1.0).contains(&ab));
        // |<a|b>|² = |<b|a>|²
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_basis_has_zero_coherence() {
        let service = anchored_service(11);
        service.generate_identity("agentA", Some("seed1")).unwrap();

        // Single prime far outside the 32-prime basis.
        let far = r#"{"7919": {"re": 1.0, "im": 0.0}}"#;
        assert_eq!(service.resonance_with_payload("agentA", far).unwrap(), 0.0);
    }

    #[test]
    fn test_partial_overlap_is_bounded() {
        let service = anchored_service(12);
        service.generate_identity("agentA", Some("seed1")).unwrap();

        let other = PublicResonanceState::from_json(
            r#"{"2": {"re": 0.6, "im": 0.0}, "7919": {"re": 0.0, "im": 0.8}}"#,
        )
        .unwrap();
        let c = service
            .resonance_with_payload("agentA", &other.to_json())
            .unwrap();
        assert!((0.0..=0.36 + 1e-9).contains(&c));
    }

    // =============================================================================
    // EVOLUTION
    // =============================================================================

    #[test]
    fn test_evolution_follows_injected_clock() {
        let service = anchored_service(13);
        let first = service.generate_identity("agentA", Some("seed1")).unwrap();

        // Same instant: no drift, same publication.
        let same = service.public_identity("agentA").unwrap();
        assert_eq!(same.resonance.timestamp, first.resonance.timestamp);
        assert_eq!(same.resonance.state, first.resonance.state);

        let before = service.entropy("agentA").unwrap();
        assert!(!service.evolve_identity("agentA").unwrap());

        service.clock().advance(2_000);
        let later = service.public_identity("agentA").unwrap();
        assert_eq!(later.resonance.timestamp, first.resonance.timestamp + 2_000);
        assert_ne!(later.resonance.state, first.resonance.state);

        // Evolution rotates phases only, so the magnitude profile (and entropy)
        // stays put.
        assert!((service.entropy("agentA").unwrap() - before).abs() < 1e-9);
    }

    #[test]
    fn test_bootstrap_identity_flagged() {
        let bootstrap = service_on(network_from("not json"), 14, true);
        let bundle = bootstrap
            .generate_identity("agentA", Some("seed1"))
            .unwrap();
        assert!(bundle.bootstrap);

        let anchored = service_on(network_from(TEST_GENESIS), 14, true);
        let bundle = anchored.generate_identity("agentA", Some("seed1")).unwrap();
        assert!(!bundle.bootstrap);
    }

    // =============================================================================
    // DECOMMISSION
    // =============================================================================

    #[test]
    fn test_decommissioned_identity_is_gone() {
        let service = anchored_service(15);
        service.generate_identity("agentA", Some("seed1")).unwrap();
        service.decommission("agentA").unwrap();

        assert!(matches!(
            service.public_identity("agentA"),
            Err(IdentityError::UnknownIdentity(_))
        ));
        assert!(matches!(
            service.resonance_with_payload("agentA", "{}"),
            Err(IdentityError::UnknownIdentity(_))
        ));
    }
}
