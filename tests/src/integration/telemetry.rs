//! # Telemetry Wiring
//!
//! The identity engine reports into the `pr-telemetry` registry once
//! telemetry is initialized.

#[cfg(test)]
mod tests {
    use crate::anchored_service;
    use pr_identity::IdentityApi;
    use pr_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};

    #[test]
    fn test_identity_activity_is_exported() {
        // Only test in this crate that installs the global subscriber.
        let config = TelemetryConfig {
            console_output: false,
            ..TelemetryConfig::for_agent("pr-tests")
        };
        let guard = init_telemetry(config).unwrap();

        let service = anchored_service(400);
        service.generate_identity("agentA", Some("seed1")).unwrap();
        let _ = service.resonance_with_payload("agentA", "not json");
        service.decommission("agentA").unwrap();

        let text = encode_metrics().unwrap();
        assert!(text.contains("pr_identity_generated_total"));
        assert!(text.contains("pr_resonance_malformed_payloads_total"));
        assert!(text.contains("pr_identity_decommissioned_total"));
        assert!(text.contains("pr_genesis_loads_total"));
        drop(guard);
    }
}
