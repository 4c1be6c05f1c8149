//! Prometheus metrics for the Prime-Resonance engine.
//!
//! All metrics follow the naming convention: `pr_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    linear_buckets, CounterVec, Encoder, Histogram, HistogramOpts, IntCounter, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Crate-local metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // IDENTITY METRICS
    // =========================================================================

    /// Identities generated, by network mode (anchored/bootstrap)
    pub static ref IDENTITIES_GENERATED: CounterVec = CounterVec::new(
        Opts::new("pr_identity_generated_total", "Key triplets generated"),
        &["mode"]
    ).expect("metric creation failed");

    /// Evolution steps that advanced a private state
    pub static ref IDENTITY_EVOLUTIONS: IntCounter = IntCounter::new(
        "pr_identity_evolutions_total",
        "Evolution steps applied to private resonance states"
    ).expect("metric creation failed");

    /// Identities removed and wiped
    pub static ref IDENTITIES_DECOMMISSIONED: IntCounter = IntCounter::new(
        "pr_identity_decommissioned_total",
        "Identities decommissioned and zeroized"
    ).expect("metric creation failed");

    // =========================================================================
    // RESONANCE METRICS
    // =========================================================================

    /// Coherence computations
    pub static ref COHERENCE_CHECKS: IntCounter = IntCounter::new(
        "pr_resonance_coherence_checks_total",
        "Coherence scores computed against published states"
    ).expect("metric creation failed");

    /// Distribution of coherence scores
    pub static ref COHERENCE_SCORE: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "pr_resonance_coherence_score",
            "Coherence scores in [0, 1]"
        ).buckets(linear_buckets(0.1, 0.1, 10).expect("valid bucket layout"))
    ).expect("metric creation failed");

    /// Published states rejected at decode time
    pub static ref MALFORMED_PAYLOADS: IntCounter = IntCounter::new(
        "pr_resonance_malformed_payloads_total",
        "Remote resonance payloads rejected as malformed"
    ).expect("metric creation failed");

    // =========================================================================
    // GENESIS METRICS
    // =========================================================================

    /// Genesis load attempts by outcome (loaded/already_initialized/failed)
    pub static ref GENESIS_LOADS: CounterVec = CounterVec::new(
        Opts::new("pr_genesis_loads_total", "Genesis anchor load attempts"),
        &["outcome"]
    ).expect("metric creation failed");
}

/// Handle to the registered metrics
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the crate registry.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Identity
        Box::new(IDENTITIES_GENERATED.clone()),
        Box::new(IDENTITY_EVOLUTIONS.clone()),
        Box::new(IDENTITIES_DECOMMISSIONED.clone()),
        // Resonance
        Box::new(COHERENCE_CHECKS.clone()),
        Box::new(COHERENCE_SCORE.clone()),
        Box::new(MALFORMED_PAYLOADS.clone()),
        // Genesis
        Box::new(GENESIS_LOADS.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
