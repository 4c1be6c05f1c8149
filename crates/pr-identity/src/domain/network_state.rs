//! # Network State
//!
//! Process-wide trust anchor. Holds the loaded genesis record, its hash (the
//! network context every identity binds to) and the Aleph root key.
//!
//! Before a successful load the context is the bootstrap sentinel and no key
//! is ever root. Loading is one-shot: once initialized, later loads keep the
//! first values.

use super::errors::GenesisError;
use super::security::constant_time_compare;
use crate::ports::outbound::GenesisSource;
use serde::Deserialize;
use tracing::{info, warn};

/// Network context while no genesis is loaded.
pub const BOOTSTRAP_CONTEXT: &str = "PRE_GENESIS_BOOTSTRAP";

/// Default genesis location, relative to the working directory.
pub const DEFAULT_GENESIS_PATH: &str = "genesis.json";

#[derive(Debug, Deserialize)]
struct GenesisRecord {
    id: String,
    resonance: GenesisResonance,
    aleph: GenesisAleph,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenesisResonance {
    // Non-string hashes fall back to `id` instead of failing the load.
    #[serde(default, alias = "hash", alias = "tensor_hash")]
    tensor_hash: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenesisAleph {
    #[serde(alias = "public_key")]
    public_key: String,
}

/// Validated genesis data.
#[derive(Debug, Clone, PartialEq)]
pub struct GenesisAnchor {
    /// Full parsed record
    pub record: serde_json::Value,
    /// Network context: `resonance.tensorHash`, or `id` when absent
    pub genesis_hash: String,
    /// Aleph (root) public key
    pub aleph_key: String,
}

impl GenesisAnchor {
    /// Parse and validate genesis JSON.
    ///
    /// Requires a non-empty `id`, a `resonance` object and an `aleph` object
    /// with a non-empty `publicKey`.
    pub fn parse(contents: &str) -> Result<Self, GenesisError> {
        let record: serde_json::Value = serde_json::from_str(contents)
            .map_err(|e| GenesisError::MalformedJson(e.to_string()))?;

        let fields = GenesisRecord::deserialize(&record)
            .map_err(|e| GenesisError::InvalidRecord(e.to_string()))?;

        if fields.id.is_empty() {
            return Err(GenesisError::InvalidRecord("empty id".to_string()));
        }
        if fields.aleph.public_key.is_empty() {
            return Err(GenesisError::InvalidRecord(
                "empty aleph.publicKey".to_string(),
            ));
        }

        let genesis_hash = fields
            .resonance
            .tensor_hash
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .filter(|h| !h.is_empty())
            .map(str::to_string)
            .unwrap_or(fields.id);

        Ok(Self {
            record,
            genesis_hash,
            aleph_key: fields.aleph.public_key,
        })
    }
}

/// Result of `NetworkState::load`.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Genesis accepted; the node now runs under `genesis_hash`
    Loaded {
        /// New network context
        genesis_hash: String,
    },
    /// A genesis was already loaded; nothing changed
    AlreadyInitialized,
    /// Load failed; the node stays in bootstrap mode
    Failed(GenesisError),
}

impl LoadOutcome {
    /// Genesis was accepted by this call.
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }

    /// Label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            LoadOutcome::Loaded { .. } => "loaded",
            LoadOutcome::AlreadyInitialized => "already_initialized",
            LoadOutcome::Failed(_) => "failed",
        }
    }
}

/// Genesis-anchored network context.
#[derive(Debug, Default)]
pub struct NetworkState {
    anchor: Option<GenesisAnchor>,
}

impl NetworkState {
    /// Uninitialized state (bootstrap mode).
    pub fn new() -> Self {
        Self::default()
    }

    /// Load genesis from `source`.
    ///
    /// Never panics. Failures leave the state in bootstrap mode and are
    /// reported through the outcome and the log.
    pub fn load(&mut self, source: &dyn GenesisSource) -> LoadOutcome {
        let outcome = self.load_inner(source);
        pr_telemetry::metrics::GENESIS_LOADS
            .with_label_values(&[outcome.label()])
            .inc();
        outcome
    }

    fn load_inner(&mut self, source: &dyn GenesisSource) -> LoadOutcome {
        if self.anchor.is_some() {
            warn!(
                location = %source.location(),
                "Genesis already loaded, ignoring repeat load"
            );
            return LoadOutcome::AlreadyInitialized;
        }

        let anchor = match source.read_genesis().and_then(|c| GenesisAnchor::parse(&c)) {
            Ok(anchor) => anchor,
            Err(e) => {
                warn!(
                    location = %source.location(),
                    error = %e,
                    "Genesis load failed, running in bootstrap mode"
                );
                return LoadOutcome::Failed(e);
            }
        };

        info!(
            location = %source.location(),
            genesis_hash = %anchor.genesis_hash,
            "Genesis loaded"
        );
        let genesis_hash = anchor.genesis_hash.clone();
        self.anchor = Some(anchor);
        LoadOutcome::Loaded { genesis_hash }
    }

    /// A genesis has been loaded.
    pub fn is_initialized(&self) -> bool {
        self.anchor.is_some()
    }

    /// No genesis loaded.
    pub fn is_bootstrap(&self) -> bool {
        self.anchor.is_none()
    }

    /// Genesis hash, or `BOOTSTRAP_CONTEXT` before load.
    pub fn context(&self) -> &str {
        self.anchor
            .as_ref()
            .map(|a| a.genesis_hash.as_str())
            .unwrap_or(BOOTSTRAP_CONTEXT)
    }

    /// Loaded genesis data.
    pub fn anchor(&self) -> Option<&GenesisAnchor> {
        self.anchor.as_ref()
    }

    /// Aleph root key, if loaded.
    pub fn aleph_key(&self) -> Option<&str> {
        self.anchor.as_ref().map(|a| a.aleph_key.as_str())
    }

    /// `public_key` is the Aleph root key.
    ///
    /// Always `false` before genesis. The comparison is constant-time.
    pub fn is_root(&self, public_key: &str) -> bool {
        match &self.anchor {
            Some(anchor) => constant_time_compare(public_key, &anchor.aleph_key),
            None => false,
        }
    }
}
