// PeerLens - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
//
// These types are the shared vocabulary across all layers.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// =============================================================================
// Raw peer record (router REST API input)
// =============================================================================

/// A single raw peer record exactly as the router's REST API returns it.
///
/// Field names follow the router's kebab-case JSON convention. Every field
/// except the identifier may be absent; the normaliser fills gaps with
/// sentinels rather than failing. Unknown fields in the response are
/// ignored — the router returns far more than the pipeline consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPeerRecord {
    /// Opaque identifier, unique within a fetch batch.
    #[serde(rename = ".id")]
    pub id: String,

    /// Comma-separated mix of one tunnel address (CIDR or bare IPv4) and
    /// zero or more local-network addresses.
    #[serde(rename = "allowed-address")]
    pub allowed_address: Option<String>,

    /// Administrator-assigned display name.
    pub name: Option<String>,

    /// Free-text comment.
    pub comment: Option<String>,

    /// Human-readable relative-time string ("2d3h42m10s", "15s", ...);
    /// absent when the peer has never completed a handshake.
    #[serde(rename = "last-handshake")]
    pub last_handshake: Option<String>,

    /// Address the peer most recently connected from.
    #[serde(rename = "current-endpoint-address")]
    pub endpoint_address: Option<String>,
}

// =============================================================================
// Peer (normalised output of the pipeline)
// =============================================================================

/// A display-ready peer, normalised and classified.
///
/// This is the core data unit that flows through filtering, display,
/// and export. Immutable after creation: each refresh produces a fresh
/// list, the previous one is discarded rather than merged.
#[derive(Debug, Clone, Serialize)]
pub struct Peer {
    /// Raw record identifier.
    pub id: String,

    /// Resolved display name (name, else comment, else "unnamed").
    /// Never empty.
    pub name: String,

    /// First IPv4 literal found in the allowed-address field, or "N/A".
    pub tunnel_address: String,

    /// Local-network entries fronted by this peer, in input order,
    /// with infrastructure-reserved entries excluded.
    pub local_networks: Vec<String>,

    /// Classification result.
    pub status: PeerStatus,

    /// Raw handshake display string, or "never".
    pub last_handshake: String,

    /// Raw comment, or empty.
    pub comment: String,

    /// Raw endpoint address, or "N/A".
    pub endpoint_address: String,
}

// =============================================================================
// Peer status
// =============================================================================

/// Classification of a peer, exactly one per peer.
///
/// Reserved and StaticOverride are administrative classifications that
/// take precedence over the activity-derived Active/Inactive default;
/// StaticOverride wins over Reserved when a tunnel-number is in both
/// tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PeerStatus {
    Active,
    Inactive,
    Reserved,
    StaticOverride,
}

impl PeerStatus {
    /// Returns all variants in display order.
    pub fn all() -> &'static [PeerStatus] {
        &[
            PeerStatus::Active,
            PeerStatus::Inactive,
            PeerStatus::Reserved,
            PeerStatus::StaticOverride,
        ]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            PeerStatus::Active => "Active",
            PeerStatus::Inactive => "Inactive",
            PeerStatus::Reserved => "Reserved",
            PeerStatus::StaticOverride => "Static",
        }
    }

    /// Stable kebab-case identifier, matching the CLI/filter vocabulary.
    pub fn as_str(&self) -> &'static str {
        match self {
            PeerStatus::Active => "active",
            PeerStatus::Inactive => "inactive",
            PeerStatus::Reserved => "reserved",
            PeerStatus::StaticOverride => "static-override",
        }
    }
}

impl std::fmt::Display for PeerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PeerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(PeerStatus::Active),
            "inactive" => Ok(PeerStatus::Inactive),
            "reserved" => Ok(PeerStatus::Reserved),
            "static-override" | "static" => Ok(PeerStatus::StaticOverride),
            other => Err(format!(
                "unknown status '{other}' (expected one of: active, inactive, \
                 reserved, static-override)"
            )),
        }
    }
}

// =============================================================================
// Classification rules
// =============================================================================

/// Static classification tables, injected at construction time.
///
/// Immutable configuration data, not hard-coded literals: the reference
/// deployment's tables ship as compiled-in defaults and config.toml
/// replaces them wholesale.
#[derive(Debug, Clone)]
pub struct ClassificationRules {
    /// Tunnel-numbers classified Reserved regardless of activity.
    pub reserved_ids: HashSet<u32>,

    /// Tunnel-number -> fixed local-network address. Membership forces
    /// StaticOverride and wins over the reserved set.
    pub static_overrides: HashMap<u32, String>,
}

impl Default for ClassificationRules {
    /// Reference-deployment tables from `util::constants`.
    fn default() -> Self {
        use crate::util::constants;
        Self {
            reserved_ids: constants::DEFAULT_RESERVED_IDS.iter().copied().collect(),
            static_overrides: constants::DEFAULT_STATIC_OVERRIDES
                .iter()
                .map(|&(id, addr)| (id, addr.to_string()))
                .collect(),
        }
    }
}

// =============================================================================
// Pool statistics
// =============================================================================

/// Aggregate statistics over one normalised peer list.
///
/// The per-status counts always sum to `total`. `available` is signed
/// and deliberately never clamped: a negative value is the intended
/// signal that the pool is over-provisioned, not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub reserved: usize,
    pub static_override: usize,
    pub available: i64,
}

impl PoolStats {
    /// Count for one status value.
    pub fn count_for(&self, status: PeerStatus) -> usize {
        match status {
            PeerStatus::Active => self.active,
            PeerStatus::Inactive => self.inactive,
            PeerStatus::Reserved => self.reserved,
            PeerStatus::StaticOverride => self.static_override,
        }
    }
}
