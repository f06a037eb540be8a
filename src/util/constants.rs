// PeerLens - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "PeerLens";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "PeerLens";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Sentinel values
//
// The pipeline is total: missing raw fields fall back to these sentinels
// instead of producing errors, so every peer row is always displayable.
// =============================================================================

/// Display name used when a peer has neither a name nor a comment.
pub const UNNAMED_PEER: &str = "unnamed";

/// Placeholder for a tunnel address or endpoint that could not be determined.
pub const NOT_AVAILABLE: &str = "N/A";

/// Handshake display value for a peer that has never completed a handshake.
pub const NEVER_HANDSHAKE: &str = "never";

// =============================================================================
// Classification defaults (reference deployment)
// =============================================================================

/// Relative-time unit markers that mark a handshake as stale.
///
/// The router reports handshake recency as a compact relative-time string
/// ("2d3h42m10s", "15s", ...). A peer whose last handshake is measured in
/// hours, days, or weeks is considered inactive; seconds and minutes count
/// as active. This is a textual heuristic over the display string, not a
/// parsed duration.
pub const STALE_HANDSHAKE_MARKERS: [char; 3] = ['h', 'd', 'w'];

/// Tunnel-numbers exempted into Reserved status regardless of activity
/// (dynamic-DNS reservations in the reference deployment).
pub const DEFAULT_RESERVED_IDS: &[u32] = &[2, 7, 13];

/// Tunnel-number -> fixed local-network address assignments, forcing
/// StaticOverride status. Takes precedence over the reserved set.
pub const DEFAULT_STATIC_OVERRIDES: &[(u32, &str)] =
    &[(8, "192.168.108.0/24"), (21, "192.168.121.0/24")];

/// Address-pool capacity of the reference deployment.
pub const DEFAULT_POOL_CAPACITY: usize = 200;

/// Substrings identifying infrastructure-reserved address entries.
///
/// Any allowed-address entry containing one of these is excluded from a
/// peer's local-network list: the first is the tunnel overlay subnet
/// (the tunnel address itself lives there), the second the gateway
/// management subnet.
pub const DEFAULT_INFRASTRUCTURE_PREFIXES: &[&str] = &["10.0.0.", "172.16.100."];

// =============================================================================
// Router REST API
// =============================================================================

/// REST path of the WireGuard peer collection, relative to the base URL.
pub const PEERS_REST_PATH: &str = "/rest/interface/wireguard/peers";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Minimum user-configurable request timeout (seconds).
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Maximum user-configurable request timeout (seconds).
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Maximum number of peer records accepted in a single response.
/// A response larger than this indicates a misconfigured endpoint rather
/// than a real peer list.
pub const MAX_PEERS_PER_RESPONSE: usize = 10_000;

// =============================================================================
// Pool limits
// =============================================================================

/// Minimum user-configurable pool capacity.
pub const MIN_POOL_CAPACITY: usize = 1;

/// Maximum user-configurable pool capacity.
pub const MAX_POOL_CAPACITY: usize = 100_000;

// =============================================================================
// Export
// =============================================================================

/// Maximum number of peers that can be exported in a single operation.
pub const MAX_EXPORT_PEERS: usize = 100_000;

/// Separator used to join local-network entries in a single CSV cell.
pub const CSV_NETWORK_SEPARATOR: &str = ";";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
