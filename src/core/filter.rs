// PeerLens - core/filter.rs
//
// Filter engine for the normalised peer list.
// Text and status predicates are AND-combined.
// Core layer: pure logic, no I/O or presentation dependencies.

use crate::core::model::{Peer, PeerStatus};

/// Status predicate: everything, or exactly one status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// No status filtering.
    #[default]
    All,

    /// Exact-equality match on one status.
    Only(PeerStatus),
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

/// Complete filter state. Both fields are AND-combined when applied.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Substring text search over name, tunnel address, and comment
    /// (case-insensitive). Empty = no filter.
    pub text_search: String,

    /// Status filter.
    pub status: StatusFilter,
}

impl FilterState {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.text_search.is_empty() && self.status == StatusFilter::All
    }
}

/// Apply filters to a slice of peers, returning indices of matching peers.
///
/// Returns a Vec of indices into the original slice, in input order —
/// no sorting is performed here. The index form avoids copying peers and
/// lets the caller keep one materialised list per refresh.
pub fn apply_filters(peers: &[Peer], filter: &FilterState) -> Vec<usize> {
    if filter.is_empty() {
        return (0..peers.len()).collect();
    }

    let text_lower = filter.text_search.to_lowercase();

    peers
        .iter()
        .enumerate()
        .filter(|(_, peer)| matches_all(peer, filter, &text_lower))
        .map(|(idx, _)| idx)
        .collect()
}

/// Check if a single peer matches all active filters.
fn matches_all(peer: &Peer, filter: &FilterState, text_lower: &str) -> bool {
    // Status filter
    if let StatusFilter::Only(status) = filter.status {
        if peer.status != status {
            return false;
        }
    }

    // Text search: name OR tunnel address OR comment. Name and comment are
    // lowered to honour the case-insensitive contract; the address is
    // matched as-is (dotted quads carry no case).
    if !text_lower.is_empty()
        && !peer.name.to_lowercase().contains(text_lower)
        && !peer.tunnel_address.contains(text_lower)
        && !peer.comment.to_lowercase().contains(text_lower)
    {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_peer(name: &str, address: &str, comment: &str, status: PeerStatus) -> Peer {
        Peer {
            id: name.to_string(),
            name: name.to_string(),
            tunnel_address: address.to_string(),
            local_networks: Vec::new(),
            status,
            last_handshake: "never".to_string(),
            comment: comment.to_string(),
            endpoint_address: "N/A".to_string(),
        }
    }

    fn make_list() -> Vec<Peer> {
        vec![
            make_peer("MC7", "10.0.0.5", "branch office", PeerStatus::Reserved),
            make_peer("MC8", "10.0.0.8", "", PeerStatus::StaticOverride),
            make_peer("Warehouse", "10.0.0.9", "MC-spare", PeerStatus::Active),
            make_peer("unnamed", "N/A", "", PeerStatus::Inactive),
        ]
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let peers = make_list();
        let result = apply_filters(&peers, &FilterState::default());
        assert_eq!(result, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_status_filter_exact_equality() {
        let peers = make_list();
        let filter = FilterState {
            status: StatusFilter::Only(PeerStatus::Active),
            ..Default::default()
        };
        assert_eq!(apply_filters(&peers, &filter), vec![2]);
    }

    #[test]
    fn test_text_search_case_insensitive_on_name() {
        let peers = make_list();
        let filter = FilterState {
            text_search: "warehouse".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&peers, &filter), vec![2]);
    }

    #[test]
    fn test_text_search_matches_address() {
        let peers = make_list();
        let filter = FilterState {
            text_search: "10.0.0.8".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&peers, &filter), vec![1]);
    }

    #[test]
    fn test_text_search_matches_comment() {
        let peers = make_list();
        let filter = FilterState {
            text_search: "BRANCH".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&peers, &filter), vec![0]);
    }

    #[test]
    fn test_predicates_and_combined() {
        let peers = make_list();
        // "mc" matches MC7, MC8 (name) and Warehouse (comment); the status
        // predicate narrows that down to the reserved one.
        let filter = FilterState {
            text_search: "mc".to_string(),
            status: StatusFilter::Only(PeerStatus::Reserved),
        };
        assert_eq!(apply_filters(&peers, &filter), vec![0]);
    }

    #[test]
    fn test_input_order_preserved() {
        let peers = make_list();
        let filter = FilterState {
            text_search: "mc".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&peers, &filter), vec![0, 1, 2]);
    }

    #[test]
    fn test_status_filter_parsing() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "active".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(PeerStatus::Active)
        );
        assert_eq!(
            "static-override".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(PeerStatus::StaticOverride)
        );
        assert!("bogus".parse::<StatusFilter>().is_err());
    }
}
