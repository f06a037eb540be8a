// PeerLens - core/stats.rs
//
// Aggregate pool statistics: one counting pass over a normalised list.

use crate::core::model::{Peer, PeerStatus, PoolStats};

/// Compute pool statistics for one peer list.
///
/// `pool_capacity` is the fixed address-pool size the deployment was
/// provisioned with. `available` goes negative when the list exceeds it —
/// preserved as the over-provisioning signal, never clamped or treated
/// as an error.
pub fn aggregate(peers: &[Peer], pool_capacity: usize) -> PoolStats {
    let mut stats = PoolStats {
        total: peers.len(),
        ..PoolStats::default()
    };

    for peer in peers {
        match peer.status {
            PeerStatus::Active => stats.active += 1,
            PeerStatus::Inactive => stats.inactive += 1,
            PeerStatus::Reserved => stats.reserved += 1,
            PeerStatus::StaticOverride => stats.static_override += 1,
        }
    }

    stats.available = pool_capacity as i64 - stats.total as i64;
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_peer(status: PeerStatus) -> Peer {
        Peer {
            id: "*1".to_string(),
            name: "test".to_string(),
            tunnel_address: "10.0.0.1".to_string(),
            local_networks: Vec::new(),
            status,
            last_handshake: "never".to_string(),
            comment: String::new(),
            endpoint_address: "N/A".to_string(),
        }
    }

    #[test]
    fn test_counts_sum_to_total() {
        let peers: Vec<Peer> = [
            PeerStatus::Active,
            PeerStatus::Active,
            PeerStatus::Inactive,
            PeerStatus::Reserved,
            PeerStatus::StaticOverride,
            PeerStatus::StaticOverride,
        ]
        .into_iter()
        .map(make_peer)
        .collect();

        let stats = aggregate(&peers, 200);
        assert_eq!(stats.total, 6);
        assert_eq!(
            stats.active + stats.inactive + stats.reserved + stats.static_override,
            stats.total
        );
        assert_eq!(stats.active, 2);
        assert_eq!(stats.inactive, 1);
        assert_eq!(stats.reserved, 1);
        assert_eq!(stats.static_override, 2);
        assert_eq!(stats.available, 194);
    }

    #[test]
    fn test_empty_list() {
        let stats = aggregate(&[], 200);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.available, 200);
    }

    /// Over-provisioned pool: available goes negative and stays negative.
    #[test]
    fn test_available_not_clamped() {
        let peers: Vec<Peer> = (0..205).map(|_| make_peer(PeerStatus::Active)).collect();
        let stats = aggregate(&peers, 200);
        assert_eq!(stats.total, 205);
        assert_eq!(stats.available, -5);
    }
}
