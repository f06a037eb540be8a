// PeerLens - app/state.rs
//
// View state management. Holds the current peer list, filter state,
// and pool statistics; recomputed wholesale on each refresh.
//
// No internal concurrency: refresh takes &mut self, so overlapping
// refreshes cannot be expressed — callers serialise by construction.

use crate::app::source::PeerSource;
use crate::core::filter::{self, FilterState};
use crate::core::model::{ClassificationRules, Peer, PoolStats};
use crate::core::{normalise, stats};
use crate::util::error::Result;
use chrono::{DateTime, Utc};

/// Top-level view state: one materialised peer list plus the derived
/// filtered view and aggregate statistics.
#[derive(Debug)]
pub struct ViewState {
    /// Classification tables applied on refresh.
    rules: ClassificationRules,

    /// Infrastructure-reserved address substrings applied on refresh.
    infrastructure_prefixes: Vec<String>,

    /// Fixed address-pool capacity for the availability figure.
    pool_capacity: usize,

    /// All peers from the most recent successful refresh.
    pub peers: Vec<Peer>,

    /// Indices of peers matching the current filter (into `peers`).
    pub filtered_indices: Vec<usize>,

    /// Current filter configuration.
    pub filter_state: FilterState,

    /// Aggregate statistics from the most recent successful refresh.
    pub stats: PoolStats,

    /// When the most recent successful refresh completed.
    pub last_refresh: Option<DateTime<Utc>>,

    /// Status message for display.
    pub status_message: String,
}

impl ViewState {
    /// Create initial state with injected classification configuration.
    pub fn new(
        rules: ClassificationRules,
        infrastructure_prefixes: Vec<String>,
        pool_capacity: usize,
    ) -> Self {
        Self {
            rules,
            infrastructure_prefixes,
            pool_capacity,
            peers: Vec::new(),
            filtered_indices: Vec::new(),
            filter_state: FilterState::default(),
            stats: PoolStats::default(),
            last_refresh: None,
            status_message: "Ready. Refresh to load peers.".to_string(),
        }
    }

    /// Run one refresh cycle against the given source.
    ///
    /// On success the previous list is replaced wholesale — never merged —
    /// and statistics and the filtered view are recomputed. On failure the
    /// previous list is retained untouched and the error is both recorded
    /// in the status message and returned.
    pub fn refresh(&mut self, source: &dyn PeerSource) -> Result<()> {
        let raw_records = match source.fetch_peers() {
            Ok(records) => records,
            Err(e) => {
                self.status_message = format!("Refresh failed: {e}");
                tracing::error!(origin = %source.origin(), error = %e, "Refresh failed");
                return Err(e.into());
            }
        };

        self.peers = raw_records
            .iter()
            .map(|raw| normalise::normalise_record(raw, &self.infrastructure_prefixes, &self.rules))
            .collect();

        self.stats = stats::aggregate(&self.peers, self.pool_capacity);
        self.last_refresh = Some(Utc::now());
        self.apply_filters();

        self.status_message = format!(
            "{} peers loaded from {} ({} available)",
            self.stats.total,
            source.origin(),
            self.stats.available
        );
        tracing::info!(
            total = self.stats.total,
            active = self.stats.active,
            inactive = self.stats.inactive,
            reserved = self.stats.reserved,
            static_override = self.stats.static_override,
            available = self.stats.available,
            "Refresh complete"
        );

        Ok(())
    }

    /// Recompute filtered indices from current peers and filter state.
    pub fn apply_filters(&mut self) {
        self.filtered_indices = filter::apply_filters(&self.peers, &self.filter_state);
    }

    /// Iterate over the peers in the current filtered view, in order.
    pub fn filtered_peers(&self) -> impl Iterator<Item = &Peer> {
        self.filtered_indices
            .iter()
            .filter_map(|&idx| self.peers.get(idx))
    }

    /// Owned copy of the current filtered view, for export.
    pub fn filtered_snapshot(&self) -> Vec<Peer> {
        self.filtered_peers().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::StatusFilter;
    use crate::core::model::{PeerStatus, RawPeerRecord};
    use crate::util::error::SourceError;

    /// In-memory source for exercising the refresh path without a router.
    struct FixtureSource {
        records: Vec<RawPeerRecord>,
        fail: bool,
    }

    impl PeerSource for FixtureSource {
        fn fetch_peers(&self) -> std::result::Result<Vec<RawPeerRecord>, SourceError> {
            if self.fail {
                Err(SourceError::Status {
                    url: "fixture".to_string(),
                    status: 503,
                })
            } else {
                Ok(self.records.clone())
            }
        }

        fn origin(&self) -> String {
            "fixture".to_string()
        }
    }

    fn make_record(id: &str, name: &str, handshake: Option<&str>) -> RawPeerRecord {
        RawPeerRecord {
            id: id.to_string(),
            allowed_address: Some(format!("10.0.0.{}/32,192.168.1.0/24", id.len())),
            name: Some(name.to_string()),
            comment: None,
            last_handshake: handshake.map(str::to_string),
            endpoint_address: None,
        }
    }

    fn make_state() -> ViewState {
        ViewState::new(
            ClassificationRules::default(),
            crate::util::constants::DEFAULT_INFRASTRUCTURE_PREFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            200,
        )
    }

    #[test]
    fn test_refresh_populates_state() {
        let source = FixtureSource {
            records: vec![
                make_record("*1", "MC7", Some("2d3h")),
                make_record("*2", "MC99", Some("15s")),
                make_record("*3", "office", None),
            ],
            fail: false,
        };

        let mut state = make_state();
        state.refresh(&source).unwrap();

        assert_eq!(state.peers.len(), 3);
        assert_eq!(state.stats.total, 3);
        assert_eq!(state.stats.reserved, 1); // MC7
        assert_eq!(state.stats.active, 1); // MC99
        assert_eq!(state.stats.inactive, 1); // office, never handshaken
        assert_eq!(state.stats.available, 197);
        assert_eq!(state.filtered_indices.len(), 3);
        assert!(state.last_refresh.is_some());
    }

    #[test]
    fn test_refresh_replaces_previous_list() {
        let mut state = make_state();

        let first = FixtureSource {
            records: vec![make_record("*1", "MC7", None)],
            fail: false,
        };
        state.refresh(&first).unwrap();
        assert_eq!(state.peers.len(), 1);

        let second = FixtureSource {
            records: vec![
                make_record("*2", "MC8", None),
                make_record("*3", "MC9", None),
            ],
            fail: false,
        };
        state.refresh(&second).unwrap();

        // Replaced, not merged.
        assert_eq!(state.peers.len(), 2);
        assert!(state.peers.iter().all(|p| p.name != "MC7"));
    }

    #[test]
    fn test_failed_refresh_retains_previous_list() {
        let mut state = make_state();

        let good = FixtureSource {
            records: vec![make_record("*1", "MC7", None)],
            fail: false,
        };
        state.refresh(&good).unwrap();

        let bad = FixtureSource {
            records: Vec::new(),
            fail: true,
        };
        assert!(state.refresh(&bad).is_err());

        assert_eq!(state.peers.len(), 1, "previous list must survive a failure");
        assert!(state.status_message.contains("Refresh failed"));
    }

    #[test]
    fn test_filter_recomputed_on_demand() {
        let source = FixtureSource {
            records: vec![
                make_record("*1", "MC7", Some("2d3h")),
                make_record("*2", "MC99", Some("15s")),
            ],
            fail: false,
        };

        let mut state = make_state();
        state.refresh(&source).unwrap();

        state.filter_state.status = StatusFilter::Only(PeerStatus::Active);
        state.apply_filters();
        assert_eq!(state.filtered_indices, vec![1]);

        let snapshot = state.filtered_snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "MC99");
    }
}
