// PeerLens - core/classify.rs
//
// Status classification: handshake-recency default plus static rule
// tables. Deterministic and total — absence of a parseable tunnel-number
// simply skips the override logic.

use crate::core::model::{ClassificationRules, PeerStatus};
use crate::util::constants;
use regex::Regex;
use std::sync::OnceLock;

/// Case-insensitive "MC" followed by digits, capturing the digits.
fn tunnel_number_pattern() -> &'static Regex {
    static MC: OnceLock<Regex> = OnceLock::new();
    MC.get_or_init(|| Regex::new(r"(?i)mc(\d+)").expect("tunnel_number_pattern: invalid regex"))
}

/// Classify one peer.
///
/// 1. Handshake default: a present, non-empty handshake string containing
///    none of the hour/day/week markers is Active; anything else is
///    Inactive. The markers are matched textually against the router's
///    relative-time display string — the duration is never parsed.
/// 2. A tunnel-number extracted from the name selects the overrides:
///    reserved-set membership forces Reserved, then static-override
///    membership forces StaticOverride. The static table is checked last
///    and therefore wins when a number is in both.
pub fn classify_status(
    last_handshake: Option<&str>,
    name: &str,
    rules: &ClassificationRules,
) -> PeerStatus {
    let mut status = match last_handshake {
        Some(hs) if !hs.is_empty() && !hs.contains(&constants::STALE_HANDSHAKE_MARKERS[..]) => {
            PeerStatus::Active
        }
        _ => PeerStatus::Inactive,
    };

    if let Some(number) = tunnel_number(name) {
        if rules.reserved_ids.contains(&number) {
            status = PeerStatus::Reserved;
        }
        if rules.static_overrides.contains_key(&number) {
            status = PeerStatus::StaticOverride;
        }
    }

    status
}

/// Extract the integer tunnel-number from a peer name ("MC7" -> 7).
///
/// Returns `None` when the pattern does not match or the digits overflow
/// `u32`; both cases keep the handshake-derived status.
pub fn tunnel_number(name: &str) -> Option<u32> {
    tunnel_number_pattern()
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    fn make_rules(reserved: &[u32], overrides: &[u32]) -> ClassificationRules {
        ClassificationRules {
            reserved_ids: reserved.iter().copied().collect::<HashSet<_>>(),
            static_overrides: overrides
                .iter()
                .map(|&id| (id, format!("192.168.{id}.0/24")))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn test_recent_handshake_is_active() {
        let rules = make_rules(&[], &[]);
        assert_eq!(
            classify_status(Some("15s"), "MC99", &rules),
            PeerStatus::Active
        );
        assert_eq!(
            classify_status(Some("5m30s"), "MC99", &rules),
            PeerStatus::Active
        );
    }

    #[test]
    fn test_stale_handshake_is_inactive() {
        let rules = make_rules(&[], &[]);
        assert_eq!(
            classify_status(Some("2d3h"), "MC99", &rules),
            PeerStatus::Inactive
        );
        assert_eq!(
            classify_status(Some("1h12m"), "MC99", &rules),
            PeerStatus::Inactive
        );
        assert_eq!(
            classify_status(Some("3w1d"), "MC99", &rules),
            PeerStatus::Inactive
        );
    }

    #[test]
    fn test_missing_or_empty_handshake_is_inactive() {
        let rules = make_rules(&[], &[]);
        assert_eq!(classify_status(None, "MC99", &rules), PeerStatus::Inactive);
        assert_eq!(
            classify_status(Some(""), "MC99", &rules),
            PeerStatus::Inactive
        );
    }

    #[test]
    fn test_reserved_overrides_handshake() {
        let rules = make_rules(&[7], &[]);
        // Stale handshake would be Inactive, reserved set wins.
        assert_eq!(
            classify_status(Some("2d3h"), "MC7", &rules),
            PeerStatus::Reserved
        );
        // Recent handshake would be Active, reserved set still wins.
        assert_eq!(
            classify_status(Some("10s"), "mc7", &rules),
            PeerStatus::Reserved
        );
    }

    #[test]
    fn test_static_override_wins_over_reserved() {
        let rules = make_rules(&[8], &[8]);
        assert_eq!(
            classify_status(Some("30s"), "MC8", &rules),
            PeerStatus::StaticOverride
        );
    }

    #[test]
    fn test_static_override_without_handshake() {
        let rules = make_rules(&[], &[8]);
        assert_eq!(classify_status(None, "MC8", &rules), PeerStatus::StaticOverride);
    }

    #[test]
    fn test_no_tunnel_number_keeps_default() {
        let rules = make_rules(&[7], &[8]);
        assert_eq!(
            classify_status(Some("30s"), "branch office", &rules),
            PeerStatus::Active
        );
        assert_eq!(
            classify_status(None, "branch office", &rules),
            PeerStatus::Inactive
        );
    }

    #[test]
    fn test_tunnel_number_extraction() {
        assert_eq!(tunnel_number("MC7"), Some(7));
        assert_eq!(tunnel_number("mc42-backup"), Some(42));
        assert_eq!(tunnel_number("site Mc123"), Some(123));
        assert_eq!(tunnel_number("router-9"), None);
        assert_eq!(tunnel_number(""), None);
        // Digits beyond u32 skip the override logic rather than failing.
        assert_eq!(tunnel_number("MC99999999999999999999"), None);
    }

    #[test]
    fn test_classifier_is_deterministic() {
        let rules = make_rules(&[7], &[8]);
        let first = classify_status(Some("2d3h"), "MC7", &rules);
        for _ in 0..10 {
            assert_eq!(classify_status(Some("2d3h"), "MC7", &rules), first);
        }
    }
}
