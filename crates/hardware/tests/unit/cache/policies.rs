//! # Replacement Policy Tests
//!
//! Exercises the LRU age counters and the pseudo-LRU used bits directly,
//! without a cache around them.

use cachesim_core::cache::policies::{LruPolicy, PlruPolicy, Policy, ReplacementPolicy};

/// Touches ways in order as a filling block would: way `w` is touched with
/// `w + 1` ways occupied.
fn fill<P: ReplacementPolicy>(ways: usize) -> P {
    let mut policy = P::new(ways);
    for way in 0..ways {
        policy.update(way, way + 1);
    }
    policy
}

#[test]
fn test_policy_labels() {
    assert_eq!(Policy::Lru.label(), "LRU");
    assert_eq!(Policy::Plru.label(), "pLRU");
    assert_eq!(Policy::Plru.to_string(), "pLRU");
    assert_eq!(LruPolicy::KIND, Policy::Lru);
    assert_eq!(PlruPolicy::KIND, Policy::Plru);
}

#[test]
fn test_policy_serializes_as_label() {
    assert_eq!(serde_json::to_string(&Policy::Lru).unwrap(), "\"LRU\"");
    assert_eq!(serde_json::to_string(&Policy::Plru).unwrap(), "\"pLRU\"");
}

mod lru {
    use super::*;

    #[test]
    fn test_fill_orders_ages() {
        let lru: LruPolicy = fill(4);
        assert_eq!(lru.ages(), &[3, 2, 1, 0]);
        assert_eq!(lru.get_victim(4), 0);
    }

    #[test]
    fn test_touch_moves_victim() {
        let mut lru: LruPolicy = fill(4);
        lru.update(0, 4);
        assert_eq!(lru.ages(), &[0, 3, 2, 1]);
        assert_eq!(lru.get_victim(4), 1);

        lru.update(1, 4);
        assert_eq!(lru.get_victim(4), 2);
    }

    #[test]
    fn test_victim_is_least_recent_after_mixed_touches() {
        let mut lru: LruPolicy = fill(4);
        for way in [2, 0, 3, 1, 0, 2] {
            lru.update(way, 4);
        }
        // Most to least recent: 2, 0, 1, 3.
        assert_eq!(lru.get_victim(4), 3);
    }

    #[test]
    fn test_unoccupied_ways_do_not_age() {
        let mut lru = LruPolicy::new(4);
        lru.update(0, 1);
        lru.update(1, 2);
        lru.update(0, 2);
        assert_eq!(lru.ages(), &[0, 1, 0, 0]);
        assert_eq!(lru.get_victim(2), 1);
    }

    #[test]
    fn test_fresh_state_victim_is_way_zero() {
        let lru = LruPolicy::new(4);
        assert_eq!(lru.get_victim(4), 0);
    }

    #[test]
    fn test_direct_mapped() {
        let mut lru = LruPolicy::new(1);
        lru.update(0, 1);
        lru.update(0, 1);
        assert_eq!(lru.get_victim(1), 0);
    }
}

mod plru {
    use super::*;

    #[test]
    fn test_fill_resets_on_last_way() {
        let plru: PlruPolicy = fill(4);
        assert_eq!(plru.bits(), &[false, false, false, true]);
        assert_eq!(plru.get_victim(4), 0);
    }

    #[test]
    fn test_partial_fill_never_resets() {
        let plru: PlruPolicy = {
            let mut p = PlruPolicy::new(4);
            p.update(0, 1);
            p.update(1, 2);
            p.update(2, 3);
            p
        };
        assert_eq!(plru.bits(), &[true, true, true, false]);
    }

    #[test]
    fn test_touch_sequence() {
        let mut plru: PlruPolicy = fill(4);

        plru.update(0, 4);
        assert_eq!(plru.get_victim(4), 1);

        plru.update(1, 4);
        assert_eq!(plru.get_victim(4), 2);

        // Setting the last clear bit resets everything except the toucher.
        plru.update(2, 4);
        assert_eq!(plru.bits(), &[false, false, true, false]);
        assert_eq!(plru.get_victim(4), 0);
    }

    #[test]
    fn test_repeat_touch_is_stable() {
        let mut plru: PlruPolicy = fill(4);
        plru.update(3, 4);
        plru.update(3, 4);
        assert_eq!(plru.bits(), &[false, false, false, true]);
    }

    #[test]
    fn test_just_used_way_is_never_victim() {
        let mut plru: PlruPolicy = fill(4);
        for way in [1, 3, 0, 2, 2, 1, 0, 3, 1] {
            plru.update(way, 4);
            assert_ne!(plru.get_victim(4), way);
        }
    }

    #[test]
    fn test_two_ways() {
        let mut plru: PlruPolicy = fill(2);
        assert_eq!(plru.bits(), &[false, true]);
        assert_eq!(plru.get_victim(2), 0);

        plru.update(0, 2);
        assert_eq!(plru.bits(), &[true, false]);
        assert_eq!(plru.get_victim(2), 1);
    }

    #[test]
    fn test_direct_mapped_falls_back_to_way_zero() {
        let plru: PlruPolicy = fill(1);
        assert_eq!(plru.bits(), &[true]);
        assert_eq!(plru.get_victim(1), 0);
    }
}
