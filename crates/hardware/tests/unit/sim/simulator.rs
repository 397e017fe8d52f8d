//! # Simulator Tests
//!
//! Single accesses through the engine: value assembly, hit accounting per
//! request, bounds checking and the final flush.

use crate::common::harness::{addr, config, init_tracing, memory, simulator};
use cachesim_core::Simulator;
use cachesim_core::common::{AccessSize, ConfigError, MEMORY_SIZE, SimError};
use cachesim_core::config::PolicyMode;
use cachesim_core::memory::BackingStore;
use cachesim_core::sim::{AccessEvent, AccessOutcome};
use rstest::rstest;

#[rstest]
#[case(AccessSize::Byte, 0)]
#[case(AccessSize::Byte, 0xA5)]
#[case(AccessSize::Byte, 0xFF)]
#[case(AccessSize::Half, 0xBEEF)]
#[case(AccessSize::Half, 0xFFFF)]
#[case(AccessSize::Word, 0)]
#[case(AccessSize::Word, 0xDEAD_BEEF)]
#[case(AccessSize::Word, u32::MAX)]
fn test_write_then_read_round_trip(
    #[case] size: AccessSize,
    #[case] value: u32,
    #[values(PolicyMode::Both, PolicyMode::Lru, PolicyMode::Plru)] mode: PolicyMode,
) {
    let mut sim = simulator(mode);
    sim.write(0x1234, size, value).unwrap();
    assert_eq!(sim.read(0x1234, size).unwrap(), value);
}

#[test]
fn test_values_are_little_endian() {
    let mut sim = simulator(PolicyMode::Both);
    sim.write(0x100, AccessSize::Word, 0x1122_3344).unwrap();

    assert_eq!(sim.read(0x100, AccessSize::Byte).unwrap(), 0x44);
    assert_eq!(sim.read(0x103, AccessSize::Byte).unwrap(), 0x11);
    assert_eq!(sim.read(0x102, AccessSize::Half).unwrap(), 0x1122);
}

#[test]
fn test_write_stores_only_low_bytes() {
    let mut sim = simulator(PolicyMode::Both);
    sim.write(0x200, AccessSize::Word, 0xFFFF_FFFF).unwrap();
    sim.write(0x200, AccessSize::Byte, 0x1_02).unwrap();
    assert_eq!(sim.read(0x200, AccessSize::Word).unwrap(), 0xFFFF_FF02);
}

#[test]
fn test_read_of_untouched_memory_is_zero() {
    let mut sim = simulator(PolicyMode::Both);
    assert_eq!(sim.read(0x3_0000, AccessSize::Word).unwrap(), 0);
}

#[test]
fn test_read_sees_initial_image() {
    let mut mem = memory();
    mem[0x80] = 0x78;
    mem[0x81] = 0x56;
    let mut sim = Simulator::with_memory(&config(PolicyMode::Both), mem).unwrap();
    assert_eq!(sim.read(0x80, AccessSize::Half).unwrap(), 0x5678);
}

#[test]
fn test_outcome_reports_each_policy() {
    let mut sim = simulator(PolicyMode::Both);
    let outcome = sim.handle(&AccessEvent::read(0x40, AccessSize::Byte)).unwrap();
    assert_eq!(
        outcome,
        AccessOutcome {
            value: Some(0),
            lru_hit: Some(false),
            plru_hit: Some(false),
        }
    );

    let outcome = sim
        .handle(&AccessEvent::write(0x41, AccessSize::Byte, 9))
        .unwrap();
    assert_eq!(outcome.value, None);
    assert_eq!(outcome.lru_hit, Some(true));
    assert_eq!(outcome.plru_hit, Some(true));
}

#[test]
fn test_single_mode_leaves_other_policy_out() {
    let mut sim = simulator(PolicyMode::Lru);
    assert!(sim.lru().is_some());
    assert!(sim.plru().is_none());

    let outcome = sim.handle(&AccessEvent::read(0, AccessSize::Byte)).unwrap();
    assert_eq!(outcome.plru_hit, None);
    let _ = sim.read(0, AccessSize::Byte).unwrap();

    assert_eq!(sim.stats().lru_hits, 1);
    assert_eq!(sim.stats().plru_hits, 0);
    assert_eq!(sim.report(), "LRU\thit rate: 50.0000%\n");
}

#[test]
fn test_plru_only_report() {
    let mut sim = simulator(PolicyMode::Plru);
    assert!(sim.lru().is_none());
    let _ = sim.read(0, AccessSize::Byte).unwrap();
    assert_eq!(sim.report(), "pLRU\thit rate: 0.0000%\n");
}

/// A word straddling two lines is one request, and a hit only if both lines are resident.
#[test]
fn test_line_spanning_access_counts_once() {
    let mut sim = simulator(PolicyMode::Both);

    let _ = sim.read(0x00, AccessSize::Byte).unwrap();
    let outcome = sim.handle(&AccessEvent::read(0x1D, AccessSize::Word)).unwrap();
    assert_eq!(outcome.lru_hit, Some(false));
    assert_eq!(outcome.plru_hit, Some(false));

    let outcome = sim.handle(&AccessEvent::read(0x1D, AccessSize::Word)).unwrap();
    assert_eq!(outcome.lru_hit, Some(true));

    let stats = sim.stats();
    assert_eq!(stats.requests, 3);
    assert_eq!(stats.lru_hits, 1);
    assert_eq!(stats.plru_hits, 1);
}

#[test]
fn test_spanning_write_round_trip() {
    let mut sim = simulator(PolicyMode::Both);
    sim.write(0x3E, AccessSize::Word, 0xCAFE_F00D).unwrap();
    assert_eq!(sim.read(0x3E, AccessSize::Half).unwrap(), 0xF00D);
    assert_eq!(sim.read(0x40, AccessSize::Half).unwrap(), 0xCAFE);
}

#[test]
fn test_out_of_bounds_access_rejected_without_side_effects() {
    let mut sim = simulator(PolicyMode::Both);
    let last = (MEMORY_SIZE - 2) as u32;

    let err = sim.read(last, AccessSize::Word).unwrap_err();
    assert!(matches!(
        err,
        SimError::OutOfBounds {
            size: 4,
            memory_size: MEMORY_SIZE,
            ..
        }
    ));
    assert_eq!(sim.stats().requests, 0);
    assert_eq!(sim.lru().unwrap().blocks().iter().map(|b| b.occupied()).sum::<usize>(), 0);

    assert!(sim.read(last, AccessSize::Half).is_ok());
    assert!(sim.read(last + 1, AccessSize::Byte).is_ok());
    assert!(sim.write(last + 2, AccessSize::Byte, 1).is_err());
    assert_eq!(sim.stats().requests, 2);
}

#[test]
fn test_address_beyond_address_space_rejected() {
    let mut sim = simulator(PolicyMode::Both);
    assert!(sim.read(u32::MAX, AccessSize::Byte).is_err());
    assert!(sim.read(u32::MAX - 1, AccessSize::Word).is_err());
}

#[test]
fn test_empty_trace_is_an_error() {
    let mut sim = simulator(PolicyMode::Both);
    let events: Vec<AccessEvent> = Vec::new();
    assert!(matches!(sim.run(&events), Err(SimError::EmptyTrace)));
}

#[test]
fn test_run_stops_at_first_failing_event() {
    let mut sim = simulator(PolicyMode::Both);
    let events = vec![
        AccessEvent::read(0, AccessSize::Byte),
        AccessEvent::read(MEMORY_SIZE as u32, AccessSize::Byte),
        AccessEvent::read(0, AccessSize::Byte),
    ];
    assert!(sim.run(&events).is_err());
    assert_eq!(sim.stats().requests, 1);
}

#[test]
fn test_run_returns_stats() {
    let mut sim = simulator(PolicyMode::Both);
    let events = vec![
        AccessEvent::write(addr(1, 2, 0), AccessSize::Word, 7),
        AccessEvent::read(addr(1, 2, 4), AccessSize::Word),
    ];
    let stats = sim.run(&events).unwrap();
    assert_eq!(stats.requests, 2);
    assert_eq!(stats.lru_hits, 1);
    assert_eq!(stats.plru_hits, 1);
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = config(PolicyMode::Both);
    config.cache.ways = 0;
    let err = Simulator::new(&config).unwrap_err();
    assert!(matches!(
        err,
        SimError::Config(ConfigError::ZeroGeometry("cache.ways"))
    ));
}

#[test]
fn test_memory_size_must_match_config() {
    let err = Simulator::with_memory(&config(PolicyMode::Both), BackingStore::new(1024)).unwrap_err();
    assert!(matches!(
        err,
        SimError::ImageSize {
            expected: MEMORY_SIZE,
            actual: 1024
        }
    ));
    assert_eq!(
        err.to_string(),
        "memory image is 1024 bytes, configuration expects 262144"
    );
}

#[test]
fn test_memory_not_updated_until_flush() {
    init_tracing();
    let mut sim = simulator(PolicyMode::Both);
    sim.write(addr(3, 0, 0), AccessSize::Word, 0x0102_0304).unwrap();
    sim.write(addr(4, 5, 8), AccessSize::Byte, 0xEE).unwrap();
    sim.write(addr(3, 0, 4), AccessSize::Byte, 0x55).unwrap();
    assert_eq!(sim.memory().as_slice()[addr(3, 0, 0) as usize], 0);

    // Two dirty lines in each of the two arrays.
    assert_eq!(sim.flush(), 4);
    let mem = sim.memory().as_slice();
    assert_eq!(&mem[addr(3, 0, 0) as usize..][..5], &[0x04, 0x03, 0x02, 0x01, 0x55]);
    assert_eq!(mem[addr(4, 5, 8) as usize], 0xEE);

    assert_eq!(sim.flush(), 0);
}

#[test]
fn test_flush_does_not_change_statistics() {
    let mut sim = simulator(PolicyMode::Both);
    sim.write(0, AccessSize::Byte, 1).unwrap();
    let before = sim.stats().clone();
    let _ = sim.flush();
    assert_eq!(sim.stats(), &before);
    assert_eq!(sim.stats().requests, 1);
}

#[test]
fn test_accessors_reflect_config() {
    let sim = simulator(PolicyMode::Plru);
    assert_eq!(sim.mode(), PolicyMode::Plru);
    assert_eq!(sim.layout().sets(), 32);
    assert_eq!(sim.memory().len(), MEMORY_SIZE);
    assert_eq!(sim.stats().requests, 0);
    assert_eq!(sim.report(), "pLRU\thit rate: 0.0000%\n");
}
