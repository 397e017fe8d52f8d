//! # Error Display Tests
//!
//! Error messages are what the CLI prints, so they must name the problem.

use cachesim_core::common::{ConfigError, InvalidAccessSize, SimError, TraceError};

#[test]
fn unknown_mode_names_value() {
    let err = ConfigError::UnknownMode("fifo".into());
    assert!(err.to_string().contains("'fifo'"));
}

#[test]
fn not_power_of_two_names_field() {
    let err = ConfigError::NotPowerOfTwo {
        field: "cache.sets",
        value: 24,
    };
    assert_eq!(err.to_string(), "cache.sets must be a power of two, got 24");
}

#[test]
fn trace_errors_carry_line_numbers() {
    let err = TraceError::UnknownOperation {
        line: 7,
        token: "X".into(),
    };
    assert_eq!(err.to_string(), "line 7: unknown operation 'X'");

    let err = TraceError::InvalidSize {
        line: 2,
        source: InvalidAccessSize(3),
    };
    assert_eq!(err.to_string(), "line 2: access size must be 1, 2 or 4 bytes, got 3");
}

#[test]
fn out_of_bounds_reports_hex_addresses() {
    let err = SimError::OutOfBounds {
        address: 0x3_FFFE,
        size: 4,
        memory_size: 0x4_0000,
    };
    assert_eq!(
        err.to_string(),
        "access of 4 byte(s) at 0x3fffe exceeds memory size 0x40000"
    );
}

#[test]
fn config_errors_convert_transparently() {
    let err: SimError = ConfigError::ZeroGeometry("cache.ways").into();
    assert!(matches!(err, SimError::Config(ConfigError::ZeroGeometry(_))));
    assert_eq!(err.to_string(), "cache.ways must be greater than zero");
}

#[test]
fn empty_trace_message() {
    assert_eq!(
        SimError::EmptyTrace.to_string(),
        "trace contains no memory accesses"
    );
}
