//! Error definitions.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Configuration errors:** Unknown policy modes and impossible geometries,
//!    reported before any access is processed.
//! 2. **Trace errors:** Malformed access events, tagged with their source line.
//! 3. **Simulation errors:** Out-of-bounds accesses, empty traces and I/O
//!    failures that abort a run.
//!
//! A cache miss is never an error; it is ordinary control flow.

use std::path::PathBuf;

use thiserror::Error;

/// A rejected simulator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The policy mode is not one of `both`, `lru`, `plru` (or `0`, `1`, `2`).
    #[error("unknown replacement mode '{0}' (expected both, lru, plru or 0, 1, 2)")]
    UnknownMode(String),

    /// A geometry parameter is zero.
    #[error("{0} must be greater than zero")]
    ZeroGeometry(&'static str),

    /// A geometry parameter that must be a power of two is not.
    #[error("{field} must be a power of two, got {value}")]
    NotPowerOfTwo {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: usize,
    },

    /// The index and offset fields leave no room for a tag, or the address
    /// does not fit in 32 bits.
    #[error(
        "address width {address_bits} cannot hold {index_bits} index bits and {offset_bits} offset bits plus a tag (max 32 bits)"
    )]
    AddressWidth {
        /// Configured address width.
        address_bits: u32,
        /// Bits taken by the set index.
        index_bits: u32,
        /// Bits taken by the byte offset.
        offset_bits: u32,
    },

    /// The memory size does not fit the address space or the line size.
    #[error("memory size {size} {reason}")]
    MemorySize {
        /// Configured memory size in bytes.
        size: usize,
        /// Why the size was rejected.
        reason: &'static str,
    },

    /// The configuration document is not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("cannot read configuration '{}': {source}", path.display())]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// An access size outside `{1, 2, 4}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("access size must be 1, 2 or 4 bytes, got {0}")]
pub struct InvalidAccessSize(pub u32);

/// A malformed access trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The operation token is not a read or a write.
    #[error("line {line}: unknown operation '{token}'")]
    UnknownOperation {
        /// 1-based line number.
        line: usize,
        /// The rejected token.
        token: String,
    },

    /// A required field is absent.
    #[error("line {line}: missing {field}")]
    MissingField {
        /// 1-based line number.
        line: usize,
        /// Name of the missing field.
        field: &'static str,
    },

    /// A numeric field does not parse as decimal or `0x` hex.
    #[error("line {line}: invalid {field} '{token}'")]
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        /// Name of the field.
        field: &'static str,
        /// The rejected token.
        token: String,
    },

    /// The access width is not 1, 2 or 4.
    #[error("line {line}: {source}")]
    InvalidSize {
        /// 1-based line number.
        line: usize,
        /// The size error.
        #[source]
        source: InvalidAccessSize,
    },

    /// A read carries a value.
    #[error("line {line}: read accesses take no value")]
    UnexpectedValue {
        /// 1-based line number.
        line: usize,
    },

    /// Extra tokens follow a complete event.
    #[error("line {line}: unexpected trailing field '{token}'")]
    TrailingField {
        /// 1-based line number.
        line: usize,
        /// The first extra token.
        token: String,
    },

    /// A JSON trace does not match the event schema.
    #[error("invalid JSON trace: {0}")]
    Json(#[from] serde_json::Error),
}

/// A failure that aborts a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The trace could not be parsed.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// An access reaches past the end of the backing memory.
    #[error("access of {size} byte(s) at {address:#x} exceeds memory size {memory_size:#x}")]
    OutOfBounds {
        /// First byte of the access.
        address: u64,
        /// Width of the access in bytes.
        size: usize,
        /// Size of the backing memory.
        memory_size: usize,
    },

    /// A memory image does not match the configured memory size.
    #[error("memory image is {actual} bytes, configuration expects {expected}")]
    ImageSize {
        /// Configured memory size in bytes.
        expected: usize,
        /// Length of the supplied image.
        actual: usize,
    },

    /// A run was started with no accesses.
    #[error("trace contains no memory accesses")]
    EmptyTrace,

    /// A trace or memory image could not be read or written.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
