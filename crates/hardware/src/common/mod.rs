//! Common types and constants shared by the cache model.
//!
//! This module provides the building blocks every other component uses:
//! 1. **Addresses:** A strong physical-address type and the tag/index/offset layout.
//! 2. **Constants:** The default cache and memory geometry.
//! 3. **Access kinds:** Read/write classification and the legal access widths.
//! 4. **Errors:** Configuration, trace and simulation error types.

/// Physical address type and address decomposition.
pub mod addr;

/// Default geometry constants.
pub mod constants;

/// Memory access kinds and widths.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{AddressLayout, PhysAddr};
pub use constants::{ADDRESS_BITS, CACHE_LINE_BYTES, CACHE_SETS, CACHE_WAYS, MEMORY_SIZE};
pub use data::{AccessSize, AccessType};
pub use error::{ConfigError, InvalidAccessSize, SimError, TraceError};
