//! Memory Access Types.
//!
//! This module classifies the accesses the trace producer hands to the engine:
//! 1. **Direction:** Whether an access reads or writes memory.
//! 2. **Width:** How many consecutive bytes a single load or store covers.

use serde::{Deserialize, Serialize};

use super::error::InvalidAccessSize;

/// Direction of a memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Data load.
    Read,
    /// Data store.
    Write,
}

impl AccessType {
    /// Returns `true` for stores.
    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}

/// Width of a load or store.
///
/// A multi-byte access is not a single cache operation: the engine splits it
/// into one byte-granular lookup per byte, low address first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum AccessSize {
    /// One byte (`lb`/`sb`).
    Byte,
    /// Two bytes (`lh`/`sh`).
    Half,
    /// Four bytes (`lw`/`sw`).
    Word,
}

impl AccessSize {
    /// Number of bytes covered by the access.
    #[inline]
    pub const fn bytes(self) -> u32 {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
        }
    }

    /// Mask selecting the low `bytes()` bytes of a value.
    #[inline]
    pub const fn mask(self) -> u32 {
        match self {
            Self::Byte => 0xFF,
            Self::Half => 0xFFFF,
            Self::Word => 0xFFFF_FFFF,
        }
    }
}

impl TryFrom<u32> for AccessSize {
    type Error = InvalidAccessSize;

    fn try_from(bytes: u32) -> Result<Self, Self::Error> {
        match bytes {
            1 => Ok(Self::Byte),
            2 => Ok(Self::Half),
            4 => Ok(Self::Word),
            other => Err(InvalidAccessSize(other)),
        }
    }
}

impl From<AccessSize> for u32 {
    fn from(size: AccessSize) -> Self {
        size.bytes()
    }
}
