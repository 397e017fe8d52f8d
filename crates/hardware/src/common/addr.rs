//! Physical addresses and their cache decomposition.
//!
//! This module defines the address type handed to the cache and the layout
//! that splits it into fields. It provides the following:
//! 1. **Type Safety:** `PhysAddr` keeps raw integers and addresses apart.
//! 2. **Decomposition:** `AddressLayout` extracts tag, set index and byte offset.
//! 3. **Reconstruction:** `AddressLayout::compose` rebuilds a line address from
//!    `(tag, index)`, which is how dirty lines find their way back to memory.

use super::constants::{INDEX_BITS, OFFSET_BITS, TAG_BITS};

/// A physical byte address in the modelled memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u32);

impl PhysAddr {
    /// Creates a new physical address from a raw value.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw address value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Returns the address `bytes` past this one.
    #[inline(always)]
    pub const fn offset_by(self, bytes: u32) -> Self {
        Self(self.0.wrapping_add(bytes))
    }

    /// Returns the address as a memory index.
    #[inline(always)]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for PhysAddr {
    fn from(addr: u32) -> Self {
        Self(addr)
    }
}

impl std::fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#07x}", self.0)
    }
}

/// Split of an address into tag, set index and byte offset, high to low.
///
/// The three widths always sum to the full address width; a layout is only
/// built from a validated [`Config`](crate::config::Config) or from the
/// default constants, so `compose(tag(a), index(a))` equals `line_base(a)`
/// for every address `a`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressLayout {
    tag_bits: u32,
    index_bits: u32,
    offset_bits: u32,
}

impl AddressLayout {
    /// Builds a layout from field widths.
    ///
    /// Callers must keep `tag_bits + index_bits + offset_bits <= 32`;
    /// [`Config::validate`](crate::config::Config::validate) enforces this.
    pub const fn new(tag_bits: u32, index_bits: u32, offset_bits: u32) -> Self {
        Self {
            tag_bits,
            index_bits,
            offset_bits,
        }
    }

    /// Width of the tag field.
    pub const fn tag_bits(&self) -> u32 {
        self.tag_bits
    }

    /// Width of the index field.
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Width of the offset field.
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Total address width.
    pub const fn address_bits(&self) -> u32 {
        self.tag_bits + self.index_bits + self.offset_bits
    }

    /// Number of sets addressable by the index field.
    pub const fn sets(&self) -> usize {
        1 << self.index_bits
    }

    /// Number of bytes in one line.
    pub const fn line_bytes(&self) -> usize {
        1 << self.offset_bits
    }

    /// Byte offset within the line: `address mod line_bytes`.
    #[inline]
    pub const fn offset(&self, addr: PhysAddr) -> usize {
        (addr.0 & low_mask(self.offset_bits)) as usize
    }

    /// Set index: `(address >> offset_bits) mod sets`.
    #[inline]
    pub const fn index(&self, addr: PhysAddr) -> usize {
        ((addr.0 >> self.offset_bits) & low_mask(self.index_bits)) as usize
    }

    /// Tag: `address >> (index_bits + offset_bits)`.
    #[inline]
    pub const fn tag(&self, addr: PhysAddr) -> u32 {
        addr.0 >> (self.index_bits + self.offset_bits)
    }

    /// The address with its offset bits cleared.
    #[inline]
    pub const fn line_base(&self, addr: PhysAddr) -> PhysAddr {
        PhysAddr(addr.0 & !low_mask(self.offset_bits))
    }

    /// Rebuilds the base address of the line holding `tag` in set `index`.
    #[inline]
    pub const fn compose(&self, tag: u32, index: usize) -> PhysAddr {
        PhysAddr(((tag << self.index_bits) | index as u32) << self.offset_bits)
    }
}

impl Default for AddressLayout {
    fn default() -> Self {
        Self::new(TAG_BITS, INDEX_BITS, OFFSET_BITS)
    }
}

#[inline]
const fn low_mask(bits: u32) -> u32 {
    if bits >= u32::BITS {
        u32::MAX
    } else {
        (1 << bits) - 1
    }
}
