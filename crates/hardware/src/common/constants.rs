//! Default Cache Geometry.
//!
//! The modelled cache is 4 KiB, 4-way set-associative with 32-byte lines,
//! sitting in front of a 256 KiB flat memory addressed by 18-bit addresses:
//!
//! ```text
//!  17        10 9       5 4        0
//! +------------+---------+----------+
//! |  tag (8)   | index(5)| offset(5)|
//! +------------+---------+----------+
//! ```

/// Width of a physical address in bits.
pub const ADDRESS_BITS: u32 = 18;

/// Width of the tag field in bits.
pub const TAG_BITS: u32 = 8;

/// Width of the set-index field in bits.
pub const INDEX_BITS: u32 = 5;

/// Width of the byte-offset field in bits.
pub const OFFSET_BITS: u32 = 5;

/// Number of sets (blocks) per cache array.
pub const CACHE_SETS: usize = 1 << INDEX_BITS;

/// Number of ways (lines) per set.
pub const CACHE_WAYS: usize = 4;

/// Size of one cache line in bytes.
pub const CACHE_LINE_BYTES: usize = 1 << OFFSET_BITS;

/// Size of the backing memory in bytes.
pub const MEMORY_SIZE: usize = 1 << ADDRESS_BITS;

const _: () = assert!(TAG_BITS + INDEX_BITS + OFFSET_BITS == ADDRESS_BITS);
