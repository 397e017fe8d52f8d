//! Backing memory.
//!
//! The flat, byte-addressable memory behind the cache. It is the ground truth
//! for every byte not currently held dirty in a cache line: lines are copied
//! out of it on a fill and copied back on a dirty eviction or final flush.

/// Owned byte buffer implementation.
pub mod buffer;

pub use buffer::BackingStore;
