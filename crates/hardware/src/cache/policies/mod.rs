//! Cache Replacement Policies.
//!
//! Implements the victim-selection algorithms a cache block can be
//! parameterized with.
//!
//! # Policies
//!
//! - `Lru`: True Least Recently Used, via per-way ages.
//! - `Plru`: Pseudo-LRU, via one not-recently-used bit per way (clock/NRU).
//!
//! The set of policies is closed, so blocks are generic over the policy type
//! and every call is statically dispatched.

use std::fmt;

use serde::Serialize;

/// True Least Recently Used replacement policy.
pub mod lru;

/// Pseudo-LRU (NRU bit) replacement policy.
pub mod plru;

pub use lru::LruPolicy;
pub use plru::PlruPolicy;

/// Identifies a replacement policy in statistics and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Policy {
    /// True LRU.
    #[serde(rename = "LRU")]
    Lru,
    /// Pseudo-LRU.
    #[serde(rename = "pLRU")]
    Plru,
}

impl Policy {
    /// Label used in the hit-rate report.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lru => "LRU",
            Self::Plru => "pLRU",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Trait for cache replacement policies.
///
/// One policy instance tracks the recency state of the ways of a single
/// block. `occupied` is the block's current fill count: ways at or beyond it
/// hold no line and are never chosen as victims.
pub trait ReplacementPolicy: fmt::Debug {
    /// Which policy this is.
    const KIND: Policy;

    /// Creates the state for a block with `ways` ways.
    fn new(ways: usize) -> Self;

    /// Marks `way` as just used.
    ///
    /// # Arguments
    ///
    /// * `way` - The way that was hit or filled.
    /// * `occupied` - Number of occupied ways, including `way`.
    fn update(&mut self, way: usize, occupied: usize);

    /// Selects the way to evict from a full block.
    ///
    /// # Arguments
    ///
    /// * `occupied` - Number of occupied ways (equal to the associativity
    ///   when called by the block).
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn get_victim(&self, occupied: usize) -> usize;
}
