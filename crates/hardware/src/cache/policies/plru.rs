//! Pseudo-LRU (PLRU) Replacement Policy.
//!
//! A single-chance Not Recently Used approximation of LRU: one "used" bit per
//! way. A touch sets the way's bit. When that leaves every way of a full block
//! marked, all bits are cleared and only the touched way is set again, so the
//! line just used is never the next victim. The victim is the first way whose
//! bit is clear.
//!
//! # Performance
//!
//! - **Time Complexity:** `update()` and `get_victim()` are O(W)
//! - **Space Complexity:** one bit per way (much less than LRU)
//! - **Hardware Cost:** Low - a priority encoder over the bits
//! - **Worst Case:** After a reset the victim order degenerates to way order

use super::{Policy, ReplacementPolicy};

/// PLRU Policy state for one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlruPolicy {
    used: Vec<bool>,
}

impl PlruPolicy {
    /// Used bits of all ways.
    pub fn bits(&self) -> &[bool] {
        &self.used
    }
}

impl ReplacementPolicy for PlruPolicy {
    const KIND: Policy = Policy::Plru;

    fn new(ways: usize) -> Self {
        Self {
            used: vec![false; ways],
        }
    }

    fn update(&mut self, way: usize, occupied: usize) {
        self.used[way] = true;
        if occupied == self.used.len() && self.used.iter().all(|&bit| bit) {
            self.used.fill(false);
            self.used[way] = true;
        }
    }

    /// Returns the first occupied way with a clear bit.
    ///
    /// The reset in `update` keeps at least one bit clear in a full block of
    /// two or more ways; way 0 is the fallback otherwise.
    fn get_victim(&self, occupied: usize) -> usize {
        self.used[..occupied]
            .iter()
            .position(|&bit| !bit)
            .unwrap_or(0)
    }
}
