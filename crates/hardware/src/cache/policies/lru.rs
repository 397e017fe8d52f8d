//! Least Recently Used (LRU) Replacement Policy.
//!
//! Each way carries an age: the number of accesses to the block since that
//! way was last touched. A touch ages every other occupied way by one and
//! resets the touched way to zero, so ages are relative ranks rather than
//! timestamps. The victim is the oldest way.
//!
//! # Performance
//!
//! - **Time Complexity:** `update()` and `get_victim()` are O(W)
//! - **Space Complexity:** one counter per way
//! - **Hardware Cost:** High - requires a comparator tree over all ages

use super::{Policy, ReplacementPolicy};

/// LRU Policy state for one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LruPolicy {
    ages: Vec<u64>,
}

impl LruPolicy {
    /// Ages of all ways, occupied or not.
    pub fn ages(&self) -> &[u64] {
        &self.ages
    }
}

impl ReplacementPolicy for LruPolicy {
    const KIND: Policy = Policy::Lru;

    fn new(ways: usize) -> Self {
        Self {
            ages: vec![0; ways],
        }
    }

    fn update(&mut self, way: usize, occupied: usize) {
        for age in &mut self.ages[..occupied] {
            *age += 1;
        }
        self.ages[way] = 0;
    }

    /// Returns the way with the greatest age.
    ///
    /// Ties go to the lowest way index; with every age zero this is way 0.
    fn get_victim(&self, occupied: usize) -> usize {
        let mut victim = 0;
        let mut oldest = 0;
        for (way, &age) in self.ages[..occupied].iter().enumerate() {
            if age > oldest {
                oldest = age;
                victim = way;
            }
        }
        victim
    }
}
