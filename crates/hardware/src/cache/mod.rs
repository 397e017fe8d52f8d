//! Set-Associative Cache Model.
//!
//! This module implements a write-back, write-allocate, set-associative cache
//! that holds real data. It models the following:
//! 1. **Lookup:** Tag comparison across the ways of the set selected by the index.
//! 2. **Fill:** On a miss the whole line is copied in from the backing store.
//! 3. **Eviction:** A full set evicts the victim chosen by its replacement policy,
//!    writing it back first when dirty.
//! 4. **Flush:** Draining all dirty lines back to memory at the end of a run.
//!
//! Each policy gets its own [`CacheArray`]; arrays never share lines.

/// Cache blocks (sets) and lines.
pub mod block;

/// Cache replacement policy implementations (LRU, PLRU).
pub mod policies;

pub use self::block::{CacheBlock, CacheLine};
use self::policies::{LruPolicy, Policy, PlruPolicy, ReplacementPolicy};
use crate::common::{AddressLayout, PhysAddr};
use crate::memory::BackingStore;

/// A cache array using true LRU replacement.
pub type LruCache = CacheArray<LruPolicy>;

/// A cache array using pseudo-LRU replacement.
pub type PlruCache = CacheArray<PlruPolicy>;

/// One block per set index, all sharing an address layout and policy type.
#[derive(Clone, Debug)]
pub struct CacheArray<P> {
    layout: AddressLayout,
    blocks: Vec<CacheBlock<P>>,
}

impl<P: ReplacementPolicy> CacheArray<P> {
    /// Creates an empty array with `layout.sets()` blocks of `ways` ways.
    pub fn new(layout: AddressLayout, ways: usize) -> Self {
        let blocks = (0..layout.sets())
            .map(|index| CacheBlock::new(index, ways, layout.line_bytes()))
            .collect();
        Self { layout, blocks }
    }

    /// Replacement policy of this array.
    pub const fn policy(&self) -> Policy {
        P::KIND
    }

    /// Address layout used for decomposition.
    pub const fn layout(&self) -> &AddressLayout {
        &self.layout
    }

    /// All blocks, indexed by set.
    pub fn blocks(&self) -> &[CacheBlock<P>] {
        &self.blocks
    }

    /// The block `addr` maps to.
    pub fn block_for(&self, addr: PhysAddr) -> &CacheBlock<P> {
        &self.blocks[self.layout.index(addr)]
    }

    /// Checks whether the line containing `addr` is resident, without touching it.
    pub fn contains(&self, addr: PhysAddr) -> bool {
        self.block_for(addr).lookup(self.layout.tag(addr)).is_some()
    }

    /// Reads one byte.
    ///
    /// # Returns
    ///
    /// A tuple `(byte, hit)`.
    pub fn read(&mut self, addr: PhysAddr, memory: &mut BackingStore) -> (u8, bool) {
        let index = self.layout.index(addr);
        self.blocks[index].read(&self.layout, addr, memory)
    }

    /// Writes one byte.
    ///
    /// # Returns
    ///
    /// `true` on a hit.
    pub fn write(&mut self, addr: PhysAddr, byte: u8, memory: &mut BackingStore) -> bool {
        let index = self.layout.index(addr);
        self.blocks[index].write(&self.layout, addr, byte, memory)
    }

    /// Writes back every dirty line.
    ///
    /// # Returns
    ///
    /// The number of lines written back.
    pub fn flush(&mut self, memory: &mut BackingStore) -> usize {
        let layout = self.layout;
        self.blocks
            .iter_mut()
            .map(|block| block.flush(&layout, memory))
            .sum()
    }

    /// Number of dirty lines currently held.
    pub fn dirty_lines(&self) -> usize {
        self.blocks
            .iter()
            .flat_map(|block| block.lines())
            .filter(|line| line.is_dirty())
            .count()
    }
}
