//! Cache lines and blocks (sets).
//!
//! A block is a fixed number of ways sharing one set index. Lines are
//! allocated in way order until the block is full; after that every miss
//! evicts the way chosen by the block's replacement policy, writing it back
//! first if it is dirty.

use tracing::trace;

use super::policies::ReplacementPolicy;
use crate::common::{AddressLayout, PhysAddr};
use crate::memory::BackingStore;

/// One cached line: tag, dirty bit and a private copy of the line's bytes.
///
/// The line's address is not stored; it is rebuilt from the tag and the
/// index of the owning block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheLine {
    tag: u32,
    dirty: bool,
    data: Box<[u8]>,
}

impl CacheLine {
    fn empty(line_bytes: usize) -> Self {
        Self {
            tag: 0,
            dirty: false,
            data: vec![0; line_bytes].into_boxed_slice(),
        }
    }

    /// Tag of the memory line held here.
    pub const fn tag(&self) -> u32 {
        self.tag
    }

    /// Whether the line holds data not yet written back.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The cached bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// A set of `ways` lines with one replacement-policy state.
#[derive(Clone, Debug)]
pub struct CacheBlock<P> {
    index: usize,
    lines: Vec<CacheLine>,
    occupied: usize,
    policy: P,
}

impl<P: ReplacementPolicy> CacheBlock<P> {
    /// Creates an empty block for set `index`.
    pub fn new(index: usize, ways: usize, line_bytes: usize) -> Self {
        Self {
            index,
            lines: vec![CacheLine::empty(line_bytes); ways],
            occupied: 0,
            policy: P::new(ways),
        }
    }

    /// Set index of this block.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of ways.
    pub fn ways(&self) -> usize {
        self.lines.len()
    }

    /// Number of ways currently holding a line.
    pub const fn occupied(&self) -> usize {
        self.occupied
    }

    /// The occupied lines, in way order.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines[..self.occupied]
    }

    /// The replacement-policy state.
    pub const fn policy(&self) -> &P {
        &self.policy
    }

    /// Way holding `tag`, if any.
    pub fn lookup(&self, tag: u32) -> Option<usize> {
        self.lines().iter().position(|line| line.tag == tag)
    }

    /// Reads the byte at `addr`, filling its line on a miss.
    ///
    /// # Returns
    ///
    /// A tuple `(byte, hit)`.
    pub fn read(
        &mut self,
        layout: &AddressLayout,
        addr: PhysAddr,
        memory: &mut BackingStore,
    ) -> (u8, bool) {
        let (way, hit) = self.locate(layout, addr, memory);
        (self.lines[way].data[layout.offset(addr)], hit)
    }

    /// Writes `byte` at `addr`, filling its line on a miss (write-allocate).
    ///
    /// # Returns
    ///
    /// `true` on a hit.
    pub fn write(
        &mut self,
        layout: &AddressLayout,
        addr: PhysAddr,
        byte: u8,
        memory: &mut BackingStore,
    ) -> bool {
        let (way, hit) = self.locate(layout, addr, memory);
        let line = &mut self.lines[way];
        line.dirty = true;
        line.data[layout.offset(addr)] = byte;
        hit
    }

    /// Writes every dirty line back to memory and marks it clean.
    ///
    /// # Returns
    ///
    /// The number of lines written back.
    pub fn flush(&mut self, layout: &AddressLayout, memory: &mut BackingStore) -> usize {
        let mut written = 0;
        for line in &mut self.lines[..self.occupied] {
            if line.dirty {
                memory.write_line(layout.compose(line.tag, self.index), &line.data);
                line.dirty = false;
                written += 1;
            }
        }
        written
    }

    /// Finds or installs the line for `addr` and touches it.
    fn locate(
        &mut self,
        layout: &AddressLayout,
        addr: PhysAddr,
        memory: &mut BackingStore,
    ) -> (usize, bool) {
        let (way, hit) = match self.lookup(layout.tag(addr)) {
            Some(way) => (way, true),
            None => (self.install(layout, addr, memory), false),
        };
        self.policy.update(way, self.occupied);
        (way, hit)
    }

    /// Loads the line containing `addr` into a free or victim way.
    ///
    /// A dirty victim is written back to the address rebuilt from its tag and
    /// this block's index before being overwritten. The new line starts clean.
    fn install(
        &mut self,
        layout: &AddressLayout,
        addr: PhysAddr,
        memory: &mut BackingStore,
    ) -> usize {
        let way = if self.occupied < self.lines.len() {
            self.occupied += 1;
            self.occupied - 1
        } else {
            let victim = self.policy.get_victim(self.occupied);
            let line = &mut self.lines[victim];
            if line.dirty {
                let base = layout.compose(line.tag, self.index);
                trace!(
                    policy = %P::KIND,
                    set = self.index,
                    way = victim,
                    tag = line.tag,
                    %base,
                    "dirty write-back"
                );
                memory.write_line(base, &line.data);
            } else {
                trace!(policy = %P::KIND, set = self.index, way = victim, tag = line.tag, "evict");
            }
            victim
        };

        let line = &mut self.lines[way];
        memory.read_line(layout.line_base(addr), &mut line.data);
        line.tag = layout.tag(addr);
        line.dirty = false;
        way
    }
}
