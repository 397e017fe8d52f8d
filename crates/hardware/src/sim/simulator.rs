//! Simulator: owns both policy arrays and the backing store side by side.
//!
//! Every access event is applied to each enabled array in turn, to
//! completion, before the next event is accepted. The arrays never share
//! lines; the only state they share is the backing store, which each one
//! reads on fills and writes on its own dirty evictions.

use tracing::debug;

use super::trace::{AccessEvent, AccessOp};
use crate::cache::policies::{Policy, ReplacementPolicy};
use crate::cache::{CacheArray, LruCache, PlruCache};
use crate::common::error::SimError;
use crate::common::{AccessSize, AddressLayout, PhysAddr};
use crate::config::{Config, PolicyMode};
use crate::memory::BackingStore;
use crate::stats::SimStats;

/// Result of one access event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessOutcome {
    /// Little-endian value assembled by a read; `None` for writes.
    pub value: Option<u32>,
    /// Whether every byte hit in the LRU array; `None` when LRU is disabled.
    pub lru_hit: Option<bool>,
    /// Whether every byte hit in the pseudo-LRU array; `None` when disabled.
    pub plru_hit: Option<bool>,
}

/// Top-level cache simulation engine.
#[derive(Debug)]
pub struct Simulator {
    mode: PolicyMode,
    layout: AddressLayout,
    memory: BackingStore,
    lru: Option<LruCache>,
    plru: Option<PlruCache>,
    stats: SimStats,
}

impl Simulator {
    /// Creates a simulator with zeroed memory.
    ///
    /// Fails if the configuration does not validate.
    pub fn new(config: &Config) -> Result<Self, SimError> {
        Self::with_memory(config, BackingStore::new(config.memory.size_bytes))
    }

    /// Creates a simulator over an existing memory image.
    ///
    /// The image must be exactly `config.memory.size_bytes` long.
    pub fn with_memory(config: &Config, memory: BackingStore) -> Result<Self, SimError> {
        let layout = config.validate()?;
        if memory.len() != config.memory.size_bytes {
            return Err(SimError::ImageSize {
                expected: config.memory.size_bytes,
                actual: memory.len(),
            });
        }

        let mode = config.mode;
        let ways = config.cache.ways;
        debug!(
            %mode,
            sets = layout.sets(),
            ways,
            line_bytes = layout.line_bytes(),
            memory = memory.len(),
            "simulator created"
        );

        Ok(Self {
            mode,
            layout,
            memory,
            lru: mode.lru_enabled().then(|| CacheArray::new(layout, ways)),
            plru: mode.plru_enabled().then(|| CacheArray::new(layout, ways)),
            stats: SimStats::default(),
        })
    }

    /// Policies being simulated.
    pub const fn mode(&self) -> PolicyMode {
        self.mode
    }

    /// Address layout in use.
    pub const fn layout(&self) -> &AddressLayout {
        &self.layout
    }

    /// The backing store. Reflects all writes only after [`flush`](Self::flush).
    pub const fn memory(&self) -> &BackingStore {
        &self.memory
    }

    /// The LRU array, if enabled.
    pub const fn lru(&self) -> Option<&LruCache> {
        self.lru.as_ref()
    }

    /// The pseudo-LRU array, if enabled.
    pub const fn plru(&self) -> Option<&PlruCache> {
        self.plru.as_ref()
    }

    /// Statistics gathered so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Applies one access event to every enabled array.
    ///
    /// The event counts as one request regardless of its width. Events that
    /// reach past the end of memory are rejected before any state changes.
    pub fn handle(&mut self, event: &AccessEvent) -> Result<AccessOutcome, SimError> {
        let bytes = event.size.bytes() as usize;
        if !self.memory.contains(u64::from(event.address), bytes) {
            return Err(SimError::OutOfBounds {
                address: u64::from(event.address),
                size: bytes,
                memory_size: self.memory.len(),
            });
        }

        self.stats.requests += 1;
        let lru = self
            .lru
            .as_mut()
            .map(|cache| apply(cache, &mut self.memory, event));
        let plru = self
            .plru
            .as_mut()
            .map(|cache| apply(cache, &mut self.memory, event));

        if lru.is_some_and(|(_, hit)| hit) {
            self.stats.record_hit(Policy::Lru);
        }
        if plru.is_some_and(|(_, hit)| hit) {
            self.stats.record_hit(Policy::Plru);
        }

        // Both arrays see identical writes, so either copy of a read is current.
        let value = lru.or(plru).and_then(|(read, _)| read);
        Ok(AccessOutcome {
            value,
            lru_hit: lru.map(|(_, hit)| hit),
            plru_hit: plru.map(|(_, hit)| hit),
        })
    }

    /// Loads `size` bytes at `address` and returns them as a little-endian value.
    pub fn read(&mut self, address: u32, size: AccessSize) -> Result<u32, SimError> {
        let outcome = self.handle(&AccessEvent::read(address, size))?;
        Ok(outcome.value.unwrap_or_default())
    }

    /// Stores the low `size` bytes of `value` at `address`, little-endian.
    pub fn write(&mut self, address: u32, size: AccessSize, value: u32) -> Result<(), SimError> {
        let _ = self.handle(&AccessEvent::write(address, size, value))?;
        Ok(())
    }

    /// Processes a whole trace in order.
    ///
    /// Does not flush; call [`flush`](Self::flush) once the trace is done.
    pub fn run<'a, I>(&mut self, events: I) -> Result<&SimStats, SimError>
    where
        I: IntoIterator<Item = &'a AccessEvent>,
    {
        let mut processed = 0usize;
        for event in events {
            let _ = self.handle(event)?;
            processed += 1;
        }
        if processed == 0 {
            return Err(SimError::EmptyTrace);
        }
        debug!(events = processed, "trace complete");
        Ok(&self.stats)
    }

    /// Writes every dirty line of every enabled array back to memory.
    ///
    /// Lines are left resident and clean, so a second flush writes nothing.
    /// Hit statistics are unaffected.
    ///
    /// # Returns
    ///
    /// The number of lines written back.
    pub fn flush(&mut self) -> usize {
        let lru = self.lru.as_mut().map_or(0, |cache| cache.flush(&mut self.memory));
        let plru = self
            .plru
            .as_mut()
            .map_or(0, |cache| cache.flush(&mut self.memory));
        debug!(lru, plru, "flushed dirty lines");
        lru + plru
    }

    /// Renders the hit-rate report for the configured mode.
    pub fn report(&self) -> String {
        self.stats.report(self.mode)
    }
}

/// Splits `event` into byte accesses against one array, low address first.
///
/// # Returns
///
/// The assembled value for reads, and whether every byte hit.
fn apply<P: ReplacementPolicy>(
    cache: &mut CacheArray<P>,
    memory: &mut BackingStore,
    event: &AccessEvent,
) -> (Option<u32>, bool) {
    let base = PhysAddr::new(event.address);
    let mut all_hit = true;
    let mut value = 0u32;

    for i in 0..event.size.bytes() {
        let addr = base.offset_by(i);
        let shift = 8 * i;
        let hit = match event.op {
            AccessOp::Read => {
                let (byte, hit) = cache.read(addr, memory);
                value |= u32::from(byte) << shift;
                hit
            }
            AccessOp::Write(data) => cache.write(addr, (data >> shift) as u8, memory),
        };
        all_hit &= hit;
    }

    match event.op {
        AccessOp::Read => (Some(value), all_hit),
        AccessOp::Write(_) => (None, all_hit),
    }
}
