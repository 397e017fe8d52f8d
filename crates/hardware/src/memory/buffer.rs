//! Backing Store Buffer.
//!
//! An explicitly owned memory image. Each simulator owns its own store, so
//! independent runs never observe each other's writes.

use std::ops::{Index, IndexMut};

use crate::common::PhysAddr;
use crate::common::error::SimError;

/// A fixed-size, zero-initialised byte buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct BackingStore {
    bytes: Vec<u8>,
}

impl BackingStore {
    /// Creates a zero-filled store of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    /// Returns the size of the store in bytes.
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` for a zero-sized store.
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns `true` if `[addr, addr + len)` lies inside the store.
    pub fn contains(&self, addr: u64, len: usize) -> bool {
        addr.checked_add(len as u64)
            .is_some_and(|end| end <= self.bytes.len() as u64)
    }

    /// Reads a single byte.
    pub fn read_u8(&self, addr: PhysAddr) -> u8 {
        assert!(addr.as_usize() < self.len(), "memory read out of bounds");
        self.bytes[addr.as_usize()]
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, addr: PhysAddr, val: u8) {
        assert!(addr.as_usize() < self.len(), "memory write out of bounds");
        self.bytes[addr.as_usize()] = val;
    }

    /// Copies `dst.len()` bytes starting at `base` into `dst` (a line fill).
    pub fn read_line(&self, base: PhysAddr, dst: &mut [u8]) {
        let start = base.as_usize();
        assert!(start + dst.len() <= self.len(), "line fill out of bounds");
        dst.copy_from_slice(&self.bytes[start..start + dst.len()]);
    }

    /// Copies `src` into the store starting at `base` (a write-back).
    pub fn write_line(&mut self, base: PhysAddr, src: &[u8]) {
        let start = base.as_usize();
        assert!(start + src.len() <= self.len(), "write-back out of bounds");
        self.bytes[start..start + src.len()].copy_from_slice(src);
    }

    /// Copies an image into the store at `offset`.
    ///
    /// Used to seed memory before a run. Fails without writing anything if
    /// the image does not fit.
    pub fn load_at(&mut self, offset: usize, data: &[u8]) -> Result<(), SimError> {
        if !self.contains(offset as u64, data.len()) {
            return Err(SimError::OutOfBounds {
                address: offset as u64,
                size: data.len(),
                memory_size: self.len(),
            });
        }
        self.bytes[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Returns the whole memory image.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for BackingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackingStore")
            .field("size", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

impl Index<usize> for BackingStore {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bytes[index]
    }
}

impl IndexMut<usize> for BackingStore {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.bytes[index]
    }
}
