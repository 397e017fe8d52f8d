//! Trace and memory-image loading.
//!
//! This module reads the inputs of a run from disk. It performs:
//! 1. **Trace loading:** Text traces, or JSON traces for `.json` files.
//! 2. **Image loading:** A raw binary copied to the start of the backing store.
//! 3. **Image dumping:** Writing the backing store out after the final flush.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::trace::{self, AccessEvent};
use crate::common::error::SimError;
use crate::memory::BackingStore;

/// Reads a file from disk into a byte vector.
pub fn load_binary(path: &Path) -> Result<Vec<u8>, SimError> {
    fs::read(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads an access trace, choosing the format from the file extension.
pub fn load_trace(path: &Path) -> Result<Vec<AccessEvent>, SimError> {
    let text = fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let events = if is_json {
        trace::parse_json_trace(&text)?
    } else {
        trace::parse_trace(&text)?
    };
    debug!(path = %path.display(), events = events.len(), "trace loaded");
    Ok(events)
}

/// Builds a backing store of `size` bytes seeded with the image at `path`.
///
/// Images shorter than the store are zero-extended; longer ones are rejected.
pub fn load_memory_image(path: &Path, size: usize) -> Result<BackingStore, SimError> {
    let image = load_binary(path)?;
    let mut memory = BackingStore::new(size);
    memory.load_at(0, &image)?;
    debug!(path = %path.display(), bytes = image.len(), "memory image loaded");
    Ok(memory)
}

/// Writes the whole backing store to `path`.
pub fn dump_memory(path: &Path, memory: &BackingStore) -> Result<(), SimError> {
    fs::write(path, memory.as_slice()).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })
}
