//! Set-associative cache simulator library.
//!
//! This crate models a single-level, 4-way set-associative, write-back cache
//! between a stream of memory accesses and a flat backing memory, running
//! true LRU and pseudo-LRU replacement side by side over the same accesses:
//! 1. **Cache:** Lines, blocks (sets), arrays and the two replacement policies.
//! 2. **Memory:** The backing store that fills lines and receives write-backs.
//! 3. **Simulation:** The engine, access traces and input loading.
//! 4. **Configuration and statistics:** Geometry, policy mode and hit-rate reports.
//!
//! ```
//! use cachesim_core::common::AccessSize;
//! use cachesim_core::{Config, Simulator};
//!
//! let mut sim = Simulator::new(&Config::default()).unwrap();
//! sim.write(0x40, AccessSize::Word, 0xdead_beef).unwrap();
//! assert_eq!(sim.read(0x40, AccessSize::Word).unwrap(), 0xdead_beef);
//! assert_eq!(sim.report(), "LRU\thit rate: 50.0000%\npLRU\thit rate: 50.0000%\n");
//! ```

/// Set-associative cache arrays, blocks, lines and replacement policies.
pub mod cache;
/// Common types and constants (addresses, access kinds, errors).
pub mod common;
/// Simulator configuration (defaults, policy mode, geometry).
pub mod config;
/// Backing memory.
pub mod memory;
/// Simulation engine, traces and loaders.
pub mod sim;
/// Hit-rate statistics and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Simulation engine; construct with `Simulator::new`.
pub use crate::sim::Simulator;
