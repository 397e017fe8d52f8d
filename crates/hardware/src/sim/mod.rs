//! Simulation engine, access traces and input loading.
//!
//! Provides the engine that drives both policy arrays over one access
//! stream, the access event type it consumes, and helpers to load traces
//! and memory images from disk.

pub mod loader;
pub mod simulator;
pub mod trace;

pub use simulator::{AccessOutcome, Simulator};
pub use trace::{AccessEvent, AccessOp};
