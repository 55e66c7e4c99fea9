//! Cycle-accurate cache simulator library.
//!
//! This crate models a single cache in front of a 64 KiB main memory and counts every
//! clock cycle a stream of word reads and writes takes. It provides the following:
//! 1. **Cache:** Direct-mapped and four-way set-associative LRU organizations, both
//!    write-through with whole-block fills on a miss.
//! 2. **Timing:** A clocked engine that applies cache and memory latency per request and
//!    estimates the primitive gate count of the configured cache.
//! 3. **Memory:** Byte-addressable main memory with bounds-checked access.
//! 4. **Simulation:** CSV request loading, the run driver, VCD tracing, and a
//!    matrix-multiplication reference workload.
//! 5. **Reporting:** Run configuration and result statistics.

/// Common types and constants (address decoding, requests, errors).
pub mod common;
/// Simulator configuration (defaults, cache organization, validation).
pub mod config;
/// Cache organizations and the timing engine.
pub mod core;
/// Run driver, request loader, waveform trace, and reference workload.
pub mod sim;
/// Main memory.
pub mod soc;
/// Simulation result reporting.
pub mod stats;

/// Run configuration; use `SimConfig::default()` or deserialize from JSON.
pub use crate::config::SimConfig;
/// Cycle-accurate driver of one cache.
pub use crate::core::timing::TimingEngine;
/// Top-level run driver; construct with `Simulator::new`.
pub use crate::sim::Simulator;
/// Aggregate outcome of a run.
pub use crate::stats::SimResult;
