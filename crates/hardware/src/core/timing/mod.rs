//! Cycle-accurate timing.
//!
//! This module turns cache accesses into clock cycles. It provides:
//! 1. **Engine:** The clocked state machine that walks one request at a time through
//!    cache latency, the access itself, and (on a miss) memory latency.
//! 2. **Signals:** Step outcomes, completion records, and per-cycle output snapshots.
//! 3. **Cost Model:** The static primitive gate count estimate of the configured cache.

/// Static gate count estimate.
pub mod cost;

/// Clocked timing engine.
pub mod engine;

/// Engine outputs and step outcomes.
pub mod signals;

pub use cost::GateCount;
pub use engine::TimingEngine;
pub use signals::{Completion, Signals, StepOutcome};
