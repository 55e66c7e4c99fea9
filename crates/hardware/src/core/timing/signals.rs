//! Timing engine signals.
//!
//! This module defines what the engine reports to its driver. It provides:
//! 1. **Step Outcome:** Whether the request in flight is still waiting or has completed.
//! 2. **Completion:** The record of a finished request (hit, data, latency).
//! 3. **Signals:** The per-cycle snapshot of counters, read data, and wait flags.

use serde::Serialize;

use crate::common::data::Request;

/// Result of advancing the engine by one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The request is still waiting on cache or memory latency; submit it again.
    Waiting,
    /// The request finished on this cycle.
    Completed(Completion),
    /// The cycle budget is spent; no cycle was simulated.
    Halted,
}

impl StepOutcome {
    /// Returns the completion record, if the request finished on this cycle.
    pub const fn completion(&self) -> Option<&Completion> {
        match self {
            Self::Completed(done) => Some(done),
            Self::Waiting | Self::Halted => None,
        }
    }
}

/// A request that has run through its full latency sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// The request as latched when its sequence started.
    pub request: Request,
    /// Whether the cache access hit.
    pub hit: bool,
    /// Word read by a read request; `None` for writes.
    pub data: Option<u32>,
    /// Cycles spent on this request, including the access cycle.
    pub latency: usize,
}

/// Per-cycle view of the engine outputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Signals {
    /// Cycles reported so far (the overflow sentinel once the budget is exceeded).
    pub cycles: usize,
    /// Cache hits so far.
    pub hits: usize,
    /// Cache misses so far.
    pub misses: usize,
    /// Word returned by the most recently completed read.
    pub data: Option<u32>,
    /// The request in flight is waiting on cache latency.
    pub waiting_for_cache: bool,
    /// The request in flight is waiting on memory latency.
    pub waiting_for_memory: bool,
    /// Estimated primitive gate count of the cache.
    pub gate_count: usize,
}

impl Signals {
    /// Returns `true` while the driver must hold the current request.
    pub const fn is_waiting(&self) -> bool {
        self.waiting_for_cache || self.waiting_for_memory
    }
}
