//! Clocked timing engine.
//!
//! The engine is advanced one cycle per [`TimingEngine::step`] call. A request moves
//! through a fixed sequence:
//!
//! 1. `cache_latency` cycles of pure wait (`waiting_for_cache` is raised).
//! 2. One cycle accessing the cache. A hit completes here.
//! 3. On a miss, `memory_latency` further cycles of pure wait (`waiting_for_memory` is
//!    raised); the request completes on the last of them.
//!
//! A hit therefore costs `cache_latency + 1` cycles and a miss
//! `cache_latency + memory_latency + 1`. Read data becomes visible only when the request
//! completes. Exactly one request is in flight; the driver resubmits it while the engine
//! reports `Waiting`.

use tracing::{debug, trace, warn};

use super::cost::GateCount;
use super::signals::{Completion, Signals, StepOutcome};
use crate::common::addr::CacheConfig;
use crate::common::constants::CYCLES_OVERFLOW;
use crate::common::data::{AccessType, Request};
use crate::common::error::ConfigError;
use crate::config::SimConfig;
use crate::core::units::cache::{Cache, CachePolicy};
use crate::soc::memory::MainMemory;
use crate::stats::SimResult;

/// Position of the request in flight within its latency sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// No request in flight.
    Idle,
    /// Counting down cache latency; the access happens once `remaining` reaches zero.
    CacheWait { remaining: u32 },
    /// Counting down memory latency after a miss.
    MemoryWait { remaining: u32 },
}

/// Access result held back until the request completes.
#[derive(Clone, Copy, Debug)]
struct PendingAccess {
    hit: bool,
    data: Option<u32>,
}

/// Cycle-accurate driver of a single cache.
#[derive(Debug)]
pub struct TimingEngine {
    cache: Cache,
    cache_config: CacheConfig,
    cache_latency: u32,
    memory_latency: u32,
    budget: usize,
    gate_count: GateCount,

    cycles: usize,
    hits: usize,
    misses: usize,
    budget_exceeded: bool,

    phase: Phase,
    latched: Option<Request>,
    pending: Option<PendingAccess>,
    started_at: usize,
    data: Option<u32>,
}

impl TimingEngine {
    /// Creates an engine for `config`, taking ownership of main memory.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid; no engine is built.
    pub fn new(config: &SimConfig, memory: MainMemory) -> Result<Self, ConfigError> {
        let cache_config = config.cache_config()?;
        let gate_count = GateCount::estimate(
            config.policy,
            config.cache_lines as usize,
            config.cache_line_size as usize,
            cache_config.tag_bits as usize,
        );
        debug!(
            policy = ?config.policy,
            index_bits = cache_config.index_bits,
            tag_bits = cache_config.tag_bits,
            offset_bits = cache_config.offset_bits,
            gates = gate_count.total(),
            "timing engine configured"
        );

        Ok(Self {
            cache: Cache::new(config.policy, &cache_config, memory),
            cache_config,
            cache_latency: config.cache_latency,
            memory_latency: config.memory_latency,
            budget: config.cycles,
            gate_count,
            cycles: 0,
            hits: 0,
            misses: 0,
            budget_exceeded: false,
            phase: Phase::Idle,
            latched: None,
            pending: None,
            started_at: 0,
            data: None,
        })
    }

    /// Simulates one clock cycle of `request`.
    ///
    /// While the previous call returned [`StepOutcome::Waiting`], `request` must be the
    /// request already in flight; a different request is logged and ignored.
    pub fn step(&mut self, request: Request) -> StepOutcome {
        if self.is_exhausted() {
            return StepOutcome::Halted;
        }
        self.cycles += 1;

        let request = match self.latched {
            Some(latched) => {
                if latched != request {
                    warn!(
                        ?latched,
                        offered = ?request,
                        "request changed while waiting, keeping the latched request"
                    );
                }
                latched
            }
            None => {
                self.latched = Some(request);
                self.started_at = self.cycles - 1;
                self.phase = Phase::CacheWait {
                    remaining: self.cache_latency,
                };
                request
            }
        };

        match self.phase {
            Phase::CacheWait { remaining } if remaining > 0 => {
                self.phase = Phase::CacheWait {
                    remaining: remaining - 1,
                };
                StepOutcome::Waiting
            }
            Phase::CacheWait { .. } | Phase::Idle => self.access(request),
            Phase::MemoryWait { remaining } => {
                if remaining > 1 {
                    self.phase = Phase::MemoryWait {
                        remaining: remaining - 1,
                    };
                    StepOutcome::Waiting
                } else {
                    self.complete(request)
                }
            }
        }
    }

    /// Performs the cache access of the request in flight.
    fn access(&mut self, request: Request) -> StepOutcome {
        let (hit, data) = match request.access {
            AccessType::Read => {
                let (word, hit) = self.cache.read(request.addr, &self.cache_config);
                (hit, Some(word))
            }
            AccessType::Write => (
                self.cache
                    .write(request.addr, &self.cache_config, request.data),
                None,
            ),
        };
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        trace!(
            cycle = self.cycles,
            addr = format_args!("{:#x}", request.addr),
            write = request.is_write(),
            hit,
            "cache access"
        );

        self.pending = Some(PendingAccess { hit, data });
        if hit || self.memory_latency == 0 {
            self.complete(request)
        } else {
            self.phase = Phase::MemoryWait {
                remaining: self.memory_latency,
            };
            StepOutcome::Waiting
        }
    }

    /// Finishes the request in flight and resets the latency countdown.
    fn complete(&mut self, request: Request) -> StepOutcome {
        let PendingAccess { hit, data } = self
            .pending
            .take()
            .unwrap_or(PendingAccess { hit: false, data: None });
        if data.is_some() {
            self.data = data;
        }
        self.phase = Phase::Idle;
        self.latched = None;

        StepOutcome::Completed(Completion {
            request,
            hit,
            data,
            latency: self.cycles - self.started_at,
        })
    }

    /// Records that requests remained when the cycle budget ran out.
    ///
    /// From now on [`Self::signals`] and [`Self::result`] report [`CYCLES_OVERFLOW`]
    /// instead of the true cycle count.
    pub fn signal_budget_exceeded(&mut self) {
        if !self.budget_exceeded {
            debug!(
                cycles = self.cycles,
                budget = self.budget,
                "requests exceed the cycle budget"
            );
        }
        self.budget_exceeded = true;
    }

    /// Returns `true` once every cycle of the budget has been simulated.
    #[inline]
    pub const fn is_exhausted(&self) -> bool {
        self.cycles >= self.budget
    }

    /// Returns `true` while a request is in flight.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.latched.is_some()
    }

    /// Cycles actually simulated, regardless of the overflow sentinel.
    #[inline]
    pub const fn cycles_elapsed(&self) -> usize {
        self.cycles
    }

    /// The configured cycle budget.
    #[inline]
    pub const fn budget(&self) -> usize {
        self.budget
    }

    /// Address field widths used by the cache.
    pub const fn cache_config(&self) -> &CacheConfig {
        &self.cache_config
    }

    /// Gate count estimate of the configured cache.
    pub const fn gate_count(&self) -> &GateCount {
        &self.gate_count
    }

    /// The simulated cache.
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Read-only view of main memory.
    pub fn memory(&self) -> &MainMemory {
        self.cache.memory()
    }

    /// Mutable access to main memory, bypassing the cache. Intended for seeding memory
    /// before the first request.
    pub fn memory_mut(&mut self) -> &mut MainMemory {
        self.cache.memory_mut()
    }

    /// Consumes the engine and returns main memory.
    pub fn into_memory(self) -> MainMemory {
        self.cache.into_memory()
    }

    const fn reported_cycles(&self) -> usize {
        if self.budget_exceeded {
            CYCLES_OVERFLOW
        } else {
            self.cycles
        }
    }

    /// Snapshot of the engine outputs after the last cycle.
    pub fn signals(&self) -> Signals {
        Signals {
            cycles: self.reported_cycles(),
            hits: self.hits,
            misses: self.misses,
            data: self.data,
            waiting_for_cache: matches!(self.phase, Phase::CacheWait { .. }),
            waiting_for_memory: matches!(self.phase, Phase::MemoryWait { .. }),
            gate_count: self.gate_count.total(),
        }
    }

    /// Aggregate result of the run so far.
    pub const fn result(&self) -> SimResult {
        SimResult {
            cycles: self.reported_cycles(),
            hits: self.hits,
            misses: self.misses,
            primitive_gate_count: self.gate_count.total(),
        }
    }
}
