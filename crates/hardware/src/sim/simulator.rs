//! Simulator: owns the timing engine and drives a request stream through it.
//!
//! The driver submits one request per cycle, holds it while the engine reports that it is
//! waiting, and moves on when it completes. When the cycle budget runs out with requests
//! left over, the overflow signal is raised so the result carries the cycle sentinel.

use tracing::info;

use super::RunObserver;
use crate::common::data::Request;
use crate::common::error::{ConfigError, SimError};
use crate::config::SimConfig;
use crate::core::timing::{StepOutcome, TimingEngine};
use crate::soc::memory::MainMemory;
use crate::stats::SimResult;

/// Top-level simulator for one run.
#[derive(Debug)]
pub struct Simulator {
    engine: TimingEngine,
}

impl Simulator {
    /// Creates a simulator with zero-filled main memory.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid.
    pub fn new(config: &SimConfig) -> Result<Self, ConfigError> {
        Self::with_memory(config, MainMemory::new())
    }

    /// Creates a simulator over pre-seeded main memory.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid.
    pub fn with_memory(config: &SimConfig, memory: MainMemory) -> Result<Self, ConfigError> {
        Ok(Self {
            engine: TimingEngine::new(config, memory)?,
        })
    }

    /// The timing engine.
    pub const fn engine(&self) -> &TimingEngine {
        &self.engine
    }

    /// Mutable access to the timing engine.
    pub const fn engine_mut(&mut self) -> &mut TimingEngine {
        &mut self.engine
    }

    /// Runs `requests` until all complete or the cycle budget is spent.
    pub fn run(&mut self, requests: &[Request]) -> SimResult {
        let mut next = 0;
        while let Some(&request) = requests.get(next) {
            match self.engine.step(request) {
                StepOutcome::Halted => break,
                StepOutcome::Waiting => {}
                StepOutcome::Completed(_) => next += 1,
            }
        }
        self.finish(next, requests.len())
    }

    /// Runs `requests`, reporting every cycle and completion to `observer`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the observer; the run stops at that cycle.
    pub fn run_observed(
        &mut self,
        requests: &[Request],
        observer: &mut dyn RunObserver,
    ) -> Result<SimResult, SimError> {
        let mut next = 0;
        while let Some(&request) = requests.get(next) {
            match self.engine.step(request) {
                StepOutcome::Halted => break,
                StepOutcome::Waiting => {}
                StepOutcome::Completed(done) => {
                    observer.on_complete(&done)?;
                    next += 1;
                }
            }
            observer.on_cycle(&request, &self.engine.signals())?;
        }
        Ok(self.finish(next, requests.len()))
    }

    /// Raises the overflow signal if requests are left over and collects the result.
    fn finish(&mut self, completed: usize, total: usize) -> SimResult {
        if completed < total {
            self.engine.signal_budget_exceeded();
        }

        let result = self.engine.result();
        info!(
            completed,
            total,
            cycles = self.engine.cycles_elapsed(),
            hits = result.hits,
            misses = result.misses,
            overflow = result.overflowed(),
            "simulation finished"
        );
        result
    }

    /// Consumes the simulator and returns main memory.
    pub fn into_memory(self) -> MainMemory {
        self.engine.into_memory()
    }
}

/// Builds a simulator for `config` and runs `requests` on zero-filled memory.
///
/// # Errors
///
/// Returns [`SimError::Config`] if the configuration is invalid.
pub fn run_simulation(config: &SimConfig, requests: &[Request]) -> Result<SimResult, SimError> {
    let mut sim = Simulator::new(config)?;
    Ok(sim.run(requests))
}
