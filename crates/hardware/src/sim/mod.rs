//! Simulation driver, request loading, tracing, and reference workloads.
//!
//! This module wires the timing engine to the outside world. It provides:
//! 1. **Simulator:** Steps a request stream through the engine within the cycle budget.
//! 2. **Loader:** Parses CSV request files.
//! 3. **Trace:** Writes a VCD waveform of the engine signals, one sample per cycle.
//! 4. **Workload:** A matrix-multiplication request stream with a result checker.

/// CSV request loading.
pub mod loader;

/// Run driver.
pub mod simulator;

/// VCD waveform output.
pub mod trace;

/// Matrix-multiplication reference workload.
pub mod workload;

pub use simulator::{Simulator, run_simulation};

use crate::common::data::Request;
use crate::common::error::SimError;
use crate::core::timing::{Completion, Signals};

/// Receives the progress of a run.
///
/// Both callbacks default to doing nothing; returning an error stops the run.
pub trait RunObserver {
    /// Called after every simulated cycle with the request on the inputs and the engine
    /// outputs at the end of the cycle.
    ///
    /// # Errors
    ///
    /// Any error aborts the run and is returned to the caller.
    fn on_cycle(&mut self, _request: &Request, _signals: &Signals) -> Result<(), SimError> {
        Ok(())
    }

    /// Called once per completed request, in completion order.
    ///
    /// # Errors
    ///
    /// Any error aborts the run and is returned to the caller.
    fn on_complete(&mut self, _completion: &Completion) -> Result<(), SimError> {
        Ok(())
    }
}

/// Observer that ignores the run.
impl RunObserver for () {}

/// Fans one run out to two observers.
impl<A: RunObserver, B: RunObserver> RunObserver for (A, B) {
    fn on_cycle(&mut self, request: &Request, signals: &Signals) -> Result<(), SimError> {
        self.0.on_cycle(request, signals)?;
        self.1.on_cycle(request, signals)
    }

    fn on_complete(&mut self, completion: &Completion) -> Result<(), SimError> {
        self.0.on_complete(completion)?;
        self.1.on_complete(completion)
    }
}

/// An absent observer ignores the run.
impl<T: RunObserver> RunObserver for Option<T> {
    fn on_cycle(&mut self, request: &Request, signals: &Signals) -> Result<(), SimError> {
        self.as_mut()
            .map_or(Ok(()), |observer| observer.on_cycle(request, signals))
    }

    fn on_complete(&mut self, completion: &Completion) -> Result<(), SimError> {
        self.as_mut()
            .map_or(Ok(()), |observer| observer.on_complete(completion))
    }
}

impl<T: RunObserver + ?Sized> RunObserver for &mut T {
    fn on_cycle(&mut self, request: &Request, signals: &Signals) -> Result<(), SimError> {
        (**self).on_cycle(request, signals)
    }

    fn on_complete(&mut self, completion: &Completion) -> Result<(), SimError> {
        (**self).on_complete(completion)
    }
}
