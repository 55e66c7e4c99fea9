//! VCD Waveform Trace.
//!
//! Records the engine inputs and outputs once per cycle in Value Change Dump format so a
//! run can be inspected in a waveform viewer. The clock has a period of two time units:
//! each cycle is a rising edge carrying the sampled values, followed by a falling edge.

use std::io::Write;

use super::RunObserver;
use crate::common::data::Request;
use crate::common::error::SimError;
use crate::core::timing::Signals;

/// Traced signals after the clock: (name, width in bits).
const SIGNALS: [(&str, u32); 10] = [
    ("request_addr", 32),
    ("request_data", 32),
    ("request_we", 1),
    ("cycles", 64),
    ("hits", 64),
    ("misses", 64),
    ("primitive_gate_count", 64),
    ("data", 32),
    ("wait_for_cache_latency", 1),
    ("wait_for_memory_latency", 1),
];

// Single-character identifiers run from '!' to '~'.
const _: () = assert!(SIGNALS.len() < 94);

/// Identifier of the clock signal.
const CLOCK_ID: char = id_code(0);

/// VCD identifier of the signal at `slot`; the clock is slot 0, `SIGNALS[i]` is slot `i + 1`.
const fn id_code(slot: usize) -> char {
    (b'!' + slot as u8) as char
}

/// VCD writer fed by the simulator as a [`RunObserver`].
#[derive(Debug)]
pub struct VcdTracer<W: Write> {
    out: W,
    time: u64,
    last: Option<[u64; SIGNALS.len()]>,
}

impl<W: Write> VcdTracer<W> {
    /// Writes the VCD header to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the header cannot be written.
    pub fn new(mut out: W) -> Result<Self, SimError> {
        writeln!(out, "$version cachesim {} $end", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "$timescale 1 s $end")?;
        writeln!(out, "$scope module cache $end")?;
        writeln!(out, "$var wire 1 {CLOCK_ID} clk $end")?;
        for (slot, (name, width)) in SIGNALS.iter().enumerate() {
            let id = id_code(slot + 1);
            writeln!(out, "$var wire {width} {id} {name} $end")?;
        }
        writeln!(out, "$upscope $end")?;
        writeln!(out, "$enddefinitions $end")?;
        Ok(Self {
            out,
            time: 0,
            last: None,
        })
    }

    /// Appends one clock cycle, dumping only the values that changed.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the sample cannot be written.
    pub fn sample(&mut self, request: &Request, signals: &Signals) -> Result<(), SimError> {
        let values = [
            u64::from(request.addr),
            u64::from(request.data),
            u64::from(request.is_write()),
            signals.cycles as u64,
            signals.hits as u64,
            signals.misses as u64,
            signals.gate_count as u64,
            u64::from(signals.data.unwrap_or(0)),
            u64::from(signals.waiting_for_cache),
            u64::from(signals.waiting_for_memory),
        ];

        writeln!(self.out, "#{}", self.time)?;
        if self.last.is_none() {
            writeln!(self.out, "$dumpvars")?;
        }
        writeln!(self.out, "1{CLOCK_ID}")?;
        for (i, (&(_, width), value)) in SIGNALS.iter().zip(values).enumerate() {
            if self.last.is_some_and(|last| last[i] == value) {
                continue;
            }
            let id = id_code(i + 1);
            if width == 1 {
                writeln!(self.out, "{value}{id}")?;
            } else {
                writeln!(self.out, "b{value:b} {id}")?;
            }
        }
        if self.last.is_none() {
            writeln!(self.out, "$end")?;
        }
        writeln!(self.out, "#{}", self.time + 1)?;
        writeln!(self.out, "0{CLOCK_ID}")?;

        self.time += 2;
        self.last = Some(values);
        Ok(())
    }

    /// Flushes the trace and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if flushing fails.
    pub fn finish(mut self) -> Result<W, SimError> {
        writeln!(self.out, "#{}", self.time)?;
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> RunObserver for VcdTracer<W> {
    fn on_cycle(&mut self, request: &Request, signals: &Signals) -> Result<(), SimError> {
        self.sample(request, signals)
    }
}
