//! Simulation results and reporting.
//!
//! This module holds the aggregate outcome of a run. It provides:
//! 1. **Counters:** Total cycles, hits, and misses.
//! 2. **Hardware Cost:** The estimated primitive gate count of the configured cache.
//! 3. **Derived Metrics:** Accesses, hit and miss rates, overflow detection.
//! 4. **Reporting:** A sectioned text report in the same layout as the CLI output.

use std::fmt;

use serde::Serialize;

use crate::common::constants::CYCLES_OVERFLOW;

/// Section names for selective report output.
///
/// Valid section identifiers: `"summary"`, `"cache"`, `"hardware"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "cache", "hardware"];

/// Aggregate result of a simulation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimResult {
    /// Cycles simulated, or [`CYCLES_OVERFLOW`] if requests were left over when the
    /// budget ran out.
    pub cycles: usize,
    /// Accesses that hit.
    pub hits: usize,
    /// Accesses that missed.
    pub misses: usize,
    /// Estimated primitive gate count of the cache.
    pub primitive_gate_count: usize,
}

impl SimResult {
    /// Total number of cache accesses.
    pub const fn accesses(&self) -> usize {
        self.hits + self.misses
    }

    /// Returns `true` if the run could not drain its requests within the budget.
    pub const fn overflowed(&self) -> bool {
        self.cycles == CYCLES_OVERFLOW
    }

    /// Fraction of accesses that hit, in percent; zero without accesses.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }

    /// Renders only the requested sections.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an empty
    /// slice to render all sections.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let mut out = String::new();
        let rule = "----------------------------------------------------------\n";

        out.push_str("==========================================================\n");
        out.push_str("CACHE SIMULATION RESULTS\n");
        out.push_str("==========================================================\n");
        if want("summary") {
            if self.overflowed() {
                out.push_str("sim_cycles               exceeded budget\n");
            } else {
                out.push_str(&format!("sim_cycles               {}\n", self.cycles));
            }
            out.push_str(rule);
        }
        if want("cache") {
            out.push_str("CACHE\n");
            out.push_str(&format!("  accesses               {}\n", self.accesses()));
            out.push_str(&format!("  hits                   {}\n", self.hits));
            out.push_str(&format!("  misses                 {}\n", self.misses));
            out.push_str(&format!("  hit_rate               {:.2}%\n", self.hit_rate()));
            out.push_str(rule);
        }
        if want("hardware") {
            out.push_str("HARDWARE\n");
            out.push_str(&format!(
                "  primitive_gates        {}\n",
                self.primitive_gate_count
            ));
        }
        out.push_str("==========================================================");
        out
    }

    /// Serializes the result as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; not expected for this plain structure.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Prints only the requested sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        println!("{}", self.render_sections(sections));
    }

    /// Prints all sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}

impl fmt::Display for SimResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_sections(&[]))
    }
}
