//! Static hardware cost model.
//!
//! Estimates the primitive gate count of a cache from its geometry. The estimate is a
//! closed-form function of the configuration, computed once per run:
//!
//! ```text
//! storage         = 8 * 4 * lines * line_bytes      (one 4-gate latch per bit)
//! control logic   = 5 * lines
//! tag comparison  = 2 * tag_bits * lines
//! ```
//!
//! The four-way LRU cache adds one 2-bit age counter per line, with a comparator
//! (2 gates per counter gate) and an increment unit (half adder + full adder, 7 gates
//! per counter gate).

use serde::Serialize;

use crate::config::CacheOrganization;

/// Gates needed to store a single bit.
pub const ONE_BIT_STORAGE_GATES: usize = 4;

/// Gates of control logic per cache line.
pub const CONTROL_GATES_PER_LINE: usize = 5;

/// Gates per tag bit per line for the tag comparator.
pub const COMPARATOR_GATES_PER_TAG_BIT: usize = 2;

/// Comparator gates per LRU counter gate.
pub const LRU_COMPARATOR_FACTOR: usize = 2;

/// Update-logic gates per LRU counter gate.
pub const LRU_UPDATE_FACTOR: usize = 7;

/// Breakdown of the estimated primitive gate count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GateCount {
    /// Data storage for every bit of every line.
    pub storage: usize,
    /// Valid/control logic per line.
    pub control_logic: usize,
    /// Tag comparators.
    pub tag_comparison: usize,
    /// LRU age counters (four-way only).
    pub lru_counters: usize,
    /// LRU counter comparators (four-way only).
    pub lru_comparators: usize,
    /// LRU counter update logic (four-way only).
    pub lru_update_logic: usize,
}

impl GateCount {
    /// Estimates the gate count of a cache.
    ///
    /// # Arguments
    ///
    /// * `policy` - Cache organization; only the four-way cache pays for LRU state.
    /// * `lines` - Total number of cache lines.
    /// * `line_bytes` - Size of each line in bytes.
    /// * `tag_bits` - Width of the stored tag.
    pub const fn estimate(
        policy: CacheOrganization,
        lines: usize,
        line_bytes: usize,
        tag_bits: usize,
    ) -> Self {
        let storage = 8 * ONE_BIT_STORAGE_GATES * lines * line_bytes;
        let control_logic = CONTROL_GATES_PER_LINE * lines;
        let tag_comparison = COMPARATOR_GATES_PER_TAG_BIT * tag_bits * lines;

        let (lru_counters, lru_comparators, lru_update_logic) = if policy.is_associative() {
            let counters = 2 * ONE_BIT_STORAGE_GATES * lines;
            (
                counters,
                counters * LRU_COMPARATOR_FACTOR,
                counters * LRU_UPDATE_FACTOR,
            )
        } else {
            (0, 0, 0)
        };

        Self {
            storage,
            control_logic,
            tag_comparison,
            lru_counters,
            lru_comparators,
            lru_update_logic,
        }
    }

    /// Total gate count.
    pub const fn total(&self) -> usize {
        self.storage
            + self.tag_comparison
            + self.control_logic
            + self.lru_counters
            + self.lru_comparators
            + self.lru_update_logic
    }
}
