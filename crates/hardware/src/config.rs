//! Configuration system for the cache simulator.
//!
//! This module defines the parameters of a simulation run. It provides:
//! 1. **Defaults:** Baseline geometry and timing used when a field is omitted.
//! 2. **Structures:** `SimConfig`, the cycle budget, cache geometry, and latencies of a run.
//! 3. **Enums:** The cache organization (direct-mapped or four-way set-associative LRU).
//! 4. **Validation:** Geometry and timing checks that must pass before a run may start.
//!
//! Configuration is built from CLI flags or deserialized from JSON.

use serde::{Deserialize, Serialize};

use crate::common::addr::CacheConfig;
use crate::common::constants::{ADDRESS_WIDTH, WAYS_PER_SET};
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default cycle budget.
    pub const CYCLES: usize = 1000;

    /// Default number of cache lines.
    pub const CACHE_LINES: u32 = 8;

    /// Default cache line size in bytes.
    pub const CACHE_LINE_SIZE: u32 = 8;

    /// Default cache access latency in cycles.
    pub const CACHE_LATENCY: u32 = 2;

    /// Default main memory latency in cycles.
    pub const MEMORY_LATENCY: u32 = 3;
}

/// Cache organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CacheOrganization {
    /// One line per index value; a conflicting block always replaces the resident one.
    #[default]
    #[serde(alias = "directmapped", alias = "direct")]
    DirectMapped,
    /// Four ways per set with least-recently-used replacement.
    #[serde(alias = "fourway", alias = "4way")]
    FourWay,
}

impl CacheOrganization {
    /// Returns `true` for the set-associative organization.
    #[inline]
    pub const fn is_associative(self) -> bool {
        matches!(self, Self::FourWay)
    }
}

/// Parameters of a simulation run.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{CacheOrganization, SimConfig};
///
/// let json = r#"{
///     "cycles": 40,
///     "policy": "FourWay",
///     "cache_lines": 8,
///     "cache_line_size": 8,
///     "cache_latency": 2,
///     "memory_latency": 3
/// }"#;
///
/// let config: SimConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.policy, CacheOrganization::FourWay);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Maximum number of clock cycles the run may take.
    #[serde(default = "SimConfig::default_cycles")]
    pub cycles: usize,

    /// Cache organization.
    #[serde(default)]
    pub policy: CacheOrganization,

    /// Total number of cache lines (across all sets).
    #[serde(default = "SimConfig::default_cache_lines")]
    pub cache_lines: u32,

    /// Size of each cache line in bytes.
    #[serde(default = "SimConfig::default_cache_line_size")]
    pub cache_line_size: u32,

    /// Cycles spent before the cache is accessed.
    #[serde(default = "SimConfig::default_cache_latency")]
    pub cache_latency: u32,

    /// Additional cycles spent on a miss.
    #[serde(default = "SimConfig::default_memory_latency")]
    pub memory_latency: u32,
}

impl SimConfig {
    fn default_cycles() -> usize {
        defaults::CYCLES
    }

    fn default_cache_lines() -> u32 {
        defaults::CACHE_LINES
    }

    fn default_cache_line_size() -> u32 {
        defaults::CACHE_LINE_SIZE
    }

    fn default_cache_latency() -> u32 {
        defaults::CACHE_LATENCY
    }

    fn default_memory_latency() -> u32 {
        defaults::MEMORY_LATENCY
    }

    /// Checks every geometry and timing rule.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as a [`ConfigError`]. Nothing is coerced.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cycles == 0 {
            return Err(ConfigError::ZeroCycles);
        }
        if self.cache_line_size == 0 {
            return Err(ConfigError::ZeroLineSize);
        }
        if self.cache_line_size % 4 != 0 {
            return Err(ConfigError::LineSizeNotWordMultiple(self.cache_line_size));
        }
        if self.cache_lines == 0 {
            return Err(ConfigError::ZeroLines);
        }
        match self.policy {
            CacheOrganization::DirectMapped if !self.cache_lines.is_power_of_two() => {
                return Err(ConfigError::LinesNotPowerOfTwo(self.cache_lines));
            }
            CacheOrganization::FourWay if self.cache_lines % WAYS_PER_SET as u32 != 0 => {
                return Err(ConfigError::LinesNotMultipleOfWays(self.cache_lines));
            }
            _ => {}
        }
        if self.cache_latency == 0 {
            return Err(ConfigError::ZeroCacheLatency);
        }
        if self.memory_latency == 0 {
            return Err(ConfigError::ZeroMemoryLatency);
        }

        let index_bits = self.index_bits();
        let offset_bits = ceil_log2(self.cache_line_size);
        if index_bits + offset_bits > ADDRESS_WIDTH {
            return Err(ConfigError::AddressTooNarrow {
                index_bits,
                offset_bits,
                width: ADDRESS_WIDTH,
            });
        }
        Ok(())
    }

    /// Derives the address field widths for this geometry.
    ///
    /// The index selects a line in a direct-mapped cache and a set of four lines in a
    /// four-way cache; widths are rounded up so every line or set is addressable.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration does not validate.
    pub fn cache_config(&self) -> Result<CacheConfig, ConfigError> {
        self.validate()?;
        let index_bits = self.index_bits();
        let offset_bits = ceil_log2(self.cache_line_size);
        Ok(CacheConfig {
            index_bits,
            offset_bits,
            tag_bits: ADDRESS_WIDTH - index_bits - offset_bits,
        })
    }

    fn index_bits(&self) -> u32 {
        match self.policy {
            CacheOrganization::DirectMapped => ceil_log2(self.cache_lines),
            CacheOrganization::FourWay => ceil_log2(self.cache_lines / WAYS_PER_SET as u32),
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cycles: defaults::CYCLES,
            policy: CacheOrganization::default(),
            cache_lines: defaults::CACHE_LINES,
            cache_line_size: defaults::CACHE_LINE_SIZE,
            cache_latency: defaults::CACHE_LATENCY,
            memory_latency: defaults::MEMORY_LATENCY,
        }
    }
}

/// Smallest `n` with `2^n >= value`; zero for `value <= 1`.
fn ceil_log2(value: u32) -> u32 {
    if value <= 1 {
        0
    } else {
        u32::BITS - (value - 1).leading_zeros()
    }
}
