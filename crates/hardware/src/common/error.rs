//! Error definitions.
//!
//! This module defines the error types of the simulator. It provides:
//! 1. **Configuration Errors:** Invalid cache geometry or timing, rejected before a run starts.
//! 2. **Memory Errors:** Out-of-range accesses reported by the fallible memory accessors.
//! 3. **Simulation Errors:** The top-level error for loading requests and writing traces.
//!
//! Nothing on the read/write data path returns an error: out-of-range memory traffic is
//! logged and absorbed, and an exhausted cycle budget is reported through the result.

use std::io;

use thiserror::Error;

/// A rejected simulation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The cycle budget is zero.
    #[error("cycle budget must be a positive value")]
    ZeroCycles,

    /// The cache line size is zero.
    #[error("cache line size must be larger than 0")]
    ZeroLineSize,

    /// The cache line size cannot hold whole words.
    #[error("cache line size must be a multiple of 4 bytes, got {0}")]
    LineSizeNotWordMultiple(u32),

    /// The cache has no lines.
    #[error("number of cache lines must be larger than 0")]
    ZeroLines,

    /// A direct-mapped cache needs one line per index value.
    #[error("direct-mapped cache needs a power-of-two number of lines, got {0}")]
    LinesNotPowerOfTwo(u32),

    /// A four-way cache needs whole sets of four lines.
    #[error("four-way cache needs a multiple of 4 lines, got {0}")]
    LinesNotMultipleOfWays(u32),

    /// The cache latency is zero.
    #[error("cache latency must be greater than 0")]
    ZeroCacheLatency,

    /// The memory latency is zero.
    #[error("memory latency must be greater than 0")]
    ZeroMemoryLatency,

    /// Index and offset fields do not fit into the address.
    #[error("{index_bits} index bits and {offset_bits} offset bits exceed the {width}-bit address")]
    AddressTooNarrow {
        /// Bits needed to select a line or set.
        index_bits: u32,
        /// Bits needed to select a byte in a block.
        offset_bits: u32,
        /// Width of the address.
        width: u32,
    },
}

/// A failed main-memory access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// The address lies beyond the end of main memory.
    #[error("memory address {address:#x} out of range (size {size:#x})")]
    OutOfRange {
        /// Offending address.
        address: u32,
        /// Size of main memory in bytes.
        size: usize,
    },
}

/// Top-level simulator error.
#[derive(Debug, Error)]
pub enum SimError {
    /// Configuration rejected before the run.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Reading requests or writing a trace failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A request line could not be parsed.
    #[error("line {line}: {reason}")]
    Parse {
        /// 1-based line number in the request file.
        line: usize,
        /// Description of the problem.
        reason: String,
    },
}
