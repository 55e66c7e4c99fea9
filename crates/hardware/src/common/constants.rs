//! Global Simulator Constants.
//!
//! This module defines constants shared across the simulator. It includes:
//! 1. **Address Constants:** Width and mask of the simulated address space.
//! 2. **Memory Constants:** Size of main memory and the out-of-range read sentinel.
//! 3. **Cache Constants:** Word width and associativity of the set-associative cache.
//! 4. **Timing Constants:** The cycle sentinel reported for runs that overflow their budget.

/// Width of a cache address in bits.
pub const ADDRESS_WIDTH: u32 = 16;

/// Mask selecting the bits of an address that are visible to the cache.
pub const ADDRESS_MASK: u32 = (1 << ADDRESS_WIDTH) - 1;

/// Size of main memory in bytes (one byte per addressable location).
pub const MEMORY_SIZE: usize = 1 << ADDRESS_WIDTH;

/// Byte returned by a read outside of main memory.
pub const OUT_OF_RANGE_BYTE: u8 = 0xFF;

/// Number of bytes in a data word moved by a single request.
pub const WORD_BYTES: usize = 4;

/// Ways per set in the set-associative cache.
pub const WAYS_PER_SET: usize = 4;

/// Cycle count reported when a run could not drain its requests within the cycle budget.
pub const CYCLES_OVERFLOW: usize = usize::MAX - 1;
