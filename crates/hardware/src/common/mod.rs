//! Common types and constants used throughout the cache simulator.
//!
//! This module provides the building blocks shared by every component:
//! 1. **Address Decoding:** Field widths and the tag/index/offset view of an address.
//! 2. **Constants:** Address width, memory size, word size, and the overflow sentinel.
//! 3. **Requests:** The read/write request handed to the timing engine.
//! 4. **Error Handling:** Configuration, memory, and top-level simulation errors.

/// Address decomposition (tag, index, offset).
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Request type definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{CacheConfig, DecodedAddress, decode};
pub use constants::{ADDRESS_MASK, ADDRESS_WIDTH, CYCLES_OVERFLOW, MEMORY_SIZE, WORD_BYTES};
pub use data::{AccessType, Request};
pub use error::{ConfigError, MemoryError, SimError};
