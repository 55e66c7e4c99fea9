//! Memory request definitions.
//!
//! A request is the unit of work handed to the timing engine: one 32-bit word read from or
//! written to a single address.

use serde::{Deserialize, Serialize};

/// Direction of a memory request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessType {
    /// Load a word from the cache.
    Read,
    /// Store a word through the cache to memory.
    Write,
}

/// A single cache request.
///
/// Immutable once issued. The driver resubmits the same request while the engine reports
/// that it is still waiting on latency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Target byte address.
    pub addr: u32,
    /// Word to store; ignored for reads.
    pub data: u32,
    /// Read or write.
    pub access: AccessType,
}

impl Request {
    /// Creates a read request for `addr`.
    pub const fn read(addr: u32) -> Self {
        Self {
            addr,
            data: 0,
            access: AccessType::Read,
        }
    }

    /// Creates a write request storing `data` at `addr`.
    pub const fn write(addr: u32, data: u32) -> Self {
        Self {
            addr,
            data,
            access: AccessType::Write,
        }
    }

    /// Returns `true` for write requests.
    #[inline]
    pub const fn is_write(&self) -> bool {
        matches!(self.access, AccessType::Write)
    }
}
