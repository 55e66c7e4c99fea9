//! Main Memory.
//!
//! This module implements the flat, byte-addressable store behind the cache. It provides:
//! 1. **Storage:** A zero-initialized byte array covering the whole address space.
//! 2. **Checked Access:** `try_*` accessors that report out-of-range addresses as errors.
//! 3. **Tolerant Access:** Accessors that log out-of-range addresses and carry on, so a
//!    single bad request cannot abort a long simulation.
//! 4. **Bulk Access:** Block fills for the cache and image loading for setup.

use std::fmt;

use tracing::warn;

use crate::common::constants::{MEMORY_SIZE, OUT_OF_RANGE_BYTE, WORD_BYTES};
use crate::common::error::MemoryError;

/// Simulated main memory.
///
/// The sole source of truth for block fills. Only mutated through the write accessors;
/// the cache writes through on every store, so memory always holds the latest data.
#[derive(Clone, PartialEq, Eq)]
pub struct MainMemory {
    data: Vec<u8>,
}

impl MainMemory {
    /// Creates a zero-filled memory spanning the whole address space.
    pub fn new() -> Self {
        Self {
            data: vec![0; MEMORY_SIZE],
        }
    }

    /// Returns the size of memory in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if memory holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read-only view of the whole memory.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Reads a byte, failing on addresses beyond the end of memory.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::OutOfRange`] if `address >= self.len()`.
    pub fn try_read_u8(&self, address: u32) -> Result<u8, MemoryError> {
        self.data
            .get(address as usize)
            .copied()
            .ok_or(MemoryError::OutOfRange {
                address,
                size: self.data.len(),
            })
    }

    /// Writes a byte, failing on addresses beyond the end of memory.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::OutOfRange`] if `address >= self.len()`.
    pub fn try_write_u8(&mut self, address: u32, val: u8) -> Result<(), MemoryError> {
        let size = self.data.len();
        let slot = self
            .data
            .get_mut(address as usize)
            .ok_or(MemoryError::OutOfRange { address, size })?;
        *slot = val;
        Ok(())
    }

    /// Reads a byte; an out-of-range address is logged and yields [`OUT_OF_RANGE_BYTE`].
    pub fn read_u8(&self, address: u32) -> u8 {
        self.try_read_u8(address).unwrap_or_else(|err| {
            warn!(%err, "memory read dropped");
            OUT_OF_RANGE_BYTE
        })
    }

    /// Writes a byte; an out-of-range write is logged and dropped.
    pub fn write_u8(&mut self, address: u32, val: u8) {
        if let Err(err) = self.try_write_u8(address, val) {
            warn!(%err, "memory write dropped");
        }
    }

    /// Reads a little-endian word starting at `address`.
    pub fn read_u32(&self, address: u32) -> u32 {
        let mut bytes = [0u8; WORD_BYTES];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = self.read_u8(address.wrapping_add(i as u32));
        }
        u32::from_le_bytes(bytes)
    }

    /// Writes a little-endian word starting at `address`.
    pub fn write_u32(&mut self, address: u32, val: u32) {
        for (i, byte) in val.to_le_bytes().into_iter().enumerate() {
            self.write_u8(address.wrapping_add(i as u32), byte);
        }
    }

    /// Copies `buf.len()` consecutive bytes starting at `base` into `buf`.
    ///
    /// Used for block fills; bytes past the end of memory read as [`OUT_OF_RANGE_BYTE`].
    pub fn read_block(&self, base: u32, buf: &mut [u8]) {
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.read_u8(base.wrapping_add(i as u32));
        }
    }

    /// Loads a byte slice into memory at `offset`.
    ///
    /// Used to seed memory before a run. Bytes that do not fit are dropped with a warning.
    pub fn load(&mut self, data: &[u8], offset: u32) {
        for (i, &byte) in data.iter().enumerate() {
            self.write_u8(offset.wrapping_add(i as u32), byte);
        }
    }
}

impl Default for MainMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MainMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nonzero = self.data.iter().filter(|&&b| b != 0).count();
        f.debug_struct("MainMemory")
            .field("size", &self.data.len())
            .field("nonzero_bytes", &nonzero)
            .finish()
    }
}
