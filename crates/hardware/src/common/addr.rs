//! Cache address decomposition.
//!
//! This module splits a flat address into the fields the cache looks at. It provides:
//! 1. **Bit Layout:** `CacheConfig`, the widths of the tag, index, and offset fields.
//! 2. **Decoding:** `DecodedAddress`, the tag/index/offset view of a single address.
//! 3. **Alignment:** Helpers for locating the start of the block containing an address.

use serde::Serialize;

use super::constants::{ADDRESS_MASK, ADDRESS_WIDTH};

/// Field widths of a cache address.
///
/// Derived once from the cache geometry (see [`SimConfig::cache_config`]) and fixed for
/// the lifetime of a run. The three widths always sum to [`ADDRESS_WIDTH`].
///
/// [`SimConfig::cache_config`]: crate::config::SimConfig::cache_config
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CacheConfig {
    /// Number of bits selecting a line (direct-mapped) or set (set-associative).
    pub index_bits: u32,
    /// Number of high-order bits identifying the block held by a line.
    pub tag_bits: u32,
    /// Number of bits selecting a byte within a block.
    pub offset_bits: u32,
}

impl CacheConfig {
    /// Size of a block in bytes (`2^offset_bits`).
    #[inline]
    pub const fn block_size(&self) -> usize {
        1 << self.offset_bits
    }

    /// Number of lines (direct-mapped) or sets (set-associative) addressed by the index field.
    #[inline]
    pub const fn num_slots(&self) -> usize {
        1 << self.index_bits
    }

    /// Returns the address of the first byte of the block containing `address`.
    #[inline]
    pub const fn block_base(&self, address: u32) -> u32 {
        address & !((1u32 << self.offset_bits) - 1)
    }
}

/// Tag, index, and offset fields of a single address.
///
/// A computed view; it is never stored apart from the request it was decoded from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddress {
    /// High-order bits identifying the block.
    pub tag: u32,
    /// Line or set selector.
    pub index: u32,
    /// Byte position within the block.
    pub offset: u32,
}

impl DecodedAddress {
    /// Splits `address` according to `config`.
    ///
    /// The address is first truncated to [`ADDRESS_WIDTH`] bits.
    ///
    /// # Arguments
    ///
    /// * `address` - Raw request address.
    /// * `config` - Field widths of the cache.
    #[inline]
    pub const fn new(address: u32, config: &CacheConfig) -> Self {
        let address = address & ADDRESS_MASK;
        let offset_mask = (1u32 << config.offset_bits) - 1;
        let index_mask = (1u32 << config.index_bits) - 1;
        let low_bits = config.offset_bits + config.index_bits;

        Self {
            offset: address & offset_mask,
            index: (address >> config.offset_bits) & index_mask,
            tag: if low_bits >= ADDRESS_WIDTH {
                0
            } else {
                address >> low_bits
            },
        }
    }

    /// Reassembles the address the fields were decoded from.
    pub const fn compose(&self, config: &CacheConfig) -> u32 {
        (self.tag << (config.index_bits + config.offset_bits))
            | (self.index << config.offset_bits)
            | self.offset
    }
}

/// Splits `address` into its tag, index, and offset fields.
#[inline]
pub const fn decode(address: u32, config: &CacheConfig) -> DecodedAddress {
    DecodedAddress::new(address, config)
}
