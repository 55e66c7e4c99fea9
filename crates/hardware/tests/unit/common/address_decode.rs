//! Address Decode Tests.
//!
//! Verifies the tag/index/offset split of a 16-bit cache address for fixed
//! geometries, the truncation of wider addresses, and the degenerate layouts
//! with an empty index or tag field.

use cachesim_core::common::addr::{CacheConfig, decode};
use cachesim_core::common::constants::{ADDRESS_MASK, ADDRESS_WIDTH};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// 8 lines of 8 bytes, direct-mapped.
const DM_8X8: CacheConfig = CacheConfig {
    index_bits: 3,
    tag_bits: 10,
    offset_bits: 3,
};

// ══════════════════════════════════════════════════════════
// 1. Field split
// ══════════════════════════════════════════════════════════

#[test]
fn decode_splits_fields() {
    // 0xABCD = 0b1010_1011_11|00_1|101
    let decoded = decode(0xABCD, &DM_8X8);
    assert_eq!(decoded.offset, 0b101);
    assert_eq!(decoded.index, 0b001);
    assert_eq!(decoded.tag, 0x2AF);
}

#[test]
fn decode_zero_address() {
    let decoded = decode(0, &DM_8X8);
    assert_eq!((decoded.tag, decoded.index, decoded.offset), (0, 0, 0));
}

#[test]
fn decode_truncates_to_address_width() {
    assert_eq!(decode(0x1_ABCD, &DM_8X8), decode(0xABCD, &DM_8X8));
    assert_eq!(decode(0xFFFF_0000, &DM_8X8), decode(0, &DM_8X8));
}

// ══════════════════════════════════════════════════════════
// 2. Degenerate layouts
// ══════════════════════════════════════════════════════════

#[test]
fn decode_without_index_bits() {
    let config = CacheConfig {
        index_bits: 0,
        tag_bits: 14,
        offset_bits: 2,
    };
    let decoded = decode(0xFFFF, &config);
    assert_eq!(decoded.index, 0);
    assert_eq!(decoded.offset, 3);
    assert_eq!(decoded.tag, 0x3FFF);
}

#[test]
fn decode_without_tag_bits() {
    let config = CacheConfig {
        index_bits: 10,
        tag_bits: 0,
        offset_bits: 6,
    };
    let decoded = decode(0xFFFF, &config);
    assert_eq!(decoded.tag, 0);
    assert_eq!(decoded.index, 0x3FF);
    assert_eq!(decoded.offset, 0x3F);
}

// ══════════════════════════════════════════════════════════
// 3. Block helpers
// ══════════════════════════════════════════════════════════

#[test]
fn block_geometry() {
    assert_eq!(DM_8X8.block_size(), 8);
    assert_eq!(DM_8X8.num_slots(), 8);
    assert_eq!(DM_8X8.block_base(0x1F), 0x18);
    assert_eq!(DM_8X8.block_base(0x18), 0x18);
}

proptest! {
    /// Fields stay within their widths and reassemble into the truncated address.
    #[test]
    fn decode_fields_reassemble(
        address in any::<u32>(),
        index_bits in 0u32..=8,
        offset_bits in 2u32..=8,
    ) {
        let config = CacheConfig {
            index_bits,
            offset_bits,
            tag_bits: ADDRESS_WIDTH - index_bits - offset_bits,
        };
        let decoded = decode(address, &config);

        prop_assert!(decoded.offset < 1 << offset_bits);
        prop_assert!(decoded.index < 1 << index_bits);
        prop_assert!(decoded.tag < 1 << config.tag_bits);
        prop_assert_eq!(decoded.compose(&config), address & ADDRESS_MASK);
    }
}
