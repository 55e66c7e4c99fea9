//! Four-Way LRU Cache Unit Tests.
//!
//! Verifies set filling, least-recently-used eviction, set independence, and
//! write-through of the four-way set-associative cache.
//!
//! Default geometry: 8 lines of 4 bytes, so 2 sets of 4 ways.
//!   - offset = addr[1:0]
//!   - set    = addr[2]
//!   - tag    = addr[15:3]
//!
//! Addresses 0x0, 0x8, 0x10, 0x18, 0x20 all land in set 0 with distinct tags.

use cachesim_core::common::addr::CacheConfig;
use cachesim_core::common::constants::WAYS_PER_SET;
use cachesim_core::config::CacheOrganization;
use cachesim_core::core::units::cache::{Cache, CachePolicy, FourWayLruCache};
use cachesim_core::soc::MainMemory;
use pretty_assertions::assert_eq;

use crate::common::{cache_config, four_way};

const SET0: [u32; 5] = [0x0, 0x8, 0x10, 0x18, 0x20];

fn test_config() -> CacheConfig {
    cache_config(&four_way(8, 4))
}

fn test_cache() -> FourWayLruCache {
    FourWayLruCache::new(&test_config(), MainMemory::new())
}

// ══════════════════════════════════════════════════════════
// 1. Filling a set
// ══════════════════════════════════════════════════════════

#[test]
fn geometry() {
    let cache = test_cache();
    assert_eq!(cache.num_sets(), 2);

    let larger = FourWayLruCache::new(&cache_config(&four_way(16, 8)), MainMemory::new());
    assert_eq!(larger.num_sets(), 4);
}

#[test]
fn four_blocks_fit_in_one_set() {
    let config = test_config();
    let mut cache = test_cache();

    for &addr in &SET0[..WAYS_PER_SET] {
        assert!(!cache.read(addr, &config).1, "cold miss at {addr:#x}");
    }
    for &addr in &SET0[..WAYS_PER_SET] {
        assert!(cache.read(addr, &config).1, "resident at {addr:#x}");
    }
}

#[test]
fn empty_ways_fill_from_highest_index() {
    let config = test_config();
    let mut cache = test_cache();

    let _ = cache.read(SET0[0], &config);
    assert_eq!(cache.recency(0), &[3, 0, 1, 2]);
    let _ = cache.read(SET0[1], &config);
    assert_eq!(cache.recency(0), &[2, 3, 0, 1]);
}

#[test]
fn miss_miss_hit_across_sets() {
    let config = test_config();
    let mut cache = test_cache();

    // 0x0 is in set 0, 0x4 in set 1.
    assert!(!cache.read(0x0, &config).1);
    assert!(!cache.read(0x4, &config).1);
    assert!(cache.read(0x0, &config).1);
}

// ══════════════════════════════════════════════════════════
// 2. LRU eviction
// ══════════════════════════════════════════════════════════

/// Fill w1..w4, touch w1 again, then a fifth block evicts w2.
#[test]
fn fifth_block_evicts_least_recently_used() {
    let config = test_config();
    let mut cache = test_cache();

    for &addr in &SET0[..4] {
        let _ = cache.read(addr, &config);
    }
    assert!(cache.read(SET0[0], &config).1);
    assert!(!cache.read(SET0[4], &config).1);

    assert!(cache.contains(SET0[0], &config));
    assert!(!cache.contains(SET0[1], &config));
    assert!(cache.contains(SET0[2], &config));
    assert!(cache.contains(SET0[3], &config));
    assert!(cache.contains(SET0[4], &config));
}

#[test]
fn writes_update_recency() {
    let config = test_config();
    let mut cache = test_cache();

    for &addr in &SET0[..4] {
        let _ = cache.read(addr, &config);
    }
    assert!(cache.write(SET0[0], &config, 1));
    assert!(cache.write(SET0[1], &config, 2));
    let _ = cache.read(SET0[4], &config);

    assert!(!cache.contains(SET0[2], &config));
    assert!(cache.contains(SET0[0], &config));
    assert!(cache.contains(SET0[1], &config));
}

#[test]
fn contains_does_not_touch_recency() {
    let config = test_config();
    let mut cache = test_cache();

    for &addr in &SET0[..4] {
        let _ = cache.read(addr, &config);
    }
    let before = *cache.recency(0);
    assert!(cache.contains(SET0[0], &config));
    assert_eq!(cache.recency(0), &before);
}

#[test]
fn sets_are_independent() {
    let config = test_config();
    let mut cache = test_cache();

    for &addr in &SET0[..4] {
        let _ = cache.read(addr, &config);
    }
    // Five blocks in set 1 leave set 0 untouched.
    for addr in [0x4, 0xC, 0x14, 0x1C, 0x24] {
        assert!(!cache.read(addr, &config).1);
    }
    for &addr in &SET0[..4] {
        assert!(cache.contains(addr, &config));
    }
}

// ══════════════════════════════════════════════════════════
// 3. Data path
// ══════════════════════════════════════════════════════════

#[test]
fn write_through_survives_eviction() {
    let config = test_config();
    let mut cache = test_cache();

    assert!(!cache.write(SET0[0], &config, 0xCAFE));
    assert_eq!(cache.memory().read_u32(SET0[0]), 0xCAFE);

    for &addr in &SET0[1..] {
        let _ = cache.read(addr, &config);
    }
    assert!(!cache.contains(SET0[0], &config));
    assert_eq!(cache.read(SET0[0], &config), (0xCAFE, false));
}

#[test]
fn fill_reads_seeded_memory() {
    let config = test_config();
    let mut memory = MainMemory::new();
    memory.write_u32(0x18, 0x0102_0304);
    let mut cache = FourWayLruCache::new(&config, memory);

    assert_eq!(cache.read(0x18, &config), (0x0102_0304, false));
    assert_eq!(cache.read(0x18, &config), (0x0102_0304, true));
}

#[test]
fn unaligned_write_updates_resident_next_block() {
    let config = test_config();
    let mut cache = test_cache();

    // 0x4 is the block after 0x0 and lives in set 1.
    assert_eq!(cache.read(0x4, &config), (0, false));
    let recency = *cache.recency(1);
    assert!(!cache.write(0x2, &config, 0xAABB_CCDD));

    assert_eq!(*cache.recency(1), recency);
    assert_eq!(cache.memory().read_u32(0x4), 0xAABB);
    assert_eq!(cache.read(0x4, &config), (0xAABB, true));
}

#[test]
fn unaligned_write_at_top_of_memory_is_truncated() {
    let config = test_config();
    let mut cache = test_cache();

    // The block after 0xFFFC would start at 0x1_0000, outside the address space.
    let _ = cache.read(0x0, &config);
    let _ = cache.write(0xFFFE, &config, 0xAABB_CCDD);
    assert_eq!(cache.read(0x0, &config), (0, true));
    assert_eq!(cache.read(0xFFFC, &config), (0xCCDD_0000, true));
}

#[test]
fn cache_enum_dispatches_to_four_way() {
    let config = test_config();
    let mut cache = Cache::new(CacheOrganization::FourWay, &config, MainMemory::new());

    assert!(matches!(cache, Cache::FourWay(_)));
    for &addr in &SET0[..4] {
        let _ = cache.write(addr, &config, addr);
    }
    for &addr in &SET0[..4] {
        assert_eq!(cache.read(addr, &config), (addr, true));
    }
    assert_eq!(cache.into_memory().read_u32(0x10), 0x10);
}
