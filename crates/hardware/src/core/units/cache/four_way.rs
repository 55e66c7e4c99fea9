//! Four-Way Set-Associative LRU Cache.
//!
//! The index bits select one of `2^index_bits` independent sets; each set holds
//! exactly four ways looked up by tag. Hits promote the way to most recently used;
//! misses evict the least recently used way, refill it from memory, and promote it.
//!
//! The way count is the fixed constant [`WAYS_PER_SET`]. It does not scale with the
//! tag width or any other geometry parameter.

use tracing::debug;

use super::policies::{LruPolicy, ReplacementPolicy};
use super::{CacheBlock, CachePolicy, spilled_bytes, visible_address};
use crate::common::addr::{CacheConfig, DecodedAddress};
use crate::common::constants::WAYS_PER_SET;
use crate::soc::memory::MainMemory;

/// Four-way set-associative cache with LRU replacement.
#[derive(Clone, Debug)]
pub struct FourWayLruCache {
    sets: Vec<[CacheBlock; WAYS_PER_SET]>,
    policy: LruPolicy<WAYS_PER_SET>,
    memory: MainMemory,
}

impl FourWayLruCache {
    /// Creates a cache of `2^index_bits` empty sets.
    ///
    /// # Arguments
    ///
    /// * `config` - Address field widths (set count and block size).
    /// * `memory` - Backing main memory.
    pub fn new(config: &CacheConfig, memory: MainMemory) -> Self {
        let block_size = config.block_size();
        let num_sets = config.num_slots();
        Self {
            sets: (0..num_sets)
                .map(|_| std::array::from_fn(|_| CacheBlock::new(block_size)))
                .collect(),
            policy: LruPolicy::new(num_sets),
            memory,
        }
    }

    /// Number of sets in the cache.
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Recency order of the ways in `set`, most recently used first.
    pub fn recency(&self, set: usize) -> &[usize; WAYS_PER_SET] {
        self.policy.recency(set)
    }

    /// Consumes the cache and returns its backing memory.
    pub fn into_memory(self) -> MainMemory {
        self.memory
    }

    /// Locates the way holding `address`, evicting the LRU way on a miss.
    ///
    /// # Returns
    ///
    /// A tuple `(set, way, offset, hit)`. The way is promoted to MRU either way.
    fn lookup(&mut self, address: u32, config: &CacheConfig) -> (usize, usize, usize, bool) {
        let decoded = DecodedAddress::new(address, config);
        let set_idx = decoded.index as usize;
        let set = &mut self.sets[set_idx];

        let (way, hit) = match set.iter().position(|block| block.holds(decoded.tag)) {
            Some(way) => (way, true),
            None => {
                let victim = self.policy.get_victim(set_idx);
                let block = &mut set[victim];
                let base = config.block_base(address);
                debug!(
                    set = set_idx,
                    way = victim,
                    evicted_tag = block.valid.then_some(block.tag),
                    new_tag = decoded.tag,
                    base = format_args!("{base:#x}"),
                    "lru fill"
                );
                block.fill(&self.memory, base, decoded.tag);
                (victim, false)
            }
        };
        self.policy.update(set_idx, way);
        (set_idx, way, decoded.offset as usize, hit)
    }

    /// Copies bytes that spilled past the written block into the way holding them, if any.
    ///
    /// Replacement state is left alone; the spill is not an access to the following block.
    fn sync_spill(&mut self, address: u32, offset: usize, word: u32, config: &CacheConfig) {
        for (byte_address, byte) in spilled_bytes(address, offset, config.block_size(), word) {
            let decoded = DecodedAddress::new(byte_address, config);
            if let Some(block) = self
                .sets
                .get_mut(decoded.index as usize)
                .and_then(|set| set.iter_mut().find(|block| block.holds(decoded.tag)))
            {
                block.patch_byte(decoded.offset as usize, byte);
            }
        }
    }
}

impl CachePolicy for FourWayLruCache {
    fn read(&mut self, address: u32, config: &CacheConfig) -> (u32, bool) {
        let address = visible_address(address);
        let (set, way, offset, hit) = self.lookup(address, config);
        let word = self.sets[set][way].read_word(&self.memory, address, offset);
        (word, hit)
    }

    fn write(&mut self, address: u32, config: &CacheConfig, word: u32) -> bool {
        let address = visible_address(address);
        let (set, way, offset, hit) = self.lookup(address, config);
        self.sets[set][way].write_word(&mut self.memory, address, offset, word);
        self.sync_spill(address, offset, word, config);
        hit
    }

    fn contains(&self, address: u32, config: &CacheConfig) -> bool {
        let decoded = DecodedAddress::new(address, config);
        self.sets
            .get(decoded.index as usize)
            .is_some_and(|set| set.iter().any(|block| block.holds(decoded.tag)))
    }

    fn memory(&self) -> &MainMemory {
        &self.memory
    }

    fn memory_mut(&mut self) -> &mut MainMemory {
        &mut self.memory
    }
}
