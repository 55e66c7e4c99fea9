//! Direct-Mapped Cache.
//!
//! Every address maps to exactly one line, selected by its index bits. A resident block
//! with a different tag is replaced on the spot; there is no replacement policy.

use tracing::debug;

use super::{CacheBlock, CachePolicy, spilled_bytes, visible_address};
use crate::common::addr::{CacheConfig, DecodedAddress};
use crate::soc::memory::MainMemory;

/// Direct-mapped cache with `2^index_bits` lines.
#[derive(Clone, Debug)]
pub struct DirectMappedCache {
    lines: Vec<CacheBlock>,
    memory: MainMemory,
}

impl DirectMappedCache {
    /// Creates a cache with one empty line per index value.
    ///
    /// # Arguments
    ///
    /// * `config` - Address field widths (line count and block size).
    /// * `memory` - Backing main memory.
    pub fn new(config: &CacheConfig, memory: MainMemory) -> Self {
        Self {
            lines: vec![CacheBlock::new(config.block_size()); config.num_slots()],
            memory,
        }
    }

    /// Number of lines in the cache.
    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    /// Consumes the cache and returns its backing memory.
    pub fn into_memory(self) -> MainMemory {
        self.memory
    }

    /// Locates the line for `address`, filling it on a miss.
    ///
    /// # Returns
    ///
    /// A tuple `(line, offset, hit)`.
    fn lookup(&mut self, address: u32, config: &CacheConfig) -> (usize, usize, bool) {
        let decoded = DecodedAddress::new(address, config);
        let line_idx = decoded.index as usize;
        let line = &mut self.lines[line_idx];

        let hit = line.holds(decoded.tag);
        if !hit {
            let base = config.block_base(address);
            debug!(
                line = line_idx,
                old_tag = line.valid.then_some(line.tag),
                new_tag = decoded.tag,
                base = format_args!("{base:#x}"),
                "direct-mapped fill"
            );
            line.fill(&self.memory, base, DecodedAddress::new(base, config).tag);
        }
        (line_idx, decoded.offset as usize, hit)
    }

    /// Copies bytes that spilled past the written block into the line holding them, if any.
    fn sync_spill(&mut self, address: u32, offset: usize, word: u32, config: &CacheConfig) {
        for (byte_address, byte) in spilled_bytes(address, offset, config.block_size(), word) {
            let decoded = DecodedAddress::new(byte_address, config);
            if let Some(line) = self
                .lines
                .get_mut(decoded.index as usize)
                .filter(|line| line.holds(decoded.tag))
            {
                line.patch_byte(decoded.offset as usize, byte);
            }
        }
    }
}

impl CachePolicy for DirectMappedCache {
    fn read(&mut self, address: u32, config: &CacheConfig) -> (u32, bool) {
        let address = visible_address(address);
        let (line, offset, hit) = self.lookup(address, config);
        let word = self.lines[line].read_word(&self.memory, address, offset);
        (word, hit)
    }

    fn write(&mut self, address: u32, config: &CacheConfig, word: u32) -> bool {
        let address = visible_address(address);
        let (line, offset, hit) = self.lookup(address, config);
        self.lines[line].write_word(&mut self.memory, address, offset, word);
        self.sync_spill(address, offset, word, config);
        hit
    }

    fn contains(&self, address: u32, config: &CacheConfig) -> bool {
        let decoded = DecodedAddress::new(address, config);
        self.lines
            .get(decoded.index as usize)
            .is_some_and(|line| line.holds(decoded.tag))
    }

    fn memory(&self) -> &MainMemory {
        &self.memory
    }

    fn memory_mut(&mut self) -> &mut MainMemory {
        &mut self.memory
    }
}
