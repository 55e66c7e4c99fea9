//! Cache Simulator.
//!
//! This module implements the two cache organizations in front of main memory:
//! a direct-mapped cache and a four-way set-associative cache with LRU replacement.
//! Both move 32-bit little-endian words, write through to memory on every store,
//! and fill a whole block from memory on every miss.

/// Direct-mapped cache (one line per index).
pub mod direct_mapped;

/// Four-way set-associative cache with LRU replacement.
pub mod four_way;

/// Cache replacement policy implementations (LRU).
pub mod policies;

use tracing::warn;

pub use self::direct_mapped::DirectMappedCache;
pub use self::four_way::FourWayLruCache;
use crate::common::addr::CacheConfig;
use crate::common::constants::{ADDRESS_MASK, WORD_BYTES};
use crate::config::CacheOrganization;
use crate::soc::memory::MainMemory;

/// Read/write interface shared by both cache organizations.
///
/// Hit and miss accounting is left to the caller; each access only reports whether it hit.
pub trait CachePolicy {
    /// Reads the word at `address`.
    ///
    /// # Returns
    ///
    /// A tuple `(word, hit)`. On a miss the block has been filled before the word is read.
    fn read(&mut self, address: u32, config: &CacheConfig) -> (u32, bool);

    /// Writes `word` at `address`, through to main memory.
    ///
    /// # Returns
    ///
    /// `true` on a hit. On a miss the block has been filled before the word is written.
    fn write(&mut self, address: u32, config: &CacheConfig, word: u32) -> bool;

    /// Returns `true` if the block containing `address` is resident. Does not touch
    /// replacement state.
    fn contains(&self, address: u32, config: &CacheConfig) -> bool;

    /// Read-only view of the backing memory.
    fn memory(&self) -> &MainMemory;

    /// Mutable access to the backing memory, bypassing the cache.
    fn memory_mut(&mut self) -> &mut MainMemory;
}

/// A cache of either organization, dispatching to the concrete implementation.
#[derive(Clone, Debug)]
pub enum Cache {
    /// Direct-mapped cache.
    DirectMapped(DirectMappedCache),
    /// Four-way set-associative LRU cache.
    FourWay(FourWayLruCache),
}

impl Cache {
    /// Creates an empty cache of the requested organization.
    ///
    /// # Arguments
    ///
    /// * `organization` - Cache organization.
    /// * `config` - Address field widths; the index width fixes the number of lines or sets.
    /// * `memory` - Main memory handed over to the cache for the run.
    pub fn new(organization: CacheOrganization, config: &CacheConfig, memory: MainMemory) -> Self {
        match organization {
            CacheOrganization::DirectMapped => {
                Self::DirectMapped(DirectMappedCache::new(config, memory))
            }
            CacheOrganization::FourWay => Self::FourWay(FourWayLruCache::new(config, memory)),
        }
    }

    /// Consumes the cache and returns its backing memory.
    pub fn into_memory(self) -> MainMemory {
        match self {
            Self::DirectMapped(cache) => cache.into_memory(),
            Self::FourWay(cache) => cache.into_memory(),
        }
    }
}

impl CachePolicy for Cache {
    fn read(&mut self, address: u32, config: &CacheConfig) -> (u32, bool) {
        match self {
            Self::DirectMapped(cache) => cache.read(address, config),
            Self::FourWay(cache) => cache.read(address, config),
        }
    }

    fn write(&mut self, address: u32, config: &CacheConfig, word: u32) -> bool {
        match self {
            Self::DirectMapped(cache) => cache.write(address, config, word),
            Self::FourWay(cache) => cache.write(address, config, word),
        }
    }

    fn contains(&self, address: u32, config: &CacheConfig) -> bool {
        match self {
            Self::DirectMapped(cache) => cache.contains(address, config),
            Self::FourWay(cache) => cache.contains(address, config),
        }
    }

    fn memory(&self) -> &MainMemory {
        match self {
            Self::DirectMapped(cache) => cache.memory(),
            Self::FourWay(cache) => cache.memory(),
        }
    }

    fn memory_mut(&mut self) -> &mut MainMemory {
        match self {
            Self::DirectMapped(cache) => cache.memory_mut(),
            Self::FourWay(cache) => cache.memory_mut(),
        }
    }
}

/// Merges four bytes at consecutive offsets into a word (little-endian).
#[inline]
pub const fn merge_word(bytes: [u8; WORD_BYTES]) -> u32 {
    u32::from_le_bytes(bytes)
}

/// Splits a word into four bytes for consecutive offsets (little-endian).
#[inline]
pub const fn split_word(word: u32) -> [u8; WORD_BYTES] {
    word.to_le_bytes()
}

/// Truncates a request address to the cache's address width.
fn visible_address(address: u32) -> u32 {
    let visible = address & ADDRESS_MASK;
    if visible != address {
        warn!(
            address = format_args!("{address:#x}"),
            truncated = format_args!("{visible:#x}"),
            "request address wider than the cache address"
        );
    }
    visible
}

/// Bytes of a word written at `offset` that land past the end of its block.
///
/// Yields `(address, byte)` pairs within the address space; these bytes went only to
/// memory, so any resident copy of the following block must be patched with them.
fn spilled_bytes(
    address: u32,
    offset: usize,
    block_size: usize,
    word: u32,
) -> impl Iterator<Item = (u32, u8)> {
    split_word(word)
        .into_iter()
        .enumerate()
        .filter(move |&(i, _)| offset + i >= block_size)
        .map(move |(i, byte)| (address.wrapping_add(i as u32), byte))
        .filter(|&(byte_address, _)| byte_address <= ADDRESS_MASK)
}

/// Cache line entry: block data plus tag and validity.
///
/// Allocated once at construction; a miss overwrites the contents in place.
#[derive(Clone, Debug, PartialEq, Eq)]
struct CacheBlock {
    tag: u32,
    valid: bool,
    data: Box<[u8]>,
}

impl CacheBlock {
    fn new(block_size: usize) -> Self {
        Self {
            tag: 0,
            valid: false,
            data: vec![0; block_size].into_boxed_slice(),
        }
    }

    #[inline]
    fn holds(&self, tag: u32) -> bool {
        self.valid && self.tag == tag
    }

    /// Fetches the whole block starting at `base` and marks the line valid.
    fn fill(&mut self, memory: &MainMemory, base: u32, tag: u32) {
        memory.read_block(base, &mut self.data);
        self.tag = tag;
        self.valid = true;
    }

    /// Reads the word at `offset`; bytes past the end of the block come from memory.
    fn read_word(&self, memory: &MainMemory, address: u32, offset: usize) -> u32 {
        let mut bytes = [0u8; WORD_BYTES];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = match self.data.get(offset + i) {
                Some(&cached) => cached,
                None => memory.read_u8(address.wrapping_add(i as u32)),
            };
        }
        merge_word(bytes)
    }

    /// Writes the word at `offset` into the block and through to memory.
    fn write_word(&mut self, memory: &mut MainMemory, address: u32, offset: usize, word: u32) {
        for (i, byte) in split_word(word).into_iter().enumerate() {
            if let Some(cached) = self.data.get_mut(offset + i) {
                *cached = byte;
            }
            memory.write_u8(address.wrapping_add(i as u32), byte);
        }
    }

    /// Overwrites one cached byte, keeping a resident block in step with memory.
    fn patch_byte(&mut self, offset: usize, byte: u8) {
        if let Some(cached) = self.data.get_mut(offset) {
            *cached = byte;
        }
    }
}
