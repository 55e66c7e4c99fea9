//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the way that has not been accessed for the longest time.
//! Each set keeps a fixed-size array of way indices ordered from most to least
//! recently used. When a way is accessed it is rotated to the front (MRU position);
//! the last slot always names the LRU way.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(W) where W is the number of ways (associativity)
//!   - `get_victim()`: O(1)
//! - **Space Complexity:** O(S × W) where S is the number of sets
//! - **Hardware Cost:** One 2-bit age counter per line for four ways (see the cost model)

use super::ReplacementPolicy;
use crate::common::constants::WAYS_PER_SET;

/// LRU policy state for `WAYS`-way sets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LruPolicy<const WAYS: usize = WAYS_PER_SET> {
    /// One recency order per set. Index 0 is MRU, last index is LRU.
    usage: Vec<[usize; WAYS]>,
}

impl<const WAYS: usize> LruPolicy<WAYS> {
    /// Creates a new LRU policy instance.
    ///
    /// Every set starts ordered `[0, 1, .., WAYS - 1]`, so empty ways are filled from
    /// the highest index down.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    pub fn new(sets: usize) -> Self {
        Self {
            usage: vec![std::array::from_fn(|way| way); sets],
        }
    }

    /// Returns the recency order of a set, most recently used first.
    pub fn recency(&self, set: usize) -> &[usize; WAYS] {
        &self.usage[set]
    }
}

impl<const WAYS: usize> ReplacementPolicy for LruPolicy<WAYS> {
    /// Moves `way` to the MRU position, shifting the more recent ways down by one.
    fn update(&mut self, set: usize, way: usize) {
        let order = &mut self.usage[set];
        if let Some(pos) = order.iter().position(|&w| w == way) {
            order[..=pos].rotate_right(1);
        }
    }

    /// Returns the way in the LRU position.
    fn get_victim(&self, set: usize) -> usize {
        self.usage[set][WAYS - 1]
    }
}
