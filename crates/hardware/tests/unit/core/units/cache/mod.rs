//! Cache organization tests.


/// Four-way LRU cache: set filling, eviction order, set independence.
pub mod four_way;
