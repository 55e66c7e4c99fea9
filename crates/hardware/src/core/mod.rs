//! Cache model.
//!
//! This module contains the cache organizations and the clocked engine that applies
//! access latency to them and counts hits and misses.

/// Clocked timing engine, engine signals, and hardware cost estimation.
pub mod timing;

/// Functional units (the cache and its replacement policy).
pub mod units;
