//! Functional units.

/// Direct-mapped and four-way set-associative caches with their replacement policy.
pub mod cache;
