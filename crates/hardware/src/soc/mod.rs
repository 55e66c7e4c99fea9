//! Memory side of the simulated system.
//!
//! The cache sits in front of a single flat main memory; there is no bus, interconnect,
//! or device map between them.

/// Main memory model.
pub mod memory;

pub use memory::MainMemory;
