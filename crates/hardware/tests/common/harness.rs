use cachesim_core::common::addr::CacheConfig;
use cachesim_core::common::data::Request;
use cachesim_core::config::{CacheOrganization, SimConfig};
use cachesim_core::core::timing::{Completion, StepOutcome, TimingEngine};
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once per test binary; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds a configuration with the standard latencies (cache 2, memory 3) and a
/// generous cycle budget.
pub fn sim_config(policy: CacheOrganization, cache_lines: u32, cache_line_size: u32) -> SimConfig {
    SimConfig {
        cycles: 10_000,
        policy,
        cache_lines,
        cache_line_size,
        cache_latency: 2,
        memory_latency: 3,
    }
}

/// Direct-mapped configuration.
pub fn direct_mapped(cache_lines: u32, cache_line_size: u32) -> SimConfig {
    sim_config(CacheOrganization::DirectMapped, cache_lines, cache_line_size)
}

/// Four-way LRU configuration.
pub fn four_way(cache_lines: u32, cache_line_size: u32) -> SimConfig {
    sim_config(CacheOrganization::FourWay, cache_lines, cache_line_size)
}

/// Address field widths of a configuration that is known to be valid.
pub fn cache_config(config: &SimConfig) -> CacheConfig {
    config.cache_config().unwrap()
}

/// Steps `request` through `engine` until it completes.
///
/// Returns the number of cycles it took and its completion record. Panics if the
/// budget runs out first.
pub fn drive(engine: &mut TimingEngine, request: Request) -> (usize, Completion) {
    let mut steps = 0;
    loop {
        steps += 1;
        match engine.step(request) {
            StepOutcome::Waiting => {}
            StepOutcome::Completed(done) => return (steps, done),
            StepOutcome::Halted => panic!("budget ran out after {steps} cycles"),
        }
    }
}
