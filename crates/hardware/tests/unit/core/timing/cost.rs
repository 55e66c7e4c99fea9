//! Gate Count Estimation Tests.
//!
//! Verifies the closed-form hardware cost of both cache organizations against
//! hand-computed breakdowns.

use cachesim_core::config::CacheOrganization;
use cachesim_core::core::timing::GateCount;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// 8 lines of 8 bytes with a 10-bit tag.
#[test]
fn direct_mapped_reference_breakdown() {
    let gates = GateCount::estimate(CacheOrganization::DirectMapped, 8, 8, 10);
    assert_eq!(
        gates,
        GateCount {
            storage: 2048,
            control_logic: 40,
            tag_comparison: 160,
            lru_counters: 0,
            lru_comparators: 0,
            lru_update_logic: 0,
        }
    );
    assert_eq!(gates.total(), 2248);
}

/// 8 lines of 8 bytes with a 12-bit tag; LRU state adds 2-bit counters per line.
#[test]
fn four_way_reference_breakdown() {
    let gates = GateCount::estimate(CacheOrganization::FourWay, 8, 8, 12);
    assert_eq!(
        gates,
        GateCount {
            storage: 2048,
            control_logic: 40,
            tag_comparison: 192,
            lru_counters: 64,
            lru_comparators: 128,
            lru_update_logic: 448,
        }
    );
    assert_eq!(gates.total(), 2920);
}

#[rstest]
#[case(1, 4, 14, 128 + 5 + 28)]
#[case(16, 16, 8, 8192 + 80 + 256)]
#[case(1024, 64, 0, 2_097_152 + 5120)]
fn direct_mapped_totals(
    #[case] lines: usize,
    #[case] line_bytes: usize,
    #[case] tag_bits: usize,
    #[case] expected: usize,
) {
    assert_eq!(
        GateCount::estimate(CacheOrganization::DirectMapped, lines, line_bytes, tag_bits).total(),
        expected
    );
}

#[test]
fn four_way_costs_more_than_direct_mapped() {
    let dm = GateCount::estimate(CacheOrganization::DirectMapped, 16, 8, 10);
    let fw = GateCount::estimate(CacheOrganization::FourWay, 16, 8, 10);
    assert_eq!(fw.total() - dm.total(), 2 * 4 * 16 * (1 + 2 + 7));
}
