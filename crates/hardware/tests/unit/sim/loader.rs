//! # Request Loading Tests
//!
//! This module contains unit tests for CSV request parsing and for loading
//! request files from disk.

use std::io::Write;

use cachesim_core::common::data::Request;
use cachesim_core::common::error::SimError;
use cachesim_core::sim::loader::{load_requests, parse_requests};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::NamedTempFile;

/// Helper function to create a temporary request file.
fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_parse_reads_and_writes() {
    let requests = parse_requests("R,0x10,0\nW,1f,42\n").unwrap();
    assert_eq!(requests, vec![Request::read(0x10), Request::write(0x1F, 42)]);
}

#[test]
fn test_parse_is_lenient_about_case_and_spacing() {
    let requests = parse_requests("r, 0X0A ,0\n  w,ff, 7  \n").unwrap();
    assert_eq!(requests, vec![Request::read(0xA), Request::write(0xFF, 7)]);
}

#[test]
fn test_read_data_is_ignored() {
    let requests = parse_requests("R,0,123\nR,4\n").unwrap();
    assert_eq!(requests, vec![Request::read(0), Request::read(4)]);
}

#[test]
fn test_negative_write_data_wraps() {
    let requests = parse_requests("W,0,-1\nW,4,-2147483648").unwrap();
    assert_eq!(requests[0].data, u32::MAX);
    assert_eq!(requests[1].data, 0x8000_0000);
}

#[test]
fn test_blank_lines_are_skipped() {
    let requests = parse_requests("\nR,0,0\n\n   \nW,4,1\n").unwrap();
    assert_eq!(requests.len(), 2);
}

#[test]
fn test_empty_input() {
    assert!(parse_requests("").unwrap().is_empty());
}

#[rstest]
#[case::unknown_type("X,0,0")]
#[case::missing_address("R")]
#[case::bad_address("R,zz,0")]
#[case::write_without_data("W,0")]
#[case::non_numeric_data("W,0,abc")]
#[case::data_too_large("W,0,4294967296")]
#[case::data_too_small("W,0,-2147483649")]
#[case::extra_field("R,0,0,0")]
fn test_malformed_line_rejected(#[case] line: &str) {
    let err = parse_requests(line).unwrap_err();
    assert!(
        matches!(err, SimError::Parse { line: 1, .. }),
        "unexpected error {err:?}"
    );
}

#[test]
fn test_error_line_number_counts_blank_lines() {
    let err = parse_requests("R,0,0\n\nQ,0,0\n").unwrap_err();
    assert!(matches!(err, SimError::Parse { line: 3, .. }));
}

#[test]
fn test_load_requests_from_file() {
    let file = create_temp_csv("W,0x100,5\nR,0x100,0\n");
    let requests = load_requests(file.path()).unwrap();
    assert_eq!(requests, vec![Request::write(0x100, 5), Request::read(0x100)]);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_requests(dir.path().join("missing.csv")).unwrap_err();
    assert!(matches!(err, SimError::Io(_)));
}
