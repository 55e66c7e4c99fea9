//! Request Loader.
//!
//! This module turns a request file into the request stream fed to the simulator. It performs:
//! 1. **File loading:** Reads the whole CSV file from disk.
//! 2. **Parsing:** One request per line, `R,<hex addr>,<data>` or `W,<hex addr>,<data>`.
//!
//! Addresses are hexadecimal with an optional `0x` prefix. Data is decimal; negative values
//! wrap to their 32-bit two's complement, and the data of a read is ignored. Blank lines are
//! skipped.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::common::data::Request;
use crate::common::error::SimError;

/// Reads and parses a request file.
///
/// # Errors
///
/// Returns [`SimError::Io`] if the file cannot be read, or [`SimError::Parse`] naming the
/// first malformed line.
pub fn load_requests(path: impl AsRef<Path>) -> Result<Vec<Request>, SimError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let requests = parse_requests(&content)?;
    debug!(path = %path.display(), count = requests.len(), "requests loaded");
    Ok(requests)
}

/// Parses the request lines of a CSV document.
///
/// # Errors
///
/// Returns [`SimError::Parse`] with the 1-based number of the first malformed line.
pub fn parse_requests(content: &str) -> Result<Vec<Request>, SimError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            parse_line(line).map_err(|reason| SimError::Parse {
                line: idx + 1,
                reason,
            })
        })
        .collect()
}

fn parse_line(line: &str) -> Result<Request, String> {
    let mut fields = line.split(',').map(str::trim);

    let kind = fields.next().unwrap_or_default();
    let addr_field = fields
        .next()
        .ok_or_else(|| format!("missing address in {line:?}"))?;
    let data_field = fields.next().unwrap_or_default();
    if fields.next().is_some() {
        return Err(format!("too many fields in {line:?}"));
    }

    let addr = parse_address(addr_field)?;
    match kind {
        "R" | "r" => Ok(Request::read(addr)),
        "W" | "w" => Ok(Request::write(addr, parse_data(data_field)?)),
        other => Err(format!("unknown request type {other:?}, expected R or W")),
    }
}

fn parse_address(field: &str) -> Result<u32, String> {
    let digits = field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
        .unwrap_or(field);
    u32::from_str_radix(digits, 16).map_err(|err| format!("invalid address {field:?}: {err}"))
}

fn parse_data(field: &str) -> Result<u32, String> {
    if field.is_empty() {
        return Err("write request without data".to_string());
    }
    let value: i64 = field
        .parse()
        .map_err(|err| format!("invalid data {field:?}: {err}"))?;
    if value < i64::from(i32::MIN) || value > i64::from(u32::MAX) {
        return Err(format!("data {value} does not fit in 32 bits"));
    }
    Ok(value as u32)
}
