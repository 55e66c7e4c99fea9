//! Matrix-Multiplication Reference Workload.
//!
//! Computes `C = A x B` for two 4x4 matrices entirely through cache requests and checks
//! every value read back. The request stream:
//!
//! 1. Initialization: writes A, B, and a zeroed C into memory.
//! 2. For every `C[i][j]` and every `k`: read `A[i][k]`, read `B[k][j]`, read `C[i][j]`,
//!    then write `C[i][j] + A[i][k] * B[k][j]`.
//!
//! The matrices are laid out row-major, one 32-bit word per element, with the three
//! matrices at separate base addresses so they contend for lines in small caches.

use std::fmt;

use tracing::warn;

use super::RunObserver;
use crate::common::data::Request;
use crate::common::error::SimError;
use crate::core::timing::Completion;
use crate::soc::memory::MainMemory;

/// Dimension of the square matrices.
pub const MATRIX_SIZE: usize = 4;

/// A square matrix of words.
pub type Matrix = [[u32; MATRIX_SIZE]; MATRIX_SIZE];

/// Left operand.
pub const MATRIX_A: Matrix = [[3, 7, 4, 12], [6, 18, 8, 1], [5, 23, 3, 41], [29, 17, 5, 1]];

/// Right operand.
pub const MATRIX_B: Matrix = [[19, 13, 49, 22], [4, 21, 37, 34], [50, 0, 8, 14], [26, 7, 13, 0]];

/// Base address of matrix A.
pub const BASE_A: u32 = 0x00;

/// Base address of matrix B.
pub const BASE_B: u32 = 0x74;

/// Base address of matrix C.
pub const BASE_C: u32 = 0xC0;

/// Address of element `(row, col)` of the matrix at `base`.
pub const fn element_address(base: u32, row: usize, col: usize) -> u32 {
    base + ((row * MATRIX_SIZE + col) * 4) as u32
}

/// Returns `A x B` computed directly.
pub fn expected_product() -> Matrix {
    let mut c = [[0u32; MATRIX_SIZE]; MATRIX_SIZE];
    for (i, row) in c.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..MATRIX_SIZE)
                .map(|k| MATRIX_A[i][k].wrapping_mul(MATRIX_B[k][j]))
                .fold(0, u32::wrapping_add);
        }
    }
    c
}

/// A request stream together with the value every read must return.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Workload {
    /// Requests in issue order.
    pub requests: Vec<Request>,
    /// For each request, the word a read must return; `None` for writes.
    pub expected_reads: Vec<Option<u32>>,
}

impl Workload {
    /// Builds the matrix-multiplication request stream.
    pub fn matrix_multiplication() -> Self {
        let mut requests = Vec::new();
        let mut expected_reads = Vec::new();
        let mut push = |request: Request, expected: Option<u32>| {
            requests.push(request);
            expected_reads.push(expected);
        };

        for (base, matrix) in [
            (BASE_A, MATRIX_A),
            (BASE_B, MATRIX_B),
            (BASE_C, [[0; MATRIX_SIZE]; MATRIX_SIZE]),
        ] {
            for (i, row) in matrix.iter().enumerate() {
                for (j, &value) in row.iter().enumerate() {
                    push(Request::write(element_address(base, i, j), value), None);
                }
            }
        }

        for i in 0..MATRIX_SIZE {
            for j in 0..MATRIX_SIZE {
                let mut acc = 0u32;
                for k in 0..MATRIX_SIZE {
                    let a = MATRIX_A[i][k];
                    let b = MATRIX_B[k][j];
                    let c_addr = element_address(BASE_C, i, j);
                    push(Request::read(element_address(BASE_A, i, k)), Some(a));
                    push(Request::read(element_address(BASE_B, k, j)), Some(b));
                    push(Request::read(c_addr), Some(acc));
                    acc = acc.wrapping_add(a.wrapping_mul(b));
                    push(Request::write(c_addr, acc), None);
                }
            }
        }

        Self {
            requests,
            expected_reads,
        }
    }

    /// Creates a checker for this workload.
    pub fn checker(&self) -> WorkloadChecker {
        WorkloadChecker {
            expected_reads: self.expected_reads.clone(),
            completed: 0,
            mismatches: Vec::new(),
        }
    }
}

/// A read that returned the wrong value, or a final matrix entry that is wrong.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mismatch {
    /// Address of the word.
    pub address: u32,
    /// Value the workload requires.
    pub expected: u32,
    /// Value observed.
    pub actual: u32,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "address {:#x}: expected {} but got {}",
            self.address, self.expected, self.actual
        )
    }
}

/// Observer that checks every completed read against the workload.
#[derive(Clone, Debug, Default)]
pub struct WorkloadChecker {
    expected_reads: Vec<Option<u32>>,
    completed: usize,
    mismatches: Vec<Mismatch>,
}

impl WorkloadChecker {
    /// Number of completed requests seen.
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Reads that returned a wrong value so far.
    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    /// Compares matrix C in `memory` against the expected product.
    ///
    /// Only meaningful once the whole workload has completed.
    pub fn verify_memory(&mut self, memory: &MainMemory) -> bool {
        let mut ok = true;
        for (i, row) in expected_product().iter().enumerate() {
            for (j, &expected) in row.iter().enumerate() {
                let address = element_address(BASE_C, i, j);
                let actual = memory.read_u32(address);
                if actual != expected {
                    warn!(address, expected, actual, "matrix C entry wrong in memory");
                    self.mismatches.push(Mismatch {
                        address,
                        expected,
                        actual,
                    });
                    ok = false;
                }
            }
        }
        ok
    }
}

impl RunObserver for WorkloadChecker {
    fn on_complete(&mut self, completion: &Completion) -> Result<(), SimError> {
        let expected = self.expected_reads.get(self.completed).copied().flatten();
        self.completed += 1;

        if let (Some(expected), Some(actual)) = (expected, completion.data) {
            if expected != actual {
                let address = completion.request.addr;
                warn!(address, expected, actual, "workload read returned a wrong value");
                self.mismatches.push(Mismatch {
                    address,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}
