//! Error types for the numeric core.

use thiserror::Error;

/// Hard failures. Soft failures (non-convergence, unbounded LPs) are reported
/// inside the result structs instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumError {
    /// A pivot fell below the singularity threshold after row swapping.
    #[error("singular matrix: pivot {pivot:e} in column {col}")]
    SingularMatrix { pivot: f64, col: usize },

    /// Operand shapes do not fit the operation.
    #[error("dimension mismatch in {op}: expected {expected}, found {found}")]
    DimensionMismatch {
        op: &'static str,
        expected: usize,
        found: usize,
    },

    /// Operation requires a square matrix.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// Tableau simplex needs `b >= 0` (no phase one).
    #[error("negative right-hand side b[{row}] = {value}")]
    NegativeRhs { row: usize, value: f64 },

    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}

/// Result type for numeric-core operations.
pub type Result<T> = std::result::Result<T, NumError>;
