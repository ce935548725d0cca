use thiserror::Error;

/// Reasons the normal equation cannot be solved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("the design matrix is empty")]
    Empty,

    #[error("design matrix row #{row} has {actual} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("the design matrix has {rows} rows but there are {targets} targets")]
    LengthMismatch { rows: usize, targets: usize },

    #[error("XᵀX is singular or near-singular (reciprocal condition number: {reciprocal_condition:e})")]
    Singular { reciprocal_condition: f64 },
}
