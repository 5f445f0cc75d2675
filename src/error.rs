use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NnError>;

/// Caller-contract violations reported by the matrix engine and the network.
///
/// Shapes are `(rows, cols)`. Vector length errors are reported as column
/// shapes, e.g. an input of length 3 fed to a 2-input network is
/// `ShapeMismatch { expected: (2, 1), actual: (3, 1) }`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NnError {
    #[error("dimension mismatch: cannot multiply {left:?} by {right:?} (rows, cols)")]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("shape mismatch: expected {expected:?}, got {actual:?} (rows, cols)")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("invalid dimensions {rows}x{cols}: rows and columns must be at least 1")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("invalid learning rate {0}: must be finite and positive")]
    InvalidLearningRate(f64),

    #[error("training set is empty")]
    EmptyDataset,

    #[error("training set has {inputs} inputs but {targets} targets")]
    DatasetMismatch { inputs: usize, targets: usize },
}
