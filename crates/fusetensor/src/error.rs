//! Error types for tensor operations.

use thiserror::Error;

/// Errors produced by tensor construction, access, evaluation, and the
/// matrix algorithms.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TensorError {
    /// Two operands (or an expression and its destination) disagree in rank.
    #[error("rank mismatch: expected {expected}, got {actual}")]
    RankMismatch { expected: usize, actual: usize },

    /// Two operands disagree in extent along `axis`.
    #[error("extent mismatch on axis {axis}: {left} vs {right}")]
    ExtentMismatch {
        axis: usize,
        left: usize,
        right: usize,
    },

    /// An index is out of range along `axis`.
    #[error("index {index} out of bounds for axis {axis} with extent {extent}")]
    IndexOutOfBounds {
        axis: usize,
        index: usize,
        extent: usize,
    },

    /// A flat (linear) index is outside the logical element count.
    #[error("flat index {index} out of bounds for {len} logical elements")]
    FlatIndexOutOfBounds { index: usize, len: usize },

    /// The number of indices supplied does not match the tensor rank.
    #[error("wrong number of indices: expected {expected}, got {actual}")]
    WrongNumberOfIndices { expected: usize, actual: usize },

    /// A permutation is not a rearrangement of `0..rank`.
    #[error("invalid permutation {perm:?} for rank {rank}")]
    InvalidPermutation { perm: Vec<usize>, rank: usize },

    /// An axis argument exceeds the operand's rank.
    #[error("axis {axis} out of range for rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    /// The data supplied to a constructor has the wrong length.
    #[error("data length mismatch: shape needs {expected} elements, got {actual}")]
    DataLengthMismatch { expected: usize, actual: usize },

    /// An operation requires all extents equal (a square matrix, or a
    /// hypercube for higher ranks).
    #[error("extents must all be equal, got {shape:?}")]
    NotSquare { shape: Vec<usize> },

    /// A matrix algorithm requires a symmetric input.
    #[error("matrix is not symmetric")]
    NotSymmetric,

    /// A pivot fell below tolerance during inversion.
    #[error("matrix is singular (detected during {stage})")]
    Singular { stage: &'static str },

    /// Cholesky factorization failed on a non-positive diagonal residual.
    #[error("matrix is not positive definite")]
    NotPositiveDefinite,
}
