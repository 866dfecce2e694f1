//! fusetensor: fixed-shape tensors with lazy, SIMD-friendly arithmetic.
//!
//! Arithmetic operators build expression trees instead of computing; a whole
//! tree is evaluated in a single pass when assigned into a destination
//! tensor. Storage is row-major with the last axis padded to the vector
//! width of the build target, so evaluation runs in whole vector chunks and
//! transposition is a stride reinterpretation rather than a copy.
//!
//! ```
//! use fusetensor::FusedTensor;
//!
//! let a = FusedTensor::<f64>::from_vec(&[2, 3], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?;
//! let b = FusedTensor::<f64>::filled(&[2, 3], 10.0);
//!
//! // Nothing is computed here; `eval` walks the tree once.
//! let c = ((&a + &b) * 2.0).eval()?;
//! assert_eq!(c.get(&[1, 2])?, 32.0);
//! # Ok::<(), fusetensor::TensorError>(())
//! ```
//!
//! The main pieces:
//!
//! - [`FusedTensor`]: dense tensor over a [`storage::Buffer`] backend
//!   (heap-aligned by default, [`InlineTensor`] for allocation-free use).
//! - [`expr`]: lazy expression nodes, including axis-reordered views.
//! - [`kernel`]: the microkernel abstraction; AVX2 on capable x86_64 builds,
//!   a scalar fallback everywhere else.
//! - [`contract`] and [`linalg`]: single-axis contraction, Gauss-Jordan
//!   inversion, Cholesky factorization, and structural predicates.

pub mod algebra;
pub mod config;
pub mod contract;
pub mod element;
pub mod error;
pub mod expr;
pub mod kernel;
pub mod layout;
pub mod linalg;
pub mod padding;
pub mod storage;
pub mod tensor;


pub use algebra::Algebraic;
pub use contract::{einsum, matmul};
pub use element::Element;
pub use error::TensorError;
pub use expr::{
    max, max_scalar, min, min_scalar, reduce_max, reduce_min, reduce_sum, Expr, Expression,
    PermutedView,
};
pub use kernel::Microkernel;
pub use layout::{Shape, StridedLayout};
pub use linalg::{
    cholesky, definiteness, inverse, is_lower_triangular, is_orthogonal, is_symmetric,
    is_upper_triangular, Definiteness,
};
pub use storage::{AlignedBuffer, Buffer, InlineBuffer};
pub use tensor::{FusedTensor, InlineTensor};
