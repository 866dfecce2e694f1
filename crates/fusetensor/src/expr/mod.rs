//! Lazy expression templates.
//!
//! Arithmetic on tensors builds a tree of lightweight nodes instead of
//! computing anything; the whole tree is evaluated in one pass when assigned
//! into a destination (see [`FusedTensor::assign`](crate::tensor::FusedTensor::assign)).
//! Leaves borrow their tensors, so the borrow checker guarantees no
//! expression outlives the data it reads and no destination aliases an
//! operand.
//!
//! [`Expr`] is a thin wrapper that exists to carry the `std::ops`
//! overloads; every node type implements [`Expression`], the evaluation
//! contract.

pub mod binary;
pub mod minmax;
pub mod ops;
pub mod reduce;
pub mod scalar;
pub mod view;

pub use binary::{AddOp, BinOp, BinaryExpr, DivOp, MaxOp, MinOp, MulOp, SubOp};
pub use minmax::{max, max_scalar, min, min_scalar};
pub use reduce::{reduce_max, reduce_min, reduce_sum};
pub use scalar::{ScalarLhs, ScalarRhs};
pub use view::PermutedView;

use crate::algebra::Algebraic;
use crate::element::{Element, Vector};
use crate::error::TensorError;
use crate::storage::AlignedBuffer;
use crate::tensor::FusedTensor;

/// Evaluation contract of an expression node.
///
/// `at` reads one logical element; `at_vector` reads one vector of elements
/// whose first lane sits at `indices` and whose remaining lanes advance
/// along the last axis. Callers only issue `at_vector` for chunks that lie
/// entirely within one padded row, so contiguous nodes can answer with a
/// single vector load while reordered nodes gather lane by lane.
pub trait Expression {
    type Elem: Element;

    fn rank(&self) -> usize;

    fn extent(&self, axis: usize) -> usize;

    fn at(&self, indices: &[usize]) -> Self::Elem;

    fn at_vector(&self, indices: &[usize]) -> Vector<Self::Elem>;

    /// Whether every leaf under this node is read in natural storage order.
    fn is_contiguous(&self) -> bool;

    /// Deferred compatibility check over the whole subtree. Run once per
    /// evaluation, before any element is computed.
    fn validate(&self) -> Result<(), TensorError>;
}

/// Wrapper carrying operator overloads for an expression node.
pub struct Expr<E>(pub(crate) E);

impl<E: Expression> Expr<E> {
    /// Materialize into a freshly allocated tensor.
    pub fn eval(&self) -> Result<FusedTensor<E::Elem, AlignedBuffer<E::Elem>>, TensorError> {
        FusedTensor::from_expr(self)
    }
}

impl<E: Expression> Expression for Expr<E> {
    type Elem = E::Elem;

    fn rank(&self) -> usize {
        self.0.rank()
    }

    fn extent(&self, axis: usize) -> usize {
        self.0.extent(axis)
    }

    fn at(&self, indices: &[usize]) -> Self::Elem {
        self.0.at(indices)
    }

    fn at_vector(&self, indices: &[usize]) -> Vector<Self::Elem> {
        self.0.at_vector(indices)
    }

    fn is_contiguous(&self) -> bool {
        self.0.is_contiguous()
    }

    fn validate(&self) -> Result<(), TensorError> {
        self.0.validate()
    }
}

impl<E: Algebraic> Algebraic for Expr<E> {
    const VECTOR_SPACE: bool = E::VECTOR_SPACE;
    const ALGEBRA: bool = E::ALGEBRA;
    const LIE_GROUP: bool = E::LIE_GROUP;
    const METRIC: bool = E::METRIC;
    const TENSOR: bool = E::TENSOR;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_nodes_and_contiguity() {
        let a = FusedTensor::<f64>::zeros(&[2, 3]);
        let b = FusedTensor::<f64>::zeros(&[2, 3]);
        assert!((&a + &b).is_contiguous());

        let c = FusedTensor::<f64>::zeros(&[3, 2]);
        let view = c.permuted_view(&[1, 0]).unwrap();
        assert!(!view.is_contiguous());
        // Binary contiguity is the AND of its children.
        assert!(!(&a + view).is_contiguous());
    }

    #[test]
    fn scalar_nodes_pass_contiguity_through() {
        let a = FusedTensor::<f64>::zeros(&[2, 3]);
        assert!((&a * 2.0).is_contiguous());
        assert!((1.0 - &a).is_contiguous());

        let b = FusedTensor::<f64>::zeros(&[3, 2]);
        let scaled_view = b.permuted_view(&[1, 0]).unwrap() * 2.0;
        assert!(!scaled_view.is_contiguous());
    }

    #[test]
    fn identity_permutation_view_is_contiguous() {
        let t = FusedTensor::<f64>::zeros(&[2, 3]);
        assert!(t.permuted_view(&[0, 1]).unwrap().is_contiguous());
        assert!(!t.permuted_view(&[1, 0]).unwrap().is_contiguous());
    }

    #[test]
    fn view_composing_back_to_natural_order_is_contiguous() {
        // The view's permutation composes with the tensor's transpose order:
        // transposing the tensor and then viewing it transposed again lands
        // back on the storage order.
        let mut t = FusedTensor::<f64>::zeros(&[2, 3]);
        t.transpose_in_place(&[1, 0]).unwrap();
        assert!(t.permuted_view(&[1, 0]).unwrap().is_contiguous());
        assert!(!t.permuted_view(&[0, 1]).unwrap().is_contiguous());
    }

    #[test]
    fn tensor_leaves_report_their_order() {
        let mut t = FusedTensor::<f64>::zeros(&[2, 3]);
        assert!((&t).is_contiguous());
        t.transpose_in_place(&[1, 0]).unwrap();
        assert!(!(&t).is_contiguous());
    }
}
