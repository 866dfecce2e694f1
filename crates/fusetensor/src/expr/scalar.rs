//! Scalar-operand nodes.
//!
//! Two node types keep operand order without a runtime branch: [`ScalarRhs`]
//! for `expr op scalar`, [`ScalarLhs`] for `scalar op expr`. The distinction
//! matters for subtraction and division; unary negation is expressed as
//! `0 - expr` through [`ScalarLhs`].

use core::marker::PhantomData;

use crate::algebra::Algebraic;
use crate::element::Vector;
use crate::error::TensorError;
use crate::kernel::Microkernel;

use super::binary::BinOp;
use super::Expression;

/// `expr op scalar`, the scalar broadcast across every element.
pub struct ScalarRhs<E: Expression, O> {
    expr: E,
    scalar: E::Elem,
    _op: PhantomData<O>,
}

impl<E, O> ScalarRhs<E, O>
where
    E: Expression + Algebraic,
    O: BinOp,
{
    pub(crate) fn new(expr: E, scalar: E::Elem) -> Self {
        debug_assert!(
            E::VECTOR_SPACE,
            "elementwise arithmetic requires vector-space operands"
        );
        Self {
            expr,
            scalar,
            _op: PhantomData,
        }
    }
}

impl<E, O> Expression for ScalarRhs<E, O>
where
    E: Expression + Algebraic,
    O: BinOp,
{
    type Elem = E::Elem;

    fn rank(&self) -> usize {
        self.expr.rank()
    }

    fn extent(&self, axis: usize) -> usize {
        self.expr.extent(axis)
    }

    #[inline]
    fn at(&self, indices: &[usize]) -> Self::Elem {
        O::apply::<E::Elem>(self.expr.at(indices), self.scalar)
    }

    #[inline]
    fn at_vector(&self, indices: &[usize]) -> Vector<Self::Elem> {
        let splat = <E::Elem as crate::element::Element>::Kernel::splat(self.scalar);
        O::apply_vector::<E::Elem>(self.expr.at_vector(indices), splat)
    }

    fn is_contiguous(&self) -> bool {
        self.expr.is_contiguous()
    }

    fn validate(&self) -> Result<(), TensorError> {
        self.expr.validate()
    }
}

impl<E: Expression + Algebraic, O> Algebraic for ScalarRhs<E, O> {
    const VECTOR_SPACE: bool = E::VECTOR_SPACE;
    const ALGEBRA: bool = E::ALGEBRA;
    const LIE_GROUP: bool = false;
    const METRIC: bool = E::METRIC;
    const TENSOR: bool = E::TENSOR;
}

/// `scalar op expr`, the scalar broadcast on the left.
pub struct ScalarLhs<E: Expression, O> {
    scalar: E::Elem,
    expr: E,
    _op: PhantomData<O>,
}

impl<E, O> ScalarLhs<E, O>
where
    E: Expression + Algebraic,
    O: BinOp,
{
    pub(crate) fn new(scalar: E::Elem, expr: E) -> Self {
        debug_assert!(
            E::VECTOR_SPACE,
            "elementwise arithmetic requires vector-space operands"
        );
        Self {
            scalar,
            expr,
            _op: PhantomData,
        }
    }
}

impl<E, O> Expression for ScalarLhs<E, O>
where
    E: Expression + Algebraic,
    O: BinOp,
{
    type Elem = E::Elem;

    fn rank(&self) -> usize {
        self.expr.rank()
    }

    fn extent(&self, axis: usize) -> usize {
        self.expr.extent(axis)
    }

    #[inline]
    fn at(&self, indices: &[usize]) -> Self::Elem {
        O::apply::<E::Elem>(self.scalar, self.expr.at(indices))
    }

    #[inline]
    fn at_vector(&self, indices: &[usize]) -> Vector<Self::Elem> {
        let splat = <E::Elem as crate::element::Element>::Kernel::splat(self.scalar);
        O::apply_vector::<E::Elem>(splat, self.expr.at_vector(indices))
    }

    fn is_contiguous(&self) -> bool {
        self.expr.is_contiguous()
    }

    fn validate(&self) -> Result<(), TensorError> {
        self.expr.validate()
    }
}

impl<E: Expression + Algebraic, O> Algebraic for ScalarLhs<E, O> {
    const VECTOR_SPACE: bool = E::VECTOR_SPACE;
    const ALGEBRA: bool = E::ALGEBRA;
    const LIE_GROUP: bool = false;
    const METRIC: bool = E::METRIC;
    const TENSOR: bool = E::TENSOR;
}
