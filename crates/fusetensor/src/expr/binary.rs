//! Elementwise binary nodes.

use core::marker::PhantomData;

use crate::algebra::Algebraic;
use crate::config;
use crate::element::{Element, Vector};
use crate::error::TensorError;
use crate::kernel::Microkernel;

use super::Expression;

/// An elementwise operation, applied per scalar or per vector.
pub trait BinOp {
    fn apply<T: Element>(lhs: T, rhs: T) -> T;
    fn apply_vector<T: Element>(lhs: Vector<T>, rhs: Vector<T>) -> Vector<T>;
}

macro_rules! define_bin_op {
    ($name:ident, $op:tt, $kernel_fn:ident) => {
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl BinOp for $name {
            #[inline(always)]
            fn apply<T: Element>(lhs: T, rhs: T) -> T {
                lhs $op rhs
            }

            #[inline(always)]
            fn apply_vector<T: Element>(lhs: Vector<T>, rhs: Vector<T>) -> Vector<T> {
                T::Kernel::$kernel_fn(lhs, rhs)
            }
        }
    };
}

define_bin_op!(AddOp, +, add);
define_bin_op!(SubOp, -, sub);
define_bin_op!(MulOp, *, mul);
define_bin_op!(DivOp, /, div);

#[derive(Debug, Clone, Copy, Default)]
pub struct MinOp;

impl BinOp for MinOp {
    #[inline(always)]
    fn apply<T: Element>(lhs: T, rhs: T) -> T {
        if lhs < rhs {
            lhs
        } else {
            rhs
        }
    }

    #[inline(always)]
    fn apply_vector<T: Element>(lhs: Vector<T>, rhs: Vector<T>) -> Vector<T> {
        T::Kernel::min(lhs, rhs)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaxOp;

impl BinOp for MaxOp {
    #[inline(always)]
    fn apply<T: Element>(lhs: T, rhs: T) -> T {
        if lhs > rhs {
            lhs
        } else {
            rhs
        }
    }

    #[inline(always)]
    fn apply_vector<T: Element>(lhs: Vector<T>, rhs: Vector<T>) -> Vector<T> {
        T::Kernel::max(lhs, rhs)
    }
}

/// Lazy elementwise combination of two operands.
///
/// Shape agreement is not checked at construction; [`Expression::validate`]
/// reports the first mismatch when the expression is evaluated.
pub struct BinaryExpr<L, R, O> {
    lhs: L,
    rhs: R,
    _op: PhantomData<O>,
}

impl<L, R, O> BinaryExpr<L, R, O>
where
    L: Expression + Algebraic,
    R: Expression<Elem = L::Elem> + Algebraic,
    O: BinOp,
{
    pub(crate) fn new(lhs: L, rhs: R) -> Self {
        debug_assert!(
            L::VECTOR_SPACE && R::VECTOR_SPACE,
            "elementwise arithmetic requires vector-space operands"
        );
        Self {
            lhs,
            rhs,
            _op: PhantomData,
        }
    }
}

impl<L, R, O> Expression for BinaryExpr<L, R, O>
where
    L: Expression + Algebraic,
    R: Expression<Elem = L::Elem> + Algebraic,
    O: BinOp,
{
    type Elem = L::Elem;

    fn rank(&self) -> usize {
        self.lhs.rank()
    }

    fn extent(&self, axis: usize) -> usize {
        self.lhs.extent(axis)
    }

    #[inline]
    fn at(&self, indices: &[usize]) -> Self::Elem {
        O::apply::<L::Elem>(self.lhs.at(indices), self.rhs.at(indices))
    }

    #[inline]
    fn at_vector(&self, indices: &[usize]) -> Vector<Self::Elem> {
        O::apply_vector::<L::Elem>(self.lhs.at_vector(indices), self.rhs.at_vector(indices))
    }

    fn is_contiguous(&self) -> bool {
        self.lhs.is_contiguous() && self.rhs.is_contiguous()
    }

    fn validate(&self) -> Result<(), TensorError> {
        self.lhs.validate()?;
        self.rhs.validate()?;
        if config::RANK_CHECK && self.lhs.rank() != self.rhs.rank() {
            return Err(TensorError::RankMismatch {
                expected: self.lhs.rank(),
                actual: self.rhs.rank(),
            });
        }
        if config::SHAPE_CHECK {
            for axis in 0..self.lhs.rank() {
                let (left, right) = (self.lhs.extent(axis), self.rhs.extent(axis));
                if left != right {
                    return Err(TensorError::ExtentMismatch { axis, left, right });
                }
            }
        }
        Ok(())
    }
}

impl<L: Algebraic, R: Algebraic, O> Algebraic for BinaryExpr<L, R, O> {
    const VECTOR_SPACE: bool = L::VECTOR_SPACE && R::VECTOR_SPACE;
    const ALGEBRA: bool = L::ALGEBRA && R::ALGEBRA;
    // Groups are not closed under elementwise arithmetic.
    const LIE_GROUP: bool = false;
    const METRIC: bool = L::METRIC && R::METRIC;
    const TENSOR: bool = L::TENSOR && R::TENSOR;
}
