//! Operator overloads building expression trees.
//!
//! Four operand kinds combine: `&FusedTensor`, wrapped expression nodes
//! ([`Expr`]), and `f32`/`f64` scalars on either side. The overloads only
//! construct nodes; nothing is computed and nothing can fail here. Shape
//! agreement is reported by `validate()` at evaluation time.
//!
//! Scalar overloads are enumerated per concrete float type; a blanket
//! `impl<T: Element>` for the scalar side would collide with the expression
//! overloads under coherence.

use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::algebra::Algebraic;
use crate::element::Element;
use crate::storage::Buffer;
use crate::tensor::FusedTensor;

use super::binary::{AddOp, BinaryExpr, DivOp, MulOp, SubOp};
use super::scalar::{ScalarLhs, ScalarRhs};
use super::{Expr, Expression};

macro_rules! impl_expr_binops {
    ($trait:ident, $method:ident, $op:ty) => {
        impl<'a, 'b, T, BL, BR> $trait<&'b FusedTensor<T, BR>> for &'a FusedTensor<T, BL>
        where
            T: Element,
            BL: Buffer<T>,
            BR: Buffer<T>,
        {
            type Output = Expr<BinaryExpr<&'a FusedTensor<T, BL>, &'b FusedTensor<T, BR>, $op>>;

            fn $method(self, rhs: &'b FusedTensor<T, BR>) -> Self::Output {
                Expr(BinaryExpr::new(self, rhs))
            }
        }

        impl<'a, T, B, E> $trait<Expr<E>> for &'a FusedTensor<T, B>
        where
            T: Element,
            B: Buffer<T>,
            E: Expression<Elem = T> + Algebraic,
        {
            type Output = Expr<BinaryExpr<&'a FusedTensor<T, B>, E, $op>>;

            fn $method(self, rhs: Expr<E>) -> Self::Output {
                Expr(BinaryExpr::new(self, rhs.0))
            }
        }

        impl<'b, T, B, E> $trait<&'b FusedTensor<T, B>> for Expr<E>
        where
            T: Element,
            B: Buffer<T>,
            E: Expression<Elem = T> + Algebraic,
        {
            type Output = Expr<BinaryExpr<E, &'b FusedTensor<T, B>, $op>>;

            fn $method(self, rhs: &'b FusedTensor<T, B>) -> Self::Output {
                Expr(BinaryExpr::new(self.0, rhs))
            }
        }

        impl<E, F> $trait<Expr<F>> for Expr<E>
        where
            E: Expression + Algebraic,
            F: Expression<Elem = E::Elem> + Algebraic,
        {
            type Output = Expr<BinaryExpr<E, F, $op>>;

            fn $method(self, rhs: Expr<F>) -> Self::Output {
                Expr(BinaryExpr::new(self.0, rhs.0))
            }
        }
    };
}

impl_expr_binops!(Add, add, AddOp);
impl_expr_binops!(Sub, sub, SubOp);
impl_expr_binops!(Mul, mul, MulOp);
impl_expr_binops!(Div, div, DivOp);

macro_rules! impl_scalar_binops {
    ($t:ty, $trait:ident, $method:ident, $op:ty) => {
        impl<'a, B: Buffer<$t>> $trait<$t> for &'a FusedTensor<$t, B> {
            type Output = Expr<ScalarRhs<&'a FusedTensor<$t, B>, $op>>;

            fn $method(self, rhs: $t) -> Self::Output {
                Expr(ScalarRhs::new(self, rhs))
            }
        }

        impl<E> $trait<$t> for Expr<E>
        where
            E: Expression<Elem = $t> + Algebraic,
        {
            type Output = Expr<ScalarRhs<E, $op>>;

            fn $method(self, rhs: $t) -> Self::Output {
                Expr(ScalarRhs::new(self.0, rhs))
            }
        }

        impl<'a, B: Buffer<$t>> $trait<&'a FusedTensor<$t, B>> for $t {
            type Output = Expr<ScalarLhs<&'a FusedTensor<$t, B>, $op>>;

            fn $method(self, rhs: &'a FusedTensor<$t, B>) -> Self::Output {
                Expr(ScalarLhs::new(self, rhs))
            }
        }

        impl<E> $trait<Expr<E>> for $t
        where
            E: Expression<Elem = $t> + Algebraic,
        {
            type Output = Expr<ScalarLhs<E, $op>>;

            fn $method(self, rhs: Expr<E>) -> Self::Output {
                Expr(ScalarLhs::new(self, rhs.0))
            }
        }
    };
}

macro_rules! impl_scalar_ops_for {
    ($t:ty) => {
        impl_scalar_binops!($t, Add, add, AddOp);
        impl_scalar_binops!($t, Sub, sub, SubOp);
        impl_scalar_binops!($t, Mul, mul, MulOp);
        impl_scalar_binops!($t, Div, div, DivOp);
    };
}

impl_scalar_ops_for!(f32);
impl_scalar_ops_for!(f64);

// Unary negation is zero minus the operand.
impl<'a, T, B> Neg for &'a FusedTensor<T, B>
where
    T: Element,
    B: Buffer<T>,
{
    type Output = Expr<ScalarLhs<&'a FusedTensor<T, B>, SubOp>>;

    fn neg(self) -> Self::Output {
        Expr(ScalarLhs::new(T::zero(), self))
    }
}

impl<E> Neg for Expr<E>
where
    E: Expression + Algebraic,
{
    type Output = Expr<ScalarLhs<E, SubOp>>;

    fn neg(self) -> Self::Output {
        Expr(ScalarLhs::new(E::Elem::zero(), self.0))
    }
}
