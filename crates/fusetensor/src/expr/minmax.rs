//! Elementwise minimum and maximum.
//!
//! These are ordinary lazy nodes, so they fuse with the arithmetic
//! operators: `min(&a, &b) * 2.0` still evaluates in one pass. The scalar
//! forms take the scalar on the right only; min and max are commutative, so
//! one node type covers both argument orders.

use crate::algebra::Algebraic;

use super::binary::{BinaryExpr, MaxOp, MinOp};
use super::scalar::ScalarRhs;
use super::{Expr, Expression};

/// Lazy elementwise minimum of two operands.
pub fn min<L, R>(lhs: L, rhs: R) -> Expr<BinaryExpr<L, R, MinOp>>
where
    L: Expression + Algebraic,
    R: Expression<Elem = L::Elem> + Algebraic,
{
    Expr(BinaryExpr::new(lhs, rhs))
}

/// Lazy elementwise maximum of two operands.
pub fn max<L, R>(lhs: L, rhs: R) -> Expr<BinaryExpr<L, R, MaxOp>>
where
    L: Expression + Algebraic,
    R: Expression<Elem = L::Elem> + Algebraic,
{
    Expr(BinaryExpr::new(lhs, rhs))
}

/// Lazy elementwise minimum against a broadcast scalar.
pub fn min_scalar<E>(expr: E, scalar: E::Elem) -> Expr<ScalarRhs<E, MinOp>>
where
    E: Expression + Algebraic,
{
    Expr(ScalarRhs::new(expr, scalar))
}

/// Lazy elementwise maximum against a broadcast scalar.
pub fn max_scalar<E>(expr: E, scalar: E::Elem) -> Expr<ScalarRhs<E, MaxOp>>
where
    E: Expression + Algebraic,
{
    Expr(ScalarRhs::new(expr, scalar))
}
