//! Whole-expression reductions to a scalar.
//!
//! Reductions validate the expression chain like an assignment would, then
//! fold over every logical element; padding slots are never read. Extents
//! are at least 1 by construction, so min and max always have a first
//! element to start from.

use smallvec::SmallVec;

use crate::element::Element;
use crate::error::TensorError;
use crate::layout::{advance_index, Shape};

use super::Expression;

fn logical_shape<E: Expression>(expr: &E) -> Shape {
    (0..expr.rank()).map(|axis| expr.extent(axis)).collect()
}

/// Sum of every element of the expression.
pub fn reduce_sum<E: Expression>(expr: &E) -> Result<E::Elem, TensorError> {
    expr.validate()?;
    let shape = logical_shape(expr);
    let mut coords: Shape = SmallVec::from_elem(0, shape.len());
    let mut acc = E::Elem::zero();
    loop {
        acc += expr.at(&coords);
        if !advance_index(&mut coords, &shape) {
            return Ok(acc);
        }
    }
}

/// Smallest element of the expression.
pub fn reduce_min<E: Expression>(expr: &E) -> Result<E::Elem, TensorError> {
    expr.validate()?;
    let shape = logical_shape(expr);
    let mut coords: Shape = SmallVec::from_elem(0, shape.len());
    let mut acc = expr.at(&coords);
    while advance_index(&mut coords, &shape) {
        let value = expr.at(&coords);
        if value < acc {
            acc = value;
        }
    }
    Ok(acc)
}

/// Largest element of the expression.
pub fn reduce_max<E: Expression>(expr: &E) -> Result<E::Elem, TensorError> {
    expr.validate()?;
    let shape = logical_shape(expr);
    let mut coords: Shape = SmallVec::from_elem(0, shape.len());
    let mut acc = expr.at(&coords);
    while advance_index(&mut coords, &shape) {
        let value = expr.at(&coords);
        if value > acc {
            acc = value;
        }
    }
    Ok(acc)
}
