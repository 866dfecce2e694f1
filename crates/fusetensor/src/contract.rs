//! Single-axis tensor contraction.

use smallvec::SmallVec;

use crate::element::Element;
use crate::error::TensorError;
use crate::expr::Expression;
use crate::layout::{advance_index, Shape};
use crate::tensor::FusedTensor;

/// Contract `axis_a` of `a` against `axis_b` of `b`.
///
/// The result carries the non-contracted axes of `a` followed by those of
/// `b`; each output element is the sum over the shared axis. Operands may be
/// tensors, views, or whole expressions; both must have rank at least 2.
///
/// ```
/// use fusetensor::{einsum, FusedTensor};
/// let a = FusedTensor::<f64>::from_vec(&[2, 2], &[1.0, 2.0, 3.0, 4.0]).unwrap();
/// let id = FusedTensor::<f64>::identity(&[2, 2]).unwrap();
/// let prod = einsum(&&a, &&id, 1, 0).unwrap();
/// assert!(a.allclose_default(&&prod).unwrap());
/// ```
pub fn einsum<A, B>(
    a: &A,
    b: &B,
    axis_a: usize,
    axis_b: usize,
) -> Result<FusedTensor<A::Elem>, TensorError>
where
    A: Expression,
    B: Expression<Elem = A::Elem>,
{
    a.validate()?;
    b.validate()?;
    for (rank, name) in [(a.rank(), "left"), (b.rank(), "right")] {
        if rank < 2 {
            log::debug!("einsum: {name} operand has rank {rank}, need at least 2");
            return Err(TensorError::RankMismatch {
                expected: 2,
                actual: rank,
            });
        }
    }
    if axis_a >= a.rank() {
        return Err(TensorError::InvalidAxis {
            axis: axis_a,
            rank: a.rank(),
        });
    }
    if axis_b >= b.rank() {
        return Err(TensorError::InvalidAxis {
            axis: axis_b,
            rank: b.rank(),
        });
    }
    let shared = a.extent(axis_a);
    if shared != b.extent(axis_b) {
        return Err(TensorError::ExtentMismatch {
            axis: axis_a,
            left: shared,
            right: b.extent(axis_b),
        });
    }

    let free_a: Shape = (0..a.rank()).filter(|&ax| ax != axis_a).collect();
    let free_b: Shape = (0..b.rank()).filter(|&ax| ax != axis_b).collect();
    let out_shape: Shape = free_a
        .iter()
        .map(|&ax| a.extent(ax))
        .chain(free_b.iter().map(|&ax| b.extent(ax)))
        .collect();

    let mut out = FusedTensor::<A::Elem>::zeros(&out_shape);
    let mut coords: Shape = SmallVec::from_elem(0, out_shape.len());
    let mut idx_a: Shape = SmallVec::from_elem(0, a.rank());
    let mut idx_b: Shape = SmallVec::from_elem(0, b.rank());
    loop {
        for (slot, &ax) in free_a.iter().enumerate() {
            idx_a[ax] = coords[slot];
        }
        for (slot, &ax) in free_b.iter().enumerate() {
            idx_b[ax] = coords[free_a.len() + slot];
        }
        let mut acc = A::Elem::zero();
        for k in 0..shared {
            idx_a[axis_a] = k;
            idx_b[axis_b] = k;
            acc += a.at(&idx_a) * b.at(&idx_b);
        }
        out.set_unchecked(&coords, acc);
        if !advance_index(&mut coords, &out_shape) {
            break;
        }
    }
    Ok(out)
}

/// Matrix product: rank-2 operands, columns of `a` against rows of `b`.
pub fn matmul<A, B>(a: &A, b: &B) -> Result<FusedTensor<A::Elem>, TensorError>
where
    A: Expression,
    B: Expression<Elem = A::Elem>,
{
    for rank in [a.rank(), b.rank()] {
        if rank != 2 {
            return Err(TensorError::RankMismatch {
                expected: 2,
                actual: rank,
            });
        }
    }
    einsum(a, b, 1, 0)
}
