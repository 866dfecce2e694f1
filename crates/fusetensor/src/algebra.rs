//! Algebraic classification of tensor-like values.
//!
//! Every expression node advertises five structural properties as build-time
//! booleans. Binary composition combines them with AND; scalar and permuted
//! wrappers pass them through; membership in a Lie group is not closed under
//! elementwise arithmetic, so every composed node reports `LIE_GROUP = false`.
//! The operator layer debug-asserts that elementwise arithmetic is applied to
//! vector-space operands.

/// Build-time structural properties of a tensor-like value.
pub trait Algebraic {
    /// Closed under addition and scalar multiplication.
    const VECTOR_SPACE: bool;
    /// Vector space with a product.
    const ALGEBRA: bool;
    /// Element of a Lie group.
    const LIE_GROUP: bool;
    /// Carries a metric.
    const METRIC: bool;
    /// Transforms as a tensor.
    const TENSOR: bool;
}

/// Flag accessors usable on values, for tests and assertions on unnameable
/// expression types.
pub fn is_vector_space<A: Algebraic>(_: &A) -> bool {
    A::VECTOR_SPACE
}

pub fn is_algebra<A: Algebraic>(_: &A) -> bool {
    A::ALGEBRA
}

pub fn is_lie_group<A: Algebraic>(_: &A) -> bool {
    A::LIE_GROUP
}

pub fn has_metric<A: Algebraic>(_: &A) -> bool {
    A::METRIC
}

pub fn is_tensor<A: Algebraic>(_: &A) -> bool {
    A::TENSOR
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::FusedTensor;

    #[test]
    fn tensors_are_vector_spaces_but_not_lie_groups() {
        let t = FusedTensor::<f64>::zeros(&[2, 2]);
        assert!(is_vector_space(&&t));
        assert!(is_algebra(&&t));
        assert!(is_tensor(&&t));
        assert!(!is_lie_group(&&t));
        assert!(!has_metric(&&t));
    }

    #[test]
    fn binary_nodes_and_their_flags() {
        let a = FusedTensor::<f64>::zeros(&[2, 2]);
        let b = FusedTensor::<f64>::zeros(&[2, 2]);
        let sum = &a + &b;
        assert!(is_vector_space(&sum));
        assert!(is_algebra(&sum));
        assert!(is_tensor(&sum));
        assert!(!is_lie_group(&sum));
    }

    #[test]
    fn scalar_wrapping_passes_flags_through() {
        let a = FusedTensor::<f64>::zeros(&[2, 2]);
        let scaled = &a * 2.0;
        assert!(is_vector_space(&scaled));
        assert!(is_tensor(&scaled));
        assert!(!is_lie_group(&scaled));
    }

    #[test]
    fn permuted_views_pass_flags_through() {
        let a = FusedTensor::<f64>::zeros(&[2, 3]);
        let view = a.permuted_view(&[1, 0]).unwrap();
        assert!(is_vector_space(&view));
        assert!(is_tensor(&view));
    }
}
