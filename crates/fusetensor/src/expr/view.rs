//! Lazy permuted view of a tensor.

use crate::algebra::Algebraic;
use crate::element::{Element, Vector};
use crate::error::TensorError;
use crate::kernel::{Microkernel, MAX_WIDTH};
use crate::layout::{Shape, StridedLayout};
use crate::storage::{AlignedBuffer, Buffer};
use crate::tensor::FusedTensor;

use super::Expression;

/// Axis-reordered read-only view. No data moves; indexing goes through a
/// layout whose extent and stride values are reordered together.
///
/// When the composed permutation is the identity the view is contiguous and
/// reads whole vectors; otherwise each vector lane is gathered individually.
pub struct PermutedView<'a, T: Element, B: Buffer<T> = AlignedBuffer<T>> {
    tensor: &'a FusedTensor<T, B>,
    layout: StridedLayout,
    contiguous: bool,
}

impl<'a, T: Element, B: Buffer<T>> PermutedView<'a, T, B> {
    pub(crate) fn new(
        tensor: &'a FusedTensor<T, B>,
        layout: StridedLayout,
        contiguous: bool,
    ) -> Self {
        Self {
            tensor,
            layout,
            contiguous,
        }
    }

    /// Extents in the view's axis order.
    pub fn shape(&self) -> &[usize] {
        self.layout.extents()
    }
}

impl<'a, T: Element, B: Buffer<T>> Expression for PermutedView<'a, T, B> {
    type Elem = T;

    fn rank(&self) -> usize {
        self.layout.rank()
    }

    fn extent(&self, axis: usize) -> usize {
        self.layout.extent(axis)
    }

    #[inline]
    fn at(&self, indices: &[usize]) -> T {
        self.tensor.physical_data()[self.layout.offset_unchecked(indices)]
    }

    #[inline]
    fn at_vector(&self, indices: &[usize]) -> Vector<T> {
        let data = self.tensor.physical_data();
        if self.contiguous {
            let offset = self.layout.offset_unchecked(indices);
            return T::Kernel::load(&data[offset..]);
        }
        let width = <T::Kernel as Microkernel<T>>::WIDTH;
        let mut coords: Shape = indices.iter().copied().collect();
        let last = coords.len() - 1;
        let mut offsets = [0usize; MAX_WIDTH];
        for (lane, slot) in offsets.iter_mut().enumerate().take(width) {
            coords[last] = indices[last] + lane;
            *slot = self.layout.offset_unchecked(&coords);
        }
        T::Kernel::gather(data, &offsets[..width])
    }

    fn is_contiguous(&self) -> bool {
        self.contiguous
    }

    fn validate(&self) -> Result<(), TensorError> {
        Ok(())
    }
}

impl<'a, T: Element, B: Buffer<T>> Algebraic for PermutedView<'a, T, B> {
    const VECTOR_SPACE: bool = true;
    const ALGEBRA: bool = true;
    const LIE_GROUP: bool = false;
    const METRIC: bool = false;
    const TENSOR: bool = true;
}
