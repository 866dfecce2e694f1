//! Dense fixed-shape tensor with padded, vector-aligned storage.
//!
//! A [`FusedTensor`] owns a physical buffer laid out row-major with the last
//! axis padded to the kernel width (see [`crate::padding`]). Its shape is
//! fixed at construction. Arithmetic never touches the buffer: operators
//! build lazy expressions, and [`FusedTensor::assign`] /
//! [`FusedTensor::from_expr`] evaluate a whole expression tree in one pass.
//!
//! Transposition is a reinterpretation of the index mapping: the tensor
//! tracks its current axis order next to a layout whose extent/stride values
//! are permuted together, so `transpose_in_place` is O(rank).

use rand::distr::uniform::SampleUniform;
use rand::distr::{Distribution, Uniform};
use rand::Rng;
use smallvec::SmallVec;

use crate::algebra::Algebraic;
use crate::config;
use crate::element::{width_of, Element, Vector};
use crate::error::TensorError;
use crate::expr::{Expr, Expression, PermutedView};
use crate::kernel::{Microkernel, MAX_WIDTH};
use crate::layout::{advance_index, validate_permutation, Shape, StridedLayout};
use crate::storage::{AlignedBuffer, Buffer, InlineBuffer};

/// Dense tensor over `T` with storage backend `B`.
#[derive(Debug, Clone)]
pub struct FusedTensor<T: Element, B: Buffer<T> = AlignedBuffer<T>> {
    buf: B,
    layout: StridedLayout,
    order: Shape,
    _marker: core::marker::PhantomData<T>,
}

/// [`FusedTensor`] backed by fixed-capacity inline storage. `CAP` must cover
/// the physical (padded) element count.
pub type InlineTensor<T, const CAP: usize> = FusedTensor<T, InlineBuffer<T, CAP>>;

impl<T: Element, B: Buffer<T>> FusedTensor<T, B> {
    /// All-zero tensor of the given logical shape.
    ///
    /// Panics when the shape is empty or contains a zero extent; shapes are
    /// a construction-time contract, not runtime data.
    pub fn zeros(shape: &[usize]) -> Self {
        let layout = StridedLayout::new(shape, width_of::<T>());
        let buf = B::zeros(layout.physical_len());
        let order = (0..shape.len()).collect();
        Self {
            buf,
            layout,
            order,
            _marker: core::marker::PhantomData,
        }
    }

    /// Tensor with every element set to `value`.
    pub fn filled(shape: &[usize], value: T) -> Self {
        let mut tensor = Self::zeros(shape);
        tensor.fill(value);
        tensor
    }

    /// Tensor from row-major logical data.
    pub fn from_vec(shape: &[usize], data: &[T]) -> Result<Self, TensorError> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(TensorError::DataLengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        let mut tensor = Self::zeros(shape);
        for (flat, &value) in data.iter().enumerate() {
            let coords = tensor.layout.flat_to_coords(flat)?;
            tensor.set_unchecked(&coords, value);
        }
        Ok(tensor)
    }

    /// Rank-2 tensor from a slice of equally long, non-empty rows.
    pub fn from_rows(rows: &[&[T]]) -> Result<Self, TensorError> {
        let cols = rows.first().map_or(0, |r| r.len());
        if rows.is_empty() || cols == 0 {
            return Err(TensorError::DataLengthMismatch {
                expected: 1,
                actual: 0,
            });
        }
        for row in rows {
            if row.len() != cols {
                return Err(TensorError::ExtentMismatch {
                    axis: 1,
                    left: cols,
                    right: row.len(),
                });
            }
        }
        let mut tensor = Self::zeros(&[rows.len(), cols]);
        for (i, row) in rows.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                tensor.set_unchecked(&[i, j], value);
            }
        }
        Ok(tensor)
    }

    /// Identity tensor; all extents must be equal.
    pub fn identity(shape: &[usize]) -> Result<Self, TensorError> {
        let mut tensor = Self::zeros(shape);
        tensor.set_identity()?;
        Ok(tensor)
    }

    /// Logical extents in the tensor's current axis order.
    pub fn shape(&self) -> &[usize] {
        self.layout.extents()
    }

    pub fn rank(&self) -> usize {
        self.layout.rank()
    }

    pub fn extent(&self, axis: usize) -> usize {
        self.layout.extent(axis)
    }

    /// Logical element count (padding excluded).
    pub fn logical_len(&self) -> usize {
        self.layout.logical_len()
    }

    /// Physical element count (padding included).
    pub fn physical_len(&self) -> usize {
        self.layout.physical_len()
    }

    /// Lane count of the kernel this tensor was padded for.
    pub fn width() -> usize {
        width_of::<T>()
    }

    /// Current axis order as a permutation of the construction order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn is_natural_order(&self) -> bool {
        self.order.iter().enumerate().all(|(i, &p)| i == p)
    }

    /// The raw physical buffer, padding slots included.
    pub fn physical_data(&self) -> &[T] {
        self.buf.as_slice()
    }

    /// Checked element read.
    pub fn get(&self, indices: &[usize]) -> Result<T, TensorError> {
        Ok(self.buf.as_slice()[self.layout.offset(indices)?])
    }

    /// Checked element write.
    pub fn set(&mut self, indices: &[usize], value: T) -> Result<(), TensorError> {
        let offset = self.layout.offset(indices)?;
        self.buf.as_mut_slice()[offset] = value;
        Ok(())
    }

    #[inline]
    pub(crate) fn at_unchecked(&self, indices: &[usize]) -> T {
        self.buf.as_slice()[self.layout.offset_unchecked(indices)]
    }

    #[inline]
    pub(crate) fn set_unchecked(&mut self, indices: &[usize], value: T) {
        let offset = self.layout.offset_unchecked(indices);
        self.buf.as_mut_slice()[offset] = value;
    }

    /// Zero every physical slot.
    pub fn set_zero(&mut self) {
        self.fill(T::zero());
    }

    /// Set every physical slot (padding included) to `value`.
    pub fn fill(&mut self, value: T) {
        for slot in self.buf.as_mut_slice() {
            *slot = value;
        }
    }

    /// Write `0, 1, 2, ...` in physical storage order, padding slots
    /// included. Exposes the storage layout; mainly useful for layout tests
    /// and debugging.
    pub fn set_sequential(&mut self) {
        for (i, slot) in self.buf.as_mut_slice().iter_mut().enumerate() {
            *slot = T::from_index(i);
        }
    }

    /// Zero the tensor and write `value` along the main diagonal. Requires
    /// rank at least 2; the diagonal runs to the smallest extent.
    pub fn set_diagonal(&mut self, value: T) -> Result<(), TensorError> {
        if self.rank() < 2 {
            return Err(TensorError::RankMismatch {
                expected: 2,
                actual: self.rank(),
            });
        }
        self.set_zero();
        let steps = self.shape().iter().copied().min().unwrap_or(0);
        let mut coords: Shape = SmallVec::from_elem(0, self.rank());
        for i in 0..steps {
            coords.iter_mut().for_each(|c| *c = i);
            self.set_unchecked(&coords, value);
        }
        Ok(())
    }

    /// Zero the tensor and write ones along the main diagonal. All extents
    /// must be equal.
    pub fn set_identity(&mut self) -> Result<(), TensorError> {
        if self.rank() < 2 {
            return Err(TensorError::RankMismatch {
                expected: 2,
                actual: self.rank(),
            });
        }
        if !self.extents_all_equal() {
            return Err(TensorError::NotSquare {
                shape: self.shape().to_vec(),
            });
        }
        self.set_diagonal(T::one())
    }

    /// Fill with uniform samples from `[min, max]` using the thread-local
    /// generator.
    pub fn fill_random(&mut self, min: T, max: T)
    where
        T: SampleUniform,
    {
        self.fill_random_with_rng(&mut rand::rng(), min, max);
    }

    /// Fill with uniform samples from `[min, max]` using a caller-supplied
    /// generator, for reproducible tests. Bounds may be given in either
    /// order; non-finite bounds panic.
    pub fn fill_random_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R, min: T, max: T)
    where
        T: SampleUniform,
    {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let dist = Uniform::new_inclusive(lo, hi).expect("random fill bounds must be finite");
        for slot in self.buf.as_mut_slice() {
            *slot = dist.sample(rng);
        }
    }

    /// Reorder the axes in place without touching data. O(rank).
    pub fn transpose_in_place(&mut self, perm: &[usize]) -> Result<(), TensorError> {
        validate_permutation(perm, self.rank())?;
        self.layout = self.layout.permuted(perm);
        self.order = perm.iter().map(|&p| self.order[p]).collect();
        Ok(())
    }

    /// Lazy axis-reordered view; usable as an expression operand.
    pub fn permuted_view(&self, perm: &[usize]) -> Result<Expr<PermutedView<'_, T, B>>, TensorError> {
        validate_permutation(perm, self.rank())?;
        let layout = self.layout.permuted(perm);
        let composed: Shape = perm.iter().map(|&p| self.order[p]).collect();
        let contiguous = composed.iter().enumerate().all(|(i, &p)| i == p);
        Ok(Expr(PermutedView::new(self, layout, contiguous)))
    }

    /// Lazy matrix transpose view. Rank 2 only.
    pub fn transposed_view(&self) -> Result<Expr<PermutedView<'_, T, B>>, TensorError> {
        if self.rank() != 2 {
            return Err(TensorError::RankMismatch {
                expected: 2,
                actual: self.rank(),
            });
        }
        self.permuted_view(&[1, 0])
    }

    /// Materialized permutation: a new tensor in natural order. O(size).
    pub fn permuted(&self, perm: &[usize]) -> Result<Self, TensorError> {
        let view = self.permuted_view(perm)?;
        Self::from_expr(&view)
    }

    /// Materialized matrix transpose. Rank 2 only.
    pub fn transposed(&self) -> Result<Self, TensorError> {
        if self.rank() != 2 {
            return Err(TensorError::RankMismatch {
                expected: 2,
                actual: self.rank(),
            });
        }
        self.permuted(&[1, 0])
    }

    fn extents_all_equal(&self) -> bool {
        self.shape().windows(2).all(|w| w[0] == w[1])
    }

    /// Elementwise approximate comparison against any expression. Shape
    /// disagreement is an error, not inequality.
    pub fn allclose<E: Expression<Elem = T>>(
        &self,
        other: &E,
        tolerance: T,
    ) -> Result<bool, TensorError> {
        other.validate()?;
        if other.rank() != self.rank() {
            return Err(TensorError::RankMismatch {
                expected: self.rank(),
                actual: other.rank(),
            });
        }
        for axis in 0..self.rank() {
            let (left, right) = (self.extent(axis), other.extent(axis));
            if left != right {
                return Err(TensorError::ExtentMismatch { axis, left, right });
            }
        }
        let shape: Shape = self.shape().iter().copied().collect();
        let mut coords: Shape = SmallVec::from_elem(0, self.rank());
        loop {
            let diff = self.at_unchecked(&coords) - other.at(&coords);
            if diff.abs() > tolerance {
                return Ok(false);
            }
            if !advance_index(&mut coords, &shape) {
                return Ok(true);
            }
        }
    }

    /// [`allclose`](Self::allclose) at the element type's default tolerance.
    pub fn allclose_default<E: Expression<Elem = T>>(&self, other: &E) -> Result<bool, TensorError> {
        self.allclose(other, T::tolerance())
    }

    /// Whether this is the identity within the default tolerance. False for
    /// rank below 2 or unequal extents.
    pub fn is_identity(&self) -> bool {
        if self.rank() < 2 || !self.extents_all_equal() {
            return false;
        }
        let tolerance = T::tolerance();
        let shape: Shape = self.shape().iter().copied().collect();
        let mut coords: Shape = SmallVec::from_elem(0, self.rank());
        loop {
            let on_diagonal = coords.windows(2).all(|w| w[0] == w[1]);
            let expected = if on_diagonal { T::one() } else { T::zero() };
            if (self.at_unchecked(&coords) - expected).abs() > tolerance {
                return false;
            }
            if !advance_index(&mut coords, &shape) {
                return true;
            }
        }
    }

    /// Evaluate `expr` into this tensor in one pass.
    ///
    /// The whole chain is validated first; nothing is written on error. With
    /// a multi-lane kernel and a destination in natural order, each padded
    /// row is filled in whole vector chunks with a scalar loop for the
    /// remainder; otherwise evaluation walks element by element.
    ///
    /// Operands borrow their tensors, so `self` can never alias an operand;
    /// `a = a + b` is expressed by rebinding through [`Self::from_expr`].
    pub fn assign<E: Expression<Elem = T>>(&mut self, expr: &E) -> Result<(), TensorError> {
        expr.validate()?;
        if config::RANK_CHECK && expr.rank() != self.rank() {
            return Err(TensorError::RankMismatch {
                expected: self.rank(),
                actual: expr.rank(),
            });
        }
        if config::SHAPE_CHECK {
            for axis in 0..self.rank() {
                let (left, right) = (self.extent(axis), expr.extent(axis));
                if left != right {
                    return Err(TensorError::ExtentMismatch { axis, left, right });
                }
            }
        }

        let width = width_of::<T>();
        let layout = self.layout.clone();
        let rank = layout.rank();
        let shape: Shape = layout.extents().iter().copied().collect();

        if width > 1 && self.is_natural_order() {
            log::trace!(
                "assign: vectorized walk, width {width}, shape {shape:?}, contiguous chain: {}",
                expr.is_contiguous()
            );
            let last = rank - 1;
            let last_extent = shape[last];
            let mut coords: Shape = SmallVec::from_elem(0, rank);
            loop {
                let mut j = 0;
                while j + width <= last_extent {
                    coords[last] = j;
                    let v = expr.at_vector(&coords);
                    let offset = layout.offset_unchecked(&coords);
                    T::Kernel::store(&mut self.buf.as_mut_slice()[offset..], v);
                    j += width;
                }
                while j < last_extent {
                    coords[last] = j;
                    let offset = layout.offset_unchecked(&coords);
                    self.buf.as_mut_slice()[offset] = expr.at(&coords);
                    j += 1;
                }
                coords[last] = 0;
                if !advance_index(&mut coords[..last], &shape[..last]) {
                    break;
                }
            }
        } else {
            log::trace!("assign: scalar walk, shape {shape:?}");
            let mut coords: Shape = SmallVec::from_elem(0, rank);
            loop {
                let offset = layout.offset_unchecked(&coords);
                self.buf.as_mut_slice()[offset] = expr.at(&coords);
                if !advance_index(&mut coords, &shape) {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Materialize an expression into a freshly allocated tensor of the
    /// expression's shape.
    pub fn from_expr<E: Expression<Elem = T>>(expr: &E) -> Result<Self, TensorError> {
        expr.validate()?;
        let shape: Shape = (0..expr.rank()).map(|axis| expr.extent(axis)).collect();
        let mut out = Self::zeros(&shape);
        out.assign(expr)?;
        Ok(out)
    }
}

impl<'a, T: Element, B: Buffer<T>> Expression for &'a FusedTensor<T, B> {
    type Elem = T;

    fn rank(&self) -> usize {
        self.layout.rank()
    }

    fn extent(&self, axis: usize) -> usize {
        self.layout.extent(axis)
    }

    #[inline]
    fn at(&self, indices: &[usize]) -> T {
        self.at_unchecked(indices)
    }

    #[inline]
    fn at_vector(&self, indices: &[usize]) -> Vector<T> {
        let data = self.buf.as_slice();
        if self.is_natural_order() {
            let offset = self.layout.offset_unchecked(indices);
            return T::Kernel::load(&data[offset..]);
        }
        let width = width_of::<T>();
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
        self.is_natural_order()
    }

    fn validate(&self) -> Result<(), TensorError> {
        Ok(())
    }
}

impl<T: Element, B: Buffer<T>> Algebraic for FusedTensor<T, B> {
    const VECTOR_SPACE: bool = true;
    const ALGEBRA: bool = true;
    const LIE_GROUP: bool = false;
    const METRIC: bool = false;
    const TENSOR: bool = true;
}

impl<'a, T: Element, B: Buffer<T>> Algebraic for &'a FusedTensor<T, B> {
    const VECTOR_SPACE: bool = true;
    const ALGEBRA: bool = true;
    const LIE_GROUP: bool = false;
    const METRIC: bool = false;
    const TENSOR: bool = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn zeros_pads_the_last_axis() {
        let t = FusedTensor::<f64>::zeros(&[3, 5]);
        assert_eq!(t.shape(), &[3, 5]);
        assert_eq!(t.logical_len(), 15);
        let width = FusedTensor::<f64>::width();
        assert_eq!(t.physical_len(), 3 * 5usize.div_ceil(width) * width);
        assert!(t.physical_data().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn get_and_set_roundtrip() {
        let mut t = FusedTensor::<f64>::zeros(&[2, 3]);
        t.set(&[1, 2], 7.5).unwrap();
        assert_eq!(t.get(&[1, 2]).unwrap(), 7.5);
        assert_eq!(t.get(&[0, 0]).unwrap(), 0.0);
    }

    #[cfg(feature = "bounds-check")]
    #[test]
    fn get_rejects_out_of_range() {
        let t = FusedTensor::<f64>::zeros(&[2, 3]);
        assert!(matches!(
            t.get(&[0, 3]),
            Err(TensorError::IndexOutOfBounds { axis: 1, .. })
        ));
        assert!(matches!(
            t.get(&[0]),
            Err(TensorError::WrongNumberOfIndices { .. })
        ));
    }

    #[test]
    fn from_vec_is_row_major() {
        let t = FusedTensor::<f64>::from_vec(&[2, 3], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(t.get(&[0, 0]).unwrap(), 1.0);
        assert_eq!(t.get(&[0, 2]).unwrap(), 3.0);
        assert_eq!(t.get(&[1, 0]).unwrap(), 4.0);
        assert_eq!(t.get(&[1, 2]).unwrap(), 6.0);
    }

    #[test]
    fn from_vec_rejects_wrong_length() {
        assert!(matches!(
            FusedTensor::<f64>::from_vec(&[2, 3], &[1.0; 5]),
            Err(TensorError::DataLengthMismatch {
                expected: 6,
                actual: 5
            })
        ));
    }

    #[test]
    fn sequential_fill_exposes_padding() {
        let mut t = FusedTensor::<f64>::zeros(&[2, 3]);
        t.set_sequential();
        let width = FusedTensor::<f64>::width();
        let padded_row = 3usize.div_ceil(width) * width;
        // Row 1 starts after the padded row 0.
        assert_eq!(t.get(&[1, 0]).unwrap(), padded_row as f64);
    }

    #[test]
    fn identity_requires_equal_extents() {
        assert!(FusedTensor::<f64>::identity(&[3, 3]).is_ok());
        assert!(matches!(
            FusedTensor::<f64>::identity(&[3, 4]),
            Err(TensorError::NotSquare { .. })
        ));
    }

    #[test]
    fn is_identity_tracks_the_diagonal() {
        let mut t = FusedTensor::<f64>::identity(&[4, 4]).unwrap();
        assert!(t.is_identity());
        t.set(&[0, 3], 0.5).unwrap();
        assert!(!t.is_identity());
        assert!(!FusedTensor::<f64>::zeros(&[2, 3]).is_identity());
    }

    #[test]
    fn set_diagonal_runs_to_the_smallest_extent() {
        let mut t = FusedTensor::<f64>::zeros(&[2, 4]);
        t.set_diagonal(3.0).unwrap();
        assert_eq!(t.get(&[0, 0]).unwrap(), 3.0);
        assert_eq!(t.get(&[1, 1]).unwrap(), 3.0);
        assert_eq!(t.get(&[1, 2]).unwrap(), 0.0);
    }

    #[test]
    fn transpose_in_place_reinterprets_indices() {
        let mut t = FusedTensor::<f64>::from_vec(&[2, 3], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let data_before = t.physical_data().to_vec();
        t.transpose_in_place(&[1, 0]).unwrap();
        assert_eq!(t.shape(), &[3, 2]);
        assert_eq!(t.get(&[2, 0]).unwrap(), 3.0);
        assert_eq!(t.get(&[0, 1]).unwrap(), 4.0);
        // No data moved.
        assert_eq!(t.physical_data(), data_before.as_slice());
        assert!(!t.is_natural_order());
    }

    #[test]
    fn double_transpose_restores_natural_order() {
        let mut t = FusedTensor::<f64>::zeros(&[2, 3]);
        t.transpose_in_place(&[1, 0]).unwrap();
        t.transpose_in_place(&[1, 0]).unwrap();
        assert!(t.is_natural_order());
        assert_eq!(t.shape(), &[2, 3]);
    }

    #[test]
    fn materialized_permutation_is_natural_order() {
        let t = FusedTensor::<f64>::from_vec(&[2, 3], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let p = t.permuted(&[1, 0]).unwrap();
        assert_eq!(p.shape(), &[3, 2]);
        assert!(p.is_natural_order());
        assert_eq!(p.get(&[2, 1]).unwrap(), 6.0);
    }

    #[test]
    fn invalid_permutation_is_rejected() {
        let mut t = FusedTensor::<f64>::zeros(&[2, 3]);
        assert!(matches!(
            t.transpose_in_place(&[0, 0]),
            Err(TensorError::InvalidPermutation { .. })
        ));
        assert!(t.permuted_view(&[2, 0]).is_err());
    }

    #[test]
    fn assign_evaluates_a_sum() {
        let a = FusedTensor::<f64>::from_vec(&[2, 3], &[1.0; 6]).unwrap();
        let b = FusedTensor::<f64>::filled(&[2, 3], 2.0);
        let mut out = FusedTensor::<f64>::zeros(&[2, 3]);
        out.assign(&(&a + &b)).unwrap();
        assert!(out.allclose_default(&&FusedTensor::<f64>::filled(&[2, 3], 3.0)).unwrap());
    }

    #[test]
    fn assign_into_transposed_destination_uses_scalar_walk() {
        let a = FusedTensor::<f64>::from_vec(&[3, 2], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let mut out = FusedTensor::<f64>::zeros(&[2, 3]);
        out.transpose_in_place(&[1, 0]).unwrap();
        out.assign(&&a).unwrap();
        assert_eq!(out.get(&[2, 1]).unwrap(), 6.0);
    }

    #[test]
    fn allclose_errors_on_shape_mismatch() {
        let a = FusedTensor::<f64>::zeros(&[2, 3]);
        let b = FusedTensor::<f64>::zeros(&[3, 2]);
        assert!(matches!(
            a.allclose_default(&&b),
            Err(TensorError::ExtentMismatch { axis: 0, .. })
        ));
    }

    #[test]
    fn from_rows_rejects_empty_input() {
        assert!(matches!(
            FusedTensor::<f64>::from_rows(&[]),
            Err(TensorError::DataLengthMismatch { .. })
        ));
        assert!(matches!(
            FusedTensor::<f64>::from_rows(&[&[], &[]]),
            Err(TensorError::DataLengthMismatch { .. })
        ));
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        assert!(matches!(
            FusedTensor::<f64>::from_rows(&[&[1.0, 2.0], &[3.0]]),
            Err(TensorError::ExtentMismatch { axis: 1, .. })
        ));
    }

    #[test]
    fn random_fill_accepts_bounds_in_either_order() {
        let mut a = FusedTensor::<f64>::zeros(&[3, 3]);
        let mut b = FusedTensor::<f64>::zeros(&[3, 3]);
        a.fill_random_with_rng(&mut StdRng::seed_from_u64(7), -1.0, 1.0);
        b.fill_random_with_rng(&mut StdRng::seed_from_u64(7), 1.0, -1.0);
        assert_eq!(a.physical_data(), b.physical_data());
        assert!(b.physical_data().iter().all(|&x| (-1.0..=1.0).contains(&x)));
    }

    #[test]
    fn seeded_random_fill_is_reproducible() {
        let mut a = FusedTensor::<f64>::zeros(&[3, 3]);
        let mut b = FusedTensor::<f64>::zeros(&[3, 3]);
        a.fill_random_with_rng(&mut StdRng::seed_from_u64(42), -1.0, 1.0);
        b.fill_random_with_rng(&mut StdRng::seed_from_u64(42), -1.0, 1.0);
        assert_eq!(a.physical_data(), b.physical_data());
        assert!(a.physical_data().iter().all(|&x| (-1.0..=1.0).contains(&x)));
    }

    #[test]
    fn inline_tensor_works_like_the_heap_tensor() {
        let mut t = InlineTensor::<f64, 64>::zeros(&[3, 3]);
        t.set(&[1, 1], 5.0).unwrap();
        assert_eq!(t.get(&[1, 1]).unwrap(), 5.0);
        assert_eq!(t.logical_len(), 9);
    }
}
