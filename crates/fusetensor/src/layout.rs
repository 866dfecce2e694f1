//! Strided memory layout.
//!
//! A [`StridedLayout`] maps logical multi-indices to offsets in the physical
//! (padded) buffer. Strides are computed row-major over the *padded* shape,
//! so the last logical axis is contiguous and every row starts at a
//! vector-aligned offset. Transposition never moves data: [`StridedLayout::permuted`]
//! reorders extent and stride values together, changing only the
//! index-to-offset mapping.

use smallvec::SmallVec;

use crate::config;
use crate::error::TensorError;
use crate::padding::padded_shape;

/// Extent/stride/index vector. Inline up to rank 6.
pub type Shape = SmallVec<[usize; 6]>;

/// Check that `perm` is a rearrangement of `0..rank`.
pub fn validate_permutation(perm: &[usize], rank: usize) -> Result<(), TensorError> {
    let invalid = || TensorError::InvalidPermutation {
        perm: perm.to_vec(),
        rank,
    };
    if perm.len() != rank {
        return Err(invalid());
    }
    let mut seen: SmallVec<[bool; 6]> = SmallVec::from_elem(false, rank);
    for &axis in perm {
        if axis >= rank || seen[axis] {
            return Err(invalid());
        }
        seen[axis] = true;
    }
    Ok(())
}

/// Odometer-style increment of a row-major index counter. Returns `false`
/// once the counter wraps back to all zeros.
pub(crate) fn advance_index(coords: &mut [usize], shape: &[usize]) -> bool {
    for axis in (0..shape.len()).rev() {
        coords[axis] += 1;
        if coords[axis] < shape[axis] {
            return true;
        }
        coords[axis] = 0;
    }
    false
}

/// Logical extents plus physical strides of a tensor view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StridedLayout {
    extents: Shape,
    strides: Shape,
    logical_len: usize,
    physical_len: usize,
}

impl StridedLayout {
    /// Layout for `shape` in natural (row-major) order, padded for a kernel
    /// of `width` lanes.
    ///
    /// ```
    /// use fusetensor::layout::StridedLayout;
    /// let layout = StridedLayout::new(&[3, 5], 4);
    /// assert_eq!(layout.stride(0), 8); // rows padded from 5 to 8
    /// assert_eq!(layout.stride(1), 1);
    /// assert_eq!(layout.logical_len(), 15);
    /// assert_eq!(layout.physical_len(), 24);
    /// ```
    pub fn new(shape: &[usize], width: usize) -> Self {
        assert!(!shape.is_empty(), "rank must be at least 1");
        assert!(
            shape.iter().all(|&d| d >= 1),
            "extents must be at least 1, got {shape:?}"
        );
        let padded = padded_shape(shape, width);
        let rank = shape.len();
        let mut strides: Shape = SmallVec::from_elem(1, rank);
        for axis in (0..rank - 1).rev() {
            strides[axis] = strides[axis + 1] * padded[axis + 1];
        }
        Self {
            extents: shape.iter().copied().collect(),
            strides,
            logical_len: shape.iter().product(),
            physical_len: padded.iter().product(),
        }
    }

    pub fn rank(&self) -> usize {
        self.extents.len()
    }

    /// Logical extents, in the layout's current axis order.
    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    pub fn extent(&self, axis: usize) -> usize {
        self.extents[axis]
    }

    pub fn stride(&self, axis: usize) -> usize {
        self.strides[axis]
    }

    /// Logical element count (padding excluded).
    pub fn logical_len(&self) -> usize {
        self.logical_len
    }

    /// Physical element count (padding included).
    pub fn physical_len(&self) -> usize {
        self.physical_len
    }

    /// Physical offset of a multi-index, index-count checked always and
    /// bounds checked under the `bounds-check` feature.
    pub fn offset(&self, indices: &[usize]) -> Result<usize, TensorError> {
        if indices.len() != self.rank() {
            return Err(TensorError::WrongNumberOfIndices {
                expected: self.rank(),
                actual: indices.len(),
            });
        }
        if config::BOUNDS_CHECK {
            for (axis, (&index, &extent)) in indices.iter().zip(&self.extents).enumerate() {
                if index >= extent {
                    return Err(TensorError::IndexOutOfBounds {
                        axis,
                        index,
                        extent,
                    });
                }
            }
        }
        Ok(self.offset_unchecked(indices))
    }

    /// Physical offset without any checking. Callers guarantee
    /// `indices.len() == rank` and per-axis bounds.
    #[inline]
    pub fn offset_unchecked(&self, indices: &[usize]) -> usize {
        indices
            .iter()
            .zip(&self.strides)
            .map(|(&i, &s)| i * s)
            .sum()
    }

    /// Multi-index of the `flat`-th logical element (row-major over the
    /// logical extents; padding slots have no flat index).
    pub fn flat_to_coords(&self, flat: usize) -> Result<Shape, TensorError> {
        if flat >= self.logical_len {
            return Err(TensorError::FlatIndexOutOfBounds {
                index: flat,
                len: self.logical_len,
            });
        }
        let mut coords: Shape = SmallVec::from_elem(0, self.rank());
        let mut rest = flat;
        for axis in (0..self.rank()).rev() {
            coords[axis] = rest % self.extents[axis];
            rest /= self.extents[axis];
        }
        Ok(coords)
    }

    /// The layout viewed through `perm`: axis `i` of the result is axis
    /// `perm[i]` of `self`. Stride values travel with their extents, so the
    /// underlying memory is untouched.
    pub fn permuted(&self, perm: &[usize]) -> Self {
        debug_assert!(validate_permutation(perm, self.rank()).is_ok());
        Self {
            extents: perm.iter().map(|&p| self.extents[p]).collect(),
            strides: perm.iter().map(|&p| self.strides[p]).collect(),
            logical_len: self.logical_len,
            physical_len: self.physical_len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strides_come_from_the_padded_shape() {
        let layout = StridedLayout::new(&[2, 3, 5], 4);
        assert_eq!(layout.stride(2), 1);
        assert_eq!(layout.stride(1), 8);
        assert_eq!(layout.stride(0), 24);
        assert_eq!(layout.physical_len(), 48);
        assert_eq!(layout.logical_len(), 30);
    }

    #[test]
    fn offset_skips_padding() {
        let layout = StridedLayout::new(&[3, 5], 4);
        assert_eq!(layout.offset(&[0, 4]).unwrap(), 4);
        // Row 1 starts at the padded row length, not at 5.
        assert_eq!(layout.offset(&[1, 0]).unwrap(), 8);
        assert_eq!(layout.offset(&[2, 4]).unwrap(), 20);
    }

    #[test]
    fn offset_rejects_wrong_arity() {
        let layout = StridedLayout::new(&[3, 5], 4);
        assert!(matches!(
            layout.offset(&[1]),
            Err(TensorError::WrongNumberOfIndices {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[cfg(feature = "bounds-check")]
    #[test]
    fn offset_rejects_out_of_range() {
        let layout = StridedLayout::new(&[3, 5], 4);
        // Index 5 is inside the padded row but outside the logical extent.
        assert!(matches!(
            layout.offset(&[0, 5]),
            Err(TensorError::IndexOutOfBounds {
                axis: 1,
                index: 5,
                extent: 5
            })
        ));
    }

    #[test]
    fn flat_to_coords_is_row_major_over_logical_extents() {
        let layout = StridedLayout::new(&[2, 3], 4);
        assert_eq!(layout.flat_to_coords(0).unwrap().as_slice(), &[0, 0]);
        assert_eq!(layout.flat_to_coords(2).unwrap().as_slice(), &[0, 2]);
        assert_eq!(layout.flat_to_coords(3).unwrap().as_slice(), &[1, 0]);
        assert_eq!(layout.flat_to_coords(5).unwrap().as_slice(), &[1, 2]);
        assert!(layout.flat_to_coords(6).is_err());
    }

    #[test]
    fn permuted_carries_stride_values() {
        let layout = StridedLayout::new(&[3, 5], 4).permuted(&[1, 0]);
        assert_eq!(layout.extents(), &[5, 3]);
        assert_eq!(layout.stride(0), 1);
        assert_eq!(layout.stride(1), 8);
        // Transposed (i, j) reads the original (j, i).
        assert_eq!(layout.offset(&[4, 1]).unwrap(), 12);
    }

    #[test]
    fn permutation_validation() {
        assert!(validate_permutation(&[2, 0, 1], 3).is_ok());
        assert!(validate_permutation(&[0, 0, 1], 3).is_err());
        assert!(validate_permutation(&[0, 3, 1], 3).is_err());
        assert!(validate_permutation(&[0, 1], 3).is_err());
    }
}
