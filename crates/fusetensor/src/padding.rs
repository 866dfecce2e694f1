//! Padding arithmetic.
//!
//! Physical storage pads the last (fastest-varying) axis up to the kernel
//! width so every logical row starts at a vector-aligned offset and can be
//! processed in whole vector chunks. Other axes are stored at their logical
//! extent.

use crate::layout::Shape;

/// Round `extent` up to the next multiple of `width`.
///
/// ```
/// use fusetensor::padding::padded_extent;
/// assert_eq!(padded_extent(10, 4), 12);
/// assert_eq!(padded_extent(8, 4), 8);
/// assert_eq!(padded_extent(3, 1), 3);
/// ```
#[inline]
pub fn padded_extent(extent: usize, width: usize) -> usize {
    debug_assert!(width >= 1);
    extent.div_ceil(width) * width
}

/// The physical shape: logical extents with the last axis padded to `width`.
pub fn padded_shape(shape: &[usize], width: usize) -> Shape {
    let mut padded: Shape = shape.iter().copied().collect();
    if let Some(last) = padded.last_mut() {
        *last = padded_extent(*last, width);
    }
    padded
}

/// Number of physical elements backing a tensor of the given logical shape.
pub fn physical_size(shape: &[usize], width: usize) -> usize {
    padded_shape(shape, width).iter().product()
}
