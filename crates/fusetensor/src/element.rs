//! Scalar element trait.
//!
//! [`Element`] collects the arithmetic and numeric helpers the engine needs
//! from a scalar type, plus the build-time choice of SIMD kernel. Only the
//! real floating-point types are supported; the matrix algorithms rely on
//! `abs`/`sqrt` and a meaningful ordering.

use core::fmt::Debug;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::config::DEFAULT_TOLERANCE;
use crate::kernel::Microkernel;

/// Scalar types the engine can evaluate over.
pub trait Element:
    Copy
    + Debug
    + Default
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Send
    + Sync
    + 'static
{
    /// Microkernel evaluating this type, chosen at build time.
    type Kernel: Microkernel<Self>;

    fn zero() -> Self;
    fn one() -> Self;
    fn abs(self) -> Self;
    fn sqrt(self) -> Self;

    /// Lossy conversion from an index, for sequential fills.
    fn from_index(index: usize) -> Self;

    /// Default tolerance for approximate comparison at this precision.
    fn tolerance() -> Self;
}

impl Element for f64 {
    #[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
    type Kernel = crate::kernel::avx2::Avx2F64Kernel;
    #[cfg(not(all(target_arch = "x86_64", target_feature = "avx2")))]
    type Kernel = crate::kernel::generic::ScalarKernel<f64>;

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn abs(self) -> Self {
        f64::abs(self)
    }

    #[inline]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    #[inline]
    fn from_index(index: usize) -> Self {
        index as f64
    }

    #[inline]
    fn tolerance() -> Self {
        DEFAULT_TOLERANCE
    }
}

impl Element for f32 {
    #[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
    type Kernel = crate::kernel::avx2::Avx2F32Kernel;
    #[cfg(not(all(target_arch = "x86_64", target_feature = "avx2")))]
    type Kernel = crate::kernel::generic::ScalarKernel<f32>;

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn abs(self) -> Self {
        f32::abs(self)
    }

    #[inline]
    fn sqrt(self) -> Self {
        f32::sqrt(self)
    }

    #[inline]
    fn from_index(index: usize) -> Self {
        index as f32
    }

    // Single precision cannot resolve the f64 default; use a looser bound.
    #[inline]
    fn tolerance() -> Self {
        1e-5
    }
}

/// The packed vector type of an element's kernel.
pub type Vector<T> = <<T as Element>::Kernel as Microkernel<T>>::Vector;

/// Lane count of an element's kernel.
#[inline]
pub fn width_of<T: Element>() -> usize {
    <T::Kernel as Microkernel<T>>::WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f64_helpers() {
        assert_eq!(f64::zero(), 0.0);
        assert_eq!(f64::one(), 1.0);
        assert_eq!(Element::abs(-2.5f64), 2.5);
        assert_eq!(Element::sqrt(9.0f64), 3.0);
        assert_eq!(f64::from_index(7), 7.0);
    }

    #[test]
    fn kernel_width_is_positive() {
        assert!(width_of::<f64>() >= 1);
        assert!(width_of::<f32>() >= 1);
    }
}
