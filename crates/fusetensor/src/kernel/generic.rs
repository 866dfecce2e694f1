//! Width-1 fallback kernel.
//!
//! Always available; used whenever the target offers no vector unit we know
//! about. Each "vector" is a single element, so the evaluation loop's
//! vectorized path degenerates to the scalar path with no special casing.

use core::marker::PhantomData;
use core::ops::{Add, Div, Mul, Sub};

use super::Microkernel;

/// One-lane kernel over any arithmetic `Copy` type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarKernel<T>(PhantomData<T>);

impl<T> Microkernel<T> for ScalarKernel<T>
where
    T: Copy + PartialOrd + Add<Output = T> + Sub<Output = T> + Mul<Output = T> + Div<Output = T>,
{
    type Vector = T;

    const WIDTH: usize = 1;

    #[inline(always)]
    fn splat(value: T) -> T {
        value
    }

    #[inline(always)]
    fn load(src: &[T]) -> T {
        src[0]
    }

    #[inline(always)]
    fn store(dst: &mut [T], v: T) {
        dst[0] = v;
    }

    #[inline(always)]
    fn gather(src: &[T], offsets: &[usize]) -> T {
        src[offsets[0]]
    }

    #[inline(always)]
    fn add(a: T, b: T) -> T {
        a + b
    }

    #[inline(always)]
    fn sub(a: T, b: T) -> T {
        a - b
    }

    #[inline(always)]
    fn mul(a: T, b: T) -> T {
        a * b
    }

    #[inline(always)]
    fn div(a: T, b: T) -> T {
        a / b
    }

    #[inline(always)]
    fn min(a: T, b: T) -> T {
        if a < b {
            a
        } else {
            b
        }
    }

    #[inline(always)]
    fn max(a: T, b: T) -> T {
        if a > b {
            a
        } else {
            b
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type K = ScalarKernel<f64>;

    #[test]
    fn width_is_one() {
        assert_eq!(K::WIDTH, 1);
    }

    #[test]
    fn load_store_roundtrip() {
        let src = [3.5, 0.0];
        let mut dst = [0.0];
        K::store(&mut dst, K::load(&src));
        assert_eq!(dst[0], 3.5);
    }

    #[test]
    fn gather_uses_first_offset() {
        let src = [10.0, 20.0, 30.0];
        assert_eq!(K::gather(&src, &[2]), 30.0);
    }

    #[test]
    fn lane_arithmetic() {
        assert_eq!(K::add(2.0, 3.0), 5.0);
        assert_eq!(K::sub(2.0, 3.0), -1.0);
        assert_eq!(K::mul(2.0, 3.0), 6.0);
        assert_eq!(K::div(3.0, 2.0), 1.5);
    }

    #[test]
    fn lane_min_max() {
        assert_eq!(K::min(2.0, 3.0), 2.0);
        assert_eq!(K::min(3.0, 2.0), 2.0);
        assert_eq!(K::max(2.0, 3.0), 3.0);
        assert_eq!(K::max(-2.0, -3.0), -2.0);
    }
}
