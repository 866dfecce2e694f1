//! AVX2 kernels for `f64` (4 lanes) and `f32` (8 lanes).
//!
//! Compiled only when the build targets x86_64 with `avx2` enabled
//! (`RUSTFLAGS="-C target-feature=+avx2"` or a capable `-C target-cpu`), so
//! the intrinsics need no runtime dispatch.

#![allow(unsafe_code)]

use core::arch::x86_64::{
    __m256, __m256d, _mm256_add_pd, _mm256_add_ps, _mm256_div_pd, _mm256_div_ps, _mm256_loadu_pd,
    _mm256_loadu_ps, _mm256_max_pd, _mm256_max_ps, _mm256_min_pd, _mm256_min_ps, _mm256_mul_pd,
    _mm256_mul_ps, _mm256_set1_pd, _mm256_set1_ps, _mm256_set_pd, _mm256_set_ps, _mm256_storeu_pd,
    _mm256_storeu_ps, _mm256_sub_pd, _mm256_sub_ps,
};

use super::Microkernel;

/// 4-lane double-precision kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct Avx2F64Kernel;

impl Microkernel<f64> for Avx2F64Kernel {
    type Vector = __m256d;

    const WIDTH: usize = 4;

    #[inline(always)]
    fn splat(value: f64) -> __m256d {
        unsafe { _mm256_set1_pd(value) }
    }

    #[inline(always)]
    fn load(src: &[f64]) -> __m256d {
        debug_assert!(src.len() >= Self::WIDTH);
        unsafe { _mm256_loadu_pd(src.as_ptr()) }
    }

    #[inline(always)]
    fn store(dst: &mut [f64], v: __m256d) {
        debug_assert!(dst.len() >= Self::WIDTH);
        unsafe { _mm256_storeu_pd(dst.as_mut_ptr(), v) }
    }

    #[inline(always)]
    fn gather(src: &[f64], offsets: &[usize]) -> __m256d {
        debug_assert_eq!(offsets.len(), Self::WIDTH);
        // _mm256_set_pd takes lanes high-to-low.
        unsafe {
            _mm256_set_pd(
                src[offsets[3]],
                src[offsets[2]],
                src[offsets[1]],
                src[offsets[0]],
            )
        }
    }

    #[inline(always)]
    fn add(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_add_pd(a, b) }
    }

    #[inline(always)]
    fn sub(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_sub_pd(a, b) }
    }

    #[inline(always)]
    fn mul(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_mul_pd(a, b) }
    }

    #[inline(always)]
    fn div(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_div_pd(a, b) }
    }

    #[inline(always)]
    fn min(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_min_pd(a, b) }
    }

    #[inline(always)]
    fn max(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_max_pd(a, b) }
    }
}

/// 8-lane single-precision kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct Avx2F32Kernel;

impl Microkernel<f32> for Avx2F32Kernel {
    type Vector = __m256;

    const WIDTH: usize = 8;

    #[inline(always)]
    fn splat(value: f32) -> __m256 {
        unsafe { _mm256_set1_ps(value) }
    }

    #[inline(always)]
    fn load(src: &[f32]) -> __m256 {
        debug_assert!(src.len() >= Self::WIDTH);
        unsafe { _mm256_loadu_ps(src.as_ptr()) }
    }

    #[inline(always)]
    fn store(dst: &mut [f32], v: __m256) {
        debug_assert!(dst.len() >= Self::WIDTH);
        unsafe { _mm256_storeu_ps(dst.as_mut_ptr(), v) }
    }

    #[inline(always)]
    fn gather(src: &[f32], offsets: &[usize]) -> __m256 {
        debug_assert_eq!(offsets.len(), Self::WIDTH);
        unsafe {
            _mm256_set_ps(
                src[offsets[7]],
                src[offsets[6]],
                src[offsets[5]],
                src[offsets[4]],
                src[offsets[3]],
                src[offsets[2]],
                src[offsets[1]],
                src[offsets[0]],
            )
        }
    }

    #[inline(always)]
    fn add(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_add_ps(a, b) }
    }

    #[inline(always)]
    fn sub(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_sub_ps(a, b) }
    }

    #[inline(always)]
    fn mul(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_mul_ps(a, b) }
    }

    #[inline(always)]
    fn div(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_div_ps(a, b) }
    }

    #[inline(always)]
    fn min(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_min_ps(a, b) }
    }

    #[inline(always)]
    fn max(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_max_ps(a, b) }
    }
}
