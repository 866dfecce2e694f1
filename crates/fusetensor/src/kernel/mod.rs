//! SIMD microkernels.
//!
//! A [`Microkernel`] packages the handful of vector primitives the evaluation
//! loop needs: splat, aligned load/store, per-lane gather, and elementwise
//! arithmetic. Every scalar type selects its kernel at build time through
//! [`Element::Kernel`](crate::element::Element::Kernel): AVX2 kernels when the
//! target supports them, the width-1 [`ScalarKernel`](generic::ScalarKernel)
//! everywhere else. The rest of the crate is written against the trait only,
//! so both paths share one evaluation loop.

pub mod generic;

#[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
pub mod avx2;

/// Largest lane count any kernel in this crate uses. Gather offset scratch
/// buffers are sized with this.
pub const MAX_WIDTH: usize = 8;

/// Vector arithmetic over `WIDTH` lanes of `T`.
///
/// `load` and `store` operate on the first `WIDTH` elements of the given
/// slice; callers must pass slices of at least that length, positioned at a
/// vector-aligned offset inside an aligned buffer. `gather` reads one element
/// per lane at the given offsets (`offsets.len() == WIDTH`).
pub trait Microkernel<T: Copy> {
    /// The packed register type (`T` itself for the scalar kernel).
    type Vector: Copy;

    /// Number of lanes.
    const WIDTH: usize;

    /// Broadcast one value to all lanes.
    fn splat(value: T) -> Self::Vector;

    /// Load `WIDTH` consecutive elements from the front of `src`.
    fn load(src: &[T]) -> Self::Vector;

    /// Store all lanes to the front of `dst`.
    fn store(dst: &mut [T], v: Self::Vector);

    /// Read one element per lane: lane `i` comes from `src[offsets[i]]`.
    fn gather(src: &[T], offsets: &[usize]) -> Self::Vector;

    fn add(a: Self::Vector, b: Self::Vector) -> Self::Vector;
    fn sub(a: Self::Vector, b: Self::Vector) -> Self::Vector;
    fn mul(a: Self::Vector, b: Self::Vector) -> Self::Vector;
    fn div(a: Self::Vector, b: Self::Vector) -> Self::Vector;

    /// Lanewise minimum, with the AVX comparison semantics: lane `i` is
    /// `if a[i] < b[i] { a[i] } else { b[i] }`.
    fn min(a: Self::Vector, b: Self::Vector) -> Self::Vector;
    /// Lanewise maximum: lane `i` is `if a[i] > b[i] { a[i] } else { b[i] }`.
    fn max(a: Self::Vector, b: Self::Vector) -> Self::Vector;
}
