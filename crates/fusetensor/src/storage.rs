//! Storage backends.
//!
//! A [`Buffer`] owns the physical (padded) element array of a tensor. Two
//! implementations are provided: [`AlignedBuffer`], a heap allocation aligned
//! for vector loads, and [`InlineBuffer`], a fixed-capacity array suitable
//! for allocation-free use.

use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;
use std::alloc::{alloc, dealloc, handle_alloc_error, Layout};

/// Cache-line alignment used by both backends. A multiple of every vector
/// width the kernels use.
pub const BUFFER_ALIGN: usize = 64;

/// Owned physical storage for tensor elements.
///
/// `zeros(len)` produces `len` default-valued elements; for the supported
/// float types that is `0.0`, which keeps freshly padded slots zero.
pub trait Buffer<T: Copy + Default>: Clone + fmt::Debug {
    fn zeros(len: usize) -> Self;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn as_slice(&self) -> &[T];

    fn as_mut_slice(&mut self) -> &mut [T];
}

/// Heap storage aligned to [`BUFFER_ALIGN`] bytes.
///
/// Allocation failure is fatal: the process aborts through
/// [`handle_alloc_error`] rather than surfacing a recoverable error, since a
/// tensor without its storage has no usable state.
pub struct AlignedBuffer<T> {
    ptr: NonNull<T>,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T: Copy + Default> AlignedBuffer<T> {
    fn layout(len: usize) -> Layout {
        Layout::from_size_align(len * core::mem::size_of::<T>(), BUFFER_ALIGN)
            .expect("buffer size overflows the address space")
    }

    fn alloc_uninit(len: usize) -> NonNull<T> {
        if len == 0 {
            return NonNull::dangling();
        }
        let layout = Self::layout(len);
        // SAFETY: layout has non-zero size here.
        let raw = unsafe { alloc(layout) } as *mut T;
        match NonNull::new(raw) {
            Some(ptr) => ptr,
            None => handle_alloc_error(layout),
        }
    }
}

impl<T: Copy + Default + fmt::Debug> Buffer<T> for AlignedBuffer<T> {
    fn zeros(len: usize) -> Self {
        let ptr = Self::alloc_uninit(len);
        for i in 0..len {
            // SAFETY: i < len, freshly allocated and exclusively owned.
            unsafe { ptr.as_ptr().add(i).write(T::default()) };
        }
        Self {
            ptr,
            len,
            _marker: PhantomData,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn as_slice(&self) -> &[T] {
        // SAFETY: ptr is valid for len initialized elements.
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, and &mut self guarantees exclusivity.
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Copy + Default> Clone for AlignedBuffer<T> {
    fn clone(&self) -> Self {
        let ptr = Self::alloc_uninit(self.len);
        if self.len > 0 {
            // SAFETY: both regions hold self.len elements and cannot overlap.
            unsafe {
                core::ptr::copy_nonoverlapping(self.ptr.as_ptr(), ptr.as_ptr(), self.len);
            }
        }
        Self {
            ptr,
            len: self.len,
            _marker: PhantomData,
        }
    }
}

impl<T> Drop for AlignedBuffer<T> {
    fn drop(&mut self) {
        if self.len == 0 {
            return;
        }
        let layout = Layout::from_size_align(self.len * core::mem::size_of::<T>(), BUFFER_ALIGN)
            .expect("layout was valid at allocation time");
        // SAFETY: allocated in alloc_uninit with this exact layout.
        unsafe { dealloc(self.ptr.as_ptr() as *mut u8, layout) };
    }
}

impl<T: Copy + Default + fmt::Debug> fmt::Debug for AlignedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice().iter()).finish()
    }
}

impl<T: Copy + Default + PartialEq + fmt::Debug> PartialEq for AlignedBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

// SAFETY: the buffer uniquely owns its allocation; sharing follows T.
unsafe impl<T: Send> Send for AlignedBuffer<T> {}
unsafe impl<T: Sync> Sync for AlignedBuffer<T> {}

/// Fixed-capacity storage held inline, aligned like [`AlignedBuffer`].
///
/// `CAP` must cover the *physical* (padded) size of the tensor placed in it;
/// `zeros` panics when asked for more. Useful where heap allocation is
/// undesirable and shapes are known up front.
#[derive(Clone)]
pub struct InlineBuffer<T, const CAP: usize> {
    data: AlignedArray<T, CAP>,
    len: usize,
}

#[derive(Clone, Copy)]
#[repr(align(64))]
struct AlignedArray<T, const CAP: usize>([T; CAP]);

impl<T: Copy + Default + fmt::Debug, const CAP: usize> Buffer<T> for InlineBuffer<T, CAP> {
    fn zeros(len: usize) -> Self {
        assert!(
            len <= CAP,
            "inline buffer capacity {CAP} too small for {len} elements"
        );
        Self {
            data: AlignedArray([T::default(); CAP]),
            len,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn as_slice(&self) -> &[T] {
        &self.data.0[..self.len]
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data.0[..self.len]
    }
}

impl<T: Copy + Default + fmt::Debug, const CAP: usize> fmt::Debug for InlineBuffer<T, CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice().iter()).finish()
    }
}

impl<T: Copy + Default + PartialEq + fmt::Debug, const CAP: usize> PartialEq for InlineBuffer<T, CAP> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}
