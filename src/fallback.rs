//! Fallback allocator seam
//!
//! The pool only ever serves single-element requests. Everything else, a
//! multi-element request or a single-element request against an exhausted
//! pool, is delegated to an injected [`FallbackAllocator`]. Two
//! implementations ship with the crate: [`SystemFallback`] wraps the
//! platform allocator, [`NoFallback`] refuses every request and turns the
//! facade into a pool-only allocator.

use core::alloc::{GlobalAlloc, Layout};
use core::ptr::NonNull;
use std::alloc::System;

use crate::error::{AllocError, AllocResult};

/// General-purpose allocator consulted when the pool cannot serve a request
///
/// Layout-based, so a single fallback instance can back facades rebound to
/// different element types.
///
/// # Safety
/// Implementors must ensure that:
/// - `allocate` returns memory valid for reads and writes of
///   `layout.size()` bytes, aligned to `layout.align()`, and not aliased by
///   any other live allocation;
/// - `deallocate` is only required to accept pointers previously returned by
///   `allocate` on the same instance with the same layout.
pub unsafe trait FallbackAllocator {
    /// Allocates memory with the given layout
    ///
    /// # Safety
    /// The returned memory is uninitialized and must be initialized before
    /// use. `layout` must have non-zero size.
    ///
    /// # Errors
    /// [`AllocError::OutOfMemory`] when the request cannot be satisfied.
    unsafe fn allocate(&self, layout: Layout) -> AllocResult<NonNull<u8>>;

    /// Deallocates previously allocated memory
    ///
    /// # Safety
    /// `ptr` must have been returned by [`allocate`](Self::allocate) on this
    /// instance with exactly this `layout`, and must not be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

/// Fallback delegating to the platform's default allocator
///
/// Stateless; copies of it are interchangeable, which makes it the natural
/// companion for [`rebind`](crate::PoolAllocator::rebind).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemFallback;

impl SystemFallback {
    /// Creates a new system fallback
    ///
    /// Zero-cost; the type carries no state.
    #[inline]
    pub const fn new() -> Self {
        SystemFallback
    }
}

// SAFETY: delegates directly to the platform allocator, which satisfies the
// validity and aliasing requirements of the trait.
unsafe impl FallbackAllocator for SystemFallback {
    #[inline]
    unsafe fn allocate(&self, layout: Layout) -> AllocResult<NonNull<u8>> {
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }

        // SAFETY: layout has non-zero size (checked above).
        let ptr = unsafe { System.alloc(layout) };
        NonNull::new(ptr).ok_or_else(|| AllocError::out_of_memory(layout.size()))
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() == 0 {
            return;
        }

        // SAFETY: per the trait contract, ptr came from System.alloc with
        // this exact layout.
        unsafe { System.dealloc(ptr.as_ptr(), layout) };
    }
}

/// Fallback that refuses every request
///
/// With this fallback the facade serves requests from the pool only; pool
/// exhaustion and multi-element requests surface as
/// [`AllocError::OutOfMemory`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoFallback;

impl NoFallback {
    /// Creates a new refusing fallback
    #[inline]
    pub const fn new() -> Self {
        NoFallback
    }
}

// SAFETY: never returns a pointer, so the validity requirements hold
// vacuously.
unsafe impl FallbackAllocator for NoFallback {
    unsafe fn allocate(&self, layout: Layout) -> AllocResult<NonNull<u8>> {
        Err(AllocError::out_of_memory(layout.size()))
    }

    unsafe fn deallocate(&self, _ptr: NonNull<u8>, _layout: Layout) {
        debug_assert!(false, "NoFallback never allocated this pointer");
    }
}
