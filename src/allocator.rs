//! Pool allocator facade
//!
//! [`PoolAllocator`] is the allocator-contract surface containers consume:
//! single-element requests go to the owned [`SlotPool`]; everything else,
//! meaning multi-element requests or single-element requests against an
//! exhausted pool, goes to the injected [`FallbackAllocator`]. Deallocation
//! routes by
//! re-deriving pointer membership from the pool's address range; nothing is
//! tracked per pointer.

use core::alloc::Layout;
use core::mem;
use core::ptr::NonNull;

use crate::error::{AllocError, AllocResult};
use crate::fallback::{FallbackAllocator, SystemFallback};
use crate::pool::{PoolStats, SlotPool};
use crate::traits::MemoryUsage;

/// Fixed-pool allocator with transparent fallback
///
/// `T` is the element type, `N` the compile-time pool capacity in elements,
/// `F` the fallback strategy. The facade owns exactly one pool and one
/// fallback instance and carries no other state.
///
/// Like [`SlotPool`], the facade is move-only; moving it transfers the pool
/// storage intact (slot addresses are heap-stable), and the moved-from value
/// cannot be touched again.
///
/// # Examples
/// ```
/// use slotpool::PoolAllocator;
///
/// let mut alloc: PoolAllocator<u64, 8> = PoolAllocator::new();
///
/// let ptr = alloc.allocate(1)?;
/// unsafe { ptr.as_ptr().write(42) };
/// assert!(alloc.pool().contains(ptr.as_ptr()));
///
/// // SAFETY: ptr came from this allocator with count 1
/// unsafe { alloc.deallocate(ptr, 1)? };
/// # Ok::<(), slotpool::AllocError>(())
/// ```
pub struct PoolAllocator<T, const N: usize, F: FallbackAllocator = SystemFallback> {
    pool: SlotPool<T, N>,
    fallback: F,
}

impl<T, const N: usize> PoolAllocator<T, N, SystemFallback> {
    /// Creates an allocator backed by the platform allocator
    pub fn new() -> Self {
        Self::with_fallback(SystemFallback::new())
    }
}

impl<T, const N: usize, F: FallbackAllocator> PoolAllocator<T, N, F> {
    /// Creates an allocator with an explicit fallback strategy
    pub fn with_fallback(fallback: F) -> Self {
        Self {
            pool: SlotPool::new(),
            fallback,
        }
    }

    /// Allocates storage for `count` elements of `T`
    ///
    /// `count == 1` is served from the pool when a slot is free; pool
    /// exhaustion is recovered by delegating to the fallback and never
    /// surfaces to the caller. Any other count bypasses the pool entirely.
    /// Zero-sized requests (count 0, or a zero-sized `T`) return a typed
    /// dangling pointer without touching pool or fallback.
    ///
    /// # Errors
    /// - [`AllocError::OutOfMemory`] when the fallback cannot satisfy the
    ///   request.
    /// - [`AllocError::SizeOverflow`] when `count * size_of::<T>()`
    ///   overflows.
    pub fn allocate(&mut self, count: usize) -> AllocResult<NonNull<T>> {
        if mem::size_of::<T>() == 0 || count == 0 {
            return Ok(NonNull::dangling());
        }

        if count == 1 {
            match self.pool.acquire(1) {
                Ok(ptr) => return Ok(ptr),
                Err(AllocError::PoolExhausted { .. }) => {
                    #[cfg(feature = "logging")]
                    tracing::trace!(capacity = N, "pool exhausted, delegating to fallback");
                }
                // Defensive: acquire(1) can only fail with PoolExhausted.
                Err(err) => return Err(err),
            }
        }
        self.allocate_from_fallback(count)
    }

    /// Returns storage for `count` elements of `T`
    ///
    /// Membership is re-derived from the pointer address alone: pointers
    /// inside the pool's storage range release their slot, everything else
    /// is handed to the fallback.
    ///
    /// # Errors
    /// [`AllocError::InvalidDeallocation`] when `ptr` is pool-owned but
    /// `count != 1`. A pool slot only ever represents one element, so the
    /// call contradicts the matching `allocate`.
    ///
    /// # Safety
    /// `ptr` must have been returned by [`allocate`](Self::allocate) on this
    /// allocator with the same `count`, and must not have been deallocated
    /// since. If `T` has a destructor the caller must have run it for every
    /// element already.
    pub unsafe fn deallocate(&mut self, ptr: NonNull<T>, count: usize) -> AllocResult<()> {
        if self.pool.contains(ptr.as_ptr()) {
            if count != 1 {
                return Err(AllocError::invalid_deallocation(count));
            }
            // SAFETY: in range with count 1; acquisition/occupancy is the
            // caller's contract, forwarded from this function's own.
            return unsafe { self.pool.release(ptr, 1) };
        }

        let layout = array_layout::<T>(count)?;
        if layout.size() != 0 {
            // SAFETY: out-of-range pointers were allocated by the fallback
            // with this exact layout (caller contract).
            unsafe { self.fallback.deallocate(ptr.cast(), layout) };
        }
        Ok(())
    }

    /// Re-parameterizes the allocator for element type `U`
    ///
    /// The result owns a fresh, independent pool with the same slot count
    /// and `U`'s layout, plus a clone of the fallback strategy. No state is
    /// shared with `self`.
    pub fn rebind<U>(&self) -> PoolAllocator<U, N, F>
    where
        F: Clone,
    {
        PoolAllocator {
            pool: SlotPool::new(),
            fallback: self.fallback.clone(),
        }
    }

    /// Shared access to the owned pool
    pub fn pool(&self) -> &SlotPool<T, N> {
        &self.pool
    }

    /// Pool statistics snapshot
    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }

    fn allocate_from_fallback(&mut self, count: usize) -> AllocResult<NonNull<T>> {
        let layout = array_layout::<T>(count)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }

        // SAFETY: layout is well-formed with non-zero size.
        let ptr = unsafe { self.fallback.allocate(layout)? };
        Ok(ptr.cast())
    }
}

impl<T, const N: usize, F: FallbackAllocator + Default> Default for PoolAllocator<T, N, F> {
    fn default() -> Self {
        Self::with_fallback(F::default())
    }
}

/// Structural equivalence across arbitrary parameterizations
///
/// Two allocators are interchangeable for allocator-propagation purposes
/// when their slot footprint and pool capacity match. The comparison is
/// purely structural; equivalent allocators still own disjoint pools.
impl<T, U, const N: usize, const M: usize, F, G> PartialEq<PoolAllocator<U, M, G>>
    for PoolAllocator<T, N, F>
where
    F: FallbackAllocator,
    G: FallbackAllocator,
{
    fn eq(&self, _other: &PoolAllocator<U, M, G>) -> bool {
        SlotPool::<T, N>::slot_size() == SlotPool::<U, M>::slot_size() && N == M
    }
}

impl<T, const N: usize, F: FallbackAllocator> Eq for PoolAllocator<T, N, F> {}

impl<T, const N: usize, F: FallbackAllocator> MemoryUsage for PoolAllocator<T, N, F> {
    fn used_memory(&self) -> usize {
        self.pool.used_memory()
    }

    fn available_memory(&self) -> Option<usize> {
        self.pool.available_memory()
    }

    fn total_memory(&self) -> Option<usize> {
        self.pool.total_memory()
    }
}

fn array_layout<T>(count: usize) -> AllocResult<Layout> {
    Layout::array::<T>(count).map_err(|_| AllocError::size_overflow(count, mem::size_of::<T>()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::NoFallback;

    #[test]
    fn single_elements_come_from_the_pool() {
        let mut alloc: PoolAllocator<u64, 4> = PoolAllocator::new();
        let ptr = alloc.allocate(1).unwrap();
        assert!(alloc.pool().contains(ptr.as_ptr()));
        // SAFETY: ptr was allocated above with count 1
        unsafe { alloc.deallocate(ptr, 1).unwrap() };
    }

    #[test]
    fn multi_element_requests_bypass_the_pool() {
        let mut alloc: PoolAllocator<u64, 4> = PoolAllocator::new();
        let ptr = alloc.allocate(2).unwrap();
        assert!(!alloc.pool().contains(ptr.as_ptr()));
        assert_eq!(alloc.pool().free_slots(), 4);
        // SAFETY: ptr was allocated above with count 2
        unsafe { alloc.deallocate(ptr, 2).unwrap() };
    }

    #[test]
    fn in_range_deallocate_with_wrong_count_is_rejected() {
        let mut alloc: PoolAllocator<u64, 4> = PoolAllocator::new();
        let ptr = alloc.allocate(1).unwrap();

        // SAFETY: ptr is live; the call is rejected before touching the pool
        let err = unsafe { alloc.deallocate(ptr, 2) }.unwrap_err();
        assert!(err.is_invalid_deallocation());

        // The slot is still owned by the caller and can be released properly.
        // SAFETY: ptr was allocated above with count 1
        unsafe { alloc.deallocate(ptr, 1).unwrap() };
    }

    #[test]
    fn zst_elements_never_touch_the_pool() {
        let mut alloc: PoolAllocator<(), 2> = PoolAllocator::new();
        let ptr = alloc.allocate(1).unwrap();
        assert_eq!(ptr, NonNull::dangling());
        assert_eq!(alloc.pool().used_slots(), 0);
        assert_eq!(alloc.stats().total_acquires, 0);
        // SAFETY: zero-sized deallocation touches nothing
        unsafe { alloc.deallocate(ptr, 1).unwrap() };
        assert_eq!(alloc.pool().free_slots(), 2);
    }

    #[test]
    fn zero_sized_requests_are_dangling() {
        let mut alloc: PoolAllocator<u64, 2> = PoolAllocator::new();
        let ptr = alloc.allocate(0).unwrap();
        assert_eq!(ptr, NonNull::dangling());
        assert_eq!(alloc.pool().free_slots(), 2);
        // SAFETY: zero-count deallocation touches nothing
        unsafe { alloc.deallocate(ptr, 0).unwrap() };
    }

    #[test]
    fn no_fallback_surfaces_out_of_memory() {
        let mut alloc: PoolAllocator<u64, 2, NoFallback> =
            PoolAllocator::with_fallback(NoFallback::new());

        let a = alloc.allocate(1).unwrap();
        let b = alloc.allocate(1).unwrap();
        assert!(alloc.allocate(1).unwrap_err().is_out_of_memory());
        assert!(alloc.allocate(2).unwrap_err().is_out_of_memory());

        // SAFETY: both pointers were allocated above with count 1
        unsafe {
            alloc.deallocate(a, 1).unwrap();
            alloc.deallocate(b, 1).unwrap();
        }
    }

    #[test]
    fn size_overflow_is_reported() {
        let mut alloc: PoolAllocator<u64, 2> = PoolAllocator::new();
        let err = alloc.allocate(usize::MAX / 2).unwrap_err();
        assert_eq!(err, AllocError::size_overflow(usize::MAX / 2, 8));
    }

    #[test]
    fn structural_equality() {
        let a: PoolAllocator<u64, 8> = PoolAllocator::new();
        let b: PoolAllocator<i64, 8> = PoolAllocator::new();
        let c: PoolAllocator<u64, 16> = PoolAllocator::new();
        let d: PoolAllocator<[u8; 64], 8> = PoolAllocator::new();

        assert!(a == b); // same slot footprint, same capacity
        assert!(a != c); // capacity differs
        assert!(a != d); // slot footprint differs
    }

    #[test]
    fn rebound_allocator_is_independent() {
        let mut a: PoolAllocator<[u8; 16], 5> = PoolAllocator::new();
        let held = a.allocate(1).unwrap();

        let mut b = a.rebind::<u32>();
        let ptr = b.allocate(1).unwrap();
        assert!(b.pool().contains(ptr.as_ptr()));
        assert!(!a.pool().contains(ptr.as_ptr() as *const [u8; 16]));
        assert_eq!(a.pool().used_slots(), 1);
        assert_eq!(b.pool().used_slots(), 1);

        // SAFETY: each pointer goes back to the allocator that produced it
        unsafe {
            a.deallocate(held, 1).unwrap();
            b.deallocate(ptr, 1).unwrap();
        }
    }
}
