//! Fixed-capacity slot pool with an intrusive free list
//!
//! A [`SlotPool`] pre-reserves storage for a compile-time-fixed number of
//! same-sized slots and hands them out one at a time in O(1). Free slots are
//! threaded into a singly-linked list stored inside the slots themselves, so
//! the pool carries no per-slot bookkeeping in release builds.
//!
//! # Memory Layout
//! ```text
//! [Slot0][Slot1][Slot2][Slot3]...[SlotN-1]
//!    ↓      ↓      ↓      ↓          ↓
//! [free] → [free] → [used]  [free] → [used]   (free list, null-terminated)
//! ```

mod slot;
mod stats;

pub use stats::PoolStats;

use core::mem;
use core::ptr::{self, NonNull};

use crate::error::{AllocError, AllocResult};
use crate::traits::MemoryUsage;

use slot::Slot;

/// Fixed-capacity pool of `N` slots, each sized for one `T`
///
/// Storage lives on the heap, so slot addresses stay stable when the pool
/// value itself is moved; that is what makes [`contains`](Self::contains) a
/// sound membership test for the pool's whole lifetime.
///
/// The pool is move-only. Moving it transfers the storage and free-list head
/// and leaves the source unusable, which the borrow checker enforces. It is
/// deliberately not `Clone`: occupied slots hold elements the pool does not
/// know how to duplicate.
///
/// Dropping the pool frees the storage without running element destructors;
/// the caller that constructed elements in acquired slots is responsible for
/// destroying them first.
pub struct SlotPool<T, const N: usize> {
    /// Backing storage; never reallocated or resized.
    storage: Box<[Slot<T>]>,

    /// Head of the intrusive free list; null means exhausted.
    free_head: *mut Slot<T>,

    /// Number of slots currently on the free list.
    free_len: usize,

    /// Lifetime acquisition count.
    total_acquires: u64,

    /// Lifetime release count.
    total_releases: u64,

    /// Debug-only occupancy tracking for double-free detection.
    #[cfg(debug_assertions)]
    occupied: OccupancyMap,
}

impl<T, const N: usize> SlotPool<T, N> {
    /// Creates a pool with all `N` slots free
    ///
    /// The free list is linked in storage order: slot `i` points to slot
    /// `i + 1`, the last slot terminates the chain. Acquisition order is
    /// therefore ascending storage order until releases occur; after that it
    /// is LIFO over releases.
    pub fn new() -> Self {
        const {
            assert!(N > 0, "cannot create an empty pool");
        }

        let mut slots = Vec::with_capacity(N);
        for _ in 0..N {
            slots.push(Slot {
                next: ptr::null_mut(),
            });
        }

        let mut pool = Self {
            storage: slots.into_boxed_slice(),
            free_head: ptr::null_mut(),
            free_len: 0,
            total_acquires: 0,
            total_releases: 0,
            #[cfg(debug_assertions)]
            occupied: OccupancyMap::new(N),
        };
        pool.link_free_list();

        #[cfg(feature = "logging")]
        tracing::debug!(
            capacity = N,
            slot_size = Self::slot_size(),
            "slot pool initialized"
        );

        pool
    }

    /// Size of one slot in bytes: `max(size_of::<T>(), pointer)` rounded up
    /// to the slot alignment
    pub const fn slot_size() -> usize {
        mem::size_of::<Slot<T>>()
    }

    /// Size of the whole storage array in bytes
    pub const fn footprint() -> usize {
        N * Self::slot_size()
    }

    /// Total number of slots
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of slots currently free
    pub fn free_slots(&self) -> usize {
        self.free_len
    }

    /// Number of slots currently handed out
    pub fn used_slots(&self) -> usize {
        N - self.free_len
    }

    /// Returns true when no free slots remain
    pub fn is_exhausted(&self) -> bool {
        self.free_head.is_null()
    }

    /// Checks whether a pointer lies inside this pool's storage range
    ///
    /// Plain address arithmetic over the storage block; valid for the pool's
    /// whole lifetime because the block never moves.
    pub fn contains(&self, ptr: *const T) -> bool {
        let addr = ptr as usize;
        let base = self.storage.as_ptr() as usize;
        addr >= base && addr < base + Self::footprint()
    }

    /// Acquires one slot from the pool
    ///
    /// Pops the free-list head in O(1) and grants the caller exclusive
    /// ownership of the slot's memory to construct exactly one `T` in place.
    /// The returned pointer is valid until it is passed back to
    /// [`release`](Self::release) or the pool is dropped or
    /// [`reset`](Self::reset).
    ///
    /// # Errors
    /// - [`AllocError::UnsupportedCount`] if `count != 1`; the pool never
    ///   serves multi-element requests.
    /// - [`AllocError::PoolExhausted`] if no free slot remains.
    pub fn acquire(&mut self, count: usize) -> AllocResult<NonNull<T>> {
        if count != 1 {
            return Err(AllocError::unsupported_count(count));
        }

        let head = self.free_head;
        if head.is_null() {
            return Err(AllocError::pool_exhausted(N));
        }

        // SAFETY: head is non-null and on the free list, so it points into
        // storage and is in its free interpretation; `next` is initialized.
        self.free_head = unsafe { (*head).next };
        self.free_len -= 1;
        self.total_acquires += 1;

        #[cfg(debug_assertions)]
        {
            let index = self.slot_index(head);
            assert!(self.occupied.set(index), "free list served an occupied slot");
        }

        // SAFETY: head is non-null; the cast hands the caller the slot's
        // storage, correctly sized and aligned for T by the Slot union.
        Ok(unsafe { NonNull::new_unchecked(head.cast::<T>()) })
    }

    /// Returns a slot to the pool
    ///
    /// Reinterprets the memory as a free-list node and pushes it onto the
    /// head in O(1), so the next acquisition returns this slot again.
    ///
    /// # Errors
    /// [`AllocError::UnsupportedCount`] if `count != 1`. This is a defensive
    /// invariant check; [`PoolAllocator`](crate::PoolAllocator) never issues
    /// such a call.
    ///
    /// # Safety
    /// `ptr` must have been returned by [`acquire`](Self::acquire) on this
    /// pool and not released since. If `T` has a destructor the caller must
    /// have run it already. Violations (double free, foreign pointer) are
    /// undefined behavior; debug builds catch them with an occupancy check.
    pub unsafe fn release(&mut self, ptr: NonNull<T>, count: usize) -> AllocResult<()> {
        if count != 1 {
            return Err(AllocError::unsupported_count(count));
        }

        debug_assert!(
            self.contains(ptr.as_ptr()),
            "released pointer does not belong to this pool"
        );

        let slot = ptr.as_ptr().cast::<Slot<T>>();

        #[cfg(debug_assertions)]
        {
            let offset = slot as usize - self.storage.as_ptr() as usize;
            assert!(
                offset % Self::slot_size() == 0,
                "released pointer is not on a slot boundary"
            );
            let index = offset / Self::slot_size();
            assert!(
                self.occupied.clear(index),
                "double free: slot {index} is already on the free list"
            );
            // Scrub the slot so stale element reads fail loudly.
            // SAFETY: the slot is in range and no longer owned by the caller.
            unsafe { ptr::write_bytes(slot.cast::<u8>(), 0xDD, Self::slot_size()) };
        }

        // SAFETY: the slot is inside storage and, per the caller contract,
        // occupied; writing `next` switches it to the free interpretation.
        unsafe { (*slot).next = self.free_head };
        self.free_head = slot;
        self.free_len += 1;
        self.total_releases += 1;

        Ok(())
    }

    /// Relinks every slot into a fresh free list
    ///
    /// # Safety
    /// All pointers previously returned by [`acquire`](Self::acquire) become
    /// invalid immediately. The caller must ensure no live element remains
    /// in any slot (or has already destroyed them).
    pub unsafe fn reset(&mut self) {
        self.link_free_list();
        #[cfg(debug_assertions)]
        self.occupied.clear_all();
    }

    /// Current statistics snapshot
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            capacity: N,
            free_slots: self.free_len,
            used_slots: self.used_slots(),
            total_acquires: self.total_acquires,
            total_releases: self.total_releases,
            footprint: Self::footprint(),
        }
    }

    /// Chains slot `i` to slot `i + 1`, terminating at the last slot.
    fn link_free_list(&mut self) {
        let base = self.storage.as_mut_ptr();
        for i in 0..N - 1 {
            // SAFETY: i and i + 1 are in bounds; the slots are treated as
            // free nodes, any previous contents are dead.
            unsafe { (*base.add(i)).next = base.add(i + 1) };
        }
        // SAFETY: N > 0, so N - 1 is in bounds.
        unsafe { (*base.add(N - 1)).next = ptr::null_mut() };
        self.free_head = base;
        self.free_len = N;
    }

    #[cfg(debug_assertions)]
    fn slot_index(&self, slot: *mut Slot<T>) -> usize {
        (slot as usize - self.storage.as_ptr() as usize) / Self::slot_size()
    }
}

impl<T, const N: usize> Default for SlotPool<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> MemoryUsage for SlotPool<T, N> {
    fn used_memory(&self) -> usize {
        self.used_slots() * Self::slot_size()
    }

    fn available_memory(&self) -> Option<usize> {
        Some(self.free_len * Self::slot_size())
    }

    fn total_memory(&self) -> Option<usize> {
        Some(Self::footprint())
    }
}

// SAFETY: the pool is a single-owner value; raw pointers only reference its
// own heap storage, which moves with it. Sending the owner to another thread
// is sound when T is Send.
unsafe impl<T: Send, const N: usize> Send for SlotPool<T, N> {}

/// One bit per slot, tracking which slots are currently handed out.
///
/// Exists only in debug builds to catch double frees and foreign in-range
/// pointers; the release-mode acquire/release path carries no per-slot state.
#[cfg(debug_assertions)]
struct OccupancyMap {
    bits: Box<[u64]>,
}

#[cfg(debug_assertions)]
impl OccupancyMap {
    fn new(len: usize) -> Self {
        Self {
            bits: vec![0u64; len.div_ceil(64)].into_boxed_slice(),
        }
    }

    /// Marks a slot occupied; returns false if it already was.
    fn set(&mut self, index: usize) -> bool {
        let (word, bit) = (index / 64, index % 64);
        let was_set = self.bits[word] & (1 << bit) != 0;
        self.bits[word] |= 1 << bit;
        !was_set
    }

    /// Marks a slot free; returns false if it already was.
    fn clear(&mut self, index: usize) -> bool {
        let (word, bit) = (index / 64, index % 64);
        let was_set = self.bits[word] & (1 << bit) != 0;
        self.bits[word] &= !(1 << bit);
        was_set
    }

    fn clear_all(&mut self) {
        self.bits.fill(0);
    }
}
