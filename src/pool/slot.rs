//! Dual-interpretation storage cell

use core::mem::{ManuallyDrop, MaybeUninit};

/// One storage cell of a [`SlotPool`](super::SlotPool).
///
/// A slot has exactly two disjoint interpretations:
///
/// - *free*: `next` holds the address of the next free slot in the intrusive
///   free list, or null at the end of the chain;
/// - *occupied*: the memory holds one live `T`, written in place by the
///   caller that acquired the slot.
///
/// The pool's free-list state alone determines which interpretation is live.
/// The pool never reads or writes `value`; while a slot is occupied, the
/// memory belongs entirely to the caller.
///
/// The union gives every cell `max(size_of::<T>(), size_of::<*mut _>())`
/// size and `max(align_of::<T>(), align_of::<*mut _>())` alignment without
/// manual padding arithmetic.
#[repr(C)]
pub(crate) union Slot<T> {
    /// Link to the next free slot; meaningful only while the slot is free.
    pub(crate) next: *mut Slot<T>,
    /// Element storage; meaningful only while the slot is occupied.
    /// `ManuallyDrop` keeps the field legal in a union for non-`Copy` `T`;
    /// the pool never drops through it, element teardown is the caller's.
    pub(crate) value: ManuallyDrop<MaybeUninit<T>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::{align_of, size_of};

    #[test]
    fn slot_fits_link_and_element() {
        assert!(size_of::<Slot<u8>>() >= size_of::<*mut Slot<u8>>());
        assert!(size_of::<Slot<[u8; 64]>>() >= 64);
        assert!(align_of::<Slot<u8>>() >= align_of::<*mut Slot<u8>>());

        #[repr(align(32))]
        struct Overaligned([u8; 4]);
        assert_eq!(align_of::<Slot<Overaligned>>(), 32);
    }

    #[test]
    fn slot_admits_non_copy_elements() {
        assert!(size_of::<Slot<String>>() >= size_of::<String>());
        assert!(size_of::<Slot<Vec<u64>>>() >= size_of::<Vec<u64>>());
    }

    #[test]
    fn link_round_trips() {
        let mut slots = [
            Slot::<u64> {
                next: core::ptr::null_mut(),
            },
            Slot::<u64> {
                next: core::ptr::null_mut(),
            },
        ];
        let second: *mut Slot<u64> = &mut slots[1];
        slots[0].next = second;
        // SAFETY: slot 0 is in its free interpretation, `next` was just written
        assert_eq!(unsafe { slots[0].next }, second);
    }
}
