//! Error types for allocation operations

use thiserror::Error;

/// Result type for allocation operations
pub type AllocResult<T> = Result<T, AllocError>;

/// Allocation errors
///
/// The variants split into three groups with different propagation rules:
///
/// - [`PoolExhausted`](AllocError::PoolExhausted) is an expected condition.
///   The [`PoolAllocator`](crate::PoolAllocator) facade recovers from it by
///   delegating to the fallback allocator, so it never surfaces from
///   [`allocate`](crate::PoolAllocator::allocate).
/// - [`OutOfMemory`](AllocError::OutOfMemory) is fatal and surfaces to the
///   caller verbatim: the fallback itself could not satisfy the request.
/// - [`UnsupportedCount`](AllocError::UnsupportedCount),
///   [`InvalidDeallocation`](AllocError::InvalidDeallocation) and
///   [`SizeOverflow`](AllocError::SizeOverflow) report contract violations
///   and bad request arithmetic; they are never recovered internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocError {
    /// The pool has no free slots left
    #[error("pool exhausted (capacity: {capacity} slots)")]
    PoolExhausted {
        /// Total number of slots in the exhausted pool
        capacity: usize,
    },

    /// The pool was asked to serve a count other than one
    #[error("pool serves exactly one element per call, got count {count}")]
    UnsupportedCount {
        /// The rejected element count
        count: usize,
    },

    /// The fallback allocator could not satisfy the request
    #[error("out of memory: fallback could not provide {requested} bytes")]
    OutOfMemory {
        /// Requested allocation size in bytes
        requested: usize,
    },

    /// A pool-owned pointer was deallocated with a count other than one
    #[error("invalid deallocation: pool-owned pointer released with count {count}")]
    InvalidDeallocation {
        /// The count passed to the offending deallocate call
        count: usize,
    },

    /// Computing `count * element size` overflowed
    #[error("size overflow: {count} elements of {elem_size} bytes each")]
    SizeOverflow {
        /// Requested element count
        count: usize,
        /// Size of a single element in bytes
        elem_size: usize,
    },
}

impl AllocError {
    /// Create a pool exhaustion error
    pub fn pool_exhausted(capacity: usize) -> Self {
        Self::PoolExhausted { capacity }
    }

    /// Create an unsupported count error
    pub fn unsupported_count(count: usize) -> Self {
        Self::UnsupportedCount { count }
    }

    /// Create an out of memory error
    pub fn out_of_memory(requested: usize) -> Self {
        Self::OutOfMemory { requested }
    }

    /// Create an invalid deallocation error
    pub fn invalid_deallocation(count: usize) -> Self {
        Self::InvalidDeallocation { count }
    }

    /// Create a size overflow error
    pub fn size_overflow(count: usize, elem_size: usize) -> Self {
        Self::SizeOverflow { count, elem_size }
    }

    /// Returns true for pool exhaustion
    pub fn is_pool_exhausted(&self) -> bool {
        matches!(self, Self::PoolExhausted { .. })
    }

    /// Returns true for fallback exhaustion
    pub fn is_out_of_memory(&self) -> bool {
        matches!(self, Self::OutOfMemory { .. })
    }

    /// Returns true for an invalid deallocation
    pub fn is_invalid_deallocation(&self) -> bool {
        matches!(self, Self::InvalidDeallocation { .. })
    }

    /// Returns true for an unsupported element count
    pub fn is_unsupported_count(&self) -> bool {
        matches!(self, Self::UnsupportedCount { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            AllocError::pool_exhausted(16).to_string(),
            "pool exhausted (capacity: 16 slots)"
        );
        assert_eq!(
            AllocError::out_of_memory(4096).to_string(),
            "out of memory: fallback could not provide 4096 bytes"
        );
        assert_eq!(
            AllocError::invalid_deallocation(3).to_string(),
            "invalid deallocation: pool-owned pointer released with count 3"
        );
    }

    #[test]
    fn predicates() {
        assert!(AllocError::pool_exhausted(1).is_pool_exhausted());
        assert!(AllocError::unsupported_count(2).is_unsupported_count());
        assert!(AllocError::out_of_memory(8).is_out_of_memory());
        assert!(AllocError::invalid_deallocation(2).is_invalid_deallocation());
        assert!(!AllocError::size_overflow(usize::MAX, 8).is_out_of_memory());
    }
}
