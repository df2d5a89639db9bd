//! Convenient re-exports for common use
//!
//! ```
//! use slotpool::prelude::*;
//!
//! let mut alloc: PoolAllocator<u32, 4> = PoolAllocator::new();
//! let ptr = alloc.allocate(1)?;
//! // SAFETY: ptr came from this allocator with count 1
//! unsafe { alloc.deallocate(ptr, 1)? };
//! # Ok::<(), AllocError>(())
//! ```

pub use crate::allocator::PoolAllocator;
pub use crate::error::{AllocError, AllocResult};
pub use crate::fallback::{FallbackAllocator, NoFallback, SystemFallback};
pub use crate::pool::{PoolStats, SlotPool};
pub use crate::traits::{BasicMemoryUsage, MemoryUsage};
