//! Fixed-capacity slot-pool allocator with general-purpose fallback
//!
//! `slotpool` pre-reserves storage for a compile-time-fixed number of
//! same-sized elements and hands slots out and back in O(1) through an
//! intrusive free list. When the pool is exhausted, or a request asks for
//! more than one element at once, the request is transparently delegated to
//! an injected fallback allocator.
//!
//! - [`SlotPool`] is the fixed slot pool: contiguous storage, free-list
//!   acquire/release, address-range membership test.
//! - [`PoolAllocator`] is the allocator facade containers consume: routing,
//!   rebinding to other element types, structural equivalence.
//! - [`FallbackAllocator`] is the seam for the general-purpose allocator;
//!   [`SystemFallback`] wraps the platform allocator, [`NoFallback`]
//!   refuses everything and makes the facade pool-only.
//!
//! # Quick Start
//!
//! ```
//! use slotpool::PoolAllocator;
//!
//! // Pool for 8 elements; the 9th single-element request and any
//! // multi-element request go to the system allocator.
//! let mut alloc: PoolAllocator<u64, 8> = PoolAllocator::new();
//!
//! let ptr = alloc.allocate(1)?;
//! unsafe { ptr.as_ptr().write(42) };
//!
//! // SAFETY: ptr came from this allocator with count 1
//! unsafe { alloc.deallocate(ptr, 1)? };
//! # Ok::<(), slotpool::AllocError>(())
//! ```
//!
//! # Concurrency Model
//!
//! Single-threaded by construction: all mutation goes through `&mut self`,
//! every operation completes immediately or fails immediately, and there is
//! no interior mutability. Pools and facades are `Send` (the single owner
//! may move between threads) but not `Sync`.
//!
//! # Caller Obligations
//!
//! The allocator never re-verifies that a released pointer is currently
//! occupied. Double frees and foreign in-range pointers are undefined
//! behavior in release builds; debug builds detect them with an occupancy
//! bitset kept out of the release path.
//!
//! # Features
//!
//! - `logging` (default): trace-level `tracing` events when the facade
//!   falls back, debug-level at pool construction.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod allocator;
pub mod error;
pub mod fallback;
pub mod pool;
pub mod prelude;
pub mod traits;

pub use allocator::PoolAllocator;
pub use error::{AllocError, AllocResult};
pub use fallback::{FallbackAllocator, NoFallback, SystemFallback};
pub use pool::{PoolStats, SlotPool};
pub use traits::{BasicMemoryUsage, MemoryUsage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
