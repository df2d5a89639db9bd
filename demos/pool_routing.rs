//! Walkthrough of pool/fallback routing
//!
//! Run with: `cargo run --example pool_routing`

use slotpool::{AllocError, MemoryUsage, PoolAllocator};

#[derive(Clone, Copy)]
#[repr(C)]
struct Node {
    key: i32,
    value: i32,
}

fn main() -> Result<(), AllocError> {
    // Pool sized for 3 nodes; overflow goes to the system allocator.
    let mut alloc: PoolAllocator<Node, 3> = PoolAllocator::new();
    println!("pool footprint: {} bytes", alloc.total_memory().unwrap());

    let mut pooled = Vec::new();
    for key in 0..3 {
        let ptr = alloc.allocate(1)?;
        // SAFETY: the slot is exclusively ours, aligned for Node
        unsafe { ptr.as_ptr().write(Node { key, value: key * key }) };
        pooled.push(ptr);
        println!("node {key}: {:p} (pool)", ptr.as_ptr());
    }

    // The pool is full now; the next single-element request spills over.
    let spilled = alloc.allocate(1)?;
    println!(
        "node 3: {:p} (fallback, in pool range: {})",
        spilled.as_ptr(),
        alloc.pool().contains(spilled.as_ptr())
    );

    // Multi-element requests bypass the pool even while slots are free.
    // SAFETY: the three pooled nodes are released with count 1 each
    unsafe {
        for ptr in pooled.drain(..) {
            alloc.deallocate(ptr, 1)?;
        }
    }
    let array = alloc.allocate(4)?;
    println!(
        "array of 4: {:p} (fallback, pool slots free: {})",
        array.as_ptr(),
        alloc.pool().free_slots()
    );

    // Deallocation routes by address alone.
    // SAFETY: each pointer goes back with the count it was allocated with
    unsafe {
        alloc.deallocate(array, 4)?;
        alloc.deallocate(spilled, 1)?;
    }

    println!("final stats: {:?}", alloc.stats());
    Ok(())
}
