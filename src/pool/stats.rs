//! Pool statistics

/// Point-in-time statistics for a [`SlotPool`](super::SlotPool)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Total number of slots
    pub capacity: usize,
    /// Slots currently on the free list
    pub free_slots: usize,
    /// Slots currently handed out
    pub used_slots: usize,
    /// Lifetime count of successful acquisitions
    pub total_acquires: u64,
    /// Lifetime count of releases
    pub total_releases: u64,
    /// Size of the storage array in bytes
    pub footprint: usize,
}
