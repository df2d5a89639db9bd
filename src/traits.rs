//! Capacity-reporting traits shared by the pool and the facade

/// Memory usage tracking
///
/// Implemented by allocators that know how much of their storage is in use.
/// All sizes are in bytes.
pub trait MemoryUsage {
    /// Currently used memory in bytes
    fn used_memory(&self) -> usize;

    /// Available memory in bytes, if bounded
    fn available_memory(&self) -> Option<usize>;

    /// Total capacity in bytes, if bounded
    fn total_memory(&self) -> Option<usize> {
        self.available_memory()
            .map(|available| self.used_memory() + available)
    }

    /// Memory usage as a percentage (0.0 to 100.0)
    ///
    /// Returns `None` when the total capacity is unknown.
    fn memory_usage_percent(&self) -> Option<f32> {
        self.total_memory().map(|total| {
            if total == 0 {
                0.0
            } else {
                (self.used_memory() as f32 / total as f32) * 100.0
            }
        })
    }

    /// Point-in-time usage snapshot
    fn memory_usage(&self) -> BasicMemoryUsage {
        BasicMemoryUsage {
            used: self.used_memory(),
            available: self.available_memory(),
            total: self.total_memory(),
            usage_percent: self.memory_usage_percent(),
        }
    }
}

/// Basic memory usage information
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicMemoryUsage {
    /// Currently used memory in bytes
    pub used: usize,
    /// Available memory in bytes (`None` if unbounded)
    pub available: Option<usize>,
    /// Total capacity in bytes (`None` if unbounded)
    pub total: Option<usize>,
    /// Usage as a percentage (`None` if it cannot be calculated)
    pub usage_percent: Option<f32>,
}

impl core::fmt::Display for BasicMemoryUsage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "used: {} bytes", self.used)?;

        if let Some(total) = self.total {
            write!(f, ", total: {} bytes", total)?;
        }

        if let Some(percent) = self.usage_percent {
            write!(f, " ({:.1}%)", percent)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        used: usize,
        available: usize,
    }

    impl MemoryUsage for Fixed {
        fn used_memory(&self) -> usize {
            self.used
        }

        fn available_memory(&self) -> Option<usize> {
            Some(self.available)
        }
    }

    #[test]
    fn percent_and_total() {
        let usage = Fixed {
            used: 25,
            available: 75,
        };
        assert_eq!(usage.total_memory(), Some(100));
        assert_eq!(usage.memory_usage_percent(), Some(25.0));
    }

    #[test]
    fn snapshot_display() {
        let usage = Fixed {
            used: 50,
            available: 50,
        }
        .memory_usage();
        assert_eq!(usage.to_string(), "used: 50 bytes, total: 100 bytes (50.0%)");
    }
}
