//! Memory manager statistics.

use std::fmt;

/// Cumulative counters kept by a [`MemoryManager`](crate::mmu::MemoryManager).
///
/// Counters only ever grow. The manager hands out copies, so a snapshot
/// can be printed or compared freely.
///
/// # Example
/// ```
/// use vmsim::MmuStats;
///
/// let stats = MmuStats {
///     accesses: 10,
///     hits: 7,
///     page_faults: 3,
///     disk_reads: 3,
///     disk_writes: 1,
///     evictions: 1,
/// };
/// assert_eq!(stats.fault_rate(), 0.3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MmuStats {
    /// Reads plus writes issued.
    pub accesses: u64,

    /// Accesses that found their page resident.
    pub hits: u64,

    /// Accesses that did not.
    pub page_faults: u64,

    /// Pages loaded from backing storage (one per fault).
    pub disk_reads: u64,

    /// Dirty pages written back on eviction.
    pub disk_writes: u64,

    /// Pages evicted to make room.
    pub evictions: u64,
}

impl MmuStats {
    /// Fraction of accesses that faulted (0.0 to 1.0).
    pub fn fault_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.page_faults as f64 / self.accesses as f64
        }
    }

    /// Fraction of accesses that hit (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.accesses as f64
        }
    }
}

impl fmt::Display for MmuStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ accesses: {}, faults: {}, reads: {}, writes: {}, fault_rate: {:.2}% }}",
            self.accesses,
            self.page_faults,
            self.disk_reads,
            self.disk_writes,
            self.fault_rate() * 100.0
        )
    }
}
