//! Memory Manager - the facade callers drive with reads and writes.
//!
//! The [`MemoryManager`] provides:
//! - Hit/fault dispatch shared by every policy
//! - Dirty tracking and disk read/write accounting
//! - Optional per-access tracing through a [`TraceSink`]

use log::debug;

use crate::common::{MmuConfig, PageId, Result};
use crate::mmu::policy::{Policy, RandomPolicy, ReplacementPolicy, VictimSource};
use crate::mmu::{LogSink, MmuStats, PageStore, TraceEvent, TraceSink};
use crate::trace::{Access, AccessKind};

/// Simulates physical memory under one replacement policy.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────────────────┐
/// │                      MemoryManager                       │
/// │  read/write ──▶ store.is_resident(page)?                 │
/// │                   │ yes               │ no               │
/// │                   ▼                   ▼                  │
/// │         policy.touch_hit()   policy.handle_fault()       │
/// │                                       │                  │
/// │  ┌────────────┐  ┌────────────┐  ┌────▼───────┐          │
/// │  │ PageStore  │  │  Policy    │  │  MmuStats  │          │
/// │  └────────────┘  └────────────┘  └────────────┘          │
/// └──────────────────────────────────────────────────────────┘
/// ```
///
/// Each manager owns its store, policy and counters outright. Nothing is
/// shared between managers, so independent simulations can run on separate
/// threads.
///
/// # Usage
/// ```
/// use vmsim::{MemoryManager, MmuConfig, PageId, PolicyKind};
///
/// let mut mmu = MemoryManager::new(MmuConfig::new(2, PolicyKind::Lru)).unwrap();
/// mmu.write(PageId::new(1));
/// mmu.read(PageId::new(2));
/// mmu.read(PageId::new(1));
/// mmu.write(PageId::new(3)); // evicts page 2
///
/// assert_eq!(mmu.get_total_page_faults(), 3);
/// assert_eq!(mmu.get_total_disk_writes(), 0);
/// ```
pub struct MemoryManager {
    /// Resident pages.
    store: PageStore,

    /// Victim selection, fixed at construction.
    policy: Policy,

    /// Cumulative counters.
    stats: MmuStats,

    /// Whether accesses are reported to `sink`.
    debug: bool,

    /// Where trace events go.
    sink: Box<dyn TraceSink>,
}

impl MemoryManager {
    /// Create a memory manager from a configuration.
    ///
    /// # Errors
    /// - `Error::InvalidFrameCount` if `config.frames` is 0
    pub fn new(config: MmuConfig) -> Result<Self> {
        config.validate()?;
        let policy = Policy::new(config.policy, config.frames, config.seed);
        Ok(Self::from_parts(config, policy))
    }

    /// Create a random-policy manager whose victims come from `source`.
    ///
    /// `config.policy` and `config.seed` are ignored.
    ///
    /// # Errors
    /// - `Error::InvalidFrameCount` if `config.frames` is 0
    pub fn with_victim_source(
        config: MmuConfig,
        source: impl VictimSource + Send + 'static,
    ) -> Result<Self> {
        config.validate()?;
        let policy = Policy::Random(RandomPolicy::with_source(source));
        Ok(Self::from_parts(config, policy))
    }

    fn from_parts(config: MmuConfig, policy: Policy) -> Self {
        debug!(
            "memory manager: {} frames, {} policy, debug={}",
            config.frames,
            policy.kind(),
            config.debug
        );

        Self {
            store: PageStore::new(config.frames),
            policy,
            stats: MmuStats::default(),
            debug: config.debug,
            sink: Box::new(LogSink),
        }
    }

    /// Send trace events to `sink` instead of the `log` facade.
    pub fn with_sink(mut self, sink: impl TraceSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Turn per-access tracing on or off.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    // ========================================================================
    // Public API: Accesses
    // ========================================================================

    /// Read `page`.
    pub fn read(&mut self, page: PageId) {
        self.access(Access::new(AccessKind::Read, page));
    }

    /// Write `page`, leaving it dirty.
    pub fn write(&mut self, page: PageId) {
        self.access(Access::new(AccessKind::Write, page));
    }

    /// Perform one access.
    ///
    /// A hit updates the policy's bookkeeping (and the dirty flag on a
    /// write). A miss counts a fault and a disk read, lets the policy place
    /// the page, and counts a disk write if the evicted page was dirty.
    pub fn access(&mut self, access: Access) {
        let Access { kind, page } = access;
        let is_write = kind.is_write();
        self.stats.accesses += 1;

        if self.store.is_resident(page) {
            self.stats.hits += 1;
            if is_write {
                self.store.mark_dirty(page);
            }
            self.policy.touch_hit(&self.store, page);
            self.trace(TraceEvent::Hit { kind, page });
            return;
        }

        self.stats.page_faults += 1;
        self.trace(TraceEvent::Fault { kind, page });

        let evicted = self.policy.handle_fault(&mut self.store, page, is_write);
        self.stats.disk_reads += 1;

        assert!(
            self.store.len() <= self.store.capacity(),
            "{} resident pages in {} frames",
            self.store.len(),
            self.store.capacity()
        );

        let frame = match self.store.frame_of(page) {
            Some(frame) => frame,
            None => panic!("{} policy did not admit page {}", self.policy.kind(), page),
        };

        match evicted {
            Some(victim) => {
                self.stats.evictions += 1;
                if victim.dirty {
                    self.stats.disk_writes += 1;
                }
                self.trace(TraceEvent::Replaced {
                    page,
                    frame,
                    victim: victim.page,
                    victim_dirty: victim.dirty,
                });
            }
            None => self.trace(TraceEvent::Loaded { page, frame }),
        }
    }

    /// Perform every access in `accesses`, in order.
    pub fn replay<I>(&mut self, accesses: I)
    where
        I: IntoIterator<Item = Access>,
    {
        for access in accesses {
            self.access(access);
        }
    }

    /// Perform every access of a parsed trace, stopping at the first bad record.
    ///
    /// Returns the number of accesses performed.
    ///
    /// # Errors
    /// The first error the trace yields. Accesses before it stay applied.
    pub fn replay_trace<I>(&mut self, records: I) -> Result<u64>
    where
        I: IntoIterator<Item = Result<Access>>,
    {
        let mut events = 0;
        for record in records {
            self.access(record?);
            events += 1;
        }
        Ok(events)
    }

    #[inline]
    fn trace(&mut self, event: TraceEvent) {
        if self.debug {
            self.sink.record(&event);
        }
    }

    // ========================================================================
    // Public API: Counters
    // ========================================================================

    pub fn get_total_disk_reads(&self) -> u64 {
        self.stats.disk_reads
    }

    pub fn get_total_disk_writes(&self) -> u64 {
        self.stats.disk_writes
    }

    pub fn get_total_page_faults(&self) -> u64 {
        self.stats.page_faults
    }

    /// Snapshot of every counter.
    pub fn stats(&self) -> MmuStats {
        self.stats
    }

    // ========================================================================
    // Public API: Inspection
    // ========================================================================

    /// Number of physical frames.
    pub fn frames(&self) -> usize {
        self.store.capacity()
    }

    /// Number of pages currently resident.
    pub fn resident_count(&self) -> usize {
        self.store.len()
    }

    pub fn is_resident(&self, page: PageId) -> bool {
        self.store.is_resident(page)
    }

    /// Dirty flag of `page`, if resident.
    pub fn is_dirty(&self, page: PageId) -> Option<bool> {
        self.store.is_dirty(page)
    }

    /// The resident pages and their frames.
    pub fn store(&self) -> &PageStore {
        &self.store
    }

    /// The active policy.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }
}
