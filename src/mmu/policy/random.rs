//! Random replacement policy.
//!
//! Keeps no recency or reference state. When memory is full, a frame index
//! is drawn uniformly from `[0, capacity)` and its page is replaced in place.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::{FrameId, PageId, PolicyKind};
use crate::mmu::policy::{resident_frame, ReplacementPolicy};
use crate::mmu::{EvictedPage, PageStore};

/// Source of victim frame indices.
///
/// Implementations must return a value in `[0, capacity)`.
pub trait VictimSource {
    fn pick(&mut self, capacity: usize) -> usize;
}

impl VictimSource for StdRng {
    fn pick(&mut self, capacity: usize) -> usize {
        self.gen_range(0..capacity)
    }
}

/// Always picks the same frame. Useful for reproducing a run exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedVictim(pub usize);

impl VictimSource for FixedVictim {
    fn pick(&mut self, _capacity: usize) -> usize {
        self.0
    }
}

/// Uniformly random eviction.
pub struct RandomPolicy {
    source: Box<dyn VictimSource + Send>,
}

impl RandomPolicy {
    /// Random policy seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_source(StdRng::from_entropy())
    }

    /// Random policy with a reproducible sequence of victims.
    pub fn seeded(seed: u64) -> Self {
        Self::with_source(StdRng::seed_from_u64(seed))
    }

    /// Random policy drawing victims from `source`.
    pub fn with_source(source: impl VictimSource + Send + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RandomPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomPolicy").finish_non_exhaustive()
    }
}

impl ReplacementPolicy for RandomPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Random
    }

    fn touch_hit(&mut self, store: &PageStore, page: PageId) {
        // No bookkeeping, but a hit must still be for a resident page.
        resident_frame(store, page);
    }

    fn handle_fault(
        &mut self,
        store: &mut PageStore,
        page: PageId,
        is_write: bool,
    ) -> Option<EvictedPage> {
        if !store.is_full() {
            store.admit(page, is_write);
            return None;
        }

        let capacity = store.capacity();
        let index = self.source.pick(capacity);
        assert!(
            index < capacity,
            "victim index {} out of range (capacity {})",
            index,
            capacity
        );

        Some(store.replace(FrameId::new(index), page, is_write))
    }
}
