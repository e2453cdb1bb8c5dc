//! Page-replacement policies.
//!
//! Implements:
//! - [`ClockPolicy`] - second chance with a circular hand
//! - [`LruPolicy`] - least recently used, O(1) touch and evict
//! - [`RandomPolicy`] - uniformly random victim from an injectable source
//!
//! All three share the [`ReplacementPolicy`] contract. The memory manager
//! holds one of them in a [`Policy`], chosen once at construction.

mod clock;
mod lru;
mod random;

pub use clock::ClockPolicy;
pub use lru::LruPolicy;
pub use random::{FixedVictim, RandomPolicy, VictimSource};

use crate::common::{PageId, PolicyKind};
use crate::mmu::{EvictedPage, PageStore};

/// The capability every replacement policy provides.
///
/// Policies never own pages. They get the manager's [`PageStore`] for the
/// duration of a call and keep only their own bookkeeping (reference bits,
/// recency order, a random source).
pub trait ReplacementPolicy {
    /// Which policy this is.
    fn kind(&self) -> PolicyKind;

    /// `page` was accessed and is resident.
    ///
    /// # Panics
    /// Panics if `page` is not resident in `store`.
    fn touch_hit(&mut self, store: &PageStore, page: PageId);

    /// `page` was accessed and is not resident.
    ///
    /// Admits `page` (dirty when `is_write`). If the store was full, exactly
    /// one resident page is evicted first and returned.
    fn handle_fault(
        &mut self,
        store: &mut PageStore,
        page: PageId,
        is_write: bool,
    ) -> Option<EvictedPage>;
}

/// One of the three policies, fixed for a manager's lifetime.
pub enum Policy {
    Clock(ClockPolicy),
    Lru(LruPolicy),
    Random(RandomPolicy),
}

impl Policy {
    /// Build the policy for `kind` over `capacity` frames.
    ///
    /// `seed` only matters for [`PolicyKind::Random`].
    pub fn new(kind: PolicyKind, capacity: usize, seed: Option<u64>) -> Self {
        match kind {
            PolicyKind::Clock => Policy::Clock(ClockPolicy::new(capacity)),
            PolicyKind::Lru => Policy::Lru(LruPolicy::new(capacity)),
            PolicyKind::Random => Policy::Random(match seed {
                Some(seed) => RandomPolicy::seeded(seed),
                None => RandomPolicy::new(),
            }),
        }
    }

    fn inner(&self) -> &dyn ReplacementPolicy {
        match self {
            Policy::Clock(p) => p,
            Policy::Lru(p) => p,
            Policy::Random(p) => p,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ReplacementPolicy {
        match self {
            Policy::Clock(p) => p,
            Policy::Lru(p) => p,
            Policy::Random(p) => p,
        }
    }
}

impl ReplacementPolicy for Policy {
    fn kind(&self) -> PolicyKind {
        self.inner().kind()
    }

    fn touch_hit(&mut self, store: &PageStore, page: PageId) {
        self.inner_mut().touch_hit(store, page)
    }

    fn handle_fault(
        &mut self,
        store: &mut PageStore,
        page: PageId,
        is_write: bool,
    ) -> Option<EvictedPage> {
        self.inner_mut().handle_fault(store, page, is_write)
    }
}

/// Frame of a page the caller reported as a hit.
///
/// # Panics
/// Panics if the page is not resident.
fn resident_frame(store: &PageStore, page: PageId) -> crate::common::FrameId {
    match store.frame_of(page) {
        Some(frame) => frame,
        None => panic!("hit reported for non-resident page {}", page),
    }
}
