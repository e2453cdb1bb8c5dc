//! CLOCK (second chance) replacement policy.
//!
//! Frames form a circle swept by a hand. Each frame carries a reference
//! bit. On eviction the hand clears set bits as it passes and stops at the
//! first frame whose bit is already clear.

use crate::common::{FrameId, PageId, PolicyKind};
use crate::mmu::policy::{resident_frame, ReplacementPolicy};
use crate::mmu::{EvictedPage, PageStore};

/// Second-chance eviction over a fixed ring of frames.
#[derive(Debug)]
pub struct ClockPolicy {
    /// Reference bit per frame, indexed by `FrameId`.
    reference: Vec<bool>,

    /// Next frame the hand inspects.
    hand: usize,

    /// Reference bits inspected during the most recent eviction.
    last_sweep: usize,
}

impl ClockPolicy {
    /// Create a clock over `capacity` frames with the hand at frame 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        Self {
            reference: vec![false; capacity],
            hand: 0,
            last_sweep: 0,
        }
    }

    /// Frame the hand points at.
    pub fn hand(&self) -> FrameId {
        FrameId::new(self.hand)
    }

    /// Reference bits in frame order.
    pub fn reference_bits(&self) -> &[bool] {
        &self.reference
    }

    /// Number of reference bits the last eviction inspected.
    ///
    /// Never more than twice the capacity.
    pub fn last_sweep(&self) -> usize {
        self.last_sweep
    }

    #[inline]
    fn advance(&mut self) {
        self.hand = (self.hand + 1) % self.reference.len();
    }

    /// Sweep from the hand until a frame with a clear bit turns up.
    ///
    /// One full turn clears every bit, so the second turn always stops.
    fn select_victim(&mut self) -> FrameId {
        let capacity = self.reference.len();

        for inspected in 1..=2 * capacity {
            if self.reference[self.hand] {
                self.reference[self.hand] = false;
                self.advance();
            } else {
                self.last_sweep = inspected;
                return FrameId::new(self.hand);
            }
        }

        panic!("clock sweep found no victim in {} inspections", 2 * capacity);
    }
}

impl ReplacementPolicy for ClockPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Clock
    }

    fn touch_hit(&mut self, store: &PageStore, page: PageId) {
        let frame = resident_frame(store, page);
        self.reference[frame.0] = true;
    }

    fn handle_fault(
        &mut self,
        store: &mut PageStore,
        page: PageId,
        is_write: bool,
    ) -> Option<EvictedPage> {
        debug_assert_eq!(store.capacity(), self.reference.len());

        if !store.is_full() {
            // Loading into a free frame does not count as a reference.
            let frame = store.admit(page, is_write);
            self.reference[frame.0] = false;
            return None;
        }

        let frame = self.select_victim();
        let victim = store.replace(frame, page, is_write);
        self.reference[frame.0] = true;
        self.advance();

        Some(victim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fault(clock: &mut ClockPolicy, store: &mut PageStore, id: u64) -> Option<EvictedPage> {
        clock.handle_fault(store, PageId::new(id), false)
    }

    fn hit(clock: &mut ClockPolicy, store: &PageStore, id: u64) {
        clock.touch_hit(store, PageId::new(id));
    }

    #[test]
    fn test_clock_fill_leaves_bits_clear() {
        let mut store = PageStore::new(3);
        let mut clock = ClockPolicy::new(3);

        for id in 1..=3 {
            assert!(fault(&mut clock, &mut store, id).is_none());
        }

        assert_eq!(clock.reference_bits(), &[false, false, false]);
        assert_eq!(clock.hand(), FrameId::new(0));
    }

    #[test]
    fn test_clock_second_chance() {
        // R1 R2 R3 R1 R4: page 1 was referenced, so it survives and page 2 goes.
        let mut store = PageStore::new(3);
        let mut clock = ClockPolicy::new(3);

        for id in 1..=3 {
            fault(&mut clock, &mut store, id);
        }
        hit(&mut clock, &store, 1);
        assert_eq!(clock.reference_bits(), &[true, false, false]);

        let victim = fault(&mut clock, &mut store, 4).unwrap();
        assert_eq!(victim.page, PageId::new(2));
        assert_eq!(victim.frame, FrameId::new(1));
        assert_eq!(clock.last_sweep(), 2);

        // Page 1's bit was consumed, page 4 starts referenced, hand moved past it.
        assert_eq!(clock.reference_bits(), &[false, true, false]);
        assert_eq!(clock.hand(), FrameId::new(2));
        assert_eq!(store.frame_of(PageId::new(4)), Some(FrameId::new(1)));
    }

    #[test]
    fn test_clock_all_referenced_wraps_around() {
        let mut store = PageStore::new(3);
        let mut clock = ClockPolicy::new(3);

        for id in 1..=3 {
            fault(&mut clock, &mut store, id);
        }
        for id in 1..=3 {
            hit(&mut clock, &store, id);
        }

        // Full turn clears everything, then the hand is back on frame 0.
        let victim = fault(&mut clock, &mut store, 4).unwrap();
        assert_eq!(victim.page, PageId::new(1));
        assert_eq!(clock.last_sweep(), 4);
        assert!(clock.last_sweep() <= 2 * store.capacity());
        assert_eq!(clock.hand(), FrameId::new(1));
    }

    #[test]
    fn test_clock_hand_persists_across_faults() {
        let mut store = PageStore::new(2);
        let mut clock = ClockPolicy::new(2);

        fault(&mut clock, &mut store, 1);
        fault(&mut clock, &mut store, 2);

        // Both bits clear: evict frame 0, hand to 1.
        assert_eq!(fault(&mut clock, &mut store, 3).unwrap().page, PageId::new(1));
        assert_eq!(clock.hand(), FrameId::new(1));

        // Frame 1 (page 2) is clear, so it goes next.
        assert_eq!(fault(&mut clock, &mut store, 4).unwrap().page, PageId::new(2));
        assert_eq!(clock.hand(), FrameId::new(0));

        // Pages 3 and 4 were both referenced on placement, so a full turn
        // clears them and the hand stops back on frame 0.
        assert_eq!(fault(&mut clock, &mut store, 5).unwrap().page, PageId::new(3));
    }

    #[test]
    fn test_clock_single_frame() {
        let mut store = PageStore::new(1);
        let mut clock = ClockPolicy::new(1);

        fault(&mut clock, &mut store, 1);
        hit(&mut clock, &store, 1);

        let victim = fault(&mut clock, &mut store, 2).unwrap();
        assert_eq!(victim.page, PageId::new(1));
        assert!(clock.last_sweep() <= 2);
        assert_eq!(clock.hand(), FrameId::new(0));
    }

    #[test]
    fn test_clock_dirty_victim_reported() {
        let mut store = PageStore::new(1);
        let mut clock = ClockPolicy::new(1);

        clock.handle_fault(&mut store, PageId::new(1), true);
        let victim = fault(&mut clock, &mut store, 2).unwrap();
        assert!(victim.dirty);
    }
}
