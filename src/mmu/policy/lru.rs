//! LRU (Least Recently Used) replacement policy.
//!
//! Resident frames are threaded on a doubly-linked list stored in two
//! index arrays, oldest at the head. Touching a page unlinks its frame and
//! relinks it at the tail; eviction takes the head. Both are O(1).

use crate::common::{FrameId, PageId, PolicyKind};
use crate::mmu::policy::{resident_frame, ReplacementPolicy};
use crate::mmu::{EvictedPage, PageStore};

/// Strict recency-order eviction.
#[derive(Debug)]
pub struct LruPolicy {
    /// `prev[f]` is the frame touched just before `f`.
    prev: Vec<Option<usize>>,

    /// `next[f]` is the frame touched just after `f`.
    next: Vec<Option<usize>>,

    /// Least recently touched frame.
    head: Option<usize>,

    /// Most recently touched frame.
    tail: Option<usize>,

    /// Number of linked frames.
    len: usize,
}

impl LruPolicy {
    /// Create an empty recency list over `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        Self {
            prev: vec![None; capacity],
            next: vec![None; capacity],
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Resident pages from least to most recently touched.
    pub fn recency_order(&self, store: &PageStore) -> Vec<PageId> {
        let mut order = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while let Some(frame) = cursor {
            if let Some(page) = store.page_at(FrameId::new(frame)) {
                order.push(page);
            }
            cursor = self.next[frame];
        }
        order
    }

    /// Append `frame` as the most recently touched.
    fn push_back(&mut self, frame: usize) {
        self.prev[frame] = self.tail;
        self.next[frame] = None;
        match self.tail {
            Some(tail) => self.next[tail] = Some(frame),
            None => self.head = Some(frame),
        }
        self.tail = Some(frame);
        self.len += 1;
    }

    /// Take `frame` out of the list.
    fn unlink(&mut self, frame: usize) {
        let (prev, next) = (self.prev[frame], self.next[frame]);
        match prev {
            Some(p) => self.next[p] = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.prev[n] = prev,
            None => self.tail = prev,
        }
        self.prev[frame] = None;
        self.next[frame] = None;
        self.len -= 1;
    }

    /// Remove and return the least recently touched frame.
    fn pop_front(&mut self) -> Option<usize> {
        let head = self.head?;
        self.unlink(head);
        Some(head)
    }
}

impl ReplacementPolicy for LruPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lru
    }

    fn touch_hit(&mut self, store: &PageStore, page: PageId) {
        let frame = resident_frame(store, page).0;
        if self.tail != Some(frame) {
            self.unlink(frame);
            self.push_back(frame);
        }
    }

    fn handle_fault(
        &mut self,
        store: &mut PageStore,
        page: PageId,
        is_write: bool,
    ) -> Option<EvictedPage> {
        debug_assert_eq!(store.capacity(), self.prev.len());

        if !store.is_full() {
            let frame = store.admit(page, is_write);
            self.push_back(frame.0);
            return None;
        }

        let frame = match self.pop_front() {
            Some(frame) => FrameId::new(frame),
            None => panic!("LRU list empty while store holds {} pages", store.len()),
        };
        let victim = store.replace(frame, page, is_write);
        self.push_back(frame.0);

        Some(victim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(ids: &[u64]) -> Vec<PageId> {
        ids.iter().copied().map(PageId::new).collect()
    }

    #[test]
    fn test_lru_evicts_oldest() {
        let mut store = PageStore::new(3);
        let mut lru = LruPolicy::new(3);

        for id in [1, 2, 3] {
            lru.handle_fault(&mut store, PageId::new(id), false);
        }
        assert_eq!(lru.recency_order(&store), pages(&[1, 2, 3]));

        let victim = lru.handle_fault(&mut store, PageId::new(4), false).unwrap();
        assert_eq!(victim.page, PageId::new(1));
        assert_eq!(lru.recency_order(&store), pages(&[2, 3, 4]));
    }

    #[test]
    fn test_lru_touch_moves_to_end() {
        let mut store = PageStore::new(3);
        let mut lru = LruPolicy::new(3);

        for id in [1, 2, 3] {
            lru.handle_fault(&mut store, PageId::new(id), false);
        }

        lru.touch_hit(&store, PageId::new(1));
        assert_eq!(lru.recency_order(&store), pages(&[2, 3, 1]));

        lru.touch_hit(&store, PageId::new(3));
        assert_eq!(lru.recency_order(&store), pages(&[2, 1, 3]));

        // Touching the newest page changes nothing.
        lru.touch_hit(&store, PageId::new(3));
        assert_eq!(lru.recency_order(&store), pages(&[2, 1, 3]));

        let victim = lru.handle_fault(&mut store, PageId::new(4), false).unwrap();
        assert_eq!(victim.page, PageId::new(2));
    }

    #[test]
    fn test_lru_touch_order_decides_victim() {
        // Touch a, b, c with a full store of exactly those three: a goes first.
        let mut store = PageStore::new(3);
        let mut lru = LruPolicy::new(3);

        for id in [3, 2, 1] {
            lru.handle_fault(&mut store, PageId::new(id), false);
        }
        for id in [1, 2, 3] {
            lru.touch_hit(&store, PageId::new(id));
        }

        let victim = lru.handle_fault(&mut store, PageId::new(4), false).unwrap();
        assert_eq!(victim.page, PageId::new(1));
    }

    #[test]
    fn test_lru_single_frame() {
        let mut store = PageStore::new(1);
        let mut lru = LruPolicy::new(1);

        lru.handle_fault(&mut store, PageId::new(1), true);
        lru.touch_hit(&store, PageId::new(1));

        let victim = lru.handle_fault(&mut store, PageId::new(2), false).unwrap();
        assert_eq!(victim.page, PageId::new(1));
        assert!(victim.dirty);
        assert_eq!(lru.recency_order(&store), pages(&[2]));
    }

    #[test]
    fn test_lru_touch_middle_then_evict_all() {
        let mut store = PageStore::new(4);
        let mut lru = LruPolicy::new(4);

        for id in 1..=4 {
            lru.handle_fault(&mut store, PageId::new(id), false);
        }
        lru.touch_hit(&store, PageId::new(2));
        lru.touch_hit(&store, PageId::new(3));

        let mut evicted = vec![];
        for id in 5..=8 {
            evicted.push(lru.handle_fault(&mut store, PageId::new(id), false).unwrap().page);
        }
        assert_eq!(evicted, pages(&[1, 4, 2, 3]));
    }
}
