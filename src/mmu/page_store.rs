//! PageStore - the fixed set of physical frames.
//!
//! A [`PageStore`] knows which page sits in which frame and whether it has
//! been written since it was loaded. It does not decide *what* to evict;
//! that is the job of a [`ReplacementPolicy`](crate::mmu::policy::ReplacementPolicy).

use std::collections::HashMap;

use crate::common::{FrameId, PageId};

/// Metadata kept for every resident page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Residency {
    /// Frame the page occupies.
    frame: FrameId,

    /// Whether the page has been written since it was loaded.
    dirty: bool,
}

/// A page removed from memory to make room for another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvictedPage {
    pub page: PageId,
    pub frame: FrameId,
    pub dirty: bool,
}

/// Fixed-capacity collection of resident pages.
///
/// # Architecture
/// ```text
/// ┌───────────────────────────────────────────────────┐
/// │                    PageStore                      │
/// │  ┌──────────────────┐   ┌──────────────────────┐  │
/// │  │   page_table     │   │ frames: Vec<Option>  │  │
/// │  │ PageId → (Fid,   │──▶│ [P7] [P2] [None] ... │  │
/// │  │          dirty)  │   └──────────────────────┘  │
/// │  └──────────────────┘   ┌──────────────────────┐  │
/// │                         │ free_list (LIFO)     │  │
/// │                         └──────────────────────┘  │
/// └───────────────────────────────────────────────────┘
/// ```
///
/// # Invariants
/// - `page_table.len() + free_list.len() == capacity`
/// - every resident page occupies exactly one frame, and that frame holds it
///
/// Violating an invariant is a bug in the caller, so the mutating methods
/// panic instead of returning errors.
#[derive(Debug)]
pub struct PageStore {
    /// Frame slots; `None` means the frame is free.
    frames: Vec<Option<PageId>>,

    /// Maps resident pages to their frame and dirty flag.
    page_table: HashMap<PageId, Residency>,

    /// Free frames, popped from the back. Lowest index comes out first.
    free_list: Vec<FrameId>,
}

impl PageStore {
    /// Create an empty store with `capacity` frames.
    ///
    /// # Panics
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");

        Self {
            frames: vec![None; capacity],
            page_table: HashMap::with_capacity(capacity),
            free_list: (0..capacity).rev().map(FrameId::new).collect(),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Number of frames.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.frames.len()
    }

    /// Number of resident pages.
    #[inline]
    pub fn len(&self) -> usize {
        self.page_table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.page_table.is_empty()
    }

    /// True when no free frame remains.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.free_list.is_empty()
    }

    #[inline]
    pub fn is_resident(&self, page: PageId) -> bool {
        self.page_table.contains_key(&page)
    }

    /// Frame holding `page`, if resident.
    #[inline]
    pub fn frame_of(&self, page: PageId) -> Option<FrameId> {
        self.page_table.get(&page).map(|r| r.frame)
    }

    /// Page held in `frame`, if any.
    ///
    /// # Panics
    /// Panics if `frame` is out of range.
    #[inline]
    pub fn page_at(&self, frame: FrameId) -> Option<PageId> {
        self.frames[frame.0]
    }

    /// Dirty flag of `page`, if resident.
    #[inline]
    pub fn is_dirty(&self, page: PageId) -> Option<bool> {
        self.page_table.get(&page).map(|r| r.dirty)
    }

    /// Resident pages in frame order.
    pub fn resident_pages(&self) -> Vec<PageId> {
        self.frames.iter().flatten().copied().collect()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Mark a resident page as written.
    ///
    /// # Panics
    /// Panics if `page` is not resident.
    pub fn mark_dirty(&mut self, page: PageId) {
        match self.page_table.get_mut(&page) {
            Some(residency) => residency.dirty = true,
            None => panic!("mark_dirty on non-resident page {}", page),
        }
    }

    /// Load `page` into a free frame and return that frame.
    ///
    /// # Panics
    /// Panics if the store is full or `page` is already resident.
    pub fn admit(&mut self, page: PageId, dirty: bool) -> FrameId {
        assert!(
            !self.is_resident(page),
            "page {} admitted while already resident",
            page
        );
        let frame = match self.free_list.pop() {
            Some(frame) => frame,
            None => panic!("admit of page {} into a full store", page),
        };

        debug_assert!(self.frames[frame.0].is_none(), "free frame {} occupied", frame);
        self.frames[frame.0] = Some(page);
        self.page_table.insert(page, Residency { frame, dirty });

        frame
    }

    /// Remove the page held in `frame`.
    ///
    /// The frame goes back on top of the free list, so the next
    /// [`admit`](Self::admit) reuses it.
    ///
    /// # Panics
    /// Panics if `frame` is out of range or empty.
    pub fn evict(&mut self, frame: FrameId) -> EvictedPage {
        assert!(
            frame.0 < self.capacity(),
            "frame {} out of range (capacity {})",
            frame,
            self.capacity()
        );
        let page = match self.frames[frame.0].take() {
            Some(page) => page,
            None => panic!("evict of empty frame {}", frame),
        };
        let residency = match self.page_table.remove(&page) {
            Some(residency) => residency,
            None => panic!("page {} in frame {} missing from page table", page, frame),
        };
        debug_assert_eq!(residency.frame, frame);

        self.free_list.push(frame);

        EvictedPage {
            page,
            frame,
            dirty: residency.dirty,
        }
    }

    /// Evict whatever sits in `frame` and load `page` into the same frame.
    pub fn replace(&mut self, frame: FrameId, page: PageId, dirty: bool) -> EvictedPage {
        let victim = self.evict(frame);
        let placed = self.admit(page, dirty);
        assert_eq!(placed, frame, "replacement landed in the wrong frame");
        victim
    }
}
