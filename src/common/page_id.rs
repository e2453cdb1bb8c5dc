//! Page identifier type.

use std::fmt;

/// Identifies a virtual page.
///
/// Pages are opaque: the simulator only compares and hashes them. Trace
/// addresses are turned into page numbers by dropping the in-page offset
/// (see [`crate::common::config::PAGE_OFFSET`]).
///
/// # Example
/// ```
/// use vmsim::PageId;
///
/// let page_id = PageId::new(42);
/// assert_eq!(page_id.0, 42);
/// assert_eq!(PageId::from_address(0x0002_a7f0), PageId::new(0x2a));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub u64);

impl PageId {
    /// Create a new PageId.
    #[inline]
    pub fn new(id: u64) -> Self {
        PageId(id)
    }

    /// Page that contains the given virtual address.
    #[inline]
    pub fn from_address(address: u64) -> Self {
        PageId(address >> super::config::PAGE_OFFSET)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
