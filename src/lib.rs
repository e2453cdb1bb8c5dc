//! vmsim - A virtual-memory simulator with swappable page-replacement policies.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                             vmsim                               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                Trace Layer (trace/)                      │   │
//! │  │        "<hex address> <R|W>" lines → Access              │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │        Memory Manager (mmu/)  [Chosen at construction]  │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │   Replacement Policies: CLOCK | LRU | RANDOM    │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  │      MemoryManager + PageStore + MmuStats + TraceSink    │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, FrameId, Error, config)
//! - [`mmu`] - Memory manager and replacement policies
//! - [`trace`] - Access-trace parsing
//!
//! # Quick Start
//! ```
//! use vmsim::{MemoryManager, MmuConfig, PageId, PolicyKind};
//!
//! let mut mmu = MemoryManager::new(MmuConfig::new(3, PolicyKind::Clock)).unwrap();
//!
//! for page in [1, 2, 3, 1, 4] {
//!     mmu.read(PageId::new(page));
//! }
//!
//! assert_eq!(mmu.get_total_page_faults(), 4);
//! assert_eq!(mmu.get_total_disk_reads(), 4);
//! ```

pub mod common;
pub mod mmu;
pub mod trace;

// Re-export commonly used items at crate root for convenience
pub use common::config::{PAGE_OFFSET, PAGE_SIZE};
pub use common::{Error, FrameId, MmuConfig, PageId, PolicyKind, Result};

pub use mmu::policy::{Policy, ReplacementPolicy};
pub use mmu::{EvictedPage, MemoryManager, MmuStats, PageStore, RecordingSink, TraceEvent, TraceSink};
pub use trace::{Access, AccessKind};
