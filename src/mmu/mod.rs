//! Virtual-memory management.
//!
//! A fixed number of physical frames holds a subset of the pages a trace
//! touches. Accesses to non-resident pages fault, and a replacement policy
//! decides which resident page makes room.
//!
//! # Components
//! - [`MemoryManager`] - The read/write facade and its counters
//! - [`PageStore`] - Which page is in which frame, and whether it is dirty
//! - [`MmuStats`] - Fault and disk I/O counters
//! - [`TraceSink`] / [`TraceEvent`] - Debug tracing
//! - [`policy`] - Replacement policy implementations

mod memory_manager;
mod page_store;
pub mod policy;
mod stats;
mod trace_sink;

pub use memory_manager::MemoryManager;
pub use page_store::{EvictedPage, PageStore};
pub use stats::MmuStats;
pub use trace_sink::{LogSink, RecordingSink, TraceEvent, TraceSink};
