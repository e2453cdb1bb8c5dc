//! Common types and utilities shared across vmsim.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration (constants, [`MmuConfig`], [`PolicyKind`])
//! - Error types
//! - Identifiers (PageId, FrameId)

pub mod config;
pub mod error;
mod frame_id;
mod page_id;

pub use config::{MmuConfig, PolicyKind};
pub use error::{Error, Result};
pub use frame_id::FrameId;
pub use page_id::PageId;
