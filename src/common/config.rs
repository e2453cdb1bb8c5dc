//! Configuration for vmsim.
//!
//! Constants describing the simulated address space, plus the validated
//! [`MmuConfig`] a [`MemoryManager`](crate::mmu::MemoryManager) is built from.

use std::fmt;
use std::str::FromStr;

use crate::common::{Error, Result};

/// Number of low address bits that address bytes within a page.
///
/// Trace addresses are shifted right by this amount to get the page number.
pub const PAGE_OFFSET: u32 = 12;

/// Size of a page in bytes (4KB).
pub const PAGE_SIZE: u64 = 1 << PAGE_OFFSET;

/// Which page-replacement policy a memory manager runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    /// Second-chance selection with a circular hand.
    Clock,
    /// Evict the least recently touched page.
    Lru,
    /// Evict a uniformly random frame.
    Random,
}

impl PolicyKind {
    /// Short name used on the command line and in trace output.
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Clock => "clock",
            PolicyKind::Lru => "lru",
            PolicyKind::Random => "rand",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "clock" => Ok(PolicyKind::Clock),
            "lru" => Ok(PolicyKind::Lru),
            "rand" | "random" => Ok(PolicyKind::Random),
            _ => Err(Error::UnknownPolicy(s.to_string())),
        }
    }
}

/// Construction parameters for a memory manager.
///
/// # Example
/// ```
/// use vmsim::{MmuConfig, PolicyKind};
///
/// let config = MmuConfig::new(4, PolicyKind::Clock).with_debug(true);
/// assert!(config.validate().is_ok());
/// assert!(MmuConfig::new(0, PolicyKind::Lru).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MmuConfig {
    /// Number of physical frames.
    pub frames: usize,

    /// Replacement policy, fixed for the manager's lifetime.
    pub policy: PolicyKind,

    /// Emit a trace event for every access.
    pub debug: bool,

    /// Seed for the random policy. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl MmuConfig {
    /// Config with tracing off and an entropy-seeded random source.
    pub fn new(frames: usize, policy: PolicyKind) -> Self {
        Self {
            frames,
            policy,
            debug: false,
            seed: None,
        }
    }

    /// Enable or disable per-access tracing.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Seed the random policy for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject configurations that can never run.
    ///
    /// # Errors
    /// - `Error::InvalidFrameCount` if `frames` is 0
    pub fn validate(&self) -> Result<()> {
        if self.frames == 0 {
            return Err(Error::InvalidFrameCount(0));
        }
        Ok(())
    }
}

/// Convert a signed frame count (as a user would type it) into a frame count.
///
/// # Errors
/// - `Error::InvalidFrameCount` if `frames <= 0`
pub fn frame_count(frames: i64) -> Result<usize> {
    match usize::try_from(frames) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::InvalidFrameCount(frames)),
    }
}
