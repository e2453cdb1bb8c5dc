//! Error types for vmsim.
//!
//! Only configuration and trace-input problems are errors. Bookkeeping
//! defects inside the memory manager (a hit against a page that is not
//! resident, a fault that cannot find a victim) are bugs and panic instead.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All recoverable errors in vmsim.
#[derive(Error, Debug)]
pub enum Error {
    /// Physical memory must have at least one frame.
    #[error("Invalid frame count: {0} (must be > 0)")]
    InvalidFrameCount(i64),

    /// The requested replacement policy does not exist.
    #[error("Unknown replacement policy: {0}")]
    UnknownPolicy(String),

    /// The requested output mode does not exist.
    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    /// A trace record could not be parsed.
    #[error("Malformed trace at line {line}: {reason}")]
    MalformedTrace { line: usize, reason: String },

    /// I/O error while reading a trace.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
