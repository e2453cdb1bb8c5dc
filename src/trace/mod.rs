//! Memory-access traces.
//!
//! A trace is a text file with one access per line:
//! ```text
//! 0041f7a0 R
//! 13f5e2c0 R
//! 05e78900 W
//! ```
//! The first field is a hexadecimal virtual address, the second the access
//! type. Addresses are mapped to pages with [`PageId::from_address`].
//!
//! # Components
//! - [`Access`] / [`AccessKind`] - One parsed record
//! - [`parse_line`] - Parse a single line
//! - [`TraceReader`] - Iterate over the records of any `BufRead`

mod reader;

pub use reader::{parse_line, read_trace, TraceReader};

use std::fmt;
use std::str::FromStr;

use crate::common::{Error, PageId, Result};

/// Read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessKind {
    Read,
    Write,
}

impl AccessKind {
    pub fn is_write(&self) -> bool {
        matches!(self, AccessKind::Write)
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessKind::Read => f.write_str("R"),
            AccessKind::Write => f.write_str("W"),
        }
    }
}

impl FromStr for AccessKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "R" | "r" => Ok(AccessKind::Read),
            "W" | "w" => Ok(AccessKind::Write),
            other => Err(Error::MalformedTrace {
                line: 0,
                reason: format!("unknown access type {:?}", other),
            }),
        }
    }
}

/// One access of a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    pub kind: AccessKind,
    pub page: PageId,
}

impl Access {
    pub fn new(kind: AccessKind, page: PageId) -> Self {
        Self { kind, page }
    }

    /// Read of page number `page`.
    pub fn read(page: u64) -> Self {
        Self::new(AccessKind::Read, PageId::new(page))
    }

    /// Write of page number `page`.
    pub fn write(page: u64) -> Self {
        Self::new(AccessKind::Write, PageId::new(page))
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, self.page)
    }
}
