//! Trace parsing.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::common::{Error, PageId, Result};
use crate::trace::{Access, AccessKind};

/// Parse one trace line.
///
/// Returns `Ok(None)` for blank lines. `line_no` is only used in errors.
///
/// # Errors
/// - `Error::MalformedTrace` if the address is not hexadecimal, the access
///   type is not `R`/`W`, or either field is missing
///
/// # Example
/// ```
/// use vmsim::trace::{parse_line, Access};
///
/// let access = parse_line("0041f7a0 W", 1).unwrap().unwrap();
/// assert_eq!(access, Access::write(0x41f));
/// ```
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Access>> {
    let malformed = |reason: String| Error::MalformedTrace {
        line: line_no,
        reason,
    };

    let mut fields = line.split_whitespace();
    let address = match fields.next() {
        Some(address) => address,
        None => return Ok(None),
    };
    let kind = fields
        .next()
        .ok_or_else(|| malformed("missing access type".to_string()))?;
    if let Some(extra) = fields.next() {
        return Err(malformed(format!("unexpected field {:?}", extra)));
    }

    let digits = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);
    if !digits.starts_with(|c: char| c.is_ascii_hexdigit()) {
        return Err(malformed(format!("bad address {:?}", address)));
    }
    let address = u64::from_str_radix(digits, 16)
        .map_err(|e| malformed(format!("bad address {:?}: {}", address, e)))?;

    let kind = kind
        .parse::<AccessKind>()
        .map_err(|_| malformed(format!("unknown access type {:?}", kind)))?;

    Ok(Some(Access::new(kind, PageId::from_address(address))))
}

/// Iterator over the accesses of a trace.
///
/// Blank lines are skipped. Line numbers in errors are 1-based.
pub struct TraceReader<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<Access>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;

            match parse_line(&line, self.line_no) {
                Ok(Some(access)) => return Some(Ok(access)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Open a trace file.
///
/// # Errors
/// Returns an error if the file cannot be opened.
pub fn read_trace<P: AsRef<Path>>(path: P) -> Result<TraceReader<BufReader<File>>> {
    let file = File::open(path)?;
    Ok(TraceReader::new(BufReader::new(file)))
}
