//! Debug tracing of memory accesses.
//!
//! When debug mode is on, the memory manager reports every hit, fault and
//! replacement as a [`TraceEvent`] to a [`TraceSink`]. Sinks only observe;
//! nothing they do feeds back into the simulation.

use std::fmt;
use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;

use crate::common::{FrameId, PageId};
use crate::trace::AccessKind;

/// Something that happened during one access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    /// The page was resident.
    Hit { kind: AccessKind, page: PageId },

    /// The page was not resident.
    Fault { kind: AccessKind, page: PageId },

    /// A faulted page went into a free frame.
    Loaded { page: PageId, frame: FrameId },

    /// A faulted page took over `victim`'s frame.
    Replaced {
        page: PageId,
        frame: FrameId,
        victim: PageId,
        victim_dirty: bool,
    },
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Hit {
                kind: AccessKind::Read,
                page,
            } => write!(f, "Page {} has been read from memory.", page),
            TraceEvent::Hit {
                kind: AccessKind::Write,
                page,
            } => write!(f, "Page {} has been written to memory.", page),
            TraceEvent::Fault {
                kind: AccessKind::Read,
                page,
            } => write!(f, "Fail to read page {} from memory.", page),
            TraceEvent::Fault {
                kind: AccessKind::Write,
                page,
            } => write!(f, "Fail to write page {} to memory.", page),
            TraceEvent::Loaded { page, frame } => write!(
                f,
                "Page fault: page {} has been loaded into frame {}.",
                page, frame
            ),
            TraceEvent::Replaced {
                page,
                frame,
                victim,
                victim_dirty,
            } => {
                write!(
                    f,
                    "Page fault: page {} has been loaded into frame {}, replacing page {}",
                    page, frame, victim
                )?;
                if *victim_dirty {
                    write!(f, " (written back to disk)")?;
                }
                write!(f, ".")
            }
        }
    }
}

/// Receives trace events from a memory manager.
pub trait TraceSink: Send {
    fn record(&mut self, event: &TraceEvent);
}

/// Forwards events to the `log` facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl TraceSink for LogSink {
    fn record(&mut self, event: &TraceEvent) {
        debug!("{}", event);
    }
}

/// Keeps every event in memory.
///
/// Clones share the same buffer, so a test can hand one clone to the
/// manager and read events back through another.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<TraceEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.lock().clone()
    }

    /// Rendered trace lines, one per event.
    pub fn lines(&self) -> Vec<String> {
        self.events.lock().iter().map(ToString::to_string).collect()
    }

    /// Drain the recorded events.
    pub fn take(&self) -> Vec<TraceEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl TraceSink for RecordingSink {
    fn record(&mut self, event: &TraceEvent) {
        self.events.lock().push(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display() {
        let page = PageId::new(7);
        assert_eq!(
            TraceEvent::Hit {
                kind: AccessKind::Read,
                page
            }
            .to_string(),
            "Page 7 has been read from memory."
        );
        assert_eq!(
            TraceEvent::Fault {
                kind: AccessKind::Write,
                page
            }
            .to_string(),
            "Fail to write page 7 to memory."
        );
        assert_eq!(
            TraceEvent::Loaded {
                page,
                frame: FrameId::new(2)
            }
            .to_string(),
            "Page fault: page 7 has been loaded into frame 2."
        );
        assert_eq!(
            TraceEvent::Replaced {
                page,
                frame: FrameId::new(0),
                victim: PageId::new(3),
                victim_dirty: true,
            }
            .to_string(),
            "Page fault: page 7 has been loaded into frame 0, replacing page 3 (written back to disk)."
        );
    }

    #[test]
    fn test_recording_sink_shares_buffer() {
        let sink = RecordingSink::new();
        let mut handle = sink.clone();

        handle.record(&TraceEvent::Hit {
            kind: AccessKind::Read,
            page: PageId::new(1),
        });

        assert_eq!(sink.events().len(), 1);
        assert_eq!(sink.lines(), vec!["Page 1 has been read from memory."]);
        assert_eq!(sink.take().len(), 1);
        assert!(sink.events().is_empty());
    }
}
