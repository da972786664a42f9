//! Event Logger
//!
//! Append-only JSONL inspection logging, plus an in-memory buffer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use monkey_events::InspectionEvent;

use super::InspectionSink;

/// Streams inspection events to a JSONL file, one object per line.
///
/// The file is truncated on open, so each run leaves exactly one trace.
pub struct EventLogger {
    out: BufWriter<File>,
    written: u64,
}

impl EventLogger {
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self {
            out: BufWriter::new(File::create(path)?),
            written: 0,
        })
    }

    /// Events written so far
    pub fn event_count(&self) -> u64 {
        self.written
    }

    pub fn log(&mut self, event: &InspectionEvent) -> std::io::Result<()> {
        self.out.write_all(event.to_jsonl()?.as_bytes())?;
        self.out.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }
}

impl InspectionSink for EventLogger {
    fn record(&mut self, event: &InspectionEvent) -> std::io::Result<()> {
        self.log(event)
    }
}

impl Drop for EventLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(written = self.written, "inspection trace not flushed: {}", e);
        }
    }
}

/// Buffers inspection events in memory until drained
#[derive(Debug, Default)]
pub struct PendingEvents {
    events: Vec<InspectionEvent>,
}

impl PendingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InspectionEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<InspectionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[InspectionEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl InspectionSink for PendingEvents {
    fn record(&mut self, event: &InspectionEvent) -> std::io::Result<()> {
        self.push(event.clone());
        Ok(())
    }
}
