//! Inspection Trace
//!
//! The simulation is silent unless a sink is supplied. Sinks receive one
//! event per inspected item, in inspection order.

pub mod logger;

pub use logger::{EventLogger, PendingEvents};

use monkey_events::InspectionEvent;

/// Receives inspection events from a running troop
pub trait InspectionSink {
    fn record(&mut self, event: &InspectionEvent) -> std::io::Result<()>;

    /// When false the troop skips building events altogether
    fn enabled(&self) -> bool {
        true
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl InspectionSink for NullSink {
    fn record(&mut self, _event: &InspectionEvent) -> std::io::Result<()> {
        Ok(())
    }

    fn enabled(&self) -> bool {
        false
    }
}
