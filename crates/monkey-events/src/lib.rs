//! Shared event types and serialization for the monkey simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for all other crates in the workspace.

pub mod event;
pub mod snapshot;

// Re-export event types
pub use event::{generate_event_id, InspectionEvent, WorrySummary};

// Re-export snapshot types
pub use snapshot::{ItemSnapshot, MonkeySnapshot, TroopSnapshot};
