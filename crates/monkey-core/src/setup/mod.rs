//! Troop Setup
//!
//! Builds monkeys and troops from the textual notes format.

pub mod notes;

pub use notes::{load_troop, parse_notes, troop_from_notes};
