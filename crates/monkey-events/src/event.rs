//! Event Types
//!
//! One inspection event is emitted per item a monkey inspects. Events are
//! written as JSON lines and are never read back by the simulation itself.

use serde::{Deserialize, Serialize};

/// Summary of an item's worry value after an inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorrySummary {
    /// Exact integer value
    Direct { value: u128 },
    /// Approximate factor-list value. The residual is unbounded, so it is
    /// carried as decimal text.
    Factored {
        factor_count: usize,
        residual: String,
    },
}

impl WorrySummary {
    pub fn is_factored(&self) -> bool {
        matches!(self, WorrySummary::Factored { .. })
    }
}

impl std::fmt::Display for WorrySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorrySummary::Direct { value } => write!(f, "{}", value),
            WorrySummary::Factored {
                factor_count,
                residual,
            } => write!(f, "[{} factors] x {}", factor_count, residual),
        }
    }
}

/// A single inspection: which monkey looked at which item, what the item's
/// worry became, and where it was thrown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionEvent {
    pub event_id: String,
    /// Round in which the inspection happened (1-based)
    pub round: u64,
    pub monkey_id: String,
    pub item_id: String,
    pub worry: WorrySummary,
    /// True only on the inspection that switched the item to factored form
    #[serde(default)]
    pub converted: bool,
    pub target: String,
}

impl InspectionEvent {
    pub fn new(
        event_id: impl Into<String>,
        round: u64,
        monkey_id: impl Into<String>,
        item_id: impl Into<String>,
        worry: WorrySummary,
        target: impl Into<String>,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            round,
            monkey_id: monkey_id.into(),
            item_id: item_id.into(),
            worry,
            converted: false,
            target: target.into(),
        }
    }

    /// Marks this event as the one that performed the factored conversion.
    pub fn with_conversion(mut self, converted: bool) -> Self {
        self.converted = converted;
        self
    }

    /// Serializes the event to a single JSON line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses one line of a trace file.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

/// Zero-padded id for the `sequence`th inspection of a run.
pub fn generate_event_id(sequence: u64) -> String {
    format!("evt_{:08}", sequence)
}
