//! Snapshot Types
//!
//! Serialization structs for the end-of-run troop report.
//!
//! A snapshot captures every monkey's inspection count and held items at a
//! round boundary, used for analysis and debugging.

use serde::{Deserialize, Serialize};

use crate::WorrySummary;

/// An item held in a monkey's queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub item_id: String,
    pub worry: WorrySummary,
}

/// A single monkey at a round boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonkeySnapshot {
    pub monkey_id: String,
    pub inspections: u64,
    pub divisor: u128,
    pub on_divisible: String,
    pub on_not_divisible: String,
    #[serde(default)]
    pub items: Vec<ItemSnapshot>,
}

impl MonkeySnapshot {
    pub fn new(
        monkey_id: impl Into<String>,
        inspections: u64,
        divisor: u128,
        on_divisible: impl Into<String>,
        on_not_divisible: impl Into<String>,
    ) -> Self {
        Self {
            monkey_id: monkey_id.into(),
            inspections,
            divisor,
            on_divisible: on_divisible.into(),
            on_not_divisible: on_not_divisible.into(),
            items: Vec::new(),
        }
    }
}

/// Complete troop state after some number of rounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TroopSnapshot {
    /// Rounds completed so far
    pub round: u64,
    /// Monkeys in visiting order
    pub monkeys: Vec<MonkeySnapshot>,
    /// Product of the two highest inspection counts, when at least two monkeys exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monkey_business: Option<u128>,
}

impl TroopSnapshot {
    pub fn new(round: u64) -> Self {
        Self {
            round,
            monkeys: Vec::new(),
            monkey_business: None,
        }
    }

    /// Total items held across all monkeys
    pub fn item_count(&self) -> usize {
        self.monkeys.iter().map(|m| m.items.len()).sum()
    }

    /// Looks up a monkey by identity
    pub fn monkey(&self, monkey_id: &str) -> Option<&MonkeySnapshot> {
        self.monkeys.iter().find(|m| m.monkey_id == monkey_id)
    }

    /// Serializes the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TroopSnapshot {
        let mut snapshot = TroopSnapshot::new(20);

        let mut first = MonkeySnapshot::new("0", 101, 23, "2", "3");
        first.items.push(ItemSnapshot {
            item_id: "0~i0l79".to_string(),
            worry: WorrySummary::Direct { value: 10 },
        });
        first.items.push(ItemSnapshot {
            item_id: "1~i2l75".to_string(),
            worry: WorrySummary::Direct { value: 12 },
        });
        snapshot.monkeys.push(first);
        snapshot
            .monkeys
            .push(MonkeySnapshot::new("1", 95, 19, "2", "0"));
        snapshot.monkey_business = Some(101 * 95);
        snapshot
    }

    #[test]
    fn test_troop_snapshot_new() {
        let snapshot = TroopSnapshot::new(0);
        assert_eq!(snapshot.round, 0);
        assert!(snapshot.monkeys.is_empty());
        assert_eq!(snapshot.item_count(), 0);
        assert!(snapshot.monkey_business.is_none());
    }

    #[test]
    fn test_item_count_and_lookup() {
        let snapshot = sample();
        assert_eq!(snapshot.item_count(), 2);
        assert_eq!(snapshot.monkey("1").map(|m| m.inspections), Some(95));
        assert!(snapshot.monkey("7").is_none());
    }

    #[test]
    fn test_missing_score_is_omitted() {
        let mut snapshot = sample();
        snapshot.monkey_business = None;
        let json = snapshot.to_json().unwrap();
        assert!(!json.contains("monkey_business"));

        let parsed: TroopSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
