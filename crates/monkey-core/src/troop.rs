//! Troop
//!
//! Owns every monkey and runs rounds. Monkeys take turns in construction
//! order; a thrown item lands in its target's queue immediately, so a monkey
//! later in the order sees it this round and an earlier one sees it next
//! round.

use std::collections::HashMap;

use monkey_events::{generate_event_id, InspectionEvent, ItemSnapshot, MonkeySnapshot, TroopSnapshot};

use crate::error::{SetupError, SimError};
use crate::events::{InspectionSink, NullSink};
use crate::monkey::{Monkey, MonkeyId, Undelivered};

#[derive(Debug)]
pub struct Troop {
    monkeys: Vec<Monkey>,
    index: HashMap<MonkeyId, usize>,
    relieve_after_inspect: bool,
    round: u64,
    next_event_id: u64,
}

impl Troop {
    /// Builds a troop from monkeys in visiting order. Relief is on by default.
    pub fn new(monkeys: Vec<Monkey>) -> Result<Self, SetupError> {
        let mut index = HashMap::with_capacity(monkeys.len());
        for (position, monkey) in monkeys.iter().enumerate() {
            if index.insert(monkey.id().to_string(), position).is_some() {
                return Err(SetupError::DuplicateMonkey(monkey.id().to_string()));
            }
        }

        tracing::info!(
            monkeys = monkeys.len(),
            items = monkeys.iter().map(Monkey::item_count).sum::<usize>(),
            "troop assembled"
        );

        Ok(Self {
            monkeys,
            index,
            relieve_after_inspect: true,
            round: 0,
            next_event_id: 1,
        })
    }

    /// Whether worry is floor-divided by 3 after each direct inspection
    pub fn with_relief(mut self, relieve_after_inspect: bool) -> Self {
        self.relieve_after_inspect = relieve_after_inspect;
        self
    }

    pub fn relieve_after_inspect(&self) -> bool {
        self.relieve_after_inspect
    }

    /// Rounds completed so far
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Monkeys in visiting order
    pub fn monkeys(&self) -> &[Monkey] {
        &self.monkeys
    }

    pub fn monkey(&self, id: &str) -> Option<&Monkey> {
        self.index.get(id).map(|&position| &self.monkeys[position])
    }

    pub fn len(&self) -> usize {
        self.monkeys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monkeys.is_empty()
    }

    /// Items held across all monkeys
    pub fn item_count(&self) -> usize {
        self.monkeys.iter().map(Monkey::item_count).sum()
    }

    /// Inspection count per monkey, in visiting order
    pub fn inspection_counts(&self) -> Vec<(&str, u64)> {
        self.monkeys
            .iter()
            .map(|m| (m.id(), m.inspections()))
            .collect()
    }

    pub fn run_round(&mut self) -> Result<(), SimError> {
        self.run_round_traced(&mut NullSink)
    }

    pub fn run_rounds(&mut self, rounds: u64) -> Result<(), SimError> {
        self.run_rounds_traced(rounds, &mut NullSink)
    }

    pub fn run_rounds_traced(
        &mut self,
        rounds: u64,
        sink: &mut dyn InspectionSink,
    ) -> Result<(), SimError> {
        for _ in 0..rounds {
            self.run_round_traced(sink)?;
        }
        Ok(())
    }

    /// Runs one round, reporting every inspection to `sink`.
    ///
    /// A throw to an identity not in the troop aborts the round. The item
    /// stays with the monkey that threw it, so the troop still holds every
    /// item afterwards.
    pub fn run_round_traced(&mut self, sink: &mut dyn InspectionSink) -> Result<(), SimError> {
        let round = self.round + 1;
        let relieve = self.relieve_after_inspect;
        let index = &self.index;
        let next_event_id = &mut self.next_event_id;
        let trace = sink.enabled();

        for position in 0..self.monkeys.len() {
            // Split so the active monkey and every possible target are
            // borrowed separately.
            let (before, rest) = self.monkeys.split_at_mut(position);
            let Some((current, after)) = rest.split_first_mut() else {
                break;
            };

            current.take_turn(relieve, |throw| {
                let receiver = match index.get(throw.target).copied() {
                    Some(target) if target < position => before.get_mut(target),
                    Some(target) if target > position => after.get_mut(target - position - 1),
                    _ => None,
                };
                let Some(receiver) = receiver else {
                    return Err(Undelivered {
                        error: SimError::DanglingTarget {
                            from: throw.from.to_string(),
                            target: throw.target.to_string(),
                            item: throw.item.id.clone(),
                        },
                        item: throw.item,
                    });
                };

                if trace {
                    let event = InspectionEvent::new(
                        generate_event_id(*next_event_id),
                        round,
                        throw.from,
                        throw.item.id.as_str(),
                        throw.item.value.summary(),
                        throw.target,
                    )
                    .with_conversion(throw.converted);
                    if let Err(e) = sink.record(&event) {
                        return Err(Undelivered {
                            error: SimError::Trace(e),
                            item: throw.item,
                        });
                    }
                    *next_event_id += 1;
                }

                receiver.catch(throw.item);
                Ok(())
            })?;
        }

        self.round = round;
        tracing::debug!(round, items = self.item_count(), "round complete");
        Ok(())
    }

    /// Product of the two highest inspection counts.
    pub fn monkey_business(&self) -> Result<u128, SimError> {
        let mut counts: Vec<u64> = self.monkeys.iter().map(Monkey::inspections).collect();
        if counts.len() < 2 {
            return Err(SimError::TooFewMonkeys(counts.len()));
        }
        counts.sort_unstable_by(|a, b| b.cmp(a));
        Ok(u128::from(counts[0]) * u128::from(counts[1]))
    }

    /// Current state of every monkey, in visiting order
    pub fn snapshot(&self) -> TroopSnapshot {
        let mut snapshot = TroopSnapshot::new(self.round);
        for monkey in &self.monkeys {
            let mut entry = MonkeySnapshot::new(
                monkey.id(),
                monkey.inspections(),
                monkey.divisor(),
                monkey.on_divisible(),
                monkey.on_not_divisible(),
            );
            entry.items = monkey
                .items()
                .map(|item| ItemSnapshot {
                    item_id: item.id.clone(),
                    worry: item.value.summary(),
                })
                .collect();
            snapshot.monkeys.push(entry);
        }
        snapshot.monkey_business = self.monkey_business().ok();
        snapshot
    }
}
