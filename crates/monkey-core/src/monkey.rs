//! Monkeys
//!
//! A monkey owns a FIFO queue of items and takes turns inspecting them:
//! inspect, transform, optionally relieve, test, and throw.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::error::{SetupError, SimError};
use crate::operation::Operation;
use crate::primes::PrimeCache;
use crate::worry::{Worry, WorryItem};

/// Identifier from the notes (`Monkey 3:` has id `"3"`)
pub type MonkeyId = String;

/// An item leaving a monkey's hands, handed to the throw callback
#[derive(Debug)]
pub struct Throw<'a> {
    pub from: &'a str,
    pub target: &'a str,
    pub item: WorryItem,
    /// True when this inspection switched the item to factored form
    pub converted: bool,
}

/// A throw the troop refused. The item comes back so it is not lost.
#[derive(Debug)]
pub struct Undelivered {
    pub item: WorryItem,
    pub error: SimError,
}

#[derive(Debug, Clone)]
pub struct Monkey {
    id: MonkeyId,
    items: VecDeque<WorryItem>,
    operation: Operation,
    divisor: Worry,
    on_divisible: MonkeyId,
    on_not_divisible: MonkeyId,
    inspections: u64,
    primes: Arc<PrimeCache>,
}

impl Monkey {
    /// Fails if either branch points back at this monkey or the divisor is zero.
    pub fn new(
        id: impl Into<MonkeyId>,
        items: Vec<WorryItem>,
        operation: Operation,
        divisor: Worry,
        on_divisible: impl Into<MonkeyId>,
        on_not_divisible: impl Into<MonkeyId>,
        primes: Arc<PrimeCache>,
    ) -> Result<Self, SetupError> {
        let id = id.into();
        let on_divisible = on_divisible.into();
        let on_not_divisible = on_not_divisible.into();

        if id == on_divisible || id == on_not_divisible {
            return Err(SetupError::SelfThrow { monkey: id });
        }
        if divisor == 0 {
            return Err(SetupError::ZeroDivisor { monkey: id });
        }
        if !primes.contains(divisor) {
            tracing::warn!(
                monkey = %id,
                divisor = %divisor,
                "divisor is not a cached prime; factored items may take the wrong branch"
            );
        }

        Ok(Self {
            id,
            items: items.into(),
            operation,
            divisor,
            on_divisible,
            on_not_divisible,
            inspections: 0,
            primes,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn divisor(&self) -> Worry {
        self.divisor
    }

    pub fn on_divisible(&self) -> &str {
        &self.on_divisible
    }

    pub fn on_not_divisible(&self) -> &str {
        &self.on_not_divisible
    }

    /// Total items inspected so far; never reset
    pub fn inspections(&self) -> u64 {
        self.inspections
    }

    /// Items currently held, front of the queue first
    pub fn items(&self) -> impl Iterator<Item = &WorryItem> {
        self.items.iter()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Receive a thrown item at the back of the queue
    pub fn catch(&mut self, item: WorryItem) {
        self.items.push_back(item);
    }

    /// Inspect and throw every held item in queue order.
    ///
    /// `throw` is called synchronously once per item, after the counter,
    /// arithmetic and branch test for that item. The queue is empty when
    /// this returns `Ok`.
    ///
    /// On error the turn stops and nothing is dropped. A refused item goes
    /// back to the front of the queue already inspected. An item whose
    /// arithmetic overflowed goes back uncounted and unchanged.
    pub fn take_turn<F>(&mut self, relieve: bool, mut throw: F) -> Result<(), SimError>
    where
        F: FnMut(Throw<'_>) -> Result<(), Undelivered>,
    {
        let primes = self.primes.primes();

        while let Some(mut item) = self.items.pop_front() {
            let Some(converted) = item.value.apply(&self.operation, primes, relieve) else {
                let error = SimError::WorryOverflow {
                    monkey: self.id.clone(),
                    item: item.id.clone(),
                };
                self.items.push_front(item);
                return Err(error);
            };
            self.inspections += 1;

            let target = if item.value.is_divisible_by(self.divisor) {
                &self.on_divisible
            } else {
                &self.on_not_divisible
            };

            tracing::trace!(
                monkey = %self.id,
                item = %item.id,
                worry = %item.value.summary(),
                to = %target,
                "throw"
            );

            let thrown = throw(Throw {
                from: &self.id,
                target,
                item,
                converted,
            });
            if let Err(Undelivered { item, error }) = thrown {
                self.items.push_front(item);
                return Err(error);
            }
        }

        Ok(())
    }
}

/// Collects a monkey's fields one at a time, as the notes parser finds them.
#[derive(Debug, Clone, Default)]
pub struct MonkeyBuilder {
    pub id: MonkeyId,
    pub items: Option<Vec<WorryItem>>,
    pub operation: Option<Operation>,
    pub divisor: Option<Worry>,
    pub on_divisible: Option<MonkeyId>,
    pub on_not_divisible: Option<MonkeyId>,
}

impl MonkeyBuilder {
    pub fn new(id: impl Into<MonkeyId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Starting items from raw worry levels, ids derived from position.
    pub fn with_levels(mut self, levels: &[Worry]) -> Self {
        self.items = Some(
            levels
                .iter()
                .enumerate()
                .map(|(index, &level)| WorryItem::new(item_id(&self.id, index, level), level))
                .collect(),
        );
        self
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    pub fn with_divisor(mut self, divisor: Worry) -> Self {
        self.divisor = Some(divisor);
        self
    }

    pub fn with_branches(
        mut self,
        on_divisible: impl Into<MonkeyId>,
        on_not_divisible: impl Into<MonkeyId>,
    ) -> Self {
        self.on_divisible = Some(on_divisible.into());
        self.on_not_divisible = Some(on_not_divisible.into());
        self
    }

    /// Fails with the first missing field, then with any [`Monkey::new`] error.
    pub fn build(self, primes: Arc<PrimeCache>) -> Result<Monkey, SetupError> {
        let MonkeyBuilder {
            id,
            items,
            operation,
            divisor,
            on_divisible,
            on_not_divisible,
        } = self;

        let missing = |field: &'static str| SetupError::Incomplete {
            monkey: id.clone(),
            field,
        };

        let items = items.ok_or_else(|| missing("starting items"))?;
        let operation = operation.ok_or_else(|| missing("operation"))?;
        let divisor = divisor.ok_or_else(|| missing("test"))?;
        let on_divisible = on_divisible.ok_or_else(|| missing("true branch"))?;
        let on_not_divisible = on_not_divisible.ok_or_else(|| missing("false branch"))?;

        Monkey::new(
            id,
            items,
            operation,
            divisor,
            on_divisible,
            on_not_divisible,
            primes,
        )
    }
}

/// Item identity: owning monkey, position in its starting list, and level.
pub fn item_id(monkey: &str, index: usize, level: Worry) -> String {
    format!("{}~i{}l{}", monkey, index, level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worry::FACTORING_THRESHOLD;

    fn primes() -> Arc<PrimeCache> {
        Arc::new(PrimeCache::default())
    }

    fn monkey_zero() -> Monkey {
        MonkeyBuilder::new("0")
            .with_levels(&[79, 98])
            .with_operation(Operation::MulConst(19))
            .with_divisor(23)
            .with_branches("2", "3")
            .build(primes())
            .unwrap()
    }

    #[test]
    fn test_self_throw_rejected() {
        let err = Monkey::new("1", vec![], Operation::Double, 5, "1", "2", primes()).unwrap_err();
        assert!(matches!(err, SetupError::SelfThrow { ref monkey } if monkey == "1"));

        let err = Monkey::new("1", vec![], Operation::Double, 5, "2", "1", primes()).unwrap_err();
        assert!(matches!(err, SetupError::SelfThrow { .. }));
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let err = Monkey::new("1", vec![], Operation::Double, 0, "0", "2", primes()).unwrap_err();
        assert!(matches!(err, SetupError::ZeroDivisor { .. }));
    }

    #[test]
    fn test_builder_reports_missing_field() {
        let err = MonkeyBuilder::new("4")
            .with_levels(&[1])
            .with_operation(Operation::Square)
            .with_branches("0", "1")
            .build(primes())
            .unwrap_err();

        assert!(matches!(err, SetupError::Incomplete { field: "test", .. }));
    }

    #[test]
    fn test_builder_assigns_item_ids() {
        let monkey = monkey_zero();
        let ids: Vec<&str> = monkey.items().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["0~i0l79", "0~i1l98"]);
    }

    #[test]
    fn test_turn_throws_in_queue_order() {
        let mut monkey = monkey_zero();
        let mut thrown = Vec::new();

        monkey
            .take_turn(true, |throw| {
                thrown.push((throw.target.to_string(), throw.item.value.direct()));
                Ok(())
            })
            .unwrap();

        // 79 * 19 / 3 = 500, 98 * 19 / 3 = 620; neither divisible by 23
        assert_eq!(
            thrown,
            vec![("3".to_string(), Some(500)), ("3".to_string(), Some(620))]
        );
        assert_eq!(monkey.inspections(), 2);
        assert_eq!(monkey.item_count(), 0);
    }

    #[test]
    fn test_divisible_branch() {
        let mut monkey = MonkeyBuilder::new("2")
            .with_levels(&[79])
            .with_operation(Operation::Square)
            .with_divisor(13)
            .with_branches("1", "3")
            .build(primes())
            .unwrap();

        let mut target = String::new();
        monkey
            .take_turn(true, |throw| {
                target = throw.target.to_string();
                Ok(())
            })
            .unwrap();

        // 79 * 79 / 3 = 2080 = 13 * 160
        assert_eq!(target, "1");
    }

    #[test]
    fn test_counter_counts_every_item() {
        let mut monkey = monkey_zero();
        monkey.take_turn(true, |_| Ok(())).unwrap();
        monkey.catch(WorryItem::new("x", 5));
        monkey.catch(WorryItem::new("y", FACTORING_THRESHOLD * 23));
        monkey.take_turn(false, |_| Ok(())).unwrap();

        assert_eq!(monkey.inspections(), 4);
    }

    #[test]
    fn test_conversion_flag_passed_to_throw() {
        let mut monkey = monkey_zero();
        monkey.take_turn(true, |_| Ok(())).unwrap();

        monkey.catch(WorryItem::new("big", FACTORING_THRESHOLD * 23));
        let mut seen = None;
        monkey
            .take_turn(false, |throw| {
                seen = Some((throw.converted, throw.item.is_converted(), throw.target.to_string()));
                Ok(())
            })
            .unwrap();

        // 23 was recorded during factorization, so the membership test passes
        assert_eq!(seen, Some((true, true, "2".to_string())));
    }

    #[test]
    fn test_refused_throw_keeps_items() {
        let mut monkey = monkey_zero();
        let result = monkey.take_turn(true, |throw| {
            Err(Undelivered {
                error: SimError::DanglingTarget {
                    from: throw.from.to_string(),
                    target: throw.target.to_string(),
                    item: throw.item.id.clone(),
                },
                item: throw.item,
            })
        });

        assert!(matches!(result, Err(SimError::DanglingTarget { .. })));
        assert_eq!(monkey.inspections(), 1);

        // The refused item is back in front, already inspected; the next one
        // was never touched
        let held: Vec<(&str, Option<Worry>)> = monkey
            .items()
            .map(|i| (i.id.as_str(), i.value.direct()))
            .collect();
        assert_eq!(held, vec![("0~i0l79", Some(500)), ("0~i1l98", Some(98))]);
    }

    #[test]
    fn test_direct_overflow_keeps_item_uncounted() {
        let mut monkey = Monkey::new(
            "0",
            vec![WorryItem::new("a", 3), WorryItem::new("b", 4)],
            Operation::MulConst(Worry::MAX),
            7,
            "1",
            "2",
            primes(),
        )
        .unwrap();

        let result = monkey.take_turn(false, |_| Ok(()));
        assert!(matches!(result, Err(SimError::WorryOverflow { ref item, .. }) if item == "a"));
        assert_eq!(monkey.inspections(), 0);

        let held: Vec<&str> = monkey.items().map(|i| i.id.as_str()).collect();
        assert_eq!(held, vec!["a", "b"]);
        assert_eq!(monkey.items().next().and_then(|i| i.value.direct()), Some(3));
    }

    #[test]
    fn test_factored_items_never_overflow() {
        let mut monkey = Monkey::new(
            "0",
            vec![WorryItem::new("huge", Worry::MAX / 2)],
            Operation::Square,
            7,
            "1",
            "2",
            primes(),
        )
        .unwrap();

        for _ in 0..8 {
            let mut caught = Vec::new();
            monkey
                .take_turn(false, |throw| {
                    caught.push(throw.item);
                    Ok(())
                })
                .unwrap();
            for item in caught {
                monkey.catch(item);
            }
        }

        assert_eq!(monkey.inspections(), 8);
        assert!(monkey.items().all(WorryItem::is_converted));
    }
}
