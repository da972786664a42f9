//! Notes Parser
//!
//! Reads the blank-line separated monkey notes:
//!
//! ```text
//! Monkey 0:
//!   Starting items: 79, 98
//!   Operation: new = old * 19
//!   Test: divisible by 23
//!     If true: throw to monkey 2
//!     If false: throw to monkey 3
//! ```
//!
//! Lines are dispatched on their first character. A block is built as soon
//! as the next `Monkey` line (or the end of input) is reached, so an
//! incomplete monkey is reported before any round runs.

use std::path::Path;
use std::sync::Arc;

use crate::error::SetupError;
use crate::monkey::{item_id, Monkey, MonkeyBuilder};
use crate::operation::Operation;
use crate::primes::PrimeCache;
use crate::troop::Troop;
use crate::worry::{Worry, WorryItem};

/// Parses notes into monkeys, in the order they appear.
pub fn parse_notes(text: &str, primes: Arc<PrimeCache>) -> Result<Vec<Monkey>, SetupError> {
    let mut monkeys = Vec::new();
    let mut current: Option<MonkeyBuilder> = None;

    for (number, raw) in text.lines().enumerate() {
        let line_no = number + 1;
        let line = raw.trim();
        let Some(first) = line.chars().next() else {
            continue;
        };
        let malformed = || SetupError::MalformedLine {
            line: line_no,
            text: line.to_string(),
        };

        if first == 'M' {
            if let Some(builder) = current.take() {
                monkeys.push(builder.build(Arc::clone(&primes))?);
            }
            let id = line
                .split_whitespace()
                .last()
                .and_then(|token| token.strip_suffix(':'))
                .filter(|id| !id.is_empty())
                .ok_or_else(malformed)?;
            current = Some(MonkeyBuilder::new(id));
            continue;
        }

        let Some(builder) = current.as_mut() else {
            return Err(SetupError::OutsideMonkey {
                line: line_no,
                text: line.to_string(),
            });
        };
        let (label, body) = line.split_once(':').ok_or_else(malformed)?;

        match first {
            'S' => builder.items = Some(parse_items(&builder.id, body)?),
            'O' => {
                let (_, expr) = body.split_once('=').ok_or_else(malformed)?;
                builder.operation = Some(expr.parse::<Operation>()?);
            }
            'T' => builder.divisor = Some(parse_test(body)?),
            'I' => {
                let target = body
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .get(3)
                    .map(|id| id.to_string())
                    .ok_or_else(malformed)?;
                match label.split_whitespace().nth(1) {
                    Some("true") => builder.on_divisible = Some(target),
                    Some("false") => builder.on_not_divisible = Some(target),
                    other => {
                        return Err(SetupError::UnknownBranch(
                            other.unwrap_or_default().to_string(),
                        ))
                    }
                }
            }
            _ => return Err(malformed()),
        }
    }

    if let Some(builder) = current {
        monkeys.push(builder.build(primes)?);
    }
    if monkeys.is_empty() {
        return Err(SetupError::NoMonkeys);
    }

    tracing::debug!(monkeys = monkeys.len(), "parsed notes");
    Ok(monkeys)
}

/// Parses notes and assembles them into a troop.
pub fn troop_from_notes(text: &str, primes: Arc<PrimeCache>) -> Result<Troop, SetupError> {
    Troop::new(parse_notes(text, primes)?)
}

/// Reads a notes file and assembles it into a troop.
pub fn load_troop(path: impl AsRef<Path>, primes: Arc<PrimeCache>) -> Result<Troop, SetupError> {
    let text = std::fs::read_to_string(path)?;
    troop_from_notes(&text, primes)
}

/// A monkey in the notes must start with at least one item.
fn parse_items(monkey: &str, body: &str) -> Result<Vec<WorryItem>, SetupError> {
    if body.trim().is_empty() {
        return Err(SetupError::Incomplete {
            monkey: monkey.to_string(),
            field: "starting items",
        });
    }
    body.split(',')
        .map(str::trim)
        .enumerate()
        .map(|(index, token)| {
            let level: Worry = token
                .parse()
                .map_err(|_| SetupError::InvalidNumber(token.to_string()))?;
            Ok(WorryItem::new(item_id(monkey, index, level), level))
        })
        .collect()
}

fn parse_test(body: &str) -> Result<Worry, SetupError> {
    let tokens: Vec<&str> = body.split_whitespace().collect();
    match tokens.as_slice() {
        ["divisible", "by", value] => value
            .parse()
            .map_err(|_| SetupError::InvalidNumber(value.to_string())),
        _ => Err(SetupError::UnknownTest(body.trim().to_string())),
    }
}
