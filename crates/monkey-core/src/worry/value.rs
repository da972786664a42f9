//! Worry Values and Items
//!
//! A worry value starts out as an exact integer and switches, once and for
//! good, to the factored form when an inspection finds it at or above
//! [`FACTORING_THRESHOLD`].

use monkey_events::WorrySummary;

use super::{FactorForm, Worry, FACTORING_THRESHOLD, RELIEF_DIVISOR};
use crate::operation::Operation;

/// Numeric state of a worry item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorryValue {
    /// Exact value
    Direct(Worry),
    /// Approximate value; never converts back
    Factored(FactorForm),
}

impl WorryValue {
    /// Applies one inspection's worth of arithmetic.
    ///
    /// Direct values below the threshold get the direct operation followed by
    /// optional relief. Anything else is factorized first (once) and then
    /// gets the factored operation; relief never applies in factored form.
    ///
    /// Returns `Some(true)` when this call performed the conversion. `None`
    /// means direct arithmetic overflowed a [`Worry`], which only a constant
    /// near the top of the integer range can cause; the value is then left
    /// untouched. Factored arithmetic cannot fail.
    pub fn apply(&mut self, operation: &Operation, primes: &[Worry], relieve: bool) -> Option<bool> {
        match self {
            WorryValue::Direct(value) if *value < FACTORING_THRESHOLD => {
                let mut next = operation.apply_direct(*value)?;
                if relieve {
                    next /= RELIEF_DIVISOR;
                }
                *value = next;
                Some(false)
            }
            WorryValue::Direct(value) => {
                let form = FactorForm::factorize(*value, primes);
                *self = WorryValue::Factored(operation.apply_factored(form, primes));
                Some(true)
            }
            WorryValue::Factored(form) => {
                let current = std::mem::take(form);
                *form = operation.apply_factored(current, primes);
                Some(false)
            }
        }
    }

    /// Modulus test for direct values, membership test for factored ones.
    pub fn is_divisible_by(&self, divisor: Worry) -> bool {
        match self {
            WorryValue::Direct(value) => value % divisor == 0,
            WorryValue::Factored(form) => form.is_divisible_by(divisor),
        }
    }

    pub fn is_factored(&self) -> bool {
        matches!(self, WorryValue::Factored(_))
    }

    /// Exact value if still direct
    pub fn direct(&self) -> Option<Worry> {
        match self {
            WorryValue::Direct(value) => Some(*value),
            WorryValue::Factored(_) => None,
        }
    }

    pub fn summary(&self) -> WorrySummary {
        match self {
            WorryValue::Direct(value) => WorrySummary::Direct { value: *value },
            WorryValue::Factored(form) => WorrySummary::Factored {
                factor_count: form.factors().len(),
                residual: form.residual().to_string(),
            },
        }
    }
}

/// An item being thrown around. The id is informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorryItem {
    pub id: String,
    pub value: WorryValue,
}

impl WorryItem {
    pub fn new(id: impl Into<String>, worry: Worry) -> Self {
        Self {
            id: id.into(),
            value: WorryValue::Direct(worry),
        }
    }

    /// Whether the item has switched to factored form
    pub fn is_converted(&self) -> bool {
        self.value.is_factored()
    }
}
