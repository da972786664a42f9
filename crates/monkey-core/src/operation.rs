//! Operation Descriptor
//!
//! The four supported `old <op> <operand>` shapes, each with a direct and a
//! factored interpretation.

use std::fmt;
use std::str::FromStr;

use crate::error::SetupError;
use crate::worry::{FactorForm, Worry};

/// How a monkey changes an item's worry when it inspects it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `old + old`
    Double,
    /// `old * old`
    Square,
    /// `old + k`
    AddConst(Worry),
    /// `old * k`
    MulConst(Worry),
}

impl Operation {
    /// Exact arithmetic; `None` on overflow.
    pub fn apply_direct(&self, old: Worry) -> Option<Worry> {
        match *self {
            Operation::Double => old.checked_add(old),
            Operation::Square => old.checked_mul(old),
            Operation::AddConst(k) => old.checked_add(k),
            Operation::MulConst(k) => old.checked_mul(k),
        }
    }

    /// Factored arithmetic
    pub fn apply_factored(&self, form: FactorForm, primes: &[Worry]) -> FactorForm {
        match *self {
            Operation::Double => form.double(),
            Operation::Square => form.square(),
            Operation::AddConst(k) => form.add(k, primes),
            Operation::MulConst(k) => form.multiply(k),
        }
    }
}

impl FromStr for Operation {
    type Err = SetupError;

    /// Parses the right-hand side of `new = old <op> <operand>`.
    fn from_str(expr: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = expr.split_whitespace().collect();
        let [left, op, right] = tokens.as_slice() else {
            return Err(SetupError::MalformedOperation(expr.trim().to_string()));
        };

        if *left != "old" {
            return Err(SetupError::UnsupportedOperand(left.to_string()));
        }

        if *right == "old" {
            return match *op {
                "+" => Ok(Operation::Double),
                "*" => Ok(Operation::Square),
                other => Err(SetupError::UnknownOperator(other.to_string())),
            };
        }

        let k: Worry = right
            .parse()
            .map_err(|_| SetupError::InvalidNumber(right.to_string()))?;
        match *op {
            "+" => Ok(Operation::AddConst(k)),
            "*" => Ok(Operation::MulConst(k)),
            other => Err(SetupError::UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Double => write!(f, "old + old"),
            Operation::Square => write!(f, "old * old"),
            Operation::AddConst(k) => write!(f, "old + {}", k),
            Operation::MulConst(k) => write!(f, "old * {}", k),
        }
    }
}
