//! Error Types
//!
//! Setup errors are raised while building the troop, before any round runs.
//! Simulation errors abort a run in progress. Neither is retried.

use thiserror::Error;

/// Errors raised while parsing notes or building monkeys.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("monkey {monkey} would throw to itself")]
    SelfThrow { monkey: String },

    #[error("monkey {monkey} is incomplete: missing {field}")]
    Incomplete { monkey: String, field: &'static str },

    #[error("monkey {monkey} tests divisibility by zero")]
    ZeroDivisor { monkey: String },

    #[error("unsupported operand '{0}': operations must start with 'old'")]
    UnsupportedOperand(String),

    #[error("unknown operator '{0}': expected '+' or '*'")]
    UnknownOperator(String),

    #[error("unknown test: {0}")]
    UnknownTest(String),

    #[error("unable to handle condition '{0}'")]
    UnknownBranch(String),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("malformed operation '{0}': expected 'old <op> <operand>'")]
    MalformedOperation(String),

    #[error("malformed line {line}: {text}")]
    MalformedLine { line: usize, text: String },

    #[error("line {line} appears before any monkey: {text}")]
    OutsideMonkey { line: usize, text: String },

    #[error("duplicate monkey id {0}")]
    DuplicateMonkey(String),

    #[error("notes define no monkeys")]
    NoMonkeys,

    #[error("IO error reading notes: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("monkey {from} threw item {item} to unknown monkey {target}")]
    DanglingTarget {
        from: String,
        target: String,
        item: String,
    },

    #[error("worry for item {item} overflowed while monkey {monkey} inspected it")]
    WorryOverflow { monkey: String, item: String },

    #[error("monkey business needs at least two monkeys, troop has {0}")]
    TooFewMonkeys(usize),

    #[error("failed to record inspection event: {0}")]
    Trace(#[from] std::io::Error),
}
