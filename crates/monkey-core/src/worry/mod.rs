//! Worry Representation
//!
//! Exact integers while values are small, factor lists once they are not.

pub mod factored;
pub mod value;

pub use factored::FactorForm;
pub use value::{WorryItem, WorryValue};

/// Integer type for worry values, divisors, and factors
pub type Worry = u128;

/// Values at or above this are converted to factored form on inspection
pub const FACTORING_THRESHOLD: Worry = 1_000_000_000_000;

/// Floor divisor applied after inspection when relief is on
pub const RELIEF_DIVISOR: Worry = 3;
