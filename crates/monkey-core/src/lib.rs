//! Core simulation logic: monkeys, worry arithmetic, rounds.

pub mod config;
pub mod error;
pub mod events;
pub mod monkey;
pub mod operation;
pub mod primes;
pub mod setup;
pub mod troop;
pub mod worry;

pub use config::{ConfigError, SimulationConfig};
pub use error::{SetupError, SimError};
pub use events::{EventLogger, InspectionSink, NullSink, PendingEvents};
pub use monkey::{Monkey, MonkeyBuilder, MonkeyId, Throw, Undelivered};
pub use operation::Operation;
pub use primes::{primes_up_to, PrimeCache, DEFAULT_PRIME_LIMIT};
pub use troop::Troop;
pub use worry::{FactorForm, Worry, WorryItem, WorryValue, FACTORING_THRESHOLD};
