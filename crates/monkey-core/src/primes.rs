//! Prime Cache
//!
//! Small primes used to seed the factored worry representation. The list is
//! produced by naive trial division and computed at most once per cache; the
//! cache is shared read-only afterwards (usually behind an `Arc`).

use std::sync::OnceLock;

use crate::worry::Worry;

/// Default upper bound (exclusive) of the cached prime list
pub const DEFAULT_PRIME_LIMIT: u64 = 100;

/// Returns every `p` in `[1, limit)` with exactly one divisor in `[1, p/2]`.
///
/// Under this filter `1` counts as its own lone divisor and is included,
/// so the list starts `1, 2, 3, 5, 7, ...`.
pub fn primes_up_to(limit: u64) -> Vec<Worry> {
    (1..limit)
        .filter(|&p| {
            let upper = (p / 2).max(1);
            (1..=upper).filter(|i| p % i == 0).count() == 1
        })
        .map(Worry::from)
        .collect()
}

/// Lazily computed, immutable list of small primes.
#[derive(Debug)]
pub struct PrimeCache {
    limit: u64,
    primes: OnceLock<Vec<Worry>>,
}

impl PrimeCache {
    /// Create a cache covering `[1, limit)`. Nothing is computed yet.
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            primes: OnceLock::new(),
        }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// The cached primes in ascending order, computed on first call.
    pub fn primes(&self) -> &[Worry] {
        self.primes.get_or_init(|| primes_up_to(self.limit))
    }

    /// Whether `value` is in the cached list
    pub fn contains(&self, value: Worry) -> bool {
        self.primes().binary_search(&value).is_ok()
    }
}

impl Default for PrimeCache {
    fn default() -> Self {
        Self::new(DEFAULT_PRIME_LIMIT)
    }
}
