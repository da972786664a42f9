//! Factored Worry
//!
//! Approximate representation used once a worry value gets too large for
//! direct arithmetic: a list of prime factors plus whatever is left over.
//!
//! Factorization records each cached prime at most once, so the list is not
//! a full factorization. It only needs to answer "is the divisor in the
//! list", which holds for the divisors the notes actually configure.
//!
//! The residual is unbounded. Squaring doubles its size and only `add` ever
//! rebuilds the whole value.

use num_bigint::BigUint;
use num_traits::Zero;

use super::Worry;

/// Factor list plus residual. The represented value is the product of all
/// factors times the residual.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactorForm {
    factors: Vec<Worry>,
    residual: BigUint,
}

impl FactorForm {
    pub fn new(factors: Vec<Worry>, residual: impl Into<BigUint>) -> Self {
        Self {
            factors,
            residual: residual.into(),
        }
    }

    /// Walks `primes` in order, dividing out each one that divides what is
    /// left. A prime is recorded once even if it divides again.
    pub fn factorize(value: impl Into<BigUint>, primes: &[Worry]) -> Self {
        let mut remaining: BigUint = value.into();
        let mut factors = Vec::new();
        for &p in primes {
            if (&remaining % p).is_zero() {
                factors.push(p);
                remaining /= p;
            }
        }
        Self {
            factors,
            residual: remaining,
        }
    }

    pub fn factors(&self) -> &[Worry] {
        &self.factors
    }

    pub fn residual(&self) -> &BigUint {
        &self.residual
    }

    /// Reconstructs the represented value.
    pub fn value(&self) -> BigUint {
        self.factors
            .iter()
            .fold(self.residual.clone(), |acc, &f| acc * f)
    }

    /// `old * old`: the factor list is concatenated with itself and the
    /// residual squared.
    pub fn square(mut self) -> Self {
        self.residual = &self.residual * &self.residual;
        self.factors.extend_from_within(..);
        self
    }

    /// `old + old`: appends a literal 2.
    pub fn double(mut self) -> Self {
        self.factors.push(2);
        self
    }

    /// `old * k`: appends `k` to the factor list.
    pub fn multiply(mut self, k: Worry) -> Self {
        self.factors.push(k);
        self
    }

    /// `old + k`: rebuilds the value, adds `k`, and factorizes again.
    pub fn add(self, k: Worry, primes: &[Worry]) -> Self {
        Self::factorize(self.value() + k, primes)
    }

    /// Membership test, not a modulus: true iff `divisor` was recorded.
    pub fn is_divisible_by(&self, divisor: Worry) -> bool {
        self.factors.contains(&divisor)
    }
}
