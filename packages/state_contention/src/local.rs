use std::cell::Cell;
use std::f64::consts::PI;

/// A floating-point counter owned by a single worker thread.
///
/// The field lives in a [`Cell`], so the type is `Send` but not `Sync`: a worker can
/// carry its counter across a thread boundary, but two workers can never observe the
/// same instance. The exclusivity that makes the unshared scenario contention-free is
/// enforced by the compiler rather than by convention, and with no other thread able
/// to touch the field, no increment is ever lost.
///
/// Starts at π, like [`SharedCounter`](crate::SharedCounter), so the two scenarios
/// run identical arithmetic.
#[derive(Debug)]
pub struct LocalCounter {
    value: Cell<f64>,
}

impl LocalCounter {
    /// Creates a counter preset to π.
    #[must_use]
    pub fn new() -> Self {
        Self {
            value: Cell::new(PI),
        }
    }

    /// Adds 1.0 to the counter.
    #[allow(
        clippy::arithmetic_side_effects,
        reason = "the increment is the measured operation; f64 addition cannot panic"
    )]
    pub fn increment(&self) {
        self.value.set(self.value.get() + 1.0);
    }

    /// Reads the current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value.get()
    }
}

impl Default for LocalCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(
        clippy::float_cmp,
        reason = "tests assert exact floating-point outcomes on purpose"
    )]

    use super::*;

    static_assertions::assert_impl_all!(LocalCounter: Send);
    static_assertions::assert_not_impl_any!(LocalCounter: Sync);

    #[test]
    fn starts_at_pi() {
        assert_eq!(LocalCounter::new().value(), PI);
    }

    #[test]
    fn increment_adds_exactly_one() {
        let counter = LocalCounter::new();

        counter.increment();

        assert_eq!(counter.value(), PI + 1.0);
    }

    #[test]
    fn default_is_equivalent_to_new() {
        assert_eq!(LocalCounter::default().value(), LocalCounter::new().value());
    }
}
