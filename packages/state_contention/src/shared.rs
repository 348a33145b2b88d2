use std::cell::UnsafeCell;
use std::f64::consts::PI;

/// A floating-point counter meant to be referenced by every worker thread in a
/// measurement run at once, with no synchronization whatsoever.
///
/// There is no lock and no atomic here on purpose: concurrent increments contend for
/// a single memory location and may overwrite each other. That contention cost is the
/// quantity the benchmarks built on this type observe, so the final value is allowed
/// to land anywhere between "one increment survived" and "every increment survived".
///
/// The counter starts at π rather than zero so the increments cannot be folded into a
/// compile-time constant.
#[derive(Debug)]
pub struct SharedCounter {
    value: UnsafeCell<f64>,
}

// SAFETY: The only field is an aligned f64 accessed exclusively through plain
// word-sized loads and stores. Racing accesses can lose updates but cannot tear the
// value or reach any other memory, which is the full extent of what callers of this
// type are promised.
unsafe impl Sync for SharedCounter {}

impl SharedCounter {
    /// Creates a counter preset to π.
    #[must_use]
    pub fn new() -> Self {
        Self {
            value: UnsafeCell::new(PI),
        }
    }

    /// Adds 1.0 to the counter as a plain unsynchronized read-modify-write.
    ///
    /// Increments racing on the same counter interleave arbitrarily; a lost update is
    /// an accepted outcome, not a defect.
    #[allow(
        clippy::arithmetic_side_effects,
        reason = "the increment is the measured operation; f64 addition cannot panic"
    )]
    pub fn increment(&self) {
        // SAFETY: The pointer is valid for the lifetime of `self` and the read is a
        // plain aligned 8-byte load.
        let current = unsafe { self.value.get().read() };
        // SAFETY: Same pointer; the write is a plain aligned 8-byte store. A racing
        // increment may be overwritten by this store or overwrite it.
        unsafe { self.value.get().write(current + 1.0) };
    }

    /// Reads the current value.
    ///
    /// Meaningful once workers have quiesced; a read concurrent with increments
    /// observes some value the counter passed through, nothing more.
    #[must_use]
    pub fn value(&self) -> f64 {
        // SAFETY: The pointer is valid for the lifetime of `self` and the read is a
        // plain aligned 8-byte load.
        unsafe { self.value.get().read() }
    }
}

impl Default for SharedCounter {
    fn default() -> Self {
        Self::new()
    }
}
