//! Properties of the two counter kinds when driven concurrently by the rig:
//! per-worker counters never interfere, and the shared counter is one single
//! instance whose racy increments land within the predictable envelope.

#![allow(
    clippy::float_cmp,
    reason = "tests assert exact floating-point outcomes on purpose"
)]
#![allow(
    clippy::arithmetic_side_effects,
    reason = "test code with safe small arithmetic operations"
)]

use std::f64::consts::PI;
use std::sync::Arc;

use bench_rig::ThreadPool;
use new_zealand::nz;
use state_contention::{LocalCounter, SharedCounter};

const INCREMENTS_PER_WORKER: u64 = 1000;

/// The exact value a counter reads after `count` lossless increments, computed by
/// the same repeated addition the counters perform so rounding is identical.
fn after_increments(count: u64) -> f64 {
    let mut value = PI;
    for _ in 0..count {
        value += 1.0;
    }
    value
}

#[test]
fn unshared_counters_never_interfere() {
    let mut pool = ThreadPool::new(nz!(4));

    let summary = pool.timed_run(
        INCREMENTS_PER_WORKER,
        LocalCounter::new,
        LocalCounter::increment,
    );

    let states = summary.into_thread_states();
    assert_eq!(states.len(), 4);

    // Every worker had its own instance, so every increment is accounted for.
    for counter in &states {
        assert_eq!(counter.value(), after_increments(INCREMENTS_PER_WORKER));
    }
}

#[test]
#[cfg_attr(miri, ignore)] // Miri flags the unsynchronized counter accesses.
fn every_worker_observes_the_same_shared_counter() {
    let mut pool = ThreadPool::new(nz!(4));
    let counter = Arc::new(SharedCounter::new());

    let summary = pool.timed_run(
        INCREMENTS_PER_WORKER,
        {
            let counter = Arc::clone(&counter);
            move || Arc::clone(&counter)
        },
        |counter| counter.increment(),
    );

    for handle in summary.thread_states() {
        assert!(Arc::ptr_eq(handle, &counter));
    }
}

#[test]
#[cfg_attr(miri, ignore)] // Miri flags the unsynchronized counter accesses.
fn contended_increments_land_in_documented_range() {
    let mut pool = ThreadPool::new(nz!(4));
    let counter = Arc::new(SharedCounter::new());

    let _summary = pool.timed_run(
        INCREMENTS_PER_WORKER,
        {
            let counter = Arc::clone(&counter);
            move || Arc::clone(&counter)
        },
        |counter| counter.increment(),
    );

    // Anywhere from one surviving increment (worst-case lost updates) up to all
    // 4000 of them (no lost updates) is a valid outcome.
    let value = counter.value();
    assert!(value >= PI + 1.0, "value {value} below the survivable minimum");
    assert!(
        value <= after_increments(4 * INCREMENTS_PER_WORKER),
        "value {value} exceeds the lossless maximum"
    );
}

#[test]
fn shared_counter_with_single_worker_loses_nothing() {
    let mut pool = ThreadPool::new(nz!(1));
    let counter = Arc::new(SharedCounter::new());

    let _summary = pool.timed_run(
        INCREMENTS_PER_WORKER,
        {
            let counter = Arc::clone(&counter);
            move || Arc::clone(&counter)
        },
        |counter| counter.increment(),
    );

    // One worker means no races, which means no lost updates.
    assert_eq!(counter.value(), after_increments(INCREMENTS_PER_WORKER));
}
