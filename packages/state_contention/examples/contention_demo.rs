//! Demonstrates the performance difference between incrementing a counter that every
//! worker thread shares and incrementing a counter each worker owns, without any
//! benchmark framework involved.

#![allow(missing_docs, reason = "No need for API documentation in example code")]
#![allow(
    clippy::arithmetic_side_effects,
    reason = "Example code with safe small arithmetic operations"
)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "precision loss acceptable for display purposes"
)]

use std::f64::consts::PI;
use std::sync::Arc;

use bench_rig::ThreadPool;
use new_zealand::nz;
use state_contention::{LocalCounter, SharedCounter};

const ITERATIONS: u64 = 1_000_000;

fn main() {
    println!("Shared vs unshared counter increments");
    println!("=====================================");
    println!();

    let mut pool = ThreadPool::new(nz!(4));
    let worker_count = pool.thread_count().get() as u64;

    println!(
        "Each of {} workers performs {ITERATIONS} increments per scenario.",
        pool.thread_count()
    );
    println!();

    // Unshared scenario: every worker constructs and keeps its own counter.
    let unshared = pool.timed_run(ITERATIONS, LocalCounter::new, LocalCounter::increment);

    println!("Unshared counters: {:?} mean per worker", unshared.mean_duration());

    for (index, counter) in unshared.thread_states().iter().enumerate() {
        println!("  worker {index} counter ended at {:.6}", counter.value());
    }

    println!();

    // Shared scenario: one counter for the run, every worker increments it.
    let shared_counter = Arc::new(SharedCounter::new());

    let shared = pool.timed_run(
        ITERATIONS,
        {
            let counter = Arc::clone(&shared_counter);
            move || Arc::clone(&counter)
        },
        |counter| counter.increment(),
    );

    println!("Shared counter:    {:?} mean per worker", shared.mean_duration());

    let issued = worker_count * ITERATIONS;
    let survived = (shared_counter.value() - PI).round() as u64;

    println!("  counter ended at {:.6}", shared_counter.value());
    println!("  {issued} increments issued, {survived} survived, {} lost to races", issued - survived);
    println!();

    let slowdown = shared.mean_duration().as_nanos() as f64 / unshared.mean_duration().as_nanos() as f64;

    if slowdown > 1.0 {
        println!("Sharing the counter made each increment {slowdown:.2}x slower.");
    } else {
        println!("No contention penalty observed; expect one on a machine with more processors.");
    }
}
