//! Multithreaded benchmark execution support.
//!
//! This package provides a pre-warmed [`ThreadPool`] and a timed run primitive
//! ([`ThreadPool::timed_run()`]) that executes a callback in a tight loop on every
//! pool thread simultaneously, returning the mean duration in the shape Criterion's
//! `iter_custom` expects, along with each thread's final state.
//!
//! The run logic separates preparation (unmeasured, once per thread) from execution
//! (measured, once per iteration), and synchronizes the threads on a barrier so the
//! timed loops start together.
//!
//! This package is not meant for use in production, serving only as a development
//! tool for benchmarking and performance analysis.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU64, Ordering};
//!
//! use bench_rig::ThreadPool;
//!
//! let mut pool = ThreadPool::all();
//!
//! // One shared counter, incremented from every thread.
//! let counter = Arc::new(AtomicU64::new(0));
//!
//! let summary = pool.timed_run(
//!     1000,
//!     {
//!         let counter = Arc::clone(&counter);
//!         move || Arc::clone(&counter)
//!     },
//!     |counter| {
//!         counter.fetch_add(1, Ordering::Relaxed);
//!     },
//! );
//!
//! println!("mean duration: {:?}", summary.mean_duration());
//! ```

mod pool;
mod run;

pub use pool::*;
pub use run::*;
