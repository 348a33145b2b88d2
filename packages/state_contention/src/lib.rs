//! Shared vs unshared mutable state under concurrent access.
//!
//! Worker threads repeatedly incrementing a counter pay wildly different costs
//! depending on whether they all hammer one memory location or each own their own.
//! This package holds the two minimal data holders that expose the difference:
//!
//! - [`SharedCounter`]: one instance per measurement run, referenced by every worker
//!   concurrently, with no synchronization at all.
//! - [`LocalCounter`]: one instance per worker, never visible to any other worker.
//!
//! Both start at π and both increment by 1.0; the only difference between the two
//! measured scenarios is whether the memory location is contended. The effect is more
//! articulated on machines with many processors.
//!
//! The benchmark in `benches/` drives both counters through the same timed loop; the
//! example in `examples/` shows the effect without any benchmark framework.

mod local;
mod shared;

pub use local::*;
pub use shared::*;
