//! Index benchmark: the same probe query timed without and with the composite
//! `(gender, full_name)` index.

mod harness;
mod timing;

pub use harness::{BenchPhase, BenchmarkOptions, BenchmarkResult, IndexBenchmark, TargetPredicate};
pub use timing::{millis, timed};
