use std::time::{Duration, Instant};

/// Run `f` and return its output together with the wall-clock time it took.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}

pub fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000.0
}
