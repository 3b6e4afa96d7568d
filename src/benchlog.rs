//! Structured benchmark events: one JSON object per line on the `staffdb::bench`
//! target, plus a thread-local capture sink so tests can assert on the sequence
//! without installing a global logger.

use std::cell::RefCell;

pub const TARGET: &str = "staffdb::bench";

#[doc(hidden)]
pub use serde_json::json as __json;

thread_local! {
    static TL_SINK: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

/// Disables the thread-local sink on drop.
pub struct BenchSinkGuard;

impl Drop for BenchSinkGuard {
    fn drop(&mut self) {
        TL_SINK.with(|s| *s.borrow_mut() = None);
    }
}

/// Start capturing events emitted on the current thread.
pub fn enable_thread_sink() -> BenchSinkGuard {
    TL_SINK.with(|s| *s.borrow_mut() = Some(Vec::new()));
    BenchSinkGuard
}

pub fn write_str(line: &str) {
    TL_SINK.with(|s| {
        if let Some(buf) = s.borrow_mut().as_mut() {
            buf.push(line.to_owned());
        }
    });
}

/// Take the captured lines, leaving the sink enabled and empty.
pub fn drain() -> Vec<String> {
    TL_SINK.with(|s| s.borrow_mut().as_mut().map(std::mem::take).unwrap_or_default())
}

/// Captured lines parsed back into JSON; lines that fail to parse are skipped.
pub fn drain_events() -> Vec<serde_json::Value> {
    drain().iter().filter_map(|l| serde_json::from_str(l).ok()).collect()
}

pub fn emit(event: serde_json::Value) {
    let line = event.to_string();
    write_str(&line);
    log::info!(target: TARGET, "{line}");
}

/// Emit a benchmark event built with `serde_json::json!` syntax.
#[macro_export]
macro_rules! bench_event {
    ($($json:tt)+) => {
        $crate::benchlog::emit($crate::benchlog::__json!($($json)+))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_captures_json_lines() {
        let _g = enable_thread_sink();
        crate::bench_event!({"phase": "drop_index", "status": "ok"});
        crate::bench_event!({"phase": "report", "rows": 3});
        let events = drain_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["phase"], "drop_index");
        assert_eq!(events[1]["rows"], 3);
        assert!(drain().is_empty());
    }

    #[test]
    fn other_threads_are_not_captured() {
        let _g = enable_thread_sink();
        crate::bench_event!({"phase": "main"});
        let child = std::thread::spawn(|| {
            crate::bench_event!({"phase": "child"});
            drain()
        })
        .join()
        .unwrap();
        assert!(child.is_empty());
        assert_eq!(drain().len(), 1);
    }

    #[test]
    fn guard_disables_sink() {
        {
            let _g = enable_thread_sink();
        }
        crate::bench_event!({"phase": "after"});
        assert!(drain().is_empty());
    }
}
