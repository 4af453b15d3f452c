//! Verifies the `tracing` events emitted by the profiler.
//!
//! A formatting subscriber writing into a shared buffer is installed as the
//! thread-local default, so each test only sees the events of its own thread.

#![cfg(feature = "enabled")]

use std::io;
use std::sync::{Arc, Mutex};

use persistent_profiler::Profiler;
use tracing::Level;

#[derive(Clone, Debug, Default)]
struct CapturedOutput {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    fn lines(&self) -> Vec<String> {
        let buffer = self.buffer.lock().unwrap();

        String::from_utf8_lossy(&buffer)
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

impl io::Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with log output captured and returns the captured lines.
fn capture_logs(f: impl FnOnce()) -> Vec<String> {
    let output = CapturedOutput::default();
    let writer = output.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    output.lines()
}

fn count_containing(lines: &[String], needle: &str) -> usize {
    lines.iter().filter(|line| line.contains(needle)).count()
}

#[test]
fn mismatched_stop_logs_exactly_one_error() {
    let profiler = Profiler::builder().build();

    let lines = capture_logs(|| {
        assert!(profiler.stop("x").is_none());
    });

    assert_eq!(count_containing(&lines, "ERROR"), 1, "{lines:?}");

    let error_line = lines.iter().find(|line| line.contains("ERROR")).unwrap();
    assert!(error_line.contains("mismatched profiler timing for 'x'"));
    assert!(error_line.contains("region=\"x\""));
    assert!(error_line.contains("thread=ThreadId("));
}

#[test]
fn matched_stop_logs_no_error() {
    let profiler = Profiler::builder().build();

    let lines = capture_logs(|| {
        profiler.start("matched");
        assert!(profiler.stop("matched").is_some());
    });

    assert_eq!(count_containing(&lines, "ERROR"), 0, "{lines:?}");
}

#[test]
fn stop_and_report_logs_one_summary_line() {
    let profiler = Profiler::builder().build();

    let lines = capture_logs(|| {
        profiler.start("y");
        assert!(profiler.stop_and_report("y").is_some());
    });

    let summaries = lines
        .iter()
        .filter(|line| line.contains("INFO") && line.contains("[y] took ["))
        .collect::<Vec<_>>();
    assert_eq!(summaries.len(), 1, "{lines:?}");

    let summary = summaries.first().unwrap();
    assert!(summary.contains("ms ("));
    assert!(summary.contains("s)] time for [1] calls (Avg ["));
    assert!(summary.contains("region=\"y\""));
    assert_eq!(count_containing(&lines, "ERROR"), 0, "{lines:?}");
}

#[test]
fn mismatched_stop_and_report_logs_error_without_summary() {
    let profiler = Profiler::builder().build();

    let lines = capture_logs(|| {
        assert!(profiler.stop_and_report("z").is_none());
    });

    assert_eq!(count_containing(&lines, "ERROR"), 1, "{lines:?}");
    assert_eq!(count_containing(&lines, "took ["), 0, "{lines:?}");
}

#[test]
fn print_stats_logs_report() {
    let profiler = Profiler::builder().build();

    let lines = capture_logs(|| {
        profiler.start("printed");
        profiler.stop("printed");
        profiler.print_stats();
    });

    assert_eq!(count_containing(&lines, "PersistentProfiler----"), 1, "{lines:?}");
    assert_eq!(count_containing(&lines, "[printed] Calls [1]"), 1, "{lines:?}");
}

#[test]
fn disabled_profiler_logs_nothing() {
    let profiler = Profiler::builder().enabled(false).build();

    let lines = capture_logs(|| {
        assert!(profiler.stop("x").is_none());
        assert!(profiler.stop_and_report("x").is_none());
        profiler.print_stats();
    });

    assert!(lines.is_empty(), "{lines:?}");
}
