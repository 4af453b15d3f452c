//! Shortcuts for the process-wide profiler returned by [`Profiler::global()`].

use std::fmt;

use crate::{Profiler, RegionTotal, Report};

/// Marks the start of one call of the region `name` on the current thread.
///
/// See [`Profiler::start()`].
pub fn start(name: &str) {
    Profiler::global().start(name);
}

/// Marks the end of the most recent unmatched call of the region `name` on the current thread.
///
/// See [`Profiler::stop()`].
#[expect(
    clippy::must_use_candidate,
    reason = "stopping the region is the point, the returned total is optional information"
)]
pub fn stop(name: &str) -> Option<RegionTotal> {
    Profiler::global().stop(name)
}

/// Like [`stop()`] but also logs a summary line of the region.
///
/// See [`Profiler::stop_and_report()`].
#[expect(
    clippy::must_use_candidate,
    reason = "stopping the region is the point, the returned total is optional information"
)]
pub fn stop_and_report(name: &str) -> Option<RegionTotal> {
    Profiler::global().stop_and_report(name)
}

/// See [`Profiler::report()`].
#[must_use]
pub fn report() -> Report {
    Profiler::global().report()
}

/// See [`Profiler::write_report()`].
///
/// # Errors
///
/// Only fails if the buffer itself fails to accept the text.
pub fn write_report(out: &mut impl fmt::Write) -> fmt::Result {
    Profiler::global().write_report(out)
}

/// See [`Profiler::print_stats()`].
#[cfg_attr(test, mutants::skip)] // Only produces log output.
pub fn print_stats() {
    Profiler::global().print_stats();
}

/// Returns a callback that logs the report of the process-wide profiler.
///
/// Intended for binding to whatever decides when a report is wanted, such as a debug
/// button, a timer or a signal handler thread.
///
/// # Examples
///
/// ```
/// let on_print_requested: Box<dyn Fn() + Send + Sync> =
///     Box::new(persistent_profiler::print_stats_action());
///
/// on_print_requested();
/// ```
pub fn print_stats_action() -> impl Fn() + Send + Sync + 'static {
    print_stats
}

/// See [`Profiler::reset()`].
pub fn reset() {
    Profiler::global().reset();
}
