#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Measure the wall-clock time spent in named regions of code over the whole lifetime of a
//! process, from any number of threads, and print a ranked report whenever you like.
//!
//! Mark a region with a pair of [`start()`] and [`stop()`] calls. Each completed pair adds its
//! elapsed time (in milliseconds) and one call to the running totals of that region. At any
//! point, [`report()`] merges the totals of all threads and ranks the regions by total time,
//! largest first.
//!
//! ```
//! use persistent_profiler::{start, stop, write_report};
//!
//! start("load_level");
//! // ... load the level ...
//! stop("load_level");
//!
//! let mut text = String::new();
//! write_report(&mut text).unwrap();
//! println!("{text}");
//! ```
//!
//! A rendered report looks like this:
//!
//! ```text
//! PersistentProfiler----
//! [300ms / 0.3s] [load_level] Calls [3] Avg [100]
//! [16ms / 0.016s] [draw_frame] Calls [4] Avg [4]
//! ```
//!
//! Each line holds the total milliseconds, the same in seconds, the region name, the number
//! of calls and the mean milliseconds per call (truncated).
//!
//! # Nesting
//!
//! Pairs may nest, including pairs with the same name. A stop always matches the most
//! recent unmatched start of that name on the same thread. Every pair counts on its own, so
//! the time of nested pairs of the same name is counted once per pair:
//!
//! ```
//! use persistent_profiler::Profiler;
//!
//! let profiler = Profiler::builder().build();
//!
//! profiler.start("visit");
//! profiler.start("visit");
//! profiler.stop("visit");
//! let total = profiler.stop("visit");
//!
//! # #[cfg(feature = "enabled")]
//! assert_eq!(total.map(|t| t.calls()), Some(2));
//! ```
//!
//! [`Profiler::region()`] returns a guard that stops the region when dropped.
//!
//! # Threads
//!
//! Starts and stops are tracked per thread: a region started on one thread cannot be stopped
//! on another. Totals are kept per thread and summed when a report is collected. Totals of
//! threads that have exited remain part of the report.
//!
//! # Mistakes
//!
//! A stop without a matching start is logged as an error via `tracing` and otherwise ignored.
//! It never panics and never affects any totals. Use [`Profiler::try_stop()`] to receive the
//! problem as an [`Error`] instead.
//!
//! A start that is never stopped stays in memory until [`reset()`] is called.
//!
//! # Logging
//!
//! [`stop_and_report()`] and [`print_stats()`] emit their output as `tracing` events at info
//! level. This package does not install a subscriber; that is up to the application.
//!
//! # Enabling and disabling
//!
//! All recording is gated by the `enabled` Cargo feature, which is on by default. Without it,
//! every operation does nothing beyond checking a constant. Individual profilers can also be
//! disabled at runtime via [`ProfilerBuilder::enabled()`].

mod clock;
mod constants;
mod error;
mod global;
mod pal;
mod profiler;
mod profiler_builder;
mod region_span;
mod registries;
mod reports;
mod totals;

pub(crate) use constants::*;
pub use error::*;
pub use global::*;
pub use profiler::*;
pub use profiler_builder::*;
pub use region_span::*;
pub use reports::*;
pub use totals::*;
