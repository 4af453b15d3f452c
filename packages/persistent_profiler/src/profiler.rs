use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, ThreadId};

use tracing::{debug, error, info};

use crate::clock::Stopwatch;
use crate::pal::PlatformFacade;
use crate::registries::{ThreadTableRegistry, ThreadTables};
use crate::{Error, ProfilerBuilder, RegionSpan, RegionTotal, Report, Result};

static GLOBAL_PROFILER: LazyLock<Profiler> = LazyLock::new(|| Profiler::builder().build());

/// Measures the wall-clock time spent in named regions of code, on any number of threads.
///
/// Call [`start()`][Self::start] and [`stop()`][Self::stop] with the same name on the same
/// thread to record one call of a region. Pairs may nest, including pairs with the same name,
/// in which case each stop matches the most recent unmatched start. Every completed pair
/// adds its own elapsed time to the totals, so overlapping pairs are not deduplicated.
///
/// Totals accumulate for the lifetime of the profiler until [`reset()`][Self::reset]. Use
/// [`report()`][Self::report] at any time to get a ranked view summed over all threads.
///
/// Most applications use the process-wide instance via [`Profiler::global()`] or the free
/// functions at the crate root. Separate instances are fully independent of each other.
///
/// # Unmatched starts
///
/// A start that is never stopped stays in memory until the profiler is reset. There is
/// no timeout.
///
/// # Examples
///
/// ```
/// use persistent_profiler::Profiler;
///
/// let profiler = Profiler::builder().build();
///
/// profiler.start("load");
/// // Work happens here.
/// profiler.stop("load");
///
/// let mut text = String::new();
/// profiler.write_report(&mut text).unwrap();
/// println!("{text}");
/// ```
#[derive(Debug)]
pub struct Profiler {
    enabled: bool,
    stopwatch: Stopwatch,
    registry: ThreadTableRegistry,
    mismatched_stops: AtomicU64,
}

impl Profiler {
    /// Starts building a new independent profiler.
    pub fn builder() -> ProfilerBuilder {
        ProfilerBuilder::new()
    }

    pub(crate) fn new(enabled: bool, platform: PlatformFacade) -> Self {
        Self {
            enabled,
            stopwatch: Stopwatch::new(platform),
            registry: ThreadTableRegistry::new(),
            mismatched_stops: AtomicU64::new(0),
        }
    }

    /// The process-wide profiler, created with default settings on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL_PROFILER
    }

    /// Whether this profiler records anything.
    #[must_use]
    #[inline]
    pub fn is_enabled(&self) -> bool {
        // The feature check is a constant, so a build without the feature compiles every
        // operation down to nothing.
        cfg!(feature = "enabled") && self.enabled
    }

    /// Marks the start of one call of the region `name` on the current thread.
    pub fn start(&self, name: &str) {
        if !self.is_enabled() {
            return;
        }

        // The clock is read while the registry is held so a concurrent reset cannot slip
        // between the reading and the push.
        self.registry.with_thread(thread::current().id(), |tables| {
            tables.push_start(name, self.stopwatch.elapsed_millis());
        });
    }

    /// Marks the end of the most recent unmatched call of the region `name` on the current
    /// thread and returns the updated totals of that region on this thread.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MismatchedStop`] if the current thread has no unmatched start for
    /// `name`, in which case no totals are touched. Returns [`Error::Disabled`] if the
    /// profiler is disabled.
    pub fn try_stop(&self, name: &str) -> Result<RegionTotal> {
        if !self.is_enabled() {
            return Err(Error::Disabled);
        }

        let thread_id = thread::current().id();

        let total = self.registry.with_thread(thread_id, |tables| {
            let now = self.stopwatch.elapsed_millis();
            let started_at = tables.pop_start(name)?;

            Some(tables.add_elapsed(name, now.saturating_sub(started_at)))
        });

        total.ok_or_else(|| {
            self.mismatched_stops.fetch_add(1, Ordering::Relaxed);

            Error::MismatchedStop {
                name: name.to_owned(),
                thread: thread_id,
            }
        })
    }

    /// Marks the end of the most recent unmatched call of the region `name` on the current
    /// thread and returns the updated totals of that region on this thread.
    ///
    /// A stop without a matching start is logged as an error and otherwise ignored,
    /// returning `None`. Also returns `None` if the profiler is disabled.
    pub fn stop(&self, name: &str) -> Option<RegionTotal> {
        if !self.is_enabled() {
            return None;
        }

        match self.try_stop(name) {
            Ok(total) => Some(total),
            Err(e @ Error::MismatchedStop { thread, .. }) => {
                error!(region = name, thread = ?thread, "{e}");
                None
            }
            Err(e) => {
                error!(region = name, "{e}");
                None
            }
        }
    }

    /// Same as [`stop()`][Self::stop], additionally logging a one-line summary of the
    /// totals of the region on the current thread.
    pub fn stop_and_report(&self, name: &str) -> Option<RegionTotal> {
        let total = self.stop(name)?;

        info!(
            region = name,
            "[{name}] took [{}ms ({}s)] time for [{}] calls (Avg [{}])",
            total.total_millis(),
            total.total_seconds(),
            total.calls(),
            total.average_millis()
        );

        Some(total)
    }

    /// Times the region `name` from now until the returned span is dropped.
    ///
    /// A disabled profiler returns an inert span without taking ownership of the name.
    pub fn region(&self, name: impl Into<String>) -> RegionSpan<'_> {
        if !self.is_enabled() {
            return RegionSpan::inert(self);
        }

        RegionSpan::new(self, name.into())
    }

    /// Adds one completed call of `elapsed_millis` to the totals of the region `name` on
    /// the thread `thread`, returning the updated totals.
    ///
    /// This is what [`stop()`][Self::stop] does after matching a start. It is exposed for
    /// callers that measure durations themselves. Returns `None` if the profiler is disabled.
    pub fn record_elapsed(
        &self,
        thread: ThreadId,
        name: &str,
        elapsed_millis: u64,
    ) -> Option<RegionTotal> {
        if !self.is_enabled() {
            return None;
        }

        Some(
            self.registry
                .with_thread(thread, |tables| tables.add_elapsed(name, elapsed_millis)),
        )
    }

    /// Collects the totals of all threads into a ranked report.
    ///
    /// The report is a fresh snapshot; collecting it does not change any totals. A disabled
    /// profiler always produces an empty report.
    #[must_use]
    pub fn report(&self) -> Report {
        if !self.is_enabled() {
            return Report::default();
        }

        Report::collect(&self.registry)
    }

    /// Renders the report into a caller-supplied text buffer.
    ///
    /// Writes a header line followed by one line per region, largest total time first.
    /// A disabled profiler writes nothing.
    ///
    /// # Errors
    ///
    /// Only fails if the buffer itself fails to accept the text.
    pub fn write_report(&self, out: &mut impl fmt::Write) -> fmt::Result {
        if !self.is_enabled() {
            return Ok(());
        }

        write!(out, "{}", self.report())
    }

    /// Logs the full report at info level.
    #[cfg_attr(test, mutants::skip)] // Only produces log output.
    pub fn print_stats(&self) {
        if !self.is_enabled() {
            return;
        }

        info!("\n{}", self.report());
    }

    /// Discards all totals and unmatched starts of every thread and restarts the clock at zero.
    ///
    /// Does not change whether the profiler is enabled.
    pub fn reset(&self) {
        if !self.is_enabled() {
            return;
        }

        self.registry.clear_then(|| {
            self.stopwatch.restart();
            self.mismatched_stops.store(0, Ordering::Relaxed);
        });

        debug!("profiler reset");
    }

    /// Number of starts on the current thread that are still waiting for their stop.
    #[must_use]
    pub fn pending_starts(&self) -> usize {
        self.registry
            .with_existing_thread(thread::current().id(), ThreadTables::pending_count)
            .unwrap_or_default()
    }

    /// Number of stops without a matching start since creation or the last reset.
    #[must_use]
    pub fn mismatched_stops(&self) -> u64 {
        self.mismatched_stops.load(Ordering::Relaxed)
    }
}
