use std::num::NonZero;

/// Cumulative elapsed time and call count for one region.
///
/// Depending on where it comes from, this describes either the region on a single thread
/// or the region summed across all threads of the process.
///
/// # Examples
///
/// ```
/// use persistent_profiler::Profiler;
///
/// let profiler = Profiler::builder().build();
///
/// profiler.start("load");
/// let total = profiler.stop("load");
///
/// # #[cfg(feature = "enabled")]
/// assert_eq!(total.map(|t| t.calls()), Some(1));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RegionTotal {
    total_millis: u64,
    calls: u64,
}

impl RegionTotal {
    /// Adds one completed start/stop pair that took `elapsed_millis`.
    ///
    /// Saturates instead of overflowing.
    pub(crate) fn record(&mut self, elapsed_millis: u64) {
        self.total_millis = self.total_millis.saturating_add(elapsed_millis);
        self.calls = self.calls.saturating_add(1);
    }

    /// Folds the totals of the same region from another thread into this one.
    pub(crate) fn merge_from(&mut self, other: &Self) {
        self.total_millis = self.total_millis.saturating_add(other.total_millis);
        self.calls = self.calls.saturating_add(other.calls);
    }

    /// Total elapsed milliseconds over all completed calls.
    #[must_use]
    pub fn total_millis(&self) -> u64 {
        self.total_millis
    }

    /// Total elapsed time in fractional seconds.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "only used for human-readable output, precision loss above 2^52 ms is irrelevant"
    )]
    pub fn total_seconds(&self) -> f64 {
        self.total_millis as f64 / 1000.0
    }

    /// Number of completed start/stop pairs.
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Mean milliseconds per call, truncated toward zero.
    ///
    /// Returns zero if there are no calls, which never happens for totals obtained
    /// from a profiler.
    #[must_use]
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "NonZero protects against division by zero"
    )]
    #[expect(
        clippy::integer_division,
        reason = "we accept that we lose the remainder - matches the established report format"
    )]
    pub fn average_millis(&self) -> u64 {
        NonZero::new(self.calls).map_or(0, |calls| self.total_millis / calls.get())
    }
}
