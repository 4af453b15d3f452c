use std::cmp::Reverse;
use std::fmt::{self, Display};

use foldhash::{HashMap, HashMapExt};

use crate::RegionTotal;
use crate::registries::ThreadTableRegistry;

/// First line of every rendered report.
pub(crate) const REPORT_HEADER: &str = "PersistentProfiler----";

/// A ranked snapshot of the time spent in every region, summed over all threads.
///
/// Regions are ordered from the largest total time to the smallest, with equal totals
/// ordered by name.
///
/// For human-readable output, use the `Display` trait implementation. For machine-readable
/// output, inspect report contents via [`regions()`][Self::regions].
///
/// # Examples
///
/// ```
/// use persistent_profiler::Profiler;
///
/// let profiler = Profiler::builder().build();
///
/// profiler.start("parse");
/// profiler.stop("parse");
///
/// let report = profiler.report();
///
/// for region in report.regions() {
///     println!(
///         "{} took {} ms over {} calls",
///         region.name(),
///         region.total().total_millis(),
///         region.total().calls()
///     );
/// }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Report {
    // Sorted by total time descending, then by name ascending.
    regions: Box<[RegionSummary]>,
}

impl Report {
    /// Merges the totals of all threads into a ranked report.
    pub(crate) fn collect(registry: &ThreadTableRegistry) -> Self {
        let mut name_to_combined_total = HashMap::<String, RegionTotal>::new();

        registry.inspect(|_, tables| {
            for (name, total) in tables.totals() {
                if let Some(combined) = name_to_combined_total.get_mut(name) {
                    combined.merge_from(total);
                } else {
                    name_to_combined_total.insert(name.to_owned(), *total);
                }
            }
        });

        Self::from_combined_totals(name_to_combined_total)
    }

    fn from_combined_totals(totals: impl IntoIterator<Item = (String, RegionTotal)>) -> Self {
        let mut regions = totals
            .into_iter()
            .map(|(name, total)| RegionSummary { name, total })
            .collect::<Vec<_>>();

        regions.sort_by(|a, b| {
            Reverse(a.total.total_millis())
                .cmp(&Reverse(b.total.total_millis()))
                .then_with(|| a.name.cmp(&b.name))
        });

        Self {
            regions: regions.into_boxed_slice(),
        }
    }

    /// Iterates through the regions, largest total time first.
    pub fn regions(&self) -> impl Iterator<Item = &RegionSummary> {
        self.regions.iter()
    }

    /// Number of distinct regions in the report.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether no region has completed a single call.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{REPORT_HEADER}")?;

        for region in &self.regions {
            writeln!(f, "{region}")?;
        }

        Ok(())
    }
}

/// The combined totals of a single region, as part of a [`Report`].
#[derive(Clone, Debug)]
pub struct RegionSummary {
    name: String,
    total: RegionTotal,
}

impl RegionSummary {
    /// The name of the region.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Time and call count of the region summed over all threads.
    #[must_use]
    pub fn total(&self) -> RegionTotal {
        self.total
    }
}

impl Display for RegionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}ms / {}s] [{}] Calls [{}] Avg [{}]",
            self.total.total_millis(),
            self.total.total_seconds(),
            self.name,
            self.total.calls(),
            self.total.average_millis()
        )
    }
}
